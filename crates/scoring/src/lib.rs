//! # Dealscope Deal Scorer
//!
//! This crate turns strategy outcomes and qualitative market signals into a
//! single composite score with a letter grade. It acts as the "unbiased
//! judge" of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Logic:** A pure logic crate; it has no knowledge of solving
//!   or transport. It depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** The `DealScorer` takes fully-computed
//!   inputs and produces a `DealScore`. Missing inputs degrade a component
//!   to a flagged neutral value; scoring never hard-fails on sparse data.
//! - **One Grade Table:** The score-to-grade mapping is a single ordered
//!   threshold table used everywhere scores are graded.
//!
//! ## Public API
//!
//! - `DealScorer`: the aggregation logic, with a pluggable market model.
//! - `DealScore`: the composite score, grade, label, color and components.
//! - `MarketSignalModel`: the injection point for a host's alignment model.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod market;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{DealScorer, ScoreInputs};
pub use error::ScoringError;
pub use market::{DefaultMarketModel, MarketSignalModel};
pub use report::{color_for, grade_for, label_for, ComponentScores, DealScore};
