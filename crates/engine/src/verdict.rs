use chrono::{DateTime, Utc};
use core_types::{PriceTargets, PropertySnapshot, StrategyId, StrategyResult};
use rust_decimal::Decimal;
use scoring::DealScore;
use serde::Serialize;
use uuid::Uuid;

/// Everything the engine learned about one strategy, solved and ranked.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    pub strategy: StrategyId,
    /// 1-based position in the ranked list; strategies that could not be
    /// evaluated sort last.
    pub rank: u32,
    /// The strategy evaluated at the asking price.
    pub at_list_price: Option<StrategyResult>,
    /// The strategy re-evaluated at its own target-buy price.
    pub at_target_price: Option<StrategyResult>,
    pub targets: Option<PriceTargets>,
    /// Present when evaluation or solving failed; the verdict still carries
    /// the other strategies.
    pub error: Option<String>,
}

/// The engine's single structured answer for one property.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub verdict_id: Uuid,
    /// Caller-supplied "now"; the engine itself never reads a clock.
    pub as_of: DateTime<Utc>,
    /// Version tag of the default table the assumptions were resolved over.
    pub config_version: String,
    pub property: PropertySnapshot,
    pub list_price: Decimal,
    /// The best-ranked strategy, when at least one could be priced.
    pub primary_strategy: Option<StrategyId>,
    /// The primary strategy's target-buy price: what the engine would offer.
    pub purchase_price: Option<Decimal>,
    pub breakeven_price: Option<Decimal>,
    pub deal_score: DealScore,
    /// All six strategies, best first.
    pub strategies: Vec<StrategyOutcome>,
    pub opportunity_factors: Vec<String>,
    pub return_factors: Vec<String>,
}
