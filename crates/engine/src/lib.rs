//! # Dealscope Verdict Engine
//!
//! The top-level orchestrator. One call runs all six strategies against a
//! property, solves each strategy's price ladder, ranks the outcomes, scores
//! the deal and returns a single structured `Verdict`.
//!
//! The engine is pure and synchronous: no I/O, no shared mutable state, no
//! clock reads (the caller supplies "now"). Within one verdict the six
//! strategy evaluations are independent and fan out across a rayon pool, one
//! task per strategy, joined before scoring. A best-effort partial verdict
//! is always preferred over a hard failure: a strategy that cannot be
//! evaluated or priced is carried with its error message while the rest of
//! the verdict completes.

use chrono::{DateTime, Utc};
use configuration::{AssumptionOverrides, Assumptions, EngineConfig};
use core_types::{PropertySnapshot, StrategyId, StrategyResult};
use rayon::prelude::*;
use rust_decimal::Decimal;
use scoring::{DealScore, DealScorer, MarketSignalModel, ScoreInputs};
use serde::Serialize;
use solver::PriceSolver;
use strategies::create_strategy;
use uuid::Uuid;

pub mod error;
mod factors;
pub mod verdict;

pub use error::EngineError;
pub use verdict::{StrategyOutcome, Verdict};

/// The response to a single-strategy analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyAnalysis {
    pub result: StrategyResult,
    pub targets: Option<core_types::PriceTargets>,
    pub deal_score: DealScore,
}

/// The central orchestrator wiring calculators, solver and scorer together.
pub struct VerdictEngine {
    config: EngineConfig,
    solver: PriceSolver,
    scorer: DealScorer,
}

impl VerdictEngine {
    pub fn new(config: EngineConfig) -> Self {
        let solver = PriceSolver::new(config.solver.clone());
        let scorer = DealScorer::new(config.scoring.clone());
        Self {
            config,
            solver,
            scorer,
        }
    }

    /// Builds an engine with a host-supplied market-alignment model.
    pub fn with_market_model(config: EngineConfig, model: Box<dyn MarketSignalModel>) -> Self {
        let solver = PriceSolver::new(config.solver.clone());
        let scorer = DealScorer::with_market_model(config.scoring.clone(), model);
        Self {
            config,
            solver,
            scorer,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluates one strategy at one price: metrics, price ladder, score.
    ///
    /// Fails fast on an invalid snapshot, bad assumptions or a calculator
    /// error; degrades gracefully when only the price solving fails.
    pub fn analyze(
        &self,
        strategy_id: StrategyId,
        purchase_price: Decimal,
        property: &PropertySnapshot,
        overrides: &AssumptionOverrides,
    ) -> Result<StrategyAnalysis, EngineError> {
        property.validate()?;
        let assumptions = self.config.resolve_assumptions(overrides);
        assumptions.validate()?;

        let calc = create_strategy(strategy_id);
        let result = calc.calculate(purchase_price, property, &assumptions)?;
        let targets = match self.solver.solve(calc.as_ref(), property, &assumptions) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(strategy = %strategy_id, error = %e, "price solving failed");
                None
            }
        };

        let deal_score = self.scorer.score(&ScoreInputs {
            list_price: property.list_price,
            primary_targets: targets.as_ref(),
            best_result: Some(&result),
            property,
        })?;

        Ok(StrategyAnalysis {
            result,
            targets,
            deal_score,
        })
    }

    /// Runs the full verdict: all six strategies, price ladders, ranking,
    /// scoring.
    pub fn run(
        &self,
        property: &PropertySnapshot,
        overrides: &AssumptionOverrides,
        as_of: DateTime<Utc>,
    ) -> Result<Verdict, EngineError> {
        property.validate()?;
        let assumptions = self.config.resolve_assumptions(overrides);
        assumptions.validate()?;
        let list_price = property.list_price;

        // One task per strategy; collect preserves the fixed order before
        // ranking reorders.
        let mut outcomes: Vec<StrategyOutcome> = StrategyId::ALL
            .par_iter()
            .map(|&id| self.evaluate_strategy(id, property, &assumptions))
            .collect();

        // Rank by how much of the asking price the strategy can justify
        // paying; strategies without a solvable ladder sort last, ties keep
        // the fixed evaluation order.
        outcomes.sort_by(|a, b| ranking_key(b).cmp(&ranking_key(a)));
        for (index, outcome) in outcomes.iter_mut().enumerate() {
            outcome.rank = (index + 1) as u32;
        }

        let primary = outcomes.iter().find(|o| o.targets.is_some());
        let primary_strategy = primary.map(|o| o.strategy);
        let primary_targets = primary.and_then(|o| o.targets.clone());
        let best_result = primary.and_then(|o| o.at_list_price.as_ref());

        let deal_score = self.scorer.score(&ScoreInputs {
            list_price,
            primary_targets: primary_targets.as_ref(),
            best_result,
            property,
        })?;

        let opportunity_factors =
            factors::opportunity_factors(property, primary_targets.as_ref(), list_price);
        let return_factors = factors::return_factors(&outcomes);

        tracing::info!(
            score = %deal_score.score,
            grade = %deal_score.grade,
            primary = ?primary_strategy,
            "verdict complete"
        );

        Ok(Verdict {
            verdict_id: Uuid::new_v4(),
            as_of,
            config_version: self.config.version.clone(),
            property: property.clone(),
            list_price,
            primary_strategy,
            purchase_price: primary_targets.as_ref().and_then(|t| t.target_buy_price),
            breakeven_price: primary_targets.as_ref().and_then(|t| t.breakeven_price),
            deal_score,
            strategies: outcomes,
            opportunity_factors,
            return_factors,
        })
    }

    /// One strategy's slice of the verdict. Never panics and never fails
    /// the verdict: errors ride along in the outcome.
    fn evaluate_strategy(
        &self,
        id: StrategyId,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> StrategyOutcome {
        let calc = create_strategy(id);

        let (at_list_price, mut error) =
            match calc.calculate(property.list_price, property, assumptions) {
                Ok(result) => (Some(result), None),
                Err(e) => (None, Some(e.to_string())),
            };

        let targets = match self.solver.solve(calc.as_ref(), property, assumptions) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(strategy = %id, error = %e, "price solving failed");
                if error.is_none() {
                    error = Some(e.to_string());
                }
                None
            }
        };

        let at_target_price = targets
            .as_ref()
            .and_then(|t| t.target_buy_price)
            .filter(|p| *p > Decimal::ZERO)
            .and_then(|p| calc.calculate(p, property, assumptions).ok());

        StrategyOutcome {
            strategy: id,
            rank: 0,
            at_list_price,
            at_target_price,
            targets,
            error,
        }
    }
}

fn ranking_key(outcome: &StrategyOutcome) -> Option<Decimal> {
    outcome
        .targets
        .as_ref()
        .filter(|t| t.achievable)
        .and_then(|t| t.target_buy_pct_of_list)
}
