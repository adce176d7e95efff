//! # Dealscope Strategy Library
//!
//! This crate contains the core underwriting logic for the Dealscope engine.
//! It defines a universal `Strategy` trait and the six concrete calculators.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   HTTP, solving or scoring. It depends only on `core-types`,
//!   `configuration` and `amortization`.
//! - **Strategy Agnostic Callers:** By using the `Strategy` trait, the price
//!   solver and the verdict engine can operate on any strategy without
//!   knowing its internal details.
//! - **Pure Functions:** Every calculator maps (price, property,
//!   assumptions) to a `StrategyResult` with no hidden state and no
//!   cross-strategy calls. Two calls with equal inputs return equal outputs.
//!
//! ## Public API
//!
//! - `Strategy`: the trait all calculators implement.
//! - `create_strategy`: the factory keyed by `StrategyId`.
//! - The concrete calculator structs themselves (e.g. `LongTermRental`).

// Declare all the modules that constitute this crate.
pub mod brrrr;
pub mod common;
pub mod error;
pub mod factory;
pub mod fix_and_flip;
pub mod house_hack;
pub mod long_term_rental;
pub mod short_term_rental;
pub mod wholesale;

// Re-export the key components to create a clean, public-facing API.
pub use brrrr::Brrrr;
pub use error::StrategyError;
pub use factory::create_strategy;
pub use fix_and_flip::FixAndFlip;
pub use house_hack::HouseHack;
pub use long_term_rental::LongTermRental;
pub use short_term_rental::ShortTermRental;
pub use wholesale::Wholesale;

// Re-export StrategyId from core_types.
pub use core_types::enums::StrategyId;

use configuration::Assumptions;
use core_types::{PropertySnapshot, StrategyResult};
use rust_decimal::Decimal;

/// The common shape of all six strategy calculators.
///
/// Calculators are stateless; `Send + Sync` lets the verdict engine fan them
/// out across threads. The profitability metric exposed through
/// `StrategyResult::objective` is monotone non-increasing in price by
/// construction, which is the precondition the price solver relies on.
pub trait Strategy: Send + Sync {
    fn id(&self) -> StrategyId;

    /// Evaluates the strategy at the given purchase price.
    ///
    /// Fails fast with `StrategyError::InvalidInput` on a non-positive price
    /// and `StrategyError::MissingData` when the snapshot lacks a required
    /// fact. Defaults cover optional assumptions only, never price.
    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError>;

    /// The objective value a target-buy price must reach for this strategy.
    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal;
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AssumptionOverrides, EngineConfig};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    /// A snapshot rich enough for every strategy to evaluate.
    fn full_property() -> PropertySnapshot {
        let mut p = PropertySnapshot::from_list_price(dec!(300000));
        p.bedrooms = Some(4);
        p.monthly_rent = Some(dec!(2600));
        p.property_taxes = Some(dec!(4200));
        p.insurance = Some(dec!(2100));
        p.arv = Some(dec!(380000));
        p.average_daily_rate = Some(dec!(185));
        p.occupancy_rate = Some(dec!(0.68));
        p
    }

    fn assumptions() -> Assumptions {
        let overrides = AssumptionOverrides {
            rehab_budget: Some(dec!(25000)),
            ..Default::default()
        };
        EngineConfig::default().resolve_assumptions(&overrides)
    }

    #[test]
    fn every_strategy_evaluates_the_full_snapshot() {
        let property = full_property();
        let assumptions = assumptions();
        for id in StrategyId::ALL {
            let result = create_strategy(id)
                .calculate(dec!(300000), &property, &assumptions)
                .unwrap();
            assert_eq!(result.strategy(), id);
        }
    }

    #[test]
    fn equal_inputs_give_equal_outputs() {
        let property = full_property();
        let assumptions = assumptions();
        for id in StrategyId::ALL {
            let calc = create_strategy(id);
            let a = calc.calculate(dec!(275000), &property, &assumptions).unwrap();
            let b = calc.calculate(dec!(275000), &property, &assumptions).unwrap();
            assert_eq!(a, b);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        /// The solver's precondition: holding everything else fixed, the
        /// profitability metric strictly decreases as price increases, for
        /// all six strategies.
        #[test]
        fn objective_is_strictly_decreasing_in_price(
            price_dollars in 50_000u64..400_000,
            step_dollars in 1_000u64..100_000,
        ) {
            let property = full_property();
            let assumptions = assumptions();
            let lower = Decimal::from(price_dollars);
            let higher = Decimal::from(price_dollars + step_dollars);

            for id in StrategyId::ALL {
                let calc = create_strategy(id);
                let at_lower = calc.calculate(lower, &property, &assumptions).unwrap();
                let at_higher = calc.calculate(higher, &property, &assumptions).unwrap();
                prop_assert!(
                    at_lower.objective() > at_higher.objective(),
                    "{} objective did not decrease: {} -> {}",
                    id,
                    at_lower.objective(),
                    at_higher.objective()
                );
            }
        }
    }
}
