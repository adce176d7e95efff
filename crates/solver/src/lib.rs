//! # Price Solver
//!
//! Root-finds the two prices every screen in the product hangs off: the
//! breakeven price (profitability crosses zero) and the target-buy price
//! (profitability meets the strategy's threshold). Both are found by
//! bisection over the strategy's profitability metric, which is monotone
//! non-increasing in price by construction of the calculators.
//!
//! The wholesale price is never solved independently; it is the target-buy
//! price times a fixed discount.

use configuration::{Assumptions, SolverSettings};
use core_types::{PriceTargets, PropertySnapshot, StrategyId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strategies::Strategy;

pub mod error;

pub use error::SolverError;

/// The lowest price a calculator will accept; stands in for "free" when
/// probing whether an objective is achievable at all.
const FLOOR_PRICE: Decimal = dec!(1);

pub struct PriceSolver {
    settings: SolverSettings,
}

impl PriceSolver {
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// Solves the price ladder for one strategy.
    ///
    /// Returns `Err` only when the objective cannot be bisected at all (a
    /// strategy evaluation error, or a monotonicity violation caught by the
    /// sign-consistency pre-check). An objective that simply cannot be met
    /// even at a token price is not an error: the prices pin to zero and
    /// `achievable` is false.
    pub fn solve(
        &self,
        strategy: &dyn Strategy,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<PriceTargets, SolverError> {
        let list_price = property.list_price;
        let upper = self.upper_bound(strategy.id(), property);

        let objective = |price: Decimal| -> Result<Decimal, SolverError> {
            Ok(strategy
                .calculate(price, property, assumptions)?
                .objective())
        };

        let at_floor = objective(FLOOR_PRICE)?;
        let at_upper = objective(upper)?;
        // Sign-consistency pre-check: a metric that improves with price
        // violates the monotonicity precondition, and bisection over it
        // would converge to garbage.
        if at_floor < at_upper {
            return Err(SolverError::Unsolvable {
                strategy: strategy.id().to_string(),
                reason: format!(
                    "objective rises with price ({at_floor} at ${FLOOR_PRICE} vs {at_upper} at ${upper})"
                ),
            });
        }

        // Even a token price misses breakeven: pin at zero rather than
        // extrapolating a negative price.
        if at_floor < Decimal::ZERO {
            tracing::debug!(strategy = %strategy.id(), "objective unreachable at any price");
            return Ok(PriceTargets {
                strategy: strategy.id(),
                breakeven_price: Some(Decimal::ZERO),
                target_buy_price: Some(Decimal::ZERO),
                wholesale_price: Some(Decimal::ZERO),
                breakeven_pct_of_list: Some(Decimal::ZERO),
                target_buy_pct_of_list: Some(Decimal::ZERO),
                wholesale_pct_of_list: Some(Decimal::ZERO),
                achievable: false,
            });
        }

        let breakeven = self.bisect(&objective, Decimal::ZERO, upper, at_upper)?;

        let threshold = strategy.target_threshold(assumptions);
        let (target_buy, achievable) = if at_floor < threshold {
            (Decimal::ZERO, false)
        } else {
            let solved = self.bisect(&objective, threshold, upper, at_upper)?;
            // The threshold solve can never exceed breakeven; clamp against
            // tolerance wobble at the boundary.
            (solved.min(breakeven), true)
        };

        let wholesale = target_buy * self.settings.wholesale_discount;

        let pct = |price: Decimal| {
            if list_price > Decimal::ZERO {
                Some(price / list_price)
            } else {
                None
            }
        };

        Ok(PriceTargets {
            strategy: strategy.id(),
            breakeven_price: Some(breakeven),
            target_buy_price: Some(target_buy),
            wholesale_price: Some(wholesale),
            breakeven_pct_of_list: pct(breakeven),
            target_buy_pct_of_list: pct(target_buy),
            wholesale_pct_of_list: pct(wholesale),
            achievable,
        })
    }

    /// The search range is anchored to list price, except for the resale
    /// strategies whose economics are set by ARV, not by the asking price.
    fn upper_bound(&self, strategy: StrategyId, property: &PropertySnapshot) -> Decimal {
        match strategy {
            StrategyId::FixAndFlip | StrategyId::Wholesale => property
                .arv
                .unwrap_or(property.list_price)
                .max(property.list_price),
            _ => property.list_price,
        }
    }

    /// Finds the largest price at which the objective still meets `target`.
    ///
    /// Precondition: objective(lo) >= target. The iteration budget is a hard
    /// cap; on a [0, price] range the $1 tolerance is reached long before 60
    /// halvings.
    fn bisect(
        &self,
        objective: &dyn Fn(Decimal) -> Result<Decimal, SolverError>,
        target: Decimal,
        upper: Decimal,
        value_at_upper: Decimal,
    ) -> Result<Decimal, SolverError> {
        // Still meeting the objective at the top of the range: the true
        // crossing lies above it, so pin at the range boundary.
        if value_at_upper >= target {
            return Ok(upper);
        }

        let mut lo = Decimal::ZERO;
        let mut hi = upper;
        let mut iterations = 0u32;
        while hi - lo > self.settings.price_tolerance
            && iterations < self.settings.max_iterations
        {
            let mid = (lo + hi) / dec!(2);
            if objective(mid.max(FLOOR_PRICE))? >= target {
                lo = mid;
            } else {
                hi = mid;
            }
            iterations += 1;
        }
        Ok(lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AssumptionOverrides, EngineConfig};
    use proptest::prelude::*;
    use strategies::create_strategy;

    fn solver() -> PriceSolver {
        PriceSolver::new(EngineConfig::default().solver.clone())
    }

    fn assumptions() -> Assumptions {
        EngineConfig::default().resolve_assumptions(&AssumptionOverrides::default())
    }

    fn rental_property(list_price: Decimal, rent: Decimal) -> PropertySnapshot {
        let mut p = PropertySnapshot::from_list_price(list_price);
        p.bedrooms = Some(4);
        p.monthly_rent = Some(rent);
        p.property_taxes = Some(dec!(3600));
        p.insurance = Some(dec!(1800));
        p.arv = Some(list_price * dec!(1.25));
        p.average_daily_rate = Some(dec!(180));
        p.occupancy_rate = Some(dec!(0.65));
        p
    }

    #[test]
    fn breakeven_feeds_back_to_zero_cash_flow() {
        let property = rental_property(dec!(350000), dec!(2400));
        let assumptions = assumptions();
        let calc = create_strategy(StrategyId::LongTermRental);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();

        let breakeven = targets.breakeven_price.unwrap();
        assert!(breakeven > Decimal::ZERO);
        let result = calc
            .calculate(breakeven, &property, &assumptions)
            .unwrap();
        // Within a dollar a month of flat.
        assert!(result.objective().abs() < dec!(1));
    }

    #[test]
    fn target_buy_meets_the_threshold() {
        let property = rental_property(dec!(350000), dec!(2400));
        let assumptions = assumptions();
        let calc = create_strategy(StrategyId::LongTermRental);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();

        let target_buy = targets.target_buy_price.unwrap();
        assert!(targets.achievable);
        let result = calc.calculate(target_buy, &property, &assumptions).unwrap();
        // $200/month at the solved price, within the price tolerance.
        assert!(result.objective() >= dec!(199));
    }

    #[test]
    fn ladder_ordering_holds_for_every_strategy() {
        let property = rental_property(dec!(300000), dec!(2600));
        let overrides = AssumptionOverrides {
            rehab_budget: Some(dec!(20000)),
            ..Default::default()
        };
        let assumptions = EngineConfig::default().resolve_assumptions(&overrides);

        for id in StrategyId::ALL {
            let calc = create_strategy(id);
            let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();
            let breakeven = targets.breakeven_price.unwrap();
            let target_buy = targets.target_buy_price.unwrap();
            let wholesale = targets.wholesale_price.unwrap();
            assert!(breakeven >= target_buy, "{id}: {breakeven} < {target_buy}");
            assert!(target_buy >= wholesale, "{id}: {target_buy} < {wholesale}");
            assert!(wholesale >= Decimal::ZERO, "{id}");
        }
    }

    #[test]
    fn hopeless_objective_pins_to_zero() {
        // $100/month of rent can never carry taxes and insurance.
        let mut property = rental_property(dec!(350000), dec!(100));
        property.property_taxes = Some(dec!(6000));
        let assumptions = assumptions();
        let calc = create_strategy(StrategyId::LongTermRental);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();

        assert!(!targets.achievable);
        assert_eq!(targets.breakeven_price, Some(Decimal::ZERO));
        assert_eq!(targets.target_buy_price, Some(Decimal::ZERO));
        assert_eq!(targets.wholesale_price, Some(Decimal::ZERO));
    }

    #[test]
    fn profitable_through_the_range_pins_to_list() {
        // Rent far above anything the price can cost: profitable even at
        // full list, so breakeven pins to the top of the search range.
        let property = rental_property(dec!(150000), dec!(5000));
        let assumptions = assumptions();
        let calc = create_strategy(StrategyId::LongTermRental);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();
        assert_eq!(targets.breakeven_price, Some(dec!(150000)));
    }

    #[test]
    fn flip_range_is_anchored_to_arv() {
        // A deeply under-listed flip: breakeven sits above list price, which
        // the ARV-anchored range can reach.
        let mut property = rental_property(dec!(100000), dec!(1500));
        property.arv = Some(dec!(300000));
        let overrides = AssumptionOverrides {
            rehab_budget: Some(dec!(30000)),
            ..Default::default()
        };
        let assumptions = EngineConfig::default().resolve_assumptions(&overrides);
        let calc = create_strategy(StrategyId::FixAndFlip);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();
        assert!(targets.breakeven_price.unwrap() > dec!(100000));
    }

    #[test]
    fn wholesale_price_is_a_fixed_discount_of_target_buy() {
        let property = rental_property(dec!(300000), dec!(2600));
        let assumptions = assumptions();
        let calc = create_strategy(StrategyId::LongTermRental);
        let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();
        assert_eq!(
            targets.wholesale_price.unwrap(),
            targets.target_buy_price.unwrap() * dec!(0.70)
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        /// breakeven >= target_buy >= wholesale >= 0 across randomized
        /// rentals.
        #[test]
        fn ordering_invariant(
            list_thousands in 100u64..600,
            rent in 800u64..4_000,
        ) {
            let property = rental_property(
                Decimal::from(list_thousands * 1_000),
                Decimal::from(rent),
            );
            let assumptions = assumptions();
            let calc = create_strategy(StrategyId::LongTermRental);
            let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();

            let breakeven = targets.breakeven_price.unwrap();
            let target_buy = targets.target_buy_price.unwrap();
            let wholesale = targets.wholesale_price.unwrap();
            prop_assert!(breakeven >= target_buy);
            prop_assert!(target_buy >= wholesale);
            prop_assert!(wholesale >= Decimal::ZERO);
        }

        /// Feeding the breakeven back through the calculator lands within a
        /// dollar a month of zero whenever breakeven is interior to the
        /// search range.
        #[test]
        fn breakeven_round_trip(
            list_thousands in 150u64..500,
            rent in 1_200u64..3_500,
        ) {
            let property = rental_property(
                Decimal::from(list_thousands * 1_000),
                Decimal::from(rent),
            );
            let assumptions = assumptions();
            let calc = create_strategy(StrategyId::LongTermRental);
            let targets = solver().solve(calc.as_ref(), &property, &assumptions).unwrap();
            let breakeven = targets.breakeven_price.unwrap();

            prop_assume!(targets.achievable);
            prop_assume!(breakeven > Decimal::ZERO && breakeven < property.list_price);
            let result = calc.calculate(breakeven, &property, &assumptions).unwrap();
            prop_assert!(result.objective().abs() < dec!(1));
        }
    }
}
