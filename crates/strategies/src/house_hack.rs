use crate::common::{annual_insurance, annual_taxes, validate_price, MONTHS_PER_YEAR};
use crate::error::StrategyError;
use crate::Strategy;
use amortization::derive_loan_terms;
use configuration::Assumptions;
use core_types::{HouseHackMetrics, PropertySnapshot, StrategyId, StrategyResult};
use rust_decimal::Decimal;

/// Owner-occupied purchase with bedrooms rented to roommates.
///
/// The metric that matters is not cash flow but what the owner saves against
/// renting a comparable home: market rent minus the effective cost of
/// owning after roommate income.
pub struct HouseHack;

impl Strategy for HouseHack {
    fn id(&self) -> StrategyId {
        StrategyId::HouseHack
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let market_rent_monthly = property.monthly_rent.ok_or(StrategyError::MissingData {
            strategy: "house_hack",
            field: "monthly_rent",
        })?;
        let total_bedrooms = property.bedrooms.ok_or(StrategyError::MissingData {
            strategy: "house_hack",
            field: "bedrooms",
        })?;
        if total_bedrooms < 2 {
            return Err(StrategyError::invalid_input(
                "bedrooms",
                "house hacking needs at least two bedrooms",
            ));
        }

        tracing::debug!(%price, bedrooms = total_bedrooms, "evaluating house hack");

        // The owner keeps one room regardless of how aggressive the
        // requested split is.
        let rooms_rented = assumptions
            .rooms_rented
            .unwrap_or(total_bedrooms - 1)
            .min(total_bedrooms - 1);
        let room_rent_monthly =
            market_rent_monthly * Decimal::from(rooms_rented) / Decimal::from(total_bedrooms);
        let effective_room_income =
            room_rent_monthly * (Decimal::ONE - assumptions.vacancy_rate);

        let loan = derive_loan_terms(
            price,
            assumptions.house_hack_down_payment_rate,
            assumptions.interest_rate,
            assumptions.loan_term_years,
        )?;

        let taxes_monthly = annual_taxes(price, property, assumptions) / MONTHS_PER_YEAR;
        let insurance_monthly = annual_insurance(price, property, assumptions) / MONTHS_PER_YEAR;
        let piti_monthly = loan.monthly_payment + taxes_monthly + insurance_monthly;

        // Taxes and insurance already live inside PITI; only the
        // ratio-driven costs are charged on the roommate income here.
        let operating_expenses_monthly = (assumptions.management_rate
            + assumptions.maintenance_rate
            + assumptions.capex_rate)
            * effective_room_income;

        let effective_housing_cost_monthly =
            piti_monthly + operating_expenses_monthly - effective_room_income;
        let monthly_savings = market_rent_monthly - effective_housing_cost_monthly;
        let annual_savings = monthly_savings * MONTHS_PER_YEAR;

        let total_cash_invested = loan.down_payment + price * assumptions.closing_cost_rate;
        let savings_on_cash_return = if total_cash_invested > Decimal::ZERO {
            Some(annual_savings / total_cash_invested)
        } else {
            None
        };

        Ok(StrategyResult::HouseHack(HouseHackMetrics {
            purchase_price: price,
            loan,
            total_bedrooms,
            rooms_rented,
            room_rent_monthly,
            piti_monthly,
            operating_expenses_monthly,
            effective_housing_cost_monthly,
            market_rent_monthly,
            monthly_savings,
            annual_savings,
            total_cash_invested,
            savings_on_cash_return,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_monthly_savings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AssumptionOverrides, EngineConfig};
    use rust_decimal_macros::dec;

    fn assumptions() -> Assumptions {
        EngineConfig::default().resolve_assumptions(&AssumptionOverrides::default())
    }

    fn four_bedroom() -> PropertySnapshot {
        let mut p = PropertySnapshot::from_list_price(dec!(320000));
        p.bedrooms = Some(4);
        p.monthly_rent = Some(dec!(2400));
        p.property_taxes = Some(dec!(3840));
        p.insurance = Some(dec!(1920));
        p
    }

    #[test]
    fn roommates_cover_most_of_the_mortgage() {
        let result = HouseHack
            .calculate(dec!(320000), &four_bedroom(), &assumptions())
            .unwrap();
        let StrategyResult::HouseHack(m) = &result else {
            panic!("wrong variant");
        };
        assert_eq!(m.rooms_rented, 3);
        // Three of four rooms at the market split: 2400 * 3/4.
        assert_eq!(m.room_rent_monthly, dec!(1800));
        assert_eq!(
            m.effective_housing_cost_monthly,
            m.piti_monthly + m.operating_expenses_monthly
                - m.room_rent_monthly * dec!(0.95)
        );
        assert_eq!(
            m.monthly_savings,
            m.market_rent_monthly - m.effective_housing_cost_monthly
        );
    }

    #[test]
    fn requested_split_cannot_evict_the_owner() {
        let overrides = AssumptionOverrides {
            rooms_rented: Some(9),
            ..Default::default()
        };
        let assumptions = EngineConfig::default().resolve_assumptions(&overrides);
        let result = HouseHack
            .calculate(dec!(320000), &four_bedroom(), &assumptions)
            .unwrap();
        let StrategyResult::HouseHack(m) = &result else {
            panic!("wrong variant");
        };
        assert_eq!(m.rooms_rented, 3);
    }

    #[test]
    fn one_bedroom_cannot_be_hacked() {
        let mut p = four_bedroom();
        p.bedrooms = Some(1);
        let err = HouseHack
            .calculate(dec!(320000), &p, &assumptions())
            .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidInput { .. }));
    }

    #[test]
    fn low_down_payment_financing_is_used() {
        let result = HouseHack
            .calculate(dec!(320000), &four_bedroom(), &assumptions())
            .unwrap();
        let StrategyResult::HouseHack(m) = &result else {
            panic!("wrong variant");
        };
        // FHA-style 3.5% down.
        assert_eq!(m.loan.down_payment, dec!(320000) * dec!(0.035));
    }
}
