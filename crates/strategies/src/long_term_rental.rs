use crate::common::{rental_operating, validate_price};
use crate::error::StrategyError;
use crate::Strategy;
use amortization::derive_loan_terms;
use configuration::Assumptions;
use core_types::{PropertySnapshot, RentalMetrics, StrategyId, StrategyResult};
use rust_decimal::Decimal;

/// The conventional buy-and-hold rental: conventional financing, market rent,
/// ratio-driven operating expenses.
pub struct LongTermRental;

impl Strategy for LongTermRental {
    fn id(&self) -> StrategyId {
        StrategyId::LongTermRental
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let monthly_rent = property.monthly_rent.ok_or(StrategyError::MissingData {
            strategy: "long_term_rental",
            field: "monthly_rent",
        })?;

        tracing::debug!(%price, rent = %monthly_rent, "evaluating long-term rental");

        let loan = derive_loan_terms(
            price,
            assumptions.down_payment_rate,
            assumptions.interest_rate,
            assumptions.loan_term_years,
        )?;
        let cash_invested = loan.down_payment
            + price * assumptions.closing_cost_rate
            + assumptions.rehab_budget;

        let operating = rental_operating(
            price,
            monthly_rent * crate::common::MONTHS_PER_YEAR,
            assumptions.vacancy_rate,
            &loan,
            cash_invested,
            property,
            assumptions,
            Decimal::ZERO,
        );

        Ok(StrategyResult::LongTermRental(RentalMetrics {
            purchase_price: price,
            loan,
            operating,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_monthly_cash_flow
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

    fn property() -> PropertySnapshot {
        let mut p = PropertySnapshot::from_list_price(dec!(285000));
        p.monthly_rent = Some(dec!(2800));
        p.property_taxes = Some(dec!(5700));
        p.insurance = Some(dec!(2850));
        p
    }

    #[test]
    fn noi_debt_service_and_ratios_agree() {
        let result = LongTermRental
            .calculate(dec!(285000), &property(), &assumptions())
            .unwrap();
        let StrategyResult::LongTermRental(m) = &result else {
            panic!("wrong variant");
        };

        // Effective income: 2800 * 12 * 0.95 = 31,920.
        assert_eq!(m.operating.effective_income_annual, dec!(31920));
        // Expenses: 5700 + 2850 + 18% of effective income.
        assert_eq!(
            m.operating.operating_expenses_annual,
            dec!(5700) + dec!(2850) + dec!(0.18) * dec!(31920)
        );
        // Cash flow, cap rate and DSCR must all derive from the same NOI.
        let noi = m.operating.noi_annual;
        assert_eq!(m.operating.cap_rate, noi / dec!(285000));
        let annual_debt = m.operating.debt_service_monthly * dec!(12);
        assert_eq!(m.operating.dscr, Some(noi / annual_debt));
        assert_eq!(
            m.operating.monthly_cash_flow,
            noi / dec!(12) - m.operating.debt_service_monthly
        );
    }

    #[test]
    fn missing_rent_fails_fast() {
        let p = PropertySnapshot::from_list_price(dec!(285000));
        let err = LongTermRental
            .calculate(dec!(285000), &p, &assumptions())
            .unwrap_err();
        assert!(matches!(err, StrategyError::MissingData { field: "monthly_rent", .. }));
    }

    #[test]
    fn non_positive_price_fails_fast() {
        let err = LongTermRental
            .calculate(Decimal::ZERO, &property(), &assumptions())
            .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidInput { .. }));
    }

    #[test]
    fn missing_taxes_fall_back_to_estimate() {
        let mut p = property();
        p.property_taxes = None;
        p.insurance = None;
        let result = LongTermRental
            .calculate(dec!(285000), &p, &assumptions())
            .unwrap();
        let StrategyResult::LongTermRental(m) = &result else {
            panic!("wrong variant");
        };
        // 1.1% taxes + 1% insurance estimates on price, plus 18% of income.
        let expected = dec!(285000) * dec!(0.021) + dec!(0.18) * dec!(31920);
        assert_eq!(m.operating.operating_expenses_annual, expected);
    }
}
