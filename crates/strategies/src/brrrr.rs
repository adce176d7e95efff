use crate::common::{rental_operating, validate_price, MONTHS_PER_YEAR};
use crate::error::StrategyError;
use crate::Strategy;
use amortization::Loan;
use configuration::Assumptions;
use core_types::{
    AcquisitionPhase, BrrrrMetrics, LoanTerms, PropertySnapshot, RefinancePhase, StrategyId,
    StrategyResult,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Buy, Rehab, Rent, Refinance, Repeat.
///
/// Two financing phases: an interest-only hard-money acquisition carried for
/// the holding period, then a cash-out refinance sized off ARV. The deal's
/// quality is measured by how much of the invested cash the refinance
/// returns; `cash_left_in_deal` keeps its raw sign internally and is floored
/// only for display.
pub struct Brrrr;

impl Strategy for Brrrr {
    fn id(&self) -> StrategyId {
        StrategyId::Brrrr
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let arv = property.arv.ok_or(StrategyError::MissingData {
            strategy: "brrrr",
            field: "arv",
        })?;
        let monthly_rent = property.monthly_rent.ok_or(StrategyError::MissingData {
            strategy: "brrrr",
            field: "monthly_rent",
        })?;

        tracing::debug!(%price, %arv, "evaluating BRRRR");

        // --- Acquisition phase: interest-only hard money ---
        let down_payment = price * assumptions.hard_money_down_rate;
        let hard_money_amount = price - down_payment;
        let points_cost = hard_money_amount * assumptions.hard_money_points;
        let holding_interest = hard_money_amount * assumptions.hard_money_rate / MONTHS_PER_YEAR
            * Decimal::from(assumptions.holding_months);
        let closing_costs = price * assumptions.closing_cost_rate;
        let total_cash_invested = down_payment
            + closing_costs
            + assumptions.rehab_budget
            + points_cost
            + holding_interest;

        let hard_money_loan = LoanTerms {
            purchase_price: price,
            down_payment,
            loan_amount: hard_money_amount,
            annual_rate: assumptions.hard_money_rate,
            // Bridge debt: the term is the holding period, interest-only.
            term_years: assumptions.holding_months.div_ceil(12).max(1),
            monthly_payment: hard_money_amount * assumptions.hard_money_rate / MONTHS_PER_YEAR,
        };

        // --- Refinance phase: cash-out sized off ARV ---
        let refinance_loan_amount = arv * assumptions.refinance_ltv;
        // Interest-only carry leaves the acquisition balance untouched.
        let payoff_old_loan = hard_money_amount;
        let refinance_costs = refinance_loan_amount * assumptions.refinance_cost_rate;
        let cash_out = refinance_loan_amount - payoff_old_loan - refinance_costs;
        let cash_left_in_deal = total_cash_invested - cash_out;
        let cash_recovery_pct = if total_cash_invested > Decimal::ZERO {
            (cash_out / total_cash_invested * dec!(100)).min(dec!(100))
        } else {
            Decimal::ZERO
        };
        let infinite_roi_achieved = cash_left_in_deal <= Decimal::ZERO;

        let refinance_payment = Loan::new(
            refinance_loan_amount,
            assumptions.refinance_rate,
            assumptions.refinance_term_years,
        )?
        .monthly_payment();
        let refinance_loan = LoanTerms {
            purchase_price: price,
            // Equity position after the refi is ARV less the new loan.
            down_payment: arv - refinance_loan_amount,
            loan_amount: refinance_loan_amount,
            annual_rate: assumptions.refinance_rate,
            term_years: assumptions.refinance_term_years,
            monthly_payment: refinance_payment,
        };

        // --- Post-refinance rental operation ---
        let operating = rental_operating(
            price,
            monthly_rent * MONTHS_PER_YEAR,
            assumptions.vacancy_rate,
            &refinance_loan,
            cash_left_in_deal.max(Decimal::ZERO),
            property,
            assumptions,
            Decimal::ZERO,
        );

        Ok(StrategyResult::Brrrr(BrrrrMetrics {
            purchase_price: price,
            acquisition: AcquisitionPhase {
                hard_money_loan,
                points_cost,
                holding_interest,
                holding_months: assumptions.holding_months,
                rehab_budget: assumptions.rehab_budget,
                closing_costs,
                total_cash_invested,
            },
            refinance: RefinancePhase {
                refinance_loan_amount,
                payoff_old_loan,
                refinance_costs,
                cash_out,
                cash_left_in_deal,
                cash_recovery_pct,
                infinite_roi_achieved,
            },
            operating,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_brrrr_cash_out_surplus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AssumptionOverrides, EngineConfig};

    /// 10% down, 12% hard money, 4-month hold on a $285k purchase with a
    /// $425k ARV.
    fn scenario() -> (Decimal, PropertySnapshot, Assumptions) {
        let mut property = PropertySnapshot::from_list_price(dec!(285000));
        property.monthly_rent = Some(dec!(2800));
        property.property_taxes = Some(dec!(5700));
        property.insurance = Some(dec!(2850));
        property.arv = Some(dec!(425000));

        let overrides = AssumptionOverrides {
            hard_money_down_rate: Some(dec!(0.10)),
            hard_money_rate: Some(dec!(0.12)),
            holding_months: Some(4),
            ..Default::default()
        };
        let assumptions = EngineConfig::default().resolve_assumptions(&overrides);
        (dec!(285000), property, assumptions)
    }

    #[test]
    fn refinance_loan_is_seventy_five_percent_of_arv() {
        let (price, property, assumptions) = scenario();
        let result = Brrrr.calculate(price, &property, &assumptions).unwrap();
        let StrategyResult::Brrrr(m) = &result else {
            panic!("wrong variant");
        };
        assert_eq!(m.refinance.refinance_loan_amount, dec!(318750));
        assert!(m.acquisition.holding_interest > Decimal::ZERO);
    }

    #[test]
    fn holding_interest_is_four_months_of_carry() {
        let (price, property, assumptions) = scenario();
        let result = Brrrr.calculate(price, &property, &assumptions).unwrap();
        let StrategyResult::Brrrr(m) = &result else {
            panic!("wrong variant");
        };
        // 90% of price at 12% for 4 months: 256,500 * 0.01 * 4.
        assert_eq!(m.acquisition.holding_interest, dec!(10260));
    }

    #[test]
    fn strong_arv_recovers_all_invested_cash() {
        let (price, property, assumptions) = scenario();
        let result = Brrrr.calculate(price, &property, &assumptions).unwrap();
        let StrategyResult::Brrrr(m) = &result else {
            panic!("wrong variant");
        };
        // cash_out = 318,750 - 256,500 - 6,375 = 55,875 against 52,440 in.
        assert_eq!(m.refinance.cash_out, dec!(55875));
        assert_eq!(m.acquisition.total_cash_invested, dec!(52440));
        assert_eq!(m.refinance.cash_left_in_deal, dec!(-3435));
        assert!(m.refinance.infinite_roi_achieved);
        // Recovery is capped at 100 even though more than 100% came back.
        assert_eq!(m.refinance.cash_recovery_pct, dec!(100));
        // Raw sign preserved internally, floored for display.
        assert_eq!(m.cash_left_in_deal_display(), Decimal::ZERO);
        // With no cash left in the deal there is no cash-on-cash basis.
        assert_eq!(m.operating.cash_on_cash_return, None);
    }

    #[test]
    fn weak_arv_leaves_cash_in_the_deal() {
        let (price, mut property, assumptions) = scenario();
        property.arv = Some(dec!(300000));
        let result = Brrrr.calculate(price, &property, &assumptions).unwrap();
        let StrategyResult::Brrrr(m) = &result else {
            panic!("wrong variant");
        };
        assert!(m.refinance.cash_left_in_deal > Decimal::ZERO);
        assert!(!m.refinance.infinite_roi_achieved);
        assert!(m.refinance.cash_recovery_pct < dec!(100));
        assert!(m.operating.cash_on_cash_return.is_some());
    }

    #[test]
    fn missing_arv_fails_fast() {
        let (price, mut property, assumptions) = scenario();
        property.arv = None;
        let err = Brrrr.calculate(price, &property, &assumptions).unwrap_err();
        assert!(matches!(err, StrategyError::MissingData { field: "arv", .. }));
    }
}
