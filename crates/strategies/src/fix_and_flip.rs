use crate::common::{validate_price, MONTHS_PER_YEAR};
use crate::error::StrategyError;
use crate::Strategy;
use configuration::Assumptions;
use core_types::{FlipMetrics, PropertySnapshot, StrategyId, StrategyResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// The investor's 70% rule: offer at most 70% of ARV less rehab.
pub(crate) const SEVENTY_PERCENT_RULE: Decimal = dec!(0.70);

/// Buy distressed, renovate on hard money, resell at ARV.
pub struct FixAndFlip;

impl Strategy for FixAndFlip {
    fn id(&self) -> StrategyId {
        StrategyId::FixAndFlip
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let arv = property.arv.ok_or(StrategyError::MissingData {
            strategy: "fix_and_flip",
            field: "arv",
        })?;
        let rehab_costs = assumptions.rehab_budget;

        tracing::debug!(%price, %arv, %rehab_costs, "evaluating fix and flip");

        let max_allowable_offer = arv * SEVENTY_PERCENT_RULE - rehab_costs;
        let meets_seventy_percent_rule = price <= max_allowable_offer;

        let down_payment = price * assumptions.hard_money_down_rate;
        let hard_money_amount = price - down_payment;
        let purchase_costs = price * assumptions.closing_cost_rate;
        let financing_costs = hard_money_amount * assumptions.hard_money_points;
        let holding_interest = hard_money_amount * assumptions.hard_money_rate / MONTHS_PER_YEAR
            * Decimal::from(assumptions.holding_months);
        let selling_costs = arv * assumptions.selling_cost_rate;

        let total_cost = price
            + purchase_costs
            + rehab_costs
            + holding_interest
            + financing_costs
            + selling_costs;
        let net_profit = arv - total_cost;

        let cash_required =
            down_payment + purchase_costs + rehab_costs + financing_costs + holding_interest;
        let roi = if cash_required > Decimal::ZERO {
            Some(net_profit / cash_required)
        } else {
            None
        };
        let annualized_roi = if assumptions.holding_months > 0 {
            roi.map(|r| r * MONTHS_PER_YEAR / Decimal::from(assumptions.holding_months))
        } else {
            None
        };

        Ok(StrategyResult::FixAndFlip(FlipMetrics {
            purchase_price: price,
            arv,
            rehab_costs,
            max_allowable_offer,
            meets_seventy_percent_rule,
            purchase_costs,
            holding_interest,
            holding_months: assumptions.holding_months,
            financing_costs,
            selling_costs,
            total_cost,
            net_profit,
            cash_required,
            roi,
            annualized_roi,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_flip_profit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::{AssumptionOverrides, EngineConfig};

    fn assumptions_with_rehab(rehab: Decimal) -> Assumptions {
        let overrides = AssumptionOverrides {
            rehab_budget: Some(rehab),
            ..Default::default()
        };
        EngineConfig::default().resolve_assumptions(&overrides)
    }

    fn property_with_arv(arv: Decimal) -> PropertySnapshot {
        let mut p = PropertySnapshot::from_list_price(arv * dec!(0.8));
        p.arv = Some(arv);
        p
    }

    #[test]
    fn seventy_percent_rule_boundary() {
        let assumptions = assumptions_with_rehab(dec!(40000));
        let property = property_with_arv(dec!(300000));

        let at_mao = FixAndFlip
            .calculate(dec!(170000), &property, &assumptions)
            .unwrap();
        let StrategyResult::FixAndFlip(m) = &at_mao else {
            panic!("wrong variant");
        };
        assert_eq!(m.max_allowable_offer, dec!(170000));
        assert!(m.meets_seventy_percent_rule);

        let above_mao = FixAndFlip
            .calculate(dec!(175000), &property, &assumptions)
            .unwrap();
        let StrategyResult::FixAndFlip(m) = &above_mao else {
            panic!("wrong variant");
        };
        assert!(!m.meets_seventy_percent_rule);
    }

    #[test]
    fn profit_is_arv_less_all_in_cost() {
        let assumptions = assumptions_with_rehab(dec!(40000));
        let property = property_with_arv(dec!(300000));
        let result = FixAndFlip
            .calculate(dec!(170000), &property, &assumptions)
            .unwrap();
        let StrategyResult::FixAndFlip(m) = &result else {
            panic!("wrong variant");
        };
        assert_eq!(m.net_profit, m.arv - m.total_cost);
        assert_eq!(
            m.total_cost,
            m.purchase_price
                + m.purchase_costs
                + m.rehab_costs
                + m.holding_interest
                + m.financing_costs
                + m.selling_costs
        );
        assert!(m.holding_interest > Decimal::ZERO);
    }

    #[test]
    fn annualized_roi_scales_with_project_pace() {
        let assumptions = assumptions_with_rehab(dec!(40000));
        let property = property_with_arv(dec!(300000));
        let result = FixAndFlip
            .calculate(dec!(150000), &property, &assumptions)
            .unwrap();
        let StrategyResult::FixAndFlip(m) = &result else {
            panic!("wrong variant");
        };
        let roi = m.roi.unwrap();
        // Default hold is 6 months, so the annual pace doubles the ROI.
        assert_eq!(m.annualized_roi.unwrap(), roi * dec!(2));
    }

    #[test]
    fn missing_arv_fails_fast() {
        let assumptions = assumptions_with_rehab(dec!(40000));
        let p = PropertySnapshot::from_list_price(dec!(200000));
        let err = FixAndFlip
            .calculate(dec!(170000), &p, &assumptions)
            .unwrap_err();
        assert!(matches!(err, StrategyError::MissingData { field: "arv", .. }));
    }
}
