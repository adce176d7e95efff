use crate::common::{annual_taxes, validate_price, MONTHS_PER_YEAR};
use crate::error::StrategyError;
use crate::fix_and_flip::SEVENTY_PERCENT_RULE;
use crate::Strategy;
use configuration::Assumptions;
use core_types::{PropertySnapshot, StrategyId, StrategyResult, WholesaleMetrics};
use rust_decimal::Decimal;

/// Contract with the seller, assign the contract to an investor for a fee.
///
/// The investor buyer is modelled as a disciplined flipper paying at most
/// 70% of ARV less rehab, so the assignment fee is whatever daylight exists
/// between that ceiling and the wholesaler's contract price.
pub struct Wholesale;

impl Strategy for Wholesale {
    fn id(&self) -> StrategyId {
        StrategyId::Wholesale
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let arv = property.arv.ok_or(StrategyError::MissingData {
            strategy: "wholesale",
            field: "arv",
        })?;

        tracing::debug!(%price, %arv, "evaluating wholesale assignment");

        let contract_price = price;
        let investor_price = arv * SEVENTY_PERCENT_RULE - assumptions.rehab_budget;
        let assignment_fee = investor_price - contract_price;

        let target_fee = assumptions.targets.min_assignment_fee;
        let max_allowable_offer = investor_price - target_fee;

        // Investor-side economics, flip-style, at the investor's price.
        let investor_down = investor_price * assumptions.investor_down_payment_rate;
        let investor_purchase_costs = investor_price * assumptions.closing_cost_rate;
        let holding_taxes = annual_taxes(investor_price.max(Decimal::ZERO), property, assumptions)
            / MONTHS_PER_YEAR
            * Decimal::from(assumptions.holding_months);
        let selling_costs = arv * assumptions.selling_cost_rate;
        let investor_total_cost = investor_price
            + investor_purchase_costs
            + assumptions.rehab_budget
            + holding_taxes
            + selling_costs;
        let investor_net_profit = arv - investor_total_cost;
        let investor_cash_required =
            investor_down + investor_purchase_costs + assumptions.rehab_budget;
        let investor_roi = if investor_cash_required > Decimal::ZERO {
            Some(investor_net_profit / investor_cash_required)
        } else {
            None
        };

        Ok(StrategyResult::Wholesale(WholesaleMetrics {
            contract_price,
            investor_price,
            assignment_fee,
            target_fee,
            max_allowable_offer,
            investor_total_cost,
            investor_net_profit,
            investor_cash_required,
            investor_roi,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_assignment_fee
    }
}
