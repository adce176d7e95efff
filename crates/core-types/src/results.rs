//! Per-strategy calculation outputs.
//!
//! The six strategies differ enough in shape that one sprawling
//! optional-field struct would lose type safety. `StrategyResult` is instead
//! a tagged sum type keyed by strategy id, with the rental-style strategies
//! sharing an `OperatingMetrics` block so that cash-flow sign, DSCR and cap
//! rate always derive from the same NOI and debt-service figures.

use crate::enums::StrategyId;
use crate::structs::LoanTerms;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Income, expense and return figures shared by every rental-style strategy.
///
/// All rates are fractions (0.065 = 6.5%); all currency fields are bare
/// dollar amounts. Annual and monthly figures are named explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingMetrics {
    pub gross_income_annual: Decimal,
    /// Gross income less vacancy allowance.
    pub effective_income_annual: Decimal,
    /// Taxes, insurance and ratio-driven operating expenses. Excludes debt.
    pub operating_expenses_annual: Decimal,
    pub noi_annual: Decimal,
    /// NOI / purchase price, fraction.
    pub cap_rate: Decimal,
    pub debt_service_monthly: Decimal,
    pub monthly_cash_flow: Decimal,
    pub annual_cash_flow: Decimal,
    pub total_cash_invested: Decimal,
    /// Annual cash flow / cash invested, fraction. `None` when the cash
    /// basis is zero or negative (a fully-recovered BRRRR position).
    pub cash_on_cash_return: Option<Decimal>,
    /// NOI / annual debt service. `None` for an all-cash position.
    pub dscr: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalMetrics {
    pub purchase_price: Decimal,
    pub loan: LoanTerms,
    #[serde(flatten)]
    pub operating: OperatingMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortTermMetrics {
    pub purchase_price: Decimal,
    pub loan: LoanTerms,
    #[serde(flatten)]
    pub operating: OperatingMetrics,
    /// ADR x occupancy, $/available night.
    pub revpar: Decimal,
    pub nights_occupied_annual: Decimal,
    /// Estimated bookings per year at the assumed average stay length.
    pub bookings_annual: Decimal,
}

/// The acquisition (hard-money) phase of a BRRRR deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionPhase {
    pub hard_money_loan: LoanTerms,
    pub points_cost: Decimal,
    /// Interest-only carry over the holding period.
    pub holding_interest: Decimal,
    pub holding_months: u32,
    pub rehab_budget: Decimal,
    pub closing_costs: Decimal,
    pub total_cash_invested: Decimal,
}

/// The refinance phase of a BRRRR deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinancePhase {
    /// ARV x refinance LTV.
    pub refinance_loan_amount: Decimal,
    pub payoff_old_loan: Decimal,
    pub refinance_costs: Decimal,
    pub cash_out: Decimal,
    /// Raw signed value: negative means the refinance returned more cash
    /// than was invested. Floor at zero only for display.
    pub cash_left_in_deal: Decimal,
    /// min(100, cash_out / cash invested x 100). Scaled percent, not a
    /// fraction.
    pub cash_recovery_pct: Decimal,
    pub infinite_roi_achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrrrrMetrics {
    pub purchase_price: Decimal,
    pub acquisition: AcquisitionPhase,
    pub refinance: RefinancePhase,
    /// Post-refinance rental operation on the new loan.
    pub operating: OperatingMetrics,
}

impl BrrrrMetrics {
    /// `cash_left_in_deal` floored at zero, for display surfaces.
    pub fn cash_left_in_deal_display(&self) -> Decimal {
        self.refinance.cash_left_in_deal.max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlipMetrics {
    pub purchase_price: Decimal,
    pub arv: Decimal,
    pub rehab_costs: Decimal,
    /// ARV x 0.70 - rehab.
    pub max_allowable_offer: Decimal,
    pub meets_seventy_percent_rule: bool,
    pub purchase_costs: Decimal,
    pub holding_interest: Decimal,
    pub holding_months: u32,
    pub financing_costs: Decimal,
    pub selling_costs: Decimal,
    pub total_cost: Decimal,
    pub net_profit: Decimal,
    pub cash_required: Decimal,
    /// Net profit / cash required, fraction. `None` when no cash is at risk.
    pub roi: Option<Decimal>,
    /// ROI scaled to a 12-month pace.
    pub annualized_roi: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseHackMetrics {
    pub purchase_price: Decimal,
    pub loan: LoanTerms,
    pub total_bedrooms: u32,
    pub rooms_rented: u32,
    /// Rent collected from the rented rooms, $/month.
    pub room_rent_monthly: Decimal,
    /// Principal, interest, taxes and insurance, $/month.
    pub piti_monthly: Decimal,
    pub operating_expenses_monthly: Decimal,
    /// PITI + expenses - room rent. Can be negative when roommates cover
    /// more than the full cost of ownership.
    pub effective_housing_cost_monthly: Decimal,
    /// What the owner would pay renting a comparable home, $/month.
    pub market_rent_monthly: Decimal,
    pub monthly_savings: Decimal,
    pub annual_savings: Decimal,
    pub total_cash_invested: Decimal,
    /// Annual savings / cash invested, fraction.
    pub savings_on_cash_return: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WholesaleMetrics {
    /// The wholesaler's contract price with the seller.
    pub contract_price: Decimal,
    /// What an investor buyer will pay: ARV x 0.70 - rehab.
    pub investor_price: Decimal,
    /// investor_price - contract_price.
    pub assignment_fee: Decimal,
    /// The fee the wholesaler is underwriting to.
    pub target_fee: Decimal,
    /// Wholesaler's max offer to the seller: investor_price - target_fee.
    pub max_allowable_offer: Decimal,
    /// Investor-side economics at `investor_price`, flip-style.
    pub investor_total_cost: Decimal,
    pub investor_net_profit: Decimal,
    pub investor_cash_required: Decimal,
    pub investor_roi: Option<Decimal>,
}

/// The output of one strategy calculation. Purely functional: identity is
/// its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyResult {
    LongTermRental(RentalMetrics),
    ShortTermRental(ShortTermMetrics),
    Brrrr(BrrrrMetrics),
    FixAndFlip(FlipMetrics),
    HouseHack(HouseHackMetrics),
    Wholesale(WholesaleMetrics),
}

impl StrategyResult {
    pub fn strategy(&self) -> StrategyId {
        match self {
            StrategyResult::LongTermRental(_) => StrategyId::LongTermRental,
            StrategyResult::ShortTermRental(_) => StrategyId::ShortTermRental,
            StrategyResult::Brrrr(_) => StrategyId::Brrrr,
            StrategyResult::FixAndFlip(_) => StrategyId::FixAndFlip,
            StrategyResult::HouseHack(_) => StrategyId::HouseHack,
            StrategyResult::Wholesale(_) => StrategyId::Wholesale,
        }
    }

    /// The profitability metric the price solver bisects over.
    ///
    /// Monotone non-increasing in purchase price for every strategy, holding
    /// all other inputs fixed. For the rental-style strategies this is
    /// monthly cash flow (savings for a house hack); for a flip it is net
    /// profit; for a wholesale deal the assignment fee. BRRRR uses the
    /// cash-out surplus (cash recovered minus cash invested) because the
    /// post-refinance cash flow is set by ARV, not by purchase price.
    pub fn objective(&self) -> Decimal {
        match self {
            StrategyResult::LongTermRental(m) => m.operating.monthly_cash_flow,
            StrategyResult::ShortTermRental(m) => m.operating.monthly_cash_flow,
            StrategyResult::Brrrr(m) => -m.refinance.cash_left_in_deal,
            StrategyResult::FixAndFlip(m) => m.net_profit,
            StrategyResult::HouseHack(m) => m.monthly_savings,
            StrategyResult::Wholesale(m) => m.assignment_fee,
        }
    }

    pub fn monthly_cash_flow(&self) -> Option<Decimal> {
        match self {
            StrategyResult::LongTermRental(m) => Some(m.operating.monthly_cash_flow),
            StrategyResult::ShortTermRental(m) => Some(m.operating.monthly_cash_flow),
            StrategyResult::Brrrr(m) => Some(m.operating.monthly_cash_flow),
            StrategyResult::HouseHack(m) => Some(m.monthly_savings),
            StrategyResult::FixAndFlip(_) | StrategyResult::Wholesale(_) => None,
        }
    }

    pub fn cap_rate(&self) -> Option<Decimal> {
        self.operating().map(|o| o.cap_rate)
    }

    pub fn cash_on_cash(&self) -> Option<Decimal> {
        match self {
            StrategyResult::HouseHack(m) => m.savings_on_cash_return,
            other => other.operating().and_then(|o| o.cash_on_cash_return),
        }
    }

    pub fn dscr(&self) -> Option<Decimal> {
        self.operating().and_then(|o| o.dscr)
    }

    /// Project-level return for the transactional strategies.
    pub fn roi(&self) -> Option<Decimal> {
        match self {
            StrategyResult::FixAndFlip(m) => m.roi,
            StrategyResult::Wholesale(m) => m.investor_roi,
            _ => None,
        }
    }

    pub fn operating(&self) -> Option<&OperatingMetrics> {
        match self {
            StrategyResult::LongTermRental(m) => Some(&m.operating),
            StrategyResult::ShortTermRental(m) => Some(&m.operating),
            StrategyResult::Brrrr(m) => Some(&m.operating),
            _ => None,
        }
    }
}
