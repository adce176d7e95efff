//! Human-readable factor strings for the verdict's opportunity and return
//! panels.

use crate::verdict::StrategyOutcome;
use core_types::{MarketTemperature, PriceTargets, PropertySnapshot, StrategyResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) fn opportunity_factors(
    property: &PropertySnapshot,
    primary_targets: Option<&PriceTargets>,
    list_price: Decimal,
) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(breakeven) = primary_targets.and_then(|t| t.breakeven_price) {
        if breakeven > list_price && list_price > Decimal::ZERO {
            let headroom = ((breakeven - list_price) / list_price * dec!(100)).round_dp(1);
            factors.push(format!("Breakeven price is {headroom}% above asking"));
        }
    }
    if property.price_drop {
        factors.push("Listing has had a price reduction".to_string());
    }
    if let Some(dom) = property.days_on_market {
        if dom >= 60 {
            factors.push(format!("{dom} days on market gives negotiating leverage"));
        }
    }
    if property.motivation_signals > 0 {
        factors.push("Seller motivation signals in the listing remarks".to_string());
    }
    if property.market_temperature == Some(MarketTemperature::Cold) {
        factors.push("Cold market favors buyers".to_string());
    }

    factors
}

pub(crate) fn return_factors(outcomes: &[StrategyOutcome]) -> Vec<String> {
    let mut factors = Vec::new();

    for outcome in outcomes {
        let Some(result) = &outcome.at_list_price else {
            continue;
        };
        let name = outcome.strategy.display_name();
        match result {
            StrategyResult::LongTermRental(_) | StrategyResult::ShortTermRental(_) => {
                let Some(op) = result.operating() else {
                    continue;
                };
                if op.monthly_cash_flow > Decimal::ZERO {
                    let mut line = format!(
                        "{name}: ${}/mo cash flow",
                        op.monthly_cash_flow.round_dp(0)
                    );
                    if let Some(coc) = op.cash_on_cash_return {
                        line.push_str(&format!(
                            ", {}% cash-on-cash",
                            (coc * dec!(100)).round_dp(1)
                        ));
                    }
                    factors.push(line);
                }
            }
            StrategyResult::Brrrr(m) => {
                if m.refinance.infinite_roi_achieved {
                    factors.push(format!("{name} recovers all invested cash at refinance"));
                } else if m.refinance.cash_recovery_pct >= dec!(75) {
                    factors.push(format!(
                        "{name} recovers {}% of invested cash at refinance",
                        m.refinance.cash_recovery_pct.round_dp(0)
                    ));
                }
            }
            StrategyResult::FixAndFlip(m) => {
                if m.net_profit > Decimal::ZERO && m.meets_seventy_percent_rule {
                    factors.push(format!(
                        "{name} nets ${} at ARV",
                        m.net_profit.round_dp(0)
                    ));
                }
            }
            StrategyResult::HouseHack(m) => {
                if m.monthly_savings > Decimal::ZERO {
                    factors.push(format!(
                        "{name} saves ${}/mo versus renting",
                        m.monthly_savings.round_dp(0)
                    ));
                }
            }
            StrategyResult::Wholesale(m) => {
                if m.assignment_fee >= m.target_fee {
                    factors.push(format!(
                        "{name} assignment fee of ${} available",
                        m.assignment_fee.round_dp(0)
                    ));
                }
            }
        }
    }

    factors
}
