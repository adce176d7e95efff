use crate::error::ConfigError;
use crate::settings::{EngineConfig, TargetThresholds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The user's overlay on the platform default table.
///
/// Every field is optional; anything unspecified falls back to the versioned
/// defaults in `EngineConfig`. Purchase price is deliberately absent — a
/// default is never substituted for price. Payloads may use snake_case or
/// camelCase.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssumptionOverrides {
    #[serde(alias = "downPaymentRate")]
    pub down_payment_rate: Option<Decimal>,
    #[serde(alias = "interestRate")]
    pub interest_rate: Option<Decimal>,
    #[serde(alias = "loanTermYears")]
    pub loan_term_years: Option<u32>,
    #[serde(alias = "closingCostRate")]
    pub closing_cost_rate: Option<Decimal>,

    #[serde(alias = "vacancyRate")]
    pub vacancy_rate: Option<Decimal>,
    #[serde(alias = "managementRate")]
    pub management_rate: Option<Decimal>,
    #[serde(alias = "maintenanceRate")]
    pub maintenance_rate: Option<Decimal>,
    #[serde(alias = "capexRate")]
    pub capex_rate: Option<Decimal>,

    #[serde(alias = "rehabBudget")]
    pub rehab_budget: Option<Decimal>,
    #[serde(alias = "holdingMonths")]
    pub holding_months: Option<u32>,
    #[serde(alias = "hardMoneyRate")]
    pub hard_money_rate: Option<Decimal>,
    #[serde(alias = "hardMoneyPoints")]
    pub hard_money_points: Option<Decimal>,
    #[serde(alias = "hardMoneyDownRate")]
    pub hard_money_down_rate: Option<Decimal>,
    #[serde(alias = "sellingCostRate")]
    pub selling_cost_rate: Option<Decimal>,

    #[serde(alias = "refinanceLtv")]
    pub refinance_ltv: Option<Decimal>,
    #[serde(alias = "refinanceRate")]
    pub refinance_rate: Option<Decimal>,
    #[serde(alias = "refinanceTermYears")]
    pub refinance_term_years: Option<u32>,
    #[serde(alias = "refinanceCostRate")]
    pub refinance_cost_rate: Option<Decimal>,

    #[serde(alias = "platformFeeRate")]
    pub platform_fee_rate: Option<Decimal>,
    #[serde(alias = "cleaningCostPerTurn")]
    pub cleaning_cost_per_turn: Option<Decimal>,
    #[serde(alias = "averageStayNights")]
    pub average_stay_nights: Option<Decimal>,

    #[serde(alias = "roomsRented")]
    pub rooms_rented: Option<u32>,
    #[serde(alias = "houseHackDownPaymentRate")]
    pub house_hack_down_payment_rate: Option<Decimal>,

    #[serde(alias = "investorDownPaymentRate")]
    pub investor_down_payment_rate: Option<Decimal>,

    #[serde(alias = "targetMonthlyCashFlow")]
    pub target_monthly_cash_flow: Option<Decimal>,
    #[serde(alias = "targetMonthlySavings")]
    pub target_monthly_savings: Option<Decimal>,
    #[serde(alias = "targetFlipProfit")]
    pub target_flip_profit: Option<Decimal>,
    #[serde(alias = "targetAssignmentFee")]
    pub target_assignment_fee: Option<Decimal>,
    #[serde(alias = "targetBrrrrCashOutSurplus")]
    pub target_brrrr_cash_out_surplus: Option<Decimal>,
}

/// Fully resolved assumptions: the overlay merged onto the default table.
///
/// This is what the calculators actually receive. Every field is concrete,
/// so strategy code never has to reach back into configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assumptions {
    pub down_payment_rate: Decimal,
    pub interest_rate: Decimal,
    pub loan_term_years: u32,
    pub closing_cost_rate: Decimal,

    pub vacancy_rate: Decimal,
    pub management_rate: Decimal,
    pub maintenance_rate: Decimal,
    pub capex_rate: Decimal,
    pub property_tax_rate_estimate: Decimal,
    pub insurance_rate_estimate: Decimal,

    pub rehab_budget: Decimal,
    pub holding_months: u32,
    pub hard_money_rate: Decimal,
    pub hard_money_points: Decimal,
    pub hard_money_down_rate: Decimal,
    pub selling_cost_rate: Decimal,

    pub refinance_ltv: Decimal,
    pub refinance_rate: Decimal,
    pub refinance_term_years: u32,
    pub refinance_cost_rate: Decimal,

    pub platform_fee_rate: Decimal,
    pub cleaning_cost_per_turn: Decimal,
    pub average_stay_nights: Decimal,
    pub default_occupancy_rate: Decimal,

    /// `None` means "all bedrooms but one", resolved against the snapshot.
    pub rooms_rented: Option<u32>,
    pub house_hack_down_payment_rate: Decimal,

    pub investor_down_payment_rate: Decimal,

    pub targets: TargetThresholds,
}

impl EngineConfig {
    /// Merges a user overlay onto this config's default table.
    pub fn resolve_assumptions(&self, overrides: &AssumptionOverrides) -> Assumptions {
        let o = overrides;
        Assumptions {
            down_payment_rate: o
                .down_payment_rate
                .unwrap_or(self.financing.down_payment_rate),
            interest_rate: o.interest_rate.unwrap_or(self.financing.interest_rate),
            loan_term_years: o.loan_term_years.unwrap_or(self.financing.loan_term_years),
            closing_cost_rate: o
                .closing_cost_rate
                .unwrap_or(self.financing.closing_cost_rate),

            vacancy_rate: o.vacancy_rate.unwrap_or(self.operating.vacancy_rate),
            management_rate: o.management_rate.unwrap_or(self.operating.management_rate),
            maintenance_rate: o
                .maintenance_rate
                .unwrap_or(self.operating.maintenance_rate),
            capex_rate: o.capex_rate.unwrap_or(self.operating.capex_rate),
            property_tax_rate_estimate: self.operating.property_tax_rate_estimate,
            insurance_rate_estimate: self.operating.insurance_rate_estimate,

            rehab_budget: o.rehab_budget.unwrap_or(self.rehab.rehab_budget),
            holding_months: o.holding_months.unwrap_or(self.rehab.holding_months),
            hard_money_rate: o.hard_money_rate.unwrap_or(self.rehab.hard_money_rate),
            hard_money_points: o
                .hard_money_points
                .unwrap_or(self.rehab.hard_money_points),
            hard_money_down_rate: o
                .hard_money_down_rate
                .unwrap_or(self.rehab.hard_money_down_rate),
            selling_cost_rate: o
                .selling_cost_rate
                .unwrap_or(self.rehab.selling_cost_rate),

            refinance_ltv: o.refinance_ltv.unwrap_or(self.refinance.refinance_ltv),
            refinance_rate: o.refinance_rate.unwrap_or(self.refinance.refinance_rate),
            refinance_term_years: o
                .refinance_term_years
                .unwrap_or(self.refinance.refinance_term_years),
            refinance_cost_rate: o
                .refinance_cost_rate
                .unwrap_or(self.refinance.refinance_cost_rate),

            platform_fee_rate: o
                .platform_fee_rate
                .unwrap_or(self.short_term.platform_fee_rate),
            cleaning_cost_per_turn: o
                .cleaning_cost_per_turn
                .unwrap_or(self.short_term.cleaning_cost_per_turn),
            average_stay_nights: o
                .average_stay_nights
                .unwrap_or(self.short_term.average_stay_nights),
            default_occupancy_rate: self.short_term.default_occupancy_rate,

            rooms_rented: o.rooms_rented,
            house_hack_down_payment_rate: o
                .house_hack_down_payment_rate
                .unwrap_or(self.house_hack.down_payment_rate),

            investor_down_payment_rate: o
                .investor_down_payment_rate
                .unwrap_or(self.wholesale.investor_down_payment_rate),

            targets: TargetThresholds {
                min_monthly_cash_flow: o
                    .target_monthly_cash_flow
                    .unwrap_or(self.targets.min_monthly_cash_flow),
                min_monthly_savings: o
                    .target_monthly_savings
                    .unwrap_or(self.targets.min_monthly_savings),
                min_flip_profit: o
                    .target_flip_profit
                    .unwrap_or(self.targets.min_flip_profit),
                min_assignment_fee: o
                    .target_assignment_fee
                    .unwrap_or(self.targets.min_assignment_fee),
                min_brrrr_cash_out_surplus: o
                    .target_brrrr_cash_out_surplus
                    .unwrap_or(self.targets.min_brrrr_cash_out_surplus),
            },
        }
    }
}

impl Assumptions {
    /// Validates the merged result, so a bad override is caught once here
    /// rather than deep inside a calculator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, rate) in [
            ("down_payment_rate", self.down_payment_rate),
            ("vacancy_rate", self.vacancy_rate),
            ("management_rate", self.management_rate),
            ("maintenance_rate", self.maintenance_rate),
            ("capex_rate", self.capex_rate),
            ("closing_cost_rate", self.closing_cost_rate),
            ("selling_cost_rate", self.selling_cost_rate),
            ("refinance_ltv", self.refinance_ltv),
            ("hard_money_down_rate", self.hard_money_down_rate),
            ("house_hack_down_payment_rate", self.house_hack_down_payment_rate),
            ("investor_down_payment_rate", self.investor_down_payment_rate),
            ("platform_fee_rate", self.platform_fee_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a fraction between 0 and 1, got {rate}"
                )));
            }
        }
        for (name, rate) in [
            ("interest_rate", self.interest_rate),
            ("hard_money_rate", self.hard_money_rate),
            ("refinance_rate", self.refinance_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must not be negative, got {rate}"
                )));
            }
        }
        if self.loan_term_years == 0 || self.refinance_term_years == 0 {
            return Err(ConfigError::ValidationError(
                "loan terms must be at least one year".to_string(),
            ));
        }
        if self.rehab_budget < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "rehab_budget must not be negative".to_string(),
            ));
        }
        if self.average_stay_nights <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "average_stay_nights must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unspecified_fields_fall_back_to_defaults() {
        let config = EngineConfig::default();
        let resolved = config.resolve_assumptions(&AssumptionOverrides::default());
        assert_eq!(resolved.down_payment_rate, dec!(0.20));
        assert_eq!(resolved.refinance_ltv, dec!(0.75));
        assert_eq!(resolved.targets.min_monthly_cash_flow, dec!(200));
        resolved.validate().unwrap();
    }

    #[test]
    fn overrides_win_over_defaults() {
        let config = EngineConfig::default();
        let overrides = AssumptionOverrides {
            down_payment_rate: Some(dec!(0.10)),
            hard_money_rate: Some(dec!(0.12)),
            holding_months: Some(4),
            ..Default::default()
        };
        let resolved = config.resolve_assumptions(&overrides);
        assert_eq!(resolved.down_payment_rate, dec!(0.10));
        assert_eq!(resolved.hard_money_rate, dec!(0.12));
        assert_eq!(resolved.holding_months, 4);
        // Untouched fields keep the platform default.
        assert_eq!(resolved.vacancy_rate, dec!(0.05));
    }

    #[test]
    fn overlay_accepts_camel_case() {
        let json = r#"{"downPaymentRate": 0.15, "refinanceLtv": 0.70}"#;
        let overrides: AssumptionOverrides = serde_json::from_str(json).unwrap();
        assert_eq!(overrides.down_payment_rate, Some(dec!(0.15)));
        assert_eq!(overrides.refinance_ltv, Some(dec!(0.70)));
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let config = EngineConfig::default();
        let overrides = AssumptionOverrides {
            vacancy_rate: Some(dec!(1.5)),
            ..Default::default()
        };
        assert!(config.resolve_assumptions(&overrides).validate().is_err());
    }
}
