use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The version tag of the compiled-in default table. Bumped whenever a
/// platform default changes so responses can be traced back to the
/// assumptions that produced them.
pub const DEFAULTS_VERSION: &str = "2025.08";

/// The root configuration structure for the whole engine.
///
/// One explicit, versioned struct passed by reference into every calculator
/// call. There is no mutable singleton; a process may hold several configs
/// side by side. Every field has a documented default, and any subset may be
/// overridden from `dealscope.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Version of the default table this config was layered over.
    pub version: String,
    pub financing: FinancingDefaults,
    pub operating: OperatingDefaults,
    pub rehab: RehabDefaults,
    pub refinance: RefinanceDefaults,
    pub short_term: ShortTermDefaults,
    pub house_hack: HouseHackDefaults,
    pub wholesale: WholesaleDefaults,
    pub targets: TargetThresholds,
    pub solver: SolverSettings,
    pub scoring: ScoringSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: DEFAULTS_VERSION.to_string(),
            financing: FinancingDefaults::default(),
            operating: OperatingDefaults::default(),
            rehab: RehabDefaults::default(),
            refinance: RefinanceDefaults::default(),
            short_term: ShortTermDefaults::default(),
            house_hack: HouseHackDefaults::default(),
            wholesale: WholesaleDefaults::default(),
            targets: TargetThresholds::default(),
            solver: SolverSettings::default(),
            scoring: ScoringSettings::default(),
        }
    }
}

/// Conventional-financing defaults. All rates are fractions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinancingDefaults {
    pub down_payment_rate: Decimal,
    pub interest_rate: Decimal,
    pub loan_term_years: u32,
    /// Buyer-side closing costs as a fraction of purchase price.
    pub closing_cost_rate: Decimal,
}

impl Default for FinancingDefaults {
    fn default() -> Self {
        Self {
            down_payment_rate: dec!(0.20),
            interest_rate: dec!(0.07),
            loan_term_years: 30,
            closing_cost_rate: dec!(0.03),
        }
    }
}

/// Operating-expense defaults for the rental-style strategies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OperatingDefaults {
    pub vacancy_rate: Decimal,
    /// Property management, fraction of effective income.
    pub management_rate: Decimal,
    /// Maintenance reserve, fraction of effective income.
    pub maintenance_rate: Decimal,
    /// Capital-expenditure reserve, fraction of effective income.
    pub capex_rate: Decimal,
    /// Annual property-tax estimate as a fraction of price, used only when
    /// the snapshot does not carry actual taxes.
    pub property_tax_rate_estimate: Decimal,
    /// Annual insurance estimate as a fraction of price, used only when the
    /// snapshot does not carry an actual premium.
    pub insurance_rate_estimate: Decimal,
}

impl Default for OperatingDefaults {
    fn default() -> Self {
        Self {
            vacancy_rate: dec!(0.05),
            management_rate: dec!(0.08),
            maintenance_rate: dec!(0.05),
            capex_rate: dec!(0.05),
            property_tax_rate_estimate: dec!(0.011),
            insurance_rate_estimate: dec!(0.01),
        }
    }
}

/// Rehab and acquisition-phase (hard money) defaults for BRRRR and flips.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RehabDefaults {
    pub rehab_budget: Decimal,
    pub holding_months: u32,
    pub hard_money_rate: Decimal,
    /// Origination points as a fraction of the loan amount.
    pub hard_money_points: Decimal,
    pub hard_money_down_rate: Decimal,
    /// Seller-side costs when the rehabbed property is sold, fraction of ARV.
    pub selling_cost_rate: Decimal,
}

impl Default for RehabDefaults {
    fn default() -> Self {
        Self {
            rehab_budget: Decimal::ZERO,
            holding_months: 6,
            hard_money_rate: dec!(0.12),
            hard_money_points: dec!(0.02),
            hard_money_down_rate: dec!(0.10),
            selling_cost_rate: dec!(0.08),
        }
    }
}

/// Refinance-phase defaults for BRRRR.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefinanceDefaults {
    pub refinance_ltv: Decimal,
    pub refinance_rate: Decimal,
    pub refinance_term_years: u32,
    /// Lender and title costs as a fraction of the new loan.
    pub refinance_cost_rate: Decimal,
}

impl Default for RefinanceDefaults {
    fn default() -> Self {
        Self {
            refinance_ltv: dec!(0.75),
            refinance_rate: dec!(0.07),
            refinance_term_years: 30,
            refinance_cost_rate: dec!(0.02),
        }
    }
}

/// Short-term rental defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShortTermDefaults {
    /// Listing-platform fee, fraction of gross booking revenue.
    pub platform_fee_rate: Decimal,
    /// Cleaning cost absorbed by the host per turnover, $.
    pub cleaning_cost_per_turn: Decimal,
    pub average_stay_nights: Decimal,
    /// Used when the snapshot does not carry an observed occupancy.
    pub default_occupancy_rate: Decimal,
}

impl Default for ShortTermDefaults {
    fn default() -> Self {
        Self {
            platform_fee_rate: dec!(0.03),
            cleaning_cost_per_turn: dec!(85),
            average_stay_nights: dec!(3),
            default_occupancy_rate: dec!(0.65),
        }
    }
}

/// House-hack defaults (owner-occupied financing).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HouseHackDefaults {
    /// FHA-style low down payment for an owner occupant.
    pub down_payment_rate: Decimal,
}

impl Default for HouseHackDefaults {
    fn default() -> Self {
        Self {
            down_payment_rate: dec!(0.035),
        }
    }
}

/// Wholesale defaults (investor-side underwriting).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WholesaleDefaults {
    /// Down payment the end investor is modelled with.
    pub investor_down_payment_rate: Decimal,
}

impl Default for WholesaleDefaults {
    fn default() -> Self {
        Self {
            investor_down_payment_rate: dec!(0.20),
        }
    }
}

/// Per-strategy profitability thresholds the target-buy price must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetThresholds {
    /// Minimum monthly cash flow for LTR/STR, $.
    pub min_monthly_cash_flow: Decimal,
    /// Minimum monthly savings vs renting for a house hack, $.
    pub min_monthly_savings: Decimal,
    /// Minimum net profit for a flip, $.
    pub min_flip_profit: Decimal,
    /// Minimum assignment fee for a wholesale deal, $.
    pub min_assignment_fee: Decimal,
    /// Minimum cash pulled out beyond cash invested for BRRRR, $.
    pub min_brrrr_cash_out_surplus: Decimal,
}

impl Default for TargetThresholds {
    fn default() -> Self {
        Self {
            min_monthly_cash_flow: dec!(200),
            min_monthly_savings: dec!(300),
            min_flip_profit: dec!(30000),
            min_assignment_fee: dec!(10000),
            min_brrrr_cash_out_surplus: dec!(10000),
        }
    }
}

/// Bisection settings for the price solver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Convergence tolerance on price, $.
    pub price_tolerance: Decimal,
    pub max_iterations: u32,
    /// wholesale_price = target_buy_price x this discount. Never solved
    /// independently.
    pub wholesale_discount: Decimal,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            price_tolerance: dec!(1),
            max_iterations: 60,
            wholesale_discount: dec!(0.70),
        }
    }
}

/// Component weights and normalization benchmarks for the deal scorer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub deal_gap_weight: Decimal,
    pub return_quality_weight: Decimal,
    pub market_alignment_weight: Decimal,
    pub deal_probability_weight: Decimal,
    /// Fixed margin subtracted from the composite so a perfect 100 is never
    /// reported.
    pub risk_margin: Decimal,
    /// Cash-on-cash return that scores 100 on the return-quality axis.
    pub benchmark_cash_on_cash: Decimal,
    /// Cap rate that scores 100 on the return-quality axis.
    pub benchmark_cap_rate: Decimal,
    /// DSCR spread over 1.0 that scores 100 on the return-quality axis.
    pub benchmark_dscr_spread: Decimal,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            deal_gap_weight: dec!(0.35),
            return_quality_weight: dec!(0.30),
            market_alignment_weight: dec!(0.20),
            deal_probability_weight: dec!(0.15),
            risk_margin: dec!(0.5),
            benchmark_cash_on_cash: dec!(0.12),
            benchmark_cap_rate: dec!(0.08),
            benchmark_dscr_spread: dec!(0.5),
        }
    }
}

impl EngineConfig {
    /// Rejects configs that would silently corrupt every downstream number.
    pub fn validate(&self) -> Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError;

        let weight_sum = self.scoring.deal_gap_weight
            + self.scoring.return_quality_weight
            + self.scoring.market_alignment_weight
            + self.scoring.deal_probability_weight;
        if weight_sum != Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "scoring component weights must sum to 1, got {weight_sum}"
            )));
        }
        for (name, rate) in [
            ("financing.down_payment_rate", self.financing.down_payment_rate),
            ("operating.vacancy_rate", self.operating.vacancy_rate),
            ("refinance.refinance_ltv", self.refinance.refinance_ltv),
            ("solver.wholesale_discount", self.solver.wholesale_discount),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a fraction between 0 and 1, got {rate}"
                )));
            }
        }
        if self.financing.loan_term_years == 0 || self.refinance.refinance_term_years == 0 {
            return Err(ConfigError::ValidationError(
                "loan terms must be at least one year".to_string(),
            ));
        }
        if self.solver.max_iterations == 0 || self.solver.price_tolerance <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "solver needs a positive tolerance and iteration budget".to_string(),
            ));
        }
        Ok(())
    }
}
