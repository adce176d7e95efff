use crate::enums::{ListingStatus, MarketTemperature, StrategyId};
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable facts about a property, captured once per analysis request.
///
/// Only `list_price` is required; everything else is optional market data the
/// calculators either need (and fail fast without) or can estimate from
/// documented defaults. Request payloads may use snake_case or camelCase for
/// any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    #[serde(alias = "listPrice")]
    pub list_price: Decimal,

    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<Decimal>,
    #[serde(default)]
    pub sqft: Option<u32>,

    /// Estimated market rent for the whole property, $/month.
    #[serde(default, alias = "monthlyRent")]
    pub monthly_rent: Option<Decimal>,
    /// Annual property taxes, $.
    #[serde(default, alias = "propertyTaxes")]
    pub property_taxes: Option<Decimal>,
    /// Annual insurance premium, $.
    #[serde(default)]
    pub insurance: Option<Decimal>,
    /// After-Repair Value, $.
    #[serde(default)]
    pub arv: Option<Decimal>,

    /// Average daily rate for short-term rental use, $/night.
    #[serde(default, alias = "averageDailyRate")]
    pub average_daily_rate: Option<Decimal>,
    /// Short-term rental occupancy as a fraction (0.65 = 65%).
    #[serde(default, alias = "occupancyRate")]
    pub occupancy_rate: Option<Decimal>,

    #[serde(default, alias = "listingStatus")]
    pub listing_status: Option<ListingStatus>,
    #[serde(default, alias = "daysOnMarket")]
    pub days_on_market: Option<u32>,

    /// Whether the listing has had at least one price reduction.
    #[serde(default, alias = "priceDrop")]
    pub price_drop: bool,
    /// Count of seller-motivation keywords detected in the listing remarks
    /// ("must sell", "as-is", "relocating", ...).
    #[serde(default, alias = "motivationSignals")]
    pub motivation_signals: u32,

    #[serde(default, alias = "marketTemperature")]
    pub market_temperature: Option<MarketTemperature>,
}

impl PropertySnapshot {
    /// A snapshot with only a list price; every optional field empty.
    pub fn from_list_price(list_price: Decimal) -> Self {
        Self {
            list_price,
            bedrooms: None,
            bathrooms: None,
            sqft: None,
            monthly_rent: None,
            property_taxes: None,
            insurance: None,
            arv: None,
            average_daily_rate: None,
            occupancy_rate: None,
            listing_status: None,
            days_on_market: None,
            price_drop: false,
            motivation_signals: 0,
            market_temperature: None,
        }
    }

    /// Fails fast on inputs no calculator may ever see. Defaults are never
    /// substituted for price.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.list_price <= Decimal::ZERO {
            return Err(CoreError::invalid_input(
                "list_price",
                "must be a positive amount",
            ));
        }
        for (field, value) in [
            ("monthly_rent", &self.monthly_rent),
            ("property_taxes", &self.property_taxes),
            ("insurance", &self.insurance),
            ("arv", &self.arv),
            ("average_daily_rate", &self.average_daily_rate),
        ] {
            if let Some(v) = value {
                if *v < Decimal::ZERO {
                    return Err(CoreError::invalid_input(field, "must not be negative"));
                }
            }
        }
        if let Some(occ) = self.occupancy_rate {
            if occ < Decimal::ZERO || occ > Decimal::ONE {
                return Err(CoreError::invalid_input(
                    "occupancy_rate",
                    "must be a fraction between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

/// Financing terms derived from a purchase price.
///
/// Recomputed whenever price or financing assumptions change; never cached
/// across differing prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub purchase_price: Decimal,
    pub down_payment: Decimal,
    pub loan_amount: Decimal,
    /// Annual interest rate as a fraction (0.07 = 7%).
    pub annual_rate: Decimal,
    pub term_years: u32,
    pub monthly_payment: Decimal,
}

/// The solved price ladder for one strategy.
///
/// `breakeven_price >= target_buy_price >= wholesale_price >= 0` whenever all
/// three are present. A `None` price means the solver's precondition failed
/// or it did not converge; `achievable == false` means even a free property
/// misses the objective, and the prices are pinned at zero rather than
/// extrapolated negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTargets {
    pub strategy: StrategyId,
    pub breakeven_price: Option<Decimal>,
    pub target_buy_price: Option<Decimal>,
    pub wholesale_price: Option<Decimal>,
    /// Each price as a fraction of list (0.92 = 92% of list).
    pub breakeven_pct_of_list: Option<Decimal>,
    pub target_buy_pct_of_list: Option<Decimal>,
    pub wholesale_pct_of_list: Option<Decimal>,
    pub achievable: bool,
}

impl PriceTargets {
    /// Targets for a strategy the solver could not price.
    pub fn unavailable(strategy: StrategyId) -> Self {
        Self {
            strategy,
            breakeven_price: None,
            target_buy_price: None,
            wholesale_price: None,
            breakeven_pct_of_list: None,
            target_buy_pct_of_list: None,
            wholesale_pct_of_list: None,
            achievable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_accepts_camel_case_aliases() {
        let json = r#"{
            "listPrice": 285000,
            "monthlyRent": 2800,
            "propertyTaxes": 5700,
            "daysOnMarket": 45,
            "marketTemperature": "warm"
        }"#;
        let snap: PropertySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.list_price, dec!(285000));
        assert_eq!(snap.monthly_rent, Some(dec!(2800)));
        assert_eq!(snap.property_taxes, Some(dec!(5700)));
        assert_eq!(snap.days_on_market, Some(45));
        assert_eq!(snap.market_temperature, Some(MarketTemperature::Warm));
    }

    #[test]
    fn snapshot_rejects_non_positive_list_price() {
        let snap = PropertySnapshot::from_list_price(Decimal::ZERO);
        assert!(snap.validate().is_err());
    }

    #[test]
    fn snapshot_rejects_negative_rent() {
        let mut snap = PropertySnapshot::from_list_price(dec!(300000));
        snap.monthly_rent = Some(dec!(-1));
        assert!(snap.validate().is_err());
    }

    #[test]
    fn strategy_id_parses_both_cases() {
        let a: StrategyId = serde_json::from_str("\"long_term_rental\"").unwrap();
        let b: StrategyId = serde_json::from_str("\"longTermRental\"").unwrap();
        assert_eq!(a, b);
    }
}
