use core_types::{ListingStatus, MarketTemperature, PropertySnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pluggable source of the market-alignment component.
///
/// The authoritative formula lives in an upstream service that is not part
/// of this engine; hosts that know it can inject their own model. The
/// default below is a documented, conservative approximation built from the
/// signals the snapshot carries. Returning `None` means the snapshot has no
/// usable signals and the scorer should fall back to neutral.
pub trait MarketSignalModel: Send + Sync {
    fn alignment_score(&self, property: &PropertySnapshot) -> Option<Decimal>;
}

/// Heuristic model: start neutral, reward seller-leverage signals (long days
/// on market, price drops, motivation keywords, a cold market), penalize
/// competition signals (a hot market, a pending sale).
#[derive(Debug, Default)]
pub struct DefaultMarketModel;

impl MarketSignalModel for DefaultMarketModel {
    fn alignment_score(&self, property: &PropertySnapshot) -> Option<Decimal> {
        let has_signals = property.days_on_market.is_some()
            || property.listing_status.is_some()
            || property.market_temperature.is_some()
            || property.price_drop
            || property.motivation_signals > 0;
        if !has_signals {
            return None;
        }

        let mut score = dec!(50);

        if let Some(dom) = property.days_on_market {
            score += match dom {
                0..=13 => dec!(-10),
                14..=29 => Decimal::ZERO,
                30..=59 => dec!(5),
                60..=89 => dec!(10),
                _ => dec!(15),
            };
        }

        if property.price_drop {
            score += dec!(10);
        }
        score += Decimal::from(property.motivation_signals.min(3)) * dec!(5);

        if let Some(temp) = property.market_temperature {
            score += match temp {
                MarketTemperature::Hot => dec!(-10),
                MarketTemperature::Warm => Decimal::ZERO,
                MarketTemperature::Cold => dec!(10),
            };
        }

        if let Some(status) = property.listing_status {
            score += match status {
                ListingStatus::Active => Decimal::ZERO,
                ListingStatus::Pending => dec!(-15),
                ListingStatus::Sold => dec!(-25),
                ListingStatus::OffMarket => dec!(5),
            };
        }

        Some(score.clamp(Decimal::ZERO, dec!(100)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_signal() {
        let p = PropertySnapshot::from_list_price(dec!(300000));
        assert_eq!(DefaultMarketModel.alignment_score(&p), None);
    }

    #[test]
    fn stale_motivated_listing_scores_high() {
        let mut p = PropertySnapshot::from_list_price(dec!(300000));
        p.days_on_market = Some(120);
        p.price_drop = true;
        p.motivation_signals = 2;
        p.market_temperature = Some(MarketTemperature::Cold);
        // 50 + 15 + 10 + 10 + 10.
        assert_eq!(DefaultMarketModel.alignment_score(&p), Some(dec!(95)));
    }

    #[test]
    fn fresh_listing_in_a_hot_market_scores_low() {
        let mut p = PropertySnapshot::from_list_price(dec!(300000));
        p.days_on_market = Some(3);
        p.market_temperature = Some(MarketTemperature::Hot);
        assert_eq!(DefaultMarketModel.alignment_score(&p), Some(dec!(30)));
    }

    #[test]
    fn motivation_keywords_are_capped() {
        let mut p = PropertySnapshot::from_list_price(dec!(300000));
        p.motivation_signals = 10;
        assert_eq!(DefaultMarketModel.alignment_score(&p), Some(dec!(65)));
    }
}
