use crate::error::ScoringError;
use crate::market::{DefaultMarketModel, MarketSignalModel};
use crate::report::{color_for, grade_for, label_for, ComponentScores, DealScore};
use configuration::ScoringSettings;
use core_types::{PriceTargets, PropertySnapshot, StrategyResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const NEUTRAL: Decimal = dec!(50);
const HUNDRED: Decimal = dec!(100);
/// The composite is clamped strictly below 100; combined with the risk
/// margin this keeps a reported perfect score impossible.
const SCORE_CEILING: Decimal = dec!(99.9);

/// Everything the scorer consumes, already computed by the orchestrator.
pub struct ScoreInputs<'a> {
    pub list_price: Decimal,
    /// Price ladder of the primary strategy, if the solver produced one.
    pub primary_targets: Option<&'a PriceTargets>,
    /// The best-performing strategy's result at list price.
    pub best_result: Option<&'a StrategyResult>,
    pub property: &'a PropertySnapshot,
}

/// A stateless aggregator of strategy outcomes and market signals into one
/// composite 0-100 score.
pub struct DealScorer {
    settings: ScoringSettings,
    market_model: Box<dyn MarketSignalModel>,
}

impl DealScorer {
    pub fn new(settings: ScoringSettings) -> Self {
        Self::with_market_model(settings, Box::new(DefaultMarketModel))
    }

    /// Injects a host-supplied market-alignment model in place of the
    /// built-in heuristic.
    pub fn with_market_model(
        settings: ScoringSettings,
        market_model: Box<dyn MarketSignalModel>,
    ) -> Self {
        Self {
            settings,
            market_model,
        }
    }

    /// Scores a deal. Components missing their inputs degrade to a neutral
    /// 50 and are flagged; scoring itself always completes.
    pub fn score(&self, inputs: &ScoreInputs) -> Result<DealScore, ScoringError> {
        if inputs.list_price <= Decimal::ZERO {
            return Err(ScoringError::InvalidInput(
                "list_price must be positive".to_string(),
            ));
        }

        let mut fallback_components = Vec::new();
        let mut component = |name: &str, value: Option<Decimal>| match value {
            Some(v) => v,
            None => {
                fallback_components.push(name.to_string());
                NEUTRAL
            }
        };

        let deal_gap_score = component("deal_gap", self.deal_gap(inputs));
        let return_quality_score =
            component("return_quality", self.return_quality(inputs.best_result));
        let market_alignment_score = component(
            "market_alignment",
            self.market_model.alignment_score(inputs.property),
        );
        let deal_probability_score =
            component("deal_probability", self.deal_probability(inputs));

        let s = &self.settings;
        let composite = deal_gap_score * s.deal_gap_weight
            + return_quality_score * s.return_quality_weight
            + market_alignment_score * s.market_alignment_weight
            + deal_probability_score * s.deal_probability_weight
            - s.risk_margin;
        let score = composite.clamp(Decimal::ZERO, SCORE_CEILING);

        let grade = grade_for(score);
        if !fallback_components.is_empty() {
            tracing::debug!(?fallback_components, "scored with neutral fallbacks");
        }

        Ok(DealScore {
            score,
            grade,
            label: label_for(grade).to_string(),
            color: color_for(grade).to_string(),
            components: ComponentScores {
                deal_gap_score,
                return_quality_score,
                market_alignment_score,
                deal_probability_score,
            },
            fallback_components,
        })
    }

    /// How far breakeven sits from the asking price. Breakeven at list is
    /// neutral; 20% of headroom above list saturates the component.
    fn deal_gap(&self, inputs: &ScoreInputs) -> Option<Decimal> {
        let breakeven = inputs.primary_targets?.breakeven_price?;
        let gap = (breakeven - inputs.list_price) / inputs.list_price;
        Some((NEUTRAL + gap * dec!(250)).clamp(Decimal::ZERO, HUNDRED))
    }

    /// Blend of the best strategy's cash-on-cash (or project ROI), cap rate
    /// and DSCR, each normalized against a configured benchmark.
    fn return_quality(&self, best: Option<&StrategyResult>) -> Option<Decimal> {
        let best = best?;
        let s = &self.settings;
        let mut weighted = Decimal::ZERO;
        let mut total_weight = Decimal::ZERO;

        if let Some(coc) = best.cash_on_cash().or(best.roi()) {
            let sub = (coc / s.benchmark_cash_on_cash * HUNDRED).clamp(Decimal::ZERO, HUNDRED);
            weighted += sub * dec!(0.5);
            total_weight += dec!(0.5);
        }
        if let Some(cap) = best.cap_rate() {
            let sub = (cap / s.benchmark_cap_rate * HUNDRED).clamp(Decimal::ZERO, HUNDRED);
            weighted += sub * dec!(0.25);
            total_weight += dec!(0.25);
        }
        if let Some(dscr) = best.dscr() {
            let sub = ((dscr - Decimal::ONE) / s.benchmark_dscr_spread * HUNDRED)
                .clamp(Decimal::ZERO, HUNDRED);
            weighted += sub * dec!(0.25);
            total_weight += dec!(0.25);
        }

        if total_weight == Decimal::ZERO {
            None
        } else {
            Some(weighted / total_weight)
        }
    }

    /// How aggressive a discount the target-buy price demands. No discount
    /// needed scores 95 (a deal is never certain); each point of required
    /// discount erodes the odds.
    fn deal_probability(&self, inputs: &ScoreInputs) -> Option<Decimal> {
        let target_buy = inputs.primary_targets?.target_buy_price?;
        let discount_needed = (inputs.list_price - target_buy) / inputs.list_price;
        if discount_needed <= Decimal::ZERO {
            return Some(dec!(95));
        }
        Some((dec!(95) - discount_needed * dec!(300)).clamp(dec!(5), dec!(95)))
    }
}
