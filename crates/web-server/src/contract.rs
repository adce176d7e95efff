//! Request and response shapes for the HTTP surface.
//!
//! Inputs accept both snake_case and camelCase (the snapshot and overlay
//! structs carry serde aliases). Output deliberately mixes conventions for
//! client compatibility: the verdict's top level is camelCase while nested
//! strategy metrics stay snake_case. Currency fields are bare numbers; rates
//! are fractions unless a field name says `pct`.

use configuration::AssumptionOverrides;
use core_types::{PriceTargets, PropertySnapshot, StrategyId};
use engine::{StrategyAnalysis, StrategyOutcome, Verdict};
use rust_decimal::Decimal;
use scoring::DealScore;
use serde::{Deserialize, Serialize};

/// `POST /api/analyze` — evaluate one strategy at one price.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(alias = "purchasePrice")]
    pub purchase_price: Decimal,
    #[serde(alias = "strategyId")]
    pub strategy_id: StrategyId,
    pub property: PropertySnapshot,
    #[serde(default)]
    pub assumptions: AssumptionOverrides,
}

/// `POST /api/analyze` response: the strategy's flat metric set plus its
/// price ladder and score.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: core_types::StrategyResult,
    pub targets: Option<PriceTargets>,
    /// Composite score as a bare number, with the grade beside it.
    pub deal_score: Decimal,
    pub grade: String,
    pub score_detail: DealScore,
}

impl From<StrategyAnalysis> for AnalyzeResponse {
    fn from(analysis: StrategyAnalysis) -> Self {
        Self {
            result: analysis.result,
            targets: analysis.targets,
            deal_score: analysis.deal_score.score,
            grade: analysis.deal_score.grade.to_string(),
            score_detail: analysis.deal_score,
        }
    }
}

/// `POST /api/verdict` — only `list_price` is required; the snapshot's other
/// fields and the assumption overlay are optional.
#[derive(Debug, Deserialize)]
pub struct VerdictRequest {
    #[serde(flatten)]
    pub property: PropertySnapshot,
    #[serde(default)]
    pub assumptions: AssumptionOverrides,
}

/// `POST /api/verdict` response. The four component scores appear both
/// inside `dealScore` and flattened at the top level for backward
/// compatibility with older clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictResponse {
    pub verdict_id: String,
    pub as_of: chrono::DateTime<chrono::Utc>,
    pub list_price: Decimal,
    pub purchase_price: Option<Decimal>,
    pub breakeven_price: Option<Decimal>,
    pub primary_strategy: Option<StrategyId>,
    pub deal_score: DealScore,
    pub opportunity_factors: Vec<String>,
    pub return_factors: Vec<String>,
    pub strategies: Vec<StrategyOutcome>,
    // Flattened component scores, kept for older clients.
    pub deal_gap_score: Decimal,
    pub return_quality_score: Decimal,
    pub market_alignment_score: Decimal,
    pub deal_probability_score: Decimal,
    /// True when any scoring component fell back to a neutral default.
    pub partial_data: bool,
}

impl From<Verdict> for VerdictResponse {
    fn from(verdict: Verdict) -> Self {
        let components = verdict.deal_score.components.clone();
        Self {
            verdict_id: verdict.verdict_id.to_string(),
            as_of: verdict.as_of,
            list_price: verdict.list_price,
            purchase_price: verdict.purchase_price,
            breakeven_price: verdict.breakeven_price,
            primary_strategy: verdict.primary_strategy,
            partial_data: verdict.deal_score.used_fallback(),
            deal_gap_score: components.deal_gap_score,
            return_quality_score: components.return_quality_score,
            market_alignment_score: components.market_alignment_score,
            deal_probability_score: components.deal_probability_score,
            deal_score: verdict.deal_score,
            opportunity_factors: verdict.opportunity_factors,
            return_factors: verdict.return_factors,
            strategies: verdict.strategies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn verdict_request_needs_only_list_price() {
        let req: VerdictRequest = serde_json::from_str(r#"{"list_price": 285000}"#).unwrap();
        assert_eq!(req.property.list_price, dec!(285000));
        assert_eq!(req.assumptions, AssumptionOverrides::default());
    }

    #[test]
    fn verdict_request_accepts_camel_case() {
        let json = r#"{
            "listPrice": 285000,
            "monthlyRent": 2800,
            "daysOnMarket": 45,
            "assumptions": {"downPaymentRate": 0.10}
        }"#;
        let req: VerdictRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.property.monthly_rent, Some(dec!(2800)));
        assert_eq!(req.assumptions.down_payment_rate, Some(dec!(0.10)));
    }

    #[test]
    fn analyze_request_accepts_both_cases() {
        let json = r#"{
            "purchasePrice": 250000,
            "strategy_id": "longTermRental",
            "property": {"list_price": 285000, "monthly_rent": 2500}
        }"#;
        let req: AnalyzeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.purchase_price, dec!(250000));
        assert_eq!(req.strategy_id, StrategyId::LongTermRental);
    }
}
