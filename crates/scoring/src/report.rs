use core_types::Grade;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The single shared score-to-grade table. Every place a score is graded —
/// composite scores, component read-outs, ranked strategy lists — goes
/// through this table, so two screens can never disagree on a grade.
const GRADE_BANDS: [(Decimal, Grade); 5] = [
    (dec!(85), Grade::APlus),
    (dec!(70), Grade::A),
    (dec!(55), Grade::B),
    (dec!(40), Grade::C),
    (dec!(25), Grade::D),
];

pub fn grade_for(score: Decimal) -> Grade {
    for (threshold, grade) in GRADE_BANDS {
        if score >= threshold {
            return grade;
        }
    }
    Grade::F
}

pub fn label_for(grade: Grade) -> &'static str {
    match grade {
        Grade::APlus => "Exceptional Opportunity",
        Grade::A => "Strong Opportunity",
        Grade::B => "Solid Opportunity",
        Grade::C => "Marginal Deal",
        Grade::D => "Weak Deal",
        Grade::F => "Pass",
    }
}

/// Color classification consumed by the score rings and price ladders.
pub fn color_for(grade: Grade) -> &'static str {
    match grade {
        Grade::APlus => "emerald",
        Grade::A => "green",
        Grade::B => "teal",
        Grade::C => "yellow",
        Grade::D => "orange",
        Grade::F => "red",
    }
}

/// The four weighted components, each normalized to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// How far breakeven sits above or below the asking price.
    pub deal_gap_score: Decimal,
    /// Quality of the best strategy's returns (CoC / cap rate / DSCR blend).
    pub return_quality_score: Decimal,
    /// Seller motivation, days on market and market classification.
    pub market_alignment_score: Decimal,
    /// How aggressive a discount the target price demands.
    pub deal_probability_score: Decimal,
}

/// The composite deal score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealScore {
    /// Composite in [0, 100). Never exactly 100: a fixed irreducible-risk
    /// margin is subtracted before clamping.
    pub score: Decimal,
    pub grade: Grade,
    pub label: String,
    pub color: String,
    pub components: ComponentScores,
    /// Names of components that fell back to a neutral 50 because their
    /// required inputs were missing. A flag, not an error.
    pub fallback_components: Vec<String>,
}

impl DealScore {
    pub fn used_fallback(&self) -> bool {
        !self.fallback_components.is_empty()
    }
}
