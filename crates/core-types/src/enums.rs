use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the six investment strategies the engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    #[serde(alias = "longTermRental", alias = "ltr")]
    LongTermRental,
    #[serde(alias = "shortTermRental", alias = "str")]
    ShortTermRental,
    #[serde(alias = "BRRRR")]
    Brrrr,
    #[serde(alias = "fixAndFlip", alias = "flip")]
    FixAndFlip,
    #[serde(alias = "houseHack")]
    HouseHack,
    Wholesale,
}

impl StrategyId {
    /// All strategies, in the fixed evaluation (and tie-break) order.
    pub const ALL: [StrategyId; 6] = [
        StrategyId::LongTermRental,
        StrategyId::ShortTermRental,
        StrategyId::Brrrr,
        StrategyId::FixAndFlip,
        StrategyId::HouseHack,
        StrategyId::Wholesale,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::LongTermRental => "long_term_rental",
            StrategyId::ShortTermRental => "short_term_rental",
            StrategyId::Brrrr => "brrrr",
            StrategyId::FixAndFlip => "fix_and_flip",
            StrategyId::HouseHack => "house_hack",
            StrategyId::Wholesale => "wholesale",
        }
    }

    /// A human-readable display name for tables and factor strings.
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyId::LongTermRental => "Long-Term Rental",
            StrategyId::ShortTermRental => "Short-Term Rental",
            StrategyId::Brrrr => "BRRRR",
            StrategyId::FixAndFlip => "Fix & Flip",
            StrategyId::HouseHack => "House Hack",
            StrategyId::Wholesale => "Wholesale",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long_term_rental" | "longTermRental" | "ltr" => Ok(StrategyId::LongTermRental),
            "short_term_rental" | "shortTermRental" | "str" => Ok(StrategyId::ShortTermRental),
            "brrrr" | "BRRRR" => Ok(StrategyId::Brrrr),
            "fix_and_flip" | "fixAndFlip" | "flip" => Ok(StrategyId::FixAndFlip),
            "house_hack" | "houseHack" => Ok(StrategyId::HouseHack),
            "wholesale" => Ok(StrategyId::Wholesale),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// The listing state of a property at analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Pending,
    Sold,
    #[serde(alias = "offMarket")]
    OffMarket,
}

/// A coarse classification of the local market supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketTemperature {
    Hot,
    Warm,
    Cold,
}

/// Letter grade assigned to a composite deal score.
///
/// The score-to-grade mapping lives in a single ordered threshold table in the
/// scoring crate; this enum is only the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}
