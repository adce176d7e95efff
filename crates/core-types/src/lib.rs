pub mod enums;
pub mod error;
pub mod results;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Grade, ListingStatus, MarketTemperature, StrategyId};
pub use error::CoreError;
pub use results::{
    AcquisitionPhase, BrrrrMetrics, FlipMetrics, HouseHackMetrics, OperatingMetrics,
    RefinancePhase, RentalMetrics, ShortTermMetrics, StrategyResult, WholesaleMetrics,
};
pub use structs::{LoanTerms, PriceTargets, PropertySnapshot};
