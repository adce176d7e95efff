use crate::brrrr::Brrrr;
use crate::fix_and_flip::FixAndFlip;
use crate::house_hack::HouseHack;
use crate::long_term_rental::LongTermRental;
use crate::short_term_rental::ShortTermRental;
use crate::wholesale::Wholesale;
use crate::Strategy;
use core_types::StrategyId;

/// Creates a calculator instance for the given strategy id.
///
/// The calculators are stateless, so construction is infallible; the
/// compiler errors here if a new `StrategyId` is added but not handled.
pub fn create_strategy(id: StrategyId) -> Box<dyn Strategy> {
    match id {
        StrategyId::LongTermRental => Box::new(LongTermRental),
        StrategyId::ShortTermRental => Box::new(ShortTermRental),
        StrategyId::Brrrr => Box::new(Brrrr),
        StrategyId::FixAndFlip => Box::new(FixAndFlip),
        StrategyId::HouseHack => Box::new(HouseHack),
        StrategyId::Wholesale => Box::new(Wholesale),
    }
}
