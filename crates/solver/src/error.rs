use strategies::StrategyError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Objective for '{strategy}' is unsolvable: {reason}")]
    Unsolvable { strategy: String, reason: String },

    #[error("Strategy evaluation failed while solving: {0}")]
    Strategy(#[from] StrategyError),
}
