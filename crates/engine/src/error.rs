use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid property snapshot: {0}")]
    Core(#[from] core_types::CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] configuration::error::ConfigError),

    #[error("Strategy calculation failed: {0}")]
    Strategy(#[from] strategies::StrategyError),

    #[error("Scoring failed: {0}")]
    Scoring(#[from] scoring::ScoringError),
}
