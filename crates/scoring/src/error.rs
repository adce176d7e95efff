use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Invalid scoring input: {0}")]
    InvalidInput(String),
}
