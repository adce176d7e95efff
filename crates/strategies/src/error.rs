use amortization::LoanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Strategy '{strategy}' requires {field}, which the snapshot does not carry")]
    MissingData {
        strategy: &'static str,
        field: &'static str,
    },

    #[error("Loan computation failed: {0}")]
    Loan(#[from] LoanError),
}

impl StrategyError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        StrategyError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
