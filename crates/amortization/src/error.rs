use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Invalid loan term: {0}")]
    InvalidTerm(String),

    #[error("Loan payment could not be computed: {0}")]
    NonFinitePayment(String),
}
