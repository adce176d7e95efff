//! # Fixed-Rate Amortization Engine
//!
//! The one place in the system that knows the annuity formula. Every
//! strategy derives its financing numbers from here, so cash-flow sign, DSCR
//! and payoff figures all agree on the same debt service.
//!
//! This is a pure Layer 1 crate: no I/O, no state beyond the loan terms a
//! caller hands in.

use core_types::LoanTerms;
use rust_decimal::{Decimal, MathematicalOps};

pub mod error;
pub mod schedule;

pub use error::LoanError;
pub use schedule::{AmortizationSchedule, ScheduleRow};

const MONTHS_PER_YEAR: u32 = 12;

/// A fixed-rate, fully-amortizing loan.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
    monthly_payment: Decimal,
}

impl Loan {
    /// Builds a loan and computes its level monthly payment.
    ///
    /// A zero rate degrades to straight-line principal; a non-positive
    /// principal is a valid "no loan" case with a zero payment and an empty
    /// schedule. A zero term or a negative rate is an error.
    pub fn new(principal: Decimal, annual_rate: Decimal, term_years: u32) -> Result<Self, LoanError> {
        if term_years == 0 {
            return Err(LoanError::InvalidTerm(
                "term must be at least one year".to_string(),
            ));
        }
        if annual_rate < Decimal::ZERO {
            return Err(LoanError::InvalidTerm(format!(
                "interest rate must not be negative, got {annual_rate}"
            )));
        }

        let monthly_payment = annuity_payment(principal, annual_rate, term_years)?;
        Ok(Self {
            principal,
            annual_rate,
            term_years,
            monthly_payment,
        })
    }

    pub fn principal(&self) -> Decimal {
        self.principal
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    /// A fresh, lazily-evaluated schedule starting at period 1.
    pub fn schedule(&self) -> AmortizationSchedule {
        AmortizationSchedule::new(
            self.principal,
            self.annual_rate / Decimal::from(MONTHS_PER_YEAR),
            self.monthly_payment,
            self.term_years * MONTHS_PER_YEAR,
        )
    }

    /// The balance still owed after `months` payments. Used by BRRRR to size
    /// the payoff of the acquisition loan at refinance time.
    pub fn remaining_balance(&self, months: u32) -> Decimal {
        if months == 0 {
            return self.principal.max(Decimal::ZERO);
        }
        self.schedule()
            .take(months as usize)
            .last()
            .map(|row| row.balance)
            .unwrap_or(Decimal::ZERO)
    }
}

/// The level payment of a fixed-rate annuity.
fn annuity_payment(
    principal: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> Result<Decimal, LoanError> {
    if principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let term_months = Decimal::from(term_years * MONTHS_PER_YEAR);
    if annual_rate == Decimal::ZERO {
        return Ok(principal / term_months);
    }

    let monthly_rate = annual_rate / Decimal::from(MONTHS_PER_YEAR);
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi((term_years * MONTHS_PER_YEAR) as i64)
        .ok_or_else(|| {
            LoanError::NonFinitePayment(format!(
                "compounding overflowed for rate {annual_rate} over {term_years} years"
            ))
        })?;
    Ok(principal * monthly_rate * growth / (growth - Decimal::ONE))
}

/// Derives the financing terms for a purchase at the given price.
///
/// Recomputed for every price the solver probes; terms are never cached
/// across differing prices.
pub fn derive_loan_terms(
    purchase_price: Decimal,
    down_payment_rate: Decimal,
    annual_rate: Decimal,
    term_years: u32,
) -> Result<LoanTerms, LoanError> {
    let down_payment = purchase_price * down_payment_rate;
    let loan_amount = purchase_price - down_payment;
    let loan = Loan::new(loan_amount, annual_rate, term_years)?;

    Ok(LoanTerms {
        purchase_price,
        down_payment,
        loan_amount,
        annual_rate,
        term_years,
        monthly_payment: loan.monthly_payment(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn textbook_thirty_year_payment() {
        // $200,000 at 6% over 30 years is the classic $1,199.10 table entry.
        let loan = Loan::new(dec!(200000), dec!(0.06), 30).unwrap();
        assert_eq!(loan.monthly_payment().round_dp(2), dec!(1199.10));
    }

    #[test]
    fn zero_rate_degrades_to_straight_line() {
        let loan = Loan::new(dec!(120000), Decimal::ZERO, 10).unwrap();
        assert_eq!(loan.monthly_payment(), dec!(1000));
        let rows: Vec<_> = loan.schedule().collect();
        assert_eq!(rows.len(), 120);
        assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
        assert!(rows.iter().all(|r| r.interest == Decimal::ZERO));
    }

    #[test]
    fn non_positive_principal_means_no_loan() {
        let loan = Loan::new(Decimal::ZERO, dec!(0.07), 30).unwrap();
        assert_eq!(loan.monthly_payment(), Decimal::ZERO);
        assert_eq!(loan.schedule().count(), 0);

        let loan = Loan::new(dec!(-5000), dec!(0.07), 30).unwrap();
        assert_eq!(loan.monthly_payment(), Decimal::ZERO);
        assert_eq!(loan.schedule().count(), 0);
    }

    #[test]
    fn zero_term_is_rejected() {
        assert!(matches!(
            Loan::new(dec!(100000), dec!(0.07), 0),
            Err(LoanError::InvalidTerm(_))
        ));
    }

    #[test]
    fn negative_rate_is_rejected() {
        assert!(matches!(
            Loan::new(dec!(100000), dec!(-0.01), 30),
            Err(LoanError::InvalidTerm(_))
        ));
    }

    #[test]
    fn schedule_is_restartable() {
        let loan = Loan::new(dec!(250000), dec!(0.065), 30).unwrap();
        let first: Vec<_> = loan.schedule().take(12).collect();
        let second: Vec<_> = loan.schedule().take(12).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn remaining_balance_declines_toward_zero() {
        let loan = Loan::new(dec!(300000), dec!(0.07), 30).unwrap();
        let at_one_year = loan.remaining_balance(12);
        let at_five_years = loan.remaining_balance(60);
        assert!(at_one_year < dec!(300000));
        assert!(at_five_years < at_one_year);
        assert_eq!(loan.remaining_balance(360), Decimal::ZERO);
    }

    #[test]
    fn derive_loan_terms_splits_price() {
        let terms = derive_loan_terms(dec!(285000), dec!(0.10), dec!(0.07), 30).unwrap();
        assert_eq!(terms.down_payment, dec!(28500));
        assert_eq!(terms.loan_amount, dec!(256500));
        assert!(terms.monthly_payment > Decimal::ZERO);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        /// Total scheduled principal returns the original principal within a
        /// cent, and the final balance is exactly zero.
        #[test]
        fn schedule_round_trips_principal(
            principal_dollars in 10_000u64..1_000_000,
            rate_bps in 1u32..2_000,
            term_years in 1u32..=40,
        ) {
            let principal = Decimal::from(principal_dollars);
            let rate = Decimal::from(rate_bps) / Decimal::from(10_000u32);
            let loan = Loan::new(principal, rate, term_years).unwrap();

            let rows: Vec<_> = loan.schedule().collect();
            prop_assert_eq!(rows.len(), (term_years * 12) as usize);

            let repaid: Decimal = rows.iter().map(|r| r.principal).sum();
            prop_assert!((repaid - principal).abs() <= dec!(0.01));
            prop_assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
        }

        /// Balances never increase along the schedule.
        #[test]
        fn balance_is_monotone_decreasing(
            principal_dollars in 50_000u64..800_000,
            rate_bps in 1u32..1_500,
        ) {
            let principal = Decimal::from(principal_dollars);
            let rate = Decimal::from(rate_bps) / Decimal::from(10_000u32);
            let loan = Loan::new(principal, rate, 30).unwrap();

            let mut prev = principal;
            for row in loan.schedule() {
                prop_assert!(row.balance <= prev);
                prev = row.balance;
            }
        }
    }
}
