use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One period of an amortization schedule.
///
/// `payment = principal + interest` holds for every row, including the final
/// one, which absorbs any arithmetic residue so the ending balance is exactly
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period number.
    pub period: u32,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    /// Balance remaining after this payment.
    pub balance: Decimal,
}

/// A lazy, finite iterator over the per-period schedule of a fixed-rate loan.
///
/// The iterator is restartable in the sense that `Loan::schedule()` always
/// returns a fresh one positioned at period 1; iterating never mutates the
/// loan itself.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    monthly_rate: Decimal,
    scheduled_payment: Decimal,
    balance: Decimal,
    period: u32,
    total_periods: u32,
}

impl AmortizationSchedule {
    pub(crate) fn new(
        principal: Decimal,
        monthly_rate: Decimal,
        scheduled_payment: Decimal,
        total_periods: u32,
    ) -> Self {
        Self {
            monthly_rate,
            scheduled_payment,
            // A non-positive principal yields an empty schedule.
            balance: principal.max(Decimal::ZERO),
            period: 0,
            total_periods,
        }
    }
}

impl Iterator for AmortizationSchedule {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.period >= self.total_periods || self.balance <= Decimal::ZERO {
            return None;
        }
        self.period += 1;

        let interest = self.balance * self.monthly_rate;
        let mut principal = self.scheduled_payment - interest;
        // The final period pays off whatever remains, absorbing rounding
        // residue so the schedule always lands on a zero balance.
        if self.period == self.total_periods || principal >= self.balance {
            principal = self.balance;
        }
        self.balance -= principal;

        Some(ScheduleRow {
            period: self.period,
            payment: principal + interest,
            principal,
            interest,
            balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_periods - self.period) as usize;
        (0, Some(remaining))
    }
}
