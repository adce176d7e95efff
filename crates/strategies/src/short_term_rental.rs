use crate::common::{rental_operating, validate_price};
use crate::error::StrategyError;
use crate::Strategy;
use amortization::derive_loan_terms;
use configuration::Assumptions;
use core_types::{PropertySnapshot, ShortTermMetrics, StrategyId, StrategyResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const NIGHTS_PER_YEAR: Decimal = dec!(365);

/// Nightly-rate rental: revenue from ADR x occupancy, with platform fees and
/// host-paid cleaning layered onto the shared expense model.
pub struct ShortTermRental;

impl Strategy for ShortTermRental {
    fn id(&self) -> StrategyId {
        StrategyId::ShortTermRental
    }

    fn calculate(
        &self,
        price: Decimal,
        property: &PropertySnapshot,
        assumptions: &Assumptions,
    ) -> Result<StrategyResult, StrategyError> {
        validate_price(price)?;
        let adr = property
            .average_daily_rate
            .ok_or(StrategyError::MissingData {
                strategy: "short_term_rental",
                field: "average_daily_rate",
            })?;
        let occupancy = property
            .occupancy_rate
            .unwrap_or(assumptions.default_occupancy_rate);

        tracing::debug!(%price, %adr, %occupancy, "evaluating short-term rental");

        let nights_occupied = NIGHTS_PER_YEAR * occupancy;
        let gross_income_annual = adr * nights_occupied;
        let bookings_annual = nights_occupied / assumptions.average_stay_nights;
        let revpar = adr * occupancy;

        let extra_expenses = assumptions.platform_fee_rate * gross_income_annual
            + assumptions.cleaning_cost_per_turn * bookings_annual;

        let loan = derive_loan_terms(
            price,
            assumptions.down_payment_rate,
            assumptions.interest_rate,
            assumptions.loan_term_years,
        )?;
        let cash_invested = loan.down_payment
            + price * assumptions.closing_cost_rate
            + assumptions.rehab_budget;

        let operating = rental_operating(
            price,
            gross_income_annual,
            assumptions.vacancy_rate,
            &loan,
            cash_invested,
            property,
            assumptions,
            extra_expenses,
        );

        Ok(StrategyResult::ShortTermRental(ShortTermMetrics {
            purchase_price: price,
            loan,
            operating,
            revpar,
            nights_occupied_annual: nights_occupied,
            bookings_annual,
        }))
    }

    fn target_threshold(&self, assumptions: &Assumptions) -> Decimal {
        assumptions.targets.min_monthly_cash_flow
    }
}
