//! Expense-ratio and income helpers shared by the rental-style calculators.

use crate::error::StrategyError;
use configuration::Assumptions;
use core_types::{LoanTerms, OperatingMetrics, PropertySnapshot};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub(crate) const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Purchase price must come from the caller; a default is never substituted.
pub(crate) fn validate_price(price: Decimal) -> Result<(), StrategyError> {
    if price <= Decimal::ZERO {
        return Err(StrategyError::invalid_input(
            "purchase_price",
            "must be a positive amount",
        ));
    }
    Ok(())
}

/// Annual property taxes: actuals from the snapshot, otherwise the platform
/// estimate as a fraction of price.
pub(crate) fn annual_taxes(
    price: Decimal,
    property: &PropertySnapshot,
    assumptions: &Assumptions,
) -> Decimal {
    property
        .property_taxes
        .unwrap_or(price * assumptions.property_tax_rate_estimate)
}

/// Annual insurance premium: actuals from the snapshot, otherwise the
/// platform estimate as a fraction of price.
pub(crate) fn annual_insurance(
    price: Decimal,
    property: &PropertySnapshot,
    assumptions: &Assumptions,
) -> Decimal {
    property
        .insurance
        .unwrap_or(price * assumptions.insurance_rate_estimate)
}

/// Builds the shared operating block for a rental-style strategy.
///
/// One computation feeds NOI, cap rate, cash flow, cash-on-cash and DSCR, so
/// their signs and magnitudes can never disagree with each other.
///
/// `extra_expenses_annual` carries strategy-specific operating costs (STR
/// platform fees and cleaning); `cash_invested` is the denominator for
/// cash-on-cash and may legitimately be non-positive for a fully-recovered
/// BRRRR position, in which case cash-on-cash is reported as `None`.
pub(crate) fn rental_operating(
    price: Decimal,
    gross_income_annual: Decimal,
    vacancy_rate: Decimal,
    loan: &LoanTerms,
    cash_invested: Decimal,
    property: &PropertySnapshot,
    assumptions: &Assumptions,
    extra_expenses_annual: Decimal,
) -> OperatingMetrics {
    let effective_income_annual = gross_income_annual * (Decimal::ONE - vacancy_rate);

    let ratio_expenses = (assumptions.management_rate
        + assumptions.maintenance_rate
        + assumptions.capex_rate)
        * effective_income_annual;
    let operating_expenses_annual = annual_taxes(price, property, assumptions)
        + annual_insurance(price, property, assumptions)
        + ratio_expenses
        + extra_expenses_annual;

    let noi_annual = effective_income_annual - operating_expenses_annual;
    let cap_rate = noi_annual / price;

    let debt_service_monthly = loan.monthly_payment;
    let monthly_cash_flow = noi_annual / MONTHS_PER_YEAR - debt_service_monthly;
    let annual_cash_flow = monthly_cash_flow * MONTHS_PER_YEAR;

    let cash_on_cash_return = if cash_invested > Decimal::ZERO {
        Some(annual_cash_flow / cash_invested)
    } else {
        None
    };
    let annual_debt_service = debt_service_monthly * MONTHS_PER_YEAR;
    let dscr = if annual_debt_service > Decimal::ZERO {
        Some(noi_annual / annual_debt_service)
    } else {
        None
    };

    OperatingMetrics {
        gross_income_annual,
        effective_income_annual,
        operating_expenses_annual,
        noi_annual,
        cap_rate,
        debt_service_monthly,
        monthly_cash_flow,
        annual_cash_flow,
        total_cash_invested: cash_invested,
        cash_on_cash_return,
        dscr,
    }
}
