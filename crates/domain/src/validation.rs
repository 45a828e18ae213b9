//! Input validation run before any calculation.
//!
//! Every violated rule is reported; validation does not stop at the first one.

use crate::error::ValidationError;
use crate::metrics::fees::AccrualParams;
use rust_decimal::Decimal;

/// Checks position and hedge inputs for domain violations.
///
/// # Errors
/// Returns a [`ValidationError`] listing every violated rule.
pub fn validate_inputs(
    entry_price: Decimal,
    deposit_amount: Decimal,
    lower_range: Decimal,
    upper_range: Decimal,
    short_size: Decimal,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if entry_price <= Decimal::ZERO {
        violations.push("Entry price must be positive".to_string());
    }
    if deposit_amount <= Decimal::ZERO {
        violations.push("Deposit amount must be positive".to_string());
    }
    if lower_range <= Decimal::ZERO {
        violations.push("Lower range must be positive".to_string());
    }
    if upper_range <= Decimal::ZERO {
        violations.push("Upper range must be positive".to_string());
    }
    if lower_range >= entry_price {
        violations.push("Lower range must be below entry price".to_string());
    }
    if upper_range <= entry_price {
        violations.push("Upper range must be above entry price".to_string());
    }
    if lower_range >= upper_range {
        violations.push("Lower range must be below upper range".to_string());
    }
    if short_size < Decimal::ZERO {
        violations.push("Short size cannot be negative".to_string());
    }

    into_result(violations)
}

/// Checks accrual inputs. Funding may take either sign.
///
/// # Errors
/// Returns a [`ValidationError`] listing every violated rule.
pub fn validate_accrual(accrual: &AccrualParams) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if accrual.fee_apr < Decimal::ZERO {
        violations.push("Fee APR cannot be negative".to_string());
    }
    if accrual.duration_days < Decimal::ZERO {
        violations.push("Duration cannot be negative".to_string());
    }

    into_result(violations)
}

/// Merges several validation results into one carrying all violations.
pub fn merge(results: impl IntoIterator<Item = Result<(), ValidationError>>) -> Result<(), ValidationError> {
    let violations = results
        .into_iter()
        .filter_map(Result::err)
        .flat_map(|e| e.violations)
        .collect();
    into_result(violations)
}

fn into_result(violations: Vec<String>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}
