use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: u32 = 365;

/// Time-based accrual inputs for a holding period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccrualParams {
    /// LP fee yield, annualized percent (e.g. 25 for 25%).
    pub fee_apr: Decimal,
    /// Funding earned by the short per day, percent of notional.
    pub funding_rate: Decimal,
    /// Holding period in days.
    pub duration_days: Decimal,
}

impl AccrualParams {
    pub fn new(fee_apr: Decimal, funding_rate: Decimal, duration_days: Decimal) -> Self {
        Self {
            fee_apr,
            funding_rate,
            duration_days,
        }
    }
}

/// Fees earned on `deposit` over the period, accrued linearly from an APR.
///
/// Saturates at the `Decimal` bounds instead of overflowing.
pub fn accrued_fees(deposit: Decimal, accrual: &AccrualParams) -> Decimal {
    let daily_rate = accrual.fee_apr / Decimal::ONE_HUNDRED / Decimal::from(DAYS_PER_YEAR);
    deposit
        .saturating_mul(daily_rate)
        .saturating_mul(accrual.duration_days)
}

/// Funding received on a short of notional `short_size` over the period.
///
/// Saturates at the `Decimal` bounds instead of overflowing.
pub fn accrued_funding(short_size: Decimal, accrual: &AccrualParams) -> Decimal {
    short_size
        .saturating_mul(accrual.funding_rate / Decimal::ONE_HUNDRED)
        .saturating_mul(accrual.duration_days)
}

/// Annualizes a return earned over `days`.
pub fn calculate_apy(
    earned: Decimal,
    principal: Decimal,
    days: Decimal,
) -> Result<Decimal, &'static str> {
    if principal.is_zero() {
        return Err("Principal cannot be zero");
    }
    if days <= Decimal::ZERO {
        return Err("Days must be positive");
    }

    let roi = earned / principal;
    Ok(roi * (Decimal::from(DAYS_PER_YEAR) / days))
}
