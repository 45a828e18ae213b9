//! Concentrated-liquidity math on cash-per-token prices.
//!
//! Liquidity `L` is derived once from a cash deposit at the entry price and then
//! held fixed; every later valuation decomposes the same `L` at a new price.

use crate::enums::RangeRegime;
use crate::error::PositionError;
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Holdings of a position re-expressed at an observation price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decomposition {
    /// Token units held.
    pub token_amount: Decimal,
    /// Cash units held.
    pub cash_amount: Decimal,
    /// `token_amount * price + cash_amount`.
    pub total_value: Decimal,
}

impl Decomposition {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Share of the total value held as token, between 0 and 1.
    pub fn token_share(&self) -> Decimal {
        if self.total_value.is_zero() {
            return Decimal::ZERO;
        }
        (self.total_value - self.cash_amount) / self.total_value
    }
}

/// Square root of a price, computed through `f64`.
pub fn sqrt_price(price: Decimal) -> Result<Decimal, PositionError> {
    if price <= Decimal::ZERO {
        return Err(PositionError::NonPositivePrice(price));
    }
    let f = price
        .to_f64()
        .ok_or(PositionError::Conversion("price to f64"))?;
    Decimal::from_f64(f.sqrt()).ok_or(PositionError::Conversion("sqrt to decimal"))
}

/// Calculates the amount of token (x) given liquidity and a sqrt price span.
/// delta_x = L * (1/sqrt(P_a) - 1/sqrt(P_b))
/// where P_a < P_b
pub fn get_amount0_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> Result<Decimal, PositionError> {
    if sqrt_price_a <= Decimal::ZERO {
        return Err(PositionError::NonPositivePrice(sqrt_price_a));
    }
    if sqrt_price_b <= Decimal::ZERO {
        return Err(PositionError::NonPositivePrice(sqrt_price_b));
    }

    let (lower, upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    // delta_x = L * ( (upper - lower) / (lower * upper) )
    let factor = (upper - lower)
        .checked_div(lower * upper)
        .ok_or(PositionError::Conversion("amount0 factor"))?;
    liquidity
        .checked_mul(factor)
        .ok_or(PositionError::Conversion("amount0 overflow"))
}

/// Calculates the amount of cash (y) given liquidity and a sqrt price span.
/// delta_y = L * (sqrt(P_b) - sqrt(P_a))
/// where P_a < P_b
pub fn get_amount1_delta(
    liquidity: Decimal,
    sqrt_price_a: Decimal,
    sqrt_price_b: Decimal,
) -> Result<Decimal, PositionError> {
    let (lower, upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    liquidity
        .checked_mul(upper - lower)
        .ok_or(PositionError::Conversion("amount1 overflow"))
}

/// Derives liquidity from a cash deposit made at `entry_price`.
///
/// L = deposit / (2 * sqrt(P) - P / sqrt(P_b) - sqrt(P_a))
///
/// # Errors
/// * [`PositionError::NonPositivePrice`] if the entry price is not positive
/// * [`PositionError::OutOfRange`] if the entry price is outside `[lower, upper]`
/// * [`PositionError::DegenerateRange`] if the range is invalid or the
///   denominator is not positive
pub fn calculate_liquidity(
    entry_price: Price,
    deposit_amount: Decimal,
    range: &PriceRange,
) -> Result<Decimal, PositionError> {
    if !entry_price.is_positive() {
        return Err(PositionError::NonPositivePrice(entry_price.value));
    }
    if deposit_amount < Decimal::ZERO {
        return Err(PositionError::NegativeDeposit(deposit_amount));
    }
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds()?;
    if !range.contains(entry_price) {
        return Err(PositionError::OutOfRange {
            price: entry_price.value,
            lower: range.lower_price.value,
            upper: range.upper_price.value,
        });
    }

    let sqrt_entry = sqrt_price(entry_price.value)?;
    let denominator = Decimal::TWO * sqrt_entry - entry_price.value / sqrt_upper - sqrt_lower;
    if denominator <= Decimal::ZERO {
        return Err(PositionError::DegenerateRange {
            lower: range.lower_price.value,
            upper: range.upper_price.value,
        });
    }

    let liquidity = deposit_amount
        .checked_div(denominator)
        .ok_or(PositionError::Conversion("liquidity overflow"))?;
    debug!(%liquidity, entry = %entry_price, "derived liquidity");
    Ok(liquidity)
}

/// Splits a position of fixed `liquidity` into token and cash at `price`.
///
/// # Errors
/// Returns an error if `price` is not positive, `liquidity` is negative, or the
/// range is degenerate.
pub fn decompose(
    price: Price,
    liquidity: Decimal,
    range: &PriceRange,
) -> Result<Decomposition, PositionError> {
    decompose_in_regime(price, liquidity, range, range.classify(price))
}

/// Same as [`decompose`] with the regime already classified by the caller.
pub(crate) fn decompose_in_regime(
    price: Price,
    liquidity: Decimal,
    range: &PriceRange,
    regime: RangeRegime,
) -> Result<Decomposition, PositionError> {
    if !price.is_positive() {
        return Err(PositionError::NonPositivePrice(price.value));
    }
    if liquidity < Decimal::ZERO {
        return Err(PositionError::NegativeLiquidity(liquidity));
    }
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds()?;

    let (token, cash) = match regime {
        RangeRegime::BelowRange => (
            get_amount0_delta(liquidity, sqrt_lower, sqrt_upper)?,
            Decimal::ZERO,
        ),
        RangeRegime::AboveRange => (
            Decimal::ZERO,
            get_amount1_delta(liquidity, sqrt_lower, sqrt_upper)?,
        ),
        RangeRegime::InRange => {
            let sqrt_current = sqrt_price(price.value)?;
            (
                get_amount0_delta(liquidity, sqrt_current, sqrt_upper)?,
                get_amount1_delta(liquidity, sqrt_lower, sqrt_current)?,
            )
        }
    };

    // Absorb rounding noise at the boundaries.
    let token_amount = token.max(Decimal::ZERO);
    let cash_amount = cash.max(Decimal::ZERO);

    Ok(Decomposition {
        token_amount,
        cash_amount,
        total_value: token_amount * price.value + cash_amount,
    })
}
