//! Short-leg P&L and hedge sizing for a concentrated-liquidity position.

use crate::enums::HedgeRegime;
use crate::error::PositionError;
use crate::metrics::impermanent_loss::PositionBaseline;
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Recommended short notional (cash units) per market regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HedgeSizing {
    pub bull: Decimal,
    pub normal: Decimal,
    pub bear: Decimal,
}

impl HedgeSizing {
    /// Sizing used when the position math fails: 20/25/35% of the deposit.
    pub fn fallback(deposit_amount: Decimal) -> Self {
        Self {
            bull: deposit_amount * Decimal::new(20, 2),
            normal: deposit_amount * Decimal::new(25, 2),
            bear: deposit_amount * Decimal::new(35, 2),
        }
    }

    pub fn for_regime(&self, regime: HedgeRegime) -> Decimal {
        match regime {
            HedgeRegime::Bull => self.bull,
            HedgeRegime::Normal => self.normal,
            HedgeRegime::Bear => self.bear,
        }
    }

    /// Size for `regime` as a fraction of the deposit.
    pub fn hedge_ratio(&self, regime: HedgeRegime, deposit_amount: Decimal) -> Decimal {
        if deposit_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.for_regime(regime) / deposit_amount
    }
}

/// P&L of a short of notional `short_size` opened at `entry_price`.
///
/// shortPnL = size * (1 - current / entry)
pub fn calculate_short_pnl(current_price: Price, entry_price: Price, short_size: Decimal) -> Decimal {
    if short_size.is_zero() || entry_price.value.is_zero() {
        return Decimal::ZERO;
    }
    short_size.saturating_mul(Decimal::ONE - current_price.value / entry_price.value)
}

fn clamp_fraction(value: Decimal, deposit: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(deposit * min).min(deposit * max)
}

/// Sizes a short to offset the position's token exposure at entry.
///
/// # Errors
/// Propagates any [`PositionError`] from deriving the entry holdings.
pub fn try_calculate_hedge_sizing(
    entry_price: Price,
    deposit_amount: Decimal,
    range: &PriceRange,
) -> Result<HedgeSizing, PositionError> {
    let baseline = PositionBaseline::try_new(entry_price, deposit_amount, *range)?;
    let delta = baseline.initial.token_amount;

    let normal = clamp_fraction(
        delta * entry_price.value,
        deposit_amount,
        Decimal::new(2, 1),
        Decimal::new(8, 1),
    );
    // Bull under-hedges to keep upside, bear over-hedges for protection.
    let bull = clamp_fraction(
        normal * Decimal::new(7, 1),
        deposit_amount,
        Decimal::new(1, 1),
        Decimal::new(6, 1),
    );
    let bear = clamp_fraction(
        normal * Decimal::new(14, 1),
        deposit_amount,
        Decimal::new(3, 1),
        Decimal::new(9, 1),
    );

    debug!(%delta, %normal, %bull, %bear, "hedge sizing");
    Ok(HedgeSizing { bull, normal, bear })
}

/// Lenient variant of [`try_calculate_hedge_sizing`] returning
/// [`HedgeSizing::fallback`] on failure.
pub fn calculate_hedge_sizing(
    entry_price: Price,
    deposit_amount: Decimal,
    range: &PriceRange,
) -> HedgeSizing {
    try_calculate_hedge_sizing(entry_price, deposit_amount, range).unwrap_or_else(|err| {
        warn!(error = %err, "hedge sizing fell back to fixed fractions");
        HedgeSizing::fallback(deposit_amount)
    })
}
