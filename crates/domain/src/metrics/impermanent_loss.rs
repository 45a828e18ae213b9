//! Position outcome and impermanent-loss accounting.
//!
//! An outcome compares the position's holdings at an observation price with the
//! value of simply holding the token/cash split it started with.

use crate::enums::RangeRegime;
use crate::error::PositionError;
use crate::math::concentrated_liquidity::{
    Decomposition, calculate_liquidity, decompose, decompose_in_regime,
};
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Entry-time state of a position: liquidity and the initial holdings.
///
/// Built once per position and reused for every observation price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionBaseline {
    pub entry_price: Price,
    pub deposit_amount: Decimal,
    pub range: PriceRange,
    pub liquidity: Decimal,
    pub initial: Decomposition,
}

impl PositionBaseline {
    /// Derives liquidity at `entry_price` and decomposes the deposit.
    ///
    /// # Errors
    /// Propagates any [`PositionError`] from liquidity derivation or decomposition.
    pub fn try_new(
        entry_price: Price,
        deposit_amount: Decimal,
        range: PriceRange,
    ) -> Result<Self, PositionError> {
        let liquidity = calculate_liquidity(entry_price, deposit_amount, &range)?;
        let initial = decompose(entry_price, liquidity, &range)?;
        Ok(Self {
            entry_price,
            deposit_amount,
            range,
            liquidity,
            initial,
        })
    }

    /// Value of the initial split held outright at `current_price`.
    pub fn hodl_value(&self, current_price: Price) -> Decimal {
        self.initial.token_amount * current_price.value + self.initial.cash_amount
    }

    /// Values the position at `current_price`.
    ///
    /// # Errors
    /// Returns an error if `current_price` is not positive.
    pub fn try_outcome_at(&self, current_price: Price) -> Result<PositionOutcome, PositionError> {
        let regime = self.range.classify(current_price);
        let current = decompose_in_regime(current_price, self.liquidity, &self.range, regime)?;
        let hodl_value = self.hodl_value(current_price);

        let impermanent_loss = match regime {
            RangeRegime::BelowRange => {
                let hodl_in_token = hodl_value
                    .checked_div(current_price.value)
                    .ok_or(PositionError::NonPositivePrice(current_price.value))?;
                (current.token_amount - hodl_in_token) * current_price.value
            }
            RangeRegime::AboveRange => current.cash_amount - hodl_value,
            RangeRegime::InRange => current.total_value - hodl_value,
        };

        Ok(PositionOutcome {
            liquidity: self.liquidity,
            regime,
            initial: self.initial,
            current,
            hodl_value,
            impermanent_loss,
        })
    }

    /// Values the position at `current_price`, substituting the fallback
    /// outcome on failure.
    ///
    /// A non-positive price is expected at the bottom of an extreme sweep and
    /// is only logged at debug level.
    pub fn outcome_at(&self, current_price: Price) -> PositionOutcome {
        self.try_outcome_at(current_price).unwrap_or_else(|err| {
            match err {
                PositionError::NonPositivePrice(_) => {
                    debug!(price = %current_price, "no position value at non-positive price");
                }
                _ => warn!(error = %err, price = %current_price, "position outcome fell back to default"),
            }
            PositionOutcome::fallback(current_price, self.deposit_amount, &self.range)
        })
    }
}

/// Result of valuing a position at an observation price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionOutcome {
    /// Liquidity fixed at entry.
    pub liquidity: Decimal,
    /// Regime of the observation price.
    pub regime: RangeRegime,
    /// Holdings at entry.
    pub initial: Decomposition,
    /// Holdings at the observation price.
    pub current: Decomposition,
    /// Value of the initial split held outright at the observation price.
    pub hodl_value: Decimal,
    /// LP value minus hold value. Negative when the LP underperforms holding.
    pub impermanent_loss: Decimal,
}

impl PositionOutcome {
    /// Outcome reported when the calculation fails: everything zero except
    /// `hodl_value`, which is the deposit.
    pub fn fallback(current_price: Price, deposit_amount: Decimal, range: &PriceRange) -> Self {
        Self {
            liquidity: Decimal::ZERO,
            regime: range.classify(current_price),
            initial: Decomposition::zero(),
            current: Decomposition::zero(),
            hodl_value: deposit_amount,
            impermanent_loss: Decimal::ZERO,
        }
    }

    /// Impermanent loss relative to the hold value (e.g. -0.02 for 2%).
    pub fn impermanent_loss_pct(&self) -> Decimal {
        if self.hodl_value.is_zero() {
            return Decimal::ZERO;
        }
        self.impermanent_loss / self.hodl_value
    }
}

/// Values a position opened at `entry_price` with `deposit_amount` cash at
/// `current_price`.
///
/// # Errors
/// Returns the first [`PositionError`] hit while deriving or decomposing.
pub fn try_calculate_position(
    current_price: Price,
    entry_price: Price,
    deposit_amount: Decimal,
    range: &PriceRange,
) -> Result<PositionOutcome, PositionError> {
    PositionBaseline::try_new(entry_price, deposit_amount, *range)?.try_outcome_at(current_price)
}

/// Lenient variant of [`try_calculate_position`].
///
/// Never fails: any error yields [`PositionOutcome::fallback`]. Callers that
/// need to see errors should validate first or use the strict variant.
pub fn calculate_position(
    current_price: Price,
    entry_price: Price,
    deposit_amount: Decimal,
    range: &PriceRange,
) -> PositionOutcome {
    try_calculate_position(current_price, entry_price, deposit_amount, range).unwrap_or_else(
        |err| {
            warn!(error = %err, entry = %entry_price, "position outcome fell back to default");
            PositionOutcome::fallback(current_price, deposit_amount, range)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn eth_range() -> PriceRange {
        PriceRange::from_decimals(dec!(1800), dec!(2200))
    }

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_no_loss_at_entry() {
        let entry = Price::new(dec!(2000));
        let outcome = try_calculate_position(entry, entry, dec!(10000), &eth_range()).unwrap();
        assert!(close(outcome.current.total_value, dec!(10000), dec!(0.00001)));
        assert!(close(outcome.impermanent_loss, Decimal::ZERO, dec!(0.00001)));
        assert_eq!(outcome.regime, RangeRegime::InRange);
        assert_eq!(outcome.initial, outcome.current);
    }

    #[test]
    fn test_upper_boundary_converts_to_cash() {
        let entry = Price::new(dec!(2000));
        let outcome =
            try_calculate_position(Price::new(dec!(2200)), entry, dec!(10000), &eth_range())
                .unwrap();
        assert_eq!(outcome.regime, RangeRegime::AboveRange);
        assert_eq!(outcome.current.token_amount, Decimal::ZERO);
        assert_eq!(outcome.current.cash_amount, outcome.current.total_value);
        assert!(outcome.current.total_value > dec!(10000));
    }

    #[test]
    fn test_loss_when_price_moves_inside_range() {
        let entry = Price::new(dec!(2000));
        for p in [dec!(1900), dec!(2100)] {
            let outcome =
                try_calculate_position(Price::new(p), entry, dec!(10000), &eth_range()).unwrap();
            assert!(outcome.impermanent_loss < Decimal::ZERO);
            assert!(outcome.impermanent_loss_pct() < Decimal::ZERO);
        }
    }

    #[test]
    fn test_below_range_loss_formula() {
        let entry = Price::new(dec!(2000));
        let current = Price::new(dec!(1500));
        let outcome = try_calculate_position(current, entry, dec!(10000), &eth_range()).unwrap();
        assert_eq!(outcome.regime, RangeRegime::BelowRange);
        assert_eq!(outcome.current.cash_amount, Decimal::ZERO);

        let expected = (outcome.current.token_amount - outcome.hodl_value / current.value)
            * current.value;
        assert_eq!(outcome.impermanent_loss, expected);
        assert!(outcome.impermanent_loss < Decimal::ZERO);
    }

    #[test]
    fn test_above_range_loss_formula() {
        let entry = Price::new(dec!(2000));
        let outcome =
            try_calculate_position(Price::new(dec!(2600)), entry, dec!(10000), &eth_range())
                .unwrap();
        assert_eq!(
            outcome.impermanent_loss,
            outcome.current.cash_amount - outcome.hodl_value
        );
        assert!(outcome.impermanent_loss < Decimal::ZERO);
    }

    #[test]
    fn test_strict_reports_out_of_range_entry() {
        let err = try_calculate_position(
            Price::new(dec!(2000)),
            Price::new(dec!(2500)),
            dec!(10000),
            &eth_range(),
        );
        assert!(matches!(err, Err(PositionError::OutOfRange { .. })));
    }

    #[test]
    fn test_lenient_falls_back_to_default() {
        let outcome = calculate_position(
            Price::new(dec!(2000)),
            Price::new(dec!(2500)),
            dec!(10000),
            &eth_range(),
        );
        assert_eq!(outcome.liquidity, Decimal::ZERO);
        assert_eq!(outcome.current, Decomposition::zero());
        assert_eq!(outcome.initial, Decomposition::zero());
        assert_eq!(outcome.impermanent_loss, Decimal::ZERO);
        assert_eq!(outcome.hodl_value, dec!(10000));
    }

    #[test]
    fn test_baseline_reuses_entry_liquidity() {
        let baseline =
            PositionBaseline::try_new(Price::new(dec!(2000)), dec!(10000), eth_range()).unwrap();
        let a = baseline.outcome_at(Price::new(dec!(1900)));
        let b = baseline.outcome_at(Price::new(dec!(2150)));
        assert_eq!(a.liquidity, baseline.liquidity);
        assert_eq!(b.liquidity, baseline.liquidity);
        assert_eq!(a.initial, b.initial);
    }

    #[test]
    fn test_baseline_zero_price_uses_fallback() {
        let baseline =
            PositionBaseline::try_new(Price::new(dec!(2000)), dec!(10000), eth_range()).unwrap();
        assert!(baseline.try_outcome_at(Price::new(dec!(0))).is_err());
        let outcome = baseline.outcome_at(Price::new(dec!(0)));
        assert_eq!(outcome.current.total_value, Decimal::ZERO);
        assert_eq!(outcome.hodl_value, dec!(10000));
    }
}
