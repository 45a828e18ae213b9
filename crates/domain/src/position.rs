use crate::enums::InputDenomination;
use crate::error::{PositionError, ValidationError};
use crate::metrics::impermanent_loss::PositionBaseline;
use crate::validation::validate_inputs;
use crate::value_objects::price::Price;
use crate::value_objects::price_range::PriceRange;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User-supplied description of a concentrated-liquidity deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionParams {
    pub entry_price: Price,
    /// Deposit size, in the units named by `denomination`.
    pub deposit_amount: Decimal,
    pub range: PriceRange,
    pub denomination: InputDenomination,
}

impl PositionParams {
    /// Creates parameters for a cash-denominated deposit.
    pub fn new(entry_price: Price, deposit_amount: Decimal, range: PriceRange) -> Self {
        Self {
            entry_price,
            deposit_amount,
            range,
            denomination: InputDenomination::Cash,
        }
    }

    #[must_use]
    pub fn with_denomination(mut self, denomination: InputDenomination) -> Self {
        self.denomination = denomination;
        self
    }

    /// Deposit expressed in cash units at the entry price.
    pub fn deposit_value(&self) -> Decimal {
        match self.denomination {
            InputDenomination::Cash => self.deposit_amount,
            InputDenomination::Token => self.deposit_amount * self.entry_price.value,
        }
    }

    /// Validates these parameters together with a short size.
    ///
    /// # Errors
    /// Returns every violated rule.
    pub fn validate(&self, short_size: Decimal) -> Result<(), ValidationError> {
        validate_inputs(
            self.entry_price.value,
            self.deposit_value(),
            self.range.lower_price.value,
            self.range.upper_price.value,
            short_size,
        )
    }

    /// Derives the entry-time baseline for these parameters.
    ///
    /// # Errors
    /// Propagates any [`PositionError`] from the liquidity math.
    pub fn baseline(&self) -> Result<PositionBaseline, PositionError> {
        PositionBaseline::try_new(self.entry_price, self.deposit_value(), self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params() -> PositionParams {
        PositionParams::new(
            Price::new(dec!(2000)),
            dec!(5),
            PriceRange::from_decimals(dec!(1800), dec!(2200)),
        )
    }

    #[test]
    fn test_deposit_value_by_denomination() {
        assert_eq!(params().deposit_value(), dec!(5));
        let token = params().with_denomination(InputDenomination::Token);
        assert_eq!(token.deposit_value(), dec!(10000));
    }

    #[test]
    fn test_token_deposit_baseline_matches_cash() {
        let token = params().with_denomination(InputDenomination::Token);
        let cash = PositionParams::new(token.entry_price, dec!(10000), token.range);
        assert_eq!(
            token.baseline().unwrap().liquidity,
            cash.baseline().unwrap().liquidity
        );
    }

    #[test]
    fn test_validate_uses_cash_value() {
        assert!(params().validate(dec!(0)).is_ok());
        let err = params().validate(dec!(-1)).unwrap_err();
        assert_eq!(err.violations, vec!["Short size cannot be negative"]);
    }
}
