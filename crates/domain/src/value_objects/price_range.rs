use crate::enums::RangeRegime;
use crate::error::PositionError;
use crate::math::concentrated_liquidity::sqrt_price;
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bounds of a concentrated-liquidity position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: Price,
    pub upper_price: Price,
}

impl PriceRange {
    pub fn new(lower: Price, upper: Price) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    /// Builds a range from raw decimals.
    pub fn from_decimals(lower: Decimal, upper: Decimal) -> Self {
        Self::new(Price::new(lower), Price::new(upper))
    }

    /// Inclusive containment check.
    pub fn contains(&self, price: Price) -> bool {
        price.value >= self.lower_price.value && price.value <= self.upper_price.value
    }

    /// Strict containment check (boundaries excluded).
    pub fn strictly_contains(&self, price: Price) -> bool {
        price.value > self.lower_price.value && price.value < self.upper_price.value
    }

    /// Classifies `price` against the range.
    ///
    /// Boundary prices belong to the out-of-range regimes: at the lower bound the
    /// position is entirely token, at the upper bound entirely cash.
    pub fn classify(&self, price: Price) -> RangeRegime {
        if price.value <= self.lower_price.value {
            RangeRegime::BelowRange
        } else if price.value >= self.upper_price.value {
            RangeRegime::AboveRange
        } else {
            RangeRegime::InRange
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lower_price.is_positive() && self.lower_price.value < self.upper_price.value
    }

    /// Width of the range as a percentage of the lower bound.
    pub fn width_pct(&self) -> Decimal {
        self.upper_price.pct_change_from(self.lower_price)
    }

    /// Square roots of the lower and upper bounds.
    ///
    /// # Errors
    /// Returns [`PositionError::DegenerateRange`] if a bound is non-positive or
    /// the bounds are not strictly ordered.
    pub fn sqrt_bounds(&self) -> Result<(Decimal, Decimal), PositionError> {
        if !self.is_valid() {
            return Err(PositionError::DegenerateRange {
                lower: self.lower_price.value,
                upper: self.upper_price.value,
            });
        }
        Ok((
            sqrt_price(self.lower_price.value)?,
            sqrt_price(self.upper_price.value)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn range() -> PriceRange {
        PriceRange::from_decimals(dec!(1800), dec!(2200))
    }

    #[test]
    fn test_classify_regimes() {
        let r = range();
        assert_eq!(r.classify(Price::new(dec!(1700))), RangeRegime::BelowRange);
        assert_eq!(r.classify(Price::new(dec!(1800))), RangeRegime::BelowRange);
        assert_eq!(r.classify(Price::new(dec!(2000))), RangeRegime::InRange);
        assert_eq!(r.classify(Price::new(dec!(2200))), RangeRegime::AboveRange);
        assert_eq!(r.classify(Price::new(dec!(2500))), RangeRegime::AboveRange);
    }

    #[test]
    fn test_contains_vs_strictly_contains() {
        let r = range();
        assert!(r.contains(Price::new(dec!(1800))));
        assert!(!r.strictly_contains(Price::new(dec!(1800))));
        assert!(r.strictly_contains(Price::new(dec!(1801))));
    }

    #[test]
    fn test_sqrt_bounds_rejects_swapped_range() {
        let swapped = PriceRange::from_decimals(dec!(2200), dec!(1800));
        assert!(matches!(
            swapped.sqrt_bounds(),
            Err(PositionError::DegenerateRange { .. })
        ));
        let zero = PriceRange::from_decimals(dec!(0), dec!(1800));
        assert!(zero.sqrt_bounds().is_err());
    }

    #[test]
    fn test_sqrt_bounds() {
        let r = PriceRange::from_decimals(dec!(100), dec!(400));
        let (a, b) = r.sqrt_bounds().unwrap();
        assert!((a - dec!(10)).abs() < dec!(0.000000001));
        assert!((b - dec!(20)).abs() < dec!(0.000000001));
    }
}
