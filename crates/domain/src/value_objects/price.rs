use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A price quoted in cash units per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    pub value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    pub fn is_positive(&self) -> bool {
        self.value > Decimal::ZERO
    }

    /// Returns this price moved by `pct` percent (e.g. `-5` for a 5% drop).
    pub fn shifted_by_pct(&self, pct: Decimal) -> Self {
        Self {
            value: self.value * (Decimal::ONE + pct / Decimal::ONE_HUNDRED),
        }
    }

    /// Percentage change from `base` to this price. Zero when `base` is zero.
    pub fn pct_change_from(&self, base: Price) -> Decimal {
        if base.value.is_zero() {
            return Decimal::ZERO;
        }
        (self.value - base.value) / base.value * Decimal::ONE_HUNDRED
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self { value }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
