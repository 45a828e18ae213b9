use rust_decimal::Decimal;
use thiserror::Error;

/// Failures inside the liquidity and position math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("Entry price {price} is outside range [{lower}, {upper}]")]
    OutOfRange {
        price: Decimal,
        lower: Decimal,
        upper: Decimal,
    },
    #[error("Degenerate range [{lower}, {upper}]")]
    DegenerateRange { lower: Decimal, upper: Decimal },
    #[error("Price must be positive, got {0}")]
    NonPositivePrice(Decimal),
    #[error("Deposit amount cannot be negative, got {0}")]
    NegativeDeposit(Decimal),
    #[error("Liquidity cannot be negative, got {0}")]
    NegativeLiquidity(Decimal),
    #[error("Numeric conversion failed: {0}")]
    Conversion(&'static str),
}

/// Caller-supplied parameters that violate domain constraints.
///
/// Holds every violation found rather than only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }

    pub fn contains(&self, message: &str) -> bool {
        self.violations.iter().any(|v| v == message)
    }
}
