use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeRegime {
    /// At or below the lower bound: the position is entirely token.
    BelowRange,
    /// Strictly inside the bounds: the position holds both sides.
    InRange,
    /// At or above the upper bound: the position is entirely cash.
    AboveRange,
}

impl RangeRegime {
    pub fn is_in_range(&self) -> bool {
        matches!(self, RangeRegime::InRange)
    }
}

impl fmt::Display for RangeRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RangeRegime::BelowRange => "below",
            RangeRegime::InRange => "in range",
            RangeRegime::AboveRange => "above",
        };
        f.write_str(label)
    }
}

/// Which side of the deposit the user specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDenomination {
    /// Deposit given in token units.
    Token,
    /// Deposit given in cash units.
    #[default]
    Cash,
}

impl FromStr for InputDenomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "token" => Ok(Self::Token),
            "cash" | "usd" => Ok(Self::Cash),
            other => Err(format!("unknown denomination '{other}' (expected token or cash)")),
        }
    }
}

/// Market regime assumed when sizing a hedge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HedgeRegime {
    Bull,
    Normal,
    Bear,
}

impl fmt::Display for HedgeRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HedgeRegime::Bull => "bull",
            HedgeRegime::Normal => "normal",
            HedgeRegime::Bear => "bear",
        };
        f.write_str(label)
    }
}

/// Width of a scenario price sweep around the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepRange {
    /// ±25%
    Narrow,
    /// ±50%
    #[default]
    Medium,
    /// ±75%
    Wide,
    /// ±100%
    Extreme,
}

impl SweepRange {
    /// Maximum move from entry, in percent.
    pub fn max_pct(&self) -> Decimal {
        match self {
            SweepRange::Narrow => Decimal::from(25),
            SweepRange::Medium => Decimal::from(50),
            SweepRange::Wide => Decimal::from(75),
            SweepRange::Extreme => Decimal::from(100),
        }
    }
}

impl FromStr for SweepRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "narrow" => Ok(Self::Narrow),
            "medium" => Ok(Self::Medium),
            "wide" => Ok(Self::Wide),
            "extreme" => Ok(Self::Extreme),
            other => Err(format!(
                "unknown sweep range '{other}' (expected narrow, medium, wide or extreme)"
            )),
        }
    }
}

/// Spacing between scenario price points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepSize {
    /// 2.5 percentage points
    Fine,
    /// 5 percentage points
    #[default]
    Normal,
    /// 10 percentage points
    Coarse,
}

impl StepSize {
    /// Step in percentage points.
    pub fn pct(&self) -> Decimal {
        match self {
            StepSize::Fine => Decimal::new(25, 1),
            StepSize::Normal => Decimal::from(5),
            StepSize::Coarse => Decimal::from(10),
        }
    }
}

impl FromStr for StepSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fine" => Ok(Self::Fine),
            "normal" => Ok(Self::Normal),
            "coarse" => Ok(Self::Coarse),
            other => Err(format!(
                "unknown step size '{other}' (expected fine, normal or coarse)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sweep_and_step_values() {
        assert_eq!(SweepRange::Narrow.max_pct(), dec!(25));
        assert_eq!(SweepRange::Extreme.max_pct(), dec!(100));
        assert_eq!(StepSize::Fine.pct(), dec!(2.5));
        assert_eq!(StepSize::Coarse.pct(), dec!(10));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("WIDE".parse::<SweepRange>(), Ok(SweepRange::Wide));
        assert_eq!("fine".parse::<StepSize>(), Ok(StepSize::Fine));
        assert_eq!("token".parse::<InputDenomination>(), Ok(InputDenomination::Token));
        assert!("huge".parse::<SweepRange>().is_err());
    }
}
