//! Prelude module for convenient imports.
//!
//! ```rust
//! use clmm_hedge_domain::prelude::*;
//! ```

// Entities
pub use crate::entities::token::{Token, TokenCatalog};

// Enums
pub use crate::enums::{HedgeRegime, InputDenomination, RangeRegime, StepSize, SweepRange};

// Errors
pub use crate::error::{PositionError, ValidationError};

// Hedge
pub use crate::hedge::{
    HedgeSizing, calculate_hedge_sizing, calculate_short_pnl, try_calculate_hedge_sizing,
};

// Math
pub use crate::math::concentrated_liquidity::{Decomposition, calculate_liquidity, decompose};

// Metrics
pub use crate::metrics::fees::{AccrualParams, accrued_fees, accrued_funding};
pub use crate::metrics::impermanent_loss::{
    PositionBaseline, PositionOutcome, calculate_position, try_calculate_position,
};

// Position
pub use crate::position::PositionParams;

// Validation
pub use crate::validation::{validate_accrual, validate_inputs};

// Value objects
pub use crate::value_objects::price::Price;
pub use crate::value_objects::price_range::PriceRange;
