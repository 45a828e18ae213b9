//! Domain model and pricing engine for hedged concentrated-liquidity positions.
//!
//! This crate provides:
//! - Value objects for prices, ranges and position parameters
//! - Concentrated-liquidity math (liquidity derivation, token/cash decomposition)
//! - Position outcome and impermanent-loss accounting
//! - Short-leg P&L and hedge sizing
//! - Fee and funding accrual
//! - Input validation and display formatting

/// Prelude module for convenient imports.
pub mod prelude;

/// Token catalog entries.
pub mod entities;
/// Enumerations shared across the engine.
pub mod enums;
/// Error types.
pub mod error;
/// Display formatting helpers.
pub mod format;
/// Short-leg P&L and hedge sizing.
pub mod hedge;
/// Concentrated-liquidity math.
pub mod math;
/// Position outcome, impermanent loss and accrual metrics.
pub mod metrics;
/// Position parameters.
pub mod position;
/// Input validation.
pub mod validation;
/// Value objects.
pub mod value_objects;
