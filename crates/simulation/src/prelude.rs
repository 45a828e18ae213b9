//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clmm_hedge_simulation::prelude::*;
//! ```

// Scenario generation
pub use crate::scenario::{
    ScenarioConfig, ScenarioRow, ScenarioTable, generate_scenarios, scenario_at,
};

// Summary
pub use crate::summary::ScenarioSummary;
