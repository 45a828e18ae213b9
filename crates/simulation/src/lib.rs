//! Scenario analysis for hedged concentrated-liquidity positions.
//!
//! This crate sweeps hypothetical prices around an entry price and values an
//! LP position plus its offsetting short at each point:
//! - Price sweep generation from named range and step classes
//! - Per-scenario LP, short, fee and funding P&L
//! - Table summaries (best/worst case, in-range share)

/// Prelude module for convenient imports.
pub mod prelude;

/// Scenario configuration, rows and table generation.
pub mod scenario;
/// Summary statistics over a scenario table.
pub mod summary;
