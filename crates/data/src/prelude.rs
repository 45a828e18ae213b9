//! Prelude module for convenient imports.
//!
//! ```rust
//! use clmm_hedge_data::prelude::*;
//! ```

// Quotes
pub use crate::{PriceQuote, PriceQuoteProvider};

// Providers
pub use crate::providers::CoinGeckoProvider;

// Configuration and errors
pub use crate::config::QuoteConfig;
pub use crate::error::FetchError;

// Request tracking
pub use crate::tracker::{QuoteRequestTracker, RequestTicket};
