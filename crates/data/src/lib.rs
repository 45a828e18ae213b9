//! Market data access for the hedge engine.
//!
//! This crate supplies live spot prices to the engine. The engine never
//! depends on it: a fetched price is just another input scalar.
//! - [`PriceQuoteProvider`] trait and a CoinGecko-compatible implementation
//! - Environment-driven configuration
//! - Last-write-wins tracking for overlapping requests

/// Quote client configuration.
pub mod config;
/// Fetch errors.
pub mod error;
/// Commonly used re-exports.
pub mod prelude;
/// Provider implementations.
pub mod providers;
/// Stale request tracking.
pub mod tracker;

pub use config::QuoteConfig;
pub use error::FetchError;
pub use tracker::{QuoteRequestTracker, RequestTicket};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clmm_hedge_domain::entities::token::Token;
use clmm_hedge_domain::value_objects::price::Price;
use serde::{Deserialize, Serialize};

/// A spot price observed for a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Price-feed identifier of the token.
    pub token_id: String,
    /// Price in USD.
    pub price: Price,
    /// When the quote was received.
    pub fetched_at: DateTime<Utc>,
}

/// Source of live spot prices.
#[async_trait]
pub trait PriceQuoteProvider: Send + Sync {
    /// Fetches the current USD price of `token`.
    ///
    /// # Errors
    /// Returns a [`FetchError`] on transport failure, a non-2xx status, or a
    /// response without a usable price.
    async fn get_spot_price(&self, token: &Token) -> Result<PriceQuote, FetchError>;
}
