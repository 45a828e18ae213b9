//! CoinGecko-compatible `simple/price` client.
//!
//! Request: `GET {base}/simple/price?ids=<id>&vs_currencies=usd`
//! Response: `{ "<id>": { "usd": <number> } }`
//!
//! No retries and no request de-duplication: each call is one HTTP GET.

use crate::config::QuoteConfig;
use crate::error::FetchError;
use crate::{PriceQuote, PriceQuoteProvider};
use async_trait::async_trait;
use chrono::Utc;
use clmm_hedge_domain::entities::token::Token;
use clmm_hedge_domain::value_objects::price::Price;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

#[derive(Debug, Deserialize)]
struct UsdQuote {
    usd: Option<f64>,
}

/// Extracts the USD price of `token_id` from a `simple/price` response body.
///
/// # Errors
/// * [`FetchError::Parse`] if the body is not the expected JSON shape
/// * [`FetchError::MissingPrice`] if the id or its `usd` field is absent, or
///   the price is not a positive finite number
pub fn parse_simple_price(body: &str, token_id: &str) -> Result<Decimal, FetchError> {
    let quotes: HashMap<String, UsdQuote> = serde_json::from_str(body)?;
    let usd = quotes
        .get(token_id)
        .and_then(|q| q.usd)
        .ok_or_else(|| FetchError::MissingPrice(token_id.to_string()))?;

    Decimal::from_f64(usd)
        .filter(|p| *p > Decimal::ZERO)
        .ok_or_else(|| FetchError::MissingPrice(token_id.to_string()))
}

/// Price provider backed by a CoinGecko-compatible HTTP API.
#[derive(Debug, Clone)]
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    config: QuoteConfig,
}

impl CoinGeckoProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    /// Returns [`FetchError::Http`] if the client cannot be built.
    pub fn new(config: QuoteConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn simple_price_url(&self) -> String {
        format!("{}/simple/price", self.config.base_url)
    }
}

#[async_trait]
impl PriceQuoteProvider for CoinGeckoProvider {
    #[tracing::instrument(skip_all, fields(token = %token.id))]
    async fn get_spot_price(&self, token: &Token) -> Result<PriceQuote, FetchError> {
        let mut request = self
            .client
            .get(self.simple_price_url())
            .query(&[("ids", token.id.as_str()), ("vs_currencies", "usd")]);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!("requesting spot price");
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let price = parse_simple_price(&body, &token.id)?;
        info!(%price, symbol = %token.symbol, "spot price fetched");

        Ok(PriceQuote {
            token_id: token.id.clone(),
            price: Price::new(price),
            fetched_at: Utc::now(),
        })
    }
}
