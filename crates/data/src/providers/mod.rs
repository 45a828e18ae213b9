//! Price-quote provider implementations.

mod coingecko;

pub use coingecko::{CoinGeckoProvider, parse_simple_price};
