use std::env;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the price-quote client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteConfig {
    /// Base URL of the price service, without a trailing slash.
    pub base_url: String,
    /// Optional API key sent with every request.
    pub api_key: Option<String>,
    /// Transport timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QuoteConfig {
    /// Reads `PRICE_API_BASE_URL`, `PRICE_API_KEY` and `PRICE_API_TIMEOUT_SECS`,
    /// keeping defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("PRICE_API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.base_url),
            api_key: lookup("PRICE_API_KEY").filter(|k| !k.is_empty()),
            timeout_secs: lookup("PRICE_API_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
