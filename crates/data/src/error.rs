use thiserror::Error;

/// Failure to obtain a price quote.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Price service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("No usable USD price for '{0}'")]
    MissingPrice(String),
    #[error("Malformed price response: {0}")]
    Parse(#[from] serde_json::Error),
}
