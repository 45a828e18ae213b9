//! Last-write-wins bookkeeping for overlapping quote requests.
//!
//! Requests are never cancelled or merged. Each one takes a ticket before it
//! starts and checks the ticket when it finishes; only the newest ticket's
//! result should be applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Hands out monotonically increasing request tickets.
#[derive(Debug, Default)]
pub struct QuoteRequestTracker {
    latest: AtomicU64,
}

impl QuoteRequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request, superseding all earlier ones.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started request.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` only if `ticket` is still the latest request.
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        self.is_latest(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, PriceQuote, PriceQuoteProvider};
    use async_trait::async_trait;
    use chrono::Utc;
    use clmm_hedge_domain::entities::token::Token;
    use clmm_hedge_domain::value_objects::price::Price;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::time::Duration;

    struct DelayedProvider {
        delay_ms: u64,
        price: Decimal,
    }

    #[async_trait]
    impl PriceQuoteProvider for DelayedProvider {
        async fn get_spot_price(&self, token: &Token) -> Result<PriceQuote, FetchError> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(PriceQuote {
                token_id: token.id.clone(),
                price: Price::new(self.price),
                fetched_at: Utc::now(),
            })
        }
    }

    #[test]
    fn test_newer_ticket_supersedes() {
        let tracker = QuoteRequestTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(second > first);
        assert!(!tracker.is_latest(first));
        assert!(tracker.is_latest(second));
        assert_eq!(tracker.accept(first, 1), None);
        assert_eq!(tracker.accept(second, 2), Some(2));
    }

    #[tokio::test]
    async fn test_slow_stale_response_is_discarded() {
        let tracker = Arc::new(QuoteRequestTracker::new());
        let token = Token::new("ethereum", "Ethereum", "ETH");

        let slow = DelayedProvider {
            delay_ms: 50,
            price: Decimal::from(1900),
        };
        let fast = DelayedProvider {
            delay_ms: 1,
            price: Decimal::from(2000),
        };

        let slow_ticket = tracker.begin();
        let fast_ticket = tracker.begin();

        let (slow_quote, fast_quote) =
            tokio::join!(slow.get_spot_price(&token), fast.get_spot_price(&token));

        assert!(tracker.accept(slow_ticket, slow_quote.unwrap()).is_none());
        let applied = tracker.accept(fast_ticket, fast_quote.unwrap()).unwrap();
        assert_eq!(applied.price.value, Decimal::from(2000));
    }
}
