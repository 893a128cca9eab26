//! OHLC candle data structure.

use candlewick_types::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC summary of all ticks for one ticker within one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Instrument ticker.
    pub ticker: String,
    /// Start of the window this candle covers.
    pub window_start: DateTime<Utc>,
    /// Price of the first tick in the window.
    pub open: Price,
    /// Highest price in the window.
    pub high: Price,
    /// Lowest price in the window.
    pub low: Price,
    /// Price of the last tick in the window.
    pub close: Price,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        window_start: DateTime<Utc>,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            window_start,
            open,
            high,
            low,
            close,
        }
    }

    /// Creates a candle from a single trade.
    #[must_use]
    pub fn flat(ticker: impl Into<String>, window_start: DateTime<Utc>, price: Price) -> Self {
        Self::new(ticker, window_start, price, price, price, price)
    }

    /// Folds another trade price into the candle.
    pub(crate) fn update(&mut self, price: Price) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
    }
}
