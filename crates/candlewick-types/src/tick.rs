//! Trade tick representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Price;

/// A single observed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Instrument ticker, e.g. `SBER`.
    pub ticker: String,
    /// Trade time (UTC, microsecond precision).
    pub timestamp: DateTime<Utc>,
    /// Trade price.
    pub price: Price,
    /// Number of trades reported by the record.
    pub count: i64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        timestamp: DateTime<Utc>,
        price: Price,
        count: i64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            timestamp,
            price,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tick_new() {
        let timestamp = Utc.with_ymd_and_hms(2019, 1, 30, 7, 0, 9).unwrap();
        let tick = Tick::new("AAPL", timestamp, Price::from_minor(16288), 2);

        assert_eq!(tick.ticker, "AAPL");
        assert_eq!(tick.timestamp, timestamp);
        assert_eq!(tick.price.minor_units(), 16288);
        assert_eq!(tick.count, 2);
    }
}
