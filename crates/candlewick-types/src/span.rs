//! Candle window span definitions.

use chrono::TimeDelta;
use std::str::FromStr;

/// Length of a candle window, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSpan(u32);

impl WindowSpan {
    /// 5-minute candles.
    pub const MINUTE_5: Self = Self(5);
    /// 30-minute candles.
    pub const MINUTE_30: Self = Self(30);
    /// 4-hour candles.
    pub const HOUR_4: Self = Self(240);

    /// Creates a span of the given number of minutes, or `None` for zero.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes == 0 {
            None
        } else {
            Some(Self(minutes))
        }
    }

    /// Returns the span length in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Returns the span as a duration.
    #[must_use]
    pub fn duration(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0))
    }

    /// Returns the spans produced when none are configured: 5, 30 and 240 minutes.
    #[must_use]
    pub const fn defaults() -> &'static [Self] {
        &[Self::MINUTE_5, Self::MINUTE_30, Self::HOUR_4]
    }
}

impl std::fmt::Display for WindowSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.0)
    }
}

impl FromStr for WindowSpan {
    type Err = WindowSpanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (digits, multiplier) = if let Some(n) = lower.strip_suffix("min") {
            (n, 1)
        } else if let Some(n) = lower.strip_suffix('m') {
            (n, 1)
        } else if let Some(n) = lower.strip_suffix('h') {
            (n, 60)
        } else {
            (lower.as_str(), 1)
        };

        digits
            .parse::<u32>()
            .ok()
            .and_then(|n| n.checked_mul(multiplier))
            .and_then(Self::from_minutes)
            .ok_or_else(|| WindowSpanParseError(s.to_string()))
    }
}

/// Error returned when parsing an invalid window span string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpanParseError(String);

impl std::fmt::Display for WindowSpanParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid window span '{}', expected positive minutes such as 5, 30m or 4h",
            self.0
        )
    }
}

impl std::error::Error for WindowSpanParseError {}
