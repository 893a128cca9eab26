//! Error types for candlewick.

use chrono::TimeDelta;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while parsing a single tick record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The record has fewer fields than required.
    #[error("invalid line format: expected at least 4 fields, found {fields}")]
    InvalidFormat {
        /// Number of fields found in the record.
        fields: usize,
    },

    /// The price field is malformed.
    #[error(transparent)]
    Price(#[from] PriceParseError),

    /// The trade count field is not an integer.
    #[error("invalid trade count '{text}': {source}")]
    Count {
        /// The offending field.
        text: String,
        /// Underlying integer parse failure.
        source: ParseIntError,
    },

    /// The timestamp field does not match `YYYY-MM-DD HH:MM:SS[.ffffff]`.
    #[error("invalid timestamp '{text}': {source}")]
    Timestamp {
        /// The offending field.
        text: String,
        /// Underlying chrono parse failure.
        source: chrono::ParseError,
    },
}

/// Error returned when a price text is not a valid fixed-point decimal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// The whole or cents part is not a base-10 integer.
    #[error("invalid price '{text}': {source}")]
    Invalid {
        /// The offending text.
        text: String,
        /// Underlying integer parse failure.
        source: ParseIntError,
    },

    /// The price does not fit in 64-bit minor units.
    #[error("price '{text}' is out of range")]
    Overflow {
        /// The offending text.
        text: String,
    },
}

impl PriceParseError {
    /// Returns the text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Invalid { text, .. } | Self::Overflow { text } => text,
        }
    }
}

/// Error for invalid session schedules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Session length must be positive.
    #[error("session length must be positive, got {0}")]
    EmptySession(TimeDelta),

    /// Session opens before midnight or runs into the next day's session.
    #[error("session [{open_offset}, {open_offset} + {length}) does not fit in one day")]
    ExceedsDay {
        /// Offset of the session open from midnight.
        open_offset: TimeDelta,
        /// Session length.
        length: TimeDelta,
    },
}
