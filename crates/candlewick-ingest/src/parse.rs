//! Tick record parsing.

use candlewick_types::{ParseError, Price, Tick};
use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};

/// Minimum number of comma-separated fields in a tick record.
pub const MIN_FIELDS: usize = 4;

/// Timestamp layout of a tick record. Fractional seconds are optional.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses one tick record.
///
/// The record format is `TICKER,PRICE,COUNT,TIMESTAMP`; any fields after the
/// timestamp are ignored.
///
/// # Errors
///
/// Returns an error if the record has fewer than four fields, or if the
/// price, count or timestamp field is malformed.
pub fn parse_line(line: &str) -> Result<Tick, ParseError> {
    let mut fields = line.split(',');
    let (Some(ticker), Some(price), Some(count), Some(timestamp)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ParseError::InvalidFormat {
            fields: line.split(',').count(),
        });
    };

    let price: Price = price.parse()?;
    let count = count.parse::<i64>().map_err(|source| ParseError::Count {
        text: count.to_string(),
        source,
    })?;
    let timestamp = parse_timestamp(timestamp).map_err(|source| ParseError::Timestamp {
        text: timestamp.to_string(),
        source,
    })?;

    Ok(Tick::new(ticker, timestamp, price, count))
}

/// Parses a `YYYY-MM-DD HH:MM:SS[.ffffff]` timestamp as UTC.
///
/// Sub-microsecond digits are truncated.
///
/// # Errors
///
/// Returns an error if the text does not match [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)?;
    Ok(Utc.from_utc_datetime(&naive).trunc_subsecs(6))
}
