//! Newline-delimited JSON output format.

use candlewick_aggregate::Candle;
use std::io::Write;

use crate::{FormatError, Formatter};

/// NDJSON formatter, one candle object per line.
///
/// Prices are written as their codec text so that the values match the CSV
/// output exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Formatter for JsonFormatter {
    fn write_candle<W: Write>(&self, candle: &Candle, mut writer: W) -> Result<(), FormatError> {
        serde_json::to_writer(&mut writer, candle)?;
        writeln!(writer)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "ndjson"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candlewick_types::Price;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_candle() -> Candle {
        let start = Utc.with_ymd_and_hms(2019, 1, 30, 7, 0, 0).unwrap();
        Candle::new(
            "SBER",
            start,
            Price::from_minor(21380),
            Price::from_minor(21414),
            Price::from_minor(21310),
            Price::from_minor(21317),
        )
    }

    #[test]
    fn test_ndjson() {
        let formatter = JsonFormatter::new();
        let candles = vec![create_test_candle(), create_test_candle()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_candles(&candles, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('{'));
        assert!(lines[0].contains("\"ticker\":\"SBER\""));
        assert!(lines[0].contains("\"open\":\"213.8\""));
        assert!(lines[0].contains("\"low\":\"213.1\""));
    }

    #[test]
    fn test_ndjson_round_trip() {
        let mut output = Vec::new();
        JsonFormatter
            .write_candle(&create_test_candle(), &mut output)
            .unwrap();

        let parsed: Candle = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, create_test_candle());
    }
}
