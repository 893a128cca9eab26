//! CSV output format.

use candlewick_aggregate::Candle;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Each record is `TICKER,WINDOW_START,OPEN,HIGH,LOW,CLOSE` with the window
/// start in `YYYY-MM-DDTHH:MM:SSZ` form and prices in their codec text.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Whether to include header row (default: no).
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_header: false,
        }
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for CsvFormatter {
    fn write_header<W: Write>(&self, mut writer: W) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "ticker,window_start,open,high,low,close")?;
        }
        Ok(())
    }

    fn write_candle<W: Write>(&self, candle: &Candle, mut writer: W) -> Result<(), FormatError> {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            candle.ticker,
            candle.window_start.format("%Y-%m-%dT%H:%M:%SZ"),
            candle.open,
            candle.high,
            candle.low,
            candle.close
        )?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
