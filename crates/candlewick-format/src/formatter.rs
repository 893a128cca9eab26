//! Output format abstraction.

use candlewick_aggregate::Candle;
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for candle formatters.
///
/// Formatters write one record per call so that candles can be streamed to
/// the output as windows close.
pub trait Formatter: Send + Sync {
    /// Writes the leading header, if the format has one.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_header<W: Write>(&self, writer: W) -> Result<(), FormatError> {
        let _ = writer;
        Ok(())
    }

    /// Writes a single candle record.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting or writing fails.
    fn write_candle<W: Write>(&self, candle: &Candle, writer: W) -> Result<(), FormatError>;

    /// Writes the header followed by every candle.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting or writing fails.
    fn write_candles<W: Write>(
        &self,
        candles: &[Candle],
        mut writer: W,
    ) -> Result<(), FormatError> {
        self.write_header(&mut writer)?;
        for candle in candles {
            self.write_candle(candle, &mut writer)?;
        }
        Ok(())
    }

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "parquet".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_output_format_extension() {
        for format in [OutputFormat::Csv, OutputFormat::Ndjson] {
            assert_eq!(format.to_string(), format.extension());
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }
}
