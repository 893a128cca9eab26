//! Pipeline configuration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use candlewick_format::OutputFormat;
use candlewick_types::{SessionSchedule, WindowSpan};
use chrono::TimeDelta;

use crate::PipelineError;

/// Configuration for a pipeline run.
///
/// Build one with struct-update syntax over [`PipelineConfig::default`]:
///
/// ```
/// use candlewick_pipeline::PipelineConfig;
/// use candlewick_types::WindowSpan;
/// use std::time::Duration;
///
/// let config = PipelineConfig {
///     spans: vec![WindowSpan::MINUTE_5],
///     timeout: Duration::from_secs(30),
///     ..PipelineConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Window spans to aggregate, one output per span.
    pub spans: Vec<WindowSpan>,
    /// Directory that receives the output files.
    pub output_dir: PathBuf,
    /// Deadline for the whole run.
    pub timeout: Duration,
    /// Output record format.
    pub format: OutputFormat,
    /// Whether CSV outputs start with a header row.
    pub csv_header: bool,
    /// Daily session geometry.
    pub schedule: SessionSchedule,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            spans: WindowSpan::defaults().to_vec(),
            output_dir: PathBuf::from("."),
            timeout: Duration::from_millis(5000),
            format: OutputFormat::Csv,
            csv_header: false,
            schedule: SessionSchedule::default(),
        }
    }
}

impl PipelineConfig {
    /// Replaces the session schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is empty or does not fit in one day.
    pub fn with_session(
        mut self,
        open_offset: TimeDelta,
        length: TimeDelta,
    ) -> Result<Self, PipelineError> {
        self.schedule = SessionSchedule::new(open_offset, length)?;
        Ok(self)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no spans are configured, a span is listed twice,
    /// or the timeout is zero.
    pub fn validate(&self) -> Result<(), PipelineError> {
        check_spans(&self.spans)?;
        if self.timeout.is_zero() {
            return Err(PipelineError::InvalidConfig(
                "timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the output file path for a span, `candles_<minutes>min.<ext>`.
    #[must_use]
    pub fn output_path(&self, span: WindowSpan) -> PathBuf {
        output_path(&self.output_dir, span, self.format)
    }
}

fn output_path(dir: &Path, span: WindowSpan, format: OutputFormat) -> PathBuf {
    dir.join(format!("candles_{span}.{}", format.extension()))
}

/// Rejects an empty span list and repeated spans.
pub(crate) fn check_spans(spans: &[WindowSpan]) -> Result<(), PipelineError> {
    if spans.is_empty() {
        return Err(PipelineError::InvalidConfig(
            "at least one window span is required".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(spans.len());
    for span in spans {
        if !seen.insert(*span) {
            return Err(PipelineError::InvalidConfig(format!(
                "window span {span} listed twice"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.spans,
            vec![WindowSpan::MINUTE_5, WindowSpan::MINUTE_30, WindowSpan::HOUR_4]
        );
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert_eq!(config.format, OutputFormat::Csv);
        assert!(!config.csv_header);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_path() {
        let config = PipelineConfig {
            output_dir: PathBuf::from("out"),
            ..PipelineConfig::default()
        };
        assert_eq!(
            config.output_path(WindowSpan::HOUR_4),
            PathBuf::from("out/candles_240min.csv")
        );

        let config = PipelineConfig {
            format: OutputFormat::Ndjson,
            ..config
        };
        assert_eq!(
            config.output_path(WindowSpan::MINUTE_5),
            PathBuf::from("out/candles_5min.ndjson")
        );
    }

    #[test]
    fn test_validate_rejects() {
        let empty = PipelineConfig {
            spans: Vec::new(),
            ..PipelineConfig::default()
        };
        assert!(matches!(empty.validate(), Err(PipelineError::InvalidConfig(_))));

        let duplicate = PipelineConfig {
            spans: vec![WindowSpan::MINUTE_5, WindowSpan::MINUTE_5],
            ..PipelineConfig::default()
        };
        assert!(matches!(duplicate.validate(), Err(PipelineError::InvalidConfig(_))));

        let instant = PipelineConfig {
            timeout: Duration::ZERO,
            ..PipelineConfig::default()
        };
        assert!(matches!(instant.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_session() {
        let config = PipelineConfig::default()
            .with_session(TimeDelta::hours(10), TimeDelta::hours(6))
            .unwrap();
        assert_eq!(config.schedule.open_offset(), TimeDelta::hours(10));

        let err = PipelineConfig::default()
            .with_session(TimeDelta::hours(20), TimeDelta::hours(6))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Schedule(_)));
    }
}
