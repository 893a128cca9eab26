//! Pipeline error type.

use std::path::PathBuf;
use std::time::Duration;

use candlewick_format::{FormatError, WriteError};
use candlewick_ingest::IngestError;
use candlewick_types::{ParseError, ScheduleError, WindowSpan};
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that end a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An input record could not be parsed.
    #[error("line {line}: {source}")]
    Parse {
        /// 1-based line number of the record.
        line: u64,
        /// Why the record was rejected.
        source: ParseError,
    },

    /// Reading the input failed.
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// Writing a span's output failed.
    #[error("failed to write {span} candles: {source}")]
    Output {
        /// Span whose output failed.
        span: WindowSpan,
        /// Underlying formatting or I/O failure.
        source: FormatError,
    },

    /// The input file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Input path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// An output file could not be created.
    #[error("failed to create {}: {source}", path.display())]
    Create {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The run did not finish before its deadline.
    #[error("pipeline did not finish within {0:?}")]
    DeadlineExceeded(Duration),

    /// The configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session schedule is unusable.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A worker task panicked or was aborted.
    #[error("worker task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Parse { line, source } => Self::Parse { line, source },
            IngestError::Read(e) => Self::Read(e),
        }
    }
}

impl From<WriteError> for PipelineError {
    fn from(err: WriteError) -> Self {
        Self::Output {
            span: err.span,
            source: err.source,
        }
    }
}
