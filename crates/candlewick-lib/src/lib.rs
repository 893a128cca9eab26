//! Streaming tick-to-candle aggregation.
//!
//! This is a facade crate that re-exports functionality from the candlewick
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use candlewick_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig {
//!         spans: vec![WindowSpan::MINUTE_5, WindowSpan::HOUR_4],
//!         output_dir: "out".into(),
//!         ..PipelineConfig::default()
//!     };
//!
//!     let summary = Pipeline::new(config)?.run_files("trades.csv").await?;
//!     for span in &summary.spans {
//!         println!("{span}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use candlewick_types::*;

// Re-export ingestion
#[cfg(feature = "ingest")]
pub use candlewick_ingest::{IngestError, ReadStats, parse_line, parse_timestamp, read_ticks};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use candlewick_aggregate::{AggregatorStats, Candle, WindowAggregator, run_aggregator};

// Re-export formatters
#[cfg(feature = "format")]
pub use candlewick_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, WriteError, WriterStats,
    run_writer,
};

// Re-export orchestration
#[cfg(feature = "pipeline")]
pub use candlewick_pipeline::{Pipeline, PipelineConfig, PipelineError, RunSummary, SpanSummary};

/// Prelude module for convenient imports.
///
/// ```
/// use candlewick_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candlewick_types::{Price, SessionSchedule, Tick, Window, WindowSpan};

    #[cfg(feature = "ingest")]
    pub use candlewick_ingest::parse_line;

    #[cfg(feature = "aggregate")]
    pub use candlewick_aggregate::{Candle, WindowAggregator};

    #[cfg(feature = "format")]
    pub use candlewick_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(feature = "pipeline")]
    pub use candlewick_pipeline::{Pipeline, PipelineConfig, PipelineError, RunSummary};
}
