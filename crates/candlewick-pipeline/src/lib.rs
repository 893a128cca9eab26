//! Pipeline orchestration for candlewick.
//!
//! A [`Pipeline`] wires one tick reader to one aggregator and writer per
//! window span, waits for every writer to drain, and fails fast on the first
//! reported error or when the run deadline passes.
//!
//! - [`PipelineConfig`] - Spans, output location, format and deadline
//! - [`Pipeline`] - Runs the fan-out over any async input and sinks
//! - [`RunSummary`] - Per-span counters of a completed run

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod pipeline;
mod summary;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use summary::{RunSummary, SpanSummary};
