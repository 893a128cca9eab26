//! Candle formatters and the writer stage for candlewick.
//!
//! This crate provides formatters for writing candles to text outputs
//! and the channel-driven writer that drives them:
//!
//! - [`CsvFormatter`] - `TICKER,WINDOW_START,OPEN,HIGH,LOW,CLOSE` records
//! - [`JsonFormatter`] - Newline-delimited JSON
//! - [`run_writer`] - Writer stage draining a candle channel into a sink

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod writer;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::JsonFormatter;
pub use writer::{WriteError, WriterStats, run_writer};
