//! Tick record parsing and fan-out reading for candlewick.
//!
//! This crate provides the ingestion side of the pipeline:
//!
//! - [`parse::parse_line`] - Parses one `TICKER,PRICE,COUNT,TIMESTAMP` record
//! - [`read_ticks`] - Reads a tick stream and broadcasts it to every consumer

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod parse;
mod reader;

pub use parse::{parse_line, parse_timestamp};
pub use reader::{IngestError, ReadStats, read_ticks};
