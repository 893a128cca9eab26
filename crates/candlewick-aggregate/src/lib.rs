//! Session-bounded tick-to-candle aggregation for candlewick.
//!
//! This crate provides the windowing engine:
//!
//! - [`Candle`] - OHLC summary of one ticker in one window
//! - [`WindowAggregator`] - Per-span streaming aggregator
//! - [`run_aggregator`] - Channel-driven aggregation stage

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod candle;
mod stage;

pub use aggregator::{AggregatorStats, WindowAggregator};
pub use candle::Candle;
pub use stage::run_aggregator;
