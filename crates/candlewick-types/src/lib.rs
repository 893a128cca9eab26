//! Core types for the candlewick tick-to-candle aggregator.
//!
//! This crate provides the fundamental data structures used throughout candlewick:
//!
//! - [`Tick`] - A single trade with ticker, price, count and timestamp
//! - [`Price`] - Fixed-point price in minor units with its text codec
//! - [`WindowSpan`] - Length of a candle window
//! - [`SessionSchedule`] - Daily trading session geometry
//! - [`TradingSession`] and [`Window`] - Half-open time intervals

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/candlewick-rs/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod price;
mod session;
mod span;
mod tick;

pub use error::{ParseError, PriceParseError, ScheduleError};
pub use price::Price;
pub use session::{SessionSchedule, TradingSession, Window};
pub use span::{WindowSpan, WindowSpanParseError};
pub use tick::Tick;
