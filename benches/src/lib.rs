//! Benchmark utilities for candlewick.

use candlewick_lib::{Price, Tick};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

/// Tickers cycled through by the generators.
pub const TICKERS: &[&str] = &["SBER", "AAPL", "GAZP", "MSFT", "YNDX", "AMZN"];

/// Shape of a synthetic trading day.
#[derive(Debug, Clone, Copy)]
pub struct TickProfile {
    /// Number of ticks to generate.
    pub ticks: usize,
    /// Number of distinct tickers (capped at [`TICKERS`]).
    pub tickers: usize,
    /// Gap between consecutive ticks.
    pub step: TimeDelta,
}

impl Default for TickProfile {
    fn default() -> Self {
        Self {
            ticks: 100_000,
            tickers: TICKERS.len(),
            step: TimeDelta::milliseconds(250),
        }
    }
}

fn session_open() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 1, 30, 6, 59, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Generates ordered ticks starting just before the default session open.
#[must_use]
pub fn synthetic_ticks(profile: TickProfile) -> Vec<Tick> {
    let tickers = profile.tickers.clamp(1, TICKERS.len());
    let start = session_open();

    (0..profile.ticks)
        .map(|i| {
            let offset = i64::try_from(i).unwrap_or(i64::MAX);
            let timestamp = start + profile.step * i32::try_from(i).unwrap_or(i32::MAX);
            // A slow zig-zag around 200.00 exercises every high/low branch.
            let price = 20_000 + (offset * 7919) % 500 - 250;
            Tick::new(TICKERS[i % tickers], timestamp, Price::from_minor(price), 1)
        })
        .collect()
}

/// Renders ticks as `TICKER,PRICE,COUNT,TIMESTAMP` lines.
#[must_use]
pub fn render_ticks(ticks: &[Tick]) -> String {
    let mut out = String::with_capacity(ticks.len() * 48);
    for tick in ticks {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            tick.ticker,
            tick.price,
            tick.count,
            tick.timestamp.format("%Y-%m-%d %H:%M:%S%.6f")
        );
    }
    out
}

/// A rendered tick file in its own temporary directory.
#[derive(Debug)]
pub struct TickFile {
    /// Directory holding the input and any outputs.
    pub dir: TempDir,
    /// Path of the input file.
    pub path: PathBuf,
}

/// Writes a synthetic tick file into a fresh temporary directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn tick_file(profile: TickProfile) -> io::Result<TickFile> {
    let dir = TempDir::new()?;
    let path = dir.path().join("ticks.csv");
    std::fs::write(&path, render_ticks(&synthetic_ticks(profile)))?;
    Ok(TickFile { dir, path })
}
