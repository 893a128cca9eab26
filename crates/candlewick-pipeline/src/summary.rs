//! Run summaries.

use std::fmt;

use candlewick_types::WindowSpan;

/// Counters for one span of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanSummary {
    /// Window span.
    pub span: WindowSpan,
    /// Ticks folded into a candle.
    pub ticks_accepted: u64,
    /// Ticks that fell outside every trading window.
    pub ticks_discarded: u64,
    /// Candles written to the span's output.
    pub candles_written: u64,
}

impl fmt::Display for SpanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} candles from {} ticks ({} outside trading hours)",
            self.span, self.candles_written, self.ticks_accepted, self.ticks_discarded
        )
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read from the input.
    pub lines_read: u64,
    /// Per-span counters, in sink order.
    pub spans: Vec<SpanSummary>,
}

impl RunSummary {
    /// Returns the counters for a span, if it was part of the run.
    #[must_use]
    pub fn span(&self, span: WindowSpan) -> Option<&SpanSummary> {
        self.spans.iter().find(|s| s.span == span)
    }

    /// Total candles written across every span.
    #[must_use]
    pub fn candles_written(&self) -> u64 {
        self.spans.iter().map(|s| s.candles_written).sum()
    }
}
