//! Streaming tick-to-candle window aggregation.

use std::collections::HashMap;

use candlewick_types::{SessionSchedule, Tick, TradingSession, Window, WindowSpan};
use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::Candle;

/// Counters describing what an aggregator has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorStats {
    /// Ticks folded into a candle.
    pub ticks_accepted: u64,
    /// Ticks dropped because they fell before the current window.
    pub ticks_discarded: u64,
    /// Candles flushed.
    pub candles_emitted: u64,
}

/// Streaming candle aggregator for one window span.
///
/// Ticks must arrive in non-decreasing timestamp order. Each UTC day's
/// trading session is cut into consecutive windows of the configured span,
/// and one candle per ticker is kept for the current window. When a tick
/// lands at or past the end of the current window, every open candle is
/// flushed and the window jumps forward on the session grid, skipping idle
/// windows and idle days without emitting anything for them.
///
/// Ticks before the current window (pre-session trades, or trades older than
/// the window) are discarded.
#[derive(Debug)]
pub struct WindowAggregator {
    span: WindowSpan,
    schedule: SessionSchedule,
    cursor: Option<Cursor>,
    /// Open candles of the current window, in first-tick order.
    open: Vec<Candle>,
    /// Ticker to index into `open`.
    slots: HashMap<String, usize>,
    stats: AggregatorStats,
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    session: TradingSession,
    window: Window,
}

impl WindowAggregator {
    /// Creates an aggregator using the default trading session schedule.
    #[must_use]
    pub fn new(span: WindowSpan) -> Self {
        Self::with_schedule(span, SessionSchedule::default())
    }

    /// Creates an aggregator with a custom trading session schedule.
    #[must_use]
    pub fn with_schedule(span: WindowSpan, schedule: SessionSchedule) -> Self {
        Self {
            span,
            schedule,
            cursor: None,
            open: Vec::new(),
            slots: HashMap::new(),
            stats: AggregatorStats::default(),
        }
    }

    /// Returns the window span being aggregated to.
    #[must_use]
    pub const fn span(&self) -> WindowSpan {
        self.span
    }

    /// Returns the current window, or `None` before the first tick.
    #[must_use]
    pub fn current_window(&self) -> Option<Window> {
        self.cursor.map(|c| c.window)
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> AggregatorStats {
        self.stats
    }

    /// Processes a tick, returning the candles of any window it closed.
    ///
    /// The returned vector is empty unless this tick crossed the end of the
    /// current window while candles were open.
    pub fn process(&mut self, tick: &Tick) -> Vec<Candle> {
        let timestamp = tick.timestamp;

        let (cursor, flushed) = match self.cursor {
            Some(cursor) if timestamp < cursor.window.end => (cursor, Vec::new()),
            Some(cursor) => {
                let flushed = self.flush(cursor.window);
                (self.locate(timestamp, Some(cursor.session)), flushed)
            }
            None => (self.locate(timestamp, None), Vec::new()),
        };
        self.cursor = Some(cursor);

        if timestamp < cursor.window.start {
            trace!(
                span = %self.span,
                ticker = %tick.ticker,
                %timestamp,
                "discarding tick outside trading window"
            );
            self.stats.ticks_discarded += 1;
            return flushed;
        }

        self.record(cursor.window.start, tick);
        flushed
    }

    /// Finishes aggregation, returning the candles of the last window.
    pub fn finish(&mut self) -> Vec<Candle> {
        match self.cursor {
            Some(cursor) => self.flush(cursor.window),
            None => Vec::new(),
        }
    }

    /// Finds the session and window for a timestamp at or past the current window.
    fn locate(&self, timestamp: DateTime<Utc>, session: Option<TradingSession>) -> Cursor {
        let session = match session {
            Some(session) if timestamp < session.end => session,
            _ => self.schedule.session_containing(timestamp),
        };
        Cursor {
            session,
            window: session.window_at(timestamp, self.span),
        }
    }

    fn record(&mut self, window_start: DateTime<Utc>, tick: &Tick) {
        if let Some(&slot) = self.slots.get(&tick.ticker) {
            self.open[slot].update(tick.price);
        } else {
            self.slots.insert(tick.ticker.clone(), self.open.len());
            self.open
                .push(Candle::flat(tick.ticker.clone(), window_start, tick.price));
        }
        self.stats.ticks_accepted += 1;
    }

    /// Drains the open candles. Both collections keep their capacity.
    fn flush(&mut self, window: Window) -> Vec<Candle> {
        self.slots.clear();
        let candles: Vec<Candle> = self.open.drain(..).collect();
        if !candles.is_empty() {
            debug!(span = %self.span, %window, candles = candles.len(), "window closed");
        }
        self.stats.candles_emitted += candles.len() as u64;
        candles
    }
}
