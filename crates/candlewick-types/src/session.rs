//! Trading session geometry and candle windows.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

use crate::{ScheduleError, WindowSpan};

/// Daily trading session schedule.
///
/// Every UTC calendar day has exactly one session starting `open_offset`
/// after midnight and lasting `length`. Ticks outside a session are ignored
/// by aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSchedule {
    open_offset: TimeDelta,
    length: TimeDelta,
}

impl SessionSchedule {
    /// Default session open, 07:00 UTC.
    pub const DEFAULT_OPEN_OFFSET_MINUTES: i64 = 420;
    /// Default session length, running until midnight.
    pub const DEFAULT_LENGTH_MINUTES: i64 = 1020;

    /// Creates a new schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is not positive, or if the session
    /// does not fit within a single day.
    pub fn new(open_offset: TimeDelta, length: TimeDelta) -> Result<Self, ScheduleError> {
        if length <= TimeDelta::zero() {
            return Err(ScheduleError::EmptySession(length));
        }
        if open_offset < TimeDelta::zero() || open_offset + length > TimeDelta::days(1) {
            return Err(ScheduleError::ExceedsDay {
                open_offset,
                length,
            });
        }
        Ok(Self {
            open_offset,
            length,
        })
    }

    /// Returns the offset of the session open from midnight.
    #[must_use]
    pub const fn open_offset(&self) -> TimeDelta {
        self.open_offset
    }

    /// Returns the session length.
    #[must_use]
    pub const fn length(&self) -> TimeDelta {
        self.length
    }

    /// Returns the session of the given calendar day.
    #[must_use]
    pub fn session_for(&self, date: NaiveDate) -> TradingSession {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        let start = midnight + self.open_offset;
        TradingSession {
            start,
            end: start + self.length,
        }
    }

    /// Returns the earliest session that has not ended by `timestamp`.
    ///
    /// This is the session of the timestamp's own day, unless that session
    /// is already over, in which case it is the next day's session.
    #[must_use]
    pub fn session_containing(&self, timestamp: DateTime<Utc>) -> TradingSession {
        let date = timestamp.date_naive();
        let session = self.session_for(date);
        if timestamp < session.end {
            return session;
        }
        date.succ_opt()
            .map_or(session, |next| self.session_for(next))
    }
}

impl Default for SessionSchedule {
    fn default() -> Self {
        Self {
            open_offset: TimeDelta::minutes(Self::DEFAULT_OPEN_OFFSET_MINUTES),
            length: TimeDelta::minutes(Self::DEFAULT_LENGTH_MINUTES),
        }
    }
}

/// One day's trading session, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingSession {
    /// Session open (inclusive).
    pub start: DateTime<Utc>,
    /// Session close (exclusive).
    pub end: DateTime<Utc>,
}

impl TradingSession {
    /// Returns the window on this session's grid that contains `timestamp`.
    ///
    /// Timestamps before the session open map to the first window. The last
    /// window is clipped to the session close.
    #[must_use]
    pub fn window_at(&self, timestamp: DateTime<Utc>, span: WindowSpan) -> Window {
        let span_minutes = i64::from(span.minutes());
        let elapsed = (timestamp - self.start).num_seconds().max(0);
        let index = elapsed / (span_minutes * 60);

        let start = self.start + TimeDelta::minutes(index * span_minutes);
        let end = (start + span.duration()).min(self.end);
        Window { start, end }
    }
}

/// A candle window, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Window start (inclusive). Candles carry this as their timestamp.
    pub start: DateTime<Utc>,
    /// Window end (exclusive).
    pub end: DateTime<Utc>,
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 1, day, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_default_session() {
        let schedule = SessionSchedule::default();
        let session = schedule.session_for(NaiveDate::from_ymd_opt(2019, 1, 30).unwrap());

        assert_eq!(session.start, at(30, 7, 0, 0));
        assert_eq!(session.end, at(31, 0, 0, 0));
    }

    #[test]
    fn test_invalid_schedule() {
        assert!(matches!(
            SessionSchedule::new(TimeDelta::hours(7), TimeDelta::zero()),
            Err(ScheduleError::EmptySession(_))
        ));
        assert!(matches!(
            SessionSchedule::new(TimeDelta::hours(7), TimeDelta::hours(18)),
            Err(ScheduleError::ExceedsDay { .. })
        ));
        assert!(SessionSchedule::new(TimeDelta::zero(), TimeDelta::days(1)).is_ok());
    }

    #[test]
    fn test_session_containing_rolls_to_next_day() {
        let schedule = SessionSchedule::new(TimeDelta::hours(9), TimeDelta::hours(8)).unwrap();

        let same_day = schedule.session_containing(at(30, 12, 0, 0));
        assert_eq!(same_day.start, at(30, 9, 0, 0));

        let before_open = schedule.session_containing(at(30, 3, 0, 0));
        assert_eq!(before_open.start, at(30, 9, 0, 0));

        let after_close = schedule.session_containing(at(30, 17, 0, 0));
        assert_eq!(after_close.start, at(31, 9, 0, 0));
    }

    #[test]
    fn test_window_at() {
        let session = SessionSchedule::default()
            .session_for(NaiveDate::from_ymd_opt(2019, 1, 30).unwrap());

        let first = session.window_at(at(30, 7, 0, 0), WindowSpan::MINUTE_5);
        assert_eq!(first.start, at(30, 7, 0, 0));
        assert_eq!(first.end, at(30, 7, 5, 0));

        let window = session.window_at(at(30, 7, 7, 33), WindowSpan::MINUTE_5);
        assert_eq!(window.start, at(30, 7, 5, 0));
        assert_eq!(window.end, at(30, 7, 10, 0));

        let early = session.window_at(at(30, 6, 0, 0), WindowSpan::MINUTE_5);
        assert_eq!(early, first);
    }

    #[test]
    fn test_last_window_is_clipped() {
        // 1020 minutes is not a multiple of 240: the last window is 60 minutes.
        let session = SessionSchedule::default()
            .session_for(NaiveDate::from_ymd_opt(2019, 1, 30).unwrap());
        let last = session.window_at(at(30, 23, 30, 0), WindowSpan::HOUR_4);

        assert_eq!(last.start, at(30, 23, 0, 0));
        assert_eq!(last.end, at(31, 0, 0, 0));
    }
}
