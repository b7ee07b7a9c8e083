//! Seed module - calendar date to seed and puzzle number derivation
//!
//! The wall clock is reached only through the [`Clock`] port so that tests
//! (and replay tools) can pin "today" to a fixed date.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::types::GameMode;

const MILLIS_PER_DAY: i128 = 24 * 60 * 60 * 1000;

/// Source of local wall-clock time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> PrimitiveDateTime;

    /// Current Unix timestamp in milliseconds
    fn timestamp_millis(&self) -> u64;

    /// Current local calendar date
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// Reads the operating system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        // The local offset is indeterminate on some platforms (and in
        // multi-threaded processes on unix); UTC keeps the day stable there.
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        PrimitiveDateTime::new(now.date(), now.time())
    }

    fn timestamp_millis(&self) -> u64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        u64::try_from(nanos / 1_000_000).unwrap_or(0)
    }
}

/// Clock frozen at an injected instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: PrimitiveDateTime,
    timestamp_millis: u64,
}

impl FixedClock {
    pub fn new(now: PrimitiveDateTime, timestamp_millis: u64) -> Self {
        Self {
            now,
            timestamp_millis,
        }
    }

    /// Midnight of `date`, with a timestamp derived from the same instant
    pub fn at_date(date: Date) -> Self {
        let now = PrimitiveDateTime::new(date, Time::MIDNIGHT);
        let millis = now.assume_utc().unix_timestamp_nanos() / 1_000_000;
        Self::new(now, u64::try_from(millis).unwrap_or(0))
    }

    /// Move the clock forward
    pub fn advance_millis(&mut self, millis: u64) {
        self.timestamp_millis += millis;
        self.now += time::Duration::milliseconds(millis as i64);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        self.now
    }

    fn timestamp_millis(&self) -> u64 {
        self.timestamp_millis
    }
}

/// System time of day and timestamps, reported on a fixed calendar date
///
/// Lets a host replay another day's puzzle while move timing stays real.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedDateClock {
    date: Date,
}

impl PinnedDateClock {
    pub fn new(date: Date) -> Self {
        Self { date }
    }
}

impl Clock for PinnedDateClock {
    fn now(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, SystemClock.now().time())
    }

    fn timestamp_millis(&self) -> u64 {
        SystemClock.timestamp_millis()
    }
}

/// Seed for a calendar date: `year * 10000 + month * 100 + day`
///
/// # Examples
///
/// ```
/// use daily_puzzles_core::seed::daily_seed;
/// use time::macros::date;
///
/// assert_eq!(daily_seed(date!(2025 - 10 - 16)), 20251016);
/// ```
pub fn daily_seed(date: Date) -> i64 {
    date.year() as i64 * 10_000 + u8::from(date.month()) as i64 * 100 + date.day() as i64
}

/// Sequential puzzle index: `ceil(|now - epoch| / 1 day)` with `epoch` at midnight
pub fn puzzle_number(now: PrimitiveDateTime, epoch: Date) -> u32 {
    let start = PrimitiveDateTime::new(epoch, Time::MIDNIGHT);
    let millis = (now - start).whole_milliseconds().abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Series epoch of a numbered mode
pub fn epoch_for(mode: GameMode) -> Option<Date> {
    let (year, month, day) = mode.epoch()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// Puzzle number of `mode` at the clock's current instant
pub fn puzzle_number_for(mode: GameMode, clock: &impl Clock) -> Option<u32> {
    epoch_for(mode).map(|epoch| puzzle_number(clock.now(), epoch))
}

/// Seed for a new session of `mode`
///
/// Daily modes use the calendar date; blitz uses the millisecond timestamp
/// so every session differs.
pub fn session_seed(mode: GameMode, clock: &impl Clock) -> i64 {
    if mode.is_daily() {
        daily_seed(clock.today())
    } else {
        clock.timestamp_millis() as i64
    }
}
