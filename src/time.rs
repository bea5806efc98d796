//! Duration and instant shape classes.
//!
//! A duration renders as `<count><suffix>`:
//!
//! | Unit         | Suffix |
//! |--------------|--------|
//! | nanoseconds  | `ns`   |
//! | microseconds | `us`   |
//! | milliseconds | `ms`   |
//! | seconds      | `s`    |
//! | minutes      | `min`  |
//! | hours        | `h`    |
//! | other        | ` ticks` |
//!
//! [`Span`] carries its unit explicitly. `std::time::Duration` and
//! `chrono::TimeDelta` have no unit of their own and render in the coarsest
//! unit that represents them exactly.
//!
//! Wall-clock instants (`SystemTime`, `chrono::DateTime`) render as
//! `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC. Readings of a monotonic clock
//! ([`SteadyTime`]) render as `<duration> since epoch`.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{message, Span};
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! assert_eq!(message!("took", Span::millis(100)), "took 100ms");
//! assert_eq!(message!(Duration::from_secs(120)), "2min");
//! assert_eq!(message!(UNIX_EPOCH), "1970-01-01T00:00:00.000Z");
//! ```

use crate::Render;
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use std::fmt::Write as _;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// The resolution of a [`Span`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    /// A resolution of `num / den` seconds outside the suffix table.
    Ticks { num: u64, den: u64 },
}

impl TimeUnit {
    /// The text written after the count.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
            TimeUnit::Ticks { .. } => " ticks",
        }
    }
}

/// A tick count in a given unit.
///
/// # Examples
///
/// ```rust
/// use failsafe::{render, Span, TimeUnit};
///
/// assert_eq!(render(&Span::seconds(5)), "5s");
/// assert_eq!(render(&Span::hours(-2)), "-2h");
/// assert_eq!(render(&Span::ticks(42, 1, 60)), "42 ticks");
/// assert_eq!(Span::micros(3).unit, TimeUnit::Microseconds);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub count: i64,
    pub unit: TimeUnit,
}

impl Span {
    #[must_use]
    pub const fn new(count: i64, unit: TimeUnit) -> Self {
        Span { count, unit }
    }

    #[must_use]
    pub const fn nanos(count: i64) -> Self {
        Span::new(count, TimeUnit::Nanoseconds)
    }

    #[must_use]
    pub const fn micros(count: i64) -> Self {
        Span::new(count, TimeUnit::Microseconds)
    }

    #[must_use]
    pub const fn millis(count: i64) -> Self {
        Span::new(count, TimeUnit::Milliseconds)
    }

    #[must_use]
    pub const fn seconds(count: i64) -> Self {
        Span::new(count, TimeUnit::Seconds)
    }

    #[must_use]
    pub const fn minutes(count: i64) -> Self {
        Span::new(count, TimeUnit::Minutes)
    }

    #[must_use]
    pub const fn hours(count: i64) -> Self {
        Span::new(count, TimeUnit::Hours)
    }

    /// A count of `num / den` second ticks.
    #[must_use]
    pub const fn ticks(count: i64, num: u64, den: u64) -> Self {
        Span::new(count, TimeUnit::Ticks { num, den })
    }
}

impl Render for Span {
    fn render_to(&self, out: &mut String) {
        let _ = write!(out, "{}{}", self.count, self.unit.suffix());
    }
}

const UNIT_NANOS: [(i128, TimeUnit); 6] = [
    (3_600_000_000_000, TimeUnit::Hours),
    (60_000_000_000, TimeUnit::Minutes),
    (1_000_000_000, TimeUnit::Seconds),
    (1_000_000, TimeUnit::Milliseconds),
    (1_000, TimeUnit::Microseconds),
    (1, TimeUnit::Nanoseconds),
];

/// Writes a nanosecond count in the coarsest exact unit.
fn write_nanos(out: &mut String, nanos: i128) {
    if nanos == 0 {
        out.push_str("0s");
        return;
    }
    for (scale, unit) in UNIT_NANOS {
        if nanos % scale == 0 {
            let _ = write!(out, "{}{}", nanos / scale, unit.suffix());
            return;
        }
    }
}

fn duration_nanos(duration: &Duration) -> i128 {
    i128::from(duration.as_secs()) * 1_000_000_000 + i128::from(duration.subsec_nanos())
}

impl Render for Duration {
    fn render_to(&self, out: &mut String) {
        write_nanos(out, duration_nanos(self));
    }
}

impl Render for TimeDelta {
    fn render_to(&self, out: &mut String) {
        let nanos = i128::from(self.num_seconds()) * 1_000_000_000 + i128::from(self.subsec_nanos());
        write_nanos(out, nanos);
    }
}

fn write_timestamp(out: &mut String, timestamp: &DateTime<Utc>) {
    let _ = write!(out, "{}", timestamp.format(TIMESTAMP_FORMAT));
}

impl Render for SystemTime {
    fn render_to(&self, out: &mut String) {
        let (seconds, nanos, offset) = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => (
                i64::try_from(after.as_secs()).ok(),
                after.subsec_nanos(),
                duration_nanos(&after),
            ),
            Err(err) => {
                let before = err.duration();
                let whole = i64::try_from(before.as_secs()).ok();
                let (seconds, nanos) = match before.subsec_nanos() {
                    0 => (whole.map(|s| -s), 0),
                    sub => (whole.and_then(|s| (-s).checked_sub(1)), 1_000_000_000 - sub),
                };
                (seconds, nanos, -duration_nanos(&before))
            }
        };
        match seconds.and_then(|s| DateTime::<Utc>::from_timestamp(s, nanos)) {
            Some(timestamp) => write_timestamp(out, &timestamp),
            None => {
                write_nanos(out, offset);
                out.push_str(" since epoch");
            }
        }
    }
}

impl<Tz: TimeZone> Render for DateTime<Tz> {
    fn render_to(&self, out: &mut String) {
        write_timestamp(out, &self.with_timezone(&Utc));
    }
}

/// Naive timestamps are taken to be UTC.
impl Render for NaiveDateTime {
    fn render_to(&self, out: &mut String) {
        write_timestamp(out, &self.and_utc());
    }
}

/// A reading of a monotonic clock, as the time elapsed since its anchor.
///
/// Monotonic clocks have no calendar meaning, so the reading renders as
/// `<duration> since epoch`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, SteadyTime};
/// use std::time::{Duration, Instant};
///
/// assert_eq!(message!(SteadyTime::new(Duration::from_millis(1500))), "1500ms since epoch");
///
/// let start = Instant::now();
/// assert_eq!(message!(SteadyTime::between(start, start)), "0s since epoch");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SteadyTime {
    since_epoch: Duration,
}

impl SteadyTime {
    #[must_use]
    pub const fn new(since_epoch: Duration) -> Self {
        SteadyTime { since_epoch }
    }

    /// The time from `anchor` to now.
    #[must_use]
    pub fn elapsed_since(anchor: Instant) -> Self {
        SteadyTime::new(anchor.elapsed())
    }

    /// The time from `anchor` to `instant`, zero if `instant` is earlier.
    #[must_use]
    pub fn between(anchor: Instant, instant: Instant) -> Self {
        SteadyTime::new(instant.saturating_duration_since(anchor))
    }

    #[must_use]
    pub const fn since_epoch(&self) -> Duration {
        self.since_epoch
    }
}

impl Render for SteadyTime {
    fn render_to(&self, out: &mut String) {
        self.since_epoch.render_to(out);
        out.push_str(" since epoch");
    }
}
