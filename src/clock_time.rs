//! A free-running time-of-day source: a monotonic [`Instant`] plus an offset.
//!
//! The caller passes `now` in; nothing here reads the time driver, so the clock can be
//! driven by a fake time base in tests.

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_time::{Duration, Instant};

use crate::time_of_day::TimeOfDay;

/// Duration representing one second.
pub const ONE_SECOND: Duration = Duration::from_secs(1);
/// Duration representing one day (24 hours).
pub const ONE_DAY: Duration = Duration::from_secs(60 * 60 * 24);

const TICKS_IN_ONE_DAY: u64 = ONE_DAY.as_ticks();

/// Local time of day derived from [`Instant`]s.
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use nixie_kit::{ClockTime, TimeOfDay};
///
/// let boot = Instant::from_secs(5);
/// let clock = ClockTime::new(TimeOfDay::new(23, 59, 59)?, boot);
///
/// assert_eq!(clock.time_of_day(boot + Duration::from_millis(1_500)), TimeOfDay::new(0, 0, 0)?);
/// let soon = clock.until_next_second(boot + Duration::from_millis(200));
/// assert_eq!(soon, Duration::from_millis(800));
/// # Ok::<(), nixie_kit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    offset: Duration,
}

impl ClockTime {
    /// Creates a clock that reads `initial` at `now`.
    #[must_use]
    pub fn new(initial: TimeOfDay, now: Instant) -> Self {
        let mut clock = Self {
            offset: Duration::from_ticks(0),
        };
        clock.set(initial, now);
        clock
    }

    /// Re-anchors the clock so that it reads `time` at `now`.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Both operands are reduced below one day before subtracting"
    )]
    pub fn set(&mut self, time: TimeOfDay, now: Instant) {
        let target_ticks =
            Duration::from_secs(u64::from(time.seconds_since_midnight())).as_ticks();
        let now_ticks = now.as_ticks() % TICKS_IN_ONE_DAY;
        let offset_ticks = if target_ticks >= now_ticks {
            target_ticks - now_ticks
        } else {
            TICKS_IN_ONE_DAY + target_ticks - now_ticks
        };
        self.offset = Duration::from_ticks(offset_ticks);
        #[cfg(feature = "defmt")]
        info!("Clock set to {:?}, offset {} ms", time, self.offset.as_millis());
    }

    /// The time of day at `now`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "The value is reduced below one day in seconds"
    )]
    pub fn time_of_day(self, now: Instant) -> TimeOfDay {
        TimeOfDay::from_seconds_since_midnight(self.since_midnight(now).as_secs() as u32)
    }

    /// How long until the displayed second changes.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "The remainder is strictly below one second"
    )]
    pub fn until_next_second(self, now: Instant) -> Duration {
        let second_ticks = ONE_SECOND.as_ticks();
        Duration::from_ticks(second_ticks - self.since_midnight(now).as_ticks() % second_ticks)
    }

    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Modulo prevents overflow"
    )]
    fn since_midnight(self, now: Instant) -> Duration {
        let ticks = now.as_ticks() % TICKS_IN_ONE_DAY + self.offset.as_ticks() % TICKS_IN_ONE_DAY;
        Duration::from_ticks(ticks % TICKS_IN_ONE_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_initial_time_at_anchor() {
        let time = TimeOfDay::new(12, 0, 0).expect("valid time");
        let clock = ClockTime::new(time, Instant::from_secs(1_000_000));
        assert_eq!(clock.time_of_day(Instant::from_secs(1_000_000)), time);
        assert_eq!(
            clock.time_of_day(Instant::from_secs(1_000_061)),
            TimeOfDay::new(12, 1, 1).expect("valid time")
        );
    }

    #[test]
    fn set_reanchors_without_jumping_backwards_in_ticks() {
        let mut clock = ClockTime::new(TimeOfDay::MIDNIGHT, Instant::from_secs(0));
        let later = Instant::from_secs(90_000);
        let time = TimeOfDay::new(6, 30, 0).expect("valid time");
        clock.set(time, later);
        assert_eq!(clock.time_of_day(later), time);
        assert_eq!(
            clock.time_of_day(later + ONE_DAY),
            time,
            "the clock wraps every 24 hours"
        );
    }

    #[test]
    fn until_next_second_is_never_zero() {
        let clock = ClockTime::new(TimeOfDay::MIDNIGHT, Instant::from_secs(3));
        assert_eq!(clock.until_next_second(Instant::from_secs(3)), ONE_SECOND);
        assert_eq!(
            clock.until_next_second(Instant::from_millis(3_999)),
            Duration::from_millis(1)
        );
    }
}
