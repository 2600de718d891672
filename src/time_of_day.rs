//! A validated wall-clock time and its six tube digits.

use core::str::FromStr;

use crate::segment::Digit;
use crate::topology::TUBE_COUNT;
use crate::{Error, Result};

pub(crate) const SECONDS_PER_MINUTE: u32 = 60;
pub(crate) const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: u32 = 24 * SECONDS_PER_HOUR;

/// Hours (0–23), minutes (0–59) and seconds (0–59).
///
/// Every `TimeOfDay` is in range, which is what lets its digits index the
/// segment topology safely.
///
/// ```
/// use nixie_kit::{Error, TimeOfDay};
///
/// let time: TimeOfDay = "12:34:56".parse()?;
/// assert_eq!(time.digits().map(|digit| digit.value()), [1, 2, 3, 4, 5, 6]);
/// assert_eq!(TimeOfDay::new(24, 0, 0), Err(Error::HourOutOfRange(24)));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    /// Midnight, 00:00:00.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Creates a time of day.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HourOutOfRange`], [`Error::MinuteOutOfRange`] or
    /// [`Error::SecondOutOfRange`] for the first field that is out of range.
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self> {
        if hours > 23 {
            return Err(Error::HourOutOfRange(hours));
        }
        if minutes > 59 {
            return Err(Error::MinuteOutOfRange(minutes));
        }
        if seconds > 59 {
            return Err(Error::SecondOutOfRange(seconds));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    #[must_use]
    pub const fn hours(self) -> u8 {
        self.hours
    }

    #[must_use]
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(self) -> u8 {
        self.seconds
    }

    /// The six tube digits, hour tens first (the order of [`Tube::ALL`](crate::Tube::ALL)).
    #[must_use]
    pub const fn digits(self) -> [Digit; TUBE_COUNT] {
        [
            Digit::tens_of(self.hours),
            Digit::units_of(self.hours),
            Digit::tens_of(self.minutes),
            Digit::units_of(self.minutes),
            Digit::tens_of(self.seconds),
            Digit::units_of(self.seconds),
        ]
    }

    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "At most 23 * 3600 + 59 * 60 + 59, far below u32::MAX"
    )]
    pub const fn seconds_since_midnight(self) -> u32 {
        self.hours as u32 * SECONDS_PER_HOUR
            + self.minutes as u32 * SECONDS_PER_MINUTE
            + self.seconds as u32
    }

    /// The time `seconds` after midnight, wrapping every 24 hours.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::cast_possible_truncation,
        reason = "Each field is reduced below 60 (or 24) before narrowing"
    )]
    pub const fn from_seconds_since_midnight(seconds: u32) -> Self {
        let of_day = seconds % SECONDS_PER_DAY;
        Self {
            hours: (of_day / SECONDS_PER_HOUR) as u8,
            minutes: ((of_day / SECONDS_PER_MINUTE) % 60) as u8,
            seconds: (of_day % SECONDS_PER_MINUTE) as u8,
        }
    }

    /// The time `seconds` later, wrapping past midnight.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::arithmetic_side_effects,
        reason = "Both operands are reduced modulo one day, so the sum fits in u32"
    )]
    pub const fn add_seconds(self, seconds: u32) -> Self {
        Self::from_seconds_since_midnight(
            self.seconds_since_midnight() + seconds % SECONDS_PER_DAY,
        )
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Parses `HH:MM:SS` (one or two digits per field).
    fn from_str(input: &str) -> Result<Self> {
        let mut fields = input.trim().split(':');
        let mut next_field = || -> Result<u8> {
            let field = fields.next().ok_or(Error::InvalidTimeFormat)?;
            if field.is_empty() || field.len() > 2 {
                return Err(Error::InvalidTimeFormat);
            }
            field.parse().map_err(|_| Error::InvalidTimeFormat)
        };
        let hours = next_field()?;
        let minutes = next_field()?;
        let seconds = next_field()?;
        if fields.next().is_some() {
            return Err(Error::InvalidTimeFormat);
        }
        Self::new(hours, minutes, seconds)
    }
}
