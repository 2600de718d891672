//! Validated coordinates: a glow [`Segment`] in the 64-bit frame and a decimal [`Digit`].

use crate::{Error, Result};

/// Number of addressable segments in the high-voltage shift-register chain.
pub const SEGMENT_COUNT: usize = 64;
const SEGMENT_COUNT_U8: u8 = 64;

/// Number of glyphs (0 through 9) in one tube.
pub const DIGIT_COUNT: usize = 10;
const DIGIT_COUNT_U8: u8 = 10;
const DIGIT_COUNT_U64: u64 = 10;

const _: () = assert!(SEGMENT_COUNT_U8 as usize == SEGMENT_COUNT);
const _: () = assert!(DIGIT_COUNT_U8 as usize == DIGIT_COUNT);

/// One physical glow element, identified by its output position in the shift-register chain.
///
/// A `Segment` is always in `0..64`; indices outside that range are rejected when the
/// `Segment` is built, so the frame never has to mask or wrap an index.
///
/// ```
/// use nixie_kit::{Error, Segment};
///
/// assert_eq!(Segment::new(63).map(Segment::index), Ok(63));
/// assert_eq!(Segment::new(64), Err(Error::SegmentOutOfRange(64)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment(u8);

impl Segment {
    /// Creates a segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SegmentOutOfRange`] if `index` is 64 or larger.
    pub const fn new(index: u8) -> Result<Self> {
        if index < SEGMENT_COUNT_U8 {
            Ok(Self(index))
        } else {
            Err(Error::SegmentOutOfRange(index))
        }
    }

    /// Const constructor for tables; panics (at compile time, in a const) on a bad index.
    pub(crate) const fn from_table(index: u8) -> Self {
        assert!(index < SEGMENT_COUNT_U8, "segment index must be below 64");
        Self(index)
    }

    /// The output position in the chain, `0..64`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// A single-bit mask with bit `index` set.
    #[must_use]
    pub(crate) const fn mask(self) -> u64 {
        1u64 << self.0
    }
}

impl TryFrom<u8> for Segment {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::new(index)
    }
}

/// A decimal digit, `0..=9`, as shown by one tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// The digit zero.
    pub const ZERO: Self = Self(0);

    /// Creates a digit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DigitOutOfRange`] if `value` is 10 or larger.
    pub const fn new(value: u8) -> Result<Self> {
        if value < DIGIT_COUNT_U8 {
            Ok(Self(value))
        } else {
            Err(Error::DigitOutOfRange(value))
        }
    }

    /// The units digit of `value`.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Modulo is how a decimal digit is extracted"
    )]
    pub const fn units_of(value: u8) -> Self {
        Self(value % DIGIT_COUNT_U8)
    }

    /// The tens digit of `value`, which must be below 100.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Division is how a decimal digit is extracted"
    )]
    pub(crate) const fn tens_of(value: u8) -> Self {
        Self((value / DIGIT_COUNT_U8) % DIGIT_COUNT_U8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Rolls the digit forward by `steps`, wrapping from 9 back to 0.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "The remainder is below 10, so it always fits in a u8"
    )]
    pub const fn wrapping_add(self, steps: u64) -> Self {
        let rolled = (steps % DIGIT_COUNT_U64) as u8;
        Self(self.0.wrapping_add(rolled) % DIGIT_COUNT_U8)
    }

    /// Index into a ten-entry glyph table.
    pub(crate) const fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Digit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_rejects_out_of_range_instead_of_wrapping() {
        for index in 0..64 {
            assert_eq!(Segment::new(index).map(Segment::index), Ok(index));
        }
        for index in [64, 65, 72, 255] {
            assert_eq!(Segment::new(index), Err(Error::SegmentOutOfRange(index)));
        }
    }

    #[test]
    fn digit_rolls_modulo_ten() {
        let seven = Digit::new(7).expect("7 is a digit");
        assert_eq!(seven.wrapping_add(0).value(), 7);
        assert_eq!(seven.wrapping_add(3).value(), 0);
        assert_eq!(seven.wrapping_add(80).value(), 7);
        assert_eq!(seven.wrapping_add(u64::MAX).value(), 2);
        assert_eq!(Digit::try_from(10), Err(Error::DigitOutOfRange(10)));
    }

    #[test]
    fn tens_and_units() {
        assert_eq!(Digit::tens_of(59).value(), 5);
        assert_eq!(Digit::units_of(59).value(), 9);
        assert_eq!(Digit::tens_of(7).value(), 0);
    }
}
