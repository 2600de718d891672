//! A fully const table that tells the shift-register position of every glow segment.
//!
//! See [`SegmentTopology`] for the two supported wirings and [`TubeFamily`] for
//! build-time selection.

use crate::segment::{DIGIT_COUNT, Digit, SEGMENT_COUNT, Segment};

/// Number of digit tubes on the clock.
pub const TUBE_COUNT: usize = 6;

/// Number of separator dots on the clock.
pub const DOT_COUNT: usize = 4;

/// One digit tube position, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tube {
    HourTens,
    HourUnits,
    MinuteTens,
    MinuteUnits,
    SecondTens,
    SecondUnits,
}

impl Tube {
    /// All tubes, left to right.
    pub const ALL: [Self; TUBE_COUNT] = [
        Self::HourTens,
        Self::HourUnits,
        Self::MinuteTens,
        Self::MinuteUnits,
        Self::SecondTens,
        Self::SecondUnits,
    ];

    /// Position of the tube, 0 (hour tens) through 5 (second units).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One separator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dot {
    UpperLeft,
    LowerLeft,
    UpperRight,
    LowerRight,
}

impl Dot {
    pub const ALL: [Self; DOT_COUNT] = [
        Self::UpperLeft,
        Self::LowerLeft,
        Self::UpperRight,
        Self::LowerRight,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A fully const table mapping each (tube, digit) and each dot to its segment.
///
/// The constructor checks that the 60 digit glyphs and 4 dots cover every output of
/// the 64-bit chain exactly once, so a bad table fails to compile.
///
/// ```
/// use nixie_kit::{Digit, Dot, SegmentTopology, Tube};
///
/// const TOPOLOGY: SegmentTopology = SegmentTopology::Z570M;
/// let seven = Digit::new(7).unwrap();
/// assert_eq!(TOPOLOGY.segment(Tube::MinuteUnits, seven).index(), 38);
/// assert_eq!(TOPOLOGY.dot(Dot::UpperRight).index(), 63);
/// ```
///
/// ```compile_fail
/// use nixie_kit::SegmentTopology;
///
/// // Segment 0 is used twice (and 63 never) - caught at compile time
/// const BAD: SegmentTopology = SegmentTopology::new(
///     [
///         [0, 0, 1, 2, 3, 4, 5, 6, 7, 8],
///         [19, 10, 11, 12, 13, 14, 15, 16, 17, 18],
///         [29, 20, 21, 22, 23, 24, 25, 26, 27, 28],
///         [41, 32, 33, 34, 35, 36, 37, 38, 39, 40],
///         [51, 42, 43, 44, 45, 46, 47, 48, 49, 50],
///         [61, 52, 53, 54, 55, 56, 57, 58, 59, 60],
///     ],
///     [31, 30, 9, 62],
/// );
/// let _unused = BAD;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentTopology {
    digits: [[Segment; DIGIT_COUNT]; TUBE_COUNT],
    dots: [Segment; DOT_COUNT],
}

impl SegmentTopology {
    /// IN-12 clocks.
    pub const IN12: Self = Self::new(
        [
            [6, 5, 4, 3, 2, 1, 0, 9, 8, 7],
            [16, 15, 14, 13, 12, 11, 10, 19, 18, 17],
            [26, 25, 24, 23, 22, 21, 20, 29, 28, 27],
            [38, 37, 36, 35, 34, 33, 32, 41, 40, 39],
            [48, 47, 46, 45, 44, 43, 42, 51, 50, 49],
            [58, 57, 56, 55, 54, 53, 52, 61, 60, 59],
        ],
        [31, 30, 63, 62],
    );

    /// Z570M, IN-16 and IN-17 clocks.
    pub const Z570M: Self = Self::new(
        [
            [9, 0, 1, 2, 3, 4, 5, 6, 7, 8],
            [19, 10, 11, 12, 13, 14, 15, 16, 17, 18],
            [29, 20, 21, 22, 23, 24, 25, 26, 27, 28],
            [41, 32, 33, 34, 35, 36, 37, 38, 39, 40],
            [51, 42, 43, 44, 45, 46, 47, 48, 49, 50],
            [61, 52, 53, 54, 55, 56, 57, 58, 59, 60],
        ],
        [31, 30, 63, 62],
    );

    /// Constructor: verifies the table covers every segment exactly once.
    ///
    /// `digits[tube][digit]` is the segment lighting `digit` on `tube` (tubes in
    /// [`Tube::ALL`] order); `dots` follows [`Dot::ALL`] order.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a const) if an index is 64 or above, or
    /// if any index repeats.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "Indices are asserted below SEGMENT_COUNT; loop counters stay below array lengths"
    )]
    pub const fn new(digits: [[u8; DIGIT_COUNT]; TUBE_COUNT], dots: [u8; DOT_COUNT]) -> Self {
        let mut seen = [false; SEGMENT_COUNT];
        let mut checked_digits = [[Segment::from_table(0); DIGIT_COUNT]; TUBE_COUNT];
        let mut tube = 0;
        while tube < TUBE_COUNT {
            let mut digit = 0;
            while digit < DIGIT_COUNT {
                let index = digits[tube][digit];
                let segment = Segment::from_table(index);
                assert!(!seen[index as usize], "duplicate segment in topology");
                seen[index as usize] = true;
                checked_digits[tube][digit] = segment;
                digit += 1;
            }
            tube += 1;
        }

        let mut checked_dots = [Segment::from_table(0); DOT_COUNT];
        let mut dot = 0;
        while dot < DOT_COUNT {
            let index = dots[dot];
            let segment = Segment::from_table(index);
            assert!(!seen[index as usize], "duplicate segment in topology");
            seen[index as usize] = true;
            checked_dots[dot] = segment;
            dot += 1;
        }

        // 64 distinct indices below 64 is a permutation, so `seen` is all true.
        Self {
            digits: checked_digits,
            dots: checked_dots,
        }
    }

    /// The segment that shows `digit` on `tube`.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Tube and Digit are range-checked by construction"
    )]
    pub const fn segment(&self, tube: Tube, digit: Digit) -> Segment {
        self.digits[tube.index()][digit.as_index()]
    }

    /// All ten glyph segments of `tube`, indexed by digit value.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Tube is range-checked by construction"
    )]
    pub const fn tube_segments(&self, tube: Tube) -> &[Segment; DIGIT_COUNT] {
        &self.digits[tube.index()]
    }

    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Dot is range-checked by construction"
    )]
    pub const fn dot(&self, dot: Dot) -> Segment {
        self.dots[dot.index()]
    }

    /// The four dot segments in [`Dot::ALL`] order.
    #[must_use]
    pub const fn dots(&self) -> &[Segment; DOT_COUNT] {
        &self.dots
    }

    /// Every segment of the table: the 60 glyphs tube by tube, then the dots.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.digits
            .iter()
            .flatten()
            .chain(self.dots.iter())
            .copied()
    }
}

/// The tube hardware families, each with its own wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TubeFamily {
    In12,
    /// Z570M, IN-16 and IN-17 tubes.
    Z570M,
}

impl TubeFamily {
    /// The family chosen at build time with the `in12` feature.
    #[cfg(feature = "in12")]
    pub const DEFAULT: Self = Self::In12;
    /// The family chosen at build time with the `in12` feature.
    #[cfg(not(feature = "in12"))]
    pub const DEFAULT: Self = Self::Z570M;

    #[must_use]
    pub const fn topology(self) -> SegmentTopology {
        match self {
            Self::In12 => SegmentTopology::IN12,
            Self::Z570M => SegmentTopology::Z570M,
        }
    }
}
