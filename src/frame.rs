//! The 64-bit on/off state of every glow segment.

use crate::segment::Segment;

/// Number of bytes shifted out per frame.
pub const FRAME_BYTES: usize = 8;

/// The instantaneous on/off state of all 64 segments.
///
/// Bit `s` of [`Frame::bits`] is segment `s`. On the wire the frame goes out as
/// [`Frame::to_shift_bytes`]: segment `s` lives in byte `7 - s / 8`, bit `s % 8`,
/// and the bytes are shifted in index order, most significant bit first, so
/// segment 63 is the first bit clocked out and segment 0 the last.
///
/// ```
/// use nixie_kit::{Frame, Segment};
///
/// let mut frame = Frame::new();
/// frame.enable(Segment::new(0)?);
/// frame.enable(Segment::new(63)?);
/// assert_eq!(frame.to_shift_bytes(), [0x80, 0, 0, 0, 0, 0, 0, 0x01]);
/// # Ok::<(), nixie_kit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame(u64);

impl Frame {
    /// An all-off frame.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a frame from raw bits, bit `s` being segment `s`.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Energizes `segment`, leaving every other bit unchanged.
    pub const fn enable(&mut self, segment: Segment) {
        self.0 |= segment.mask();
    }

    /// De-energizes `segment`, leaving every other bit unchanged.
    pub const fn disable(&mut self, segment: Segment) {
        self.0 &= !segment.mask();
    }

    pub fn disable_many(&mut self, segments: &[Segment]) {
        for &segment in segments {
            self.disable(segment);
        }
    }

    /// Clears the whole frame.
    pub const fn disable_all(&mut self) {
        self.0 = 0;
    }

    #[must_use]
    pub const fn is_enabled(&self, segment: Segment) -> bool {
        self.0 & segment.mask() != 0
    }

    /// Number of energized segments.
    #[must_use]
    pub const fn enabled_count(&self) -> u32 {
        self.0.count_ones()
    }

    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// The frame in shift order: byte 0 first, each byte most significant bit first.
    #[must_use]
    pub const fn to_shift_bytes(&self) -> [u8; FRAME_BYTES] {
        self.0.to_be_bytes()
    }
}
