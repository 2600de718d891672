//! A device abstraction for a six-tube nixie display behind a 64-bit shift-register chain.
//!
//! See [`NixieDisplay`] for usage.

#[cfg(feature = "defmt")]
use defmt::info;

use crate::Result;
use crate::frame::Frame;
use crate::segment::{Digit, Segment};
use crate::shift_register::ShiftRegister;
use crate::time_of_day::TimeOfDay;
use crate::topology::{Dot, SegmentTopology, Tube};

/// The frame buffer plus the hardware it is shifted into.
///
/// `NixieDisplay` is the single owner of the [`Frame`]. Edits (`enable`, `disable`, ...)
/// only change the buffer; nothing reaches the tubes until [`transmit`](Self::transmit).
///
/// The wiring is injected as a [`SegmentTopology`], so either tube family can be used
/// (or swapped in tests) without rebuilding.
///
/// # Example
///
/// ```
/// use nixie_kit::{Frame, NixieDisplay, SegmentTopology, ShiftRegister, TimeOfDay};
///
/// #[derive(Default)]
/// struct Recorder(Vec<Frame>);
/// impl ShiftRegister for Recorder {
///     fn transmit(&mut self, frame: &Frame) -> nixie_kit::Result<()> {
///         self.0.push(*frame);
///         Ok(())
///     }
/// }
///
/// let mut display = NixieDisplay::new(Recorder::default(), SegmentTopology::Z570M);
/// // Blank the tubes before the high-voltage rail comes up.
/// display.begin()?;
/// display.show_time(TimeOfDay::new(12, 34, 56)?, true)?;
///
/// let frames = display.release().0.0;
/// assert_eq!(frames[0], Frame::new());
/// assert_eq!(frames[1].enabled_count(), 6 + 4);
/// # Ok::<(), nixie_kit::Error>(())
/// ```
pub struct NixieDisplay<R> {
    frame: Frame,
    topology: SegmentTopology,
    register: R,
}

impl<R: ShiftRegister> NixieDisplay<R> {
    /// Creates the display with an all-off frame. Nothing is transmitted yet; call
    /// [`begin`](Self::begin) before enabling the high-voltage supply.
    pub const fn new(register: R, topology: SegmentTopology) -> Self {
        Self {
            frame: Frame::new(),
            topology,
            register,
        }
    }

    /// Clears the frame and shifts 64 zeros into the chain so no tube ignites when the
    /// high-voltage rail is switched on.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn begin(&mut self) -> Result<()> {
        self.disable_all();
        self.transmit()?;
        #[cfg(feature = "defmt")]
        info!("Nixie display blanked");
        Ok(())
    }

    pub const fn enable(&mut self, segment: Segment) {
        self.frame.enable(segment);
    }

    pub const fn disable(&mut self, segment: Segment) {
        self.frame.disable(segment);
    }

    pub fn disable_many(&mut self, segments: &[Segment]) {
        self.frame.disable_many(segments);
    }

    pub const fn disable_all(&mut self) {
        self.frame.disable_all();
    }

    /// Latches the current frame onto the tubes.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn transmit(&mut self) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("transmit: {=u64:#x}", self.frame.bits());
        self.register.transmit(&self.frame)
    }

    /// Lights `digit` on `tube` and turns off the tube's other nine glyphs.
    pub fn show_digit(&mut self, tube: Tube, digit: Digit) {
        self.frame.disable_many(self.topology.tube_segments(tube));
        self.frame.enable(self.topology.segment(tube, digit));
    }

    pub const fn set_dot(&mut self, dot: Dot, on: bool) {
        let segment = self.topology.dot(dot);
        if on {
            self.frame.enable(segment);
        } else {
            self.frame.disable(segment);
        }
    }

    /// Draws the static clock face: the six digits of `time`, all four dots on or off,
    /// then transmits.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn show_time(&mut self, time: TimeOfDay, dots_on: bool) -> Result<()> {
        self.disable_all();
        for (tube, digit) in Tube::ALL.into_iter().zip(time.digits()) {
            self.enable(self.topology.segment(tube, digit));
        }
        for dot in Dot::ALL {
            self.set_dot(dot, dots_on);
        }
        self.transmit()
    }

    #[must_use]
    pub const fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub const fn topology(&self) -> &SegmentTopology {
        &self.topology
    }

    /// Gives back the shift register and the last frame.
    pub fn release(self) -> (R, Frame) {
        (self.register, self.frame)
    }
}
