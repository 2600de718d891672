//! The clock face: one owner for the frame, arbitrating between the static time and the
//! slot-machine transition.
//!
//! See [`NixieClock`] for usage.

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_time::Instant;

use crate::Result;
use crate::config::ClockConfig;
use crate::display::NixieDisplay;
use crate::shift_register::ShiftRegister;
use crate::slot_machine::SlotMachine;
use crate::time_of_day::TimeOfDay;

/// How far ahead of the triggering second a spin aims, in seconds.
///
/// Matches the minimum spin of [`MIN_CYCLE_STEPS`](crate::MIN_CYCLE_STEPS), so the reels
/// land close to the moment their digits become true.
pub const SPIN_LOOKAHEAD: u32 = 4;

/// A six-tube clock driven by a periodic tick.
///
/// `NixieClock` is the single writer of the display's frame. Each [`tick`](Self::tick)
/// either advances a running [`SlotMachine`] session or, when idle, draws the static
/// face once per new second. The configured
/// [`SlotMachineTrigger`](crate::SlotMachineTrigger) starts a spin.
///
/// # Example
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use nixie_kit::{ClockConfig, Frame, NixieClock, ShiftRegister, TimeOfDay};
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
/// let config = ClockConfig::from_settings("on", "minute", "10:00:58")?;
/// let mut clock = NixieClock::new(Recorder::default(), config);
/// clock.begin()?;
///
/// let now = Instant::from_secs(1);
/// clock.tick(now, TimeOfDay::new(10, 0, 59)?)?;
/// assert!(!clock.is_animating());
///
/// // Second 0 of a new minute starts the transition towards 10:01:04.
/// clock.tick(now + Duration::from_secs(1), TimeOfDay::new(10, 1, 0)?)?;
/// assert!(clock.is_animating());
/// # Ok::<(), nixie_kit::Error>(())
/// ```
pub struct NixieClock<R> {
    display: NixieDisplay<R>,
    slot_machine: SlotMachine,
    config: ClockConfig,
    shown: Option<TimeOfDay>,
    last_trigger: Option<TimeOfDay>,
}

impl<R: ShiftRegister> NixieClock<R> {
    /// Creates the clock with the tube wiring of `config.family`.
    pub const fn new(register: R, config: ClockConfig) -> Self {
        Self {
            display: NixieDisplay::new(register, config.family.topology()),
            slot_machine: SlotMachine::Idle,
            config,
            shown: None,
            last_trigger: None,
        }
    }

    /// Blanks the tubes. Call before switching on the high-voltage supply.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn begin(&mut self) -> Result<()> {
        self.shown = None;
        self.display.begin()
    }

    /// Runs one scheduling tick with the current `time` of day.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn tick(&mut self, now: Instant, time: TimeOfDay) -> Result<()> {
        if self.slot_machine.is_active() {
            return self.slot_machine.update(now, &mut self.display);
        }
        if self.shown == Some(time) {
            return Ok(());
        }
        if self.config.trigger.fires_at(time) && self.last_trigger != Some(time) {
            self.last_trigger = Some(time);
            #[cfg(feature = "defmt")]
            info!("Slot machine triggered at {:?}", time);
            self.spin(now, time.add_seconds(SPIN_LOOKAHEAD))?;
            return Ok(());
        }
        self.display
            .show_time(time, self.config.dots.is_lit(time))?;
        self.shown = Some(time);
        Ok(())
    }

    /// Rolls from the displayed time to `target` and draws the first frame.
    ///
    /// Returns `false` if a transition is already running; that session continues
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn spin(&mut self, now: Instant, target: TimeOfDay) -> Result<bool> {
        let from = self.shown.unwrap_or(target);
        if !self.slot_machine.start(from, target, now) {
            return Ok(false);
        }
        // The static face is redrawn as soon as the session ends.
        self.shown = None;
        self.slot_machine.update(now, &mut self.display)?;
        Ok(true)
    }

    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.slot_machine.is_active()
    }

    #[must_use]
    pub const fn display(&self) -> &NixieDisplay<R> {
        &self.display
    }

    #[must_use]
    pub const fn slot_machine(&self) -> &SlotMachine {
        &self.slot_machine
    }

    #[must_use]
    pub const fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Gives back the shift register.
    pub fn release(self) -> R {
        self.display.release().0
    }
}
