//! The "slot machine" digit-roll transition.
//!
//! Every tube spins through 0–9 in lockstep, one digit per [`STEP_DURATION`]; after
//! [`MIN_CYCLE_STEPS`] each tube lands on its target the first step its rolling digit
//! matches. See [`SlotMachine`].

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_time::{Duration, Instant};

use crate::Result;
use crate::display::NixieDisplay;
use crate::segment::{DIGIT_COUNT, Digit};
use crate::shift_register::ShiftRegister;
use crate::time_of_day::TimeOfDay;
use crate::topology::{Dot, TUBE_COUNT, Tube};

/// Real time per animation step. All reels advance together.
pub const STEP_DURATION: Duration = Duration::from_millis(50);

/// Steps every reel spins before it may land (4 s, eight full cycles).
pub const MIN_CYCLE_STEPS: u64 = 80;

/// The last step on which a reel can land: at most one more cycle after the minimum.
pub const MAX_SESSION_STEPS: u64 = MIN_CYCLE_STEPS + DIGIT_COUNT as u64 - 1;

/// One tube's reel within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reel {
    start: Digit,
    target: Digit,
    current: Digit,
    spinning: bool,
}

impl Reel {
    const fn new(start: Digit, target: Digit) -> Self {
        Self {
            start,
            target,
            current: start,
            spinning: true,
        }
    }

    /// The (de-duplicated) digit the reel started from.
    #[must_use]
    pub const fn start(&self) -> Digit {
        self.start
    }

    #[must_use]
    pub const fn target(&self) -> Digit {
        self.target
    }

    /// The digit shown on the last update.
    #[must_use]
    pub const fn current(&self) -> Digit {
        self.current
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Advances a spinning reel to `steps` and lands it if it just rolled onto its
    /// target after the minimum spin. Returns the digit to show.
    fn advance(&mut self, steps: u64) -> Digit {
        if !self.spinning {
            return self.target;
        }
        self.current = self.start.wrapping_add(steps);
        if self.current == self.target && steps >= MIN_CYCLE_STEPS {
            self.spinning = false;
        }
        self.current
    }
}

/// One run of the transition from a start time to a target time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Session {
    started_at: Instant,
    reels: [Reel; TUBE_COUNT],
}

impl Session {
    fn new(start: TimeOfDay, target: TimeOfDay, now: Instant) -> Self {
        let start_digits = distinct_start_digits(start.digits());
        let target_digits = target.digits();
        let mut reels = [Reel::new(Digit::ZERO, Digit::ZERO); TUBE_COUNT];
        for ((reel, start), target) in reels.iter_mut().zip(start_digits).zip(target_digits) {
            *reel = Reel::new(start, target);
        }
        Self {
            started_at: now,
            reels,
        }
    }

    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Reels in [`Tube::ALL`] order.
    #[must_use]
    pub const fn reels(&self) -> &[Reel; TUBE_COUNT] {
        &self.reels
    }

    /// Whole steps elapsed at `now`. A clock reading earlier than the start counts as 0.
    #[must_use]
    pub fn steps_at(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at)
            .as_ticks()
            .checked_div(STEP_DURATION.as_ticks())
            .unwrap_or(0)
    }
}

/// Assigns pairwise-distinct starting digits: a digit already taken by an earlier tube
/// is replaced by the first free `(digit + offset) % 10`, `offset` in `1..=9`.
///
/// Only the look of the spin-up changes; targets are never de-duplicated.
#[must_use]
pub fn distinct_start_digits(digits: [Digit; TUBE_COUNT]) -> [Digit; TUBE_COUNT] {
    let mut used = [false; DIGIT_COUNT];
    digits.map(|digit| {
        // Six tubes and ten digits: a free digit always exists.
        let free = (0..DIGIT_COUNT as u64)
            .map(|offset| digit.wrapping_add(offset))
            .find(|candidate| !used.get(candidate.as_index()).copied().unwrap_or(true))
            .unwrap_or(digit);
        if let Some(slot) = used.get_mut(free.as_index()) {
            *slot = true;
        }
        free
    })
}

/// The slot-machine animator: idle, or running one [`Session`].
///
/// The animator is poll-driven. The owner of the [`NixieDisplay`] calls
/// [`update`](Self::update) once per scheduling tick; each call computes the shared
/// step count from elapsed time, redraws the whole frame and transmits it. While
/// [`is_active`](Self::is_active) the animator owns the frame and the static clock
/// face must not be drawn.
///
/// # Example
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use nixie_kit::{Frame, NixieDisplay, SegmentTopology, ShiftRegister, SlotMachine, TimeOfDay};
///
/// struct Discard;
/// impl ShiftRegister for Discard {
///     fn transmit(&mut self, _frame: &Frame) -> nixie_kit::Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut display = NixieDisplay::new(Discard, SegmentTopology::IN12);
/// let mut slot_machine = SlotMachine::default();
/// let start = Instant::from_millis(1_000);
/// assert!(slot_machine.start(TimeOfDay::new(12, 34, 56)?, TimeOfDay::MIDNIGHT, start));
///
/// let mut now = start;
/// while slot_machine.is_active() {
///     slot_machine.update(now, &mut display)?;
///     now += Duration::from_millis(50);
/// }
/// // Every reel landed on 0 within 90 steps.
/// assert!(now <= start + Duration::from_millis(50 * 90));
/// # Ok::<(), nixie_kit::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotMachine {
    #[default]
    Idle,
    Running(Session),
}

impl SlotMachine {
    /// Starts a session rolling from `start` to `target`.
    ///
    /// Returns `false`, leaving the running session untouched, if one is already in
    /// flight.
    pub fn start(&mut self, start: TimeOfDay, target: TimeOfDay, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }
        let session = Session::new(start, target, now);
        #[cfg(feature = "defmt")]
        info!(
            "Slot machine: {:?} -> {:?}, reels {:?}",
            start,
            target,
            session.reels()
        );
        *self = Self::Running(session);
        true
    }

    /// Advances the running session to `now`, redraws the whole frame and transmits it.
    ///
    /// The redraw clears the frame, lights each tube's current digit (or its target once
    /// landed), and clears all four dots. When the last reel lands, that final frame is
    /// transmitted and the machine returns to idle. Does nothing while idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift register cannot be driven.
    pub fn update<R: ShiftRegister>(
        &mut self,
        now: Instant,
        display: &mut NixieDisplay<R>,
    ) -> Result<()> {
        let Self::Running(session) = self else {
            return Ok(());
        };
        let steps = session.steps_at(now);
        let topology = *display.topology();

        display.disable_all();
        for (tube, reel) in Tube::ALL.into_iter().zip(session.reels.iter_mut()) {
            #[cfg(feature = "display-trace")]
            let was_spinning = reel.spinning;
            let digit = reel.advance(steps);
            display.enable(topology.segment(tube, digit));
            #[cfg(feature = "display-trace")]
            if was_spinning && !reel.spinning {
                info!("{:?} landed on {} at step {}", tube, digit.value(), steps);
            }
        }
        for dot in Dot::ALL {
            display.disable(topology.dot(dot));
        }
        let all_landed = session.reels.iter().all(|reel| !reel.spinning);
        display.transmit()?;

        if all_landed {
            #[cfg(feature = "defmt")]
            info!("Slot machine finished after {} steps", steps);
            *self = Self::Idle;
        }
        Ok(())
    }

    /// Whether a session is running (and therefore owns the frame).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Idle => None,
            Self::Running(session) => Some(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: [u8; TUBE_COUNT]) -> [Digit; TUBE_COUNT] {
        values.map(|value| Digit::new(value).expect("test digit is in range"))
    }

    #[test]
    fn distinct_start_digits_search_forward() {
        let assigned = distinct_start_digits(digits([1, 1, 1, 9, 9, 0]));
        assert_eq!(assigned, digits([1, 2, 3, 9, 0, 4]));
    }

    #[test]
    fn steps_at_counts_whole_steps_and_clamps_before_start() {
        let start = Instant::from_secs(10);
        let mut slot_machine = SlotMachine::default();
        assert!(slot_machine.start(TimeOfDay::MIDNIGHT, TimeOfDay::MIDNIGHT, start));
        let session = slot_machine.session().expect("session is running");

        assert_eq!(session.steps_at(Instant::from_secs(9)), 0);
        assert_eq!(session.steps_at(start), 0);
        assert_eq!(session.steps_at(start + Duration::from_millis(49)), 0);
        assert_eq!(session.steps_at(start + Duration::from_millis(50)), 1);
        assert_eq!(session.steps_at(start + Duration::from_secs(4)), MIN_CYCLE_STEPS);
    }

    #[test]
    fn distinct_start_digits_keep_unique_input() {
        let input = digits([1, 2, 3, 4, 5, 6]);
        assert_eq!(distinct_start_digits(input), input);
    }

    #[test]
    fn all_equal_digits_spread_out() {
        let assigned = distinct_start_digits(digits([0; TUBE_COUNT]));
        assert_eq!(assigned, digits([0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn reel_lands_only_on_matching_step_after_minimum() {
        let mut reel = Reel::new(Digit::ZERO, Digit::ZERO);
        // Rolls past its target at step 70 without landing.
        assert_eq!(reel.advance(70), Digit::ZERO);
        assert!(reel.is_spinning());
        // Step 81 is past the minimum but does not match.
        assert_eq!(reel.advance(81).value(), 1);
        assert!(reel.is_spinning());
        assert_eq!(reel.advance(90), Digit::ZERO);
        assert!(!reel.is_spinning());
        // Landed reels ignore time.
        assert_eq!(reel.advance(95), Digit::ZERO);
    }

    #[test]
    fn steps_saturate_before_start() {
        let session = Session::new(
            TimeOfDay::MIDNIGHT,
            TimeOfDay::MIDNIGHT,
            Instant::from_millis(500),
        );
        assert_eq!(session.steps_at(Instant::from_millis(0)), 0);
        assert_eq!(session.steps_at(Instant::from_millis(549)), 0);
        assert_eq!(session.steps_at(Instant::from_millis(550)), 1);
    }

    #[test]
    fn max_session_steps_is_one_cycle_past_minimum() {
        assert_eq!(MAX_SESSION_STEPS, 89);
    }
}
