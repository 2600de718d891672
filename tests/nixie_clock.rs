//! Host-level tests for the clock face: static drawing, triggers and arbitration with
//! the slot-machine transition.
#![expect(clippy::indexing_slicing, reason = "Frame logs have a known length")]

use std::convert::Infallible;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::{ErrorType, OutputPin};
use nixie_kit::{
    ClockConfig, ClockTime, Dot, DotMode, Error, Frame, HvSupply, MAX_SESSION_STEPS,
    NixieClock, SPIN_LOOKAHEAD, SegmentTopology, ShiftRegister, SlotMachineTrigger, TimeOfDay,
    Tube, TubeFamily,
};

#[derive(Default)]
struct Recorder(Vec<Frame>);

impl ShiftRegister for Recorder {
    fn transmit(&mut self, frame: &Frame) -> nixie_kit::Result<()> {
        self.0.push(*frame);
        Ok(())
    }
}

fn time(hours: u8, minutes: u8, seconds: u8) -> TimeOfDay {
    TimeOfDay::new(hours, minutes, seconds).expect("valid time")
}

fn config(dots: DotMode, trigger: SlotMachineTrigger) -> ClockConfig {
    ClockConfig {
        family: TubeFamily::Z570M,
        dots,
        trigger,
        start_time: TimeOfDay::MIDNIGHT,
    }
}

fn shows(frame: &Frame, time: TimeOfDay) -> bool {
    let topology = SegmentTopology::Z570M;
    Tube::ALL
        .into_iter()
        .zip(time.digits())
        .all(|(tube, digit)| frame.is_enabled(topology.segment(tube, digit)))
}

fn dots_lit(frame: &Frame) -> bool {
    let topology = SegmentTopology::Z570M;
    Dot::ALL
        .into_iter()
        .all(|dot| frame.is_enabled(topology.dot(dot)))
}

#[test]
fn static_face_redraws_once_per_second() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::On, SlotMachineTrigger::Never),
    );
    clock.begin().expect("recorder never fails");

    let now = Instant::from_secs(100);
    clock.tick(now, time(8, 15, 30)).expect("recorder never fails");
    clock
        .tick(now + Duration::from_millis(10), time(8, 15, 30))
        .expect("recorder never fails");
    clock
        .tick(now + Duration::from_millis(1_000), time(8, 15, 31))
        .expect("recorder never fails");

    let frames = clock.release().0;
    assert_eq!(frames.len(), 3, "blank, then one frame per distinct second");
    assert_eq!(frames[0], Frame::new());
    assert!(shows(&frames[1], time(8, 15, 30)));
    assert!(shows(&frames[2], time(8, 15, 31)));
    assert!(dots_lit(&frames[2]));
}

#[test]
fn blinking_dots_follow_second_parity() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::Blink, SlotMachineTrigger::Never),
    );
    let now = Instant::from_secs(0);
    clock.tick(now, time(1, 2, 4)).expect("recorder never fails");
    clock.tick(now, time(1, 2, 5)).expect("recorder never fails");

    let frames = clock.release().0;
    assert!(dots_lit(&frames[0]));
    assert!(!dots_lit(&frames[1]));
    assert_eq!(frames[1].enabled_count(), 6);
}

#[test]
fn hourly_trigger_spins_from_shown_time_to_lookahead() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::Blink, SlotMachineTrigger::EveryHour),
    );
    let start = Instant::from_secs(50);
    clock.tick(start, time(9, 59, 59)).expect("recorder never fails");
    assert!(!clock.is_animating());

    let trigger_at = start + Duration::from_secs(1);
    clock.tick(trigger_at, time(10, 0, 0)).expect("recorder never fails");
    assert!(clock.is_animating());

    let session = clock.slot_machine().session().expect("session is running");
    assert_eq!(session.started_at(), trigger_at);
    let targets = (*session.reels()).map(|reel| reel.target());
    assert_eq!(targets, time(10, 0, 0).add_seconds(SPIN_LOOKAHEAD).digits());
    // 09:59:59 de-duplicates to 0 9 5 1 6 2.
    let starts = (*session.reels()).map(|reel| reel.start().value());
    assert_eq!(starts, [0, 9, 5, 1, 6, 2]);
}

#[test]
fn animation_owns_the_frame_until_it_lands() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::On, SlotMachineTrigger::EveryMinute),
    );
    let boot = Instant::from_secs(0);
    let clock_time = ClockTime::new(time(6, 59, 59), boot);

    let mut now = boot;
    let mut ticks_animating = 0;
    while now < boot + Duration::from_secs(8) {
        let was_animating = clock.is_animating();
        clock
            .tick(now, clock_time.time_of_day(now))
            .expect("recorder never fails");
        if was_animating || clock.is_animating() {
            ticks_animating += 1;
            // No static face (with its lit dots) interrupts the transition.
            assert!(!dots_lit(clock.display().frame()));
        }
        now += Duration::from_millis(10);
    }

    assert!(!clock.is_animating());
    assert!(ticks_animating > 0);
    let max_animation = Duration::from_millis(50 * (MAX_SESSION_STEPS + 1));
    assert!(u64::try_from(ticks_animating).expect("small") * 10 <= max_animation.as_millis() + 10);

    // After the spin the static face is back, with dots.
    let frame = *clock.display().frame();
    assert!(dots_lit(&frame));
    assert!(shows(&frame, clock_time.time_of_day(now - Duration::from_millis(10))));
}

#[test]
fn manual_spin_is_ignored_while_running() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::Off, SlotMachineTrigger::Never),
    );
    let now = Instant::from_secs(0);
    clock.tick(now, time(12, 0, 0)).expect("recorder never fails");

    assert_eq!(clock.spin(now, time(12, 30, 0)), Ok(true));
    assert_eq!(clock.spin(now, time(18, 0, 0)), Ok(false));
    let session = clock.slot_machine().session().expect("session is running");
    assert_eq!(
        (*session.reels()).map(|reel| reel.target()),
        time(12, 30, 0).digits()
    );
}

#[test]
fn trigger_does_not_refire_for_the_same_second() {
    let mut clock = NixieClock::new(
        Recorder::default(),
        config(DotMode::Off, SlotMachineTrigger::EveryMinute),
    );
    let start = Instant::from_secs(0);
    clock.tick(start, time(5, 0, 0)).expect("recorder never fails");
    assert!(clock.is_animating());

    // Let the spin finish while the caller still reports the triggering second.
    let mut now = start;
    while clock.is_animating() {
        now += Duration::from_millis(10);
        clock.tick(now, time(5, 0, 0)).expect("recorder never fails");
    }
    clock.tick(now, time(5, 0, 0)).expect("recorder never fails");
    assert!(!clock.is_animating());
    assert!(shows(clock.display().frame(), time(5, 0, 0)));
}

#[test]
fn settings_parse_and_reject() {
    let parsed = ClockConfig::from_settings("off", "never", "23:59:00").expect("valid settings");
    assert_eq!(parsed.dots, DotMode::Off);
    assert_eq!(parsed.trigger, SlotMachineTrigger::Never);
    assert_eq!(parsed.start_time, time(23, 59, 0));
    assert_eq!(parsed.family, TubeFamily::DEFAULT);

    assert_eq!(
        ClockConfig::from_settings("blink", "daily", "00:00:00"),
        Err(Error::InvalidSetting)
    );
    assert_eq!(
        ClockConfig::from_settings("blink", "hour", "noon"),
        Err(Error::InvalidTimeFormat)
    );
    assert_eq!(
        ClockConfig::from_settings("blink", "hour", "12:60:00"),
        Err(Error::MinuteOutOfRange(60))
    );
}

/// Pin that remembers its last level.
struct EnablePin {
    high: bool,
}

impl ErrorType for EnablePin {
    type Error = Infallible;
}

impl OutputPin for EnablePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

#[test]
fn hv_supply_starts_off_and_switches() {
    let mut supply = HvSupply::new(EnablePin { high: true }).expect("pin never fails");
    assert!(!supply.is_on());

    supply.switch_on().expect("pin never fails");
    assert!(supply.is_on());
    supply.switch_off().expect("pin never fails");
    assert!(!supply.is_on());
    assert!(!supply.release().high);
}
