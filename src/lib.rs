//! Drive a six-tube nixie clock through a 64-bit high-voltage shift-register chain.
//!
//! The crate is `no_std` and hardware-agnostic: pins and SPI buses come in through
//! [`embedded_hal`] traits, and every time-dependent operation takes an
//! [`embassy_time::Instant`] from the caller.
//!
//! The layers, bottom up:
//!
//! - [`SegmentTopology`] maps each (tube, digit) and each separator dot to one of the
//!   64 chain outputs, checked at compile time.
//! - [`Frame`] holds the on/off state of all 64 segments.
//! - [`ShiftRegister`] latches a frame onto the tubes ([`BitBangShiftRegister`],
//!   [`SpiShiftRegister`]).
//! - [`NixieDisplay`] owns the frame and the register.
//! - [`SlotMachine`] animates a digit-roll transition between two times.
//! - [`NixieClock`] owns the display and decides, each tick, whether the static face or
//!   the animation draws.
//!
//! Next to the tubes, [`LedRing`] computes the colors of the backlight pixel ring.
//!
//! See `demos/nixie_clock.rs` for a Raspberry Pi Pico firmware.
#![cfg_attr(not(test), no_std)]

mod clock_time;
mod config;
mod display;
mod error;
mod frame;
mod hv_supply;
mod led_ring;
mod nixie_clock;
mod segment;
mod shift_register;
mod slot_machine;
mod time_of_day;
mod topology;

pub use clock_time::{ClockTime, ONE_DAY, ONE_SECOND};
pub use config::{ClockConfig, DotMode, LedRingConfig, SlotMachineTrigger};
pub use display::NixieDisplay;
pub use error::{Error, Result};
pub use frame::{FRAME_BYTES, Frame};
pub use hv_supply::HvSupply;
pub use led_ring::{
    Brightness, LED_COUNT, LED_STEP, LedColor, LedEffect, LedRing, Rgb, wheel,
};
pub use nixie_clock::{NixieClock, SPIN_LOOKAHEAD};
pub use segment::{DIGIT_COUNT, Digit, SEGMENT_COUNT, Segment};
pub use shift_register::{BitBangShiftRegister, ShiftRegister, SpiShiftRegister};
pub use slot_machine::{
    MAX_SESSION_STEPS, MIN_CYCLE_STEPS, Reel, STEP_DURATION, Session, SlotMachine,
    distinct_start_digits,
};
pub use time_of_day::TimeOfDay;
pub use topology::{DOT_COUNT, Dot, SegmentTopology, TUBE_COUNT, Tube, TubeFamily};
