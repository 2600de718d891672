//! Clock behaviour settings.
//!
//! Settings normally come from the build environment: `build.rs` reads the `NIXIE_*`
//! variables (from the process environment or a `.env` file) and bakes them in as
//! compile-time strings, which [`ClockConfig::from_build_env`] and
//! [`LedRingConfig::from_build_env`] parse.

use core::str::FromStr;

use crate::led_ring::{Brightness, LedEffect};
use crate::time_of_day::TimeOfDay;
use crate::topology::TubeFamily;
use crate::{Error, Result};

/// How the four separator dots behave on the static clock face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DotMode {
    Off,
    On,
    /// Lit on even seconds.
    #[default]
    Blink,
}

impl DotMode {
    /// Whether the dots glow while `time` is shown.
    #[must_use]
    #[expect(clippy::integer_division_remainder_used, reason = "Parity check")]
    pub const fn is_lit(self, time: TimeOfDay) -> bool {
        match self {
            Self::Off => false,
            Self::On => true,
            Self::Blink => time.seconds() % 2 == 0,
        }
    }
}

impl FromStr for DotMode {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim() {
            "off" => Ok(Self::Off),
            "on" => Ok(Self::On),
            "blink" => Ok(Self::Blink),
            _ => Err(Error::InvalidSetting),
        }
    }
}

/// When the clock rolls into the next time with the slot-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotMachineTrigger {
    Never,
    /// At second 0 of every minute.
    EveryMinute,
    /// At 00 minutes 00 seconds of every hour.
    #[default]
    EveryHour,
}

impl SlotMachineTrigger {
    #[must_use]
    pub const fn fires_at(self, time: TimeOfDay) -> bool {
        match self {
            Self::Never => false,
            Self::EveryMinute => time.seconds() == 0,
            Self::EveryHour => time.minutes() == 0 && time.seconds() == 0,
        }
    }
}

impl FromStr for SlotMachineTrigger {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.trim() {
            "never" => Ok(Self::Never),
            "minute" => Ok(Self::EveryMinute),
            "hour" => Ok(Self::EveryHour),
            _ => Err(Error::InvalidSetting),
        }
    }
}

/// Everything the clock needs to know besides the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub family: TubeFamily,
    pub dots: DotMode,
    pub trigger: SlotMachineTrigger,
    /// Time shown at power-up, until something sets the clock.
    pub start_time: TimeOfDay,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            family: TubeFamily::DEFAULT,
            dots: DotMode::default(),
            trigger: SlotMachineTrigger::default(),
            start_time: TimeOfDay::MIDNIGHT,
        }
    }
}

impl ClockConfig {
    /// Parses the three textual settings for the build's tube family.
    ///
    /// ```
    /// use nixie_kit::{ClockConfig, DotMode, Error, SlotMachineTrigger};
    ///
    /// let config = ClockConfig::from_settings("on", "minute", "07:30:00")?;
    /// assert_eq!(config.dots, DotMode::On);
    /// assert_eq!(config.trigger, SlotMachineTrigger::EveryMinute);
    /// let unknown = ClockConfig::from_settings("sometimes", "hour", "07:30:00");
    /// assert_eq!(unknown, Err(Error::InvalidSetting));
    /// # Ok::<(), Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] for an unknown dot mode or trigger, and the
    /// [`TimeOfDay`] parse error for a bad start time.
    pub fn from_settings(dots: &str, trigger: &str, start_time: &str) -> Result<Self> {
        Ok(Self {
            family: TubeFamily::DEFAULT,
            dots: dots.parse()?,
            trigger: trigger.parse()?,
            start_time: start_time.parse()?,
        })
    }

    /// The settings baked in by `build.rs`.
    ///
    /// # Errors
    ///
    /// See [`from_settings`](Self::from_settings).
    pub fn from_build_env() -> Result<Self> {
        Self::from_settings(
            env!("NIXIE_DOTS"),
            env!("NIXIE_SLOT_MACHINE"),
            env!("NIXIE_START_TIME"),
        )
    }
}

/// Backlight ring settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRingConfig {
    pub effect: LedEffect,
    pub brightness: Brightness,
}

impl LedRingConfig {
    /// Parses an effect name (`off`, `rainbow`, `cycle` or a color) and a brightness
    /// percentage.
    ///
    /// ```
    /// use nixie_kit::{LedColor, LedEffect, LedRingConfig};
    ///
    /// let config = LedRingConfig::from_settings("violet", "40")?;
    /// assert_eq!(config.effect, LedEffect::Static(LedColor::Violet));
    /// assert_eq!(config.brightness.percent(), 40);
    /// # Ok::<(), nixie_kit::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] for an unknown effect or a non-numeric
    /// brightness, and [`Error::BrightnessOutOfRange`] above 100 %.
    pub fn from_settings(effect: &str, brightness: &str) -> Result<Self> {
        Ok(Self {
            effect: effect.parse()?,
            brightness: brightness.parse()?,
        })
    }

    /// The settings baked in by `build.rs`.
    ///
    /// # Errors
    ///
    /// See [`from_settings`](Self::from_settings).
    pub fn from_build_env() -> Result<Self> {
        Self::from_settings(env!("NIXIE_LED_EFFECT"), env!("NIXIE_LED_BRIGHTNESS"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hours: u8, minutes: u8, seconds: u8) -> TimeOfDay {
        TimeOfDay::new(hours, minutes, seconds).expect("valid time")
    }

    #[test]
    fn blink_lights_even_seconds() {
        assert!(DotMode::Blink.is_lit(time(1, 2, 4)));
        assert!(!DotMode::Blink.is_lit(time(1, 2, 5)));
        assert!(DotMode::On.is_lit(time(1, 2, 5)));
        assert!(!DotMode::Off.is_lit(time(1, 2, 4)));
    }

    #[test]
    fn triggers_fire_on_boundaries_only() {
        assert!(SlotMachineTrigger::EveryMinute.fires_at(time(9, 15, 0)));
        assert!(!SlotMachineTrigger::EveryMinute.fires_at(time(9, 15, 1)));
        assert!(SlotMachineTrigger::EveryHour.fires_at(time(9, 0, 0)));
        assert!(!SlotMachineTrigger::EveryHour.fires_at(time(9, 15, 0)));
        assert!(!SlotMachineTrigger::Never.fires_at(time(0, 0, 0)));
    }

    #[test]
    fn build_env_defaults_parse() {
        // build.rs always provides a value, falling back to the documented defaults.
        assert!(ClockConfig::from_build_env().is_ok());
        assert!(LedRingConfig::from_build_env().is_ok());
    }

    #[test]
    fn led_ring_settings_parse_and_reject() {
        let config = LedRingConfig::from_settings("rainbow", "75%").expect("valid settings");
        assert_eq!(config.effect, LedEffect::RainbowCycle);
        assert_eq!(config.brightness.percent(), 75);
        assert_eq!(
            LedRingConfig::from_settings("disco", "75"),
            Err(Error::InvalidSetting)
        );
        assert_eq!(
            LedRingConfig::from_settings("off", "101"),
            Err(Error::BrightnessOutOfRange(101))
        );
    }
}
