//! The ring of twelve WS2812 pixels that backlights the tubes.
//!
//! [`LedRing`] only computes colors. The caller polls [`LedRing::update`] with the
//! current [`Instant`] and, when it reports a change, writes [`LedRing::pixels`] to
//! whatever strip driver the board has (any [`smart_leds`] sink).

use core::str::FromStr;

#[cfg(feature = "defmt")]
use defmt::info;
use embassy_time::{Duration, Instant};
use smart_leds::RGB8;

use crate::{Error, Result};

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// Pixels in the ring.
pub const LED_COUNT: usize = 12;

/// Time between frames of the moving effects.
pub const LED_STEP: Duration = Duration::from_millis(50);

const BLACK: Rgb = rgb(0, 0, 0);

/// Wheel position of each pixel for the rainbow cycle: `index * 256 / LED_COUNT`.
const RAINBOW_OFFSETS: [u8; LED_COUNT] = [0, 21, 42, 64, 85, 106, 128, 149, 170, 192, 213, 234];

/// The twelve fixed colors a static ring can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    Red,
    Vermilion,
    Orange,
    Amber,
    Yellow,
    Chartreuse,
    Green,
    Teal,
    Blue,
    Violet,
    Purple,
    Magenta,
}

impl LedColor {
    /// All colors, warm to cool and back round to magenta.
    pub const ALL: [Self; 12] = [
        Self::Red,
        Self::Vermilion,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Chartreuse,
        Self::Green,
        Self::Teal,
        Self::Blue,
        Self::Violet,
        Self::Purple,
        Self::Magenta,
    ];

    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Red => rgb(255, 0, 0),
            Self::Vermilion => rgb(250, 25, 0),
            Self::Orange => rgb(240, 50, 0),
            Self::Amber => rgb(210, 75, 0),
            Self::Yellow => rgb(180, 140, 0),
            Self::Chartreuse => rgb(110, 200, 0),
            Self::Green => rgb(0, 255, 0),
            Self::Teal => rgb(0, 150, 200),
            Self::Blue => rgb(0, 0, 255),
            Self::Violet => rgb(60, 0, 170),
            Self::Purple => rgb(130, 0, 180),
            Self::Magenta => rgb(180, 0, 70),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Vermilion => "vermilion",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Chartreuse => "chartreuse",
            Self::Green => "green",
            Self::Teal => "teal",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Magenta => "magenta",
        }
    }
}

/// What the ring shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedEffect {
    #[default]
    Off,
    /// The whole color wheel spread around the ring, turning one position per step.
    RainbowCycle,
    /// Neighbouring wheel colors on every pixel, drifting one position per step.
    ColorCycle,
    Static(LedColor),
}

impl LedEffect {
    /// Whether the effect redraws every [`LED_STEP`].
    #[must_use]
    pub const fn is_moving(self) -> bool {
        matches!(self, Self::RainbowCycle | Self::ColorCycle)
    }
}

impl FromStr for LedEffect {
    type Err = Error;

    /// Accepts `off`, `rainbow`, `cycle` or a color name such as `amber`.
    fn from_str(input: &str) -> Result<Self> {
        match input.trim() {
            "off" => Ok(Self::Off),
            "rainbow" => Ok(Self::RainbowCycle),
            "cycle" => Ok(Self::ColorCycle),
            name => LedColor::ALL
                .into_iter()
                .find(|color| color.name() == name)
                .map(Self::Static)
                .ok_or(Error::InvalidSetting),
        }
    }
}

/// Ring brightness in percent, `0..=100`.
///
/// ```
/// use nixie_kit::{Brightness, Error};
///
/// let dim = Brightness::new(5)?;
/// assert_eq!(dim.brighter().percent(), 10);
/// assert_eq!(Brightness::FULL.brighter(), Brightness::FULL);
/// assert_eq!(Brightness::new(101), Err(Error::BrightnessOutOfRange(101)));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    pub const FULL: Self = Self(100);
    /// The dimmest level [`dimmer`](Self::dimmer) steps down to.
    pub const MIN_LEVEL: Self = Self(5);
    const LEVEL_STEP: u8 = 5;

    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`] above 100 percent.
    pub const fn new(percent: u8) -> Result<Self> {
        if percent <= Self::FULL.0 {
            Ok(Self(percent))
        } else {
            Err(Error::BrightnessOutOfRange(percent))
        }
    }

    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// One 5 % level up, stopping at full.
    #[must_use]
    pub const fn brighter(self) -> Self {
        match self.0.checked_add(Self::LEVEL_STEP) {
            Some(percent) if percent <= Self::FULL.0 => Self(percent),
            _ => Self::FULL,
        }
    }

    /// One 5 % level down, stopping at 5 %.
    #[must_use]
    pub const fn dimmer(self) -> Self {
        match self.0.checked_sub(Self::LEVEL_STEP) {
            Some(percent) if percent >= Self::MIN_LEVEL.0 => Self(percent),
            _ => Self::MIN_LEVEL,
        }
    }

    /// The percentage mapped onto `0..=255`.
    #[must_use]
    pub fn scale(self) -> u8 {
        scale_brightness(self.0, 255, 100)
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(50)
    }
}

impl FromStr for Brightness {
    type Err = Error;

    /// Parses a whole percentage, with or without a trailing `%`.
    fn from_str(input: &str) -> Result<Self> {
        let digits = input.trim().trim_end_matches('%');
        let percent = digits.parse::<u8>().map_err(|_| Error::InvalidSetting)?;
        Self::new(percent)
    }
}

/// Color wheel: red at 0, green at 85, blue at 170, back to red at 255.
///
/// ```
/// use nixie_kit::{Rgb, wheel};
///
/// assert_eq!(wheel(0), Rgb::new(255, 0, 0));
/// assert_eq!(wheel(85), Rgb::new(0, 255, 0));
/// assert_eq!(wheel(170), Rgb::new(0, 0, 255));
/// ```
#[must_use]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "Each branch keeps its offset below 85, so offset * 3 fits in a u8"
)]
pub const fn wheel(pos: u8) -> Rgb {
    let inverted = 255 - pos;
    if inverted < 85 {
        rgb(255 - inverted * 3, 0, inverted * 3)
    } else if inverted < 170 {
        let offset = inverted - 85;
        rgb(0, offset * 3, 255 - offset * 3)
    } else {
        let offset = inverted - 170;
        rgb(offset * 3, 255 - offset * 3, 0)
    }
}

const fn rgb(red: u8, green: u8, blue: u8) -> Rgb {
    Rgb {
        r: red,
        g: green,
        b: blue,
    }
}

/// `value * numerator / denominator`, saturating at 255.
#[expect(
    clippy::arithmetic_side_effects,
    clippy::integer_division_remainder_used,
    reason = "Both factors fit in u8, so the product fits in u16; the divisor is at least 1"
)]
fn scale_brightness(value: u8, numerator: u8, denominator: u8) -> u8 {
    let scaled = u16::from(value) * u16::from(numerator) / u16::from(denominator.max(1));
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

/// Color state of the ring.
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use nixie_kit::{Brightness, LED_STEP, LedEffect, LedRing};
///
/// let mut ring = LedRing::new(LedEffect::RainbowCycle, Brightness::FULL);
/// let start = Instant::from_secs(0);
/// assert!(ring.update(start));
/// assert!(!ring.update(start + Duration::from_millis(10)));
/// assert!(ring.update(start + LED_STEP));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedRing {
    effect: LedEffect,
    brightness: Brightness,
    colors: [Rgb; LED_COUNT],
    phase: u8,
    last_step: Option<Instant>,
    dirty: bool,
}

impl LedRing {
    #[must_use]
    pub const fn new(effect: LedEffect, brightness: Brightness) -> Self {
        Self {
            effect,
            brightness,
            colors: [BLACK; LED_COUNT],
            phase: 0,
            last_step: None,
            dirty: true,
        }
    }

    #[must_use]
    pub const fn effect(&self) -> LedEffect {
        self.effect
    }

    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Switches effect. A moving effect restarts from its first frame.
    pub fn set_effect(&mut self, effect: LedEffect) {
        if effect != self.effect {
            #[cfg(feature = "defmt")]
            info!("LED ring effect {:?}", effect);
            self.effect = effect;
            self.phase = 0;
            self.last_step = None;
            self.dirty = true;
        }
    }

    pub fn set_brightness(&mut self, brightness: Brightness) {
        if brightness != self.brightness {
            self.brightness = brightness;
            self.dirty = true;
        }
    }

    /// Advances the effect to `now`. Returns `true` when [`pixels`](Self::pixels)
    /// changed and should be written to the strip.
    ///
    /// Moving effects take one step per call at most, and only once [`LED_STEP`] has
    /// passed since the previous step.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.effect {
            LedEffect::Off => self.fill(BLACK),
            LedEffect::Static(color) => self.fill(color.rgb()),
            LedEffect::RainbowCycle | LedEffect::ColorCycle => self.step(now),
        }
    }

    /// Time until the next moving-effect frame is due, or `None` for a still ring.
    #[must_use]
    pub fn until_next_step(&self, now: Instant) -> Option<Duration> {
        if !self.effect.is_moving() {
            return None;
        }
        let elapsed = self
            .last_step
            .map_or(LED_STEP, |last| now.saturating_duration_since(last));
        Some(LED_STEP.checked_sub(elapsed).unwrap_or(Duration::from_ticks(0)))
    }

    /// The current colors with brightness applied, in strip order.
    #[must_use]
    pub fn pixels(&self) -> [Rgb; LED_COUNT] {
        let scale = self.brightness.scale();
        self.colors.map(|color| {
            Rgb::new(
                scale_brightness(color.r, scale, 255),
                scale_brightness(color.g, scale, 255),
                scale_brightness(color.b, scale, 255),
            )
        })
    }

    fn fill(&mut self, color: Rgb) -> bool {
        self.colors = [color; LED_COUNT];
        core::mem::take(&mut self.dirty)
    }

    fn step(&mut self, now: Instant) -> bool {
        let due = self
            .last_step
            .is_none_or(|last| now.saturating_duration_since(last) >= LED_STEP);
        if !due {
            return core::mem::take(&mut self.dirty);
        }
        if self.effect == LedEffect::RainbowCycle {
            for (color, offset) in self.colors.iter_mut().zip(RAINBOW_OFFSETS) {
                *color = wheel(offset.wrapping_add(self.phase));
            }
        } else {
            for (color, index) in self.colors.iter_mut().zip(0u8..) {
                *color = wheel(index.wrapping_add(self.phase));
            }
        }
        self.phase = self.phase.wrapping_add(1);
        self.last_step = Some(now);
        self.dirty = false;
        true
    }
}

impl Default for LedRing {
    fn default() -> Self {
        Self::new(LedEffect::default(), Brightness::default())
    }
}
