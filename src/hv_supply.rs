//! The enable line of the tubes' high-voltage boost converter.

#[cfg(feature = "defmt")]
use defmt::info;
use embedded_hal::digital::OutputPin;

use crate::{Error, Result};

/// Switches the ~170 V anode supply through its enable pin (active high).
///
/// The supply starts off. Blank the display with
/// [`NixieDisplay::begin`](crate::NixieDisplay::begin) before calling
/// [`switch_on`](Self::switch_on), otherwise whatever the shift registers powered up
/// with will glow.
pub struct HvSupply<P> {
    enable: P,
    on: bool,
}

impl<P: OutputPin> HvSupply<P> {
    /// Takes the enable pin and drives it low.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the pin cannot be driven.
    pub fn new(mut enable: P) -> Result<Self> {
        enable.set_low().map_err(|_| Error::CannotSetOutputState)?;
        Ok(Self { enable, on: false })
    }

    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the pin cannot be driven.
    pub fn switch_on(&mut self) -> Result<()> {
        self.enable
            .set_high()
            .map_err(|_| Error::CannotSetOutputState)?;
        self.on = true;
        #[cfg(feature = "defmt")]
        info!("HV supply on");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::CannotSetOutputState`] if the pin cannot be driven.
    pub fn switch_off(&mut self) -> Result<()> {
        self.enable
            .set_low()
            .map_err(|_| Error::CannotSetOutputState)?;
        self.on = false;
        #[cfg(feature = "defmt")]
        info!("HV supply off");
        Ok(())
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    pub fn release(self) -> P {
        self.enable
    }
}
