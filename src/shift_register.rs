//! Drivers that push a [`Frame`] into the 64-bit high-voltage shift-register chain.
//!
//! The chain (two HV5622-style drivers) has a data input, a clock input and a latch
//! enable. Bits are shifted in while the latch is low and only appear on the tube
//! outputs when the latch goes high, so a partial frame is never visible.
//!
//! [`BitBangShiftRegister`] drives the three lines as plain GPIOs.
//! [`SpiShiftRegister`] uses an SPI peripheral for data and clock.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::spi::SpiBus;

use crate::frame::Frame;
use crate::{Error, Result};

/// Something that can commit a whole [`Frame`] to the tube outputs.
pub trait ShiftRegister {
    /// Shifts out all 64 bits of `frame` and latches them.
    ///
    /// # Errors
    ///
    /// Returns an error if a line of the serial interface cannot be driven.
    fn transmit(&mut self, frame: &Frame) -> Result<()>;
}

impl<T: ShiftRegister + ?Sized> ShiftRegister for &mut T {
    fn transmit(&mut self, frame: &Frame) -> Result<()> {
        (**self).transmit(frame)
    }
}

/// A shift-register chain driven through three GPIO outputs.
///
/// # Example
///
/// ```
/// use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, OutputPin};
/// use nixie_kit::{BitBangShiftRegister, Frame, ShiftRegister};
///
/// struct NoPin;
/// impl ErrorType for NoPin {
///     type Error = Infallible;
/// }
/// impl OutputPin for NoPin {
///     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
///     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// }
///
/// let mut register = BitBangShiftRegister::new(NoPin, NoPin, NoPin);
/// register.transmit(&Frame::new())?;
/// # Ok::<(), nixie_kit::Error>(())
/// ```
pub struct BitBangShiftRegister<Data, Clock, Latch> {
    data: Data,
    clock: Clock,
    latch: Latch,
}

impl<Data, Clock, Latch> BitBangShiftRegister<Data, Clock, Latch>
where
    Data: OutputPin,
    Clock: OutputPin,
    Latch: OutputPin,
{
    pub const fn new(data: Data, clock: Clock, latch: Latch) -> Self {
        Self { data, clock, latch }
    }

    /// Gives back the three pins.
    pub fn release(self) -> (Data, Clock, Latch) {
        (self.data, self.clock, self.latch)
    }

    fn shift_out_byte(&mut self, byte: u8) -> Result<()> {
        for bit in (0..u8::BITS).rev() {
            let state = PinState::from(byte & (1 << bit) != 0);
            self.data
                .set_state(state)
                .map_err(|_| Error::CannotSetOutputState)?;
            self.clock
                .set_high()
                .map_err(|_| Error::CannotSetOutputState)?;
            self.clock
                .set_low()
                .map_err(|_| Error::CannotSetOutputState)?;
        }
        Ok(())
    }
}

impl<Data, Clock, Latch> ShiftRegister for BitBangShiftRegister<Data, Clock, Latch>
where
    Data: OutputPin,
    Clock: OutputPin,
    Latch: OutputPin,
{
    fn transmit(&mut self, frame: &Frame) -> Result<()> {
        self.latch
            .set_low()
            .map_err(|_| Error::CannotSetOutputState)?;
        for byte in frame.to_shift_bytes() {
            self.shift_out_byte(byte)?;
        }
        self.latch
            .set_high()
            .map_err(|_| Error::CannotSetOutputState)
    }
}

/// A shift-register chain whose data and clock lines hang off an SPI bus (mode 0, MSB first).
pub struct SpiShiftRegister<Spi, Latch> {
    spi: Spi,
    latch: Latch,
}

impl<Spi, Latch> SpiShiftRegister<Spi, Latch>
where
    Spi: SpiBus<u8>,
    Latch: OutputPin,
{
    pub const fn new(spi: Spi, latch: Latch) -> Self {
        Self { spi, latch }
    }

    pub fn release(self) -> (Spi, Latch) {
        (self.spi, self.latch)
    }
}

impl<Spi, Latch> ShiftRegister for SpiShiftRegister<Spi, Latch>
where
    Spi: SpiBus<u8>,
    Latch: OutputPin,
{
    fn transmit(&mut self, frame: &Frame) -> Result<()> {
        self.latch
            .set_low()
            .map_err(|_| Error::CannotSetOutputState)?;
        self.spi
            .write(&frame.to_shift_bytes())
            .map_err(|_| Error::SpiTransfer)?;
        // The latch must not rise while bits are still leaving the SPI FIFO.
        self.spi.flush().map_err(|_| Error::SpiTransfer)?;
        self.latch
            .set_high()
            .map_err(|_| Error::CannotSetOutputState)
    }
}
