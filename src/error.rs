use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` tells `derive_more` that a lone tuple field is data, not a wrapped
    // error.
    #[display("Segment {_0} is outside the 64-bit frame")]
    SegmentOutOfRange(#[error(not(source))] u8),

    #[display("Digit {_0} is not a decimal digit")]
    DigitOutOfRange(#[error(not(source))] u8),

    #[display("Hour {_0} is outside 0..=23")]
    HourOutOfRange(#[error(not(source))] u8),

    #[display("Minute {_0} is outside 0..=59")]
    MinuteOutOfRange(#[error(not(source))] u8),

    #[display("Second {_0} is outside 0..=59")]
    SecondOutOfRange(#[error(not(source))] u8),

    #[display("Time must be formatted as HH:MM:SS")]
    InvalidTimeFormat,

    #[display("Brightness {_0}% is above 100%")]
    BrightnessOutOfRange(#[error(not(source))] u8),

    #[display("Unrecognized setting value")]
    InvalidSetting,

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("SPI transfer to the shift register failed")]
    SpiTransfer,
}
