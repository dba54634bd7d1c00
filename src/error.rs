//! Error types shared by the blocking and async drivers and the recorder.
//!
//! Both `embedded-hal` and `embedded-hal-async` I2C traits report failures
//! through the same `ErrorType`, so one set of errors serves both drivers.

use core::fmt::{Debug, Formatter};
use embedded_hal::i2c::ErrorType;

/// Error during initialization of sensor. Wraps [`Error`] and hands the bus
/// back so the caller can retry or reuse it.
pub struct InitError<I>
where
    I: ErrorType,
{
    pub i2c: I,
    pub error: Error<I::Error>,
}

impl<I> Debug for InitError<I>
where
    I: ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        self.error.fmt(f)
    }
}

/// Error for sensor operations.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Error<E> {
    /// Error occurred during an I2C write operation
    WriteError(E),
    /// Error occurred during an I2C write-read operation
    WriteReadError(E),
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::result::Result<(), core::fmt::Error> {
        match self {
            Self::WriteReadError(e) => f.debug_tuple("WriteReadError").field(e).finish(),
            Self::WriteError(e) => f.debug_tuple("WriteError").field(e).finish(),
        }
    }
}

/// Error raised while setting up the recorder.
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum RecorderError<E> {
    /// The persistent log could not be opened or bootstrapped
    StorageUnavailable(E),
}

impl<E: Debug> Debug for RecorderError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::StorageUnavailable(e) => f.debug_tuple("StorageUnavailable").field(e).finish(),
        }
    }
}
