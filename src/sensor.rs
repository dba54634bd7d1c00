//! MPU6050 Blocking Driver
//!
//! Wakes the device and reads the 14-byte measurement block in a single
//! write-read transaction: the register pointer is written with a repeated
//! start, so bus ownership is kept for the whole burst.

use crate::{
    address::Address,
    error::{Error, InitError},
    registers::Register,
    sample::Sample,
};
use embedded_hal::i2c::I2c;

/// InvenSense MPU-6050 Driver
pub struct Mpu6050<I>
where
    I: I2c,
{
    i2c: I,
    address: u8,
}

impl<I> Mpu6050<I>
where
    I: I2c,
{
    /// Construct a new i2c driver for the MPU-6050 and wake the device.
    pub fn new(i2c: I, address: Address) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
        };

        if let Err(error) = sensor.wake() {
            Err(InitError {
                error,
                i2c: sensor.i2c,
            })
        } else {
            Ok(sensor)
        }
    }

    /// Returns the underlying I2C peripheral, consuming this driver.
    pub fn release(self) -> I {
        self.i2c
    }

    pub(crate) fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .map_err(Error::WriteReadError)
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.address, bytes)
            .map_err(Error::WriteError)
    }

    pub(crate) fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<I::Error>> {
        self.write(&[reg as u8, value])
    }

    /// Clear PWR_MGMT_1: leaves sleep mode on the internal oscillator.
    pub fn wake(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(Register::PwrMgmt1, 0)
    }

    /// Burst-read accelerometer, temperature and gyroscope in one transaction.
    ///
    /// Every call hits the bus; nothing is cached. On a bus error no sample is
    /// produced, so a failed read can never be mistaken for an all-zero one.
    pub fn read_sample(&mut self) -> Result<Sample, Error<I::Error>> {
        let mut data = [0; Sample::SIZE];
        self.read(&[Register::AccelX_H as u8], &mut data)?;
        Ok(Sample::from_bytes(data))
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut I {
        &mut self.i2c
    }
}
