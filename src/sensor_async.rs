//! MPU6050 Asynchronous Driver Implementation
//!
//! Mirrors the blocking driver (sensor.rs) operation for operation using
//! `embedded-hal-async`, for firmware running on an async executor.

use crate::{
    address::Address,
    error::{Error, InitError},
    registers::Register,
    sample::Sample,
};

use embedded_hal_async::i2c::I2c;

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
    pub async fn new(i2c: I, address: Address) -> Result<Self, InitError<I>> {
        let mut sensor = Self {
            i2c,
            address: address.into(),
        };

        if let Err(error) = sensor.wake().await {
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

    pub(crate) async fn read(&mut self, bytes: &[u8], response: &mut [u8]) -> Result<(), Error<I::Error>> {
        self.i2c
            .write_read(self.address, bytes, response)
            .await
            .map_err(Error::WriteReadError)
    }

    pub(crate) async fn write(&mut self, bytes: &[u8]) -> Result<(), Error<I::Error>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(Error::WriteError)
    }

    pub(crate) async fn write_register(
        &mut self,
        reg: Register,
        value: u8,
    ) -> Result<(), Error<I::Error>> {
        self.write(&[reg as u8, value]).await
    }

    /// Clear PWR_MGMT_1: leaves sleep mode on the internal oscillator.
    pub async fn wake(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(Register::PwrMgmt1, 0).await
    }

    /// Burst-read accelerometer, temperature and gyroscope in one transaction.
    pub async fn read_sample(&mut self) -> Result<Sample, Error<I::Error>> {
        let mut data = [0; Sample::SIZE];
        self.read(&[Register::AccelX_H as u8], &mut data).await?;
        Ok(Sample::from_bytes(data))
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut I {
        &mut self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, Transfer, REFERENCE_BYTES};
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;

    #[test]
    fn wakes_then_reads_sample() {
        let mut bus = FakeBus::new();
        bus.respond_with(REFERENCE_BYTES);

        let (sample, bus) = block_on(async {
            let mut sensor = Mpu6050::new(bus, Address::default()).await.unwrap();
            let sample = sensor.read_sample().await.unwrap();
            (sample, sensor.release())
        });

        assert_eq!(sample.accel().y(), 200);
        assert_eq!(sample.gyro().x(), 10);
        assert_eq!(
            bus.transfers(),
            &[
                Transfer::Write(0x68, vec![0x6B, 0x00]),
                Transfer::WriteRead(0x68, vec![0x3B], 14),
            ]
        );
    }

    #[test]
    fn init_failure_returns_bus() {
        let mut bus = FakeBus::new();
        bus.fail_next(ErrorKind::ArbitrationLoss);
        let err = block_on(Mpu6050::new(bus, Address::default())).err().unwrap();
        assert_eq!(err.error, Error::WriteError(ErrorKind::ArbitrationLoss));
    }
}
