//! Decoded result of one burst read of the measurement block.

use crate::registers::{Register, MEASUREMENT_BLOCK_LEN};
use crate::temperature::Temperature;

/// Raw three-axis reading, in sensor counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Axes {
    x: i16,
    y: i16,
    z: i16,
}

impl Axes {
    pub const SIZE: usize = 6;

    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        self.z
    }

    fn from_be_slice(data: &[u8]) -> Self {
        Self {
            x: i16::from_be_bytes([data[0], data[1]]),
            y: i16::from_be_bytes([data[2], data[3]]),
            z: i16::from_be_bytes([data[4], data[5]]),
        }
    }

    fn write_be_slice(&self, out: &mut [u8]) {
        out[0..2].copy_from_slice(&self.x.to_be_bytes());
        out[2..4].copy_from_slice(&self.y.to_be_bytes());
        out[4..6].copy_from_slice(&self.z.to_be_bytes());
    }
}

/// One 6-axis measurement plus the die temperature.
///
/// Field order everywhere is accel X/Y/Z, temperature, gyro X/Y/Z.
/// A sample has no identity beyond its values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Sample {
    accel: Axes,
    temperature: Temperature,
    gyro: Axes,
}

impl Sample {
    pub const SIZE: usize = MEASUREMENT_BLOCK_LEN;

    pub fn new(accel: Axes, temperature: Temperature, gyro: Axes) -> Self {
        Self {
            accel,
            temperature,
            gyro,
        }
    }

    /// Decode the measurement block, each field big-endian and signed.
    pub fn from_bytes(data: [u8; Self::SIZE]) -> Self {
        let accel = Register::AccelX_H.block_offset();
        let temp = Register::TempOut_H.block_offset();
        let gyro = Register::GyroX_H.block_offset();
        Self {
            accel: Axes::from_be_slice(&data[accel..accel + Axes::SIZE]),
            temperature: Temperature::from_bytes([data[temp], data[temp + 1]]),
            gyro: Axes::from_be_slice(&data[gyro..gyro + Axes::SIZE]),
        }
    }

    /// Encode back into the register layout the sensor produces.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut data = [0; Self::SIZE];
        let temp = Register::TempOut_H.block_offset();
        let gyro = Register::GyroX_H.block_offset();
        self.accel.write_be_slice(&mut data[..Axes::SIZE]);
        data[temp..temp + 2].copy_from_slice(&self.temperature.to_bytes());
        self.gyro.write_be_slice(&mut data[gyro..gyro + Axes::SIZE]);
        data
    }

    pub fn accel(&self) -> Axes {
        self.accel
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn gyro(&self) -> Axes {
        self.gyro
    }
}

impl From<[u8; Sample::SIZE]> for Sample {
    fn from(data: [u8; Sample::SIZE]) -> Self {
        Self::from_bytes(data)
    }
}
