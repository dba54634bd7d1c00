//! MPU6050 registers used by the recorder.
//!
//! Only the power-management register and the measurement block are needed:
//! the measurement block is 14 contiguous bytes starting at `ACCEL_XOUT_H`,
//! laid out as accel X/Y/Z, temperature, gyro X/Y/Z, each big-endian.

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum Register {
    /// Power Management 1 register (0x6B)
    /// Writing 0 clears SLEEP and selects the internal oscillator
    PwrMgmt1 = 0x6B,

    /// High byte of X-axis acceleration, start of the measurement block
    AccelX_H = 0x3B,

    /// High byte of temperature reading
    TempOut_H = 0x41,

    /// High byte of X-axis angular rate
    GyroX_H = 0x43,

    /// Low byte of Z-axis angular rate, end of the measurement block
    GyroZ_L = 0x48,
}

impl Register {
    /// Byte offset of this register inside the measurement block.
    pub(crate) const fn block_offset(self) -> usize {
        self as usize - Register::AccelX_H as usize
    }
}

/// Length of the burst read covering accel, temperature and gyro.
pub const MEASUREMENT_BLOCK_LEN: usize = Register::GyroZ_L.block_offset() + 1;
