//! MPU6050 I2C Address Configuration
//!
//! The MPU6050 answers on one of two 7-bit addresses:
//! - 0x68 (default, AD0 pin low)
//! - 0x69 (alternate, AD0 pin high)

/// Represents an MPU6050 I2C address.
///
/// Note: These are 7-bit addresses. Some I2C implementations may
/// require left-shifting by 1 to create the 8-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Address(pub u8);

impl Address {
    /// Address used when AD0 is tied to VCC.
    pub const fn alternate() -> Self {
        Self(0x69)
    }
}

impl Default for Address {
    /// Returns the default I2C address (0x68), used when AD0 is
    /// connected to GND or left floating.
    fn default() -> Self {
        Self(0x68)
    }
}

impl From<Address> for u8 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl From<u8> for Address {
    fn from(addr: u8) -> Self {
        Self(addr)
    }
}
