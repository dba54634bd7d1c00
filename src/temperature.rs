use core::fmt;

/// Temperature reading from the MPU-6050's internal temperature sensor.
///
/// Note: This measures the temperature of the MPU-6050 chip itself, not the ambient
/// room temperature. Readings typically sit a few degrees above ambient due to
/// self-heating of the device during operation.
///
/// The datasheet conversion is `TEMP_OUT / 340 + 36.53`. Its [`Display`](fmt::Display)
/// rendering is the one every telemetry sink uses: two decimals, truncated toward
/// zero, computed in integer fixed point so the text never depends on float rounding.
///
/// # Example
/// ```
/// # use mpu6050_recorder::temperature::Temperature;
/// let temp = Temperature::new(6700);
/// assert_eq!(temp.centi_celsius(), 5623);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct Temperature {
    pub(crate) raw: i16,
}

/// Counts per degree Celsius.
const COUNTS_PER_DEGREE: i32 = 340;
/// Offset at raw zero, in hundredths of a degree.
const OFFSET_CENTI: i32 = 3653;

impl Temperature {
    pub fn new(raw: i16) -> Self {
        Self { raw }
    }

    pub fn from_bytes(data: [u8; 2]) -> Self {
        Self {
            raw: i16::from_be_bytes(data),
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.raw.to_be_bytes()
    }

    /// Returns the raw temperature value from the sensor.
    pub fn raw(&self) -> i16 {
        self.raw
    }

    /// Convert raw temperature to degrees Celsius
    /// Formula from datasheet: Temperature = (TEMP_OUT)/340 + 36.53
    pub fn celsius(&self) -> f32 {
        (self.raw as f32) / 340.0 + 36.53
    }

    /// Degrees Celsius in hundredths, truncated toward zero.
    pub fn centi_celsius(&self) -> i32 {
        (self.raw as i32 * 100 + OFFSET_CENTI * COUNTS_PER_DEGREE) / COUNTS_PER_DEGREE
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let centi = self.centi_celsius();
        let sign = if centi < 0 { "-" } else { "" };
        let abs = centi.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
