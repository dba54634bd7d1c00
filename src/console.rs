//! Human-readable console telemetry.

use core::fmt::Write;
use heapless::String;

use crate::sample::Sample;

/// Worst case is 104 bytes: seven labelled 6-character values plus separators.
pub const LINE_CAPACITY: usize = 128;

/// Format one sample as
/// `AcX = .. | AcY = .. | AcZ = .. | Tmp = .. | GyX = .. | GyY = .. | GyZ = ..\r\n`.
pub fn format_line(sample: &Sample) -> String<LINE_CAPACITY> {
    let accel = sample.accel();
    let gyro = sample.gyro();
    let mut s = String::new();
    let _ = writeln!(
        s,
        "AcX = {} | AcY = {} | AcZ = {} | Tmp = {} | GyX = {} | GyY = {} | GyZ = {}\r",
        accel.x(),
        accel.y(),
        accel.z(),
        sample.temperature(),
        gyro.x(),
        gyro.y(),
        gyro.z(),
    );
    s
}

/// Console sink over any text stream (serial port, RTT channel, test buffer).
pub struct ConsoleSink<W> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one line for `sample`. The stream is assumed always writable.
    pub fn publish(&mut self, sample: &Sample) {
        let _ = self.out.write_str(&format_line(sample));
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
