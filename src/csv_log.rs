//! Append-only CSV log of samples.
//!
//! The header is written once, when the file is first created. Every sample
//! then becomes exactly one appended row; a failed append drops that row.

use core::fmt::Write;
use heapless::String;
use log::warn;

use crate::sample::Sample;
use crate::storage::Storage;

pub const HEADER: &str = "AcX,AcY,AcZ,Temp,GyX,GyY,GyZ\n";

/// Worst case is 49 bytes: seven 6-character values, six commas, newline.
pub const ROW_CAPACITY: usize = 64;

/// Format one sample as a CSV row in the header's column order.
pub fn format_row(sample: &Sample) -> String<ROW_CAPACITY> {
    let accel = sample.accel();
    let gyro = sample.gyro();
    let mut s = String::new();
    let _ = writeln!(
        s,
        "{},{},{},{},{},{},{}",
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

pub struct CsvLog<S> {
    storage: S,
    file_name: &'static str,
    rows_written: u32,
    rows_dropped: u32,
}

impl<S: Storage> CsvLog<S> {
    /// Open the log, creating it with its header if it does not exist yet.
    pub fn open(mut storage: S, file_name: &'static str) -> Result<Self, S::Error> {
        if !storage.exists(file_name)? {
            storage.create(file_name, HEADER.as_bytes())?;
        }
        Ok(Self {
            storage,
            file_name,
            rows_written: 0,
            rows_dropped: 0,
        })
    }

    /// Append one row for `sample`. On failure the row is counted as dropped.
    pub fn append(&mut self, sample: &Sample) -> Result<(), S::Error> {
        let row = format_row(sample);
        match self.storage.append(self.file_name, row.as_bytes()) {
            Ok(()) => {
                self.rows_written = self.rows_written.wrapping_add(1);
                Ok(())
            }
            Err(e) => {
                self.rows_dropped = self.rows_dropped.wrapping_add(1);
                warn!(
                    "{}: row dropped ({} so far): {:?}",
                    self.file_name, self.rows_dropped, e
                );
                Err(e)
            }
        }
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    pub fn rows_written(&self) -> u32 {
        self.rows_written
    }

    pub fn rows_dropped(&self) -> u32 {
        self.rows_dropped
    }

    pub fn release(self) -> S {
        self.storage
    }
}
