//! Recorder configuration.
//!
//! There is no runtime configuration surface: the firmware builds a
//! [`RecorderConfig`] at compile time, starting from the defaults below.

/// Nominal delay between ticks, about three samples per second.
pub const DEFAULT_TICK_PERIOD_MS: u32 = 333;

/// Persistent log file, an 8.3 name so FAT volumes accept it.
pub const DEFAULT_LOG_FILE: &str = "DATA.CSV";

/// What to do when the persistent log cannot be opened at startup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum StorageFailurePolicy {
    /// Report the error to the caller, which is expected to stop.
    Halt,
    /// Show a status message and keep recording to the console only.
    #[default]
    ConsoleOnly,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RecorderConfig {
    /// Fixed delay after each tick's work, in milliseconds.
    pub tick_period_ms: u32,
    pub log_file: &'static str,
    pub storage_failure: StorageFailurePolicy,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            log_file: DEFAULT_LOG_FILE,
            storage_failure: StorageFailurePolicy::default(),
        }
    }
}

impl RecorderConfig {
    pub fn with_tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_period_ms = ms;
        self
    }

    pub fn with_log_file(mut self, name: &'static str) -> Self {
        self.log_file = name;
        self
    }

    pub fn with_storage_failure(mut self, policy: StorageFailurePolicy) -> Self {
        self.storage_failure = policy;
        self
    }
}
