//! The recorder: a fixed-period loop that polls the buttons, advances the
//! recording state machine and, while recording, reads one sample and fans it
//! out to the console and then to the CSV log.
//!
//! All state lives in [`Recorder`]; peripherals are injected, so the whole
//! pipeline runs against fakes in tests. The sensor is lent to each tick
//! rather than owned, which lets the same recorder drive either the blocking
//! or the async driver.

use core::convert::Infallible;
use core::fmt::{Debug, Write};

use embedded_hal::{delay, i2c};
use embedded_hal_async::{delay as async_delay, i2c as async_i2c};
use log::{debug, info, warn};

use crate::{
    buttons::ButtonInput,
    config::{RecorderConfig, StorageFailurePolicy},
    console::ConsoleSink,
    csv_log::CsvLog,
    display::{StatusDisplay, STORAGE_UNAVAILABLE_MESSAGE, WELCOME_MESSAGE},
    error::{Error, RecorderError},
    sample::Sample,
    sensor, sensor_async,
    state::RecordingState,
    storage::Storage,
};

/// What a single tick did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub enum TickOutcome {
    /// Not recording; only the buttons were polled.
    Idle,
    /// A sample was read and handed to every active sink.
    Published(Sample),
    /// The burst read failed; nothing was published this tick.
    ReadFailed,
}

/// Running counters, reset only by a restart.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-03", derive(defmt::Format))]
pub struct RecorderStats {
    pub ticks: u32,
    pub samples_published: u32,
    pub read_failures: u32,
    pub rows_written: u32,
    pub rows_dropped: u32,
}

impl RecorderStats {
    /// Whether reads failed or rows were dropped since `earlier` was taken.
    pub fn has_new_faults(&self, earlier: &RecorderStats) -> bool {
        self.read_failures != earlier.read_failures || self.rows_dropped != earlier.rows_dropped
    }
}

/// Storage for a recorder built without a persistent log.
pub struct NoStorage;

impl Storage for NoStorage {
    type Error = Infallible;

    fn exists(&mut self, _name: &str) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn create(&mut self, _name: &str, _contents: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn append(&mut self, _name: &str, _contents: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct Recorder<D, B, W, S> {
    display: D,
    buttons: B,
    console: ConsoleSink<W>,
    log: Option<CsvLog<S>>,
    storage_lost: bool,
    state: RecordingState,
    config: RecorderConfig,
    ticks: u32,
    samples_published: u32,
    read_failures: u32,
}

impl<D, B, W> Recorder<D, B, W, NoStorage>
where
    D: StatusDisplay,
    B: ButtonInput,
    W: Write,
{
    /// A recorder that only streams to the console.
    pub fn console_only(display: D, buttons: B, console: W, config: RecorderConfig) -> Self {
        Self::new(display, buttons, console, None, config)
    }
}

impl<D, B, W, S> Recorder<D, B, W, S>
where
    D: StatusDisplay,
    B: ButtonInput,
    W: Write,
    S: Storage,
{
    pub fn new(
        display: D,
        buttons: B,
        console: W,
        log: Option<CsvLog<S>>,
        config: RecorderConfig,
    ) -> Self {
        Self {
            display,
            buttons,
            console: ConsoleSink::new(console),
            log,
            storage_lost: false,
            state: RecordingState::Idle,
            config,
            ticks: 0,
            samples_published: 0,
            read_failures: 0,
        }
    }

    /// Open the CSV log on `storage` and build the recorder around it.
    ///
    /// If the log cannot be opened, the configured [`StorageFailurePolicy`]
    /// decides: `Halt` hands the error back, `ConsoleOnly` carries on
    /// without the persistent sink.
    pub fn with_storage(
        display: D,
        buttons: B,
        console: W,
        storage: S,
        config: RecorderConfig,
    ) -> Result<Self, RecorderError<S::Error>> {
        match CsvLog::open(storage, config.log_file) {
            Ok(log) => Ok(Self::new(display, buttons, console, Some(log), config)),
            Err(e) => match config.storage_failure {
                StorageFailurePolicy::Halt => Err(RecorderError::StorageUnavailable(e)),
                StorageFailurePolicy::ConsoleOnly => {
                    warn!("{}: storage unavailable, console only: {:?}", config.log_file, e);
                    let mut recorder = Self::new(display, buttons, console, None, config);
                    recorder.storage_lost = true;
                    Ok(recorder)
                }
            },
        }
    }

    /// Show the welcome text (and the storage status, if the log was lost).
    pub fn start(&mut self) {
        info!(
            "recorder started, tick {} ms, log {}",
            self.config.tick_period_ms,
            if self.log.is_some() { self.config.log_file } else { "off" }
        );
        self.display.show_message(WELCOME_MESSAGE);
        if self.storage_lost {
            self.display.show_message(STORAGE_UNAVAILABLE_MESSAGE);
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    pub fn stats(&self) -> RecorderStats {
        let (rows_written, rows_dropped) = self
            .log
            .as_ref()
            .map_or((0, 0), |log| (log.rows_written(), log.rows_dropped()));
        RecorderStats {
            ticks: self.ticks,
            samples_published: self.samples_published,
            read_failures: self.read_failures,
            rows_written,
            rows_dropped,
        }
    }

    /// Poll the buttons once and apply at most one transition.
    pub fn poll_input(&mut self) -> RecordingState {
        let transition = self.state.on_edges(self.buttons.poll_edges());
        if let Some(message) = transition.message {
            self.display.show_message(message);
        }
        if transition.state != self.state {
            info!("{:?} -> {:?}", self.state, transition.state);
        }
        self.state = transition.state;
        self.state
    }

    /// Fan one sample out: console first, then the CSV log if there is one.
    pub fn publish(&mut self, sample: &Sample) {
        self.console.publish(sample);
        if let Some(log) = self.log.as_mut() {
            // failures are counted by the log itself
            let _ = log.append(sample);
        }
        self.samples_published = self.samples_published.wrapping_add(1);
        debug!("published {:?}", sample);
    }

    fn begin_tick(&mut self) -> bool {
        self.ticks = self.ticks.wrapping_add(1);
        self.poll_input().is_recording()
    }

    fn finish_tick<E: Debug>(&mut self, read: Result<Sample, Error<E>>) -> TickOutcome {
        match read {
            Ok(sample) => {
                self.publish(&sample);
                TickOutcome::Published(sample)
            }
            Err(e) => {
                self.read_failures = self.read_failures.wrapping_add(1);
                warn!("sensor read failed ({} so far): {:?}", self.read_failures, e);
                TickOutcome::ReadFailed
            }
        }
    }

    /// One tick's work, without the trailing delay.
    pub fn tick<I: i2c::I2c>(&mut self, sensor: &mut sensor::Mpu6050<I>) -> TickOutcome {
        if !self.begin_tick() {
            return TickOutcome::Idle;
        }
        let read = sensor.read_sample();
        self.finish_tick(read)
    }

    pub async fn tick_async<I: async_i2c::I2c>(
        &mut self,
        sensor: &mut sensor_async::Mpu6050<I>,
    ) -> TickOutcome {
        if !self.begin_tick() {
            return TickOutcome::Idle;
        }
        let read = sensor.read_sample().await;
        self.finish_tick(read)
    }

    /// One tick followed by the fixed post-tick delay.
    pub fn tick_and_wait<I: i2c::I2c>(
        &mut self,
        sensor: &mut sensor::Mpu6050<I>,
        delay: &mut impl delay::DelayNs,
    ) -> TickOutcome {
        let outcome = self.tick(sensor);
        delay.delay_ms(self.config.tick_period_ms);
        outcome
    }

    pub async fn tick_and_wait_async<I: async_i2c::I2c>(
        &mut self,
        sensor: &mut sensor_async::Mpu6050<I>,
        delay: &mut impl async_delay::DelayNs,
    ) -> TickOutcome {
        let outcome = self.tick_async(sensor).await;
        delay.delay_ms(self.config.tick_period_ms).await;
        outcome
    }

    /// Run for the lifetime of the device.
    pub fn run<I: i2c::I2c>(
        &mut self,
        sensor: &mut sensor::Mpu6050<I>,
        delay: &mut impl delay::DelayNs,
    ) -> ! {
        loop {
            self.tick_and_wait(sensor, delay);
        }
    }

    pub async fn run_async<I: async_i2c::I2c>(
        &mut self,
        sensor: &mut sensor_async::Mpu6050<I>,
        delay: &mut impl async_delay::DelayNs,
    ) -> ! {
        loop {
            self.tick_and_wait_async(sensor, delay).await;
        }
    }
}
