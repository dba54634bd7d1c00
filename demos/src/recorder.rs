//! Embassy MPU6050 Recorder Firmware
//!
//! Samples an MPU6050 about three times a second while a recording session is
//! open, printing each sample on UART0 and appending it to `DATA.CSV` on an SD card.
//!
//! Hardware Setup (Raspberry Pi Pico 2):
//! - MPU6050 on I2C0: SDA -> GP4, SCL -> GP5
//! - SD card on SPI0: CLK -> GP18, MOSI -> GP19, MISO -> GP16, CS -> GP17
//! - Buttons to GND: Start -> GP13, Stop -> GP14, Info -> GP15
//! - Console on UART0 TX -> GP0, 115200 baud
//!
//! The status "display" is the RTT log: every status message is printed there.
//! If the SD card is missing the recorder keeps streaming to the console.
//! Library warnings are forwarded to RTT, and the fault counters are printed
//! whenever a read fails or a row is dropped.

#![no_std]
#![no_main]

use core::fmt;

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_rp::{
    block::ImageDef,
    gpio::{Input, Level, Output, Pull},
    i2c::{self, I2c, InterruptHandler},
    spi::{self, Spi},
    uart::{self, UartTx},
};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use embedded_sdmmc::{SdCard, TimeSource, Timestamp, VolumeManager};
use {defmt_rtt as _, panic_probe as _};

use mpu6050_recorder::{
    address::Address,
    buttons::ButtonPins,
    config::RecorderConfig,
    display::StatusDisplay,
    recorder::Recorder,
    sdmmc::SdmmcStorage,
    sensor_async::Mpu6050,
};

/// Also print the counters this often, even without new faults.
const STATS_EVERY_TICKS: u32 = 180;

embassy_rp::bind_interrupts!(struct Irqs {
    I2C0_IRQ => InterruptHandler<embassy_rp::peripherals::I2C0>;
});

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// No RTC on the board: every file gets the same timestamp.
struct FixedClock;

impl TimeSource for FixedClock {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 55,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

/// Forwards `log` records from the library to defmt.
struct DefmtLogger;

impl log::Log for DefmtLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let args = defmt::Display2Format(record.args());
        match record.level() {
            log::Level::Error => error!("{}", args),
            log::Level::Warn => warn!("{}", args),
            _ => info!("{}", args),
        }
    }

    fn flush(&self) {}
}

static LOGGER: DefmtLogger = DefmtLogger;

/// Status text goes to the RTT log.
struct RttDisplay;

impl StatusDisplay for RttDisplay {
    fn show_message(&mut self, text: &str) {
        info!("[display] {}", text);
    }
}

/// Text console over any blocking byte sink.
struct SerialConsole<W>(W);

impl<W: embedded_io::Write> fmt::Write for SerialConsole<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }

    let bus = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c::Config::default());
    let mut sensor = match Mpu6050::new(bus, Address::default()).await {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("MPU6050 did not wake: {}", defmt::Debug2Format(&e));
            halt().await
        }
    };
    info!("MPU6050 awake");

    let mut uart_config = uart::Config::default();
    uart_config.baudrate = 115_200;
    let console = SerialConsole(UartTx::new_blocking(p.UART0, p.PIN_0, uart_config));

    let buttons = ButtonPins::active_low(
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    );

    // SD cards must be initialised at 400 kHz
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 400_000;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let Ok(spi_dev) = ExclusiveDevice::new(spi, cs, Delay) else {
        error!("SPI device setup failed");
        halt().await
    };
    let storage = SdmmcStorage::new(VolumeManager::new(SdCard::new(spi_dev, Delay), FixedClock));

    let config = RecorderConfig::default();
    let mut recorder =
        match Recorder::with_storage(RttDisplay, buttons, console, storage, config) {
            Ok(recorder) => recorder,
            Err(e) => {
                error!("storage unavailable: {}", defmt::Debug2Format(&e));
                halt().await
            }
        };
    recorder.start();

    let mut reported = recorder.stats();
    loop {
        recorder.tick_and_wait_async(&mut sensor, &mut Delay).await;
        let stats = recorder.stats();
        if stats.has_new_faults(&reported) {
            warn!("faults: {}", stats);
            reported = stats;
        } else if stats.ticks % STATS_EVERY_TICKS == 0 {
            info!("stats: {}", stats);
        }
    }
}

async fn halt() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}
