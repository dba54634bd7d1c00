#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod buttons;
pub mod config;
pub mod console;
pub mod csv_log;
pub mod display;
pub mod error;
pub mod recorder;
pub mod registers;
pub mod sample;
#[cfg(feature = "sdmmc")]
pub mod sdmmc;
pub mod sensor;
pub mod sensor_async;
pub mod state;
pub mod storage;
pub mod temperature;

#[cfg(test)]
mod testing;
