//! SHT20 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the Sensirion SHT20 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Hold-master reads, plus CRC-checked and no-hold variants
//! - Status flag decoding and resolution configuration
//! - Designed for `no_std` environments
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for bus access
//! - [`DelayNs`] for soft reset and no-hold polling
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and traces register reads
//!
//! # Example
//!
//! ```ignore
//! let mut sht20 = Sht20::new(i2c);
//! let humidity = sht20.read_humidity()?;
//! let temperature = sht20.read_temperature()?;
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod register;
pub mod sht20;

pub use error::Sht20Error;
pub use register::{Resolution, StatusFlags};
pub use sht20::{Sht20, humidity_from_raw, temperature_from_raw};
