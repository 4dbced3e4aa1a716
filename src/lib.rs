//! A simple Driver for the Good Display GDEY075Z08 black/white/red E-Ink Display via SPI
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1
//!
//! The crate has two halves:
//!
//! - [encoder] turns an 8-bit grayscale image into the two bitplanes the panel wants.
//!   Everything between two thresholds becomes red, see [config::RedBounds].
//! - [gdey075z08] drives the panel: initialization, frame transfer, refresh, deep sleep.
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - 2MHz is what the vendor drivers use, see [SPI_FREQUENCY_HZ]
//! - Chip select is handled by the [SpiDevice](embedded_hal::spi::SpiDevice)
//!
//! ### Other....
//!
//! - Buffersize: a bitplane is always `800 / 8 * 480` bytes, see
//!   [BUFFER_SIZE](gdey075z08::BUFFER_SIZE)
//! - The busy line is low while the panel works
//!
//! # Features
//!
//! - `alloc` (default): owned [Bitplanes](encoder::Bitplanes) and
//!   [display_image](gdey075z08::Gdey075z08::display_image)
//! - `graphics` (default): [embedded-graphics] support via [graphics::GrayDisplay]
//! - `serde`: (de)serialization of the [configuration](config::Config)
//!
//! [embedded-graphics]: https://docs.rs/embedded-graphics
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(feature = "graphics")]
pub mod graphics;

mod traits;
pub use traits::GrayscaleSource;

pub mod color;
pub mod config;
pub mod encoder;
pub mod error;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod gdey075z08;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::color::PixelClass;
    pub use crate::config::{BusyWait, Config, ConfigError, RedBounds};
    pub use crate::encoder::{encode_frame_into, EncodeError, GrayImage};
    pub use crate::error::ErrorKind;
    pub use crate::gdey075z08::{Gdey075z08, Operation, Phase};
    pub use crate::traits::GrayscaleSource;
    pub use crate::SPI_MODE;

    #[cfg(feature = "alloc")]
    pub use crate::encoder::{encode_frame, Bitplanes};

    #[cfg(feature = "graphics")]
    pub use crate::graphics::{DisplayRotation, GrayDisplay};
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// SPI clock used by the vendor drivers
pub const SPI_FREQUENCY_HZ: u32 = 2_000_000;
