//! CLRC663 NFC reader driver with support for multiple transport backends.
//!
//! The driver polls the chip for ISO14443A tags, tracks tag presence and
//! absence as edge events, backs off exponentially on bus errors, and
//! supervises chip health with automatic reset recovery. It is written
//! against an abstract transport so the protocol logic never branches on
//! the bus kind.
//!
//! # Features
//!
//! - `i2c-esp32` - I2C transport for ESP32 using esp-idf-svc
//! - `spi-esp32` - SPI transport for ESP32 using esp-idf-svc
//! - `rpi` - SPI transport for Raspberry Pi using the rppal crate
//!
//! # Example
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Instant;
//!
//! use clrc663::{Clrc663, DEFAULT_I2C_ADDRESS, HealthConfig, I2cTransport, TagMatcher};
//!
//! let transport = I2cTransport::new(
//!     peripherals.i2c0,
//!     peripherals.pins.gpio21,
//!     peripherals.pins.gpio22,
//!     DEFAULT_I2C_ADDRESS,
//! )?;
//! let mut reader = Clrc663::new(transport, HealthConfig::default());
//!
//! reader.add_on_tag_callback(|uid| println!("Tag seen: {}", uid));
//! reader.add_on_tag_removed_callback(|uid| println!("Tag removed: {}", uid));
//!
//! let badge = Rc::new(RefCell::new(TagMatcher::new(vec![0x04, 0xA1, 0xB2, 0xC3])));
//! reader.register_tag(badge.clone());
//!
//! reader.setup()?;
//!
//! let start = Instant::now();
//! loop {
//!     let now = start.elapsed().as_millis() as u64;
//!     reader.tick(now);
//!     reader.poll(now);
//!     std::thread::sleep(std::time::Duration::from_secs(1));
//! }
//! ```

mod backoff;
mod health;
mod reader;
mod register;
mod tag;
mod transport;
mod types;

#[cfg(feature = "i2c-esp32")]
mod i2c;

#[cfg(feature = "spi-esp32")]
mod spi;

#[cfg(feature = "rpi")]
mod rpi;

// Re-exports
pub use health::HealthConfig;
pub use reader::Clrc663;
pub use tag::TagMatcher;
pub use transport::NfcTransport;
pub use types::{Clrc663Error, ErrorCode};

#[cfg(feature = "i2c-esp32")]
pub use i2c::{DEFAULT_I2C_ADDRESS, I2cTransport};

#[cfg(feature = "spi-esp32")]
pub use spi::SpiTransport;

#[cfg(feature = "rpi")]
pub use rpi::PiSpiTransport;
