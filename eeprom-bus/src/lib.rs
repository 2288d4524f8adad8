#![no_std]
#![deny(missing_docs)]
//! # eeprom-bus
//! A no-std transport contract for serial EEPROMs hanging off an I2C bus.
//!
//! EEPROM drivers need a little more control over bus framing than a plain
//! register device: the random-read protocol sends the memory address without
//! releasing the bus, so the following read happens under a repeated start.
//! The [EepromBus] trait exposes exactly the two framed transfers such a driver
//! needs, each with an explicit stop flag. [EepromBusAsync] is the async flavour.
//!
//! [HalBus] and [HalBusAsync] implement the contract for any bus implementing the
//! [`embedded_hal::i2c::I2c`] or [`embedded_hal_async::i2c::I2c`] traits.

extern crate alloc;

mod hal;
mod hal_async;
mod traits;
mod traits_async;

pub use hal::HalBus;
pub use hal_async::HalBusAsync;
pub use traits::EepromBus;
pub use traits_async::EepromBusAsync;

/// Largest valid 7-bit I2C device address.
pub const MAX_SEVEN_BIT_ADDRESS: u8 = 0x7f;
