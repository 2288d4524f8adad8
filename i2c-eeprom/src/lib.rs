#![no_std]
#![deny(missing_docs)]

/*! # i2c-eeprom
 *
 * Driver for serial EEPROMs with a two-byte memory address (24C32 through 24C512
 * and compatible parts) on top of the [eeprom_bus] transport contract.
 *
 * Writes are split at page boundaries and each page write is followed by the
 * chip's write-cycle delay. Reads use the random-read protocol: the address
 * phase is sent without a stop condition and the data is read under a
 * repeated start.
 */

extern crate alloc;

pub use eeprom_bus::{EepromBus, EepromBusAsync, HalBus, HalBusAsync};
mod chip;
mod chunks;
mod device;
mod device_async;
mod error;
mod frame;
#[cfg(test)]
mod testing;

pub use chip::{
    Chip, ChipDescriptor, DEFAULT_BUS_ADDRESS, DEFAULT_WRITE_CYCLE, EepromBuilder, MAX_CAPACITY,
    validate_range,
};
pub use chunks::{PageChunk, PageChunks, plan_chunks};
pub use device::EepromDevice;
pub use device_async::EepromDeviceAsync;
pub use error::EepromError;
pub use frame::{address_header, build_frame};

/// Results of EEPROM operations.
pub type EepromResult<T, E> = Result<T, EepromError<E>>;
