use crate::{
    ChipDescriptor, EepromResult,
    chunks::plan_chunks,
    frame::{address_header, build_frame},
};
use alloc::{vec, vec::Vec};
use eeprom_bus::EepromBus;
use embedded_hal::delay::DelayNs;

/// A serial EEPROM on an I2C-like bus.
///
/// Takes ownership of a transport (implementing [EepromBus]) and a timer object
/// implementing the [`DelayNs`](embedded_hal::delay::DelayNs) trait. Every call
/// runs to completion on the caller's thread; writes block for the chip's
/// write cycle after each page.
pub struct EepromDevice<B, D> {
    pub(crate) bus: B,
    pub(crate) delay: D,
    pub(crate) chip: ChipDescriptor,
}

impl<B, D> EepromDevice<B, D> {
    /// Creates a new instance of [EepromDevice] for the described chip.
    pub fn new(bus: B, delay: D, chip: ChipDescriptor) -> Self {
        Self { bus, delay, chip }
    }

    /// Parameters of the chip.
    pub fn chip(&self) -> &ChipDescriptor {
        &self.chip
    }

    /// Gives back the transport and the timer.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: EepromBus, D: DelayNs> EepromDevice<B, D> {
    /// Writes `payload` starting at memory `address`.
    ///
    /// The payload is split so no bus transfer crosses a page boundary. Each chunk
    /// is sent as `[high][low][data...]` with a stop condition and followed by the
    /// write-cycle delay.
    ///
    /// # Errors
    /// [OutOfRange](crate::EepromError::OutOfRange) before any bus activity if the
    /// range does not fit the chip. [Bus](crate::EepromError::Bus) if a transfer
    /// fails; chunks written before the failure stay written and later chunks are
    /// not attempted.
    pub fn write(&mut self, address: u16, payload: &[u8]) -> EepromResult<(), B::Error> {
        self.chip.check_range::<B::Error>(address, payload.len())?;
        log::debug!(
            "EEPROM 0x{:02x}: write {} bytes at 0x{:04x}",
            self.chip.bus_address,
            payload.len(),
            address
        );
        for chunk in plan_chunks(address, payload, self.chip.page_size) {
            let frame = build_frame(chunk.address, chunk.payload);
            log::trace!(
                "page write 0x{:04x} ({} bytes)",
                chunk.address,
                chunk.payload.len()
            );
            self.bus.bus_write(self.chip.bus_address, &frame, true)?;
            self.delay.delay_us(self.chip.write_cycle_us());
        }
        Ok(())
    }

    /// Reads `length` bytes starting at memory `address`.
    ///
    /// A zero length returns immediately without touching the bus. If the transport
    /// delivers fewer bytes than requested, the shorter data is returned as is and
    /// no error is raised.
    ///
    /// # Errors
    /// [OutOfRange](crate::EepromError::OutOfRange) if the range does not fit the
    /// chip, [Bus](crate::EepromError::Bus) if a transfer fails.
    pub fn read(&mut self, address: u16, length: usize) -> EepromResult<Vec<u8>, B::Error> {
        let mut data = vec![0; length];
        let count = self.read_into(address, &mut data)?;
        data.truncate(count);
        Ok(data)
    }

    /// Fills `buffer` with memory starting at `address`.
    ///
    /// # Returns
    /// The number of bytes the transport delivered, at most `buffer.len()`.
    pub fn read_into(&mut self, address: u16, buffer: &mut [u8]) -> EepromResult<usize, B::Error> {
        if buffer.is_empty() {
            return Ok(0);
        }
        self.chip.check_range::<B::Error>(address, buffer.len())?;
        log::debug!(
            "EEPROM 0x{:02x}: read {} bytes at 0x{:04x}",
            self.chip.bus_address,
            buffer.len(),
            address
        );
        // no stop: the read must follow under a repeated start to keep the pointer
        self.bus
            .bus_write(self.chip.bus_address, &address_header(address), false)?;
        let count = self
            .bus
            .bus_read(self.chip.bus_address, buffer, true)?
            .min(buffer.len());
        if count < buffer.len() {
            // Tolerated on purpose: callers see the shorter length.
            log::warn!("short read: {}/{} bytes", count, buffer.len());
        }
        Ok(count)
    }
}
