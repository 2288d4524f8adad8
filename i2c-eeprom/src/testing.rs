//! In-memory transport and timer used by the unit tests.

use alloc::{vec, vec::Vec};
use eeprom_bus::{EepromBus, EepromBusAsync};

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BusFault;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Write { address: u8, bytes: Vec<u8>, stop: bool },
    Read { address: u8, length: usize, stop: bool },
}

impl Call {
    pub(crate) fn write(address: u8, bytes: &[u8], stop: bool) -> Self {
        Call::Write {
            address,
            bytes: bytes.to_vec(),
            stop,
        }
    }

    pub(crate) fn read(address: u8, length: usize, stop: bool) -> Self {
        Call::Read {
            address,
            length,
            stop,
        }
    }
}

/// Behaves like a 24Cxx part: the address pointer wraps inside the current page
/// on writes and across the whole array on reads.
pub(crate) struct SimulatedChip {
    pub(crate) memory: Vec<u8>,
    pub(crate) calls: Vec<Call>,
    /// Deliver at most this many bytes per read.
    pub(crate) read_limit: Option<usize>,
    /// Index of the write call that fails.
    pub(crate) fail_write: Option<usize>,
    page_size: usize,
    pointer: usize,
    writes: usize,
}

impl SimulatedChip {
    pub(crate) fn new(capacity: usize, page_size: usize) -> Self {
        Self {
            memory: vec![0xff; capacity],
            calls: Vec::new(),
            read_limit: None,
            fail_write: None,
            page_size,
            pointer: 0,
            writes: 0,
        }
    }

    fn transfer_write(&mut self, address: u8, bytes: &[u8], stop: bool) -> Result<(), BusFault> {
        self.calls.push(Call::write(address, bytes, stop));
        let index = self.writes;
        self.writes += 1;
        if self.fail_write == Some(index) {
            return Err(BusFault);
        }
        let [high, low, data @ ..] = bytes else {
            return Err(BusFault);
        };
        self.pointer = u16::from_be_bytes([*high, *low]) as usize % self.memory.len();
        for &byte in data {
            self.memory[self.pointer] = byte;
            let base = self.pointer - self.pointer % self.page_size;
            self.pointer = base + (self.pointer + 1 - base) % self.page_size;
        }
        Ok(())
    }

    fn transfer_read(&mut self, address: u8, buffer: &mut [u8], stop: bool) -> usize {
        self.calls.push(Call::read(address, buffer.len(), stop));
        let count = buffer.len().min(self.read_limit.unwrap_or(usize::MAX));
        for byte in &mut buffer[..count] {
            *byte = self.memory[self.pointer];
            self.pointer = (self.pointer + 1) % self.memory.len();
        }
        count
    }
}

impl EepromBus for SimulatedChip {
    type Error = BusFault;

    fn bus_write(&mut self, address: u8, bytes: &[u8], stop: bool) -> Result<(), Self::Error> {
        self.transfer_write(address, bytes, stop)
    }

    fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        stop: bool,
    ) -> Result<usize, Self::Error> {
        Ok(self.transfer_read(address, buffer, stop))
    }
}

impl EepromBusAsync for SimulatedChip {
    type Error = BusFault;

    async fn bus_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        stop: bool,
    ) -> Result<(), Self::Error> {
        self.transfer_write(address, bytes, stop)
    }

    async fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        stop: bool,
    ) -> Result<usize, Self::Error> {
        Ok(self.transfer_read(address, buffer, stop))
    }
}

/// Records every requested wait in microseconds.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) waits_us: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns.div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms.saturating_mul(1000));
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns.div_ceil(1000));
    }

    async fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms.saturating_mul(1000));
    }
}
