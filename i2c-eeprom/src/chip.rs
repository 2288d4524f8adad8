use crate::{EepromDevice, EepromDeviceAsync, EepromError, EepromResult};
use core::{num::NonZeroU16, time::Duration};
use eeprom_bus::{EepromBus, EepromBusAsync, MAX_SEVEN_BIT_ADDRESS};

/// Largest capacity reachable with a two-byte address header.
pub const MAX_CAPACITY: u32 = 1 << 16;

/// Default 7-bit bus address of 24Cxx parts with all address pins tied low.
pub const DEFAULT_BUS_ADDRESS: u8 = 0x50;

/// Default write-cycle time of 24Cxx parts.
pub const DEFAULT_WRITE_CYCLE: Duration = Duration::from_millis(5);

/// Common two-byte addressed EEPROM parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// 32 Kbit, 32 byte pages.
    At24c32,
    /// 64 Kbit, 32 byte pages.
    At24c64,
    /// 128 Kbit, 64 byte pages.
    At24c128,
    /// 256 Kbit, 64 byte pages.
    At24c256,
    /// 512 Kbit, 128 byte pages.
    At24c512,
}

impl Chip {
    /// Capacity in bytes.
    pub const fn capacity(self) -> u32 {
        match self {
            Chip::At24c32 => 4 * 1024,
            Chip::At24c64 => 8 * 1024,
            Chip::At24c128 => 16 * 1024,
            Chip::At24c256 => 32 * 1024,
            Chip::At24c512 => 64 * 1024,
        }
    }

    /// Page size in bytes.
    pub const fn page_size(self) -> u16 {
        match self {
            Chip::At24c32 | Chip::At24c64 => 32,
            Chip::At24c128 | Chip::At24c256 => 64,
            Chip::At24c512 => 128,
        }
    }
}

/// Immutable parameters of one EEPROM chip.
///
/// Obtained from [EepromBuilder::descriptor], which rejects malformed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipDescriptor {
    pub(crate) bus_address: u8,
    pub(crate) capacity: u32,
    pub(crate) page_size: NonZeroU16,
    pub(crate) write_cycle: Duration,
}

impl ChipDescriptor {
    /// 7-bit bus address of the chip.
    pub fn bus_address(&self) -> u8 {
        self.bus_address
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Page size in bytes.
    pub fn page_size(&self) -> u16 {
        self.page_size.get()
    }

    /// Time the chip needs after each page write.
    pub fn write_cycle(&self) -> Duration {
        self.write_cycle
    }

    pub(crate) fn write_cycle_us(&self) -> u32 {
        u32::try_from(self.write_cycle.as_nanos().div_ceil(1000)).unwrap_or(u32::MAX)
    }

    /// Checks that `length` bytes starting at `address` fit in the chip.
    pub fn check_range<E>(&self, address: u16, length: usize) -> EepromResult<(), E> {
        validate_range(address, length, self.capacity)
    }
}

/// Fails with [EepromError::OutOfRange] when `address + length` exceeds `capacity`.
///
/// The sum is computed without wraparound. A zero length always passes as long
/// as `address` itself does not lie past the end.
pub fn validate_range<E>(address: u16, length: usize, capacity: u32) -> EepromResult<(), E> {
    let fits = (address as u64)
        .checked_add(length as u64)
        .is_some_and(|end| end <= capacity as u64);
    if !fits {
        log::warn!(
            "Range 0x{:04x}+{} exceeds capacity ({} bytes)",
            address,
            length,
            capacity
        );
        return Err(EepromError::OutOfRange {
            address,
            length,
            capacity,
        });
    }
    Ok(())
}

/// Builder for creating an [EepromDevice] or [EepromDeviceAsync] with custom chip parameters.
///
/// Defaults to an [At24c64](Chip::At24c64) at address `0x50`.
#[derive(Debug, Clone, Copy)]
pub struct EepromBuilder {
    pub(crate) bus_address: u8,
    pub(crate) capacity: u32,
    pub(crate) page_size: u16,
    pub(crate) write_cycle: Duration,
}

impl Default for EepromBuilder {
    fn default() -> Self {
        Chip::At24c64.into()
    }
}

impl From<Chip> for EepromBuilder {
    fn from(chip: Chip) -> Self {
        EepromBuilder {
            bus_address: DEFAULT_BUS_ADDRESS,
            capacity: chip.capacity(),
            page_size: chip.page_size(),
            write_cycle: DEFAULT_WRITE_CYCLE,
        }
    }
}

impl EepromBuilder {
    /// Sets the 7-bit bus address.
    pub fn with_bus_address(mut self, bus_address: u8) -> Self {
        self.bus_address = bus_address;
        self
    }

    /// Sets the capacity in bytes.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the page size in bytes.
    pub fn with_page_size(mut self, page_size: u16) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the wait after every page write.
    pub fn with_write_cycle(mut self, write_cycle: Duration) -> Self {
        self.write_cycle = write_cycle;
        self
    }

    /// Validates the parameters and produces a [ChipDescriptor].
    ///
    /// # Errors
    /// [EepromError::InvalidArgument] if the bus address does not fit in 7 bits, the
    /// page size is zero, or the capacity exceeds what a 16-bit address can reach.
    pub fn descriptor<E>(&self) -> EepromResult<ChipDescriptor, E> {
        if self.bus_address > MAX_SEVEN_BIT_ADDRESS {
            return Err(EepromError::InvalidArgument("bus address exceeds 7 bits"));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(EepromError::InvalidArgument(
                "capacity exceeds 16-bit address space",
            ));
        }
        let page_size = NonZeroU16::new(self.page_size)
            .ok_or(EepromError::InvalidArgument("page size is zero"))?;
        Ok(ChipDescriptor {
            bus_address: self.bus_address,
            capacity: self.capacity,
            page_size,
            write_cycle: self.write_cycle,
        })
    }

    /// Builds a new [EepromDevice] on a blocking bus.
    pub fn build<B: EepromBus, D: embedded_hal::delay::DelayNs>(
        self,
        bus: B,
        delay: D,
    ) -> EepromResult<EepromDevice<B, D>, B::Error> {
        Ok(EepromDevice::new(bus, delay, self.descriptor::<B::Error>()?))
    }

    /// Builds a new [EepromDeviceAsync] on an async bus.
    pub fn build_async<B: EepromBusAsync, D: embedded_hal_async::delay::DelayNs>(
        self,
        bus: B,
        delay: D,
    ) -> EepromResult<EepromDeviceAsync<B, D>, B::Error> {
        Ok(EepromDeviceAsync::new(bus, delay, self.descriptor::<B::Error>()?))
    }
}
