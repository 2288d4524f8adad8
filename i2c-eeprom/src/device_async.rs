use crate::{
    ChipDescriptor, EepromResult,
    chunks::plan_chunks,
    frame::{address_header, build_frame},
};
use alloc::{vec, vec::Vec};
use eeprom_bus::EepromBusAsync;
use embedded_hal_async::delay::DelayNs;

/// A serial EEPROM on an I2C-like bus, driven asynchronously.
///
/// Takes ownership of a transport (implementing [EepromBusAsync]) and a timer object
/// implementing the [`DelayNs`](embedded_hal_async::delay::DelayNs) trait.
pub struct EepromDeviceAsync<B, D> {
    pub(crate) bus: B,
    pub(crate) delay: D,
    pub(crate) chip: ChipDescriptor,
}

impl<B, D> EepromDeviceAsync<B, D> {
    /// Creates a new instance of [EepromDeviceAsync] for the described chip.
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

impl<B: EepromBusAsync, D: DelayNs> EepromDeviceAsync<B, D> {
    /// Writes `payload` starting at memory `address`, one page-bounded transfer at a time.
    ///
    /// See [EepromDevice::write](crate::EepromDevice::write).
    pub async fn write(&mut self, address: u16, payload: &[u8]) -> EepromResult<(), B::Error> {
        self.chip.check_range::<B::Error>(address, payload.len())?;
        log::debug!(
            "EEPROM 0x{:02x}: write {} bytes at 0x{:04x}",
            self.chip.bus_address,
            payload.len(),
            address
        );
        for chunk in plan_chunks(address, payload, self.chip.page_size) {
            let frame = build_frame(chunk.address, chunk.payload);
            self.bus
                .bus_write(self.chip.bus_address, &frame, true)
                .await?;
            self.delay.delay_us(self.chip.write_cycle_us()).await;
        }
        Ok(())
    }

    /// Reads `length` bytes starting at memory `address`.
    ///
    /// See [EepromDevice::read](crate::EepromDevice::read).
    pub async fn read(&mut self, address: u16, length: usize) -> EepromResult<Vec<u8>, B::Error> {
        let mut data = vec![0; length];
        let count = self.read_into(address, &mut data).await?;
        data.truncate(count);
        Ok(data)
    }

    /// Fills `buffer` with memory starting at `address`, returning the number of bytes delivered.
    pub async fn read_into(
        &mut self,
        address: u16,
        buffer: &mut [u8],
    ) -> EepromResult<usize, B::Error> {
        if buffer.is_empty() {
            return Ok(0);
        }
        self.chip.check_range::<B::Error>(address, buffer.len())?;
        self.bus
            .bus_write(self.chip.bus_address, &address_header(address), false)
            .await?;
        let count = self
            .bus
            .bus_read(self.chip.bus_address, buffer, true)
            .await?
            .min(buffer.len());
        if count < buffer.len() {
            log::warn!("short read: {}/{} bytes", count, buffer.len());
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        EepromBuilder, EepromError,
        testing::{BusFault, Call, RecordingDelay, SimulatedChip},
    };
    use alloc::vec;
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };
    use eeprom_bus::HalBusAsync;

    fn small_chip() -> EepromBuilder {
        EepromBuilder::default().with_capacity(256).with_page_size(32)
    }

    #[test]
    fn write_splits_at_page_boundary() {
        let mut chip = SimulatedChip::new(256, 32);
        let mut delay = RecordingDelay::default();
        let mut dev = small_chip().build_async(&mut chip, &mut delay).unwrap();
        block_on(dev.write(0x001e, &[0x01, 0x02, 0x03, 0x04])).unwrap();
        assert_eq!(
            chip.calls,
            [
                Call::write(0x50, &[0x00, 0x1e, 0x01, 0x02], true),
                Call::write(0x50, &[0x00, 0x20, 0x03, 0x04], true),
            ]
        );
        assert_eq!(delay.waits_us, [5000, 5000]);
    }

    #[test]
    fn read_with_short_transfer() {
        let mut chip = SimulatedChip::new(256, 32);
        chip.memory[0x10..0x14].copy_from_slice(&[1, 2, 3, 4]);
        chip.read_limit = Some(3);
        let mut dev = small_chip()
            .build_async(&mut chip, NoopDelay::new())
            .unwrap();
        assert_eq!(block_on(dev.read(0x10, 4)).unwrap(), [1, 2, 3]);
        assert!(block_on(dev.read(0x10, 0)).unwrap().is_empty());
        assert_eq!(
            chip.calls,
            [Call::write(0x50, &[0x00, 0x10], false), Call::read(0x50, 4, true)]
        );
    }

    #[test]
    fn range_and_bus_errors() {
        let mut chip = SimulatedChip::new(256, 32);
        chip.fail_write = Some(0);
        let mut dev = small_chip()
            .build_async(&mut chip, NoopDelay::new())
            .unwrap();
        assert!(matches!(
            block_on(dev.write(250, &[0; 10])),
            Err(EepromError::OutOfRange { .. })
        ));
        assert_eq!(block_on(dev.write(0, &[1])), Err(EepromError::Bus(BusFault)));
        assert_eq!(chip.calls.len(), 1);
    }

    #[test]
    fn out_of_range_read_touches_nothing() {
        let mut chip = SimulatedChip::new(256, 32);
        let mut dev = small_chip()
            .build_async(&mut chip, NoopDelay::new())
            .unwrap();
        assert!(matches!(
            block_on(dev.read(0xff, 2)),
            Err(EepromError::OutOfRange { .. })
        ));
        let mut buf = [0u8; 300];
        assert!(matches!(
            block_on(dev.read_into(0, &mut buf)),
            Err(EepromError::OutOfRange { .. })
        ));
        assert!(chip.calls.is_empty());
    }

    #[test]
    fn round_trip_over_embedded_hal_async() {
        let expectations = [
            I2cTransaction::write(0x50, vec![0x00, 0x1f, 0xde]),
            I2cTransaction::write(0x50, vec![0x00, 0x20, 0xad]),
            I2cTransaction::write_read(0x50, vec![0x00, 0x1f], vec![0xde, 0xad]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = EepromBuilder::default()
            .build_async(HalBusAsync::new(&mut i2c), NoopDelay::new())
            .unwrap();
        block_on(async {
            dev.write(0x001f, &[0xde, 0xad]).await.unwrap();
            assert_eq!(dev.read(0x001f, 2).await.unwrap(), [0xde, 0xad]);
        });
        drop(dev);
        i2c.done();
    }
}
