use crate::EepromBusAsync;
use alloc::vec::Vec;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

/// [EepromBusAsync] implementation on top of an async
/// [`I2c`](embedded_hal_async::i2c::I2c) bus.
///
/// Behaves like [HalBus](crate::HalBus): an address phase written without a stop
/// condition is held and issued with the following read as one `write_read`.
pub struct HalBusAsync<I> {
    i2c: I,
    pending: Option<(u8, Vec<u8>)>,
}

impl<I> HalBusAsync<I> {
    /// Takes ownership of an async I2C bus.
    pub fn new(i2c: I) -> Self {
        Self { i2c, pending: None }
    }

    /// Gives the underlying bus back. A held address phase is discarded.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c<SevenBitAddress>> HalBusAsync<I> {
    async fn flush(&mut self) -> Result<(), I::Error> {
        if let Some((address, bytes)) = self.pending.take() {
            self.i2c.write(address, &bytes).await?;
        }
        Ok(())
    }
}

impl<I: I2c<SevenBitAddress>> EepromBusAsync for HalBusAsync<I> {
    type Error = I::Error;

    async fn bus_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        stop: bool,
    ) -> Result<(), Self::Error> {
        self.flush().await?;
        if stop {
            self.i2c.write(address, bytes).await
        } else {
            self.pending = Some((address, bytes.to_vec()));
            Ok(())
        }
    }

    async fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        _stop: bool,
    ) -> Result<usize, Self::Error> {
        match self.pending.take() {
            Some((held, header)) if held == address => {
                self.i2c.write_read(address, &header, buffer).await?;
            }
            Some((held, header)) => {
                self.i2c.write(held, &header).await?;
                self.i2c.read(address, buffer).await?;
            }
            None => self.i2c.read(address, buffer).await?,
        }
        Ok(buffer.len())
    }
}
