use crate::EepromBus;
use alloc::vec::Vec;
use embedded_hal::i2c::{I2c, SevenBitAddress};

/// [EepromBus] implementation on top of a blocking [`I2c`](embedded_hal::i2c::I2c) bus.
///
/// `embedded-hal` has no notion of a transfer that ends without a stop condition,
/// so a write issued with `stop == false` is held back and sent together with the
/// next read as a single [`write_read`](embedded_hal::i2c::I2c::write_read), which
/// joins both phases with a repeated start. Reads always end with a stop condition
/// and always fill the whole buffer.
pub struct HalBus<I> {
    i2c: I,
    pending: Option<(u8, Vec<u8>)>,
}

impl<I> HalBus<I> {
    /// Takes ownership of an I2C bus.
    pub fn new(i2c: I) -> Self {
        Self { i2c, pending: None }
    }

    /// Gives the underlying bus back. A held address phase is discarded.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c<SevenBitAddress>> HalBus<I> {
    fn flush(&mut self) -> Result<(), I::Error> {
        if let Some((address, bytes)) = self.pending.take() {
            self.i2c.write(address, &bytes)?;
        }
        Ok(())
    }
}

impl<I: I2c<SevenBitAddress>> EepromBus for HalBus<I> {
    type Error = I::Error;

    fn bus_write(&mut self, address: u8, bytes: &[u8], stop: bool) -> Result<(), Self::Error> {
        self.flush()?;
        if stop {
            self.i2c.write(address, bytes)
        } else {
            self.pending = Some((address, bytes.to_vec()));
            Ok(())
        }
    }

    fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        _stop: bool,
    ) -> Result<usize, Self::Error> {
        match self.pending.take() {
            Some((held, header)) if held == address => {
                self.i2c.write_read(address, &header, buffer)?;
            }
            Some((held, header)) => {
                self.i2c.write(held, &header)?;
                self.i2c.read(address, buffer)?;
            }
            None => self.i2c.read(address, buffer)?,
        }
        Ok(buffer.len())
    }
}
