#![allow(async_fn_in_trait)]

/// Framed byte transfers on an I2C-like bus, asynchronously.
///
/// See [EepromBus](crate::EepromBus) for the meaning of each operation.
pub trait EepromBusAsync {
    /// The error type returned by the transport.
    type Error;

    /// Writes `bytes` to the device at the 7-bit `address`, asserting a stop
    /// condition at the end only when `stop` is set.
    ///
    /// # Errors
    /// This method returns an error if the transfer fails or is cut short.
    async fn bus_write(&mut self, address: u8, bytes: &[u8], stop: bool)
    -> Result<(), Self::Error>;

    /// Reads up to `buffer.len()` bytes from the device at the 7-bit `address`.
    ///
    /// # Returns
    /// The number of bytes actually placed in `buffer`.
    ///
    /// # Errors
    /// This method returns an error if the transfer fails.
    async fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        stop: bool,
    ) -> Result<usize, Self::Error>;
}

impl<T: EepromBusAsync + ?Sized> EepromBusAsync for &mut T {
    type Error = T::Error;

    async fn bus_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        stop: bool,
    ) -> Result<(), Self::Error> {
        T::bus_write(self, address, bytes, stop).await
    }

    async fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        stop: bool,
    ) -> Result<usize, Self::Error> {
        T::bus_read(self, address, buffer, stop).await
    }
}
