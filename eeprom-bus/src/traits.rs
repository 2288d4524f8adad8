/// Framed byte transfers on an I2C-like bus.
///
/// Implementations are responsible for serializing access to the bus: interleaving
/// two callers' frames corrupts both transfers.
pub trait EepromBus {
    /// The error type returned by the transport.
    ///
    /// A write that was not fully accepted by the device must be reported through
    /// this type as well.
    type Error;

    /// Writes `bytes` to the device at the 7-bit `address`.
    ///
    /// # Arguments
    /// * `address` - 7-bit device address.
    /// * `bytes` - Bytes to send after the address byte.
    /// * `stop` - Whether to terminate the transfer with a stop condition. When `false`
    ///   the bus is kept, and the next transfer begins with a repeated start.
    ///
    /// # Errors
    /// This method returns an error if the transfer fails or is cut short.
    fn bus_write(&mut self, address: u8, bytes: &[u8], stop: bool) -> Result<(), Self::Error>;

    /// Reads up to `buffer.len()` bytes from the device at the 7-bit `address`.
    ///
    /// # Returns
    /// The number of bytes actually placed in `buffer`, which may be less than requested.
    ///
    /// # Errors
    /// This method returns an error if the transfer fails.
    fn bus_read(&mut self, address: u8, buffer: &mut [u8], stop: bool)
    -> Result<usize, Self::Error>;
}

impl<T: EepromBus + ?Sized> EepromBus for &mut T {
    type Error = T::Error;

    fn bus_write(&mut self, address: u8, bytes: &[u8], stop: bool) -> Result<(), Self::Error> {
        T::bus_write(self, address, bytes, stop)
    }

    fn bus_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        stop: bool,
    ) -> Result<usize, Self::Error> {
        T::bus_read(self, address, buffer, stop)
    }
}
