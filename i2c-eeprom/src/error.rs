use core::fmt;

#[derive(Debug, PartialEq, Eq)]
/// EEPROM access errors
pub enum EepromError<E> {
    /// A required input is missing or malformed.
    InvalidArgument(&'static str),
    /// The requested range does not fit the chip.
    OutOfRange {
        /// First memory address of the request.
        address: u16,
        /// Number of bytes requested.
        length: usize,
        /// Capacity of the chip in bytes.
        capacity: u32,
    },
    /// Bus transport errors.
    Bus(E),
}

impl<E> From<E> for EepromError<E> {
    fn from(value: E) -> Self {
        Self::Bus(value)
    }
}

impl<E: fmt::Debug> fmt::Display for EepromError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::OutOfRange {
                address,
                length,
                capacity,
            } => write!(
                f,
                "range 0x{address:04x}+{length} exceeds capacity of {capacity} bytes"
            ),
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for EepromError<E> {}
