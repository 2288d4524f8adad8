use alloc::vec::Vec;

/// Splits a memory address into the `[high, low]` header the chip expects.
#[inline]
pub const fn address_header(address: u16) -> [u8; 2] {
    address.to_be_bytes()
}

/// Builds the bus frame for a write: `[high][low]` followed by `payload`.
///
/// Performs no validation; the caller has already checked range and page alignment.
pub fn build_frame(address: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + 2);
    frame.extend_from_slice(&address_header(address));
    frame.extend_from_slice(payload);
    frame
}
