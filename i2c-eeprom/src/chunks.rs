use core::{iter::FusedIterator, num::NonZeroU16};

/// A slice of a write request that lies entirely within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChunk<'a> {
    /// Memory address of the first byte of the chunk.
    pub address: u16,
    /// Bytes to write starting at [`address`](PageChunk::address).
    pub payload: &'a [u8],
}

/// Iterator over the page-aligned chunks of a write request.
///
/// Created by [plan_chunks]. Chunks come out in ascending address order and
/// concatenate back to the original payload.
#[derive(Debug, Clone)]
pub struct PageChunks<'a> {
    address: u32,
    payload: &'a [u8],
    page_size: u32,
    offset: usize,
}

/// Splits `payload`, to be written at `address`, into chunks that never cross a
/// page boundary.
///
/// Most EEPROMs wrap the internal address counter at the end of a page, so a
/// single transfer crossing a boundary overwrites the start of that page. Each
/// chunk fills at most the rest of the page it starts in. An empty payload
/// yields no chunks.
///
/// Addresses past `0xffff` wrap; the range must be validated beforehand.
pub fn plan_chunks(address: u16, payload: &[u8], page_size: NonZeroU16) -> PageChunks<'_> {
    PageChunks {
        address: address as u32,
        payload,
        page_size: page_size.get() as u32,
        offset: 0,
    }
}

impl<'a> Iterator for PageChunks<'a> {
    type Item = PageChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.payload.len() - self.offset;
        if remaining == 0 {
            return None;
        }
        let current = self.address + self.offset as u32;
        let space_in_page = (self.page_size - current % self.page_size) as usize;
        let size = remaining.min(space_in_page);
        let chunk = PageChunk {
            address: current as u16,
            payload: &self.payload[self.offset..self.offset + size],
        };
        self.offset += size;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for PageChunks<'_> {
    fn len(&self) -> usize {
        let remaining = (self.payload.len() - self.offset) as u64;
        if remaining == 0 {
            return 0;
        }
        let page = self.page_size as u64;
        let first = self.address as u64 + self.offset as u64;
        let last = first + remaining - 1;
        (last / page - first / page + 1) as usize
    }
}

impl FusedIterator for PageChunks<'_> {}
