//! Contains the [MemoryReader] structure.

use crate::{space::AddressSpace, types::Address};
use std::io::Read;

/// A reader for a generic [AddressSpace].
///
/// Enables unaligned verbatim reads of a range of the address space through
/// [AddressSpace::read_mem_const]. Bytes that were never written read as zero rather than
/// failing. Bytes that fall in a memory mapped region are read from the peripheral one at a
/// time.
#[derive(Debug)]
pub struct MemoryReader<'a, A: AddressSpace> {
    space: &'a A,
    address: Address,
    count: u64,
}

impl<'a, A> MemoryReader<'a, A>
where
    A: AddressSpace,
{
    /// Create a new [MemoryReader] for the given [AddressSpace] that can read `count` bytes
    /// starting from `address`. Reads wrap around at the top of the address space.
    pub fn new(space: &'a A, address: Address, count: u64) -> Self {
        Self { space, address, count }
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> u64 {
        self.count
    }
}

impl<'a, A> Read for MemoryReader<'a, A>
where
    A: AddressSpace,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
        let n = buf.len().min(usize::try_from(self.count).unwrap_or(usize::MAX));
        for byte in buf[..n].iter_mut() {
            *byte = self.space.read_mem_const(self.address, 1) as u8;
            self.address = self.address.wrapping_add(1);
        }
        self.count -= n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        mmio::IoCallbacks,
        space::{MemoryMappedAddressSpace, SparseAddressSpace},
    };
    use rand::RngCore;

    #[test]
    fn repeat_range() {
        let mut space = SparseAddressSpace::new();
        let data = b"under the big bright yellow sun".repeat(40);
        space.add_initialization_memory(0x1337, &data[..]);
        space.reset();

        let mut reader = MemoryReader::new(&space, 0x1337 - 10, data.len() as u64 + 20);
        let mut buf = Vec::with_capacity(1260);
        reader.read_to_end(&mut buf).unwrap();

        assert_eq!([0u8; 10], buf[..10], "empty start");
        assert_eq!(data[..], buf[10..buf.len() - 10], "result");
        assert_eq!([0u8; 10], buf[buf.len() - 10..], "empty end");
        assert_eq!(0, reader.remaining());
    }

    #[test]
    fn large_random() {
        let mut space = SparseAddressSpace::new();
        let mut data = [0u8; 20_000];
        rand::thread_rng().fill_bytes(&mut data[..]);
        space.add_initialization_memory(0, &data[..]);
        space.reset();

        let mut buf = Vec::new();
        MemoryReader::new(&space, 0, data.len() as u64).read_to_end(&mut buf).unwrap();
        assert_eq!(data[..], buf[..]);
        assert_eq!(space.byte_count(), data.len(), "reading must not allocate");
    }

    #[test]
    fn reads_through_regions() {
        let mut space = MemoryMappedAddressSpace::new();
        space.write_word(0x0, 0x04030201);
        space.add_io_region(0x4, 0x4, IoCallbacks::new(|offset, _| 0xf0 + offset, |_, _, _| {}));

        let mut buf = [0u8; 8];
        MemoryReader::new(&space, 0, 8).read_exact(&mut buf).unwrap();
        assert_eq!([1, 2, 3, 4, 0xf0, 0xf1, 0xf2, 0xf3], buf);
    }
}
