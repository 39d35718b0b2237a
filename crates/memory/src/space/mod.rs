//! Contains the [AddressSpace] trait and its two implementations: the plain
//! [SparseAddressSpace] and the [MemoryMappedAddressSpace].

use crate::{
    memory::{format_usage, InitSegment, SegmentElement},
    summary::Summary,
    types::{Address, RegionType, Value, Width, WORD_SIZE},
};
use std::fmt::Debug;

mod sparse;
pub use sparse::SparseAddressSpace;

mod mapped;
pub use mapped::MemoryMappedAddressSpace;

/// The [AddressSpace] trait is the interface a simulated processor or peripheral drives memory
/// through.
///
/// Reads and writes never fail: unwritten addresses read as zero. Multi-byte accesses are
/// little-endian and need not be aligned.
pub trait AddressSpace: Debug {
    /// Write the low `size` bytes of `value` starting at `address`, least significant byte first.
    fn write_mem(&mut self, address: Address, value: Value, size: Width);

    /// Read `width` bytes starting at `address` into a little-endian [Value].
    fn read_mem(&mut self, address: Address, width: Width) -> Value;

    /// Read `width` bytes starting at `address` without modifying the byte store.
    ///
    /// This is the form to use for inspection (debuggers, memory views). Accesses that land in
    /// a memory mapped region are still forwarded to the peripheral, which may react to them.
    fn read_mem_const(&self, address: Address, width: Width) -> Value;

    /// Returns `true` if the byte store holds a prior write at `address`.
    fn contains(&self, address: Address) -> bool;

    /// Classify `address` as program memory or memory mapped I/O.
    fn region_type(&self, address: Address) -> RegionType;

    /// Record a new initialization segment, replayed on every [AddressSpace::reset].
    fn add_segment(&mut self, segment: InitSegment);

    /// Returns the recorded initialization segments, in registration order.
    fn segments(&self) -> &[InitSegment];

    /// Drop every recorded initialization segment.
    fn clear_initialization_memories(&mut self);

    /// Clear the byte store and replay every initialization segment through the write path, in
    /// registration order. Later segments overwrite earlier ones where they overlap.
    fn reset(&mut self);

    /// Returns the number of bytes currently written to the byte store.
    fn byte_count(&self) -> usize;

    /// Returns a serializable [Summary] of the address space.
    fn summary(&self) -> Summary;

    /// Record a new initialization segment laying out `payload` from `start`, one element of
    /// `T::SIZE` bytes after another. The byte store is untouched until the next reset.
    fn add_initialization_memory<T>(&mut self, start: Address, payload: &[T])
    where
        T: SegmentElement,
        Self: Sized,
    {
        self.add_segment(InitSegment::from_elements(start, payload));
    }

    /// Record a new byte-granular initialization segment.
    fn add_initialization_bytes(&mut self, start: Address, bytes: &[u8]) {
        self.add_segment(InitSegment::from_bytes(start, bytes));
    }

    /// Write a full [WORD_SIZE] word at `address`.
    fn write_word(&mut self, address: Address, value: Value) {
        self.write_mem(address, value, WORD_SIZE)
    }

    /// Read a full [WORD_SIZE] word at `address`.
    fn read_word(&mut self, address: Address) -> Value {
        self.read_mem(address, WORD_SIZE)
    }

    /// Read a full [WORD_SIZE] word at `address` without modifying the byte store.
    fn read_word_const(&self, address: Address) -> Value {
        self.read_mem_const(address, WORD_SIZE)
    }

    /// Returns a human-readable string describing the size of the byte store.
    fn usage(&self) -> String {
        format_usage(self.byte_count() as u64)
    }
}
