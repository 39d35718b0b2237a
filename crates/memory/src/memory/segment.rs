//! This module contains the [InitSegment] type and the [SegmentElement] payload trait.

use super::SparseMemory;
use crate::{
    summary::SegmentInfo,
    types::{Address, Width},
};

/// A [SegmentElement] is a fixed-width integer that can be laid out in memory as part of an
/// initialization payload.
pub trait SegmentElement: Copy {
    /// The width of the element in bytes.
    const SIZE: Width;

    /// Writes the element into `memory` at `address`, least significant byte first.
    fn write_le(self, memory: &mut SparseMemory, address: Address);
}

/// Implements [SegmentElement] for a list of primitive integer types.
macro_rules! impl_segment_element {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SegmentElement for $ty {
                const SIZE: Width = std::mem::size_of::<$ty>() as Width;

                fn write_le(self, memory: &mut SparseMemory, address: Address) {
                    memory.write_bytes(address, &self.to_le_bytes());
                }
            }
        )*
    };
}

impl_segment_element!(u8, u16, u32, u64, i8, i16, i32, i64);

/// An [InitSegment] is a program or data blob that is written into an address space every time
/// it is reset. Each segment owns a private copy of the bytes it will write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitSegment {
    /// An optional human-readable name, e.g. the image or program header it came from.
    name: Option<String>,
    /// The address of the first element.
    start: Address,
    /// The width of each payload element in bytes.
    element_size: Width,
    /// The number of payload elements.
    element_count: usize,
    /// The bytes this segment writes on reset.
    memory: SparseMemory,
}

impl InitSegment {
    /// Create a new [InitSegment] by laying out `payload` sequentially from `start`, advancing
    /// by `T::SIZE` bytes per element.
    ///
    /// ### Takes
    /// - `start`: The address of the first element.
    /// - `payload`: The elements to write.
    ///
    /// ### Returns
    /// - The new [InitSegment].
    pub fn from_elements<T: SegmentElement>(start: Address, payload: &[T]) -> Self {
        let mut memory = SparseMemory::default();
        let mut address = start;
        for element in payload {
            element.write_le(&mut memory, address);
            address = address.wrapping_add(T::SIZE);
        }

        Self { name: None, start, element_size: T::SIZE, element_count: payload.len(), memory }
    }

    /// Create a new byte-granular [InitSegment] from `data`.
    pub fn from_bytes(start: Address, data: &[u8]) -> Self {
        Self::from_elements(start, data)
    }

    /// Attach a name to the segment.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name of the segment, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the address of the first element.
    pub fn start(&self) -> Address {
        self.start
    }

    /// Returns the width of each payload element in bytes.
    pub fn element_size(&self) -> Width {
        self.element_size
    }

    /// Returns the number of payload elements.
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Returns the number of distinct bytes this segment writes.
    pub fn byte_len(&self) -> usize {
        self.memory.len()
    }

    /// Returns the bytes this segment writes.
    pub fn memory(&self) -> &SparseMemory {
        &self.memory
    }

    /// Returns a serializable description of the segment.
    pub fn info(&self) -> SegmentInfo {
        SegmentInfo {
            name: self.name.clone(),
            start: self.start,
            element_size: self.element_size,
            element_count: self.element_count,
            bytes: self.byte_len(),
        }
    }

    /// Hand every byte of the segment to `write`, in ascending address order.
    pub fn replay(&self, mut write: impl FnMut(Address, u8)) {
        let mut bytes = self.memory.iter().collect::<Vec<_>>();
        bytes.sort_unstable_by_key(|(address, _)| *address);
        for (address, byte) in bytes {
            write(address, byte);
        }
    }
}
