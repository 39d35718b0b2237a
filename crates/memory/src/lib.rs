//! Sparse and memory mapped address spaces for processor simulation.
//!
//! An [AddressSpace] is a byte-addressable memory over the full 32 bit address range. The
//! [SparseAddressSpace] only stores bytes that have been written and can be re-initialized
//! from program [InitSegment]s on reset. The [MemoryMappedAddressSpace] additionally routes
//! accesses within registered [IoRegion]s to peripheral [IoCallbacks].

mod types;
pub use types::{Address, RegionType, Value, Width, WORD_SIZE};

pub mod memory;
pub use memory::{InitSegment, SegmentElement, SparseMemory};

pub mod mmio;
pub use mmio::{IoCallbacks, IoDevice, IoRegion, RegionMap};

mod space;
pub use space::{AddressSpace, MemoryMappedAddressSpace, SparseAddressSpace};

mod reader;
pub use reader::MemoryReader;

mod builder;
pub use builder::AddressSpaceBuilder;

pub mod summary;
pub use summary::{RegionInfo, SegmentInfo, Summary};

pub mod utils;

#[cfg(any(feature = "test-utils", test))]
pub mod test_utils;
