//! Contains the [SparseAddressSpace].

use super::AddressSpace;
use crate::{
    memory::{format_usage, InitSegment, SparseMemory},
    summary::Summary,
    types::{Address, RegionType, Value, Width},
};

/// The [SparseAddressSpace] is a plain byte-addressable memory over the full 32 bit address
/// space, re-initialized from its [InitSegment]s on reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseAddressSpace {
    /// The live byte store.
    data: SparseMemory,
    /// Initialization segments, in registration order.
    segments: Vec<InitSegment>,
}

impl SparseAddressSpace {
    /// Create a new, empty [SparseAddressSpace].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live byte store.
    pub fn data(&self) -> &SparseMemory {
        &self.data
    }

    /// Clear the byte store and replay every segment, in registration order. Each byte is first
    /// offered to `intercept`; only bytes it declines (returns `false` for) land in the store.
    pub(crate) fn reset_with(&mut self, mut intercept: impl FnMut(Address, u8) -> bool) {
        let Self { data, segments } = self;
        data.clear();
        for segment in segments.iter() {
            segment.replay(|address, byte| {
                if !intercept(address, byte) {
                    data.set(address, byte);
                }
            });
        }

        tracing::debug!(
            target: "addrspace::memory",
            "Reset address space from {} segments; {} bytes live",
            segments.len(),
            data.len()
        );
    }
}

impl AddressSpace for SparseAddressSpace {
    #[inline(always)]
    fn write_mem(&mut self, address: Address, value: Value, size: Width) {
        self.data.write(address, value, size)
    }

    #[inline(always)]
    fn read_mem(&mut self, address: Address, width: Width) -> Value {
        self.data.read(address, width)
    }

    #[inline(always)]
    fn read_mem_const(&self, address: Address, width: Width) -> Value {
        self.data.read(address, width)
    }

    fn contains(&self, address: Address) -> bool {
        self.data.contains(address)
    }

    fn region_type(&self, _: Address) -> RegionType {
        RegionType::Program
    }

    fn add_segment(&mut self, segment: InitSegment) {
        tracing::debug!(
            target: "addrspace::memory",
            "Added initialization segment {} at {:#010x} ({} x {} bytes)",
            segment.name().unwrap_or("<unnamed>"),
            segment.start(),
            segment.element_count(),
            segment.element_size()
        );
        self.segments.push(segment);
    }

    fn segments(&self) -> &[InitSegment] {
        &self.segments
    }

    fn clear_initialization_memories(&mut self) {
        self.segments.clear();
    }

    fn reset(&mut self) {
        self.reset_with(|_, _| false);
    }

    fn byte_count(&self) -> usize {
        self.data.len()
    }

    fn summary(&self) -> Summary {
        Summary {
            segments: self.segments.iter().map(InitSegment::info).collect(),
            regions: Vec::new(),
            live_bytes: self.data.len(),
            usage: format_usage(self.data.len() as u64),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod read_write {
        use super::*;
        use crate::WORD_SIZE;
        use proptest::{prop_assert, prop_assert_eq, proptest};

        #[test]
        fn word_defaults() {
            let mut space = SparseAddressSpace::new();
            space.write_word(0x20, 0xcafebabe);
            assert_eq!(0xcafebabe, space.read_word(0x20));
            assert_eq!(0xcafebabe, space.read_word_const(0x20));
            assert_eq!(0xbabe, space.read_mem(0x20, 2));
            assert_eq!(0xcafe, space.read_mem_const(0x22, 2));
            assert_eq!(RegionType::Program, space.region_type(0x20));
        }

        #[test]
        fn const_read_does_not_mutate() {
            let space = SparseAddressSpace::new();
            assert_eq!(0, space.read_mem_const(0x1000, 4));
            assert!(!space.contains(0x1000));
            assert_eq!(0, space.byte_count());
        }

        #[test]
        fn mutable_read_treats_miss_as_zero() {
            let mut space = SparseAddressSpace::new();
            space.write_mem(0x1001, 0xab, 1);
            assert_eq!(0xab00, space.read_mem(0x1000, 4));
            assert!(!space.contains(0x1000));
            assert_eq!(1, space.byte_count());
        }

        proptest! {
            #[test]
            fn roundtrip(address: Address, value: Value, width in 1..=WORD_SIZE) {
                let mut space = SparseAddressSpace::new();
                space.write_mem(address, value, width);
                let mask = Value::MAX.checked_shr(Value::BITS - width * 8).unwrap_or(0);
                prop_assert_eq!(value & mask, space.read_mem(address, width));
                prop_assert_eq!(value & mask, space.read_mem_const(address, width));
                prop_assert!(space.contains(address));
            }

            #[test]
            fn unwritten_is_zero(address: Address, width in 1..=WORD_SIZE) {
                let mut space = SparseAddressSpace::new();
                prop_assert_eq!(0, space.read_mem_const(address, width));
                prop_assert_eq!(0, space.read_mem(address, width));
                prop_assert!(!space.contains(address));
            }
        }
    }

    mod reset {
        use super::*;

        #[test]
        fn segments_are_replayed() {
            let mut space = SparseAddressSpace::new();
            space.add_initialization_memory::<u32>(0x0, &[1, 2, 3, 4]);
            assert_eq!(0, space.byte_count(), "segments do not touch the live store");

            space.reset();
            assert_eq!(1, space.read_mem(0x0, 4));
            assert_eq!(2, space.read_mem(0x4, 4));
            assert_eq!(4, space.read_mem(0xc, 4));

            space.write_mem(0x4, 99, 4);
            assert_eq!(99, space.read_mem(0x4, 4));

            space.reset();
            assert_eq!(2, space.read_mem(0x4, 4), "live edits are discarded");
        }

        #[test]
        fn initialization_bytes() {
            let mut space = SparseAddressSpace::new();
            space.add_initialization_bytes(0x20, b"boot");
            space.reset();
            assert_eq!(u32::from_le_bytes(*b"boot"), space.read_word(0x20));
            assert_eq!(1, space.segments()[0].element_size());
            assert_eq!(4, space.segments()[0].element_count());
        }

        #[test]
        fn later_segments_win() {
            let mut space = SparseAddressSpace::new();
            space.add_initialization_memory::<u8>(0x100, &[0x11; 8]);
            space.add_initialization_memory::<u16>(0x104, &[0x2222; 4]);
            space.reset();

            assert_eq!(0x11111111, space.read_mem(0x100, 4));
            assert_eq!(0x22222222, space.read_mem(0x104, 4));
            assert_eq!(0x22222222, space.read_mem(0x108, 4));
            assert_eq!(12, space.byte_count());
        }

        #[test]
        fn reset_is_idempotent() {
            let mut space = SparseAddressSpace::new();
            space.add_initialization_memory::<u32>(0x40, &[0xdeadbeef, 0x0badf00d]);
            space.add_initialization_memory::<u8>(0x42, &[0x00]);
            space.reset();
            let first = space.clone();
            space.reset();
            assert_eq!(first, space);
            assert_eq!(0xde00beef, space.read_mem(0x40, 4));
        }

        #[test]
        fn reset_drops_unrelated_writes() {
            let mut space = SparseAddressSpace::new();
            space.write_mem(0x8000, 0xffff, 2);
            space.reset();
            assert!(!space.contains(0x8000));
            assert_eq!(0, space.byte_count());
        }

        #[test]
        fn clearing_segments() {
            let mut space = SparseAddressSpace::new();
            space.add_initialization_memory::<u32>(0x0, &[7]);
            space.reset();
            space.clear_initialization_memories();
            assert!(space.segments().is_empty());
            assert_eq!(7, space.read_mem(0x0, 4), "clearing does not touch the live store");
            space.reset();
            assert_eq!(0, space.byte_count());
        }

        #[test]
        fn summary() {
            let mut space = SparseAddressSpace::new();
            space.add_segment(InitSegment::from_bytes(0x10, b"abcd").with_name("text"));
            space.reset();
            let summary = space.summary();
            assert_eq!(1, summary.segments.len());
            assert_eq!(Some("text".to_string()), summary.segments[0].name);
            assert_eq!(4, summary.live_bytes);
            assert_eq!("4 B", summary.usage);
            assert!(summary.regions.is_empty());
        }
    }
}
