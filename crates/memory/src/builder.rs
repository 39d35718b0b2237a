//! The [AddressSpaceBuilder] struct is a helper for assembling a [MemoryMappedAddressSpace].

use crate::{
    memory::{InitSegment, SegmentElement},
    mmio::{IoCallbacks, IoRegion},
    space::{AddressSpace, MemoryMappedAddressSpace},
    types::Address,
};
use anyhow::{Context, Result};

/// The [AddressSpaceBuilder] collects initialization segments and I/O regions, and produces a
/// [MemoryMappedAddressSpace] that has already been reset from its segments.
#[derive(Default, Debug)]
pub struct AddressSpaceBuilder {
    /// Initialization segments, in the order they will be replayed.
    segments: Vec<InitSegment>,
    /// I/O regions to register.
    regions: Vec<IoRegion>,
}

impl AddressSpaceBuilder {
    /// Builds the [MemoryMappedAddressSpace] from the information contained within the
    /// [AddressSpaceBuilder].
    ///
    /// Unlike [MemoryMappedAddressSpace::add_io_region], an overlapping region is reported as
    /// an error, since builder input usually comes from user configuration.
    pub fn build(self) -> Result<MemoryMappedAddressSpace> {
        let mut space = MemoryMappedAddressSpace::new();
        for segment in self.segments {
            space.add_segment(segment);
        }
        for region in self.regions {
            let name = region.name().unwrap_or("<unnamed>").to_string();
            space
                .try_add_region(region)
                .with_context(|| format!("Failed to map I/O region {}", name))?;
        }
        space.reset();
        Ok(space)
    }

    pub fn with_segment(mut self, segment: InitSegment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn with_initialization_memory<T: SegmentElement>(
        self,
        start: Address,
        payload: &[T],
    ) -> Self {
        self.with_segment(InitSegment::from_elements(start, payload))
    }

    pub fn with_region(mut self, region: IoRegion) -> Self {
        self.regions.push(region);
        self
    }

    pub fn with_io_region(
        self,
        name: impl Into<String>,
        base: Address,
        size: Address,
        io: IoCallbacks,
    ) -> Result<Self> {
        Ok(self.with_region(IoRegion::new(base, size, io)?.with_name(name)))
    }
}
