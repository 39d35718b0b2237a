//! Contains the [MemoryMappedAddressSpace].

use super::{AddressSpace, SparseAddressSpace};
use crate::{
    memory::InitSegment,
    mmio::{IoCallbacks, IoRegion, RegionMap},
    summary::Summary,
    types::{Address, RegionType, Value, Width},
};
use anyhow::Result;

/// The [MemoryMappedAddressSpace] is a [SparseAddressSpace] with a set of registered,
/// non-overlapping I/O regions. Accesses that land in a region are forwarded to the region's
/// [IoCallbacks] with an offset relative to the region's base; everything else goes to the
/// byte store.
///
/// I/O regions stay registered across [AddressSpace::reset]. Segment bytes that land in a region
/// are written to its peripheral, one byte at a time, instead of the byte store.
#[derive(Debug, Default)]
pub struct MemoryMappedAddressSpace {
    /// The underlying byte store and initialization segments.
    memory: SparseAddressSpace,
    /// The registered I/O regions.
    regions: RegionMap,
}

impl MemoryMappedAddressSpace {
    /// Create a new [MemoryMappedAddressSpace] without any I/O regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing [SparseAddressSpace], keeping its contents and segments.
    pub fn from_sparse(memory: SparseAddressSpace) -> Self {
        Self { memory, regions: RegionMap::default() }
    }

    /// Returns the underlying [SparseAddressSpace].
    pub fn memory(&self) -> &SparseAddressSpace {
        &self.memory
    }

    /// Returns the registered I/O regions.
    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    /// Returns the number of registered I/O regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Locate the I/O region covering `address`, if any.
    #[inline(always)]
    pub fn find_region(&self, address: Address) -> Option<&IoRegion> {
        self.regions.find(address)
    }

    /// Returns `true` if `[base, base + size - 1]` can be registered as an I/O region.
    pub fn is_range_free(&self, base: Address, size: Address) -> bool {
        self.regions.is_range_free(base, size)
    }

    /// Register `region`.
    ///
    /// ### Returns
    /// - `Ok(())` if the region was registered.
    /// - `Err(_)` if it overlaps an existing region.
    pub fn try_add_region(&mut self, region: IoRegion) -> Result<()> {
        self.regions.insert(region)
    }

    /// Register an I/O region covering `[base, base + size - 1]`.
    ///
    /// ### Returns
    /// - `Ok(())` if the region was registered.
    /// - `Err(_)` if `size` is zero, the range exceeds the address space, or it overlaps an
    ///   existing region.
    pub fn try_add_io_region(
        &mut self,
        base: Address,
        size: Address,
        io: IoCallbacks,
    ) -> Result<()> {
        self.try_add_region(IoRegion::new(base, size, io)?)
    }

    /// Register an I/O region covering `[base, base + size - 1]`.
    ///
    /// # Panics
    /// Panics if `size` is zero, the range exceeds the address space, or it overlaps an
    /// existing region. See [MemoryMappedAddressSpace::try_add_io_region] for the fallible form.
    pub fn add_io_region(&mut self, base: Address, size: Address, io: IoCallbacks) {
        if let Err(e) = self.try_add_io_region(base, size, io) {
            panic!("{e}");
        }
    }

    /// Unregister the I/O region registered with exactly `base` and `size`.
    ///
    /// ### Returns
    /// - `Ok(region)` with the removed region.
    /// - `Err(_)` if no region was registered with that exact base and size.
    pub fn try_remove_io_region(&mut self, base: Address, size: Address) -> Result<IoRegion> {
        self.regions.remove(base, size)
    }

    /// Unregister the I/O region registered with exactly `base` and `size`.
    ///
    /// # Panics
    /// Panics if no region was registered with that exact base and size.
    pub fn remove_io_region(&mut self, base: Address, size: Address) {
        if let Err(e) = self.try_remove_io_region(base, size) {
            panic!("{e}");
        }
    }
}

impl AddressSpace for MemoryMappedAddressSpace {
    #[inline(always)]
    fn write_mem(&mut self, address: Address, value: Value, size: Width) {
        match self.regions.find(address) {
            Some(region) => region.write(address, value, size),
            None => self.memory.write_mem(address, value, size),
        }
    }

    #[inline(always)]
    fn read_mem(&mut self, address: Address, width: Width) -> Value {
        match self.regions.find(address) {
            Some(region) => region.read(address, width),
            None => self.memory.read_mem(address, width),
        }
    }

    #[inline(always)]
    fn read_mem_const(&self, address: Address, width: Width) -> Value {
        match self.regions.find(address) {
            Some(region) => region.read(address, width),
            None => self.memory.read_mem_const(address, width),
        }
    }

    fn contains(&self, address: Address) -> bool {
        self.memory.contains(address)
    }

    fn region_type(&self, address: Address) -> RegionType {
        match self.regions.find(address) {
            Some(_) => RegionType::Io,
            None => self.memory.region_type(address),
        }
    }

    fn add_segment(&mut self, segment: InitSegment) {
        self.memory.add_segment(segment)
    }

    fn segments(&self) -> &[InitSegment] {
        self.memory.segments()
    }

    fn clear_initialization_memories(&mut self) {
        self.memory.clear_initialization_memories()
    }

    fn reset(&mut self) {
        let regions = &self.regions;
        self.memory.reset_with(|address, byte| match regions.find(address) {
            Some(region) => {
                region.write(address, byte as Value, 1);
                true
            }
            None => false,
        });
    }

    fn byte_count(&self) -> usize {
        self.memory.byte_count()
    }

    fn summary(&self) -> Summary {
        Summary {
            regions: self.regions.iter().map(IoRegion::info).collect(),
            ..self.memory.summary()
        }
    }
}
