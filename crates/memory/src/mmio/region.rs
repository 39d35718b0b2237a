//! Contains the [IoRegion] descriptor.

use super::IoCallbacks;
use crate::{
    summary::RegionInfo,
    types::{Address, Value, Width},
};
use anyhow::{anyhow, ensure, Result};

/// An [IoRegion] is a contiguous, non-empty range of addresses whose accesses are forwarded to
/// a peripheral's [IoCallbacks].
#[derive(Debug)]
pub struct IoRegion {
    /// An optional human-readable name for the peripheral.
    name: Option<String>,
    /// The first address covered by the region.
    base: Address,
    /// The number of bytes covered by the region.
    size: Address,
    /// The peripheral's callbacks.
    io: IoCallbacks,
}

impl IoRegion {
    /// Create a new [IoRegion] covering `[base, base + size - 1]`.
    ///
    /// ### Returns
    /// - `Ok(region)` if the range is non-empty and fits within the address space.
    /// - `Err(_)` if `size` is zero or the range runs past the top of the address space.
    pub fn new(base: Address, size: Address, io: IoCallbacks) -> Result<Self> {
        Self::last_address(base, size)?;
        Ok(Self { name: None, base, size, io })
    }

    /// Attach a name to the region.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Computes the last address covered by a `[base, base + size)` range.
    pub(crate) fn last_address(base: Address, size: Address) -> Result<Address> {
        ensure!(size > 0, "Memory mapped region at {:#010x} must have a non-zero size", base);
        base.checked_add(size - 1).ok_or_else(|| {
            anyhow!(
                "Memory mapped region at {:#010x} with size {:#x} exceeds the address space",
                base,
                size
            )
        })
    }

    /// Returns the name of the region, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the first address covered by the region.
    pub fn base(&self) -> Address {
        self.base
    }

    /// Returns the number of bytes covered by the region.
    pub fn size(&self) -> Address {
        self.size
    }

    /// Returns the last address covered by the region.
    pub fn last(&self) -> Address {
        self.base + (self.size - 1)
    }

    /// Returns `true` if `address` lies within the region.
    pub fn covers(&self, address: Address) -> bool {
        address >= self.base && address <= self.last()
    }

    /// Forward a read of `width` bytes at the absolute `address` to the peripheral.
    ///
    /// `address` must be covered by the region.
    pub(crate) fn read(&self, address: Address, width: Width) -> Value {
        debug_assert!(self.covers(address), "{:#010x} is outside of the region", address);
        let offset = address.wrapping_sub(self.base);
        tracing::trace!(
            target: "addrspace::mmio",
            "read  {:#010x} (+{:#x}) width {}",
            address,
            offset,
            width
        );
        self.io.read(offset, width)
    }

    /// Forward a write of `width` bytes at the absolute `address` to the peripheral.
    ///
    /// `address` must be covered by the region.
    pub(crate) fn write(&self, address: Address, value: Value, width: Width) {
        debug_assert!(self.covers(address), "{:#010x} is outside of the region", address);
        let offset = address.wrapping_sub(self.base);
        tracing::trace!(
            target: "addrspace::mmio",
            "write {:#010x} (+{:#x}) width {} value {:#x}",
            address,
            offset,
            width,
            value
        );
        self.io.write(offset, value, width)
    }

    /// Returns a serializable description of the region.
    pub fn info(&self) -> RegionInfo {
        RegionInfo { name: self.name.clone(), base: self.base, size: self.size }
    }
}
