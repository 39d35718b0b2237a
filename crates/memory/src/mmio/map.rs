//! Contains the [RegionMap], an ordered index of disjoint [IoRegion]s.

use super::IoRegion;
use crate::types::Address;
use anyhow::{anyhow, ensure, Result};
use std::collections::BTreeMap;

/// The [RegionMap] holds a set of pairwise disjoint [IoRegion]s.
///
/// Regions are keyed by the *last* address they cover rather than their base. The smallest key
/// that is `>= address` then names the only region that could cover `address`, and a single
/// comparison against that region's base tells a hit from a gap between regions. This only
/// holds while regions never overlap, which [RegionMap::insert] enforces.
#[derive(Debug, Default)]
pub struct RegionMap {
    /// Map of last covered address -> region.
    regions: BTreeMap<Address, IoRegion>,
}

impl RegionMap {
    /// Returns the number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if no region is registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Returns an iterator over the regions in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = &IoRegion> + '_ {
        self.regions.values()
    }

    /// Locate the region covering `address`.
    ///
    /// ### Takes
    /// - `address`: The absolute address to look up.
    ///
    /// ### Returns
    /// - `Some(region)` if a registered region covers `address`.
    /// - `None` if `address` lies outside of every region.
    #[inline]
    pub fn find(&self, address: Address) -> Option<&IoRegion> {
        let (_, candidate) = self.regions.range(address..).next()?;
        (address >= candidate.base()).then_some(candidate)
    }

    /// Returns `true` if no registered region intersects `[base, base + size - 1]`.
    ///
    /// Empty or overflowing ranges are never free.
    pub fn is_range_free(&self, base: Address, size: Address) -> bool {
        let Ok(last) = IoRegion::last_address(base, size) else {
            return false;
        };

        // The first region ending at or after `base` is the only one that can intersect the
        // range; every region after it starts past its end.
        match self.regions.range(base..).next() {
            Some((_, region)) => region.base() > last,
            None => true,
        }
    }

    /// Register a new region.
    ///
    /// ### Returns
    /// - `Ok(())` if the region was registered.
    /// - `Err(_)` if the region intersects an existing region.
    pub fn insert(&mut self, region: IoRegion) -> Result<()> {
        let (base, last) = (region.base(), region.last());
        if let Some(existing) = self.regions.range(base..).next().map(|(_, r)| r) {
            ensure!(
                existing.base() > last,
                "Tried to add memory mapped region [{:#010x}, {:#010x}] which overlaps with region [{:#010x}, {:#010x}]",
                base,
                last,
                existing.base(),
                existing.last()
            );
        }

        tracing::debug!(
            target: "addrspace::mmio",
            "Registered memory mapped region {} at [{:#010x}, {:#010x}]",
            region.name().unwrap_or("<unnamed>"),
            base,
            last
        );
        self.regions.insert(last, region);
        Ok(())
    }

    /// Unregister the region registered with exactly `base` and `size`.
    ///
    /// ### Returns
    /// - `Ok(region)` with the removed region.
    /// - `Err(_)` if no region with that exact base and size exists.
    pub fn remove(&mut self, base: Address, size: Address) -> Result<IoRegion> {
        let last = IoRegion::last_address(base, size)?;
        let missing = || {
            anyhow!(
                "Tried to remove non-existing memory mapped region [{:#010x}, {:#010x}]",
                base,
                last
            )
        };

        let found = self.regions.get(&last).map(IoRegion::base);
        if found != Some(base) {
            return Err(missing());
        }

        let region = self.regions.remove(&last).ok_or_else(missing)?;
        tracing::debug!(
            target: "addrspace::mmio",
            "Removed memory mapped region {} at [{:#010x}, {:#010x}]",
            region.name().unwrap_or("<unnamed>"),
            base,
            last
        );
        Ok(region)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mmio::IoCallbacks;

    fn region(base: Address, size: Address) -> IoRegion {
        IoRegion::new(base, size, IoCallbacks::new(|_, _| 0, |_, _, _| {})).unwrap()
    }

    mod lookup {
        use super::*;
        use proptest::{collection::vec, prop_assert_eq, proptest};

        #[test]
        fn empty_map() {
            let map = RegionMap::default();
            assert!(map.find(0).is_none());
            assert!(map.find(Address::MAX).is_none());
        }

        #[test]
        fn boundaries_and_gaps() {
            let mut map = RegionMap::default();
            map.insert(region(0x2000, 0x100)).unwrap();
            map.insert(region(0x3000, 0x100)).unwrap();

            assert_eq!(Some(0x2000), map.find(0x2000).map(IoRegion::base));
            assert_eq!(Some(0x2000), map.find(0x20ff).map(IoRegion::base));
            assert!(map.find(0x2100).is_none(), "gap between regions");
            assert!(map.find(0x1fff).is_none(), "below the first region");
            assert_eq!(Some(0x3000), map.find(0x3000).map(IoRegion::base));
            assert!(map.find(0x3100).is_none(), "above the last region");
        }

        #[test]
        fn adjacent_regions() {
            let mut map = RegionMap::default();
            map.insert(region(0x10, 0x10)).unwrap();
            map.insert(region(0x20, 0x10)).unwrap();
            assert_eq!(Some(0x10), map.find(0x1f).map(IoRegion::base));
            assert_eq!(Some(0x20), map.find(0x20).map(IoRegion::base));
        }

        #[test]
        fn region_at_top_of_address_space() {
            let mut map = RegionMap::default();
            map.insert(region(0xffff_ff00, 0x100)).unwrap();
            assert_eq!(Some(0xffff_ff00), map.find(Address::MAX).map(IoRegion::base));
            assert!(map.find(0xffff_feff).is_none());
        }

        proptest! {
            #[test]
            fn matches_linear_scan(
                slots in vec((0u32..0x1000, 1u32..0x40), 0..32),
                probes in vec(0u32..0x50000, 64)
            ) {
                // Spread candidate regions over disjoint 0x100 byte slots so they never overlap.
                let mut map = RegionMap::default();
                for (slot, size) in slots {
                    let _ = map.insert(region(slot * 0x100, size));
                }

                for address in probes {
                    let expected = map.iter().find(|r| r.covers(address)).map(IoRegion::base);
                    prop_assert_eq!(expected, map.find(address).map(IoRegion::base));
                }
            }
        }
    }

    mod registration {
        use super::*;

        #[test]
        fn overlapping_regions_are_rejected() {
            let mut map = RegionMap::default();
            map.insert(region(0x1800, 0x1000)).unwrap();

            assert!(map.insert(region(0x1000, 0x1000)).is_err(), "overlaps the base");
            assert!(map.insert(region(0x2000, 0x1000)).is_err(), "overlaps the end");
            assert!(map.insert(region(0x1900, 0x10)).is_err(), "contained");
            assert!(map.insert(region(0x1000, 0x4000)).is_err(), "contains");
            assert_eq!(1, map.len());

            map.insert(region(0x2800, 0x10)).unwrap();
            map.insert(region(0x17f0, 0x10)).unwrap();
            assert_eq!(3, map.len());
        }

        #[test]
        fn range_free() {
            let mut map = RegionMap::default();
            map.insert(region(0x100, 0x100)).unwrap();
            assert!(map.is_range_free(0x0, 0x100));
            assert!(map.is_range_free(0x200, 0x100));
            assert!(!map.is_range_free(0x0, 0x101));
            assert!(!map.is_range_free(0x1ff, 1));
            assert!(!map.is_range_free(0x0, 0));
            assert!(!map.is_range_free(Address::MAX, 2));
        }

        #[test]
        fn removal_requires_exact_match() {
            let mut map = RegionMap::default();
            map.insert(region(0x1000, 0x100)).unwrap();

            assert!(map.remove(0x1000, 0x80).is_err());
            assert!(map.remove(0x1080, 0x80).is_err(), "same last address, different base");
            assert_eq!(1, map.len());

            let removed = map.remove(0x1000, 0x100).unwrap();
            assert_eq!(0x1000, removed.base());
            assert!(map.is_empty());
            assert!(map.remove(0x1000, 0x100).is_err());
        }

        #[test]
        fn iteration_is_ordered() {
            let mut map = RegionMap::default();
            for base in [0x3000, 0x1000, 0x2000] {
                map.insert(region(base, 0x10)).unwrap();
            }
            let bases = map.iter().map(IoRegion::base).collect::<Vec<_>>();
            assert_eq!(vec![0x1000, 0x2000, 0x3000], bases);
        }
    }
}
