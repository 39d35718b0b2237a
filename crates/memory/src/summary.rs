//! This module contains serializable descriptions of an address space's configuration.

use crate::types::{Address, Width};
use serde::{Deserialize, Serialize};

/// A description of an [InitSegment](crate::InitSegment).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInfo {
    /// The name of the segment, if it has one.
    pub name: Option<String>,
    /// The address of the first element.
    #[serde(with = "crate::utils::ser::address_hex")]
    pub start: Address,
    /// The width of each payload element in bytes.
    pub element_size: Width,
    /// The number of payload elements.
    pub element_count: usize,
    /// The number of distinct bytes the segment writes.
    pub bytes: usize,
}

/// A description of an [IoRegion](crate::IoRegion).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    /// The name of the region, if it has one.
    pub name: Option<String>,
    /// The first address covered by the region.
    #[serde(with = "crate::utils::ser::address_hex")]
    pub base: Address,
    /// The number of bytes covered by the region.
    pub size: Address,
}

/// A point-in-time [Summary] of an address space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The registered initialization segments, in registration order.
    pub segments: Vec<SegmentInfo>,
    /// The registered I/O regions, in address order.
    pub regions: Vec<RegionInfo>,
    /// The number of bytes currently written to the byte store.
    pub live_bytes: usize,
    /// A human-readable rendering of `live_bytes`.
    pub usage: String,
}
