//! This module contains the type aliases and enums used within this crate.

use serde::{Deserialize, Serialize};

/// An [Address] is a 32 bit byte address within an address space.
pub type Address = u32;

/// A [Value] is the widest quantity moved by a single read or write.
pub type Value = u32;

/// The byte width of a single access.
pub type Width = u32;

/// The native width of a [Value], in bytes.
pub const WORD_SIZE: Width = Value::BITS / 8;

/// The classification of an [Address] within an address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    /// Plain program/data memory backed by the sparse byte store.
    Program,
    /// A memory mapped I/O region whose accesses are forwarded to a peripheral.
    Io,
}
