//! Contains the [SparseMemory] byte store.

use crate::types::{Address, Value, Width, WORD_SIZE};
use rustc_hash::FxHashMap;

/// The [SparseMemory] struct is a byte-addressable store covering the full 32 bit address
/// space. Only bytes that have been written occupy an entry; every other byte reads as zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SparseMemory {
    /// Map of address -> byte. A missing key is an unwritten byte.
    bytes: FxHashMap<Address, u8>,
}

impl SparseMemory {
    /// Returns the number of bytes that have been written.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if no byte has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drops every written byte.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Returns `true` if the byte at `address` has been written.
    pub fn contains(&self, address: Address) -> bool {
        self.bytes.contains_key(&address)
    }

    /// Returns the byte at `address`, if it has been written.
    pub fn get(&self, address: Address) -> Option<u8> {
        self.bytes.get(&address).copied()
    }

    /// Stores a single byte at `address`.
    pub fn set(&mut self, address: Address, byte: u8) {
        self.bytes.insert(address, byte);
    }

    /// Write `size` bytes of `value` starting at `address`, least significant byte first.
    ///
    /// Addresses wrap around at the top of the address space. A `size` wider than a [Value]
    /// writes zero into the bytes the value has been shifted out of.
    ///
    /// ### Takes
    /// - `address`: The address of the first byte.
    /// - `value`: The value to write.
    /// - `size`: The number of bytes to write.
    pub fn write(&mut self, address: Address, value: Value, size: Width) {
        let mut value = value;
        for i in 0..size {
            self.bytes.insert(address.wrapping_add(i), value as u8);
            value = value.checked_shr(8).unwrap_or(0);
        }
    }

    /// Copy `data` into the store starting at `address`.
    pub fn write_bytes(&mut self, address: Address, data: &[u8]) {
        let mut address = address;
        for byte in data {
            self.bytes.insert(address, *byte);
            address = address.wrapping_add(1);
        }
    }

    /// Assemble `width` bytes starting at `address` into a little-endian [Value].
    ///
    /// Unwritten bytes contribute zero, and the store is never modified. Bytes past
    /// [WORD_SIZE] do not fit in a [Value] and are not consulted.
    ///
    /// ### Takes
    /// - `address`: The address of the least significant byte.
    /// - `width`: The number of bytes to read.
    ///
    /// ### Returns
    /// - The assembled value.
    pub fn read(&self, address: Address, width: Width) -> Value {
        (0..width.min(WORD_SIZE)).fold(0, |value, i| {
            let byte = self.get(address.wrapping_add(i)).unwrap_or_default();
            value | (Value::from(byte) << (i * u8::BITS))
        })
    }

    /// Returns an iterator over every written `(address, byte)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Address, u8)> + '_ {
        self.bytes.iter().map(|(&address, &byte)| (address, byte))
    }

    /// Returns the lowest and highest written addresses, or `None` if the store is empty.
    pub fn bounds(&self) -> Option<(Address, Address)> {
        let min = self.bytes.keys().min()?;
        let max = self.bytes.keys().max()?;
        Some((*min, *max))
    }
}
