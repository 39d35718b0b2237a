//! Testing utilities: small peripherals to map into an address space.

#![allow(missing_docs)]

use crate::{
    mmio::IoDevice,
    types::{Address, Value, Width},
};
use rustc_hash::FxHashMap;

/// Mask `value` down to its low `width` bytes.
pub fn mask(value: Value, width: Width) -> Value {
    match width {
        0 => 0,
        w if w >= 4 => value,
        w => value & ((1 << (w * 8)) - 1),
    }
}

/// A read-only peripheral answering every read with a fixed, offset-dependent pattern.
#[derive(Debug, Default)]
pub struct PatternDevice {
    /// Every `(offset, width)` read, in order.
    pub reads: Vec<(Address, Width)>,
    /// The number of writes that were ignored.
    pub writes_seen: usize,
}

impl PatternDevice {
    /// The value a [PatternDevice] returns for a read of `width` bytes at `offset`.
    pub fn pattern(offset: Address, width: Width) -> Value {
        mask(0xc0de_0000 | offset, width)
    }
}

impl IoDevice for PatternDevice {
    fn io_read(&mut self, offset: Address, width: Width) -> Value {
        self.reads.push((offset, width));
        Self::pattern(offset, width)
    }

    fn io_write(&mut self, _: Address, _: Value, _: Width) {
        self.writes_seen += 1;
    }
}

/// A register-file peripheral that records every write and reads back the last value written
/// at an offset.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    /// Every `(offset, value, width)` write, in order.
    pub writes: Vec<(Address, Value, Width)>,
    registers: FxHashMap<Address, Value>,
}

impl IoDevice for RecordingDevice {
    fn io_read(&mut self, offset: Address, width: Width) -> Value {
        mask(self.registers.get(&offset).copied().unwrap_or_default(), width)
    }

    fn io_write(&mut self, offset: Address, value: Value, width: Width) {
        self.writes.push((offset, value, width));
        self.registers.insert(offset, mask(value, width));
    }
}
