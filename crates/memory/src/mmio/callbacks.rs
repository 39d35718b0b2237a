//! Contains the [IoCallbacks] pair and the [IoDevice] trait.

use crate::types::{Address, Value, Width};
use std::{cell::RefCell, fmt, rc::Rc};

/// Reads `width` bytes at a region-relative offset.
type ReadFn = dyn Fn(Address, Width) -> Value;

/// Writes `width` bytes of a value at a region-relative offset.
type WriteFn = dyn Fn(Address, Value, Width);

/// An [IoDevice] is a peripheral that can sit behind a memory mapped region.
///
/// Offsets passed to a device are always relative to the base of the region it is mapped at.
pub trait IoDevice {
    /// Read `width` bytes at `offset`.
    fn io_read(&mut self, offset: Address, width: Width) -> Value;

    /// Write the low `width` bytes of `value` at `offset`.
    fn io_write(&mut self, offset: Address, value: Value, width: Width);
}

/// The read/write callback pair an address space forwards region accesses to.
///
/// The address space only holds the callbacks; whatever state they act on belongs to the
/// peripheral, which must outlive the registration.
pub struct IoCallbacks {
    read: Box<ReadFn>,
    write: Box<WriteFn>,
}

impl IoCallbacks {
    /// Create a new [IoCallbacks] pair from two closures.
    pub fn new<R, W>(read: R, write: W) -> Self
    where
        R: Fn(Address, Width) -> Value + 'static,
        W: Fn(Address, Value, Width) + 'static,
    {
        Self { read: Box::new(read), write: Box::new(write) }
    }

    /// Create an [IoCallbacks] pair that forwards to a shared [IoDevice].
    ///
    /// The device is borrowed mutably for the duration of each access, so a device must not
    /// access the address space it is mapped into from within its own handlers.
    pub fn from_device<D>(device: Rc<RefCell<D>>) -> Self
    where
        D: IoDevice + 'static,
    {
        let reader = Rc::clone(&device);
        Self::new(
            move |offset, width| reader.borrow_mut().io_read(offset, width),
            move |offset, value, width| device.borrow_mut().io_write(offset, value, width),
        )
    }

    /// Invoke the read callback.
    #[inline(always)]
    pub fn read(&self, offset: Address, width: Width) -> Value {
        (self.read)(offset, width)
    }

    /// Invoke the write callback.
    #[inline(always)]
    pub fn write(&self, offset: Address, value: Value, width: Width) {
        (self.write)(offset, value, width)
    }
}

impl fmt::Debug for IoCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoCallbacks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn closures_are_forwarded() {
        let last = Rc::new(Cell::new((0, 0, 0)));
        let sink = Rc::clone(&last);
        let io = IoCallbacks::new(
            |offset, width| offset * 0x10 + width,
            move |offset, value, width| sink.set((offset, value, width)),
        );

        assert_eq!(0x52, io.read(5, 2));
        io.write(3, 0xdead, 2);
        assert_eq!((3, 0xdead, 2), last.get());
    }

    #[test]
    fn device_state_stays_with_owner() {
        #[derive(Default)]
        struct Latch {
            value: Value,
        }

        impl IoDevice for Latch {
            fn io_read(&mut self, _: Address, _: Width) -> Value {
                self.value
            }

            fn io_write(&mut self, _: Address, value: Value, _: Width) {
                self.value = value;
            }
        }

        let latch = Rc::new(RefCell::new(Latch::default()));
        let io = IoCallbacks::from_device(Rc::clone(&latch));
        io.write(0, 42, 4);
        assert_eq!(42, latch.borrow().value);
        assert_eq!(42, io.read(0, 4));
        assert_eq!("IoCallbacks { .. }", format!("{:?}", io));
    }
}
