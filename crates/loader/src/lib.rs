//! Loaders that turn program images into initialization segments of an
//! [AddressSpace](addrspace_memory::AddressSpace).
//!
//! Segments are only recorded; the caller decides when to [reset] the address space to make
//! them live.
//!
//! [reset]: addrspace_memory::AddressSpace::reset

pub mod gz;

mod raw;
pub use raw::{load_raw, load_raw_file};

mod elf_image;
pub use elf_image::{load_elf, load_elf_file};

mod image;
pub use image::Image;

#[cfg(any(feature = "test-utils", test))]
pub mod test_utils;
