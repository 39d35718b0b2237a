//! Loading of flat binary images.

use crate::gz::maybe_decompress;
use addrspace_memory::{Address, AddressSpace, InitSegment};
use anyhow::{ensure, Context, Result};
use std::{fs, path::Path};

/// Record a flat binary image as a byte-granular initialization segment at `address`.
///
/// Gzip-compressed images are decompressed first.
///
/// ### Takes
/// - `space`: The address space to record the segment in.
/// - `address`: The address of the first byte of the image.
/// - `bytes`: The image.
/// - `name`: A name for the segment.
///
/// ### Returns
/// - `Ok(len)` with the number of bytes recorded.
/// - `Err(_)` if the image could not be decompressed or does not fit above `address`.
pub fn load_raw<A: AddressSpace>(
    space: &mut A,
    address: Address,
    bytes: Vec<u8>,
    name: &str,
) -> Result<usize> {
    let bytes = maybe_decompress(bytes).with_context(|| format!("Failed to inflate {}", name))?;
    let fits = (address as u64) + (bytes.len() as u64) <= (1u64 << 32);
    ensure!(
        fits,
        "Image {} ({} bytes) does not fit in the address space at {:#010x}",
        name,
        bytes.len(),
        address
    );

    tracing::debug!(
        target: "addrspace::loader",
        "Loaded raw image {} ({} bytes) at {:#010x}",
        name,
        bytes.len(),
        address
    );
    space.add_segment(InitSegment::from_bytes(address, &bytes).with_name(name));
    Ok(bytes.len())
}

/// Read the file at `path` and record it with [load_raw].
pub fn load_raw_file<A: AddressSpace>(
    space: &mut A,
    address: Address,
    path: &Path,
) -> Result<usize> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    load_raw(space, address, bytes, &name)
}
