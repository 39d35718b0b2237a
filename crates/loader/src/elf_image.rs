//! Loading of 32-bit little-endian ELF executables.

use addrspace_memory::{Address, AddressSpace, InitSegment};
use anyhow::{anyhow, ensure, Context, Result};
use elf::{abi::PT_LOAD, endian::AnyEndian, file::Class, ElfBytes};
use std::{fs, path::Path};

/// Record every `PT_LOAD` program header of a 32-bit little-endian ELF executable as an
/// initialization segment.
///
/// Each segment is placed at its physical address (the virtual address when the physical
/// address is zero) and consists of the file bytes followed by zeroes up to the in-memory size.
///
/// ### Takes
/// - `space`: The address space to record the segments in.
/// - `bytes`: The raw ELF file.
///
/// ### Returns
/// - `Ok(entry)` with the entry point of the executable.
/// - `Err(_)` if the file is not a 32-bit little-endian ELF or a segment is malformed.
pub fn load_elf<A: AddressSpace>(space: &mut A, bytes: &[u8]) -> Result<Address> {
    let elf = ElfBytes::<AnyEndian>::minimal_parse(bytes)?;
    ensure!(matches!(elf.ehdr.class, Class::ELF32), "Only 32-bit ELF files are supported");
    ensure!(
        matches!(elf.ehdr.endianness, AnyEndian::Little),
        "Only little-endian ELF files are supported"
    );

    let entry = Address::try_from(elf.ehdr.e_entry)
        .map_err(|_| anyhow!("Entry point {:#x} exceeds the address space", elf.ehdr.e_entry))?;

    let headers = elf.segments().ok_or_else(|| anyhow!("No program headers found"))?;
    let mut loaded = 0;
    for (i, header) in headers.iter().enumerate().filter(|(_, h)| h.p_type == PT_LOAD) {
        ensure!(
            header.p_filesz <= header.p_memsz,
            "Segment {} has a file size larger than its memory size",
            i
        );

        let start = if header.p_paddr != 0 { header.p_paddr } else { header.p_vaddr };
        ensure!(
            start + header.p_memsz <= 1u64 << 32,
            "Segment {} at {:#x} ({} bytes) exceeds the address space",
            i,
            start,
            header.p_memsz
        );

        let mut data = elf
            .segment_data(&header)
            .with_context(|| format!("Failed to read the data of segment {}", i))?
            .to_vec();
        data.resize(header.p_memsz as usize, 0);

        tracing::debug!(
            target: "addrspace::loader",
            "Loaded ELF segment {} at {:#010x} ({} bytes, {} from file)",
            i,
            start,
            header.p_memsz,
            header.p_filesz
        );
        space.add_segment(
            InitSegment::from_bytes(start as Address, &data).with_name(format!("PT_LOAD[{}]", i)),
        );
        loaded += 1;
    }

    ensure!(loaded > 0, "ELF file has no loadable segments");
    Ok(entry)
}

/// Read the file at `path` and record it with [load_elf].
pub fn load_elf_file<A: AddressSpace>(space: &mut A, path: &Path) -> Result<Address> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let bytes = crate::gz::maybe_decompress(bytes)?;
    load_elf(space, &bytes).with_context(|| format!("Failed to load ELF file {}", path.display()))
}
