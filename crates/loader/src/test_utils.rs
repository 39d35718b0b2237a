//! Test utilities for the loader crate.

use elf::abi::PT_LOAD;

/// A `PT_LOAD` segment of a test executable: `(address, file bytes, memory size)`.
pub type TestSegment<'a> = (u32, &'a [u8], u32);

/// Assemble a minimal 32-bit little-endian RISC-V executable.
pub fn build_elf32(entry: u32, segments: &[TestSegment<'_>]) -> Vec<u8> {
    const EHDR_SIZE: u32 = 52;
    const PHDR_SIZE: u32 = 32;

    let mut out = Vec::new();
    out.extend_from_slice(&[0x7f, b'E', b'L', b'F', 1, 1, 1, 0]);
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&2u16.to_le_bytes()); // e_type: EXEC
    out.extend_from_slice(&0xf3u16.to_le_bytes()); // e_machine: RISC-V
    out.extend_from_slice(&1u32.to_le_bytes()); // e_version
    out.extend_from_slice(&entry.to_le_bytes());
    out.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // e_phoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_shoff
    out.extend_from_slice(&0u32.to_le_bytes()); // e_flags
    out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
    out.extend_from_slice(&(segments.len() as u16).to_le_bytes());
    out.extend_from_slice(&40u16.to_le_bytes()); // e_shentsize
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shnum
    out.extend_from_slice(&0u16.to_le_bytes()); // e_shstrndx

    let mut offset = EHDR_SIZE + PHDR_SIZE * segments.len() as u32;
    for (address, data, memsz) in segments {
        let fields = [PT_LOAD, offset, *address, *address, data.len() as u32, *memsz, 0x5, 0x4];
        for field in fields {
            out.extend_from_slice(&field.to_le_bytes());
        }
        offset += data.len() as u32;
    }
    for (_, data, _) in segments {
        out.extend_from_slice(data);
    }
    out
}
