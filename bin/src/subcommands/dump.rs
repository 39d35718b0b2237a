//! The `dump` subcommand for the addrspace binary

use super::{AddrspaceSubcommandDispatcher, ImageArgs};
use addrspace_memory::{utils::parse_address, Address, MemoryReader};
use anyhow::{ensure, Result};
use clap::Args;
use std::io::Read;

/// The number of bytes shown per line.
const LINE_BYTES: usize = 16;

/// Command line arguments for `addrspace dump`
#[derive(Args, Debug)]
#[command(author, version, about)]
pub(crate) struct DumpArgs {
    #[command(flatten)]
    images: ImageArgs,

    /// The first address to dump.
    #[arg(long, short, value_parser = parse_address)]
    address: Address,

    /// The number of bytes to dump.
    #[arg(long, short, default_value_t = 256)]
    length: u32,

    /// The width of each displayed group in bytes (1, 2 or 4). Groups are little-endian.
    #[arg(long, short, default_value_t = 4)]
    width: usize,
}

impl AddrspaceSubcommandDispatcher for DumpArgs {
    fn dispatch(self) -> Result<()> {
        ensure!(matches!(self.width, 1 | 2 | 4), "Width must be 1, 2 or 4, got {}", self.width);

        let (space, _) = self.images.load()?;
        let mut bytes = Vec::with_capacity(self.length as usize);
        MemoryReader::new(&space, self.address, self.length as u64).read_to_end(&mut bytes)?;

        for line in format_dump(self.address, &bytes, self.width) {
            println!("{}", line);
        }
        Ok(())
    }
}

/// Render `bytes` read from `address` as hexdump lines of little-endian groups of `width` bytes.
fn format_dump(address: Address, bytes: &[u8], width: usize) -> Vec<String> {
    bytes
        .chunks(LINE_BYTES)
        .enumerate()
        .map(|(i, line)| {
            let groups = line
                .chunks(width)
                .map(|group| {
                    let value = group.iter().rev().fold(0u32, |acc, b| (acc << 8) | *b as u32);
                    format!("{:0digits$x}", value, digits = group.len() * 2)
                })
                .collect::<Vec<_>>();
            let line_address = address.wrapping_add((i * LINE_BYTES) as Address);
            format!("{:#010x}: {}", line_address, groups.join(" "))
        })
        .collect()
}
