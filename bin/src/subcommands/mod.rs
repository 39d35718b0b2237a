//! Subcommands for the `addrspace` binary

use addrspace_loader::Image;
use addrspace_memory::{Address, AddressSpace, SparseAddressSpace};
use anyhow::Result;
use clap::{Args, Subcommand};

mod dump;
mod info;

pub(crate) trait AddrspaceSubcommandDispatcher {
    /// Dispatches the subcommand
    fn dispatch(self) -> Result<()>;
}

/// The subcommands for the `addrspace` binary
#[derive(Subcommand, Debug)]
pub(crate) enum AddrspaceSubcommand {
    /// Load program images and summarize the resulting address space
    Info(info::InfoArgs),
    /// Load program images and hexdump a range of the resulting address space
    Dump(dump::DumpArgs),
}

impl AddrspaceSubcommandDispatcher for AddrspaceSubcommand {
    fn dispatch(self) -> Result<()> {
        match self {
            AddrspaceSubcommand::Info(args) => args.dispatch(),
            AddrspaceSubcommand::Dump(args) => args.dispatch(),
        }
    }
}

/// Program images shared by every subcommand
#[derive(Args, Debug)]
pub(crate) struct ImageArgs {
    /// A program image to load: `path@address` for a flat binary, or `path` for an ELF file.
    /// May be given multiple times; later images overwrite earlier ones where they overlap.
    #[arg(long = "image", short = 'i', required = true)]
    images: Vec<Image>,
}

impl ImageArgs {
    /// Records every image as initialization segments and resets the address space.
    ///
    /// ### Returns
    /// - The address space and the entry point of the first ELF image, if any.
    pub(crate) fn load(&self) -> Result<(SparseAddressSpace, Option<Address>)> {
        let mut space = SparseAddressSpace::new();
        let mut entry = None;
        for image in &self.images {
            tracing::info!(target: "addrspace-cli", "Loading image {}", image);
            if let Some(image_entry) = image.load(&mut space)? {
                entry.get_or_insert(image_entry);
            }
        }

        space.reset();
        tracing::info!(
            target: "addrspace-cli",
            "Loaded {} segments; {} live",
            space.segments().len(),
            space.usage()
        );
        Ok((space, entry))
    }
}
