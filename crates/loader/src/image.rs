//! Contains the [Image] type describing a program image to load.

use crate::{load_elf_file, load_raw_file};
use addrspace_memory::{utils::parse_address, Address, AddressSpace};
use anyhow::{ensure, Result};
use std::{fmt::Display, path::PathBuf, str::FromStr};

/// An [Image] is a program image to record as initialization segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Image {
    /// A flat binary loaded verbatim at an address.
    Raw {
        /// The path to the image.
        path: PathBuf,
        /// The address of the first byte.
        address: Address,
    },
    /// An ELF executable loaded at the addresses of its program headers.
    Elf {
        /// The path to the executable.
        path: PathBuf,
    },
}

impl Image {
    /// Record the image in `space`.
    ///
    /// ### Returns
    /// - `Ok(Some(entry))` with the entry point if the image is an ELF executable.
    /// - `Ok(None)` if the image is a flat binary.
    /// - `Err(_)` if the image could not be read or parsed.
    pub fn load<A: AddressSpace>(&self, space: &mut A) -> Result<Option<Address>> {
        match self {
            Image::Raw { path, address } => {
                load_raw_file(space, *address, path)?;
                Ok(None)
            }
            Image::Elf { path } => load_elf_file(space, path).map(Some),
        }
    }
}

impl FromStr for Image {
    type Err = anyhow::Error;

    /// Parses `path@address` as a [Image::Raw] and a bare `path` as an [Image::Elf].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('@') {
            Some((path, address)) => {
                ensure!(!path.is_empty(), "Missing path in image `{}`", s);
                Ok(Image::Raw { path: PathBuf::from(path), address: parse_address(address)? })
            }
            None => {
                ensure!(!s.is_empty(), "Empty image path");
                Ok(Image::Elf { path: PathBuf::from(s) })
            }
        }
    }
}

impl Display for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Image::Raw { path, address } => write!(f, "{}@{:#010x}", path.display(), address),
            Image::Elf { path } => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::build_elf32;
    use addrspace_memory::SparseAddressSpace;
    use std::io::Write;

    #[test]
    fn parse() {
        assert_eq!(
            Image::Raw { path: "boot.bin".into(), address: 0x8000_0000 },
            "boot.bin@0x8000_0000".parse().unwrap()
        );
        assert_eq!(Image::Elf { path: "kernel.elf".into() }, "kernel.elf".parse().unwrap());
        assert!("boot.bin@nowhere".parse::<Image>().is_err());
        assert!("@0x0".parse::<Image>().is_err());
        assert!("".parse::<Image>().is_err());
    }

    #[test]
    fn display() {
        let image: Image = "rom.bin@4096".parse().unwrap();
        assert_eq!("rom.bin@0x00001000", image.to_string());
    }

    #[test]
    fn load_both_kinds() {
        let mut raw = tempfile::NamedTempFile::new().unwrap();
        raw.write_all(&[0xaa; 4]).unwrap();
        let mut elf = tempfile::NamedTempFile::new().unwrap();
        elf.write_all(&build_elf32(0x40, &[(0x40, &[0xbb; 4], 4)])).unwrap();

        let mut space = SparseAddressSpace::new();
        let raw_image = Image::Raw { path: raw.path().to_path_buf(), address: 0x0 };
        let elf_image = Image::Elf { path: elf.path().to_path_buf() };
        assert_eq!(None, raw_image.load(&mut space).unwrap());
        assert_eq!(Some(0x40), elf_image.load(&mut space).unwrap());

        space.reset();
        assert_eq!(0xaaaaaaaa, space.read_word(0x0));
        assert_eq!(0xbbbbbbbb, space.read_word(0x40));
    }
}
