//! Gzip helpers for compressed program images.

use anyhow::Result;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::io::{Read, Write};

/// The two magic bytes every gzip stream starts with.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns `true` if `bytes` starts with the gzip magic number.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Compress `bytes` with gzip.
pub fn compress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip stream.
pub fn decompress_bytes(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(compressed);
    let mut bytes = Vec::with_capacity(compressed.len() * 2);
    decoder.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Decompress `bytes` if they are a gzip stream, otherwise return them unchanged.
pub fn maybe_decompress(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if is_gzip(&bytes) {
        decompress_bytes(&bytes)
    } else {
        Ok(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detects_and_inflates_gzip() {
        let plain = b"\x13\x00\x00\x00 addi x0, x0, 0".to_vec();
        let compressed = compress_bytes(&plain).unwrap();
        assert!(is_gzip(&compressed));
        assert!(!is_gzip(&plain));
        assert_eq!(plain, maybe_decompress(compressed).unwrap());
        assert_eq!(plain, maybe_decompress(plain.clone()).unwrap());
    }

    #[test]
    fn truncated_stream_is_an_error() {
        let compressed = compress_bytes(&[0xaa; 512]).unwrap();
        assert!(decompress_bytes(&compressed[..compressed.len() / 2]).is_err());
    }
}
