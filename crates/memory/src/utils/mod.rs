//! This module contains utility and helper functions for this crate.

pub mod ser;

/// Parse an address written either as `0x`-prefixed hexadecimal or as decimal.
///
/// ### Takes
/// - `s`: The string to parse. Underscores are ignored, e.g. `0x8000_0000`.
///
/// ### Returns
/// - `Ok(address)` if the string is a valid 32 bit address.
/// - `Err(_)` if the string could not be parsed.
pub fn parse_address(s: &str) -> anyhow::Result<crate::Address> {
    let s = s.trim().replace('_', "");
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid address `{}`: {}", s, e))
}

#[cfg(test)]
mod test {
    use super::parse_address;

    #[test]
    fn parses_hex_and_decimal() {
        assert_eq!(0x8000_0000, parse_address("0x8000_0000").unwrap());
        assert_eq!(0xabc, parse_address("0XABC").unwrap());
        assert_eq!(4096, parse_address(" 4096 ").unwrap());
        assert!(parse_address("0x1_0000_0000").is_err());
        assert!(parse_address("zero").is_err());
    }
}
