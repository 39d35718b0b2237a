//! Serialization utilities for the `addrspace-memory` crate.

/// {De}serialization for [Address](crate::Address) <-> `0x`-prefixed hex string.
pub mod address_hex {
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Serialize an address to a zero-padded hex string.
    pub fn serialize<S>(address: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#010x}", address))
    }

    /// Deserialize an address from a hex string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::utils::parse_address(&s).map_err(serde::de::Error::custom)
    }
}
