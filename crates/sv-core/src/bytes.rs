//! # Fixed-Width Words
//!
//! `Bytes32` is the `bytes32` of the on-chain ballot box: ballot ids, vote
//! data, and the `r`, `s`, `packed2` signature words are all carried as
//! big-endian 32-byte values.
//!
//! ## Serde
//!
//! Serializes as a `0x`-prefixed lowercase hex string, the form the
//! relayer and the contract client exchange.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FormatError, ValidationError};
use crate::hex;

/// A big-endian 32-byte word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytes32(pub [u8; 32]);

impl Bytes32 {
    /// The all-zero word.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice that must be exactly 32 bytes long.
    pub fn from_slice(field: &'static str, bytes: &[u8]) -> Result<Self, ValidationError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| ValidationError::InvalidLength {
            field,
            expected: 32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse a 64-digit hex string, with or without `0x`.
    pub fn from_hex(s: &str) -> Result<Self, FormatError> {
        hex::decode_fixed::<32>(s).map(Self)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }

    /// Returns a copy with bit `index` (0 = most significant) inverted.
    pub fn with_bit_flipped(mut self, index: usize) -> Self {
        self.0[index / 8] ^= 0x80 >> (index % 8);
        self
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bytes32({}...)", hex::prefix(&self.0))
    }
}

impl std::fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Bytes32 {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
