//! # Account Addresses (EIP-55)
//!
//! An account is the last 20 bytes of the Keccak-256 hash of an
//! uncompressed public key. Its text form is `0x` followed by 40 hex
//! digits whose letter case carries a checksum: digit `i` is upper-cased
//! when nibble `i` of `keccak256(lowercase_hex)` is greater than 7.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sv_core::{hex, CryptoError, FormatError};

use crate::keccak::keccak256;
use crate::secp256k1::Secp256k1PublicKey;

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Account(pub [u8; 20]);

impl Account {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse a 40-digit hex address in any letter case, `0x` optional.
    ///
    /// The checksum is not enforced here; see [`is_valid_checksum_address`].
    pub fn from_hex(s: &str) -> Result<Self, FormatError> {
        let digits = address_digits(s)?;
        let bytes = hex::decode_fixed::<20>(digits).map_err(|e| invalid(s, e.to_string()))?;
        Ok(Self(bytes))
    }

    pub(crate) fn from_public_key_bytes(raw: &[u8; 64]) -> Self {
        let hash = keccak256(raw);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash.as_bytes()[12..]);
        Self(bytes)
    }

    /// Return the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Render in EIP-55 checksum case.
    pub fn to_checksum(&self) -> String {
        checksum_digits(&hex::encode(&self.0))
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Account({})", self.to_checksum())
    }
}

impl std::str::FromStr for Account {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn invalid(input: &str, reason: impl Into<String>) -> FormatError {
    FormatError::InvalidAddress { input: input.to_string(), reason: reason.into() }
}

fn address_digits(s: &str) -> Result<&str, FormatError> {
    let digits = hex::strip_prefix(s.trim());
    if digits.len() != 40 {
        return Err(invalid(s, format!("expected 40 hex digits, got {}", digits.len())));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(s, "contains non-hex characters"));
    }
    Ok(digits)
}

// `lower` must be 40 lowercase hex digits.
fn checksum_digits(lower: &str) -> String {
    let hash = keccak256(lower.as_bytes());
    let nibbles = hash.as_bytes().iter().flat_map(|b| [b >> 4, b & 0x0f]);
    let cased: String = lower
        .chars()
        .zip(nibbles)
        .map(|(c, n)| if n > 7 { c.to_ascii_uppercase() } else { c })
        .collect();
    format!("0x{cased}")
}

/// Convert a 40-hex-digit address (any case, `0x` optional) to EIP-55 form.
pub fn to_checksum_address(address: &str) -> Result<String, FormatError> {
    let digits = address_digits(address)?;
    Ok(checksum_digits(&digits.to_ascii_lowercase()))
}

/// Derive the account for a public key.
///
/// Accepts 64-byte raw, 65-byte SEC1 uncompressed, or 33-byte SEC1
/// compressed keys.
pub fn derive_address(public_key: &[u8]) -> Result<Account, CryptoError> {
    Ok(Secp256k1PublicKey::from_slice(public_key)?.address())
}

/// Check a textual address against its checksum.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are
/// accepted; mixed case must match exactly.
pub fn is_valid_checksum_address(address: &str) -> bool {
    let Ok(digits) = address_digits(address) else {
        return false;
    };
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }
    checksum_digits(&digits.to_ascii_lowercase())[2..] == *digits
}
