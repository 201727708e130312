//! # 256-bit Integers
//!
//! Ballot ids and the packed timing word are 256-bit values on chain. They
//! are carried as [`alloy_primitives::U256`]; this module adds the explicit
//! textual constructors the workspace accepts and the conversions to and
//! from [`Bytes32`]:
//!
//! - [`u256_from_dec_str`]: decimal digits.
//! - [`u256_from_hex_str`]: hex digits, `0x` optional, up to 64 digits.
//! - [`parse_u256`]: `0x`-prefixed input as hex, anything else as decimal.
//!
//! There is no runtime sniffing beyond the `0x` prefix.

pub use alloy_primitives::U256;

use crate::bytes::Bytes32;
use crate::error::FormatError;
use crate::hex;

/// Parse a decimal string.
pub fn u256_from_dec_str(s: &str) -> Result<U256, FormatError> {
    let digits = s.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidDecimal(s.to_string()));
    }
    U256::from_str_radix(digits, 10).map_err(|_| FormatError::Overflow(s.to_string()))
}

/// Parse a hex string of at most 64 digits, `0x` optional.
pub fn u256_from_hex_str(s: &str) -> Result<U256, FormatError> {
    let digits = hex::strip_prefix(s.trim());
    if digits.is_empty() {
        return Err(FormatError::InvalidHex(format!("empty integer literal {s:?}")));
    }
    if let Some(pos) = digits.find(|c: char| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHex(format!("non-hex character at position {pos}")));
    }
    if digits.len() > 64 {
        return Err(FormatError::Overflow(s.to_string()));
    }
    U256::from_str_radix(digits, 16).map_err(|_| FormatError::Overflow(s.to_string()))
}

/// Parse `0x`-prefixed input as hex and anything else as decimal.
pub fn parse_u256(s: &str) -> Result<U256, FormatError> {
    let t = s.trim();
    if t.starts_with("0x") || t.starts_with("0X") {
        u256_from_hex_str(t)
    } else {
        u256_from_dec_str(t)
    }
}

/// The value as `u64`, if it fits.
pub(crate) fn to_u64(value: &U256) -> Option<u64> {
    (value.bit_len() <= 64).then(|| value.as_limbs()[0])
}

impl From<U256> for Bytes32 {
    fn from(value: U256) -> Self {
        Bytes32(value.to_be_bytes::<32>())
    }
}

impl Bytes32 {
    /// Interpret the word as a big-endian integer.
    pub fn to_u256(&self) -> U256 {
        U256::from_be_bytes(self.0)
    }
}

// `U256::from` resolves to ruint's inherent constructor, so call sites use
// `Bytes32::to_u256` or `.into()`.
impl From<Bytes32> for U256 {
    fn from(word: Bytes32) -> Self {
        word.to_u256()
    }
}
