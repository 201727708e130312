//! # Hex Utilities
//!
//! Lowercase hex encoding and `0x`-tolerant decoding shared by every
//! fixed-width type in the workspace. No external hex crate dependency.

use crate::error::FormatError;

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Render bytes as lowercase hex without a prefix.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Render bytes as lowercase hex with a `0x` prefix.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", encode(bytes))
}

/// Decode a hex string, with or without `0x`, into bytes.
///
/// The empty string (and a bare `0x`) decode to an empty vector.
pub fn decode(s: &str) -> Result<Vec<u8>, FormatError> {
    let hex = strip_prefix(s.trim());
    if hex.len() % 2 != 0 {
        return Err(FormatError::InvalidHex(format!(
            "hex string must have even length, got {}",
            hex.len()
        )));
    }
    if let Some(pos) = hex.find(|c: char| !c.is_ascii_hexdigit()) {
        return Err(FormatError::InvalidHex(format!(
            "non-hex character at position {pos}"
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| FormatError::InvalidHex(format!("position {i}: {e}")))
        })
        .collect()
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], FormatError> {
    let bytes = decode(s)?;
    if bytes.len() != N {
        return Err(FormatError::InvalidHex(format!(
            "expected {N} bytes, got {}",
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

pub(crate) fn prefix(bytes: &[u8]) -> String {
    encode(&bytes[..bytes.len().min(4)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode(&[0xAB, 0x01]), "ab01");
        assert_eq!(encode_prefixed(&[]), "0x");
    }

    #[test]
    fn decode_accepts_prefix_and_case() {
        assert_eq!(decode("0xAb01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(decode("ab01").unwrap(), vec![0xab, 0x01]);
        assert!(decode("0x").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_odd_length_and_garbage() {
        assert!(decode("abc").is_err());
        assert!(decode("zz").is_err());
        // A multi-byte character must not cause a slicing panic.
        assert!(decode("é0").is_err());
    }

    #[test]
    fn decode_fixed_checks_width() {
        assert_eq!(decode_fixed::<2>("0x0102").unwrap(), [1, 2]);
        assert!(decode_fixed::<3>("0x0102").is_err());
    }
}
