//! # Keccak-256 Digest Computation
//!
//! The Ethereum flavour of Keccak (original padding, not NIST SHA3-256).
//! Used for the proxy ballot message hash and for address derivation.

use sha3::{Digest, Keccak256};
use sv_core::Bytes32;

/// Compute the Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> Bytes32 {
    let hash = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Bytes32(bytes)
}

/// Compute the Keccak-256 digest of several byte strings laid end to end.
///
/// Equivalent to hashing their concatenation, without allocating it.
pub fn keccak256_concat(parts: &[&[u8]]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hasher.finalize());
    Bytes32(bytes)
}
