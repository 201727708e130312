//! # secp256k1 Recoverable Signatures
//!
//! Key handling, signing, and public key recovery for proxy ballots.
//!
//! ## Security Invariant
//!
//! - Signing input is a 32-byte prehash (`Bytes32`); callers hash first.
//! - Nonces are deterministic (RFC 6979) and `s` is normalized to the low
//!   half of the curve order, so the same key and hash always produce the
//!   same `(r, s, v)`.
//! - Recovery accepts high-S signatures: `s` is folded to `n - s` and the
//!   y parity of the recovery id flipped before recovering.
//! - Private keys are never serialized or logged. `Secp256k1KeyPair` does
//!   not implement `Serialize` and its `Debug` output is redacted.
//!
//! ## Recovery byte
//!
//! `v = 27 + recovery_param`, with `recovery_param ∈ {0, 1}`. On input only
//! `v ∈ {27, 28}` is accepted, so recovery ids 2 and 3 (reduced
//! x-coordinate) cannot be expressed. If signing ever yields a reduced-x
//! recovery id it is reported as `CryptoError::SigningFailed`.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sv_core::{hex, Bytes32, CryptoError};

use crate::address::Account;

/// Offset added to the recovery parameter to form `v`.
pub const RECOVERY_BYTE_OFFSET: u8 = 27;

/// An uncompressed secp256k1 public key: `x ‖ y`, 64 bytes, no SEC1 tag.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey(pub [u8; 64]);

/// An ECDSA signature with its recovery byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecoverableSignature {
    /// Recovery byte, 27 or 28.
    pub v: u8,
    /// Signature `r`.
    pub r: Bytes32,
    /// Signature `s`.
    pub s: Bytes32,
}

/// A secp256k1 key pair for signing proxy ballots.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

// ---------------------------------------------------------------------------
// Secp256k1PublicKey impls
// ---------------------------------------------------------------------------

impl Secp256k1PublicKey {
    /// Parse a public key in any accepted encoding:
    ///
    /// - 64 bytes: raw `x ‖ y`.
    /// - 65 bytes: SEC1 uncompressed (`0x04 ‖ x ‖ y`).
    /// - 33 bytes: SEC1 compressed.
    ///
    /// The point must lie on the curve.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key = match bytes.len() {
            64 => {
                let mut sec1 = [0u8; 65];
                sec1[0] = 0x04;
                sec1[1..].copy_from_slice(bytes);
                VerifyingKey::from_sec1_bytes(&sec1)
            }
            33 | 65 => VerifyingKey::from_sec1_bytes(bytes),
            n => {
                return Err(CryptoError::InvalidPublicKey(format!(
                    "expected 33, 64, or 65 bytes, got {n}"
                )))
            }
        }
        .map_err(|e| CryptoError::InvalidPublicKey(format!("not a curve point: {e}")))?;
        Ok(Self::from_verifying_key(&verifying_key))
    }

    /// Parse a public key from hex in any encoding accepted by [`Self::from_slice`].
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&point.as_bytes()[1..]);
        Self(raw)
    }

    /// Return the raw 64-byte key.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render as `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(&self.0)
    }

    /// The account controlled by this key.
    pub fn address(&self) -> Account {
        Account::from_public_key_bytes(&self.0)
    }
}

impl Serialize for Secp256k1PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Secp256k1PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({}...)", hex::encode(&self.0[..4]))
    }
}

// ---------------------------------------------------------------------------
// RecoverableSignature impls
// ---------------------------------------------------------------------------

impl RecoverableSignature {
    /// The recovery parameter, `v - 27`.
    pub fn recovery_param(&self) -> Result<u8, CryptoError> {
        match self.v {
            27 | 28 => Ok(self.v - RECOVERY_BYTE_OFFSET),
            other => Err(CryptoError::InvalidRecoveryByte(other)),
        }
    }

    fn to_k256(&self) -> Result<(Signature, RecoveryId), CryptoError> {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(self.r.as_bytes());
        rs[32..].copy_from_slice(self.s.as_bytes());
        let signature = Signature::from_slice(&rs)
            .map_err(|e| CryptoError::InvalidSignature(format!("r or s out of range: {e}")))?;
        let recovery_id = RecoveryId::from_byte(self.recovery_param()?)
            .ok_or(CryptoError::InvalidRecoveryByte(self.v))?;
        // (r, n - s) signs for -R, whose y has the opposite parity.
        match signature.normalize_s() {
            Some(low) => Ok((
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            )),
            None => Ok((signature, recovery_id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Secp256k1KeyPair impls
// ---------------------------------------------------------------------------

impl Secp256k1KeyPair {
    /// Generate a new random key pair from the operating system RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self { signing_key: SigningKey::random(&mut csprng) }
    }

    /// Create a key pair from a 32-byte big-endian secret scalar.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, CryptoError> {
        if secret.len() != 32 {
            return Err(CryptoError::InvalidPrivateKey(format!(
                "private key must be 32 bytes, got {}",
                secret.len()
            )));
        }
        let signing_key = SigningKey::from_slice(secret).map_err(|_| {
            CryptoError::InvalidPrivateKey("scalar is zero or not below the curve order".into())
        })?;
        Ok(Self { signing_key })
    }

    /// Parse a 64-digit hex private key, `0x` optional.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Render the secret scalar as `0x`-prefixed hex.
    ///
    /// Intended for key export at generation time only.
    pub fn secret_hex(&self) -> String {
        hex::encode_prefixed(&self.signing_key.to_bytes())
    }

    /// The public key of this pair.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// The account controlled by this key.
    pub fn address(&self) -> Account {
        self.public_key().address()
    }

    /// Sign a 32-byte prehash, returning `(v, r, s)` with `v = 27 + recovery_param`.
    pub fn sign_prehash(&self, hash: &Bytes32) -> Result<RecoverableSignature, CryptoError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash.as_bytes())
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        if recovery_id.is_x_reduced() {
            return Err(CryptoError::SigningFailed(
                "recovery id with reduced x-coordinate cannot be encoded in v".into(),
            ));
        }
        let (r, s) = signature.split_bytes();
        let mut r_bytes = [0u8; 32];
        let mut s_bytes = [0u8; 32];
        r_bytes.copy_from_slice(&r);
        s_bytes.copy_from_slice(&s);
        Ok(RecoverableSignature {
            v: RECOVERY_BYTE_OFFSET + recovery_id.to_byte(),
            r: Bytes32(r_bytes),
            s: Bytes32(s_bytes),
        })
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// Recover the public key that produced `signature` over the 32-byte `hash`.
///
/// Succeeds for any mathematically consistent signature. It says nothing
/// about *which* key was expected; compare the result yourself.
pub fn recover_public_key(
    hash: &Bytes32,
    signature: &RecoverableSignature,
) -> Result<Secp256k1PublicKey, CryptoError> {
    let (sig, recovery_id) = signature.to_k256()?;
    let key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(Secp256k1PublicKey::from_verifying_key(&key))
}
