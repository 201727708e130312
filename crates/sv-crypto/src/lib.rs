#![deny(missing_docs)]

//! # sv-crypto: Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for proxy ballots:
//!
//! - **Keccak-256** digests (`sha3::Keccak256`).
//! - **secp256k1** recoverable ECDSA signing and public key recovery
//!   (`k256`), with `v = 27 + recovery_param`.
//! - **Account addresses**: derivation from public keys and EIP-55
//!   checksum casing.
//!
//! ## Crate Policy
//!
//! - Depends only on `sv-core` internally.
//! - No mocking of cryptographic operations in tests: all tests use real
//!   Keccak-256 and real secp256k1.
//! - `unsafe` prohibited.

pub mod address;
pub mod keccak;
pub mod secp256k1;

pub use address::{derive_address, is_valid_checksum_address, to_checksum_address, Account};
pub use keccak::{keccak256, keccak256_concat};
pub use secp256k1::{
    recover_public_key, RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey,
};
