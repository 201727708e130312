#![deny(missing_docs)]

//! # sv-core: Foundational Types for Proxy Ballots
//!
//! The leaf crate of the workspace. It defines the value types every other
//! crate exchanges and the pure bit-packing transforms that feed the
//! proxy ballot message.
//!
//! ## Key Design Principles
//!
//! 1. **Fixed-width values.** `Bytes32` for every on-chain `bytes32`,
//!    `alloy_primitives::U256` for 256-bit integers, parsed through explicit
//!    decimal and hex constructors.
//!
//! 2. **Closed flag set.** `SubmissionFlag` is a closed enum and
//!    `SubmissionBits` can only be built through validated combination.
//!
//! 3. **Layered errors.** `ValidationError`, `FormatError`, and
//!    `CryptoError` roll up into `SvError`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bytes;
pub mod error;
pub mod flags;
pub mod hex;
pub mod packing;
pub mod uint;

pub use bytes::Bytes32;
pub use error::{CryptoError, FormatError, SvError, ValidationError};
pub use flags::{combine_flags, SubmissionBits, SubmissionFlag};
pub use packing::{
    decode_range3, encode_range3, pack_timing, pack_timing_u256, unpack_timing, PackedTiming,
    RANGE3_MAX_VOTES,
};
pub use uint::{parse_u256, u256_from_dec_str, u256_from_hex_str, U256};
