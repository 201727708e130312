//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the proxy ballot workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - `ValidationError`: an input is outside its documented domain.
//! - `FormatError`: a hex, decimal, or address string is malformed.
//! - `CryptoError`: key, signature, or recovery failures from secp256k1.
//!
//! Every error is terminal for the call that raised it. Nothing in this
//! workspace has side effects, so there is nothing to roll back.

use thiserror::Error;

/// Top-level error type for proxy ballot operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SvError {
    /// An input was outside its documented domain.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A textual input was malformed.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// A cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// An input value outside the domain of the operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A submission flag does not fit in 16 bits or is zero.
    #[error("submission flag {0:#x} is outside 0 < flag < 2^16")]
    FlagOutOfRange(u64),

    /// Two or more flags share a bit; the OR differs from the sum.
    #[error("submission flags overlap: OR = {or:#x}, sum = {sum:#x}")]
    OverlappingFlags {
        /// Bitwise OR of the inputs.
        or: u64,
        /// Arithmetic sum of the inputs.
        sum: u64,
    },

    /// The combined submission bits are zero.
    #[error("submission bits must be non-zero")]
    EmptyFlags,

    /// A packed timing field is outside its range.
    #[error("{field} out of range: {value} (expected {expected})")]
    TimingOutOfRange {
        /// Which field failed (`start`, `end`, `submission_bits`).
        field: &'static str,
        /// The offending value, rendered as text.
        value: String,
        /// The accepted range.
        expected: &'static str,
    },

    /// A Range-3 vote is outside `[-3, 3]`.
    #[error("vote at index {index} is {value}; Range-3 votes must be in [-3, 3]")]
    VoteOutOfRange {
        /// Position of the vote in the input.
        index: usize,
        /// The offending vote.
        value: i64,
    },

    /// More votes than fit in a 256-bit word.
    #[error("{count} votes exceeds the Range-3 capacity of {max}")]
    TooManyVotes {
        /// Number of votes supplied or requested.
        count: usize,
        /// Maximum number of votes (85).
        max: usize,
    },

    /// A decoded 3-bit slot holds the unused code 7.
    #[error("vote slot {index} holds invalid Range-3 code {code}")]
    InvalidVoteCode {
        /// Slot position.
        index: usize,
        /// The 3-bit code found.
        code: u8,
    },

    /// The proxy ballot sequence number is out of range.
    #[error("sequence {value} out of range (expected {expected})")]
    SequenceOutOfRange {
        /// The rejected sequence number.
        value: u64,
        /// The accepted range under the active policy.
        expected: &'static str,
    },

    /// A fixed-width field had the wrong length.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the field.
        field: &'static str,
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },
}

/// A malformed textual input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The string is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The string is not a 40-hex-digit account address.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The string is not a decimal integer.
    #[error("invalid decimal integer {0:?}")]
    InvalidDecimal(String),

    /// The value does not fit in 256 bits.
    #[error("value does not fit in 256 bits: {0}")]
    Overflow(String),
}

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The private key is not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The public key bytes do not describe a curve point.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// `(r, s)` is not a valid ECDSA signature.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// The `v` byte is not 27 or 28.
    #[error("invalid recovery byte v = {0}; expected 27 or 28")]
    InvalidRecoveryByte(u8),

    /// Public key recovery failed.
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),

    /// Signing failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
