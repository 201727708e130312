#![deny(missing_docs)]

//! # sv-proxy: Off-Chain Signed Proxy Ballots
//!
//! A voter signs their ballot off chain; a relayer submits it and pays for
//! the transaction. This crate builds and verifies those payloads:
//!
//! - `message`: the canonical byte string that is hashed and signed.
//! - `request`: the `bytes32[5]` wire payload and its `packed2` word.
//! - `signer`: [`sign_proxy_ballot`].
//! - `verifier`: [`verify_proxy_ballot`], which recovers the signer.
//!
//! ## Crate Policy
//!
//! - Every operation is a pure function of its arguments.
//! - Verification never decides authorization; see [`verifier`].

pub mod message;
pub mod request;
pub mod signer;
pub mod verifier;

pub use message::{
    build_proxy_message, check_sequence, proxy_message_hash, SequenceCheck, MAX_WIRE_SEQUENCE,
};
pub use request::{pack_v_and_sequence, ProxyVoteRequest, SignedProxyVote};
pub use signer::{sign_proxy_ballot, SignOptions};
pub use verifier::{verify_proxy_ballot, verify_signed_proxy_vote, VerificationOutcome};
