//! # Proxy Ballot Signing
//!
//! Produces the payload a voter hands to a relayer: the message is built,
//! hashed with Keccak-256, and signed with the voter's secp256k1 key.
//! Signing is deterministic (RFC 6979), so the same inputs always yield
//! the same payload.

use sv_core::{Bytes32, SvError};
use sv_crypto::Secp256k1KeyPair;

use crate::message::{proxy_message_hash, SequenceCheck};
use crate::request::{ProxyVoteRequest, SignedProxyVote};

/// Options for [`sign_proxy_ballot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignOptions {
    /// Sequence number validation policy.
    pub sequence_check: SequenceCheck,
}

impl SignOptions {
    /// Accept sequence zero and sequences up to `2^40 - 1`. For relay and
    /// batch tooling only.
    pub fn skip_sequence_check(mut self) -> Self {
        self.sequence_check = SequenceCheck::Skip;
        self
    }
}

/// Sign a proxy ballot.
///
/// # Errors
///
/// - `SvError::Validation` if `sequence` fails the configured
///   [`SequenceCheck`].
/// - `SvError::Crypto` if signing fails.
pub fn sign_proxy_ballot(
    ballot_id: &Bytes32,
    sequence: u64,
    vote_data: &Bytes32,
    extra: &[u8],
    key: &Secp256k1KeyPair,
    opts: &SignOptions,
) -> Result<SignedProxyVote, SvError> {
    let hash = proxy_message_hash(sequence, ballot_id, vote_data, extra, opts.sequence_check)?;
    let signature = key.sign_prehash(&hash)?;

    tracing::debug!(
        ballot_id = %ballot_id,
        sequence,
        extra_len = extra.len(),
        signer = %key.address(),
        v = signature.v,
        "signed proxy ballot"
    );

    Ok(SignedProxyVote {
        proxy_req: ProxyVoteRequest::new(&signature, sequence, *ballot_id, *vote_data)?,
        extra: extra.to_vec(),
    })
}
