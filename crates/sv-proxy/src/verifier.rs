//! # Proxy Ballot Verification
//!
//! Rebuilds the signed message from a received payload and recovers the
//! account that signed it.
//!
//! ## Contract
//!
//! `verified: true` means the signature is mathematically consistent and
//! recovers to *some* account. It is not an authorization decision: the
//! verifier does not know who was expected to sign. Callers must compare
//! [`VerificationOutcome::address`] against their own voter list, for
//! example with [`VerificationOutcome::is_signed_by`].

use serde::Serialize;
use sv_core::SvError;
use sv_crypto::{recover_public_key, Account};

use crate::message::{proxy_message_hash, SequenceCheck};
use crate::request::{ProxyVoteRequest, SignedProxyVote};

/// Result of signer recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    /// Recovery succeeded.
    pub verified: bool,
    /// The recovered signer.
    pub address: Account,
}

impl VerificationOutcome {
    /// Whether the recovered signer is `expected`.
    pub fn is_signed_by(&self, expected: &Account) -> bool {
        self.verified && self.address == *expected
    }
}

/// Recover the signer of a proxy vote.
///
/// The sequence number is taken from all five wire bytes of `packed2`
/// as-is, so a zero or wider-than-32-bit sequence signed under the relay
/// escape hatch still verifies. High-S signatures are accepted.
///
/// # Errors
///
/// - `SvError::Crypto` if `v` is not 27/28, `(r, s)` is malformed, or no
///   public key can be recovered.
pub fn verify_proxy_ballot(
    request: &ProxyVoteRequest,
    extra: &[u8],
) -> Result<VerificationOutcome, SvError> {
    let sequence = request.sequence();
    let hash = proxy_message_hash(
        sequence,
        &request.ballot_id,
        &request.vote_data,
        extra,
        SequenceCheck::Skip,
    )?;
    let public_key = recover_public_key(&hash, &request.signature())?;
    let address = public_key.address();

    tracing::debug!(
        ballot_id = %request.ballot_id,
        sequence,
        address = %address,
        "recovered proxy ballot signer"
    );

    Ok(VerificationOutcome { verified: true, address })
}

/// [`verify_proxy_ballot`] over a full signed payload.
pub fn verify_signed_proxy_vote(vote: &SignedProxyVote) -> Result<VerificationOutcome, SvError> {
    verify_proxy_ballot(&vote.proxy_req, &vote.extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::{sign_proxy_ballot, SignOptions};
    use crate::request::pack_v_and_sequence;
    use sv_core::{Bytes32, CryptoError, U256};
    use sv_crypto::Secp256k1KeyPair;

    const GOLDEN_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const GOLDEN_ADDRESS: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";
    const CURVE_ORDER: &str = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

    fn golden_request() -> ProxyVoteRequest {
        let mut vote_data = [0u8; 32];
        vote_data[0] = 0x87;
        ProxyVoteRequest {
            r: "0x4c4119c9ae519493f9614341469baf77540227ff4847d9d0a5f29c61d463b5ae"
                .parse()
                .unwrap(),
            s: "0x60ccd3dc0c995a0f6086ea1a7343a0e0bec50a6681c71af450e3fff0914d8a67"
                .parse()
                .unwrap(),
            packed2: pack_v_and_sequence(28, 1).unwrap(),
            ballot_id: Bytes32::from(U256::from(1u64)),
            vote_data: Bytes32(vote_data),
        }
    }

    fn signed(key: &Secp256k1KeyPair) -> SignedProxyVote {
        sign_proxy_ballot(
            &Bytes32([0x11; 32]),
            3,
            &Bytes32([0x22; 32]),
            b"enc-key",
            key,
            &SignOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_recovers_signer() {
        let key = Secp256k1KeyPair::generate();
        let outcome = verify_signed_proxy_vote(&signed(&key)).unwrap();
        assert!(outcome.verified);
        assert_eq!(outcome.address, key.address());
        assert!(outcome.is_signed_by(&key.address()));
    }

    #[test]
    fn test_verified_does_not_mean_expected_signer() {
        let key = Secp256k1KeyPair::generate();
        let other = Secp256k1KeyPair::generate();
        let mut vote = signed(&key);
        vote.extra = b"different".to_vec();
        // A tampered payload may still recover to some account.
        if let Ok(outcome) = verify_signed_proxy_vote(&vote) {
            assert!(outcome.verified);
            assert_ne!(outcome.address, key.address());
            assert!(!outcome.is_signed_by(&other.address()));
        }
    }

    #[test]
    fn test_bad_v_is_crypto_error() {
        let key = Secp256k1KeyPair::generate();
        let mut vote = signed(&key);
        vote.proxy_req.packed2.0[0] = 0;
        let err = verify_signed_proxy_vote(&vote).unwrap_err();
        assert_eq!(err, SvError::Crypto(CryptoError::InvalidRecoveryByte(0)));
    }

    #[test]
    fn test_sequence_is_part_of_signature() {
        let key = Secp256k1KeyPair::generate();
        let mut vote = signed(&key);
        vote.proxy_req.packed2.0[31] ^= 0x01;
        match verify_signed_proxy_vote(&vote) {
            Ok(outcome) => assert_ne!(outcome.address, key.address()),
            Err(e) => assert!(matches!(e, SvError::Crypto(_))),
        }
    }

    #[test]
    fn test_golden_request_recovers_golden_address() {
        let outcome = verify_proxy_ballot(&golden_request(), &[]).unwrap();
        assert_eq!(outcome.address.to_string(), GOLDEN_ADDRESS);
    }

    #[test]
    fn test_high_s_signature_recovers_same_signer() {
        let mut req = golden_request();
        let n = U256::from_str_radix(CURVE_ORDER, 16).unwrap();
        req.s = Bytes32::from(n - req.s.to_u256());
        req.packed2.0[0] = 27;

        let outcome = verify_proxy_ballot(&req, &[]).unwrap();
        assert_eq!(outcome.address.to_string(), GOLDEN_ADDRESS);
    }

    #[test]
    fn test_five_byte_sequence_verifies() {
        let key = Secp256k1KeyPair::from_hex(GOLDEN_KEY).unwrap();
        let opts = SignOptions::default().skip_sequence_check();
        let vote = sign_proxy_ballot(
            &Bytes32::from(U256::from(1u64)),
            1 << 32,
            &Bytes32::ZERO,
            &[],
            &key,
            &opts,
        )
        .unwrap();
        assert_eq!(vote.proxy_req.packed2.0[27], 1);

        let outcome = verify_signed_proxy_vote(&vote).unwrap();
        assert_eq!(outcome.address.to_string(), GOLDEN_ADDRESS);

        // Dropping the fifth byte changes the signed message.
        let mut narrowed = vote.clone();
        narrowed.proxy_req.packed2.0[27] = 0;
        if let Ok(outcome) = verify_signed_proxy_vote(&narrowed) {
            assert_ne!(outcome.address.to_string(), GOLDEN_ADDRESS);
        }
    }

    #[test]
    fn test_outcome_serializes_checksummed() {
        let key = Secp256k1KeyPair::from_hex(GOLDEN_KEY).unwrap();
        let outcome = verify_signed_proxy_vote(&signed(&key)).unwrap();
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["verified"], true);
        assert_eq!(json["address"], "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23");
    }
}
