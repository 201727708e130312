//! # Proxy Vote Wire Payload
//!
//! `proxyReq` is the `bytes32[5]` submitted on chain by a relayer:
//!
//! ```text
//! [ r, s, packed2, ballotId, voteData ]
//! ```
//!
//! `packed2` carries the recovery byte and the sequence number in one word:
//! byte 0 is `v` (27 or 28), bytes 1..27 are zero, and bytes 27..32 hold
//! the sequence big-endian. The contract reads these offsets directly.
//!
//! `extra` (for example an encryption public key) travels beside the
//! array, not inside it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sv_core::{hex, Bytes32, ValidationError};
use sv_crypto::RecoverableSignature;

use crate::message::{check_sequence, SequenceCheck, SEQUENCE_VALUE_LEN};

const SEQUENCE_OFFSET: usize = 32 - SEQUENCE_VALUE_LEN;

/// The fixed five-word part of a proxy vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Bytes32; 5]", into = "[Bytes32; 5]")]
pub struct ProxyVoteRequest {
    /// Signature `r`.
    pub r: Bytes32,
    /// Signature `s`.
    pub s: Bytes32,
    /// `v` and sequence, packed.
    pub packed2: Bytes32,
    /// The ballot being voted on.
    pub ballot_id: Bytes32,
    /// Encoded vote.
    pub vote_data: Bytes32,
}

/// A signed proxy vote as handed to a relayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedProxyVote {
    /// The on-chain `bytes32[5]`.
    pub proxy_req: ProxyVoteRequest,
    /// Bytes signed after the fixed fields.
    #[serde(with = "hex_bytes", default)]
    pub extra: Vec<u8>,
}

/// Pack `v` and `sequence` into the `packed2` word.
///
/// Fails if `sequence` does not fit the 5-byte wire field.
pub fn pack_v_and_sequence(v: u8, sequence: u64) -> Result<Bytes32, ValidationError> {
    let sequence = check_sequence(sequence, SequenceCheck::Skip)?;
    let mut word = [0u8; 32];
    word[0] = v;
    let value = &sequence.to_be_bytes()[8 - SEQUENCE_VALUE_LEN..];
    word[SEQUENCE_OFFSET..].copy_from_slice(value);
    Ok(word.into())
}

impl ProxyVoteRequest {
    /// Assemble a request from a signature and the signed fields.
    pub fn new(
        signature: &RecoverableSignature,
        sequence: u64,
        ballot_id: Bytes32,
        vote_data: Bytes32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            r: signature.r,
            s: signature.s,
            packed2: pack_v_and_sequence(signature.v, sequence)?,
            ballot_id,
            vote_data,
        })
    }

    /// The recovery byte from `packed2`.
    pub fn v(&self) -> u8 {
        self.packed2.0[0]
    }

    /// The sequence number from the low five bytes of `packed2`.
    pub fn sequence(&self) -> u64 {
        let mut wide = [0u8; 8];
        wide[8 - SEQUENCE_VALUE_LEN..].copy_from_slice(&self.packed2.0[SEQUENCE_OFFSET..]);
        u64::from_be_bytes(wide)
    }

    /// The `(v, r, s)` signature carried by this request.
    pub fn signature(&self) -> RecoverableSignature {
        RecoverableSignature { v: self.v(), r: self.r, s: self.s }
    }

    /// The five words in wire order.
    pub fn to_words(&self) -> [Bytes32; 5] {
        [self.r, self.s, self.packed2, self.ballot_id, self.vote_data]
    }
}

impl From<[Bytes32; 5]> for ProxyVoteRequest {
    fn from(words: [Bytes32; 5]) -> Self {
        let [r, s, packed2, ballot_id, vote_data] = words;
        Self { r, s, packed2, ballot_id, vote_data }
    }
}

impl From<ProxyVoteRequest> for [Bytes32; 5] {
    fn from(req: ProxyVoteRequest) -> Self {
        req.to_words()
    }
}

mod hex_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode_prefixed(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed2_offsets() {
        let word = pack_v_and_sequence(28, 0xdead_beef).unwrap();
        assert_eq!(word.0[0], 28);
        assert!(word.0[1..27].iter().all(|b| *b == 0));
        assert_eq!(&word.0[27..], &[0x00, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_unpack_v_and_sequence() {
        let req = ProxyVoteRequest {
            r: Bytes32::ZERO,
            s: Bytes32::ZERO,
            packed2: pack_v_and_sequence(27, 42).unwrap(),
            ballot_id: Bytes32::ZERO,
            vote_data: Bytes32::ZERO,
        };
        assert_eq!(req.v(), 27);
        assert_eq!(req.sequence(), 42);
    }

    #[test]
    fn test_sequence_reads_all_five_bytes() {
        let mut packed2 = pack_v_and_sequence(27, 1).unwrap();
        packed2.0[27] = 0x01;
        let zero = Bytes32::ZERO;
        let req = ProxyVoteRequest::from([zero, zero, packed2, zero, zero]);
        assert_eq!(req.sequence(), (1 << 32) + 1);
    }

    #[test]
    fn test_pack_rejects_sequence_wider_than_field() {
        assert!(pack_v_and_sequence(27, (1 << 40) - 1).is_ok());
        assert!(matches!(
            pack_v_and_sequence(27, 1 << 40),
            Err(ValidationError::SequenceOutOfRange { value, .. }) if value == 1 << 40
        ));
    }

    #[test]
    fn test_json_wire_form() {
        let vote = SignedProxyVote {
            proxy_req: ProxyVoteRequest::from([
                Bytes32([1; 32]),
                Bytes32([2; 32]),
                pack_v_and_sequence(27, 5).unwrap(),
                Bytes32([3; 32]),
                Bytes32([4; 32]),
            ]),
            extra: vec![0xab, 0xcd],
        };
        let json = serde_json::to_value(&vote).unwrap();
        let words = json["proxyReq"].as_array().unwrap();
        assert_eq!(words.len(), 5);
        assert_eq!(words[0], format!("0x{}", "01".repeat(32)));
        assert_eq!(json["extra"], "0xabcd");

        let back: SignedProxyVote = serde_json::from_value(json).unwrap();
        assert_eq!(back, vote);
    }

    #[test]
    fn test_json_missing_extra_defaults_empty() {
        let words: Vec<String> = (0..5).map(|_| format!("0x{}", "00".repeat(32))).collect();
        let json = serde_json::json!({ "proxyReq": words });
        let vote: SignedProxyVote = serde_json::from_value(json).unwrap();
        assert!(vote.extra.is_empty());
    }
}
