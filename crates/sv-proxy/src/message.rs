//! # Proxy Ballot Message
//!
//! The byte string that is hashed and signed for a proxy vote. The ballot
//! box contract rebuilds it from the submitted payload, so the layout is
//! fixed:
//!
//! ```text
//! offset  len  field
//!      0   31  sequence, big-endian in the low 5 bytes (first 26 zero)
//!     31   32  ballot id
//!     63   32  vote data
//!     95    *  extra (raw, any length)
//! ```

use sv_core::{Bytes32, ValidationError};
use sv_crypto::keccak256_concat;

/// Width of the leading sequence field.
pub const SEQUENCE_FIELD_LEN: usize = 31;

/// Bytes of the sequence field that carry the sequence number.
pub const SEQUENCE_VALUE_LEN: usize = 5;

/// Length of the message before `extra`.
pub const FIXED_MESSAGE_LEN: usize = SEQUENCE_FIELD_LEN + 32 + 32;

/// Largest sequence number the 5-byte wire field can carry.
pub const MAX_WIRE_SEQUENCE: u64 = (1 << (8 * SEQUENCE_VALUE_LEN)) - 1;

const ENFORCED_RANGE: &str = "0 < sequence < 2^32";
const WIRE_RANGE: &str = "sequence <= 2^40 - 1";

/// Whether to enforce `0 < sequence < 2^32`.
///
/// `Skip` exists for relays and batch tooling that replay payloads with a
/// sequence of zero or one wider than 32 bits; it should not be the
/// default anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceCheck {
    /// Reject sequence numbers outside `0 < sequence < 2^32`.
    #[default]
    Enforce,
    /// Accept any sequence number that fits the 5-byte wire field.
    Skip,
}

/// Validate a sequence number against `check`.
///
/// Under [`SequenceCheck::Enforce`] the value must satisfy
/// `0 < sequence < 2^32`. Under [`SequenceCheck::Skip`] it must only fit
/// in 5 bytes.
pub fn check_sequence(sequence: u64, check: SequenceCheck) -> Result<u64, ValidationError> {
    let (ok, expected) = match check {
        SequenceCheck::Enforce => (sequence > 0 && sequence <= u64::from(u32::MAX), ENFORCED_RANGE),
        SequenceCheck::Skip => (sequence <= MAX_WIRE_SEQUENCE, WIRE_RANGE),
    };
    if !ok {
        return Err(ValidationError::SequenceOutOfRange { value: sequence, expected });
    }
    Ok(sequence)
}

/// Encode the 31-byte sequence field.
///
/// Only the low 5 bytes of `sequence` are written; callers validate with
/// [`check_sequence`] first.
pub fn sequence_field(sequence: u64) -> [u8; SEQUENCE_FIELD_LEN] {
    let mut field = [0u8; SEQUENCE_FIELD_LEN];
    let value = &sequence.to_be_bytes()[8 - SEQUENCE_VALUE_LEN..];
    field[SEQUENCE_FIELD_LEN - SEQUENCE_VALUE_LEN..].copy_from_slice(value);
    field
}

/// Build the message that is hashed and signed for a proxy vote.
pub fn build_proxy_message(
    sequence: u64,
    ballot_id: &Bytes32,
    vote_data: &Bytes32,
    extra: &[u8],
    check: SequenceCheck,
) -> Result<Vec<u8>, ValidationError> {
    check_sequence(sequence, check)?;
    let mut message = Vec::with_capacity(FIXED_MESSAGE_LEN + extra.len());
    message.extend_from_slice(&sequence_field(sequence));
    message.extend_from_slice(ballot_id.as_bytes());
    message.extend_from_slice(vote_data.as_bytes());
    message.extend_from_slice(extra);
    Ok(message)
}

/// Keccak-256 of [`build_proxy_message`].
pub fn proxy_message_hash(
    sequence: u64,
    ballot_id: &Bytes32,
    vote_data: &Bytes32,
    extra: &[u8],
    check: SequenceCheck,
) -> Result<Bytes32, ValidationError> {
    check_sequence(sequence, check)?;
    Ok(keccak256_concat(&[
        &sequence_field(sequence)[..],
        &ballot_id.as_bytes()[..],
        &vote_data.as_bytes()[..],
        extra,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_crypto::keccak256;

    fn id(n: u8) -> Bytes32 {
        let mut b = [0u8; 32];
        b[31] = n;
        Bytes32(b)
    }

    #[test]
    fn test_layout() {
        let vote_data = Bytes32([0xaa; 32]);
        let msg = build_proxy_message(
            0x0102_0304,
            &id(7),
            &vote_data,
            &[0xde, 0xad],
            SequenceCheck::Enforce,
        )
        .unwrap();
        assert_eq!(msg.len(), FIXED_MESSAGE_LEN + 2);
        assert!(msg[..27].iter().all(|b| *b == 0));
        assert_eq!(&msg[27..31], &[1, 2, 3, 4]);
        assert_eq!(&msg[31..63], id(7).as_bytes());
        assert_eq!(&msg[63..95], vote_data.as_bytes());
        assert_eq!(&msg[95..], &[0xde, 0xad]);
    }

    #[test]
    fn test_five_byte_sequence_layout() {
        let field = sequence_field(0x05_0102_0304);
        assert!(field[..26].iter().all(|b| *b == 0));
        assert_eq!(&field[26..], &[5, 1, 2, 3, 4]);
        assert_eq!(sequence_field(MAX_WIRE_SEQUENCE)[26..], [0xff; 5]);
    }

    #[test]
    fn test_zero_sequence_needs_skip() {
        let err = build_proxy_message(0, &id(1), &Bytes32::ZERO, &[], SequenceCheck::Enforce);
        assert!(matches!(err, Err(ValidationError::SequenceOutOfRange { value: 0, .. })));
        assert!(build_proxy_message(0, &id(1), &Bytes32::ZERO, &[], SequenceCheck::Skip).is_ok());
    }

    #[test]
    fn test_check_sequence_bounds() {
        let max32 = u64::from(u32::MAX);
        assert_eq!(check_sequence(max32, SequenceCheck::Enforce), Ok(max32));
        assert!(check_sequence(1 << 32, SequenceCheck::Enforce).is_err());
        assert_eq!(check_sequence(1 << 32, SequenceCheck::Skip), Ok(1 << 32));
        assert_eq!(check_sequence(MAX_WIRE_SEQUENCE, SequenceCheck::Skip), Ok(MAX_WIRE_SEQUENCE));
        assert!(check_sequence(1 << 40, SequenceCheck::Skip).is_err());
    }

    #[test]
    fn test_hash_matches_message() {
        let msg = build_proxy_message(9, &id(3), &id(4), b"key", SequenceCheck::Enforce).unwrap();
        let hash = proxy_message_hash(9, &id(3), &id(4), b"key", SequenceCheck::Enforce).unwrap();
        assert_eq!(hash, keccak256(&msg));
    }

    #[test]
    fn test_golden_message_hash() {
        let mut vote_data = [0u8; 32];
        vote_data[0] = 0x87;
        let hash =
            proxy_message_hash(1, &id(1), &Bytes32(vote_data), &[], SequenceCheck::Enforce)
                .unwrap();
        assert_eq!(
            hash.to_hex(),
            "0x87b28cb21eb5979b62eb86ab5185df9f108618f527ba636dca2ff031b2c12430"
        );
    }
}
