//! # Bit Packing: Timing Word and Range-3 Vote Data
//!
//! Fixed-width big-endian encodings consumed by the ballot box contract.
//!
//! ## Timing word
//!
//! ```text
//! bits 255..144  zero
//! bits 143..128  submission bits (16)
//! bits 127..64   start time (64)
//! bits  63..0    end time (64)
//! ```
//!
//! ## Range-3 vote data
//!
//! Each vote in `[-3, 3]` is stored as the 3-bit code `vote + 3`. Codes are
//! written from the most significant end of the 256-bit word, so up to 85
//! votes fit and the low bits are zero padding.

use serde::{Deserialize, Serialize};

use crate::bytes::Bytes32;
use crate::error::ValidationError;
use crate::flags::SubmissionBits;
use crate::uint::{to_u64, U256};

/// Maximum number of Range-3 votes in one 256-bit word.
pub const RANGE3_MAX_VOTES: usize = 85;

const RANGE3_MIN: i8 = -3;
const RANGE3_MAX: i8 = 3;
const RANGE3_CODE_BITS: usize = 3;
const START_SHIFT: usize = 64;
const BITS_SHIFT: usize = 128;
const TIMING_WORD_BITS: usize = 144;

/// The unpacked contents of a ballot timing word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedTiming {
    /// Submission and classification flags.
    pub submission_bits: SubmissionBits,
    /// Voting opens (unix seconds).
    pub start_time: u64,
    /// Voting closes (unix seconds).
    pub end_time: u64,
}

impl PackedTiming {
    /// Validate and bundle the three fields.
    pub fn new(
        start_time: u64,
        end_time: u64,
        submission_bits: SubmissionBits,
    ) -> Result<Self, ValidationError> {
        if start_time == 0 {
            return Err(timing_error("start", start_time.to_string()));
        }
        if end_time == 0 {
            return Err(timing_error("end", end_time.to_string()));
        }
        Ok(Self { submission_bits, start_time, end_time })
    }

    /// Pack into the 256-bit word.
    pub fn to_word(&self) -> U256 {
        (U256::from(self.submission_bits.bits()) << BITS_SHIFT)
            | (U256::from(self.start_time) << START_SHIFT)
            | U256::from(self.end_time)
    }
}

fn timing_error(field: &'static str, value: String) -> ValidationError {
    ValidationError::TimingOutOfRange {
        field,
        value,
        expected: match field {
            "submission_bits" => "0 < bits < 2^16",
            _ => "0 < t <= 2^64 - 1",
        },
    }
}

/// Pack start time, end time, and submission bits into one word.
///
/// Rejects `start == 0`, `end == 0`, and `submission_bits == 0`.
pub fn pack_timing(start: u64, end: u64, submission_bits: u16) -> Result<U256, ValidationError> {
    let bits = SubmissionBits::from_raw(submission_bits)
        .map_err(|_| timing_error("submission_bits", submission_bits.to_string()))?;
    Ok(PackedTiming::new(start, end, bits)?.to_word())
}

/// [`pack_timing`] over 256-bit inputs, rejecting times above `2^64 - 1`.
pub fn pack_timing_u256(
    start: U256,
    end: U256,
    submission_bits: u16,
) -> Result<U256, ValidationError> {
    let start = to_u64(&start).ok_or_else(|| timing_error("start", start.to_string()))?;
    let end = to_u64(&end).ok_or_else(|| timing_error("end", end.to_string()))?;
    pack_timing(start, end, submission_bits)
}

/// Split a timing word back into its fields.
pub fn unpack_timing(word: &U256) -> Result<PackedTiming, ValidationError> {
    if word.bit_len() > TIMING_WORD_BITS {
        return Err(timing_error("submission_bits", (*word >> BITS_SHIFT).to_string()));
    }
    // Little-endian limbs: end, start, bits.
    let [end, start, raw_bits, _] = *word.as_limbs();
    let raw_bits = raw_bits as u16;
    let bits = SubmissionBits::from_raw(raw_bits)
        .map_err(|_| timing_error("submission_bits", raw_bits.to_string()))?;
    PackedTiming::new(start, end, bits)
}

/// Encode up to 85 Range-3 votes into a 32-byte word.
pub fn encode_range3(votes: &[i8]) -> Result<Bytes32, ValidationError> {
    if votes.len() > RANGE3_MAX_VOTES {
        return Err(ValidationError::TooManyVotes {
            count: votes.len(),
            max: RANGE3_MAX_VOTES,
        });
    }
    if votes.is_empty() {
        return Ok(Bytes32::ZERO);
    }
    let mut acc = U256::ZERO;
    for (index, &vote) in votes.iter().enumerate() {
        if !(RANGE3_MIN..=RANGE3_MAX).contains(&vote) {
            return Err(ValidationError::VoteOutOfRange { index, value: i64::from(vote) });
        }
        let code = (vote - RANGE3_MIN) as u64;
        // At most 85 * 3 = 255 bits are ever occupied.
        acc = acc
            .checked_shl(RANGE3_CODE_BITS)
            .and_then(|a| a.checked_add(U256::from(code)))
            .ok_or(ValidationError::TooManyVotes { count: votes.len(), max: RANGE3_MAX_VOTES })?;
    }
    let padding = U256::BITS - RANGE3_CODE_BITS * votes.len();
    let word = acc
        .checked_shl(padding)
        .ok_or(ValidationError::TooManyVotes { count: votes.len(), max: RANGE3_MAX_VOTES })?;
    Ok(Bytes32::from(word))
}

/// Decode the first `count` Range-3 votes from a 32-byte word.
pub fn decode_range3(data: &Bytes32, count: usize) -> Result<Vec<i8>, ValidationError> {
    if count > RANGE3_MAX_VOTES {
        return Err(ValidationError::TooManyVotes { count, max: RANGE3_MAX_VOTES });
    }
    let word = data.to_u256();
    (0..count)
        .map(|index| {
            let shift = U256::BITS - RANGE3_CODE_BITS * (index + 1);
            let code = ((word >> shift).as_limbs()[0] & 0b111) as u8;
            if code > 6 {
                return Err(ValidationError::InvalidVoteCode { index, code });
            }
            Ok(code as i8 + RANGE3_MIN)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_timing_layout() {
        let word = pack_timing(0x1111, 0x2222, 0x4002).unwrap();
        let bytes = word.to_be_bytes::<32>();
        assert!(bytes[..14].iter().all(|b| *b == 0));
        assert_eq!(&bytes[14..16], &[0x40, 0x02]);
        assert_eq!(&bytes[16..24], &0x1111u64.to_be_bytes());
        assert_eq!(&bytes[24..32], &0x2222u64.to_be_bytes());
    }

    #[test]
    fn test_pack_timing_bounds() {
        assert!(pack_timing(1, u64::MAX, 1).is_ok());
        assert!(pack_timing(1, 2, 0).is_err());
        assert!(pack_timing(0, 2, 1).is_err());
        assert!(pack_timing(1, 0, 1).is_err());
    }

    #[test]
    fn test_pack_timing_u256_rejects_end_above_u64() {
        let too_big = U256::from(1u128 << 64);
        let one = U256::from(1u64);
        let err = pack_timing_u256(one, too_big, 1).unwrap_err();
        assert!(matches!(err, ValidationError::TimingOutOfRange { field: "end", .. }));
        assert!(pack_timing_u256(one, U256::from(u64::MAX), 1).is_ok());
    }

    #[test]
    fn test_unpack_inverts_pack() {
        let word = pack_timing(1_546_300_800, 1_577_836_800, 0x2006).unwrap();
        let timing = unpack_timing(&word).unwrap();
        assert_eq!(timing.start_time, 1_546_300_800);
        assert_eq!(timing.end_time, 1_577_836_800);
        assert_eq!(timing.submission_bits.bits(), 0x2006);
    }

    #[test]
    fn test_unpack_rejects_high_bits() {
        let word = U256::from(1u64) << 200usize;
        assert!(unpack_timing(&word).is_err());
    }

    #[test]
    fn test_range3_known_vector() {
        // codes 4, 1, 6 => 100 001 110 at the top of the word
        let data = encode_range3(&[1, -2, 3]).unwrap();
        assert_eq!(data.0[0], 0x87);
        assert!(data.0[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_range3_empty_and_full() {
        assert_eq!(encode_range3(&[]).unwrap(), Bytes32::ZERO);
        let full = encode_range3(&[3; RANGE3_MAX_VOTES]).unwrap();
        // 110 repeated 85 times then one padding bit
        assert_eq!(&full.0[..3], &[0xdb, 0x6d, 0xb6]);
        assert_eq!(full.0[31], 0x6c);
    }

    #[test]
    fn test_range3_rejects_out_of_range() {
        assert_eq!(
            encode_range3(&[0, 4]),
            Err(ValidationError::VoteOutOfRange { index: 1, value: 4 })
        );
        assert!(encode_range3(&[-4]).is_err());
        assert!(matches!(
            encode_range3(&[0; 86]),
            Err(ValidationError::TooManyVotes { count: 86, max: 85 })
        ));
    }

    #[test]
    fn test_decode_rejects_code_seven() {
        let data = Bytes32::from_bytes([0xff; 32]);
        assert_eq!(
            decode_range3(&data, 1),
            Err(ValidationError::InvalidVoteCode { index: 0, code: 7 })
        );
        assert!(decode_range3(&Bytes32::ZERO, 86).is_err());
    }
}
