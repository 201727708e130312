//! # Submission Flags
//!
//! A ballot's submission bits say how votes may be submitted (natively,
//! as off-chain-signed proxy votes, in plaintext or encrypted) and how the
//! ballot is classified (binding, official, testing). On chain they are a
//! single `uint16` bitmask.
//!
//! ## Invariant
//!
//! `SubmissionBits` is always `0 < bits < 2^16` and is only produced by
//! [`combine_flags`] (or the typed wrapper [`SubmissionBits::from_flags`]),
//! which rejects overlapping inputs instead of silently OR-ing them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named submission or classification flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionFlag {
    /// Votes are cast by the voter's own transaction.
    EthNative,
    /// Votes are signed off chain and relayed (proxy votes).
    OffChainSigned,
    /// Vote data is submitted in plaintext.
    Unencrypted,
    /// Vote data is encrypted until the ballot closes.
    Encrypted,
    /// The ballot result is binding.
    Binding,
    /// The ballot is official.
    Official,
    /// The ballot is a test ballot.
    Testing,
}

/// Every named flag, in bit order.
pub const ALL_FLAGS: [SubmissionFlag; 7] = [
    SubmissionFlag::EthNative,
    SubmissionFlag::OffChainSigned,
    SubmissionFlag::Unencrypted,
    SubmissionFlag::Encrypted,
    SubmissionFlag::Binding,
    SubmissionFlag::Official,
    SubmissionFlag::Testing,
];

impl SubmissionFlag {
    /// The flag's bit in the on-chain `uint16`.
    pub const fn bit(self) -> u16 {
        match self {
            Self::EthNative => 0x0001,
            Self::OffChainSigned => 0x0002,
            Self::Unencrypted => 0x0004,
            Self::Encrypted => 0x0008,
            Self::Binding => 0x2000,
            Self::Official => 0x4000,
            Self::Testing => 0x8000,
        }
    }

    /// Kebab-case name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EthNative => "eth-native",
            Self::OffChainSigned => "off-chain-signed",
            Self::Unencrypted => "unencrypted",
            Self::Encrypted => "encrypted",
            Self::Binding => "binding",
            Self::Official => "official",
            Self::Testing => "testing",
        }
    }
}

impl std::fmt::Display for SubmissionFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubmissionFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_FLAGS
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = ALL_FLAGS.iter().map(|f| f.as_str()).collect();
                format!("unknown submission flag {s:?}; expected one of {}", names.join(", "))
            })
    }
}

/// A validated, non-zero 16-bit submission bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SubmissionBits(u16);

/// Combine raw flag values into submission bits.
///
/// Fails if any input is zero or does not fit in 16 bits, if two inputs
/// share a bit (the OR differs from the arithmetic sum), or if the result
/// is zero.
pub fn combine_flags(flags: &[u32]) -> Result<SubmissionBits, ValidationError> {
    let mut or: u64 = 0;
    let mut sum: u64 = 0;
    for &flag in flags {
        if flag == 0 || flag > u32::from(u16::MAX) {
            return Err(ValidationError::FlagOutOfRange(u64::from(flag)));
        }
        or |= u64::from(flag);
        sum += u64::from(flag);
    }
    if or != sum {
        return Err(ValidationError::OverlappingFlags { or, sum });
    }
    let bits = u16::try_from(or).map_err(|_| ValidationError::FlagOutOfRange(or))?;
    SubmissionBits::from_raw(bits)
}

impl SubmissionBits {
    /// Combine named flags. A repeated flag counts as an overlap.
    pub fn from_flags(flags: &[SubmissionFlag]) -> Result<Self, ValidationError> {
        let raw: Vec<u32> = flags.iter().map(|f| u32::from(f.bit())).collect();
        combine_flags(&raw)
    }

    /// Accept a word read from the wire, rejecting zero.
    pub fn from_raw(bits: u16) -> Result<Self, ValidationError> {
        if bits == 0 {
            return Err(ValidationError::EmptyFlags);
        }
        Ok(Self(bits))
    }

    /// The raw bitmask.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Whether `flag` is set.
    pub fn contains(self, flag: SubmissionFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// The named flags that are set, in bit order.
    pub fn flags(self) -> Vec<SubmissionFlag> {
        ALL_FLAGS.iter().copied().filter(|f| self.contains(*f)).collect()
    }

    /// Bits that correspond to no named flag.
    pub fn unknown_bits(self) -> u16 {
        let known = ALL_FLAGS.iter().fold(0u16, |acc, f| acc | f.bit());
        self.0 & !known
    }
}

impl From<SubmissionBits> for u16 {
    fn from(b: SubmissionBits) -> Self {
        b.0
    }
}

impl TryFrom<u16> for SubmissionBits {
    type Error = ValidationError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        Self::from_raw(bits)
    }
}

impl std::fmt::Display for SubmissionBits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_typical_proxy_ballot() {
        let bits = SubmissionBits::from_flags(&[
            SubmissionFlag::EthNative,
            SubmissionFlag::OffChainSigned,
            SubmissionFlag::Unencrypted,
            SubmissionFlag::Official,
        ])
        .unwrap();
        assert_eq!(bits.bits(), 0x4007);
        assert!(bits.contains(SubmissionFlag::OffChainSigned));
        assert!(!bits.contains(SubmissionFlag::Testing));
        assert_eq!(bits.unknown_bits(), 0);
    }

    #[test]
    fn test_overlap_rejected() {
        let err = combine_flags(&[0x1, 0x3]).unwrap_err();
        assert_eq!(err, ValidationError::OverlappingFlags { or: 0x3, sum: 0x4 });
        let dup = SubmissionBits::from_flags(&[SubmissionFlag::Binding, SubmissionFlag::Binding]);
        assert!(matches!(dup, Err(ValidationError::OverlappingFlags { .. })));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(combine_flags(&[0x10000]), Err(ValidationError::FlagOutOfRange(0x10000)));
        assert_eq!(combine_flags(&[0]), Err(ValidationError::FlagOutOfRange(0)));
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(combine_flags(&[]), Err(ValidationError::EmptyFlags));
        assert_eq!(SubmissionBits::from_raw(0), Err(ValidationError::EmptyFlags));
    }

    #[test]
    fn test_flags_lists_set_bits_and_unknowns() {
        let bits = SubmissionBits::from_raw(0x8010 | 0x0002).unwrap();
        assert_eq!(bits.flags(), vec![SubmissionFlag::OffChainSigned, SubmissionFlag::Testing]);
        assert_eq!(bits.unknown_bits(), 0x0010);
    }

    #[test]
    fn test_flag_names_parse() {
        for flag in ALL_FLAGS {
            assert_eq!(flag.as_str().parse::<SubmissionFlag>().unwrap(), flag);
        }
        assert!("proxy".parse::<SubmissionFlag>().is_err());
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<SubmissionBits>("0").is_err());
        let bits: SubmissionBits = serde_json::from_str("8194").unwrap();
        assert_eq!(bits.bits(), 0x2002);
    }
}
