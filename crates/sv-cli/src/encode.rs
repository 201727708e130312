//! # Encoding Subcommands
//!
//! `flags`, `pack-timing`, `unpack-timing`, and `range3`: the fixed-width
//! encodings a ballot and its votes are published with.

use anyhow::Result;
use clap::{Args, Subcommand};
use sv_core::{
    decode_range3, encode_range3, pack_timing, parse_u256, unpack_timing, Bytes32,
    SubmissionBits, SubmissionFlag, U256,
};

/// Arguments for the flags subcommand.
#[derive(Args, Debug)]
pub struct FlagsArgs {
    /// Flag names: eth-native, off-chain-signed, unencrypted, encrypted,
    /// binding, official, testing.
    #[arg(required = true)]
    pub flags: Vec<SubmissionFlag>,
}

/// Arguments for the pack-timing subcommand.
#[derive(Args, Debug)]
pub struct PackTimingArgs {
    /// Voting opens (unix seconds).
    #[arg(long)]
    pub start: u64,
    /// Voting closes (unix seconds).
    #[arg(long)]
    pub end: u64,
    /// Submission flag names.
    #[arg(long, value_delimiter = ',', required = true)]
    pub flags: Vec<SubmissionFlag>,
}

/// Arguments for the unpack-timing subcommand.
#[derive(Args, Debug)]
pub struct UnpackTimingArgs {
    /// Packed word, hex (`0x…`) or decimal.
    #[arg(value_parser = parse_u256)]
    pub word: U256,
}

/// Arguments for the range3 subcommand.
#[derive(Args, Debug)]
pub struct Range3Args {
    #[command(subcommand)]
    pub command: Range3Command,
}

/// Range-3 operations.
#[derive(Subcommand, Debug)]
pub enum Range3Command {
    /// Encode votes in [-3, 3] into a 32-byte word.
    Encode {
        /// Votes, most significant first.
        #[arg(allow_negative_numbers = true)]
        votes: Vec<i8>,
    },
    /// Decode the first `count` votes from a 32-byte word.
    Decode {
        /// 32-byte hex word.
        data: Bytes32,
        /// Number of votes to read.
        #[arg(long)]
        count: usize,
    },
}

/// Print combined submission bits.
pub fn run_flags(args: &FlagsArgs) -> Result<String> {
    let bits = SubmissionBits::from_flags(&args.flags)?;
    Ok(format!("{bits} ({})", bits.bits()))
}

/// Print the packed timing word.
pub fn run_pack_timing(args: &PackTimingArgs) -> Result<String> {
    let bits = SubmissionBits::from_flags(&args.flags)?;
    let word = pack_timing(args.start, args.end, bits.bits())?;
    Ok(Bytes32::from(word).to_hex())
}

/// Print the fields of a packed timing word.
pub fn run_unpack_timing(args: &UnpackTimingArgs) -> Result<String> {
    let timing = unpack_timing(&args.word)?;
    if timing.submission_bits.unknown_bits() != 0 {
        tracing::warn!(
            unknown = timing.submission_bits.unknown_bits(),
            "submission bits contain unnamed flags"
        );
    }
    Ok(serde_json::to_string_pretty(&serde_json::json!({
        "start": timing.start_time,
        "end": timing.end_time,
        "submission_bits": timing.submission_bits.bits(),
        "flags": timing.submission_bits.flags(),
    }))?)
}

/// Encode or decode Range-3 vote data.
pub fn run_range3(args: &Range3Args) -> Result<String> {
    match &args.command {
        Range3Command::Encode { votes } => Ok(encode_range3(votes)?.to_hex()),
        Range3Command::Decode { data, count } => {
            let votes = decode_range3(data, *count)?;
            Ok(votes.iter().map(i8::to_string).collect::<Vec<_>>().join(","))
        }
    }
}
