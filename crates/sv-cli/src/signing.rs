//! # Sign and Verify Subcommands
//!
//! `sign` produces the JSON payload a voter hands to a relayer. `verify`
//! reads such a payload and reports the recovered signer.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use sv_core::{encode_range3, hex, parse_u256, Bytes32, U256};
use sv_crypto::{Account, Secp256k1KeyPair};
use sv_proxy::{
    check_sequence, sign_proxy_ballot, verify_signed_proxy_vote, SequenceCheck, SignOptions,
    SignedProxyVote,
};

use crate::keys::KEY_ENV;

/// Arguments for the sign subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Ballot identifier, decimal or `0x`-prefixed hex.
    #[arg(long, value_parser = parse_u256)]
    pub ballot_id: U256,

    /// Voter's sequence number for this ballot.
    #[arg(long)]
    pub sequence: u64,

    /// Range-3 votes in [-3, 3], comma separated.
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "vote_data",
        required_unless_present = "vote_data"
    )]
    pub votes: Vec<i8>,

    /// Raw 32-byte vote data, hex.
    #[arg(long)]
    pub vote_data: Option<Bytes32>,

    /// Extra bytes appended to the signed message, hex.
    #[arg(long, default_value = "0x")]
    pub extra: String,

    /// Accept sequence zero and sequences up to `2^40 - 1`.
    #[arg(long)]
    pub skip_sequence_check: bool,

    /// Hex-encoded secp256k1 private key.
    #[arg(long, env = KEY_ENV, hide_env_values = true)]
    pub key: String,
}

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Payload file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Fail unless the payload was signed by this address.
    #[arg(long)]
    pub expect: Option<Account>,
}

/// Sign a proxy ballot and print the payload as JSON.
pub fn run_sign(args: &SignArgs) -> Result<String> {
    let key = Secp256k1KeyPair::from_hex(&args.key).context("parsing private key")?;

    let (check, opts) = if args.skip_sequence_check {
        (SequenceCheck::Skip, SignOptions::default().skip_sequence_check())
    } else {
        (SequenceCheck::Enforce, SignOptions::default())
    };
    let sequence = check_sequence(args.sequence, check).context("checking sequence number")?;

    let vote_data = match args.vote_data {
        Some(data) => data,
        None => encode_range3(&args.votes).context("encoding votes")?,
    };
    let extra = hex::decode(&args.extra).context("parsing --extra")?;

    let vote = sign_proxy_ballot(
        &Bytes32::from(args.ballot_id),
        sequence,
        &vote_data,
        &extra,
        &key,
        &opts,
    )?;
    tracing::info!(signer = %key.address(), sequence, "signed proxy ballot");
    Ok(serde_json::to_string_pretty(&vote)?)
}

/// Verify a payload and print the outcome as JSON.
pub fn run_verify(args: &VerifyArgs) -> Result<String> {
    let raw = read_input(&args.input)?;
    let vote: SignedProxyVote =
        serde_json::from_str(&raw).context("parsing proxy vote payload")?;
    let outcome = verify_signed_proxy_vote(&vote)?;

    if let Some(expected) = &args.expect {
        if !outcome.is_signed_by(expected) {
            bail!("payload was signed by {}, expected {}", outcome.address, expected);
        }
    }
    Ok(serde_json::to_string_pretty(&outcome)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
