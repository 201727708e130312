//! # Key and Address Subcommands
//!
//! `keygen`, `address`, and `checksum`.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use sv_crypto::{is_valid_checksum_address, to_checksum_address, Secp256k1KeyPair};

/// Environment variable holding the voter's private key.
pub const KEY_ENV: &str = "SV_PROXY_KEY";

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {}

/// Arguments for the address subcommand.
#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Hex-encoded secp256k1 private key.
    #[arg(long, env = KEY_ENV, hide_env_values = true)]
    pub key: String,
}

/// Arguments for the checksum subcommand.
#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// 40-hex-digit address, any case.
    pub address: String,
}

#[derive(Serialize)]
struct GeneratedKey {
    private_key: String,
    public_key: String,
    address: String,
}

/// Generate a random key and print it with its address.
pub fn run_keygen(_args: &KeygenArgs) -> Result<String> {
    let key = Secp256k1KeyPair::generate();
    let out = GeneratedKey {
        private_key: key.secret_hex(),
        public_key: key.public_key().to_hex(),
        address: key.address().to_string(),
    };
    tracing::info!(address = %out.address, "generated key");
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Print the address of a private key.
pub fn run_address(args: &AddressArgs) -> Result<String> {
    let key = Secp256k1KeyPair::from_hex(&args.key).context("parsing private key")?;
    Ok(key.address().to_string())
}

/// Print the EIP-55 form of an address.
pub fn run_checksum(args: &ChecksumArgs) -> Result<String> {
    let checksummed = to_checksum_address(&args.address)?;
    if !is_valid_checksum_address(&args.address) {
        tracing::warn!(address = %args.address, "input has mixed case but a wrong checksum");
    }
    Ok(checksummed)
}
