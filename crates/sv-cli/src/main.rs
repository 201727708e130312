//! # svp CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;
use sv_cli::{encode, keys, signing};
use tracing_subscriber::EnvFilter;

/// Off-chain signed proxy ballots.
///
/// Encodes ballot parameters, signs votes for relayed submission, and
/// recovers the signer of a received payload.
#[derive(Parser, Debug)]
#[command(name = "svp", version, about)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a random secp256k1 key.
    Keygen(keys::KeygenArgs),
    /// Print the address of a private key.
    Address(keys::AddressArgs),
    /// Print the EIP-55 checksummed form of an address.
    Checksum(keys::ChecksumArgs),
    /// Combine submission flags.
    Flags(encode::FlagsArgs),
    /// Pack submission bits and voting window into one word.
    PackTiming(encode::PackTimingArgs),
    /// Split a packed timing word into its fields.
    UnpackTiming(encode::UnpackTimingArgs),
    /// Range-3 vote encoding.
    Range3(encode::Range3Args),
    /// Sign a proxy ballot.
    Sign(signing::SignArgs),
    /// Recover the signer of a proxy ballot payload.
    Verify(signing::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable.
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let output = match &cli.command {
        Commands::Keygen(args) => keys::run_keygen(args)?,
        Commands::Address(args) => keys::run_address(args)?,
        Commands::Checksum(args) => keys::run_checksum(args)?,
        Commands::Flags(args) => encode::run_flags(args)?,
        Commands::PackTiming(args) => encode::run_pack_timing(args)?,
        Commands::UnpackTiming(args) => encode::run_unpack_timing(args)?,
        Commands::Range3(args) => encode::run_range3(args)?,
        Commands::Sign(args) => signing::run_sign(args)?,
        Commands::Verify(args) => signing::run_verify(args)?,
    };
    println!("{output}");

    Ok(())
}
