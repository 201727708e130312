//! # sv-cli: Proxy Ballot Command-Line Interface
//!
//! The `svp` binary: key management, ballot encodings, and signing or
//! verifying off-chain proxy votes.
//!
//! ## Subcommands
//!
//! - `keygen`, `address`, `checksum`: keys and EIP-55 addresses
//! - `flags`, `pack-timing`, `unpack-timing`, `range3`: ballot encodings
//! - `sign`, `verify`: proxy vote payloads
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates and return the text to
//!   print; no protocol logic here.
//! - Private keys are read from `--key` or `SV_PROXY_KEY` and never logged.

pub mod encode;
pub mod keys;
pub mod signing;
