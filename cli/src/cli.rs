//! # CLI Interface
//!
//! Defines the command-line argument structure for `sello` using `clap`
//! derive. Supports four subcommands: `generate`, `sign`, `verify`, and
//! `version`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SELLO signing tool.
///
/// Generates Ed25519 key pairs, signs files (detached, embedded, or as a
/// signed checksum manifest), and verifies signatures against one or more
/// trusted public keys.
#[derive(Parser, Debug)]
#[command(
    name = "sello",
    about = "signify-compatible file signing and verification",
    version,
    propagate_version = true
)]
pub struct SelloCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the sello binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new key pair — writes the public and secret key files.
    Generate(GenerateArgs),
    /// Sign a message file or a set of files.
    Sign(SignArgs),
    /// Verify a signature against trusted public keys.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Manifest digest algorithm choices.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// SHA-256 digests (the default).
    Sha256,
    /// SHA-512 digests.
    Sha512,
}

/// Arguments for the `generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path for the new public key file.
    #[arg(long, short = 'p')]
    pub pubkey: PathBuf,

    /// Path for the new secret key file (written with mode 0600 on Unix).
    #[arg(long, short = 's')]
    pub seckey: PathBuf,

    /// Key name used in the untrusted comment lines.
    #[arg(long, short = 'c', default_value = "sello")]
    pub comment: String,

    /// Create the secret key without passphrase protection.
    #[arg(long, short = 'n')]
    pub no_passphrase: bool,

    /// bcrypt_pbkdf work factor for passphrase protection.
    #[arg(long, default_value_t = sello_protocol::config::DEFAULT_KDF_ROUNDS)]
    pub rounds: u32,

    /// Read the passphrase from this file instead of SELLO_PASSPHRASE.
    #[arg(long, env = "SELLO_PASSPHRASE_FILE")]
    pub passphrase_file: Option<PathBuf>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Path to the secret key file.
    #[arg(long, short = 's')]
    pub seckey: PathBuf,

    /// Message file to sign (detached/embedded modes).
    #[arg(long, short = 'm', conflicts_with = "checksum")]
    pub message: Option<PathBuf>,

    /// Output signature file. Defaults to `<message>.sig`; required in
    /// checksum mode.
    #[arg(long, short = 'x')]
    pub signature: Option<PathBuf>,

    /// Embed the message in the signature file instead of writing a
    /// detached signature.
    #[arg(long, short = 'e', conflicts_with = "checksum")]
    pub embed: bool,

    /// Sign a checksum manifest over the listed files instead of a single
    /// message.
    #[arg(long, short = 'C')]
    pub checksum: bool,

    /// Digest algorithm for checksum mode.
    #[arg(long, short = 'a', value_enum, default_value = "sha256")]
    pub algorithm: Algorithm,

    /// Root directory manifest paths are relative to.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Untrusted comment for the signature file.
    #[arg(long, short = 'c')]
    pub comment: Option<String>,

    /// Read the passphrase from this file instead of SELLO_PASSPHRASE.
    #[arg(long, env = "SELLO_PASSPHRASE_FILE")]
    pub passphrase_file: Option<PathBuf>,

    /// Files to include in the checksum manifest.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Arguments for the `verify` subcommand.
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Verify against this single public key file. When omitted, every
    /// `*.pub` file in the trusted key directory is tried in turn.
    #[arg(long, short = 'p')]
    pub pubkey: Option<PathBuf>,

    /// Trusted key directory for multi-key verification.
    ///
    /// Defaults to `<config dir>/sello/trusted`.
    #[arg(long, env = "SELLO_KEYDIR")]
    pub keydir: Option<PathBuf>,

    /// Signature file to verify.
    #[arg(long, short = 'x')]
    pub signature: PathBuf,

    /// Message file (detached mode).
    #[arg(long, short = 'm')]
    pub message: Option<PathBuf>,

    /// The signature file embeds its message.
    #[arg(long, short = 'e', conflicts_with = "message")]
    pub embedded: bool,

    /// Write the embedded message to this file after verification.
    #[arg(long, short = 'o', requires = "embedded")]
    pub output: Option<PathBuf>,

    /// The signature file is a signed checksum manifest; check every
    /// listed file.
    #[arg(long, short = 'C', conflicts_with_all = ["message", "embedded"])]
    pub checksum: bool,

    /// Root directory manifest paths are relative to.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Emit a machine-readable JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}
