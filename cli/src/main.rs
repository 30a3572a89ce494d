// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # SELLO Command-Line Tool
//!
//! Entry point for the `sello` binary. Parses CLI arguments, initializes
//! logging, and drives the protocol core. This shell layer owns everything
//! the core refuses to know about: default paths, passphrase sources,
//! report rendering, and exit codes.
//!
//! The binary supports four subcommands:
//!
//! - `generate` — create a key pair and write both halves to disk
//! - `sign`     — sign a message (detached/embedded) or a file set (manifest)
//! - `verify`   — verify against one key or a trusted-key directory
//! - `version`  — print build version information

mod cli;
mod logging;
mod passphrase;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use sello_protocol::codec::{
    decode_detached, decode_secret_key, encode_public_key, encode_secret_key,
};
use sello_protocol::sign::{generate_keypair, sign_files, sign_message, SignatureMode};
use sello_protocol::trust::{candidate_from_file, discover, Candidate};
use sello_protocol::verify::{verify_detached, verify_embedded, verify_files, Verified};
use sello_protocol::{HashAlgorithm, SecretKey};

use cli::{Algorithm, Commands, GenerateArgs, SelloCli, SignArgs, VerifyArgs};
use report::VerifyReport;

fn main() -> Result<()> {
    let args = SelloCli::parse();
    logging::init_logging("sello_cli=info,sello_protocol=info");

    match args.command {
        Commands::Generate(args) => generate(args),
        Commands::Sign(args) => sign(args),
        Commands::Verify(args) => verify(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

fn generate(args: GenerateArgs) -> Result<()> {
    let passphrase = if args.no_passphrase {
        None
    } else {
        match passphrase::resolve(args.passphrase_file.as_deref())? {
            Some(p) if !p.is_empty() => Some(p),
            _ => bail!(
                "no passphrase available; provide --passphrase-file or {}, \
                 or pass --no-passphrase to create an unprotected key",
                passphrase::PASSPHRASE_ENV
            ),
        }
    };

    let (public, secret) =
        generate_keypair(&args.comment, passphrase.as_deref(), args.rounds)?;

    write_artifact(&args.pubkey, &encode_public_key(&public)?)?;
    write_secret_artifact(&args.seckey, &encode_secret_key(&secret)?)?;

    tracing::info!(
        keynum = %public.keynum(),
        pubkey = %args.pubkey.display(),
        seckey = %args.seckey.display(),
        protected = secret.is_password_protected(),
        "key pair generated"
    );
    println!("key number: {}", public.keynum());
    Ok(())
}

// ---------------------------------------------------------------------------
// sign
// ---------------------------------------------------------------------------

fn sign(args: SignArgs) -> Result<()> {
    let secret = load_secret_key(&args.seckey)?;
    let passphrase = passphrase_for(&secret, args.passphrase_file.as_deref())?;

    if args.checksum {
        if args.files.is_empty() {
            bail!("checksum mode requires at least one file to sign");
        }
        let Some(sig_path) = args.signature else {
            bail!("checksum mode requires an explicit --signature output path");
        };
        let algorithm = hash_algorithm(args.algorithm);
        let artifact = sign_files(
            &secret,
            passphrase.as_deref(),
            algorithm,
            &args.files,
            &args.root,
            args.comment.as_deref(),
        )?;
        write_artifact(&sig_path, &artifact)?;
        tracing::info!(
            files = args.files.len(),
            algorithm = algorithm.name(),
            signature = %sig_path.display(),
            "signed checksum manifest"
        );
        return Ok(());
    }

    let Some(message_path) = args.message else {
        bail!("provide --message to sign, or --checksum with a file list");
    };
    let message = fs::read(&message_path)
        .with_context(|| format!("failed to read message {}", message_path.display()))?;

    let mode = if args.embed {
        SignatureMode::Embedded
    } else {
        SignatureMode::Detached
    };
    let artifact = sign_message(
        &secret,
        passphrase.as_deref(),
        &message,
        mode,
        args.comment.as_deref(),
    )?;

    let sig_path = args
        .signature
        .unwrap_or_else(|| default_signature_path(&message_path));
    write_artifact(&sig_path, &artifact)?;
    tracing::info!(
        message = %message_path.display(),
        signature = %sig_path.display(),
        embedded = args.embed,
        "message signed"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// verify
// ---------------------------------------------------------------------------

fn verify(args: VerifyArgs) -> Result<()> {
    let candidates = load_candidates(&args)?;
    let artifact = fs::read(&args.signature)
        .with_context(|| format!("failed to read signature {}", args.signature.display()))?;

    if args.checksum {
        let (verified, outcomes) = verify_files(&candidates, &artifact, &args.root)?;
        let report = VerifyReport::new(&verified, &outcomes);
        print_report(&report, args.json)?;
        if !report.ok {
            bail!(
                "verification failed: {} of {} files diverged from the signed manifest",
                report.failed_count(),
                report.files.len()
            );
        }
        return Ok(());
    }

    if args.embedded {
        let (verified, message) = verify_embedded(&candidates, &artifact)?;
        if let Some(out) = &args.output {
            fs::write(out, &message)
                .with_context(|| format!("failed to write message to {}", out.display()))?;
        }
        print_verified(&verified, args.json)?;
        return Ok(());
    }

    let Some(message_path) = &args.message else {
        bail!("provide --message for detached verification, or --embedded / --checksum");
    };
    let message = fs::read(message_path)
        .with_context(|| format!("failed to read message {}", message_path.display()))?;
    let signature = decode_detached(&artifact)?;
    let verified = verify_detached(&candidates, &signature, &message)?;
    print_verified(&verified, args.json)?;
    Ok(())
}

/// Build the ordered candidate list: one explicit key, or every `*.pub`
/// in the trusted directory.
fn load_candidates(args: &VerifyArgs) -> Result<Vec<Candidate>> {
    if let Some(pubkey) = &args.pubkey {
        return Ok(vec![candidate_from_file(pubkey)?]);
    }
    let keydir = match &args.keydir {
        Some(dir) => dir.clone(),
        None => default_trusted_dir()?,
    };
    let candidates = discover(&keydir)?;
    if candidates.is_empty() {
        bail!(
            "no trusted keys found in {}; pass --pubkey or populate the directory",
            keydir.display()
        );
    }
    tracing::debug!(keydir = %keydir.display(), count = candidates.len(), "trusted keys loaded");
    Ok(candidates)
}

fn print_verified(verified: &Verified, json: bool) -> Result<()> {
    let report = VerifyReport::new(verified, &[]);
    print_report(&report, json)
}

fn print_report(report: &VerifyReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_secret_key(path: &Path) -> Result<SecretKey> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read secret key {}", path.display()))?;
    Ok(decode_secret_key(&bytes)?)
}

/// A protected key needs a passphrase from somewhere; an unprotected one
/// ignores whatever happens to be in the environment.
fn passphrase_for(secret: &SecretKey, file: Option<&Path>) -> Result<Option<String>> {
    if !secret.is_password_protected() {
        return Ok(None);
    }
    match passphrase::resolve(file)? {
        Some(p) if !p.is_empty() => Ok(Some(p)),
        _ => bail!(
            "secret key is passphrase-protected; provide --passphrase-file or {}",
            passphrase::PASSPHRASE_ENV
        ),
    }
}

fn hash_algorithm(algorithm: Algorithm) -> HashAlgorithm {
    match algorithm {
        Algorithm::Sha256 => HashAlgorithm::Sha256,
        Algorithm::Sha512 => HashAlgorithm::Sha512,
    }
}

fn default_signature_path(message: &Path) -> PathBuf {
    let mut name = message.as_os_str().to_os_string();
    name.push(sello_protocol::config::SIG_SUFFIX);
    PathBuf::from(name)
}

/// The default trusted-key directory: `<config dir>/sello/trusted`.
///
/// Default resolution lives here in the shell — the core takes the
/// directory as an explicit argument and never reads the environment.
fn default_trusted_dir() -> Result<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    match config_dir {
        Some(dir) => Ok(dir.join("sello").join("trusted")),
        None => bail!("cannot resolve a config directory: neither XDG_CONFIG_HOME nor HOME is set"),
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}

/// Secret keys get owner-only permissions on Unix.
fn write_secret_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    write_artifact(path, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }

    Ok(())
}

fn print_version() {
    println!("sello {}", env!("CARGO_PKG_VERSION"));
    println!("signature algorithm: Ed25519 (signify-compatible containers)");
}
