//! # Passphrase Sources
//!
//! The core never prompts; this module is where the shell decides what
//! "the passphrase" means. Two non-interactive sources, in priority
//! order: an explicit file (`--passphrase-file`, first line wins) and the
//! `SELLO_PASSPHRASE` environment variable. Absence is a valid answer —
//! the caller decides whether "no passphrase" is acceptable for the
//! operation at hand.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Environment variable consulted when no passphrase file is given.
pub const PASSPHRASE_ENV: &str = "SELLO_PASSPHRASE";

/// Resolve the passphrase, if any.
pub fn resolve(file: Option<&Path>) -> Result<Option<String>> {
    if let Some(path) = file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read passphrase file {}", path.display()))?;
        // First line only: editors love trailing newlines.
        let passphrase = contents.lines().next().unwrap_or("").to_string();
        return Ok(Some(passphrase));
    }

    match std::env::var(PASSPHRASE_ENV) {
        Ok(value) if !value.is_empty() => Ok(Some(value)),
        _ => Ok(None),
    }
}
