//! # Verification Engine
//!
//! The trial loop: given an ordered candidate list and a signature, try
//! each key until one validates or the list runs out.
//!
//! Per attempt: if the signature carries a key number that differs from the
//! candidate's, skip without touching the curve — the primitive would fail
//! anyway, the skip just makes walking a large trusted directory cheap.
//! Otherwise invoke the primitive. First success wins and ends the loop;
//! later candidates are never evaluated, even if they would also have
//! matched. (That is the upstream trust model, kept deliberately: one
//! trusted key vouching for an artifact is sufficient, unanimity is not
//! required.)
//!
//! On failure the *first* failure reason is retained; when every candidate
//! is exhausted, that recorded reason becomes the terminal error. A run
//! where no candidate even shared the key number reports `KeyMismatch`.
//!
//! The engine never mutates candidate order and never retries a key.

use std::path::{Path, PathBuf};

use crate::codec::{decode_embedded, Signature};
use crate::error::SelloError;
use crate::manifest::{ChecksumManifest, FileOutcome};
use crate::trust::Candidate;

/// A successful verification: which candidate key validated the signature.
#[derive(Debug, Clone)]
pub struct Verified {
    /// Source label of the key that matched (fixed at discovery time).
    pub source: String,
    /// Hex key number of the matching pair, for reports.
    pub keynum: String,
}

/// Try each candidate in order against a detached signature.
pub fn verify_detached(
    candidates: &[Candidate],
    signature: &Signature,
    message: &[u8],
) -> Result<Verified, SelloError> {
    let mut first_failure: Option<SelloError> = None;

    for candidate in candidates {
        if candidate.key.keynum() != signature.keynum() {
            first_failure.get_or_insert(SelloError::KeyMismatch);
            continue;
        }
        if candidate.key.verify(message, signature.raw()) {
            return Ok(Verified {
                source: candidate.source.clone(),
                keynum: candidate.key.keynum().to_hex(),
            });
        }
        first_failure.get_or_insert(SelloError::InvalidSignature);
    }

    Err(first_failure.unwrap_or(SelloError::KeyMismatch))
}

/// Verify an embedded artifact and recover the message.
///
/// The artifact's framed header is decoded first; the remainder is the
/// message the signature covers. An artifact whose trailer is empty is an
/// embedded signature over the empty message — indistinguishable from a
/// detached file by construction, and treated as the former here.
pub fn verify_embedded(
    candidates: &[Candidate],
    artifact: &[u8],
) -> Result<(Verified, Vec<u8>), SelloError> {
    let (signature, message) = decode_embedded(artifact)?;
    let verified = verify_detached(candidates, &signature, &message)?;
    Ok((verified, message))
}

/// Verify a signed checksum manifest and check every listed file.
///
/// The signature is validated once, up front, over the manifest bytes; the
/// per-file outcomes that follow are independent of it. A validly signed
/// manifest whose files have since changed still verifies here — the
/// divergence shows up as `Mismatch` entries in the returned list, never
/// as a signature failure. Callers decide what the aggregate means.
pub fn verify_files(
    candidates: &[Candidate],
    artifact: &[u8],
    root: &Path,
) -> Result<(Verified, Vec<(PathBuf, FileOutcome)>), SelloError> {
    let (signature, manifest_bytes) = decode_embedded(artifact)?;
    let verified = verify_detached(candidates, &signature, &manifest_bytes)?;
    let manifest = ChecksumManifest::parse(&manifest_bytes)?;
    Ok((verified, manifest.verify_against_disk(root)))
}
