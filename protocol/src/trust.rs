//! # Trusted Key Discovery
//!
//! Builds the ordered candidate list the verification engine walks. The
//! core never decides *where* trusted keys live — the shell passes a
//! directory in — and a key is paired with its source label the moment it
//! is discovered, never annotated after the fact.
//!
//! Candidate order is the directory-listing order of the underlying
//! filesystem: implementation-defined, not sorted, but deterministic for a
//! given filesystem state. Verification results must not depend on it
//! beyond which of several *valid* keys gets reported as the match.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::codec::{decode_public_key, PublicKey};
use crate::config::PUBKEY_SUFFIX;
use crate::error::SelloError;

/// A trusted public key plus the label of where it came from. The label is
/// for reporting only and is fixed at construction.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The decoded public key.
    pub key: PublicKey,
    /// Where the key was found (file path, or a caller-chosen label).
    pub source: String,
}

impl Candidate {
    /// Pair a key with a source label.
    pub fn new(key: PublicKey, source: impl Into<String>) -> Self {
        Self {
            key,
            source: source.into(),
        }
    }
}

/// Load a single public key file as a one-entry candidate.
pub fn candidate_from_file(path: &Path) -> Result<Candidate, SelloError> {
    let bytes = fs::read(path).map_err(|source| SelloError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;
    let key = decode_public_key(&bytes)?;
    Ok(Candidate::new(key, path.display().to_string()))
}

/// Scan a directory for `*.pub` files and decode each into a candidate.
///
/// A file that cannot be read or decoded is skipped with a warning — one
/// stray artifact in the trusted directory should not disable verification
/// against the remaining keys. An unreadable *directory* is a hard error.
pub fn discover(dir: &Path) -> Result<Vec<Candidate>, SelloError> {
    let entries = fs::read_dir(dir).map_err(|source| SelloError::UnreadableFile {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        let is_pub = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(PUBKEY_SUFFIX));
        if !is_pub {
            continue;
        }
        match candidate_from_file(&path) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unusable trusted key");
            }
        }
    }
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_public_key;
    use crate::crypto::{generate_ed25519, KeyNumber};
    use std::fs;

    fn write_key(dir: &Path, name: &str) -> PublicKey {
        let (_, public) = generate_ed25519();
        let key = PublicKey::new(KeyNumber::generate(), public, format!("{name} public key"));
        fs::write(dir.join(name), encode_public_key(&key).unwrap()).unwrap();
        key
    }

    #[test]
    fn discovers_only_pub_files() {
        let dir = tempfile::tempdir().unwrap();
        write_key(dir.path(), "alice.pub");
        write_key(dir.path(), "bob.pub");
        fs::write(dir.path().join("notes.txt"), "not a key").unwrap();
        fs::write(dir.path().join("carol.sec"), "also not trusted").unwrap();

        let candidates = discover(dir.path()).unwrap();
        assert_eq!(candidates.len(), 2);
        for c in &candidates {
            assert!(c.source.ends_with(".pub"));
        }
    }

    #[test]
    fn malformed_pub_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_key(dir.path(), "good.pub");
        fs::write(dir.path().join("broken.pub"), "untrusted garbage").unwrap();

        let candidates = discover(dir.path()).unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].source.ends_with("good.pub"));
    }

    #[test]
    fn missing_directory_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(matches!(
            discover(&gone),
            Err(SelloError::UnreadableFile { .. })
        ));
    }

    #[test]
    fn candidate_from_file_carries_source_label() {
        let dir = tempfile::tempdir().unwrap();
        let key = write_key(dir.path(), "dave.pub");
        let candidate = candidate_from_file(&dir.path().join("dave.pub")).unwrap();
        assert_eq!(candidate.key, key);
        assert!(candidate.source.ends_with("dave.pub"));
    }
}
