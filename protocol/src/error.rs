//! # Error Kinds
//!
//! One closed enumeration over every way a sello operation can fail, so
//! callers branch on kind instead of string-matching messages. Decoding
//! errors are unrecoverable for that artifact; per-file checksum outcomes
//! are *data* (see [`crate::manifest::FileOutcome`]) and never appear here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the sello protocol core.
///
/// The messages are intentionally vague about key material — leaking
/// details about secrets through error text is a classic footgun.
#[derive(Debug, Error)]
pub enum SelloError {
    /// A key artifact failed structural validation: wrong length, unknown
    /// algorithm tag, bad base64, missing comment header.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// A signature artifact failed structural validation.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The secret-key checksum did not match after unmasking. Either the
    /// passphrase was wrong or the stored key bytes are corrupted — the
    /// two are indistinguishable by design.
    #[error("incorrect passphrase or corrupted secret key")]
    IncorrectPassword,

    /// The signature's key number matched none of the candidate keys.
    #[error("signature was created by a key not in the candidate set")]
    KeyMismatch,

    /// The cryptographic verification primitive rejected the signature.
    #[error("signature verification failed")]
    InvalidSignature,

    /// A manifest entry path is absolute or traverses outside the root.
    #[error("path escapes the signing root: {}", .path.display())]
    PathEscapesRoot {
        /// The offending path as supplied.
        path: PathBuf,
    },

    /// A file could not be read while building a manifest or loading an
    /// artifact.
    #[error("cannot read {}", .path.display())]
    UnreadableFile {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file's live digest diverged from the signed manifest. Surfaced by
    /// the CLI as the aggregate failure when any per-file outcome is not a
    /// match; the per-file report itself is returned as data.
    #[error("checksum mismatch: {}", .path.display())]
    HashMismatch {
        /// The file whose content changed since signing.
        path: PathBuf,
    },
}
