//! # Checksum Manifests
//!
//! One signature attesting many files: the manifest is a newline-separated
//! listing of `ALGORITHM (path) = hexdigest` lines, built at sign time in
//! input order and signed like any other message. Verification re-hashes
//! each listed file and reports a per-file outcome.
//!
//! The separation that matters: the manifest's *signature* proves who wrote
//! the listing; each file's *digest* proves the content on disk today is
//! the content that was listed. A validly signed manifest over files that
//! have since changed still verifies at the signature layer — divergence is
//! reported per file, never as a signature failure.
//!
//! Paths are always relative to a caller-supplied root. Absolute paths and
//! `..` traversal are rejected both when building and when parsing, so a
//! hostile manifest cannot direct the verifier outside its root.

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::crypto::HashAlgorithm;
use crate::error::SelloError;

/// One signed file: digest algorithm, root-relative path, hex digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Digest algorithm for this entry.
    pub algorithm: HashAlgorithm,
    /// Path relative to the manifest root. Stored as text because the
    /// manifest is a text document.
    pub path: String,
    /// Lower-case hex digest of the file content at sign time.
    pub digest: String,
}

/// The result of checking one manifest entry against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Live digest equals the signed digest.
    Match,
    /// The file exists and is readable but its content changed.
    Mismatch,
    /// The file could not be read (missing, permissions, I/O error).
    Unreadable(String),
}

impl FileOutcome {
    /// Whether this outcome counts as a pass.
    pub fn is_match(&self) -> bool {
        matches!(self, FileOutcome::Match)
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Match => write!(f, "OK"),
            FileOutcome::Mismatch => write!(f, "checksum mismatch"),
            FileOutcome::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

/// An ordered listing of per-file digests. Order is the input order at
/// build time and is preserved through serialize, parse, and verification
/// — the signed bytes are deterministic given deterministic input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: Vec<ManifestEntry>,
}

impl ChecksumManifest {
    /// Hash every input file and record it under its root-relative path.
    ///
    /// Inputs may be given relative to `root` or as absolute paths under
    /// it. Any path that resolves outside `root` aborts the build with
    /// [`SelloError::PathEscapesRoot`] and no partial manifest; an
    /// unreadable input aborts with [`SelloError::UnreadableFile`].
    pub fn build(
        files: &[PathBuf],
        algorithm: HashAlgorithm,
        root: &Path,
    ) -> Result<Self, SelloError> {
        let mut entries = Vec::with_capacity(files.len());
        for file in files {
            let relative = contained_path(file, root)?;
            let on_disk = root.join(&relative);
            let bytes = fs::read(&on_disk).map_err(|source| SelloError::UnreadableFile {
                path: on_disk.clone(),
                source,
            })?;
            entries.push(ManifestEntry {
                algorithm,
                path: relative,
                digest: algorithm.digest_hex(&bytes),
            });
        }
        Ok(Self { entries })
    }

    /// The entries, in signing order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Canonical serialization: one `ALGORITHM (path) = digest` line per
    /// entry, each newline-terminated, in entry order. These are the bytes
    /// that get signed.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(entry.algorithm.name().as_bytes());
            out.extend_from_slice(b" (");
            out.extend_from_slice(entry.path.as_bytes());
            out.extend_from_slice(b") = ");
            out.extend_from_slice(entry.digest.as_bytes());
            out.push(b'\n');
        }
        out
    }

    /// Parse a serialized manifest.
    ///
    /// Structural problems (bad line shape, unknown algorithm, non-hex or
    /// wrong-width digest) are [`SelloError::MalformedSignature`] — the
    /// manifest travels inside a signature artifact and a broken listing
    /// means that artifact is broken. Paths are containment-checked here
    /// too: a signed-but-hostile listing must not traverse the verifier's
    /// filesystem.
    pub fn parse(bytes: &[u8]) -> Result<Self, SelloError> {
        let text = std::str::from_utf8(bytes).map_err(|_| {
            SelloError::MalformedSignature("manifest is not UTF-8".into())
        })?;

        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let entry = parse_line(line).ok_or_else(|| {
                SelloError::MalformedSignature(format!(
                    "manifest line {} is not 'ALGORITHM (path) = digest'",
                    lineno + 1
                ))
            })?;
            // Re-check containment on the parsing side.
            contained_path(Path::new(&entry.path), Path::new("."))?;
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// Re-hash every listed file under `root` and report per-file
    /// outcomes, in manifest order.
    ///
    /// Individual failures never abort the walk: a missing or changed file
    /// yields its own `Unreadable`/`Mismatch` outcome and the next entry
    /// is still checked. Deciding whether any non-match fails the overall
    /// operation is the caller's policy, not ours.
    pub fn verify_against_disk(&self, root: &Path) -> Vec<(PathBuf, FileOutcome)> {
        self.entries
            .iter()
            .map(|entry| {
                let rel = PathBuf::from(&entry.path);
                let outcome = match fs::read(root.join(&rel)) {
                    Err(e) => FileOutcome::Unreadable(e.to_string()),
                    Ok(bytes) => {
                        let live = entry.algorithm.digest_hex(&bytes);
                        if live.eq_ignore_ascii_case(&entry.digest) {
                            FileOutcome::Match
                        } else {
                            FileOutcome::Mismatch
                        }
                    }
                };
                (rel, outcome)
            })
            .collect()
    }

    /// Strict variant of [`verify_against_disk`](Self::verify_against_disk):
    /// stop at the first divergence and surface it as a hard error.
    ///
    /// For callers that have no use for a partial report — pre-flight
    /// checks, scripted gates — the first unreadable file becomes
    /// [`SelloError::UnreadableFile`] and the first content change becomes
    /// [`SelloError::HashMismatch`]. Entries are checked in manifest order.
    pub fn ensure_unchanged(&self, root: &Path) -> Result<(), SelloError> {
        for entry in &self.entries {
            let rel = PathBuf::from(&entry.path);
            let on_disk = root.join(&rel);
            let bytes = fs::read(&on_disk).map_err(|source| SelloError::UnreadableFile {
                path: on_disk.clone(),
                source,
            })?;
            let live = entry.algorithm.digest_hex(&bytes);
            if !live.eq_ignore_ascii_case(&entry.digest) {
                return Err(SelloError::HashMismatch { path: rel });
            }
        }
        Ok(())
    }
}

/// Parse one manifest line. The digest is pure hex, so splitting on the
/// *last* `") = "` is unambiguous even for paths containing parentheses
/// or the separator text itself.
fn parse_line(line: &str) -> Option<ManifestEntry> {
    let (head, digest) = line.rsplit_once(") = ")?;
    let (algo_name, path) = head.split_once(" (")?;
    let algorithm = HashAlgorithm::from_name(algo_name)?;
    if digest.len() != algorithm.digest_len() * 2
        || !digest.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }
    Some(ManifestEntry {
        algorithm,
        path: path.to_string(),
        digest: digest.to_string(),
    })
}

/// Reduce `path` to a root-relative form, rejecting anything that could
/// reach outside `root`: absolute paths not under it, `..` components,
/// and path text that cannot appear on a manifest line (non-UTF-8 or
/// embedded line breaks).
fn contained_path(path: &Path, root: &Path) -> Result<String, SelloError> {
    let escape = || SelloError::PathEscapesRoot {
        path: path.to_path_buf(),
    };

    let relative = if path.is_absolute() {
        path.strip_prefix(root).map_err(|_| escape())?
    } else {
        path
    };

    let mut clean = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            // `./` noise is tolerated and dropped.
            Component::CurDir => {}
            // `..`, a second root, or a Windows prefix all escape.
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(escape())
            }
        }
    }

    let text = clean.to_str().ok_or_else(escape)?;
    if text.is_empty() || text.contains('\n') || text.contains('\r') {
        return Err(escape());
    }
    Ok(text.to_string())
}
