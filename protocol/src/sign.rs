//! # Key Generation & Signing Operations
//!
//! The producer half of the toolkit's surface: make key pairs, sign
//! messages (detached or embedded), sign file sets (checksum-manifest
//! mode). The verification half lives in [`crate::verify`].
//!
//! Signing unwraps the stored secret key (checksum-verified, see
//! [`crate::protect`]), hands the plaintext to the Ed25519 provider for
//! exactly one operation, and lets it drop. Nothing here writes key
//! material anywhere.

use std::path::{Path, PathBuf};

use crate::codec::{encode_detached, encode_embedded, PublicKey, SecretKey, Signature};
use crate::crypto::{generate_ed25519, sign_ed25519, HashAlgorithm, KeyNumber};
use crate::error::SelloError;
use crate::manifest::ChecksumManifest;
use crate::protect;

/// How a signature should be packaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMode {
    /// Signature artifact only; the verifier supplies the message.
    Detached,
    /// Signature and message concatenated into one artifact.
    Embedded,
}

/// Create a new key pair.
///
/// The key number is drawn once and shared by both halves — it is the bond
/// that lets verification pair a signature with its key without trial
/// decoding. With a passphrase the secret half is wrapped under `rounds`
/// of bcrypt_pbkdf; without one it is stored plain (rounds 0). The
/// comments follow the upstream convention: `<name> public key` /
/// `<name> secret key`.
pub fn generate_keypair(
    name: &str,
    passphrase: Option<&str>,
    rounds: u32,
) -> Result<(PublicKey, SecretKey), SelloError> {
    let keynum = KeyNumber::generate();
    let (full_secret, public) = generate_ed25519();

    let secret = protect::protect(
        &full_secret,
        keynum,
        format!("{name} secret key"),
        passphrase,
        rounds,
    )?;
    let public = PublicKey::new(keynum, public, format!("{name} public key"));
    Ok((public, secret))
}

/// Sign a message, returning the decoded [`Signature`].
///
/// The comment lands on the armor line of whatever artifact the caller
/// encodes; when `None`, a generic one naming the key number is used.
pub fn sign_detached(
    secret: &SecretKey,
    passphrase: Option<&str>,
    message: &[u8],
    comment: Option<&str>,
) -> Result<Signature, SelloError> {
    let full_secret = protect::unwrap(secret, passphrase)?;
    let raw = sign_ed25519(&full_secret, message)?;
    let comment = match comment {
        Some(c) => c.to_string(),
        None => format!("signed with key {}", secret.keynum()),
    };
    Ok(Signature::new(secret.keynum(), raw, comment))
}

/// Sign a message and encode the artifact in the requested mode.
pub fn sign_message(
    secret: &SecretKey,
    passphrase: Option<&str>,
    message: &[u8],
    mode: SignatureMode,
    comment: Option<&str>,
) -> Result<Vec<u8>, SelloError> {
    let signature = sign_detached(secret, passphrase, message, comment)?;
    match mode {
        SignatureMode::Detached => encode_detached(&signature),
        SignatureMode::Embedded => encode_embedded(&signature, message),
    }
}

/// Sign a set of files as a checksum manifest.
///
/// Builds the manifest (hashing every file under `root`, input order
/// preserved), then signs its canonical serialization as an embedded
/// artifact — the manifest rides along with its signature so the verifier
/// needs nothing but the artifact and the root directory.
pub fn sign_files(
    secret: &SecretKey,
    passphrase: Option<&str>,
    algorithm: HashAlgorithm,
    files: &[PathBuf],
    root: &Path,
    comment: Option<&str>,
) -> Result<Vec<u8>, SelloError> {
    let manifest = ChecksumManifest::build(files, algorithm, root)?;
    sign_message(
        secret,
        passphrase,
        &manifest.serialize(),
        SignatureMode::Embedded,
        comment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_detached, decode_embedded};
    use crate::trust::Candidate;
    use crate::verify::{verify_detached, verify_files};
    use std::fs;

    #[test]
    fn generated_halves_share_a_key_number() {
        let (public, secret) = generate_keypair("pair", None, 0).unwrap();
        assert_eq!(public.keynum(), secret.keynum());
        assert_eq!(public.comment(), "pair public key");
        assert_eq!(secret.comment(), "pair secret key");
    }

    #[test]
    fn sign_then_verify_detached() {
        let (public, secret) = generate_keypair("k", None, 0).unwrap();
        let artifact = sign_message(
            &secret,
            None,
            b"hello",
            SignatureMode::Detached,
            Some("verify with k.pub"),
        )
        .unwrap();
        let sig = decode_detached(&artifact).unwrap();
        assert_eq!(sig.comment(), "verify with k.pub");
        let candidates = [Candidate::new(public, "k.pub")];
        assert!(verify_detached(&candidates, &sig, b"hello").is_ok());
    }

    #[test]
    fn embedded_artifact_carries_the_message() {
        let (_, secret) = generate_keypair("k", None, 0).unwrap();
        let artifact =
            sign_message(&secret, None, b"carried", SignatureMode::Embedded, None).unwrap();
        let (_, message) = decode_embedded(&artifact).unwrap();
        assert_eq!(message, b"carried");
    }

    #[test]
    fn cross_key_verification_fails() {
        let (_, secret) = generate_keypair("signer", None, 0).unwrap();
        let (other_public, _) = generate_keypair("other", None, 0).unwrap();
        let sig = sign_detached(&secret, None, b"msg", None).unwrap();
        let candidates = [Candidate::new(other_public, "other.pub")];
        assert!(matches!(
            verify_detached(&candidates, &sig, b"msg"),
            Err(SelloError::KeyMismatch)
        ));
    }

    #[test]
    fn protected_key_signs_with_the_right_passphrase_only() {
        let (_, secret) = generate_keypair("locked", Some("sesame"), 4).unwrap();
        assert!(sign_detached(&secret, Some("sesame"), b"m", None).is_ok());
        assert!(matches!(
            sign_detached(&secret, Some("sesamee"), b"m", None),
            Err(SelloError::IncorrectPassword)
        ));
        assert!(matches!(
            sign_detached(&secret, None, b"m", None),
            Err(SelloError::IncorrectPassword)
        ));
    }

    #[test]
    fn sign_files_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("f1"), "hello").unwrap();
        fs::write(dir.path().join("f2"), "world").unwrap();

        let (public, secret) = generate_keypair("m", None, 0).unwrap();
        let artifact = sign_files(
            &secret,
            None,
            HashAlgorithm::Sha256,
            &[PathBuf::from("f1"), PathBuf::from("f2")],
            dir.path(),
            None,
        )
        .unwrap();

        let candidates = [Candidate::new(public, "m.pub")];
        let (_, outcomes) = verify_files(&candidates, &artifact, dir.path()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, o)| o.is_match()));
    }

    #[test]
    fn sign_files_aborts_on_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let (_, secret) = generate_keypair("m", None, 0).unwrap();
        let result = sign_files(
            &secret,
            None,
            HashAlgorithm::Sha256,
            &[PathBuf::from("../escape")],
            dir.path(),
            None,
        );
        assert!(matches!(result, Err(SelloError::PathEscapesRoot { .. })));
    }
}
