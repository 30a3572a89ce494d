//! # Hashing Utilities
//!
//! The two hash functions the container format admits, and nothing else:
//!
//! - **SHA-256** — the default for checksum manifests. 32-byte digests,
//!   universally available, what every other tool in the ecosystem writes.
//! - **SHA-512** — the alternative manifest digest, and (truncated) the
//!   secret-key checksum. The format fixed this long before we showed up.
//!
//! There is no BLAKE3 here and there never will be: the manifest lines are
//! part of a signed, interoperable document, and inventing a digest name no
//! other verifier understands would be a compatibility felony.

use sha2::{Digest, Sha256, Sha512};

use crate::config::{CHECKSUM_BYTES, FULL_SECRET_KEY_BYTES};

/// The digest algorithms a checksum manifest may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// SHA-256: 32-byte digest, 64 hex characters.
    Sha256,
    /// SHA-512: 64-byte digest, 128 hex characters.
    Sha512,
}

impl HashAlgorithm {
    /// The canonical name as written at the start of a manifest line.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Parse a manifest algorithm name. Case-sensitive: the canonical
    /// serialization is upper-case and anything else is malformed.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SHA256" => Some(HashAlgorithm::Sha256),
            "SHA512" => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Compute the digest of `data` under this algorithm.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Convenience: hex-encoded digest, lower-case.
    pub fn digest_hex(&self, data: &[u8]) -> String {
        hex::encode(self.digest(data))
    }
}

/// The secret-key checksum: first 8 bytes of SHA-512 over the plaintext
/// 64-byte secret key.
///
/// This is what detects a wrong passphrase. The XOR unmasking step always
/// "succeeds" structurally, so without this digest a wrong passphrase would
/// silently hand back garbage key material — and a signature made with
/// garbage would simply never verify, with no hint why. The checksum turns
/// that into an immediate, explicit failure.
pub fn secret_key_checksum(full_secret: &[u8; FULL_SECRET_KEY_BYTES]) -> [u8; CHECKSUM_BYTES] {
    let digest = Sha512::digest(full_secret);
    let mut checksum = [0u8; CHECKSUM_BYTES];
    checksum.copy_from_slice(&digest[..CHECKSUM_BYTES]);
    checksum
}
