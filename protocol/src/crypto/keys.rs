//! # Ed25519 Provider Boundary
//!
//! Everything that touches the curve goes through this module. The rest of
//! the crate treats signing and verification as a black box: bytes in,
//! bytes out, no curve arithmetic anywhere else.
//!
//! ## Why Ed25519?
//!
//! Because the container format says so, and the container format is right:
//! deterministic signatures (no k-value footguns), 128-bit security in
//! 32+32 bytes, and well-audited constant-time implementations.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS CSPRNG (`OsRng`). If your OS RNG is broken,
//!   you have bigger problems than sello.
//! - Secret key bytes are never logged, and `KeyNumber`'s `Display` shows
//!   only the public identifier. If you add logging of key material to this
//!   module, you will be asked to leave.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey,
};
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;

use crate::config::{FULL_SECRET_KEY_BYTES, KEYNUM_BYTES, PUBLIC_KEY_BYTES, SIGNATURE_BYTES};
use crate::error::SelloError;

/// The eight-byte identifier binding a public/secret key pair.
///
/// Generated once at key-pair creation and embedded in every signature the
/// pair produces, so verification can skip non-matching candidates without
/// invoking the curve. It is an identifier, not a secret, and not a hash of
/// anything — just random bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyNumber([u8; KEYNUM_BYTES]);

impl KeyNumber {
    /// Draw a fresh random key number from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEYNUM_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Wrap existing bytes (decoder path).
    pub fn from_bytes(bytes: [u8; KEYNUM_BYTES]) -> Self {
        Self(bytes)
    }

    /// The raw bytes, for encoders.
    pub fn as_bytes(&self) -> &[u8; KEYNUM_BYTES] {
        &self.0
    }

    /// Hex form, for reports and logs. 16 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for KeyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for KeyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyNumber({})", self.to_hex())
    }
}

/// Generate a fresh Ed25519 key pair.
///
/// Returns `(full_secret, public)` where `full_secret` is the 64-byte
/// seed-then-public layout the container format stores, and `public` is the
/// 32-byte verifying key. The caller owns keeping the secret half secret.
pub fn generate_ed25519() -> ([u8; FULL_SECRET_KEY_BYTES], [u8; PUBLIC_KEY_BYTES]) {
    let signing_key = SigningKey::generate(&mut OsRng);
    (
        signing_key.to_keypair_bytes(),
        signing_key.verifying_key().to_bytes(),
    )
}

/// Sign a message with a full 64-byte secret key.
///
/// Ed25519 signatures are deterministic — the same (key, message) pair
/// always produces the same signature (RFC 8032). No nonce management, no
/// sleepless nights wondering whether your RNG was seeded during signing.
///
/// Fails with [`SelloError::MalformedKey`] if the stored public half does
/// not match the seed, which means the key bytes were corrupted in a way
/// the checksum somehow missed. In practice unreachable after a checksum
/// pass, but crypto code doesn't get to assume things are fine.
pub fn sign_ed25519(
    full_secret: &[u8; FULL_SECRET_KEY_BYTES],
    message: &[u8],
) -> Result<[u8; SIGNATURE_BYTES], SelloError> {
    let signing_key = SigningKey::from_keypair_bytes(full_secret)
        .map_err(|_| SelloError::MalformedKey("secret key halves are inconsistent".into()))?;
    Ok(signing_key.sign(message).to_bytes())
}

/// Verify an Ed25519 signature against a raw 32-byte public key.
///
/// Returns `true` if the signature is valid, `false` otherwise. We use a
/// boolean here (rather than `Result`) because the trial loop just wants a
/// yes/no answer, and we intentionally don't distinguish "invalid point"
/// from "bad signature" — giving attackers a detailed error oracle is a
/// bad idea.
pub fn verify_ed25519(
    public: &[u8; PUBLIC_KEY_BYTES],
    message: &[u8],
    signature: &[u8; SIGNATURE_BYTES],
) -> bool {
    // Rejecting low-order and otherwise degenerate points happens inside
    // from_bytes; any failure there is just "nope".
    let Ok(verifying_key) = VerifyingKey::from_bytes(public) else {
        return false;
    };
    let sig = DalekSignature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let (secret, public) = generate_ed25519();
        let msg = b"attest this";
        let sig = sign_ed25519(&secret, msg).unwrap();
        assert!(verify_ed25519(&public, msg, &sig));
    }

    #[test]
    fn wrong_message_fails_verification() {
        let (secret, public) = generate_ed25519();
        let sig = sign_ed25519(&secret, b"correct message").unwrap();
        assert!(!verify_ed25519(&public, b"wrong message", &sig));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let (secret, _) = generate_ed25519();
        let (_, other_public) = generate_ed25519();
        let sig = sign_ed25519(&secret, b"message").unwrap();
        assert!(!verify_ed25519(&other_public, b"message", &sig));
    }

    #[test]
    fn signatures_are_deterministic() {
        // Ed25519 is deterministic — same key + same message = same
        // signature. This is a feature, not a bug.
        let (secret, _) = generate_ed25519();
        let a = sign_ed25519(&secret, b"determinism is underrated").unwrap();
        let b = sign_ed25519(&secret, b"determinism is underrated").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn corrupted_public_half_is_rejected() {
        let (mut secret, _) = generate_ed25519();
        // Flip a bit in the stored public half; the seed no longer matches.
        secret[63] ^= 0x01;
        assert!(matches!(
            sign_ed25519(&secret, b"x"),
            Err(SelloError::MalformedKey(_))
        ));
    }

    #[test]
    fn degenerate_public_key_verifies_nothing() {
        // All zeros is not a valid Ed25519 point and must simply fail.
        let bad = [0u8; 32];
        assert!(!verify_ed25519(&bad, b"anything", &[0u8; 64]));
    }

    #[test]
    fn key_numbers_are_distinct() {
        // If this fails, your RNG is broken and you should panic (the
        // emotion, not the macro).
        assert_ne!(KeyNumber::generate(), KeyNumber::generate());
    }

    #[test]
    fn key_number_hex_is_sixteen_chars() {
        let kn = KeyNumber::generate();
        assert_eq!(kn.to_hex().len(), 16);
        assert_eq!(format!("{kn}").len(), 16);
    }

    #[test]
    fn empty_message_signing() {
        // Signing an empty message is valid in Ed25519. Some protocols
        // forbid it; the container format does not.
        let (secret, public) = generate_ed25519();
        let sig = sign_ed25519(&secret, b"").unwrap();
        assert!(verify_ed25519(&public, b"", &sig));
    }
}
