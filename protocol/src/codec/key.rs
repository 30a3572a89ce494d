//! # Key Codec
//!
//! Encoding and decoding of the two key containers. The binary payloads
//! are fixed-width field sequences — no tags, no varints, no padding — so
//! a decoder is a length check, two algorithm-tag checks, and a handful of
//! array copies. Encoding is deterministic and round-trips byte-for-byte,
//! comment included.
//!
//! Public key payload (42 bytes):
//! `PKALG || keynum(8) || public(32)`
//!
//! Secret key payload (104 bytes):
//! `PKALG || KDFALG || rounds(u32 BE) || salt(16) || checksum(8) ||
//!  keynum(8) || xkey(64)`

use std::fmt;

use crate::codec::armor::{armor, unarmor};
use crate::config::{
    CHECKSUM_BYTES, FULL_SECRET_KEY_BYTES, KDFALG, KDF_SALT_BYTES, KEYNUM_BYTES, PKALG,
    PUBLIC_KEY_BYTES, PUBLIC_PAYLOAD_BYTES, SECRET_PAYLOAD_BYTES, SIGNATURE_BYTES,
};
use crate::crypto::{verify_ed25519, KeyNumber};
use crate::error::SelloError;

/// The public half of a key pair, as decoded from a `.pub` artifact.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    keynum: KeyNumber,
    key: [u8; PUBLIC_KEY_BYTES],
    comment: String,
}

impl PublicKey {
    /// Assemble a public key from its parts (keygen and decoder path).
    pub fn new(keynum: KeyNumber, key: [u8; PUBLIC_KEY_BYTES], comment: String) -> Self {
        Self { keynum, key, comment }
    }

    /// The key number shared with the secret half.
    pub fn keynum(&self) -> KeyNumber {
        self.keynum
    }

    /// The raw Ed25519 point.
    pub fn raw(&self) -> &[u8; PUBLIC_KEY_BYTES] {
        &self.key
    }

    /// The advisory comment from the armor line.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Verify a raw 64-byte signature over `message` with this key.
    pub fn verify(&self, message: &[u8], signature: &[u8; SIGNATURE_BYTES]) -> bool {
        verify_ed25519(&self.key, message, signature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(keynum={})", self.keynum)
    }
}

/// The secret half of a key pair, as decoded from a `.sec` artifact.
///
/// `xkey` holds the 64-byte Ed25519 secret either in plaintext (rounds 0)
/// or XOR-masked under the passphrase KDF stream. Unmasking lives in
/// [`crate::protect`]; this type never exposes plaintext key material.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    pub(crate) keynum: KeyNumber,
    pub(crate) kdf_rounds: u32,
    pub(crate) salt: [u8; KDF_SALT_BYTES],
    pub(crate) checksum: [u8; CHECKSUM_BYTES],
    pub(crate) xkey: [u8; FULL_SECRET_KEY_BYTES],
    pub(crate) comment: String,
}

impl SecretKey {
    /// The key number shared with the public half.
    pub fn keynum(&self) -> KeyNumber {
        self.keynum
    }

    /// Whether unlocking this key requires a passphrase. A pure predicate
    /// on the stored work factor.
    pub fn is_password_protected(&self) -> bool {
        self.kdf_rounds != 0
    }

    /// The stored bcrypt_pbkdf work factor (0 when unprotected).
    pub fn kdf_rounds(&self) -> u32 {
        self.kdf_rounds
    }

    /// The advisory comment from the armor line.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print stored key bytes, masked or not. A partial leak is
        // still a leak.
        write!(
            f,
            "SecretKey(keynum={}, rounds={})",
            self.keynum, self.kdf_rounds
        )
    }
}

/// Encode a public key into its armored artifact.
pub fn encode_public_key(key: &PublicKey) -> Result<Vec<u8>, SelloError> {
    let mut payload = Vec::with_capacity(PUBLIC_PAYLOAD_BYTES);
    payload.extend_from_slice(&PKALG);
    payload.extend_from_slice(key.keynum.as_bytes());
    payload.extend_from_slice(&key.key);
    armor(&key.comment, &payload, b"").map_err(SelloError::MalformedKey)
}

/// Decode an armored public key artifact.
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey, SelloError> {
    let parsed = unarmor(bytes).map_err(SelloError::MalformedKey)?;
    if !parsed.trailer.is_empty() {
        return Err(SelloError::MalformedKey(
            "trailing bytes after public key payload".into(),
        ));
    }
    let payload = parsed.payload;
    if payload.len() != PUBLIC_PAYLOAD_BYTES {
        return Err(SelloError::MalformedKey(format!(
            "public key payload must be {} bytes, got {}",
            PUBLIC_PAYLOAD_BYTES,
            payload.len()
        )));
    }
    if payload[..2] != PKALG {
        return Err(SelloError::MalformedKey(
            "unknown signature algorithm tag".into(),
        ));
    }

    let mut keynum = [0u8; KEYNUM_BYTES];
    keynum.copy_from_slice(&payload[2..10]);
    let mut key = [0u8; PUBLIC_KEY_BYTES];
    key.copy_from_slice(&payload[10..42]);

    Ok(PublicKey {
        keynum: KeyNumber::from_bytes(keynum),
        key,
        comment: parsed.comment,
    })
}

/// Encode a secret key into its armored artifact.
pub fn encode_secret_key(key: &SecretKey) -> Result<Vec<u8>, SelloError> {
    let mut payload = Vec::with_capacity(SECRET_PAYLOAD_BYTES);
    payload.extend_from_slice(&PKALG);
    payload.extend_from_slice(&KDFALG);
    payload.extend_from_slice(&key.kdf_rounds.to_be_bytes());
    payload.extend_from_slice(&key.salt);
    payload.extend_from_slice(&key.checksum);
    payload.extend_from_slice(key.keynum.as_bytes());
    payload.extend_from_slice(&key.xkey);
    armor(&key.comment, &payload, b"").map_err(SelloError::MalformedKey)
}

/// Decode an armored secret key artifact.
pub fn decode_secret_key(bytes: &[u8]) -> Result<SecretKey, SelloError> {
    let parsed = unarmor(bytes).map_err(SelloError::MalformedKey)?;
    if !parsed.trailer.is_empty() {
        return Err(SelloError::MalformedKey(
            "trailing bytes after secret key payload".into(),
        ));
    }
    let payload = parsed.payload;
    if payload.len() != SECRET_PAYLOAD_BYTES {
        return Err(SelloError::MalformedKey(format!(
            "secret key payload must be {} bytes, got {}",
            SECRET_PAYLOAD_BYTES,
            payload.len()
        )));
    }
    if payload[..2] != PKALG {
        return Err(SelloError::MalformedKey(
            "unknown signature algorithm tag".into(),
        ));
    }
    if payload[2..4] != KDFALG {
        return Err(SelloError::MalformedKey(
            "unknown key derivation algorithm tag".into(),
        ));
    }

    let kdf_rounds = u32::from_be_bytes(payload[4..8].try_into().expect("width checked"));
    let mut salt = [0u8; KDF_SALT_BYTES];
    salt.copy_from_slice(&payload[8..24]);
    let mut checksum = [0u8; CHECKSUM_BYTES];
    checksum.copy_from_slice(&payload[24..32]);
    let mut keynum = [0u8; KEYNUM_BYTES];
    keynum.copy_from_slice(&payload[32..40]);
    let mut xkey = [0u8; FULL_SECRET_KEY_BYTES];
    xkey.copy_from_slice(&payload[40..104]);

    Ok(SecretKey {
        keynum: KeyNumber::from_bytes(keynum),
        kdf_rounds,
        salt,
        checksum,
        xkey,
        comment: parsed.comment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_ed25519;

    fn sample_public() -> PublicKey {
        let (_, public) = generate_ed25519();
        PublicKey::new(KeyNumber::generate(), public, "alice public key".into())
    }

    fn sample_secret() -> SecretKey {
        let (full, _) = generate_ed25519();
        SecretKey {
            keynum: KeyNumber::generate(),
            kdf_rounds: 42,
            salt: [5u8; 16],
            checksum: [6u8; 8],
            xkey: full,
            comment: "alice secret key".into(),
        }
    }

    #[test]
    fn public_key_roundtrip() {
        let key = sample_public();
        let bytes = encode_public_key(&key).unwrap();
        let decoded = decode_public_key(&bytes).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn secret_key_roundtrip() {
        let key = sample_secret();
        let bytes = encode_secret_key(&key).unwrap();
        let decoded = decode_secret_key(&bytes).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn reencoding_is_byte_identical() {
        // Idempotence: decode-then-encode reproduces the artifact exactly.
        // No field reordering, no whitespace drift.
        let bytes = encode_public_key(&sample_public()).unwrap();
        let again = encode_public_key(&decode_public_key(&bytes).unwrap()).unwrap();
        assert_eq!(bytes, again);

        let bytes = encode_secret_key(&sample_secret()).unwrap();
        let again = encode_secret_key(&decode_secret_key(&bytes).unwrap()).unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn known_layout_vector() {
        // A fixed artifact so format drift is caught without an upstream
        // binary on hand. Fields are recognizable byte runs.
        let key = PublicKey::new(
            KeyNumber::from_bytes([0x11; 8]),
            [0x22; 32],
            "vector".into(),
        );
        let bytes = encode_public_key(&key).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "untrusted comment: vector\n\
             RWQRERERERERESIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIiIi\n"
        );
    }

    #[test]
    fn wrong_algorithm_tag_is_rejected() {
        let key = sample_public();
        // Re-armor the payload with a bad algorithm tag.
        let mut payload = vec![b'X', b'd'];
        payload.extend_from_slice(key.keynum.as_bytes());
        payload.extend_from_slice(key.raw());
        let bytes = crate::codec::armor::armor(key.comment(), &payload, b"").unwrap();
        assert!(matches!(
            decode_public_key(&bytes),
            Err(SelloError::MalformedKey(_))
        ));
    }

    #[test]
    fn wrong_kdf_tag_is_rejected() {
        let key = sample_secret();
        let ok = encode_secret_key(&key).unwrap();
        let parsed = crate::codec::armor::unarmor(&ok).unwrap();
        let mut payload = parsed.payload;
        payload[2] = b'Z';
        let bytes = crate::codec::armor::armor(&key.comment, &payload, b"").unwrap();
        assert!(matches!(
            decode_secret_key(&bytes),
            Err(SelloError::MalformedKey(_))
        ));
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let key = sample_public();
        let ok = encode_public_key(&key).unwrap();
        let parsed = crate::codec::armor::unarmor(&ok).unwrap();
        let bytes =
            crate::codec::armor::armor(&key.comment, &parsed.payload[..30], b"").unwrap();
        assert!(matches!(
            decode_public_key(&bytes),
            Err(SelloError::MalformedKey(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected_for_keys() {
        let mut bytes = encode_public_key(&sample_public()).unwrap();
        bytes.extend_from_slice(b"junk");
        assert!(matches!(
            decode_public_key(&bytes),
            Err(SelloError::MalformedKey(_))
        ));
    }

    #[test]
    fn secret_key_debug_hides_material() {
        let key = sample_secret();
        let debug = format!("{key:?}");
        assert!(debug.starts_with("SecretKey(keynum="));
        assert!(!debug.contains("xkey"));
    }

    #[test]
    fn comment_roundtrips_unescaped() {
        let mut key = sample_public();
        key.comment = "spaces, punctuation: ()= and \"quotes\"".into();
        let bytes = encode_public_key(&key).unwrap();
        assert_eq!(decode_public_key(&bytes).unwrap().comment(), key.comment());
    }
}
