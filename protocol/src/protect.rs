//! # Secret-Key Protector
//!
//! Wraps the 64-byte secret key for storage and unwraps it at sign time.
//!
//! The scheme is the container format's: derive a 64-byte stream with
//! bcrypt_pbkdf and XOR it over the key. XOR cannot fail — feed it the
//! wrong passphrase and it cheerfully produces 64 bytes of garbage — so
//! wrongness is detected by a checksum over the *plaintext* key (first 8
//! bytes of its SHA-512) computed at creation and re-checked after every
//! unmask. Checksum mismatch is [`SelloError::IncorrectPassword`], always,
//! before any signing is attempted.
//!
//! The unwrapped key exists only in the return value; callers use it for
//! one signing operation and drop it. Nothing here persists plaintext.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::codec::SecretKey;
use crate::config::{FULL_SECRET_KEY_BYTES, KDF_SALT_BYTES};
use crate::crypto::{kdf, secret_key_checksum, KeyNumber};
use crate::error::SelloError;

/// Wrap a freshly generated secret key into its storable form.
///
/// With a passphrase: a random salt is drawn, the KDF stream is XORed over
/// the key, and `rounds` records the work factor. Without one: `rounds` is
/// forced to 0, the salt is zeroed, and the key is stored as-is. In both
/// cases the checksum is computed over the plaintext so a later unwrap can
/// prove it recovered the real key.
pub fn protect(
    full_secret: &[u8; FULL_SECRET_KEY_BYTES],
    keynum: KeyNumber,
    comment: String,
    passphrase: Option<&str>,
    rounds: u32,
) -> Result<SecretKey, SelloError> {
    let checksum = secret_key_checksum(full_secret);

    let protected = matches!(passphrase, Some(p) if !p.is_empty());
    let (kdf_rounds, salt) = if protected {
        let mut salt = [0u8; KDF_SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        // rounds == 0 with a passphrase would silently store plaintext;
        // treat it as the caller forgetting the work factor.
        (rounds.max(1), salt)
    } else {
        (0, [0u8; KDF_SALT_BYTES])
    };

    let mask = kdf::derive_mask(passphrase, &salt, kdf_rounds)?;
    let mut xkey = *full_secret;
    for (byte, m) in xkey.iter_mut().zip(mask.iter()) {
        *byte ^= m;
    }

    Ok(SecretKey {
        keynum,
        kdf_rounds,
        salt,
        checksum,
        xkey,
        comment,
    })
}

/// Recover the plaintext 64-byte secret key from its stored form.
///
/// Derives the mask from the stored salt and work factor, unmasks, and
/// verifies the checksum. For an unprotected key (`rounds == 0`) the mask
/// is zero and no passphrase is needed; supplying one anyway is ignored.
pub fn unwrap(
    secret: &SecretKey,
    passphrase: Option<&str>,
) -> Result<[u8; FULL_SECRET_KEY_BYTES], SelloError> {
    let mask = kdf::derive_mask(passphrase, &secret.salt, secret.kdf_rounds)?;
    let mut plain = secret.xkey;
    for (byte, m) in plain.iter_mut().zip(mask.iter()) {
        *byte ^= m;
    }

    if secret_key_checksum(&plain) != secret.checksum {
        return Err(SelloError::IncorrectPassword);
    }
    Ok(plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_ed25519;

    // Keep KDF cost negligible in tests; correctness is round-independent.
    const TEST_ROUNDS: u32 = 4;

    #[test]
    fn unprotected_roundtrip() {
        let (full, _) = generate_ed25519();
        let secret = protect(&full, KeyNumber::generate(), "k".into(), None, 0).unwrap();
        assert!(!secret.is_password_protected());
        assert_eq!(secret.kdf_rounds(), 0);
        assert_eq!(unwrap(&secret, None).unwrap(), full);
    }

    #[test]
    fn unprotected_key_stores_plaintext_with_checksum() {
        let (full, _) = generate_ed25519();
        let secret = protect(&full, KeyNumber::generate(), "k".into(), None, 0).unwrap();
        assert_eq!(secret.xkey, full);
        assert_eq!(secret.checksum, secret_key_checksum(&full));
        assert_eq!(secret.salt, [0u8; 16]);
    }

    #[test]
    fn protected_roundtrip() {
        let (full, _) = generate_ed25519();
        let secret = protect(
            &full,
            KeyNumber::generate(),
            "k".into(),
            Some("open sesame"),
            TEST_ROUNDS,
        )
        .unwrap();
        assert!(secret.is_password_protected());
        // Stored bytes must differ from the plaintext.
        assert_ne!(secret.xkey, full);
        assert_eq!(unwrap(&secret, Some("open sesame")).unwrap(), full);
    }

    #[test]
    fn wrong_passphrase_is_detected() {
        let (full, _) = generate_ed25519();
        let secret = protect(
            &full,
            KeyNumber::generate(),
            "k".into(),
            Some("right"),
            TEST_ROUNDS,
        )
        .unwrap();
        // The XOR step "succeeds" either way; only the checksum knows.
        assert!(matches!(
            unwrap(&secret, Some("wrong")),
            Err(SelloError::IncorrectPassword)
        ));
    }

    #[test]
    fn missing_passphrase_on_protected_key_fails() {
        let (full, _) = generate_ed25519();
        let secret = protect(
            &full,
            KeyNumber::generate(),
            "k".into(),
            Some("right"),
            TEST_ROUNDS,
        )
        .unwrap();
        assert!(matches!(
            unwrap(&secret, None),
            Err(SelloError::IncorrectPassword)
        ));
    }

    #[test]
    fn corrupted_stored_key_is_detected() {
        let (full, _) = generate_ed25519();
        let mut secret = protect(&full, KeyNumber::generate(), "k".into(), None, 0).unwrap();
        secret.xkey[17] ^= 0x80;
        assert!(matches!(
            unwrap(&secret, None),
            Err(SelloError::IncorrectPassword)
        ));
    }

    #[test]
    fn empty_passphrase_means_unprotected() {
        let (full, _) = generate_ed25519();
        let secret =
            protect(&full, KeyNumber::generate(), "k".into(), Some(""), TEST_ROUNDS).unwrap();
        assert!(!secret.is_password_protected());
        assert_eq!(unwrap(&secret, None).unwrap(), full);
    }

    #[test]
    fn zero_rounds_with_passphrase_still_protects() {
        let (full, _) = generate_ed25519();
        let secret =
            protect(&full, KeyNumber::generate(), "k".into(), Some("pw"), 0).unwrap();
        assert!(secret.is_password_protected());
        assert_eq!(unwrap(&secret, Some("pw")).unwrap(), full);
    }

    #[test]
    fn salts_are_unique_per_key() {
        let (full, _) = generate_ed25519();
        let a = protect(&full, KeyNumber::generate(), "k".into(), Some("pw"), TEST_ROUNDS)
            .unwrap();
        let b = protect(&full, KeyNumber::generate(), "k".into(), Some("pw"), TEST_ROUNDS)
            .unwrap();
        assert_ne!(a.salt, b.salt);
    }
}
