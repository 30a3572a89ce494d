//! # Passphrase Key Derivation
//!
//! Derives the 64-byte XOR mask that protects secret keys at rest, using
//! bcrypt_pbkdf — the KDF the `BK` tag in the secret-key payload promises.
//! A thin wrapper around the audited `bcrypt-pbkdf` crate; if you're
//! tempted to optimize or substitute this, please reconsider, then go read
//! about GPU cracking rigs and come back when you've lost the urge.

use crate::config::{FULL_SECRET_KEY_BYTES, KDF_SALT_BYTES};
use crate::error::SelloError;

/// Derive the mask for a secret key's stored bytes.
///
/// - `rounds == 0` means the key is not passphrase-protected: the mask is
///   all zeros and XOR with it is the identity. The passphrase, if any, is
///   ignored.
/// - `rounds > 0` requires a non-empty passphrase; deriving a mask from an
///   empty one would give the illusion of protection while providing none,
///   so it fails with [`SelloError::IncorrectPassword`] up front.
pub fn derive_mask(
    passphrase: Option<&str>,
    salt: &[u8; KDF_SALT_BYTES],
    rounds: u32,
) -> Result<[u8; FULL_SECRET_KEY_BYTES], SelloError> {
    let mut mask = [0u8; FULL_SECRET_KEY_BYTES];
    if rounds == 0 {
        return Ok(mask);
    }

    let passphrase = match passphrase {
        Some(p) if !p.is_empty() => p,
        _ => return Err(SelloError::IncorrectPassword),
    };

    // The only failure modes here are degenerate parameters (empty salt or
    // output), which the fixed-width arrays rule out. Map defensively all
    // the same.
    bcrypt_pbkdf::bcrypt_pbkdf(passphrase, salt, rounds, &mut mask)
        .map_err(|_| SelloError::IncorrectPassword)?;
    Ok(mask)
}
