//! # Wire Format Constants
//!
//! Every magic number of the sello on-disk format lives here. If you're
//! hardcoding a field width somewhere else, you're doing it wrong and you
//! owe the team coffee.
//!
//! These values are not ours to tune: they define the signify container
//! layout, and every deviation breaks verification against files produced
//! by other tools. Treat this module as read-only prose.

// ---------------------------------------------------------------------------
// Algorithm Tags
// ---------------------------------------------------------------------------

/// Signature algorithm tag: Ed25519. The first two bytes of every key and
/// signature payload. Decoders reject anything else.
pub const PKALG: [u8; 2] = *b"Ed";

/// Key-derivation algorithm tag: bcrypt_pbkdf. Secret keys carry this even
/// when unprotected (rounds = 0), so the payload width never varies.
pub const KDFALG: [u8; 2] = *b"BK";

// ---------------------------------------------------------------------------
// Field Widths
// ---------------------------------------------------------------------------

/// Key number length in bytes. Eight random bytes generated once per key
/// pair; both halves carry the same value and every signature repeats it.
pub const KEYNUM_BYTES: usize = 8;

/// Ed25519 public key length.
pub const PUBLIC_KEY_BYTES: usize = 32;

/// The full Ed25519 secret key as stored on disk: 32-byte seed followed by
/// the 32-byte public key, matching the reference implementation's layout.
pub const FULL_SECRET_KEY_BYTES: usize = 64;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_BYTES: usize = 64;

/// bcrypt_pbkdf salt length.
pub const KDF_SALT_BYTES: usize = 16;

/// Secret-key checksum length: the first 8 bytes of SHA-512 over the
/// plaintext 64-byte secret key. Detects a wrong passphrase before any
/// signing is attempted.
pub const CHECKSUM_BYTES: usize = 8;

// ---------------------------------------------------------------------------
// Payload Sizes (derived, spelled out for decoder checks)
// ---------------------------------------------------------------------------

/// Public key payload: `PKALG || keynum || public`.
pub const PUBLIC_PAYLOAD_BYTES: usize = 2 + KEYNUM_BYTES + PUBLIC_KEY_BYTES; // 42

/// Secret key payload:
/// `PKALG || KDFALG || rounds(u32 BE) || salt || checksum || keynum || xkey`.
pub const SECRET_PAYLOAD_BYTES: usize =
    2 + 2 + 4 + KDF_SALT_BYTES + CHECKSUM_BYTES + KEYNUM_BYTES + FULL_SECRET_KEY_BYTES; // 104

/// Signature payload: `PKALG || keynum || signature`.
pub const SIGNATURE_PAYLOAD_BYTES: usize = 2 + KEYNUM_BYTES + SIGNATURE_BYTES; // 74

// ---------------------------------------------------------------------------
// Passphrase Protection
// ---------------------------------------------------------------------------

/// Default bcrypt_pbkdf work factor for newly protected keys. The upstream
/// default; interactive unlock takes on the order of a second on current
/// hardware.
pub const DEFAULT_KDF_ROUNDS: u32 = 42;

// ---------------------------------------------------------------------------
// Text Armor
// ---------------------------------------------------------------------------

/// Every armored artifact starts with this header, then the comment, then
/// a newline, then one base64 payload line.
pub const COMMENT_HEADER: &str = "untrusted comment: ";

/// Maximum comment length in bytes. Anything longer is rejected at encode
/// and decode time.
pub const MAX_COMMENT_BYTES: usize = 1024;

// ---------------------------------------------------------------------------
// Conventional File Suffixes
// ---------------------------------------------------------------------------

/// Public key files: `<name>.pub`. The trusted-key scanner only considers
/// files with this suffix.
pub const PUBKEY_SUFFIX: &str = ".pub";

/// Secret key files: `<name>.sec`.
pub const SECKEY_SUFFIX: &str = ".sec";

/// Signature files: `<name>.sig`.
pub const SIG_SUFFIX: &str = ".sig";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_sizes_match_wire_format() {
        // The interop contract in one test: these are the exact byte counts
        // other signify implementations produce and expect.
        assert_eq!(PUBLIC_PAYLOAD_BYTES, 42);
        assert_eq!(SECRET_PAYLOAD_BYTES, 104);
        assert_eq!(SIGNATURE_PAYLOAD_BYTES, 74);
    }
}
