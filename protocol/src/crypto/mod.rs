//! # Cryptographic Primitives for SELLO
//!
//! Every curve operation, digest, and passphrase derivation in the toolkit
//! flows through this module. The rest of the crate deals in byte layouts
//! and policy; this module is the only place allowed to know what an
//! elliptic curve is.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **Ed25519** for signatures — fast, deterministic, nobody has broken it.
//! - **SHA-256 / SHA-512** for digests — fixed by the container format.
//! - **bcrypt_pbkdf** for passphrase protection — the `BK` tag says so.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! implementations. If you're tempted to optimize these functions,
//! reconsider. Then reconsider again.

pub mod hash;
pub mod kdf;
pub mod keys;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use hash::{secret_key_checksum, HashAlgorithm};
pub use keys::{generate_ed25519, sign_ed25519, verify_ed25519, KeyNumber};
