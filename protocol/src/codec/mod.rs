//! # Artifact Codecs
//!
//! The on-disk containers: text armor framing plus the fixed-width binary
//! payloads for keys and signatures. Byte-for-byte compatibility is the
//! whole point of this module — every width and tag is pinned in
//! [`crate::config`], and deviating from any of them breaks verification
//! against artifacts produced by other tools.

pub(crate) mod armor;
pub mod key;
pub mod signature;

pub use key::{
    decode_public_key, decode_secret_key, encode_public_key, encode_secret_key, PublicKey,
    SecretKey,
};
pub use signature::{
    decode_detached, decode_embedded, encode_detached, encode_embedded, Signature,
};
