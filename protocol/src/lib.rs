// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # SELLO Protocol — Core Library
//!
//! A signify-compatible signing toolkit: Ed25519 key pairs (optionally
//! passphrase-protected), detached, embedded, and checksum-manifest
//! signatures, and a multi-key trial verification engine. Everything is
//! synchronous, byte-exact, and allergic to surprises — the on-disk
//! formats here interoperate with an existing ecosystem, and a single
//! drifted byte breaks cross-tool verification.
//!
//! ## Architecture
//!
//! - **config** — every wire-format constant. The interop contract.
//! - **crypto** — the Ed25519/SHA-2/bcrypt_pbkdf provider boundary.
//!   Don't roll your own.
//! - **codec** — text armor plus the fixed-width key and signature
//!   payloads.
//! - **protect** — passphrase wrapping of secret keys, checksum-verified.
//! - **manifest** — signed multi-file checksum listings.
//! - **trust** — trusted-key discovery, `(key, source)` pairs in
//!   directory order.
//! - **verify** — the trial loop: first success wins, first failure
//!   reason reported on exhaustion.
//! - **sign** — key generation and the three signing modes.
//!
//! ## Design Philosophy
//!
//! 1. The shell decides *where*; the core decides *what*. No environment
//!    reads, no default paths, no prompting in here.
//! 2. Decoding errors are final. There is no partial-decode fallback.
//! 3. Per-file checksum outcomes are data, not errors — callers get the
//!    full report and decide what it means.
//! 4. If it touches key material, it has tests. Plural.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod manifest;
pub mod protect;
pub mod sign;
pub mod trust;
pub mod verify;

// The working set, re-exported so shells don't memorize the hierarchy.
pub use codec::{PublicKey, SecretKey, Signature};
pub use crypto::{HashAlgorithm, KeyNumber};
pub use error::SelloError;
pub use manifest::{ChecksumManifest, FileOutcome};
pub use sign::{generate_keypair, sign_files, sign_message, SignatureMode};
pub use trust::Candidate;
pub use verify::{verify_detached, verify_embedded, verify_files, Verified};
