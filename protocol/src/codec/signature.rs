//! # Signature Codec
//!
//! Detached and embedded signature containers. A detached artifact is the
//! two armor header lines and nothing else; an embedded artifact is the
//! same fixed-width framed block with the original message appended as the
//! exact byte remainder. Because the frame is fixed-width (one 74-byte
//! payload, one base64 line), decoding never searches the message for
//! markers — the round trip is byte-exact for empty messages and for
//! messages containing newlines, armor headers, or any other byte values.
//!
//! Signature payload (74 bytes): `PKALG || keynum(8) || signature(64)`.

use std::fmt;

use crate::codec::armor::{armor, unarmor};
use crate::config::{KEYNUM_BYTES, PKALG, SIGNATURE_BYTES, SIGNATURE_PAYLOAD_BYTES};
use crate::crypto::KeyNumber;
use crate::error::SelloError;

/// A decoded signature: the key number of the pair that produced it, the
/// raw Ed25519 signature, and the advisory armor comment.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    keynum: KeyNumber,
    sig: [u8; SIGNATURE_BYTES],
    comment: String,
}

impl Signature {
    /// Assemble a signature from its parts (signer and decoder path).
    pub fn new(keynum: KeyNumber, sig: [u8; SIGNATURE_BYTES], comment: String) -> Self {
        Self { keynum, sig, comment }
    }

    /// The key number of the producing pair.
    pub fn keynum(&self) -> KeyNumber {
        self.keynum
    }

    /// The raw 64-byte Ed25519 signature.
    pub fn raw(&self) -> &[u8; SIGNATURE_BYTES] {
        &self.sig
    }

    /// The advisory comment from the armor line.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature(keynum={}, sig={}..)",
            self.keynum,
            hex::encode(&self.sig[..4])
        )
    }
}

fn payload_of(sig: &Signature) -> Vec<u8> {
    let mut payload = Vec::with_capacity(SIGNATURE_PAYLOAD_BYTES);
    payload.extend_from_slice(&PKALG);
    payload.extend_from_slice(sig.keynum.as_bytes());
    payload.extend_from_slice(&sig.sig);
    payload
}

fn signature_from_payload(payload: &[u8]) -> Result<(KeyNumber, [u8; SIGNATURE_BYTES]), SelloError> {
    if payload.len() != SIGNATURE_PAYLOAD_BYTES {
        return Err(SelloError::MalformedSignature(format!(
            "signature payload must be {} bytes, got {}",
            SIGNATURE_PAYLOAD_BYTES,
            payload.len()
        )));
    }
    if payload[..2] != PKALG {
        return Err(SelloError::MalformedSignature(
            "unknown signature algorithm tag".into(),
        ));
    }
    let mut keynum = [0u8; KEYNUM_BYTES];
    keynum.copy_from_slice(&payload[2..10]);
    let mut sig = [0u8; SIGNATURE_BYTES];
    sig.copy_from_slice(&payload[10..74]);
    Ok((KeyNumber::from_bytes(keynum), sig))
}

/// Encode a detached signature artifact.
pub fn encode_detached(sig: &Signature) -> Result<Vec<u8>, SelloError> {
    armor(&sig.comment, &payload_of(sig), b"").map_err(SelloError::MalformedSignature)
}

/// Decode a detached signature artifact. The message is supplied
/// separately by the caller at verification time.
pub fn decode_detached(bytes: &[u8]) -> Result<Signature, SelloError> {
    let parsed = unarmor(bytes).map_err(SelloError::MalformedSignature)?;
    if !parsed.trailer.is_empty() {
        return Err(SelloError::MalformedSignature(
            "trailing bytes after detached signature".into(),
        ));
    }
    let (keynum, sig) = signature_from_payload(&parsed.payload)?;
    Ok(Signature {
        keynum,
        sig,
        comment: parsed.comment,
    })
}

/// Encode an embedded signature artifact: framed signature block followed
/// by the message bytes verbatim.
pub fn encode_embedded(sig: &Signature, message: &[u8]) -> Result<Vec<u8>, SelloError> {
    armor(&sig.comment, &payload_of(sig), message).map_err(SelloError::MalformedSignature)
}

/// Decode an embedded signature artifact, recovering the signature and the
/// exact original message bytes.
pub fn decode_embedded(bytes: &[u8]) -> Result<(Signature, Vec<u8>), SelloError> {
    let parsed = unarmor(bytes).map_err(SelloError::MalformedSignature)?;
    let (keynum, sig) = signature_from_payload(&parsed.payload)?;
    Ok((
        Signature {
            keynum,
            sig,
            comment: parsed.comment,
        },
        parsed.trailer,
    ))
}
