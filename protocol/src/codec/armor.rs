//! # Text Armor
//!
//! The persisted container framing shared by every sello artifact:
//!
//! ```text
//! untrusted comment: <comment>\n
//! <base64 payload>\n
//! [message bytes, embedded artifacts only]
//! ```
//!
//! The comment is advisory and not integrity-protected — hence the name.
//! Parsing touches exactly two newline-terminated header lines; whatever
//! follows the payload line's newline is handed back verbatim as the
//! trailer. Message bytes are never scanned for delimiters, which is what
//! makes the embedded round trip byte-exact for arbitrary content.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::config::{COMMENT_HEADER, MAX_COMMENT_BYTES};

/// A parsed armored artifact. The trailer is empty for keys and detached
/// signatures, and carries the message for embedded ones.
pub(crate) struct Unarmored {
    pub comment: String,
    pub payload: Vec<u8>,
    pub trailer: Vec<u8>,
}

/// Render the armored form: header lines plus an optional trailer.
///
/// Fails (with a plain description; callers map it onto the right error
/// kind) when the comment is too long or contains a newline — a newline
/// could not survive the round trip.
pub(crate) fn armor(comment: &str, payload: &[u8], trailer: &[u8]) -> Result<Vec<u8>, String> {
    if comment.len() > MAX_COMMENT_BYTES {
        return Err(format!(
            "comment exceeds {} bytes ({})",
            MAX_COMMENT_BYTES,
            comment.len()
        ));
    }
    if comment.contains('\n') {
        return Err("comment contains a newline".to_string());
    }

    let encoded = BASE64.encode(payload);
    let mut out = Vec::with_capacity(
        COMMENT_HEADER.len() + comment.len() + 1 + encoded.len() + 1 + trailer.len(),
    );
    out.extend_from_slice(COMMENT_HEADER.as_bytes());
    out.extend_from_slice(comment.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(encoded.as_bytes());
    out.push(b'\n');
    out.extend_from_slice(trailer);
    Ok(out)
}

/// Parse an armored artifact back into its parts.
///
/// Only the two header lines are interpreted; the input as a whole need
/// not be UTF-8 (the trailer is arbitrary bytes), but both header lines
/// must be.
pub(crate) fn unarmor(bytes: &[u8]) -> Result<Unarmored, String> {
    let (comment_line, rest) = split_line(bytes).ok_or("missing comment line")?;
    let comment_line =
        std::str::from_utf8(comment_line).map_err(|_| "comment line is not UTF-8".to_string())?;
    let comment = comment_line
        .strip_prefix(COMMENT_HEADER)
        .ok_or_else(|| format!("comment line must start with {COMMENT_HEADER:?}"))?;
    if comment.len() > MAX_COMMENT_BYTES {
        return Err(format!("comment exceeds {MAX_COMMENT_BYTES} bytes"));
    }

    let (payload_line, trailer) = split_line(rest).ok_or("missing base64 payload line")?;
    let payload_line =
        std::str::from_utf8(payload_line).map_err(|_| "payload line is not UTF-8".to_string())?;
    let payload = BASE64
        .decode(payload_line)
        .map_err(|e| format!("invalid base64 payload: {e}"))?;

    Ok(Unarmored {
        comment: comment.to_string(),
        payload,
        trailer: trailer.to_vec(),
    })
}

/// Split off one `\n`-terminated line. Returns the line without its
/// terminator and the bytes after it. `None` when no newline exists —
/// a truncated artifact.
fn split_line(bytes: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = bytes.iter().position(|&b| b == b'\n')?;
    Some((&bytes[..pos], &bytes[pos + 1..]))
}
