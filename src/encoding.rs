//! Deterministic codecs shared by the signing pipeline.
//!
//! Tokens travel in cookies and URLs, so raw bytes are carried as
//! url-safe base64 with the `=` padding stripped. Embedded timestamps are
//! carried as minimal big-endian integers to keep tokens short.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::error::SignetError;

/// Encode bytes as url-safe base64 with padding stripped.
#[must_use]
pub fn b64_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode url-safe unpadded base64 produced by [`b64_encode`].
///
/// Inputs whose length is already a multiple of four form complete
/// blocks and get no padding restored; other lengths are padded out to
/// the next block boundary before decoding.
pub fn b64_decode(text: &str) -> Result<Vec<u8>, SignetError> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}

/// Encode a non-negative integer as minimal big-endian bytes.
///
/// Leading zero bytes are dropped. Zero encodes as a single zero byte,
/// so the output is never empty.
#[must_use]
pub fn int_to_bytes(n: u64) -> Vec<u8> {
    let bytes = n.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    bytes[start..].to_vec()
}

/// Decode a big-endian integer of 1 to 8 bytes.
///
/// Accepts any width in that range, left-padding conceptually with zero
/// bytes, so every [`int_to_bytes`] output round-trips.
pub fn bytes_to_int(bytes: &[u8]) -> Result<u64, SignetError> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(SignetError::BadCompactInt {
            actual: bytes.len(),
        });
    }
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(buf))
}
