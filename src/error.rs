use thiserror::Error;

/// Errors surfaced by signing, verification, and payload serialization.
///
/// Nothing is retried internally; every failure is handed to the caller,
/// and every ambiguity rejects the token outright.
#[derive(Debug, Error)]
pub enum SignetError {
    /// The configured separator occurs in the url-safe base64 alphabet,
    /// which would make splitting a token at its last separator ambiguous.
    #[error("invalid separator {0:?}: it occurs in the url-safe base64 alphabet")]
    InvalidSeparator(char),

    #[error("malformed base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// A compact big-endian integer must be 1 to 8 bytes wide.
    #[error("bad compact integer: expected 1 to 8 bytes, got {actual}")]
    BadCompactInt { actual: usize },

    /// Separator missing or signature mismatch. Carries no detail about
    /// where verification diverged.
    #[error("signature does not match value")]
    BadSignature,

    /// The signature verified but the value carries no embedded timestamp.
    #[error("timestamp missing from signed value")]
    MissingTimestamp,

    /// The signature verified but the token is older than allowed.
    #[error("signature age {age} > {max_age} seconds")]
    SignatureExpired { age: u64, max_age: u64 },

    #[error("payload marshalling failed: {0}")]
    Marshal(String),

    #[error("payload unmarshalling failed: {0}")]
    Unmarshal(String),

    #[error("payload decompression failed: {0}")]
    Decompression(String),
}
