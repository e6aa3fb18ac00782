//! Base signer: derive a key from a secret and a purpose salt, sign
//! values, and verify-and-split signed values.

use std::fmt;

use zeroize::Zeroizing;

use crate::algorithm::{Digest, HmacAlgorithm, SigningAlgorithm};
use crate::encoding::{b64_decode, b64_encode};
use crate::error::SignetError;

/// Purpose salt used when none is configured.
pub const DEFAULT_SALT: &str = "signet.Signer";

/// Default token separator. Outside the url-safe base64 alphabet, so a
/// token always splits unambiguously at its last occurrence.
pub const DEFAULT_SEPARATOR: char = '.';

/// Root secret material.
///
/// Zeroed from memory on drop and redacted from `Debug` output; never
/// appears in tokens, errors, or log events.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<Vec<u8>>);

impl SecretKey {
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&[u8]> for SecretKey {
    fn from(b: &[u8]) -> Self {
        Self::new(b.to_vec())
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(b: Vec<u8>) -> Self {
        Self::new(b)
    }
}

/// How the secret and salt combine into the actual signing key, so one
/// secret can serve multiple distinct signing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyDerivation {
    /// digest(salt ++ secret)
    Concat,
    /// digest(salt ++ "signer" ++ secret), as Django's signer derives.
    #[default]
    DjangoConcat,
    /// HMAC(key=secret, message=salt) under the configured digest.
    Hmac,
    /// The secret verbatim, no derivation.
    None,
}

/// The sign/unsign seam shared by [`Signer`] and
/// [`TimestampSigner`](crate::timed::TimestampSigner), letting the
/// serializers accept either.
pub trait Signing {
    /// Append a signature over `value`.
    fn sign(&self, value: &str) -> String;

    /// Verify `signed` and recover the original value.
    fn unsign(&self, signed: &str) -> Result<String, SignetError>;

    /// [`unsign`](Signing::unsign) with the recovered value discarded.
    fn validate(&self, signed: &str) -> bool {
        self.unsign(signed).is_ok()
    }
}

/// Binds a secret, a purpose salt, a separator, a key-derivation mode,
/// and a signature algorithm.
///
/// Construct once, then share freely: all operations are pure functions
/// of the immutable configuration.
#[derive(Debug)]
pub struct Signer {
    secret_key: SecretKey,
    salt: String,
    sep: char,
    key_derivation: KeyDerivation,
    digest: Digest,
    algorithm: Box<dyn SigningAlgorithm>,
}

impl Signer {
    /// Signer with the default salt, `.` separator, Django-style key
    /// derivation, and HMAC-SHA1 signatures.
    #[must_use]
    pub fn new(secret_key: impl Into<SecretKey>) -> Self {
        Self {
            secret_key: secret_key.into(),
            salt: DEFAULT_SALT.to_owned(),
            sep: DEFAULT_SEPARATOR,
            key_derivation: KeyDerivation::default(),
            digest: Digest::default(),
            algorithm: Box::<HmacAlgorithm>::default(),
        }
    }

    /// Scope this signer to a purpose. Signers with different salts
    /// derive different keys and reject each other's tokens.
    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Use a different separator.
    ///
    /// Rejects characters from the url-safe base64 alphabet (letters,
    /// digits, `-`, `_`): encoded output could contain them, making the
    /// split at the last separator ambiguous.
    pub fn with_separator(mut self, sep: char) -> Result<Self, SignetError> {
        if sep.is_ascii_alphanumeric() || sep == '-' || sep == '_' {
            return Err(SignetError::InvalidSeparator(sep));
        }
        self.sep = sep;
        Ok(self)
    }

    #[must_use]
    pub fn with_key_derivation(mut self, mode: KeyDerivation) -> Self {
        self.key_derivation = mode;
        self
    }

    /// Select the digest for key derivation and for the default HMAC
    /// algorithm. A custom algorithm set afterwards overrides the latter.
    #[must_use]
    pub fn with_digest(mut self, digest: Digest) -> Self {
        self.digest = digest;
        self.algorithm = Box::new(HmacAlgorithm::new(digest));
        self
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl SigningAlgorithm + 'static) -> Self {
        self.algorithm = Box::new(algorithm);
        self
    }

    /// The separator joining values to signatures and timestamps.
    #[must_use]
    pub fn separator(&self) -> char {
        self.sep
    }

    /// Signing key bytes for this signer's secret, salt, and derivation
    /// mode. Deterministic: equal configuration derives equal keys.
    #[must_use]
    pub fn derive_key(&self) -> Zeroizing<Vec<u8>> {
        let secret = self.secret_key.as_bytes();
        let derived = match self.key_derivation {
            KeyDerivation::Concat => {
                let mut input = Vec::with_capacity(self.salt.len() + secret.len());
                input.extend_from_slice(self.salt.as_bytes());
                input.extend_from_slice(secret);
                self.digest.hash(&input)
            }
            KeyDerivation::DjangoConcat => {
                let mut input =
                    Vec::with_capacity(self.salt.len() + "signer".len() + secret.len());
                input.extend_from_slice(self.salt.as_bytes());
                input.extend_from_slice(b"signer");
                input.extend_from_slice(secret);
                self.digest.hash(&input)
            }
            KeyDerivation::Hmac => self.digest.keyed_hash(secret, self.salt.as_bytes()),
            KeyDerivation::None => secret.to_vec(),
        };
        Zeroizing::new(derived)
    }

    /// Encoded signature for `value`.
    #[must_use]
    pub fn signature(&self, value: &str) -> String {
        let key = self.derive_key();
        b64_encode(&self.algorithm.signature(&key, value.as_bytes()))
    }

    /// Check an encoded candidate signature against `value`.
    ///
    /// Recomputes the signature over the derived key and `value`, then
    /// compares to the decoded candidate in constant time. Candidates
    /// that fail to decode verify as false.
    #[must_use]
    pub fn verify_signature(&self, value: &str, sig: &str) -> bool {
        let Ok(candidate) = b64_decode(sig) else {
            return false;
        };
        let key = self.derive_key();
        self.algorithm.verify(&key, value.as_bytes(), &candidate)
    }

    /// `value ++ sep ++ signature(value)`.
    #[must_use]
    pub fn sign(&self, value: &str) -> String {
        format!("{value}{}{}", self.sep, self.signature(value))
    }

    /// Split `signed` at the last separator and verify the suffix
    /// against the prefix. Returns the prefix on success; a missing
    /// separator or a failed verification is [`SignetError::BadSignature`].
    pub fn unsign(&self, signed: &str) -> Result<String, SignetError> {
        let Some(index) = signed.rfind(self.sep) else {
            tracing::debug!("rejected token without separator");
            return Err(SignetError::BadSignature);
        };
        let value = &signed[..index];
        let sig = &signed[index + self.sep.len_utf8()..];
        if self.verify_signature(value, sig) {
            Ok(value.to_owned())
        } else {
            tracing::debug!("rejected token with mismatched signature");
            Err(SignetError::BadSignature)
        }
    }

    /// [`unsign`](Signer::unsign) with the recovered value discarded.
    #[must_use]
    pub fn validate(&self, signed: &str) -> bool {
        self.unsign(signed).is_ok()
    }
}

impl Signing for Signer {
    fn sign(&self, value: &str) -> String {
        Signer::sign(self, value)
    }

    fn unsign(&self, signed: &str) -> Result<String, SignetError> {
        Signer::unsign(self, signed)
    }
}
