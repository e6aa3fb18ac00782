//! Signature algorithms and the digests that parameterize them.

use std::fmt;

use hmac::{Hmac, Mac as _};
use sha1::Sha1;
use sha2::{Digest as _, Sha256, Sha512};
use subtle::ConstantTimeEq as _;

/// Hash function used for key derivation and keyed-hash signatures.
///
/// `Sha1` is the historical default and keeps existing tokens verifiable;
/// prefer `Sha256` or `Sha512` for new deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Digest {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Digest {
    /// Hash `data` with this digest.
    #[must_use]
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        match self {
            Digest::Sha1 => Sha1::digest(data).to_vec(),
            Digest::Sha256 => Sha256::digest(data).to_vec(),
            Digest::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Keyed hash (HMAC) of `message` under `key`.
    #[must_use]
    pub fn keyed_hash(self, key: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            Digest::Sha1 => {
                let mut mac = <Hmac<Sha1>>::new_from_slice(key)
                    .expect("HMAC key size is always valid");
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            Digest::Sha256 => {
                let mut mac = <Hmac<Sha256>>::new_from_slice(key)
                    .expect("HMAC key size is always valid");
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
            Digest::Sha512 => {
                let mut mac = <Hmac<Sha512>>::new_from_slice(key)
                    .expect("HMAC key size is always valid");
                mac.update(message);
                mac.finalize().into_bytes().to_vec()
            }
        }
    }

    /// Output width in bytes.
    #[must_use]
    pub fn output_len(self) -> usize {
        match self {
            Digest::Sha1 => 20,
            Digest::Sha256 => 32,
            Digest::Sha512 => 64,
        }
    }
}

/// Produces raw signatures for a derived key and message, and checks
/// candidates against a recomputation.
pub trait SigningAlgorithm: fmt::Debug + Send + Sync {
    /// Raw signature bytes for `value` under `key`.
    fn signature(&self, key: &[u8], value: &[u8]) -> Vec<u8>;

    /// Recompute the signature over `(key, value)` and compare it to
    /// `candidate` in constant time. A length mismatch compares unequal
    /// without short-circuiting.
    fn verify(&self, key: &[u8], value: &[u8], candidate: &[u8]) -> bool {
        let expected = self.signature(key, value);
        expected.ct_eq(candidate).into()
    }
}

/// Always produces an empty signature.
///
/// Provides no integrity guarantee; only for explicit insecure or test
/// configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAlgorithm;

impl SigningAlgorithm for NoneAlgorithm {
    fn signature(&self, _key: &[u8], _value: &[u8]) -> Vec<u8> {
        Vec::new()
    }
}

/// Keyed-hash signatures under a configurable digest.
#[derive(Debug, Clone, Copy)]
pub struct HmacAlgorithm {
    digest: Digest,
}

impl HmacAlgorithm {
    #[must_use]
    pub fn new(digest: Digest) -> Self {
        Self { digest }
    }
}

impl Default for HmacAlgorithm {
    fn default() -> Self {
        Self::new(Digest::default())
    }
}

impl SigningAlgorithm for HmacAlgorithm {
    fn signature(&self, key: &[u8], value: &[u8]) -> Vec<u8> {
        self.digest.keyed_hash(key, value)
    }
}
