//! Timestamp-aware signing: embed the issue time into the signed value
//! and enforce a maximum age on verification.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::encoding::{b64_decode, b64_encode, bytes_to_int, int_to_bytes};
use crate::error::SignetError;
use crate::signer::{Signer, Signing};

/// Decorates a [`Signer`]: `sign` appends an encoded creation timestamp
/// before signing, so the signature covers value and timestamp jointly;
/// `unsign` extracts and age-checks the timestamp after the signature
/// has verified.
///
/// `max_age` is in seconds; zero disables the age check.
#[derive(Debug)]
pub struct TimestampSigner {
    signer: Signer,
    max_age: u64,
}

impl TimestampSigner {
    #[must_use]
    pub fn new(signer: Signer, max_age: u64) -> Self {
        Self { signer, max_age }
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Sign `value` as issued at `timestamp`.
    #[must_use]
    pub fn sign_at(&self, value: &str, timestamp: u64) -> String {
        let encoded = b64_encode(&int_to_bytes(timestamp));
        let composite = format!("{value}{}{encoded}", self.signer.separator());
        self.signer.sign(&composite)
    }

    /// Sign `value` as issued now.
    #[must_use]
    pub fn sign(&self, value: &str) -> String {
        self.sign_at(value, Self::current_timestamp())
    }

    /// Verify `signed` against `now` and recover the original value
    /// together with its embedded timestamp.
    ///
    /// The base signature is checked first; the timestamp is untrusted
    /// until it passes. A timestamp ahead of `now` counts as age zero
    /// and is accepted; rejecting clock-skewed future timestamps is
    /// left to callers.
    pub fn unsign_with_timestamp(
        &self,
        signed: &str,
        now: u64,
    ) -> Result<(String, u64), SignetError> {
        let composite = self.signer.unsign(signed)?;

        let sep = self.signer.separator();
        let Some(index) = composite.rfind(sep) else {
            return Err(SignetError::MissingTimestamp);
        };
        let value = &composite[..index];
        let encoded = &composite[index + sep.len_utf8()..];
        let timestamp = bytes_to_int(&b64_decode(encoded)?)?;

        if self.max_age > 0 {
            let age = now.saturating_sub(timestamp);
            if age > self.max_age {
                tracing::debug!(age, max_age = self.max_age, "rejected expired token");
                return Err(SignetError::SignatureExpired {
                    age,
                    max_age: self.max_age,
                });
            }
        }

        Ok((value.to_owned(), timestamp))
    }

    /// Verify `signed` against an explicit `now` and recover the value.
    pub fn unsign_at(&self, signed: &str, now: u64) -> Result<String, SignetError> {
        self.unsign_with_timestamp(signed, now).map(|(value, _)| value)
    }

    /// Verify `signed` against the current time and recover the value.
    pub fn unsign(&self, signed: &str) -> Result<String, SignetError> {
        self.unsign_at(signed, Self::current_timestamp())
    }

    /// [`unsign`](TimestampSigner::unsign) with the recovered value
    /// discarded.
    #[must_use]
    pub fn validate(&self, signed: &str) -> bool {
        self.unsign(signed).is_ok()
    }

    /// When `signed` was issued, as wall-clock time. Verifies the
    /// signature (and age, if configured) before trusting the timestamp.
    pub fn issued_at(&self, signed: &str) -> Result<SystemTime, SignetError> {
        let (_, timestamp) =
            self.unsign_with_timestamp(signed, Self::current_timestamp())?;
        Ok(UNIX_EPOCH + Duration::from_secs(timestamp))
    }
}

impl Signing for TimestampSigner {
    fn sign(&self, value: &str) -> String {
        TimestampSigner::sign(self, value)
    }

    fn unsign(&self, signed: &str) -> Result<String, SignetError> {
        TimestampSigner::unsign(self, signed)
    }
}
