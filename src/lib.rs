//! Signet: tamper-evident signed tokens.
//!
//! A [`Signer`] binds a shared secret to a purpose salt and appends a
//! keyed signature to a value, so any holder of the secret can detect
//! modification. A [`TimestampSigner`] additionally embeds the issue
//! time and rejects tokens older than a configured age. The serializers
//! bind marshalled payloads (JSON by default, optionally deflated and
//! base64-encoded) to the same signatures, producing tokens fit for
//! session cookies, password-reset links, and one-time tokens.
//!
//! Signing proves integrity and authenticity only; payloads are
//! readable by anyone who base64-decodes them.
//!
//! ```
//! use signet::{KeyDerivation, Signer};
//!
//! let signer = Signer::new("s3cr3t")
//!     .with_salt("cookie-session")
//!     .with_key_derivation(KeyDerivation::Hmac);
//!
//! let token = signer.sign("hello");
//! assert_eq!(signer.unsign(&token).unwrap(), "hello");
//! assert!(signer.unsign("hello.AAAA").is_err());
//! ```

pub mod algorithm;
pub mod encoding;
pub mod error;
pub mod serializer;
pub mod signer;
pub mod timed;
pub mod url_safe;

pub use algorithm::{Digest, HmacAlgorithm, NoneAlgorithm, SigningAlgorithm};
pub use error::SignetError;
pub use serializer::{JsonMarshaller, Marshaller, Serializer};
pub use signer::{KeyDerivation, SecretKey, Signer, Signing};
pub use timed::TimestampSigner;
pub use url_safe::UrlSafeSerializer;
