//! Payload serialization bound to a signature.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SignetError;
use crate::signer::{Signer, Signing};

/// The object-to-bytes boundary the serializers consume.
pub trait Marshaller {
    fn marshal<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SignetError>;
    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SignetError>;
}

/// JSON marshalling via serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn marshal<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, SignetError> {
        serde_json::to_vec(value).map_err(|e| SignetError::Marshal(e.to_string()))
    }

    fn unmarshal<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, SignetError> {
        serde_json::from_slice(bytes).map_err(|e| SignetError::Unmarshal(e.to_string()))
    }
}

/// Signs marshalled payloads as-is.
///
/// The token is only as url-safe as the marshalled text; see
/// [`UrlSafeSerializer`](crate::url_safe::UrlSafeSerializer) for tokens
/// that always are.
#[derive(Debug)]
pub struct Serializer<M = JsonMarshaller, S = Signer> {
    marshaller: M,
    signer: S,
}

impl<M: Marshaller, S: Signing> Serializer<M, S> {
    #[must_use]
    pub fn new(marshaller: M, signer: S) -> Self {
        Self { marshaller, signer }
    }

    /// Marshal `value` and sign the marshalled text.
    pub fn dumps<T: Serialize>(&self, value: &T) -> Result<String, SignetError> {
        let payload = self.marshaller.marshal(value)?;
        let text = String::from_utf8(payload)
            .map_err(|e| SignetError::Marshal(e.to_string()))?;
        Ok(self.signer.sign(&text))
    }

    /// Verify `token` and unmarshal the recovered payload.
    pub fn loads<T: DeserializeOwned>(&self, token: &str) -> Result<T, SignetError> {
        let text = self.signer.unsign(token)?;
        self.marshaller.unmarshal(text.as_bytes())
    }
}
