//! Compact url-safe serialization: marshalled payloads are optionally
//! deflated, then base64-encoded before signing, so tokens survive
//! cookies, headers, and query strings unescaped.

use std::io::{Read as _, Write as _};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::encoding::{b64_decode, b64_encode};
use crate::error::SignetError;
use crate::serializer::{JsonMarshaller, Marshaller};
use crate::signer::{Signer, Signing};

/// Prefixed to compressed payloads. Outside the base64 alphabet, so it
/// can never collide with encoded content.
const COMPRESSED_MARKER: char = '.';

fn compress(data: &[u8]) -> Result<Vec<u8>, SignetError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SignetError::Marshal(e.to_string()))?;
    encoder.finish().map_err(|e| SignetError::Marshal(e.to_string()))
}

fn decompress(data: &[u8]) -> Result<Vec<u8>, SignetError> {
    let mut out = Vec::new();
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| SignetError::Decompression(e.to_string()))?;
    Ok(out)
}

/// Decorates the payload pipeline of a
/// [`Serializer`](crate::serializer::Serializer): marshalled bytes are
/// zlib-compressed when that pays for itself, then base64-encoded, with
/// a one-character marker flagging compressed payloads.
#[derive(Debug)]
pub struct UrlSafeSerializer<M = JsonMarshaller, S = Signer> {
    marshaller: M,
    signer: S,
}

impl<M: Marshaller, S: Signing> UrlSafeSerializer<M, S> {
    #[must_use]
    pub fn new(marshaller: M, signer: S) -> Self {
        Self { marshaller, signer }
    }

    /// Marshal `value` into url-safe payload text.
    ///
    /// The compressed form is used only when it undercuts the original
    /// by at least two bytes, since the marker eats one of them.
    pub fn dump_payload<T: Serialize>(&self, value: &T) -> Result<String, SignetError> {
        let payload = self.marshaller.marshal(value)?;
        let compressed = compress(&payload)?;
        if compressed.len() + 1 < payload.len() {
            Ok(format!("{COMPRESSED_MARKER}{}", b64_encode(&compressed)))
        } else {
            Ok(b64_encode(&payload))
        }
    }

    /// Recover marshalled bytes from [`dump_payload`] text.
    ///
    /// [`dump_payload`]: UrlSafeSerializer::dump_payload
    pub fn load_payload(&self, text: &str) -> Result<Vec<u8>, SignetError> {
        match text.strip_prefix(COMPRESSED_MARKER) {
            Some(rest) => decompress(&b64_decode(rest)?),
            None => b64_decode(text),
        }
    }

    /// Marshal, encode, and sign `value` into a url-safe token.
    pub fn dumps<T: Serialize>(&self, value: &T) -> Result<String, SignetError> {
        let payload = self.dump_payload(value)?;
        Ok(self.signer.sign(&payload))
    }

    /// Verify `token`, then decode and unmarshal its payload.
    pub fn loads<T: DeserializeOwned>(&self, token: &str) -> Result<T, SignetError> {
        let text = self.signer.unsign(token)?;
        let bytes = self.load_payload(&text)?;
        self.marshaller.unmarshal(&bytes)
    }
}
