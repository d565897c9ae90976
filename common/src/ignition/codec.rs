use base64::{prelude::BASE64_STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};

use crate::Error;

/// Envelope prefix reassembled onto every payload this crate encodes.
pub const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8;base64,";

const BASE64_MARKER: &str = "base64,";

/// Strips the data-URL envelope of a file entry's `contents.source` and
/// returns the raw payload bytes.
pub fn decode_payload(source: &str) -> Result<Vec<u8>, Error> {
    let (_, payload) = source
        .split_once(BASE64_MARKER)
        .ok_or_else(|| Error::MalformedEmbeddedResource("missing base64 marker".to_string()))?;

    BASE64_STANDARD
        .decode(payload)
        .map_err(|e| Error::MalformedEmbeddedResource(format!("invalid base64: {e}")))
}

/// Wraps raw payload bytes in the data-URL envelope.
pub fn encode_payload(bytes: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(bytes))
}

/// Decodes an embedded YAML resource out of a file entry's `contents.source`.
pub fn decode_embedded<T: DeserializeOwned>(source: &str) -> Result<T, Error> {
    let bytes = decode_payload(source)?;

    serde_yaml::from_slice(&bytes)
        .map_err(|e| Error::MalformedEmbeddedResource(format!("invalid manifest: {e}")))
}

/// Serializes a resource back into an embeddable `contents.source` value.
pub fn encode_embedded<T: Serialize>(resource: &T) -> Result<String, Error> {
    let yaml = serde_yaml::to_string(resource)
        .map_err(|e| Error::MalformedEmbeddedResource(format!("unserializable manifest: {e}")))?;

    Ok(encode_payload(yaml.as_bytes()))
}
