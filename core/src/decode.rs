//! JSON decoding and pretty-printing of response bodies.
//!
//! Decoding goes through an untyped `serde_json::Value`, so any well-formed
//! JSON the server returns is accepted. Pretty output is the value
//! re-serialized with two-space indentation. Object keys come out sorted
//! since `serde_json` is used without `preserve_order`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// A decoded response body together with the bytes it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status of the exchange, or `None` when the bytes were decoded
    /// directly with `decode`.
    pub status: Option<u16>,
    pub value: Value,
    pub raw: Vec<u8>,
}

impl ApiResponse {
    /// The decoded value as indented JSON text.
    pub fn pretty(&self) -> Result<String, ApiError> {
        Ok(serde_json::to_string_pretty(&self.value)?)
    }

    /// Decode the raw body into a concrete type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        decode_as(&self.raw)
    }
}

/// Parse `bytes` as JSON. No status is recorded.
pub fn decode(bytes: &[u8]) -> Result<ApiResponse, ApiError> {
    decode_with_status(None, bytes.to_vec())
}

pub(crate) fn decode_with_status(
    status: Option<u16>,
    raw: Vec<u8>,
) -> Result<ApiResponse, ApiError> {
    let value = serde_json::from_slice::<Value>(&raw).map_err(|e| {
        tracing::warn!(
            status = ?status,
            serde_line = e.line(),
            serde_col = e.column(),
            body_snippet = %snip_body(&raw),
            "loklak.response.decode_error"
        );
        ApiError::from(e)
    })?;
    Ok(ApiResponse { status, value, raw })
}

/// Parse `bytes` into `T`.
pub fn decode_as<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse `bytes` as JSON and return it pretty-printed.
pub fn pretty_print(bytes: &[u8]) -> Result<String, ApiError> {
    decode(bytes)?.pretty()
}

pub(crate) fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).into_owned();
    if snip.len() > 200 {
        let mut cut = 200;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}
