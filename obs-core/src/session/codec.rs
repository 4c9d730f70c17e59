//! Session ↔ cookie value codec
//!
//! A cookie value is the URL-safe, padded base64 encoding of the session's
//! JSON object. Keys are written in lexicographic order so the same session
//! always produces the same cookie value.

use std::collections::BTreeMap;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use serde_json::Value;

use super::model::Session;
use crate::{Error, Result};

/// Encode a session into a cookie value
pub fn encode(session: &Session) -> Result<String> {
    let fields = match serde_json::to_value(session)? {
        Value::Object(map) => map,
        other => {
            return Err(Error::Serialization(format!(
                "session serialized to {} instead of an object",
                other
            )))
        }
    };
    let ordered: BTreeMap<String, Value> = fields.into_iter().collect();
    let json = serde_json::to_vec(&ordered)?;
    Ok(URL_SAFE.encode(json))
}

/// Decode a cookie value into a session
pub fn decode(value: &str) -> Result<Session> {
    let bytes = URL_SAFE
        .decode(value.as_bytes())
        .map_err(|e| Error::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| Error::Parse(e.to_string()))
}
