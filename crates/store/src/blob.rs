//! Blob field payload encoding
//!
//! `Blob` fields are stored as text columns carrying base64. These helpers
//! give the form layer one canonical encoding for file payloads (the
//! village logo, scanned attachments).

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lumbung_core::{Error, Result, Value};

/// Encode a binary payload as a blob-field cell value
pub fn encode_blob(bytes: &[u8]) -> Value {
    Value::Text(STANDARD.encode(bytes))
}

/// Decode a blob-field cell value back into its binary payload
pub fn decode_blob(value: &Value) -> Result<Vec<u8>> {
    let text = value
        .as_text()
        .ok_or_else(|| Error::Serialization("blob field does not hold text".to_string()))?;
    STANDARD
        .decode(text)
        .map_err(|e| Error::Serialization(format!("blob payload is not valid base64: {e}")))
}
