use crate::format::ParseError;
use serde_json::Value;

/// Parse a JSON document, trying SIMD-accelerated parsing first.
///
/// simd-json parses in place, so the input is copied into a scratch buffer.
/// Anything it rejects (including numbers outside the 64-bit range) is
/// re-parsed with serde_json, which keeps such numbers exact and reports the
/// authoritative error. Object fields keep the order in which they appear in
/// the input.
pub fn parse_json(bytes: &[u8]) -> Result<Value, ParseError> {
    let mut buffer = bytes.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut buffer) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_json::from_slice(bytes)?),
    }
}
