//! Hex decoding of key and IV material with an exact length check.

use common::EngineError;

/// Decode `text` as hex and require exactly `expected_len` bytes.
///
/// Leading and trailing ASCII whitespace is ignored.
///
/// # Errors
///
/// Returns [`EngineError::InvalidHexEncoding`] on malformed hex (odd length or
/// a non-hex character) and [`EngineError::UnexpectedLength`] when the decoded
/// length differs from `expected_len`.
pub fn decode_hex(text: &str, expected_len: usize) -> Result<Vec<u8>, EngineError> {
    let bytes = ::hex::decode(text.trim()).map_err(|_| EngineError::InvalidHexEncoding)?;
    if bytes.len() != expected_len {
        return Err(EngineError::UnexpectedLength {
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}
