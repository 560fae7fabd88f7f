//! Base64 encoding and decoding of text.
//!
//! Text is encoded as its UTF-8 bytes with the standard padded alphabet.
//! Decoding must yield valid UTF-8, since the result is shown as text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Result, ToolkitError};

/// Encode `text` as standard padded Base64.
///
/// # Examples
///
/// ```
/// use toolkit_engine::encoding::{decode, encode};
///
/// assert_eq!(encode("hello"), "aGVsbG8=");
/// assert_eq!(decode("aGVsbG8=").unwrap(), "hello");
/// ```
pub fn encode(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode standard Base64 back into text.
///
/// Leading/trailing whitespace and line breaks inside the input (as left by
/// wrapped output) are ignored.
///
/// # Errors
///
/// Returns [`ToolkitError::Base64`] if the input is not valid Base64 or the
/// decoded bytes are not UTF-8.
pub fn decode(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ToolkitError::Base64(format!("invalid input: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|_| ToolkitError::Base64("decoded data is not valid UTF-8 text".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii() {
        assert_eq!(encode(""), "");
        assert_eq!(encode("f"), "Zg==");
        assert_eq!(encode("fo"), "Zm8=");
        assert_eq!(encode("foo"), "Zm9v");
    }

    #[test]
    fn test_encode_unicode_uses_utf8() {
        assert_eq!(encode("é"), "w6k=");
        assert_eq!(decode("w6k=").unwrap(), "é");
    }

    #[test]
    fn test_decode_ignores_whitespace() {
        assert_eq!(decode("  Zm9v\nYmFy \n").unwrap(), "foobar");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("not base64!").unwrap_err();
        assert!(err.to_string().starts_with("Base64 error"), "got: {err}");
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        // 0xFF 0xFE
        let err = decode("//4=").unwrap_err();
        assert!(err.to_string().contains("UTF-8"), "got: {err}");
    }
}
