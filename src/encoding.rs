//! Text decoding with byte-order-mark stripping

use crate::types::{ConfigError, Result};
use encoding_rs::Encoding;

/// Decode raw file bytes using the named encoding.
///
/// `label` is a WHATWG encoding label as understood by `encoding_rs`
/// ("utf-8", "utf-16le", "latin1", ...). A byte-order mark matching the
/// encoding is removed, and any residual leading U+FEFF is stripped so
/// parsers never see one, whatever the format. Malformed sequences decode
/// to replacement characters rather than failing; a wrong encoding shows
/// up as a parse error downstream, not as silently correct output.
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))?;

    let (decoded, _had_errors) = encoding.decode_with_bom_removal(bytes);
    match decoded.strip_prefix('\u{feff}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(decoded.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le_bytes(text: &str, with_bom: bool) -> Vec<u8> {
        let mut bytes = Vec::new();
        if with_bom {
            bytes.extend_from_slice(&[0xff, 0xfe]);
        }
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(decode(b"{\"a\": 1}", "utf-8").unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_utf8_bom_removed() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"{\"a\": 1}");
        assert_eq!(decode(&bytes, "utf-8").unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_node_style_utf8_label() {
        assert_eq!(decode(b"hej", "utf8").unwrap(), "hej");
    }

    #[test]
    fn test_utf16le_with_and_without_bom_match() {
        let with_bom = decode(&utf16le_bytes("{\"a\": 1}", true), "utf-16le").unwrap();
        let without_bom = decode(&utf16le_bytes("{\"a\": 1}", false), "utf-16le").unwrap();
        assert_eq!(with_bom, without_bom);
        assert_eq!(with_bom, "{\"a\": 1}");
    }

    #[test]
    fn test_unknown_label() {
        let err = decode(b"", "not-a-real-encoding").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEncoding(_)));
    }

    #[test]
    fn test_wrong_encoding_does_not_roundtrip() {
        let bytes = utf16le_bytes("{\"a\": 1}", true);
        let decoded = decode(&bytes, "utf-8").unwrap();
        assert_ne!(decoded, "{\"a\": 1}");
    }
}
