//! Input decoding helpers.

use std::borrow::Cow;

/// Decode a markdown source file to a string.
///
/// UTF-8 is tried first (a leading BOM is stripped). Files that are not
/// valid UTF-8 are read as Windows-1252, a superset of ISO-8859-1, which is
/// what older hand-written manual sources tend to be saved as.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(decode_text(b"caf\xc3\xa9"), "café");
/// assert_eq!(decode_text(b"caf\xe9"), "café");
/// ```
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    tracing::warn!("input is not valid UTF-8, decoding as Windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("café".as_bytes()), "café");
        assert!(matches!(decode_text(b"plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xef\xbb\xbf# NAME"), "# NAME");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        assert_eq!(decode_text(b"caf\xe9 \x93quoted\x94"), "café \u{201c}quoted\u{201d}");
    }
}
