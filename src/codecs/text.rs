//! Text codec adapter.

use bytes::Bytes;

use crate::{ConvertError, TextEncoding};

/// Encode text to bytes.
///
/// UTF-8 text is taken over without copying.
pub(crate) fn encode(text: String, encoding: TextEncoding) -> Result<Bytes, ConvertError> {
    if encoding == TextEncoding::Ascii {
        if let Some((offset, c)) = text.char_indices().find(|(_, c)| !c.is_ascii()) {
            return Err(ConvertError::InvalidInput(format!(
                "character {c:?} at byte offset {offset} is not ASCII"
            )));
        }
    }
    Ok(Bytes::from(text.into_bytes()))
}

/// Decode bytes to text. Undecodable input becomes U+FFFD, never an error.
pub(crate) fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Ascii => bytes
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
            .collect(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_round_trip() {
        let bytes = encode("Hello, World \u{1F973}".to_string(), TextEncoding::Utf8).unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(decode(&bytes, TextEncoding::Utf8), "Hello, World \u{1F973}");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(decode(&[0x66, 0xC3, 0x28], TextEncoding::Utf8), "f\u{FFFD}(");
    }

    #[test]
    fn ascii_rejects_wide_characters() {
        let err = encode("caf\u{e9}".to_string(), TextEncoding::Ascii).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(ref msg) if msg.contains("offset 3")));
        assert_eq!(&encode("cafe".to_string(), TextEncoding::Ascii).unwrap()[..], b"cafe");
    }

    #[test]
    fn ascii_decode_replaces_high_bytes() {
        assert_eq!(decode(&[b'a', 0xE9, b'b'], TextEncoding::Ascii), "a\u{FFFD}b");
    }
}
