//! Base64 codec adapter using the base64 crate.
//!
//! Handles the standard and URL-safe alphabets, padding repair, and the
//! `data:<mime>;base64,` envelope.

use std::sync::LazyLock;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use regex::Regex;

use crate::{ConvertError, ConvertOptions};

/// Standard alphabet decoder that ignores trailing bits in the last symbol
/// and accepts any padding, as browsers' `atob` does.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// `data:` URL prefix. Group 1 is the media type, group 2 its parameters.
static DATA_URL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:([\w.+-]+/[\w.+-]+)?((?:;[\w.+-]+=[^;,]*)*);base64,")
        .expect("static regex")
});

/// Payload of a `data:` URL, either alphabet, optional padding.
static DATA_URL_PAYLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+/_-]*={0,2}$").expect("static regex"));

/// Canonical standard base64: groups of four, padding only at the end.
static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("static regex")
});

/// URL-safe alphabet, no padding.
static URL_SAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").expect("static regex"));

/// Decoded base64 content.
#[derive(Debug)]
pub(crate) struct Decoded {
    pub(crate) bytes: Vec<u8>,
    /// Media type from the `data:` envelope, with parameters.
    pub(crate) mime: Option<String>,
}

/// Whether `input` is a base64 `data:` URL or canonical standard base64.
///
/// The empty string encodes zero bytes.
pub(crate) fn is_base64(input: &str) -> bool {
    is_data_url(input) || CANONICAL.is_match(input)
}

/// Whether `input` is a base64 `data:` URL with a decodable payload.
pub(crate) fn is_data_url(input: &str) -> bool {
    let Some(prefix) = DATA_URL_PREFIX.find(input) else {
        return false;
    };
    let payload = &input[prefix.end()..];
    DATA_URL_PAYLOAD.is_match(payload) && payload.trim_end_matches('=').len() % 4 != 1
}

/// Whether `input` is unpadded URL-safe base64.
///
/// A length of 1 mod 4 can never be produced by an encoder and is rejected.
pub(crate) fn is_base64_url(input: &str) -> bool {
    input.len() % 4 != 1 && URL_SAFE.is_match(input)
}

/// Encode bytes per `options`: alphabet, padding, and the `data:` envelope.
pub(crate) fn encode(bytes: &[u8], mime: Option<&str>, options: &ConvertOptions) -> String {
    let payload = if options.url_safe {
        URL_SAFE_NO_PAD.encode(bytes)
    } else {
        STANDARD.encode(bytes)
    };
    if options.data_url {
        format!("data:{};base64,{payload}", mime.unwrap_or(""))
    } else {
        payload
    }
}

/// Encode bytes as unpadded URL-safe base64.
pub(crate) fn encode_url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode base64 in either alphabet, with or without padding or envelope.
pub(crate) fn decode(input: &str) -> Result<Decoded, ConvertError> {
    let (payload, mime) = match DATA_URL_PREFIX.captures(input) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let mime = caps.get(1).map(|m| {
                let params = caps.get(2).map_or("", |p| p.as_str());
                format!("{}{params}", m.as_str())
            });
            (&input[whole..], mime)
        }
        None => (input, None),
    };

    let normalized = repad(&from_url_alphabet(payload))?;
    let bytes = LENIENT.decode(normalized).map_err(ConvertError::from_base64)?;
    Ok(Decoded { bytes, mime })
}

/// Translate the URL-safe alphabet back to the standard one.
fn from_url_alphabet(payload: &str) -> String {
    payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect()
}

/// Restore `=` padding from the payload length.
///
/// Remainder 2 takes `==`, remainder 3 takes `=`. Remainder 1 is not a valid
/// encoding length.
fn repad(payload: &str) -> Result<String, ConvertError> {
    let trimmed = payload.trim_end_matches('=');
    let mut padded = String::with_capacity(trimmed.len() + 2);
    padded.push_str(trimmed);
    match trimmed.len() % 4 {
        0 => {}
        2 => padded.push_str("=="),
        3 => padded.push('='),
        _ => {
            return Err(ConvertError::InvalidInput(format!(
                "base64 payload length {} is not a valid encoding length",
                trimmed.len()
            )));
        }
    }
    Ok(padded)
}
