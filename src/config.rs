//! Per-call conversion options.
//!
//! [`ConvertOptions`] bundles every policy knob a converter may consult. Each
//! converter reads only the fields relevant to its (source, destination) pair
//! and ignores the rest, so one options value can be reused across calls.

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::Limits;

/// Text mode used when encoding text to bytes or decoding bytes to text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TextEncoding {
    /// UTF-8. Invalid sequences decode to U+FFFD.
    #[default]
    Utf8,
    /// 7-bit ASCII. Encoding rejects other characters; decoding maps bytes
    /// above 0x7F to U+FFFD.
    Ascii,
}

/// What to do with number array elements that are not bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BytePolicy {
    /// Truncate toward zero and wrap modulo 256. Non-finite values and
    /// non-numbers become 0.
    #[default]
    Wrap,
    /// Reject anything but an integer in `0..=255`.
    Strict,
}

/// Conversion options.
///
/// # Example
///
/// ```
/// use zenconvert::{ConvertOptions, ConvertRequest};
///
/// # futures::executor::block_on(async {
/// let options = ConvertOptions::default().with_url_safe(true).with_data_url(false);
/// let encoded = ConvertRequest::new(vec![0u8, 1, 2, 3])
///     .with_options(&options)
///     .to_base64()
///     .await?;
/// assert_eq!(encoded, "AAECAw");
/// # Ok::<(), zenconvert::ConvertError>(())
/// # }).unwrap();
/// ```
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ConvertOptions {
    /// Use the URL-safe alphabet and strip padding when producing base64.
    pub url_safe: bool,
    /// Wrap produced base64 in a `data:<mime>;base64,` envelope.
    pub data_url: bool,
    /// MIME type for data URLs, blobs and response `content-type`.
    ///
    /// When `None`, the MIME type carried by the source (if any) is kept.
    pub mime_type: Option<String>,
    /// Text encode/decode mode.
    pub encoding: TextEncoding,
    /// Number array to byte policy.
    pub byte_policy: BytePolicy,
    /// Status of produced responses.
    pub status: StatusCode,
    /// Extra headers of produced responses.
    pub headers: HeaderMap,
    /// Bounds for draining asynchronous sources.
    pub limits: Limits,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            url_safe: false,
            data_url: true,
            mime_type: None,
            encoding: TextEncoding::Utf8,
            byte_policy: BytePolicy::Wrap,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            limits: Limits::none(),
        }
    }
}

impl ConvertOptions {
    /// Use the URL-safe base64 alphabet without padding.
    pub fn with_url_safe(mut self, url_safe: bool) -> Self {
        self.url_safe = url_safe;
        self
    }

    /// Enable or disable the `data:` URL envelope on base64 output.
    pub fn with_data_url(mut self, data_url: bool) -> Self {
        self.data_url = data_url;
        self
    }

    /// Set the MIME type hint.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_byte_policy(mut self, byte_policy: BytePolicy) -> Self {
        self.byte_policy = byte_policy;
        self
    }

    /// Set the status of produced responses.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add a header to produced responses.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Set drain limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolve the MIME type for output: the explicit hint wins over the
    /// type carried by the source.
    pub(crate) fn resolve_mime<'a>(&'a self, carried: Option<&'a str>) -> Option<&'a str> {
        self.mime_type.as_deref().or(carried)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ConvertOptions::default();
        assert!(!options.url_safe);
        assert!(options.data_url);
        assert_eq!(options.encoding, TextEncoding::Utf8);
        assert_eq!(options.byte_policy, BytePolicy::Wrap);
        assert_eq!(options.status, StatusCode::OK);
        assert!(options.headers.is_empty());
    }

    #[test]
    fn explicit_mime_wins() {
        let options = ConvertOptions::default();
        assert_eq!(options.resolve_mime(Some("image/png")), Some("image/png"));

        let options = options.with_mime_type("text/plain");
        assert_eq!(options.resolve_mime(Some("image/png")), Some("text/plain"));
        assert_eq!(options.resolve_mime(None), Some("text/plain"));
    }

    #[test]
    fn headers_accumulate() {
        let options = ConvertOptions::default()
            .with_header(http::header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .with_header(http::header::ETAG, HeaderValue::from_static("\"1\""));
        assert_eq!(options.headers.len(), 2);
    }
}
