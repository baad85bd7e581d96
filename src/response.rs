//! HTTP response envelope.
//!
//! A [`Response`] is an [`http::Response`] whose body is either buffered or a
//! [`ByteStream`]. As a conversion source its body is read like any other byte
//! stream; as a destination a fresh envelope is built from the status, headers
//! and MIME type in [`ConvertOptions`].

use core::fmt;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};

use crate::stream::{ByteStream, drain_stream};
use crate::{ConvertError, ConvertOptions, Limits};

/// HTTP response carrying a [`Body`].
pub type Response = http::Response<Body>;

/// Response body.
pub struct Body(Kind);

enum Kind {
    Empty,
    Full(Bytes),
    Stream(ByteStream),
}

impl Body {
    /// Body with no content.
    pub fn empty() -> Self {
        Body(Kind::Empty)
    }

    /// Buffered body.
    pub fn full(data: impl Into<Bytes>) -> Self {
        Body(Kind::Full(data.into()))
    }

    /// Streaming body.
    pub fn from_stream(stream: ByteStream) -> Self {
        Body(Kind::Stream(stream))
    }

    /// Body length, when known without reading.
    pub fn size_hint(&self) -> Option<usize> {
        match &self.0 {
            Kind::Empty => Some(0),
            Kind::Full(data) => Some(data.len()),
            Kind::Stream(_) => None,
        }
    }

    /// The body as a chunk stream. Never reads ahead.
    pub fn into_stream(self) -> ByteStream {
        match self.0 {
            Kind::Empty => ByteStream::empty(),
            Kind::Full(data) => ByteStream::once(data),
            Kind::Stream(stream) => stream,
        }
    }

    /// Read the whole body.
    pub async fn collect(self, limits: &Limits) -> Result<Bytes, ConvertError> {
        match self.0 {
            Kind::Empty => Ok(Bytes::new()),
            Kind::Full(data) => {
                limits.check_bytes(data.len() as u64)?;
                Ok(data)
            }
            Kind::Stream(stream) => drain_stream(stream, limits).await,
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::empty()
    }
}

impl From<Bytes> for Body {
    fn from(data: Bytes) -> Self {
        Body::full(data)
    }
}

impl From<Vec<u8>> for Body {
    fn from(data: Vec<u8>) -> Self {
        Body::full(data)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::full(text)
    }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self {
        Body::full(text)
    }
}

impl From<ByteStream> for Body {
    fn from(stream: ByteStream) -> Self {
        Body::from_stream(stream)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Kind::Empty => f.write_str("Body::Empty"),
            Kind::Full(data) => f.debug_tuple("Body::Full").field(&data.len()).finish(),
            Kind::Stream(_) => f.write_str("Body::Stream"),
        }
    }
}

/// The `content-type` of a response, if present and printable.
pub(crate) fn content_type(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
}

/// Build a response envelope around `body`.
///
/// Status and headers come from `options`; `mime` becomes the `content-type`
/// unless the options headers already set one.
pub(crate) fn build(
    body: Body,
    mime: Option<&str>,
    options: &ConvertOptions,
) -> Result<Response, ConvertError> {
    let mut response = http::Response::new(body);
    *response.status_mut() = options.status;
    *response.headers_mut() = options.headers.clone();

    if let Some(mime) = mime {
        if !response.headers().contains_key(CONTENT_TYPE) {
            let value = HeaderValue::from_str(mime)
                .map_err(|_| ConvertError::InvalidInput(format!("invalid MIME type {mime:?}")))?;
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[tokio::test]
    async fn empty_body_has_no_content() {
        let body = Body::empty();
        assert_eq!(body.size_hint(), Some(0));
        assert!(body.collect(&Limits::none()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collect_streaming_body() {
        let body = Body::from_stream(ByteStream::from_chunks(["a", "b", "c"]));
        assert_eq!(body.size_hint(), None);
        let bytes = body.collect(&Limits::none()).await.unwrap();
        assert_eq!(&bytes[..], b"abc");
    }

    #[tokio::test]
    async fn full_body_respects_limit() {
        let err = Body::full("too long")
            .collect(&Limits::none().with_max_bytes(3))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::LimitExceeded { .. }));
    }

    #[test]
    fn build_applies_options() {
        let options = ConvertOptions::default().with_status(StatusCode::CREATED);
        let response = build(Body::full("x"), Some("text/plain"), &options).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(content_type(&response), Some("text/plain"));
    }

    #[test]
    fn explicit_content_type_header_wins() {
        let options = ConvertOptions::default()
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let response = build(Body::empty(), Some("text/plain"), &options).unwrap();
        assert_eq!(content_type(&response), Some("application/json"));
    }

    #[test]
    fn bad_mime_is_rejected() {
        let err = build(Body::empty(), Some("bad\nmime"), &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidInput(_)));
    }
}
