//! Hub composition: source -> bytes -> destination.
//!
//! Most of the converter matrix is built from two halves. [`into_hub`]
//! materializes any source as a [`Payload`] (bytes plus the MIME type the
//! source carried, if any), and [`from_hub`] produces any destination from
//! one. Sources that need I/O to materialize yield a pending half; everything
//! else completes synchronously.
//!
//! The few pairs that would drain needlessly when composed this way are in
//! [`direct`].

pub(crate) mod direct;

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};

use crate::codecs::{base64, numbers, text};
use crate::predicate::assert_type;
use crate::response::{self, Body};
use crate::stream::{ByteStream, drain_reader, drain_stream};
use crate::{ArrayBuffer, Blob, Conversion, ConvertError, ConvertOptions, DataType, DataView, Value};

/// Hub representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Payload {
    pub(crate) bytes: Bytes,
    /// MIME type carried by the source.
    pub(crate) mime: Option<String>,
}

impl Payload {
    fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: None,
        }
    }

    fn with_mime(mut self, mime: Option<String>) -> Self {
        self.mime = mime;
        self
    }
}

/// A source half that may still need to suspend.
pub(crate) enum Hub {
    Ready(Payload),
    Pending(BoxFuture<'static, Result<Payload, ConvertError>>),
}

/// Materialize `value`, asserted to be a `from`, as bytes.
pub(crate) fn into_hub(
    from: DataType,
    value: Value,
    options: &ConvertOptions,
) -> Result<Hub, ConvertError> {
    assert_type(from, &value)?;
    let limits = options.limits.clone();

    let payload = match (from, value) {
        (DataType::Bytes, Value::Bytes(bytes)) => Payload::new(bytes),
        (DataType::ArrayBuffer, Value::ArrayBuffer(buffer)) => Payload::new(buffer.into_bytes()),
        (DataType::DataView, Value::DataView(view)) => Payload::new(view.to_bytes()),
        (DataType::NumberArray, Value::Array(items)) => {
            Payload::new(numbers::to_bytes(&items, options.byte_policy)?)
        }
        (DataType::Base64 | DataType::Base64Url, Value::String(encoded)) => {
            let decoded = base64::decode(&encoded)?;
            Payload::new(decoded.bytes).with_mime(decoded.mime)
        }
        (DataType::Text, Value::String(s)) => Payload::new(text::encode(s, options.encoding)?),

        (DataType::Blob, Value::Blob(blob)) => {
            return Ok(Hub::Pending(
                async move {
                    let bytes = blob.bytes().await;
                    limits.check_bytes(bytes.len() as u64)?;
                    Ok(Payload::new(bytes).with_mime(blob.mime_type().map(str::to_owned)))
                }
                .boxed(),
            ));
        }
        (DataType::ReadableStream, Value::ReadableStream(stream)) => {
            return Ok(Hub::Pending(
                async move { Ok(Payload::new(drain_stream(stream, &limits).await?)) }.boxed(),
            ));
        }
        (DataType::Reader, Value::Reader(reader)) => {
            return Ok(Hub::Pending(
                async move { Ok(Payload::new(drain_reader(reader, &limits).await?)) }.boxed(),
            ));
        }
        (DataType::Response, Value::Response(response)) => {
            let mime = response::content_type(&response).map(str::to_owned);
            let body = response.into_body();
            return Ok(Hub::Pending(
                async move { Ok(Payload::new(body.collect(&limits).await?).with_mime(mime)) }
                    .boxed(),
            ));
        }

        (from, other) => return Err(ConvertError::mismatch(from, &other)),
    };

    options.limits.check_bytes(payload.bytes.len() as u64)?;
    Ok(Hub::Ready(payload))
}

/// Produce a `to` from bytes.
pub(crate) fn from_hub(
    to: DataType,
    payload: Payload,
    options: &ConvertOptions,
) -> Result<Value, ConvertError> {
    let mime = options.resolve_mime(payload.mime.as_deref());
    let bytes = payload.bytes;

    Ok(match to {
        DataType::Bytes => Value::Bytes(bytes),
        DataType::ArrayBuffer => Value::ArrayBuffer(ArrayBuffer::new(bytes)),
        DataType::DataView => Value::DataView(DataView::new(ArrayBuffer::new(bytes))),
        DataType::Blob => {
            let blob = Blob::new(bytes);
            Value::Blob(match mime {
                Some(mime) => blob.with_type(mime),
                None => blob,
            })
        }
        DataType::ReadableStream => Value::ReadableStream(ByteStream::once(bytes)),
        DataType::Response => Value::Response(response::build(Body::full(bytes), mime, options)?),
        DataType::NumberArray => numbers::from_bytes(&bytes),
        DataType::Base64 => Value::String(base64::encode(&bytes, mime, options)),
        DataType::Base64Url => Value::String(base64::encode_url(&bytes)),
        DataType::Text => Value::String(text::decode(&bytes, options.encoding)),
        DataType::Reader => {
            return Err(ConvertError::UnsupportedConversion {
                from: DataType::Bytes,
                to,
            });
        }
    })
}

/// Convert through the hub, suspending only if the source half does.
pub(crate) fn through_hub(
    from: DataType,
    to: DataType,
    value: Value,
    options: &ConvertOptions,
) -> Result<Conversion, ConvertError> {
    match into_hub(from, value, options)? {
        Hub::Ready(payload) => Ok(Conversion::Ready(from_hub(to, payload, options)?)),
        Hub::Pending(payload) => {
            let options = options.clone();
            Ok(Conversion::Pending(
                async move { from_hub(to, payload.await?, &options) }.boxed(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BytePolicy, Limits};

    fn ready(hub: Hub) -> Payload {
        match hub {
            Hub::Ready(payload) => payload,
            Hub::Pending(_) => panic!("expected a ready payload"),
        }
    }

    #[test]
    fn synchronous_sources_are_ready() {
        let options = ConvertOptions::default();
        let payload = ready(into_hub(DataType::Text, Value::from("Hi"), &options).unwrap());
        assert_eq!(&payload.bytes[..], b"Hi");

        let payload = ready(
            into_hub(DataType::Base64, Value::from("data:text/plain;base64,SGk="), &options)
                .unwrap(),
        );
        assert_eq!(&payload.bytes[..], b"Hi");
        assert_eq!(payload.mime.as_deref(), Some("text/plain"));
    }

    #[test]
    fn buffer_family_shares_storage() {
        let data = Bytes::from_static(b"shared");
        let options = ConvertOptions::default();
        let payload = ready(into_hub(DataType::Bytes, Value::Bytes(data.clone()), &options).unwrap());
        let Value::DataView(view) = from_hub(DataType::DataView, payload, &options).unwrap() else {
            panic!("expected a view");
        };
        assert_eq!(view.to_bytes().as_ptr(), data.as_ptr());
    }

    #[tokio::test]
    async fn blob_source_is_pending_and_keeps_type() {
        let blob = Blob::new(&b"<p/>"[..]).with_type("text/html");
        let options = ConvertOptions::default();
        let Hub::Pending(payload) = into_hub(DataType::Blob, blob.into(), &options).unwrap() else {
            panic!("expected a pending payload");
        };
        let payload = payload.await.unwrap();
        assert_eq!(payload.mime.as_deref(), Some("text/html"));

        let Value::String(url) = from_hub(DataType::Base64, payload, &options).unwrap() else {
            panic!("expected a string");
        };
        assert_eq!(url, "data:text/html;base64,PHAvPg==");
    }

    #[test]
    fn declared_source_is_asserted() {
        let err = into_hub(DataType::Bytes, Value::from("text"), &ConvertOptions::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConvertError::TypeMismatch {
                expected: DataType::Bytes,
                found: "string"
            }
        ));
    }

    #[test]
    fn limits_apply_to_ready_sources() {
        let options = ConvertOptions::default().with_limits(Limits::none().with_max_bytes(2));
        let err = into_hub(DataType::Text, Value::from("abc"), &options).err().unwrap();
        assert!(matches!(err, ConvertError::LimitExceeded { limit: 2, actual: 3 }));
    }

    #[test]
    fn strict_policy_flows_through() {
        let options = ConvertOptions::default().with_byte_policy(BytePolicy::Strict);
        let err = into_hub(DataType::NumberArray, Value::from(vec![1.0, -1.0]), &options)
            .err()
            .unwrap();
        assert!(matches!(err, ConvertError::ByteOutOfRange { index: 1, .. }));
    }

    #[test]
    fn reader_is_not_produced() {
        let err = from_hub(DataType::Reader, Payload::default(), &ConvertOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnsupportedConversion {
                to: DataType::Reader,
                ..
            }
        ));
    }
}
