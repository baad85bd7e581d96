//! Conversion dispatch.

use core::fmt;
use core::future::IntoFuture;

use bytes::Bytes;
use futures::future::{self, BoxFuture, FutureExt};

use crate::{
    ArrayBuffer, Blob, ByteStream, ConvertError, ConvertOptions, ConverterRegistry, DataType,
    DataView, Response, Value, detect,
};

/// Result of invoking a converter.
///
/// Conversions from blobs, streams, readers and responses must read their
/// source and come back [`Pending`](Conversion::Pending); every other
/// conversion completes immediately. Either way the conversion can be awaited.
pub enum Conversion {
    Ready(Value),
    Pending(BoxFuture<'static, Result<Value, ConvertError>>),
}

impl Conversion {
    /// Whether the value is available without awaiting.
    pub fn is_ready(&self) -> bool {
        matches!(self, Conversion::Ready(_))
    }

    /// The value, if no suspension is needed.
    pub fn ready(self) -> Option<Value> {
        match self {
            Conversion::Ready(value) => Some(value),
            Conversion::Pending(_) => None,
        }
    }
}

impl IntoFuture for Conversion {
    type Output = Result<Value, ConvertError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Conversion::Ready(value) => future::ready(Ok(value)).boxed(),
            Conversion::Pending(pending) => pending,
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Conversion::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Conversion request builder.
///
/// # Example
///
/// ```
/// use zenconvert::{ConvertOptions, ConvertRequest, DataType};
///
/// # futures::executor::block_on(async {
/// let options = ConvertOptions::default().with_mime_type("text/plain");
/// let blob = ConvertRequest::new("Hello").with_options(&options).to_blob().await?;
/// assert_eq!(blob.mime_type(), Some("text/plain"));
///
/// let text = ConvertRequest::new(blob)
///     .with_source(DataType::Blob)
///     .to_text()
///     .await?;
/// assert_eq!(text, "Hello");
/// # Ok::<(), zenconvert::ConvertError>(())
/// # }).unwrap();
/// ```
pub struct ConvertRequest<'a> {
    value: Value,
    source: Option<DataType>,
    options: Option<&'a ConvertOptions>,
    registry: Option<&'a ConverterRegistry>,
}

impl<'a> ConvertRequest<'a> {
    /// Create a new conversion request.
    ///
    /// The source type is detected from the value.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            source: None,
            options: None,
            registry: None,
        }
    }

    /// Declare the source type instead of detecting it.
    ///
    /// The value is still checked against it before conversion.
    pub fn with_source(mut self, source: DataType) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_options(mut self, options: &'a ConvertOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Set a registry to control which destinations are enabled.
    pub fn with_registry(mut self, registry: &'a ConverterRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Convert to `to`.
    pub fn convert(self, to: DataType) -> Result<Conversion, ConvertError> {
        let registry = self.registry.unwrap_or_else(|| ConverterRegistry::standard());
        let default_options;
        let options = match self.options {
            Some(options) => options,
            None => {
                default_options = ConvertOptions::default();
                &default_options
            }
        };

        let from = match self.source {
            Some(from) => from,
            None => detect(&self.value)?,
        };
        let converter = registry.converter(from, to)?;
        tracing::debug!(%from, %to, route = ?converter.route(), "converting");

        converter.convert(self.value, options)
    }

    pub async fn to_bytes(self) -> Result<Bytes, ConvertError> {
        self.convert(DataType::Bytes)?.await?.into_bytes()
    }

    pub async fn to_array_buffer(self) -> Result<ArrayBuffer, ConvertError> {
        self.convert(DataType::ArrayBuffer)?.await?.into_array_buffer()
    }

    pub async fn to_data_view(self) -> Result<DataView, ConvertError> {
        self.convert(DataType::DataView)?.await?.into_data_view()
    }

    pub async fn to_blob(self) -> Result<Blob, ConvertError> {
        self.convert(DataType::Blob)?.await?.into_blob()
    }

    pub async fn to_readable_stream(self) -> Result<ByteStream, ConvertError> {
        self.convert(DataType::ReadableStream)?.await?.into_stream()
    }

    pub async fn to_response(self) -> Result<Response, ConvertError> {
        self.convert(DataType::Response)?.await?.into_response()
    }

    /// Convert to one number in `0..=255` per byte.
    pub async fn to_number_array(self) -> Result<Vec<f64>, ConvertError> {
        self.convert(DataType::NumberArray)?.await?.into_numbers()
    }

    /// Convert to base64, shaped by `url_safe`, `data_url` and `mime_type`.
    pub async fn to_base64(self) -> Result<String, ConvertError> {
        self.convert(DataType::Base64)?.await?.into_string()
    }

    pub async fn to_base64_url(self) -> Result<String, ConvertError> {
        self.convert(DataType::Base64Url)?.await?.into_string()
    }

    pub async fn to_text(self) -> Result<String, ConvertError> {
        self.convert(DataType::Text)?.await?.into_string()
    }
}

/// Convert `value` to `to`, detecting its type unless `from` is given.
///
/// # Errors
///
/// - [`ConvertError::UnsupportedType`] if `from` is `None` and detection fails.
/// - [`ConvertError::UnsupportedConversion`] if `to` is not a destination.
/// - [`ConvertError::TypeMismatch`] if `value` is not a `from`.
///
/// # Example
///
/// ```
/// use zenconvert::{DataType, convert_to};
///
/// # futures::executor::block_on(async {
/// let encoded = convert_to(DataType::Base64, b"Hello, World".to_vec(), None)?.await?;
/// let decoded = convert_to(DataType::Bytes, encoded, Some(DataType::Base64))?.await?;
/// assert_eq!(decoded.into_bytes()?, &b"Hello, World"[..]);
/// # Ok::<(), zenconvert::ConvertError>(())
/// # }).unwrap();
/// ```
pub fn convert_to(
    to: DataType,
    value: impl Into<Value>,
    from: Option<DataType>,
) -> Result<Conversion, ConvertError> {
    let request = ConvertRequest::new(value);
    match from {
        Some(from) => request.with_source(from).convert(to),
        None => request.convert(to),
    }
}

pub async fn to_bytes(value: impl Into<Value>) -> Result<Bytes, ConvertError> {
    ConvertRequest::new(value).to_bytes().await
}

pub async fn to_array_buffer(value: impl Into<Value>) -> Result<ArrayBuffer, ConvertError> {
    ConvertRequest::new(value).to_array_buffer().await
}

pub async fn to_data_view(value: impl Into<Value>) -> Result<DataView, ConvertError> {
    ConvertRequest::new(value).to_data_view().await
}

pub async fn to_blob(value: impl Into<Value>) -> Result<Blob, ConvertError> {
    ConvertRequest::new(value).to_blob().await
}

pub async fn to_readable_stream(value: impl Into<Value>) -> Result<ByteStream, ConvertError> {
    ConvertRequest::new(value).to_readable_stream().await
}

pub async fn to_response(value: impl Into<Value>) -> Result<Response, ConvertError> {
    ConvertRequest::new(value).to_response().await
}

pub async fn to_number_array(value: impl Into<Value>) -> Result<Vec<f64>, ConvertError> {
    ConvertRequest::new(value).to_number_array().await
}

pub async fn to_base64(value: impl Into<Value>) -> Result<String, ConvertError> {
    ConvertRequest::new(value).to_base64().await
}

pub async fn to_base64_url(value: impl Into<Value>) -> Result<String, ConvertError> {
    ConvertRequest::new(value).to_base64_url().await
}

pub async fn to_text(value: impl Into<Value>) -> Result<String, ConvertError> {
    ConvertRequest::new(value).to_text().await
}
