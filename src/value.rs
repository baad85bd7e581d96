//! Dynamic value accepted and produced by conversions.

use core::any::Any;
use core::fmt;

use bytes::Bytes;

use crate::{ArrayBuffer, Blob, ByteReader, ByteStream, ConvertError, DataType, DataView, Response};

/// A value in one of the runtime shapes the detector understands.
///
/// Values are never wrapped with an explicit [`DataType`]; the tag is derived
/// from the shape (and, for strings and arrays, the content). Shapes with no
/// tag (`Number`, `Bool`, `Null`, `Opaque`, non-numeric arrays) exist so that
/// arbitrary input can be represented and rejected by detection.
#[non_exhaustive]
pub enum Value {
    Bytes(Bytes),
    ArrayBuffer(ArrayBuffer),
    DataView(DataView),
    Blob(Blob),
    ReadableStream(ByteStream),
    Reader(ByteReader),
    Response(Response),
    Array(Vec<Value>),
    Number(f64),
    String(String),
    Bool(bool),
    Null,
    /// Any foreign value.
    Opaque(Box<dyn Any + Send>),
}

impl Value {
    /// Wrap any foreign value.
    pub fn opaque<T: Any + Send>(value: T) -> Self {
        Value::Opaque(Box::new(value))
    }

    /// Runtime category, for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "bytes",
            Value::ArrayBuffer(_) => "array_buffer",
            Value::DataView(_) => "data_view",
            Value::Blob(_) => "blob",
            Value::ReadableStream(_) => "stream",
            Value::Reader(_) => "reader",
            Value::Response(_) => "response",
            Value::Array(_) => "array",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Opaque(_) => "object",
        }
    }

    /// The string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The bytes of a [`Value::Bytes`].
    pub fn into_bytes(self) -> Result<Bytes, ConvertError> {
        match self {
            Value::Bytes(bytes) => Ok(bytes),
            other => Err(ConvertError::mismatch(DataType::Bytes, &other)),
        }
    }

    /// The buffer of a [`Value::ArrayBuffer`].
    pub fn into_array_buffer(self) -> Result<ArrayBuffer, ConvertError> {
        match self {
            Value::ArrayBuffer(buffer) => Ok(buffer),
            other => Err(ConvertError::mismatch(DataType::ArrayBuffer, &other)),
        }
    }

    /// The view of a [`Value::DataView`].
    pub fn into_data_view(self) -> Result<DataView, ConvertError> {
        match self {
            Value::DataView(view) => Ok(view),
            other => Err(ConvertError::mismatch(DataType::DataView, &other)),
        }
    }

    /// The blob of a [`Value::Blob`].
    pub fn into_blob(self) -> Result<Blob, ConvertError> {
        match self {
            Value::Blob(blob) => Ok(blob),
            other => Err(ConvertError::mismatch(DataType::Blob, &other)),
        }
    }

    /// The stream of a [`Value::ReadableStream`].
    pub fn into_stream(self) -> Result<ByteStream, ConvertError> {
        match self {
            Value::ReadableStream(stream) => Ok(stream),
            other => Err(ConvertError::mismatch(DataType::ReadableStream, &other)),
        }
    }

    /// The reader of a [`Value::Reader`].
    pub fn into_reader(self) -> Result<ByteReader, ConvertError> {
        match self {
            Value::Reader(reader) => Ok(reader),
            other => Err(ConvertError::mismatch(DataType::Reader, &other)),
        }
    }

    /// The response of a [`Value::Response`].
    pub fn into_response(self) -> Result<Response, ConvertError> {
        match self {
            Value::Response(response) => Ok(response),
            other => Err(ConvertError::mismatch(DataType::Response, &other)),
        }
    }

    /// The elements of a number array.
    ///
    /// Fails unless every element is a number.
    pub fn into_numbers(self) -> Result<Vec<f64>, ConvertError> {
        let mismatch = |v: &Value| ConvertError::mismatch(DataType::NumberArray, v);
        match self {
            Value::Array(items) => {
                let mut numbers = Vec::with_capacity(items.len());
                for item in &items {
                    match item {
                        Value::Number(n) => numbers.push(*n),
                        other => return Err(mismatch(other)),
                    }
                }
                Ok(numbers)
            }
            other => Err(mismatch(&other)),
        }
    }

    /// The string content of a text, base64 or base64url value.
    pub fn into_string(self) -> Result<String, ConvertError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(ConvertError::mismatch(DataType::Text, &other)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Value::ArrayBuffer(b) => f.debug_tuple("ArrayBuffer").field(b).finish(),
            Value::DataView(v) => f.debug_tuple("DataView").field(v).finish(),
            Value::Blob(b) => f.debug_tuple("Blob").field(b).finish(),
            Value::ReadableStream(s) => f.debug_tuple("ReadableStream").field(s).finish(),
            Value::Reader(r) => f.debug_tuple("Reader").field(r).finish(),
            Value::Response(r) => f.debug_tuple("Response").field(r).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Null => f.write_str("Null"),
            Value::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

impl From<Bytes> for Value {
    fn from(bytes: Bytes) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<f64>> for Value {
    fn from(numbers: Vec<f64>) -> Self {
        Value::Array(numbers.into_iter().map(Value::Number).collect())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ArrayBuffer> for Value {
    fn from(buffer: ArrayBuffer) -> Self {
        Value::ArrayBuffer(buffer)
    }
}

impl From<DataView> for Value {
    fn from(view: DataView) -> Self {
        Value::DataView(view)
    }
}

impl From<Blob> for Value {
    fn from(blob: Blob) -> Self {
        Value::Blob(blob)
    }
}

impl From<ByteStream> for Value {
    fn from(stream: ByteStream) -> Self {
        Value::ReadableStream(stream)
    }
}

impl From<ByteReader> for Value {
    fn from(reader: ByteReader) -> Self {
        Value::Reader(reader)
    }
}

impl From<Response> for Value {
    fn from(response: Response) -> Self {
        Value::Response(response)
    }
}
