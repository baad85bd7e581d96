//! Direct routes that hand a stream through without draining it.

use crate::predicate::assert_type;
use crate::response::{self, Body};
use crate::{Conversion, ConvertError, ConvertOptions, DataType, Value};

/// A converter body for one (source, destination) pair.
pub(crate) type DirectFn = fn(Value, &ConvertOptions) -> Result<Conversion, ConvertError>;

/// The direct route for `from -> to`, if any.
pub(crate) fn route(from: DataType, to: DataType) -> Option<DirectFn> {
    use DataType::*;
    match (from, to) {
        (Blob, ReadableStream) => Some(blob_to_stream),
        (Response, ReadableStream) => Some(response_to_stream),
        (ReadableStream, Response) => Some(stream_to_response),
        (Reader, ReadableStream) => Some(reader_to_stream),
        (Reader, Response) => Some(reader_to_response),
        _ => None,
    }
}

fn blob_to_stream(value: Value, _: &ConvertOptions) -> Result<Conversion, ConvertError> {
    assert_type(DataType::Blob, &value)?;
    let blob = value.into_blob()?;
    Ok(Conversion::Ready(Value::ReadableStream(blob.stream())))
}

fn response_to_stream(value: Value, _: &ConvertOptions) -> Result<Conversion, ConvertError> {
    assert_type(DataType::Response, &value)?;
    let body = value.into_response()?.into_body();
    Ok(Conversion::Ready(Value::ReadableStream(body.into_stream())))
}

fn stream_to_response(value: Value, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    assert_type(DataType::ReadableStream, &value)?;
    let body = Body::from_stream(value.into_stream()?);
    let response = response::build(body, options.mime_type.as_deref(), options)?;
    Ok(Conversion::Ready(Value::Response(response)))
}

fn reader_to_stream(value: Value, _: &ConvertOptions) -> Result<Conversion, ConvertError> {
    assert_type(DataType::Reader, &value)?;
    let stream = value.into_reader()?.into_stream();
    Ok(Conversion::Ready(Value::ReadableStream(stream)))
}

fn reader_to_response(value: Value, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    assert_type(DataType::Reader, &value)?;
    let body = Body::from_stream(value.into_reader()?.into_stream());
    let response = response::build(body, options.mime_type.as_deref(), options)?;
    Ok(Conversion::Ready(Value::Response(response)))
}
