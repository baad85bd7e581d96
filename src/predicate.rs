//! Per-tag predicates and assertions.
//!
//! Predicates never panic and never touch asynchronous content. Container tags
//! are recognized by [`Value`] variant; foreign stream types are admitted only
//! through the [`ByteStream`](crate::ByteStream) and
//! [`ByteReader`](crate::ByteReader) adapters. String tags are recognized by
//! grammar.

use crate::codecs::base64;
use crate::{ConvertError, DataType, Value};

pub fn is_bytes(value: &Value) -> bool {
    matches!(value, Value::Bytes(_))
}

pub fn is_array_buffer(value: &Value) -> bool {
    matches!(value, Value::ArrayBuffer(_))
}

pub fn is_data_view(value: &Value) -> bool {
    matches!(value, Value::DataView(_))
}

pub fn is_blob(value: &Value) -> bool {
    matches!(value, Value::Blob(_))
}

pub fn is_readable_stream(value: &Value) -> bool {
    matches!(value, Value::ReadableStream(_))
}

pub fn is_reader(value: &Value) -> bool {
    matches!(value, Value::Reader(_))
}

pub fn is_response(value: &Value) -> bool {
    matches!(value, Value::Response(_))
}

/// An array that is empty or starts with a number.
///
/// Only the first element is inspected; later elements are handled by the
/// configured [`BytePolicy`](crate::BytePolicy) during conversion.
pub fn is_number_array(value: &Value) -> bool {
    match value {
        Value::Array(items) => matches!(items.first(), None | Some(Value::Number(_))),
        _ => false,
    }
}

/// A `data:...;base64,` URL or canonical padded standard base64.
///
/// [`detect`](crate::detect) reports only the `data:` form as base64.
pub fn is_base64(value: &Value) -> bool {
    value.as_str().is_some_and(base64::is_base64)
}

/// URL-safe base64 without padding.
///
/// Never reported by [`detect`](crate::detect); name it as the source tag.
pub fn is_base64_url(value: &Value) -> bool {
    value.as_str().is_some_and(base64::is_base64_url)
}

/// Any string.
pub fn is_text(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Evaluate the predicate for `tag`.
pub fn matches(tag: DataType, value: &Value) -> bool {
    match tag {
        DataType::Bytes => is_bytes(value),
        DataType::ArrayBuffer => is_array_buffer(value),
        DataType::DataView => is_data_view(value),
        DataType::Blob => is_blob(value),
        DataType::ReadableStream => is_readable_stream(value),
        DataType::Reader => is_reader(value),
        DataType::Response => is_response(value),
        DataType::NumberArray => is_number_array(value),
        DataType::Base64 => is_base64(value),
        DataType::Base64Url => is_base64_url(value),
        DataType::Text => is_text(value),
    }
}

/// Fail with [`ConvertError::TypeMismatch`] unless `value` satisfies `tag`.
pub fn assert_type(tag: DataType, value: &Value) -> Result<(), ConvertError> {
    if matches(tag, value) {
        Ok(())
    } else {
        Err(ConvertError::mismatch(tag, value))
    }
}

macro_rules! assertions {
    ($($name:ident => $tag:ident),* $(,)?) => {
        $(
            #[doc = concat!("Assert that `value` is a [`DataType::", stringify!($tag), "`].")]
            pub fn $name(value: &Value) -> Result<(), ConvertError> {
                assert_type(DataType::$tag, value)
            }
        )*
    };
}

assertions! {
    assert_bytes => Bytes,
    assert_array_buffer => ArrayBuffer,
    assert_data_view => DataView,
    assert_blob => Blob,
    assert_readable_stream => ReadableStream,
    assert_reader => Reader,
    assert_response => Response,
    assert_number_array => NumberArray,
    assert_base64 => Base64,
    assert_base64_url => Base64Url,
    assert_text => Text,
}
