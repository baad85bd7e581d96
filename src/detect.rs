//! Type detection.

use crate::codecs::base64;
use crate::predicate::matches;
use crate::{ConvertError, DataType, Value};

/// Detection order. Structural tags first, then content tags, with base64
/// `data:` URLs ahead of plain text.
///
/// [`DataType::Base64Url`] is absent: bare URL-safe base64 is indistinguishable
/// from ordinary words, so it is only used when passed as a source hint.
const PRIORITY: [DataType; DataType::COUNT - 1] = [
    DataType::Bytes,
    DataType::ArrayBuffer,
    DataType::Blob,
    DataType::DataView,
    DataType::ReadableStream,
    DataType::Response,
    DataType::Reader,
    DataType::NumberArray,
    DataType::Base64,
    DataType::Text,
];

/// Classify `value` into its [`DataType`].
///
/// Returns the first tag in priority order whose predicate accepts the value.
/// Strings are [`DataType::Base64`] only in the `data:...;base64,` form and
/// [`DataType::Text`] otherwise. Bare base64 and base64url are converted by
/// passing the tag as the source hint to [`convert_to`](crate::convert_to).
///
/// # Errors
///
/// [`ConvertError::UnsupportedType`] when no predicate matches, carrying the
/// value's runtime category.
///
/// # Example
///
/// ```
/// use zenconvert::{DataType, Value, detect};
///
/// assert_eq!(detect(&Value::from("data:;base64,SGVsbG8="))?, DataType::Base64);
/// assert_eq!(detect(&Value::from("SGVsbG8="))?, DataType::Text);
/// assert_eq!(detect(&Value::from("contains a space"))?, DataType::Text);
/// # Ok::<(), zenconvert::ConvertError>(())
/// ```
pub fn detect(value: &Value) -> Result<DataType, ConvertError> {
    PRIORITY
        .into_iter()
        .find(|&tag| detects(tag, value))
        .ok_or_else(|| ConvertError::UnsupportedType {
            category: value.category(),
        })
}

fn detects(tag: DataType, value: &Value) -> bool {
    match tag {
        DataType::Base64 => value.as_str().is_some_and(base64::is_data_url),
        tag => matches(tag, value),
    }
}
