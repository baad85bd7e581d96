//! Unified error type for detection and conversion.

use crate::data_type::DataType;

/// Unified error type for conversion operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Detection found no tag for the value.
    #[error("unsupported data type: {category}")]
    UnsupportedType {
        /// Runtime category of the unmatched value.
        category: &'static str,
    },

    /// No converter is registered for this pair.
    #[error("conversion from {from} to {to} is not supported")]
    UnsupportedConversion { from: DataType, to: DataType },

    /// The value does not have the shape of the declared source type.
    #[error("expected {expected} but got {found}")]
    TypeMismatch {
        expected: DataType,
        /// Runtime category of the offending value.
        found: &'static str,
    },

    /// A type name did not match any [`DataType`].
    #[error("unknown data type name: {0:?}")]
    UnknownTypeName(String),

    /// Input content is malformed for the requested conversion.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A numeric array element does not fit in a byte under the strict policy.
    #[error("number array element {index} ({value}) is outside 0..=255")]
    ByteOutOfRange { index: usize, value: f64 },

    /// A drain produced more bytes than the configured limit.
    #[error("limit exceeded: {actual} bytes > {limit} bytes")]
    LimitExceeded { limit: u64, actual: u64 },

    /// Underlying stream or reader failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Type mismatch for `value` when `expected` was required.
    pub fn mismatch(expected: DataType, value: &crate::Value) -> Self {
        ConvertError::TypeMismatch {
            expected,
            found: value.category(),
        }
    }

    /// Wrap a base64 decoding failure.
    pub(crate) fn from_base64(error: base64::DecodeError) -> Self {
        ConvertError::InvalidInput(format!("base64: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_tags() {
        let err = ConvertError::UnsupportedConversion {
            from: DataType::Text,
            to: DataType::Reader,
        };
        assert_eq!(err.to_string(), "conversion from Text to Reader is not supported");

        let err = ConvertError::mismatch(DataType::Bytes, &crate::Value::from("hi"));
        assert_eq!(err.to_string(), "expected Bytes but got string");
    }

    #[test]
    fn io_errors_are_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = ConvertError::from(io);
        assert_eq!(err.to_string(), "pipe closed");
        assert!(matches!(err, ConvertError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }
}
