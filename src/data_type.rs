//! Supported data types and their metadata.

use core::fmt;
use core::str::FromStr;

use crate::ConvertError;

/// Supported data representations.
///
/// The set is closed: every tag has a predicate, a slot in the converter
/// matrix, and (except [`DataType::Reader`]) a row of converters into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    /// Contiguous immutable bytes ([`bytes::Bytes`]). The hub representation.
    Bytes,
    /// Backing buffer ([`crate::ArrayBuffer`]).
    ArrayBuffer,
    /// Window into a backing buffer ([`crate::DataView`]).
    DataView,
    /// Byte container with a MIME type ([`crate::Blob`]).
    Blob,
    /// Pull-based chunk stream ([`crate::ByteStream`]).
    ReadableStream,
    /// Read-shaped byte source ([`crate::ByteReader`]). Source only.
    Reader,
    /// HTTP response envelope ([`crate::Response`]).
    Response,
    /// Array of numbers, one element per byte.
    NumberArray,
    /// Standard base64, bare or as a `data:` URL.
    Base64,
    /// URL-safe base64 without padding.
    Base64Url,
    /// Plain text.
    Text,
}

impl DataType {
    /// Number of tags.
    pub const COUNT: usize = 11;

    /// Every tag, in declaration order.
    pub const ALL: [DataType; Self::COUNT] = [
        DataType::Bytes,
        DataType::ArrayBuffer,
        DataType::DataView,
        DataType::Blob,
        DataType::ReadableStream,
        DataType::Reader,
        DataType::Response,
        DataType::NumberArray,
        DataType::Base64,
        DataType::Base64Url,
        DataType::Text,
    ];

    /// Position in [`DataType::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Bytes => "Bytes",
            DataType::ArrayBuffer => "ArrayBuffer",
            DataType::DataView => "DataView",
            DataType::Blob => "Blob",
            DataType::ReadableStream => "ReadableStream",
            DataType::Reader => "Reader",
            DataType::Response => "Response",
            DataType::NumberArray => "NumberArray",
            DataType::Base64 => "Base64",
            DataType::Base64Url => "Base64Url",
            DataType::Text => "Text",
        }
    }

    /// Whether reading the content of this type must suspend.
    pub const fn is_async_source(self) -> bool {
        matches!(
            self,
            DataType::Blob | DataType::ReadableStream | DataType::Reader | DataType::Response
        )
    }

    /// Whether this type can be produced by a conversion.
    ///
    /// A read-shaped source has no single natural producer, so `Reader` is
    /// only ever a source.
    pub const fn is_destination(self) -> bool {
        !matches!(self, DataType::Reader)
    }

    /// Whether values of this type are strings.
    pub const fn is_textual(self) -> bool {
        matches!(self, DataType::Base64 | DataType::Base64Url | DataType::Text)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ConvertError::UnknownTypeName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_all() {
        for (i, t) in DataType::ALL.into_iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn name_roundtrip() {
        for t in DataType::ALL {
            assert_eq!(t.name().parse::<DataType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_name() {
        let err = "Bob".parse::<DataType>().unwrap_err();
        assert!(matches!(err, ConvertError::UnknownTypeName(ref n) if n == "Bob"));
    }

    #[test]
    fn reader_is_source_only() {
        assert!(!DataType::Reader.is_destination());
        assert!(DataType::ReadableStream.is_destination());
        assert_eq!(DataType::ALL.iter().filter(|t| t.is_destination()).count(), 10);
    }

    #[test]
    fn async_sources() {
        let async_sources: Vec<_> = DataType::ALL
            .into_iter()
            .filter(|t| t.is_async_source())
            .collect();
        assert_eq!(
            async_sources,
            [
                DataType::Blob,
                DataType::ReadableStream,
                DataType::Reader,
                DataType::Response
            ]
        );
    }
}
