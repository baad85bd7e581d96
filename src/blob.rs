//! Immutable byte container with a MIME type.

use core::ops::Range;

use bytes::{Bytes, BytesMut};

use crate::stream::ByteStream;

/// Immutable bytes tagged with an optional MIME type.
///
/// Content is read back through the blob's own accessors ([`Blob::bytes`],
/// [`Blob::text`], [`Blob::stream`]); the converter matrix never reaches into
/// the storage directly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    mime_type: Option<String>,
}

impl Blob {
    /// Blob over a single part, without copying.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
        }
    }

    /// Blob concatenating several parts into one allocation.
    pub fn from_parts<I, B>(parts: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let mut buf = BytesMut::new();
        for part in parts {
            buf.extend_from_slice(part.as_ref());
        }
        Self::new(buf.freeze())
    }

    /// Set the MIME type. An empty string clears it.
    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        self.mime_type = (!mime_type.is_empty()).then_some(mime_type);
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Read the content as bytes.
    pub async fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// Read the content as UTF-8 text, replacing invalid sequences.
    pub async fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Stream the content as a single chunk.
    pub fn stream(&self) -> ByteStream {
        ByteStream::once(self.data.clone())
    }

    /// Sub-blob without a MIME type. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> Blob {
        let end = range.end.min(self.data.len());
        let start = range.start.min(end);
        Blob::new(self.data.slice(start..end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parts_are_concatenated() {
        let blob = Blob::from_parts([&b"He"[..], b"llo"]).with_type("text/plain");
        assert_eq!(blob.size(), 5);
        assert_eq!(blob.mime_type(), Some("text/plain"));
        assert_eq!(blob.text().await, "Hello");
    }

    #[tokio::test]
    async fn lossy_text() {
        let blob = Blob::new(vec![b'a', 0xFF, b'b']);
        assert_eq!(blob.text().await, "a\u{FFFD}b");
    }

    #[test]
    fn empty_type_is_none() {
        assert_eq!(Blob::default().with_type("").mime_type(), None);
    }

    #[test]
    fn slice_drops_type() {
        let blob = Blob::new(&b"abcdef"[..]).with_type("text/plain");
        let part = blob.slice(2..4);
        assert_eq!(part.size(), 2);
        assert_eq!(part.mime_type(), None);
    }
}
