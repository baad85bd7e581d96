//! Asynchronous byte sources and draining.
//!
//! Two capabilities are accepted: pull-based chunk streams ([`ByteStream`],
//! anything implementing `Stream<Item = io::Result<impl Into<Bytes>>>`) and
//! read-shaped sources ([`ByteReader`], anything implementing `AsyncRead`).
//! Adapters are the only place a foreign source enters the crate.

use core::fmt;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::io;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

use crate::{ConvertError, Limits};

/// Read size used when pulling from a [`ByteReader`].
const READ_CHUNK: usize = 8 * 1024;

/// A pull-based stream of byte chunks.
pub struct ByteStream(BoxStream<'static, io::Result<Bytes>>);

impl ByteStream {
    /// Adapt any fallible chunk stream.
    pub fn new<S, B>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<B>> + Send + 'static,
        B: Into<Bytes>,
    {
        Self(stream.map_ok(|chunk| -> Bytes { chunk.into() }).boxed())
    }

    /// Stream yielding `data` as one chunk.
    pub fn once(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self(stream::once(async move { Ok(data) }).boxed())
    }

    /// Stream that ends immediately.
    pub fn empty() -> Self {
        Self(stream::empty().boxed())
    }

    /// Stream yielding each chunk in order.
    pub fn from_chunks<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let chunks: Vec<io::Result<Bytes>> = chunks.into_iter().map(|c| Ok(c.into())).collect();
        Self(stream::iter(chunks).boxed())
    }
}

impl Stream for ByteStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.0.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream").finish_non_exhaustive()
    }
}

/// A read-shaped byte source.
pub struct ByteReader(Pin<Box<dyn AsyncRead + Send>>);

impl ByteReader {
    /// Adapt any async reader.
    pub fn new<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self(Box::pin(reader))
    }

    /// Re-expose the reader as a chunk stream without reading ahead.
    pub fn into_stream(self) -> ByteStream {
        ByteStream::new(stream::try_unfold(self, |mut reader| async move {
            let mut buf = BytesMut::with_capacity(READ_CHUNK);
            let n = reader.read_buf(&mut buf).await?;
            if n == 0 {
                Ok(None)
            } else {
                Ok(Some((buf.freeze(), reader)))
            }
        }))
    }
}

impl AsyncRead for ByteReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        self.0.as_mut().poll_read(cx, buf)
    }
}

impl fmt::Debug for ByteReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteReader").finish_non_exhaustive()
    }
}

/// Consume a stream into one contiguous buffer.
///
/// Chunks are kept until the end and copied once into an allocation of the
/// final size. A single-chunk stream is returned without copying. The first
/// chunk error aborts the drain and is returned as is.
pub(crate) async fn drain_stream(
    mut stream: ByteStream,
    limits: &Limits,
) -> Result<Bytes, ConvertError> {
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut total = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total += chunk.len();
        limits.check_bytes(total as u64)?;
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
    }

    tracing::trace!(chunks = chunks.len(), total, "drained byte stream");

    if chunks.len() == 1 {
        return Ok(chunks.swap_remove(0));
    }
    let mut buf = BytesMut::with_capacity(total);
    for chunk in &chunks {
        buf.extend_from_slice(chunk);
    }
    Ok(buf.freeze())
}

/// Consume a reader until EOF.
pub(crate) async fn drain_reader(
    mut reader: ByteReader,
    limits: &Limits,
) -> Result<Bytes, ConvertError> {
    let mut buf = BytesMut::with_capacity(READ_CHUNK);
    loop {
        buf.reserve(READ_CHUNK);
        if reader.read_buf(&mut buf).await? == 0 {
            break;
        }
        limits.check_bytes(buf.len() as u64)?;
    }

    tracing::trace!(total = buf.len(), "drained reader");
    Ok(buf.freeze())
}
