//! Buffer-family containers sharing [`Bytes`] storage.
//!
//! Conversions between [`Bytes`], [`ArrayBuffer`] and [`DataView`] never copy:
//! they only adjust offset and length over the same reference-counted storage.

use core::ops::Range;

use bytes::Bytes;

/// A fixed-length backing buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArrayBuffer(Bytes);

impl ArrayBuffer {
    /// Wrap existing storage without copying.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    /// Length in bytes.
    pub fn byte_length(&self) -> usize {
        self.0.len()
    }

    /// Borrow the content.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Shared handle to the storage.
    pub fn bytes(&self) -> Bytes {
        self.0.clone()
    }

    /// Consume into the underlying storage.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Copy-free sub-buffer. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> ArrayBuffer {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        ArrayBuffer(self.0.slice(start..end))
    }
}

impl From<Bytes> for ArrayBuffer {
    fn from(data: Bytes) -> Self {
        Self(data)
    }
}

impl From<Vec<u8>> for ArrayBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

/// A window of `byte_length` bytes at `byte_offset` into an [`ArrayBuffer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataView {
    buffer: ArrayBuffer,
    byte_offset: usize,
    byte_length: usize,
}

impl DataView {
    /// View over the whole buffer.
    pub fn new(buffer: ArrayBuffer) -> Self {
        let byte_length = buffer.byte_length();
        Self {
            buffer,
            byte_offset: 0,
            byte_length,
        }
    }

    /// View over `byte_length` bytes starting at `byte_offset`.
    ///
    /// Returns `None` if the window does not fit inside the buffer.
    pub fn with_range(buffer: ArrayBuffer, byte_offset: usize, byte_length: usize) -> Option<Self> {
        let end = byte_offset.checked_add(byte_length)?;
        if end > buffer.byte_length() {
            return None;
        }
        Some(Self {
            buffer,
            byte_offset,
            byte_length,
        })
    }

    /// The full backing buffer, including bytes outside the view.
    pub fn buffer(&self) -> &ArrayBuffer {
        &self.buffer
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Borrow the viewed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer.as_slice()[self.byte_offset..self.byte_offset + self.byte_length]
    }

    /// The viewed bytes, sharing storage with the buffer.
    pub fn to_bytes(&self) -> Bytes {
        self.buffer
            .0
            .slice(self.byte_offset..self.byte_offset + self.byte_length)
    }

    pub fn get_u8(&self, offset: usize) -> Option<u8> {
        self.as_slice().get(offset).copied()
    }

    pub fn get_u16(&self, offset: usize, little_endian: bool) -> Option<u16> {
        let raw: [u8; 2] = self.as_slice().get(offset..offset.checked_add(2)?)?.try_into().ok()?;
        Some(if little_endian {
            u16::from_le_bytes(raw)
        } else {
            u16::from_be_bytes(raw)
        })
    }

    pub fn get_u32(&self, offset: usize, little_endian: bool) -> Option<u32> {
        let raw: [u8; 4] = self.as_slice().get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(if little_endian {
            u32::from_le_bytes(raw)
        } else {
            u32::from_be_bytes(raw)
        })
    }
}

impl From<ArrayBuffer> for DataView {
    fn from(buffer: ArrayBuffer) -> Self {
        DataView::new(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_shares_storage() {
        let buffer = ArrayBuffer::from(vec![1u8, 2, 3, 4, 5]);
        let view = DataView::with_range(buffer.clone(), 1, 3).unwrap();
        assert_eq!(view.as_slice(), &[2, 3, 4]);

        let bytes = view.to_bytes();
        assert_eq!(&bytes[..], &[2, 3, 4]);
        // Same allocation, offset by one.
        assert_eq!(bytes.as_ptr(), buffer.as_slice()[1..].as_ptr());
    }

    #[test]
    fn view_out_of_bounds() {
        let buffer = ArrayBuffer::from(vec![0u8; 4]);
        assert!(DataView::with_range(buffer.clone(), 2, 3).is_none());
        assert!(DataView::with_range(buffer, usize::MAX, 2).is_none());
    }

    #[test]
    fn typed_getters() {
        let view = DataView::new(ArrayBuffer::from(vec![0x12, 0x34, 0x56, 0x78]));
        assert_eq!(view.get_u8(0), Some(0x12));
        assert_eq!(view.get_u16(0, false), Some(0x1234));
        assert_eq!(view.get_u16(0, true), Some(0x3412));
        assert_eq!(view.get_u32(0, false), Some(0x1234_5678));
        assert_eq!(view.get_u32(1, false), None);
        assert_eq!(view.get_u8(4), None);
    }

    #[test]
    fn slice_clamps() {
        let buffer = ArrayBuffer::from(vec![1u8, 2, 3]);
        assert_eq!(buffer.slice(1..10).as_slice(), &[2, 3]);
        assert_eq!(buffer.slice(5..10).byte_length(), 0);
    }
}
