// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bounds-checked cursor over ROS1 wire data.
//!
//! ROS1 serialization is a flat little-endian concatenation: no encapsulation
//! header, no alignment padding. Every read is checked against the cursor's
//! limit before it executes.

use byteorder::{ByteOrder, LittleEndian};

use crate::core::{CodecError, Duration, Result, Time};

/// Read cursor over a byte slice, bounded by a logical limit.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use robomsg::encoding::cursor::WireCursor;
///
/// let data = [0x2A, 0x00, 0x00, 0x00, 0x07];
/// let mut cursor = WireCursor::new(&data);
/// assert_eq!(cursor.read_u32()?, 42);
/// assert_eq!(cursor.read_u8()?, 7);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
pub struct WireCursor<'a> {
    /// Readable bytes (already capped at the limit)
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor over the whole slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a cursor that reads at most `limit` bytes of `data`.
    pub fn with_limit(data: &'a [u8], limit: usize) -> Self {
        let end = limit.min(data.len());
        Self {
            data: &data[..end],
            offset: 0,
        }
    }

    /// Current position relative to the start of the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left before the limit.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Fail with `BufferTooShort` unless `count` bytes remain.
    #[inline]
    pub fn ensure(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset as u64,
            ));
        }
        Ok(())
    }

    /// Read `count` raw bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a bool; any non-zero byte is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.read_bytes(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    /// Read a `u32` length prefix followed by that many raw bytes.
    ///
    /// ROS strings are byte strings and are returned unvalidated.
    pub fn read_string(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Read a `(secs: u32, nsecs: u32)` time stamp.
    pub fn read_time(&mut self) -> Result<Time> {
        let bytes = self.read_bytes(8)?;
        Ok(Time::new(
            LittleEndian::read_u32(&bytes[..4]),
            LittleEndian::read_u32(&bytes[4..]),
        ))
    }

    /// Read a `(secs: i32, nsecs: i32)` duration.
    pub fn read_duration(&mut self) -> Result<Duration> {
        let bytes = self.read_bytes(8)?;
        Ok(Duration::new(
            LittleEndian::read_i32(&bytes[..4]),
            LittleEndian::read_i32(&bytes[4..]),
        ))
    }

    /// Read `count` packed elements of `width` bytes each.
    ///
    /// The whole run is bounds-checked before anything is allocated, then
    /// `convert` fills the output from the raw bytes.
    pub fn read_packed<T: Clone>(
        &mut self,
        count: usize,
        width: usize,
        zero: T,
        convert: impl FnOnce(&[u8], &mut [T]),
    ) -> Result<Vec<T>> {
        let total = count.checked_mul(width).ok_or_else(|| {
            CodecError::buffer_too_short(usize::MAX, self.remaining(), self.offset as u64)
        })?;
        let bytes = self.read_bytes(total)?;
        let mut out = vec![zero; count];
        convert(bytes, &mut out);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_little_endian() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let mut cursor = WireCursor::new(&data);
        assert_eq!(cursor.read_u16().unwrap(), 0x0201);
        assert_eq!(cursor.read_u16().unwrap(), 0x0403);
        assert_eq!(cursor.read_i32().unwrap(), 0x08070605);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_no_alignment_padding() {
        let data = [0xFF, 0x2A, 0x00, 0x00, 0x00];
        let mut cursor = WireCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 0xFF);
        assert_eq!(cursor.read_u32().unwrap(), 42);
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn test_short_read_fails_without_advancing() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = WireCursor::new(&data);
        let err = cursor.read_u32().unwrap_err();
        assert_eq!(err, CodecError::buffer_too_short(4, 3, 0));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_u16().unwrap(), 0x0201);
    }

    #[test]
    fn test_limit_caps_reads() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x02];
        let mut cursor = WireCursor::with_limit(&data, 4);
        assert_eq!(cursor.read_u32().unwrap(), 1);
        assert!(cursor.read_u8().unwrap_err().is_truncation());

        let cursor = WireCursor::with_limit(&data, 100);
        assert_eq!(cursor.remaining(), 5);
    }

    #[test]
    fn test_read_string() {
        let data = [0x02, 0x00, 0x00, 0x00, b'h', b'i', 0xAA];
        let mut cursor = WireCursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), b"hi");
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_read_string_keeps_invalid_utf8() {
        let data = [0x02, 0x00, 0x00, 0x00, 0xFF, b'a'];
        let mut cursor = WireCursor::new(&data);
        assert_eq!(cursor.read_string().unwrap(), vec![0xFF, b'a']);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_read_string_truncated_body() {
        let data = [0x05, 0x00, 0x00, 0x00, b'a'];
        let mut cursor = WireCursor::new(&data);
        let err = cursor.read_string().unwrap_err();
        assert_eq!(err, CodecError::buffer_too_short(5, 1, 4));
    }

    #[test]
    fn test_read_time_and_duration() {
        let data = [
            0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, //
            0xFF, 0xFF, 0xFF, 0xFF, 0x03, 0x00, 0x00, 0x00,
        ];
        let mut cursor = WireCursor::new(&data);
        assert_eq!(cursor.read_time().unwrap(), Time::new(1, 2));
        assert_eq!(cursor.read_duration().unwrap(), Duration::new(-1, 3));
    }

    #[test]
    fn test_read_packed() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00];
        let mut cursor = WireCursor::new(&data);
        let values = cursor
            .read_packed(3, 2, 0u16, LittleEndian::read_u16_into)
            .unwrap();
        assert_eq!(values, vec![1, 2, 3]);

        let mut cursor = WireCursor::new(&data);
        let err = cursor
            .read_packed(4, 2, 0u16, LittleEndian::read_u16_into)
            .unwrap_err();
        assert_eq!(err, CodecError::buffer_too_short(8, 6, 0));
    }
}
