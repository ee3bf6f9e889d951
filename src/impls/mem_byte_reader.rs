/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::SeekFrom;

use crate::error::{Error, Result};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`ByteRead`] and [`ByteSeek`] for a slice.
///
/// The position can be moved beyond the end of the slice: reading there
/// returns [`Error::EndOfStream`].
///
/// # Example
/// ```
/// use bitio::prelude::*;
/// use std::io::SeekFrom;
///
/// let data = [0x01_u8, 0x02, 0x03];
/// let mut byte_reader = MemByteReader::new(&data);
///
/// // the stream is read sequentially
/// assert_eq!(byte_reader.byte_pos().unwrap(), 0);
/// assert_eq!(byte_reader.read_byte().unwrap(), 0x01);
/// assert_eq!(byte_reader.byte_pos().unwrap(), 1);
///
/// // you can change position
/// assert_eq!(byte_reader.seek(SeekFrom::End(-1)).unwrap(), 2);
/// assert_eq!(byte_reader.read_byte().unwrap(), 0x03);
/// assert!(byte_reader.read_byte().is_err());
///
/// // negative positions are rejected, and the position does not change
/// assert!(byte_reader.seek(SeekFrom::Current(-4)).is_err());
/// assert_eq!(byte_reader.byte_pos().unwrap(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteReader<B: AsRef<[u8]>> {
    data: B,
    byte_index: u64,
}

impl<B: AsRef<[u8]>> MemByteReader<B> {
    /// Create a new [`MemByteReader`] from a slice of data.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    /// The bytes from the current position to the end of the slice.
    #[inline(always)]
    fn remaining(&self) -> &[u8] {
        let data = self.data.as_ref();
        let start = core::cmp::min(self.byte_index, data.len() as u64) as usize;
        &data[start..]
    }
}

impl<B: AsRef<[u8]>> ByteRead for MemByteReader<B> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.remaining().first().ok_or(Error::EndOfStream)?;
        self.byte_index += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        let remaining = self.remaining();
        if remaining.is_empty() && !buf.is_empty() {
            return Err(Error::EndOfStream);
        }
        let n = core::cmp::min(remaining.len(), buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.byte_index += n as u64;
        Ok(n)
    }
}

impl<B: AsRef<[u8]>> ByteSeek for MemByteReader<B> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.byte_index = resolve_seek(pos, self.byte_index, self.data.as_ref().len() as u64)?;
        Ok(self.byte_index)
    }

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64> {
        Ok(self.byte_index)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_read_bytes() -> Result<()> {
        let mut reader = MemByteReader::new(vec![1_u8, 2, 3, 4, 5]);
        let mut buf = [0; 3];
        assert_eq!(reader.read_bytes(&mut buf)?, 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(reader.read_bytes(&mut buf)?, 2);
        assert_eq!(&buf[..2], &[4, 5]);
        assert!(matches!(reader.read_bytes(&mut buf), Err(Error::EndOfStream)));
        assert_eq!(reader.read_bytes(&mut [])?, 0);
        Ok(())
    }

    #[test]
    fn test_seek_beyond_end() -> Result<()> {
        let mut reader = MemByteReader::new([7_u8; 4]);
        assert_eq!(reader.seek(SeekFrom::Start(10))?, 10);
        assert!(matches!(reader.read_byte(), Err(Error::EndOfStream)));
        assert_eq!(reader.seek(SeekFrom::Current(-7))?, 3);
        assert_eq!(reader.read_byte()?, 7);
        assert!(matches!(
            reader.seek(SeekFrom::End(-5)),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(reader.byte_pos()?, 4);
        Ok(())
    }
}
