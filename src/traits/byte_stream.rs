/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use std::io::SeekFrom;

/// Sequential, streaming byte-by-byte reads.
pub trait ByteRead {
    /// Read a byte and advance the current position.
    ///
    /// Must return [`Error::EndOfStream`] when the source is exhausted.
    fn read_byte(&mut self) -> Result<u8>;

    /// Fill `buf` with as many bytes as possible and return their number.
    ///
    /// If a failure happens after some bytes have been transferred, the
    /// number of transferred bytes is returned and the error is dropped, as
    /// in [`std::io::Read::read`]: persistent conditions, such as the end
    /// of the stream, show up again at the next call, but transient errors
    /// are lost. If no byte could be transferred, the error is returned.
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.read_byte() {
                Ok(byte) => *slot = byte,
                Err(_) if i > 0 => return Ok(i),
                Err(e) => return Err(e),
            }
        }
        Ok(buf.len())
    }
}

/// Sequential, streaming byte-by-byte writes.
pub trait ByteWrite {
    /// Write a byte and advance the current position.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Write as many bytes of `buf` as possible and return their number,
    /// with the same conventions of [`ByteRead::read_bytes`].
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        for (i, &byte) in buf.iter().enumerate() {
            match self.write_byte(byte) {
                Ok(()) => {}
                Err(_) if i > 0 => return Ok(i),
                Err(e) => return Err(e),
            }
        }
        Ok(buf.len())
    }

    /// Flush any buffer of the underlying destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Seekability for [`ByteRead`] and [`ByteWrite`] streams.
pub trait ByteSeek {
    /// Move the current position and return the new absolute position.
    ///
    /// Must return [`Error::InvalidArgument`] if the new position would be
    /// negative.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64>;

    /// Get the current position in bytes from the start of the stream.
    fn byte_pos(&mut self) -> Result<u64> {
        self.seek(SeekFrom::Current(0))
    }
}

impl<T: ByteRead + ?Sized> ByteRead for &mut T {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read_bytes(buf)
    }
}

impl<T: ByteWrite + ?Sized> ByteWrite for &mut T {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }

    #[inline(always)]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write_bytes(buf)
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<T: ByteSeek + ?Sized> ByteSeek for &mut T {
    #[inline(always)]
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        (**self).seek(pos)
    }

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64> {
        (**self).byte_pos()
    }
}

/// Compute the absolute position resulting from `pos`, given the current
/// position and the length of the stream.
pub(crate) fn resolve_seek(pos: SeekFrom, current: u64, len: u64) -> Result<u64> {
    let (base, offset) = match pos {
        SeekFrom::Start(abs) => return Ok(abs),
        SeekFrom::Current(offset) => (current, offset),
        SeekFrom::End(offset) => (len, offset),
    };
    base.checked_add_signed(offset).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "Seek to a negative or overflowing position ({} {:+})",
            base, offset
        ))
    })
}
