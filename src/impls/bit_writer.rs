/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::bit_cache::{BitCache, low_mask};
use crate::error::{Error, Result};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitWrite`] and [`BitSeek`] for a [`ByteWrite`].
///
/// Bits are accumulated in a single-byte cache, and every byte is written to
/// the backend as soon as it is complete. The last, partial byte is written
/// only when the writer is [aligned](BitWrite::align) or
/// [closed](BitWriter::close), padding it with zeros: bits that are still
/// pending when the writer is dropped are lost (and a warning is logged).
///
/// If the backend fails, the pending bits are kept as they were before the
/// failing call, unless some byte containing them has already been written.
/// In particular, a failed [`close`](BitWriter::close) can be retried.
///
/// Closing the writer does not close the backend. After closing, every write
/// fails with [`Error::Closed`].
///
/// # Example
/// ```
/// use bitio::prelude::*;
///
/// let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::<u8>::new()));
/// writer.write_bits(0b101, 3).unwrap();
/// writer.write_byte(0xff).unwrap();
/// assert_eq!(writer.align().unwrap(), 5);
/// let bytes = writer.into_inner().unwrap().into_inner();
/// assert_eq!(bytes, vec![0xbf, 0xe0]);
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitWriter<BW: ByteWrite> {
    /// The destination of bytes; taken only by [`into_inner`](BitWriter::into_inner).
    backend: Option<BW>,
    /// The bits written that do not fill a byte yet.
    cache: BitCache,
    /// The number of bytes written to the backend so far.
    bytes_written: u64,
    /// Whether the writer has been closed.
    closed: bool,
}

impl<BW: ByteWrite> BitWriter<BW> {
    /// Create a new [`BitWriter`] around a [`ByteWrite`].
    #[must_use]
    pub fn new(backend: BW) -> Self {
        Self {
            backend: Some(backend),
            cache: BitCache::default(),
            bytes_written: 0,
            closed: false,
        }
    }

    /// Close the writer and return the backend.
    ///
    /// If closing fails the writer, and with it the backend, is dropped.
    pub fn into_inner(mut self) -> Result<BW> {
        self.close()?;
        self.backend.take().ok_or(Error::Closed)
    }

    /// Number of bits written that do not fill a byte yet.
    #[must_use]
    pub fn pending_bits(&self) -> usize {
        self.cache.bits()
    }

    /// Whether the writer is at a byte boundary.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.is_aligned()
    }

    /// Whether [`close`](BitWriter::close) has been called successfully.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pad and write the last partial byte, if any, and mark the writer as
    /// closed. Closing a closed writer does nothing.
    ///
    /// If writing the last byte fails, the writer stays open with its
    /// pending bits, and the call can be retried.
    ///
    /// The backend is neither closed nor flushed.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let padding = self.align()?;
        self.closed = true;
        tracing::trace!(padding, bytes_written = self.bytes_written, "bit writer closed");
        Ok(())
    }

    /// Write the bytes in `buf` and return the number of bytes written.
    ///
    /// If the writer is aligned the write is delegated to
    /// [`ByteWrite::write_bytes`]; otherwise, every byte is spliced with
    /// the pending bits, and the writer keeps its bit offset. The
    /// partial-transfer conventions are those of [`ByteWrite::write_bytes`].
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        self.check_open()?;
        if self.cache.is_aligned() {
            let written = self.backend()?.write_bytes(buf)?;
            self.bytes_written += written as u64;
            return Ok(written);
        }
        for (i, &byte) in buf.iter().enumerate() {
            let mut cache = self.cache;
            let out = cache.splice(byte);
            match self.emit(out) {
                Ok(()) => self.cache = cache,
                Err(_) if i > 0 => return Ok(i),
                Err(e) => return Err(e),
            }
        }
        Ok(buf.len())
    }

    #[inline(always)]
    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }

    #[inline(always)]
    fn backend(&mut self) -> Result<&mut BW> {
        self.backend.as_mut().ok_or(Error::Closed)
    }

    #[inline(always)]
    fn emit(&mut self, byte: u8) -> Result<()> {
        self.backend()?.write_byte(byte)?;
        self.bytes_written += 1;
        Ok(())
    }

    /// Append the lowest `n` bits of `value` to the pending bits, with `n`
    /// at most the space left, committing the cache only if the byte that
    /// possibly gets completed is written successfully.
    #[inline(always)]
    fn put(&mut self, value: u8, n: usize) -> Result<()> {
        let mut cache = self.cache;
        if let Some(byte) = cache.put(value, n) {
            self.emit(byte)?;
        }
        self.cache = cache;
        Ok(())
    }
}

impl<BW: ByteWrite> BitWrite for BitWriter<BW> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<()> {
        self.check_open()?;
        check_n_bits(n)?;
        if n == 0 {
            return Ok(());
        }

        #[cfg(feature = "checks")]
        if n < 64 && value >> n != 0 {
            return Err(Error::InvalidArgument(format!(
                "Value {:#x} does not fit in {} bits",
                value, n
            )));
        }

        let value = if n < 64 { value & ((1 << n) - 1) } else { value };

        let space_left = self.cache.space_left();
        if n < space_left {
            self.cache.put(value as u8, n);
            return Ok(());
        }

        // Top off the cache, then emit whole bytes, then cache the rest
        let mut n = n - space_left;
        self.put((value >> n) as u8, space_left)?;
        while n >= 8 {
            n -= 8;
            self.emit((value >> n) as u8)?;
        }
        if n > 0 {
            self.cache.put(value as u8 & low_mask(n), n);
        }
        Ok(())
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.check_open()?;
        let mut cache = self.cache;
        let out = cache.splice(byte);
        self.emit(out)?;
        self.cache = cache;
        Ok(())
    }

    #[inline]
    fn write_bool(&mut self, bit: bool) -> Result<()> {
        self.check_open()?;
        self.put(bit as u8, 1)
    }

    fn align(&mut self) -> Result<usize> {
        self.check_open()?;
        if self.cache.is_aligned() {
            return Ok(0);
        }
        let padding = self.cache.space_left();
        self.put(0, padding)?;
        tracing::trace!(padding, "bit writer aligned");
        Ok(padding)
    }
}

impl<BW: ByteWrite> BitSeek for BitWriter<BW> {
    fn bit_pos(&mut self) -> Result<u64> {
        Ok(self.bytes_written * 8 + self.cache.bits() as u64)
    }
}

impl<BW: ByteWrite> core::ops::Drop for BitWriter<BW> {
    fn drop(&mut self) {
        if !self.cache.is_aligned() {
            tracing::warn!(
                pending_bits = self.cache.bits(),
                "bit writer dropped with pending bits; call close() to write them"
            );
        }
    }
}

impl<BW: ByteWrite> std::io::Write for BitWriter<BW> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        Ok(self.write_bytes(buf)?)
    }

    /// Flush the backend. Pending bits are not written, as this would
    /// require padding: use [`BitWrite::align`] or [`BitWriter::close`].
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(self.backend()?.flush()?)
    }
}
