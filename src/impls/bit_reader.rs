/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::SeekFrom;

use super::bit_cache::BitCache;
use crate::error::{Error, Result};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`BitRead`] for a [`ByteRead`], and of [`BitSeek`]
/// for a [`ByteRead`] that is also a [`ByteSeek`].
///
/// The reader keeps the bits of the last byte read that have not been
/// returned yet in a single-byte cache. Reads that do not exceed the cache
/// do not touch the backend; longer reads consume the cache first, then as
/// many whole bytes as needed, and finally cache the unused tail of the last
/// byte.
///
/// Besides bits, the reader can read whole bytes with
/// [`read_bytes`](BitReader::read_bytes) (or through [`std::io::Read`]): when
/// the reader is aligned, bulk reads are delegated to the backend, otherwise
/// each byte is spliced from two bytes of the backend.
///
/// If a read fails, the bits consumed before the failure are lost: the
/// reader should not be used any longer to complete that read.
///
/// # Example
/// ```
/// use bitio::prelude::*;
///
/// let mut reader = BitReader::new(MemByteReader::new([0xa5_u8, 0x0f]));
/// assert_eq!(reader.read_bits(3).unwrap(), 0b101);
/// assert_eq!(reader.read_bits(9).unwrap(), 0b0_0101_0000);
/// assert_eq!(reader.align(), 4);
/// assert!(reader.read_bits(1).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct BitReader<BR> {
    /// The source of bytes.
    backend: BR,
    /// The pending bits of the last byte read.
    cache: BitCache,
}

impl<BR> BitReader<BR> {
    /// Create a new [`BitReader`] around a [`ByteRead`].
    #[must_use]
    pub fn new(backend: BR) -> Self {
        Self {
            backend,
            cache: BitCache::default(),
        }
    }

    /// Return the backend, discarding the pending bits.
    pub fn into_inner(self) -> BR {
        self.backend
    }

    /// Return a reference to the backend.
    pub fn get_ref(&self) -> &BR {
        &self.backend
    }

    /// Number of bits of the current byte that have not been read yet.
    #[must_use]
    pub fn pending_bits(&self) -> usize {
        self.cache.bits()
    }

    /// Whether the reader is at a byte boundary.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.is_aligned()
    }
}

impl<BR: ByteRead> BitReader<BR> {
    /// Fill `buf` with the next bytes of the stream and return the number of
    /// bytes read.
    ///
    /// If the reader is aligned the read is delegated to
    /// [`ByteRead::read_bytes`]; otherwise, every byte is spliced, and the
    /// reader keeps its bit offset. The partial-transfer conventions are
    /// those of [`ByteRead::read_bytes`].
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.cache.is_aligned() {
            return self.backend.read_bytes(buf);
        }
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.backend.read_byte() {
                Ok(byte) => *slot = self.cache.splice(byte),
                Err(_) if i > 0 => return Ok(i),
                Err(e) => return Err(e),
            }
        }
        Ok(buf.len())
    }
}

impl<BR: ByteRead> BitRead for BitReader<BR> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        check_n_bits(n)?;

        let bits = self.cache.bits();
        // The cache contains all the bits we need (possibly none)
        if n <= bits {
            return Ok(self.cache.take(n) as u64);
        }

        let mut res = self.cache.take(bits) as u64;
        let mut n = n - bits;
        while n >= 8 {
            res = (res << 8) | self.backend.read_byte()? as u64;
            n -= 8;
        }
        if n > 0 {
            let byte = self.backend.read_byte()?;
            res = (res << n) | self.cache.refill(byte, n) as u64;
        }
        Ok(res)
    }

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        let byte = self.backend.read_byte()?;
        Ok(self.cache.splice(byte))
    }

    #[inline]
    fn read_bool(&mut self) -> Result<bool> {
        if self.cache.is_aligned() {
            let byte = self.backend.read_byte()?;
            return Ok(self.cache.refill(byte, 1) != 0);
        }
        Ok(self.cache.take(1) != 0)
    }

    #[inline]
    fn align(&mut self) -> usize {
        let skipped = self.cache.clear();
        if skipped != 0 {
            tracing::trace!(skipped, "bit reader aligned");
        }
        skipped
    }
}

impl<BR: ByteRead + ByteSeek> BitReader<BR> {
    /// Move the underlying source to `pos`, discarding the pending bits, and
    /// return the new absolute byte position.
    ///
    /// Offsets relative to the current position are relative to the position
    /// of the backend, that is, to the byte following the partially read one.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let dropped = self.cache.clear();
        let abs = self.backend.seek(pos)?;
        tracing::trace!(?pos, abs, dropped, "bit reader seek");
        Ok(abs)
    }

    /// Get the current position in bytes of the backend.
    pub fn byte_pos(&mut self) -> Result<u64> {
        self.backend.byte_pos()
    }
}

impl<BR: ByteRead + ByteSeek> BitSeek for BitReader<BR> {
    fn bit_pos(&mut self) -> Result<u64> {
        Ok(self.backend.byte_pos()? * 8 - self.cache.bits() as u64)
    }
}

impl<BR: ByteRead> std::io::Read for BitReader<BR> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.read_bytes(buf) {
            Ok(n) => Ok(n),
            Err(Error::EndOfStream) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

impl<BR: ByteRead + ByteSeek> std::io::Seek for BitReader<BR> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        Ok(BitReader::seek(self, pos)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::MemByteReader;

    const DATA: [u8; 12] = [
        0x03, 0xff, 0xcc, 0x1a, 0xbc, 0xde, 0x80, 0x01, 0x02, 0xf8, 0x08, 0xf0,
    ];

    #[test]
    fn test_reader() -> Result<()> {
        let mut reader = BitReader::new(MemByteReader::new(&DATA));

        assert_eq!(reader.read_byte()?, 0x03);
        assert_eq!(reader.read_bits(8)?, 0xff);
        assert_eq!(reader.read_bits(4)?, 0xc);
        assert_eq!(reader.read_bits(8)?, 0xc1);
        assert_eq!(reader.read_bits(20)?, 0xabcde);
        assert!(reader.read_bool()?);
        assert!(!reader.read_bool()?);
        assert_eq!(reader.align(), 6);

        let mut buf = [0; 2];
        assert_eq!(reader.read_bytes(&mut buf)?, 2);
        assert_eq!(buf, [0x01, 0x02]);

        assert_eq!(reader.read_bits(4)?, 0xf);
        assert_eq!(reader.read_bytes(&mut buf)?, 2);
        assert_eq!(buf, [0x80, 0x8f]);
        assert_eq!(reader.pending_bits(), 4);
        Ok(())
    }

    #[test]
    fn test_zero_and_too_many_bits() -> Result<()> {
        let mut reader = BitReader::new(MemByteReader::new(&DATA));
        assert_eq!(reader.read_bits(0)?, 0);
        assert_eq!(reader.byte_pos()?, 0);
        assert!(matches!(
            reader.read_bits(65),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(reader.read_bits(64)?, 0x03ff_cc1a_bcde_8001);
        Ok(())
    }

    #[test]
    fn test_exact_cache() -> Result<()> {
        let mut reader = BitReader::new(MemByteReader::new([0b1010_0110_u8]));
        assert_eq!(reader.read_bits(3)?, 0b101);
        assert_eq!(reader.read_bits(5)?, 0b0_0110);
        assert!(reader.is_aligned());
        assert_eq!(reader.align(), 0);
        assert_eq!(reader.byte_pos()?, 1);
        assert!(matches!(reader.read_bool(), Err(Error::EndOfStream)));
        Ok(())
    }

    #[test]
    fn test_bit_pos() -> Result<()> {
        let mut reader = BitReader::new(MemByteReader::new(&DATA));
        reader.read_bits(13)?;
        assert_eq!(reader.bit_pos()?, 13);
        reader.read_bool()?;
        assert_eq!(reader.bit_pos()?, 14);
        reader.align();
        assert_eq!(reader.bit_pos()?, 16);
        Ok(())
    }
}
