/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// An adapter from [`Read`], [`Write`], and [`Seek`], to [`ByteRead`],
/// [`ByteWrite`], and [`ByteSeek`], respectively.
///
/// Instances of this struct can be created using [`ByteAdapter::new`]. They
/// turn every standard (possibly seekable) source or destination of bytes (such
/// as [`std::fs::File`], [`std::io::BufReader`], sockets, etc.) into a byte
/// stream for [`BitReader`](crate::impls::BitReader) and
/// [`BitWriter`](crate::impls::BitWriter).
///
/// Single-byte reads and writes are issued directly to the backend, so
/// unbuffered sources and destinations should be wrapped in a
/// [`std::io::BufReader`] or [`std::io::BufWriter`].
///
/// An [`ErrorKind::UnexpectedEof`] of the backend becomes an
/// [`Error::EndOfStream`], and an [`ErrorKind::InvalidInput`] (as returned,
/// for example, by seeks to negative positions) becomes an
/// [`Error::InvalidArgument`]. [`ErrorKind::Interrupted`] is retried, as
/// in [`Read::read_exact`].
/// Any other error of a bulk transfer that has already moved some bytes is
/// dropped, and the short count is returned.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct ByteAdapter<B> {
    backend: B,
}

impl<B> ByteAdapter<B> {
    /// Create a new ByteAdapter
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn into_inner(self) -> B {
        self.backend
    }
}

impl<B: Read> ByteRead for ByteAdapter<B> {
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0];
        self.backend.read_exact(&mut byte).map_err(Error::from_io)?;
        Ok(byte[0])
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.backend.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) if filled > 0 => return Ok(filled),
                Err(e) => return Err(Error::from_io(e)),
            }
        }
        if filled == 0 && !buf.is_empty() {
            return Err(Error::EndOfStream);
        }
        Ok(filled)
    }
}

impl<B: Write> ByteWrite for ByteAdapter<B> {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.backend.write_all(&[byte]).map_err(Error::from_io)
    }

    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            match self.backend.write(&buf[written..]) {
                Ok(0) if written > 0 => return Ok(written),
                Ok(0) => return Err(Error::Io(ErrorKind::WriteZero.into())),
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) if written > 0 => return Ok(written),
                Err(e) => return Err(Error::from_io(e)),
            }
        }
        Ok(written)
    }

    fn flush(&mut self) -> Result<()> {
        self.backend.flush().map_err(Error::from_io)
    }
}

impl<B: Seek> ByteSeek for ByteAdapter<B> {
    #[inline(always)]
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.backend.seek(pos).map_err(Error::from_io)
    }

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64> {
        self.backend.stream_position().map_err(Error::from_io)
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;
    use std::io::{Cursor, SeekFrom};

    #[test]
    fn test_byte_adapter() -> Result<(), Error> {
        let data: Vec<u8> = vec![
            0x5f, 0x68, 0xdb, 0xca, 0x79, 0x17, 0xf3, 0x37, 0x2c, 0x46, 0x63, 0xf7, 0xf3, 0x28,
            0xa4, 0x8d,
        ];
        let path = std::env::temp_dir().join("test_bitio_byte_adapter");
        {
            let mut writer = BitWriter::new(ByteAdapter::new(std::fs::File::create(&path)?));
            for value in &data {
                writer.write_bits(*value as u64 >> 1, 7)?;
            }
            writer.close()?;
        }
        {
            let mut reader = BitReader::new(ByteAdapter::new(std::fs::File::open(&path)?));
            for value in &data {
                assert_eq!(*value as u64 >> 1, reader.read_bits(7)?);
            }
            assert_eq!(reader.align(), 0);
            assert!(matches!(reader.read_bits(1), Err(Error::EndOfStream)));
        }
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_negative_seek() {
        let mut adapter = ByteAdapter::new(Cursor::new(vec![0_u8; 4]));
        assert!(matches!(
            adapter.seek(SeekFrom::End(-5)),
            Err(Error::InvalidArgument(_))
        ));
    }
}
