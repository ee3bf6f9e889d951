/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// logs at trace level information about methods called.
///
/// Padding bits written by [`align`](BitWrite::align) are counted.
#[derive(Debug)]
pub struct CountBitWriter<BW: BitWrite, const LOG: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: u64,
}

impl<BW: BitWrite, const LOG: bool> CountBitWriter<BW, LOG> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const LOG: bool> BitWrite for CountBitWriter<BW, LOG> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<()> {
        self.bit_write.write_bits(value, n)?;
        self.bits_written += n as u64;
        if LOG {
            tracing::trace!(
                "write_bits({:#x}, {}) (total = {})",
                value,
                n,
                self.bits_written
            );
        }
        Ok(())
    }

    fn write_bool(&mut self, bit: bool) -> Result<()> {
        self.bit_write.write_bool(bit)?;
        self.bits_written += 1;
        if LOG {
            tracing::trace!("write_bool({}) (total = {})", bit, self.bits_written);
        }
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.bit_write.write_byte(byte)?;
        self.bits_written += 8;
        if LOG {
            tracing::trace!("write_byte({:#04x}) (total = {})", byte, self.bits_written);
        }
        Ok(())
    }

    fn align(&mut self) -> Result<usize> {
        let padding = self.bit_write.align()?;
        self.bits_written += padding as u64;
        if LOG {
            tracing::trace!("align() = {} (total = {})", padding, self.bits_written);
        }
        Ok(padding)
    }
}

/// Wrapping struct that keep tracks of read bits. Optionally,
/// logs at trace level information about methods called.
///
/// Bits discarded by [`align`](BitRead::align) are counted.
#[derive(Debug)]
pub struct CountBitReader<BR: BitRead, const LOG: bool = false> {
    bit_read: BR,
    /// The number of bits read (or discarded) so far from the underlying [`BitRead`].
    pub bits_read: u64,
}

impl<BR: BitRead, const LOG: bool> CountBitReader<BR, LOG> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const LOG: bool> BitRead for CountBitReader<BR, LOG> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        let value = self.bit_read.read_bits(n)?;
        self.bits_read += n as u64;
        if LOG {
            tracing::trace!("read_bits({}) = {:#x} (total = {})", n, value, self.bits_read);
        }
        Ok(value)
    }

    fn read_bool(&mut self) -> Result<bool> {
        let bit = self.bit_read.read_bool()?;
        self.bits_read += 1;
        if LOG {
            tracing::trace!("read_bool() = {} (total = {})", bit, self.bits_read);
        }
        Ok(bit)
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = self.bit_read.read_byte()?;
        self.bits_read += 8;
        if LOG {
            tracing::trace!("read_byte() = {:#04x} (total = {})", byte, self.bits_read);
        }
        Ok(byte)
    }

    fn align(&mut self) -> usize {
        let skipped = self.bit_read.align();
        self.bits_read += skipped as u64;
        if LOG {
            tracing::trace!("align() = {} (total = {})", skipped, self.bits_read);
        }
        skipped
    }
}

impl<BR: BitRead + BitSeek, const LOG: bool> BitSeek for CountBitReader<BR, LOG> {
    fn bit_pos(&mut self) -> Result<u64> {
        self.bit_read.bit_pos()
    }
}

impl<BW: BitWrite + BitSeek, const LOG: bool> BitSeek for CountBitWriter<BW, LOG> {
    fn bit_pos(&mut self) -> Result<u64> {
        self.bit_write.bit_pos()
    }
}

#[cfg(test)]
#[test]
fn test_count() -> Result<()> {
    use crate::prelude::*;
    let mut buffer = <Vec<u8>>::new();
    let bit_write = BitWriter::new(MemByteWriterVec::new(&mut buffer));
    let mut count_bit_write = CountBitWriter::<_, true>::new(bit_write);

    count_bit_write.write_bool(true)?;
    assert_eq!(count_bit_write.bits_written, 1);
    count_bit_write.write_bits(1, 20)?;
    assert_eq!(count_bit_write.bits_written, 21);
    count_bit_write.write_byte(0xaa)?;
    assert_eq!(count_bit_write.bits_written, 29);
    count_bit_write.write_bits(1, 33)?;
    assert_eq!(count_bit_write.bits_written, 62);
    assert_eq!(count_bit_write.bit_pos()?, 62);
    assert_eq!(count_bit_write.align()?, 2);
    assert_eq!(count_bit_write.bits_written, 64);
    count_bit_write.into_inner().close()?;

    let bit_read = BitReader::new(MemByteReader::new(&buffer));
    let mut count_bit_read = CountBitReader::<_, true>::new(bit_read);

    assert!(count_bit_read.read_bool()?);
    assert_eq!(count_bit_read.bits_read, 1);
    assert_eq!(count_bit_read.read_bits(20)?, 1);
    assert_eq!(count_bit_read.bits_read, 21);
    assert_eq!(count_bit_read.read_byte()?, 0xaa);
    assert_eq!(count_bit_read.bits_read, 29);
    assert_eq!(count_bit_read.read_bits(33)?, 1);
    assert_eq!(count_bit_read.bits_read, 62);
    assert_eq!(count_bit_read.bit_pos()?, 62);
    assert_eq!(count_bit_read.align(), 2);
    assert_eq!(count_bit_read.bits_read, 64);

    Ok(())
}
