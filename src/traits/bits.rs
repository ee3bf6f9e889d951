/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};

/// The largest number of bits that can be moved by a single call to
/// [`BitRead::read_bits`] or [`BitWrite::write_bits`].
pub const MAX_BITS: usize = 64;

/// Checks that `n` is a valid bit count for a single read or write.
#[inline(always)]
pub(crate) fn check_n_bits(n: usize) -> Result<()> {
    if n > MAX_BITS {
        return Err(Error::InvalidArgument(format!(
            "The number of bits has to be in [0, {}] and {} is not",
            MAX_BITS, n
        )));
    }
    Ok(())
}

/// Sequential, streaming bit-by-bit reads.
///
/// Bits are returned most-significant first: the first bit of the stream
/// is bit 7 of the first byte, and it becomes the highest bit of the value
/// returned by [`read_bits`](BitRead::read_bits).
pub trait BitRead {
    /// Read `n` bits and return them in the lowest bits.
    ///
    /// Reading zero bits returns zero without accessing the stream.
    /// Implementors must return [`Error::InvalidArgument`] if `n` is greater
    /// than 64.
    fn read_bits(&mut self, n: usize) -> Result<u64>;

    /// Read a single bit.
    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read the next eight bits as a byte, whatever the current alignment.
    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Discard the bits left in the current byte, if any, and return how
    /// many were discarded.
    fn align(&mut self) -> usize;

    /// Copy `n` bits to `bit_write`, 64 at a time.
    fn copy_to<W: BitWrite>(&mut self, bit_write: &mut W, mut n: u64) -> Result<()> {
        while n > 0 {
            let to_read = core::cmp::min(n, MAX_BITS as u64) as usize;
            let read = self.read_bits(to_read)?;
            bit_write.write_bits(read, to_read)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}

/// Sequential, streaming bit-by-bit writes.
///
/// This is the mirror of [`BitRead`]: bits are packed most-significant first.
pub trait BitWrite {
    /// Write the lowest `n` bits of `value` to the stream.
    ///
    /// Writing zero bits is a no-op. Implementors must return
    /// [`Error::InvalidArgument`] if `n` is greater than 64. Moreover, if the
    /// feature `checks` is enabled they must check that the remaining bits of
    /// `value` are zero.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<()>;

    /// Write a single bit.
    #[inline(always)]
    fn write_bool(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u64, 1)
    }

    /// Write eight bits, whatever the current alignment.
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bits(byte as u64, 8)
    }

    /// Pad the current byte with zeros, if it is partially written, and
    /// return the number of padding bits.
    fn align(&mut self) -> Result<usize>;

    /// Copy `n` bits from `bit_read`, 64 at a time.
    fn copy_from<R: BitRead>(&mut self, bit_read: &mut R, mut n: u64) -> Result<()> {
        while n > 0 {
            let to_read = core::cmp::min(n, MAX_BITS as u64) as usize;
            let read = bit_read.read_bits(to_read)?;
            self.write_bits(read, to_read)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}

/// Positional information for [`BitRead`] and [`BitWrite`] streams.
pub trait BitSeek {
    /// Get the current position in bits from the start of the stream.
    fn bit_pos(&mut self) -> Result<u64>;
}

impl<T: BitRead> BitRead for &mut T {
    #[inline(always)]
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        (**self).read_bits(n)
    }

    #[inline(always)]
    fn read_bool(&mut self) -> Result<bool> {
        (**self).read_bool()
    }

    #[inline(always)]
    fn read_byte(&mut self) -> Result<u8> {
        (**self).read_byte()
    }

    #[inline(always)]
    fn align(&mut self) -> usize {
        (**self).align()
    }
}

impl<T: BitWrite> BitWrite for &mut T {
    #[inline(always)]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<()> {
        (**self).write_bits(value, n)
    }

    #[inline(always)]
    fn write_bool(&mut self, bit: bool) -> Result<()> {
        (**self).write_bool(bit)
    }

    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }

    #[inline(always)]
    fn align(&mut self) -> Result<usize> {
        (**self).align()
    }
}

impl<T: BitSeek> BitSeek for &mut T {
    #[inline(always)]
    fn bit_pos(&mut self) -> Result<u64> {
        (**self).bit_pos()
    }
}
