/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// Mask with the lowest `n` bits set, for `n` in [0..8].
#[inline(always)]
pub(crate) fn low_mask(n: usize) -> u8 {
    debug_assert!(n <= 8);
    ((1_u16 << n) - 1) as u8
}

/// The single pending byte shared by [`BitReader`](crate::impls::BitReader)
/// and [`BitWriter`](crate::impls::BitWriter).
///
/// Pending bits are kept right-justified in `value`: for a reader they are
/// the bits of the last byte read that have not been returned yet, for a
/// writer the bits written that do not fill a byte yet. In both cases the
/// highest pending bit comes first in the stream. The bits of `value` above
/// the pending ones are always zero.
///
/// The number of pending bits is always smaller than eight between
/// operations: a full byte is immediately handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(flat))]
pub(crate) struct BitCache {
    value: u8,
    bits: u8,
}

impl BitCache {
    /// Number of pending bits.
    #[inline(always)]
    #[must_use]
    pub fn bits(&self) -> usize {
        self.bits as usize
    }

    /// Number of bits that can still be appended before the byte is full.
    #[inline(always)]
    #[must_use]
    pub fn space_left(&self) -> usize {
        8 - self.bits as usize
    }

    #[inline(always)]
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.bits == 0
    }

    /// Drop the pending bits, returning how many they were.
    #[inline(always)]
    pub fn clear(&mut self) -> usize {
        let bits = self.bits as usize;
        *self = Self::default();
        bits
    }

    /// Remove and return the first `n` pending bits, `n` at most
    /// [`bits`](BitCache::bits).
    #[inline(always)]
    pub fn take(&mut self, n: usize) -> u8 {
        debug_assert!(n <= self.bits());
        let rest = self.bits() - n;
        let res = self.value >> rest;
        self.value &= low_mask(rest);
        self.bits = rest as u8;
        res
    }

    /// Replace the (empty) cache with a freshly read `byte`, returning its
    /// first `n` bits and keeping the remaining `8 - n` as pending, with `n`
    /// in [1..8).
    #[inline(always)]
    pub fn refill(&mut self, byte: u8, n: usize) -> u8 {
        debug_assert!(self.is_aligned());
        debug_assert!(n > 0 && n < 8);
        let rest = 8 - n;
        self.value = byte & low_mask(rest);
        self.bits = rest as u8;
        byte >> rest
    }

    /// Append the lowest `n` bits of `value`, with `n` at most
    /// [`space_left`](BitCache::space_left). If the byte becomes full, it
    /// is returned and the cache is emptied.
    #[inline(always)]
    pub fn put(&mut self, value: u8, n: usize) -> Option<u8> {
        debug_assert!(n <= self.space_left());
        let acc = ((self.value as u16) << n) | (value & low_mask(n)) as u16;
        let bits = self.bits() + n;
        if bits == 8 {
            *self = Self::default();
            Some(acc as u8)
        } else {
            self.value = acc as u8;
            self.bits = bits as u8;
            None
        }
    }

    /// Complete the pending bits with the first bits of `byte`, returning the
    /// resulting byte and keeping the last bits of `byte` as pending.
    ///
    /// The number of pending bits does not change. This is the unaligned byte
    /// step in both directions: a reader splices a byte read from its source,
    /// a writer a byte it has been asked to write.
    #[inline(always)]
    pub fn splice(&mut self, byte: u8) -> u8 {
        let bits = self.bits();
        if bits == 0 {
            return byte;
        }
        let res = (self.value << (8 - bits)) | (byte >> bits);
        self.value = byte & low_mask(bits);
        res
    }
}
