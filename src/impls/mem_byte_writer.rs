/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// An implementation of [`ByteWrite`] appending to a [`Vec<u8>`].
///
/// The vector can be owned or borrowed mutably.
///
/// # Example
/// ```
/// use bitio::prelude::*;
///
/// let mut bytes = vec![0xff_u8];
/// let mut byte_writer = MemByteWriterVec::new(&mut bytes);
/// byte_writer.write_byte(0x01).unwrap();
/// assert_eq!(byte_writer.write_bytes(&[0x02, 0x03]).unwrap(), 2);
/// assert_eq!(byte_writer.len(), 4);
/// assert_eq!(bytes, vec![0xff, 0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct MemByteWriterVec<B: AsMut<Vec<u8>>> {
    data: B,
}

impl<B: AsMut<Vec<u8>>> MemByteWriterVec<B> {
    /// Create a new [`MemByteWriterVec`] appending to `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> B {
        self.data
    }

    /// The length of the underlying vector.
    pub fn len(&mut self) -> usize {
        self.data.as_mut().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }
}

impl<B: AsMut<Vec<u8>>> ByteWrite for MemByteWriterVec<B> {
    #[inline(always)]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.data.as_mut().push(byte);
        Ok(())
    }

    #[inline(always)]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize> {
        self.data.as_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
}
