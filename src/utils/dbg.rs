/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::Result;
use crate::traits::*;

/// A wrapper over a [`BitRead`] that logs at debug level all the
/// operations performed, including failed ones.
#[derive(Debug)]
pub struct DbgBitReader<BR: BitRead> {
    reader: BR,
}

impl<BR: BitRead> DbgBitReader<BR> {
    pub fn new(br: BR) -> Self {
        Self { reader: br }
    }

    pub fn into_inner(self) -> BR {
        self.reader
    }
}

impl<BR: BitRead> BitRead for DbgBitReader<BR> {
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        let value = self.reader.read_bits(n);
        tracing::debug!("read_bits({}): {:?}", n, value);
        value
    }

    fn read_bool(&mut self) -> Result<bool> {
        let bit = self.reader.read_bool();
        tracing::debug!("read_bool(): {:?}", bit);
        bit
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = self.reader.read_byte();
        tracing::debug!("read_byte(): {:?}", byte);
        byte
    }

    fn align(&mut self) -> usize {
        let skipped = self.reader.align();
        tracing::debug!("align(): {}", skipped);
        skipped
    }
}

/// A wrapper over a [`BitWrite`] that logs at debug level all the
/// operations performed, including failed ones.
#[derive(Debug)]
pub struct DbgBitWriter<BW: BitWrite> {
    writer: BW,
}

impl<BW: BitWrite> DbgBitWriter<BW> {
    pub fn new(bw: BW) -> Self {
        Self { writer: bw }
    }

    pub fn into_inner(self) -> BW {
        self.writer
    }
}

impl<BW: BitWrite> BitWrite for DbgBitWriter<BW> {
    fn write_bits(&mut self, value: u64, n: usize) -> Result<()> {
        let res = self.writer.write_bits(value, n);
        tracing::debug!("write_bits({:#x}, {}): {:?}", value, n, res);
        res
    }

    fn write_bool(&mut self, bit: bool) -> Result<()> {
        let res = self.writer.write_bool(bit);
        tracing::debug!("write_bool({}): {:?}", bit, res);
        res
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        let res = self.writer.write_byte(byte);
        tracing::debug!("write_byte({:#04x}): {:?}", byte, res);
        res
    }

    fn align(&mut self) -> Result<usize> {
        let padding = self.writer.align();
        tracing::debug!("align(): {:?}", padding);
        padding
    }
}
