/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;
use std::io::SeekFrom;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    init: Vec<u8>,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    GetPosition,
    SeekStart(u16),
    SeekCurrent(i16),
    SeekEnd(i16),
    ReadBits(u8),
    Align,
}

/// Check a [`BitReader`] on a [`MemByteReader`] against a bit-level model
/// of the same slice.
pub fn harness(data: FuzzCase) {
    let len = data.init.len() as u64;
    let bit_at = |pos: u64| -> u64 { ((data.init[(pos / 8) as usize] >> (7 - pos % 8)) & 1) as u64 };
    // position in bits of the model
    let mut pos = 0_u64;
    let mut reader = BitReader::new(MemByteReader::new(&data.init));
    for command in data.commands {
        match command {
            RandomCommand::GetPosition => {
                assert_eq!(reader.bit_pos().unwrap(), pos);
            }
            RandomCommand::SeekStart(offset) => {
                assert_eq!(reader.seek(SeekFrom::Start(offset as u64)).unwrap(), offset as u64);
                pos = offset as u64 * 8;
            }
            RandomCommand::SeekCurrent(offset) => {
                // relative to the byte following the one partially read
                let base = pos.div_ceil(8) as i64;
                let res = reader.seek(SeekFrom::Current(offset as i64));
                if base + (offset as i64) < 0 {
                    assert!(matches!(res, Err(Error::InvalidArgument(_))));
                    // the pending bits are gone anyway
                    pos = pos.div_ceil(8) * 8;
                } else {
                    pos = (base + offset as i64) as u64 * 8;
                    assert_eq!(res.unwrap(), pos / 8);
                }
            }
            RandomCommand::SeekEnd(offset) => {
                let res = reader.seek(SeekFrom::End(offset as i64));
                if len as i64 + (offset as i64) < 0 {
                    assert!(matches!(res, Err(Error::InvalidArgument(_))));
                    pos = pos.div_ceil(8) * 8;
                } else {
                    pos = (len as i64 + offset as i64) as u64 * 8;
                    assert_eq!(res.unwrap(), pos / 8);
                }
            }
            RandomCommand::ReadBits(n_bits) => {
                let n_bits = (n_bits % 65) as u64;
                if n_bits == 0 {
                    assert_eq!(reader.read_bits(0).unwrap(), 0);
                } else if pos + n_bits <= len * 8 {
                    let expected = (pos..pos + n_bits).fold(0, |acc, p| (acc << 1) | bit_at(p));
                    assert_eq!(reader.read_bits(n_bits as usize).unwrap(), expected);
                    pos += n_bits;
                } else {
                    assert!(matches!(
                        reader.read_bits(n_bits as usize),
                        Err(Error::EndOfStream)
                    ));
                    // no rollback: resynchronize the model
                    reader.align();
                    let byte_pos = reader.byte_pos().unwrap();
                    pos = byte_pos * 8;
                }
            }
            RandomCommand::Align => {
                let skipped = reader.align() as u64;
                assert_eq!(skipped, (8 - pos % 8) % 8);
                pos += skipped;
            }
        }
    }
}
