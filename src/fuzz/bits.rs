/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Bits(u64, usize),
    Bool(bool),
    Byte(u8),
    Bytes(Vec<u8>),
    Align,
}

/// Write all commands with a [`BitWriter`], close it, and read everything
/// back with a [`BitReader`], checking values, alignment and positions.
pub fn harness(data: FuzzCase) {
    let mut data = data;
    for command in &mut data.commands {
        if let RandomCommand::Bits(value, n_bits) = command {
            *n_bits %= 65;
            if *n_bits < 64 {
                *value &= (1 << *n_bits) - 1;
            }
        }
    }

    let mut buffer: Vec<u8> = vec![];
    let mut paddings = vec![];
    let mut total_bits = 0_u64;
    {
        let mut writer = BitWriter::new(MemByteWriterVec::new(&mut buffer));
        for command in data.commands.iter() {
            match command {
                RandomCommand::Bits(value, n_bits) => {
                    writer.write_bits(*value, *n_bits).unwrap();
                    total_bits += *n_bits as u64;
                }
                RandomCommand::Bool(bit) => {
                    writer.write_bool(*bit).unwrap();
                    total_bits += 1;
                }
                RandomCommand::Byte(byte) => {
                    writer.write_byte(*byte).unwrap();
                    total_bits += 8;
                }
                RandomCommand::Bytes(bytes) => {
                    assert_eq!(writer.write_bytes(bytes).unwrap(), bytes.len());
                    total_bits += 8 * bytes.len() as u64;
                }
                RandomCommand::Align => {
                    let padding = writer.align().unwrap();
                    assert_eq!(padding as u64, (8 - total_bits % 8) % 8);
                    total_bits += padding as u64;
                    paddings.push(padding);
                }
            }
            assert_eq!(writer.bit_pos().unwrap(), total_bits);
        }
        writer.close().unwrap();
        assert!(matches!(writer.write_bool(true), Err(Error::Closed)));
    }
    assert_eq!(buffer.len() as u64, total_bits.div_ceil(8));

    let mut reader = BitReader::new(MemByteReader::new(&buffer));
    let mut paddings = paddings.into_iter();
    for command in data.commands.iter() {
        match command {
            RandomCommand::Bits(value, n_bits) => {
                assert_eq!(reader.read_bits(*n_bits).unwrap(), *value);
            }
            RandomCommand::Bool(bit) => {
                assert_eq!(reader.read_bool().unwrap(), *bit);
            }
            RandomCommand::Byte(byte) => {
                assert_eq!(reader.read_byte().unwrap(), *byte);
            }
            RandomCommand::Bytes(bytes) => {
                let mut buf = vec![0; bytes.len()];
                assert_eq!(reader.read_bytes(&mut buf).unwrap(), bytes.len());
                assert_eq!(&buf, bytes);
            }
            RandomCommand::Align => {
                assert_eq!(Some(reader.align()), paddings.next());
            }
        }
    }
    reader.align();
    assert!(matches!(reader.read_bits(1), Err(Error::EndOfStream)));
}
