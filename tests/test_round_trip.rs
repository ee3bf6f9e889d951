/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use bitio::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn round_trip(max_width: usize, seed: u64) -> Result<()> {
    const ITER: usize = 100_000;
    let mut r = SmallRng::seed_from_u64(seed);
    let mut expected = Vec::with_capacity(ITER);

    let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::<u8>::new()));
    let mut total_bits = 0;
    for _ in 0..ITER {
        let n_bits = r.random_range(1..=max_width);
        let value = r.random::<u64>() & (u64::MAX >> (64 - n_bits));
        writer.write_bits(value, n_bits)?;
        expected.push((value, n_bits));
        total_bits += n_bits as u64;
    }
    assert_eq!(writer.bit_pos()?, total_bits);
    let buffer = writer.into_inner()?.into_inner();
    assert_eq!(buffer.len() as u64, total_bits.div_ceil(8));

    let mut reader = BitReader::new(MemByteReader::new(buffer));
    for (i, &(value, n_bits)) in expected.iter().enumerate() {
        assert_eq!(
            reader.read_bits(n_bits)?,
            value,
            "index: {}, bits: {}",
            i,
            n_bits
        );
    }
    assert_eq!(reader.align() as u64, (8 - total_bits % 8) % 8);
    assert!(matches!(reader.read_bits(1), Err(Error::EndOfStream)));
    Ok(())
}

#[test]
fn test_round_trip_60() -> Result<()> {
    round_trip(60, 0)
}

#[test]
fn test_round_trip_64() -> Result<()> {
    round_trip(64, 1)
}

#[test]
fn test_split_reads() -> Result<()> {
    let mut r = SmallRng::seed_from_u64(2);
    let mut data = vec![0_u8; 1000];
    r.fill(&mut data[..]);

    let mut whole = BitReader::new(MemByteReader::new(&data));
    let mut split = BitReader::new(MemByteReader::new(&data));
    // start from an unaligned position as well
    assert_eq!(whole.read_bits(3)?, split.read_bits(3)?);
    for _ in 0..data.len() - 1 {
        let byte = whole.read_bits(8)?;
        let high = split.read_bits(4)?;
        let low = split.read_bits(4)?;
        assert_eq!(byte, high << 4 | low);
    }
    Ok(())
}

#[test]
fn test_byte_and_bool_paths() -> Result<()> {
    let mut r = SmallRng::seed_from_u64(3);
    let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::<u8>::new()));
    let mut expected = vec![];
    for _ in 0..10_000 {
        match r.random_range(0..3) {
            0 => {
                let bit = r.random::<bool>();
                writer.write_bool(bit)?;
                expected.push((bit as u64, 1));
            }
            1 => {
                let byte = r.random::<u8>();
                writer.write_byte(byte)?;
                expected.push((byte as u64, 8));
            }
            _ => {
                let n_bits = r.random_range(0..=64);
                let value = if n_bits == 0 {
                    0
                } else {
                    r.random::<u64>() >> (64 - n_bits)
                };
                writer.write_bits(value, n_bits)?;
                expected.push((value, n_bits));
            }
        }
    }
    let buffer = writer.into_inner()?.into_inner();

    // read everything back with the specialized methods...
    let mut reader = BitReader::new(MemByteReader::new(&buffer));
    for &(value, n_bits) in &expected {
        match n_bits {
            1 => assert_eq!(reader.read_bool()? as u64, value),
            8 => assert_eq!(reader.read_byte()? as u64, value),
            _ => assert_eq!(reader.read_bits(n_bits)?, value),
        }
    }

    // ...and with read_bits only
    let mut reader = BitReader::new(MemByteReader::new(&buffer));
    for &(value, n_bits) in &expected {
        assert_eq!(reader.read_bits(n_bits)?, value);
    }
    Ok(())
}

#[test]
fn test_align_padding() -> Result<()> {
    for w in 0..64 {
        let mut writer = BitWriter::new(MemByteWriterVec::new(Vec::<u8>::new()));
        let value = u64::MAX >> (64 - w.max(1));
        writer.write_bits(if w == 0 { 0 } else { value }, w)?;
        let padding = writer.align()?;
        assert_eq!(padding, (8 - w % 8) % 8);
        assert_eq!(writer.align()?, 0);
        let bytes = writer.into_inner()?.into_inner();
        assert_eq!(bytes.len(), w.div_ceil(8));
        if padding != 0 {
            let last = *bytes.last().unwrap();
            assert_eq!(last & ((1 << padding) - 1), 0);
            assert_eq!(last.count_ones() as usize, 8 - padding);
        }
    }
    Ok(())
}

#[test]
fn test_zero_bits() -> Result<()> {
    let mut buffer: Vec<u8> = vec![];
    let mut writer = BitWriter::new(MemByteWriterVec::new(&mut buffer));
    writer.write_bits(0, 0)?;
    assert_eq!(writer.pending_bits(), 0);
    writer.write_bits(0b101, 3)?;
    writer.write_bits(0, 0)?;
    assert_eq!(writer.pending_bits(), 3);
    assert_eq!(writer.bit_pos()?, 3);
    writer.close()?;
    drop(writer);
    assert_eq!(buffer, vec![0xa0]);

    let mut reader = BitReader::new(MemByteReader::new(&buffer));
    assert_eq!(reader.read_bits(0)?, 0);
    assert_eq!(reader.bit_pos()?, 0);
    assert_eq!(reader.read_bits(3)?, 0b101);
    assert_eq!(reader.read_bits(0)?, 0);
    assert_eq!(reader.pending_bits(), 5);
    Ok(())
}
