/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "fuzz")]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Replay the fuzz harnesses on deterministic pseudorandom inputs.
macro_rules! impl_fuzz_repr {
    ($func_name:ident, $fuzz_name:ident) => {
        #[test]
        fn $func_name() -> Result<(), arbitrary::Error> {
            use arbitrary::Arbitrary;
            use bitio::fuzz::$fuzz_name::*;
            let mut r = SmallRng::seed_from_u64(0);
            for _ in 0..200 {
                let mut bytes = vec![0_u8; r.random_range(0..4096)];
                r.fill(&mut bytes[..]);
                let mut unstructured = arbitrary::Unstructured::new(&bytes);
                let data = FuzzCase::arbitrary(&mut unstructured)?;
                harness(data);
            }
            Ok(())
        }
    };
}

impl_fuzz_repr!(test_rep_fuzz_bits, bits);
impl_fuzz_repr!(test_rep_fuzz_mem_byte_reader, mem_byte_reader);
