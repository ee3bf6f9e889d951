#![no_main]

use bitio::fuzz::mem_byte_reader::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: FuzzCase| harness(data));
