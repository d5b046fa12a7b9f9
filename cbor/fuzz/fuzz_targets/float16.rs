#![no_main]

use cbor_stream::Float16;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|bits: u32| {
    let h = Float16::from_f32(f32::from_bits(bits));
    assert_eq!(Float16::from_f32(h.to_f32()), h);
});
