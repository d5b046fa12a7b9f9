#![no_main]

use cbor_stream::{BigIntConvert, EncOptions};
use libfuzzer_sys::fuzz_target;
use num_bigint::{BigInt, Sign};

fuzz_target!(|data: (bool, &[u8])| {
    let (negative, magnitude) = data;
    let value = BigInt::from_bytes_be(
        if negative { Sign::Minus } else { Sign::Plus },
        magnitude,
    );

    let tagged = EncOptions {
        big_int_convert: BigIntConvert::None,
        ..Default::default()
    }
    .enc_mode()
    .encode_to_vec(&value);
    assert!(tagged[0] == 0xC2 || tagged[0] == 0xC3);

    let shortest = EncOptions::default().enc_mode().encode_to_vec(&value);
    match shortest[0] >> 5 {
        0 | 1 => assert!(shortest.len() <= 9),
        6 => assert_eq!(shortest, tagged),
        _ => panic!("unexpected major type"),
    }
});
