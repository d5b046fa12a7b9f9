#![cfg(test)]

use cbor_stream::Float16;
use std::io::Read;

#[test]
fn test_all() {
    match std::fs::read_dir("./corpus/float16") {
        Err(e) => {
            eprintln!(
                "Failed to open dir: {e}, curr dir: {}",
                std::env::current_dir().unwrap().to_string_lossy()
            );
        }
        Ok(dir) => {
            for entry in dir.flatten() {
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let Ok(mut file) = std::fs::File::open(&path) else {
                    continue;
                };
                let mut buffer = [0u8; 4];
                if file.read_exact(&mut buffer).is_ok() {
                    let h = Float16::from_f32(f32::from_bits(u32::from_ne_bytes(buffer)));
                    assert_eq!(Float16::from_f32(h.to_f32()), h);
                }
            }
        }
    }
}
