#![no_std]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

use alloc::{string::String, vec::Vec};

pub mod encode;
pub mod float16;
pub mod io;
pub mod mode;
pub mod stream;

pub use encode::{Encoder, ToCbor, Value};
pub use float16::Float16;
pub use mode::{BigIntConvert, EncMode, EncOptions, ShortestFloat};
pub use stream::StreamEncoder;
