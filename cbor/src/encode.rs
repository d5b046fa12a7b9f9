use super::*;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

/// Types that know how to write themselves as a single CBOR item.
///
/// This is the seam for the value-marshaling layer: anything the encoder does
/// not handle natively implements `ToCbor` in terms of the head primitives
/// and the natively supported kinds.
pub trait ToCbor {
    fn to_cbor(&self, encoder: &mut Encoder);
}

/// The closed set of kinds the encoder writes natively.
///
/// Anything else is reached through [`Value::Marshal`].
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Unsigned(u64),
    Integer(i64),
    BigInt(&'a BigInt),
    Bytes(&'a [u8]),
    Text(&'a str),
    Half(Float16),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Null,
    Undefined,
    Marshal(&'a dyn ToCbor),
}

/// An in-memory CBOR encoder bound to an [`EncMode`].
///
/// Heads are written in shortest form. No attempt is made to check that the
/// number of items following an array, map or tag head matches its argument.
pub struct Encoder<'m> {
    mode: &'m EncMode,
    data: Vec<u8>,
}

impl<'m> Encoder<'m> {
    pub fn new(mode: &'m EncMode) -> Self {
        Self {
            mode,
            data: Vec::new(),
        }
    }

    pub fn mode(&self) -> &'m EncMode {
        self.mode
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }

    pub fn offset(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear()
    }

    fn emit_uint_minor(&mut self, major: u8, val: u64) {
        if val < 24 {
            self.data.push((major << 5) | (val as u8))
        } else if val <= u8::MAX as u64 {
            self.data.push((major << 5) | 24u8);
            self.data.push(val as u8)
        } else if val <= u16::MAX as u64 {
            self.data.push((major << 5) | 25u8);
            self.data.extend((val as u16).to_be_bytes())
        } else if val <= u32::MAX as u64 {
            self.data.push((major << 5) | 26u8);
            self.data.extend((val as u32).to_be_bytes())
        } else {
            self.data.push((major << 5) | 27u8);
            self.data.extend(val.to_be_bytes())
        }
    }

    fn emit_simple(&mut self, minor: u8) {
        self.data.push((7 << 5) | minor)
    }

    fn emit_string(&mut self, major: u8, bytes: &[u8]) {
        self.emit_uint_minor(major, bytes.len() as u64);
        self.data.extend_from_slice(bytes)
    }

    /// Writes a major type 4 head declaring `count` items.
    pub fn encode_array_head(&mut self, count: u64) {
        self.emit_uint_minor(4, count)
    }

    /// Writes a major type 5 head declaring `count` key/value pairs.
    pub fn encode_map_head(&mut self, count: u64) {
        self.emit_uint_minor(5, count)
    }

    /// Writes a major type 6 head. Exactly one item must follow.
    pub fn encode_tag_head(&mut self, tag: u64) {
        self.emit_uint_minor(6, tag)
    }

    /// Appends pre-encoded CBOR verbatim.
    pub fn encode_raw_slice(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data)
    }

    pub fn encode<T>(&mut self, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    pub fn encode_tagged<T>(&mut self, tag: u64, value: &T)
    where
        T: ToCbor + ?Sized,
    {
        self.encode_tag_head(tag);
        self.encode(value)
    }

    fn emit_i64(&mut self, val: i64) {
        if val >= 0 {
            self.emit_uint_minor(0, val as u64)
        } else {
            // -1 - val, without overflowing at i64::MIN
            self.emit_uint_minor(1, !(val as u64))
        }
    }

    // `arg` is the CBOR argument: n for non-negative values, -1 - n for negative ones
    fn emit_bignum(&mut self, major: u8, arg: &BigUint) {
        if self.mode.big_int_convert() == BigIntConvert::Shortest {
            if let Some(val) = arg.to_u64() {
                return self.emit_uint_minor(major, val);
            }
        }

        self.encode_tag_head(2 + major as u64);
        if arg.is_zero() {
            self.emit_string(2, &[])
        } else {
            self.emit_string(2, &arg.to_bytes_be())
        }
    }

    fn emit_f16(&mut self, value: Float16) {
        self.emit_simple(25);
        self.data.extend(value.to_be_bytes())
    }

    fn emit_f32(&mut self, value: f32) {
        if self.mode.shortest_float() == ShortestFloat::Float16 {
            if let Some(h) = Float16::from_f32_exact(value) {
                return self.emit_f16(h);
            }
        }
        self.emit_simple(26);
        self.data.extend(value.to_be_bytes())
    }

    fn emit_f64(&mut self, value: f64) {
        if self.mode.shortest_float() == ShortestFloat::Float16 {
            let f = value as f32;
            if (f as f64).to_bits() == value.to_bits() {
                return self.emit_f32(f);
            }
        }
        self.emit_simple(27);
        self.data.extend(value.to_be_bytes())
    }
}

impl ToCbor for Value<'_> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match *self {
            Value::Unsigned(val) => encoder.emit_uint_minor(0, val),
            Value::Integer(val) => encoder.emit_i64(val),
            Value::BigInt(val) => val.to_cbor(encoder),
            Value::Bytes(val) => encoder.emit_string(2, val),
            Value::Text(val) => encoder.emit_string(3, val.as_bytes()),
            Value::Half(val) => encoder.emit_f16(val),
            Value::Float32(val) => encoder.emit_f32(val),
            Value::Float64(val) => encoder.emit_f64(val),
            Value::Bool(val) => val.to_cbor(encoder),
            Value::Null => encoder.emit_simple(22),
            Value::Undefined => encoder.emit_simple(23),
            Value::Marshal(val) => val.to_cbor(encoder),
        }
    }
}

impl<T> ToCbor for &T
where
    T: ToCbor + ?Sized,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        (**self).to_cbor(encoder)
    }
}

macro_rules! impl_uint_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    encoder.emit_uint_minor(0, *self as u64);
                }
            }
        )*
    };
}

impl_uint_to_cbor!(u8, u16, u32, u64, usize);

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, encoder: &mut Encoder) {
                    encoder.emit_i64(*self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, isize);

impl ToCbor for BigUint {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_bignum(0, self)
    }
}

impl ToCbor for BigInt {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self.sign() {
            Sign::Minus => encoder.emit_bignum(1, &(self.magnitude().clone() - 1u32)),
            _ => encoder.emit_bignum(0, self.magnitude()),
        }
    }
}

impl ToCbor for Float16 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_f16(*self)
    }
}

impl ToCbor for half::f16 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_f16((*self).into())
    }
}

impl ToCbor for f32 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_f32(*self)
    }
}

impl ToCbor for f64 {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_f64(*self)
    }
}

impl ToCbor for bool {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_simple(if *self { 21 } else { 20 })
    }
}

impl ToCbor for str {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_string(3, self.as_bytes())
    }
}

impl ToCbor for String {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_str().to_cbor(encoder)
    }
}

impl ToCbor for [u8] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_string(2, self)
    }
}

impl ToCbor for Vec<u8> {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<const N: usize> ToCbor for [u8; N] {
    fn to_cbor(&self, encoder: &mut Encoder) {
        self.as_slice().to_cbor(encoder)
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => encoder.encode(value),
            None => encoder.emit_simple(22),
        }
    }
}
