/*!
IEEE 754 binary16 values and their bit-level conversion to and from `f32`.

Compaction from `f32` truncates the significand and flushes anything below
the smallest normal half-precision value to a signed zero. Expansion back to
`f32` is exact.
*/

use core::fmt;

/// A half-precision (binary16) floating point value: 1 sign bit, 5 exponent
/// bits and 10 significand bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Float16(u16);

const SIGN_MASK: u16 = 0x8000;
const EXP_MASK: u16 = 0x7C00;
const SIG_MASK: u16 = 0x03FF;

// Difference between the f32 exponent bias (127) and the f16 bias (15)
const REBIAS: i32 = 112;

impl Float16 {
    pub const ZERO: Self = Self(0x0000);
    pub const NEG_ZERO: Self = Self(0x8000);
    pub const INFINITY: Self = Self(0x7C00);
    pub const NEG_INFINITY: Self = Self(0xFC00);
    pub const NAN: Self = Self(0x7E00);
    pub const MAX: Self = Self(0x7BFF);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Compacts an `f32`, truncating the significand to its top 10 bits.
    ///
    /// Values too large for half precision saturate to a signed infinity,
    /// values too small (including all `f32` subnormals) become a signed zero.
    pub const fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let sign = ((bits >> 16) as u16) & SIGN_MASK;
        let exp = ((bits >> 23) & 0xFF) as i32;
        let sig = ((bits >> 13) as u16) & SIG_MASK;

        match exp {
            0 => Self(sign),
            0xFF => Self(sign | EXP_MASK | sig),
            _ => {
                let exp = exp - REBIAS;
                if exp >= 0x1F {
                    Self(sign | EXP_MASK)
                } else if exp <= 0 {
                    Self(sign)
                } else {
                    Self(sign | ((exp as u16) << 10) | sig)
                }
            }
        }
    }

    /// Compacts `value` only if expanding the result reproduces the exact
    /// bit pattern of `value`.
    pub const fn from_f32_exact(value: f32) -> Option<Self> {
        let h = Self::from_f32(value);
        if h.to_f32().to_bits() == value.to_bits() {
            Some(h)
        } else {
            None
        }
    }

    pub const fn to_f32(self) -> f32 {
        let bits = self.0 as u32;
        let sign = (bits & SIGN_MASK as u32) << 16;
        let sig = (bits & SIG_MASK as u32) << 13;
        let exp = match (bits & EXP_MASK as u32) >> 10 {
            0 => 0,
            0x1F => 0xFF,
            exp => exp + REBIAS as u32,
        };
        f32::from_bits(sign | (exp << 23) | sig)
    }

    pub const fn is_nan(self) -> bool {
        self.0 & EXP_MASK == EXP_MASK && self.0 & SIG_MASK != 0
    }

    pub const fn is_infinite(self) -> bool {
        self.0 & !SIGN_MASK == EXP_MASK
    }

    pub const fn is_sign_negative(self) -> bool {
        self.0 & SIGN_MASK != 0
    }
}

impl From<Float16> for f32 {
    fn from(value: Float16) -> Self {
        value.to_f32()
    }
}

impl From<Float16> for f64 {
    fn from(value: Float16) -> Self {
        value.to_f32() as f64
    }
}

impl From<half::f16> for Float16 {
    fn from(value: half::f16) -> Self {
        Self(value.to_bits())
    }
}

impl From<Float16> for half::f16 {
    fn from(value: Float16) -> Self {
        half::f16::from_bits(value.0)
    }
}

impl fmt::Display for Float16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl fmt::Debug for Float16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Float16({} = {:#06x})", self.to_f32(), self.0)
    }
}
