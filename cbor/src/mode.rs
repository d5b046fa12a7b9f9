/*!
Encoding options and the immutable [`EncMode`] built from them.

An `EncMode` is constructed once and shared by reference between any number
of encoders. It is never mutated after construction.
*/

use super::*;
use core::{fmt, str::FromStr};
use thiserror::Error;

/// Errors raised when option values cannot be recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid BigIntConvert option {0}")]
    InvalidBigIntConvert(u8),

    #[error("Unrecognised BigIntConvert option '{0}'")]
    UnknownBigIntConvert(String),

    #[error("Invalid ShortestFloat option {0}")]
    InvalidShortestFloat(u8),

    #[error("Unrecognised ShortestFloat option '{0}'")]
    UnknownShortestFloat(String),
}

/// How arbitrary-precision integers are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "&'static str", try_from = "String"))]
#[repr(u8)]
pub enum BigIntConvert {
    /// Values whose CBOR argument fits in 64 bits use a plain integer head,
    /// larger values fall back to a tag 2/3 bignum.
    #[default]
    Shortest = 0,

    /// Always a tag 2/3 bignum, whatever the magnitude.
    None = 1,
}

/// Whether floating point values are compacted to a smaller width.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "&'static str", try_from = "String"))]
#[repr(u8)]
pub enum ShortestFloat {
    /// `f32` and `f64` are written at their own width.
    #[default]
    None = 0,

    /// `f32` and `f64` are written as the narrowest of binary16, binary32 or
    /// binary64 that expands back to the identical value.
    Float16 = 1,
}

macro_rules! impl_option_conversions {
    ($(($ty:ty, $invalid:ident, $unknown:ident, [$(($variant:ident, $name:literal)),*])),*) => {
        $(
            impl $ty {
                pub const fn as_str(&self) -> &'static str {
                    match self {
                        $(Self::$variant => $name,)*
                    }
                }
            }

            impl TryFrom<u8> for $ty {
                type Error = Error;

                fn try_from(value: u8) -> Result<Self, Self::Error> {
                    $(
                        if value == Self::$variant as u8 {
                            return Ok(Self::$variant);
                        }
                    )*
                    Err(Error::$invalid(value))
                }
            }

            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $(
                        if s.eq_ignore_ascii_case($name) {
                            return Ok(Self::$variant);
                        }
                    )*
                    Err(Error::$unknown(s.into()))
                }
            }

            impl TryFrom<String> for $ty {
                type Error = Error;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for &'static str {
                fn from(value: $ty) -> Self {
                    value.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_option_conversions!(
    (
        BigIntConvert,
        InvalidBigIntConvert,
        UnknownBigIntConvert,
        [(Shortest, "shortest"), (None, "none")]
    ),
    (
        ShortestFloat,
        InvalidShortestFloat,
        UnknownShortestFloat,
        [(None, "none"), (Float16, "float16")]
    )
);

/// User-facing encoding options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncOptions {
    pub big_int_convert: BigIntConvert,
    pub shortest_float: ShortestFloat,
}

impl EncOptions {
    pub fn enc_mode(&self) -> EncMode {
        EncMode::new(self)
    }
}

/// A validated, immutable encoding configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncMode {
    options: EncOptions,
}

impl EncMode {
    pub fn new(options: &EncOptions) -> Self {
        tracing::debug!(
            big_int_convert = %options.big_int_convert,
            shortest_float = %options.shortest_float,
            "Created CBOR encoding mode"
        );
        Self { options: *options }
    }

    pub fn options(&self) -> EncOptions {
        self.options
    }

    pub fn big_int_convert(&self) -> BigIntConvert {
        self.options.big_int_convert
    }

    pub fn shortest_float(&self) -> ShortestFloat {
        self.options.shortest_float
    }

    /// Returns an in-memory encoder using this mode.
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self)
    }

    /// Returns an encoder that buffers output until flushed to `sink`.
    pub fn new_encoder<W>(&self, sink: W) -> StreamEncoder<'_, W>
    where
        W: io::Write,
    {
        StreamEncoder::new(self, sink)
    }

    pub fn encode_to_vec<T>(&self, value: &T) -> Vec<u8>
    where
        T: ToCbor + ?Sized,
    {
        let mut e = self.encoder();
        e.encode(value);
        e.build()
    }
}

impl From<EncOptions> for EncMode {
    fn from(options: EncOptions) -> Self {
        Self::new(&options)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn defaults() {
        let mode = EncMode::default();
        assert_eq!(mode.big_int_convert(), BigIntConvert::Shortest);
        assert_eq!(mode.shortest_float(), ShortestFloat::None);
        assert_eq!(EncOptions::default().enc_mode(), mode);
    }

    #[test]
    fn numeric_options() {
        assert_eq!(BigIntConvert::try_from(0u8), Ok(BigIntConvert::Shortest));
        assert_eq!(BigIntConvert::try_from(1u8), Ok(BigIntConvert::None));
        assert_eq!(
            BigIntConvert::try_from(2u8),
            Err(Error::InvalidBigIntConvert(2))
        );
        assert_eq!(ShortestFloat::try_from(1u8), Ok(ShortestFloat::Float16));
        assert_eq!(
            ShortestFloat::try_from(7u8),
            Err(Error::InvalidShortestFloat(7))
        );
    }

    #[test]
    fn textual_options() {
        assert_eq!("none".parse::<BigIntConvert>(), Ok(BigIntConvert::None));
        assert_eq!(
            "Shortest".parse::<BigIntConvert>(),
            Ok(BigIntConvert::Shortest)
        );
        assert_eq!(
            "smallest".parse::<BigIntConvert>(),
            Err(Error::UnknownBigIntConvert("smallest".into()))
        );
        assert_eq!(
            "float16".parse::<ShortestFloat>(),
            Ok(ShortestFloat::Float16)
        );
        assert!("float8".parse::<ShortestFloat>().is_err());
    }

    #[test]
    fn modes_are_independent() {
        let shortest = EncOptions::default().enc_mode();
        let none = EncOptions {
            big_int_convert: BigIntConvert::None,
            ..Default::default()
        }
        .enc_mode();

        // A failed parse has no effect on modes already built
        assert!("bogus".parse::<BigIntConvert>().is_err());
        assert_eq!(shortest.big_int_convert(), BigIntConvert::Shortest);
        assert_eq!(none.big_int_convert(), BigIntConvert::None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_options() {
        let options: EncOptions =
            serde_json::from_str(r#"{ "big_int_convert": "none" }"#).unwrap();
        assert_eq!(options.big_int_convert, BigIntConvert::None);
        assert_eq!(options.shortest_float, ShortestFloat::None);

        let options: EncOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EncOptions::default());

        let err = serde_json::from_str::<EncOptions>(r#"{ "shortest_float": "float8" }"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Unrecognised ShortestFloat option 'float8'"));

        assert_eq!(
            serde_json::to_string(&EncOptions {
                big_int_convert: BigIntConvert::None,
                shortest_float: ShortestFloat::Float16,
            })
            .unwrap(),
            r#"{"big_int_convert":"none","shortest_float":"float16"}"#
        );
    }
}
