use binrw::binrw;
use half::f16;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Length-prefixed text: a 4-byte big-endian length followed by that many raw
/// bytes, no terminator. The formats using it are ASCII-only, so writing
/// non-ASCII text is rejected rather than silently re-encoded.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PascalString {
    #[br(temp, assert(len >= 0, "negative string length {}", len))]
    #[bw(try_calc = i32::try_from(text.len()))]
    len: i32,

    #[br(count = len, try_map = String::from_utf8)]
    #[bw(try_map = |text: &String| -> Result<Vec<u8>, FormatError> {
        if text.is_ascii() {
            Ok(text.clone().into_bytes())
        } else {
            Err(FormatError::Encoding { field: "pascal string", text: text.clone() })
        }
    })]
    pub text: String,
}

impl PascalString {
    pub fn new(text: impl Into<String>) -> Self {
        PascalString { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for PascalString {
    fn from(text: &str) -> Self {
        PascalString::new(text)
    }
}

/// Single-byte boolean. Nonzero decodes as true; encode always emits 0 or 1.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bool8(
    #[br(map = |raw: u8| raw != 0)]
    #[bw(map = |&flag: &bool| flag as u8)]
    pub bool,
);

impl From<bool> for Bool8 {
    fn from(flag: bool) -> Self {
        Bool8(flag)
    }
}

/// Decode an IEEE-754 binary16 bit pattern to f32. Lossless for every
/// representable half value.
pub fn half_bits_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Encode an f32 as IEEE-754 binary16 bits, round-to-nearest. Values outside
/// the half range saturate to ±infinity.
pub fn f32_to_half_bits(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}
