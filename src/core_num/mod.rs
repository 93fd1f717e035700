//! Internal numeric building blocks: the fixed-width bignum, the bridge to
//! `f32`/`f64` bit patterns, and the parser/formatter built on top of them.

pub(crate) mod bignum96;
pub(crate) mod dec2flt;
pub(crate) mod flt2dec;
pub(crate) mod rawfloat;
