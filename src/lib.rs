//! This crate provides the numeric core of an ECMAScript-style engine: the
//! bidirectional conversion between the `Number` type (`f32` or `f64`,
//! depending on which one your embedding picks) and the decimal strings
//! ECMAScript source and `String(Number)`/`Number(String)` coercions use,
//! plus the narrowing conversions to and from 32-bit integers that the
//! bitwise operators and typed arrays rely on (`ToInt32`/`ToUint32`).
//!
//! Getting this right is non-trivial: correctly-rounded decimal parsing and
//! shortest-round-tripping decimal formatting both require arbitrary (or at
//! least much wider than 64-bit) intermediate precision. This crate uses a
//! fixed 96-bit unsigned integer (`BigInt96`, internal) wide enough to carry
//! the worst case for both `f32` and `f64`, rather than pulling in a
//! general-purpose bignum.
//!
//! The functionality of this crate is provided through the `EcmaNumber`
//! trait, implemented for `f32` and `f64`, plus a free-standing
//! `uint32_to_string` for the one operation that isn't keyed on a float
//! width.
//!
//! # Example (string to number)
//!
//! ```
//! use ecma_numconv::EcmaNumber as _;
//!
//! assert_eq!(f64::string_to_number("  \n42\n "), 42.0);
//! assert_eq!(f64::string_to_number("0x1F"), 31.0);
//! assert_eq!(f64::string_to_number("-.5e2"), -50.0);
//! assert!(f64::string_to_number("not a number").is_nan());
//! ```
//!
//! # Example (number to string)
//!
//! ```
//! use ecma_numconv::EcmaNumber as _;
//!
//! let mut buf = [0; f64::MAX_STRING_LEN];
//! assert_eq!(0.1f64.number_to_string(&mut buf), "0.1");
//! assert_eq!(1e21f64.number_to_string(&mut buf), "1e+21");
//! assert_eq!((-0.0f64).number_to_string(&mut buf), "0");
//! ```
//!
//! # Example (integer conversions)
//!
//! ```
//! use ecma_numconv::EcmaNumber as _;
//!
//! assert_eq!(f64::number_to_uint32(4294967297.0), 1);
//! assert_eq!(f64::number_to_uint32(f64::NAN), 0);
//! assert_eq!(f64::uint32_to_number(42), 42.0);
//! ```

#![deny(
    rust_2018_idioms,
    trivial_numeric_casts,
    unreachable_pub,
    unused_must_use,
    unused_qualifications
)]
#![no_std]

#[cfg(test)]
extern crate std;

mod core_num;

#[cfg(test)]
mod tests;

mod sealed {
    pub trait Sealed {}
}

/// Minimum buffer size that has to be passed to `uint32_to_string`.
pub const MAX_UINT32_STRING_LEN: usize = core_num::flt2dec::MAX_UINT32_TO_STRING_LEN;

/// `ecma_uint32_to_string`: formats a `u32` as plain decimal digits,
/// writing into `buf` and returning the populated slice.
///
/// ```
/// let mut buf = [0; ecma_numconv::MAX_UINT32_STRING_LEN];
/// assert_eq!(ecma_numconv::uint32_to_string(0, &mut buf), "0");
/// assert_eq!(ecma_numconv::uint32_to_string(4294967295, &mut buf), "4294967295");
/// ```
pub fn uint32_to_string(value: u32, buf: &mut [u8; MAX_UINT32_STRING_LEN]) -> &str {
    core_num::flt2dec::uint32_to_string(value, buf)
}

/// The six `Number`-related conversions of the ECMAScript abstract
/// operations, implemented for `f32` and `f64`.
///
/// Sealed: this trait only makes sense for IEEE-754 binary floats with a
/// known mantissa width, and the crate doesn't need it implemented by
/// anything else.
pub trait EcmaNumber: sealed::Sealed + Sized + Copy {
    /// Minimum buffer size `number_to_string` needs.
    const MAX_STRING_LEN: usize;

    /// `ToNumber` applied to a string (ECMA-262 9.3.1, modulo the
    /// trimming/whitespace rules being ASCII-only): parses `s`, returning
    /// NaN for anything lexically invalid. Total — there is no error path.
    fn string_to_number(s: &str) -> Self;

    /// `ToString` applied to a Number (ECMA-262 9.8.1): formats `self` with
    /// the shortest decimal representation that round-trips back to the
    /// same value, using positional notation for exponents in `(-6, 21]`
    /// and scientific notation outside that range.
    fn number_to_string<'b>(
        self,
        buf: &'b mut [u8; core_num::flt2dec::MAX_NUMBER_TO_STRING_LEN],
    ) -> &'b str;

    /// `ToUint32` (ECMA-262 9.6): NaN, zero and infinities become `0`;
    /// otherwise the value is truncated toward zero and reduced modulo
    /// 2^32.
    fn number_to_uint32(self) -> u32;

    /// `ToInt32` (ECMA-262 9.5): same reduction as `number_to_uint32`,
    /// reinterpreted as a signed 32-bit two's-complement value.
    fn number_to_int32(self) -> i32;

    /// Widens a `u32` to `Self`, exactly.
    fn uint32_to_number(v: u32) -> Self;

    /// Widens an `i32` to `Self`, exactly.
    fn int32_to_number(v: i32) -> Self;
}

impl sealed::Sealed for f32 {}
impl sealed::Sealed for f64 {}

macro_rules! impl_ecma_number {
    ($ty:ty) => {
        impl EcmaNumber for $ty {
            const MAX_STRING_LEN: usize = core_num::flt2dec::MAX_NUMBER_TO_STRING_LEN;

            fn string_to_number(s: &str) -> Self {
                core_num::dec2flt::string_to_number(s)
            }

            fn number_to_string<'b>(self, buf: &'b mut [u8; Self::MAX_STRING_LEN]) -> &'b str {
                core_num::flt2dec::number_to_string(self, buf)
            }

            fn number_to_uint32(self) -> u32 {
                use core_num::rawfloat::RawFloat as _;
                if self.is_nan() || self.is_infinite() || self.is_zero() {
                    0
                } else {
                    self.trunc_mod_u32()
                }
            }

            fn number_to_int32(self) -> i32 {
                self.number_to_uint32() as i32
            }

            fn uint32_to_number(v: u32) -> Self {
                use core_num::rawfloat::RawFloat as _;
                Self::from_u32(v)
            }

            fn int32_to_number(v: i32) -> Self {
                use core_num::rawfloat::RawFloat as _;
                Self::from_i32(v)
            }
        }
    };
}

impl_ecma_number!(f32);
impl_ecma_number!(f64);
