//! Bridges the bignum-based conversion core to the host's IEEE-754 types.
//!
//! A standalone conversion crate has no surrounding engine to delegate
//! sign/mantissa/exponent splitting and NaN/infinity/zero construction to,
//! so it is implemented here directly against `f32`/`f64` bit patterns,
//! grounded in the standard decomposition every IEEE-754 library of this
//! shape uses (`integer_decode`-style splitting, as used throughout
//! `core::num::dec2flt`/`flt2dec`).

/// Per-type constants and bit-level operations the parser and formatter
/// need. Implemented for `f32` and `f64`; not meant to be implemented by
/// downstream crates, hence `pub(crate)`.
///
/// Carries `Add`/`Mul` as supertraits so callers can accumulate a value
/// digit-by-digit in native float arithmetic (e.g. hex literal parsing)
/// without needing a separate bound at every call site.
pub(crate) trait RawFloat:
    Copy + PartialEq + Sized + core::ops::Add<Output = Self> + core::ops::Mul<Output = Self>
{
    /// Number of explicit fraction bits (23 for `f32`, 52 for `f64`).
    const MANTISSA_BITS: u32;
    /// Number of exponent field bits (8 for `f32`, 11 for `f64`).
    const EXP_BITS: u32;
    /// Exponent bias (127 for `f32`, 1023 for `f64`).
    const EXP_BIAS: i32;
    /// `ECMA_NUMBER_MAX_DIGITS`: cap on accumulated significant decimal
    /// digits (9 for `f32`, 19 for `f64`).
    const MAX_DIGITS: u32;
    /// Width of the native integer the formatter reduces a `BigInt96`
    /// digit buffer down to before extracting decimal digits (32 for
    /// `f32`, 64 for `f64`).
    const DIGITS_NATIVE_BITS: u32;

    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn is_zero(self) -> bool;
    fn is_sign_negative(self) -> bool;

    fn make_nan() -> Self;
    fn make_infinity(sign: bool) -> Self;
    fn make_zero(sign: bool) -> Self;
    fn negate(self) -> Self;

    fn from_u32(v: u32) -> Self;
    fn from_i32(v: i32) -> Self;

    /// Truncates toward zero and reduces modulo 2^32, per ECMA-262 9.5/9.6.
    /// Caller has already excluded NaN/infinite/zero.
    fn trunc_mod_u32(self) -> u32;

    /// `Some(v)` iff `self` is a non-negative integer exactly representable
    /// as a `u32`. Lets the formatter delegate integers straight to
    /// `uint32_to_string` instead of running the shortest-digits algorithm.
    fn exact_u32(self) -> Option<u32>;

    /// Decomposes a finite, non-zero value into `(fraction, binary_exponent,
    /// dot_shift)` such that `value == fraction * 2^(binary_exponent - dot_shift)`,
    /// with `fraction`'s highest set bit at position `dot_shift` (i.e.
    /// `fraction` is the mantissa including its implicit leading one, shifted
    /// so it reads as a plain integer).
    fn fraction_and_exponent(self) -> (u64, i32, i32);

    /// Builds a value from a sign, an unsigned mantissa with its highest set
    /// bit at position `Self::MANTISSA_BITS`, and an unbiased binary exponent
    /// applied to that mantissa's low bit: `value = mantissa * 2^exponent`.
    /// Out-of-range exponents saturate to +-infinity (too large) or +-0 (too
    /// small); in-between values that fall in the subnormal range are
    /// rounded to the nearest representable subnormal.
    fn from_sign_mantissa_exponent(sign: bool, mantissa: u64, exponent: i32) -> Self;
}

fn round_shift_right_u64(mantissa: u64, shift: u32) -> u64 {
    if shift == 0 {
        return mantissa;
    }
    if shift >= 64 {
        return 0;
    }
    let shifted = mantissa >> shift;
    let half = 1u64 << (shift - 1);
    let remainder = mantissa & ((1u64 << shift) - 1);
    if remainder > half || (remainder == half && (shifted & 1) != 0) {
        shifted + 1
    } else {
        shifted
    }
}

macro_rules! impl_raw_float {
    ($ty:ty, $bits_ty:ty, $mantissa_bits:expr, $exp_bits:expr, $exp_bias:expr, $max_digits:expr) => {
        #[allow(trivial_numeric_casts)]
        impl RawFloat for $ty {
            const MANTISSA_BITS: u32 = $mantissa_bits;
            const EXP_BITS: u32 = $exp_bits;
            const EXP_BIAS: i32 = $exp_bias;
            const MAX_DIGITS: u32 = $max_digits;
            const DIGITS_NATIVE_BITS: u32 = core::mem::size_of::<$bits_ty>() as u32 * 8;

            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }

            fn is_infinite(self) -> bool {
                <$ty>::is_infinite(self)
            }

            fn is_zero(self) -> bool {
                self == 0.0
            }

            fn is_sign_negative(self) -> bool {
                <$ty>::is_sign_negative(self)
            }

            fn make_nan() -> Self {
                <$ty>::NAN
            }

            fn make_infinity(sign: bool) -> Self {
                if sign {
                    <$ty>::NEG_INFINITY
                } else {
                    <$ty>::INFINITY
                }
            }

            fn make_zero(sign: bool) -> Self {
                if sign {
                    -0.0
                } else {
                    0.0
                }
            }

            fn negate(self) -> Self {
                -self
            }

            fn from_u32(v: u32) -> Self {
                v as $ty
            }

            fn from_i32(v: i32) -> Self {
                v as $ty
            }

            fn trunc_mod_u32(self) -> u32 {
                // ECMA-262 9.5/9.6: truncate toward zero, then reduce modulo
                // 2^32. `self` is finite and non-zero here.
                let truncated = <$ty>::trunc(self);
                let reduced = truncated.rem_euclid(4294967296.0);
                reduced as u32
            }

            fn exact_u32(self) -> Option<u32> {
                if self < 0.0 || self >= 4294967296.0 {
                    return None;
                }
                let truncated = <$ty>::trunc(self);
                if truncated != self {
                    return None;
                }
                Some(truncated as u32)
            }

            fn fraction_and_exponent(self) -> (u64, i32, i32) {
                debug_assert!(self.is_finite() && self != 0.0);
                let bits: $bits_ty = self.to_bits();
                let exp_mask: $bits_ty = (1 << Self::EXP_BITS) - 1;
                let exp_field = ((bits >> Self::MANTISSA_BITS) & exp_mask) as i32;
                let frac_mask: $bits_ty = (1 << Self::MANTISSA_BITS) - 1;
                let frac_field = u64::from(bits & frac_mask);

                if exp_field == 0 {
                    // Subnormal: no implicit leading bit, raw exponent is
                    // pinned to the smallest normal exponent.
                    (frac_field, 1 - Self::EXP_BIAS, Self::MANTISSA_BITS as i32)
                } else {
                    let fraction = frac_field | (1u64 << Self::MANTISSA_BITS);
                    (
                        fraction,
                        exp_field - Self::EXP_BIAS,
                        Self::MANTISSA_BITS as i32,
                    )
                }
            }

            fn from_sign_mantissa_exponent(sign: bool, mantissa: u64, exponent: i32) -> Self {
                if mantissa == 0 {
                    return Self::make_zero(sign);
                }

                let msb = 63 - mantissa.leading_zeros() as i32;
                let unbiased = exponent + msb;
                let max_exp_field = (1i32 << Self::EXP_BITS) - 1;

                let mut biased = unbiased + Self::EXP_BIAS;
                if biased >= max_exp_field {
                    return Self::make_infinity(sign);
                }

                // Number of bits to drop from `mantissa` so its implicit
                // leading one lands on `MANTISSA_BITS`.
                let mut drop = msb - Self::MANTISSA_BITS as i32;
                if biased <= 0 {
                    // Subnormal: the implicit bit goes away, and we lose
                    // `1 - biased` further bits of precision.
                    drop += 1 - biased;
                    biased = 0;
                }

                if drop >= 64 {
                    return Self::make_zero(sign);
                }

                let frac_with_implicit = if drop <= 0 {
                    mantissa << (-drop)
                } else {
                    round_shift_right_u64(mantissa, drop as u32)
                };

                // Rounding up out of the subnormal range promotes to normal.
                let implicit_bit = 1u64 << Self::MANTISSA_BITS;
                let (biased, frac) = if biased == 0 && frac_with_implicit >= implicit_bit {
                    (1, frac_with_implicit & (implicit_bit - 1))
                } else if frac_with_implicit >> (Self::MANTISSA_BITS + 1) != 0 {
                    // Rounding carried a bit out of the top: renormalize.
                    (biased + 1, (frac_with_implicit >> 1) & (implicit_bit - 1))
                } else {
                    (biased, frac_with_implicit & (implicit_bit - 1))
                };

                if biased >= max_exp_field {
                    return Self::make_infinity(sign);
                }

                let bits: $bits_ty =
                    ((sign as $bits_ty) << (Self::MANTISSA_BITS + Self::EXP_BITS))
                        | ((biased as $bits_ty) << Self::MANTISSA_BITS)
                        | (frac as $bits_ty);
                <$ty>::from_bits(bits)
            }
        }
    };
}

impl_raw_float!(f32, u32, 23, 8, 127, 9);
impl_raw_float!(f64, u64, 52, 11, 1023, 19);
