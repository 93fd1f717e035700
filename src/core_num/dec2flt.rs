//! Decimal-literal-to-`Number` parsing (ECMA-262 9.3.1).
//!
//! Grounded directly in `ecma_zt_string_to_number` from
//! `ecma-helpers-conversion.c`: same lexical scan, same digit-accumulation
//! cap, same `BigInt96`-based decimal-to-binary scaling. The one
//! intentional deviation from the source is the `Infinity` match, which
//! here requires the *entire* trimmed literal to equal `"Infinity"` rather
//! than merely a prefix of it.

use super::bignum96::BigInt96;
use super::rawfloat::RawFloat;

/// Past this magnitude the decimal exponent alone already guarantees
/// overflow (to infinity) or underflow (to zero) for both `f32` and `f64`,
/// so the scaling loop below is cut short instead of iterating a
/// caller-controlled number of times on numerically meaningless input.
const EXPONENT_SATURATION_BOUND: i64 = 2000;

/// `ecma_zt_string_to_number`. Total function: every input maps to some
/// `F`, lexical errors become NaN.
pub(crate) fn string_to_number<F: RawFloat>(input: &str) -> F {
    let bytes = input.as_bytes();

    let mut begin = 0usize;
    let mut end = bytes.len();
    while begin < end && is_ecma_whitespace(bytes[begin]) {
        begin += 1;
    }
    while begin < end && is_ecma_whitespace(bytes[end - 1]) {
        end -= 1;
    }

    if begin >= end {
        return F::make_zero(false);
    }

    let s = &bytes[begin..end];

    if s.len() > 2 && s[0] == b'0' && (s[1] == b'x' || s[1] == b'X') {
        return parse_hex_literal::<F>(&s[2..]);
    }

    let mut i = 0usize;
    let mut sign = false;
    match s[i] {
        b'+' => i += 1,
        b'-' => {
            sign = true;
            i += 1;
        }
        _ => {}
    }

    if i >= s.len() {
        return F::make_nan();
    }

    if &s[i..] == b"Infinity" {
        return F::make_infinity(sign);
    }

    let mut fraction: u64 = 0;
    let mut digits: u32 = 0;
    let mut e: i64 = 0;

    while i < s.len() && s[i].is_ascii_digit() {
        let digit_value = u64::from(s[i] - b'0');
        if digits != 0 || digit_value != 0 {
            if digits < F::MAX_DIGITS {
                fraction = fraction * 10 + digit_value;
                digits += 1;
            } else if e <= 100_000 {
                e += 1;
            }
        }
        i += 1;
    }

    if i < s.len() && s[i] == b'.' {
        i += 1;
        while i < s.len() && s[i].is_ascii_digit() {
            let digit_value = u64::from(s[i] - b'0');
            if digits < F::MAX_DIGITS {
                if digits != 0 || digit_value != 0 {
                    fraction = fraction * 10 + digit_value;
                    digits += 1;
                }
                e -= 1;
            }
            i += 1;
        }
    }

    let mut e_in_lit: i64 = 0;
    let mut e_in_lit_sign = false;
    if i < s.len() && (s[i] == b'e' || s[i] == b'E') {
        i += 1;
        match s.get(i) {
            Some(b'+') => i += 1,
            Some(b'-') => {
                e_in_lit_sign = true;
                i += 1;
            }
            _ => {}
        }

        if i >= s.len() || !s[i].is_ascii_digit() {
            return F::make_nan();
        }

        while i < s.len() && s[i].is_ascii_digit() {
            e_in_lit = e_in_lit.saturating_mul(10).saturating_add(i64::from(s[i] - b'0'));
            i += 1;
        }
    }

    e = if e_in_lit_sign {
        e.saturating_sub(e_in_lit)
    } else {
        e.saturating_add(e_in_lit)
    };

    if i != s.len() {
        return F::make_nan();
    }

    if fraction == 0 {
        return F::make_zero(sign);
    }

    scale_decimal_to_binary::<F>(sign, fraction, e)
}

fn is_ecma_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\n'
}

/// Accumulates hex digits the way the source does (`num = num * 16 +
/// digit_value`, in the float type itself) rather than in a fixed-width
/// integer. A literal with more than 16 significant hex digits is still
/// finite as long as its true magnitude fits the target type — `0x1` followed
/// by enough zeros to represent `2^64` must parse to the exact finite double
/// `18446744073709551616.0`, not infinity; only `from_sign_mantissa_exponent`-
/// style fixed-width accumulation would get that wrong, and it is the
/// built-in rounding of repeated float multiply/add that keeps each step
/// correctly rounded, saturating to infinity only once the true value
/// actually exceeds the type's finite range.
fn parse_hex_literal<F: RawFloat>(digits: &[u8]) -> F {
    let sixteen = F::from_u32(16);
    let mut value = F::make_zero(false);
    for &b in digits {
        let digit_value = match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'a'..=b'f' => 10 + u32::from(b - b'a'),
            b'A'..=b'F' => 10 + u32::from(b - b'A'),
            _ => return F::make_nan(),
        };
        value = value * sixteen + F::from_u32(digit_value);
    }
    value
}

/// Decimal-to-binary scaling: the core of `ecma_zt_string_to_number`.
///
/// Loads `fraction` into a 96-bit window, normalizes, then applies `e`
/// powers of ten via repeated `BigInt96` multiply/divide-by-10 with
/// renormalization after each step, tracking the running binary exponent
/// throughout. See `DESIGN.md` for the derivation of the final `- 1`
/// correction applied before handing the extracted mantissa to
/// `RawFloat::from_sign_mantissa_exponent`: `round_hi_mid_to_u64` discards
/// exactly 32 low bits, which shifts the effective scale of the extracted
/// integer relative to the true value by one more power of two than the
/// running `binary_exponent` alone accounts for.
fn scale_decimal_to_binary<F: RawFloat>(sign: bool, fraction: u64, e: i64) -> F {
    if e > EXPONENT_SATURATION_BOUND {
        return F::make_infinity(sign);
    }
    if e < -EXPONENT_SATURATION_BOUND {
        return F::make_zero(sign);
    }

    let mut binary_exponent: i32 = 1;
    let mut mantissa = BigInt96::new((fraction >> 32) as u32, fraction as u32, 0);

    debug_assert!(mantissa.high_bits_zero(92));
    while mantissa.high_bits_zero(91) {
        mantissa.shl1();
        binary_exponent -= 1;
        debug_assert!(!mantissa.is_zero());
    }

    if e >= 0 {
        let mut remaining = e;
        while remaining > 0 {
            debug_assert!(mantissa.high_bits_zero(92));

            mantissa.mul10();
            remaining -= 1;

            while !mantissa.high_bits_zero(92) {
                mantissa.shr1();
                binary_exponent += 1;
            }
            while mantissa.high_bits_zero(91) {
                mantissa.shl1();
                binary_exponent -= 1;
                debug_assert!(!mantissa.is_zero());
            }
        }
    } else {
        let mut remaining = -e;
        while remaining > 0 {
            while mantissa.high_bits_zero(95) {
                mantissa.shl1();
                binary_exponent -= 1;
                debug_assert!(!mantissa.is_zero());
            }

            mantissa.div10();
            remaining -= 1;
        }

        while !mantissa.high_bits_zero(92) {
            mantissa.shr1();
            binary_exponent += 1;
        }
        while mantissa.high_bits_zero(91) {
            mantissa.shl1();
            binary_exponent -= 1;
            debug_assert!(!mantissa.is_zero());
        }
    }

    debug_assert!(!mantissa.is_zero());
    debug_assert!(mantissa.high_bits_zero(92));

    // Reposition so the mantissa's top set bit lands at `MANTISSA_BITS + 32`:
    // extracting the upper 64 bits below then discards exactly 32 low bits,
    // leaving `MANTISSA_BITS + 1` significant bits.
    let window_top = F::MANTISSA_BITS + 32;
    while !mantissa.high_bits_zero(window_top + 1) {
        mantissa.shr1();
        binary_exponent += 1;
    }
    while mantissa.high_bits_zero(window_top) {
        mantissa.shl1();
        binary_exponent -= 1;
        debug_assert!(!mantissa.is_zero());
    }

    let rounded = mantissa.round_hi_mid_to_u64();
    F::from_sign_mantissa_exponent(sign, rounded, binary_exponent - 1)
}

#[cfg(test)]
mod tests {
    use super::string_to_number;

    #[test]
    fn trims_whitespace_and_parses_integer() {
        let v: f64 = string_to_number("  \n42\n ");
        assert_eq!(v, 42.0);
    }

    #[test]
    fn empty_or_blank_is_positive_zero() {
        let v: f64 = string_to_number("");
        assert_eq!(v, 0.0);
        assert!(!v.is_sign_negative());
        let v: f64 = string_to_number("   ");
        assert_eq!(v, 0.0);
    }

    #[test]
    fn hex_literal() {
        let v: f64 = string_to_number("0x1F");
        assert_eq!(v, 31.0);
        let v: f64 = string_to_number("0X1f");
        assert_eq!(v, 31.0);
    }

    #[test]
    fn negative_hex_is_nan() {
        let v: f64 = string_to_number("-0x1F");
        assert!(v.is_nan());
    }

    #[test]
    fn hex_literal_wider_than_a_u64_stays_finite() {
        // 17 hex digits: the value (2^64) overflows a `u64` accumulator but
        // is nowhere near either float type's finite range.
        let v: f64 = string_to_number("0x10000000000000000");
        assert_eq!(v, 18446744073709551616.0);

        // Hundreds of hex digits: still finite as long as the magnitude is.
        let mut buf = [b'0'; 253];
        buf[1] = b'x';
        buf[2] = b'1';
        let many_zeros = core::str::from_utf8(&buf).unwrap();
        let v: f64 = string_to_number(many_zeros);
        assert!(v.is_finite());

        // Enough hex digits to actually exceed `f64::MAX` saturates to
        // infinity, same as any other out-of-range literal.
        let mut buf = [b'0'; 303];
        buf[1] = b'x';
        buf[2] = b'1';
        let too_many_zeros = core::str::from_utf8(&buf).unwrap();
        let v: f64 = string_to_number(too_many_zeros);
        assert!(v.is_infinite());
    }

    #[test]
    fn signed_fraction_with_exponent() {
        let v: f64 = string_to_number("-.5e2");
        assert_eq!(v, -50.0);
    }

    #[test]
    fn infinity_keyword() {
        let v: f64 = string_to_number("Infinity");
        assert!(v.is_infinite() && !v.is_sign_negative());
        let v: f64 = string_to_number("-Infinity");
        assert!(v.is_infinite() && v.is_sign_negative());
    }

    #[test]
    fn infinity_prefix_is_not_a_match() {
        let v: f64 = string_to_number("Infinitynonsense");
        assert!(v.is_nan());
    }

    #[test]
    fn malformed_exponent_is_nan() {
        let v: f64 = string_to_number("1e+foo");
        assert!(v.is_nan());
    }

    #[test]
    fn trailing_garbage_is_nan() {
        let v: f64 = string_to_number("12abc");
        assert!(v.is_nan());
    }

    #[test]
    fn huge_exponent_saturates_to_infinity() {
        let v: f64 = string_to_number("1e400");
        assert!(v.is_infinite());
    }

    #[test]
    fn huge_negative_exponent_saturates_to_zero() {
        let v: f64 = string_to_number("1e-400");
        assert_eq!(v, 0.0);
    }

    #[test]
    fn negative_zero_sign_is_preserved() {
        let v: f64 = string_to_number("-0");
        assert_eq!(v, 0.0);
        assert!(v.is_sign_negative());
    }

    #[test]
    fn f32_round_trip_small_values() {
        for &s in &["3.5", "0.1", "123.456", "1e10", "1e-10"] {
            let v: f32 = string_to_number(s);
            let expected: f32 = s.parse().unwrap();
            assert!((v - expected).abs() <= expected.abs() * 1e-6 + 1e-30);
        }
    }
}
