use crate::EcmaNumber;

// `EcmaNumber::MAX_STRING_LEN` is a per-type associated const, so the
// scenario tables below are written per concrete type rather than through a
// shared helper generic over `F: EcmaNumber` (which can't size a stack
// buffer from an associated const without const generics on the trait).
fn fmt64(v: f64) -> std::string::String {
    let mut buf = [0u8; f64::MAX_STRING_LEN];
    v.number_to_string(&mut buf).into()
}

fn fmt32(v: f32) -> std::string::String {
    let mut buf = [0u8; f32::MAX_STRING_LEN];
    v.number_to_string(&mut buf).into()
}

#[test]
fn string_to_number_scenarios() {
    assert_eq!(f64::string_to_number("  \n42\n "), 42.0);
    assert_eq!(f64::string_to_number("0x1F"), 31.0);
    assert_eq!(f64::string_to_number("0X1f"), 31.0);
    assert_eq!(f64::string_to_number("-.5e2"), -50.0);
    assert!(f64::string_to_number("Infinity").is_infinite());
    assert!(!f64::string_to_number("Infinity").is_sign_negative());
    assert!(f64::string_to_number("-Infinity").is_sign_negative());
    assert!(f64::string_to_number("1e+foo").is_nan());
    assert!(f64::string_to_number("Infinitynonsense").is_nan());
    assert_eq!(f64::string_to_number(""), 0.0);
    assert_eq!(f64::string_to_number("   "), 0.0);
    assert!(f64::string_to_number("-0x1").is_nan());
}

#[test]
fn number_to_string_scenarios() {
    assert_eq!(fmt64(0.1), "0.1");
    assert_eq!(fmt64(1e21), "1e+21");
    assert_eq!(fmt64(-0.0), "0");
    assert_eq!(fmt64(1.5e-7), "1.5e-7");
    assert_eq!(fmt64(0.0), "0");
    assert_eq!(fmt64(f64::NAN), "NaN");
    assert_eq!(fmt64(f64::INFINITY), "Infinity");
    assert_eq!(fmt64(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(fmt64(100.0), "100");
    assert_eq!(fmt64(-100.0), "-100");
}

#[test]
fn number_to_uint32_scenarios() {
    assert_eq!(f64::number_to_uint32(f64::NAN), 0);
    assert_eq!(f64::number_to_uint32(0.0), 0);
    assert_eq!(f64::number_to_uint32(-0.0), 0);
    assert_eq!(f64::number_to_uint32(f64::INFINITY), 0);
    assert_eq!(f64::number_to_uint32(4294967297.0), 1);
    assert_eq!(f64::number_to_uint32(42.0), 42);
    assert_eq!(f64::number_to_uint32(-1.0), 4294967295);
}

#[test]
fn number_to_int32_scenarios() {
    assert_eq!(f64::number_to_int32(f64::NAN), 0);
    assert_eq!(f64::number_to_int32(4294967296.0), 0);
    assert_eq!(f64::number_to_int32(4294967297.0), 1);
    assert_eq!(f64::number_to_int32(-1.0), -1);
    assert_eq!(f64::number_to_int32(2147483648.0), -2147483648);
}

#[test]
fn integer_widening_is_exact() {
    assert_eq!(f64::uint32_to_number(u32::MAX), 4294967295.0);
    assert_eq!(f64::int32_to_number(i32::MIN), -2147483648.0);
    assert_eq!(f32::uint32_to_number(1000), 1000.0);
}

#[test]
fn string_to_number_round_trips_through_number_to_string() {
    for &s in &[
        "0", "1", "-1", "0.5", "3.14159", "1e100", "1e-100", "123456789.123456",
        "2.2250738585072014e-308", "1.7976931348623157e308",
    ] {
        let v = f64::string_to_number(s);
        let formatted = fmt64(v);
        let reparsed = f64::string_to_number(&formatted);
        assert_eq!(v, reparsed, "round-trip failed for {:?} -> {:?}", s, formatted);
    }
}

#[test]
fn f32_string_round_trip() {
    for &s in &["0.1", "3.5", "1e30", "1e-30", "123.456"] {
        let v = f32::string_to_number(s);
        let formatted = fmt32(v);
        let reparsed = f32::string_to_number(&formatted);
        assert_eq!(v, reparsed, "round-trip failed for {:?} -> {:?}", s, formatted);
    }
}
