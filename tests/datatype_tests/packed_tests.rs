//! Packed Decimal Tests
//!
//! Tests verify:
//! - Exact byte layout for odd and even digit counts
//! - Sign nibble handling on encode and decode
//! - Length/range errors (no implicit rounding)
//! - Malformed nibble detection and permissive decoding
//! - Approximate f64 paths

use hostcodec::{
    CodecError, Config, DataType, Decimal, ErrorCategory, NibbleHalf, PackedDecimal, Value,
};
use proptest::prelude::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn encode(codec: &PackedDecimal, s: &str) -> Vec<u8> {
    let mut buf = vec![0u8; codec.encoded_len()];
    codec.encode_decimal(&dec(s), &mut buf, 0).unwrap();
    buf
}

// =============================================================================
// Schema Tests
// =============================================================================

#[test]
fn test_byte_length_from_digits() {
    assert_eq!(PackedDecimal::new(1, 0).unwrap().byte_length().unwrap(), 1);
    assert_eq!(PackedDecimal::new(4, 0).unwrap().byte_length().unwrap(), 3);
    assert_eq!(PackedDecimal::new(5, 2).unwrap().byte_length().unwrap(), 3);
    assert_eq!(PackedDecimal::new(63, 10).unwrap().byte_length().unwrap(), 32);
}

#[test]
fn test_scale_above_digits_rejected() {
    let err = PackedDecimal::new(3, 4).unwrap_err();
    assert!(matches!(err, CodecError::RangeNotValid { parameter: "scale", .. }));
    assert_eq!(err.category(), ErrorCategory::Schema);
}

#[test]
fn test_digit_count_limits() {
    assert!(matches!(
        PackedDecimal::new(0, 0),
        Err(CodecError::RangeNotValid { parameter: "digits", .. })
    ));
    assert!(matches!(
        PackedDecimal::new(64, 0),
        Err(CodecError::RangeNotValid { parameter: "digits", .. })
    ));
    assert!(PackedDecimal::new(63, 63).is_ok());
}

// =============================================================================
// Encode Layout Tests
// =============================================================================

#[test]
fn test_encode_negative_odd_digits() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    assert_eq!(encode(&codec, "-123.45"), vec![0x12, 0x34, 0x5D]);
}

#[test]
fn test_encode_positive_uses_f_sign() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    assert_eq!(encode(&codec, "123.45"), vec![0x12, 0x34, 0x5F]);
}

#[test]
fn test_encode_zero() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    assert_eq!(encode(&codec, "0"), vec![0x00, 0x00, 0x0F]);
    assert_eq!(encode(&codec, "-0.00"), vec![0x00, 0x00, 0x0F]);
}

#[test]
fn test_encode_even_digits_pads_leading_nibble() {
    let codec = PackedDecimal::new(4, 0).unwrap();
    assert_eq!(encode(&codec, "1234"), vec![0x01, 0x23, 0x4F]);
    assert_eq!(encode(&codec, "5"), vec![0x00, 0x00, 0x5F]);
    assert_eq!(encode(&codec, "-12"), vec![0x00, 0x01, 0x2D]);
}

#[test]
fn test_encode_lower_scale_value_is_shifted() {
    let codec = PackedDecimal::new(7, 3).unwrap();
    // 12.5 -> 12500 at scale 3
    assert_eq!(encode(&codec, "12.5"), vec![0x00, 0x12, 0x50, 0x0F]);
}

#[test]
fn test_encode_at_offset() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let mut buf = vec![0xEE; 5];
    let written = codec.encode_decimal(&dec("12.3"), &mut buf, 2).unwrap();
    assert_eq!(written, 2);
    assert_eq!(buf, vec![0xEE, 0xEE, 0x12, 0x3F, 0xEE]);
}

#[test]
fn test_encode_value_from_integer() {
    let codec = PackedDecimal::new(3, 0).unwrap();
    let bytes = codec.to_bytes(&Value::Signed(-7)).unwrap();
    assert_eq!(&bytes[..], &[0x00, 0x7D]);
}

// =============================================================================
// Encode Error Tests
// =============================================================================

#[test]
fn test_encode_scale_too_large_is_not_rounded() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let mut buf = [0u8; 3];
    let err = codec.encode_decimal(&dec("1.234"), &mut buf, 0).unwrap_err();
    assert!(matches!(err, CodecError::LengthNotValid { .. }));
    assert_eq!(buf, [0, 0, 0]);
}

#[test]
fn test_encode_too_many_digits() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let mut buf = [0u8; 3];
    let err = codec.encode_decimal(&dec("1234.5"), &mut buf, 0).unwrap_err();
    assert!(matches!(err, CodecError::LengthNotValid { .. }));
    assert_eq!(err.category(), ErrorCategory::Range);
}

#[test]
fn test_encode_buffer_too_small() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let mut buf = [0u8; 4];
    let err = codec.encode_decimal(&dec("1"), &mut buf, 2).unwrap_err();
    assert_eq!(
        err,
        CodecError::IndexOutOfRange {
            offset: 2,
            needed: 3,
            available: 4
        }
    );
}

#[test]
fn test_encode_rejects_bytes_value() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let err = codec.to_bytes(&Value::Bytes(vec![1])).unwrap_err();
    assert!(matches!(err, CodecError::TypeMismatch { .. }));
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_example() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let value = codec.decode(&[0x12, 0x34, 0x5D], 0).unwrap();
    assert_eq!(value, Value::Decimal(dec("-123.45")));
    assert_eq!(value.as_decimal().unwrap().to_string(), "-123.45");
}

#[test]
fn test_decode_keeps_schema_scale() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let decoded = codec.decode_decimal(&[0x00, 0x10, 0x0F], 0).unwrap();
    assert_eq!(decoded.scale(), 2);
    assert_eq!(decoded.to_string(), "1.00");
}

#[test]
fn test_decode_alternate_sign_nibbles() {
    let codec = PackedDecimal::new(1, 0).unwrap();
    for sign in [0x0A, 0x0C, 0x0E, 0x0F] {
        let d = codec.decode_decimal(&[0x70 | sign], 0).unwrap();
        assert_eq!(d, dec("7"), "sign 0x{:X}", sign);
    }
    for sign in [0x0B, 0x0D] {
        let d = codec.decode_decimal(&[0x70 | sign], 0).unwrap();
        assert_eq!(d, dec("-7"), "sign 0x{:X}", sign);
    }
}

#[test]
fn test_decode_invalid_sign_nibble() {
    let codec = PackedDecimal::new(3, 0).unwrap();
    let buf = [0xAA, 0x01, 0x23];
    let err = codec.decode(&buf, 1).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidNibble {
            half: NibbleHalf::Low,
            offset: 2,
            byte: 0x23
        }
    );
    assert_eq!(err.category(), ErrorCategory::Decode);
}

#[test]
fn test_decode_invalid_digit_nibbles() {
    let codec = PackedDecimal::new(5, 0).unwrap();

    let err = codec.decode(&[0x1A, 0x23, 0x4F], 0).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidNibble {
            half: NibbleHalf::Low,
            offset: 0,
            byte: 0x1A
        }
    );

    let err = codec.decode(&[0x12, 0xB3, 0x4F], 0).unwrap_err();
    assert_eq!(
        err,
        CodecError::InvalidNibble {
            half: NibbleHalf::High,
            offset: 1,
            byte: 0xB3
        }
    );
}

#[test]
fn test_decode_buffer_too_small() {
    let codec = PackedDecimal::new(5, 0).unwrap();
    let err = codec.decode(&[0x12, 0x3F], 0).unwrap_err();
    assert!(matches!(err, CodecError::IndexOutOfRange { .. }));
}

#[test]
fn test_permissive_decode_returns_null() {
    let codec = PackedDecimal::with_config(3, 0, &Config::permissive()).unwrap();
    assert_eq!(codec.decode(&[0x12, 0x34], 0).unwrap(), Value::Null);
    // valid data still decodes
    assert_eq!(codec.decode(&[0x12, 0x3D], 0).unwrap(), Value::Decimal(dec("-123")));
}

#[test]
fn test_permissive_decode_keeps_bounds_errors() {
    let codec = PackedDecimal::with_config(3, 0, &Config::permissive()).unwrap();
    let err = codec.decode(&[0x12], 0).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Bounds);
}

// =============================================================================
// Double Mode Tests
// =============================================================================

#[test]
fn test_double_mode_decode() {
    let codec = PackedDecimal::with_config(5, 2, &Config::double()).unwrap();
    let value = codec.decode(&[0x12, 0x34, 0x5D], 0).unwrap();
    let v = value.as_f64().unwrap();
    assert!((v + 123.45).abs() < 1e-9);
    assert_eq!(codec.default_value().unwrap(), Value::Double(0.0));
}

#[test]
fn test_encode_f64_layout_matches_exact() {
    let codec = PackedDecimal::new(5, 2).unwrap();
    let mut buf = [0u8; 3];
    codec.encode_f64(-123.45, &mut buf, 0).unwrap();
    assert_eq!(buf, [0x12, 0x34, 0x5D]);

    codec.encode_f64(0.5, &mut buf, 0).unwrap();
    assert_eq!(buf, [0x00, 0x05, 0x0F]);
}

#[test]
fn test_encode_f64_even_digits() {
    let codec = PackedDecimal::new(6, 2).unwrap();
    let mut buf = [0u8; 4];
    codec.encode_f64(1234.56, &mut buf, 0).unwrap();
    assert_eq!(buf, [0x01, 0x23, 0x45, 0x6F]);
}

#[test]
fn test_encode_f64_rounds_fraction() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let mut buf = [0u8; 2];
    codec.encode_f64(9.96, &mut buf, 0).unwrap();
    // 9.96 rounds to 10.0
    assert_eq!(buf, [0x10, 0x0F]);
}

#[test]
fn test_encode_f64_negative_rounding_to_zero_is_positive() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let mut buf = [0u8; 2];
    codec.encode_f64(-0.01, &mut buf, 0).unwrap();
    assert_eq!(buf, [0x00, 0x0F]);
}

#[test]
fn test_encode_f64_overflow() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let mut buf = [0u8; 2];
    let err = codec.encode_f64(100.0, &mut buf, 0).unwrap_err();
    assert!(matches!(err, CodecError::RangeNotValid { .. }));
    assert_eq!(buf, [0, 0]);
}

#[test]
fn test_encode_f64_non_finite() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let mut buf = [0u8; 2];
    assert!(codec.encode_f64(f64::NAN, &mut buf, 0).is_err());
    assert!(codec.encode_f64(f64::INFINITY, &mut buf, 0).is_err());
}

#[test]
fn test_encode_f64_scale_beyond_fifteen_zero_fills() {
    let codec = PackedDecimal::new(20, 18).unwrap();
    let mut buf = [0u8; 11];
    codec.encode_f64(0.5, &mut buf, 0).unwrap();
    let decoded = codec.decode_decimal(&buf, 0).unwrap();
    assert_eq!(decoded, dec("0.5"));
    // three lowest positions beyond the 15-digit fraction are zero
    assert_eq!(buf[10], 0x0F);
    assert_eq!(buf[9], 0x00);
}

#[test]
fn test_encode_f64_large_value_takes_exact_path() {
    let codec = PackedDecimal::new(25, 0).unwrap();
    let mut buf = [0u8; 13];
    codec.encode_f64(1e20, &mut buf, 0).unwrap();
    assert_eq!(codec.decode_decimal(&buf, 0).unwrap(), dec("100000000000000000000"));
}

#[test]
fn test_value_double_dispatches_to_f64_path() {
    let codec = PackedDecimal::new(3, 1).unwrap();
    let bytes = codec.to_bytes(&Value::Double(12.3)).unwrap();
    assert_eq!(&bytes[..], &[0x12, 0x3F]);
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_round_trip_exact(
        digits in 1u32..=30,
        scale_seed in 0u32..=30,
        magnitude in 0u64..=999_999_999_999_999_999,
        negative in any::<bool>(),
    ) {
        let scale = scale_seed % (digits + 1);
        let limit = 10u64.checked_pow(digits.min(18)).unwrap_or(u64::MAX);
        let unscaled = (magnitude % limit) as i128;
        let unscaled = if negative { -unscaled } else { unscaled };

        let codec = PackedDecimal::new(digits, scale).unwrap();
        let value = Decimal::new(unscaled, scale);
        let mut buf = vec![0u8; codec.encoded_len()];
        codec.encode_decimal(&value, &mut buf, 0).unwrap();

        prop_assert_eq!(codec.decode_decimal(&buf, 0).unwrap(), value);

        let sign = buf[buf.len() - 1] & 0x0F;
        if unscaled < 0 {
            prop_assert_eq!(sign, 0x0D);
        } else {
            prop_assert_eq!(sign, 0x0F);
        }
    }

    #[test]
    fn prop_byte_length_is_value_independent(digits in 1u32..=63, a in any::<i64>(), b in any::<i64>()) {
        let codec = PackedDecimal::new(digits, 0).unwrap();
        let len = codec.byte_length().unwrap();
        for v in [a, b] {
            let mut buf = vec![0u8; len];
            if let Ok(written) = codec.encode_decimal(&Decimal::from(v), &mut buf, 0) {
                prop_assert_eq!(written, len);
            }
        }
        prop_assert_eq!(len, (digits / 2 + 1) as usize);
    }

    #[test]
    fn prop_invalid_sign_nibble_rejected(high in 0u8..=9, sign in 0u8..=9) {
        let codec = PackedDecimal::new(1, 0).unwrap();
        let byte = (high << 4) | sign;
        let err = codec.decode(&[byte], 0).unwrap_err();
        prop_assert_eq!(err, CodecError::InvalidNibble { half: NibbleHalf::Low, offset: 0, byte });
    }
}
