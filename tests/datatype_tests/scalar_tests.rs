//! Float and Byte Array Tests
//!
//! Tests verify:
//! - IEEE big-endian layout
//! - Float4 range narrowing
//! - Byte array padding and length checks
//! - Boxed codec cloning and buffer helpers

use hostcodec::{ByteArray, Codec, CodecError, DataType, DataTypeKind, Float4, Float8, Value};

// =============================================================================
// Float Tests
// =============================================================================

#[test]
fn test_float8_layout() {
    let bytes = Float8.to_bytes(&Value::Double(1.0)).unwrap();
    assert_eq!(&bytes[..], &[0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(Float8.from_bytes(&bytes).unwrap(), Value::Double(1.0));
}

#[test]
fn test_float4_layout() {
    let bytes = Float4.to_bytes(&Value::Double(-2.5)).unwrap();
    assert_eq!(&bytes[..], &[0xC0, 0x20, 0x00, 0x00]);
    assert_eq!(Float4.from_bytes(&bytes).unwrap(), Value::Double(-2.5));
}

#[test]
fn test_float4_out_of_range() {
    let err = Float4.to_bytes(&Value::Double(1e39)).unwrap_err();
    assert!(matches!(err, CodecError::RangeNotValid { .. }));
    assert!(Float4.to_bytes(&Value::Double(f64::INFINITY)).is_ok());
}

#[test]
fn test_float4_accepts_values_rounding_to_max() {
    let near_max = f64::from(f32::MAX) + 1e30;
    let bytes = Float4.to_bytes(&Value::Double(near_max)).unwrap();
    assert_eq!(&bytes[..], &f32::MAX.to_be_bytes());
    assert_eq!(
        Float4.from_bytes(&bytes).unwrap(),
        Value::Double(f64::from(f32::MAX))
    );
}

#[test]
fn test_float_accepts_integers() {
    let bytes = Float8.to_bytes(&Value::Signed(3)).unwrap();
    assert_eq!(Float8.from_bytes(&bytes).unwrap(), Value::Double(3.0));
}

#[test]
fn test_float_rejects_bytes() {
    assert!(matches!(
        Float8.to_bytes(&Value::Bytes(vec![])),
        Err(CodecError::TypeMismatch { .. })
    ));
}

// =============================================================================
// Byte Array Tests
// =============================================================================

#[test]
fn test_byte_array_pads_short_input() {
    let codec = ByteArray::new(4);
    let bytes = codec.to_bytes(&Value::Bytes(vec![0xAB, 0xCD])).unwrap();
    assert_eq!(&bytes[..], &[0xAB, 0xCD, 0x00, 0x00]);
}

#[test]
fn test_byte_array_rejects_long_input() {
    let codec = ByteArray::new(2);
    let err = codec.to_bytes(&Value::Bytes(vec![1, 2, 3])).unwrap_err();
    assert!(matches!(err, CodecError::LengthNotValid { .. }));
}

#[test]
fn test_byte_array_decode_and_default() {
    let codec = ByteArray::new(3);
    assert_eq!(
        codec.decode(&[9, 1, 2, 3], 1).unwrap(),
        Value::Bytes(vec![1, 2, 3])
    );
    assert_eq!(codec.default_value().unwrap(), Value::Bytes(vec![0, 0, 0]));
}

// =============================================================================
// Boxed Codec Tests
// =============================================================================

#[test]
fn test_boxed_clone_is_independent() {
    let codecs: Vec<Codec> = vec![Box::new(Float4), Box::new(ByteArray::new(2))];
    let copies = codecs.clone();
    assert_eq!(copies[0].kind(), DataTypeKind::Float4);
    assert_eq!(copies[1].byte_length().unwrap(), 2);
}
