use crate::engine::core::decimal::Decimal;
use crate::engine::errors::NumericError;
use crate::engine::types::{NumericType, NumericValue};

#[test]
fn integral_bytes_are_big_endian() {
    let ty = NumericType::integer();
    let bytes = NumericValue::from(258i32).encode(&ty).unwrap();
    assert_eq!(bytes, vec![0, 0, 1, 2]);
    assert_eq!(NumericValue::decode(&bytes, &ty).unwrap(), NumericValue::from(258i32));

    let long = NumericType::long();
    let bytes = NumericValue::from(-1i64).encode(&long).unwrap();
    assert_eq!(bytes, vec![0xff; 8]);
}

#[test]
fn floating_and_decimal_roundtrip() {
    let double = NumericType::double();
    let bytes = NumericValue::Float(2.5).encode(&double).unwrap();
    assert_eq!(NumericValue::decode(&bytes, &double).unwrap(), NumericValue::Float(2.5));

    let dec = NumericType::decimal(5, 2);
    let value = NumericValue::Exact("-1.25".parse::<Decimal>().unwrap());
    let bytes = value.encode(&dec).unwrap();
    assert_eq!(NumericValue::decode(&bytes, &dec).unwrap(), value);
}

#[test]
fn wrong_width_is_invalid_encoding() {
    assert!(matches!(
        NumericValue::decode(&[1, 2, 3], &NumericType::long()),
        Err(NumericError::InvalidOperandEncoding(_))
    ));
}

#[test]
fn out_of_range_integer_cannot_be_encoded() {
    let too_big = NumericValue::from(i64::from(i32::MAX) + 1);
    assert!(matches!(
        too_big.encode(&NumericType::integer()),
        Err(NumericError::ArithmeticOverflow { .. })
    ));
    assert!(matches!(
        NumericValue::Float(1.0).encode(&NumericType::decimal(5, 2)),
        Err(NumericError::IncompatibleOperands(_))
    ));
}

#[test]
fn conversions() {
    let v = NumericValue::from(7i64);
    assert!(v.is_exact());
    assert_eq!(v.to_f64(), 7.0);
    assert_eq!(NumericValue::from(0.5).as_decimal(), None);
    assert_eq!(NumericValue::from(0.5).to_string(), "0.5");
}

#[test]
fn decimal_with_unbounded_scale_is_rejected() {
    assert!(matches!(
        NumericValue::decode(&[0x80, 0, 0, 0, 1], &NumericType::unbounded_decimal()),
        Err(NumericError::InvalidOperandEncoding(_))
    ));
}
