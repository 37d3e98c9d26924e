use crate::engine::core::arithmetic::apply::{apply, avg, materialize};
use crate::engine::core::arithmetic::cast;
use crate::engine::core::arithmetic::resolve::{
    ArithmeticOp, resolve_avg_type, resolve_result_type,
};
use crate::engine::core::decimal::Decimal;
use crate::engine::errors::NumericError;
use crate::engine::types::{NumericType, NumericValue};

fn exact(text: &str) -> NumericValue {
    NumericValue::Exact(text.parse::<Decimal>().unwrap())
}

fn text(value: &NumericValue) -> String {
    value.to_string()
}

#[test]
fn exact_add_is_scale_aligned() {
    let ty = resolve_result_type(
        ArithmeticOp::Add,
        &NumericType::decimal(5, 2),
        &NumericType::decimal(5, 1),
    );
    let out = apply(ArithmeticOp::Add, &exact("1.25"), &exact("2.5"), &ty).unwrap();
    assert_eq!(text(&out), "3.75");
}

#[test]
fn divide_fills_result_scale() {
    let ty = resolve_result_type(
        ArithmeticOp::Divide,
        &NumericType::decimal(5, 2),
        &NumericType::decimal(5, 2),
    );
    let out = apply(ArithmeticOp::Divide, &exact("1.00"), &exact("3.00"), &ty).unwrap();
    assert_eq!(text(&out), "0.3333");

    let out = apply(ArithmeticOp::Divide, &exact("2.00"), &exact("3.00"), &ty).unwrap();
    assert_eq!(text(&out), "0.6667");
}

#[test]
fn divide_with_unscaled_dividend_uses_its_own_scale() {
    let ty = NumericType::unbounded_decimal();
    let out = apply(ArithmeticOp::Divide, &exact("1.234567"), &exact("2"), &ty).unwrap();
    assert_eq!(text(&out), "0.617284");
}

#[test]
fn divide_by_zero_fails() {
    let ty = NumericType::decimal_with(None, Some(4));
    assert_eq!(
        apply(ArithmeticOp::Divide, &exact("1"), &exact("0.0"), &ty),
        Err(NumericError::DivisionByZero)
    );
}

#[test]
fn floating_results_use_native_semantics() {
    let out = apply(
        ArithmeticOp::Add,
        &NumericValue::Float(0.1),
        &NumericValue::Float(0.2),
        &NumericType::float(),
    )
    .unwrap();
    assert_eq!(out, NumericValue::Float((0.1f64 + 0.2) as f32 as f64));

    let out = apply(
        ArithmeticOp::Divide,
        &NumericValue::Float(1.0),
        &exact("0"),
        &NumericType::double(),
    )
    .unwrap();
    assert_eq!(out, NumericValue::Float(f64::INFINITY));
}

#[test]
fn float_operand_in_fixed_point_is_rejected() {
    let ty = NumericType::decimal(10, 2);
    assert!(matches!(
        apply(ArithmeticOp::Add, &NumericValue::Float(1.0), &exact("1"), &ty),
        Err(NumericError::IncompatibleOperands(_))
    ));
}

#[test]
fn intermediate_may_exceed_ceiling_until_materialized() {
    let twenty_nines = "9".repeat(20);
    let ty = NumericType::unbounded_decimal();
    let product = apply(
        ArithmeticOp::Multiply,
        &exact(&twenty_nines),
        &exact(&twenty_nines),
        &ty,
    )
    .unwrap();
    assert_eq!(product.as_decimal().unwrap().precision(), 40);
    assert_eq!(
        materialize(&product, &ty),
        Err(NumericError::ArithmeticOverflow {
            digits: 40,
            precision: 38
        })
    );
}

#[test]
fn avg_over_wide_decimal_keeps_input_scale() {
    let column = NumericType::decimal(31, 11);
    let result = resolve_avg_type(&column);
    let sum = materialize(&exact("99999999999999999999.1"), &column).unwrap();
    let sum = apply(ArithmeticOp::Add, &sum, &exact("0"), &NumericType::unbounded_decimal())
        .unwrap();
    let out = avg(&sum, 3, &result).unwrap().unwrap();
    assert_eq!(text(&out), "33333333333333333333.03333333333");
}

#[test]
fn avg_at_ceiling_drops_fraction() {
    let column = NumericType::decimal(38, 1);
    let sum = exact(&format!("{}.1", "9".repeat(37)));
    let out = avg(&sum, 3, &resolve_avg_type(&column)).unwrap().unwrap();
    assert_eq!(text(&out), "3".repeat(37));
}

#[test]
fn avg_of_nothing_is_absent() {
    let ty = resolve_avg_type(&NumericType::integer());
    assert_eq!(avg(&exact("0"), 0, &ty), Ok(None));
}

#[test]
fn avg_of_integers_has_four_fraction_digits() {
    let ty = resolve_avg_type(&NumericType::integer());
    let out = avg(&NumericValue::from(10i64), 4, &ty).unwrap().unwrap();
    assert_eq!(text(&out), "2.5000");
}

#[test]
fn materialize_rounds_then_checks_precision() {
    let ty = NumericType::decimal(5, 2);
    assert_eq!(text(&materialize(&exact("123.456"), &ty).unwrap()), "123.46");
    assert_eq!(
        materialize(&exact("1234.5"), &ty),
        Err(NumericError::ArithmeticOverflow {
            digits: 6,
            precision: 5
        })
    );
}

#[test]
fn materialize_checks_integral_range() {
    let ty = NumericType::integer();
    assert!(materialize(&exact("2147483647"), &ty).is_ok());
    assert!(matches!(
        materialize(&exact("2147483648"), &ty),
        Err(NumericError::ArithmeticOverflow { .. })
    ));
    assert_eq!(
        text(&materialize(&NumericValue::Float(2.5), &ty).unwrap()),
        "3"
    );
}

#[test]
fn casts_between_families() {
    assert!(matches!(
        cast(&NumericValue::Float(f64::NAN), &NumericType::decimal(10, 2)),
        Err(NumericError::NotRepresentable(_))
    ));
    assert_eq!(
        cast(&exact("0.1"), &NumericType::float()),
        Ok(NumericValue::Float(0.1f32 as f64))
    );
    assert_eq!(
        text(&cast(&NumericValue::Float(0.1), &NumericType::decimal(5, 3)).unwrap()),
        "0.100"
    );
}
