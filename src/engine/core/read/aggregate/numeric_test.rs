use num_bigint::BigInt;
use serde::Serialize;

use crate::engine::core::decimal::Decimal;
use crate::engine::core::read::aggregate::numeric::{NumericAggKind, NumericAggregator};
use crate::engine::errors::{AggregateError, NumericError};
use crate::engine::types::{NumericType, NumericValue};
use crate::test_helpers::factory::{Factory, VALUE_EXPR};

fn exact(text: &str) -> NumericValue {
    NumericValue::Exact(text.parse::<Decimal>().unwrap())
}

#[test]
fn sum_of_integers_is_long() {
    let input = NumericType::integer();
    let mut agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, input);
    let eval = Factory::evaluator();
    for v in [5i32, -2, 12] {
        let row = Factory::row()
            .with(VALUE_EXPR, NumericValue::from(v).encode(&input).unwrap())
            .create();
        agg.observe_row(&eval, &row).unwrap();
    }
    let null_row = Factory::row().null(VALUE_EXPR).create();
    agg.observe_row(&eval, &null_row).unwrap();

    assert_eq!(agg.result_type(), NumericType::long());
    assert_eq!(agg.state().count, 3);
    assert_eq!(agg.evaluate().unwrap(), Some(NumericValue::from(15i64)));
}

#[test]
fn sum_over_nothing_is_absent() {
    let agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, NumericType::long());
    assert_eq!(agg.evaluate().unwrap(), None);
}

#[test]
fn long_sum_overflows_at_materialization() {
    let mut agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, NumericType::long());
    agg.observe(&NumericValue::from(i64::MAX)).unwrap();
    agg.observe(&NumericValue::from(i64::MAX)).unwrap();
    assert!(matches!(
        agg.evaluate(),
        Err(AggregateError::Numeric(NumericError::ArithmeticOverflow { .. }))
    ));
}

#[test]
fn bad_value_bytes_are_reported() {
    let mut agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, NumericType::integer());
    let row = Factory::row().with(VALUE_EXPR, vec![1, 2, 3]).create();
    assert!(matches!(
        agg.observe_row(&Factory::evaluator(), &row),
        Err(AggregateError::Numeric(NumericError::InvalidOperandEncoding(_)))
    ));
}

#[test]
fn avg_merges_partials_across_partitions() {
    let column = NumericType::decimal(31, 11);
    let mut coordinator = NumericAggregator::new(NumericAggKind::Avg, VALUE_EXPR, column);
    for text in ["99999999999999999999.10000000000", "0E-11", "0E-11"] {
        let mut partition = NumericAggregator::new(NumericAggKind::Avg, VALUE_EXPR, column);
        partition.observe(&exact(text)).unwrap();
        coordinator
            .merge_partial(&partition.serialize().unwrap())
            .unwrap();
    }

    assert_eq!(coordinator.state().count, 3);
    let avg = coordinator.evaluate().unwrap().unwrap();
    assert_eq!(avg.to_string(), "33333333333333333333.03333333333");
}

#[test]
fn avg_of_doubles() {
    let mut agg = NumericAggregator::new(NumericAggKind::Avg, VALUE_EXPR, NumericType::double());
    agg.observe(&NumericValue::Float(1.0)).unwrap();
    agg.observe(&NumericValue::Float(2.0)).unwrap();
    assert_eq!(agg.evaluate().unwrap(), Some(NumericValue::Float(1.5)));
    assert_eq!(agg.kind(), NumericAggKind::Avg);
}

#[test]
fn garbage_partial_is_corrupt() {
    let mut agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, NumericType::long());
    assert!(matches!(
        agg.merge_partial(&[0xff]),
        Err(AggregateError::CorruptPartialState(_))
    ));
}

/// Same layout as a serialized SUM/AVG partial, with raw decimal parts.
#[derive(Serialize)]
enum RawValue {
    Exact(BigInt, i32),
}

#[derive(Serialize)]
struct RawState {
    sum: Option<RawValue>,
    count: u64,
}

#[test]
fn partial_with_unbounded_decimal_scale_is_corrupt() {
    let input = NumericType::unbounded_decimal();
    let mut agg = NumericAggregator::new(NumericAggKind::Sum, VALUE_EXPR, input);
    agg.observe(&NumericValue::from(1i64)).unwrap();

    let valid = bincode::serialize(&RawState {
        sum: Some(RawValue::Exact(BigInt::from(5), 1)),
        count: 1,
    })
    .unwrap();
    agg.merge_partial(&valid).unwrap();
    assert_eq!(agg.evaluate().unwrap(), Some(exact("1.5")));

    let hostile = bincode::serialize(&RawState {
        sum: Some(RawValue::Exact(BigInt::from(1), i32::MIN)),
        count: 1,
    })
    .unwrap();
    assert!(matches!(
        agg.merge_partial(&hostile),
        Err(AggregateError::CorruptPartialState(_))
    ));
}
