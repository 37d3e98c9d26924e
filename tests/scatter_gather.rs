use std::collections::HashMap;

use rayon::prelude::*;

use kvsql_core::engine::core::decimal::Decimal;
use kvsql_core::engine::core::read::aggregate::SortDirection;
use kvsql_core::engine::core::read::aggregate::ops::{AggOutput, AggregatorImpl, MergerImpl};
use kvsql_core::engine::core::read::aggregate::order_key::encode_i64;
use kvsql_core::engine::core::read::aggregate::plan::AggregateOpSpec;
use kvsql_core::engine::functions::{
    AggregateArg, AggregateCall, BUILTINS, ColumnRef, Datum, SqlType,
};
use kvsql_core::engine::types::{ExprId, ExpressionEvaluator, NumericType, NumericValue};

const NAME: ExprId = ExprId(1);
const SEQ: ExprId = ExprId(2);
const PRICE: ExprId = ExprId(3);

const PRICE_TYPE: NumericType = NumericType::decimal(10, 2);

struct Row(HashMap<ExprId, Vec<u8>>);

struct Scan;

impl ExpressionEvaluator<Row> for Scan {
    fn evaluate_expression(&self, expr: ExprId, row: &Row) -> Option<Vec<u8>> {
        row.0.get(&expr).cloned()
    }
}

fn row(seq: i64, name: i64, price: &str) -> Row {
    let price = NumericValue::Exact(price.parse::<Decimal>().unwrap());
    Row(HashMap::from([
        (SEQ, encode_i64(seq)),
        (NAME, encode_i64(name)),
        (PRICE, price.encode(&PRICE_TYPE).unwrap()),
    ]))
}

fn partitions() -> Vec<Vec<Row>> {
    vec![
        vec![row(3, 4, "1.00"), row(0, 300, "2.00")],
        vec![row(5, 150, "4.00"), row(1, 7, "0.50")],
        vec![row(2, 9, "0.25"), row(4, 2, "1.25")],
    ]
}

fn plan(name: &str, args: Vec<AggregateArg>) -> AggregateOpSpec {
    let call = AggregateCall::new(name, args);
    BUILTINS.lookup(name).unwrap().plan_aggregate(&call).unwrap()
}

fn by_args(offset: Option<i64>) -> Vec<AggregateArg> {
    let mut args = vec![
        AggregateArg::Column(ColumnRef::new(NAME, SqlType::Numeric(NumericType::long()))),
        AggregateArg::Column(ColumnRef::new(SEQ, SqlType::Numeric(NumericType::long()))),
    ];
    if let Some(n) = offset {
        args.push(AggregateArg::Literal(Datum::Number(NumericValue::from(n))));
    }
    args
}

/// Each partition aggregates on its own thread; the coordinator merges
/// whatever order the blobs arrive in.
fn run(spec: &AggregateOpSpec, partitions: &[Vec<Row>]) -> AggOutput {
    let mut blobs: Vec<Vec<u8>> = partitions
        .par_iter()
        .map(|rows| {
            let mut agg = AggregatorImpl::from_spec(spec).unwrap();
            for r in rows {
                agg.update(&Scan, r).unwrap();
            }
            agg.snapshot().unwrap()
        })
        .collect();
    blobs.reverse();

    let mut merger = MergerImpl::from_spec(spec).unwrap();
    for blob in &blobs {
        merger.merge_partial(blob).unwrap();
    }
    merger.finalize().unwrap()
}

#[test]
fn first_by_with_offset_across_partitions() {
    let spec = plan("FIRST_BY", by_args(Some(2)));
    assert_eq!(run(&spec, &partitions()), AggOutput::Payload(Some(encode_i64(7))));
}

#[test]
fn last_by_with_offset_across_partitions() {
    let spec = plan("LAST_BY", by_args(Some(2)));
    assert_eq!(run(&spec, &partitions()), AggOutput::Payload(Some(encode_i64(2))));
}

#[test]
fn first_and_last_by_without_offset() {
    let first = plan("FIRST_BY", by_args(None));
    assert_eq!(run(&first, &partitions()), AggOutput::Payload(Some(encode_i64(300))));
    let last = plan("LAST_BY", by_args(None));
    assert_eq!(run(&last, &partitions()), AggOutput::Payload(Some(encode_i64(150))));
}

#[test]
fn last_value_within_descending_group() {
    let call = AggregateCall::new(
        "LAST_VALUE",
        vec![AggregateArg::Column(ColumnRef::new(
            NAME,
            SqlType::Numeric(NumericType::long()),
        ))],
    )
    .within_group(
        ColumnRef::new(SEQ, SqlType::Numeric(NumericType::long())),
        SortDirection::Desc,
    );
    let spec = BUILTINS
        .lookup("LAST_VALUE")
        .unwrap()
        .plan_aggregate(&call)
        .unwrap();
    assert_eq!(run(&spec, &partitions()), AggOutput::Payload(Some(encode_i64(300))));
}

#[test]
fn empty_partitions_yield_no_value() {
    let spec = plan("FIRST_BY", by_args(Some(1)));
    let empty: Vec<Vec<Row>> = vec![Vec::new(), Vec::new()];
    assert_eq!(run(&spec, &empty), AggOutput::Payload(None));
}

#[test]
fn sum_and_avg_across_partitions() {
    let price = || vec![AggregateArg::Column(ColumnRef::new(PRICE, SqlType::Numeric(PRICE_TYPE)))];

    let AggOutput::Numeric(Some(sum)) = run(&plan("SUM", price()), &partitions()) else {
        panic!("SUM produced no value");
    };
    assert_eq!(sum.to_string(), "9.00");

    let AggOutput::Numeric(Some(avg)) = run(&plan("AVG", price()), &partitions()) else {
        panic!("AVG produced no value");
    };
    assert_eq!(avg.to_string(), "1.5000");
}
