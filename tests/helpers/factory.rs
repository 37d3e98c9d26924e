pub use super::factories::{OrderStatSpecFactory, RowFactory, TestRow, TestRowEvaluator};

use crate::engine::core::read::aggregate::order_key::encode_i64;
use crate::engine::types::ExprId;

pub const VALUE_EXPR: ExprId = ExprId(1);
pub const ORDER_EXPR: ExprId = ExprId(2);

pub struct Factory;

impl Factory {
    pub fn row() -> RowFactory {
        RowFactory::new()
    }

    pub fn order_stat_spec() -> OrderStatSpecFactory {
        OrderStatSpecFactory::new()
    }

    pub fn evaluator() -> TestRowEvaluator {
        TestRowEvaluator
    }

    /// Rows of `(order, value)` pairs, both stored as order-preserving i64 keys.
    pub fn rows(pairs: &[(i64, i64)]) -> Vec<TestRow> {
        pairs
            .iter()
            .map(|(order, value)| {
                RowFactory::new()
                    .with(ORDER_EXPR, encode_i64(*order))
                    .with(VALUE_EXPR, encode_i64(*value))
                    .create()
            })
            .collect()
    }

    pub fn value(value: i64) -> Vec<u8> {
        encode_i64(value)
    }
}
