use crate::engine::types::{ExprId, ExpressionEvaluator};
use crate::test_helpers::factories::{RowFactory, TestRowEvaluator};

#[test]
fn evaluator_returns_set_columns_and_nulls() {
    let row = RowFactory::new()
        .with(ExprId(1), vec![1, 2])
        .null(ExprId(2))
        .create();
    let eval = TestRowEvaluator;
    assert_eq!(eval.evaluate_expression(ExprId(1), &row), Some(vec![1, 2]));
    assert_eq!(eval.evaluate_expression(ExprId(2), &row), None);
    assert_eq!(eval.evaluate_expression(ExprId(3), &row), None);
}
