use serde::{Deserialize, Serialize};

use crate::engine::types::NumericType;

/// Planner-assigned identifier of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExprId(pub u32);

/// Supplies the serialized bytes of an expression for one row.
///
/// Implemented by the scan layer. `None` means SQL NULL; for an order
/// expression it also means "skip this row for ranking purposes".
pub trait ExpressionEvaluator<R> {
    fn evaluate_expression(&self, expr: ExprId, row: &R) -> Option<Vec<u8>>;
}

/// Supplies operand types to the coercion rules at plan time.
pub trait ColumnTypes {
    fn column_type(&self, expr: ExprId) -> Option<NumericType>;
}
