use serde::{Deserialize, Serialize};

use crate::engine::errors::NumericError;
use crate::engine::types::{ColumnTypes, ExprId, MIN_DIVIDE_SCALE, NumericFamily, NumericType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
        }
    }
}

/// Result type of `left op right`.
///
/// Any floating operand yields a floating result (`FLOAT` only when both
/// sides are `FLOAT`). Otherwise the result is a `DECIMAL` whose precision
/// and scale follow the fixed-point rules; an unbounded side makes the
/// corresponding bound unbounded.
pub fn resolve_result_type(
    op: ArithmeticOp,
    left: &NumericType,
    right: &NumericType,
) -> NumericType {
    if left.is_floating() || right.is_floating() {
        return floating_result(left, right);
    }

    let (lp, ls) = left.fixed_point_bounds();
    let (rp, rs) = right.fixed_point_bounds();

    match op {
        ArithmeticOp::Add | ArithmeticOp::Subtract => {
            let scale = ls.zip(rs).map(|(l, r)| l.max(r));
            let precision = match (lp, ls, rp, rs, scale) {
                (Some(lp), Some(ls), Some(rp), Some(rs), Some(scale)) => {
                    Some(lp.saturating_sub(ls).max(rp.saturating_sub(rs)) + scale + 1)
                }
                _ => None,
            };
            NumericType::decimal_with(precision, scale)
        }
        ArithmeticOp::Multiply => NumericType::decimal_with(
            lp.zip(rp).map(|(l, r)| l + r),
            ls.zip(rs).map(|(l, r)| l + r),
        ),
        ArithmeticOp::Divide => {
            NumericType::decimal_with(None, ls.map(|s| s.max(MIN_DIVIDE_SCALE)))
        }
    }
}

fn floating_result(left: &NumericType, right: &NumericType) -> NumericType {
    if left.family == NumericFamily::Float && right.family == NumericFamily::Float {
        NumericType::float()
    } else {
        NumericType::double()
    }
}

/// `SUM` widens integral input to `LONG` and keeps a decimal input's scale.
pub fn resolve_sum_type(input: &NumericType) -> NumericType {
    match input.family {
        NumericFamily::Integer | NumericFamily::Long => NumericType::long(),
        NumericFamily::Float | NumericFamily::Double => NumericType::double(),
        NumericFamily::Decimal => NumericType::decimal_with(None, input.scale),
    }
}

/// `AVG` keeps at least [`MIN_DIVIDE_SCALE`] fractional digits.
pub fn resolve_avg_type(input: &NumericType) -> NumericType {
    if input.is_floating() {
        return NumericType::double();
    }
    let (_, scale) = input.fixed_point_bounds();
    NumericType::decimal_with(None, scale.map(|s| s.max(MIN_DIVIDE_SCALE)))
}

/// Resolves `left op right` for two planned expressions.
pub fn resolve_expression_type<T: ColumnTypes + ?Sized>(
    op: ArithmeticOp,
    left: ExprId,
    right: ExprId,
    types: &T,
) -> Result<NumericType, NumericError> {
    let lookup = |expr: ExprId| {
        types.column_type(expr).ok_or_else(|| {
            NumericError::IncompatibleOperands(format!(
                "expression {} has no numeric type for '{}'",
                expr.0,
                op.as_str()
            ))
        })
    };
    let left = lookup(left)?;
    let right = lookup(right)?;
    Ok(resolve_result_type(op, &left, &right))
}
