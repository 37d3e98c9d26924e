mod expression;
mod numeric_type;
mod numeric_value;

pub use expression::{ColumnTypes, ExprId, ExpressionEvaluator};
pub use numeric_type::{
    DEFAULT_INTEGER_PRECISION, DEFAULT_LONG_PRECISION, MAX_PRECISION, MIN_DIVIDE_SCALE,
    NumericFamily, NumericType,
};
pub use numeric_value::NumericValue;

#[cfg(test)]
mod numeric_value_test;
