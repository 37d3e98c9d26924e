pub mod apply;
pub mod resolve;

pub use apply::{apply, avg, materialize, materialize as cast};
pub use resolve::{
    ArithmeticOp, resolve_avg_type, resolve_expression_type, resolve_result_type,
    resolve_sum_type,
};

#[cfg(test)]
mod apply_test;
