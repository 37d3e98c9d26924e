pub mod order_stat_spec_factory;
pub mod row_factory;

pub use order_stat_spec_factory::OrderStatSpecFactory;
pub use row_factory::{RowFactory, TestRow, TestRowEvaluator};

#[cfg(test)]
mod row_factory_test;
