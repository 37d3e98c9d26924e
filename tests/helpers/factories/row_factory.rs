use std::collections::HashMap;

use crate::engine::types::{ExprId, ExpressionEvaluator};

/// A scanned row: expression id to serialized value, `None` for NULL.
#[derive(Debug, Clone, Default)]
pub struct TestRow {
    pub columns: HashMap<ExprId, Option<Vec<u8>>>,
}

pub struct TestRowEvaluator;

impl ExpressionEvaluator<TestRow> for TestRowEvaluator {
    fn evaluate_expression(&self, expr: ExprId, row: &TestRow) -> Option<Vec<u8>> {
        row.columns.get(&expr).cloned().flatten()
    }
}

pub struct RowFactory {
    columns: HashMap<ExprId, Option<Vec<u8>>>,
}

impl RowFactory {
    pub fn new() -> Self {
        Self {
            columns: HashMap::new(),
        }
    }

    pub fn with(mut self, expr: ExprId, bytes: impl Into<Vec<u8>>) -> Self {
        self.columns.insert(expr, Some(bytes.into()));
        self
    }

    pub fn null(mut self, expr: ExprId) -> Self {
        self.columns.insert(expr, None);
        self
    }

    pub fn create(self) -> TestRow {
        TestRow {
            columns: self.columns,
        }
    }
}
