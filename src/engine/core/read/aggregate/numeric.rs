use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::core::arithmetic::{
    ArithmeticOp, apply, avg, materialize, resolve_avg_type, resolve_sum_type,
};
use crate::engine::errors::AggregateError;
use crate::engine::types::{ExprId, ExpressionEvaluator, NumericType, NumericValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericAggKind {
    Sum,
    Avg,
}

/// Mergeable running total. `sum` stays `None` until a non-null value
/// arrives so that SUM over no rows is absent rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericAggState {
    pub sum: Option<NumericValue>,
    pub count: u64,
}

impl NumericAggState {
    pub fn empty() -> Self {
        Self {
            sum: None,
            count: 0,
        }
    }

    pub fn merge(
        &mut self,
        other: &NumericAggState,
        sum_type: &NumericType,
    ) -> Result<(), AggregateError> {
        if let Some(theirs) = &other.sum {
            self.add(theirs, sum_type)?;
        }
        self.count += other.count;
        Ok(())
    }

    fn add(
        &mut self,
        value: &NumericValue,
        sum_type: &NumericType,
    ) -> Result<(), AggregateError> {
        let next = match &self.sum {
            Some(current) => apply(ArithmeticOp::Add, current, value, sum_type)?,
            None => value.clone(),
        };
        self.sum = Some(next);
        Ok(())
    }
}

/// SUM / AVG with a bincode partial state.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericAggregator {
    kind: NumericAggKind,
    value: ExprId,
    input: NumericType,
    sum_type: NumericType,
    state: NumericAggState,
}

impl NumericAggregator {
    pub fn new(kind: NumericAggKind, value: ExprId, input: NumericType) -> Self {
        let sum_type = match (kind, input.is_floating()) {
            (NumericAggKind::Sum, _) | (NumericAggKind::Avg, true) => resolve_sum_type(&input),
            // exact running sum; the scale is applied by the final division
            (NumericAggKind::Avg, false) => NumericType::decimal_with(None, None),
        };
        Self {
            kind,
            value,
            input,
            sum_type,
            state: NumericAggState::empty(),
        }
    }

    pub fn kind(&self) -> NumericAggKind {
        self.kind
    }

    pub fn state(&self) -> &NumericAggState {
        &self.state
    }

    pub fn result_type(&self) -> NumericType {
        match self.kind {
            NumericAggKind::Sum => resolve_sum_type(&self.input),
            NumericAggKind::Avg => resolve_avg_type(&self.input),
        }
    }

    pub fn observe_row<R, E>(&mut self, evaluator: &E, row: &R) -> Result<(), AggregateError>
    where
        E: ExpressionEvaluator<R> + ?Sized,
    {
        let Some(bytes) = evaluator.evaluate_expression(self.value, row) else {
            return Ok(());
        };
        let value = NumericValue::decode(&bytes, &self.input)?;
        self.observe(&value)
    }

    pub fn observe(&mut self, value: &NumericValue) -> Result<(), AggregateError> {
        self.state.add(value, &self.sum_type)?;
        self.state.count += 1;
        Ok(())
    }

    pub fn merge_state(&mut self, other: &NumericAggState) -> Result<(), AggregateError> {
        self.state.merge(other, &self.sum_type)
    }

    pub fn merge_partial(&mut self, bytes: &[u8]) -> Result<(), AggregateError> {
        let other: NumericAggState = bincode::deserialize(bytes).map_err(|e| {
            AggregateError::CorruptPartialState(format!("numeric partial state: {e}"))
        })?;
        debug!(
            target: "kvsql::aggregate::numeric",
            count = other.count,
            "Merging numeric partial state"
        );
        self.merge_state(&other)
    }

    pub fn serialize(&self) -> Result<Vec<u8>, AggregateError> {
        bincode::serialize(&self.state).map_err(|e| {
            AggregateError::CorruptPartialState(format!("numeric partial state: {e}"))
        })
    }

    /// Final value bound to the result type; `None` when no value was seen.
    pub fn evaluate(&self) -> Result<Option<NumericValue>, AggregateError> {
        let Some(sum) = &self.state.sum else {
            return Ok(None);
        };
        let result_type = self.result_type();
        match self.kind {
            NumericAggKind::Sum => Ok(Some(materialize(sum, &result_type)?)),
            NumericAggKind::Avg => Ok(avg(sum, self.state.count, &result_type)?),
        }
    }
}
