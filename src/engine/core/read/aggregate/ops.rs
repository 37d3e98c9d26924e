use crate::engine::core::read::aggregate::merge::{MergeAggregator, new_merge_aggregator};
use crate::engine::core::read::aggregate::numeric::{NumericAggKind, NumericAggregator};
use crate::engine::core::read::aggregate::partial::{PartialAggregator, new_partial_aggregator};
use crate::engine::core::read::aggregate::plan::AggregateOpSpec;
use crate::engine::errors::AggregateError;
use crate::engine::types::{ExpressionEvaluator, NumericValue};

/// Finalized output of an aggregator
#[derive(Debug, Clone, PartialEq)]
pub enum AggOutput {
    /// Raw value bytes of a first/last aggregate
    Payload(Option<Vec<u8>>),
    Numeric(Option<NumericValue>),
}

/// Partition-side aggregator per operation
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorImpl {
    OrderStat(PartialAggregator),
    Numeric(NumericAggregator),
}

impl AggregatorImpl {
    pub fn from_spec(spec: &AggregateOpSpec) -> Result<Self, AggregateError> {
        match spec {
            AggregateOpSpec::FirstBy(s)
            | AggregateOpSpec::LastBy(s)
            | AggregateOpSpec::FirstValue(s)
            | AggregateOpSpec::LastValue(s) => Ok(Self::OrderStat(new_partial_aggregator(*s)?)),
            AggregateOpSpec::Sum { value, input } => Ok(Self::Numeric(NumericAggregator::new(
                NumericAggKind::Sum,
                *value,
                *input,
            ))),
            AggregateOpSpec::Avg { value, input } => Ok(Self::Numeric(NumericAggregator::new(
                NumericAggKind::Avg,
                *value,
                *input,
            ))),
        }
    }

    /// Update aggregator with a matching row
    pub fn update<R, E>(&mut self, evaluator: &E, row: &R) -> Result<(), AggregateError>
    where
        E: ExpressionEvaluator<R> + ?Sized,
    {
        match self {
            AggregatorImpl::OrderStat(a) => a.observe_row(evaluator, row),
            AggregatorImpl::Numeric(a) => a.observe_row(evaluator, row),
        }
    }

    /// Partial state shipped to the coordinator
    pub fn snapshot(&mut self) -> Result<Vec<u8>, AggregateError> {
        match self {
            AggregatorImpl::OrderStat(a) => a.finalize(),
            AggregatorImpl::Numeric(a) => a.serialize(),
        }
    }
}

/// Coordinator-side counterpart of [`AggregatorImpl`]
#[derive(Debug, Clone, PartialEq)]
pub enum MergerImpl {
    OrderStat(MergeAggregator),
    Numeric(NumericAggregator),
}

impl MergerImpl {
    pub fn from_spec(spec: &AggregateOpSpec) -> Result<Self, AggregateError> {
        match AggregatorImpl::from_spec(spec)? {
            AggregatorImpl::OrderStat(partial) => {
                Ok(Self::OrderStat(new_merge_aggregator(*partial.spec())?))
            }
            AggregatorImpl::Numeric(numeric) => Ok(Self::Numeric(numeric)),
        }
    }

    pub fn merge_partial(&mut self, blob: &[u8]) -> Result<(), AggregateError> {
        match self {
            MergerImpl::OrderStat(m) => m.merge_partial(blob),
            MergerImpl::Numeric(m) => m.merge_partial(blob),
        }
    }

    pub fn finalize(&mut self) -> Result<AggOutput, AggregateError> {
        match self {
            MergerImpl::OrderStat(m) => Ok(AggOutput::Payload(m.finalize()?)),
            MergerImpl::Numeric(m) => Ok(AggOutput::Numeric(m.evaluate()?)),
        }
    }
}
