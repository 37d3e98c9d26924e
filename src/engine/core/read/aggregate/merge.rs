use tracing::debug;

use crate::engine::core::read::aggregate::plan::OrderStatSpec;
use crate::engine::core::read::aggregate::state::{
    AggregationMode, AggregatorPhase, OrderStatState,
};
use crate::engine::core::read::aggregate::wire::{
    StateLayout, WireOptions, deserialize, serialize,
};
use crate::engine::errors::AggregateError;
use crate::engine::types::ExpressionEvaluator;

/// Coordinator-side accumulator. Folds partial states from any number of
/// partitions, in any order, or raw rows when nothing was distributed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeAggregator {
    spec: OrderStatSpec,
    mode: AggregationMode,
    phase: AggregatorPhase,
    state: OrderStatState,
}

pub fn new_merge_aggregator(spec: OrderStatSpec) -> Result<MergeAggregator, AggregateError> {
    MergeAggregator::new(spec, AggregationMode::Rank)
}

impl MergeAggregator {
    pub fn new(spec: OrderStatSpec, mode: AggregationMode) -> Result<Self, AggregateError> {
        if mode == AggregationMode::Adopt && spec.has_offset() {
            return Err(AggregateError::ModeMismatch(format!(
                "adopt mode does not rank, offset {} given",
                spec.offset
            )));
        }
        Ok(Self {
            state: OrderStatState::new(spec.direction, spec.offset)?,
            spec,
            mode,
            phase: AggregatorPhase::Uninitialized,
        })
    }

    pub fn spec(&self) -> &OrderStatSpec {
        &self.spec
    }

    pub fn phase(&self) -> AggregatorPhase {
        self.phase
    }

    pub fn state(&self) -> &OrderStatState {
        &self.state
    }

    pub fn observe_row<R, E>(&mut self, evaluator: &E, row: &R) -> Result<(), AggregateError>
    where
        E: ExpressionEvaluator<R> + ?Sized,
    {
        self.ensure_open()?;
        let Some(key) = evaluator.evaluate_expression(self.spec.order, row) else {
            return Ok(());
        };
        let Some(payload) = evaluator.evaluate_expression(self.spec.value, row) else {
            return Ok(());
        };
        self.phase = AggregatorPhase::Accumulating;
        match self.mode {
            AggregationMode::Rank => {
                self.state.observe(key, payload);
                Ok(())
            }
            AggregationMode::Adopt => self.state.adopt(key, payload),
        }
    }

    /// Decodes one partial blob and folds it in.
    pub fn merge_partial(&mut self, blob: &[u8]) -> Result<(), AggregateError> {
        self.ensure_open()?;
        let other = deserialize(blob, StateLayout::for_offset(self.spec.offset))?;
        debug!(
            target: "kvsql::aggregate::merge",
            bytes = blob.len(),
            empty = other.is_empty(),
            "Merging partial state"
        );
        self.merge_state(&other)
    }

    pub fn merge_state(&mut self, other: &OrderStatState) -> Result<(), AggregateError> {
        self.ensure_open()?;
        if self.mode == AggregationMode::Adopt {
            return Err(AggregateError::ModeMismatch(
                "adopt mode takes payloads, not partial states".into(),
            ));
        }
        self.phase = AggregatorPhase::Accumulating;
        self.state.merge(other)
    }

    /// Takes an already-reduced payload verbatim.
    pub fn adopt(&mut self, payload: Vec<u8>) -> Result<(), AggregateError> {
        self.ensure_open()?;
        if self.mode != AggregationMode::Adopt {
            return Err(AggregateError::ModeMismatch(
                "payload adoption requires adopt mode".into(),
            ));
        }
        self.phase = AggregatorPhase::Accumulating;
        self.state.adopt(Vec::new(), payload)
    }

    /// Current result. `None` is absent, distinct from an empty payload.
    pub fn evaluate(&self) -> Option<&[u8]> {
        self.state.evaluate()
    }

    /// Re-encodes the merged state for a further merge level.
    pub fn serialize(&self, options: &WireOptions) -> Vec<u8> {
        serialize(&self.state, options)
    }

    /// Closes the aggregator and returns the final value.
    pub fn finalize(&mut self) -> Result<Option<Vec<u8>>, AggregateError> {
        self.ensure_open()?;
        self.phase = AggregatorPhase::Finalized;
        Ok(self.state.evaluate().map(<[u8]>::to_vec))
    }

    fn ensure_open(&self) -> Result<(), AggregateError> {
        if self.phase == AggregatorPhase::Finalized {
            return Err(AggregateError::Finalized);
        }
        Ok(())
    }
}

/// Folds every partial blob of one group and returns the final value.
pub fn gather<I, B>(spec: OrderStatSpec, partials: I) -> Result<Option<Vec<u8>>, AggregateError>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut merger = new_merge_aggregator(spec)?;
    for blob in partials {
        merger.merge_partial(blob.as_ref())?;
    }
    merger.finalize()
}
