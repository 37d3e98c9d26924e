use tracing::{debug, trace};

use crate::engine::core::read::aggregate::plan::OrderStatSpec;
use crate::engine::core::read::aggregate::state::{
    AggregationMode, AggregatorPhase, OrderStatState,
};
use crate::engine::core::read::aggregate::wire::{WireOptions, serialize};
use crate::engine::errors::AggregateError;
use crate::engine::types::ExpressionEvaluator;

/// Partition-local accumulator for one group of a FIRST_BY / LAST_BY
/// style aggregate. Serialized exactly once by [`finalize`](Self::finalize).
#[derive(Debug, Clone, PartialEq)]
pub struct PartialAggregator {
    spec: OrderStatSpec,
    mode: AggregationMode,
    phase: AggregatorPhase,
    state: OrderStatState,
    wire: WireOptions,
}

pub fn new_partial_aggregator(spec: OrderStatSpec) -> Result<PartialAggregator, AggregateError> {
    PartialAggregator::new(spec, AggregationMode::Rank)
}

impl PartialAggregator {
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
            wire: WireOptions::default(),
        })
    }

    pub fn with_wire_options(mut self, wire: WireOptions) -> Self {
        self.wire = wire;
        self
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

    /// Feeds one row. The order expression is evaluated first; a null
    /// order key or value leaves the state untouched.
    pub fn observe_row<R, E>(&mut self, evaluator: &E, row: &R) -> Result<(), AggregateError>
    where
        E: ExpressionEvaluator<R> + ?Sized,
    {
        self.ensure_open()?;
        let Some(key) = evaluator.evaluate_expression(self.spec.order, row) else {
            trace!(target: "kvsql::aggregate::partial", "Skipping row with null order key");
            return Ok(());
        };
        let Some(payload) = evaluator.evaluate_expression(self.spec.value, row) else {
            return Ok(());
        };
        self.observe(key, payload)
    }

    pub fn observe(&mut self, key: Vec<u8>, payload: Vec<u8>) -> Result<(), AggregateError> {
        self.ensure_open()?;
        self.phase = AggregatorPhase::Accumulating;
        match self.mode {
            AggregationMode::Rank => {
                self.state.observe(key, payload);
                Ok(())
            }
            AggregationMode::Adopt => self.state.adopt(key, payload),
        }
    }

    /// Serializes the state. Any later call fails with
    /// [`AggregateError::Finalized`].
    pub fn finalize(&mut self) -> Result<Vec<u8>, AggregateError> {
        self.ensure_open()?;
        self.phase = AggregatorPhase::Finalized;
        let blob = serialize(&self.state, &self.wire);
        debug!(
            target: "kvsql::aggregate::partial",
            offset = self.spec.offset,
            empty = self.state.is_empty(),
            bytes = blob.len(),
            "Finalized partial state"
        );
        Ok(blob)
    }

    fn ensure_open(&self) -> Result<(), AggregateError> {
        if self.phase == AggregatorPhase::Finalized {
            return Err(AggregateError::Finalized);
        }
        Ok(())
    }
}
