pub mod merge;
pub mod numeric;
pub mod ops;
pub mod order_key;
pub mod partial;
pub mod plan;
pub mod state;
pub mod top_k;
pub mod wire;

pub use merge::{MergeAggregator, gather, new_merge_aggregator};
pub use order_key::SortDirection;
pub use partial::{PartialAggregator, new_partial_aggregator};
pub use plan::{AggregateOpSpec, OrderStatSpec};
pub use state::{AggregationMode, AggregatorPhase, OrderStatState};
pub use wire::{StateLayout, WireOptions, deserialize, serialize};

#[cfg(test)]
mod numeric_test;
