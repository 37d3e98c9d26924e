use serde::{Deserialize, Serialize};

use crate::engine::core::read::aggregate::order_key::SortDirection;
use crate::engine::types::{ExprId, NumericType};

/// Expressions and ranking parameters of one order-statistic aggregate.
///
/// `direction` is the effective byte-order direction: `Asc` selects the
/// smallest order key. `offset == 0` means "the single extreme"; `n > 0`
/// selects the n-th most extreme entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderStatSpec {
    pub value: ExprId,
    pub order: ExprId,
    pub direction: SortDirection,
    pub offset: i32,
}

impl OrderStatSpec {
    pub fn has_offset(&self) -> bool {
        self.offset != 0
    }
}

/// Describes a single aggregate operation requested by the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateOpSpec {
    /// Value at the smallest order key
    FirstBy(OrderStatSpec),
    /// Value at the largest order key
    LastBy(OrderStatSpec),
    /// FIRST_VALUE(..) WITHIN GROUP (ORDER BY ..)
    FirstValue(OrderStatSpec),
    /// LAST_VALUE(..) WITHIN GROUP (ORDER BY ..)
    LastValue(OrderStatSpec),
    /// SUM over a numeric expression
    Sum { value: ExprId, input: NumericType },
    /// AVG over a numeric expression
    Avg { value: ExprId, input: NumericType },
}

impl AggregateOpSpec {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOpSpec::FirstBy(_) => "FIRST_BY",
            AggregateOpSpec::LastBy(_) => "LAST_BY",
            AggregateOpSpec::FirstValue(_) => "FIRST_VALUE",
            AggregateOpSpec::LastValue(_) => "LAST_VALUE",
            AggregateOpSpec::Sum { .. } => "SUM",
            AggregateOpSpec::Avg { .. } => "AVG",
        }
    }

    pub fn order_stat(&self) -> Option<&OrderStatSpec> {
        match self {
            AggregateOpSpec::FirstBy(spec)
            | AggregateOpSpec::LastBy(spec)
            | AggregateOpSpec::FirstValue(spec)
            | AggregateOpSpec::LastValue(spec) => Some(spec),
            AggregateOpSpec::Sum { .. } | AggregateOpSpec::Avg { .. } => None,
        }
    }
}

/// Effective direction of a first/last aggregate.
///
/// `first` picks the start of the requested ordering; `ordering` is the
/// WITHIN GROUP direction (`Asc` for FIRST_BY/LAST_BY); `storage` is how
/// the order column's bytes are laid out, `Desc` meaning inverted bytes.
pub fn effective_direction(
    first: bool,
    ordering: SortDirection,
    storage: SortDirection,
) -> SortDirection {
    let base = if first {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    };
    base.then(ordering).then(storage)
}
