use crate::engine::core::read::aggregate::order_key::{SortDirection, is_more_extreme};
use crate::engine::core::read::aggregate::top_k::TopK;
use crate::engine::errors::AggregateError;

/// How an aggregator treats incoming payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// Rank rows by order key.
    Rank,
    /// Take each incoming payload verbatim, e.g. when the group was
    /// already reduced upstream by an ORDER BY over the aggregate.
    Adopt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorPhase {
    Uninitialized,
    Accumulating,
    Finalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extreme {
    pub key: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Accumulated state of one order-statistic aggregate for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatState {
    NoOffset {
        direction: SortDirection,
        best: Option<Extreme>,
    },
    WithOffset {
        offset: i32,
        entries: TopK,
    },
}

impl OrderStatState {
    pub fn new(direction: SortDirection, offset: i32) -> Result<Self, AggregateError> {
        match offset {
            0 => Ok(OrderStatState::NoOffset {
                direction,
                best: None,
            }),
            n if n > 0 => Ok(OrderStatState::WithOffset {
                offset: n,
                entries: TopK::new(n as usize, direction),
            }),
            n => Err(AggregateError::InvalidOffset(n)),
        }
    }

    pub fn direction(&self) -> SortDirection {
        match self {
            OrderStatState::NoOffset { direction, .. } => *direction,
            OrderStatState::WithOffset { entries, .. } => entries.direction(),
        }
    }

    pub fn offset(&self) -> i32 {
        match self {
            OrderStatState::NoOffset { .. } => 0,
            OrderStatState::WithOffset { offset, .. } => *offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OrderStatState::NoOffset { best, .. } => best.is_none(),
            OrderStatState::WithOffset { entries, .. } => entries.is_empty(),
        }
    }

    pub fn observe(&mut self, key: Vec<u8>, payload: Vec<u8>) {
        match self {
            OrderStatState::NoOffset { direction, best } => {
                let replace = match best {
                    Some(current) => is_more_extreme(
                        (key.as_slice(), payload.as_slice()),
                        (current.key.as_slice(), current.payload.as_slice()),
                        *direction,
                    ),
                    None => true,
                };
                if replace {
                    *best = Some(Extreme { key, payload });
                }
            }
            OrderStatState::WithOffset { entries, .. } => entries.observe(key, payload),
        }
    }

    /// Replaces the single tracked entry regardless of rank.
    pub fn adopt(&mut self, key: Vec<u8>, payload: Vec<u8>) -> Result<(), AggregateError> {
        match self {
            OrderStatState::NoOffset { best, .. } => {
                *best = Some(Extreme { key, payload });
                Ok(())
            }
            OrderStatState::WithOffset { offset, .. } => Err(AggregateError::ModeMismatch(
                format!("cannot adopt a payload into a state ranked at offset {offset}"),
            )),
        }
    }

    /// Folds `other` into `self`. Both sides must agree on direction and
    /// offset.
    pub fn merge(&mut self, other: &OrderStatState) -> Result<(), AggregateError> {
        if self.direction() != other.direction() || self.offset() != other.offset() {
            return Err(AggregateError::CorruptPartialState(format!(
                "partial state ({:?}, offset {}) does not match aggregate ({:?}, offset {})",
                other.direction(),
                other.offset(),
                self.direction(),
                self.offset()
            )));
        }
        match other {
            OrderStatState::NoOffset { best, .. } => {
                if let Some(e) = best {
                    self.observe(e.key.clone(), e.payload.clone());
                }
            }
            OrderStatState::WithOffset {
                entries: theirs, ..
            } => match self {
                OrderStatState::WithOffset { entries, .. } => entries.merge_from(theirs),
                OrderStatState::NoOffset { .. } => {
                    return Err(AggregateError::CorruptPartialState(
                        "partial state layout does not match aggregate".into(),
                    ));
                }
            },
        }
        Ok(())
    }

    /// Final payload; `None` when nothing qualifies, including fewer
    /// than `offset` entries.
    pub fn evaluate(&self) -> Option<&[u8]> {
        match self {
            OrderStatState::NoOffset { best, .. } => best.as_ref().map(|e| e.payload.as_slice()),
            OrderStatState::WithOffset { offset, entries } => entries.nth(*offset as usize),
        }
    }
}
