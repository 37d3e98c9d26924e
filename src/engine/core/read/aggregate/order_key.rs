use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Which end of the byte order counts as "most extreme".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_byte(self) -> u8 {
        match self {
            SortDirection::Asc => 0,
            SortDirection::Desc => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SortDirection::Asc),
            1 => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Composes two orderings: `Desc` flips, `Asc` keeps.
    pub fn then(self, other: SortDirection) -> Self {
        match other {
            SortDirection::Asc => self,
            SortDirection::Desc => self.reverse(),
        }
    }
}

/// Unsigned byte-wise comparison; a strict prefix sorts first. `Desc`
/// inverts the result.
pub fn compare(a: &[u8], b: &[u8], direction: SortDirection) -> Ordering {
    directed(a.cmp(b), direction)
}

/// Compares `(key, payload)` pairs; the payload only breaks key ties.
pub fn compare_entries(
    a: (&[u8], &[u8]),
    b: (&[u8], &[u8]),
    direction: SortDirection,
) -> Ordering {
    directed(a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)), direction)
}

/// `true` when `candidate` ranks strictly before `current`.
pub fn is_more_extreme(
    candidate: (&[u8], &[u8]),
    current: (&[u8], &[u8]),
    direction: SortDirection,
) -> bool {
    compare_entries(candidate, current, direction) == Ordering::Less
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}

/// Sign bit flipped so negatives sort before positives.
pub fn encode_i64(value: i64) -> Vec<u8> {
    ((value as u64) ^ (1 << 63)).to_be_bytes().to_vec()
}

/// Total order matching `f64::total_cmp`.
pub fn encode_f64(value: f64) -> Vec<u8> {
    let bits = value.to_bits();
    let ordered = if bits >> 63 == 1 { !bits } else { bits ^ (1 << 63) };
    ordered.to_be_bytes().to_vec()
}

pub fn encode_str(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Key bytes for a column stored in `Desc` order: every byte inverted.
pub fn invert(key: &[u8]) -> Vec<u8> {
    key.iter().map(|b| !b).collect()
}
