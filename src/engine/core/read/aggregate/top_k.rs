use std::collections::BTreeMap;

use crate::engine::core::read::aggregate::order_key::{SortDirection, is_more_extreme};

type Entry = (Vec<u8>, Vec<u8>);

/// The `capacity` most extreme `(key, payload)` pairs seen so far.
///
/// Entries are ordered by key, then payload. Identical pairs are kept as
/// separate entries through a multiplicity count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopK {
    direction: SortDirection,
    capacity: usize,
    entries: BTreeMap<Entry, usize>,
    len: usize,
}

impl TopK {
    pub fn new(capacity: usize, direction: SortDirection) -> Self {
        Self {
            direction,
            capacity,
            entries: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn observe(&mut self, key: Vec<u8>, payload: Vec<u8>) {
        if self.capacity == 0 {
            return;
        }
        if self.len < self.capacity {
            self.insert((key, payload));
            return;
        }
        let should_replace = match self.least_extreme() {
            Some(least) => {
                is_more_extreme((key.as_slice(), payload.as_slice()), least, self.direction)
            }
            None => true,
        };
        if should_replace {
            self.evict_least_extreme();
            self.insert((key, payload));
        }
    }

    /// Payload of the `offset`-th most extreme entry (1-based).
    pub fn nth(&self, offset: usize) -> Option<&[u8]> {
        if offset == 0 || offset > self.len {
            return None;
        }
        let mut remaining = offset;
        for ((_, payload), count) in self.most_extreme_first() {
            if remaining <= *count {
                return Some(payload);
            }
            remaining -= count;
        }
        None
    }

    pub fn merge_from(&mut self, other: &TopK) {
        for (key, payload) in other.iter() {
            self.observe(key.to_vec(), payload.to_vec());
        }
    }

    /// All entries in ascending `(key, payload)` order, duplicates repeated.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> + '_ {
        self.entries.iter().flat_map(|((key, payload), count)| {
            std::iter::repeat_n((key.as_slice(), payload.as_slice()), *count)
        })
    }

    fn insert(&mut self, entry: Entry) {
        *self.entries.entry(entry).or_insert(0) += 1;
        self.len += 1;
    }

    fn most_extreme_first(&self) -> Box<dyn Iterator<Item = (&Entry, &usize)> + '_> {
        match self.direction {
            SortDirection::Asc => Box::new(self.entries.iter()),
            SortDirection::Desc => Box::new(self.entries.iter().rev()),
        }
    }

    fn least_extreme(&self) -> Option<(&[u8], &[u8])> {
        let entry = match self.direction {
            SortDirection::Asc => self.entries.last_key_value(),
            SortDirection::Desc => self.entries.first_key_value(),
        };
        entry.map(|((key, payload), _)| (key.as_slice(), payload.as_slice()))
    }

    fn evict_least_extreme(&mut self) {
        let slot = match self.direction {
            SortDirection::Asc => self.entries.last_entry(),
            SortDirection::Desc => self.entries.first_entry(),
        };
        if let Some(mut entry) = slot {
            if *entry.get() > 1 {
                *entry.get_mut() -= 1;
            } else {
                entry.remove();
            }
            self.len -= 1;
        }
    }
}
