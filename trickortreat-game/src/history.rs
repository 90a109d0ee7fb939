//! Bounded, newest-first log of resolved turns.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::HISTORY_CAPACITY;
use crate::outcome::{Outcome, OutcomeId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: SmallVec<[Outcome; HISTORY_CAPACITY]>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front, dropping the oldest entry past capacity.
    pub fn record(&mut self, outcome: Outcome) {
        self.entries.insert(0, outcome);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Apply `update` to the entry with `id`. Returns whether one was found.
    pub fn patch<F>(&mut self, id: &OutcomeId, update: F) -> bool
    where
        F: FnOnce(&mut Outcome),
    {
        match self.entries.iter_mut().find(|entry| &entry.id == id) {
            Some(entry) => {
                update(entry);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: &OutcomeId) -> Option<&Outcome> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
