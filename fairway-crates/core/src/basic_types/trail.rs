use std::iter::Rev;
use std::vec::Drain;

use crate::fairway_assert_simple;

/// A stack of entries partitioned into decision levels.
///
/// Entries pushed after [`Trail::increase_decision_level`] belong to the new level; backtracking
/// with [`Trail::synchronise`] hands back every entry above the target level, most recent first.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    decision_level: usize,
    /// At index i is the position where the i-th decision level ends (exclusive) on the trail
    level_delimiters: Vec<usize>,
    entries: Vec<T>,
}

// Implemented by hand so that `T` is not required to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            decision_level: 0,
            level_delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn increase_decision_level(&mut self) {
        self.decision_level += 1;
        self.level_delimiters.push(self.entries.len());
    }

    pub(crate) fn decision_level(&self) -> usize {
        self.decision_level
    }

    /// The entries which were pushed while the trail was at `level`.
    pub(crate) fn entries_at_level(&self, level: usize) -> &[T] {
        fairway_assert_simple!(level <= self.decision_level);

        let start = if level == 0 {
            0
        } else {
            self.level_delimiters[level - 1]
        };

        let end = if level == self.decision_level {
            self.entries.len()
        } else {
            self.level_delimiters[level]
        };

        &self.entries[start..end]
    }

    pub(crate) fn synchronise(&mut self, new_decision_level: usize) -> Rev<Drain<'_, T>> {
        fairway_assert_simple!(new_decision_level < self.decision_level);

        let new_len = self.level_delimiters[new_decision_level];

        self.decision_level = new_decision_level;
        self.level_delimiters.truncate(new_decision_level);
        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
