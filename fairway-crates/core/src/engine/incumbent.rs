use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::basic_types::Solution;

const NO_INCUMBENT: i64 = i64::MIN;

/// The best complete solution found so far, shared by all search workers.
///
/// The objective value is mirrored in an atomic so that workers can read it for pruning without
/// taking the lock. Updates only ever replace the incumbent with a strictly better one, so the
/// value is monotonically non-decreasing.
#[derive(Debug)]
pub(crate) struct Incumbent {
    best_value: AtomicI64,
    best: Mutex<Option<(i64, Solution)>>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Incumbent {
            best_value: AtomicI64::new(NO_INCUMBENT),
            best: Mutex::new(None),
        }
    }
}

impl Incumbent {
    pub(crate) fn best_value(&self) -> Option<i64> {
        let value = self.best_value.load(Ordering::Acquire);
        (value != NO_INCUMBENT).then_some(value)
    }

    /// Offers a solution with the given objective value; returns whether it became the incumbent.
    pub(crate) fn offer(&self, value: i64, solution: &Solution) -> bool {
        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);

        if best.as_ref().is_some_and(|(best_value, _)| *best_value >= value) {
            return false;
        }

        *best = Some((value, solution.clone()));
        self.best_value.store(value, Ordering::Release);
        true
    }

    pub(crate) fn into_best(self) -> Option<(i64, Solution)> {
        self.best.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
