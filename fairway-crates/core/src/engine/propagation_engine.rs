use log::trace;

use super::constraint_store::ConstraintId;
use super::constraint_store::ConstraintStore;
use super::Assignments;
use crate::basic_types::Contradiction;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::engine::variables::Literal;
use crate::fairway_assert_advanced;
use crate::fairway_assert_simple;

/// Maintains the assignment of a single search worker and enforces the cardinality constraints of
/// a [`ConstraintStore`] on it.
///
/// For every constraint the engine keeps the number of literals that are currently true and false.
/// These counters are updated when a variable is assigned and restored when the assignment is
/// undone by backtracking, so checking a constraint never requires a scan of its literals.
///
/// A constraint `lower <= #true <= upper` with `t` true and `u` unassigned literals
/// - is violated if `t > upper` or `t + u < lower`;
/// - forces all its unassigned literals to false if `t == upper`;
/// - forces all its unassigned literals to true if `t + u == lower`.
///
/// The store itself is not owned; it is passed to every operation so that several engines (one per
/// worker) can share a single immutable store.
#[derive(Clone, Debug)]
pub(crate) struct PropagationEngine {
    assignments: Assignments,
    num_true: KeyedVec<ConstraintId, u32>,
    num_false: KeyedVec<ConstraintId, u32>,
    queue: Vec<ConstraintId>,
    is_enqueued: KeyedVec<ConstraintId, bool>,
    num_propagations: u64,
}

impl PropagationEngine {
    pub(crate) fn new(store: &ConstraintStore) -> PropagationEngine {
        let mut num_true = KeyedVec::default();
        num_true.resize(store.num_constraints(), 0);
        let mut is_enqueued = KeyedVec::default();
        is_enqueued.resize(store.num_constraints(), false);

        PropagationEngine {
            assignments: Assignments::with_num_variables(store.num_variables()),
            num_false: num_true.clone(),
            num_true,
            queue: Vec::new(),
            is_enqueued,
            num_propagations: 0,
        }
    }

    pub(crate) fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub(crate) fn num_propagations(&self) -> u64 {
        self.num_propagations
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    /// Opens a new decision level and makes `literal` true on it.
    ///
    /// The literal must be unassigned; its consequences are only derived by the next call to
    /// [`PropagationEngine::propagate`].
    pub(crate) fn decide(&mut self, store: &ConstraintStore, literal: Literal) {
        fairway_assert_simple!(!self.assignments.is_assigned(literal.variable()));

        self.assignments.increase_decision_level();
        let status = self.assign(store, literal);
        fairway_assert_simple!(status.is_ok(), "an unassigned literal can always be decided");
    }

    /// Makes `literal` true at the current decision level and schedules every constraint it
    /// occurs in.
    pub(crate) fn assign(&mut self, store: &ConstraintStore, literal: Literal) -> PropagationStatus {
        if !self.assignments.assign(literal)? {
            return Ok(());
        }

        let value = literal.is_positive();
        for occurrence in store.occurrences(literal.variable()) {
            if occurrence.is_positive == value {
                self.num_true[occurrence.constraint] += 1;
            } else {
                self.num_false[occurrence.constraint] += 1;
            }
            self.enqueue(occurrence.constraint);
        }

        Ok(())
    }

    /// Schedules every constraint of the store; used once at the root so that constraints which
    /// are unit from the start (e.g. sums over an empty set) are enforced.
    pub(crate) fn enqueue_all(&mut self, store: &ConstraintStore) {
        for constraint_id in store.constraint_ids() {
            self.enqueue(constraint_id);
        }
    }

    /// Propagates until a fixed point is reached or a constraint is violated.
    ///
    /// On a [`Contradiction`] the queue is emptied; the caller is expected to backtrack.
    pub(crate) fn propagate(&mut self, store: &ConstraintStore) -> PropagationStatus {
        while let Some(constraint_id) = self.queue.pop() {
            self.is_enqueued[constraint_id] = false;

            if let Err(contradiction) = self.propagate_constraint(store, constraint_id) {
                trace!("constraint {constraint_id:?} is violated");
                self.clear_queue();
                return Err(contradiction);
            }
        }

        fairway_assert_advanced!(store
            .violated_constraints(&self.assignments)
            .next()
            .is_none());

        Ok(())
    }

    /// Undoes every assignment above `decision_level` and restores the constraint counters.
    pub(crate) fn backtrack(&mut self, store: &ConstraintStore, decision_level: usize) {
        fairway_assert_simple!(decision_level < self.get_decision_level());

        self.clear_queue();
        for (variable, value) in self.assignments.synchronise(decision_level) {
            for occurrence in store.occurrences(variable) {
                if occurrence.is_positive == value {
                    self.num_true[occurrence.constraint] -= 1;
                } else {
                    self.num_false[occurrence.constraint] -= 1;
                }
            }
        }
    }

    fn propagate_constraint(
        &mut self,
        store: &ConstraintStore,
        constraint_id: ConstraintId,
    ) -> PropagationStatus {
        let cardinality = store.cardinality(constraint_id);
        let num_true = self.num_true[constraint_id];
        let num_unassigned = cardinality.len() - num_true - self.num_false[constraint_id];

        if num_true > cardinality.upper || num_true + num_unassigned < cardinality.lower {
            return Err(Contradiction);
        }

        if num_unassigned == 0 {
            return Ok(());
        }

        let forced_polarity = if num_true == cardinality.upper {
            false
        } else if num_true + num_unassigned == cardinality.lower {
            true
        } else {
            return Ok(());
        };

        for &literal in cardinality.literals.iter() {
            if self.assignments.is_assigned(literal.variable()) {
                continue;
            }

            let forced = if forced_polarity { literal } else { !literal };
            self.num_propagations += 1;
            self.assign(store, forced)?;
        }

        Ok(())
    }

    fn enqueue(&mut self, constraint_id: ConstraintId) {
        if !self.is_enqueued[constraint_id] {
            self.is_enqueued[constraint_id] = true;
            self.queue.push(constraint_id);
        }
    }

    fn clear_queue(&mut self) {
        for constraint_id in self.queue.drain(..) {
            self.is_enqueued[constraint_id] = false;
        }
    }
}
