//! A [`TerminationCondition`] is polled by the search engine at every node boundary. It indicates
//! when the search should stop, even if it has neither exhausted the search space nor proven its
//! incumbent optimal; the search then reports what it has found so far.

mod combinator;
mod indefinite;
mod node_budget;
mod time_budget;

pub use combinator::Combinator;
pub use indefinite::Indefinite;
pub use node_budget::NodeBudget;
pub use time_budget::TimeBudget;

/// The central trait that defines a termination condition. A termination condition determines when
/// the search should give up.
pub trait TerminationCondition {
    /// Returns `true` when the search should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;

    /// Called by the search engine every time a decision is made.
    fn decision_has_been_made(&mut self) {}
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }

    fn decision_has_been_made(&mut self) {
        if let Some(t) = self {
            t.decision_has_been_made()
        }
    }
}

impl<T: TerminationCondition + ?Sized> TerminationCondition for &mut T {
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }

    fn decision_has_been_made(&mut self) {
        (**self).decision_has_been_made()
    }
}
