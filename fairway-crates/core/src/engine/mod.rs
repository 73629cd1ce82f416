//! The constraint store, propagation and branch-and-bound search over boolean variables.
mod assignments;
mod branching;
mod constraint_store;
mod incumbent;
mod objective;
mod parallel_search;
mod propagation_engine;
mod search_engine;
mod solver_statistics;
pub mod termination;
pub mod variables;

pub(crate) use assignments::Assignments;
pub use branching::BranchingOrder;
pub use constraint_store::Constraint;
pub use constraint_store::ConstraintId;
pub use constraint_store::ConstraintStatus;
pub use constraint_store::ConstraintStore;
pub use objective::Objective;
pub use objective::ObjectiveGroup;
pub use objective::ObjectiveTerm;
pub(crate) use propagation_engine::PropagationEngine;
pub(crate) use search_engine::search;
pub use search_engine::SearchMode;
pub use search_engine::SearchOptions;
pub use search_engine::SearchResult;
pub use solver_statistics::SearchStatistics;
