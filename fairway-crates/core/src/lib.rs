//! # fairway-core
//! The engine behind the fairway round scheduler: it assigns a roster of participants to teams and
//! carts over a sequence of rounds, such that every cart and team is filled exactly, pairing rules
//! are respected, and friends are teamed together as often as possible.
//!
//! The problem is encoded into boolean variables (one per participant and slot, plus derived
//! variables for who rides and who is teamed with whom), constrained by cardinality constraints.
//! A depth-first branch-and-bound search with propagation finds an optimal assignment, which is
//! read back into a [`schedule::Schedule`].
//!
//! ```rust
//! # use fairway_core::model::Participant;
//! # use fairway_core::model::ProblemInstance;
//! # use fairway_core::model::RuleSet;
//! # use fairway_core::model::TeamSpec;
//! # use fairway_core::model::Topology;
//! # use fairway_core::termination::TimeBudget;
//! # use fairway_core::Solver;
//! # use std::time::Duration;
//! let participants = vec![
//!     Participant::new("Ann").with_friends(["Cy"]),
//!     Participant::new("Bo"),
//!     Participant::new("Cy"),
//!     Participant::new("Di"),
//! ];
//! let topology = Topology::Uniform {
//!     rounds: 2,
//!     teams: vec![TeamSpec::with_carts([2]), TeamSpec::with_carts([2])],
//! };
//! let instance = ProblemInstance::new(participants, topology, RuleSet::default())?;
//!
//! let mut solver = Solver::new(instance)?;
//! let report = solver.solve(&mut TimeBudget::starting_now(Duration::from_secs(10)));
//!
//! // Ann and Cy may ride together only once, so they share a team in one of the two rounds.
//! assert_eq!(Some(1), report.objective);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub mod model;
pub mod schedule;
pub mod statistics;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use fairway_core::Solver;`
// vs.
// `use fairway_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ConfigError;
pub use crate::basic_types::ModelError;
pub use crate::engine::BranchingOrder;
pub use crate::engine::Constraint;
pub use crate::engine::ConstraintId;
pub use crate::engine::ConstraintStatus;
pub use crate::engine::ConstraintStore;
pub use crate::engine::Objective;
pub use crate::engine::ObjectiveGroup;
pub use crate::engine::ObjectiveTerm;
pub use crate::engine::SearchStatistics;
