//! # fairway
//! fairway schedules a roster of participants over a number of rounds. In every round each
//! participant is placed in exactly one cart of one team, such that carts and teams are filled
//! exactly, nobody rides with the same person too often, and friends are teamed together as often
//! as the rules allow.
//!
//! This crate re-exports [`fairway_core`], which holds the model and the branch-and-bound search,
//! and provides the `fairway-solver` binary which reads TOML instance files and writes the
//! schedule as text, JSON or CSV.
//!
//! ```rust
//! # use fairway_solver::model::Participant;
//! # use fairway_solver::model::ProblemInstance;
//! # use fairway_solver::model::RuleSet;
//! # use fairway_solver::model::TeamSpec;
//! # use fairway_solver::model::Topology;
//! # use fairway_solver::results::SolveStatus;
//! # use fairway_solver::termination::Indefinite;
//! # use fairway_solver::Solver;
//! let participants = ["A", "B", "C"].into_iter().map(Participant::new).collect();
//! let topology = Topology::Uniform {
//!     rounds: 1,
//!     teams: vec![TeamSpec::with_carts([2, 1])],
//! };
//! let rules = RuleSet {
//!     must_pair_once: vec![("A".to_owned(), "B".to_owned())],
//!     ..Default::default()
//! };
//!
//! let instance = ProblemInstance::new(participants, topology, rules)?;
//! let report = Solver::new(instance)?.solve(&mut Indefinite);
//!
//! assert_eq!(SolveStatus::Feasible, report.status);
//! let schedule = report.schedule.expect("a feasible report has a schedule");
//! assert_eq!(["A", "B"], schedule.riders(0, 0, 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub use fairway_core::*;
