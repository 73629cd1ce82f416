pub(crate) mod solver;

pub mod termination {
    //! Contains the conditions which are used to determine when the search should terminate even
    //! when the search space has not been fully explored.
    //!
    //! The main [`TerminationCondition`] is a condition which is polled by the search at every
    //! node, to determine whether it should stop.
    pub use crate::engine::termination::*;
}

pub mod variables {
    //! The boolean variables and literals over which constraints are posted.
    pub use crate::engine::variables::*;
}

pub mod options {
    //! Options which influence the search.
    pub use crate::engine::SearchMode;
    pub use crate::engine::SearchOptions;
}

pub mod results {
    //! The outcomes of a search and of a complete solve.
    pub use crate::basic_types::PartialAssignment;
    pub use crate::basic_types::Solution;
    pub use crate::engine::SearchResult;
    pub use crate::schedule::ScheduleReport;
    pub use crate::schedule::SolveStatus;
}
