//! Reading a solution back into a schedule.
mod extractor;

pub use extractor::extract;
pub use extractor::PairStatistics;
pub use extractor::RoundSchedule;
pub use extractor::Schedule;
pub use extractor::TeamSchedule;

use crate::engine::SearchResult;
use crate::model::RuleCategory;

/// The feasibility status of a solve, as reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolveStatus {
    /// A schedule was found and the search completed: it is optimal if there is a friend objective.
    Feasible,
    /// A schedule was found but the budget ran out before it was proven optimal.
    SuboptimalButFeasible,
    /// No schedule satisfies the rules.
    Infeasible,
    /// The budget ran out before any schedule was found.
    Unknown,
}

impl SolveStatus {
    pub fn has_schedule(&self) -> bool {
        matches!(self, SolveStatus::Feasible | SolveStatus::SuboptimalButFeasible)
    }
}

impl From<&SearchResult> for SolveStatus {
    fn from(result: &SearchResult) -> Self {
        match result {
            SearchResult::Feasible(_) => SolveStatus::Feasible,
            SearchResult::SuboptimalButFeasible(_) => SolveStatus::SuboptimalButFeasible,
            SearchResult::Infeasible => SolveStatus::Infeasible,
            SearchResult::Unknown => SolveStatus::Unknown,
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::SuboptimalButFeasible => "SUBOPTIMAL_BUT_FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
        };
        write!(f, "{status}")
    }
}

/// Everything the reporting side needs from a solve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScheduleReport {
    pub status: SolveStatus,
    /// Present if the status has a schedule.
    pub schedule: Option<Schedule>,
    /// Every unordered pair in roster order; empty without a schedule.
    pub pair_statistics: Vec<PairStatistics>,
    /// The number of (friend pair, round) combinations teamed together; absent without a
    /// schedule.
    pub objective: Option<i64>,
    /// The kinds of rule the instance carries.
    pub rules: Vec<RuleCategory>,
}
