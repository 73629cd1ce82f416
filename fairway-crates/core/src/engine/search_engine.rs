use std::time::Instant;

use log::debug;
use log::info;

use super::incumbent::Incumbent;
use super::parallel_search::search_in_parallel;
use super::BranchingOrder;
use super::ConstraintStore;
use super::PropagationEngine;
use super::SearchStatistics;
use crate::basic_types::Contradiction;
use crate::basic_types::Solution;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Literal;
use crate::fairway_assert_eq_simple;
use crate::fairway_assert_moderate;

/// The outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// The search completed. Without an objective the solution satisfies all constraints; with an
    /// objective it is also proven optimal.
    Feasible(Solution),
    /// The termination condition triggered after at least one solution was found; the solution is
    /// the best one found but it has not been proven optimal.
    SuboptimalButFeasible(Solution),
    /// The search space was exhausted without finding a solution.
    Infeasible,
    /// The termination condition triggered before any solution was found.
    Unknown,
}

impl SearchResult {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchResult::Feasible(solution) | SearchResult::SuboptimalButFeasible(solution) => {
                Some(solution)
            }
            SearchResult::Infeasible | SearchResult::Unknown => None,
        }
    }
}

/// Options which influence how the search explores the tree. The outcome (feasible or not) does not
/// depend on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    /// The number of workers which explore disjoint subtrees; `1` searches sequentially and is
    /// fully deterministic.
    pub num_threads: usize,
    pub mode: SearchMode,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            num_threads: 1,
            mode: SearchMode::default(),
        }
    }
}

/// Whether the search maximises the objective or stops at the first solution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SearchMode {
    /// Keep searching until the best schedule is proven optimal.
    #[default]
    Optimise,
    /// Stop at the first schedule which satisfies every rule.
    Satisfy,
}

/// How a single worker finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WorkerOutcome {
    /// The subtree of the worker is fully explored (or a solution was found in satisfaction mode).
    Completed,
    /// The termination condition triggered.
    Interrupted,
}

/// Creates an engine in which `assumptions` hold at the root and propagation has reached a fixed
/// point.
pub(crate) fn root_engine(
    store: &ConstraintStore,
    assumptions: &[Literal],
) -> Result<PropagationEngine, Contradiction> {
    let mut engine = PropagationEngine::new(store);
    engine.enqueue_all(store);

    for &assumption in assumptions {
        engine.assign(store, assumption)?;
    }
    engine.propagate(store)?;

    Ok(engine)
}

/// Runs the search over the variables of `store` and returns the result together with the search
/// statistics.
pub(crate) fn search<T>(
    store: &ConstraintStore,
    branching: &BranchingOrder,
    options: SearchOptions,
    termination: &mut T,
) -> (SearchResult, SearchStatistics)
where
    T: TerminationCondition + Clone + Send,
{
    let started_at = Instant::now();
    let optimise = options.mode == SearchMode::Optimise
        && store.objective().is_some_and(|objective| !objective.is_empty());

    debug!(
        "searching over {} variables and {} constraints (optimise: {optimise}, threads: {})",
        store.num_variables(),
        store.num_constraints(),
        options.num_threads
    );

    let incumbent = Incumbent::default();
    let mut statistics = SearchStatistics::default();

    let outcome = match root_engine(store, &[]) {
        Err(Contradiction) => {
            debug!("root propagation failed");
            statistics.num_conflicts += 1;
            WorkerOutcome::Completed
        }
        Ok(engine) if options.num_threads > 1 => {
            let (outcome, worker_statistics) = search_in_parallel(
                store,
                branching,
                engine,
                optimise,
                options.num_threads,
                termination,
                &incumbent,
            );
            statistics.merge(&worker_statistics);
            outcome
        }
        Ok(engine) => {
            let mut worker = SearchWorker::new(store, branching, engine, optimise);
            let outcome = worker.run(termination, &incumbent);
            statistics.merge(&worker.statistics());
            outcome
        }
    };

    statistics.time_spent_in_solver = started_at.elapsed().as_millis() as u64;

    let result = match (outcome, incumbent.into_best()) {
        (WorkerOutcome::Completed, Some((_, solution))) => SearchResult::Feasible(solution),
        (WorkerOutcome::Completed, None) => SearchResult::Infeasible,
        (WorkerOutcome::Interrupted, Some((_, solution))) => {
            SearchResult::SuboptimalButFeasible(solution)
        }
        (WorkerOutcome::Interrupted, None) => SearchResult::Unknown,
    };

    if outcome == WorkerOutcome::Interrupted {
        info!("search interrupted by its termination condition");
    }

    (result, statistics)
}

/// A depth-first search with chronological backtracking over the state of one
/// [`PropagationEngine`].
///
/// Every decision opens a decision level. When propagation fails, the most recent decision is
/// undone and its negation is asserted on the level below (refutation); if that fails as well the
/// search keeps unwinding. The subtree is exhausted once a failure occurs without any decision
/// left.
#[derive(Debug)]
pub(crate) struct SearchWorker<'a> {
    store: &'a ConstraintStore,
    branching: &'a BranchingOrder,
    engine: PropagationEngine,
    decisions: Vec<Literal>,
    optimise: bool,
    statistics: SearchStatistics,
}

impl<'a> SearchWorker<'a> {
    pub(crate) fn new(
        store: &'a ConstraintStore,
        branching: &'a BranchingOrder,
        engine: PropagationEngine,
        optimise: bool,
    ) -> SearchWorker<'a> {
        SearchWorker {
            store,
            branching,
            engine,
            decisions: Vec::new(),
            optimise,
            statistics: SearchStatistics {
                num_workers: 1,
                ..Default::default()
            },
        }
    }

    pub(crate) fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            num_propagations: self.engine.num_propagations(),
            ..self.statistics
        }
    }

    pub(crate) fn run(
        &mut self,
        termination: &mut impl TerminationCondition,
        incumbent: &Incumbent,
    ) -> WorkerOutcome {
        loop {
            if !self.optimise && incumbent.best_value().is_some() {
                // Another worker already found a solution.
                return WorkerOutcome::Completed;
            }

            if self.cannot_improve(incumbent) {
                self.statistics.num_pruned_by_bound += 1;
                if !self.refute() {
                    return WorkerOutcome::Completed;
                }
                continue;
            }

            match self.branching.next_decision(self.engine.assignments()) {
                Some(decision) => {
                    if termination.should_stop() {
                        return WorkerOutcome::Interrupted;
                    }

                    self.statistics.num_decisions += 1;
                    termination.decision_has_been_made();

                    self.decisions.push(decision);
                    self.engine.decide(self.store, decision);
                    fairway_assert_eq_simple!(self.decisions.len(), self.engine.get_decision_level());
                    fairway_assert_moderate!(
                        self.engine.assignments().assigned_at_level(self.decisions.len())[0]
                            == decision.variable(),
                        "a decision opens its level"
                    );

                    if self.engine.propagate(self.store).is_err() {
                        self.statistics.num_conflicts += 1;
                        if !self.refute() {
                            return WorkerOutcome::Completed;
                        }
                    }
                }
                None => {
                    self.record_solution(incumbent);

                    if !self.optimise || !self.refute() {
                        return WorkerOutcome::Completed;
                    }
                }
            }
        }
    }

    /// Whether the best objective value reachable from the current node is no better than the
    /// incumbent.
    fn cannot_improve(&self, incumbent: &Incumbent) -> bool {
        if !self.optimise {
            return false;
        }

        match (self.store.objective(), incumbent.best_value()) {
            (Some(objective), Some(best)) => {
                objective.upper_bound(self.engine.assignments()) <= best
            }
            _ => false,
        }
    }

    fn record_solution(&mut self, incumbent: &Incumbent) {
        self.statistics.num_solutions += 1;

        let solution = self.engine.assignments().to_solution();
        let value = self
            .store
            .objective()
            .map_or(0, |objective| objective.value(&solution));

        if incumbent.offer(value, &solution) {
            info!("found a solution with objective value {value}");
        }
    }

    /// Undoes the most recent decision and asserts its negation, unwinding further while that
    /// fails. Returns `false` if no decision is left, i.e. the subtree is exhausted.
    fn refute(&mut self) -> bool {
        while let Some(decision) = self.decisions.pop() {
            self.engine.backtrack(self.store, self.decisions.len());

            let status = self
                .engine
                .assign(self.store, !decision)
                .and_then(|()| self.engine.propagate(self.store));

            if status.is_ok() {
                return true;
            }

            self.statistics.num_conflicts += 1;
        }

        false
    }
}
