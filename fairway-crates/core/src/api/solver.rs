use log::debug;
use log::warn;

use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::engine::search;
use crate::engine::termination::TerminationCondition;
use crate::engine::BranchingOrder;
use crate::engine::ConstraintStore;
use crate::engine::SearchMode;
use crate::engine::SearchOptions;
use crate::engine::SearchStatistics;
use crate::fairway_assert_moderate;
use crate::model::ProblemInstance;
use crate::model::VariableModel;
use crate::schedule::extract;
use crate::schedule::ScheduleReport;
use crate::schedule::SolveStatus;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The main interaction point: builds the model of a [`ProblemInstance`] and searches for a
/// schedule.
///
/// ```rust
/// # use fairway_core::model::Participant;
/// # use fairway_core::model::ProblemInstance;
/// # use fairway_core::model::RuleSet;
/// # use fairway_core::model::TeamSpec;
/// # use fairway_core::model::Topology;
/// # use fairway_core::results::SolveStatus;
/// # use fairway_core::termination::Indefinite;
/// # use fairway_core::Solver;
/// let participants = ["Ann", "Bo", "Cy", "Di"].map(Participant::new).to_vec();
/// let topology = Topology::Uniform {
///     rounds: 1,
///     teams: vec![TeamSpec::with_carts([2]), TeamSpec::with_carts([2])],
/// };
/// let instance = ProblemInstance::new(participants, topology, RuleSet::default())?;
///
/// let mut solver = Solver::new(instance)?;
/// let report = solver.solve(&mut Indefinite);
///
/// assert_eq!(SolveStatus::Feasible, report.status);
/// assert_eq!(2, report.schedule.expect("feasible").riders(0, 1, 0).len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    instance: ProblemInstance,
    model: VariableModel,
    store: ConstraintStore,
    branching: BranchingOrder,
    options: SearchOptions,
    statistics: SearchStatistics,
}

impl Solver {
    /// Builds the variables, constraints and objective for `instance`.
    pub fn new(instance: ProblemInstance) -> Result<Solver, ModelError> {
        let mut store = ConstraintStore::default();
        let model = VariableModel::build(&instance, &mut store)?;
        let branching = model.branching_order(&instance);

        Ok(Solver {
            instance,
            model,
            store,
            branching,
            options: SearchOptions::default(),
            statistics: SearchStatistics::default(),
        })
    }

    /// Replaces the [`SearchOptions`] used by [`Solver::solve`].
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn model(&self) -> &VariableModel {
        &self.model
    }

    pub fn constraint_store(&self) -> &ConstraintStore {
        &self.store
    }

    /// The statistics of the most recent call to [`Solver::solve`].
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    /// Searches for a schedule until the search completes or `termination` triggers.
    ///
    /// With friend pairs and in [`SearchMode::Optimise`], a [`SolveStatus::Feasible`]
    /// schedule maximises the number of rounds friends are teamed together.
    pub fn solve<T>(&mut self, termination: &mut T) -> ScheduleReport
    where
        T: TerminationCondition + Clone + Send,
    {
        if self.options.mode == SearchMode::Optimise && self.store.objective().is_none() {
            warn!("no friend pairs are declared; the first schedule found is optimal");
        }

        let (result, statistics) = search(&self.store, &self.branching, self.options, termination);
        self.statistics = statistics;

        let status = SolveStatus::from(&result);
        debug!("search finished with status {status}");

        match result.solution() {
            Some(solution) => self.report(status, solution),
            None => ScheduleReport {
                status,
                schedule: None,
                pair_statistics: Vec::new(),
                objective: None,
                rules: self.instance.rule_categories(),
            },
        }
    }

    /// Logs the statistics of the most recent solve, if statistic logging is configured.
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics.log(StatisticLogger::default());
        log_statistic_postfix();
    }

    /// Logs the statistics together with the objective value of the reported schedule.
    pub fn log_statistics_with_objective(&self, objective_value: i64) {
        log_statistic("objective", objective_value);
        self.log_statistics();
    }

    fn report(&self, status: SolveStatus, solution: &Solution) -> ScheduleReport {
        fairway_assert_moderate!(
            self.store.violated_constraints(solution).next().is_none(),
            "a reported schedule satisfies every constraint"
        );

        let (schedule, pair_statistics) = extract(&self.instance, &self.model, solution);
        let objective = self
            .store
            .objective()
            .map_or(0, |objective| objective.value(solution));

        ScheduleReport {
            status,
            schedule: Some(schedule),
            pair_statistics,
            objective: Some(objective),
            rules: self.instance.rule_categories(),
        }
    }
}
