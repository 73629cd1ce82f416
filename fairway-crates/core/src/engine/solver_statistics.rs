use crate::create_statistics_struct;

create_statistics_struct!(
    /// Statistics of a search, summed over all workers when the search runs in parallel.
    SearchStatistics {
        /// The number of decisions taken by the search
        num_decisions: u64,
        /// The number of contradictions encountered during propagation
        num_conflicts: u64,
        /// The number of literals assigned by propagation rather than by a decision
        num_propagations: u64,
        /// The number of complete assignments which were found
        num_solutions: u64,
        /// The number of nodes pruned because their objective bound could not beat the incumbent
        num_pruned_by_bound: u64,
        /// The number of search workers which explored a part of the tree
        num_workers: u64,
        /// The amount of time (in milliseconds) which is spent in the search
        time_spent_in_solver: u64,
});

impl SearchStatistics {
    /// Adds the counters of a worker to these statistics. The time spent is not summed since
    /// workers run concurrently.
    pub(crate) fn merge(&mut self, other: &SearchStatistics) {
        self.num_decisions += other.num_decisions;
        self.num_conflicts += other.num_conflicts;
        self.num_propagations += other.num_propagations;
        self.num_solutions += other.num_solutions;
        self.num_pruned_by_bound += other.num_pruned_by_bound;
        self.num_workers += other.num_workers;
        self.time_spent_in_solver = self.time_spent_in_solver.max(other.time_spent_in_solver);
    }
}
