//! Parallel exploration of disjoint subtrees with `rayon`.
use log::debug;
use log::warn;
use rayon::prelude::*;

use super::incumbent::Incumbent;
use super::search_engine::root_engine;
use super::search_engine::SearchWorker;
use super::search_engine::WorkerOutcome;
use super::BranchingOrder;
use super::ConstraintStore;
use super::PropagationEngine;
use super::SearchStatistics;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;

/// Splits the tree on the first open branching group and explores the parts on a pool of
/// `num_threads` threads.
///
/// For open variables `v_0, ..., v_k` of the group, part `i` assumes `v_i` and `!v_j` for all
/// `j < i`, and a final part assumes all of them false; together the parts cover the tree exactly
/// once. Every part gets a private engine and a clone of `termination`; the store, the branching
/// order and the incumbent are shared.
pub(crate) fn search_in_parallel<T>(
    store: &ConstraintStore,
    branching: &BranchingOrder,
    root: PropagationEngine,
    optimise: bool,
    num_threads: usize,
    termination: &T,
    incumbent: &Incumbent,
) -> (WorkerOutcome, SearchStatistics)
where
    T: TerminationCondition + Clone + Send,
{
    let Some(open_variables) = branching.first_open_group(root.assignments()) else {
        // Nothing to split on; the root already determines the remaining search.
        let mut worker = SearchWorker::new(store, branching, root, optimise);
        let outcome = worker.run(&mut termination.clone(), incumbent);
        return (outcome, worker.statistics());
    };

    let parts = split(&open_variables);
    debug!("splitting the search into {} parts", parts.len());

    let parts = parts
        .into_iter()
        .map(|assumptions| (assumptions, termination.clone()))
        .collect::<Vec<_>>();

    let explore = move || {
        parts
            .into_par_iter()
            .map(|(assumptions, mut termination)| {
                match root_engine(store, &assumptions) {
                    Ok(engine) => {
                        let mut worker = SearchWorker::new(store, branching, engine, optimise);
                        let outcome = worker.run(&mut termination, incumbent);
                        (outcome, worker.statistics())
                    }
                    Err(_) => {
                        let statistics = SearchStatistics {
                            num_conflicts: 1,
                            num_workers: 1,
                            ..Default::default()
                        };
                        (WorkerOutcome::Completed, statistics)
                    }
                }
            })
            .collect::<Vec<_>>()
    };

    let results = match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool.install(explore),
        Err(error) => {
            warn!("could not create a thread pool ({error}), using the global pool");
            explore()
        }
    };

    results.into_iter().fold(
        (WorkerOutcome::Completed, SearchStatistics::default()),
        |(outcome, mut statistics), (worker_outcome, worker_statistics)| {
            statistics.merge(&worker_statistics);
            let outcome = if worker_outcome == WorkerOutcome::Interrupted {
                WorkerOutcome::Interrupted
            } else {
                outcome
            };
            (outcome, statistics)
        },
    )
}

fn split(open_variables: &[VariableId]) -> Vec<Vec<Literal>> {
    (0..=open_variables.len())
        .map(|index| {
            let mut assumptions = open_variables[..index]
                .iter()
                .map(|&variable| Literal::negative(variable))
                .collect::<Vec<_>>();
            if let Some(&variable) = open_variables.get(index) {
                assumptions.push(Literal::positive(variable));
            }
            assumptions
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn split_covers_every_choice_once() {
        let variables = [0, 1]
            .map(VariableId::create_from_index)
            .to_vec();

        let parts = split(&variables);

        assert_eq!(
            vec![
                vec![Literal::positive(variables[0])],
                vec![Literal::negative(variables[0]), Literal::positive(variables[1])],
                vec![Literal::negative(variables[0]), Literal::negative(variables[1])],
            ],
            parts
        );
    }
}
