use crate::basic_types::Solution;
use crate::engine::variables::VariableId;
use crate::model::all_pairs;
use crate::model::ProblemInstance;
use crate::model::VariableModel;

/// The grouping table: `rounds[r].teams[t].carts[c]` lists the riders of a cart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schedule {
    pub rounds: Vec<RoundSchedule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoundSchedule {
    pub teams: Vec<TeamSchedule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TeamSchedule {
    /// The riders of each cart, in roster order.
    pub carts: Vec<Vec<String>>,
}

/// How often two participants shared a cart and a team.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PairStatistics {
    pub first: String,
    pub second: String,
    pub riding: u32,
    pub teamed: u32,
}

impl Schedule {
    /// The riders of the given cart.
    ///
    /// # Panics
    /// If the indices are out of range.
    pub fn riders(&self, round: usize, team: usize, cart: usize) -> &[String] {
        &self.rounds[round].teams[team].carts[cart]
    }
}

/// Reads the grouping table and the pair statistics from a solution of `model`.
pub fn extract(
    instance: &ProblemInstance,
    model: &VariableModel,
    solution: &Solution,
) -> (Schedule, Vec<PairStatistics>) {
    let rounds = instance
        .rounds()
        .map(|round| RoundSchedule {
            teams: instance
                .teams(round)
                .map(|team| TeamSchedule {
                    carts: instance
                        .team_slots(round, team)
                        .iter()
                        .map(|&slot| {
                            instance
                                .participants()
                                .filter(|&participant| {
                                    solution.get_value(model.assignment_variable(slot, participant))
                                })
                                .map(|participant| instance.name(participant).to_owned())
                                .collect()
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let pair_statistics = all_pairs(instance.num_participants())
        .map(|pair| PairStatistics {
            first: instance.name(pair.first()).to_owned(),
            second: instance.name(pair.second()).to_owned(),
            riding: count_true(solution, model.riding_variables(pair)),
            teamed: count_true(
                solution,
                instance
                    .rounds()
                    .flat_map(|round| model.teamed_variables(pair, round)),
            ),
        })
        .collect();

    (Schedule { rounds }, pair_statistics)
}

fn count_true(solution: &Solution, variables: impl Iterator<Item = VariableId>) -> u32 {
    variables
        .filter(|&variable| solution.get_value(variable))
        .count() as u32
}
