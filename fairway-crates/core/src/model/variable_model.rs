use log::debug;

use super::gates::AndGate;
use super::gates::OrGate;
use super::ids::all_pairs;
use super::ids::PairId;
use super::ids::ParticipantId;
use super::ids::ParticipantPair;
use super::ids::RoundId;
use super::ids::SlotId;
use super::ids::TeamId;
use super::instance::ProblemInstance;
use crate::basic_types::ModelError;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::variables::Literal;
use crate::engine::variables::VariableId;
use crate::engine::BranchingOrder;
use crate::engine::Constraint;
use crate::engine::ConstraintStore;
use crate::engine::Objective;
use crate::engine::ObjectiveGroup;
use crate::engine::ObjectiveTerm;

/// The boolean variables of a schedule and the constraints tying them together.
///
/// - An assignment variable per (slot, participant): the participant occupies the slot.
/// - A membership variable per (round, team, participant): OR over the team's assignment variables.
/// - An alone variable per (participant, round): OR over the single-occupancy slots of the round.
/// - A riding variable per (pair, slot) for slots seating two or more: AND of the two assignment
///   variables.
/// - A teamed variable per (pair, round, team) for teams of two or more: AND of the two membership
///   variables.
#[derive(Clone, Debug)]
pub struct VariableModel {
    num_participants: usize,
    assignment: KeyedVec<SlotId, Box<[VariableId]>>,
    membership: KeyedVec<RoundId, KeyedVec<TeamId, Box<[VariableId]>>>,
    alone: KeyedVec<ParticipantId, KeyedVec<RoundId, VariableId>>,
    riding: KeyedVec<PairId, Vec<(SlotId, VariableId)>>,
    teamed: KeyedVec<PairId, KeyedVec<RoundId, Vec<(TeamId, VariableId)>>>,
}

impl VariableModel {
    /// Declares all variables of `instance` in `store` and posts the gate definitions, the hard
    /// rules and the friend objective.
    pub fn build(
        instance: &ProblemInstance,
        store: &mut ConstraintStore,
    ) -> Result<VariableModel, ModelError> {
        let model = VariableModel::declare(instance, store)?;

        model.post_capacity_constraints(instance, store)?;
        model.post_pair_constraints(instance, store)?;
        model.post_alone_constraints(instance, store)?;

        if let Some(objective) = model.friend_objective(instance) {
            store.set_objective(objective)?;
        }

        debug!(
            "built a model with {} variables and {} constraints",
            store.num_variables(),
            store.num_constraints()
        );

        Ok(model)
    }

    pub fn assignment_variable(&self, slot: SlotId, participant: ParticipantId) -> VariableId {
        self.assignment[slot][participant.index()]
    }

    pub fn membership_variable(
        &self,
        round: RoundId,
        team: TeamId,
        participant: ParticipantId,
    ) -> VariableId {
        self.membership[round][team][participant.index()]
    }

    pub fn alone_variable(&self, participant: ParticipantId, round: RoundId) -> VariableId {
        self.alone[participant][round]
    }

    /// The riding variables of `pair`, one per slot which seats two or more.
    pub fn riding_variables(&self, pair: ParticipantPair) -> impl Iterator<Item = VariableId> + '_ {
        self.riding[pair.id(self.num_participants)]
            .iter()
            .map(|&(_, variable)| variable)
    }

    /// The teamed variables of `pair` in `round`, one per team of two or more.
    pub fn teamed_variables(
        &self,
        pair: ParticipantPair,
        round: RoundId,
    ) -> impl Iterator<Item = VariableId> + '_ {
        self.teamed[pair.id(self.num_participants)][round]
            .iter()
            .map(|&(_, variable)| variable)
    }

    /// Branches on the assignment variables only: rounds in order, within a round participants in
    /// roster order, and for each participant the slots by team and then cart.
    pub fn branching_order(&self, instance: &ProblemInstance) -> BranchingOrder {
        BranchingOrder::new(instance.rounds().flat_map(|round| {
            instance.participants().map(move |participant| {
                instance
                    .round_slots(round)
                    .map(|slot| self.assignment_variable(slot, participant))
                    .collect()
            })
        }))
    }

    fn declare(
        instance: &ProblemInstance,
        store: &mut ConstraintStore,
    ) -> Result<VariableModel, ModelError> {
        let participants = instance.participants().collect::<Vec<_>>();

        let mut assignment: KeyedVec<SlotId, Box<[VariableId]>> = KeyedVec::default();
        for (_, slot) in instance.slots() {
            let variables = participants
                .iter()
                .map(|&participant| {
                    store.new_variable(format!(
                        "{}@{}{}{}",
                        instance.name(participant),
                        slot.round,
                        slot.team,
                        slot.cart
                    ))
                })
                .collect();
            let _ = assignment.push(variables);
        }

        let mut membership: KeyedVec<RoundId, KeyedVec<TeamId, Box<[VariableId]>>> =
            KeyedVec::default();
        for round in instance.rounds() {
            let mut teams = KeyedVec::default();
            for team in instance.teams(round) {
                let mut variables = Vec::with_capacity(participants.len());
                for &participant in participants.iter() {
                    let output = store.new_variable(format!(
                        "{}@{round}{team}",
                        instance.name(participant)
                    ));
                    OrGate::new(
                        output,
                        instance
                            .team_slots(round, team)
                            .iter()
                            .map(|&slot| assignment[slot][participant.index()]),
                    )
                    .post(store)?;
                    variables.push(output);
                }
                let _ = teams.push(variables.into_boxed_slice());
            }
            let _ = membership.push(teams);
        }

        let mut alone: KeyedVec<ParticipantId, KeyedVec<RoundId, VariableId>> = KeyedVec::default();
        for &participant in participants.iter() {
            let mut rounds = KeyedVec::default();
            for round in instance.rounds() {
                let output =
                    store.new_variable(format!("{}@{round}/alone", instance.name(participant)));
                OrGate::new(
                    output,
                    instance
                        .round_slots(round)
                        .filter(|&slot| instance.slot(slot).occupancy == 1)
                        .map(|slot| assignment[slot][participant.index()]),
                )
                .post(store)?;
                let _ = rounds.push(output);
            }
            let _ = alone.push(rounds);
        }

        let mut riding: KeyedVec<PairId, Vec<(SlotId, VariableId)>> = KeyedVec::default();
        let mut teamed: KeyedVec<PairId, KeyedVec<RoundId, Vec<(TeamId, VariableId)>>> =
            KeyedVec::default();
        for pair in all_pairs(participants.len()) {
            let pair_name = format!(
                "{}+{}",
                instance.name(pair.first()),
                instance.name(pair.second())
            );

            let mut pair_riding = Vec::new();
            for (slot_id, slot) in instance.slots().filter(|(_, slot)| slot.occupancy >= 2) {
                let output = store.new_variable(format!(
                    "{pair_name}@{}{}{}",
                    slot.round, slot.team, slot.cart
                ));
                AndGate::new(
                    output,
                    [
                        assignment[slot_id][pair.first().index()],
                        assignment[slot_id][pair.second().index()],
                    ],
                )
                .post(store)?;
                pair_riding.push((slot_id, output));
            }
            let _ = riding.push(pair_riding);

            let mut pair_teamed = KeyedVec::default();
            for round in instance.rounds() {
                let mut round_teamed = Vec::new();
                for team in instance.teams(round) {
                    if instance.team_size(round, team) < 2 {
                        continue;
                    }

                    let output = store.new_variable(format!("{pair_name}@{round}{team}"));
                    let teams = &membership[round][team];
                    AndGate::new(
                        output,
                        [teams[pair.first().index()], teams[pair.second().index()]],
                    )
                    .post(store)?;
                    round_teamed.push((team, output));
                }
                let _ = pair_teamed.push(round_teamed);
            }
            let _ = teamed.push(pair_teamed);
        }

        Ok(VariableModel {
            num_participants: participants.len(),
            assignment,
            membership,
            alone,
            riding,
            teamed,
        })
    }

    /// Cart occupancy, team size, and one slot per participant per round.
    fn post_capacity_constraints(
        &self,
        instance: &ProblemInstance,
        store: &mut ConstraintStore,
    ) -> Result<(), ModelError> {
        for (slot_id, slot) in instance.slots() {
            let _ = store.add_constraint(Constraint::sum_equals(
                self.assignment[slot_id].iter().copied().map(Literal::positive),
                slot.occupancy,
            ))?;
        }

        for round in instance.rounds() {
            for team in instance.teams(round) {
                let _ = store.add_constraint(Constraint::sum_equals(
                    instance
                        .team_slots(round, team)
                        .iter()
                        .flat_map(|&slot| self.assignment[slot].iter().copied())
                        .map(Literal::positive),
                    instance.team_size(round, team),
                ))?;
            }

            for participant in instance.participants() {
                let _ = store.add_constraint(Constraint::sum_equals(
                    instance
                        .round_slots(round)
                        .map(|slot| Literal::positive(self.assignment_variable(slot, participant))),
                    1,
                ))?;
            }
        }

        Ok(())
    }

    /// Riding bounds (pinned for must-pair and never-pair pairs) and the teamed bound.
    fn post_pair_constraints(
        &self,
        instance: &ProblemInstance,
        store: &mut ConstraintStore,
    ) -> Result<(), ModelError> {
        for pair in all_pairs(self.num_participants) {
            let pair_id = pair.id(self.num_participants);
            let riding = self.riding[pair_id]
                .iter()
                .map(|&(_, variable)| Literal::positive(variable))
                .collect::<Vec<_>>();

            let constraint = if instance.must_pair_once().binary_search(&pair).is_ok() {
                Some(Constraint::sum_equals(riding, 1))
            } else if instance.must_never_pair().binary_search(&pair).is_ok() {
                Some(Constraint::sum_equals(riding, 0))
            } else if !riding.is_empty() {
                Some(Constraint::sum_at_most(riding, instance.max_ride_together()))
            } else {
                None
            };

            if let Some(constraint) = constraint {
                let _ = store.add_constraint(constraint)?;
            }

            if let Some(max_teamed_together) = instance.max_teamed_together() {
                let teamed = self.teamed[pair_id]
                    .iter()
                    .flat_map(|round| {
                        round
                            .iter()
                            .map(|&(_, variable)| Literal::positive(variable))
                    })
                    .collect::<Vec<_>>();
                if !teamed.is_empty() {
                    let _ = store
                        .add_constraint(Constraint::sum_at_most(teamed, max_teamed_together))?;
                }
            }
        }

        Ok(())
    }

    fn post_alone_constraints(
        &self,
        instance: &ProblemInstance,
        store: &mut ConstraintStore,
    ) -> Result<(), ModelError> {
        let Some(bounds) = instance.alone_bounds() else {
            return Ok(());
        };

        for participant in instance.participants() {
            let alone = self.alone[participant]
                .iter()
                .copied()
                .map(Literal::positive)
                .collect::<Vec<_>>();

            let _ = store.add_constraint(Constraint::sum_at_least(alone.clone(), bounds.min))?;
            let _ = store.add_constraint(Constraint::sum_at_most(alone, bounds.max))?;
        }

        Ok(())
    }

    /// One group per friend pair with one term per round, capped by the teamed bound.
    fn friend_objective(&self, instance: &ProblemInstance) -> Option<Objective> {
        if instance.friend_pairs().is_empty() {
            return None;
        }

        let groups = instance
            .friend_pairs()
            .iter()
            .map(|&pair| {
                let terms = instance
                    .rounds()
                    .map(|round| {
                        ObjectiveTerm::new(
                            self.teamed[pair.id(self.num_participants)][round]
                                .iter()
                                .map(|&(_, variable)| Literal::positive(variable)),
                        )
                    })
                    .filter(|term| !term.alternatives().is_empty())
                    .collect();
                ObjectiveGroup::new(1, instance.max_teamed_together(), terms)
            })
            .collect();

        Some(Objective::new(groups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::search;
    use crate::engine::termination::Indefinite;
    use crate::engine::SearchOptions;
    use crate::model::Participant;
    use crate::model::RuleSet;
    use crate::model::TeamSpec;
    use crate::model::Topology;

    fn instance(teams: Vec<TeamSpec>, roster: &[&str]) -> ProblemInstance {
        ProblemInstance::new(
            roster.iter().map(|&name| Participant::new(name)).collect(),
            Topology::Uniform { rounds: 1, teams },
            RuleSet::default(),
        )
        .expect("valid instance")
    }

    #[test]
    fn derived_variables_exist_only_where_two_can_meet() {
        let instance = instance(
            vec![TeamSpec::with_carts([2, 1]), TeamSpec::with_carts([1])],
            &["A", "B", "C", "D"],
        );
        let mut store = ConstraintStore::default();
        let model = VariableModel::build(&instance, &mut store).expect("valid model");

        let pair = all_pairs(4).next().expect("four participants have pairs");
        let round = RoundId::create_from_index(0);

        assert_eq!(1, model.riding_variables(pair).count());
        assert_eq!(1, model.teamed_variables(pair, round).count());
        // 3 slots and 2 teams per participant, 1 alone indicator each, 6 pairs with 1 riding and
        // 1 teamed variable.
        assert_eq!(4 * 3 + 4 * 2 + 4 + 6 * 2, store.num_variables());
    }

    #[test]
    fn derived_variables_follow_the_assignment() {
        let instance = instance(
            vec![TeamSpec::with_carts([2, 1]), TeamSpec::with_carts([1])],
            &["A", "B", "C", "D"],
        );
        let mut store = ConstraintStore::default();
        let model = VariableModel::build(&instance, &mut store).expect("valid model");

        let (result, _) = search(
            &store,
            &model.branching_order(&instance),
            SearchOptions::default(),
            &mut Indefinite,
        );
        let solution = result.solution().expect("feasible instance");

        for round in instance.rounds() {
            for participant in instance.participants() {
                let alone = instance
                    .round_slots(round)
                    .filter(|&slot| instance.slot(slot).occupancy == 1)
                    .any(|slot| solution.get_value(model.assignment_variable(slot, participant)));
                assert_eq!(
                    alone,
                    solution.get_value(model.alone_variable(participant, round))
                );

                for team in instance.teams(round) {
                    let member = instance.team_slots(round, team).iter().any(|&slot| {
                        solution.get_value(model.assignment_variable(slot, participant))
                    });
                    assert_eq!(
                        member,
                        solution.get_value(model.membership_variable(round, team, participant))
                    );
                }
            }
        }

        let num_riding_pairs = all_pairs(4)
            .filter(|&pair| {
                model
                    .riding_variables(pair)
                    .any(|variable| solution.get_value(variable))
            })
            .count();
        assert_eq!(1, num_riding_pairs);
    }
}
