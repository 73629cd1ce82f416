use log::warn;

use super::ids::CartId;
use super::ids::ParticipantId;
use super::ids::ParticipantPair;
use super::ids::RoundId;
use super::ids::SlotId;
use super::ids::TeamId;
use crate::basic_types::ConfigError;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// A member of the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Participant {
    pub name: String,
    /// Names of the participants this one would like to be teamed with.
    pub friends: Vec<String>,
    /// Attributes which are only used to generate pairing rules.
    pub flags: HashMap<String, bool>,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Participant {
        Participant {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_friends(mut self, friends: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.friends = friends.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flag(mut self, flag: impl Into<String>, value: bool) -> Self {
        let _ = self.flags.insert(flag.into(), value);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartSpec {
    pub occupancy: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamSpec {
    pub size: u32,
    pub carts: Vec<CartSpec>,
}

impl TeamSpec {
    /// A team whose size is the sum of the given cart occupancies.
    pub fn with_carts(occupancies: impl IntoIterator<Item = u32>) -> TeamSpec {
        let carts = occupancies
            .into_iter()
            .map(|occupancy| CartSpec { occupancy })
            .collect::<Vec<_>>();
        TeamSpec {
            size: carts
                .iter()
                .fold(0, |size: u32, cart| size.saturating_add(cart.occupancy)),
            carts,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTopology {
    pub teams: Vec<TeamSpec>,
}

/// The teams and carts of every round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Every round has the same teams.
    Uniform { rounds: usize, teams: Vec<TeamSpec> },
    /// Each round has its own teams.
    PerRound(Vec<RoundTopology>),
}

impl Topology {
    fn into_rounds(self) -> Vec<RoundTopology> {
        match self {
            Topology::Uniform { rounds, teams } => vec![RoundTopology { teams }; rounds],
            Topology::PerRound(rounds) => rounds,
        }
    }
}

/// Inclusive bounds on the number of rounds a participant rides alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AloneBounds {
    pub min: u32,
    pub max: u32,
}

/// The pairing rules, with participants referred to by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    /// Pairs which must ride together exactly once.
    pub must_pair_once: Vec<(String, String)>,
    /// Pairs which must never ride together.
    pub must_never_pair: Vec<(String, String)>,
    /// The maximum number of rounds any pair is on the same team; unbounded if absent.
    pub max_teamed_together: Option<u32>,
    /// The maximum number of rounds any other pair rides in the same cart.
    pub max_ride_together: u32,
    pub alone_bounds: Option<AloneBounds>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            must_pair_once: Vec::new(),
            must_never_pair: Vec::new(),
            max_teamed_together: None,
            max_ride_together: 1,
            alone_bounds: None,
        }
    }
}

/// A kind of pairing rule, used to tell the caller what an infeasible instance was asked to meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RuleCategory {
    MustPair,
    NeverPair,
    RideMaximum,
    TeamMaximum,
    AloneBounds,
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self {
            RuleCategory::MustPair => "must-pair",
            RuleCategory::NeverPair => "never-pair",
            RuleCategory::RideMaximum => "ride maximum",
            RuleCategory::TeamMaximum => "team maximum",
            RuleCategory::AloneBounds => "alone bounds",
        };
        write!(f, "{category}")
    }
}

/// A (round, team, cart) triple together with its occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub round: RoundId,
    pub team: TeamId,
    pub cart: CartId,
    pub occupancy: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct TeamLayout {
    pub(crate) size: u32,
    pub(crate) slots: Vec<SlotId>,
}

/// A validated problem: participants, slots and rules resolved to ids.
///
/// Constructed once through [`ProblemInstance::new`]; everything downstream relies on its
/// consistency and never re-validates.
#[derive(Clone, Debug)]
pub struct ProblemInstance {
    names: KeyedVec<ParticipantId, String>,
    slots: KeyedVec<SlotId, Slot>,
    rounds: KeyedVec<RoundId, KeyedVec<TeamId, TeamLayout>>,
    friend_pairs: Vec<ParticipantPair>,
    must_pair_once: Vec<ParticipantPair>,
    must_never_pair: Vec<ParticipantPair>,
    max_teamed_together: Option<u32>,
    max_ride_together: u32,
    alone_bounds: Option<AloneBounds>,
}

impl ProblemInstance {
    /// Validates the input and resolves all names.
    ///
    /// The friend graph is symmetrised: a pair is a friend pair if either participant lists the
    /// other.
    pub fn new(
        participants: Vec<Participant>,
        topology: Topology,
        rules: RuleSet,
    ) -> Result<ProblemInstance, ConfigError> {
        let mut ids_by_name: HashMap<&str, ParticipantId> = HashMap::default();
        let mut names = KeyedVec::default();
        for participant in participants.iter() {
            let id = names.push(participant.name.clone());
            if ids_by_name.insert(participant.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateParticipant(participant.name.clone()));
            }
        }

        let (slots, rounds) = build_layout(topology.into_rounds(), names.len())?;

        let resolve = |name: &str| {
            ids_by_name
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::UnknownParticipant(name.to_owned()))
        };
        let resolve_pair = |(first, second): &(String, String)| {
            ParticipantPair::new(resolve(first.as_str())?, resolve(second.as_str())?)
                .ok_or_else(|| ConfigError::SelfPairing(first.clone()))
        };

        let mut friend_pairs = Vec::new();
        for (id, participant) in participants.iter().enumerate() {
            let id = ParticipantId::create_from_index(id);
            for friend in participant.friends.iter() {
                match ParticipantPair::new(id, resolve(friend.as_str())?) {
                    Some(pair) => friend_pairs.push(pair),
                    None => warn!("{} lists themselves as a friend", participant.name),
                }
            }
        }
        sort_and_deduplicate(&mut friend_pairs);

        let mut must_pair_once = rules
            .must_pair_once
            .iter()
            .map(resolve_pair)
            .collect::<Result<Vec<_>, _>>()?;
        sort_and_deduplicate(&mut must_pair_once);

        let mut must_never_pair = rules
            .must_never_pair
            .iter()
            .map(resolve_pair)
            .collect::<Result<Vec<_>, _>>()?;
        sort_and_deduplicate(&mut must_never_pair);

        let pair_names = |pair: &ParticipantPair| {
            (
                names[pair.first()].clone(),
                names[pair.second()].clone(),
            )
        };

        let has_shared_cart = slots.iter().any(|slot| slot.occupancy >= 2);
        for pair in must_pair_once.iter() {
            if must_never_pair.binary_search(pair).is_ok() {
                let (first, second) = pair_names(pair);
                return Err(ConfigError::ContradictoryPairRules { first, second });
            }
            if rules.max_ride_together == 0 {
                let (first, second) = pair_names(pair);
                return Err(ConfigError::PairingForbiddenByMaximum { first, second });
            }
            if !has_shared_cart {
                let (first, second) = pair_names(pair);
                return Err(ConfigError::NoSharedCart { first, second });
            }
        }

        if let Some(AloneBounds { min, max }) = rules.alone_bounds {
            if min > max {
                return Err(ConfigError::InvertedAloneBounds { min, max });
            }
        }

        Ok(ProblemInstance {
            names,
            slots,
            rounds,
            friend_pairs,
            must_pair_once,
            must_never_pair,
            max_teamed_together: rules.max_teamed_together,
            max_ride_together: rules.max_ride_together,
            alone_bounds: rules.alone_bounds,
        })
    }

    pub fn num_participants(&self) -> usize {
        self.names.len()
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> {
        self.names.keys()
    }

    pub fn name(&self, participant: ParticipantId) -> &str {
        &self.names[participant]
    }

    pub fn rounds(&self) -> impl Iterator<Item = RoundId> {
        self.rounds.keys()
    }

    pub fn teams(&self, round: RoundId) -> impl Iterator<Item = TeamId> {
        self.rounds[round].keys()
    }

    pub fn team_size(&self, round: RoundId, team: TeamId) -> u32 {
        self.rounds[round][team].size
    }

    /// The slots of a team, in cart order.
    pub fn team_slots(&self, round: RoundId, team: TeamId) -> &[SlotId] {
        &self.rounds[round][team].slots
    }

    pub fn slot(&self, slot: SlotId) -> &Slot {
        &self.slots[slot]
    }

    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &Slot)> {
        self.slots.iter_enumerated()
    }

    /// The slots of a round, ordered by team and then cart.
    pub fn round_slots(&self, round: RoundId) -> impl Iterator<Item = SlotId> + '_ {
        self.rounds[round]
            .iter()
            .flat_map(|team| team.slots.iter().copied())
    }

    pub fn friend_pairs(&self) -> &[ParticipantPair] {
        &self.friend_pairs
    }

    pub fn must_pair_once(&self) -> &[ParticipantPair] {
        &self.must_pair_once
    }

    pub fn must_never_pair(&self) -> &[ParticipantPair] {
        &self.must_never_pair
    }

    pub fn max_teamed_together(&self) -> Option<u32> {
        self.max_teamed_together
    }

    pub fn max_ride_together(&self) -> u32 {
        self.max_ride_together
    }

    pub fn alone_bounds(&self) -> Option<AloneBounds> {
        self.alone_bounds
    }

    /// The kinds of rule this instance carries. The ride maximum is always present.
    pub fn rule_categories(&self) -> Vec<RuleCategory> {
        [
            (RuleCategory::MustPair, !self.must_pair_once.is_empty()),
            (RuleCategory::NeverPair, !self.must_never_pair.is_empty()),
            (RuleCategory::RideMaximum, true),
            (RuleCategory::TeamMaximum, self.max_teamed_together.is_some()),
            (RuleCategory::AloneBounds, self.alone_bounds.is_some()),
        ]
        .into_iter()
        .filter_map(|(category, present)| present.then_some(category))
        .collect()
    }
}

fn sort_and_deduplicate(pairs: &mut Vec<ParticipantPair>) {
    pairs.sort_unstable();
    pairs.dedup();
}

type Layout = (
    KeyedVec<SlotId, Slot>,
    KeyedVec<RoundId, KeyedVec<TeamId, TeamLayout>>,
);

fn build_layout(rounds: Vec<RoundTopology>, roster_size: usize) -> Result<Layout, ConfigError> {
    if rounds.is_empty() {
        return Err(ConfigError::NoRounds);
    }

    let mut slots = KeyedVec::default();
    let mut layout = KeyedVec::default();

    for (round_index, round_topology) in rounds.into_iter().enumerate() {
        if round_topology.teams.is_empty() {
            return Err(ConfigError::NoTeams { round: round_index });
        }

        let round = RoundId::create_from_index(round_index);
        let mut teams = KeyedVec::default();

        for (team_index, team_spec) in round_topology.teams.iter().enumerate() {
            if team_spec.size == 0 {
                return Err(ConfigError::EmptyTeam {
                    round: round_index,
                    team: team_index,
                });
            }

            let team = TeamId::create_from_index(team_index);
            let mut team_slots = Vec::with_capacity(team_spec.carts.len());

            for (cart_index, cart_spec) in team_spec.carts.iter().enumerate() {
                if cart_spec.occupancy == 0 {
                    return Err(ConfigError::EmptyCart {
                        round: round_index,
                        team: team_index,
                        cart: cart_index,
                    });
                }

                team_slots.push(slots.push(Slot {
                    round,
                    team,
                    cart: CartId::create_from_index(cart_index),
                    occupancy: cart_spec.occupancy,
                }));
            }

            let total = team_spec
                .carts
                .iter()
                .map(|cart| u64::from(cart.occupancy))
                .sum::<u64>();
            if total != u64::from(team_spec.size) {
                return Err(ConfigError::CartOccupancyMismatch {
                    round: round_index,
                    team: team_index,
                    total,
                    size: team_spec.size,
                });
            }

            let _ = teams.push(TeamLayout {
                size: team_spec.size,
                slots: team_slots,
            });
        }

        let total = round_topology
            .teams
            .iter()
            .map(|team| u64::from(team.size))
            .sum::<u64>();
        if total != roster_size as u64 {
            return Err(ConfigError::TeamSizeMismatch {
                round: round_index,
                total,
                roster_size,
            });
        }

        let _ = layout.push(teams);
    }

    Ok((slots, layout))
}
