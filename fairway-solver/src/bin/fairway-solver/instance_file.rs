//! Reading instances from TOML files.
//!
//! An instance file has three sections:
//!
//! ```toml
//! [topology]
//! rounds = 2
//!
//! [[topology.teams]]
//! carts = [{ occupancy = 2 }, { occupancy = 2 }]
//!
//! [[participants]]
//! name = "Kent"
//! friends = ["Jay"]
//! flags = { vaccinated = true }
//!
//! [rules]
//! must_pair_once = [["Kent", "Jay"]]
//! max_ride_together = 1
//! separate_on_flags = ["vaccinated"]
//! ```
//!
//! Instead of a round count with shared teams, `[[topology.rounds]]` lists the teams of every round
//! separately.
use std::path::Path;

use fairway_solver::containers::HashMap;
use fairway_solver::model::AloneBounds;
use fairway_solver::model::CartSpec;
use fairway_solver::model::Participant;
use fairway_solver::model::ProblemInstance;
use fairway_solver::model::RoundTopology;
use fairway_solver::model::RuleSet;
use fairway_solver::model::TeamSpec;
use fairway_solver::model::Topology;
use log::debug;
use log::warn;
use serde::Deserialize;

use crate::result::FairwayError;
use crate::result::FairwayResult;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InstanceFile {
    topology: TopologySection,
    participants: Vec<ParticipantEntry>,
    #[serde(default)]
    rules: RulesSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopologySection {
    rounds: RoundsEntry,
    /// The teams of every round; only allowed together with a round count.
    #[serde(default)]
    teams: Vec<TeamEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RoundsEntry {
    Count(usize),
    PerRound(Vec<RoundEntry>),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoundEntry {
    teams: Vec<TeamEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TeamEntry {
    /// Defaults to the sum of the cart occupancies.
    size: Option<u32>,
    carts: Vec<CartEntry>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CartEntry {
    occupancy: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ParticipantEntry {
    name: String,
    #[serde(default)]
    friends: Vec<String>,
    #[serde(default)]
    flags: HashMap<String, bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesSection {
    #[serde(default)]
    must_pair_once: Vec<(String, String)>,
    #[serde(default)]
    must_never_pair: Vec<(String, String)>,
    max_teamed_together: Option<u32>,
    max_ride_together: Option<u32>,
    alone_bounds: Option<AloneBoundsEntry>,
    /// Participants whose values differ for one of these flags never ride together. A flag which
    /// a participant does not carry counts as `false`.
    #[serde(default)]
    separate_on_flags: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AloneBoundsEntry {
    min: u32,
    max: u32,
}

impl InstanceFile {
    pub(crate) fn load(path: &Path) -> FairwayResult<InstanceFile> {
        let contents = std::fs::read_to_string(path)?;
        InstanceFile::from_toml_str(&contents)
    }

    pub(crate) fn from_toml_str(contents: &str) -> FairwayResult<InstanceFile> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolves the file into a validated instance, adding the pairs separated by flags to the
    /// never-pair rules.
    pub(crate) fn into_problem_instance(self) -> FairwayResult<ProblemInstance> {
        let topology = self.topology.into_topology()?;

        let participants = self
            .participants
            .into_iter()
            .map(|entry| Participant {
                name: entry.name,
                friends: entry.friends,
                flags: entry.flags,
            })
            .collect::<Vec<_>>();

        let rules = self.rules.into_rule_set(&participants);

        Ok(ProblemInstance::new(participants, topology, rules)?)
    }
}

impl TopologySection {
    fn into_topology(self) -> FairwayResult<Topology> {
        match self.rounds {
            RoundsEntry::Count(rounds) => Ok(Topology::Uniform {
                rounds,
                teams: self.teams.into_iter().map(TeamEntry::into_team_spec).collect(),
            }),
            RoundsEntry::PerRound(_) if !self.teams.is_empty() => Err(
                FairwayError::InvalidTopology(
                    "`topology.teams` cannot be combined with `[[topology.rounds]]`",
                ),
            ),
            RoundsEntry::PerRound(rounds) => Ok(Topology::PerRound(
                rounds
                    .into_iter()
                    .map(|round| RoundTopology {
                        teams: round.teams.into_iter().map(TeamEntry::into_team_spec).collect(),
                    })
                    .collect(),
            )),
        }
    }
}

impl TeamEntry {
    fn into_team_spec(self) -> TeamSpec {
        let occupancies = self.carts.into_iter().map(|cart| cart.occupancy);
        match self.size {
            Some(size) => TeamSpec {
                size,
                carts: occupancies.map(|occupancy| CartSpec { occupancy }).collect(),
            },
            None => TeamSpec::with_carts(occupancies),
        }
    }
}

impl RulesSection {
    fn into_rule_set(self, participants: &[Participant]) -> RuleSet {
        let mut must_never_pair = self.must_never_pair;
        let separated = separated_pairs(participants, &self.separate_on_flags);
        debug!("{} pairs are separated by flags", separated.len());
        must_never_pair.extend(separated);

        let defaults = RuleSet::default();
        RuleSet {
            must_pair_once: self.must_pair_once,
            must_never_pair,
            max_teamed_together: self.max_teamed_together,
            max_ride_together: self
                .max_ride_together
                .unwrap_or(defaults.max_ride_together),
            alone_bounds: self.alone_bounds.map(|bounds| AloneBounds {
                min: bounds.min,
                max: bounds.max,
            }),
        }
    }
}

/// Every pair, in roster order, whose values differ for one of `flags`.
fn separated_pairs(participants: &[Participant], flags: &[String]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for flag in flags {
        if participants
            .iter()
            .all(|participant| !participant.flags.contains_key(flag))
        {
            warn!("no participant carries the flag '{flag}'");
        }

        let value =
            |participant: &Participant| participant.flags.get(flag).copied().unwrap_or(false);
        for (index, first) in participants.iter().enumerate() {
            for second in participants[index + 1..].iter() {
                if value(first) != value(second) {
                    pairs.push((first.name.clone(), second.name.clone()));
                }
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use fairway_solver::ConfigError;

    use super::*;

    const FOURSOME: &str = r#"
        [topology]
        rounds = 2

        [[topology.teams]]
        carts = [{ occupancy = 2 }]

        [[topology.teams]]
        size = 2
        carts = [{ occupancy = 1 }, { occupancy = 1 }]

        [[participants]]
        name = "Ann"
        friends = ["Bo"]

        [[participants]]
        name = "Bo"

        [[participants]]
        name = "Cy"

        [[participants]]
        name = "Di"
    "#;

    #[test]
    fn uniform_topology_is_shared_by_every_round() {
        let instance = InstanceFile::from_toml_str(FOURSOME)
            .and_then(InstanceFile::into_problem_instance)
            .expect("valid instance");

        assert_eq!(2, instance.num_rounds());
        assert_eq!(4, instance.num_participants());
        assert_eq!(6, instance.slots().count());
        assert_eq!(1, instance.friend_pairs().len());
        assert_eq!(1, instance.max_ride_together());
        assert_eq!(None, instance.alone_bounds());
    }

    #[test]
    fn rounds_can_have_their_own_teams() {
        let contents = r#"
            [topology]
            [[topology.rounds]]
            teams = [{ carts = [{ occupancy = 2 }] }]

            [[topology.rounds]]
            teams = [{ carts = [{ occupancy = 1 }, { occupancy = 1 }] }]

            [[participants]]
            name = "Ann"

            [[participants]]
            name = "Bo"
        "#;

        let instance = InstanceFile::from_toml_str(contents)
            .and_then(InstanceFile::into_problem_instance)
            .expect("valid instance");

        assert_eq!(2, instance.num_rounds());
        assert_eq!(3, instance.slots().count());
    }

    #[test]
    fn teams_and_per_round_topology_are_exclusive() {
        let contents = r#"
            [topology]
            teams = [{ carts = [{ occupancy = 1 }] }]

            [[topology.rounds]]
            teams = [{ carts = [{ occupancy = 1 }] }]

            [[participants]]
            name = "Ann"
        "#;

        let result = InstanceFile::from_toml_str(contents)
            .and_then(InstanceFile::into_problem_instance);

        assert!(matches!(result, Err(FairwayError::InvalidTopology(_))));
    }

    #[test]
    fn rules_are_read() {
        let contents = format!(
            "{FOURSOME}
            [rules]
            must_pair_once = [[\"Ann\", \"Cy\"]]
            must_never_pair = [[\"Bo\", \"Di\"]]
            max_teamed_together = 1
            max_ride_together = 2
            alone_bounds = {{ min = 0, max = 1 }}
            "
        );

        let instance = InstanceFile::from_toml_str(&contents)
            .and_then(InstanceFile::into_problem_instance)
            .expect("valid instance");

        assert_eq!(1, instance.must_pair_once().len());
        assert_eq!(1, instance.must_never_pair().len());
        assert_eq!(Some(1), instance.max_teamed_together());
        assert_eq!(2, instance.max_ride_together());
        assert_eq!(Some(AloneBounds { min: 0, max: 1 }), instance.alone_bounds());
    }

    #[test]
    fn differing_flags_separate_participants() {
        let participants = vec![
            Participant::new("Ann").with_flag("vaccinated", true),
            Participant::new("Bo").with_flag("vaccinated", true),
            Participant::new("Cy").with_flag("vaccinated", false),
            Participant::new("Di"),
        ];

        let pairs = separated_pairs(&participants, &["vaccinated".to_owned()]);

        assert_eq!(
            vec![
                ("Ann".to_owned(), "Cy".to_owned()),
                ("Ann".to_owned(), "Di".to_owned()),
                ("Bo".to_owned(), "Cy".to_owned()),
                ("Bo".to_owned(), "Di".to_owned()),
            ],
            pairs
        );
    }

    #[test]
    fn unknown_names_in_rules_are_reported() {
        let contents = format!(
            "{FOURSOME}
            [rules]
            must_pair_once = [[\"Ann\", \"Zed\"]]
            "
        );

        let result = InstanceFile::from_toml_str(&contents)
            .and_then(InstanceFile::into_problem_instance);

        assert!(matches!(
            result,
            Err(FairwayError::Config(ConfigError::UnknownParticipant(name))) if name == "Zed"
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let contents = format!(
            "{FOURSOME}
            [rules]
            max_ride_togehter = 2
            "
        );

        let result = InstanceFile::from_toml_str(&contents);

        assert!(matches!(result, Err(FairwayError::InvalidToml(_))));
    }
}
