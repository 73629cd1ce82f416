//! Property checks on reported schedules, recomputed from the grouping table alone.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::collections::BTreeMap;

use fairway_core::model::Participant;
use fairway_core::model::RoundTopology;
use fairway_core::model::RuleSet;
use fairway_core::model::Topology;
use fairway_core::results::ScheduleReport;
use fairway_core::schedule::Schedule;

pub(crate) fn participants(names: &[&str]) -> Vec<Participant> {
    names.iter().map(|&name| Participant::new(name)).collect()
}

pub(crate) fn pair(first: &str, second: &str) -> (String, String) {
    (first.to_owned(), second.to_owned())
}

pub(crate) fn rounds_of(topology: &Topology) -> Vec<RoundTopology> {
    match topology {
        Topology::Uniform { rounds, teams } => vec![RoundTopology { teams: teams.clone() }; *rounds],
        Topology::PerRound(rounds) => rounds.clone(),
    }
}

fn key(first: &str, second: &str) -> (String, String) {
    if first < second {
        pair(first, second)
    } else {
        pair(second, first)
    }
}

/// Counts, for every unordered pair that shares a cart (resp. team) at least once, how often it
/// does.
pub(crate) fn count_pairs(
    schedule: &Schedule,
) -> (BTreeMap<(String, String), u32>, BTreeMap<(String, String), u32>) {
    let mut riding = BTreeMap::new();
    let mut teamed = BTreeMap::new();

    for round in schedule.rounds.iter() {
        for team in round.teams.iter() {
            let members = team.carts.iter().flatten().collect::<Vec<_>>();
            for (index, first) in members.iter().enumerate() {
                for second in members[index + 1..].iter() {
                    *teamed.entry(key(first, second)).or_insert(0) += 1;
                }
            }

            for cart in team.carts.iter() {
                for (index, first) in cart.iter().enumerate() {
                    for second in cart[index + 1..].iter() {
                        *riding.entry(key(first, second)).or_insert(0) += 1;
                    }
                }
            }
        }
    }

    (riding, teamed)
}

/// The friend objective recomputed from the grouping table.
pub(crate) fn recompute_objective(schedule: &Schedule, roster: &[Participant]) -> i64 {
    let (_, teamed) = count_pairs(schedule);

    let mut friend_pairs = roster
        .iter()
        .flat_map(|participant| {
            participant
                .friends
                .iter()
                .filter(move |friend| **friend != participant.name)
                .map(move |friend| key(&participant.name, friend))
        })
        .collect::<Vec<_>>();
    friend_pairs.sort();
    friend_pairs.dedup();

    friend_pairs
        .iter()
        .map(|pair| teamed.get(pair).copied().unwrap_or(0) as i64)
        .sum()
}

/// Asserts every hard rule on the grouping table of `report`.
pub(crate) fn assert_valid_schedule(
    report: &ScheduleReport,
    roster: &[Participant],
    topology: &Topology,
    rules: &RuleSet,
) {
    let schedule = report
        .schedule
        .as_ref()
        .expect("a report with a schedule");
    let rounds = rounds_of(topology);
    assert_eq!(rounds.len(), schedule.rounds.len());

    let mut alone = BTreeMap::new();
    for (round, round_topology) in schedule.rounds.iter().zip(rounds.iter()) {
        let mut seen = round
            .teams
            .iter()
            .flat_map(|team| team.carts.iter().flatten())
            .cloned()
            .collect::<Vec<_>>();
        seen.sort();
        let mut expected = roster
            .iter()
            .map(|participant| participant.name.clone())
            .collect::<Vec<_>>();
        expected.sort();
        assert_eq!(expected, seen, "every participant occupies exactly one slot per round");

        for (team, team_topology) in round.teams.iter().zip(round_topology.teams.iter()) {
            let size = team.carts.iter().map(Vec::len).sum::<usize>();
            assert_eq!(team_topology.size as usize, size, "team size");

            for (cart, cart_topology) in team.carts.iter().zip(team_topology.carts.iter()) {
                assert_eq!(cart_topology.occupancy as usize, cart.len(), "cart occupancy");
                if cart.len() == 1 {
                    *alone.entry(cart[0].clone()).or_insert(0) += 1;
                }
            }
        }
    }

    let (riding, teamed) = count_pairs(schedule);

    for (pair, &count) in riding.iter() {
        let is_pinned = rules
            .must_pair_once
            .iter()
            .chain(rules.must_never_pair.iter())
            .any(|(first, second)| key(first, second) == *pair);
        if !is_pinned {
            assert!(count <= rules.max_ride_together, "{pair:?} rides together {count} times");
        }
    }
    for (first, second) in rules.must_pair_once.iter() {
        assert_eq!(Some(&1), riding.get(&key(first, second)), "must pair {first} and {second}");
    }
    for (first, second) in rules.must_never_pair.iter() {
        assert_eq!(None, riding.get(&key(first, second)), "never pair {first} and {second}");
    }

    if let Some(max_teamed_together) = rules.max_teamed_together {
        assert!(teamed.values().all(|&count| count <= max_teamed_together));
    }

    if let Some(bounds) = rules.alone_bounds {
        for participant in roster {
            let count = alone.get(&participant.name).copied().unwrap_or(0);
            assert!(
                (bounds.min..=bounds.max).contains(&count),
                "{} rides alone {count} times",
                participant.name
            );
        }
    }

    for statistics in report.pair_statistics.iter() {
        let pair = key(&statistics.first, &statistics.second);
        assert_eq!(riding.get(&pair).copied().unwrap_or(0), statistics.riding);
        assert_eq!(teamed.get(&pair).copied().unwrap_or(0), statistics.teamed);
    }

    assert_eq!(
        Some(recompute_objective(schedule, roster)),
        report.objective,
        "the objective matches the grouping table"
    );
}
