#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use std::collections::BTreeSet;

use helpers::output_path;
use helpers::run_solver;
use helpers::run_solver_with_options;

#[test]
fn foursome_is_split_over_two_carts() {
    let run = run_solver("foursome.toml");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("FEASIBLE"), run.reported_status());

    let carts = run.carts();
    assert_eq!(2, carts.len());
    assert!(carts.iter().all(|riders| riders.len() == 2));

    let riders = carts.iter().flatten().copied().collect::<BTreeSet<_>>();
    assert_eq!(BTreeSet::from(["Ann", "Bo", "Cy", "Di"]), riders);
}

#[test]
fn must_pair_shares_the_two_seat_cart() {
    let run = run_solver("must_pair_threesome.toml");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("FEASIBLE"), run.reported_status());
    assert_eq!(vec![vec!["A", "B"], vec!["C"]], run.carts());
    assert!(run.stdout.contains("A + B\triding: 1, teamed: 1"));
}

#[test]
fn too_many_rounds_are_reported_as_infeasible() {
    let run = run_solver("too_many_rounds.toml");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("INFEASIBLE"), run.reported_status());
    assert!(run.carts().is_empty());
    assert!(run.stdout.contains("rules: ride maximum"), "stdout: {}", run.stdout);
}

#[test]
fn differing_flags_never_share_a_cart() {
    let run = run_solver("separated_by_flag.toml");

    assert!(run.status.success(), "stderr: {}", run.stderr);

    let carts = run
        .carts()
        .into_iter()
        .map(|riders| riders.into_iter().collect::<BTreeSet<_>>())
        .collect::<BTreeSet<_>>();
    assert_eq!(
        BTreeSet::from([BTreeSet::from(["Ann", "Cy"]), BTreeSet::from(["Bo", "Di"])]),
        carts
    );
}

#[test]
fn friends_are_teamed_in_every_round() {
    let run = run_solver("friends.toml");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("FEASIBLE"), run.reported_status());
    assert!(run.stdout.contains("objective: 6"), "stdout: {}", run.stdout);
    assert!(run.stdout.contains("Ann + Cy\triding: 0, teamed: 3"));
    assert!(run.stdout.contains("Bo + Di\triding: 0, teamed: 3"));
}

#[test]
fn parallel_search_reaches_the_same_objective() {
    let run = run_solver_with_options("friends.toml", ["--threads", "3"], "friends_parallel");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("FEASIBLE"), run.reported_status());
    assert!(run.stdout.contains("objective: 6"), "stdout: {}", run.stdout);
}

#[test]
fn json_report_holds_the_schedule() {
    let run = run_solver_with_options(
        "foursome.toml",
        ["--output-format", "json"],
        "foursome_json",
    );

    assert!(run.status.success(), "stderr: {}", run.stderr);

    let report: serde_json::Value = serde_json::from_str(&run.stdout).expect("valid json");
    assert_eq!("Feasible", report["status"]);
    assert_eq!(1, report["schedule"]["rounds"].as_array().map_or(0, Vec::len));
    assert_eq!(6, report["pair_statistics"].as_array().map_or(0, Vec::len));
}

#[test]
fn csv_format_follows_the_output_extension() {
    let output = output_path("foursome_report", "csv");
    let output_argument = output.to_str().expect("utf-8 path");

    let run = run_solver_with_options(
        "foursome.toml",
        ["--output", output_argument],
        "foursome_csv",
    );

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stdout.is_empty());

    let csv = std::fs::read_to_string(&output).expect("report is written");
    std::fs::remove_file(&output).expect("report can be removed");

    let lines = csv.lines().collect::<Vec<_>>();
    assert_eq!(["status,objective", "FEASIBLE,0"], lines[..2]);
    assert!(lines.contains(&"round,team,cart,participant"));
    assert_eq!(
        4,
        lines
            .iter()
            .filter(|line| line.starts_with("0,"))
            .count()
    );
}

#[test]
fn statistics_are_logged_to_stderr() {
    let run = run_solver_with_options("foursome.toml", ["-s"], "foursome_statistics");

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("%%%fairway-stat: numDecisions="));
    assert!(run.stderr.contains("%%%fairway-stat: objective=0"));
    assert!(run.stderr.contains("%%%fairway-stat-end"));
    assert!(!run.stdout.contains("%%%fairway-stat"));
}

#[test]
fn exhausted_node_budget_without_schedule_is_unknown() {
    let run = run_solver_with_options(
        "too_many_rounds.toml",
        ["--node-budget", "0"],
        "too_many_rounds_budget",
    );

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("UNKNOWN"), run.reported_status());
}

#[test]
fn twelve_golfers_never_ride_together_twice() {
    let run = run_solver_with_options(
        "twelve_golfers.toml",
        ["--mode", "satisfy", "--time-limit", "20000"],
        "twelve_golfers",
    );

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(Some("FEASIBLE"), run.reported_status());

    let carts = run.carts();
    assert_eq!(5 * 3 * 2, carts.len());
    assert!(carts.iter().all(|riders| riders.len() == 2));

    let pairs = carts
        .iter()
        .map(|riders| riders.iter().copied().collect::<BTreeSet<_>>())
        .collect::<BTreeSet<_>>();
    assert_eq!(carts.len(), pairs.len(), "a pair rides together twice");
}

#[test]
fn inconsistent_topology_fails() {
    let run = run_solver("mismatched_teams.toml");

    assert!(!run.status.success());
    assert!(run.stderr.contains("Execution failed"), "stderr: {}", run.stderr);
    assert!(run.stderr.contains("team sizes of round 0 sum to 3"));
}

#[test]
fn other_file_types_are_rejected() {
    let run = run_solver("foursome.txt");

    assert!(!run.status.success());
    assert!(run.stderr.contains("is not supported"), "stderr: {}", run.stderr);
}
