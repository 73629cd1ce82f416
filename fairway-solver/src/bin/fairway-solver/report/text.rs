use std::fmt::Display;
use std::fmt::Formatter;

use fairway_solver::results::ScheduleReport;
use fairway_solver::results::SolveStatus;
use itertools::Itertools;

/// The human readable report: riders per cart, grouped by round and team, and then for every pair
/// how often they rode and teamed together.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextReport<'a>(pub(crate) &'a ScheduleReport);

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let report = self.0;

        if let Some(schedule) = &report.schedule {
            for (round, round_schedule) in schedule.rounds.iter().enumerate() {
                writeln!(f, "Round {round}")?;
                for (team, team_schedule) in round_schedule.teams.iter().enumerate() {
                    writeln!(f, "  Team {team}")?;
                    for riders in team_schedule.carts.iter() {
                        writeln!(f, "     {}", riders.join(" + "))?;
                    }
                }
            }

            for pair in report.pair_statistics.iter() {
                writeln!(
                    f,
                    "{} + {}\triding: {}, teamed: {}",
                    pair.first, pair.second, pair.riding, pair.teamed
                )?;
            }
        }

        writeln!(f, "status: {}", report.status)?;
        if report.status == SolveStatus::Infeasible {
            writeln!(f, "rules: {}", report.rules.iter().join(", "))?;
        }
        if let Some(objective) = report.objective {
            writeln!(f, "objective: {objective}")?;
        }

        Ok(())
    }
}
