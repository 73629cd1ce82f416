use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;

use fairway_solver::results::ScheduleReport;

/// The report as three CSV tables separated by empty lines: the status and objective, one row per
/// (round, team, cart, participant), and the pair statistics.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CsvReport<'a>(pub(crate) &'a ScheduleReport);

impl Display for CsvReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let report = self.0;

        writeln!(f, "status,objective")?;
        match report.objective {
            Some(objective) => writeln!(f, "{},{objective}", report.status)?,
            None => writeln!(f, "{},", report.status)?,
        }

        let Some(schedule) = &report.schedule else {
            return Ok(());
        };

        writeln!(f)?;
        writeln!(f, "round,team,cart,participant")?;
        for (round, round_schedule) in schedule.rounds.iter().enumerate() {
            for (team, team_schedule) in round_schedule.teams.iter().enumerate() {
                for (cart, riders) in team_schedule.carts.iter().enumerate() {
                    for rider in riders {
                        writeln!(f, "{round},{team},{cart},{}", field(rider))?;
                    }
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "first,second,riding,teamed")?;
        for pair in report.pair_statistics.iter() {
            writeln!(
                f,
                "{},{},{},{}",
                field(&pair.first),
                field(&pair.second),
                pair.riding,
                pair.teamed
            )?;
        }

        Ok(())
    }
}

/// Quotes `value` if it contains a separator, a quote or a line break.
fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
