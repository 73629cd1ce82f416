//! Writing a [`ScheduleReport`] in one of the supported output formats.
mod csv;
mod text;

use std::path::Path;

use clap::ValueEnum;
use fairway_solver::results::ScheduleReport;

use self::csv::CsvReport;
use self::text::TextReport;
use crate::result::FairwayError;
use crate::result::FairwayResult;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// The grouping per round and team, followed by how often every pair rode and teamed
    /// together.
    #[default]
    Text,
    /// The full report as a JSON document.
    Json,
    /// One row per participant per round, followed by the pair statistics.
    Csv,
}

impl OutputFormat {
    /// Derives the format from the extension of `path`.
    pub(crate) fn from_path(path: &Path) -> FairwayResult<OutputFormat> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("txt") => Ok(OutputFormat::Text),
            Some("json") => Ok(OutputFormat::Json),
            Some("csv") => Ok(OutputFormat::Csv),
            _ => Err(FairwayError::unsupported_output_format(path.display())),
        }
    }
}

pub(crate) fn render(report: &ScheduleReport, format: OutputFormat) -> FairwayResult<String> {
    match format {
        OutputFormat::Text => Ok(TextReport(report).to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => Ok(CsvReport(report).to_string()),
    }
}
