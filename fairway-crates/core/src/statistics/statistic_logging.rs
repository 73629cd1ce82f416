//! The process-wide sink for statistic lines.
//!
//! Every statistic is written as `{prefix} {name}={value}` on its own line; a block of statistics
//! can be closed with an optional postfix line.
use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;
use log::debug;

struct StatisticSink {
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send>,
}

impl StatisticSink {
    fn line(&self, name: impl Display, value: impl Display) -> String {
        let name = match self.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        format!("{} {name}={value}", self.prefix)
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug!("Could not write statistic: {e}");
        }
    }
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Enables statistic logging. Only the first call has an effect; without one, statistics are
/// dropped.
///
/// Statistics go to stdout unless a `writer` is given.
pub fn configure_statistic_logging(
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            postfix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(std::io::stdout())),
        })
    });
}

fn with_sink(action: impl FnOnce(&mut StatisticSink)) {
    if let Some(Ok(mut sink)) = STATISTIC_SINK.get().map(Mutex::lock) {
        action(&mut sink);
    }
}

pub fn log_statistic(name: impl Display, value: impl Display) {
    with_sink(|sink| {
        let line = sink.line(name, value);
        sink.write_line(&line);
    });
}

/// Closes a block of statistics with the configured postfix, if any.
pub fn log_statistic_postfix() {
    with_sink(|sink| {
        if let Some(postfix) = sink.postfix {
            sink.write_line(postfix);
        }
    });
}

pub fn should_log_statistics() -> bool {
    STATISTIC_SINK.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink(casing: Option<Case>) -> StatisticSink {
        StatisticSink {
            prefix: "%%stat:",
            postfix: None,
            casing,
            writer: Box::new(std::io::sink()),
        }
    }

    #[test]
    fn names_are_recased() {
        let sink = sink(Some(Case::Camel));

        assert_eq!("%%stat: numDecisions=12", sink.line("num_decisions", 12));
    }

    #[test]
    fn names_are_kept_without_casing() {
        let sink = sink(None);

        assert_eq!("%%stat: search_num_nodes=3", sink.line("search_num_nodes", 3));
    }
}
