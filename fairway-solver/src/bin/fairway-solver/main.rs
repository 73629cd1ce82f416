mod instance_file;
mod os_signal_termination;
mod report;
mod result;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fairway_solver::asserts::FAIRWAY_ASSERT_LEVEL_DEFINITION;
use fairway_solver::asserts::FAIRWAY_ASSERT_MODERATE;
use fairway_solver::convert_case::Case;
use fairway_solver::options::SearchMode;
use fairway_solver::options::SearchOptions;
use fairway_solver::statistics::configure_statistic_logging;
use fairway_solver::termination::Combinator;
use fairway_solver::termination::NodeBudget;
use fairway_solver::termination::TimeBudget;
use fairway_solver::Solver;
use instance_file::InstanceFile;
use log::error;
use log::info;
use log::warn;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use report::OutputFormat;
use result::FairwayError;
use result::FairwayResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    /// The instance to schedule, given as a '*.toml' file with the sections:
    ///  - '[topology]': the number of rounds and the teams and carts per round,
    ///  - '[[participants]]': the roster with friends and flags,
    ///  - '[rules]': the pairing rules.
    #[clap(verbatim_doc_comment)]
    instance_path: PathBuf,

    /// The number of milliseconds the solver is allowed to run.
    ///
    /// When the time runs out, the best schedule found so far is reported as
    /// SUBOPTIMAL_BUT_FEASIBLE, or UNKNOWN if no schedule was found.
    ///
    /// Possible values: u64
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// The maximum number of decisions each search worker may make.
    ///
    /// Unlike the time limit, a node budget makes a sequential run reproducible even when it is
    /// cut short.
    ///
    /// Possible values: u64
    #[arg(long = "node-budget", verbatim_doc_comment)]
    node_budget: Option<u64>,

    /// The number of threads which explore disjoint parts of the search tree.
    ///
    /// With a single thread, repeated runs on the same instance produce the same schedule.
    ///
    /// Possible values: usize
    #[arg(long = "threads", default_value_t = 1, verbatim_doc_comment)]
    threads: usize,

    /// Whether to maximise the number of rounds friends are teamed together, or to report the
    /// first schedule which satisfies every rule.
    #[arg(long = "mode", value_enum, default_value_t)]
    mode: SearchMode,

    /// The format of the report.
    ///
    /// If not given, the format is derived from the extension of `--output`, and is text
    /// otherwise.
    #[arg(long = "output-format", value_enum, verbatim_doc_comment)]
    output_format: Option<OutputFormat>,

    /// The file to write the report to. The report is written to stdout if not given.
    #[arg(short = 'o', long = "output", verbatim_doc_comment)]
    output: Option<PathBuf>,

    /// Enables logging of statistics from the solver to stderr.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,

    /// Enables log message output from the solver to stderr.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) {
    if log_statistics {
        configure_statistic_logging(
            "%%%fairway-stat:",
            Some("%%%fairway-stat-end"),
            Some(Case::Camel),
            Some(Box::new(std::io::stderr())),
        );
    }

    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> FairwayResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose, args.log_statistics);

    if FAIRWAY_ASSERT_LEVEL_DEFINITION >= FAIRWAY_ASSERT_MODERATE {
        warn!(
            "Potential performance degradation: the fairway assert level is set to {FAIRWAY_ASSERT_LEVEL_DEFINITION}, meaning many debug asserts are active which may result in performance degradation."
        );
    }

    if args.instance_path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
        return Err(FairwayError::invalid_instance(args.instance_path.display()));
    }

    let output_format = match (args.output_format, args.output.as_ref()) {
        (Some(format), _) => format,
        (None, Some(path)) => OutputFormat::from_path(path)?,
        (None, None) => OutputFormat::default(),
    };

    let instance = InstanceFile::load(&args.instance_path)?.into_problem_instance()?;
    info!(
        "scheduling {} participants over {} rounds",
        instance.num_participants(),
        instance.num_rounds()
    );

    let mut solver = Solver::new(instance)?.with_options(SearchOptions {
        num_threads: args.threads,
        mode: args.mode,
    });

    let mut termination = Combinator::new(
        OsSignal::install()?,
        Combinator::new(
            args.time_limit
                .map(|time_limit| TimeBudget::starting_now(Duration::from_millis(time_limit))),
            args.node_budget.map(NodeBudget::new),
        ),
    );

    let report = solver.solve(&mut termination);
    match report.objective {
        Some(objective) => solver.log_statistics_with_objective(objective),
        None => solver.log_statistics(),
    }

    let rendered = report::render(&report, output_format)?;
    match args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
