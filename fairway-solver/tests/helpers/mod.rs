//! Runs the `fairway-solver` binary on the instances in `tests/instances`.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

/// The exit status and the captured output of a solver run.
#[derive(Debug)]
pub(crate) struct SolverRun {
    pub(crate) status: ExitStatus,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl SolverRun {
    /// The value of the `status: ...` line of a text report.
    pub(crate) fn reported_status(&self) -> Option<&str> {
        self.stdout
            .lines()
            .find_map(|line| line.strip_prefix("status: "))
    }

    /// The riders of every cart of a text report, in the order they are listed.
    pub(crate) fn carts(&self) -> Vec<Vec<&str>> {
        self.stdout
            .lines()
            .filter_map(|line| line.strip_prefix("     "))
            .map(|riders| riders.split(" + ").collect())
            .collect()
    }
}

pub(crate) fn instance_path(instance_name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/instances/{instance_name}",
        env!("CARGO_MANIFEST_DIR")
    ))
}

pub(crate) fn run_solver(instance_name: &str) -> SolverRun {
    run_solver_with_options(instance_name, std::iter::empty(), instance_name)
}

/// Runs the solver with `args` on the given instance. The output is captured in files named after
/// `prefix` so that tests which share an instance do not interfere.
pub(crate) fn run_solver_with_options<'a>(
    instance_name: &str,
    args: impl IntoIterator<Item = &'a str>,
    prefix: &str,
) -> SolverRun {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let instance_path = instance_path(instance_name);
    let solver = PathBuf::from(env!("CARGO_BIN_EXE_fairway-solver"));

    let log_file_path = output_path(prefix, "log");
    let err_file_path = output_path(prefix, "err");

    let mut command = Command::new(solver);
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(&instance_path)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(File::create(&err_file_path).expect("Failed to create error file."))
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let run = SolverRun {
        status,
        stdout: read_and_remove(&log_file_path),
        stderr: read_and_remove(&err_file_path),
    };

    assert!(
        run.stdout.is_empty() || status.success(),
        "a failed run writes no report, stderr: {}",
        run.stderr
    );

    run
}

/// A path in the target directory of the tests for an output of the run named `prefix`.
pub(crate) fn output_path(prefix: &str, extension: &str) -> PathBuf {
    Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("{prefix}.{extension}"))
}

fn read_and_remove(path: &Path) -> String {
    let contents = std::fs::read_to_string(path).expect("Failed to read output file.");
    std::fs::remove_file(path).expect("Failed to remove output file.");
    contents
}
