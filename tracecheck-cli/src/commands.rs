use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracecheck_engine::{Harness, Verdict};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Directory holding the system under test's executable
    pub exe_dir: PathBuf,
}

/// Load configuration from the current directory and perform one run.
pub async fn run_command(cli: Cli) -> anyhow::Result<Verdict> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    let harness = Harness::from_dir(&cwd, cli.exe_dir)
        .with_context(|| format!("Failed to prepare run from {}", cwd.display()))?;
    info!(kind = %harness.descriptor().kind, "Starting conformance run");

    let report = harness.run().await?;
    Ok(report.verdict)
}

/// Map a run outcome to the process exit status, writing any error to stderr.
pub fn exit_code(outcome: anyhow::Result<Verdict>) -> ExitCode {
    match outcome {
        Ok(verdict) if verdict.is_pass() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn status(outcome: anyhow::Result<Verdict>) -> String {
        format!("{:?}", exit_code(outcome))
    }

    fn failure() -> String {
        format!("{:?}", ExitCode::FAILURE)
    }

    #[test]
    fn exactly_one_positional_argument() {
        let cli = Cli::try_parse_from(["tracecheck", "./build"]).unwrap();
        assert_eq!(cli.exe_dir, PathBuf::from("./build"));

        let err = Cli::try_parse_from(["tracecheck"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["tracecheck", "a", "b"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn only_a_pass_exits_successfully() {
        assert_eq!(status(Ok(Verdict::Pass)), format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(status(Ok(Verdict::Fail)), failure());
        assert_eq!(status(Ok(Verdict::Inconclusive)), failure());
    }

    #[test]
    fn run_error_exits_with_failure() {
        let outcome = Err(anyhow::anyhow!("reference trace not found"));
        assert_eq!(status(outcome), failure());
    }
}
