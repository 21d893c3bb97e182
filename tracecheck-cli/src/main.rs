//! ## tracecheck-cli
//! **Conformance run entrypoint**
//!
//! Runs the system under test found in the given directory, then checks its
//! execution log against the reference trace for the configured event kind.
//! Exit status 0 means every compared field matched.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracecheck_telemetry::EventLogger;

mod commands;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    EventLogger::init();

    commands::exit_code(commands::run_command(cli).await)
}
