//! System-under-test launch parameters.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// How the harness starts the engine whose execution log is checked.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct LaunchConfig {
    /// Directory the engine runs in; every artifact path is resolved against it.
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Wrapper command, e.g. `mpiexec`. Empty runs the executable directly.
    #[serde(default = "default_launcher")]
    pub launcher: String,

    /// Executable file name, looked up in the directory given on the command line.
    #[serde(default = "default_executable")]
    #[validate(custom(function = validation::validate_executable))]
    pub executable: String,

    /// Arguments passed to the executable.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Validate artifacts already on disk instead of running the engine.
    #[serde(default)]
    pub skip_launch: bool,
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_launcher() -> String {
    "mpiexec".into()
}

fn default_executable() -> String {
    "papreca".into()
}

fn default_args() -> Vec<String> {
    ["-in", "in_kmc.lmp", "in_kmc.ppc"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            working_dir: default_working_dir(),
            launcher: default_launcher(),
            executable: default_executable(),
            args: default_args(),
            skip_launch: false,
        }
    }
}
