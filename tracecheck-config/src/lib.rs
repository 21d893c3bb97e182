//! # tracecheck Configuration System
//!
//! Layered configuration for the trace conformance harness.
//!
//! ## Features
//! - **Unified Configuration**: one document drives launch, parsing and reporting
//! - **Validation**: runtime validation of markers, paths and precision
//! - **Environment Awareness**: `TRACECHECK_*` variables override file values

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod artifacts;
mod error;
mod kind;
mod launch;
mod validation;

pub use artifacts::{
    EventLogConfig, ReportConfig, TraceConfig, DEFAULT_END_MARKER, DEFAULT_PRECISION,
};
pub use error::ConfigError;
pub use kind::EventKind;
pub use launch::LaunchConfig;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "tracecheck.yaml";
/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TRACECHECK_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct TracecheckConfig {
    /// Event kind under test.
    #[validate(required(message = "an event kind must be configured"))]
    pub kind: Option<EventKind>,

    /// How to run the system under test.
    #[serde(default)]
    #[validate(nested)]
    pub launch: LaunchConfig,

    /// Reference trajectory dump.
    #[serde(default)]
    #[validate(nested)]
    pub trace: TraceConfig,

    /// Execution log of the system under test.
    #[serde(default)]
    #[validate(nested)]
    pub event_log: EventLogConfig,

    /// Report rendering.
    #[serde(default)]
    #[validate(nested)]
    pub report: ReportConfig,
}

impl TracecheckConfig {
    /// Load configuration for a run rooted at `dir`.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `<dir>/tracecheck.yaml`, if present
    /// 3. `TRACECHECK_*` environment variables
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(TracecheckConfig::default()));

        let file = dir.as_ref().join(CONFIG_FILE);
        if file.exists() {
            figment = figment.merge(Yaml::file(file));
        }

        Self::finish(figment)
    }

    /// Load configuration from a specific file; the file must exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(TracecheckConfig::default()))
            .merge(Yaml::file(path));
        Self::finish(figment)
    }

    fn finish(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Resolve an artifact path against the launch working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.launch.working_dir.join(path)
    }
}
