//! ## tracecheck-engine::harness
//! **Launch, read, compare, report.**
//!
//! The system under test is run once to completion with its standard output
//! captured as the execution log. Comparison starts only after a successful
//! exit; a failed launch never yields a verdict.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use opentelemetry::KeyValue;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use tracecheck_config::TracecheckConfig;
use tracecheck_eventlog::EventLogReader;
use tracecheck_telemetry::{EventLogger, MetricsRecorder};
use tracecheck_trace::ReferenceTrace;

use crate::compare::compare;
use crate::error::HarnessError;
use crate::kind::KindDescriptor;
use crate::report::ComparisonReport;

pub struct Harness {
    config: TracecheckConfig,
    descriptor: KindDescriptor,
    exe_dir: PathBuf,
    metrics: MetricsRecorder,
}

impl Harness {
    pub fn new(config: TracecheckConfig, exe_dir: impl Into<PathBuf>) -> Result<Self, HarnessError> {
        let descriptor = KindDescriptor::from_config(&config)?;
        Ok(Self {
            config,
            descriptor,
            exe_dir: exe_dir.into(),
            metrics: MetricsRecorder::new()?,
        })
    }

    /// Load configuration rooted at `config_dir` and build the harness for it.
    pub fn from_dir(config_dir: &Path, exe_dir: impl Into<PathBuf>) -> Result<Self, HarnessError> {
        let config = TracecheckConfig::load(config_dir)?;
        Self::new(config, exe_dir)
    }

    pub fn descriptor(&self) -> &KindDescriptor {
        &self.descriptor
    }

    /// Launch unless configured to reuse existing artifacts, then validate
    /// and publish the report.
    #[instrument(skip(self), fields(kind = %self.descriptor.kind))]
    pub async fn run(&self) -> Result<ComparisonReport, HarnessError> {
        if self.config.launch.skip_launch {
            info!("Launch skipped, validating existing artifacts");
        } else {
            self.launch().await?;
            println!(
                "{} finished successfully, initiating {} test!",
                self.config.launch.executable, self.descriptor.kind
            );
        }

        let report = self.validate()?;
        self.publish(&report)?;
        Ok(report)
    }

    /// Run the system under test to completion, stdout into the execution log.
    pub async fn launch(&self) -> Result<(), HarnessError> {
        let launch = &self.config.launch;
        let exe_dir = fs::canonicalize(&self.exe_dir).map_err(|source| HarnessError::ExecutableDir {
            path: self.exe_dir.clone(),
            source,
        })?;

        let mut argv: Vec<OsString> = launch.launcher.split_whitespace().map(OsString::from).collect();
        argv.push(exe_dir.join(&launch.executable).into_os_string());
        argv.extend(launch.args.iter().map(OsString::from));
        let command_line = argv
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        let log_path = self.config.resolve(&self.config.event_log.file);
        let log_file = File::create(&log_path).map_err(|source| HarnessError::LogFile {
            path: log_path.clone(),
            source,
        })?;

        println!("Running {command_line}...");
        info!(command = %command_line, log = %log_path.display(), "Launching system under test");

        let status = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(&launch.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .status()
            .await
            .map_err(|e| HarnessError::Launch {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(HarnessError::Launch {
                command: command_line,
                reason: status.to_string(),
            });
        }
        debug!(%status, "System under test exited");
        Ok(())
    }

    /// Compare the execution log against the reference trace.
    #[instrument(skip(self), fields(kind = %self.descriptor.kind))]
    pub fn validate(&self) -> Result<ComparisonReport, HarnessError> {
        let timer = self.metrics.comparison_seconds.start_timer();
        let descriptor = &self.descriptor;

        let reader = EventLogReader::new(descriptor.log.clone())?;
        let log = reader.read_path(&self.config.resolve(&self.config.event_log.file))?;
        let reference = ReferenceTrace::load(
            &self.config.resolve(&descriptor.reference_file),
            descriptor.schema,
            &descriptor.start_marker,
            &descriptor.end_marker,
        )?;
        let report = compare(descriptor, &log, &reference, self.config.trace.precision)?;

        timer.observe_duration();
        self.metrics
            .record_items(report.items.len(), report.mismatched_items());
        self.metrics
            .skipped_log_lines
            .inc_by(report.skipped_log_lines as u64);
        Ok(report)
    }

    /// Print the summaries, write the YAML report if configured, emit the
    /// verdict event.
    pub fn publish(&self, report: &ComparisonReport) -> Result<(), HarnessError> {
        if self.config.report.step_summary {
            println!("{}", report.step_summary());
        }
        println!("{report}");

        if let Some(path) = &self.config.report.path {
            write_report(report, &self.config.resolve(path))?;
        }

        EventLogger::log_verdict(
            self.descriptor.kind.as_str(),
            report.verdict.as_str(),
            vec![
                KeyValue::new("compared_items", report.items.len() as i64),
                KeyValue::new("mismatched_items", report.mismatched_items() as i64),
                KeyValue::new("skipped_log_lines", report.skipped_log_lines as i64),
                KeyValue::new("reference_surplus", report.reference_surplus as i64),
            ],
        );
        debug!(metrics = %self.metrics.gather_metrics()?, "Run metrics");
        Ok(())
    }
}

fn write_report(report: &ComparisonReport, path: &Path) -> Result<(), HarnessError> {
    let write_err = |reason: String| HarnessError::ReportWrite {
        path: path.to_path_buf(),
        reason,
    };
    let yaml = serde_yaml::to_string(report).map_err(|e| write_err(e.to_string()))?;
    fs::write(path, yaml).map_err(|e| write_err(e.to_string()))?;
    info!(path = %path.display(), "Wrote comparison report");
    Ok(())
}
