//! Pre-build pipeline: mirror every configured tree, then stamp the version.

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;

use crate::mirror::{ConversionReport, TreeMirror};
use crate::version::{stamp_version, VersionStamp, DEFAULT_VERSION_FORMAT};

/// One source tree and where its JSON goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorPair {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl MirrorPair {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// Version file settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConfig {
    /// JSON file to stamp
    pub file: PathBuf,

    /// strftime format for the version string
    pub format: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("public/version.json"),
            format: DEFAULT_VERSION_FORMAT.to_string(),
        }
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Trees to mirror, in order
    pub mirrors: Vec<MirrorPair>,

    /// Version stamp, skipped when `None`
    pub version: Option<VersionConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mirrors: vec![MirrorPair::new("config", "public/config")],
            version: Some(VersionConfig::default()),
        }
    }
}

/// Outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// One report per configured mirror, in run order
    pub mirrors: Vec<(MirrorPair, ConversionReport)>,

    /// Version stamp, if one was configured and succeeded
    pub stamp: Option<VersionStamp>,

    /// Step-level failures outside of per-file conversion
    pub errors: Vec<String>,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

impl PipelineReport {
    pub fn total_converted(&self) -> usize {
        self.mirrors.iter().map(|(_, r)| r.converted).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.mirrors
            .iter()
            .map(|(_, r)| r.failures.len())
            .sum::<usize>()
            + self.errors.len()
    }

    /// True when nothing failed anywhere in the run.
    pub fn is_clean(&self) -> bool {
        self.total_failures() == 0
    }
}

/// Runs the pre-build steps in order.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every step. Failures are logged and collected, never returned,
    /// so a broken config tree does not stop the surrounding build.
    pub fn run(&self, date: NaiveDate) -> PipelineReport {
        let start = Instant::now();
        let mut report = PipelineReport {
            mirrors: self.convert_all(),
            ..Default::default()
        };

        if let Some(version) = &self.config.version {
            match stamp_version(&version.file, date, &version.format) {
                Ok(stamp) => report.stamp = Some(stamp),
                Err(e) => {
                    tracing::error!("Version stamp failed: {}", e);
                    report.errors.push(e.to_string());
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Mirror every configured tree.
    pub fn convert_all(&self) -> Vec<(MirrorPair, ConversionReport)> {
        self.config
            .mirrors
            .iter()
            .map(|pair| {
                tracing::info!(
                    "Mirroring {} -> {}",
                    pair.source.display(),
                    pair.dest.display()
                );
                let result = TreeMirror::new(&pair.source, &pair.dest).convert();
                (pair.clone(), result)
            })
            .collect()
    }
}
