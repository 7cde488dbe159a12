//! YAML to JSON tree mirroring.
//!
//! Walks a source directory and writes a `.json` file into the destination
//! tree for every `.yml`/`.yaml` file found, keeping the relative layout.
//! A file that fails to convert is recorded in the report and the walk
//! moves on to the next entry.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

/// File name suffixes picked up by the converter. Matching is case-sensitive.
pub const YAML_SUFFIXES: [&str; 2] = [".yaml", ".yml"];

/// Errors that can occur while converting a single file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to read source: {0}")]
    ReadError(String),

    #[error("Failed to parse YAML: {0}")]
    ParseError(String),

    #[error("Failed to serialize JSON: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to walk source tree: {0}")]
    WalkError(String),
}

/// A path that could not be converted, and why.
#[derive(Debug)]
pub struct ConversionFailure {
    /// Source file (or directory) the failure belongs to
    pub path: PathBuf,

    pub error: ConvertError,
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.error)
    }
}

/// Result of mirroring one source tree.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Number of JSON files written
    pub converted: usize,

    /// Files that failed to convert
    pub failures: Vec<ConversionFailure>,

    /// Source root did not exist, nothing was done
    pub source_missing: bool,

    /// Total walk time in milliseconds
    pub duration_ms: u64,
}

impl ConversionReport {
    /// True when no failure was recorded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mirrors a tree of YAML files into a tree of JSON files.
#[derive(Debug, Clone)]
pub struct TreeMirror {
    source_root: PathBuf,
    dest_root: PathBuf,
}

impl TreeMirror {
    /// Create a mirror from `source_root` into `dest_root`.
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
        }
    }

    /// Convert every YAML file under the source root.
    ///
    /// Never fails: a missing source root yields an empty report, and every
    /// other problem is recorded in [`ConversionReport::failures`].
    /// Entries are visited in the order the platform lists them.
    pub fn convert(&self) -> ConversionReport {
        let start = Instant::now();
        let mut report = ConversionReport::default();

        if !self.source_root.exists() {
            tracing::warn!(
                "Source directory not found: {}",
                self.source_root.display()
            );
            report.source_missing = true;
            return report;
        }

        if !self.source_root.is_dir() {
            self.record(
                &mut report,
                self.source_root.clone(),
                ConvertError::WalkError("source root is not a directory".to_string()),
            );
            return report;
        }

        // Destination root exists even when no YAML file is found
        if let Err(e) = fs::create_dir_all(&self.dest_root) {
            self.record(
                &mut report,
                self.dest_root.clone(),
                ConvertError::WriteError(e.to_string()),
            );
            return report;
        }

        for entry in WalkDir::new(&self.source_root)
            .min_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.source_root.clone());
                    self.record(&mut report, path, ConvertError::WalkError(e.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(output_path) = self.output_path(path) else {
                tracing::debug!("Skipping {}", path.display());
                continue;
            };

            match convert_file(path, &output_path) {
                Ok(()) => {
                    tracing::info!(
                        "Converted {} -> {}",
                        path.display(),
                        output_path.display()
                    );
                    report.converted += 1;
                }
                Err(e) => self.record(&mut report, path.to_path_buf(), e),
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Destination for a source file, or `None` if it is not a YAML file.
    ///
    /// The suffix is matched on the raw name so non-UTF-8 names still convert.
    fn output_path(&self, path: &Path) -> Option<PathBuf> {
        let name = path.file_name()?;
        let bytes = name.as_encoded_bytes();
        let suffix = YAML_SUFFIXES
            .iter()
            .find(|suffix| bytes.ends_with(suffix.as_bytes()))?;

        let relative = path.strip_prefix(&self.source_root).ok()?;

        // `.yml` alone has no extension to replace
        let output = if bytes.len() == suffix.len() {
            relative.with_file_name(".json")
        } else {
            relative.with_extension("json")
        };

        Some(self.dest_root.join(output))
    }

    fn record(&self, report: &mut ConversionReport, path: PathBuf, error: ConvertError) {
        tracing::error!("Failed to convert {}: {}", path.display(), error);
        report.failures.push(ConversionFailure { path, error });
    }
}

/// Mirror `source_root` into `dest_root`.
///
/// Shorthand for `TreeMirror::new(source_root, dest_root).convert()`.
pub fn convert(source_root: &Path, dest_root: &Path) -> ConversionReport {
    TreeMirror::new(source_root, dest_root).convert()
}

/// Render a YAML document as pretty-printed JSON.
///
/// Mapping keys keep their document order and `<<` merge keys are resolved.
/// An empty document renders as `null`.
pub fn yaml_to_json(source: &str) -> Result<String, ConvertError> {
    let mut value: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| ConvertError::ParseError(e.to_string()))?;

    value
        .apply_merge()
        .map_err(|e| ConvertError::ParseError(e.to_string()))?;

    serde_json::to_string_pretty(&value).map_err(|e| ConvertError::SerializeError(e.to_string()))
}

fn convert_file(source: &Path, output: &Path) -> Result<(), ConvertError> {
    let content =
        fs::read_to_string(source).map_err(|e| ConvertError::ReadError(e.to_string()))?;

    let json = yaml_to_json(&content)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| ConvertError::WriteError(e.to_string()))?;
    }

    fs::write(output, json).map_err(|e| ConvertError::WriteError(e.to_string()))
}
