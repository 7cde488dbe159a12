//! Configuration file (docprep.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docprep_core::{MirrorPair, PipelineConfig, VersionConfig, DEFAULT_VERSION_FORMAT};
use serde::Deserialize;

/// Configuration file structure (docprep.toml).
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    /// `[[mirror]]` tables
    #[serde(default = "default_mirrors", rename = "mirror")]
    pub mirrors: Vec<MirrorEntry>,

    #[serde(default)]
    pub version: VersionSection,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MirrorEntry {
    pub source: String,
    pub dest: String,
}

#[derive(Debug, Deserialize)]
pub struct VersionSection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_version_file")]
    pub file: String,
    #[serde(default = "default_version_format")]
    pub format: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            mirrors: default_mirrors(),
            version: VersionSection::default(),
        }
    }
}

impl Default for VersionSection {
    fn default() -> Self {
        Self {
            enabled: true,
            file: default_version_file(),
            format: default_version_format(),
        }
    }
}

fn default_mirrors() -> Vec<MirrorEntry> {
    vec![MirrorEntry {
        source: "config".to_string(),
        dest: "public/config".to_string(),
    }]
}
fn default_true() -> bool {
    true
}
fn default_version_file() -> String {
    "public/version.json".to_string()
}
fn default_version_format() -> String {
    DEFAULT_VERSION_FORMAT.to_string()
}

impl ConfigFile {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            mirrors: self
                .mirrors
                .iter()
                .map(|m| MirrorPair::new(&m.source, &m.dest))
                .collect(),
            version: self.version.enabled.then(|| self.version_config()),
        }
    }

    pub fn version_config(&self) -> VersionConfig {
        VersionConfig {
            file: PathBuf::from(&self.version.file),
            format: self.version.format.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}
