//! Version stamp command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use docprep_core::stamp_version;

use crate::config::load_config;

/// Run the stamp command. Flags override the `[version]` config section.
pub fn run(
    config_path: &Path,
    file: Option<PathBuf>,
    date: Option<NaiveDate>,
    format: Option<String>,
) -> Result<()> {
    let version = load_config(config_path)?.version_config();

    let file = file.unwrap_or(version.file);
    let format = format.unwrap_or(version.format);
    let date = date.unwrap_or_else(super::today);

    let stamp = stamp_version(&file, date, &format)
        .with_context(|| format!("Failed to stamp {}", file.display()))?;

    tracing::info!("Version: {}", stamp.version);

    Ok(())
}
