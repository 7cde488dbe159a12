//! Full pre-build run.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use docprep_core::Pipeline;

use super::convert::log_report;
use crate::config::load_config;

/// Run the whole pipeline.
///
/// A malformed config file skips the run with an error log, so the
/// surrounding build carries on. `strict` turns it into a failure.
pub fn run(config_path: &Path, strict: bool, date: Option<NaiveDate>) -> Result<()> {
    tracing::info!("Running pre-build steps...");

    let file_config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) if !strict => {
            tracing::error!("{:#}", e);
            tracing::warn!("Skipping pre-build steps");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let date = date.unwrap_or_else(super::today);

    let report = Pipeline::new(file_config.pipeline_config()).run(date);

    for (pair, result) in &report.mirrors {
        log_report(pair.source.as_path(), result);
    }

    if let Some(stamp) = &report.stamp {
        tracing::info!("Version: {}", stamp.version);
    }

    tracing::info!(
        "Converted {} files with {} failures in {}ms",
        report.total_converted(),
        report.total_failures(),
        report.duration_ms
    );

    if strict && !report.is_clean() {
        anyhow::bail!("{} pre-build failures", report.total_failures());
    }

    Ok(())
}
