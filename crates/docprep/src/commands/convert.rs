//! YAML to JSON conversion command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docprep_core::{ConversionReport, Pipeline, TreeMirror};

use crate::config::load_config;

/// Run the convert command.
///
/// With an explicit `(source, dest)` pair only that tree is mirrored,
/// otherwise every `[[mirror]]` from the config file.
pub fn run(config_path: &Path, pair: Option<(PathBuf, PathBuf)>, strict: bool) -> Result<()> {
    let reports = match pair {
        Some((source, dest)) => {
            let report = TreeMirror::new(&source, &dest).convert();
            vec![(source, report)]
        }
        None => {
            let file_config = load_config(config_path)?;
            Pipeline::new(file_config.pipeline_config())
                .convert_all()
                .into_iter()
                .map(|(pair, report)| (pair.source, report))
                .collect()
        }
    };

    let mut failures = 0;
    for (source, report) in &reports {
        log_report(source, report);
        failures += report.failures.len();
    }

    if strict && failures > 0 {
        anyhow::bail!("{} files failed to convert", failures);
    }

    Ok(())
}

/// Log a one-line summary of a mirror run.
pub(crate) fn log_report(source: &Path, report: &ConversionReport) {
    if report.source_missing {
        return;
    }

    if report.is_clean() {
        tracing::info!(
            "Converted {} files from {} in {}ms",
            report.converted,
            source.display(),
            report.duration_ms
        );
    } else {
        tracing::warn!(
            "Converted {} files from {}, {} failed",
            report.converted,
            source.display(),
            report.failures.len()
        );
        for failure in &report.failures {
            tracing::debug!("  {}", failure);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn converts_explicit_pair() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let out = temp.path().join("out");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/menu.yaml"), "- home\n").unwrap();

        run(
            &temp.path().join("missing.toml"),
            Some((src, out.clone())),
            true,
        )
        .unwrap();

        assert!(out.join("nested/menu.json").exists());
    }

    #[test]
    fn strict_mode_reports_failures() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let out = temp.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("bad.yml"), "title: [invalid yaml\n").unwrap();

        let config = temp.path().join("missing.toml");
        assert!(run(&config, Some((src.clone(), out.clone())), false).is_ok());
        assert!(run(&config, Some((src, out)), true).is_err());
    }

    #[test]
    fn missing_source_is_not_a_failure() {
        let temp = tempdir().unwrap();

        let result = run(
            &temp.path().join("missing.toml"),
            Some((temp.path().join("nope"), temp.path().join("out"))),
            true,
        );

        assert!(result.is_ok());
        assert!(!temp.path().join("out").exists());
    }
}
