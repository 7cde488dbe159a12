//! Build version stamping.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Default strftime format for the version string.
pub const DEFAULT_VERSION_FORMAT: &str = "%Y.%m.%d";

/// Result of stamping a version file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStamp {
    /// Version file that was written
    pub path: PathBuf,

    /// Formatted version string
    pub version: String,

    /// Build date
    pub date: NaiveDate,
}

/// Errors that can occur while stamping the version file.
#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("Invalid version format: {0:?}")]
    InvalidFormat(String),

    #[error("Failed to read version file: {0}")]
    ReadError(String),

    #[error("Failed to parse version file: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Version file is not a JSON object: {0}")]
    NotAnObject(String),

    #[error("Failed to write version file: {0}")]
    WriteError(String),
}

/// Format `date` with a strftime `format`.
///
/// Unknown specifiers and time fields (a date has no hours) are rejected
/// instead of panicking inside `Display`.
pub fn format_version(date: NaiveDate, format: &str) -> Result<String, StampError> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();

    if items.is_empty() || items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(StampError::InvalidFormat(format.to_string()));
    }

    let mut version = String::new();
    write!(version, "{}", date.format_with_items(items.iter()))
        .map_err(|_| StampError::InvalidFormat(format.to_string()))?;

    Ok(version)
}

/// Write `version` and `buildDate` into the JSON version file at `path`.
///
/// Other keys in an existing file are kept in place. A missing file (and
/// any missing parent directory) is created.
pub fn stamp_version(
    path: &Path,
    date: NaiveDate,
    format: &str,
) -> Result<VersionStamp, StampError> {
    let version = format_version(date, format)?;

    let mut doc = if path.exists() {
        read_version_file(path)?
    } else {
        Map::new()
    };

    doc.insert("version".to_string(), Value::String(version.clone()));
    doc.insert(
        "buildDate".to_string(),
        Value::String(date.format("%Y-%m-%d").to_string()),
    );

    let json = serde_json::to_string_pretty(&Value::Object(doc))
        .map_err(|e| StampError::WriteError(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StampError::WriteError(e.to_string()))?;
    }

    fs::write(path, json)
        .map_err(|e| StampError::WriteError(format!("{}: {}", path.display(), e)))?;

    tracing::info!("Stamped {} with version {}", path.display(), version);

    Ok(VersionStamp {
        path: path.to_path_buf(),
        version,
        date,
    })
}

fn read_version_file(path: &Path) -> Result<Map<String, Value>, StampError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StampError::ReadError(format!("{}: {}", path.display(), e)))?;

    let value: Value = serde_json::from_str(&content).map_err(|e| StampError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StampError::NotAnObject(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn formats_with_default_format() {
        assert_eq!(
            format_version(date(), DEFAULT_VERSION_FORMAT).unwrap(),
            "2024.03.07"
        );
    }

    #[test]
    fn rejects_bad_formats() {
        assert!(matches!(
            format_version(date(), "%Q"),
            Err(StampError::InvalidFormat(_))
        ));
        assert!(matches!(
            format_version(date(), "%H:%M"),
            Err(StampError::InvalidFormat(_))
        ));
        assert!(matches!(
            format_version(date(), ""),
            Err(StampError::InvalidFormat(_))
        ));
    }

    #[test]
    fn creates_missing_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("public/version.json");

        let stamp = stamp_version(&path, date(), DEFAULT_VERSION_FORMAT).unwrap();

        assert_eq!(stamp.version, "2024.03.07");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"version\": \"2024.03.07\",\n  \"buildDate\": \"2024-03-07\"\n}"
        );
    }

    #[test]
    fn keeps_existing_keys_in_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("version.json");
        fs::write(
            &path,
            r#"{"name": "docs", "buildDate": "2000-01-01", "channel": "stable"}"#,
        )
        .unwrap();

        stamp_version(&path, date(), "v%Y%m%d").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"name\": \"docs\",\n  \"buildDate\": \"2024-03-07\",\n  \"channel\": \"stable\",\n  \"version\": \"v20240307\"\n}"
        );
    }

    #[test]
    fn rejects_non_object_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("version.json");
        fs::write(&path, "[1, 2]").unwrap();

        let result = stamp_version(&path, date(), DEFAULT_VERSION_FORMAT);

        assert!(matches!(result, Err(StampError::NotAnObject(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2]");
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("version.json");
        fs::write(&path, "{ not json").unwrap();

        let result = stamp_version(&path, date(), DEFAULT_VERSION_FORMAT);

        assert!(matches!(result, Err(StampError::ParseError { .. })));
    }
}
