//! Bootstrap the config directory in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in `root`.
pub fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docprep...");

    let config_dir = root.join("config");

    if config_dir.exists() {
        if !yes {
            tracing::warn!("config/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let config_path = root.join("docprep.toml");
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write docprep.toml")?;
        tracing::info!("Created docprep.toml");
    }

    let site_path = config_dir.join("site.yml");
    if !site_path.exists() || yes {
        fs::write(&site_path, DEFAULT_SITE).context("Failed to write site.yml")?;
        tracing::info!("Created config/site.yml");
    }

    let nav_path = config_dir.join("navigation.yml");
    if !nav_path.exists() || yes {
        fs::write(&nav_path, DEFAULT_NAVIGATION).context("Failed to write navigation.yml")?;
        tracing::info!("Created config/navigation.yml");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docprep' before your site build to generate JSON config.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docprep configuration

# YAML trees mirrored to JSON. Add one [[mirror]] table per tree.
[[mirror]]
source = "config"
dest = "public/config"

[version]
# JSON file stamped with the build date
file = "public/version.json"

# strftime format of the version string
format = "%Y.%m.%d"
"#;

const DEFAULT_SITE: &str = r#"title: My Documentation
description: Project documentation
base_url: /
repository:
  url: https://example.com/your/project
  branch: main
"#;

const DEFAULT_NAVIGATION: &str = r#"- title: Introduction
  path: /
- title: Getting Started
  path: /getting-started/
- title: Reference
  children:
    - title: Configuration
      path: /reference/configuration/
"#;
