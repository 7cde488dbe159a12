//! docprep CLI - pre-build utilities for static documentation sites.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docprep")]
#[command(about = "Pre-build utilities for static documentation sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to docprep.toml config file
    #[arg(short, long, default_value = "docprep.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every pre-build step (the default)
    Run {
        /// Fail when any step reports a failure
        #[arg(long)]
        strict: bool,

        /// Build date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Convert YAML trees to JSON
    Convert {
        /// Source directory (requires --dest)
        #[arg(short, long, requires = "dest")]
        source: Option<PathBuf>,

        /// Destination directory (requires --source)
        #[arg(short, long, requires = "source")]
        dest: Option<PathBuf>,

        /// Fail when any file fails to convert
        #[arg(long)]
        strict: bool,
    },

    /// Stamp the version file with the build date
    Stamp {
        /// Version file (defaults to config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Build date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// strftime format for the version string (defaults to config)
        #[arg(long)]
        format: Option<String>,
    },

    /// Create the config directory and a default docprep.toml
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        None => {
            commands::run::run(&cli.config, false, None)?;
        }
        Some(Commands::Run { strict, date }) => {
            commands::run::run(&cli.config, strict, date)?;
        }
        Some(Commands::Convert {
            source,
            dest,
            strict,
        }) => {
            let pair = source.zip(dest);
            commands::convert::run(&cli.config, pair, strict)?;
        }
        Some(Commands::Stamp { file, date, format }) => {
            commands::stamp::run(&cli.config, file, date, format)?;
        }
        Some(Commands::Init { yes }) => {
            commands::init::run(Path::new("."), yes)?;
        }
    }

    Ok(())
}
