//! Pre-build utilities for static documentation sites.
//!
//! Mirrors trees of YAML configuration into JSON and stamps a build
//! version file.

pub mod mirror;
pub mod pipeline;
pub mod version;

pub use mirror::{convert, ConversionFailure, ConversionReport, ConvertError, TreeMirror};
pub use pipeline::{MirrorPair, Pipeline, PipelineConfig, PipelineReport, VersionConfig};
pub use version::{stamp_version, StampError, VersionStamp, DEFAULT_VERSION_FORMAT};
