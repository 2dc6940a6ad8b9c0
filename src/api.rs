//! Library API for lineagemap.
//!
//! Unlike the CLI commands, which print output and return exit codes, these
//! functions return `Result` types that calling code can handle.
//!
//! # Example
//!
//! ```no_run
//! use lineagemap::{BuildOptions, build};
//! use std::path::Path;
//!
//! let graph = build(Path::new("flow.json"), BuildOptions::default())?;
//! println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//! for group in graph.groups.iter() {
//!     println!("{}: {} nodes", group.key, group.nodes.len());
//! }
//! # Ok::<(), lineagemap::LineageError>(())
//! ```

use crate::builder::{GroupBy, build_graph};
use crate::config::{Config, ConfigError};
use crate::fs::{FileSystem, default_fs};
use crate::model::{LineageGraph, LineageRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading lineage input.
#[derive(Debug, Error)]
pub enum LineageError {
    /// The input file does not exist.
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),

    /// The input is not a JSON array of lineage records.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error while reading input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for the `build` function.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Grouping field; `None` uses the config file value.
    pub group_by: Option<GroupBy>,
}

/// Parse a JSON array of lineage records.
pub fn parse_records(json: &str) -> Result<Vec<LineageRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read lineage records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<LineageRecord>, LineageError> {
    load_records_with_fs(path, default_fs())
}

pub fn load_records_with_fs(
    path: &Path,
    fs: &dyn FileSystem,
) -> Result<Vec<LineageRecord>, LineageError> {
    if !fs.exists(path) {
        return Err(LineageError::InputNotFound(path.to_path_buf()));
    }

    let content = fs.read_to_string(path)?;
    parse_records(&content).map_err(|source| LineageError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load records from `input` and build the lineage graph.
///
/// The grouping field comes from `options`, else from `.lineagemap.toml`
/// next to the input file, else defaults to `processorName`.
pub fn build(input: &Path, options: BuildOptions) -> Result<LineageGraph, LineageError> {
    build_with_fs(input, options, default_fs())
}

pub fn build_with_fs(
    input: &Path,
    options: BuildOptions,
    fs: &dyn FileSystem,
) -> Result<LineageGraph, LineageError> {
    let records = load_records_with_fs(input, fs)?;

    let group_by = match options.group_by {
        Some(group_by) => group_by,
        None => Config::load_with_fs(config_dir(input), fs)?.graph.group_by,
    };

    Ok(build_graph(&records, group_by))
}

/// Directory searched for `.lineagemap.toml` for a given input file.
pub fn config_dir(input: &Path) -> &Path {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
