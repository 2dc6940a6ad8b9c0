mod build;
mod graph;
mod init;

pub use build::cmd_build;
pub use graph::cmd_graph;
pub use init::cmd_init;

use crate::api::{LineageError, config_dir, load_records_with_fs};
use crate::builder::GroupBy;
use crate::config::Config;
use crate::fs::FileSystem;
use crate::model::LineageRecord;
use crate::style;
use std::path::{Path, PathBuf};

/// Shared context for command execution, reducing boilerplate across commands.
pub struct CommandContext {
    pub input: PathBuf,
    pub config: Config,
    pub group_by: GroupBy,
    pub records: Vec<LineageRecord>,
}

impl CommandContext {
    /// Load config and records for `input`. CLI `group_by` wins over config.
    /// Returns Err(exit_code) if setup fails.
    pub fn new(
        input: &Path,
        group_by: Option<GroupBy>,
        fs: &dyn FileSystem,
    ) -> Result<Self, i32> {
        let config = Config::load_with_fs(config_dir(input), fs).unwrap_or_else(|e| {
            style::warning(&format!("Failed to load config: {}. Using defaults.", e));
            Config::default()
        });

        let records = match load_records_with_fs(input, fs) {
            Ok(records) => records,
            Err(LineageError::InputNotFound(path)) => {
                style::error(&format!("Could not find input: {}", style::path(&path)));
                return Err(1);
            }
            Err(e) => {
                style::error(&e.to_string());
                style::hint("Input must be a JSON array of records with entityId, parentIds and childIds");
                return Err(1);
            }
        };

        let group_by = group_by.unwrap_or(config.graph.group_by);

        Ok(Self {
            input: input.to_path_buf(),
            config,
            group_by,
            records,
        })
    }

    /// Title from config, else the input file name.
    pub fn default_title(&self) -> String {
        self.config.graph.title.clone().unwrap_or_else(|| {
            self.input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("lineage")
                .to_string()
        })
    }
}
