use crate::builder::GroupBy;
use crate::fs::{FileSystem, default_fs};
use crate::layout::GridLayout;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = ".lineagemap.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub graph: GraphSettings,
    pub layout: GridLayout,
}

#[derive(Debug, Clone, Default)]
pub struct GraphSettings {
    pub group_by: GroupBy,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    graph: Option<RawGraph>,
    layout: Option<RawLayout>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGraph {
    group_by: Option<GroupBy>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLayout {
    columns: Option<usize>,
    spacing_x: Option<f64>,
    spacing_y: Option<f64>,
    group_spacing_y: Option<f64>,
    offset_x: Option<f64>,
    offset_y: Option<f64>,
}

impl Config {
    /// Load `.lineagemap.toml` from `dir`, falling back to defaults when absent.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Self::load_with_fs(dir, default_fs())
    }

    pub fn load_with_fs(dir: &Path, fs: &dyn FileSystem) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let content = fs.read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let graph = match raw.graph {
            Some(g) => GraphSettings {
                group_by: g.group_by.unwrap_or_default(),
                title: g.title.filter(|t| !t.is_empty()),
            },
            None => GraphSettings::default(),
        };

        let defaults = GridLayout::default();
        let layout = match raw.layout {
            Some(l) => GridLayout {
                columns: l.columns.unwrap_or(defaults.columns),
                spacing_x: l.spacing_x.unwrap_or(defaults.spacing_x),
                spacing_y: l.spacing_y.unwrap_or(defaults.spacing_y),
                group_spacing_y: l.group_spacing_y.unwrap_or(defaults.group_spacing_y),
                offset_x: l.offset_x.unwrap_or(defaults.offset_x),
                offset_y: l.offset_y.unwrap_or(defaults.offset_y),
            },
            None => defaults,
        };

        if layout.columns == 0 {
            return Err(ConfigError::Invalid(
                "layout.columns must be at least 1".to_string(),
            ));
        }

        Ok(Self { graph, layout })
    }
}

/// Starter config written by `lineagemap init`.
pub fn generate_config_template() -> String {
    let layout = GridLayout::default();
    format!(
        r#"# lineagemap configuration

[graph]
# Field used to group nodes: "processor-name" or "component-type"
group_by = "{group_by}"
# title = "My flow"

[layout]
# Nodes per row inside a group
columns = {columns}
spacing_x = {spacing_x:.1}
spacing_y = {spacing_y:.1}
# Vertical distance between group bands
group_spacing_y = {group_spacing_y:.1}
offset_x = {offset_x:.1}
offset_y = {offset_y:.1}
"#,
        group_by = GroupBy::default(),
        columns = layout.columns,
        spacing_x = layout.spacing_x,
        spacing_y = layout.spacing_y,
        group_spacing_y = layout.group_spacing_y,
        offset_x = layout.offset_x,
        offset_y = layout.offset_y,
    )
}
