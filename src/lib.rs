pub mod api;
pub mod builder;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fs;
pub mod graph;
pub mod layout;
pub mod model;
pub mod output;
pub mod style;

pub use api::{BuildOptions, LineageError, build, load_records, parse_records};
pub use builder::{GroupBy, build_graph};
pub use cli::Cli;
pub use commands::{cmd_build, cmd_graph, cmd_init};
pub use config::Config;
pub use layout::{GridLayout, Position};
pub use model::{Edge, Group, GroupIndex, LineageGraph, LineageRecord, Node};
