use crate::builder::GroupBy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lineagemap")]
#[command(about = "Build and browse data-lineage graphs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the graph from a lineage file and print it
    Build(BuildArgs),

    /// Launch the interactive lineage viewer
    Graph(GraphArgs),

    /// Generate a starter .lineagemap.toml configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// JSON file containing an array of lineage records
    pub input: PathBuf,

    /// Record field used to group nodes (overrides config)
    #[arg(long)]
    pub group_by: Option<GroupByArg>,

    /// Output format
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// JSON file containing an array of lineage records
    pub input: PathBuf,

    /// Start HTTP server for interactive visualization
    #[arg(long)]
    pub serve: bool,

    /// Serve and rebuild the graph whenever the input file changes
    #[arg(short, long)]
    pub watch: bool,

    /// Port for HTTP server
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Export graph as static HTML file instead of serving
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Record field used to group nodes (overrides config)
    #[arg(long)]
    pub group_by: Option<GroupByArg>,

    /// Title shown in the viewer (defaults to the input file name)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory where to create .lineagemap.toml (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// `--group-by` values; converted to [`GroupBy`] before reaching the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GroupByArg {
    /// Group by `processorName`
    ProcessorName,
    /// Group by `componentType`
    ComponentType,
}

impl From<GroupByArg> for GroupBy {
    fn from(arg: GroupByArg) -> Self {
        match arg {
            GroupByArg::ProcessorName => GroupBy::ProcessorName,
            GroupByArg::ComponentType => GroupBy::ComponentType,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::parse_from([
            "lineagemap",
            "build",
            "flow.json",
            "--group-by",
            "component-type",
            "-f",
            "json",
        ]);

        match cli.command {
            Command::Build(args) => {
                assert_eq!(args.input, PathBuf::from("flow.json"));
                assert_eq!(args.group_by, Some(GroupByArg::ComponentType));
                assert_eq!(args.group_by.map(GroupBy::from), Some(GroupBy::ComponentType));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.output.is_none());
            }
            other => panic!("Expected build command, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_graph_defaults() {
        let cli = Cli::parse_from(["lineagemap", "graph", "flow.json", "--serve"]);

        match cli.command {
            Command::Graph(args) => {
                assert!(args.serve);
                assert!(!args.watch);
                assert_eq!(args.port, 3000);
                assert!(args.group_by.is_none());
            }
            other => panic!("Expected graph command, got: {:?}", other),
        }
    }

    #[test]
    fn test_group_by_values_match_config_spelling() {
        let cli = Cli::parse_from(["lineagemap", "graph", "flow.json", "--group-by", "processor-name"]);
        match cli.command {
            Command::Graph(args) => {
                let group_by: GroupBy = args.group_by.unwrap().into();
                assert_eq!(group_by.to_string(), "processor-name");
            }
            other => panic!("Expected graph command, got: {:?}", other),
        }

        assert!(Cli::try_parse_from(["lineagemap", "build", "flow.json", "--group-by", "name"]).is_err());
    }
}
