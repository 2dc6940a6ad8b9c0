use clap::Parser;
use lineagemap::cli::{Cli, Command};
use lineagemap::{cmd_build, cmd_graph, cmd_init};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Build(args) => cmd_build(args),
        Command::Graph(args) => cmd_graph(args),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}
