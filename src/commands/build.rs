use crate::builder::build_graph;
use crate::cli::{BuildArgs, OutputFormat};
use crate::fs::{FileSystem, default_fs};
use crate::model::LineageGraph;
use crate::output::{JsonOutput, MarkdownOutput, OutputFormatter};
use crate::style;
use std::io::{self, Write};

use super::CommandContext;

pub fn cmd_build(args: BuildArgs) -> i32 {
    cmd_build_with_fs(args, default_fs())
}

pub fn cmd_build_with_fs(args: BuildArgs, fs: &dyn FileSystem) -> i32 {
    let ctx = match CommandContext::new(&args.input, args.group_by.map(Into::into), fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let graph = build_graph(&ctx.records, ctx.group_by);

    for warning in edge_warnings(&graph) {
        style::warning(&warning);
    }

    // Format output to string first
    let mut buffer = Vec::new();
    let format_result = match args.format {
        OutputFormat::Markdown => MarkdownOutput::new(ctx.default_title()).format(&graph, &mut buffer),
        OutputFormat::Json => JsonOutput::new().format(&graph, &mut buffer),
    };

    if let Err(e) = format_result {
        style::error(&format!("Failed to format output: {}", e));
        return 1;
    }

    let output_str = String::from_utf8_lossy(&buffer);

    let mut output: Box<dyn Write> = match &args.output {
        Some(output_path) => match fs.create_file(output_path) {
            Ok(writer) => writer,
            Err(e) => {
                style::error(&format!("Could not create output file: {}", e));
                return 1;
            }
        },
        None => Box::new(io::stdout()),
    };

    // Render markdown nicely to terminal, or write plain text to file/pipe
    let write_result = if args.output.is_none() && args.format == OutputFormat::Markdown {
        style::render_markdown(&output_str, &mut output)
    } else {
        write!(output, "{}", output_str).and_then(|_| output.flush())
    };

    if let Err(e) = write_result {
        style::error(&format!("Failed to write output: {}", e));
        return 1;
    }

    0
}

/// Dangling and repeated edges are kept in the graph but reported.
fn edge_warnings(graph: &LineageGraph) -> Vec<String> {
    let mut warnings = Vec::new();

    let dangling = graph.dangling_edges().len();
    if dangling > 0 {
        warnings.push(format!(
            "{} edge(s) reference entities missing from the input",
            dangling
        ));
    }

    let repeated = graph.duplicate_edge_count();
    if repeated > 0 {
        warnings.push(format!(
            "{} edge(s) repeat an earlier edge id (declared on both parent and child)",
            repeated
        ));
    }

    warnings
}
