use crate::builder::build_graph;
use crate::cli::GraphArgs;
use crate::fs::{FileSystem, default_fs};
use crate::graph::{GraphData, WatchContext, generate_static_html};
use crate::style;

use super::CommandContext;

pub fn cmd_graph(args: GraphArgs) -> i32 {
    cmd_graph_with_fs(args, default_fs())
}

pub fn cmd_graph_with_fs(args: GraphArgs, fs: &dyn FileSystem) -> i32 {
    if !args.serve && !args.watch && args.export.is_none() {
        style::error(
            "Use --serve to start the visualization server, or --export to save static HTML",
        );
        return 1;
    }

    let ctx = match CommandContext::new(&args.input, args.group_by.map(Into::into), fs) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    let title = args.title.clone().unwrap_or_else(|| ctx.default_title());
    let graph = build_graph(&ctx.records, ctx.group_by);
    let graph_data = GraphData::from_graph(&graph, &ctx.config.layout, &title, ctx.group_by);

    if let Some(export_path) = &args.export {
        let html = match generate_static_html(&graph_data) {
            Ok(html) => html,
            Err(e) => {
                style::error(&format!("Failed to serialize graph: {}", e));
                return 1;
            }
        };
        if let Err(e) = fs.write(export_path, &html) {
            style::error(&format!("Failed to write export file: {}", e));
            return 1;
        }
        style::success(&format!("Graph exported to: {}", style::path(export_path)));
        println!("{}", style::metric("Nodes", graph_data.metadata.total_nodes));
        println!("{}", style::metric("Edges", graph_data.metadata.total_edges));
        println!("{}", style::metric("Groups", graph_data.metadata.total_groups));
        return 0;
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            style::error(&format!("Failed to create tokio runtime: {}", e));
            return 1;
        }
    };

    let result = if args.watch {
        let watch_ctx = WatchContext {
            input: ctx.input.clone(),
            group_by: ctx.group_by,
            layout: ctx.config.layout.clone(),
            title,
        };
        rt.block_on(crate::graph::serve_with_watch(
            graph_data, args.port, args.open, watch_ctx,
        ))
    } else {
        rt.block_on(crate::graph::serve(graph_data, args.port, args.open))
    };

    if let Err(e) = result {
        style::error(&format!("Server failed: {}", e));
        return 1;
    }

    0
}
