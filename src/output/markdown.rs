use crate::model::{LineageGraph, Node};
use crate::output::OutputFormatter;
use std::io::Write;

pub struct MarkdownOutput {
    pub title: String,
}

impl MarkdownOutput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

fn node_line(node: &Node) -> String {
    if node.label.is_empty() {
        format!("- `{}` (unlabeled)", node.id)
    } else {
        format!("- `{}` {}", node.id, node.label)
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, graph: &LineageGraph, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Lineage Graph: {}\n", self.title)?;

        writeln!(writer, "- **Nodes:** {}", graph.nodes.len())?;
        writeln!(writer, "- **Edges:** {}", graph.edges.len())?;
        writeln!(writer, "- **Groups:** {}", graph.groups.len())?;

        if graph.nodes.is_empty() {
            writeln!(writer, "\nNo lineage records.")?;
            return Ok(());
        }

        writeln!(writer, "\n## Groups\n")?;
        if graph.groups.is_empty() {
            writeln!(writer, "No node carries a grouping value.")?;
        }
        for group in graph.groups.iter() {
            writeln!(writer, "### {} ({})\n", group.key, group.nodes.len())?;
            for node in &group.nodes {
                writeln!(writer, "{}", node_line(node))?;
            }
            writeln!(writer)?;
        }

        let ungrouped: Vec<_> = graph.ungrouped_nodes().collect();
        if !ungrouped.is_empty() {
            writeln!(writer, "### Ungrouped ({})\n", ungrouped.len())?;
            for node in ungrouped {
                writeln!(writer, "{}", node_line(node))?;
            }
            writeln!(writer)?;
        }

        let dangling = graph.dangling_edges();
        let duplicates = graph.duplicate_edge_count();
        if dangling.is_empty() && duplicates == 0 {
            return Ok(());
        }

        writeln!(writer, "## Warnings\n")?;

        if !dangling.is_empty() {
            writeln!(writer, "### Dangling Edges\n")?;
            for edge in dangling {
                writeln!(writer, "- `{}` → `{}`", edge.source, edge.target)?;
            }
            writeln!(writer)?;
        }

        if duplicates > 0 {
            writeln!(writer, "### Repeated Edges\n")?;
            writeln!(
                writer,
                "{} edge(s) repeat an earlier edge id, usually because both endpoints declare the link.",
                duplicates
            )?;
        }

        Ok(())
    }
}
