use crate::model::LineageGraph;
use crate::output::OutputFormatter;
use std::io::Write;

/// Pretty-printed JSON of the built graph: `nodes`, `edges` and `groups`.
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, graph: &LineageGraph, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(graph)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        writeln!(writer, "{}", json)
    }
}
