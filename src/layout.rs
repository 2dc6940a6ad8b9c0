//! Fixed-grid starting positions for the viewer.

use crate::model::LineageGraph;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Row/column placement, one horizontal band per group.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub spacing_x: f64,
    pub spacing_y: f64,
    pub group_spacing_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            spacing_x: 250.0,
            spacing_y: 250.0,
            group_spacing_y: 400.0,
            offset_x: 200.0,
            offset_y: 0.0,
        }
    }
}

impl GridLayout {
    pub fn position(&self, band: usize, index: usize) -> Position {
        let columns = self.columns.max(1);
        let col = index % columns;
        let row = index / columns;
        Position {
            x: col as f64 * self.spacing_x + self.offset_x,
            y: band as f64 * self.group_spacing_y + row as f64 * self.spacing_y + self.offset_y,
        }
    }

    /// Position every node id. Ungrouped nodes share one band after the
    /// last group; a repeated id keeps its last placement.
    pub fn place(&self, graph: &LineageGraph) -> HashMap<String, Position> {
        let mut positions = HashMap::with_capacity(graph.nodes.len());

        for (band, group) in graph.groups.iter().enumerate() {
            for (index, node) in group.nodes.iter().enumerate() {
                positions.insert(node.id.clone(), self.position(band, index));
            }
        }

        let band = graph.groups.len();
        for (index, node) in graph.ungrouped_nodes().enumerate() {
            positions.insert(node.id.clone(), self.position(band, index));
        }

        positions
    }
}
