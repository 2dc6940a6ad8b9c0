use crate::builder::GroupBy;
use crate::layout::GridLayout;
use crate::model::LineageGraph;
use serde::Serialize;
use std::collections::HashSet;

/// Payload consumed by the browser viewer.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub groups: Vec<GraphGroup>,
    pub metadata: GraphMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub group: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub dangling: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphGroup {
    pub key: String,
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphMetadata {
    pub title: String,
    pub group_by: String,
    pub total_nodes: usize,
    pub total_edges: usize,
    pub total_groups: usize,
    pub dangling_edges: usize,
    pub duplicate_edges: usize,
}

impl GraphData {
    pub fn from_graph(
        graph: &LineageGraph,
        layout: &GridLayout,
        title: &str,
        group_by: GroupBy,
    ) -> Self {
        let positions = layout.place(graph);
        let origin = layout.position(0, 0);

        let nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .map(|n| {
                let pos = positions.get(&n.id).copied().unwrap_or(origin);
                GraphNode {
                    id: n.id.clone(),
                    label: n.label.clone(),
                    group: n.group_key.clone(),
                    x: pos.x,
                    y: pos.y,
                }
            })
            .collect();

        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        let edges: Vec<GraphEdge> = graph
            .edges
            .iter()
            .map(|e| GraphEdge {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
                dangling: !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()),
            })
            .collect();

        let groups: Vec<GraphGroup> = graph
            .groups
            .iter()
            .map(|g| GraphGroup {
                key: g.key.clone(),
                node_ids: g.nodes.iter().map(|n| n.id.clone()).collect(),
            })
            .collect();

        let metadata = GraphMetadata {
            title: title.to_string(),
            group_by: group_by.to_string(),
            total_nodes: nodes.len(),
            total_edges: edges.len(),
            total_groups: groups.len(),
            dangling_edges: edges.iter().filter(|e| e.dangling).count(),
            duplicate_edges: graph.duplicate_edge_count(),
        };

        GraphData {
            nodes,
            edges,
            groups,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use crate::model::LineageRecord;

    #[test]
    fn test_payload_positions_and_flags() {
        let records = vec![
            LineageRecord::new("A")
                .with_children(["B", "missing"])
                .with_processor_name("Ingest"),
            LineageRecord::new("B")
                .with_parents(["A"])
                .with_processor_name("Route"),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);
        let data = GraphData::from_graph(&graph, &GridLayout::default(), "flow", GroupBy::ProcessorName);

        assert_eq!(data.nodes[0].x, 200.0);
        assert_eq!(data.nodes[0].y, 0.0);
        assert_eq!(data.nodes[1].y, 400.0);

        assert_eq!(data.edges.len(), 3);
        assert!(!data.edges[0].dangling);
        assert!(data.edges[1].dangling);

        assert_eq!(data.groups[0].key, "Ingest");
        assert_eq!(data.groups[1].node_ids, vec!["B".to_string()]);

        assert_eq!(data.metadata.title, "flow");
        assert_eq!(data.metadata.group_by, "processor-name");
        assert_eq!(data.metadata.dangling_edges, 1);
        assert_eq!(data.metadata.duplicate_edges, 1);
    }
}
