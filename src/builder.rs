//! Flat lineage records -> nodes, edges and group index.

use crate::model::{Edge, GroupIndex, LineageGraph, LineageRecord, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Record field used to bucket nodes into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupBy {
    /// Group by `processorName`
    #[default]
    ProcessorName,
    /// Group by `componentType`
    ComponentType,
}

impl GroupBy {
    fn key_of(self, record: &LineageRecord) -> Option<&str> {
        let value = match self {
            GroupBy::ProcessorName => record.processor_name.as_deref(),
            GroupBy::ComponentType => record.component_type.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::ProcessorName => write!(f, "processor-name"),
            GroupBy::ComponentType => write!(f, "component-type"),
        }
    }
}

/// Build the lineage graph from records in input order.
///
/// Later records with an already-seen `entityId` overwrite the node in place
/// but are still appended to their group. Edges are neither deduplicated nor
/// checked against the node set.
pub fn build_graph(records: &[LineageRecord], group_by: GroupBy) -> LineageGraph {
    let mut nodes: Vec<Node> = Vec::with_capacity(records.len());
    let mut node_positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    let mut edges: Vec<Edge> = Vec::new();
    let mut groups = GroupIndex::new();

    for record in records {
        let group_key = group_by.key_of(record);
        let node = Node {
            id: record.entity_id.clone(),
            label: node_label(record),
            group_key: group_key.map(str::to_string),
        };

        if let Some(key) = group_key {
            groups.push(key, node.clone());
        }

        match node_positions.get(record.entity_id.as_str()) {
            Some(idx) => nodes[*idx] = node,
            None => {
                node_positions.insert(record.entity_id.as_str(), nodes.len());
                nodes.push(node);
            }
        }

        for parent in &record.parent_ids {
            edges.push(Edge::new(parent.as_str(), record.entity_id.as_str()));
        }
        for child in &record.child_ids {
            edges.push(Edge::new(record.entity_id.as_str(), child.as_str()));
        }
    }

    LineageGraph {
        nodes,
        edges,
        groups,
    }
}

fn node_label(record: &LineageRecord) -> String {
    first_non_empty(&[
        record.component_name.as_deref(),
        record.component_type.as_deref(),
    ])
    .unwrap_or_default()
    .to_string()
}

fn first_non_empty<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch_into_sink() -> Vec<LineageRecord> {
        vec![
            LineageRecord::new("A")
                .with_children(["B"])
                .with_component_name("Fetch")
                .with_component_type("Proc"),
            LineageRecord::new("B")
                .with_parents(["A"])
                .with_component_name("")
                .with_component_type("Sink"),
        ]
    }

    #[test]
    fn test_empty_input() {
        let graph = build_graph(&[], GroupBy::ComponentType);
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.groups.is_empty());
    }

    #[test]
    fn test_symmetric_declaration_yields_two_edges() {
        let graph = build_graph(&fetch_into_sink(), GroupBy::ComponentType);

        let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Fetch", "Sink"]);

        assert_eq!(graph.edges, vec![Edge::new("A", "B"), Edge::new("A", "B")]);
        assert_eq!(graph.duplicate_edge_count(), 1);

        let keys: Vec<_> = graph.groups.keys().collect();
        assert_eq!(keys, vec!["Proc", "Sink"]);
        assert_eq!(graph.groups.get("Proc").unwrap()[0].id, "A");
        assert_eq!(graph.groups.get("Sink").unwrap()[0].id, "B");
    }

    #[test]
    fn test_label_fallback() {
        let records = vec![
            LineageRecord::new("named")
                .with_component_name("Name")
                .with_component_type("Type"),
            LineageRecord::new("typed").with_component_type("Type"),
            LineageRecord::new("blank").with_component_name(""),
            LineageRecord::new("bare"),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["Name", "Type", "", ""]);
    }

    #[test]
    fn test_edge_direction() {
        let records = vec![
            LineageRecord::new("X")
                .with_parents(["P1", "P2"])
                .with_children(["C1"]),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        let pairs: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("P1", "X"), ("P2", "X"), ("X", "C1")]);
        assert_eq!(graph.edges[2].id, "X-C1");
    }

    #[test]
    fn test_dangling_edges_are_kept() {
        let records = vec![LineageRecord::new("A").with_children(["nowhere"])];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.dangling_edges().len(), 1);
    }

    #[test]
    fn test_duplicate_entity_last_write_wins() {
        let records = vec![
            LineageRecord::new("A")
                .with_component_name("first")
                .with_processor_name("G1")
                .with_children(["B"]),
            LineageRecord::new("B").with_processor_name("G1"),
            LineageRecord::new("A")
                .with_component_name("second")
                .with_processor_name("G1"),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        // node keeps its first-seen position but takes the later fields
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(graph.node("A").unwrap().label, "second");

        // child lists are not merged across duplicates
        assert_eq!(graph.edges.len(), 1);

        // group keeps both appends
        let members: Vec<_> = graph
            .groups
            .get("G1")
            .unwrap()
            .iter()
            .map(|n| (n.id.as_str(), n.label.as_str()))
            .collect();
        assert_eq!(members, vec![("A", "first"), ("B", ""), ("A", "second")]);
    }

    #[test]
    fn test_missing_or_empty_group_key_excludes_node() {
        let records = vec![
            LineageRecord::new("A").with_processor_name("Ingest"),
            LineageRecord::new("B"),
            LineageRecord::new("C").with_processor_name(""),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        assert_eq!(graph.groups.len(), 1);
        assert_eq!(graph.groups.get("Ingest").unwrap().len(), 1);
        assert!(graph.node("B").unwrap().group_key.is_none());
        assert!(graph.node("C").unwrap().group_key.is_none());
        assert_eq!(graph.ungrouped_nodes().count(), 2);
    }

    #[test]
    fn test_group_by_selects_field() {
        let records = vec![
            LineageRecord::new("A")
                .with_processor_name("Ingest")
                .with_component_type("GetFile"),
        ];

        let by_processor = build_graph(&records, GroupBy::ProcessorName);
        let by_type = build_graph(&records, GroupBy::ComponentType);

        assert!(by_processor.groups.contains_key("Ingest"));
        assert!(by_type.groups.contains_key("GetFile"));
        assert!(!by_type.groups.contains_key("Ingest"));
    }

    #[test]
    fn test_edge_count_is_additive() {
        let records = vec![
            LineageRecord::new("A").with_children(["B", "C"]),
            LineageRecord::new("B").with_parents(["A"]).with_children(["C"]),
            LineageRecord::new("C").with_parents(["A", "B"]),
        ];
        let graph = build_graph(&records, GroupBy::ProcessorName);

        let expected: usize = records
            .iter()
            .map(|r| r.parent_ids.len() + r.child_ids.len())
            .sum();
        assert_eq!(graph.edges.len(), expected);
    }

    #[test]
    fn test_rebuild_is_structurally_equal() {
        let records = fetch_into_sink();
        let first = build_graph(&records, GroupBy::ComponentType);
        let second = build_graph(&records, GroupBy::ComponentType);
        assert_eq!(first, second);
    }

    #[test]
    fn test_group_by_display_and_parse() {
        assert_eq!(GroupBy::ProcessorName.to_string(), "processor-name");
        let parsed: GroupBy = serde_json::from_str(r#""component-type""#).unwrap();
        assert_eq!(parsed, GroupBy::ComponentType);
    }
}
