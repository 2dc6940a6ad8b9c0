//! Integration tests for the lineagemap library API.

use lineagemap::{
    BuildOptions, GridLayout, GroupBy, LineageError, build, build_graph, load_records,
    parse_records,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/nifi_lineage.json")
}

#[test]
fn test_build_fixture_by_processor_name() {
    let graph = build(&fixture(), BuildOptions::default()).unwrap();

    let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["evt-001", "evt-002", "evt-003", "evt-004", "evt-005", "evt-006"]
    );

    let keys: Vec<_> = graph.groups.keys().collect();
    assert_eq!(keys, vec!["Ingest", "Enrich", "Route", "Egress"]);

    // evt-002 appears twice in its group because it was declared twice
    let enrich: Vec<_> = graph
        .groups
        .get("Enrich")
        .unwrap()
        .iter()
        .map(|n| (n.id.as_str(), n.label.as_str()))
        .collect();
    assert_eq!(
        enrich,
        vec![
            ("evt-002", "Tag"),
            ("evt-004", "LogAttribute"),
            ("evt-002", "Tag v2")
        ]
    );

    let ungrouped: Vec<_> = graph.ungrouped_nodes().map(|n| n.id.as_str()).collect();
    assert_eq!(ungrouped, vec!["evt-006"]);
}

#[test]
fn test_build_fixture_by_component_type() {
    let options = BuildOptions {
        group_by: Some(GroupBy::ComponentType),
    };
    let graph = build(&fixture(), options).unwrap();

    assert_eq!(graph.groups.len(), 6);
    assert_eq!(graph.groups.get("UpdateAttribute").unwrap().len(), 2);
    assert!(graph.ungrouped_nodes().next().is_none());
}

#[test]
fn test_node_count_matches_distinct_entity_ids() {
    let records = load_records(&fixture()).unwrap();
    let graph = build_graph(&records, GroupBy::ProcessorName);

    let distinct: HashSet<_> = records.iter().map(|r| r.entity_id.as_str()).collect();
    assert_eq!(graph.nodes.len(), distinct.len());
}

#[test]
fn test_edges_are_additive_and_not_deduplicated() {
    let records = load_records(&fixture()).unwrap();
    let graph = build_graph(&records, GroupBy::ProcessorName);

    let declared: usize = records
        .iter()
        .map(|r| r.parent_ids.len() + r.child_ids.len())
        .sum();
    assert_eq!(graph.edges.len(), declared);
    assert_eq!(graph.edges.len(), 10);
    // evt-001-evt-002 three times, evt-002-evt-003 and evt-003-evt-005 twice
    assert_eq!(graph.duplicate_edge_count(), 4);

    let first_ids: Vec<_> = graph.edges.iter().take(2).map(|e| e.id.as_str()).collect();
    assert_eq!(first_ids, vec!["evt-001-evt-002", "evt-001-evt-002"]);
}

#[test]
fn test_labels_follow_fallback_order() {
    let graph = build(&fixture(), BuildOptions::default()).unwrap();

    let label = |id: &str| graph.node(id).unwrap().label.clone();
    assert_eq!(label("evt-001"), "Read orders");
    assert_eq!(label("evt-002"), "Tag v2");
    assert_eq!(label("evt-004"), "LogAttribute");
    assert_eq!(label("evt-006"), "PutS3Object");
}

#[test]
fn test_dangling_reference_is_kept() {
    let graph = build(&fixture(), BuildOptions::default()).unwrap();

    let dangling = graph.dangling_edges();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].source, "evt-005");
    assert_eq!(dangling[0].target, "evt-099");
    assert!(graph.edges.iter().any(|e| e.id == "evt-005-evt-099"));
}

#[test]
fn test_repeated_builds_are_equal() {
    let records = load_records(&fixture()).unwrap();
    assert_eq!(
        build_graph(&records, GroupBy::ProcessorName),
        build_graph(&records, GroupBy::ProcessorName)
    );
}

#[test]
fn test_layout_places_every_node() {
    let graph = build(&fixture(), BuildOptions::default()).unwrap();
    let positions = GridLayout::default().place(&graph);

    assert_eq!(positions.len(), graph.nodes.len());
    // ungrouped band sits below the four group bands
    assert_eq!(positions["evt-006"].y, 1600.0);
}

#[test]
fn test_parse_records_from_memory() {
    let records = parse_records(
        r#"[{"entityId": "A", "parentIds": [], "childIds": ["B"], "componentName": "Fetch", "componentType": "Proc"},
            {"entityId": "B", "parentIds": ["A"], "childIds": [], "componentName": "", "componentType": "Sink"}]"#,
    )
    .unwrap();
    let graph = build_graph(&records, GroupBy::ComponentType);

    assert_eq!(graph.nodes[1].label, "Sink");
    assert_eq!(graph.edges.len(), 2);
    assert_eq!(graph.groups.get("Proc").unwrap()[0].id, "A");
}

#[test]
fn test_missing_input_file() {
    let result = build(Path::new("/nonexistent/lineage.json"), BuildOptions::default());

    match result {
        Err(LineageError::InputNotFound(_)) => {}
        Err(e) => panic!("Expected InputNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error for missing input"),
    }
}
