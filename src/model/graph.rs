use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};

/// A renderable entity, one per distinct `entityId`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,
}

/// A directed parent-to-child relationship between two entity ids.
///
/// Endpoints are not checked against the node set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{}-{}", source, target),
            source,
            target,
        }
    }
}

/// Nodes sharing one grouping value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Group {
    pub key: String,
    pub nodes: Vec<Node>,
}

/// Group key -> member nodes, kept in first-seen key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    groups: Vec<Group>,
    positions: HashMap<String, usize>,
}

impl GroupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the group for `key`, creating the group on first use.
    pub fn push(&mut self, key: &str, node: Node) {
        let idx = match self.positions.get(key) {
            Some(idx) => *idx,
            None => {
                self.groups.push(Group {
                    key: key.to_string(),
                    nodes: Vec::new(),
                });
                let idx = self.groups.len() - 1;
                self.positions.insert(key.to_string(), idx);
                idx
            }
        };
        self.groups[idx].nodes.push(node);
    }

    pub fn get(&self, key: &str) -> Option<&[Node]> {
        self.positions
            .get(key)
            .map(|idx| self.groups[*idx].nodes.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.nodes)?;
        }
        map.end()
    }
}

/// Snapshot produced by one builder run. The caller owns it outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct LineageGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub groups: GroupIndex,
}

impl LineageGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges with at least one endpoint that is not a node id.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }

    /// Number of edges whose id already occurred earlier in the edge list.
    pub fn duplicate_edge_count(&self) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        self.edges
            .iter()
            .filter(|e| !seen.insert(e.id.as_str()))
            .count()
    }

    pub fn ungrouped_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.group_key.is_none())
    }
}
