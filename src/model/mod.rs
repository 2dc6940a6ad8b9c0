mod graph;
mod record;

pub use graph::{Edge, Group, GroupIndex, LineageGraph, Node};
pub use record::LineageRecord;
