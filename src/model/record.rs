use serde::{Deserialize, Serialize};

/// One data-flow entity as exported by the lineage source.
///
/// `parentIds` and `childIds` are required: a record without them is
/// rejected at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageRecord {
    pub entity_id: String,
    pub parent_ids: Vec<String>,
    pub child_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor_name: Option<String>,
}

impl LineageRecord {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            component_name: None,
            component_type: None,
            processor_name: None,
        }
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_ids = parents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.child_ids = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }

    pub fn with_component_type(mut self, kind: impl Into<String>) -> Self {
        self.component_type = Some(kind.into());
        self
    }

    pub fn with_processor_name(mut self, name: impl Into<String>) -> Self {
        self.processor_name = Some(name.into());
        self
    }
}
