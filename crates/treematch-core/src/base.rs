//! Default owned subject node.

use serde::{Deserialize, Serialize};

use crate::{Properties, TreeNode, Value};

/// A plain subject node: type, properties and ordered children.
///
/// Serializes as `{"type": .., "properties": {..}, "children": [..]}`, with
/// empty properties and children omitted (and optional when deserializing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseNode {
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<BaseNode>,
}

impl BaseNode {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Set a property, overwriting any previous value for `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Append a child, which may be the root of a whole subtree.
    pub fn with_child(mut self, child: BaseNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = BaseNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn child_nodes(&self) -> &[BaseNode] {
        &self.children
    }

    /// Shorthand for a property lookup.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl TreeNode for BaseNode {
    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}
