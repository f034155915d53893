//! Chained construction of Single queries.

use std::sync::Arc;

use treematch_core::{Properties, Value};

use super::node::{QueryNode, SingleQuery};

/// Builder returned by [`QueryNode::single`] and [`QueryNode::wildcard`].
///
/// Converts into a [`QueryNode`] via [`build`](Self::build) or `Into`, so it
/// can be passed straight to the container constructors.
#[derive(Clone, Debug)]
pub struct SingleBuilder {
    node_type: Option<String>,
    properties: Option<Properties>,
    direct: bool,
    capture: Option<Arc<str>>,
    children: Option<QueryNode>,
}

impl SingleBuilder {
    pub(super) fn new(node_type: Option<String>) -> Self {
        Self {
            node_type,
            properties: None,
            direct: false,
            capture: None,
            children: None,
        }
    }

    /// Require `key` to match `value`. Later calls for the same key win.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }

    /// Only consider direct children of the enclosing scope.
    pub fn direct(mut self) -> Self {
        self.direct = true;
        self
    }

    /// Bind the matched node to `name`.
    pub fn capture(mut self, name: impl Into<Arc<str>>) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// Nested query for the matched node's children.
    pub fn children(mut self, query: impl Into<QueryNode>) -> Self {
        self.children = Some(query.into());
        self
    }

    pub fn build(self) -> QueryNode {
        let children = self.children.unwrap_or_else(QueryNode::empty);
        let has_references = self.capture.is_some() || children.has_references();
        QueryNode::Single(SingleQuery {
            node_type: self.node_type,
            properties: self.properties,
            direct: self.direct,
            capture: self.capture,
            children: Box::new(children),
            has_references,
        })
    }
}

impl From<SingleBuilder> for QueryNode {
    fn from(builder: SingleBuilder) -> Self {
        builder.build()
    }
}
