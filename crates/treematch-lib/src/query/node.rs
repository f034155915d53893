//! Query node variants.

use std::sync::Arc;

use treematch_core::Properties;

use super::ContainerMode;
use super::builder::SingleBuilder;
use crate::Result;

/// A node of a query tree.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryNode {
    Single(SingleQuery),
    All(AllQuery),
    Any(AnyQuery),
    Exact(ExactQuery),
}

/// Matches one subject node, then its children against a nested query.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleQuery {
    pub(super) node_type: Option<String>,
    pub(super) properties: Option<Properties>,
    pub(super) direct: bool,
    pub(super) capture: Option<Arc<str>>,
    pub(super) children: Box<QueryNode>,
    pub(super) has_references: bool,
}

/// Every child matches, in order or in any order.
#[derive(Clone, Debug, PartialEq)]
pub struct AllQuery {
    children: Vec<QueryNode>,
    ordered: bool,
    has_references: bool,
}

/// At least one child matches, or none at all if optional.
#[derive(Clone, Debug, PartialEq)]
pub struct AnyQuery {
    children: Vec<QueryNode>,
    optional: bool,
    has_references: bool,
}

/// Children cover the sibling sequence contiguously and completely.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactQuery {
    children: Vec<QueryNode>,
    has_references: bool,
}

fn any_references(children: &[QueryNode]) -> bool {
    children.iter().any(QueryNode::has_references)
}

impl QueryNode {
    /// Start building a Single query for nodes of `node_type`.
    pub fn single(node_type: impl Into<String>) -> SingleBuilder {
        SingleBuilder::new(Some(node_type.into()))
    }

    /// Start building a Single query accepting any node type.
    pub fn wildcard() -> SingleBuilder {
        SingleBuilder::new(None)
    }

    /// Container with the discipline named by `mode`.
    ///
    /// Fails with [`Error::UnknownContainerMode`](crate::Error) if `mode` is
    /// not one of `ordered`, `unordered`, `any`, `optional` or `exact`.
    pub fn container<Q: Into<QueryNode>>(
        mode: &str,
        children: impl IntoIterator<Item = Q>,
    ) -> Result<QueryNode> {
        Ok(Self::with_mode(mode.parse()?, children))
    }

    pub fn with_mode<Q: Into<QueryNode>>(
        mode: ContainerMode,
        children: impl IntoIterator<Item = Q>,
    ) -> QueryNode {
        let children: Vec<QueryNode> = children.into_iter().map(Into::into).collect();
        let has_references = any_references(&children);
        match mode {
            ContainerMode::Ordered | ContainerMode::Unordered => QueryNode::All(AllQuery {
                children,
                ordered: mode == ContainerMode::Ordered,
                has_references,
            }),
            ContainerMode::Any | ContainerMode::Optional => QueryNode::Any(AnyQuery {
                children,
                optional: mode == ContainerMode::Optional,
                has_references,
            }),
            ContainerMode::Exact => QueryNode::Exact(ExactQuery {
                children,
                has_references,
            }),
        }
    }

    pub fn ordered<Q: Into<QueryNode>>(children: impl IntoIterator<Item = Q>) -> QueryNode {
        Self::with_mode(ContainerMode::Ordered, children)
    }

    pub fn unordered<Q: Into<QueryNode>>(children: impl IntoIterator<Item = Q>) -> QueryNode {
        Self::with_mode(ContainerMode::Unordered, children)
    }

    pub fn any<Q: Into<QueryNode>>(children: impl IntoIterator<Item = Q>) -> QueryNode {
        Self::with_mode(ContainerMode::Any, children)
    }

    pub fn optional<Q: Into<QueryNode>>(children: impl IntoIterator<Item = Q>) -> QueryNode {
        Self::with_mode(ContainerMode::Optional, children)
    }

    pub fn exact<Q: Into<QueryNode>>(children: impl IntoIterator<Item = Q>) -> QueryNode {
        Self::with_mode(ContainerMode::Exact, children)
    }

    /// Trivially matching container consuming nothing.
    pub fn empty() -> QueryNode {
        Self::ordered(std::iter::empty::<QueryNode>())
    }

    /// True if this node or any descendant carries a capture name.
    pub fn has_references(&self) -> bool {
        match self {
            QueryNode::Single(q) => q.has_references,
            QueryNode::All(q) => q.has_references,
            QueryNode::Any(q) => q.has_references,
            QueryNode::Exact(q) => q.has_references,
        }
    }

    /// Single and Exact nodes consume a fixed stretch of siblings.
    pub fn is_primitive(&self) -> bool {
        matches!(self, QueryNode::Single(_) | QueryNode::Exact(_))
    }

    pub fn is_single(&self) -> bool {
        matches!(self, QueryNode::Single(_))
    }

    /// Discipline of a container, `None` for a Single.
    pub fn container_mode(&self) -> Option<ContainerMode> {
        match self {
            QueryNode::Single(_) => None,
            QueryNode::All(q) if q.ordered => Some(ContainerMode::Ordered),
            QueryNode::All(_) => Some(ContainerMode::Unordered),
            QueryNode::Any(q) if q.optional => Some(ContainerMode::Optional),
            QueryNode::Any(_) => Some(ContainerMode::Any),
            QueryNode::Exact(_) => Some(ContainerMode::Exact),
        }
    }

    /// Child queries of a container. A Single has none at this level.
    pub fn container_children(&self) -> &[QueryNode] {
        match self {
            QueryNode::Single(_) => &[],
            QueryNode::All(q) => &q.children,
            QueryNode::Any(q) => &q.children,
            QueryNode::Exact(q) => &q.children,
        }
    }
}

impl SingleQuery {
    /// Required type, `None` for a wildcard.
    pub fn node_type(&self) -> Option<&str> {
        self.node_type.as_deref()
    }

    /// Required properties, `None` if no property was given.
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    /// Only direct children of the scope root are candidates.
    pub fn is_direct(&self) -> bool {
        self.direct
    }

    pub fn capture(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    pub(crate) fn capture_name(&self) -> Option<&Arc<str>> {
        self.capture.as_ref()
    }

    /// Nested query the matched node's children must satisfy.
    pub fn children(&self) -> &QueryNode {
        &self.children
    }

    pub fn has_references(&self) -> bool {
        self.has_references
    }
}

impl AllQuery {
    pub fn children(&self) -> &[QueryNode] {
        &self.children
    }

    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}

impl AnyQuery {
    pub fn children(&self) -> &[QueryNode] {
        &self.children
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

impl ExactQuery {
    pub fn children(&self) -> &[QueryNode] {
        &self.children
    }
}

impl From<SingleQuery> for QueryNode {
    fn from(query: SingleQuery) -> Self {
        QueryNode::Single(query)
    }
}
