#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for treematch subject trees.
//!
//! Two layers:
//! - **Capability contract**: the [`TreeNode`] trait every searchable domain
//!   tree implements, plus the [`NodeReferences`] capture map its matching
//!   predicate may consult
//! - **Default implementation**: [`BaseNode`], an owned, serde-friendly node
//!   for callers without a tree type of their own

mod base;
mod colors;
mod references;

#[cfg(test)]
mod colors_tests;
#[cfg(test)]
mod lib_tests;

use indexmap::IndexMap;

pub use base::BaseNode;
pub use colors::Colors;
pub use references::NodeReferences;

/// Opaque property value. Any JSON-like value can be stored and compared.
pub use serde_json::Value;

/// Property mapping of a node, in insertion order.
pub type Properties = IndexMap<String, Value>;

/// The shape a domain tree node must expose to be searched.
///
/// Only `node_type`, `properties` and `children` are required. The matching
/// methods have default implementations that can be overridden to add
/// relational (binding-aware) constraints or alternate matchable forms.
pub trait TreeNode {
    /// The type name, compared exactly against a query's type filter.
    fn node_type(&self) -> &str;

    /// Properties of this node.
    fn properties(&self) -> &Properties;

    /// Ordered children of this node.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Nodes used as the actual search unit in place of this node.
    ///
    /// A node may present itself as zero, one or several matchable forms,
    /// e.g. a grouping node can hand out its own children. Defaults to the
    /// node itself.
    fn matching_targets(&self) -> impl Iterator<Item = &Self> {
        std::iter::once(self)
    }

    /// Check a single required property.
    ///
    /// The default compares the node's own value for equality and ignores
    /// `references`. A missing property only equals `null`.
    fn property_matches(
        &self,
        key: &str,
        expected: &Value,
        references: &NodeReferences<'_, Self>,
    ) -> bool {
        let _ = references;
        self.properties().get(key).unwrap_or(&Value::Null) == expected
    }

    /// Check this node against a type filter and required properties.
    ///
    /// `None` for `node_type` matches any node; `None` for `properties` skips
    /// the property check entirely.
    fn matches(
        &self,
        node_type: Option<&str>,
        properties: Option<&Properties>,
        references: &NodeReferences<'_, Self>,
    ) -> bool {
        node_type.is_none_or(|t| t == self.node_type())
            && properties.is_none_or(|required| {
                required
                    .iter()
                    .all(|(key, expected)| self.property_matches(key, expected, references))
            })
    }
}
