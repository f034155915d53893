//! Treematch: structural pattern matching of query trees against data trees.
//!
//! A query describes node constraints (type and property filters) and how
//! sibling groups must be matched (ordered, unordered, exact, any, optional).
//! Matching a query against a subject tree yields the capture bindings of
//! every distinct match.
//!
//! # Example
//!
//! ```
//! use treematch_lib::{BaseNode, QueryNode, TreeNode, enumerate_matches, has_match};
//!
//! let subject = BaseNode::new("root").with_children([
//!     BaseNode::new("a").with_property("v", 1),
//!     BaseNode::new("b"),
//! ]);
//!
//! let query = QueryNode::exact([
//!     QueryNode::single("a").property("v", 1).capture("A"),
//!     QueryNode::single("b"),
//! ]);
//!
//! assert!(has_match(&query, &subject));
//! let matches: Vec<_> = enumerate_matches(&query, &subject).collect();
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].get("A").map(|n| n.node_type()), Some("a"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;
pub mod query;

pub use engine::{
    MatchConfig, Matcher, MatcherBuilder, Matches, NoopTracer, PrintTracer, PropertyFn,
    PropertyPredicate, Tracer, Verbosity, enumerate_matches, has_match,
};
pub use query::{ContainerMode, QueryNode, SingleBuilder};
pub use treematch_core::{BaseNode, Colors, NodeReferences, Properties, TreeNode, Value};

/// Errors that can occur while building a query.
///
/// Matching itself never fails: no match is an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A container mode name that is not one of the known disciplines.
    #[error(
        "unknown container mode `{mode}` (expected one of: ordered, unordered, any, optional, exact)"
    )]
    UnknownContainerMode { mode: String },
}

/// Result type for query construction.
pub type Result<T> = std::result::Result<T, Error>;
