//! Pluggable per-property matching.

use std::fmt;
use std::marker::PhantomData;

use treematch_core::{NodeReferences, Value};

/// Decides whether a candidate satisfies one required property.
///
/// Installed on a [`Matcher`](super::Matcher), it replaces the node's own
/// [`TreeNode::property_matches`](treematch_core::TreeNode::property_matches)
/// for every property filter of the query. The type filter is still checked
/// by the node.
pub trait PropertyPredicate<N: ?Sized> {
    fn test(&self, node: &N, key: &str, expected: &Value, references: &NodeReferences<'_, N>)
    -> bool;
}

/// Closure adapter for [`PropertyPredicate`].
pub struct PropertyFn<N: ?Sized, F> {
    f: F,
    _node: PhantomData<fn(&N)>,
}

impl<N: ?Sized, F> PropertyFn<N, F>
where
    F: Fn(&N, &str, &Value, &NodeReferences<'_, N>) -> bool,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _node: PhantomData,
        }
    }
}

impl<N: ?Sized, F> PropertyPredicate<N> for PropertyFn<N, F>
where
    F: Fn(&N, &str, &Value, &NodeReferences<'_, N>) -> bool,
{
    fn test(
        &self,
        node: &N,
        key: &str,
        expected: &Value,
        references: &NodeReferences<'_, N>,
    ) -> bool {
        (self.f)(node, key, expected, references)
    }
}

impl<N: ?Sized, F> fmt::Debug for PropertyFn<N, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyFn")
    }
}
