//! Capture bindings: named references to matched subject nodes.
//!
//! Bindings are created continuously during a search and compared often
//! (every deduplication step hashes them), while the number of capture
//! names in a query is small. The map is therefore a shared, name-sorted
//! slice that is copied only when a new binding is added.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::TreeNode;

/// Immutable mapping from capture name to bound subject node.
///
/// Node identity is pointer identity: two bindings are equal when they bind
/// the same names to the very same nodes.
pub struct NodeReferences<'t, N: ?Sized> {
    entries: Rc<[(Arc<str>, &'t N)]>,
}

impl<'t, N: ?Sized> NodeReferences<'t, N> {
    /// Bindings without any capture.
    pub fn empty() -> Self {
        Self {
            entries: Rc::from(Vec::new()),
        }
    }

    /// Bind `name` to `node`.
    ///
    /// Returns `self` unchanged (sharing storage) when `name` is `None` or
    /// already bound to `node`; otherwise returns a new mapping.
    pub fn with_reference(&self, name: Option<&Arc<str>>, node: &'t N) -> Self {
        let Some(name) = name else {
            return self.clone();
        };

        match self.position(name) {
            Ok(idx) if std::ptr::eq(self.entries[idx].1, node) => self.clone(),
            Ok(idx) => {
                let mut entries = self.entries.to_vec();
                entries[idx].1 = node;
                Self {
                    entries: entries.into(),
                }
            }
            Err(idx) => {
                let mut entries = Vec::with_capacity(self.entries.len() + 1);
                entries.extend_from_slice(&self.entries[..idx]);
                entries.push((Arc::clone(name), node));
                entries.extend_from_slice(&self.entries[idx..]);
                Self {
                    entries: entries.into(),
                }
            }
        }
    }

    /// The node bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&'t N> {
        self.position(name).ok().map(|idx| self.entries[idx].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_ok()
    }

    /// Bindings ordered by capture name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'t N)> + '_ {
        self.entries.iter().map(|(name, node)| (&**name, *node))
    }

    /// Bound capture names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| &**name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(key, _)| (**key).cmp(name))
    }
}

impl<N: ?Sized> Clone for NodeReferences<'_, N> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<N: ?Sized> Default for NodeReferences<'_, N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N: ?Sized> PartialEq for NodeReferences<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.entries, &other.entries) {
            return true;
        }
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((a, x), (b, y))| a == b && std::ptr::eq(*x, *y))
    }
}

impl<N: ?Sized> Eq for NodeReferences<'_, N> {}

impl<N: ?Sized> Hash for NodeReferences<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.entries.len());
        for (name, node) in self.entries.iter() {
            name.hash(state);
            std::ptr::hash(*node, state);
        }
    }
}

impl<N: TreeNode + ?Sized> fmt::Debug for NodeReferences<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, node)| (name, node.node_type())))
            .finish()
    }
}

impl<N: Serialize + ?Sized> Serialize for NodeReferences<'_, N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, node) in self.entries.iter() {
            map.serialize_entry(&**name, *node)?;
        }
        map.end()
    }
}
