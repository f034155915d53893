//! Immutable search cursor.
//!
//! A state combines the scope being searched (a root node whose subtree
//! bounds the search), the next candidate position, and the captures bound
//! so far. Every transition derives a new state; nothing is mutated.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use treematch_core::{NodeReferences, TreeNode};

use super::linked::{LinkedTree, Neighbors, NodeId, Within};

/// Search state of the matching algorithm.
///
/// Equality and hashing use the identity of the linked tree, the scope root,
/// the cursor, and the value of the bindings. Deduplicating on this equality
/// is what keeps the backtracking search from growing combinatorially.
pub struct MatchingState<'t, N> {
    tree: Rc<LinkedTree<'t, N>>,
    root: NodeId,
    cursor: Option<NodeId>,
    references: NodeReferences<'t, N>,
}

impl<'t, N: TreeNode> MatchingState<'t, N> {
    /// Initial states for a subject root, one per matching target.
    ///
    /// Each target gets its own linked tree; the state's scope is the target
    /// and its cursor the target's first child.
    pub fn from_root(node: &'t N) -> impl Iterator<Item = Self> {
        node.matching_targets().map(|target| {
            let tree = Rc::new(LinkedTree::build(target));
            let root = tree.root();
            let cursor = tree.first_child(root);
            Self {
                tree,
                root,
                cursor,
                references: NodeReferences::empty(),
            }
        })
    }
}

impl<'t, N> MatchingState<'t, N> {
    pub fn tree(&self) -> &Rc<LinkedTree<'t, N>> {
        &self.tree
    }

    /// Root of the current scope.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Next candidate position, `None` once exhausted.
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    pub fn references(&self) -> &NodeReferences<'t, N> {
        &self.references
    }

    pub fn into_references(self) -> NodeReferences<'t, N> {
        self.references
    }

    /// Subject node for an id of this state's tree.
    pub fn node(&self, id: NodeId) -> &'t N {
        self.tree.node(id)
    }

    /// Candidates anywhere inside the scope, from the cursor on.
    pub fn stream_within(&self) -> Within<'t, N> {
        Within::new(Rc::clone(&self.tree), self.cursor, self.root)
    }

    /// Candidates among the direct children of the scope root, starting at
    /// the direct-child ancestor of the cursor.
    pub fn stream_direct_children(&self) -> Neighbors<'t, N> {
        let start = self
            .cursor
            .and_then(|cursor| self.tree.direct_child_of(cursor, self.root));
        Neighbors::new(Rc::clone(&self.tree), start)
    }

    /// Move the cursor just past `element`, staying inside the scope.
    pub fn neighbor_of(&self, element: NodeId) -> Self {
        self.with_cursor(self.tree.neighbor_within(element, self.root))
    }

    /// Re-anchor the cursor to a direct child of the scope root.
    pub fn with_direct_child(&self) -> Self {
        match self.cursor {
            Some(cursor) => self.with_cursor(self.tree.direct_child_of(cursor, self.root)),
            None => self.clone(),
        }
    }

    /// Take the cursor of `other`, keeping the own bindings.
    pub fn with_start(&self, other: &Self) -> Self {
        self.with_cursor(other.cursor)
    }

    /// Take the later of both cursors in tree order.
    ///
    /// An exhausted cursor on either side wins, since it lies past every node.
    pub fn with_max_cursor(&self, other: &Self) -> Self {
        match (self.cursor, other.cursor) {
            (Some(mine), Some(theirs)) => {
                if self.tree.compare(mine, theirs).is_gt() {
                    self.clone()
                } else {
                    self.with_cursor(Some(theirs))
                }
            }
            _ => self.with_cursor(None),
        }
    }

    /// Descend into a matched node to search its children.
    ///
    /// Binds `capture` to the node (if given), makes the node the new scope
    /// and places the cursor on its first child.
    pub fn build_child_state(&self, capture: Option<&Arc<str>>, element: NodeId) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            root: element,
            cursor: self.tree.first_child(element),
            references: self.references.with_reference(capture, self.tree.node(element)),
        }
    }

    /// Replace the bindings.
    pub fn with_references(&self, references: NodeReferences<'t, N>) -> Self {
        if self.references == references {
            return self.clone();
        }
        Self {
            tree: Rc::clone(&self.tree),
            root: self.root,
            cursor: self.cursor,
            references,
        }
    }

    fn with_cursor(&self, cursor: Option<NodeId>) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            root: self.root,
            cursor,
            references: self.references.clone(),
        }
    }
}

impl<N> Clone for MatchingState<'_, N> {
    fn clone(&self) -> Self {
        Self {
            tree: Rc::clone(&self.tree),
            root: self.root,
            cursor: self.cursor,
            references: self.references.clone(),
        }
    }
}

impl<N> PartialEq for MatchingState<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree)
            && self.root == other.root
            && self.cursor == other.cursor
            && self.references == other.references
    }
}

impl<N> Eq for MatchingState<'_, N> {}

impl<N> Hash for MatchingState<'_, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Rc::as_ptr(&self.tree), state);
        self.root.hash(state);
        self.cursor.hash(state);
        self.references.hash(state);
    }
}

impl<N: TreeNode> fmt::Debug for MatchingState<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cursor = self.cursor.map(|id| self.tree.node(id).node_type());
        f.debug_struct("MatchingState")
            .field("root", &self.tree.node(self.root).node_type())
            .field("cursor", &cursor)
            .field("references", &self.references)
            .finish()
    }
}
