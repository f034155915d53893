//! Linked tree: a navigable, pre-order flattened view of a subject tree.
//!
//! The subject tree only exposes downward edges. Matching needs to climb
//! back up (to find the next sibling of an ancestor) and to compare positions,
//! so every node of the searched subtree is flattened once into an arena with
//! parent back-links and index paths. Relations are arena indices, so the
//! structure has no reference cycles and is shared read-only (`Rc`) by all
//! matching states of one top-level match call.

use std::cmp::Ordering;
use std::rc::Rc;

use treematch_core::TreeNode;

/// Index of a node within its [`LinkedTree`].
///
/// Ids are assigned in pre-order, so comparing two ids of the same tree
/// agrees with comparing their paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

struct LinkedNode<'t, N> {
    node: &'t N,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Sibling indices from the root down to this node. Empty for the root.
    path: Box<[u32]>,
}

/// Arena holding the flattened subtree of one matching target.
pub struct LinkedTree<'t, N> {
    nodes: Vec<LinkedNode<'t, N>>,
}

impl<'t, N: TreeNode> LinkedTree<'t, N> {
    /// Flatten `root` and all its descendants.
    ///
    /// Children are taken from the matching targets of each child, so a
    /// node presenting several alternative forms contributes one linked
    /// node per form.
    ///
    /// # Panics
    /// Panics if the subtree holds more than `u32::MAX` nodes.
    pub fn build(root: &'t N) -> Self {
        let mut tree = Self { nodes: Vec::new() };

        // Reverse pre-order worklist of (node, parent, sibling index), so deep
        // subjects do not grow the call stack.
        let mut pending: Vec<(&'t N, Option<NodeId>, u32)> = vec![(root, None, 0)];
        while let Some((node, parent, index)) = pending.pop() {
            let id = tree.push(node, parent, index);

            let targets: Vec<&'t N> = node
                .children()
                .flat_map(|child| child.matching_targets())
                .collect();
            pending.extend(
                targets
                    .into_iter()
                    .zip(0u32..)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .map(|(target, index)| (target, Some(id), index)),
            );
        }

        tree
    }

    fn push(&mut self, node: &'t N, parent: Option<NodeId>, index: u32) -> NodeId {
        let Ok(id) = u32::try_from(self.nodes.len()).map(NodeId) else {
            panic!("too many nodes for a linked tree");
        };

        let path = match parent {
            Some(parent) => {
                let parent_path = &self.nodes[parent.index()].path;
                let mut path = Vec::with_capacity(parent_path.len() + 1);
                path.extend_from_slice(parent_path);
                path.push(index);
                path.into_boxed_slice()
            }
            None => Box::default(),
        };

        self.nodes.push(LinkedNode {
            node,
            parent,
            children: Vec::new(),
            path,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }
}

impl<'t, N> LinkedTree<'t, N> {
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The subject node wrapped by `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> &'t N {
        self.nodes[id.index()].node
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    #[inline]
    pub fn path(&self, id: NodeId) -> &[u32] {
        &self.nodes[id.index()].path
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].children.first().copied()
    }

    /// The next sibling of `id`. The root has none.
    pub fn direct_neighbor(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = *self.path(id).last()? as usize;
        self.children(parent).get(index + 1).copied()
    }

    /// The next sibling of `id` or of its closest ancestor that has one,
    /// without climbing out of `ancestor`.
    pub fn neighbor_within(&self, id: NodeId, ancestor: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                break;
            }
            if let Some(neighbor) = self.direct_neighbor(node) {
                return Some(neighbor);
            }
            current = self.parent(node);
        }
        None
    }

    /// The pre-order successor of `id` inside `ancestor`'s subtree.
    fn next_within(&self, id: NodeId, ancestor: NodeId) -> Option<NodeId> {
        match self.first_child(id) {
            Some(child) => Some(child),
            None => self.neighbor_within(id, ancestor),
        }
    }

    /// The ancestor of `id` (inclusive) that is a direct child of `parent`.
    ///
    /// If `id` is itself a direct child it is returned as is. Otherwise the
    /// search is re-anchored past the subtree `id` lives in: the result is the
    /// next sibling of that direct-child ancestor, or `None`.
    pub fn direct_child_of(&self, id: NodeId, parent: NodeId) -> Option<NodeId> {
        if self.parent(id) == Some(parent) {
            return Some(id);
        }
        let ancestor = self.ancestor_under(id, parent)?;
        self.direct_neighbor(ancestor)
    }

    fn ancestor_under(&self, id: NodeId, parent: NodeId) -> Option<NodeId> {
        let mut current = id;
        while let Some(up) = self.parent(current) {
            if up == parent {
                return Some(current);
            }
            current = up;
        }
        None
    }

    /// Tree order: lexicographic comparison of index paths.
    pub fn compare(&self, a: NodeId, b: NodeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        self.path(a).cmp(self.path(b))
    }
}

/// Lazy pre-order walk from a start node to the end of an ancestor's subtree.
///
/// Finite and non-restartable. The ancestor itself is never produced.
pub struct Within<'t, N> {
    tree: Rc<LinkedTree<'t, N>>,
    next: Option<NodeId>,
    ancestor: NodeId,
}

impl<'t, N> Within<'t, N> {
    pub fn new(tree: Rc<LinkedTree<'t, N>>, start: Option<NodeId>, ancestor: NodeId) -> Self {
        Self {
            tree,
            next: start,
            ancestor,
        }
    }
}

impl<N> Iterator for Within<'_, N> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_within(current, self.ancestor);
        Some(current)
    }
}

/// A node followed by its later siblings.
pub struct Neighbors<'t, N> {
    tree: Rc<LinkedTree<'t, N>>,
    next: Option<NodeId>,
}

impl<'t, N> Neighbors<'t, N> {
    pub fn new(tree: Rc<LinkedTree<'t, N>>, start: Option<NodeId>) -> Self {
        Self { tree, next: start }
    }
}

impl<N> Iterator for Neighbors<'_, N> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.direct_neighbor(current);
        Some(current)
    }
}
