// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, linking, boundary queries.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::types::{NodeFlags, NodeId, NodeOptions, TreeError};

/// Static node hierarchy with shadow-root boundaries.
///
/// Nodes are created detached with [`Tree::create_node`] and linked with
/// [`Tree::add_child`]. A node's parent is fixed once set: there is no
/// removal or reparenting, so every query is a pure function of the
/// structure built so far.
///
/// ## Example
///
/// ```rust
/// use penumbra_tree::{NodeOptions, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.create_node(NodeOptions::new());
/// let wrapper = tree.create_node(NodeOptions::shadow_root());
/// let child = tree.create_node(NodeOptions::new());
/// tree.add_child(root, wrapper).unwrap();
/// tree.add_child(wrapper, child).unwrap();
///
/// let chain: Vec<_> = tree.ancestors_of(child).collect();
/// assert_eq!(chain, vec![child, wrapper, root]);
/// assert!(tree.is_shadow_boundary(wrapper));
/// assert_eq!(tree.host_of(wrapper), Some(root));
///
/// // A node cannot be linked under its own descendant.
/// assert!(tree.add_child(child, root).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        let boundaries = self
            .nodes
            .iter()
            .filter(|n| n.flags.contains(NodeFlags::SHADOW_ROOT))
            .count();
        f.debug_struct("Tree")
            .field("nodes_total", &self.nodes.len())
            .field("roots", &roots)
            .field("shadow_roots", &boundaries)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    flags: NodeFlags,
}

impl Node {
    fn new(options: NodeOptions) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            flags: options.flags,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create a detached node. It becomes a root until linked with [`Tree::add_child`].
    pub fn create_node(&mut self, options: NodeOptions) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node::new(options));
        id
    }

    /// Append `child` to the children of `parent`.
    ///
    /// Fails without modifying the tree when either id is unknown, when
    /// `child` already has a parent, or when `child` is `parent` itself or
    /// one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        if let Some(existing) = self.parent_of(child) {
            tracing::debug!(%child, %existing, "rejected reparent");
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if self.ancestors_of(parent).any(|a| a == child) {
            tracing::debug!(%parent, %child, "rejected cyclic link");
            return Err(TreeError::Cycle { parent, child });
        }
        self.link_parent(child, parent);
        Ok(())
    }

    /// Returns true if `id` was issued by this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        id.idx() < self.nodes.len()
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the parent of a node, or `None` for roots and unknown ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in insertion order, or an empty slice for unknown ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the flags of a node if the identifier is known.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node(id).map(|n| n.flags)
    }

    /// Returns whether `id` starts an encapsulated subtree.
    pub fn is_shadow_boundary(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::SHADOW_ROOT))
    }

    /// Iterate from `id` (inclusive) up to its root.
    ///
    /// The iterator is lazy and finite. Clone it, or call this again, to
    /// restart the walk. Unknown ids yield nothing.
    pub fn ancestors_of(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Returns the outermost ancestor of `id` (which may be `id` itself).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors_of(id).last()
    }

    /// Returns the nearest shadow root enclosing `id`, counting `id` itself.
    ///
    /// `None` means the node lives in the outermost (document) scope.
    pub fn shadow_root_of(&self, id: NodeId) -> Option<NodeId> {
        self.ancestors_of(id).find(|&n| self.is_shadow_boundary(n))
    }

    /// Returns the host of a shadow root: its parent, which lives outside the boundary.
    ///
    /// Returns `None` when `id` is not a shadow root or is not attached.
    pub fn host_of(&self, id: NodeId) -> Option<NodeId> {
        if self.is_shadow_boundary(id) {
            self.parent_of(id)
        } else {
            None
        }
    }

    /// Number of edges between `id` and its root.
    pub fn depth_of(&self, id: NodeId) -> Option<usize> {
        self.contains(id)
            .then(|| self.ancestors_of(id).count().saturating_sub(1))
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.nodes.get_mut(parent.idx()) {
            p.children.push(id);
        }
        if let Some(n) = self.nodes.get_mut(id.idx()) {
            n.parent = Some(parent);
        }
    }
}

/// Lazy walk from a node up to its root, produced by [`Tree::ancestors_of`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.tree.parent_of(cur);
        Some(cur)
    }
}

impl FusedIterator for Ancestors<'_> {}
