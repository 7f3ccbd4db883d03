// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the tree: node identifiers, flags, creation options and errors.

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// Identifiers are dense indices into the tree's arena. Nodes are never
/// removed, so an id stays valid for the lifetime of the tree that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Creation order of this node within its tree, starting at zero.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Structural node flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is the root of an encapsulated (shadow) subtree.
        ///
        /// The node itself is inside the boundary; its parent is the host
        /// and lives outside of it.
        const SHADOW_ROOT = 0b0000_0001;
    }
}

/// Options for [`Tree::create_node`](crate::Tree::create_node).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeOptions {
    /// Structural flags for the new node.
    pub flags: NodeFlags,
}

impl NodeOptions {
    /// Options for a plain node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a node that starts an encapsulated subtree.
    pub fn shadow_root() -> Self {
        Self {
            flags: NodeFlags::SHADOW_ROOT,
        }
    }
}

/// Errors returned by structural edits of a [`Tree`](crate::Tree).
///
/// A failed edit leaves the tree unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Linking would make a node its own ancestor.
    #[error("adding {child} under {parent} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child, which is `parent` or one of its ancestors.
        child: NodeId,
    },
    /// The child already has a parent; parents are immutable once set.
    #[error("{child} is already a child of {parent}")]
    AlreadyParented {
        /// Child that was already linked.
        child: NodeId,
        /// Its existing parent.
        parent: NodeId,
    },
    /// The identifier was not issued by this tree.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}
