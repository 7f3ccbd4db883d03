// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Penumbra Tree: a static node hierarchy with shadow-root boundaries.
//!
//! This crate is the structural half of the Penumbra event propagation model.
//! It stores parent/child links and marks which nodes start an encapsulated
//! (shadow) subtree. It does not dispatch anything; `penumbra_dispatch` reads
//! the structure through its `TreeLookup` trait.
//!
//! ## Model
//!
//! - Nodes are created detached and linked once. A parent never changes, and
//!   nodes are never removed.
//! - A node flagged [`NodeFlags::SHADOW_ROOT`] is the root of an encapsulated
//!   subtree. The node itself is inside the boundary. Its parent, the *host*,
//!   is outside.
//! - Links that would introduce a cycle are rejected with [`TreeError::Cycle`].
//!
//! ## API overview
//!
//! - [`Tree`]: node arena and structural queries.
//! - [`NodeId`]: handle of a node.
//! - [`NodeOptions`] / [`NodeFlags`]: creation options.
//! - [`Ancestors`]: lazy walk from a node to its root.
//!
//! Key operations:
//! - [`Tree::create_node`] → [`NodeId`]
//! - [`Tree::add_child`] → `Result<(), TreeError>`
//! - [`Tree::is_shadow_boundary`], [`Tree::shadow_root_of`], [`Tree::host_of`]
//! - [`Tree::ancestors_of`], [`Tree::parent_of`], [`Tree::children_of`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Ancestors, Tree};
pub use types::{NodeFlags, NodeId, NodeOptions, TreeError};
