// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Penumbra Tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.

use penumbra_tree::{NodeId, Tree};

use crate::types::TreeLookup;

impl TreeLookup<NodeId> for Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent_of(self, *node)
    }

    fn is_shadow_boundary(&self, node: &NodeId) -> bool {
        Self::is_shadow_boundary(self, *node)
    }

    fn contains(&self, node: &NodeId) -> bool {
        Self::contains(self, *node)
    }
}
