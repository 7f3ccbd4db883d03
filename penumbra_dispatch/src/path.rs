// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Propagation paths: the full ancestor chain of a target, and its truncations.
//!
//! ## Overview
//!
//! [`compute_path`] walks from the target to the root and records every
//! shadow root it crosses. The walk ignores event flags entirely. The path
//! always exists, and the flags only decide how much of it receives the
//! event:
//!
//! - [`PropagationPath::retarget`] applies `composed`: when it is false, the
//!   path ends at the target's nearest enclosing shadow root (inclusive).
//! - [`PropagationPath::delivery`] additionally applies `bubbles`: when it is
//!   false, the path collapses to the target alone.
//!
//! ```
//! use penumbra_dispatch::path::compute_path;
//! use penumbra_dispatch::{EventInit, TreeLookup};
//!
//! // root(0) → wrapper(1, shadow root) → child(2)
//! struct Demo;
//! impl TreeLookup<u32> for Demo {
//!     fn parent_of(&self, n: &u32) -> Option<u32> {
//!         n.checked_sub(1)
//!     }
//!     fn is_shadow_boundary(&self, n: &u32) -> bool {
//!         *n == 1
//!     }
//! }
//!
//! let path = compute_path(&Demo, 2);
//! assert_eq!(path.nodes(), &[2, 1, 0]);
//! assert_eq!(path.retarget(false), &[2, 1]);
//! assert_eq!(path.delivery(EventInit::new().bubbles(true).composed(true)), &[2, 1, 0]);
//! assert_eq!(path.delivery(EventInit::new().composed(true)), &[2]);
//! ```

use smallvec::SmallVec;

use crate::event::EventInit;
use crate::types::TreeLookup;

/// Ancestor chain of a dispatch target, target first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagationPath<K> {
    nodes: SmallVec<[K; 8]>,
    // Indices into `nodes` of shadow roots, innermost first.
    boundaries: SmallVec<[usize; 4]>,
}

/// Compute the full propagation path for `target`.
///
/// The result is a pure function of the hierarchy: computing it twice for the
/// same lookup and target yields the same path.
pub fn compute_path<K, T>(lookup: &T, target: K) -> PropagationPath<K>
where
    K: Copy,
    T: TreeLookup<K> + ?Sized,
{
    let mut nodes = SmallVec::new();
    let mut boundaries = SmallVec::new();
    let mut cur = Some(target);
    // Walk to the root; the lookup guarantees acyclic ancestry.
    while let Some(node) = cur {
        if lookup.is_shadow_boundary(&node) {
            boundaries.push(nodes.len());
        }
        nodes.push(node);
        cur = lookup.parent_of(&node);
    }
    PropagationPath { nodes, boundaries }
}

impl<K: Copy> PropagationPath<K> {
    /// The dispatch target.
    pub fn target(&self) -> Option<K> {
        self.nodes.first().copied()
    }

    /// All nodes from the target (first) to the root (last).
    pub fn nodes(&self) -> &[K] {
        &self.nodes
    }

    /// Shadow roots on the path, innermost first.
    pub fn boundaries(&self) -> impl Iterator<Item = K> + '_ {
        self.boundaries
            .iter()
            .filter_map(|&i| self.nodes.get(i).copied())
    }

    /// Split the path into encapsulation scopes.
    ///
    /// Each segment runs from the first node of a scope up to and including
    /// the shadow root that closes it; the last segment is the outermost
    /// (document) scope. Empty segments are skipped, so a path whose root is
    /// itself a shadow root ends with that root's segment.
    pub fn segments(&self) -> impl Iterator<Item = &[K]> + '_ {
        let ends = self
            .boundaries
            .iter()
            .map(|&b| b.saturating_add(1))
            .chain(core::iter::once(self.nodes.len()));
        let mut start = 0;
        ends.filter_map(move |end| {
            let seg = self.nodes.get(start..end)?;
            start = end;
            (!seg.is_empty()).then_some(seg)
        })
    }

    /// The part of the path that may observe the event given `composed`.
    ///
    /// With `composed == false`, the path stops at the target's nearest
    /// enclosing shadow root (which may be the target itself); that root's host
    /// and everything above are excluded. With `composed == true`, or when no
    /// shadow root encloses the target, the whole path is returned.
    pub fn retarget(&self, composed: bool) -> &[K] {
        match self.boundaries.first() {
            Some(&b) if !composed => self.nodes.get(..=b).unwrap_or(self.nodes.as_slice()),
            _ => self.nodes.as_slice(),
        }
    }

    /// The part of the path that receives an event with the given flags.
    ///
    /// Non-bubbling events reach the target alone, regardless of `composed`.
    pub fn delivery(&self, init: EventInit) -> &[K] {
        if init.bubbles {
            self.retarget(init.composed)
        } else {
            self.nodes.get(..1).unwrap_or(&[])
        }
    }
}
