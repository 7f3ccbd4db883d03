// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Computes the propagation path for a target, applies the event flags, and
//! emits a capture → target → bubble sequence over what is left.
//!
//! ## Flags
//!
//! - `composed == false` truncates the path at the target's nearest enclosing
//!   shadow root; see [`PropagationPath::retarget`].
//! - `bubbles == false` reduces the sequence to the single target entry.
//!   Ancestors get neither capture nor bubble entries.
//!
//! ## See Also
//!
//! [`dispatcher`](crate::dispatcher) to run listeners over the sequence.

use alloc::vec::Vec;

use crate::event::EventInit;
use crate::path::{PropagationPath, compute_path};
use crate::types::{Dispatch, Phase, TreeLookup};

/// Deterministic propagation router over a [`TreeLookup`].
///
/// ## Usage
///
/// - Construct with [`Router::new`], passing the hierarchy by value or by
///   reference.
/// - Call [`Router::dispatch_for`] to get the dispatch sequence for a target
///   and a set of flags, or [`Router::path_for`] for the unfiltered path.
pub struct Router<K, T: TreeLookup<K>> {
    lookup: T,
    _phantom: core::marker::PhantomData<fn() -> K>,
}

impl<K, T: TreeLookup<K>> core::fmt::Debug for Router<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router").finish_non_exhaustive()
    }
}

impl<K: Copy, T: TreeLookup<K>> Router<K, T> {
    /// Create a router over `lookup`.
    pub fn new(lookup: T) -> Self {
        Self {
            lookup,
            _phantom: core::marker::PhantomData,
        }
    }

    /// Full propagation path of `target`, ignoring flags.
    pub fn path_for(&self, target: K) -> PropagationPath<K> {
        compute_path(&self.lookup, target)
    }

    /// Emit the dispatch sequence for `target` under `init`.
    pub fn dispatch_for(&self, target: K, init: EventInit) -> Vec<Dispatch<K>> {
        let path = self.path_for(target);
        emit(path.delivery(init))
    }
}

/// Emit a capture → target → bubble sequence over a target-first path.
///
/// The first element of `path` is the target; the rest are its ancestors,
/// innermost first. An empty path emits nothing.
pub fn emit<K: Copy>(path: &[K]) -> Vec<Dispatch<K>> {
    let mut out = Vec::with_capacity(path.len().saturating_mul(2));
    let Some((&target, ancestors)) = path.split_first() else {
        return out;
    };

    // Capture: outermost→(excluding target)
    for &n in ancestors.iter().rev() {
        out.push(Dispatch::capture(n));
    }

    // Target: only the target element
    out.push(Dispatch::target(target));

    // Bubble: parent→outermost (excluding target)
    for &n in ancestors {
        out.push(Dispatch::bubble(n));
    }
    out
}

/// Target-first path covered by a sequence produced by [`emit`].
pub fn path_of<K: Copy>(seq: &[Dispatch<K>]) -> Vec<K> {
    seq.iter()
        .filter(|d| d.phase != Phase::Capture)
        .map(|d| d.node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    struct Node(u32);

    // root(1) → wrapper(2, shadow) → child(3)
    struct Wrapper;
    impl TreeLookup<Node> for Wrapper {
        fn parent_of(&self, node: &Node) -> Option<Node> {
            match node.0 {
                3 => Some(Node(2)),
                2 => Some(Node(1)),
                _ => None,
            }
        }
        fn is_shadow_boundary(&self, node: &Node) -> bool {
            node.0 == 2
        }
    }

    fn phases(seq: &[Dispatch<Node>]) -> Vec<(Phase, u32)> {
        seq.iter().map(|d| (d.phase, d.node.0)).collect()
    }

    #[test]
    fn bubbling_non_composed_stops_at_shadow_root() {
        let router = Router::new(Wrapper);
        let out = router.dispatch_for(Node(3), EventInit::new().bubbles(true));
        assert_eq!(
            phases(&out),
            vec![(Phase::Capture, 2), (Phase::Target, 3), (Phase::Bubble, 2)]
        );
    }

    #[test]
    fn bubbling_composed_reaches_root() {
        let router = Router::new(Wrapper);
        let out = router.dispatch_for(Node(3), EventInit::new().bubbles(true).composed(true));
        assert_eq!(
            phases(&out),
            vec![
                (Phase::Capture, 1),
                (Phase::Capture, 2),
                (Phase::Target, 3),
                (Phase::Bubble, 2),
                (Phase::Bubble, 1),
            ]
        );
    }

    #[test]
    fn non_bubbling_is_target_only() {
        let router = Router::new(Wrapper);
        for composed in [false, true] {
            let out = router.dispatch_for(Node(3), EventInit::new().composed(composed));
            assert_eq!(phases(&out), vec![(Phase::Target, 3)]);
        }
    }

    #[test]
    fn router_accepts_borrowed_lookup() {
        let lookup = Wrapper;
        let router = Router::new(&lookup);
        assert_eq!(router.path_for(Node(3)).nodes(), &[Node(3), Node(2), Node(1)]);
    }

    #[test]
    fn empty_and_singleton_paths() {
        assert!(emit::<Node>(&[]).is_empty());
        assert_eq!(phases(&emit(&[Node(9)])), vec![(Phase::Target, 9)]);
    }

    #[test]
    fn target_element_receives_event_only_once() {
        let router = Router::new(Wrapper);
        let out = router.dispatch_for(Node(3), EventInit::new().bubbles(true).composed(true));

        let target_phases: Vec<Phase> = out
            .iter()
            .filter(|d| d.node.0 == 3)
            .map(|d| d.phase)
            .collect();
        assert_eq!(
            target_phases,
            vec![Phase::Target],
            "Target node should only receive event in target phase"
        );
        // Ancestors get one capture and one bubble entry each.
        for n in [1, 2] {
            assert_eq!(out.iter().filter(|d| d.node.0 == n).count(), 2);
        }
    }

    #[test]
    fn path_of_recovers_target_first_path() {
        let router = Router::new(Wrapper);
        let init = EventInit::new().bubbles(true).composed(true);
        let out = router.dispatch_for(Node(3), init);
        assert_eq!(
            path_of(&out),
            router.path_for(Node(3)).delivery(init).to_vec()
        );
    }
}
