// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types shared by the router, registry and dispatcher.

/// Propagation phase of a single dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root→target, excluding the target.
    Capture,
    /// The target itself.
    Target,
    /// Target→root, excluding the target.
    Bubble,
}

/// Phase a listener is registered for.
///
/// Capture listeners run on the way down, bubble listeners on the way up.
/// On the target both run: capture-registered listeners first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerPhase {
    /// Invoked during [`Phase::Capture`] and first during [`Phase::Target`].
    Capture,
    /// Invoked during [`Phase::Bubble`] and after capture listeners during [`Phase::Target`].
    Bubble,
}

/// Listener result controlling propagation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep going.
    #[default]
    Continue,
    /// Finish the listeners on the current node, then stop.
    Stop,
    /// Stop right away, skipping the remaining listeners on the current node.
    StopImmediate,
}

/// One step of a propagation sequence: which node, in which phase.
///
/// During invocation `node` is the *current target*; the original target is
/// always available from the event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node whose listeners run in this step.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A capture step for `node`.
    pub fn capture(node: K) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// The target step for `node`.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble step for `node`.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Read-only view of a node hierarchy with shadow boundaries.
///
/// Implementations must describe an acyclic hierarchy; the path walk follows
/// `parent_of` until it returns `None`.
pub trait TreeLookup<K> {
    /// Parent of `node`, or `None` for roots.
    fn parent_of(&self, node: &K) -> Option<K>;

    /// Whether `node` is the root of an encapsulated subtree.
    fn is_shadow_boundary(&self, node: &K) -> bool;

    /// Whether `node` belongs to this hierarchy. Defaults to `true`.
    fn contains(&self, node: &K) -> bool {
        let _ = node;
        true
    }
}

impl<K, T: TreeLookup<K> + ?Sized> TreeLookup<K> for &T {
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }

    fn is_shadow_boundary(&self, node: &K) -> bool {
        (**self).is_shadow_boundary(node)
    }

    fn contains(&self, node: &K) -> bool {
        (**self).contains(node)
    }
}

/// A hierarchy where every node is a detached root without boundaries.
///
/// Useful when only target-phase delivery matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Detached;

impl<K> TreeLookup<K> for Detached {
    fn parent_of(&self, _: &K) -> Option<K> {
        None
    }

    fn is_shadow_boundary(&self, _: &K) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, EventInit};
    use crate::registry::Registry;
    use alloc::vec;

    #[test]
    fn detached_nodes_only_see_target_phase() {
        let mut reg: Registry<u8, u8> = Registry::new();
        reg.add_listener(1, "ping", ListenerPhase::Capture, 10);
        reg.add_listener(1, "ping", ListenerPhase::Bubble, 11);
        reg.add_listener(0, "ping", ListenerPhase::Bubble, 0);

        let event = Event::new("ping", (), EventInit::new().bubbles(true).composed(true));
        let report = crate::dispatcher::dispatch(&Detached, &reg, 1, &event, |_, _, d| {
            assert_eq!(d.phase, Phase::Target);
            Outcome::Continue
        })
        .unwrap();
        assert_eq!(report.path, vec![1]);
        assert_eq!(report.count_for(1), 2);
        assert!(!report.reached(0));
    }

    #[test]
    fn borrowed_lookup_forwards() {
        let lookup = &&Detached;
        assert!(TreeLookup::<u8>::contains(lookup, &3));
        assert_eq!(TreeLookup::<u8>::parent_of(lookup, &3), None);
    }
}
