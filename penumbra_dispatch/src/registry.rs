// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener storage per node, event type and phase.
//!
//! [`Registry`] is generic over the listener value `L`. The dispatcher hands
//! each stored value to a caller-supplied handler, so `L` can be anything
//! from a plain tag (handy in tests) to a callback. [`Listener`] is the
//! callback type used by [`Scene`](crate::Scene).
//!
//! Registration order is preserved and duplicates are kept: registering the
//! same listener twice makes it run twice.
//!
//! ```
//! use penumbra_dispatch::ListenerPhase;
//! use penumbra_dispatch::registry::Registry;
//!
//! let mut reg: Registry<u32, &str> = Registry::new();
//! reg.add_listener(1, "customevent", ListenerPhase::Bubble, "a");
//! reg.add_listener(1, "customevent", ListenerPhase::Bubble, "b");
//! reg.add_listener(1, "customevent", ListenerPhase::Bubble, "a");
//!
//! assert!(reg.remove_listener(1, "customevent", ListenerPhase::Bubble, &"a"));
//! let left: Vec<_> = reg.listeners_for(1, "customevent", ListenerPhase::Bubble).collect();
//! assert_eq!(left, [&"b", &"a"]);
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::event::Event;
use crate::types::{Dispatch, ListenerPhase, Outcome};

#[derive(Clone, Debug)]
struct Entry<L> {
    event_type: String,
    phase: ListenerPhase,
    listener: L,
}

/// Ordered listener lists keyed by node.
#[derive(Clone)]
pub struct Registry<K, L> {
    nodes: HashMap<K, Vec<Entry<L>>>,
}

impl<K, L> core::fmt::Debug for Registry<K, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total: usize = self.nodes.values().map(Vec::len).sum();
        f.debug_struct("Registry")
            .field("nodes", &self.nodes.len())
            .field("listeners", &total)
            .finish_non_exhaustive()
    }
}

impl<K, L> Default for Registry<K, L> {
    fn default() -> Self {
        Self {
            nodes: HashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash, L> Registry<K, L> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `listener` to the list for (`node`, `event_type`, `phase`).
    pub fn add_listener(
        &mut self,
        node: K,
        event_type: impl Into<String>,
        phase: ListenerPhase,
        listener: L,
    ) {
        self.nodes.entry(node).or_default().push(Entry {
            event_type: event_type.into(),
            phase,
            listener,
        });
    }

    /// Listeners for (`node`, `event_type`, `phase`) in registration order.
    pub fn listeners_for<'a>(
        &'a self,
        node: K,
        event_type: &'a str,
        phase: ListenerPhase,
    ) -> impl Iterator<Item = &'a L> + 'a {
        self.nodes
            .get(&node)
            .into_iter()
            .flatten()
            .filter(move |e| e.phase == phase && e.event_type == event_type)
            .map(|e| &e.listener)
    }

    /// Whether `node` has any listener for `event_type`, in either phase.
    pub fn has_listeners(&self, node: K, event_type: &str) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|entries| entries.iter().any(|e| e.event_type == event_type))
    }

    /// Drop every listener registered on `node`, returning how many were removed.
    pub fn remove_node(&mut self, node: K) -> usize {
        self.nodes.remove(&node).map_or(0, |entries| entries.len())
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: Copy + Eq + Hash, L: PartialEq> Registry<K, L> {
    /// Remove the first registration equal to `listener` for (`node`, `event_type`, `phase`).
    ///
    /// Returns `false`, and changes nothing, when there is no such registration.
    pub fn remove_listener(
        &mut self,
        node: K,
        event_type: &str,
        phase: ListenerPhase,
        listener: &L,
    ) -> bool {
        let Some(entries) = self.nodes.get_mut(&node) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| {
            e.phase == phase && e.event_type == event_type && e.listener == *listener
        }) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.nodes.remove(&node);
        }
        true
    }
}

type Callback<K, D> = dyn Fn(&Event<K, D>, &Dispatch<K>) -> Outcome;

/// Shared callback listener.
///
/// Equality is identity: two `Listener`s are equal when they are clones of
/// the same handle. Keep a clone around to remove the listener later.
///
/// ```
/// use penumbra_dispatch::{Listener, Outcome};
///
/// let a: Listener<u32> = Listener::new(|_, _| Outcome::Continue);
/// let b: Listener<u32> = Listener::new(|_, _| Outcome::Continue);
/// assert_eq!(a, a.clone());
/// assert_ne!(a, b);
/// ```
pub struct Listener<K, D = ()>(Rc<Callback<K, D>>);

impl<K, D> Listener<K, D> {
    /// Wrap a callback.
    pub fn new(f: impl Fn(&Event<K, D>, &Dispatch<K>) -> Outcome + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, event: &Event<K, D>, dispatch: &Dispatch<K>) -> Outcome {
        (self.0)(event, dispatch)
    }
}

impl<K, D> Clone for Listener<K, D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<K, D> PartialEq for Listener<K, D> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<K, D> Eq for Listener<K, D> {}

impl<K, D> core::fmt::Debug for Listener<K, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listener")
            .field("handles", &Rc::strong_count(&self.0))
            .finish_non_exhaustive()
    }
}
