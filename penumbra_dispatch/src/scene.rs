// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Tree`] and its callback listeners, dispatched together.

use alloc::string::String;

use penumbra_tree::{NodeId, NodeOptions, Tree, TreeError};

use crate::dispatcher::{self, DispatchReport};
use crate::event::{DispatchError, Event};
use crate::registry::{Listener, Registry};
use crate::types::{Dispatch, ListenerPhase, Outcome};

/// Node tree plus the [`Listener`]s registered on it.
///
/// `D` is the event detail type shared by every listener in the scene.
///
/// ```
/// use penumbra_dispatch::{Event, EventInit, ListenerPhase, Outcome, Scene};
/// use penumbra_tree::NodeOptions;
///
/// let mut scene: Scene = Scene::new();
/// let root = scene.create_node(NodeOptions::new());
/// let wrapper = scene.create_node(NodeOptions::shadow_root());
/// let child = scene.create_node(NodeOptions::new());
/// scene.add_child(root, wrapper).unwrap();
/// scene.add_child(wrapper, child).unwrap();
///
/// for node in [root, wrapper, child] {
///     scene.on(node, "customevent", ListenerPhase::Bubble, |_, _| Outcome::Continue);
/// }
///
/// let event = Event::new("customevent", (), EventInit::new().bubbles(true));
/// let report = scene.dispatch(child, &event).unwrap();
/// assert_eq!(report.nodes_reached(), [child, wrapper]);
/// ```
pub struct Scene<D = ()> {
    tree: Tree,
    listeners: Registry<NodeId, Listener<NodeId, D>>,
}

impl<D> core::fmt::Debug for Scene<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.tree.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<D> Default for Scene<D> {
    fn default() -> Self {
        Self {
            tree: Tree::new(),
            listeners: Registry::new(),
        }
    }
}

impl<D> Scene<D> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The listener registry.
    pub fn registry(&self) -> &Registry<NodeId, Listener<NodeId, D>> {
        &self.listeners
    }

    /// Create a detached node.
    pub fn create_node(&mut self, options: NodeOptions) -> NodeId {
        self.tree.create_node(options)
    }

    /// Link `child` under `parent`. See [`Tree::add_child`].
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.tree.add_child(parent, child)
    }

    /// Register `listener` on `node`.
    pub fn add_listener(
        &mut self,
        node: NodeId,
        event_type: impl Into<String>,
        phase: ListenerPhase,
        listener: Listener<NodeId, D>,
    ) {
        self.listeners.add_listener(node, event_type, phase, listener);
    }

    /// Register a closure on `node` and return its handle for later removal.
    pub fn on(
        &mut self,
        node: NodeId,
        event_type: impl Into<String>,
        phase: ListenerPhase,
        f: impl Fn(&Event<NodeId, D>, &Dispatch<NodeId>) -> Outcome + 'static,
    ) -> Listener<NodeId, D> {
        let listener = Listener::new(f);
        self.add_listener(node, event_type, phase, listener.clone());
        listener
    }

    /// Remove the first registration of `listener`. Returns `false` if absent.
    pub fn remove_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        phase: ListenerPhase,
        listener: &Listener<NodeId, D>,
    ) -> bool {
        self.listeners.remove_listener(node, event_type, phase, listener)
    }

    /// Dispatch `event` from `target`.
    ///
    /// Listeners may dispatch other events through a shared reference to the
    /// scene they capture; the scene itself is borrowed immutably here.
    pub fn dispatch(
        &self,
        target: NodeId,
        event: &Event<NodeId, D>,
    ) -> Result<DispatchReport<NodeId>, DispatchError> {
        dispatcher::dispatch(&self.tree, &self.listeners, target, event, |l, e, d| {
            l.call(e, d)
        })
    }
}
