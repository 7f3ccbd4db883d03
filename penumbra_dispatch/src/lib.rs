// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Penumbra Dispatch: deterministic, `no_std` custom-event propagation across
//! shadow boundaries.
//!
//! ## Overview
//!
//! Given a hierarchy, a target node and an event's `bubbles`/`composed` flags,
//! this crate decides which listeners observe the event and in what order:
//! capture → target → bubble. It does not own the hierarchy. Any structure can
//! take part by implementing [`TreeLookup`], which reports parents and marks
//! the nodes that start an encapsulated (shadow) subtree.
//!
//! ## Flags
//!
//! - `bubbles == false`: only the target's listeners run. `composed` is
//!   irrelevant.
//! - `bubbles == true, composed == false`: the event climbs to the target's
//!   nearest enclosing shadow root and stops there. The root's host and
//!   everything above it see nothing.
//! - `bubbles == true, composed == true`: the event climbs the full ancestor
//!   chain, crossing every boundary.
//!
//! ## Layering
//!
//! - [`path`]: the unfiltered ancestor chain and its truncations.
//! - [`router`]: turns a path into a capture → target → bubble sequence.
//! - [`registry`]: ordered listener lists per node, event type and phase.
//! - [`dispatcher`]: runs registered listeners over a sequence and records a
//!   [`DispatchReport`].
//! - [`Scene`] (`tree_adapter` feature): a [`penumbra_tree::Tree`] and its
//!   callback listeners behind one small API.
//!
//! ## Example
//!
//! ```
//! use penumbra_dispatch::{Event, EventInit, ListenerPhase, Outcome, Phase, Scene};
//! use penumbra_tree::NodeOptions;
//!
//! // root → wrapper(shadow root) → child
//! let mut scene: Scene<&str> = Scene::new();
//! let root = scene.create_node(NodeOptions::new());
//! let wrapper = scene.create_node(NodeOptions::shadow_root());
//! let child = scene.create_node(NodeOptions::new());
//! scene.add_child(root, wrapper).unwrap();
//! scene.add_child(wrapper, child).unwrap();
//!
//! scene.on(root, "customevent", ListenerPhase::Bubble, move |ev, d| {
//!     assert_eq!(ev.target(), Some(child));
//!     assert_eq!(d.phase, Phase::Bubble);
//!     Outcome::Continue
//! });
//!
//! let stays_inside = Event::new("customevent", "hi", EventInit::new().bubbles(true));
//! assert!(!scene.dispatch(child, &stays_inside).unwrap().reached(root));
//!
//! let crosses = Event::new(
//!     "customevent",
//!     "hi",
//!     EventInit::new().bubbles(true).composed(true),
//! );
//! assert!(scene.dispatch(child, &crosses).unwrap().reached(root));
//! ```
//!
//! ## Adapters
//!
//! The [`adapters`] module implements [`TreeLookup`] for other Penumbra crates.
//!
//! ## Features
//!
//! - `tree_adapter` (default): [`adapters::tree`] and [`Scene`].
//! - `std`: forwards to `std` support in dependencies.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod path;
pub mod registry;
pub mod router;
pub mod types;

mod event;
#[cfg(feature = "tree_adapter")]
mod scene;

pub use dispatcher::{Delivery, DispatchReport};
pub use event::{DispatchError, Event, EventInit};
pub use path::PropagationPath;
pub use registry::{Listener, Registry};
#[cfg(feature = "tree_adapter")]
pub use scene::Scene;
pub use types::{Detached, Dispatch, ListenerPhase, Outcome, Phase, TreeLookup};
