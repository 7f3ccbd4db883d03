// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composed vs. non-composed events across two nested shadow roots.
//!
//! Tree:
//!
//! ```text
//! document
//! └── demo        (shadow root)
//!     └── wrapper (shadow root)
//!         └── child
//! ```
//!
//! The child fires two bubbling events. `composedcustomevent` is composed and
//! reaches `demo` and `document`. `customevent` is not composed, so it stops
//! at `wrapper`; a listener on `demo` that fires would mean the boundary leaked.
//!
//! Run:
//! - `cargo run -p penumbra_demos --example composed_boundary`
//! - `RUST_LOG=penumbra_dispatch=trace cargo run -p penumbra_demos --example composed_boundary`

use std::cell::RefCell;
use std::rc::Rc;

use penumbra_dispatch::{Event, EventInit, ListenerPhase, Outcome, Scene};
use penumbra_tree::{NodeId, NodeOptions};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
struct Message {
    text: &'static str,
}

#[derive(Debug, Default)]
struct Received {
    composed_at_demo: Option<&'static str>,
    composed_at_document: bool,
    non_composed_at_wrapper: bool,
    non_composed_leaked: Vec<NodeId>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene: Scene<Message> = Scene::new();
    let document = scene.create_node(NodeOptions::new());
    let demo = scene.create_node(NodeOptions::shadow_root());
    let wrapper = scene.create_node(NodeOptions::shadow_root());
    let child = scene.create_node(NodeOptions::new());
    scene.add_child(document, demo)?;
    scene.add_child(demo, wrapper)?;
    scene.add_child(wrapper, child)?;

    let received = Rc::new(RefCell::new(Received::default()));

    let r = Rc::clone(&received);
    scene.on(demo, "composedcustomevent", ListenerPhase::Bubble, move |ev, _| {
        tracing::info!(
            composed = ev.composed(),
            bubbles = ev.bubbles(),
            detail = ev.detail().text,
            "demo received composed event"
        );
        r.borrow_mut().composed_at_demo = Some(ev.detail().text);
        Outcome::Continue
    });
    let r = Rc::clone(&received);
    scene.on(document, "composedcustomevent", ListenerPhase::Bubble, move |_, _| {
        r.borrow_mut().composed_at_document = true;
        Outcome::Continue
    });

    let r = Rc::clone(&received);
    scene.on(wrapper, "customevent", ListenerPhase::Bubble, move |ev, d| {
        tracing::info!(node = %d.node, detail = ev.detail().text, "wrapper captured event");
        r.borrow_mut().non_composed_at_wrapper = true;
        Outcome::Continue
    });
    for outside in [demo, document] {
        let r = Rc::clone(&received);
        scene.on(outside, "customevent", ListenerPhase::Bubble, move |ev, d| {
            tracing::error!(
                node = %d.node,
                composed = ev.composed(),
                "non-composed event crossed the wrapper boundary"
            );
            r.borrow_mut().non_composed_leaked.push(d.node);
            Outcome::Continue
        });
    }

    let composed = Event::new(
        "composedcustomevent",
        Message {
            text: "This is a composed event - can cross shadow DOM boundary",
        },
        EventInit::new().bubbles(true).composed(true),
    );
    let report = scene.dispatch(child, &composed)?;
    println!("composed:     path={:?}", report.path);

    let non_composed = Event::new(
        "customevent",
        Message {
            text: "This is a non-composed event - stays inside the wrapper",
        },
        EventInit::new().bubbles(true),
    );
    let report = scene.dispatch(child, &non_composed)?;
    println!("non-composed: path={:?}", report.path);

    let received = received.borrow();
    println!("{received:#?}");
    assert!(received.composed_at_demo.is_some());
    assert!(received.composed_at_document);
    assert!(received.non_composed_at_wrapper);
    assert!(received.non_composed_leaked.is_empty());
    Ok(())
}
