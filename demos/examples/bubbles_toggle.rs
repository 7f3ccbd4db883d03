// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `bubbles` flag on its own: `parent → wrapper → child`, no shadow roots.
//!
//! The child fires `customevent` twice. With `bubbles: false` only the
//! child's own listener runs. With `bubbles: true` the event climbs to the
//! wrapper and then the parent. A capture listener on the parent shows that
//! non-bubbling events skip the capture phase on ancestors too.
//!
//! Run:
//! - `cargo run -p penumbra_demos --example bubbles_toggle`

use std::cell::RefCell;
use std::rc::Rc;

use penumbra_dispatch::{Event, EventInit, ListenerPhase, Outcome, Phase, Scene};
use penumbra_tree::{NodeId, NodeOptions};
use tracing_subscriber::EnvFilter;

type Log = Rc<RefCell<Vec<(&'static str, Phase)>>>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene: Scene<&'static str> = Scene::new();
    let parent = scene.create_node(NodeOptions::new());
    let wrapper = scene.create_node(NodeOptions::new());
    let child = scene.create_node(NodeOptions::new());
    scene.add_child(parent, wrapper)?;
    scene.add_child(wrapper, child)?;

    let log = Log::default();
    let named: [(NodeId, &'static str); 3] =
        [(parent, "parent"), (wrapper, "wrapper"), (child, "child")];
    for (node, name) in named {
        let log = Rc::clone(&log);
        scene.on(node, "customevent", ListenerPhase::Bubble, move |ev, d| {
            tracing::info!(name, phase = ?d.phase, detail = *ev.detail(), "received");
            log.borrow_mut().push((name, d.phase));
            Outcome::Continue
        });
    }
    let capture_log = Rc::clone(&log);
    scene.on(parent, "customevent", ListenerPhase::Capture, move |_, d| {
        capture_log.borrow_mut().push(("parent (capture)", d.phase));
        Outcome::Continue
    });

    for bubbles in [false, true] {
        log.borrow_mut().clear();
        let event = Event::new(
            "customevent",
            "Bubbling event fired from the child",
            EventInit::new().bubbles(bubbles),
        );
        let report = scene.dispatch(child, &event)?;
        println!("bubbles: {bubbles}");
        for (name, phase) in log.borrow().iter() {
            println!("  {phase:?}  {name}");
        }

        let expected: &[(&str, Phase)] = if bubbles {
            &[
                ("parent (capture)", Phase::Capture),
                ("child", Phase::Target),
                ("wrapper", Phase::Bubble),
                ("parent", Phase::Bubble),
            ]
        } else {
            &[("child", Phase::Target)]
        };
        assert_eq!(log.borrow().as_slice(), expected);
        assert_eq!(report.reached(parent), bubbles);
    }
    Ok(())
}
