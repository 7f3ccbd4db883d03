// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: invoke registered listeners over a dispatch sequence.
//!
//! ## Semantics
//!
//! - Entries are processed in order; the router already groups them into
//!   capture → target → bubble.
//! - Each entry runs the listeners registered on its node for the event's
//!   type: capture listeners for capture entries, bubble listeners for bubble
//!   entries, and capture then bubble listeners for the target entry.
//! - [`Outcome::Stop`] lets the remaining listeners on the same entry run,
//!   then ends propagation.
//! - [`Outcome::StopImmediate`] ends propagation right away.
//! - The returned [`DispatchReport`] records every invocation and where
//!   propagation stopped.
//!
//! [`dispatch`] is the only entry point. It checks the target, marks the
//! event dispatched, routes and runs, so every listener observes a set
//! target and an event is delivered at most once.
//!
//! ## Minimal example
//!
//! ```
//! use penumbra_dispatch::dispatcher;
//! use penumbra_dispatch::registry::Registry;
//! use penumbra_dispatch::{Event, EventInit, ListenerPhase, Outcome, Phase, TreeLookup};
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
//! let mut reg: Registry<u32, &str> = Registry::new();
//! reg.add_listener(1, "customevent", ListenerPhase::Bubble, "wrapper");
//! reg.add_listener(0, "customevent", ListenerPhase::Bubble, "root");
//!
//! let event = Event::new("customevent", (), EventInit::new().bubbles(true));
//! let mut heard = Vec::new();
//! let report = dispatcher::dispatch(&Demo, &reg, 2, &event, |name, ev, d| {
//!     assert_eq!(ev.target(), Some(2));
//!     heard.push((*name, d.phase));
//!     Outcome::Continue
//! })
//! .unwrap();
//!
//! // Not composed: the root, outside the wrapper's shadow root, hears nothing.
//! assert_eq!(heard, vec![("wrapper", Phase::Bubble)]);
//! assert_eq!(report.path, vec![2, 1]);
//! assert!(!report.reached(0));
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::event::{DispatchError, Event};
use crate::registry::Registry;
use crate::router::{Router, path_of};
use crate::types::{Dispatch, ListenerPhase, Outcome, Phase, TreeLookup};

/// One listener invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delivery<K> {
    /// Node the listener is registered on (the current target).
    pub node: K,
    /// Phase of the invocation.
    pub phase: Phase,
    /// Position of the listener among those run for this entry.
    pub ordinal: usize,
}

/// Record of one dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport<K> {
    /// Nodes eligible to receive the event, target first.
    pub path: Vec<K>,
    /// Listener invocations in the order they happened.
    pub deliveries: Vec<Delivery<K>>,
    /// Entry whose listener stopped propagation, if any.
    pub stopped_at: Option<Dispatch<K>>,
}

impl<K: Copy + Eq> DispatchReport<K> {
    /// Whether any listener on `node` was invoked.
    pub fn reached(&self, node: K) -> bool {
        self.deliveries.iter().any(|d| d.node == node)
    }

    /// Number of listener invocations on `node`.
    pub fn count_for(&self, node: K) -> usize {
        self.deliveries.iter().filter(|d| d.node == node).count()
    }

    /// Nodes whose listeners ran, in first-invocation order.
    pub fn nodes_reached(&self) -> Vec<K> {
        let mut out: Vec<K> = Vec::new();
        for d in &self.deliveries {
            if !out.contains(&d.node) {
                out.push(d.node);
            }
        }
        out
    }

    /// Returns true if a listener stopped propagation.
    pub fn was_stopped(&self) -> bool {
        self.stopped_at.is_some()
    }
}

/// Route `event` from `target` through `lookup` and run the listeners in `registry`.
///
/// `handler` is called once per matching listener with the listener value,
/// the event and the current dispatch entry. The event's target is recorded
/// before the first call, so every call observes the same target.
///
/// ## Errors
///
/// - [`DispatchError::UnknownTarget`] if `lookup` does not contain `target`.
///   The event stays undispatched.
/// - [`DispatchError::Reentrant`] if `event` was dispatched before, including
///   from inside one of its own listeners.
pub fn dispatch<K, T, L, D>(
    lookup: &T,
    registry: &Registry<K, L>,
    target: K,
    event: &Event<K, D>,
    handler: impl FnMut(&L, &Event<K, D>, &Dispatch<K>) -> Outcome,
) -> Result<DispatchReport<K>, DispatchError>
where
    K: Copy + Eq + Hash + Debug,
    T: TreeLookup<K> + ?Sized,
{
    if !lookup.contains(&target) {
        return Err(DispatchError::UnknownTarget);
    }
    event.begin_dispatch(target)?;
    let router = Router::new(lookup);
    let seq = router.dispatch_for(target, event.init());
    tracing::debug!(
        event_type = event.event_type(),
        ?target,
        bubbles = event.bubbles(),
        composed = event.composed(),
        entries = seq.len(),
        "dispatch"
    );
    Ok(run(&seq, registry, event, handler))
}

// Runs listeners over a routed sequence. Callers mark `event` dispatched first.
pub(crate) fn run<K, L, D>(
    seq: &[Dispatch<K>],
    registry: &Registry<K, L>,
    event: &Event<K, D>,
    mut handler: impl FnMut(&L, &Event<K, D>, &Dispatch<K>) -> Outcome,
) -> DispatchReport<K>
where
    K: Copy + Eq + Hash + Debug,
{
    let mut report = DispatchReport {
        path: path_of(seq),
        deliveries: Vec::new(),
        stopped_at: None,
    };
    for d in seq {
        let mut stop = false;
        let listeners = listeners_at(registry, d.node, d.phase, event.event_type());
        for (ordinal, listener) in listeners.enumerate() {
            let outcome = handler(listener, event, d);
            tracing::trace!(node = ?d.node, phase = ?d.phase, ordinal, ?outcome, "delivered");
            report.deliveries.push(Delivery {
                node: d.node,
                phase: d.phase,
                ordinal,
            });
            match outcome {
                Outcome::Continue => {}
                Outcome::Stop => stop = true,
                Outcome::StopImmediate => {
                    stop = true;
                    break;
                }
            }
        }
        if stop {
            tracing::debug!(node = ?d.node, phase = ?d.phase, "propagation stopped");
            report.stopped_at = Some(*d);
            break;
        }
    }
    report
}

fn listeners_at<'a, K, L>(
    registry: &'a Registry<K, L>,
    node: K,
    phase: Phase,
    event_type: &'a str,
) -> impl Iterator<Item = &'a L> + 'a
where
    K: Copy + Eq + Hash + 'a,
{
    let (first, then_bubble) = match phase {
        Phase::Capture => (ListenerPhase::Capture, false),
        Phase::Target => (ListenerPhase::Capture, true),
        Phase::Bubble => (ListenerPhase::Bubble, false),
    };
    let rest = then_bubble
        .then(|| registry.listeners_for(node, event_type, ListenerPhase::Bubble))
        .into_iter()
        .flatten();
    registry.listeners_for(node, event_type, first).chain(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventInit;
    use alloc::vec;
    use core::cell::RefCell;

    const TY: &str = "customevent";

    // root(0) → wrapper(1, shadow) → child(2)
    struct Wrapper;
    impl TreeLookup<u32> for Wrapper {
        fn parent_of(&self, n: &u32) -> Option<u32> {
            n.checked_sub(1)
        }
        fn is_shadow_boundary(&self, n: &u32) -> bool {
            *n == 1
        }
        fn contains(&self, n: &u32) -> bool {
            *n <= 2
        }
    }

    // Listener values are (node, tag) so tests can tell them apart.
    fn full_registry() -> Registry<u32, (u32, char)> {
        let mut reg = Registry::new();
        for n in 0..=2 {
            reg.add_listener(n, TY, ListenerPhase::Capture, (n, 'c'));
            reg.add_listener(n, TY, ListenerPhase::Bubble, (n, 'b'));
        }
        reg
    }

    fn record(
        reg: &Registry<u32, (u32, char)>,
        init: EventInit,
        stop_on: Option<((u32, char), Outcome)>,
    ) -> (Vec<(u32, char, Phase)>, DispatchReport<u32>) {
        let event: Event<u32> = Event::new(TY, (), init);
        let mut seen = Vec::new();
        let report = dispatch(&Wrapper, reg, 2, &event, |l, _, d| {
            seen.push((l.0, l.1, d.phase));
            match stop_on {
                Some((at, outcome)) if at == *l => outcome,
                _ => Outcome::Continue,
            }
        })
        .unwrap();
        (seen, report)
    }

    #[test]
    fn capture_target_bubble_order() {
        let reg = full_registry();
        let (seen, report) = record(&reg, EventInit::new().bubbles(true).composed(true), None);
        assert_eq!(
            seen,
            vec![
                (0, 'c', Phase::Capture),
                (1, 'c', Phase::Capture),
                (2, 'c', Phase::Target),
                (2, 'b', Phase::Target),
                (1, 'b', Phase::Bubble),
                (0, 'b', Phase::Bubble),
            ]
        );
        assert_eq!(report.path, vec![2, 1, 0]);
        assert!(!report.was_stopped());
        assert_eq!(report.nodes_reached(), vec![0, 1, 2]);
    }

    #[test]
    fn non_composed_skips_host_and_above() {
        let reg = full_registry();
        let (_, report) = record(&reg, EventInit::new().bubbles(true), None);
        assert!(report.reached(2));
        assert!(report.reached(1));
        assert!(!report.reached(0));
        assert_eq!(report.path, vec![2, 1]);
    }

    #[test]
    fn non_bubbling_reaches_only_target() {
        let reg = full_registry();
        for composed in [false, true] {
            let (seen, report) = record(&reg, EventInit::new().composed(composed), None);
            assert_eq!(
                seen,
                vec![(2, 'c', Phase::Target), (2, 'b', Phase::Target)]
            );
            assert_eq!(report.nodes_reached(), vec![2]);
        }
    }

    #[test]
    fn stop_lets_same_node_listeners_finish() {
        let mut reg = full_registry();
        reg.add_listener(1, TY, ListenerPhase::Bubble, (1, 'x'));
        let (seen, report) = record(
            &reg,
            EventInit::new().bubbles(true).composed(true),
            Some(((1, 'b'), Outcome::Stop)),
        );
        assert_eq!(
            seen,
            vec![
                (0, 'c', Phase::Capture),
                (1, 'c', Phase::Capture),
                (2, 'c', Phase::Target),
                (2, 'b', Phase::Target),
                (1, 'b', Phase::Bubble),
                // Same node still runs; the root does not.
                (1, 'x', Phase::Bubble),
            ]
        );
        assert_eq!(report.stopped_at, Some(Dispatch::bubble(1)));
        assert!(report.was_stopped());
    }

    #[test]
    fn stop_immediate_skips_same_node_listeners() {
        let mut reg = full_registry();
        reg.add_listener(1, TY, ListenerPhase::Bubble, (1, 'x'));
        let (seen, report) = record(
            &reg,
            EventInit::new().bubbles(true).composed(true),
            Some(((1, 'b'), Outcome::StopImmediate)),
        );
        assert_eq!(seen.last(), Some(&(1, 'b', Phase::Bubble)));
        assert!(!seen.contains(&(1, 'x', Phase::Bubble)));
        assert_eq!(report.stopped_at, Some(Dispatch::bubble(1)));
    }

    #[test]
    fn stop_in_capture_skips_target_and_bubble() {
        let reg = full_registry();
        let (seen, report) = record(
            &reg,
            EventInit::new().bubbles(true).composed(true),
            Some(((0, 'c'), Outcome::Stop)),
        );
        assert_eq!(seen, vec![(0, 'c', Phase::Capture)]);
        assert_eq!(report.stopped_at, Some(Dispatch::capture(0)));
    }

    #[test]
    fn stop_at_target_still_runs_target_bubble_listeners() {
        let reg = full_registry();
        let (seen, _) = record(
            &reg,
            EventInit::new().bubbles(true).composed(true),
            Some(((2, 'c'), Outcome::Stop)),
        );
        assert_eq!(
            seen,
            vec![
                (0, 'c', Phase::Capture),
                (1, 'c', Phase::Capture),
                (2, 'c', Phase::Target),
                (2, 'b', Phase::Target),
            ]
        );
    }

    #[test]
    fn no_listeners_is_a_no_op() {
        let reg: Registry<u32, (u32, char)> = Registry::new();
        let (seen, report) = record(&reg, EventInit::new().bubbles(true).composed(true), None);
        assert!(seen.is_empty());
        assert!(report.deliveries.is_empty());
        assert_eq!(report.path, vec![2, 1, 0]);
    }

    #[test]
    fn other_event_types_are_ignored() {
        let mut reg = Registry::new();
        reg.add_listener(2, "useraction", ListenerPhase::Bubble, (2, 'u'));
        let (seen, _) = record(&reg, EventInit::new().bubbles(true), None);
        assert!(seen.is_empty());
    }

    #[test]
    fn redispatch_is_rejected_and_first_run_stands() {
        let reg = full_registry();
        let event: Event<u32> = Event::new(TY, (), EventInit::new().bubbles(true));
        let first = dispatch(&Wrapper, &reg, 2, &event, |_, _, _| Outcome::Continue).unwrap();

        let mut calls = 0;
        let second = dispatch(&Wrapper, &reg, 1, &event, |_, _, _| {
            calls += 1;
            Outcome::Continue
        });
        assert_eq!(
            second,
            Err(DispatchError::Reentrant {
                event_type: TY.into()
            })
        );
        assert_eq!(calls, 0);
        assert_eq!(event.target(), Some(2));
        assert_eq!(first.deliveries.len(), 4);
    }

    #[test]
    fn unknown_target_leaves_event_undispatched() {
        let reg = full_registry();
        let event: Event<u32> = Event::new(TY, (), EventInit::new());
        let err = dispatch(&Wrapper, &reg, 7, &event, |_, _, _| Outcome::Continue);
        assert_eq!(err, Err(DispatchError::UnknownTarget));
        assert!(!event.is_dispatched());
        assert!(dispatch(&Wrapper, &reg, 2, &event, |_, _, _| Outcome::Continue).is_ok());
    }

    #[test]
    fn listeners_observe_original_target_and_detail() {
        let reg = full_registry();
        let event: Event<u32, &str> = Event::new(
            TY,
            "Event reached parent successfully",
            EventInit::new().bubbles(true).composed(true),
        );
        let report = dispatch(&Wrapper, &reg, 2, &event, |_, ev, d| {
            assert_eq!(ev.target(), Some(2));
            assert_eq!(*ev.detail(), "Event reached parent successfully");
            assert!(d.node <= 2);
            Outcome::Continue
        })
        .unwrap();
        assert_eq!(report.deliveries.len(), 6);
    }

    #[test]
    fn nested_dispatch_of_a_different_event() {
        let reg = full_registry();
        let outer: Event<u32> = Event::new(TY, (), EventInit::new().bubbles(true).composed(true));
        let inner: Event<u32> = Event::new(TY, (), EventInit::new());
        let log = RefCell::new(Vec::new());

        let report = dispatch(&Wrapper, &reg, 2, &outer, |l, _, d| {
            log.borrow_mut().push(("outer", l.0, d.phase));
            if d.phase == Phase::Target && l.1 == 'c' {
                // Re-dispatching the event in flight fails...
                assert!(matches!(
                    dispatch(&Wrapper, &reg, 2, &outer, |_, _, _| Outcome::Continue),
                    Err(DispatchError::Reentrant { .. })
                ));
                // ...while a fresh event runs synchronously, to completion.
                dispatch(&Wrapper, &reg, 1, &inner, |l, _, d| {
                    log.borrow_mut().push(("inner", l.0, d.phase));
                    Outcome::Continue
                })
                .unwrap();
            }
            Outcome::Continue
        })
        .unwrap();

        let log = log.into_inner();
        assert_eq!(
            log,
            vec![
                ("outer", 0, Phase::Capture),
                ("outer", 1, Phase::Capture),
                ("outer", 2, Phase::Target),
                ("inner", 1, Phase::Target),
                ("inner", 1, Phase::Target),
                ("outer", 2, Phase::Target),
                ("outer", 1, Phase::Bubble),
                ("outer", 0, Phase::Bubble),
            ]
        );
        assert_eq!(report.deliveries.len(), 6);
    }

    #[test]
    fn every_delivery_sees_the_target_and_the_event_runs_once() {
        let reg = full_registry();
        let event: Event<u32> = Event::new(TY, (), EventInit::new());
        let mut targets = Vec::new();
        let mut results = Vec::new();
        for _ in 0..3 {
            results.push(dispatch(&Wrapper, &reg, 2, &event, |_, ev, _| {
                targets.push(ev.target());
                Outcome::Continue
            }));
        }
        // Capture then bubble listener on the target, from the first call only.
        assert_eq!(targets, vec![Some(2), Some(2)]);
        assert!(event.is_dispatched());
        assert!(results[0].is_ok());
        for later in &results[1..] {
            assert!(matches!(later, Err(DispatchError::Reentrant { .. })));
        }
    }

    #[test]
    fn run_records_ordinals_per_entry() {
        let reg = full_registry();
        let event: Event<u32> = Event::new(TY, (), EventInit::new());
        event.begin_dispatch(1).unwrap();
        let seq = vec![Dispatch::target(1), Dispatch::bubble(0)];
        let report = run(&seq, &reg, &event, |_, _, _| Outcome::Continue);
        assert_eq!(report.path, vec![1, 0]);
        assert_eq!(
            report.deliveries,
            vec![
                Delivery {
                    node: 1,
                    phase: Phase::Target,
                    ordinal: 0
                },
                Delivery {
                    node: 1,
                    phase: Phase::Target,
                    ordinal: 1
                },
                Delivery {
                    node: 0,
                    phase: Phase::Bubble,
                    ordinal: 0
                },
            ]
        );
    }
}
