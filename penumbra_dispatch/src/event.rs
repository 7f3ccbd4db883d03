// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events, their propagation flags, and dispatch errors.

use alloc::string::String;
use core::cell::OnceCell;

/// Propagation flags of an [`Event`].
///
/// Both default to `false`, matching the platform defaults for custom events.
///
/// ```
/// use penumbra_dispatch::EventInit;
///
/// let init = EventInit::new().bubbles(true).composed(true);
/// assert!(init.bubbles && init.composed);
/// assert_eq!(EventInit::default(), EventInit { bubbles: false, composed: false });
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EventInit {
    /// Whether the event propagates to ancestors after the target phase.
    pub bubbles: bool,
    /// Whether propagation may continue past shadow boundaries.
    pub composed: bool,
}

impl EventInit {
    /// Flags with both `bubbles` and `composed` off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `bubbles`.
    pub fn bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    /// Set `composed`.
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }
}

/// A custom event: a type name, an opaque `detail` payload and propagation flags.
///
/// Events are single-use. The target is recorded once when the event is
/// dispatched and every listener observes that same target, wherever it is
/// invoked. Dispatching the same event again fails with
/// [`DispatchError::Reentrant`].
#[derive(Debug)]
pub struct Event<K, D = ()> {
    event_type: String,
    detail: D,
    init: EventInit,
    target: OnceCell<K>,
}

impl<K: Copy, D> Event<K, D> {
    /// Create an undispatched event.
    pub fn new(event_type: impl Into<String>, detail: D, init: EventInit) -> Self {
        Self {
            event_type: event_type.into(),
            detail,
            init,
            target: OnceCell::new(),
        }
    }

    /// Event type name used to match listeners.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Payload supplied at construction.
    pub fn detail(&self) -> &D {
        &self.detail
    }

    /// Propagation flags.
    pub fn init(&self) -> EventInit {
        self.init
    }

    /// Shorthand for `init().bubbles`.
    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    /// Shorthand for `init().composed`.
    pub fn composed(&self) -> bool {
        self.init.composed
    }

    /// Node the event was dispatched from, or `None` before dispatch.
    pub fn target(&self) -> Option<K> {
        self.target.get().copied()
    }

    /// Whether the event has been dispatched.
    pub fn is_dispatched(&self) -> bool {
        self.target.get().is_some()
    }

    pub(crate) fn begin_dispatch(&self, target: K) -> Result<(), DispatchError> {
        self.target
            .set(target)
            .map_err(|_| DispatchError::Reentrant {
                event_type: self.event_type.clone(),
            })
    }
}

/// Errors returned by dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The event was already dispatched once.
    #[error("event `{event_type}` has already been dispatched")]
    Reentrant {
        /// Type name of the rejected event.
        event_type: String,
    },
    /// The target is not part of the hierarchy being dispatched over.
    #[error("dispatch target is not part of the tree")]
    UnknownTarget,
}
