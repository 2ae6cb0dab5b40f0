// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callbacks and the event view they are invoked with.

use alloc::rc::Rc;
use core::fmt;

use crate::id::{CallbackId, ObjectId};

/// A shareable event callback with a stable identity.
///
/// Closures have no identity of their own, so a callback is wrapped once and
/// then cloned into every binding that should use it. Removal with
/// [`Emitter::off`](crate::Emitter::off) compares callbacks by that identity,
/// never by behavior.
///
/// ```rust
/// use itinerary_events::{Callback, Emitter, Events};
///
/// let events = Events::<()>::new();
/// let cb = Callback::new(|_| {});
///
/// events.on("a b", cb.clone());
/// events.off(None, Some(&cb), None);
/// assert!(events.event_names().is_empty());
/// ```
pub struct Callback<A> {
    id: CallbackId,
    f: Rc<dyn Fn(&Event<'_, A>)>,
}

impl<A> Callback<A> {
    /// Wraps `f` in a new callback with a fresh identity.
    pub fn new(f: impl Fn(&Event<'_, A>) + 'static) -> Self {
        Self {
            id: CallbackId::next(),
            f: Rc::new(f),
        }
    }

    /// Returns the identity shared by all clones of this callback.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CallbackId {
        self.id
    }

    /// Invokes the callback.
    #[inline]
    pub fn call(&self, event: &Event<'_, A>) {
        (self.f)(event);
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            f: Rc::clone(&self.f),
        }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<A> From<&Callback<A>> for CallbackId {
    fn from(callback: &Callback<A>) -> Self {
        callback.id
    }
}

/// What a callback sees when it fires.
#[derive(Debug)]
pub struct Event<'a, A> {
    name: &'a str,
    context: ObjectId,
    args: &'a A,
}

impl<'a, A> Event<'a, A> {
    pub(crate) fn new(name: &'a str, context: ObjectId, args: &'a A) -> Self {
        Self {
            name,
            context,
            args,
        }
    }

    /// The event name that was triggered.
    ///
    /// For bindings on the wildcard `"all"` event this is the name of the
    /// event that actually fired, not `"all"`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The effective invocation context: the explicit context the binding was
    /// created with, or the id of the emitter that owns the binding.
    #[inline]
    #[must_use]
    pub fn context(&self) -> ObjectId {
        self.context
    }

    /// The arguments passed to `trigger`.
    #[inline]
    #[must_use]
    pub fn args(&self) -> &'a A {
        self.args
    }
}
