// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The publish/subscribe capability as a trait.
//!
//! Any type that owns an [`Events`] registry becomes an emitter by
//! implementing [`Emitter::events`]; every other operation is provided.
//! All operations return `&Self` so calls chain.
//!
//! ```rust
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use itinerary_events::{Callback, Emitter, Events};
//!
//! struct Model {
//!     events: Events<u32>,
//! }
//!
//! impl Emitter for Model {
//!     type Payload = u32;
//!     fn events(&self) -> &Events<u32> {
//!         &self.events
//!     }
//! }
//!
//! let model = Model { events: Events::new() };
//! let total = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&total);
//!
//! model
//!     .on("change", Callback::<u32>::new(move |ev| sink.set(sink.get() + *ev.args())))
//!     .trigger("change", &2)
//!     .trigger("change", &3);
//! assert_eq!(total.get(), 5);
//! ```

use crate::callback::Callback;
use crate::events::Events;
use crate::id::{CallbackId, ObjectId};

/// Callback registration, removal, dispatch and cross-object listening.
///
/// `names` arguments accept a single event name or several separated by
/// whitespace. Callback arguments accept a [`Callback`] or `None`; `None`
/// registers nothing and is not an error.
///
/// Dispatch is synchronous and re-entrant. A callback may bind, unbind,
/// trigger or listen on any emitter, including the one that is firing it.
/// Each trigger pass works on a snapshot of the bindings taken before the
/// first callback runs, so such changes take effect from the next trigger.
/// A panicking callback unwinds straight through `trigger` to its caller.
pub trait Emitter {
    /// The argument type passed to callbacks by [`trigger`](Self::trigger).
    type Payload: 'static;

    /// Returns the registry backing this emitter.
    fn events(&self) -> &Events<Self::Payload>;

    /// Returns this emitter's identity, used as the context of bindings it
    /// creates through [`listen_to`](Self::listen_to).
    fn id(&self) -> ObjectId {
        self.events().id()
    }

    /// Binds `callback` under each of `names`.
    ///
    /// When fired, the callback's context is this emitter's id.
    fn on(&self, names: &str, callback: impl Into<Option<Callback<Self::Payload>>>) -> &Self {
        if let Some(callback) = callback.into() {
            self.events().bind(names, &callback, None, false, None);
        }
        self
    }

    /// Binds `callback` under each of `names` with an explicit context.
    ///
    /// The context is reported to the callback and can later be used to
    /// remove every binding created with it.
    fn on_with_context(
        &self,
        names: &str,
        callback: impl Into<Option<Callback<Self::Payload>>>,
        context: ObjectId,
    ) -> &Self {
        if let Some(callback) = callback.into() {
            self.events().bind(names, &callback, Some(context), false, None);
        }
        self
    }

    /// Binds each `(names, callback)` pair of an event map.
    fn on_map<'n>(
        &self,
        map: impl IntoIterator<Item = (&'n str, Callback<Self::Payload>)>,
    ) -> &Self {
        for (names, callback) in map {
            self.on(names, callback);
        }
        self
    }

    /// Like [`on`](Self::on), but each binding removes itself before its
    /// first invocation.
    ///
    /// Every name gets its own one-shot binding: `once("a b", cb)` fires `cb`
    /// once for `a` and once for `b`. Plain bindings of the same callback are
    /// unaffected.
    fn once(&self, names: &str, callback: impl Into<Option<Callback<Self::Payload>>>) -> &Self {
        if let Some(callback) = callback.into() {
            self.events().bind(names, &callback, None, true, None);
        }
        self
    }

    /// Like [`once`](Self::once) with an explicit context.
    fn once_with_context(
        &self,
        names: &str,
        callback: impl Into<Option<Callback<Self::Payload>>>,
        context: ObjectId,
    ) -> &Self {
        if let Some(callback) = callback.into() {
            self.events().bind(names, &callback, Some(context), true, None);
        }
        self
    }

    /// Binds each pair of an event map as one-shot.
    fn once_map<'n>(
        &self,
        map: impl IntoIterator<Item = (&'n str, Callback<Self::Payload>)>,
    ) -> &Self {
        for (names, callback) in map {
            self.once(names, callback);
        }
        self
    }

    /// Removes bindings matching all given filters.
    ///
    /// `None` matches everything on that axis: `off(None, None, None)` clears
    /// the registry. `context` only matches bindings created with an explicit
    /// context, never the default one. One-shot bindings match their
    /// underlying callback. Unknown names and callbacks are ignored.
    fn off(
        &self,
        names: Option<&str>,
        callback: Option<&Callback<Self::Payload>>,
        context: Option<ObjectId>,
    ) -> &Self {
        self.events()
            .unbind(names, callback.map(Callback::id), context);
        self
    }

    /// Removes each `(names, callback)` pair of an event map.
    fn off_map<'n>(
        &self,
        map: impl IntoIterator<Item = (&'n str, Callback<Self::Payload>)>,
    ) -> &Self {
        for (names, callback) in map {
            self.off(Some(names), Some(&callback), None);
        }
        self
    }

    /// Fires the bindings for each of `names`, followed each time by the
    /// bindings under [`ALL`](crate::ALL).
    ///
    /// An empty `names` triggers nothing.
    fn trigger(&self, names: &str, args: &Self::Payload) -> &Self {
        self.events().dispatch(names, args);
        self
    }

    /// Binds `callback` on `other` with this emitter as the context, and
    /// records the relationship so [`stop_listening`](Self::stop_listening)
    /// can undo it.
    ///
    /// Listening to oneself works the same as listening to another object.
    fn listen_to<O: Emitter + ?Sized>(
        &self,
        other: &O,
        names: &str,
        callback: impl Into<Option<Callback<O::Payload>>>,
    ) -> &Self {
        if let Some(callback) = callback.into() {
            self.events()
                .listen(other.events(), names, &callback, false);
        }
        self
    }

    /// Like [`listen_to`](Self::listen_to), with one-shot bindings.
    fn listen_to_once<O: Emitter + ?Sized>(
        &self,
        other: &O,
        names: &str,
        callback: impl Into<Option<Callback<O::Payload>>>,
    ) -> &Self {
        if let Some(callback) = callback.into() {
            self.events()
                .listen(other.events(), names, &callback, true);
        }
        self
    }

    /// Listens to `other` for each pair of an event map.
    fn listen_to_map<'n, O: Emitter + ?Sized>(
        &self,
        other: &O,
        map: impl IntoIterator<Item = (&'n str, Callback<O::Payload>)>,
    ) -> &Self {
        for (names, callback) in map {
            self.listen_to(other, names, callback);
        }
        self
    }

    /// Removes bindings this emitter created with `listen_to` /
    /// `listen_to_once`.
    ///
    /// `other` restricts removal to one listened-to object; `None` applies to
    /// every object this emitter listens to. `names` and `callback` filter as
    /// in [`off`](Self::off). Listening records whose bindings are all gone
    /// are dropped.
    fn stop_listening(
        &self,
        other: Option<ObjectId>,
        names: Option<&str>,
        callback: Option<CallbackId>,
    ) -> &Self {
        self.events().stop(other, names, callback);
        self
    }

    /// Stops listening for each `(names, callback)` pair of an event map.
    fn stop_listening_map<'n>(
        &self,
        other: Option<ObjectId>,
        map: impl IntoIterator<Item = (&'n str, CallbackId)>,
    ) -> &Self {
        for (names, callback) in map {
            self.stop_listening(other, Some(names), Some(callback));
        }
        self
    }
}

impl<A: 'static> Emitter for Events<A> {
    type Payload = A;

    #[inline]
    fn events(&self) -> &Events<A> {
        self
    }
}
