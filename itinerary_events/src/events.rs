// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared registry handle behind every emitter.

use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::str::SplitAsciiWhitespace;

use smallvec::SmallVec;

use crate::callback::{Callback, Event};
use crate::id::{CallbackId, ObjectId};
use crate::listening::{self, Listenable, ListeningRef, ListeningTable};
use crate::registry::{Binding, Registry};

/// The wildcard event name. Bindings under it fire on every trigger.
pub const ALL: &str = "all";

/// Splits a space-separated list of event names.
pub(crate) fn split_names(names: &str) -> SplitAsciiWhitespace<'_> {
    names.split_ascii_whitespace()
}

/// A reference-counted event registry.
///
/// `Events` is a handle: clones share one registry and one identity. This is
/// what lets a callback capture its emitter and call `on`, `off` or `trigger`
/// on it while it is being dispatched.
///
/// The operations live on the [`Emitter`](crate::Emitter) trait, which
/// `Events` implements directly and which other types implement by
/// returning an `Events` they own.
pub struct Events<A> {
    shared: Rc<Shared<A>>,
}

struct Shared<A> {
    id: ObjectId,
    registry: RefCell<Registry<A>>,
    listening: Rc<ListeningTable>,
}

impl<A> Events<A> {
    /// Creates an empty registry with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                id: ObjectId::next(),
                registry: RefCell::new(Registry::default()),
                listening: Rc::default(),
            }),
        }
    }

    /// Returns the identity of this registry (shared by all clones).
    #[inline]
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.shared.id
    }

    /// Returns `true` if both handles refer to the same registry.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// Returns `true` if at least one binding exists under `name`.
    #[must_use]
    pub fn has_event(&self, name: &str) -> bool {
        self.shared.registry.borrow().contains(name)
    }

    /// Returns the number of bindings under `name`.
    #[must_use]
    pub fn binding_count(&self, name: &str) -> usize {
        self.shared.registry.borrow().len(name)
    }

    /// Returns the bindings under `name`, in dispatch order.
    #[must_use]
    pub fn bindings(&self, name: &str) -> Vec<Rc<Binding<A>>> {
        self.shared.registry.borrow().snapshot(name).into_vec()
    }

    /// Returns every event name with at least one binding, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .shared
            .registry
            .borrow()
            .names()
            .map(String::from)
            .collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` if no bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().is_empty()
    }

    /// Returns the number of objects this emitter is listening to.
    #[must_use]
    pub fn listening_count(&self) -> usize {
        self.shared.listening.borrow().len()
    }

    /// Returns `true` if this emitter holds bindings created with
    /// `listen_to` on the object identified by `other`.
    #[must_use]
    pub fn is_listening_to(&self, other: ObjectId) -> bool {
        self.shared.listening.borrow().contains_key(&other)
    }

    /// Binds `callback` under each name; returns how many bindings were added.
    pub(crate) fn bind(
        &self,
        names: &str,
        callback: &Callback<A>,
        context: Option<ObjectId>,
        once: bool,
        listener: Option<(&Rc<ListeningTable>, ObjectId)>,
    ) -> usize {
        let mut registry = self.shared.registry.borrow_mut();
        let mut bound = 0;
        for name in split_names(names) {
            let listening =
                listener.map(|(table, listener)| ListeningRef::new(table, listener, self.id()));
            let binding = Binding::new(callback.clone(), self.id(), context, once, listening);
            registry.add(name, Rc::new(binding));
            bound += 1;
        }
        tracing::trace!(emitter = %self.id(), names, bound, once, "bind");
        bound
    }

    pub(crate) fn unbind(
        &self,
        names: Option<&str>,
        callback: Option<CallbackId>,
        context: Option<ObjectId>,
    ) {
        self.shared.unbind(names, callback, context);
    }

    /// Fires every binding under each of `names`, then the wildcard bindings.
    pub(crate) fn dispatch(&self, names: &str, args: &A) {
        for name in split_names(names) {
            // Both lists are captured before anything fires: bindings added
            // during this pass wait for the next trigger, bindings removed
            // during it still fire.
            let (named, wildcard) = {
                let registry = self.shared.registry.borrow();
                (registry.snapshot(name), registry.snapshot(ALL))
            };
            tracing::trace!(
                emitter = %self.id(),
                event = name,
                bindings = named.len(),
                wildcard = wildcard.len(),
                "trigger"
            );
            self.fire(name, name, &named, args);
            self.fire(ALL, name, &wildcard, args);
        }
    }

    fn fire(&self, list: &str, name: &str, bindings: &[Rc<Binding<A>>], args: &A) {
        for binding in bindings {
            if binding.is_once() {
                if !binding.claim() {
                    continue;
                }
                let removed = self.shared.registry.borrow_mut().remove_exact(list, binding);
                if let Some(removed) = removed {
                    removed.release();
                }
            }
            binding
                .callback()
                .call(&Event::new(name, binding.ctx(), args));
        }
    }
}

impl<A: 'static> Events<A> {
    /// Binds `callback` on `target` with this emitter as context and records
    /// the relationship in this emitter's listening table.
    pub(crate) fn listen<B: 'static>(
        &self,
        target: &Events<B>,
        names: &str,
        callback: &Callback<B>,
        once: bool,
    ) {
        listening::retain(
            &self.shared.listening,
            target.id(),
            || target.erased(),
            split_names(names).count(),
        );
        target.bind(
            names,
            callback,
            Some(self.id()),
            once,
            Some((&self.shared.listening, self.id())),
        );
    }

    /// Removes bindings this emitter created through `listen_to`.
    pub(crate) fn stop(
        &self,
        other: Option<ObjectId>,
        names: Option<&str>,
        callback: Option<CallbackId>,
    ) {
        let targets: SmallVec<[(ObjectId, Weak<dyn Listenable>); 4]> = self
            .shared
            .listening
            .borrow()
            .iter()
            .filter(|(id, _)| other.is_none_or(|other| **id == other))
            .map(|(id, record)| (*id, Weak::clone(&record.target)))
            .collect();

        for (id, target) in targets {
            match target.upgrade() {
                Some(target) => target.unbind_listener(names, callback, self.id()),
                None => {
                    self.shared.listening.borrow_mut().remove(&id);
                }
            }
        }
    }

    fn erased(&self) -> Weak<dyn Listenable> {
        let shared: Rc<dyn Listenable> = self.shared.clone();
        Rc::downgrade(&shared)
    }
}

impl<A> Shared<A> {
    fn unbind(
        &self,
        names: Option<&str>,
        callback: Option<CallbackId>,
        context: Option<ObjectId>,
    ) {
        let mut removed = Vec::new();
        {
            let mut registry = self.registry.borrow_mut();
            if names.is_none() && callback.is_none() && context.is_none() {
                registry.drain(&mut removed);
            } else {
                registry.remove_matching(names.map(split_names), callback, context, &mut removed);
            }
        }
        if !removed.is_empty() {
            tracing::trace!(emitter = %self.id, removed = removed.len(), "unbind");
        }
        for binding in &removed {
            binding.release();
        }
    }
}

impl<A> Listenable for Shared<A> {
    fn unbind_listener(
        &self,
        names: Option<&str>,
        callback: Option<CallbackId>,
        listener: ObjectId,
    ) {
        self.unbind(names, callback, Some(listener));
    }
}

impl<A> Default for Events<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for Events<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for Events<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Events");
        s.field("id", &self.shared.id);
        if let Ok(registry) = self.shared.registry.try_borrow() {
            s.field("events", &registry.names().count());
        }
        if let Ok(listening) = self.shared.listening.try_borrow() {
            s.field("listening", &listening.len());
        }
        s.finish_non_exhaustive()
    }
}
