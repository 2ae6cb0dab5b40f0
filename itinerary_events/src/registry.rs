// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-emitter event registry.
//!
//! Maps event names to their bindings in insertion order, which is also
//! dispatch order. A name whose last binding is removed is dropped from the
//! map rather than left with an empty list.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::callback::Callback;
use crate::id::{CallbackId, ObjectId};
use crate::listening::ListeningRef;

/// Bindings captured for one dispatch pass.
pub(crate) type Snapshot<A> = SmallVec<[Rc<Binding<A>>; 4]>;

/// One callback bound under one event name.
pub struct Binding<A> {
    callback: Callback<A>,
    ctx: ObjectId,
    context: Option<ObjectId>,
    /// `Some(fired)` for one-shot bindings.
    once: Option<Cell<bool>>,
    listening: Option<ListeningRef>,
}

impl<A> Binding<A> {
    pub(crate) fn new(
        callback: Callback<A>,
        owner: ObjectId,
        context: Option<ObjectId>,
        once: bool,
        listening: Option<ListeningRef>,
    ) -> Self {
        Self {
            callback,
            ctx: context.unwrap_or(owner),
            context,
            once: once.then(|| Cell::new(false)),
            listening,
        }
    }

    /// The callback this binding invokes.
    #[must_use]
    pub fn callback(&self) -> &Callback<A> {
        &self.callback
    }

    /// The effective invocation context.
    #[must_use]
    pub fn ctx(&self) -> ObjectId {
        self.ctx
    }

    /// The explicit context, if one was supplied when binding.
    #[must_use]
    pub fn context(&self) -> Option<ObjectId> {
        self.context
    }

    /// Whether this binding removes itself after its first invocation.
    #[must_use]
    pub fn is_once(&self) -> bool {
        self.once.is_some()
    }

    /// The listener that created this binding through `listen_to`, if any.
    #[must_use]
    pub fn listener(&self) -> Option<ObjectId> {
        self.listening.as_ref().map(ListeningRef::listener)
    }

    /// Marks a one-shot binding as fired; returns `false` if it already was.
    pub(crate) fn claim(&self) -> bool {
        match &self.once {
            Some(fired) => !fired.replace(true),
            None => true,
        }
    }

    pub(crate) fn matches(
        &self,
        callback: Option<CallbackId>,
        context: Option<ObjectId>,
    ) -> bool {
        callback.is_none_or(|id| self.callback.id() == id)
            && context.is_none_or(|ctx| self.context == Some(ctx))
    }

    /// Drops the listening bookkeeping held for this binding.
    pub(crate) fn release(&self) {
        if let Some(listening) = &self.listening {
            listening.release();
        }
    }
}

impl<A> fmt::Debug for Binding<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("callback", &self.callback)
            .field("ctx", &self.ctx)
            .field("context", &self.context)
            .field("once", &self.is_once())
            .field("listener", &self.listener())
            .finish()
    }
}

pub(crate) struct Registry<A> {
    events: HashMap<String, Vec<Rc<Binding<A>>>>,
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
        }
    }
}

impl<A> Registry<A> {
    pub(crate) fn add(&mut self, name: &str, binding: Rc<Binding<A>>) {
        match self.events.get_mut(name) {
            Some(list) => list.push(binding),
            None => {
                self.events.insert(String::from(name), alloc::vec![binding]);
            }
        }
    }

    pub(crate) fn snapshot(&self, name: &str) -> Snapshot<A> {
        self.events
            .get(name)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes exactly `binding` from `name`.
    pub(crate) fn remove_exact(
        &mut self,
        name: &str,
        binding: &Rc<Binding<A>>,
    ) -> Option<Rc<Binding<A>>> {
        let list = self.events.get_mut(name)?;
        let index = list.iter().position(|b| Rc::ptr_eq(b, binding))?;
        let removed = list.remove(index);
        if list.is_empty() {
            self.events.remove(name);
        }
        Some(removed)
    }

    /// Removes every binding under `names` (all names when `None`) matching
    /// the callback and context filters, appending them to `removed`.
    pub(crate) fn remove_matching<'n>(
        &mut self,
        names: Option<impl Iterator<Item = &'n str>>,
        callback: Option<CallbackId>,
        context: Option<ObjectId>,
        removed: &mut Vec<Rc<Binding<A>>>,
    ) {
        let mut retain = |list: &mut Vec<Rc<Binding<A>>>| {
            list.retain(|b| {
                if b.matches(callback, context) {
                    removed.push(Rc::clone(b));
                    false
                } else {
                    true
                }
            });
            !list.is_empty()
        };
        match names {
            Some(names) => {
                for name in names {
                    if let Some(list) = self.events.get_mut(name) {
                        if !retain(list) {
                            self.events.remove(name);
                        }
                    }
                }
            }
            None => self.events.retain(|_, list| retain(list)),
        }
    }

    pub(crate) fn drain(&mut self, removed: &mut Vec<Rc<Binding<A>>>) {
        for (_, list) in self.events.drain() {
            removed.extend(list);
        }
    }

    pub(crate) fn len(&self, name: &str) -> usize {
        self.events.get(name).map_or(0, Vec::len)
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
