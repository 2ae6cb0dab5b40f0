// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Itinerary Events: a synchronous, `no_std` publish/subscribe capability.
//!
//! ## Overview
//!
//! An [`Events`] registry maps event names to ordered callback bindings. The
//! [`Emitter`] trait provides the operations on top of it, so any type that
//! owns an `Events` gains them by implementing a single accessor rather than
//! by inheriting from a base type.
//!
//! - [`Emitter::on`] / [`Emitter::once`]: bind a [`Callback`] under one or more
//!   space-separated names (or from an event map).
//! - [`Emitter::off`]: remove bindings by name, callback and explicit context.
//! - [`Emitter::trigger`]: fire the bindings for each name, then the wildcard
//!   [`ALL`] bindings, which see the triggered name via [`Event::name`].
//! - [`Emitter::listen_to`] / [`Emitter::stop_listening`]: bind on *another*
//!   emitter while keeping enough bookkeeping to undo every such binding later.
//!
//! ## Quick Start
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//! use itinerary_events::{ALL, Callback, Emitter, Events};
//!
//! let events = Events::<()>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let log = Rc::clone(&seen);
//! events.on(ALL, Callback::new(move |ev| log.borrow_mut().push(ev.name().to_owned())));
//! events.trigger("open close", &());
//!
//! assert_eq!(*seen.borrow(), ["open", "close"]);
//! ```
//!
//! ## Dispatch Semantics
//!
//! - Dispatch order is binding order.
//! - A trigger pass snapshots the bindings before running any of them.
//!   Callbacks added during the pass do not run in it; callbacks removed
//!   during it still do (a one-shot binding that already fired excepted).
//! - No registry borrow is held while user code runs, so callbacks can freely
//!   re-enter the emitter, and a panic leaves the registry consistent.
//! - A name whose last binding is removed disappears from the registry.
//!
//! ## Listening
//!
//! `a.listen_to(&b, ...)` binds on `b` with `a`'s id as context, and counts
//! the binding in `a`'s listening table. Every time such a binding leaves
//! `b` (through `off`, a one-shot firing or `stop_listening`) the count drops;
//! at zero the record is deleted, so `a.stop_listening(None, None, None)`
//! always leaves `a` listening to nothing. Records hold weak references only.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It is single-threaded:
//! emitters are `!Send`.

#![no_std]

extern crate alloc;

mod callback;
mod emitter;
mod events;
mod id;
mod listening;
mod registry;

pub use callback::{Callback, Event};
pub use emitter::Emitter;
pub use events::{ALL, Events};
pub use id::{CallbackId, ObjectId};
pub use registry::Binding;
