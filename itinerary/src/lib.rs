// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Itinerary: a minimal pattern-based path router.
//!
//! ## Overview
//!
//! A [`Router`] holds an ordered list of routes. Each route is a compiled
//! [`RoutePattern`], an optional name, and usually a handler. When the
//! navigation source reports a new path, [`Router::navigate`] tries the routes
//! in registration order; the first one that matches runs its handler with the
//! captured parameters, and the router then announces the navigation through
//! its own [`events`] capability:
//!
//! - `route` with a [`RouteEvent`] carrying the route name and parameters, then
//! - `route:<name>` with the same payload, if the route is named.
//!
//! A path that matches nothing runs nothing and fires nothing.
//!
//! Patterns support `:name` (one segment), `*name` (the rest of the path) and
//! `( ... )` optional groups; see [`pattern`] for the grammar. Patterns compile
//! when a route is added, so a malformed one is reported by
//! [`Router::add_route`] rather than at navigation time.
//!
//! [`history::MemoryHistory`] is an in-memory navigation source with a
//! back/forward stack, useful for tests and for non-browser hosts.
//!
//! ## Quick Start
//!
//! ```rust
//! use core::cell::RefCell;
//! use std::rc::Rc;
//! use itinerary::{RouteEvent, Router};
//! use itinerary::events::{Callback, Emitter};
//!
//! let router = Router::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! router
//!     .add_route("search/:query(/p:page)", Some("search"), |_| {})
//!     .unwrap();
//!
//! let sink = Rc::clone(&seen);
//! router.on(
//!     "route",
//!     Callback::<RouteEvent>::new(move |ev| sink.borrow_mut().push(ev.args().clone())),
//! );
//!
//! router.navigate("search/rust/p2");
//! router.navigate("nowhere");
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     [RouteEvent {
//!         name: Some("search".to_owned()),
//!         params: vec![Some("rust".to_owned()), Some("2".to_owned())],
//!     }]
//! );
//! ```
//!
//! ## Features
//!
//! - `decode` (default): percent-decode captured parameter values.
//! - `std`: enable `std` support in dependencies.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. Like the event capability it is
//! built on, it is single-threaded: routers are `!Send`.

#![no_std]

extern crate alloc;

pub use itinerary_events as events;

mod error;
pub mod history;
pub mod pattern;
mod router;

pub use error::PatternError;
pub use pattern::{Params, RoutePattern};
pub use router::{Handler, ROUTE, RouteEntry, RouteEvent, RouteMatch, Router};

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
