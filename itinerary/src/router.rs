// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! First-match path router.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use itinerary_events::{Emitter, Events};

use crate::error::PatternError;
use crate::pattern::{Params, RoutePattern};

/// Event fired on every successful navigation.
pub const ROUTE: &str = "route";

/// Receives the captured parameters of a matched route.
pub type Handler = Rc<dyn Fn(&[Option<String>])>;

/// Payload of the `route` and `route:<name>` events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteEvent {
    /// Name of the matched route, if it has one.
    pub name: Option<String>,
    /// Captured parameter values, in placeholder order.
    pub params: Params,
}

/// One registered route.
pub struct RouteEntry {
    pattern: RoutePattern,
    name: Option<String>,
    handler: Option<Handler>,
}

impl RouteEntry {
    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The route name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a handler runs when this route matches.
    #[must_use]
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// The route that matched a path, with its captured parameters.
#[derive(Clone)]
pub struct RouteMatch {
    entry: Rc<RouteEntry>,
    params: Params,
}

impl RouteMatch {
    /// The matched route's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.entry.name()
    }

    /// The matched route's pattern.
    #[must_use]
    pub fn pattern(&self) -> &RoutePattern {
        &self.entry.pattern
    }

    /// All captured values, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[Option<String>] {
        &self.params
    }

    /// Returns the value captured by the first placeholder called `name`.
    ///
    /// `None` if there is no such placeholder or it did not take part in the
    /// match.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        let index = self
            .entry
            .pattern
            .param_names()
            .iter()
            .position(|n| n == name)?;
        self.params.get(index)?.as_deref()
    }

    /// Consumes the match, returning the captured values.
    #[must_use]
    pub fn into_params(self) -> Params {
        self.params
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.entry.pattern.as_str())
            .field("name", &self.entry.name)
            .field("params", &self.params)
            .finish()
    }
}

/// An ordered list of routes plus the event capability they report through.
///
/// `Router` is a handle; clones share routes and listeners, so handlers can
/// capture the router and call back into it. Routes are tried in registration
/// order and the first match wins, whatever its specificity.
///
/// Every successful [`navigate`](Self::navigate) runs the route's handler and
/// then triggers [`ROUTE`] and, for a named route, `route:<name>`, both with a
/// [`RouteEvent`]. Route names are used as event names, so they should not
/// contain whitespace.
///
/// ```rust
/// use core::cell::RefCell;
/// use std::rc::Rc;
/// use itinerary::{RouteEvent, Router};
/// use itinerary::events::{Callback, Emitter};
///
/// let router = Router::new();
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let sink = Rc::clone(&log);
/// router
///     .add_route("users/:id", Some("user"), move |params| {
///         sink.borrow_mut().push(format!("handler {:?}", params[0]));
///     })
///     .unwrap();
///
/// let sink = Rc::clone(&log);
/// router.on(
///     "route:user",
///     Callback::<RouteEvent>::new(move |ev| {
///         sink.borrow_mut().push(format!("event {:?}", ev.args().params[0]));
///     }),
/// );
///
/// let matched = router.navigate("users/42").unwrap();
/// assert_eq!(matched.param("id"), Some("42"));
/// assert_eq!(
///     *log.borrow(),
///     ["handler Some(\"42\")", "event Some(\"42\")"]
/// );
/// ```
#[derive(Clone, Default)]
pub struct Router {
    events: Events<RouteEvent>,
    routes: Rc<RefCell<Vec<Rc<RouteEntry>>>>,
}

impl Router {
    /// Creates a router with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern` and appends a route that runs `handler` on a match.
    ///
    /// Registering the same pattern again is allowed; the earlier route keeps
    /// winning.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if `pattern` does not compile; no route is
    /// added.
    pub fn add_route(
        &self,
        pattern: &str,
        name: Option<&str>,
        handler: impl Fn(&[Option<String>]) + 'static,
    ) -> Result<&Self, PatternError> {
        let pattern = RoutePattern::parse(pattern)?;
        tracing::debug!(pattern = pattern.as_str(), name = ?name, "route added");
        let handler: Handler = Rc::new(handler);
        self.routes.borrow_mut().push(Rc::new(RouteEntry {
            pattern,
            name: name.map(String::from),
            handler: Some(handler),
        }));
        Ok(self)
    }

    /// Appends handler-less named routes, observed through their
    /// `route:<name>` events.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`]; in that case none of the routes
    /// are added.
    pub fn add_routes<'a>(
        &self,
        routes: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<&Self, PatternError> {
        let compiled = routes
            .into_iter()
            .map(|(pattern, name)| {
                Ok(Rc::new(RouteEntry {
                    pattern: RoutePattern::parse(pattern)?,
                    name: Some(String::from(name)),
                    handler: None,
                }))
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        for entry in &compiled {
            tracing::debug!(pattern = entry.pattern.as_str(), name = ?entry.name(), "route added");
        }
        self.routes.borrow_mut().extend(compiled);
        Ok(self)
    }

    /// Removes every route registered with exactly `pattern`; returns how
    /// many were removed.
    pub fn remove_route(&self, pattern: &str) -> usize {
        let mut routes = self.routes.borrow_mut();
        let before = routes.len();
        routes.retain(|entry| entry.pattern.as_str() != pattern);
        let removed = before - routes.len();
        if removed > 0 {
            tracing::debug!(pattern, removed, "route removed");
        }
        removed
    }

    /// Returns the registered routes in match order.
    #[must_use]
    pub fn routes(&self) -> Vec<Rc<RouteEntry>> {
        self.routes.borrow().clone()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.borrow().len()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.borrow().is_empty()
    }

    /// Finds the first route matching `path`.
    ///
    /// Runs no handlers and fires no events.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.routes.borrow().iter().find_map(|entry| {
            entry.pattern.captures(path).map(|params| RouteMatch {
                entry: Rc::clone(entry),
                params,
            })
        })
    }

    /// Dispatches `path`: runs the first matching route's handler, then
    /// triggers [`ROUTE`] and `route:<name>`.
    ///
    /// Returns the match, or `None` if no route matches; an unmatched path
    /// runs nothing and fires nothing. Handlers and listeners may register
    /// routes or navigate again; those changes apply from the next lookup. A
    /// panicking handler unwinds to the caller.
    pub fn navigate(&self, path: &str) -> Option<RouteMatch> {
        let Some(matched) = self.match_path(path) else {
            tracing::debug!(path, "no route matched");
            return None;
        };
        tracing::debug!(
            path,
            pattern = matched.pattern().as_str(),
            name = ?matched.name(),
            "route matched"
        );

        if let Some(handler) = &matched.entry.handler {
            handler(&matched.params);
        }

        let event = RouteEvent {
            name: matched.entry.name.clone(),
            params: matched.params.clone(),
        };
        self.trigger(ROUTE, &event);
        if let Some(name) = matched.name() {
            self.trigger(&format!("{ROUTE}:{name}"), &event);
        }
        Some(matched)
    }
}

impl Emitter for Router {
    type Payload = RouteEvent;

    fn events(&self) -> &Events<RouteEvent> {
        &self.events
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Router");
        s.field("events", &self.events);
        if let Ok(routes) = self.routes.try_borrow() {
            s.field("routes", &routes.len());
        }
        s.finish_non_exhaustive()
    }
}
