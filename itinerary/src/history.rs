// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory navigation source.
//!
//! [`MemoryHistory`] plays the part a browser's location and history play for
//! a client-side router: it keeps a stack of visited fragments with a cursor,
//! and tells its [`Router`] when the current fragment changes.
//!
//! ```rust
//! use itinerary::Router;
//! use itinerary::history::{MemoryHistory, NavigateOptions};
//!
//! let router = Router::new();
//! router.add_routes([("", "home"), ("inbox/:id", "message")]).unwrap();
//!
//! let history = MemoryHistory::with_root(router, "/app/");
//! let shown = history.navigate("/app/inbox/7", NavigateOptions::TRIGGER).unwrap();
//! assert_eq!(shown.name(), Some("message"));
//! assert_eq!(history.fragment(), "inbox/7");
//!
//! let back = history.back().unwrap();
//! assert_eq!(back.name(), Some("home"));
//! ```

use alloc::borrow::ToOwned;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use crate::router::{RouteMatch, Router};

/// How [`MemoryHistory::navigate`] records and reports a change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Dispatch the new fragment to the router.
    pub trigger: bool,
    /// Overwrite the current entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Push and dispatch.
    pub const TRIGGER: Self = Self {
        trigger: true,
        replace: false,
    };

    /// Overwrite the current entry and dispatch.
    pub const REPLACE: Self = Self {
        trigger: true,
        replace: true,
    };
}

struct State {
    entries: Vec<String>,
    cursor: usize,
}

impl State {
    fn current(&self) -> &str {
        self.entries.get(self.cursor).map_or("", String::as_str)
    }
}

/// A fragment stack driving a [`Router`].
///
/// A handle: clones share the stack, so a route handler holding a clone can
/// redirect by calling [`navigate`](Self::navigate). No borrow is held while
/// the router dispatches.
#[derive(Clone)]
pub struct MemoryHistory {
    router: Router,
    root: Rc<str>,
    state: Rc<RefCell<State>>,
}

impl MemoryHistory {
    /// Starts at the empty fragment with no root.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self::with_root(router, "")
    }

    /// Starts at the empty fragment; `root` is stripped from the front of
    /// every URL passed to [`navigate`](Self::navigate).
    ///
    /// Surrounding slashes on `root` are ignored, so `"/app/"` and `"app"`
    /// are the same root.
    #[must_use]
    pub fn with_root(router: Router, root: &str) -> Self {
        Self {
            router,
            root: Rc::from(root.trim_matches('/')),
            state: Rc::new(RefCell::new(State {
                entries: vec![String::new()],
                cursor: 0,
            })),
        }
    }

    /// The router this history drives.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// The current fragment.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.state.borrow().current().to_owned()
    }

    /// Every recorded fragment, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.state.borrow().entries.clone()
    }

    /// Returns `true` if [`back`](Self::back) would move.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.state.borrow().cursor > 0
    }

    /// Returns `true` if [`forward`](Self::forward) would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        let state = self.state.borrow();
        state.cursor + 1 < state.entries.len()
    }

    /// Reduces a URL to the fragment the router sees.
    ///
    /// Trailing whitespace, one leading `#` or `/` and the root prefix are
    /// removed.
    #[must_use]
    pub fn normalize(&self, url: &str) -> String {
        let mut fragment = url.trim_end();
        fragment = fragment.strip_prefix(['#', '/']).unwrap_or(fragment);
        if !self.root.is_empty()
            && let Some(rest) = fragment.strip_prefix(&*self.root)
            && (rest.is_empty() || rest.starts_with('/'))
        {
            fragment = rest.strip_prefix('/').unwrap_or(rest);
        }
        fragment.to_owned()
    }

    /// Records `url` as the current location.
    ///
    /// Navigating to the current fragment does nothing. Otherwise any forward
    /// entries are discarded and the fragment is pushed (or replaces the
    /// current entry). With [`NavigateOptions::trigger`] the router then
    /// dispatches it, and the match is returned.
    pub fn navigate(&self, url: &str, options: NavigateOptions) -> Option<RouteMatch> {
        let fragment = self.normalize(url);
        {
            let mut state = self.state.borrow_mut();
            if state.current() == fragment {
                tracing::trace!(fragment = %fragment, "navigation to current fragment ignored");
                return None;
            }
            let cursor = state.cursor;
            if options.replace {
                state.entries.truncate(cursor);
            } else {
                state.entries.truncate(cursor + 1);
                state.cursor += 1;
            }
            state.entries.push(fragment.clone());
        }
        tracing::debug!(fragment = %fragment, replace = options.replace, "navigate");

        if options.trigger {
            self.router.navigate(&fragment)
        } else {
            None
        }
    }

    /// Steps back one entry and dispatches it.
    ///
    /// Returns `None` without dispatching if there is nothing to go back to.
    pub fn back(&self) -> Option<RouteMatch> {
        let fragment = {
            let mut state = self.state.borrow_mut();
            state.cursor = state.cursor.checked_sub(1)?;
            state.current().to_owned()
        };
        self.router.navigate(&fragment)
    }

    /// Steps forward one entry and dispatches it.
    ///
    /// Returns `None` without dispatching if there is nothing ahead.
    pub fn forward(&self) -> Option<RouteMatch> {
        let fragment = {
            let mut state = self.state.borrow_mut();
            if state.cursor + 1 >= state.entries.len() {
                return None;
            }
            state.cursor += 1;
            state.current().to_owned()
        };
        self.router.navigate(&fragment)
    }

    /// Dispatches the current fragment again.
    pub fn load_url(&self) -> Option<RouteMatch> {
        let fragment = self.fragment();
        self.router.navigate(&fragment)
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("MemoryHistory");
        s.field("root", &self.root);
        if let Ok(state) = self.state.try_borrow() {
            s.field("entries", &state.entries);
            s.field("cursor", &state.cursor);
        }
        s.finish_non_exhaustive()
    }
}
