// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity tokens for emitters, contexts and callbacks.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an emitter or of an invocation context.
///
/// Every [`Events`](crate::Events) registry owns one. Code that wants to use a
/// plain value as a binding context (for later removal by context) allocates
/// its own with [`ObjectId::next`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocates a fresh identity that compares unequal to every other one.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric id.
    #[inline]
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// Type-erased identity of a [`Callback`](crate::Callback).
///
/// Clones of a callback share its id, so the id can stand in for the callback
/// when removing bindings from an emitter whose payload type is unknown
/// (see [`Emitter::stop_listening`](crate::Emitter::stop_listening)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

impl CallbackId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
    }
}
