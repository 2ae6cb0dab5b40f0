// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener-side bookkeeping for `listen_to` / `stop_listening`.
//!
//! A listener keeps one [`ListeningRecord`] per object it listens to, counting
//! the bindings it created there. Each of those bindings carries a
//! [`ListeningRef`] back to the listener's table; when the binding leaves its
//! registry for any reason the count drops, and the record goes away at zero.
//!
//! Both directions are weak: neither side keeps the other alive.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::id::{CallbackId, ObjectId};

/// Type-erased view of a listened-to registry, so a listener can reach it
/// without knowing its payload type.
pub(crate) trait Listenable {
    /// Removes bindings whose explicit context is `listener`.
    fn unbind_listener(
        &self,
        names: Option<&str>,
        callback: Option<CallbackId>,
        listener: ObjectId,
    );
}

pub(crate) struct ListeningRecord {
    pub(crate) target: Weak<dyn Listenable>,
    pub(crate) count: usize,
}

pub(crate) type ListeningTable = RefCell<HashMap<ObjectId, ListeningRecord>>;

/// Back-reference from a binding to the record that counts it.
pub(crate) struct ListeningRef {
    table: Weak<ListeningTable>,
    listener: ObjectId,
    target: ObjectId,
}

impl ListeningRef {
    pub(crate) fn new(table: &Rc<ListeningTable>, listener: ObjectId, target: ObjectId) -> Self {
        Self {
            table: Rc::downgrade(table),
            listener,
            target,
        }
    }

    pub(crate) fn listener(&self) -> ObjectId {
        self.listener
    }

    pub(crate) fn release(&self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.borrow_mut();
        if let Entry::Occupied(mut record) = table.entry(self.target) {
            let count = &mut record.get_mut().count;
            *count = count.saturating_sub(1);
            if *count == 0 {
                record.remove();
                tracing::trace!(
                    listener = %self.listener,
                    target = %self.target,
                    "listening record dropped"
                );
            }
        }
    }
}

/// Adds `bound` bindings to the record for `target_id`, creating it if needed.
pub(crate) fn retain(
    table: &ListeningTable,
    target_id: ObjectId,
    target: impl FnOnce() -> Weak<dyn Listenable>,
    bound: usize,
) {
    if bound == 0 {
        return;
    }
    table
        .borrow_mut()
        .entry(target_id)
        .or_insert_with(|| ListeningRecord {
            target: target(),
            count: 0,
        })
        .count += bound;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl Listenable for Nothing {
        fn unbind_listener(&self, _: Option<&str>, _: Option<CallbackId>, _: ObjectId) {}
    }

    #[test]
    fn release_counts_down_and_removes_at_zero() {
        let table: Rc<ListeningTable> = Rc::default();
        let listener = ObjectId::next();
        let target = ObjectId::next();
        let erased: Rc<dyn Listenable> = Rc::new(Nothing);

        retain(&table, target, || Rc::downgrade(&erased), 2);
        assert_eq!(table.borrow()[&target].count, 2);

        let r = ListeningRef::new(&table, listener, target);
        r.release();
        assert_eq!(table.borrow()[&target].count, 1);
        r.release();
        assert!(table.borrow().is_empty());

        // Releasing against a missing record is a no-op.
        r.release();
        assert!(table.borrow().is_empty());
    }

    #[test]
    fn release_after_listener_dropped_is_a_no_op() {
        let table: Rc<ListeningTable> = Rc::default();
        let r = ListeningRef::new(&table, ObjectId::next(), ObjectId::next());
        drop(table);
        r.release();
    }
}
