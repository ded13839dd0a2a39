//! Explicit change notification for the ingredient collection.
//!
//! The original design leaned on the store's implicit reactivity. Here the
//! database wrapper publishes a [`Change`] after every committed transaction
//! and observers re-derive their projections when they drain their
//! [`Subscription`].

use std::{
    collections::VecDeque,
    sync::{Arc, Weak},
};

use parking_lot::Mutex;

/// A single committed mutation, identified by the affected ingredient's UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Inserted(u64),
    Updated(u64),
    Removed(u64),
}

/// Fan-out point for committed changes. Owned by the database wrapper.
#[derive(Debug, Default)]
pub(crate) struct Notifier {
    queues: Mutex<Vec<Weak<Mutex<VecDeque<Change>>>>>,
}

impl Notifier {
    pub fn subscribe(&self) -> Subscription {
        let queue = Arc::new(Mutex::new(VecDeque::new()));
        self.queues.lock().push(Arc::downgrade(&queue));

        Subscription { queue }
    }

    /// Queue `change` on every live subscription, pruning dropped ones.
    pub fn notify(&self, change: Change) {
        self.queues.lock().retain(|queue| match queue.upgrade() {
            Some(queue) => {
                queue.lock().push_back(change);
                true
            }
            None => false,
        });
    }
}

/// An observer's queue of pending changes, in commit order.
///
/// Dropping the subscription unregisters it.
#[derive(Debug)]
pub struct Subscription {
    queue: Arc<Mutex<VecDeque<Change>>>,
}

impl Subscription {
    /// Take all pending changes, oldest first.
    pub fn drain(&self) -> Vec<Change> {
        self.queue.lock().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }
}
