//=========================================================================
// Subscriptions
//=========================================================================
//
// Handler records stored per event name, plus the ids handed back to
// subscribers so they can unsubscribe later.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::rc::Rc;

//=== SubscriptionId ======================================================

/// Opaque handle returned by `on` / `once`, accepted by `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(super) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

//=== Subscription ========================================================

pub(super) type Handler<P> = Rc<dyn Fn(&P)>;

/// A stored handler. One-shot handlers are dropped when an emission starts.
pub(super) struct Subscription<P: ?Sized> {
    pub id: SubscriptionId,
    pub once: bool,
    pub handler: Handler<P>,
}

//=== SubscriberList ======================================================

/// Ordered handlers of one event name.
pub(super) struct SubscriberList<P: ?Sized> {
    entries: Vec<Subscription<P>>,
}

impl<P: ?Sized> SubscriberList<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, subscription: Subscription<P>) {
        self.entries.push(subscription);
    }

    /// Removes `id`; returns whether it was present.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() != before
    }

    /// Returns the handlers to invoke for one emission and keeps only the
    /// persistent ones for the next.
    pub fn take_snapshot(&mut self) -> Vec<Handler<P>> {
        let snapshot = self.entries.iter().map(|s| Rc::clone(&s.handler)).collect();
        self.entries.retain(|s| !s.once);
        snapshot
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
