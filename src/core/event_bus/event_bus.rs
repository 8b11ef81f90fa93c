//=========================================================================
// Event Bus
//=========================================================================
//
// Name-keyed synchronous publish/subscribe for action emissions.
//
// Architecture:
//   on/once(name) → HashMap<String, SubscriberList<P>>
//                              ↓
//   emit(name) → snapshot (one-shots dropped) → handlers, in order
//
// Handlers may call back into the bus (subscribe, unsubscribe, emit,
// destroy). The map is never borrowed while a handler runs.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::subscription::{SubscriberList, Subscription, SubscriptionId};

//=== EventBus ============================================================

/// Synchronous name-keyed event bus carrying payloads of type `P`.
pub struct EventBus<P: ?Sized> {
    channels: RefCell<HashMap<String, SubscriberList<P>>>,
    next_id: Cell<u64>,
    generation: Cell<u64>,
}

impl<P: ?Sized> EventBus<P> {
    pub fn new() -> Self {
        Self {
            channels: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
            generation: Cell::new(0),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Subscribes `handler` to every emission of `name`.
    pub fn on<F>(&self, name: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + 'static,
    {
        self.subscribe(name, false, Rc::new(handler))
    }

    /// Subscribes `handler` to the next emission of `name` only.
    pub fn once<F>(&self, name: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&P) + 'static,
    {
        self.subscribe(name, true, Rc::new(handler))
    }

    /// Removes one subscription. Returns `false` if it was not present.
    pub fn off(&self, name: &str, id: SubscriptionId) -> bool {
        let mut channels = self.channels.borrow_mut();
        let Some(list) = channels.get_mut(name) else {
            return false;
        };

        let removed = list.remove(id);
        if list.is_empty() {
            channels.remove(name);
        }
        removed
    }

    fn subscribe(&self, name: &str, once: bool, handler: Rc<dyn Fn(&P)>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        self.channels
            .borrow_mut()
            .entry(name.to_owned())
            .or_insert_with(SubscriberList::new)
            .push(Subscription { id, once, handler });

        id
    }

    //--- Emission ---------------------------------------------------------

    /// Delivers `payload` to the subscribers of `name` present when the
    /// call starts. Returns the number of handlers invoked.
    ///
    /// Handlers subscribed during delivery only see later emissions. A
    /// [`destroy`](Self::destroy) from inside a handler stops delivery.
    pub fn emit(&self, name: &str, payload: &P) -> usize {
        let snapshot = {
            let mut channels = self.channels.borrow_mut();
            let Some(list) = channels.get_mut(name) else {
                return 0;
            };

            let snapshot = list.take_snapshot();
            if list.is_empty() {
                channels.remove(name);
            }
            snapshot
        };

        let generation = self.generation.get();
        let mut delivered = 0;

        for handler in snapshot {
            if self.generation.get() != generation {
                trace!(target: "event_bus", "Bus destroyed while emitting `{}`", name);
                break;
            }
            handler(payload);
            delivered += 1;
        }

        delivered
    }

    //--- Lifecycle --------------------------------------------------------

    /// Removes every subscription. Idempotent.
    pub fn destroy(&self) {
        self.channels.borrow_mut().clear();
        self.generation.set(self.generation.get() + 1);
    }

    //--- Queries ----------------------------------------------------------

    pub fn subscriber_count(&self, name: &str) -> usize {
        self.channels
            .borrow()
            .get(name)
            .map_or(0, SubscriberList::len)
    }

    pub fn has_subscribers(&self, name: &str) -> bool {
        self.subscriber_count(name) > 0
    }
}

impl<P: ?Sized> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = self.channels.borrow();
        let mut names: Vec<_> = channels.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
        names.sort_unstable();

        f.debug_struct("EventBus").field("channels", &names).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&str) -> Box<dyn Fn(&i32)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |tag: &str| -> Box<dyn Fn(&i32)> {
            let sink = Rc::clone(&sink);
            let tag = tag.to_owned();
            Box::new(move |v: &i32| sink.borrow_mut().push(format!("{tag}:{v}")))
        };
        (log, make)
    }

    //=====================================================================
    // on / once / off
    //=====================================================================

    #[test]
    fn emit_without_subscribers_is_a_no_op() {
        let bus = EventBus::<i32>::new();
        assert_eq!(bus.emit("nothing", &1), 0);
    }

    #[test]
    fn delivers_in_subscription_order() {
        let bus = EventBus::<i32>::new();
        let (log, make) = recorder();

        let a = make("a");
        let b = make("b");
        bus.on("tick", move |v| a(v));
        bus.on("tick", move |v| b(v));

        assert_eq!(bus.emit("tick", &5), 2);
        assert_eq!(*log.borrow(), vec!["a:5", "b:5"]);
    }

    #[test]
    fn once_fires_a_single_time() {
        let bus = EventBus::<i32>::new();
        let (log, make) = recorder();

        let a = make("once");
        bus.once("tick", move |v| a(v));

        assert_eq!(bus.emit("tick", &1), 1);
        assert_eq!(bus.emit("tick", &2), 0);
        assert_eq!(*log.borrow(), vec!["once:1"]);
        assert_eq!(bus.subscriber_count("tick"), 0);
    }

    #[test]
    fn off_stops_delivery() {
        let bus = EventBus::<i32>::new();
        let (log, make) = recorder();

        let a = make("a");
        let b = make("b");
        let id = bus.on("tick", move |v| a(v));
        bus.on("tick", move |v| b(v));

        assert!(bus.off("tick", id));
        assert!(!bus.off("tick", id));
        assert!(!bus.off("other", id));

        bus.emit("tick", &3);
        assert_eq!(*log.borrow(), vec!["b:3"]);
    }

    #[test]
    fn channels_are_independent() {
        let bus = EventBus::<i32>::new();
        let (log, make) = recorder();

        let a = make("a");
        bus.on("left", move |v| a(v));

        assert_eq!(bus.emit("right", &1), 0);
        assert!(log.borrow().is_empty());
        assert!(bus.has_subscribers("left"));
        assert!(!bus.has_subscribers("right"));
    }

    //=====================================================================
    // Re-entrancy
    //=====================================================================

    #[test]
    fn subscribing_during_emit_waits_for_next_emission() {
        let bus = Rc::new(EventBus::<i32>::new());
        let hits = Rc::new(Cell::new(0));

        let inner_bus = Rc::clone(&bus);
        let inner_hits = Rc::clone(&hits);
        bus.once("tick", move |_| {
            let hits = Rc::clone(&inner_hits);
            inner_bus.on("tick", move |_| hits.set(hits.get() + 1));
        });

        assert_eq!(bus.emit("tick", &0), 1);
        assert_eq!(hits.get(), 0);

        assert_eq!(bus.emit("tick", &0), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn once_handler_emitting_again_is_not_reinvoked() {
        let bus = Rc::new(EventBus::<i32>::new());
        let calls = Rc::new(Cell::new(0));

        let inner_bus = Rc::clone(&bus);
        let inner_calls = Rc::clone(&calls);
        bus.once("tick", move |v| {
            inner_calls.set(inner_calls.get() + 1);
            if *v == 0 {
                inner_bus.emit("tick", &1);
            }
        });

        bus.emit("tick", &0);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn destroy_inside_handler_stops_delivery() {
        let bus = Rc::new(EventBus::<i32>::new());
        let (log, make) = recorder();

        let inner_bus = Rc::clone(&bus);
        bus.on("tick", move |_| inner_bus.destroy());
        let late = make("late");
        bus.on("tick", move |v| late(v));

        assert_eq!(bus.emit("tick", &1), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(bus.subscriber_count("tick"), 0);
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn destroy_is_idempotent_and_bus_stays_usable() {
        let bus = EventBus::<i32>::new();
        bus.on("tick", |_| {});

        bus.destroy();
        bus.destroy();
        assert_eq!(bus.subscriber_count("tick"), 0);

        bus.on("tick", |_| {});
        assert_eq!(bus.emit("tick", &0), 1);
    }

    #[test]
    fn unsized_payloads_are_supported() {
        let bus = EventBus::<str>::new();
        let seen = Rc::new(RefCell::new(String::new()));

        let sink = Rc::clone(&seen);
        bus.on("say", move |text: &str| sink.borrow_mut().push_str(text));
        bus.emit("say", "hello");

        assert_eq!(*seen.borrow(), "hello");
    }
}
