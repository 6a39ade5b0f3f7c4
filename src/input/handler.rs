//! Listener registries with scoped subscription handles.
//!
//! Everything here is single-threaded: hubs are shared through `Rc` and a
//! [`Subscription`] releases its listener when dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Event listener callback type
pub type EventCallback<E> = Rc<dyn Fn(&E)>;

struct HubInner<K, E> {
    next_id: u64,
    listeners: BTreeMap<u64, (K, EventCallback<E>)>,
}

/// Registry of listeners keyed by event kind
pub struct EventHub<K, E> {
    inner: Rc<RefCell<HubInner<K, E>>>,
}

impl<K, E> Clone for EventHub<K, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<K, E> Default for EventHub<K, E> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }
}

impl<K, E> std::fmt::Debug for EventHub<K, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.len())
            .finish()
    }
}

impl<K: PartialEq + 'static, E: 'static> EventHub<K, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it stays active as long as the returned handle lives
    pub fn subscribe<F>(&self, kind: K, callback: F) -> Subscription
    where
        F: Fn(&E) + 'static,
    {
        self.subscribe_shared(kind, Rc::new(callback))
    }

    /// Register a callback that may be shared with other hubs
    pub fn subscribe_shared(&self, kind: K, callback: EventCallback<E>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, (kind, callback));
            id
        };
        let weak: Weak<RefCell<HubInner<K, E>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.remove(&id);
            }
        })
    }

    /// Call every listener registered for `kind`, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being called.
    pub fn emit(&self, kind: &K, event: &E) -> usize {
        let callbacks: Vec<EventCallback<E>> = self
            .inner
            .borrow()
            .listeners
            .values()
            .filter(|(k, _)| k == kind)
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    pub fn listener_count(&self, kind: &K) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|(k, _)| k == kind)
            .count()
    }
}

impl<K, E> EventHub<K, E> {
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().listeners.clear();
    }
}

/// Handle to a registered listener; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new<F: FnOnce() + 'static>(release: F) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Explicitly release the listener
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    /// Keep the listener registered for the lifetime of its hub
    pub fn detach(mut self) {
        self.release = None;
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_by_kind() {
        let hub: EventHub<&'static str, u32> = EventHub::new();
        let total = Rc::new(Cell::new(0));

        let t = Rc::clone(&total);
        let _a = hub.subscribe("click", move |v| t.set(t.get() + v));
        let t = Rc::clone(&total);
        let _b = hub.subscribe("move", move |v| t.set(t.get() + 100 * v));

        assert_eq!(hub.emit(&"click", &2), 1);
        assert_eq!(total.get(), 2);
        assert_eq!(hub.listener_count(&"move"), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub: EventHub<(), ()> = EventHub::new();
        let sub = hub.subscribe((), |_| {});
        assert_eq!(hub.len(), 1);
        drop(sub);
        assert!(hub.is_empty());

        hub.subscribe((), |_| {}).detach();
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let hub: EventHub<(), ()> = EventHub::new();
        let sub = hub.subscribe((), |_| {});
        drop(hub);
        sub.unsubscribe();
    }
}
