//! Jump broadcaster.
//!
//! Holds the set of handles that want to hear about the avatar's jump.
//! Membership is a plain set: subscribing twice or unsubscribing a missing
//! handle changes nothing. Delivery order is unspecified; each subscriber
//! reacts only to itself.

use std::hash::Hash;

use ahash::AHashSet;
use tracing::trace;

/// Publish/subscribe registry for one zero-argument event.
#[derive(Debug, Clone)]
pub struct Broadcaster<H> {
    /// Current subscribers
    subscribers: AHashSet<H>,
    /// Notifications sent so far
    notifications: u64,
}

impl<H> Default for Broadcaster<H> {
    fn default() -> Self {
        Self {
            subscribers: AHashSet::new(),
            notifications: 0,
        }
    }
}

impl<H: Copy + Eq + Hash> Broadcaster<H> {
    /// Creates an empty broadcaster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber. Returns `false` if it was already subscribed.
    pub fn subscribe(&mut self, handle: H) -> bool {
        self.subscribers.insert(handle)
    }

    /// Removes a subscriber. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, handle: &H) -> bool {
        self.subscribers.remove(handle)
    }

    /// Checks whether a handle is subscribed.
    #[must_use]
    pub fn is_subscribed(&self, handle: &H) -> bool {
        self.subscribers.contains(handle)
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Checks whether there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Iterates over the current subscribers in unspecified order.
    pub fn subscribers(&self) -> impl Iterator<Item = &H> {
        self.subscribers.iter()
    }

    /// Returns how many notifications have been sent.
    #[must_use]
    pub const fn notifications(&self) -> u64 {
        self.notifications
    }

    /// Invokes `react` once for every current subscriber.
    ///
    /// The borrow on `self` keeps the subscriber set frozen for the whole
    /// fan-out. Returns the number of subscribers reached.
    pub fn notify_all<F>(&mut self, mut react: F) -> usize
    where
        F: FnMut(H),
    {
        self.notifications += 1;
        for handle in &self.subscribers {
            react(*handle);
        }
        trace!(
            subscribers = self.subscribers.len(),
            notification = self.notifications,
            "Broadcast jump"
        );
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut bus = Broadcaster::new();
        assert!(bus.subscribe(1u32));
        assert!(!bus.subscribe(1u32));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_unsubscribe_absent_is_noop() {
        let mut bus: Broadcaster<u32> = Broadcaster::new();
        assert!(!bus.unsubscribe(&9));
        bus.subscribe(3);
        assert!(bus.unsubscribe(&3));
        assert!(!bus.unsubscribe(&3));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_notify_reaches_each_subscriber_once() {
        let mut bus = Broadcaster::new();
        for h in 0..10u32 {
            bus.subscribe(h);
        }
        bus.unsubscribe(&4);
        let mut seen = Vec::new();
        let reached = bus.notify_all(|h| seen.push(h));
        seen.sort_unstable();
        assert_eq!(reached, 9);
        assert_eq!(seen, vec![0, 1, 2, 3, 5, 6, 7, 8, 9]);
        assert_eq!(bus.notifications(), 1);
    }

    #[test]
    fn test_notify_empty() {
        let mut bus: Broadcaster<u32> = Broadcaster::new();
        assert_eq!(bus.notify_all(|_| panic!("no subscribers")), 0);
    }
}
