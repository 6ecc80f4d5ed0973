//! Subscriptions handed out by the tracking service, kept for listing and bulk cancellation.

use crate::model::OrderId;
use crate::tracking::subscription::{Subscription, SubscriptionId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Book-keeping of the subscriptions a [`TrackingService`](crate::tracking::TrackingService)
/// has handed out, so they can be listed and cancelled in bulk.
///
/// Finished subscriptions are reaped lazily on every insert.
#[derive(Default)]
pub struct SubscriptionRegistry {
    entries: Mutex<HashMap<SubscriptionId, Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<SubscriptionId, Subscription>> {
        // the map stays consistent even if a holder panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, subscription: Subscription) {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|_, sub| sub.is_active());
        let reaped = before - entries.len();
        if reaped > 0 {
            debug!(reaped, "Removed finished subscriptions");
        }
        entries.insert(subscription.id(), subscription);
    }

    /// Active subscriptions for `order_id`, oldest first.
    pub fn active_for(&self, order_id: &OrderId) -> Vec<Subscription> {
        let mut found: Vec<Subscription> = self
            .entries()
            .values()
            .filter(|sub| sub.order_id() == order_id && sub.is_active())
            .cloned()
            .collect();
        found.sort_by_key(Subscription::id);
        found
    }

    /// Cancels every active subscription for `order_id`; returns how many.
    pub fn cancel_order(&self, order_id: &OrderId) -> usize {
        let mut removed = Vec::new();
        self.entries().retain(|_, sub| {
            if sub.order_id() == order_id {
                removed.push(sub.clone());
                false
            } else {
                true
            }
        });
        // outside the lock: cancel waits for a running callback, which may
        // itself call back into the registry
        removed.iter().filter(|sub| sub.cancel()).count()
    }

    /// Cancels everything; returns how many subscriptions were still running.
    pub fn cancel_all(&self) -> usize {
        let removed: Vec<Subscription> = self.entries().drain().map(|(_, sub)| sub).collect();
        removed.iter().filter(|sub| sub.cancel()).count()
    }

    /// Number of subscriptions that have not finished yet.
    pub fn active_count(&self) -> usize {
        self.entries().values().filter(|sub| sub.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::subscription::{Shared, SubscriptionState};

    fn sub(id: u64, order: &str) -> Subscription {
        Subscription::new(SubscriptionId(id), OrderId::from(order), Shared::new())
    }

    #[test]
    fn tracks_active_subscriptions_per_order() {
        let registry = SubscriptionRegistry::new();
        registry.insert(sub(2, "dkr123"));
        registry.insert(sub(1, "dkr123"));
        registry.insert(sub(3, "dkr456"));

        let ids: Vec<u64> = registry
            .active_for(&OrderId::from("dkr123"))
            .iter()
            .map(|s| s.id().0)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(registry.active_count(), 3);
    }

    #[test]
    fn cancel_order_leaves_other_orders_running() {
        let registry = SubscriptionRegistry::new();
        let a = sub(1, "dkr123");
        let b = sub(2, "dkr456");
        registry.insert(a.clone());
        registry.insert(b.clone());

        assert_eq!(registry.cancel_order(&OrderId::from("dkr123")), 1);
        assert_eq!(a.state(), SubscriptionState::Cancelled);
        assert!(b.is_active());
        assert_eq!(registry.cancel_order(&OrderId::from("dkr123")), 0);
    }

    #[test]
    fn finished_subscriptions_are_reaped_on_insert() {
        let registry = SubscriptionRegistry::new();
        let done = sub(1, "dkr123");
        registry.insert(done.clone());
        done.cancel();
        assert_eq!(registry.active_count(), 0);

        registry.insert(sub(2, "dkr123"));
        assert_eq!(registry.entries().len(), 1);
    }

    #[test]
    fn cancel_all_counts_only_running() {
        let registry = SubscriptionRegistry::new();
        let finished = sub(1, "dkr123");
        registry.insert(finished.clone());
        registry.insert(sub(2, "dkr456"));
        registry.insert(sub(3, "dkr789"));
        finished.cancel();

        assert_eq!(registry.cancel_all(), 2);
        assert_eq!(registry.active_count(), 0);
    }
}
