//! The caller's handle on a running position publisher.

use crate::model::OrderId;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tokio::sync::watch;
use tracing::info;

/// Identifies one subscription; unique within a [`TrackingService`](crate::tracking::TrackingService).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub_{}", self.0)
    }
}

/// Lifecycle of a subscription.
///
/// `Idle → Tracking → Completed | Cancelled`, or `Idle → Cancelled` when
/// cancelled before the publisher task starts. Terminal states never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Idle,
    Tracking,
    /// The path was exhausted.
    Completed,
    /// Stopped by [`Subscription::cancel`] (or by the publisher task going away).
    Cancelled,
}

impl SubscriptionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubscriptionState::Completed | SubscriptionState::Cancelled)
    }
}

/// State shared between a [`Subscription`] handle and its publisher task.
pub(crate) struct Shared {
    pub(crate) state: watch::Sender<SubscriptionState>,
    pub(crate) updates: AtomicUsize,
    /// Held for the whole of each callback.
    emit: Mutex<()>,
    /// Thread currently running the callback, if any.
    emitter: Mutex<Option<ThreadId>>,
}

/// Proof that a callback may run; see [`Shared::begin_emit`].
pub(crate) struct Emitting<'a> {
    shared: &'a Shared,
    _lock: MutexGuard<'a, ()>,
}

impl Drop for Emitting<'_> {
    fn drop(&mut self) {
        *self.shared.emitter() = None;
    }
}

impl Shared {
    pub(crate) fn new() -> Arc<Self> {
        let (state, _) = watch::channel(SubscriptionState::Idle);
        Arc::new(Self {
            state,
            updates: AtomicUsize::new(0),
            emit: Mutex::new(()),
            emitter: Mutex::new(None),
        })
    }

    fn emitter(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.emitter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn current(&self) -> SubscriptionState {
        *self.state.borrow()
    }

    /// Moves from `from` to `to`; false if the state was something else.
    pub(crate) fn transition(&self, from: SubscriptionState, to: SubscriptionState) -> bool {
        self.state.send_if_modified(|state| {
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        })
    }

    /// Starts a callback, or returns `None` once the subscription is terminal.
    ///
    /// While the returned guard lives, [`cancel`](Self::cancel) from any other
    /// thread blocks, so no callback can begin after a cancel has returned.
    pub(crate) fn begin_emit(&self) -> Option<Emitting<'_>> {
        let lock = self.emit.lock().unwrap_or_else(PoisonError::into_inner);
        if self.current().is_terminal() {
            return None;
        }
        *self.emitter() = Some(thread::current().id());
        Some(Emitting {
            shared: self,
            _lock: lock,
        })
    }

    /// Moves to `Cancelled` unless already terminal.
    pub(crate) fn cancel(&self) -> bool {
        // the callback runs synchronously, so a cancel from its own thread
        // can only come from inside it and must not wait for itself
        let inside_callback = *self.emitter() == Some(thread::current().id());
        if inside_callback {
            return self.finish(SubscriptionState::Cancelled);
        }
        let _lock = self.emit.lock().unwrap_or_else(PoisonError::into_inner);
        self.finish(SubscriptionState::Cancelled)
    }

    /// Moves any non-terminal state to `to`.
    pub(crate) fn finish(&self, to: SubscriptionState) -> bool {
        self.state.send_if_modified(|state| {
            if state.is_terminal() {
                false
            } else {
                *state = to;
                true
            }
        })
    }
}

/// A live (or finished) tracking subscription for one order.
///
/// Clones share the same subscription. Dropping a handle does not stop
/// the publisher; call [`cancel`](Subscription::cancel).
#[derive(Clone)]
pub struct Subscription {
    id: SubscriptionId,
    order_id: OrderId,
    shared: Arc<Shared>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, order_id: OrderId, shared: Arc<Shared>) -> Self {
        Self {
            id,
            order_id,
            shared,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn state(&self) -> SubscriptionState {
        self.shared.current()
    }

    pub fn is_active(&self) -> bool {
        !self.state().is_terminal()
    }

    /// Number of updates handed to the callback so far.
    pub fn updates_sent(&self) -> usize {
        self.shared.updates.load(Ordering::SeqCst)
    }

    /// Stops the publisher. No callback starts after this returns.
    ///
    /// A callback already running on another thread is waited for; a
    /// callback may cancel its own subscription.
    ///
    /// Returns `true` if this call did the cancelling; `false` when the
    /// subscription had already completed or been cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.cancel();
        if cancelled {
            info!(subscription = %self.id, order_id = %self.order_id, updates = self.updates_sent(), "Tracking cancelled");
        }
        cancelled
    }

    /// Waits until the subscription completes or is cancelled.
    pub async fn wait(&self) -> SubscriptionState {
        let mut rx = self.shared.state.subscribe();
        let state = match rx.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };
        state
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("order_id", &self.order_id)
            .field("state", &self.state())
            .field("updates_sent", &self.updates_sent())
            .finish()
    }
}
