//! Store change notification (publish/subscribe mechanics only).
//!
//! Each store owns a [`ChangeNotifier`] and publishes a [`StoreChange`] after
//! every completed mutation. Subscribers are pull-based: a change message
//! carries only the store name and its new version; the subscriber re-reads
//! whatever derived view it cares about. Nothing is pushed incrementally.
//!
//! Delivery is broadcast: each live subscriber gets a copy of every change.
//! Subscribers that have been dropped are pruned on the next publish.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// A change message emitted by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    /// Name of the store that mutated (also its durable-record address).
    pub store: &'static str,
    /// Monotonically increasing version of the store's state, +1 per mutation.
    pub version: u64,
}

/// A subscription to a store's change stream.
///
/// Designed for single-threaded consumption; messages arrive in publish
/// order because each store mutates on a single thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Broadcast fan-out of [`StoreChange`] messages to subscribers.
#[derive(Debug, Default)]
pub struct ChangeNotifier {
    senders: Vec<Sender<StoreChange>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&mut self) -> Subscription<StoreChange> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        Subscription::new(rx)
    }

    /// Publish a change to all live subscribers, pruning disconnected ones.
    pub fn publish(&mut self, change: StoreChange) {
        self.senders.retain(|tx| tx.send(change).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}
