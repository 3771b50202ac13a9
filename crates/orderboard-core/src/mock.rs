//! # Test Doubles
//!
//! In-memory stand-ins for the backing-store collaborators, for testing
//! boards and clients without spawning a real store.
//!
//! ## When to use doubles vs a real store
//!
//! | Feature | `ScriptedFeed` / `RecordingWriter` | Real store actor |
//! |---------|-----------------------------------|------------------|
//! | **Speed** | Instant (in-memory) | Fast (tokio spawn) |
//! | **Determinism** | You control every snapshot | Subject to scheduler |
//! | **Error injection** | Easy (`fail_next`) | Hard (requires specific state) |
//! | **Use case** | Board/client logic in isolation | End-to-end flows |
//!
//! A [`ScriptedFeed`] hands the test the sending side of the snapshot
//! channel, so the test *is* the backing store: push exactly the snapshots
//! you want, in the order you want. A [`RecordingWriter`] captures every
//! write-back call for assertion and can be told to fail the next one.

use crate::feed::{FeedError, OrderFeed, OrderPatch, OrderWriter, Snapshot, Subscription, WriteError};
use crate::order::{OrderId, OrderStatus};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A feed whose snapshots the test pushes by hand.
///
/// Single-use: the first `subscribe_orders` takes the receiver, a second one
/// fails, mirroring the one-subscription-per-screen model.
pub struct ScriptedFeed {
    receiver: Mutex<Option<mpsc::Receiver<Snapshot>>>,
}

/// The test's end of a [`ScriptedFeed`].
#[derive(Clone)]
pub struct SnapshotPusher {
    sender: mpsc::Sender<Snapshot>,
}

impl ScriptedFeed {
    /// Creates the feed and the pusher driving it.
    pub fn channel(buffer_size: usize) -> (Self, SnapshotPusher) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (
            Self {
                receiver: Mutex::new(Some(receiver)),
            },
            SnapshotPusher { sender },
        )
    }
}

#[async_trait]
impl OrderFeed for ScriptedFeed {
    async fn subscribe_orders(&self) -> Result<Subscription, FeedError> {
        let receiver = self
            .receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| FeedError::Subscription("scripted feed already subscribed".into()))?;
        Ok(Subscription::new(receiver))
    }
}

impl SnapshotPusher {
    /// Delivers the next full snapshot to the subscriber.
    pub async fn push(&self, snapshot: Snapshot) {
        self.sender
            .send(snapshot)
            .await
            .expect("scripted feed subscriber gone");
    }
}

/// A write-back call captured by [`RecordingWriter`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteCall {
    Status { id: OrderId, next: OrderStatus },
    Patch { id: OrderId, patch: OrderPatch },
}

#[derive(Default)]
struct RecordingState {
    calls: Vec<WriteCall>,
    failures: VecDeque<WriteError>,
}

/// An [`OrderWriter`] that records calls instead of writing anywhere.
#[derive(Clone, Default)]
pub struct RecordingWriter {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, in call order.
    pub fn calls(&self) -> Vec<WriteCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Queues an error for the next write-back call.
    pub fn fail_next(&self, error: WriteError) {
        self.state.lock().unwrap().failures.push_back(error);
    }

    fn record(&self, call: WriteCall) -> Result<(), WriteError> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }
        state.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl OrderWriter for RecordingWriter {
    async fn update_status(&self, id: &OrderId, next: OrderStatus) -> Result<(), WriteError> {
        self.record(WriteCall::Status {
            id: id.clone(),
            next,
        })
    }

    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<(), WriteError> {
        self.record(WriteCall::Patch {
            id: id.clone(),
            patch,
        })
    }
}
