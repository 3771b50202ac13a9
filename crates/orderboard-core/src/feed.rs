//! # Collaborator Contracts
//!
//! The two seams the coordinator depends on but does not implement: the
//! push-based [`OrderFeed`] that delivers full snapshots, and the
//! [`OrderWriter`] write-back path. The backing store (wherever it lives)
//! implements both; the core only ever talks to the traits.
//!
//! # Architecture Note
//! The feed delivers the *complete current result set* on every change,
//! never a delta. Arrival detection depends on total-snapshot semantics
//! (the `seen` set is replaced per delivery), so an implementation that
//! switches to incremental diffs would silently break it. Keep the contract.

use crate::order::{ActorRole, OrderId, OrderRecord, OrderStatus, PaymentStatus};
use crate::transition::OrderWrite;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// The complete current result set, delivered on every backing-store change.
pub type Snapshot = Vec<OrderRecord>;

/// Terminal failure of a feed subscription.
///
/// Propagated upward for the caller to decide on reconnection; the core never
/// auto-reconnects, so a persistent backend outage is not masked behind
/// silent retries.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed closed")]
    Closed,
    #[error("subscription failed: {0}")]
    Subscription(String),
}

/// Failure of a write-back call.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Another actor already transitioned the order; the requested edge is no
    /// longer legal server-side. The next snapshot is the authoritative
    /// correction: no retry, no special handling beyond a normal re-render.
    #[error("write conflict: {0}")]
    Conflict(String),
    #[error("order not found: {0}")]
    NotFound(String),
    #[error("store closed")]
    StoreClosed,
}

/// Partial update applied through the generalized write path.
///
/// Used for writes that touch more than the status column: cancellation
/// (status plus both audit fields in one write) and payment confirmation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<ActorRole>,
}

impl From<OrderWrite> for OrderPatch {
    fn from(write: OrderWrite) -> Self {
        match write {
            OrderWrite::Status(next) => OrderPatch {
                status: Some(next),
                ..OrderPatch::default()
            },
            OrderWrite::Cancel {
                cancelled_at,
                cancelled_by,
            } => OrderPatch {
                status: Some(OrderStatus::Cancelled),
                cancelled_at: Some(cancelled_at),
                cancelled_by: Some(cancelled_by),
                ..OrderPatch::default()
            },
        }
    }
}

/// A live subscription: a stream of full snapshots.
///
/// Dropping the subscription closes the channel; from the consumer's point of
/// view delivery stops synchronously. The feed side notices the closed
/// channel on its next broadcast and prunes the subscriber.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::Receiver<Snapshot>,
}

impl Subscription {
    pub fn new(receiver: mpsc::Receiver<Snapshot>) -> Self {
        Self { receiver }
    }

    /// Waits for the next snapshot. `None` means the feed ended.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.receiver.recv().await
    }
}

/// Push-based subscription to the order set.
///
/// One active subscription per screen instance; each carries its own
/// independent detector state downstream.
#[async_trait]
pub trait OrderFeed: Send + Sync {
    async fn subscribe_orders(&self) -> Result<Subscription, FeedError>;
}

/// Write-back interface to the backing store.
///
/// Calls are asynchronous and the coordinator assumes nothing about their
/// completion order relative to the next snapshot delivery; the snapshot is
/// the single source of truth.
#[async_trait]
pub trait OrderWriter: Send + Sync {
    /// Plain status move. Fails with [`WriteError::Conflict`] if the edge is
    /// no longer legal server-side.
    async fn update_status(&self, id: &OrderId, next: OrderStatus) -> Result<(), WriteError>;

    /// Generalized partial update (cancellation fields, payment confirmation).
    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<(), WriteError>;
}
