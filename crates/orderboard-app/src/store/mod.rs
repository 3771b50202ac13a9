//! # Order Store Actor
//!
//! The in-memory backing store the coordinator is wired against: a single
//! actor owning the order set, processing every request sequentially, and
//! pushing the *full current snapshot* to every subscriber after each
//! mutation.
//!
//! # Architecture Note
//! This actor is the write authority every device goes through. It
//! re-validates every incoming status write against the transition graph
//! ([`orderboard_core::transition::is_legal_edge`]), so a stale actor's write
//! (legal when planned, overtaken by another device) is rejected with
//! [`WriteError::Conflict`] instead of clobbering the newer state. The
//! rejected caller does nothing special; the snapshot it already received
//! (or the next one) is the correction.
//!
//! Because the actor processes its messages sequentially in one task, the
//! store needs no locks, and subscribers observe snapshots in a total order.

use chrono::Utc;
use orderboard_core::feed::{
    FeedError, OrderFeed, OrderPatch, OrderWriter, Snapshot, Subscription, WriteError,
};
use orderboard_core::order::{OrderId, OrderItem, OrderRecord, OrderSource, OrderStatus, PaymentStatus};
use orderboard_core::transition::is_legal_edge;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Payload for creating a new order. Status is always `Pending`; the id and
/// creation timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub source: OrderSource,
}

impl OrderDraft {
    /// A cash order placed at the counter: payment stays unset, which is the
    /// legal shape for cash.
    pub fn cash(items: Vec<OrderItem>) -> Self {
        Self {
            items,
            payment_method: "cash".to_string(),
            payment_status: PaymentStatus::Unset,
            source: OrderSource::Cashier,
        }
    }

    /// A gateway order awaiting confirmation: invisible to the kitchen until
    /// payment lands.
    pub fn gateway(items: Vec<OrderItem>, method: &str) -> Self {
        Self {
            items,
            payment_method: method.to_string(),
            payment_status: PaymentStatus::Pending,
            source: OrderSource::Customer,
        }
    }
}

/// Requests sent to the store actor.
#[derive(Debug)]
pub enum StoreRequest {
    Create {
        draft: OrderDraft,
        respond_to: oneshot::Sender<Result<OrderId, WriteError>>,
    },
    Get {
        id: OrderId,
        respond_to: oneshot::Sender<Option<OrderRecord>>,
    },
    UpdateStatus {
        id: OrderId,
        next: OrderStatus,
        respond_to: oneshot::Sender<Result<(), WriteError>>,
    },
    UpdateOrder {
        id: OrderId,
        patch: OrderPatch,
        respond_to: oneshot::Sender<Result<(), WriteError>>,
    },
    Subscribe {
        respond_to: oneshot::Sender<Subscription>,
    },
}

/// The server half: owns the order set and the subscriber list.
pub struct OrderStore {
    receiver: mpsc::Receiver<StoreRequest>,
    /// Newest first, so snapshots arrive in the order the display expects.
    orders: Vec<OrderRecord>,
    next_id: u32,
    subscribers: Vec<mpsc::Sender<Snapshot>>,
}

impl OrderStore {
    /// Creates the store actor and its client.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            orders: Vec::new(),
            next_id: 1,
            subscribers: Vec::new(),
        };
        (store, StoreClient { sender })
    }

    /// Runs the store's event loop, processing requests until every client
    /// is dropped.
    pub async fn run(mut self) {
        info!("order store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Create { draft, respond_to } => {
                    let id = OrderId(format!("ord-{}", self.next_id));
                    self.next_id += 1;

                    let record = OrderRecord {
                        id: id.clone(),
                        status: OrderStatus::Pending,
                        payment_status: draft.payment_status,
                        payment_method: draft.payment_method,
                        items: draft.items,
                        timestamp: Utc::now(),
                        cancelled_at: None,
                        cancelled_by: None,
                        source: draft.source,
                    };
                    self.orders.insert(0, record);
                    info!(%id, size = self.orders.len(), "order created");
                    let _ = respond_to.send(Ok(id));
                    self.broadcast().await;
                }
                StoreRequest::Get { id, respond_to } => {
                    let found = self.orders.iter().find(|o| o.id == id).cloned();
                    debug!(%id, found = found.is_some(), "get");
                    let _ = respond_to.send(found);
                }
                StoreRequest::UpdateStatus {
                    id,
                    next,
                    respond_to,
                } => {
                    let result = self.apply_status(&id, next);
                    let ok = result.is_ok();
                    let _ = respond_to.send(result);
                    if ok {
                        info!(%id, %next, "status updated");
                        self.broadcast().await;
                    }
                }
                StoreRequest::UpdateOrder {
                    id,
                    patch,
                    respond_to,
                } => {
                    let result = self.apply_patch(&id, patch);
                    let ok = result.is_ok();
                    let _ = respond_to.send(result);
                    if ok {
                        info!(%id, "order patched");
                        self.broadcast().await;
                    }
                }
                StoreRequest::Subscribe { respond_to } => {
                    let (sender, receiver) = mpsc::channel(16);
                    // Deliver the current result set immediately so a new
                    // screen renders without waiting for the next mutation.
                    let _ = sender.send(self.orders.clone()).await;
                    self.subscribers.push(sender);
                    debug!(subscribers = self.subscribers.len(), "subscribed");
                    let _ = respond_to.send(Subscription::new(receiver));
                }
            }
        }

        info!(size = self.orders.len(), "order store shut down");
    }

    fn find_mut(&mut self, id: &OrderId) -> Result<&mut OrderRecord, WriteError> {
        self.orders
            .iter_mut()
            .find(|o| o.id == *id)
            .ok_or_else(|| WriteError::NotFound(id.to_string()))
    }

    fn apply_status(&mut self, id: &OrderId, next: OrderStatus) -> Result<(), WriteError> {
        let order = self.find_mut(id)?;
        if !is_legal_edge(order.status, next) {
            warn!(%id, from = %order.status, to = %next, "stale status write rejected");
            return Err(WriteError::Conflict(format!(
                "{id}: {} -> {next} is not a legal edge",
                order.status
            )));
        }
        order.status = next;
        Ok(())
    }

    fn apply_patch(&mut self, id: &OrderId, patch: OrderPatch) -> Result<(), WriteError> {
        // Validate the status edge before touching anything, so a rejected
        // patch leaves the record fully unchanged.
        if let Some(next) = patch.status {
            let current = self.find_mut(id)?.status;
            if !is_legal_edge(current, next) {
                warn!(%id, from = %current, to = %next, "stale patch rejected");
                return Err(WriteError::Conflict(format!(
                    "{id}: {current} -> {next} is not a legal edge"
                )));
            }
        }

        let order = self.find_mut(id)?;
        if let Some(next) = patch.status {
            order.status = next;
        }
        if let Some(payment) = patch.payment_status {
            order.payment_status = payment;
        }
        if let Some(at) = patch.cancelled_at {
            order.cancelled_at = Some(at);
        }
        if let Some(by) = patch.cancelled_by {
            order.cancelled_by = Some(by);
        }
        Ok(())
    }

    /// Pushes the full current snapshot to every live subscriber, pruning
    /// the ones whose screens have gone away.
    async fn broadcast(&mut self) {
        let snapshot = self.orders.clone();
        let mut live = Vec::with_capacity(self.subscribers.len());
        for sender in self.subscribers.drain(..) {
            if sender.send(snapshot.clone()).await.is_ok() {
                live.push(sender);
            }
        }
        self.subscribers = live;
    }
}

/// Clone-able client for the store actor. Implements both collaborator
/// contracts the coordinator depends on.
#[derive(Debug, Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, WriteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Create { draft, respond_to })
            .await
            .map_err(|_| WriteError::StoreClosed)?;
        response.await.map_err(|_| WriteError::StoreClosed)?
    }

    pub async fn get(&self, id: &OrderId) -> Result<Option<OrderRecord>, WriteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get {
                id: id.clone(),
                respond_to,
            })
            .await
            .map_err(|_| WriteError::StoreClosed)?;
        response.await.map_err(|_| WriteError::StoreClosed)
    }
}

#[async_trait]
impl OrderFeed for StoreClient {
    async fn subscribe_orders(&self) -> Result<Subscription, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Subscribe { respond_to })
            .await
            .map_err(|_| FeedError::Closed)?;
        response.await.map_err(|_| FeedError::Closed)
    }
}

#[async_trait]
impl OrderWriter for StoreClient {
    async fn update_status(&self, id: &OrderId, next: OrderStatus) -> Result<(), WriteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::UpdateStatus {
                id: id.clone(),
                next,
                respond_to,
            })
            .await
            .map_err(|_| WriteError::StoreClosed)?;
        response.await.map_err(|_| WriteError::StoreClosed)?
    }

    async fn update_order(&self, id: &OrderId, patch: OrderPatch) -> Result<(), WriteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::UpdateOrder {
                id: id.clone(),
                patch,
                respond_to,
            })
            .await
            .map_err(|_| WriteError::StoreClosed)?;
        response.await.map_err(|_| WriteError::StoreClosed)?
    }
}
