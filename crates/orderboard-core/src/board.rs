//! # Board Actor
//!
//! The per-subscription consumer that backs one kitchen display screen. It
//! owns the whole snapshot pipeline (visibility filter, arrival detector,
//! alert scheduler, partition cache) and processes everything sequentially
//! from a single channel.
//!
//! # Architecture Note
//! This struct is the "server" half of the board. Snapshot deliveries and
//! operator queries arrive on the *same* mpsc channel, so there is exactly
//! one interleaving and no locks: a view requested after a delivery always
//! observes that delivery. The `seen` set lives inside the actor and dies
//! with it; nothing else can touch it.
//!
//! Teardown follows channel closure: drop every [`BoardClient`] (or the
//! [`BoardHandle`]) and the run loop exits, discarding detector state. A
//! resubscription builds a fresh actor and is a cold start by construction.

use crate::alert::{AlertScheduler, PendingAlert};
use crate::arrivals::NewArrivalDetector;
use crate::error::BoardError;
use crate::feed::{OrderFeed, Snapshot};
use crate::order::OrderRecord;
use crate::partition::{partition, OrderBuckets};
use crate::visibility;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Alerting state reported to the UI in one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertState {
    /// The coalesced notification awaiting acknowledgment, if any.
    pub pending: Option<PendingAlert>,
    /// Lifetime cue count; the UI fires haptics/audio when it grows.
    pub cues_fired: u64,
}

/// Messages multiplexed onto the board's single channel.
#[derive(Debug)]
pub enum BoardRequest {
    /// A full snapshot pushed by the feed-forwarding task.
    Snapshot(Snapshot),
    View {
        respond_to: oneshot::Sender<OrderBuckets>,
    },
    Alert {
        respond_to: oneshot::Sender<AlertState>,
    },
    Acknowledge {
        respond_to: oneshot::Sender<()>,
    },
    /// Terminates the run loop even while client clones are still alive;
    /// their subsequent calls fail with [`BoardError::Closed`].
    Stop,
}

/// The server half: owns detector, alerts, and the latest visible set.
pub struct BoardActor {
    receiver: mpsc::Receiver<BoardRequest>,
    detector: NewArrivalDetector,
    alerts: AlertScheduler,
    visible: Vec<OrderRecord>,
}

impl BoardActor {
    /// Creates a board actor and its client.
    ///
    /// `buffer_size` bounds the mpsc channel; a full channel backpressures
    /// the feed forwarder rather than dropping snapshots.
    pub fn new(buffer_size: usize) -> (Self, BoardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            detector: NewArrivalDetector::new(),
            alerts: AlertScheduler::new(),
            visible: Vec::new(),
        };
        (actor, BoardClient { sender })
    }

    /// Runs the board's event loop until every client is dropped.
    pub async fn run(mut self) {
        info!("board started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BoardRequest::Snapshot(snapshot) => self.ingest(snapshot),
                BoardRequest::View { respond_to } => {
                    let _ = respond_to.send(partition(&self.visible));
                }
                BoardRequest::Alert { respond_to } => {
                    let _ = respond_to.send(AlertState {
                        pending: self.alerts.pending(),
                        cues_fired: self.alerts.cues_fired(),
                    });
                }
                BoardRequest::Acknowledge { respond_to } => {
                    self.alerts.acknowledge();
                    let _ = respond_to.send(());
                }
                BoardRequest::Stop => break,
            }
        }

        info!(visible = self.visible.len(), "board shut down");
    }

    /// One snapshot through the pipeline: filter, diff, alert, cache.
    fn ingest(&mut self, snapshot: Snapshot) {
        let visible = visibility::visible(&snapshot);
        debug!(
            total = snapshot.len(),
            visible = visible.len(),
            "snapshot received"
        );

        if let Some(event) = self.detector.observe(&visible) {
            self.alerts.on_new_arrivals(event.count);
        }
        self.visible = visible;
    }
}

/// Clone-able query interface to a [`BoardActor`].
#[derive(Debug, Clone)]
pub struct BoardClient {
    sender: mpsc::Sender<BoardRequest>,
}

impl BoardClient {
    /// Delivers a snapshot into the board. Used by the feed forwarder.
    pub async fn deliver(&self, snapshot: Snapshot) -> Result<(), BoardError> {
        self.sender
            .send(BoardRequest::Snapshot(snapshot))
            .await
            .map_err(|_| BoardError::Closed)
    }

    /// The current partitioned view.
    pub async fn view(&self) -> Result<OrderBuckets, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::View { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)
    }

    /// The current alerting state.
    pub async fn alert(&self) -> Result<AlertState, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::Alert { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)
    }

    /// Operator acknowledgment of the pending notification.
    pub async fn acknowledge(&self) -> Result<(), BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(BoardRequest::Acknowledge { respond_to })
            .await
            .map_err(|_| BoardError::Closed)?;
        response.await.map_err(|_| BoardError::Dropped)
    }
}

/// One live board: actor task, feed-forwarding task, and a client.
///
/// Owns the subscription lifetime. [`BoardHandle::unsubscribe`] (or dropping
/// the handle) stops delivery and lets the actor drain and exit; detector
/// state goes with it. "Refresh" on the UI is exactly: unsubscribe, then
/// [`BoardHandle::subscribe`] again. The fresh board re-announces whatever
/// pending work the first snapshot carries.
pub struct BoardHandle {
    client: BoardClient,
    forwarder: tokio::task::JoinHandle<()>,
    actor: Option<tokio::task::JoinHandle<()>>,
}

impl BoardHandle {
    /// Subscribes to the feed and spawns a fresh board over it.
    pub async fn subscribe<F: OrderFeed>(feed: &F) -> Result<Self, BoardError> {
        let mut subscription = feed.subscribe_orders().await?;
        let (actor, client) = BoardActor::new(32);
        let actor_task = tokio::spawn(actor.run());

        let delivery = client.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(snapshot) = subscription.next().await {
                if delivery.deliver(snapshot).await.is_err() {
                    break;
                }
            }
            warn!("feed ended; board will receive no further snapshots");
        });

        Ok(Self {
            client,
            forwarder,
            actor: Some(actor_task),
        })
    }

    /// A clone of the board's query client.
    pub fn client(&self) -> BoardClient {
        self.client.clone()
    }

    /// Stops snapshot delivery immediately and discards the board.
    ///
    /// After this returns no further delivery reaches the actor; it exits
    /// once in-flight messages and surviving client clones drain.
    pub fn unsubscribe(self) {
        // Drop glue does the actual teardown.
    }

    /// Unsubscribes and waits for the board task to finish.
    ///
    /// Works even while client clones are still held elsewhere: the actor is
    /// told to stop, and outstanding clones get [`BoardError::Closed`] from
    /// then on.
    pub async fn shutdown(mut self) {
        self.forwarder.abort();
        let _ = self.client.sender.send(BoardRequest::Stop).await;
        let actor = self.actor.take();
        drop(self);
        if let Some(actor) = actor {
            let _ = actor.await;
        }
    }
}

impl Drop for BoardHandle {
    fn drop(&mut self) {
        // Aborting the forwarder drops its client clone and its subscription;
        // delivery stops here, the detached actor exits when clients drain.
        self.forwarder.abort();
    }
}
