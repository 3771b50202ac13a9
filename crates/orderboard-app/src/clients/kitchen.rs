//! # Kitchen Client
//!
//! The display surface: reads the partitioned view and alerting state from
//! its board, and pushes status transitions back through the store. One
//! kitchen client per board; the board is the device's single subscription.

use crate::clients::{apply_write, OpsError};
use crate::store::StoreClient;
use chrono::Utc;
use orderboard_core::board::{AlertState, BoardClient};
use orderboard_core::order::{ActorRole, OrderRecord};
use orderboard_core::partition::OrderBuckets;
use orderboard_core::transition::{plan, TransitionAction};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct KitchenClient {
    board: BoardClient,
    store: StoreClient,
}

impl KitchenClient {
    pub fn new(board: BoardClient, store: StoreClient) -> Self {
        Self { board, store }
    }

    /// The current tabbed view (pending / preparing-or-ready / all).
    pub async fn view(&self) -> Result<OrderBuckets, OpsError> {
        Ok(self.board.view().await?)
    }

    /// The pending notification and cue counter.
    pub async fn alert(&self) -> Result<AlertState, OpsError> {
        Ok(self.board.alert().await?)
    }

    /// Acknowledges the pending new-orders notification.
    pub async fn acknowledge(&self) -> Result<(), OpsError> {
        Ok(self.board.acknowledge().await?)
    }

    /// Moves an order one step along the preparation path.
    #[instrument(skip(self, order), fields(id = %order.id, from = %order.status))]
    pub async fn advance(&self, order: &OrderRecord) -> Result<(), OpsError> {
        self.act(order, TransitionAction::Advance).await
    }

    /// Finishes a ready order.
    #[instrument(skip(self, order), fields(id = %order.id, from = %order.status))]
    pub async fn complete(&self, order: &OrderRecord) -> Result<(), OpsError> {
        self.act(order, TransitionAction::Complete).await
    }

    /// Cancels an order on behalf of the kitchen.
    #[instrument(skip(self, order), fields(id = %order.id, from = %order.status))]
    pub async fn cancel(&self, order: &OrderRecord) -> Result<(), OpsError> {
        self.act(order, TransitionAction::Cancel).await
    }

    /// Plan first, then write. An illegal action fails here without any I/O;
    /// a planned-but-stale action is the store's to reject. Either way the
    /// local record is untouched; the next snapshot settles the view.
    async fn act(&self, order: &OrderRecord, action: TransitionAction) -> Result<(), OpsError> {
        let write = plan(order, action, ActorRole::Kitchen, Utc::now())?;
        debug!(next = %write.next_status(), "transition planned");
        apply_write(&self.store, &order.id, write).await?;
        Ok(())
    }
}
