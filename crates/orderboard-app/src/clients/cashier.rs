//! # Cashier Client
//!
//! The POS surface: places orders, confirms payments, cancels on behalf of
//! the counter. Order creation is the only path that does not go through the
//! transition engine: a draft has no prior state to transition from.

use crate::clients::{apply_write, OpsError};
use crate::store::{OrderDraft, StoreClient};
use chrono::Utc;
use orderboard_core::feed::{OrderPatch, OrderWriter};
use orderboard_core::order::{ActorRole, OrderId, OrderRecord, PaymentStatus};
use orderboard_core::transition::{plan, TransitionAction};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CashierClient {
    store: StoreClient,
}

impl CashierClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Places a new order. It enters the store as `Pending` and reaches every
    /// subscribed board with the next snapshot: immediately visible if the
    /// draft is actionable, held back until payment otherwise.
    #[instrument(skip(self, draft))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderId, OpsError> {
        let id = self.store.create_order(draft).await?;
        info!(%id, "order placed");
        Ok(id)
    }

    /// Confirms payment. For a gateway order this is the moment it becomes
    /// actionable and gets announced on the kitchen boards.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: &OrderId) -> Result<(), OpsError> {
        let patch = OrderPatch {
            payment_status: Some(PaymentStatus::Paid),
            ..OrderPatch::default()
        };
        self.store.update_order(id, patch).await?;
        info!(%id, "payment confirmed");
        Ok(())
    }

    /// Cancels an order on behalf of the counter.
    #[instrument(skip(self, order), fields(id = %order.id))]
    pub async fn cancel(&self, order: &OrderRecord) -> Result<(), OpsError> {
        let write = plan(order, TransitionAction::Cancel, ActorRole::Cashier, Utc::now())?;
        apply_write(&self.store, &order.id, write).await?;
        Ok(())
    }
}
