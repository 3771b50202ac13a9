//! # Admin Client
//!
//! The back-office surface touches the coordinator in exactly one place:
//! cancelling orders. Everything else the admin screens do (menus, add-ons,
//! discounts, users) lives outside the order lifecycle.

use crate::clients::{apply_write, OpsError};
use crate::store::StoreClient;
use chrono::Utc;
use orderboard_core::order::{ActorRole, OrderRecord};
use orderboard_core::transition::{plan, TransitionAction};
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct AdminClient {
    store: StoreClient,
}

impl AdminClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Cancels an order with admin capability. The role is an explicit
    /// parameter of the transition plan, recorded on the order, not an
    /// ambient lookup, and admin capability does not bypass the graph:
    /// cancelling a terminal order is just as illegal for an admin.
    #[instrument(skip(self, order), fields(id = %order.id, from = %order.status))]
    pub async fn cancel(&self, order: &OrderRecord) -> Result<(), OpsError> {
        let write = plan(order, TransitionAction::Cancel, ActorRole::Admin, Utc::now())?;
        apply_write(&self.store, &order.id, write).await?;
        Ok(())
    }
}
