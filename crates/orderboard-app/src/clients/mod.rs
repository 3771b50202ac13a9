//! # Role Clients
//!
//! Thin, typed surfaces over the coordinator for each operator role. Every
//! mutation goes through the transition engine first; the plan is then routed
//! to the store's write-back interface, and the UI learns the outcome from
//! the next feed snapshot, never from local mutation.

pub mod admin;
pub mod cashier;
pub mod kitchen;

pub use admin::AdminClient;
pub use cashier::CashierClient;
pub use kitchen::KitchenClient;

use orderboard_core::error::BoardError;
use orderboard_core::feed::{OrderWriter, WriteError};
use orderboard_core::order::OrderId;
use orderboard_core::transition::{OrderWrite, TransitionError};

/// Errors surfaced to the operator UI by the role clients.
///
/// All three are non-fatal from the caller's point of view: an illegal or
/// conflicting action becomes a notice, a subscription failure degrades the
/// view to stale until the caller resubscribes. Nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Routes a planned write to the matching store endpoint: plain status moves
/// through `update_status`, cancellations through the generalized patch path.
pub(crate) async fn apply_write(
    writer: &impl OrderWriter,
    id: &OrderId,
    write: OrderWrite,
) -> Result<(), WriteError> {
    match write {
        OrderWrite::Status(next) => writer.update_status(id, next).await,
        cancel @ OrderWrite::Cancel { .. } => writer.update_order(id, cancel.into()).await,
    }
}
