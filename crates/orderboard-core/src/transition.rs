//! # Transition Engine
//!
//! The order status state machine. Given the record an operator acted on, the
//! action, and the acting role, [`plan`] computes *what* should be written,
//! never performing the write itself. The caller routes the resulting
//! [`OrderWrite`] through [`crate::feed::OrderWriter`], and the mutation
//! re-enters the system as the next feed snapshot.
//!
//! # Architecture Note
//! The engine deliberately does not mutate local state on success. Two
//! operators on different devices may act on the same order; whoever loses the
//! race has their write rejected by the backing store's own edge check, and
//! the next snapshot is the authoritative correction. Keeping the engine pure
//! means there is no optimistic local copy to diverge.
//!
//! The transition graph:
//!
//! ```text
//! pending -> preparing -> ready -> completed
//! pending | preparing | ready -> cancelled
//! completed, cancelled: terminal
//! ```

use crate::order::{ActorRole, OrderRecord, OrderStatus};
use chrono::{DateTime, Utc};
use std::fmt::Display;

/// An operator action against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    /// Move to the next status along the preparation path.
    Advance,
    /// Finish the order. Equivalent to `Advance` on `Ready`, and only legal
    /// there: completing an order that was never ready is a stale-state bug,
    /// not a shortcut.
    Complete,
    /// Abort the order from any non-terminal status.
    Cancel,
}

impl Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransitionAction::Advance => "advance",
            TransitionAction::Complete => "complete",
            TransitionAction::Cancel => "cancel",
        };
        write!(f, "{name}")
    }
}

/// The write a successful transition asks the backing store to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderWrite {
    /// Plain status move, routed through `update_status`.
    Status(OrderStatus),
    /// Cancellation, routed through the generalized `update_order` path so
    /// the status and the audit fields land in one write.
    Cancel {
        cancelled_at: DateTime<Utc>,
        cancelled_by: ActorRole,
    },
}

impl OrderWrite {
    /// The status this write moves the order to.
    pub fn next_status(&self) -> OrderStatus {
        match self {
            OrderWrite::Status(next) => *next,
            OrderWrite::Cancel { .. } => OrderStatus::Cancelled,
        }
    }
}

/// Errors raised by the transition engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The requested action has no defined edge from the current status.
    /// Reported to the caller, never silently applied, never retried.
    #[error("no `{action}` transition from `{from}`")]
    Illegal {
        from: OrderStatus,
        action: TransitionAction,
    },
}

/// Computes the write a `(status, action)` pair should produce.
///
/// Total over all fifteen pairs: every input yields either an [`OrderWrite`]
/// or [`TransitionError::Illegal`]. Cancellation stamps `cancelled_at = now`
/// and `cancelled_by = actor`; those two fields are set together, exactly
/// once, only here.
pub fn plan(
    order: &OrderRecord,
    action: TransitionAction,
    actor: ActorRole,
    now: DateTime<Utc>,
) -> Result<OrderWrite, TransitionError> {
    use OrderStatus::*;
    use TransitionAction::*;

    match (order.status, action) {
        (Pending, Advance) => Ok(OrderWrite::Status(Preparing)),
        (Preparing, Advance) => Ok(OrderWrite::Status(Ready)),
        (Ready, Advance) | (Ready, Complete) => Ok(OrderWrite::Status(Completed)),
        (Pending | Preparing | Ready, Cancel) => Ok(OrderWrite::Cancel {
            cancelled_at: now,
            cancelled_by: actor,
        }),
        // Complete is not a shortcut from earlier statuses.
        (from @ (Pending | Preparing), Complete) => Err(TransitionError::Illegal { from, action }),
        // Terminal closure: nothing leaves completed or cancelled.
        (from @ (Completed | Cancelled), _) => Err(TransitionError::Illegal { from, action }),
    }
}

/// Whether `from -> to` is an edge of the transition graph.
///
/// The backing store re-validates incoming status writes with this check, so
/// a stale actor's write is rejected server-side rather than clobbering a
/// transition another device already applied.
pub fn is_legal_edge(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Preparing)
            | (Preparing, Ready)
            | (Ready, Completed)
            | (Pending | Preparing | Ready, Cancelled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderId, OrderSource, PaymentStatus};

    fn order_with_status(status: OrderStatus) -> OrderRecord {
        OrderRecord {
            id: OrderId::from("ord-1"),
            status,
            payment_status: PaymentStatus::Paid,
            payment_method: "gcash".to_string(),
            items: vec![],
            timestamp: Utc::now(),
            cancelled_at: None,
            cancelled_by: None,
            source: OrderSource::Customer,
        }
    }

    fn next_of(status: OrderStatus, action: TransitionAction) -> Result<OrderStatus, TransitionError> {
        plan(
            &order_with_status(status),
            action,
            ActorRole::Kitchen,
            Utc::now(),
        )
        .map(|w| w.next_status())
    }

    #[test]
    fn advance_walks_the_preparation_path() {
        use OrderStatus::*;
        assert_eq!(next_of(Pending, TransitionAction::Advance), Ok(Preparing));
        assert_eq!(next_of(Preparing, TransitionAction::Advance), Ok(Ready));
        assert_eq!(next_of(Ready, TransitionAction::Advance), Ok(Completed));
    }

    #[test]
    fn complete_only_from_ready() {
        use OrderStatus::*;
        assert_eq!(next_of(Ready, TransitionAction::Complete), Ok(Completed));
        assert!(matches!(
            next_of(Pending, TransitionAction::Complete),
            Err(TransitionError::Illegal { from: Pending, .. })
        ));
        assert!(matches!(
            next_of(Preparing, TransitionAction::Complete),
            Err(TransitionError::Illegal { from: Preparing, .. })
        ));
    }

    #[test]
    fn cancel_stamps_audit_fields() {
        let now = Utc::now();
        let write = plan(
            &order_with_status(OrderStatus::Preparing),
            TransitionAction::Cancel,
            ActorRole::Admin,
            now,
        )
        .unwrap();
        assert_eq!(
            write,
            OrderWrite::Cancel {
                cancelled_at: now,
                cancelled_by: ActorRole::Admin,
            }
        );
        assert_eq!(write.next_status(), OrderStatus::Cancelled);
    }

    #[test]
    fn plan_is_total_and_terminal_statuses_are_closed() {
        use OrderStatus::*;
        use TransitionAction::*;
        let statuses = [Pending, Preparing, Ready, Completed, Cancelled];
        let actions = [Advance, Complete, Cancel];

        for status in statuses {
            for action in actions {
                let result = next_of(status, action);
                // Every pair is defined: a next status or an explicit error.
                match result {
                    Ok(next) => {
                        assert!(!status.is_terminal(), "{status} must have no exits");
                        assert!(is_legal_edge(status, next));
                    }
                    Err(TransitionError::Illegal { from, action: a }) => {
                        assert_eq!(from, status);
                        assert_eq!(a, action);
                    }
                }
            }
        }
    }

    #[test]
    fn cancel_on_completed_is_illegal() {
        let order = order_with_status(OrderStatus::Completed);
        let result = plan(&order, TransitionAction::Cancel, ActorRole::Admin, Utc::now());
        assert_eq!(
            result,
            Err(TransitionError::Illegal {
                from: OrderStatus::Completed,
                action: TransitionAction::Cancel,
            })
        );
        // The engine never touched the record.
        assert_eq!(order.status, OrderStatus::Completed);
        assert!(order.cancelled_at.is_none());
    }

    #[test]
    fn legal_edges_match_the_graph() {
        use OrderStatus::*;
        assert!(is_legal_edge(Pending, Preparing));
        assert!(is_legal_edge(Preparing, Ready));
        assert!(is_legal_edge(Ready, Completed));
        assert!(is_legal_edge(Pending, Cancelled));
        assert!(is_legal_edge(Preparing, Cancelled));
        assert!(is_legal_edge(Ready, Cancelled));

        assert!(!is_legal_edge(Pending, Ready));
        assert!(!is_legal_edge(Pending, Completed));
        assert!(!is_legal_edge(Preparing, Preparing));
        assert!(!is_legal_edge(Completed, Cancelled));
        assert!(!is_legal_edge(Cancelled, Pending));
    }
}
