//! # Order Model
//!
//! Pure data structures shared by every component of the coordinator: the
//! [`OrderRecord`] itself plus the closed enums for status, payment state,
//! source and actor role.
//!
//! # Architecture Note
//! The backing store the real system talks to is schemaless, so the upstream
//! clients traffic in stringly-typed statuses. Here every one of those strings
//! becomes a closed enum. That turns "is this transition legal?" into an
//! exhaustive `match` the compiler checks (see [`crate::transition`]), instead
//! of a runtime string comparison that silently misses a case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque, store-assigned order identifier.
///
/// Unique within the backing store, assigned at creation and immutable
/// thereafter. Identity (not time) is what arrival detection keys on, because
/// clock skew across devices cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an order.
///
/// Transitions are monotonic along the graph in [`crate::transition`]; once an
/// order leaves `Pending` it never re-enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// A terminal status has no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{name}")
    }
}

/// Payment state of an order.
///
/// `Unset` is a legal state for cash orders (the cashier settles at the
/// counter and never touches a gateway), so a record missing the field
/// deserializes to `Unset` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unset,
    /// Awaiting gateway confirmation. Never visible to the kitchen.
    Pending,
    Paid,
}

/// Which client surface created the order. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    Customer,
    Cashier,
}

/// The role of the operator performing a mutation.
///
/// # Architecture Note
/// Capability is an explicit parameter passed into the transition engine,
/// never an ambient "current role" lookup. The record keeps the role that
/// cancelled it, so the audit trail survives the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Kitchen,
    Cashier,
    Admin,
}

impl Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActorRole::Kitchen => "kitchen",
            ActorRole::Cashier => "cashier",
            ActorRole::Admin => "admin",
        };
        write!(f, "{name}")
    }
}

/// An add-on attached to a line item (name plus unit price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub name: String,
    pub price: f64,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

impl OrderItem {
    pub fn new(name: &str, quantity: u32) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            add_ons: Vec::new(),
            special_instructions: None,
        }
    }
}

/// The shared order entity every component operates over.
///
/// Never mutated in place by the coordinator: all mutation is expressed as a
/// write-back request through [`crate::feed::OrderWriter`], and the next feed
/// snapshot is the authoritative echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Free-form tag (e.g. `cash`, `gcash`); only consulted for the
    /// cash-order visibility exception.
    pub payment_method: String,
    pub items: Vec<OrderItem>,
    /// Creation time, used for age display. Arrival detection deliberately
    /// ignores it in favor of id-set membership.
    pub timestamp: DateTime<Utc>,
    /// Set together with `cancelled_by`, exactly once, on the transition into
    /// `Cancelled`.
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_by: Option<ActorRole>,
    pub source: OrderSource,
}
