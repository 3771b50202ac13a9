//! # Orderboard Core
//!
//! The order lifecycle coordinator behind a restaurant kitchen display: a
//! live, multi-actor view over a shared set of orders whose status moves
//! through a small state machine, where new-order arrival is detected exactly
//! once per subscription and the same order may be observed or mutated
//! concurrently from kitchen, cashier, and admin devices.
//!
//! ## Architecture Overview
//!
//! The crate separates the coordinator into three layers:
//!
//! 1. **Domain layer** ([`order`], [`transition`]): the record and its state
//!    machine. Pure; the engine computes *what* to write, never writes.
//! 2. **Pipeline layer** ([`visibility`], [`arrivals`], [`partition`],
//!    [`alert`]): pure functions and sequential state updaters that turn a
//!    raw snapshot into buckets and alerts.
//! 3. **Runtime layer** ([`board`], [`feed`]): one actor per screen
//!    subscription consuming the feed, plus the collaborator traits the
//!    backing store implements.
//!
//! Data flow per delivery:
//!
//! ```text
//! OrderFeed ──snapshot──► BoardActor
//!                           │ visibility::visible
//!                           │ NewArrivalDetector::observe ──► AlertScheduler
//!                           ▼
//!                         partition ──► UI tabs
//! ```
//!
//! Operator actions run the other way: [`transition::plan`] turns a
//! `(record, action, role)` triple into an [`transition::OrderWrite`], the
//! caller pushes it through [`feed::OrderWriter`], and the mutation comes
//! back as the next snapshot. The snapshot is the single source of truth;
//! nothing here mutates an order in place.
//!
//! ## Concurrency Model
//!
//! - One [`board::BoardActor`] per screen, processing snapshot deliveries and
//!   queries **sequentially** from a single channel; no locks needed.
//! - Detector state (`seen` ids) is owned by its board and dies with it;
//!   boards on different devices alert independently.
//! - Write-backs are asynchronous with no completion-order guarantee relative
//!   to the next delivery; conflicting writes are rejected by the store and
//!   corrected by the following snapshot.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted feed and a recording writer so
//! board and client logic can be exercised without a store. See that module
//! for the patterns.

pub mod alert;
pub mod arrivals;
pub mod board;
pub mod error;
pub mod feed;
pub mod mock;
pub mod order;
pub mod partition;
pub mod transition;
pub mod visibility;

// Re-export core types for convenience
pub use alert::PendingAlert;
pub use arrivals::{NewArrivalDetector, NewArrivalsEvent};
pub use board::{AlertState, BoardActor, BoardClient, BoardHandle};
pub use error::BoardError;
pub use feed::{FeedError, OrderFeed, OrderPatch, OrderWriter, Snapshot, Subscription, WriteError};
pub use order::{
    ActorRole, AddOn, OrderId, OrderItem, OrderRecord, OrderSource, OrderStatus, PaymentStatus,
};
pub use partition::OrderBuckets;
pub use transition::{plan, OrderWrite, TransitionAction, TransitionError};
