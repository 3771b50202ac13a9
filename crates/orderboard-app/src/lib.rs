//! # Orderboard App
//!
//! Wiring around [`orderboard_core`]: the in-memory backing store actor that
//! implements the feed/writer contracts, role clients for cashier, kitchen
//! and admin, and the lifecycle orchestrator that assembles a running system.
//!
//! - **[store]**: the `OrderStore` actor, the authority every device writes
//!   through and subscribes to.
//! - **[clients]**: typed role surfaces; every mutation is planned by the
//!   transition engine before it reaches the store.
//! - **[lifecycle]**: the [`KitchenSystem`](lifecycle::KitchenSystem)
//!   orchestrator and tracing setup.

pub mod clients;
pub mod lifecycle;
pub mod store;
