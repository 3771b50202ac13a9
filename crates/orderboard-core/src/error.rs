//! # Board Errors
//!
//! Channel-level failures of the board actor and its clients. Centralized so
//! every client maps them the same way.

use crate::feed::FeedError;

/// Errors surfaced by [`crate::board::BoardClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("board closed")]
    Closed,
    #[error("board dropped response channel")]
    Dropped,
    #[error("subscription failed: {0}")]
    Subscription(#[from] FeedError),
}
