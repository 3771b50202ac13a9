//! # New Arrival Detection
//!
//! Diffs successive visible snapshots against a remembered id-set to find
//! orders that just became actionable, exactly once per arrival within one
//! subscription's lifetime.
//!
//! # Architecture Note
//! The detector keys on identity, never on timestamps: clock skew across
//! devices cannot be trusted. The `seen` set is owned exclusively by one
//! board actor per subscription and is discarded with it; a manual refresh
//! tears the whole board down and builds a fresh detector, which is the
//! documented way an operator forces a re-scan.

use crate::order::{OrderId, OrderRecord, OrderStatus};
use std::collections::HashSet;
use tracing::debug;

/// One coalesced "new work arrived" signal per snapshot delivery.
///
/// Many orders landing in a single delivery collapse into one event with an
/// aggregate count. The operator is looking at the live list right after, so
/// nothing is lost by not itemizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewArrivalsEvent {
    pub count: usize,
}

/// Stateful diff over the stream of visible snapshots.
#[derive(Debug, Default)]
pub struct NewArrivalDetector {
    seen: HashSet<OrderId>,
}

impl NewArrivalDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next visible snapshot through the detector.
    ///
    /// An arrival is an order with `status == Pending` whose id is not in
    /// `seen`. Afterwards `seen` is wholly *replaced* by the current id set,
    /// not unioned: membership tracks the live snapshot, so the set never
    /// grows beyond the backing query and ids that leave the window are
    /// forgotten with it.
    pub fn observe(&mut self, visible: &[OrderRecord]) -> Option<NewArrivalsEvent> {
        let count = visible
            .iter()
            .filter(|o| o.status == OrderStatus::Pending && !self.seen.contains(&o.id))
            .count();

        self.seen = visible.iter().map(|o| o.id.clone()).collect();

        if count > 0 {
            debug!(count, "new arrivals detected");
            Some(NewArrivalsEvent { count })
        } else {
            None
        }
    }
}
