//! # Alert Scheduler
//!
//! Turns arrival events into a single coalesced pending notification plus a
//! cue (the haptic/audio nudge on the device) per signal, with a reset so the
//! operator can acknowledge.

use tracing::info;

/// The one notification waiting for the operator to acknowledge.
///
/// `count` is the cumulative number of arrivals since the last
/// acknowledgment: repeated signals *replace* the count, they never stack
/// into a queue of notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAlert {
    pub count: usize,
}

/// Sequential state updater behind the board's alerting.
#[derive(Debug, Default)]
pub struct AlertScheduler {
    pending: Option<PendingAlert>,
    cues_fired: u64,
}

impl AlertScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `count` fresh arrivals.
    ///
    /// The pending notification is replaced with the updated cumulative
    /// count, and a cue fires unconditionally; a signal is never silently
    /// dropped just because a notification is already showing.
    pub fn on_new_arrivals(&mut self, count: usize) {
        let total = self.pending.map_or(0, |p| p.count) + count;
        self.pending = Some(PendingAlert { count: total });
        self.cues_fired += 1;
        info!(count, total, "new order alert");
    }

    /// The notification currently awaiting acknowledgment, if any.
    pub fn pending(&self) -> Option<PendingAlert> {
        self.pending
    }

    /// How many cues have fired over the scheduler's lifetime.
    ///
    /// Cues are fire-and-forget on a real device; the counter is the
    /// observable trace of them.
    pub fn cues_fired(&self) -> u64 {
        self.cues_fired
    }

    /// Operator acknowledgment: clears the pending notification and the
    /// running count.
    pub fn acknowledge(&mut self) {
        self.pending = None;
    }
}
