//! # Visibility Filter
//!
//! Derives, from a raw feed snapshot, the subset of orders eligible for
//! kitchen action. Orders awaiting payment confirmation must never reach
//! kitchen preparation, so everything downstream of this filter (arrival
//! detection, partitioning) only ever sees actionable orders.

use crate::order::{OrderRecord, PaymentStatus};

/// Whether a single order is eligible for kitchen action.
///
/// The rule: `payment_status == Paid`, OR the cash-order exception
/// (`payment_method == "cash"` with `payment_status` unset; the cashier
/// settles at the counter and no gateway confirmation will ever arrive).
/// A gateway payment still pending is always excluded.
pub fn is_actionable(order: &OrderRecord) -> bool {
    match order.payment_status {
        PaymentStatus::Paid => true,
        PaymentStatus::Unset => order.payment_method == "cash",
        PaymentStatus::Pending => false,
    }
}

/// Filters a full snapshot down to the actionable subset.
///
/// Pure function: preserves the caller-supplied order, tolerates empty
/// snapshots, and has no error conditions. A record missing optional payment
/// fields deserializes to [`PaymentStatus::Unset`] and is excluded unless the
/// cash exception applies.
pub fn visible(snapshot: &[OrderRecord]) -> Vec<OrderRecord> {
    snapshot
        .iter()
        .filter(|o| is_actionable(o))
        .cloned()
        .collect()
}
