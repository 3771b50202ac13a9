//! # View Partitioner
//!
//! Buckets the visible order set into the named views the tabbed display
//! renders: pending, preparing-or-ready, and everything.

use crate::order::{OrderRecord, OrderStatus};

/// The three tab views over the visible order set.
///
/// `pending` and `preparing_or_ready` are disjoint; `all` is a superset of
/// both and additionally carries terminal orders so operators can audit
/// completed and cancelled work within the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBuckets {
    pub pending: Vec<OrderRecord>,
    pub preparing_or_ready: Vec<OrderRecord>,
    pub all: Vec<OrderRecord>,
}

/// Partitions visible orders into [`OrderBuckets`].
///
/// Caller-supplied ordering is preserved within each bucket (typically
/// newest-first from the feed); no re-sorting happens here.
pub fn partition(visible: &[OrderRecord]) -> OrderBuckets {
    let mut buckets = OrderBuckets::default();
    for order in visible {
        match order.status {
            OrderStatus::Pending => buckets.pending.push(order.clone()),
            OrderStatus::Preparing | OrderStatus::Ready => {
                buckets.preparing_or_ready.push(order.clone())
            }
            OrderStatus::Completed | OrderStatus::Cancelled => {}
        }
        buckets.all.push(order.clone());
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderId, OrderSource, PaymentStatus};
    use chrono::Utc;

    fn order(id: &str, status: OrderStatus) -> OrderRecord {
        OrderRecord {
            id: OrderId::from(id),
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

    fn ids(orders: &[OrderRecord]) -> Vec<&str> {
        orders.iter().map(|o| o.id.0.as_str()).collect()
    }

    #[test]
    fn buckets_by_status_preserving_order() {
        let visible = vec![
            order("a", OrderStatus::Ready),
            order("b", OrderStatus::Pending),
            order("c", OrderStatus::Preparing),
            order("d", OrderStatus::Pending),
            order("e", OrderStatus::Completed),
            order("f", OrderStatus::Cancelled),
        ];
        let buckets = partition(&visible);

        assert_eq!(ids(&buckets.pending), vec!["b", "d"]);
        assert_eq!(ids(&buckets.preparing_or_ready), vec!["a", "c"]);
        assert_eq!(ids(&buckets.all), vec!["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn tab_buckets_are_disjoint_subsets_of_all() {
        let visible = vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Preparing),
            order("c", OrderStatus::Ready),
            order("d", OrderStatus::Completed),
        ];
        let buckets = partition(&visible);

        for o in buckets.pending.iter().chain(&buckets.preparing_or_ready) {
            assert!(buckets.all.contains(o));
        }
        for o in &buckets.pending {
            assert!(!buckets.preparing_or_ready.contains(o));
        }
    }

    #[test]
    fn terminal_orders_appear_only_in_all() {
        let visible = vec![order("a", OrderStatus::Cancelled)];
        let buckets = partition(&visible);
        assert!(buckets.pending.is_empty());
        assert!(buckets.preparing_or_ready.is_empty());
        assert_eq!(ids(&buckets.all), vec!["a"]);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        assert_eq!(partition(&[]), OrderBuckets::default());
    }
}
