//! Board actor tests: the snapshot pipeline driven end to end through the
//! board's own channel, so delivery/query ordering is deterministic.

use chrono::Utc;
use orderboard_core::board::BoardActor;
use orderboard_core::{
    OrderId, OrderRecord, OrderSource, OrderStatus, PaymentStatus, PendingAlert,
};

fn order(id: &str, status: OrderStatus, payment: PaymentStatus, method: &str) -> OrderRecord {
    OrderRecord {
        id: OrderId::from(id),
        status,
        payment_status: payment,
        payment_method: method.to_string(),
        items: vec![],
        timestamp: Utc::now(),
        cancelled_at: None,
        cancelled_by: None,
        source: OrderSource::Customer,
    }
}

fn paid(id: &str, status: OrderStatus) -> OrderRecord {
    order(id, status, PaymentStatus::Paid, "gcash")
}

/// The lifecycle walk from the coordinator's contract: one paid pending order
/// arrives, is announced once, moves to preparing, and is never re-announced.
#[tokio::test]
async fn snapshot_sequence_announces_each_order_once() {
    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    // First delivery: a single paid pending order.
    client
        .deliver(vec![paid("A", OrderStatus::Pending)])
        .await
        .unwrap();

    let view = client.view().await.unwrap();
    assert_eq!(view.pending.len(), 1);
    assert_eq!(view.pending[0].id, OrderId::from("A"));

    let alert = client.alert().await.unwrap();
    assert_eq!(alert.pending, Some(PendingAlert { count: 1 }));
    assert_eq!(alert.cues_fired, 1);

    // The echo of an `advance`: same order, now preparing.
    client
        .deliver(vec![paid("A", OrderStatus::Preparing)])
        .await
        .unwrap();

    let view = client.view().await.unwrap();
    assert!(view.pending.is_empty());
    assert_eq!(view.preparing_or_ready.len(), 1);
    assert_eq!(view.all.len(), 1);

    // No new cue: A was already seen.
    let alert = client.alert().await.unwrap();
    assert_eq!(alert.cues_fired, 1);

    drop(client);
    actor_task.await.unwrap();
}

#[tokio::test]
async fn orders_awaiting_payment_never_reach_the_board() {
    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    client
        .deliver(vec![
            order("A", OrderStatus::Pending, PaymentStatus::Pending, "gcash"),
            order("B", OrderStatus::Pending, PaymentStatus::Unset, "cash"),
            order("C", OrderStatus::Pending, PaymentStatus::Unset, "gcash"),
        ])
        .await
        .unwrap();

    // Only the cash order is actionable; the two others are invisible and
    // must not have triggered any alert.
    let view = client.view().await.unwrap();
    let ids: Vec<&str> = view.pending.iter().map(|o| o.id.0.as_str()).collect();
    assert_eq!(ids, vec!["B"]);

    let alert = client.alert().await.unwrap();
    assert_eq!(alert.pending, Some(PendingAlert { count: 1 }));

    drop(client);
    actor_task.await.unwrap();
}

#[tokio::test]
async fn unacknowledged_alerts_accumulate_and_acknowledge_resets() {
    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    client
        .deliver(vec![paid("A", OrderStatus::Pending)])
        .await
        .unwrap();
    client
        .deliver(vec![
            paid("A", OrderStatus::Pending),
            paid("B", OrderStatus::Pending),
            paid("C", OrderStatus::Pending),
        ])
        .await
        .unwrap();

    let alert = client.alert().await.unwrap();
    assert_eq!(alert.pending, Some(PendingAlert { count: 3 }));
    assert_eq!(alert.cues_fired, 2);

    client.acknowledge().await.unwrap();
    let alert = client.alert().await.unwrap();
    assert_eq!(alert.pending, None);
    // Cues are lifetime; acknowledgment clears only the notification.
    assert_eq!(alert.cues_fired, 2);

    drop(client);
    actor_task.await.unwrap();
}

#[tokio::test]
async fn terminal_orders_stay_visible_in_the_all_bucket() {
    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    client
        .deliver(vec![
            paid("A", OrderStatus::Completed),
            paid("B", OrderStatus::Cancelled),
            paid("C", OrderStatus::Ready),
        ])
        .await
        .unwrap();

    let view = client.view().await.unwrap();
    assert!(view.pending.is_empty());
    assert_eq!(view.preparing_or_ready.len(), 1);
    assert_eq!(view.all.len(), 3);

    drop(client);
    actor_task.await.unwrap();
}

#[tokio::test]
async fn fresh_board_is_a_cold_start() {
    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    client
        .deliver(vec![paid("A", OrderStatus::Pending)])
        .await
        .unwrap();
    assert_eq!(client.alert().await.unwrap().cues_fired, 1);

    // Tear the board down (a refresh) and build a new one over the same
    // order set.
    drop(client);
    actor_task.await.unwrap();

    let (actor, client) = BoardActor::new(8);
    let actor_task = tokio::spawn(actor.run());

    client
        .deliver(vec![paid("A", OrderStatus::Pending)])
        .await
        .unwrap();

    // The new board's detector starts empty, so the still-pending order is
    // re-announced: refresh is exactly how an operator forces a re-scan.
    let alert = client.alert().await.unwrap();
    assert_eq!(alert.pending, Some(PendingAlert { count: 1 }));

    drop(client);
    actor_task.await.unwrap();
}
