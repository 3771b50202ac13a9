//! Demo: a cashier, a kitchen display, and an admin sharing one order set.
//!
//! Walks the lifecycle end to end under tracing: a cash order is visible the
//! moment it is placed, a gateway order stays hidden until payment confirms,
//! the kitchen advances work to completion, and a late admin cancel is
//! rejected by the state machine.
//!
//! Run with `RUST_LOG=debug cargo run -p orderboard-app` for full payloads.

use orderboard_app::lifecycle::{setup_tracing, KitchenSystem};
use orderboard_app::store::OrderDraft;
use orderboard_core::order::{OrderItem, OrderStatus};
use orderboard_core::partition::OrderBuckets;
use std::time::Duration;
use tracing::{info, warn};

/// Polls the kitchen view until `predicate` holds. Snapshot delivery is
/// asynchronous; the demo waits for the echo like a real screen would.
async fn wait_for_view<F>(
    kitchen: &orderboard_app::clients::KitchenClient,
    predicate: F,
) -> Result<OrderBuckets, Box<dyn std::error::Error>>
where
    F: Fn(&OrderBuckets) -> bool,
{
    for _ in 0..200 {
        let view = kitchen.view().await?;
        if predicate(&view) {
            return Ok(view);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Err("view never settled".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    info!("starting orderboard demo");

    let system = KitchenSystem::new();
    let cashier = system.cashier();
    let admin = system.admin();

    // Counter order, settled in cash: actionable immediately.
    let cash_id = cashier
        .place_order(OrderDraft::cash(vec![
            OrderItem::new("Sisig", 1),
            OrderItem::new("Rice", 2),
        ]))
        .await?;

    // Customer app order, gateway payment still pending: hidden from the
    // kitchen until the payment confirms.
    let gcash_id = cashier
        .place_order(OrderDraft::gateway(
            vec![OrderItem::new("Halo-halo", 1)],
            "gcash",
        ))
        .await?;

    let board = system.open_board().await?;
    let kitchen = system.kitchen(&board);

    let view = wait_for_view(&kitchen, |v| v.pending.len() == 1).await?;
    info!(
        pending = view.pending.len(),
        visible = view.all.len(),
        "board up; gateway order is not on it"
    );

    // Payment lands; the order surfaces and the board alerts.
    cashier.mark_paid(&gcash_id).await?;
    wait_for_view(&kitchen, |v| v.pending.len() == 2).await?;
    let alert = kitchen.alert().await?;
    info!(?alert.pending, cues = alert.cues_fired, "new order alerts");
    kitchen.acknowledge().await?;

    // Work the cash order through the state machine, waiting for each echo.
    let order = kitchen.view().await?.pending[1].clone();
    assert_eq!(order.id, cash_id);
    kitchen.advance(&order).await?;
    let view = wait_for_view(&kitchen, |v| !v.preparing_or_ready.is_empty()).await?;

    let order = view.preparing_or_ready[0].clone();
    kitchen.advance(&order).await?;
    let view = wait_for_view(&kitchen, |v| {
        v.preparing_or_ready
            .first()
            .is_some_and(|o| o.status == OrderStatus::Ready)
    })
    .await?;

    let order = view.preparing_or_ready[0].clone();
    kitchen.complete(&order).await?;
    let view = wait_for_view(&kitchen, |v| v.preparing_or_ready.is_empty()).await?;
    info!(audit = view.all.len(), "cash order completed");

    // A late admin cancel hits the completed order and is rejected.
    let completed = view
        .all
        .iter()
        .find(|o| o.id == cash_id)
        .cloned()
        .ok_or("completed order missing from audit view")?;
    match admin.cancel(&completed).await {
        Err(e) => warn!(error = %e, "late cancel rejected, as it should be"),
        Ok(()) => return Err("cancel of a completed order must not succeed".into()),
    }

    // Teardown: boards first, then the store.
    board.shutdown().await;
    drop(kitchen);
    drop(cashier);
    drop(admin);
    system.shutdown().await;

    info!("demo finished");
    Ok(())
}
