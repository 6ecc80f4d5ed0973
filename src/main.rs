//! # Dakar Go Tracking Demo
//!
//! Starts the [`TrackingSystem`], loads the Dakar demo orders and follows
//! order `dkr123` from Yoff Virage to the Plateau, printing every position
//! update with the delivery progress and time left.
//!
//! Ticks are shortened to one second so the whole route plays in a few
//! seconds; `RUST_LOG=debug` shows each publisher tick and actor request.

use chrono::Utc;
use dakar_tracking::lifecycle::{setup_tracing, TrackingSystem};
use dakar_tracking::model::OrderId;
use dakar_tracking::tracking::{delivery_progress, format_time_remaining, TrackingConfig};
use std::time::Duration;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting Dakar Go tracking demo");

    let config = TrackingConfig::default().with_tick_interval(Duration::from_secs(1));
    let system = TrackingSystem::new(config);

    let span = tracing::info_span!("seeding");
    let orders = system
        .seed_demo_data()
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;
    info!(count = orders.len(), "Demo orders ready");

    let order_id = OrderId::from("dkr123");
    let order = system
        .tracking
        .get_order_by_id(&order_id)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        %order_id,
        customer = %order.customer_name,
        driver = order.driver_name(),
        vehicle = %order.vehicle,
        status = %order.status,
        "Tracking order"
    );

    let span = tracing::info_span!("tracking", %order_id);
    async {
        let (subscription, mut updates) = system
            .tracking
            .subscribe_channel(&order_id)
            .await
            .map_err(|e| e.to_string())?;

        while let Some(update) = updates.recv().await {
            info!(
                position = %update.position,
                heading = %format!("{:.0}°", update.heading),
                speed_kmh = update.speed_kmh,
                progress = %format!("{:.0}%", delivery_progress(&order, Some(&update))),
                eta = %format_time_remaining(update.estimated_arrival, Utc::now()),
                "Driver moved"
            );
        }
        info!(
            state = ?subscription.state(),
            updates = subscription.updates_sent(),
            "Route finished"
        );
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // An unknown order is reported instead of silently ignored
    match system
        .tracking
        .subscribe(&OrderId::from("dkr000"), |_| {})
        .await
    {
        Ok(subscription) => {
            subscription.cancel();
        }
        Err(e) => error!(error = %e, "Subscription refused"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
