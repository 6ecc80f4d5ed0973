//! Display helpers for a tracked order: overall progress and time left.

use crate::model::{distance_km, LocationUpdate, Order, OrderStatus};
use chrono::{DateTime, Utc};

/// Progress of a delivery in percent, `[0, 100]`.
///
/// Without a position the status alone decides. While in transit with a
/// position (and both order locations known) it is the share of the
/// pickup-to-delivery distance already covered, held within `[40, 90]`.
pub fn delivery_progress(order: &Order, latest: Option<&LocationUpdate>) -> f64 {
    match order.status {
        OrderStatus::Delivered => return 100.0,
        OrderStatus::Cancelled | OrderStatus::Failed => return 0.0,
        _ => {}
    }

    let Some(update) = latest else {
        return match order.status {
            OrderStatus::Accepted => 20.0,
            OrderStatus::PickedUp => 40.0,
            OrderStatus::InTransit => 60.0,
            _ => 0.0,
        };
    };

    match (order.status, order.pickup_location, order.delivery_location) {
        (OrderStatus::InTransit, Some(pickup), Some(delivery)) => {
            let total = distance_km(pickup, delivery);
            let left = distance_km(update.position, delivery);
            let covered = (total - left) / total * 100.0;
            // f64::max drops NaN, so a zero-length trip reads as 40
            covered.max(40.0).min(90.0)
        }
        _ => 50.0,
    }
}

/// Human-readable time until `eta`, in whole minutes.
pub fn format_time_remaining(eta: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = ((eta - now).num_milliseconds() as f64 / 60_000.0).round() as i64;
    match minutes {
        m if m <= 0 => "Arriving now".to_string(),
        1 => "1 minute".to_string(),
        m => format!("{} minutes", m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::ActorEntity;
    use crate::model::{Coordinate, DriverAssignment, DriverId, OrderCreate, OrderId, VehicleKind};
    use chrono::Duration;

    const PICKUP: Coordinate = Coordinate::new(14.7645, -17.3660);
    const DELIVERY: Coordinate = Coordinate::new(14.6937, -17.4441);

    fn order(status: OrderStatus) -> Order {
        let params = OrderCreate::new("Awa Ndiaye", "Yoff", "Plateau", VehicleKind::Scooter)
            .with_status(status)
            .with_locations(PICKUP, DELIVERY)
            .with_driver(DriverAssignment::new("driver001", "Moussa Sow"));
        Order::from_create_params(OrderId::from("dkr123"), params).unwrap()
    }

    fn at(position: Coordinate) -> LocationUpdate {
        let now = Utc::now();
        LocationUpdate {
            order_id: OrderId::from("dkr123"),
            position,
            heading: 0.0,
            speed_kmh: 30,
            last_updated: now,
            driver_id: DriverId::from("driver001"),
            driver_name: "Moussa Sow".into(),
            vehicle: VehicleKind::Scooter,
            estimated_arrival: now,
            sequence: 0,
        }
    }

    #[test]
    fn terminal_statuses() {
        let here = at(PICKUP);
        assert_eq!(delivery_progress(&order(OrderStatus::Delivered), Some(&here)), 100.0);
        assert_eq!(delivery_progress(&order(OrderStatus::Cancelled), Some(&here)), 0.0);
        assert_eq!(delivery_progress(&order(OrderStatus::Failed), None), 0.0);
    }

    #[test]
    fn status_only_without_position() {
        assert_eq!(delivery_progress(&order(OrderStatus::Pending), None), 0.0);
        assert_eq!(delivery_progress(&order(OrderStatus::Accepted), None), 20.0);
        assert_eq!(delivery_progress(&order(OrderStatus::PickedUp), None), 40.0);
        assert_eq!(delivery_progress(&order(OrderStatus::InTransit), None), 60.0);
    }

    #[test]
    fn in_transit_follows_distance_within_bounds() {
        let transit = order(OrderStatus::InTransit);
        assert_eq!(delivery_progress(&transit, Some(&at(PICKUP))), 40.0);
        assert_eq!(delivery_progress(&transit, Some(&at(DELIVERY))), 90.0);

        let midway = Coordinate::new((PICKUP.lat + DELIVERY.lat) / 2.0, (PICKUP.lng + DELIVERY.lng) / 2.0);
        let progress = delivery_progress(&transit, Some(&at(midway)));
        assert!((progress - 50.0).abs() < 1.0, "got {progress}");
    }

    #[test]
    fn zero_length_trip_reads_as_picked_up() {
        let params = OrderCreate::new("Awa Ndiaye", "Yoff", "Yoff", VehicleKind::Scooter)
            .with_status(OrderStatus::InTransit)
            .with_locations(PICKUP, PICKUP);
        let order = Order::from_create_params(OrderId::from("dkr1"), params).unwrap();
        assert_eq!(delivery_progress(&order, Some(&at(PICKUP))), 40.0);
    }

    #[test]
    fn fallback_with_position() {
        let here = at(PICKUP);
        assert_eq!(delivery_progress(&order(OrderStatus::Accepted), Some(&here)), 50.0);

        let mut no_locations = order(OrderStatus::InTransit);
        no_locations.delivery_location = None;
        assert_eq!(delivery_progress(&no_locations, Some(&here)), 50.0);
    }

    #[test]
    fn time_remaining_wording() {
        let now = Utc::now();
        assert_eq!(format_time_remaining(now - Duration::minutes(3), now), "Arriving now");
        assert_eq!(format_time_remaining(now + Duration::seconds(20), now), "Arriving now");
        assert_eq!(format_time_remaining(now + Duration::seconds(70), now), "1 minute");
        assert_eq!(format_time_remaining(now + Duration::minutes(20), now), "20 minutes");
        assert_eq!(format_time_remaining(now + Duration::seconds(150), now), "3 minutes");
    }
}
