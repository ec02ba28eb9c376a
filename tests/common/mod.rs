//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use parking_sim::lot::{Level, ParkingLot, SpotLayout};
use parking_sim::vehicle::{AnyVehicle, VehicleType};

/// Single level (floor 1) with 2 car spots, 1 motorcycle spot, no trucks.
pub fn small_lot() -> ParkingLot {
    let mut lot = ParkingLot::new();
    lot.add_level(Level::with_layout(1, &SpotLayout::new(2, 1, 0)));
    lot
}

/// Two levels: floor 1 is cars only (3), floor 2 has 1 car and 2 trucks.
pub fn two_level_lot() -> ParkingLot {
    let mut lot = ParkingLot::new();
    lot.add_level(Level::with_layout(1, &SpotLayout::new(3, 0, 0)));
    lot.add_level(Level::with_layout(2, &SpotLayout::new(1, 0, 2)));
    lot
}

/// `count` vehicles of one type with plates `<prefix>1`, `<prefix>2`, ...
pub fn fleet(vehicle_type: VehicleType, prefix: &str, count: usize) -> Vec<AnyVehicle> {
    (1..=count)
        .map(|i| AnyVehicle::new(vehicle_type, format!("{prefix}{i}")))
        .collect()
}
