//! Scripted walkthrough: build a lot, park a few vehicles, show availability.

use tracing::warn;

use crate::lot::{Level, ParkingLot};
use crate::vehicle::{AnyVehicle, Car, Motorcycle, Truck, Vehicle};

/// The two-level lot the walkthrough uses: floors 1 and 2 with 10 and 8
/// spots in the default mix.
pub fn demo_lot() -> ParkingLot {
    let mut lot = ParkingLot::new();
    lot.add_level(Level::new(1, 10));
    lot.add_level(Level::new(2, 8));
    lot
}

/// The sample vehicles, in parking order.
pub fn demo_vehicles() -> Vec<AnyVehicle> {
    vec![
        Car::new("ABC123").into(),
        Truck::new("XYZ789").into(),
        Motorcycle::new("M1234").into(),
    ]
}

/// Runs the walkthrough against `lot`, printing each outcome and the final
/// availability to stdout.
pub fn run(lot: &mut ParkingLot) {
    for vehicle in demo_vehicles() {
        match lot.park_vehicle(&vehicle) {
            Ok(at) => println!(
                "Parked {} {} at {at}",
                vehicle.vehicle_type(),
                vehicle.license_plate()
            ),
            Err(e) => {
                warn!(error = %e, "demo vehicle not parked");
                println!("Could not park {}: {e}", vehicle.license_plate());
            }
        }
    }
    println!();
    lot.display_availability();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_vehicle_fits_on_first_level() {
        let mut lot = demo_lot();
        for v in demo_vehicles() {
            let at = lot.park_vehicle(&v);
            assert_eq!(at.map(|a| a.floor), Ok(1), "{}", v.license_plate());
        }
        assert_eq!(lot.occupied_count(), 3);
    }

    #[test]
    fn run_parks_all_samples() {
        let mut lot = demo_lot();
        run(&mut lot);
        for v in demo_vehicles() {
            assert!(lot.find_vehicle(v.license_plate()).is_some());
        }
    }
}
