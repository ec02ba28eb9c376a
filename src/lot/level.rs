use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::layout::SpotLayout;
use super::spot::ParkingSpot;
use super::SpotAddress;
use crate::error::ParkError;
use crate::vehicle::{Vehicle, VehicleType};

/// One floor of the lot: an ordered run of parking spots.
///
/// Every scan walks spots in stored order, so the first compatible free
/// spot always wins.
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    floor: u32,
    spots: Vec<ParkingSpot>,
}

impl Level {
    /// Creates a level of `spot_count` spots split by the default mix.
    ///
    /// See [`SpotLayout::proportional`] for how types are distributed.
    pub fn new(floor: u32, spot_count: usize) -> Self {
        Self::with_layout(floor, &SpotLayout::proportional(spot_count))
    }

    /// Creates a level with explicit per-type spot counts.
    pub fn with_layout(floor: u32, layout: &SpotLayout) -> Self {
        let spots = layout
            .spot_types()
            .enumerate()
            .map(|(index, vt)| ParkingSpot::new(index, vt))
            .collect();
        Self { floor, spots }
    }

    /// Floor identifier.
    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// All spots in stored order.
    pub fn spots(&self) -> &[ParkingSpot] {
        &self.spots
    }

    /// The spot at `index`, if it exists.
    pub fn spot(&self, index: usize) -> Option<&ParkingSpot> {
        self.spots.get(index)
    }

    /// Total number of spots.
    pub fn capacity(&self) -> usize {
        self.spots.len()
    }

    /// Retags the vacant spot at `index` to accept `vehicle_type`.
    ///
    /// # Errors
    ///
    /// [`ParkError::UnknownSpot`] for an out-of-range index,
    /// [`ParkError::SpotInUse`] if the spot is occupied.
    pub fn set_accepted_type(
        &mut self,
        index: usize,
        vehicle_type: VehicleType,
    ) -> Result<(), ParkError> {
        self.spots
            .get_mut(index)
            .ok_or(ParkError::UnknownSpot { index })?
            .set_accepted_type(vehicle_type)
    }

    /// Parks `vehicle` in the first free spot that accepts its type.
    ///
    /// Exactly one spot is mutated on success.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::NoAvailableSpot`] when no spot on this level
    /// can take the vehicle. Nothing is mutated.
    pub fn park_vehicle(&mut self, vehicle: &dyn Vehicle) -> Result<SpotAddress, ParkError> {
        let spot = self
            .spots
            .iter_mut()
            .find(|s| s.accepts(vehicle))
            .ok_or(ParkError::NoAvailableSpot {
                vehicle_type: vehicle.vehicle_type(),
            })?;
        spot.park_vehicle(vehicle)?;

        debug!(
            floor = self.floor,
            spot = spot.index(),
            plate = vehicle.license_plate(),
            "vehicle parked"
        );
        Ok(SpotAddress::new(self.floor, spot.index()))
    }

    /// Clears the spot holding `vehicle`, matched by license plate.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::NotParked`] when the vehicle is not on this
    /// level. Nothing is mutated.
    pub fn unpark_vehicle(&mut self, vehicle: &dyn Vehicle) -> Result<SpotAddress, ParkError> {
        let plate = vehicle.license_plate();
        let spot = self
            .spots
            .iter_mut()
            .find(|s| s.holds(plate))
            .ok_or_else(|| ParkError::NotParked {
                license_plate: plate.to_string(),
            })?;
        spot.unpark_vehicle()?;

        debug!(floor = self.floor, spot = spot.index(), plate, "vehicle left");
        Ok(SpotAddress::new(self.floor, spot.index()))
    }

    /// Where the vehicle with `license_plate` is parked on this level.
    pub fn find_vehicle(&self, license_plate: &str) -> Option<SpotAddress> {
        self.spots
            .iter()
            .find(|s| s.holds(license_plate))
            .map(|s| SpotAddress::new(self.floor, s.index()))
    }

    /// Free spots accepting `vehicle_type`.
    pub fn available_count(&self, vehicle_type: VehicleType) -> usize {
        self.spots
            .iter()
            .filter(|s| s.is_available() && s.accepted_type() == vehicle_type)
            .count()
    }

    /// Spots of any type that hold a vehicle.
    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|s| !s.is_available()).count()
    }

    /// Prints the availability report to stdout.
    pub fn display_availability(&self) {
        println!("{self}");
    }
}

/// Availability report: a `Level <floor> Availability:` header then one
/// line per spot.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} Availability:", self.floor)?;
        for spot in &self.spots {
            write!(
                f,
                "\nSpot {} ({}): {}",
                spot.index(),
                spot.accepted_type(),
                spot.status_label()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Car, Motorcycle, Truck};

    #[test]
    fn new_level_uses_proportional_layout() {
        let level = Level::new(1, 10);
        assert_eq!(level.floor(), 1);
        assert_eq!(level.capacity(), 10);
        assert_eq!(level.available_count(VehicleType::Car), 7);
        assert_eq!(level.available_count(VehicleType::Motorcycle), 2);
        assert_eq!(level.available_count(VehicleType::Truck), 1);
    }

    #[test]
    fn park_picks_first_matching_spot() {
        let mut level = Level::with_layout(1, &SpotLayout::new(2, 2, 0));
        let m = Motorcycle::new("M1234");
        assert_eq!(level.park_vehicle(&m), Ok(SpotAddress::new(1, 2)));
        let m2 = Motorcycle::new("M5678");
        assert_eq!(level.park_vehicle(&m2), Ok(SpotAddress::new(1, 3)));
        assert_eq!(level.occupied_count(), 2);
    }

    #[test]
    fn park_without_matching_spot_mutates_nothing() {
        let mut level = Level::with_layout(1, &SpotLayout::new(3, 1, 0));
        let truck = Truck::new("XYZ789");
        assert_eq!(
            level.park_vehicle(&truck),
            Err(ParkError::NoAvailableSpot {
                vehicle_type: VehicleType::Truck
            })
        );
        assert!(level.spots().iter().all(ParkingSpot::is_available));
    }

    #[test]
    fn full_level_rejects_further_vehicles_of_that_type() {
        let mut level = Level::with_layout(3, &SpotLayout::new(1, 0, 0));
        assert!(level.park_vehicle(&Car::new("A")).is_ok());
        assert!(level.park_vehicle(&Car::new("B")).is_err());
    }

    #[test]
    fn unpark_matches_by_plate() {
        let mut level = Level::with_layout(1, &SpotLayout::new(3, 0, 0));
        level.park_vehicle(&Car::new("A")).ok();
        level.park_vehicle(&Car::new("B")).ok();

        // a different value with the same plate is the same vehicle
        assert_eq!(level.unpark_vehicle(&Car::new("B")), Ok(SpotAddress::new(1, 1)));
        assert!(level.spot(1).is_some_and(ParkingSpot::is_available));
        assert!(level.spot(0).is_some_and(|s| s.holds("A")));
    }

    #[test]
    fn unpark_unknown_vehicle_mutates_nothing() {
        let mut level = Level::with_layout(1, &SpotLayout::new(2, 0, 0));
        level.park_vehicle(&Car::new("A")).ok();
        assert_eq!(
            level.unpark_vehicle(&Car::new("ZZZ")),
            Err(ParkError::NotParked {
                license_plate: "ZZZ".to_string()
            })
        );
        assert_eq!(level.occupied_count(), 1);
    }

    #[test]
    fn set_accepted_type_out_of_range() {
        let mut level = Level::new(1, 2);
        assert_eq!(
            level.set_accepted_type(5, VehicleType::Car),
            Err(ParkError::UnknownSpot { index: 5 })
        );
    }

    #[test]
    fn retagged_spot_zero_takes_car() {
        let mut level = Level::with_layout(1, &SpotLayout::uniform(VehicleType::Truck, 10));
        level.set_accepted_type(0, VehicleType::Car).ok();
        let car = Car::new("ABC123");
        assert_eq!(level.park_vehicle(&car), Ok(SpotAddress::new(1, 0)));
        assert!(level.spot(0).is_some_and(|s| s.holds("ABC123")));
        assert_eq!(level.unpark_vehicle(&car), Ok(SpotAddress::new(1, 0)));
        assert!(level.spot(0).is_some_and(ParkingSpot::is_available));
    }

    #[test]
    fn report_has_header_and_one_line_per_spot() {
        let mut level = Level::with_layout(2, &SpotLayout::new(2, 1, 0));
        level.park_vehicle(&Car::new("A")).ok();
        let report = level.to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Level 2 Availability:");
        assert_eq!(lines[1], "Spot 0 (CAR): Occupied");
        assert_eq!(lines[2], "Spot 1 (CAR): Available");
        assert_eq!(lines[3], "Spot 2 (MOTORCYCLE): Available");
    }
}
