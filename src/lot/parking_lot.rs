//! Top-level aggregate of levels.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use serde::Serialize;
use tracing::{info, warn};

use super::SpotAddress;
use super::level::Level;
use crate::error::ParkError;
use crate::vehicle::{Vehicle, VehicleType};

/// The whole parking lot: levels scanned in insertion order.
///
/// Construct one with [`ParkingLot::new`] and pass it to whoever needs it.
/// [`ParkingLot::get_instance`] exists for callers that want a single
/// process-wide lot; it serializes access through a mutex.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParkingLot {
    levels: Vec<Level>,
}

/// Occupied and total spot counts for one vehicle type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeOccupancy {
    pub occupied: usize,
    pub total: usize,
}

impl TypeOccupancy {
    /// Free spots of this type.
    pub fn available(&self) -> usize {
        self.total - self.occupied
    }
}

/// One row of a lot snapshot: a single spot and its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotRow {
    pub floor: u32,
    pub spot: usize,
    pub accepted_type: VehicleType,
    pub license_plate: Option<String>,
}

impl ParkingLot {
    /// Creates an empty lot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide lot, creating it empty on first use.
    ///
    /// Every call returns the same instance. All access goes through the
    /// mutex, so mutations from different threads are serialized.
    pub fn get_instance() -> &'static Mutex<ParkingLot> {
        static INSTANCE: OnceLock<Mutex<ParkingLot>> = OnceLock::new();
        INSTANCE.get_or_init(|| Mutex::new(ParkingLot::new()))
    }

    /// Appends a level. Floors are expected to be unique; a repeated floor
    /// is accepted but logged.
    pub fn add_level(&mut self, level: Level) {
        if self.level(level.floor()).is_some() {
            warn!(floor = level.floor(), "floor already present in lot");
        }
        info!(
            floor = level.floor(),
            spots = level.capacity(),
            "level added"
        );
        self.levels.push(level);
    }

    /// Levels in insertion order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// First level with the given floor number.
    pub fn level(&self, floor: u32) -> Option<&Level> {
        self.levels.iter().find(|l| l.floor() == floor)
    }

    /// Mutable access to the first level with the given floor number.
    pub fn level_mut(&mut self, floor: u32) -> Option<&mut Level> {
        self.levels.iter_mut().find(|l| l.floor() == floor)
    }

    /// Parks `vehicle` on the first level with a free compatible spot.
    ///
    /// # Errors
    ///
    /// - [`ParkError::AlreadyParked`] if the plate already occupies a spot.
    /// - [`ParkError::NoAvailableSpot`] if every level is full for the
    ///   vehicle's type.
    ///
    /// Nothing is mutated on error.
    pub fn park_vehicle(&mut self, vehicle: &dyn Vehicle) -> Result<SpotAddress, ParkError> {
        if let Some(at) = self.find_vehicle(vehicle.license_plate()) {
            return Err(ParkError::AlreadyParked {
                license_plate: vehicle.license_plate().to_string(),
                floor: at.floor,
                spot: at.spot,
            });
        }

        for level in &mut self.levels {
            match level.park_vehicle(vehicle) {
                Ok(at) => return Ok(at),
                Err(ParkError::NoAvailableSpot { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Err(ParkError::NoAvailableSpot {
            vehicle_type: vehicle.vehicle_type(),
        })
    }

    /// Removes `vehicle` from whichever level holds it.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::NotParked`] if no level holds the plate.
    pub fn unpark_vehicle(&mut self, vehicle: &dyn Vehicle) -> Result<SpotAddress, ParkError> {
        for level in &mut self.levels {
            match level.unpark_vehicle(vehicle) {
                Ok(at) => return Ok(at),
                Err(ParkError::NotParked { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Err(ParkError::NotParked {
            license_plate: vehicle.license_plate().to_string(),
        })
    }

    /// Where the vehicle with `license_plate` is parked, if anywhere.
    pub fn find_vehicle(&self, license_plate: &str) -> Option<SpotAddress> {
        self.levels
            .iter()
            .find_map(|l| l.find_vehicle(license_plate))
    }

    /// Free spots accepting `vehicle_type` across all levels.
    pub fn available_count(&self, vehicle_type: VehicleType) -> usize {
        self.levels
            .iter()
            .map(|l| l.available_count(vehicle_type))
            .sum()
    }

    /// Occupied spots across all levels.
    pub fn occupied_count(&self) -> usize {
        self.levels.iter().map(Level::occupied_count).sum()
    }

    /// Total spots across all levels.
    pub fn capacity(&self) -> usize {
        self.levels.iter().map(Level::capacity).sum()
    }

    /// Per-type occupied and total counts. Types with no spots are omitted.
    pub fn occupancy(&self) -> BTreeMap<VehicleType, TypeOccupancy> {
        let mut by_type: BTreeMap<VehicleType, TypeOccupancy> = BTreeMap::new();
        for spot in self.levels.iter().flat_map(Level::spots) {
            let entry = by_type.entry(spot.accepted_type()).or_default();
            entry.total += 1;
            if !spot.is_available() {
                entry.occupied += 1;
            }
        }
        by_type
    }

    /// Flat per-spot view of the whole lot, level by level.
    pub fn snapshot(&self) -> Vec<SpotRow> {
        self.levels
            .iter()
            .flat_map(|level| {
                level.spots().iter().map(move |s| SpotRow {
                    floor: level.floor(),
                    spot: s.index(),
                    accepted_type: s.accepted_type(),
                    license_plate: s.occupant().map(|o| o.license_plate.clone()),
                })
            })
            .collect()
    }

    /// Prints every level's availability report to stdout, in level order.
    pub fn display_availability(&self) {
        for level in &self.levels {
            level.display_availability();
        }
    }
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.levels.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;
    use crate::lot::SpotLayout;
    use crate::vehicle::{Car, Motorcycle, Truck};

    fn two_level_lot() -> ParkingLot {
        let mut lot = ParkingLot::new();
        lot.add_level(Level::with_layout(1, &SpotLayout::new(1, 1, 0)));
        lot.add_level(Level::with_layout(2, &SpotLayout::new(1, 0, 1)));
        lot
    }

    #[test]
    fn get_instance_is_identical_across_calls() {
        let a = ParkingLot::get_instance();
        let b = ParkingLot::get_instance();
        assert!(ptr::eq(a, b));
    }

    #[test]
    fn add_level_keeps_insertion_order() {
        let lot = two_level_lot();
        let floors: Vec<u32> = lot.levels().iter().map(Level::floor).collect();
        assert_eq!(floors, vec![1, 2]);
        assert_eq!(lot.capacity(), 4);
    }

    #[test]
    fn park_spills_to_next_level() {
        let mut lot = two_level_lot();
        assert_eq!(lot.park_vehicle(&Car::new("C1")), Ok(SpotAddress::new(1, 0)));
        assert_eq!(lot.park_vehicle(&Car::new("C2")), Ok(SpotAddress::new(2, 0)));
        assert_eq!(
            lot.park_vehicle(&Car::new("C3")),
            Err(ParkError::NoAvailableSpot {
                vehicle_type: VehicleType::Car
            })
        );
    }

    #[test]
    fn truck_only_fits_on_second_level() {
        let mut lot = two_level_lot();
        assert_eq!(lot.park_vehicle(&Truck::new("XYZ789")), Ok(SpotAddress::new(2, 1)));
    }

    #[test]
    fn duplicate_plate_is_rejected() {
        let mut lot = two_level_lot();
        lot.park_vehicle(&Car::new("ABC123")).ok();
        assert_eq!(
            lot.park_vehicle(&Car::new("ABC123")),
            Err(ParkError::AlreadyParked {
                license_plate: "ABC123".to_string(),
                floor: 1,
                spot: 0,
            })
        );
        assert_eq!(lot.occupied_count(), 1);
    }

    #[test]
    fn unpark_searches_every_level() {
        let mut lot = two_level_lot();
        lot.park_vehicle(&Car::new("C1")).ok();
        lot.park_vehicle(&Car::new("C2")).ok();
        assert_eq!(lot.unpark_vehicle(&Car::new("C2")), Ok(SpotAddress::new(2, 0)));
        assert_eq!(lot.find_vehicle("C2"), None);
        assert_eq!(lot.find_vehicle("C1"), Some(SpotAddress::new(1, 0)));
    }

    #[test]
    fn unpark_never_parked_fails() {
        let mut lot = two_level_lot();
        let before = lot.snapshot();
        assert!(lot.unpark_vehicle(&Motorcycle::new("M1234")).is_err());
        assert_eq!(lot.snapshot(), before);
    }

    #[test]
    fn occupancy_groups_by_type() {
        let mut lot = two_level_lot();
        lot.park_vehicle(&Car::new("C1")).ok();
        let occ = lot.occupancy();
        assert_eq!(
            occ.get(&VehicleType::Car),
            Some(&TypeOccupancy {
                occupied: 1,
                total: 2
            })
        );
        assert_eq!(occ.get(&VehicleType::Truck).map(TypeOccupancy::available), Some(1));
    }

    #[test]
    fn snapshot_lists_every_spot() {
        let mut lot = two_level_lot();
        lot.park_vehicle(&Motorcycle::new("M1")).ok();
        let rows = lot.snapshot();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].license_plate.as_deref(), Some("M1"));
        assert_eq!(rows[2].floor, 2);
    }

    #[test]
    fn display_joins_level_reports_in_order() {
        let lot = two_level_lot();
        let text = lot.to_string();
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| l.ends_with("Availability:"))
            .collect();
        assert_eq!(headers, vec!["Level 1 Availability:", "Level 2 Availability:"]);
        assert_eq!(text.lines().count(), 6);
    }
}
