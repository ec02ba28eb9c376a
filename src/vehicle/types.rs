//! Common types and traits for vehicles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size class of a vehicle, also used to tag what a spot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Motorcycle,
    Car,
    Truck,
}

impl VehicleType {
    /// All vehicle types in declaration order.
    pub const ALL: [VehicleType; 3] = [Self::Motorcycle, Self::Car, Self::Truck];

    /// Position of this type in [`VehicleType::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Motorcycle => 0,
            Self::Car => 1,
            Self::Truck => 2,
        }
    }

    /// Lowercase name used in config files and CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motorcycle => "motorcycle",
            Self::Car => "car",
            Self::Truck => "truck",
        }
    }

    /// Parses the lowercase name produced by [`VehicleType::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "motorcycle" => Some(Self::Motorcycle),
            "car" => Some(Self::Car),
            "truck" => Some(Self::Truck),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Motorcycle => "MOTORCYCLE",
            Self::Car => "CAR",
            Self::Truck => "TRUCK",
        };
        f.write_str(name)
    }
}

/// Trait implemented by everything that can occupy a parking spot.
///
/// Two vehicles are the same vehicle when their license plates match,
/// regardless of which concrete type carries them.
pub trait Vehicle {
    /// Caller-supplied license plate. Not validated for format.
    fn license_plate(&self) -> &str;

    /// Size class, fixed at construction.
    fn vehicle_type(&self) -> VehicleType;

    /// Returns `true` when `other` carries the same license plate.
    fn same_vehicle(&self, other: &dyn Vehicle) -> bool {
        self.license_plate() == other.license_plate()
    }
}

/// Owned record of the vehicle occupying a spot.
///
/// The lot never owns the caller's vehicle value; it keeps this snapshot.
/// Equality compares license plates only.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ParkedVehicle {
    pub license_plate: String,
    pub vehicle_type: VehicleType,
}

impl ParkedVehicle {
    /// Snapshots any vehicle.
    pub fn of(vehicle: &dyn Vehicle) -> Self {
        Self {
            license_plate: vehicle.license_plate().to_string(),
            vehicle_type: vehicle.vehicle_type(),
        }
    }
}

impl PartialEq for ParkedVehicle {
    fn eq(&self, other: &Self) -> bool {
        self.license_plate == other.license_plate
    }
}

impl Vehicle for ParkedVehicle {
    fn license_plate(&self) -> &str {
        &self.license_plate
    }

    fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}
