//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::lot::{Level, ParkingSpot};
use crate::vehicle::{Vehicle, VehicleType};

/// One level with its spots.
#[derive(Debug, Serialize)]
pub struct LevelView {
    pub floor: u32,
    pub capacity: usize,
    pub available: usize,
    pub spots: Vec<SpotView>,
}

impl From<&Level> for LevelView {
    fn from(level: &Level) -> Self {
        Self {
            floor: level.floor(),
            capacity: level.capacity(),
            available: level.capacity() - level.occupied_count(),
            spots: level.spots().iter().map(SpotView::from).collect(),
        }
    }
}

/// One spot, using the same status words as the text report.
#[derive(Debug, Serialize)]
pub struct SpotView {
    pub index: usize,
    pub accepted_type: VehicleType,
    /// `"Available"` or `"Occupied"`.
    pub status: &'static str,
    pub license_plate: Option<String>,
}

impl From<&ParkingSpot> for SpotView {
    fn from(spot: &ParkingSpot) -> Self {
        Self {
            index: spot.index(),
            accepted_type: spot.accepted_type(),
            status: spot.status_label(),
            license_plate: spot.occupant().map(|o| o.license_plate.clone()),
        }
    }
}

/// Body of `POST /park` and `POST /unpark`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleRequest {
    pub license_plate: String,
    pub vehicle_type: VehicleType,
}

impl Vehicle for VehicleRequest {
    fn license_plate(&self) -> &str {
        &self.license_plate
    }

    fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }
}

/// Error response body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
