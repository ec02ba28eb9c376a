//! Parking spots, levels, and the lot that aggregates them.

pub mod layout;
pub mod level;
pub mod parking_lot;
pub mod spot;

use std::fmt;

use serde::Serialize;

pub use layout::{SpotLayout, SpotMix};
pub use level::Level;
pub use parking_lot::{ParkingLot, SpotRow, TypeOccupancy};
pub use spot::ParkingSpot;

/// Location of a spot: floor number plus index within that level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpotAddress {
    pub floor: u32,
    pub spot: usize,
}

impl SpotAddress {
    pub fn new(floor: u32, spot: usize) -> Self {
        Self { floor, spot }
    }
}

impl fmt::Display for SpotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}, spot {}", self.floor, self.spot)
    }
}
