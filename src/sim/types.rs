//! Per-step simulation record.

use std::fmt;

use serde::Serialize;

use crate::vehicle::VehicleType;

/// Complete record of one simulation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Step index.
    pub timestep: usize,
    /// Vehicles that arrived this step.
    pub arrivals: usize,
    /// Arrivals that found a spot.
    pub parked: usize,
    /// Arrivals turned away for lack of a compatible spot.
    pub rejected: usize,
    /// Rejections broken down by vehicle type, indexed like [`VehicleType::ALL`].
    pub rejected_by_type: [usize; 3],
    /// Vehicles that left this step (processed before arrivals).
    pub departures: usize,
    /// Occupied spots after the step.
    pub occupied: usize,
    /// Total spots in the lot.
    pub capacity: usize,
}

impl StepResult {
    /// Free spots after the step.
    pub fn available(&self) -> usize {
        self.capacity - self.occupied
    }

    /// Occupied share of capacity in percent; zero for an empty lot.
    pub fn occupancy_pct(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            100.0 * self.occupied as f64 / self.capacity as f64
        }
    }

    /// Rejections of one vehicle type.
    pub fn rejected_of(&self, vehicle_type: VehicleType) -> usize {
        self.rejected_by_type[vehicle_type.index()]
    }
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>3} | in={} parked={} rejected={} out={} | occupied={:>3}/{} ({:>5.1}%)",
            self.timestep,
            self.arrivals,
            self.parked,
            self.rejected,
            self.departures,
            self.occupied,
            self.capacity,
            self.occupancy_pct(),
        )
    }
}
