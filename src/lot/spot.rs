use serde::Serialize;

use crate::error::{AssignmentFault, ParkError};
use crate::vehicle::{ParkedVehicle, Vehicle, VehicleType};

/// A single vehicle-sized slot that accepts exactly one [`VehicleType`].
///
/// Invariant: `occupant` is only ever set to a vehicle whose type equals
/// `accepted_type`.
#[derive(Debug, Clone, Serialize)]
pub struct ParkingSpot {
    index: usize,
    accepted_type: VehicleType,
    occupant: Option<ParkedVehicle>,
}

impl ParkingSpot {
    /// Creates an empty spot at position `index` within its level.
    pub fn new(index: usize, accepted_type: VehicleType) -> Self {
        Self {
            index,
            accepted_type,
            occupant: None,
        }
    }

    /// Position of this spot within its level.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The vehicle type this spot accepts.
    pub fn accepted_type(&self) -> VehicleType {
        self.accepted_type
    }

    /// The vehicle currently parked here, if any.
    pub fn occupant(&self) -> Option<&ParkedVehicle> {
        self.occupant.as_ref()
    }

    /// Returns `true` when no vehicle is parked here.
    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    /// Returns `true` when the spot is free and accepts the vehicle's type.
    pub fn accepts(&self, vehicle: &dyn Vehicle) -> bool {
        self.is_available() && vehicle.vehicle_type() == self.accepted_type
    }

    /// Returns `true` when the parked vehicle has the given plate.
    pub fn holds(&self, license_plate: &str) -> bool {
        self.occupant
            .as_ref()
            .is_some_and(|o| o.license_plate == license_plate)
    }

    /// Parks `vehicle` here.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::InvalidAssignment`] if the spot is occupied or
    /// accepts a different vehicle type. The spot is left unchanged.
    pub fn park_vehicle(&mut self, vehicle: &dyn Vehicle) -> Result<(), ParkError> {
        let reason = if !self.is_available() {
            Some(AssignmentFault::Occupied)
        } else if vehicle.vehicle_type() != self.accepted_type {
            Some(AssignmentFault::TypeMismatch {
                accepted: self.accepted_type,
                offered: vehicle.vehicle_type(),
            })
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(ParkError::InvalidAssignment {
                spot: self.index,
                license_plate: vehicle.license_plate().to_string(),
                reason,
            });
        }

        self.occupant = Some(ParkedVehicle::of(vehicle));
        Ok(())
    }

    /// Clears the spot and returns the vehicle that was parked.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::NotOccupied`] when the spot is already empty.
    pub fn unpark_vehicle(&mut self) -> Result<ParkedVehicle, ParkError> {
        self.occupant
            .take()
            .ok_or(ParkError::NotOccupied { spot: self.index })
    }

    /// Changes the accepted type of a vacant spot.
    ///
    /// # Errors
    ///
    /// Returns [`ParkError::SpotInUse`] if a vehicle is parked here.
    pub fn set_accepted_type(&mut self, vehicle_type: VehicleType) -> Result<(), ParkError> {
        if !self.is_available() {
            return Err(ParkError::SpotInUse { index: self.index });
        }
        self.accepted_type = vehicle_type;
        Ok(())
    }

    /// `"Available"` or `"Occupied"`.
    pub fn status_label(&self) -> &'static str {
        if self.is_available() {
            "Available"
        } else {
            "Occupied"
        }
    }
}
