//! Error type shared by every park/unpark operation.

use thiserror::Error;

use crate::vehicle::VehicleType;

/// Why a park, unpark, or spot reconfiguration did not happen.
///
/// Spots, levels, and the lot all report through this one type. A caller
/// that only cares about success can use `.is_ok()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkError {
    /// A vehicle was assigned directly to a spot that cannot take it.
    #[error("cannot assign {license_plate} to spot {spot}: {reason}")]
    InvalidAssignment {
        /// Spot index within its level.
        spot: usize,
        /// Plate of the rejected vehicle.
        license_plate: String,
        /// What was wrong with the assignment.
        reason: AssignmentFault,
    },
    /// Unpark was called on a spot with no occupant.
    #[error("spot {spot} is not occupied")]
    NotOccupied {
        /// Spot index within its level.
        spot: usize,
    },
    /// No free spot accepts this vehicle type.
    #[error("no available spot for {vehicle_type}")]
    NoAvailableSpot {
        /// Type of the vehicle that could not be placed.
        vehicle_type: VehicleType,
    },
    /// The vehicle is not parked where it was looked for.
    #[error("vehicle {license_plate} is not parked here")]
    NotParked {
        /// Plate that was searched for.
        license_plate: String,
    },
    /// The plate already occupies a spot in the lot.
    #[error("vehicle {license_plate} is already parked at level {floor}, spot {spot}")]
    AlreadyParked {
        /// Plate of the duplicate vehicle.
        license_plate: String,
        /// Floor holding the existing occupant.
        floor: u32,
        /// Spot index holding the existing occupant.
        spot: usize,
    },
    /// A spot index outside the level was addressed.
    #[error("level has no spot {index}")]
    UnknownSpot {
        /// Requested spot index.
        index: usize,
    },
    /// A vacant spot was required but an occupant is present.
    #[error("spot {index} is occupied and cannot be retagged")]
    SpotInUse {
        /// Requested spot index.
        index: usize,
    },
}

/// Reason attached to [`ParkError::InvalidAssignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentFault {
    /// The spot already holds a vehicle.
    Occupied,
    /// The spot accepts a different vehicle type.
    TypeMismatch {
        /// Type the spot accepts.
        accepted: VehicleType,
        /// Type of the offered vehicle.
        offered: VehicleType,
    },
}

impl std::fmt::Display for AssignmentFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupied => write!(f, "spot is occupied"),
            Self::TypeMismatch { accepted, offered } => {
                write!(f, "spot accepts {accepted}, vehicle is {offered}")
            }
        }
    }
}
