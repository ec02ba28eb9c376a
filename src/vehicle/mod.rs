//! Vehicle kinds and the trait the lot parks against.

/// Concrete vehicle kinds and runtime dispatch over them.
pub mod kinds;
pub mod types;

pub use kinds::{AnyVehicle, Car, Motorcycle, Truck};
pub use types::{ParkedVehicle, Vehicle, VehicleType};
