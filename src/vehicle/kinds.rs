use super::types::{Vehicle, VehicleType};

macro_rules! vehicle_kind {
    ($(#[$doc:meta])* $name:ident => $vt:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Eq)]
        pub struct $name {
            license_plate: String,
        }

        impl $name {
            /// Creates the vehicle with the given license plate.
            pub fn new(license_plate: impl Into<String>) -> Self {
                Self {
                    license_plate: license_plate.into(),
                }
            }
        }

        impl Vehicle for $name {
            fn license_plate(&self) -> &str {
                &self.license_plate
            }

            fn vehicle_type(&self) -> VehicleType {
                $vt
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.license_plate == other.license_plate
            }
        }
    };
}

vehicle_kind!(
    /// A passenger car. Parks only in `Car` spots.
    Car => VehicleType::Car
);
vehicle_kind!(
    /// A motorcycle. Parks only in `Motorcycle` spots.
    Motorcycle => VehicleType::Motorcycle
);
vehicle_kind!(
    /// A truck. Parks only in `Truck` spots.
    Truck => VehicleType::Truck
);

/// Any vehicle kind, chosen at runtime.
///
/// Enum dispatch keeps config- and traffic-generated vehicles concrete
/// without boxing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyVehicle {
    Car(Car),
    Motorcycle(Motorcycle),
    Truck(Truck),
}

impl AnyVehicle {
    /// Builds the concrete kind matching `vehicle_type`.
    pub fn new(vehicle_type: VehicleType, license_plate: impl Into<String>) -> Self {
        match vehicle_type {
            VehicleType::Car => Self::Car(Car::new(license_plate)),
            VehicleType::Motorcycle => Self::Motorcycle(Motorcycle::new(license_plate)),
            VehicleType::Truck => Self::Truck(Truck::new(license_plate)),
        }
    }
}

impl Vehicle for AnyVehicle {
    fn license_plate(&self) -> &str {
        match self {
            Self::Car(v) => v.license_plate(),
            Self::Motorcycle(v) => v.license_plate(),
            Self::Truck(v) => v.license_plate(),
        }
    }

    fn vehicle_type(&self) -> VehicleType {
        match self {
            Self::Car(_) => VehicleType::Car,
            Self::Motorcycle(_) => VehicleType::Motorcycle,
            Self::Truck(_) => VehicleType::Truck,
        }
    }
}

impl From<Car> for AnyVehicle {
    fn from(v: Car) -> Self {
        Self::Car(v)
    }
}

impl From<Motorcycle> for AnyVehicle {
    fn from(v: Motorcycle) -> Self {
        Self::Motorcycle(v)
    }
}

impl From<Truck> for AnyVehicle {
    fn from(v: Truck) -> Self {
        Self::Truck(v)
    }
}
