//! Seeded arrival and departure generator.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::config::TrafficConfig;
use crate::lot::SpotMix;
use crate::vehicle::{AnyVehicle, VehicleType};

/// Random traffic source for the simulation.
///
/// Arrivals per step are uniform in `0..=max_arrivals_per_step`; each
/// arrival's type is drawn from the configured mix. Plates are sequential
/// per type (`CAR-0001`, `TRK-0002`, ...), so two generators built from the
/// same config and seed produce identical vehicles.
#[derive(Debug, Clone)]
pub struct Traffic {
    max_arrivals_per_step: usize,
    departure_probability: f64,
    mix: SpotMix,
    next_plate: u64,
    rng: StdRng,
}

impl Traffic {
    /// Creates a generator from traffic settings and a seed.
    pub fn new(config: &TrafficConfig, seed: u64) -> Self {
        Self {
            max_arrivals_per_step: config.max_arrivals_per_step,
            departure_probability: config.departure_probability.clamp(0.0, 1.0),
            mix: if config.mix.is_valid() {
                config.mix
            } else {
                SpotMix::only(VehicleType::Car)
            },
            next_plate: 1,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Vehicles arriving this step, in arrival order.
    pub fn arrivals(&mut self) -> Vec<AnyVehicle> {
        let count = self.rng.random_range(0..=self.max_arrivals_per_step);
        (0..count)
            .map(|_| {
                let vt = self.sample_type();
                let plate = self.plate_for(vt);
                AnyVehicle::new(vt, plate)
            })
            .collect()
    }

    /// Decides whether one parked vehicle leaves this step.
    pub fn departs(&mut self) -> bool {
        self.rng.random_bool(self.departure_probability)
    }

    fn sample_type(&mut self) -> VehicleType {
        let mut pick = self.rng.random::<f64>() * self.mix.total();
        for vt in VehicleType::ALL {
            let w = self.mix.weight(vt);
            if pick < w {
                return vt;
            }
            pick -= w;
        }
        // float rounding can leave pick just past the last bucket
        VehicleType::ALL
            .into_iter()
            .rev()
            .find(|vt| self.mix.weight(*vt) > 0.0)
            .unwrap_or(VehicleType::Car)
    }

    fn plate_for(&mut self, vehicle_type: VehicleType) -> String {
        let prefix = match vehicle_type {
            VehicleType::Motorcycle => "MC",
            VehicleType::Car => "CAR",
            VehicleType::Truck => "TRK",
        };
        let plate = format!("{prefix}-{:04}", self.next_plate);
        self.next_plate += 1;
        plate
    }
}
