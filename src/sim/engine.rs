//! Simulation engine that drives a lot with generated traffic.

use tracing::{info, warn};

use super::traffic::Traffic;
use super::types::StepResult;
use crate::config::LotConfig;
use crate::error::ParkError;
use crate::lot::ParkingLot;
use crate::vehicle::ParkedVehicle;

/// Simulation engine owning the lot, the traffic source, and the list of
/// vehicles currently parked.
///
/// Each step first lets parked vehicles leave, then parks new arrivals.
pub struct Engine {
    lot: ParkingLot,
    traffic: Traffic,
    parked: Vec<ParkedVehicle>,
    total_steps: usize,
}

impl Engine {
    /// Creates an engine from its parts.
    ///
    /// # Arguments
    ///
    /// * `lot` - Lot to drive; may already hold vehicles, which never leave
    /// * `traffic` - Arrival and departure source
    /// * `total_steps` - Steps executed by [`Engine::run`]
    pub fn new(lot: ParkingLot, traffic: Traffic, total_steps: usize) -> Self {
        Self {
            lot,
            traffic,
            parked: Vec::new(),
            total_steps,
        }
    }

    /// Builds the lot and traffic described by a validated config.
    pub fn from_config(config: &LotConfig) -> Self {
        Self::new(
            config.build_lot(),
            Traffic::new(&config.traffic, config.simulation.seed),
            config.simulation.steps,
        )
    }

    /// Executes one step and returns its record.
    pub fn step(&mut self, t: usize) -> StepResult {
        // 1. Departures, in the order vehicles arrived
        let mut departures = 0;
        let mut staying = Vec::with_capacity(self.parked.len());
        for vehicle in std::mem::take(&mut self.parked) {
            if !self.traffic.departs() {
                staying.push(vehicle);
                continue;
            }
            match self.lot.unpark_vehicle(&vehicle) {
                Ok(_) => departures += 1,
                Err(e) => warn!(error = %e, "departing vehicle was not in the lot"),
            }
        }
        self.parked = staying;

        // 2. Arrivals
        let arrivals = self.traffic.arrivals();
        let mut parked = 0;
        let mut rejected_by_type = [0_usize; 3];
        for vehicle in &arrivals {
            match self.lot.park_vehicle(vehicle) {
                Ok(_) => {
                    parked += 1;
                    self.parked.push(ParkedVehicle::of(vehicle));
                }
                Err(ParkError::NoAvailableSpot { vehicle_type }) => {
                    rejected_by_type[vehicle_type.index()] += 1;
                }
                Err(e) => warn!(error = %e, "arrival could not be parked"),
            }
        }

        StepResult {
            timestep: t,
            arrivals: arrivals.len(),
            parked,
            rejected: rejected_by_type.iter().sum(),
            rejected_by_type,
            departures,
            occupied: self.lot.occupied_count(),
            capacity: self.lot.capacity(),
        }
    }

    /// Executes all steps and returns the complete step record vector.
    pub fn run(&mut self) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(self.total_steps);
        for t in 0..self.total_steps {
            results.push(self.step(t));
        }
        info!(
            steps = self.total_steps,
            occupied = self.lot.occupied_count(),
            "simulation finished"
        );
        results
    }

    /// Total steps executed by [`Engine::run`].
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns a reference to the lot.
    pub fn lot(&self) -> &ParkingLot {
        &self.lot
    }

    /// Consumes the engine and returns the lot in its final state.
    pub fn into_lot(self) -> ParkingLot {
        self.lot
    }
}
