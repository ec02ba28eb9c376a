//! Post-hoc KPI computation from simulation results.

use std::fmt;

use serde::Serialize;

use super::types::StepResult;
use crate::vehicle::VehicleType;

/// Aggregate indicators derived from a complete simulation run.
///
/// Computed post-hoc from `Vec<StepResult>` so the report always agrees
/// with the step data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    /// Vehicles that arrived over the run.
    pub total_arrivals: usize,
    /// Arrivals that found a spot.
    pub total_parked: usize,
    /// Arrivals turned away.
    pub total_rejected: usize,
    /// Rejected share of arrivals in percent.
    pub rejection_rate_pct: f64,
    /// Rejections by vehicle type, indexed like [`VehicleType::ALL`].
    pub rejected_by_type: [usize; 3],
    /// Vehicles that left over the run.
    pub total_departures: usize,
    /// Highest occupied-spot count seen after any step.
    pub peak_occupied: usize,
    /// Highest occupancy in percent.
    pub peak_occupancy_pct: f64,
    /// Mean occupancy over all steps in percent.
    pub mean_occupancy_pct: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    pub fn from_results(results: &[StepResult]) -> Self {
        let mut report = Self {
            total_arrivals: 0,
            total_parked: 0,
            total_rejected: 0,
            rejection_rate_pct: 0.0,
            rejected_by_type: [0; 3],
            total_departures: 0,
            peak_occupied: 0,
            peak_occupancy_pct: 0.0,
            mean_occupancy_pct: 0.0,
        };
        if results.is_empty() {
            return report;
        }

        let mut occupancy_sum = 0.0_f64;
        for r in results {
            report.total_arrivals += r.arrivals;
            report.total_parked += r.parked;
            report.total_rejected += r.rejected;
            report.total_departures += r.departures;
            for (acc, n) in report.rejected_by_type.iter_mut().zip(r.rejected_by_type) {
                *acc += n;
            }
            report.peak_occupied = report.peak_occupied.max(r.occupied);
            report.peak_occupancy_pct = report.peak_occupancy_pct.max(r.occupancy_pct());
            occupancy_sum += r.occupancy_pct();
        }

        report.mean_occupancy_pct = occupancy_sum / results.len() as f64;
        if report.total_arrivals > 0 {
            report.rejection_rate_pct =
                100.0 * report.total_rejected as f64 / report.total_arrivals as f64;
        }
        report
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Arrivals:          {}", self.total_arrivals)?;
        writeln!(f, "Parked:            {}", self.total_parked)?;
        writeln!(
            f,
            "Rejected:          {} ({:.1}%)",
            self.total_rejected, self.rejection_rate_pct
        )?;
        for (vt, n) in VehicleType::ALL.iter().zip(self.rejected_by_type) {
            writeln!(f, "  {:<16} {n}", format!("{vt}:"))?;
        }
        writeln!(f, "Departures:        {}", self.total_departures)?;
        writeln!(
            f,
            "Peak occupancy:    {} spots ({:.1}%)",
            self.peak_occupied, self.peak_occupancy_pct
        )?;
        write!(f, "Mean occupancy:    {:.1}%", self.mean_occupancy_pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(arrivals: usize, rejected: usize, departures: usize, occupied: usize) -> StepResult {
        StepResult {
            timestep: 0,
            arrivals,
            parked: arrivals - rejected,
            rejected,
            rejected_by_type: [0, rejected, 0],
            departures,
            occupied,
            capacity: 10,
        }
    }

    #[test]
    fn totals_and_rejection_rate() {
        let results = vec![make_result(4, 0, 0, 4), make_result(4, 1, 1, 6)];
        let kpi = KpiReport::from_results(&results);
        assert_eq!(kpi.total_arrivals, 8);
        assert_eq!(kpi.total_parked, 7);
        assert_eq!(kpi.total_rejected, 1);
        assert_eq!(kpi.rejected_by_type, [0, 1, 0]);
        assert!((kpi.rejection_rate_pct - 12.5).abs() < 1e-9);
    }

    #[test]
    fn peak_and_mean_occupancy() {
        let results = vec![
            make_result(0, 0, 0, 2),
            make_result(0, 0, 0, 8),
            make_result(0, 0, 0, 5),
        ];
        let kpi = KpiReport::from_results(&results);
        assert_eq!(kpi.peak_occupied, 8);
        assert!((kpi.peak_occupancy_pct - 80.0).abs() < 1e-9);
        assert!((kpi.mean_occupancy_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_results() {
        let kpi = KpiReport::from_results(&[]);
        assert_eq!(kpi.total_arrivals, 0);
        assert_eq!(kpi.rejection_rate_pct, 0.0);
    }

    #[test]
    fn display_lists_every_type() {
        let kpi = KpiReport::from_results(&[make_result(2, 2, 0, 0)]);
        let s = kpi.to_string();
        assert!(s.contains("MOTORCYCLE:"));
        assert!(s.contains("TRUCK:"));
    }
}
