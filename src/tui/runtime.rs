//! Simulation runner and TUI application state.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::LotConfig;
use crate::lot::ParkingLot;
use crate::sim::engine::Engine;
use crate::sim::types::StepResult;

/// Maximum number of history entries kept for the rolling chart.
const MAX_HISTORY: usize = 200;

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [1000, 500, 250, 100, 50, 20];

/// Default speed index (250 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// TUI application state.
pub struct App {
    engine: Engine,
    /// Current configuration (kept for restart/preset switch).
    config: LotConfig,
    /// Rolling history of step results for the chart.
    pub history: VecDeque<StepResult>,
    /// Next step to execute.
    pub timestep: usize,
    /// Total steps in the simulation.
    pub total_steps: usize,
    /// Cumulative arrivals turned away.
    pub total_rejected: usize,
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset, or `"custom"` for a loaded file.
    pub preset_name: String,
    /// Display name of the lot from `[lot] name`.
    pub lot_name: String,
}

impl App {
    /// Creates an app from an already validated configuration.
    pub fn new(config: LotConfig, preset_name: &str) -> Self {
        let engine = Engine::from_config(&config);
        let total_steps = engine.total_steps();
        let lot_name = config.lot.name.clone();
        Self {
            engine,
            config,
            history: VecDeque::with_capacity(MAX_HISTORY),
            timestep: 0,
            total_steps,
            total_rejected: 0,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: preset_name.to_string(),
            lot_name,
        }
    }

    /// Creates an app from a preset name, falling back to `demo`.
    pub fn from_preset(name: &str) -> Self {
        match LotConfig::from_preset(name) {
            Ok(config) => Self::new(config, name),
            Err(_) => Self::new(LotConfig::demo(), "demo"),
        }
    }

    /// Advances the simulation by one step if not finished.
    pub fn tick(&mut self) {
        if self.is_finished() {
            return;
        }
        let result = self.engine.step(self.timestep);
        self.total_rejected += result.rejected;
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(result);
        self.timestep += 1;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        self.speed_idx = self.speed_idx.saturating_sub(1);
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    /// Switches to a different preset, resetting simulation state.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(config) = LotConfig::from_preset(name) else {
            return;
        };
        self.reset_with(config, name);
    }

    /// Restarts the current configuration from the beginning.
    pub fn restart(&mut self) {
        let name = self.preset_name.clone();
        self.reset_with(self.config.clone(), &name);
    }

    /// Replaces the simulation; speed, pause, and quit survive the reset.
    fn reset_with(&mut self, config: LotConfig, name: &str) {
        let (quit, paused, speed_idx) = (self.quit, self.paused, self.speed_idx);
        *self = Self::new(config, name);
        self.quit = quit;
        self.paused = paused;
        self.speed_idx = speed_idx;
    }

    /// Returns `true` when all steps have been executed.
    pub fn is_finished(&self) -> bool {
        self.timestep >= self.total_steps
    }

    /// Returns the most recent step result, if any.
    pub fn last_result(&self) -> Option<&StepResult> {
        self.history.back()
    }

    /// The lot being simulated.
    pub fn lot(&self) -> &ParkingLot {
        self.engine.lot()
    }

    /// Current occupied share of the lot, 0.0 to 1.0.
    pub fn occupancy_ratio(&self) -> f64 {
        let lot = self.lot();
        if lot.capacity() == 0 {
            0.0
        } else {
            lot.occupied_count() as f64 / lot.capacity() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_creates_and_ticks() {
        let mut app = App::from_preset("demo");
        assert_eq!(app.timestep, 0);
        assert!(!app.is_finished());

        app.tick();
        assert_eq!(app.timestep, 1);
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn app_finishes_after_total_steps() {
        let mut app = App::from_preset("compact");
        for _ in 0..app.total_steps {
            app.tick();
        }
        assert!(app.is_finished());
        let ts_before = app.timestep;
        app.tick();
        assert_eq!(app.timestep, ts_before);
    }

    #[test]
    fn speed_controls_stay_in_bounds() {
        let mut app = App::from_preset("demo");
        for _ in 0..10 {
            app.speed_down();
        }
        assert_eq!(app.speed_idx, 0);
        for _ in 0..10 {
            app.speed_up();
        }
        assert_eq!(app.speed_idx, SPEED_LEVELS_MS.len() - 1);
    }

    #[test]
    fn switch_preset_resets_state() {
        let mut app = App::from_preset("demo");
        app.tick();
        app.tick();
        app.switch_preset("truck_stop");
        assert_eq!(app.timestep, 0);
        assert!(app.history.is_empty());
        assert_eq!(app.preset_name, "truck_stop");
        assert_eq!(app.lot().occupied_count(), 0);
    }

    #[test]
    fn reset_keeps_speed_and_pause() {
        let mut app = App::from_preset("demo");
        app.speed_up();
        app.toggle_pause();
        let speed = app.speed_idx;

        app.switch_preset("compact");
        assert_eq!(app.speed_idx, speed);
        assert!(app.paused);

        app.restart();
        assert_eq!(app.speed_idx, speed);
        assert!(app.paused);
    }

    #[test]
    fn lot_name_follows_preset() {
        let mut app = App::from_preset("demo");
        assert_eq!(app.lot_name, "Demo Lot");
        app.switch_preset("truck_stop");
        assert_eq!(app.lot_name, "Truck Stop");
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut app = App::from_preset("demo");
        app.tick();
        app.switch_preset("nope");
        assert_eq!(app.timestep, 1);
        assert_eq!(app.preset_name, "demo");
    }

    #[test]
    fn restart_replays_identically() {
        let mut app = App::from_preset("compact");
        for _ in 0..5 {
            app.tick();
        }
        let first: Vec<StepResult> = app.history.iter().cloned().collect();
        app.restart();
        assert_eq!(app.timestep, 0);
        for _ in 0..5 {
            app.tick();
        }
        let second: Vec<StepResult> = app.history.iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn occupancy_ratio_in_unit_range() {
        let mut app = App::from_preset("compact");
        for _ in 0..app.total_steps {
            app.tick();
            let r = app.occupancy_ratio();
            assert!((0.0..=1.0).contains(&r));
        }
    }
}
