//! TOML-based lot configuration and preset definitions.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::lot::{Level, ParkingLot, SpotLayout, SpotMix};

/// Top-level configuration parsed from TOML.
///
/// All tables have defaults matching the `demo` preset except `levels`,
/// which defaults to the two demo levels only when the table is absent.
/// Load from TOML with [`LotConfig::from_toml_file`] or use
/// [`LotConfig::demo`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LotConfig {
    /// Lot-wide settings.
    #[serde(default)]
    pub lot: LotSection,
    /// Levels, in the order they are added to the lot.
    #[serde(default = "default_levels")]
    pub levels: Vec<LevelConfig>,
    /// Simulation length and seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Arrival and departure behaviour.
    #[serde(default)]
    pub traffic: TrafficConfig,
}

/// Lot-wide settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LotSection {
    /// Display name.
    pub name: String,
    /// Spot mix for levels that give neither `layout` nor `mix`.
    pub mix: SpotMix,
}

impl Default for LotSection {
    fn default() -> Self {
        Self {
            name: "Demo Lot".to_string(),
            mix: SpotMix::default(),
        }
    }
}

/// One level of the lot.
///
/// Spot types come from `layout` if given, else from `mix`, else from the
/// lot-wide mix.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    /// Floor number (expected unique).
    pub floor: u32,
    /// Number of spots on this level.
    pub spots: usize,
    /// Exact per-type counts; must sum to `spots`.
    #[serde(default)]
    pub layout: Option<SpotLayout>,
    /// Per-level mix override.
    #[serde(default)]
    pub mix: Option<SpotMix>,
}

impl LevelConfig {
    fn new(floor: u32, spots: usize) -> Self {
        Self {
            floor,
            spots,
            layout: None,
            mix: None,
        }
    }

    /// Resolves the spot layout for this level.
    pub fn resolve_layout(&self, lot_mix: &SpotMix) -> SpotLayout {
        match (&self.layout, &self.mix) {
            (Some(layout), _) => *layout,
            (None, Some(mix)) => SpotLayout::from_mix(self.spots, mix),
            (None, None) => SpotLayout::from_mix(self.spots, lot_mix),
        }
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![LevelConfig::new(1, 10), LevelConfig::new(2, 8)]
}

/// Simulation length and seed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of steps to run (must be > 0).
    pub steps: usize,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { steps: 48, seed: 42 }
    }
}

/// Arrival and departure behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrafficConfig {
    /// Arrivals per step are drawn uniformly from `0..=max_arrivals_per_step`.
    pub max_arrivals_per_step: usize,
    /// Chance that each parked vehicle leaves on a given step (0.0–1.0).
    pub departure_probability: f64,
    /// Vehicle-type mix of arriving traffic.
    pub mix: SpotMix,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            max_arrivals_per_step: 3,
            departure_probability: 0.15,
            mix: SpotMix::default(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"levels[0].spots"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Largest spot count accepted for one level.
pub const MAX_LEVEL_SPOTS: usize = 10_000;

/// Largest per-step arrival bound accepted for traffic.
pub const MAX_ARRIVALS_PER_STEP: usize = 1_000;

impl LotConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "compact", "truck_stop"];

    /// Two levels (10 and 8 spots) with the default mix.
    pub fn demo() -> Self {
        Self {
            lot: LotSection::default(),
            levels: default_levels(),
            simulation: SimulationConfig::default(),
            traffic: TrafficConfig::default(),
        }
    }

    /// A single small level that fills up quickly.
    pub fn compact() -> Self {
        Self {
            lot: LotSection {
                name: "Compact Lot".to_string(),
                ..LotSection::default()
            },
            levels: vec![LevelConfig::new(1, 6)],
            simulation: SimulationConfig {
                steps: 24,
                ..SimulationConfig::default()
            },
            traffic: TrafficConfig {
                max_arrivals_per_step: 2,
                departure_probability: 0.1,
                ..TrafficConfig::default()
            },
        }
    }

    /// Truck-heavy traffic with a dedicated truck deck.
    pub fn truck_stop() -> Self {
        let truck_heavy = SpotMix {
            motorcycle: 0.1,
            car: 0.4,
            truck: 0.5,
        };
        Self {
            lot: LotSection {
                name: "Truck Stop".to_string(),
                mix: truck_heavy,
            },
            levels: vec![
                LevelConfig {
                    layout: Some(SpotLayout::new(8, 4, 0)),
                    ..LevelConfig::new(1, 12)
                },
                LevelConfig {
                    layout: Some(SpotLayout::new(0, 0, 6)),
                    ..LevelConfig::new(2, 6)
                },
            ],
            simulation: SimulationConfig::default(),
            traffic: TrafficConfig {
                max_arrivals_per_step: 4,
                departure_probability: 0.2,
                mix: truck_heavy,
            },
        }
    }

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "compact" => Ok(Self::compact()),
            "truck_stop" => Ok(Self::truck_stop()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every violation found.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.lot.mix.is_valid() {
            errors.push(ConfigError::new(
                "lot.mix",
                "weights must be finite, >= 0, and not all zero",
            ));
        }

        if self.levels.is_empty() {
            errors.push(ConfigError::new("levels", "at least one level is required"));
        }

        let mut floors = BTreeSet::new();
        for (i, level) in self.levels.iter().enumerate() {
            if !floors.insert(level.floor) {
                errors.push(ConfigError::new(
                    format!("levels[{i}].floor"),
                    format!("floor {} is listed more than once", level.floor),
                ));
            }
            if level.spots == 0 {
                errors.push(ConfigError::new(format!("levels[{i}].spots"), "must be > 0"));
            } else if level.spots > MAX_LEVEL_SPOTS {
                errors.push(ConfigError::new(
                    format!("levels[{i}].spots"),
                    format!("must be <= {MAX_LEVEL_SPOTS}"),
                ));
            }
            if let Some(layout) = &level.layout {
                match layout.checked_total() {
                    None => errors.push(ConfigError::new(
                        format!("levels[{i}].layout"),
                        "counts overflow when summed",
                    )),
                    Some(total) if total != level.spots => errors.push(ConfigError::new(
                        format!("levels[{i}].layout"),
                        format!("counts sum to {total}, expected {} spots", level.spots),
                    )),
                    Some(_) => {}
                }
            }
            if level.mix.as_ref().is_some_and(|m| !m.is_valid()) {
                errors.push(ConfigError::new(
                    format!("levels[{i}].mix"),
                    "weights must be finite, >= 0, and not all zero",
                ));
            }
        }

        if self.simulation.steps == 0 {
            errors.push(ConfigError::new("simulation.steps", "must be > 0"));
        }

        let t = &self.traffic;
        if t.max_arrivals_per_step > MAX_ARRIVALS_PER_STEP {
            errors.push(ConfigError::new(
                "traffic.max_arrivals_per_step",
                format!("must be <= {MAX_ARRIVALS_PER_STEP}"),
            ));
        }
        if !(0.0..=1.0).contains(&t.departure_probability) {
            errors.push(ConfigError::new(
                "traffic.departure_probability",
                "must be in [0.0, 1.0]",
            ));
        }
        if !t.mix.is_valid() {
            errors.push(ConfigError::new(
                "traffic.mix",
                "weights must be finite, >= 0, and not all zero",
            ));
        }

        errors
    }

    /// Builds an empty lot with the configured levels, in order.
    pub fn build_lot(&self) -> ParkingLot {
        let mut lot = ParkingLot::new();
        for level in &self.levels {
            let layout = level.resolve_layout(&self.lot.mix);
            lot.add_level(Level::with_layout(level.floor, &layout));
        }
        lot
    }
}
