use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::error::{AttractorError, AttractorResult};
use crate::playback::{AdvanceStrategy, TrajectoryConfig};
use crate::renderer::{Domain, Rgb};
use crate::solver::SystemParameters;
use crate::state::State;

pub const CONFIG_PATH: &str = "attractarium.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub trajectories: Vec<TrajectoryEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// 0 = uncapped.
    pub target_fps: usize,
    pub background: Rgb,
}

/// One trajectory as written in the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrajectoryEntry {
    pub initial_state: State,
    /// When set, the initial x is drawn uniformly from `[lo, hi)` at startup.
    pub initial_x_range: Option<[f64; 2]>,
    pub parameters: SystemParameters,
    pub dt: f64,
    pub duration: f64,
    pub domain: DomainBounds,
    pub color: Rgb,
    pub strategy: AdvanceStrategy,
}

/// Raw viewport bounds, validated into a `Domain` when the scene is built.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DomainBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Config {
    fn default() -> Self {
        let entry = |color| TrajectoryEntry {
            initial_x_range: Some([0.1, 0.101]),
            color,
            ..TrajectoryEntry::default()
        };
        Self {
            display: DisplayConfig::default(),
            trajectories: vec![entry(Rgb::NAVY), entry(Rgb::CRIMSON)],
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Lorenz Attractor".to_string(),
            width: 1920,
            height: 1080,
            target_fps: 0,
            background: Rgb::BLACK,
        }
    }
}

impl Default for TrajectoryEntry {
    fn default() -> Self {
        Self {
            initial_state: State::new(0.1, 0.0, 0.0),
            initial_x_range: None,
            parameters: SystemParameters::default(),
            dt: 0.00009999,
            duration: 80.0,
            domain: DomainBounds::default(),
            color: Rgb::RED,
            strategy: AdvanceStrategy::TableLookup,
        }
    }
}

impl Default for DomainBounds {
    fn default() -> Self {
        Self { x_min: -30.0, x_max: 30.0, y_min: -30.0, y_max: 30.0 }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> AttractorResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AttractorError::parameter(format!(
                "display size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl TrajectoryEntry {
    /// Resolve random overrides and validate bounds into a `TrajectoryConfig`.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> AttractorResult<TrajectoryConfig> {
        let mut initial_state = self.initial_state;
        if let Some([lo, hi]) = self.initial_x_range {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(AttractorError::parameter(format!(
                    "initial_x_range must be a finite [lo, hi] with lo <= hi, got [{lo}, {hi}]"
                )));
            }
            initial_state.x = if lo < hi { rng.gen_range(lo..hi) } else { lo };
        }

        let b = self.domain;
        Ok(TrajectoryConfig {
            initial_state,
            parameters: self.parameters,
            dt: self.dt,
            duration: self.duration,
            domain: Domain::new(b.x_min, b.x_max, b.y_min, b.y_max)?,
            color: self.color,
            strategy: self.strategy,
        })
    }
}

impl Config {
    /// Resolve every trajectory entry, in file order.
    pub fn trajectory_configs<R: Rng>(&self, rng: &mut R) -> AttractorResult<Vec<TrajectoryConfig>> {
        self.trajectories.iter().map(|t| t.resolve(rng)).collect()
    }
}

/// Load `attractarium.yaml` from the working directory, falling back to defaults.
pub fn load() -> Config {
    load_from(Path::new(CONFIG_PATH))
}

pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        log::info!("{} not found; using built-in defaults", path.display());
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(cfg) => {
                log::info!("loaded configuration from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("failed to read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
