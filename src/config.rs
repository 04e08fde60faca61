use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::rng::GameRng;

fn default_name() -> String {
    "arcade".to_string()
}

fn default_width() -> f64 {
    480.0
}

fn default_height() -> f64 {
    640.0
}

fn default_starting_lives() -> u32 {
    3
}

fn default_spawn_interval_ms() -> f64 {
    800.0
}

fn default_min_spawn_interval_ms() -> f64 {
    300.0
}

fn default_spawn_ramp() -> f64 {
    0.995
}

fn default_star_size() -> Span {
    Span {
        min: 18.0,
        max: 42.0,
    }
}

fn default_fall_speed() -> Span {
    Span {
        min: 80.0,
        max: 220.0,
    }
}

fn default_tilt() -> Span {
    Span {
        min: -0.04,
        max: 0.04,
    }
}

fn default_max_frame_dt_ms() -> f64 {
    40.0
}

/// Inclusive range a spawn roll is drawn from.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn sample(&self, rng: &mut GameRng) -> f64 {
        rng.in_range(self.min, self.max)
    }

    fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// A named tuning profile for one game instance.
///
/// Every field has a default matching the classic arcade feel, so an empty
/// profile (or no profile at all) is playable.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Play-area width in logical units; y grows downward from 0.
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_starting_lives")]
    pub starting_lives: u32,
    /// Interval between spawns at the start of a run.
    #[serde(default = "default_spawn_interval_ms")]
    pub spawn_interval_ms: f64,
    /// The interval never ramps below this.
    #[serde(default = "default_min_spawn_interval_ms")]
    pub min_spawn_interval_ms: f64,
    /// Multiplier applied to the interval after each spawn.
    #[serde(default = "default_spawn_ramp")]
    pub spawn_ramp: f64,
    #[serde(default = "default_star_size")]
    pub star_size: Span,
    /// Vertical speed in units per second.
    #[serde(default = "default_fall_speed")]
    pub fall_speed: Span,
    /// Fixed rotation applied to a star for its whole life, in radians.
    #[serde(default = "default_tilt")]
    pub tilt: Span,
    /// Upper bound on a single frame's dt, absorbing stalls and tab suspends.
    #[serde(default = "default_max_frame_dt_ms")]
    pub max_frame_dt_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            width: default_width(),
            height: default_height(),
            starting_lives: default_starting_lives(),
            spawn_interval_ms: default_spawn_interval_ms(),
            min_spawn_interval_ms: default_min_spawn_interval_ms(),
            spawn_ramp: default_spawn_ramp(),
            star_size: default_star_size(),
            fall_speed: default_fall_speed(),
            tilt: default_tilt(),
            max_frame_dt_ms: default_max_frame_dt_ms(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("play area must have positive dimensions, got {width}x{height}")]
    BadBounds { width: f64, height: f64 },
    #[error("{field} range is empty ({min} > {max})")]
    EmptyRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} range must be positive (min {min})")]
    NonPositiveRange { field: &'static str, min: f64 },
    #[error("spawn ramp must be in (0, 1], got {0}")]
    BadRamp(f64),
    #[error("minimum spawn interval {min}ms exceeds the initial interval {initial}ms")]
    BadSpawnFloor { min: f64, initial: f64 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("play area width {width} cannot fit the largest star (size {size})")]
    StarTooWide { width: f64, size: f64 },
}

impl GameConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: GameConfig = serde_yaml::from_str(text).context("failed to parse profile")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::BadBounds {
                width: self.width,
                height: self.height,
            });
        }
        for (field, span) in [
            ("star_size", &self.star_size),
            ("fall_speed", &self.fall_speed),
            ("tilt", &self.tilt),
        ] {
            if span.is_empty() {
                return Err(ConfigError::EmptyRange {
                    field,
                    min: span.min,
                    max: span.max,
                });
            }
        }
        for (field, span) in [("star_size", &self.star_size), ("fall_speed", &self.fall_speed)] {
            if span.min <= 0.0 {
                return Err(ConfigError::NonPositiveRange {
                    field,
                    min: span.min,
                });
            }
        }
        if !(self.spawn_ramp > 0.0 && self.spawn_ramp <= 1.0) {
            return Err(ConfigError::BadRamp(self.spawn_ramp));
        }
        if self.min_spawn_interval_ms > self.spawn_interval_ms {
            return Err(ConfigError::BadSpawnFloor {
                min: self.min_spawn_interval_ms,
                initial: self.spawn_interval_ms,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.star_size.max * 2.0 >= self.width {
            return Err(ConfigError::StarTooWide {
                width: self.width,
                size: self.star_size.max,
            });
        }
        Ok(())
    }
}

pub struct ConfigLoader {
    base_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<GameConfig> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        GameConfig::from_yaml(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
