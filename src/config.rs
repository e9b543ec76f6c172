//! Simulation configuration.
//!
//! All tuning constants live here as plain serde structs so a run can be
//! reproduced from a YAML file. Every field has a default and partial files
//! are valid; a missing file is an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Star field generation and force-law parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Number of bodies. Fixed for the lifetime of a field.
    pub num_bodies: usize,
    /// Scales every pairwise acceleration contribution.
    pub gravity_scale: f32,
    /// Multiplier on pair distance before the inverse-square falloff.
    pub softening_scale: f32,
    /// Distance from the origin past which stalled bodies are parked.
    pub escape_radius: f32,
    /// Speed below which a body past the escape radius counts as stalled.
    pub stall_epsilon: f32,
    /// Initial orbital speed at radius r is sqrt(orbit_speed / r).
    pub orbit_speed: f32,
    /// Half-thickness of the initial disk along Y.
    pub disk_thickness: f32,
    /// Masses are 2^x with x uniform in [0, mass_doublings).
    pub mass_doublings: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            num_bodies: 768,
            gravity_scale: 1.0e-5,
            softening_scale: 10.0,
            escape_radius: 20.0,
            stall_epsilon: 1.0e-4,
            orbit_speed: 3.0e-5,
            disk_thickness: 0.2,
            mass_doublings: 4.0, // masses span [1, 16)
        }
    }
}

/// Trail ring dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailParams {
    /// Line segments retained per body.
    pub slices: usize,
    /// Physics ticks recorded into one slice before advancing.
    pub ticks_per_slice: u32,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            slices: 150,
            ticks_per_slice: 2,
        }
    }
}

/// Force scheduler sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerParams {
    /// Worker threads in the force pool. Independent of body count.
    pub workers: usize,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self { workers: 16 }
    }
}

/// Flight controller gains.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    /// Thrust and direct-mode turn authority per tick.
    pub force_scale: f32,
    /// Turn rate applied to the desired orientation in hold modes.
    pub rotation_scale: f32,
    /// How far one tick of full stick drags the seek target.
    pub position_scale: f32,
    /// Approach speed per unit of distance to the seek target.
    pub approach_scale: f32,
    /// Cap on the autopilot's per-tick rotation step, in radians.
    pub max_turn_step: f32,
    /// Ticks of residual spin the autopilot anticipates when steering.
    pub spin_lookahead: f32,
    /// Damping on the velocity component perpendicular to the seek offset.
    pub damp_gain: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            force_scale: 5.0e-4,
            rotation_scale: 1.0 / 30.0,
            position_scale: 90.0,
            approach_scale: 0.02,
            max_turn_step: 0.01,
            spin_lookahead: 15.0,
            damp_gain: 4.0,
        }
    }
}

/// Projection parameters handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub field: FieldParams,
    pub trails: TrailParams,
    pub scheduler: SchedulerParams,
    pub flight: FlightTuning,
    pub camera: CameraParams,
    /// Fixed RNG seed for reproducible runs. None seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&text)?;
        log::info!("loaded config from {:?}", path);
        Ok(config)
    }

    /// Writes the full config as YAML, capturing a tuned run for replay.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_yaml::to_string(self)?;
        fs::write(path, text)?;
        log::info!("saved config to {:?}", path);
        Ok(())
    }
}
