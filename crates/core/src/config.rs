//! Parameters of one [`Effect`](crate::Effect) instance.
//!
//! An [`EffectConfig`] plus a canvas size fully determines an animation: the
//! flow field is a pure function of the geometry and `curve`/`zoom`, and every
//! random draw comes from a PRNG seeded with `seed`. Changing any value means
//! building a new `Effect`.

use crate::error::FlowError;
use crate::params::{param_f64, param_u64, param_usize};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_NO_OF_PARTICLES: usize = 200;
pub const DEFAULT_CELL_SIZE: f64 = 5.0;
pub const DEFAULT_CURVE: f64 = 0.8;
pub const DEFAULT_ZOOM: f64 = 0.04;
pub const DEFAULT_SEED: u64 = 42;

/// Largest particle count an effect accepts.
pub const MAX_PARTICLES: usize = 5000;

/// Simulation parameters for the flow-field effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Number of particles, fixed for the effect's lifetime.
    pub no_of_particles: usize,
    /// Pixel width and height of one flow-field cell.
    pub cell_size: f64,
    /// Amplitude multiplier of the angle function.
    pub curve: f64,
    /// Spatial-frequency multiplier of the angle function.
    pub zoom: f64,
    /// PRNG seed for spawn positions, speeds and trail lengths.
    pub seed: u64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            no_of_particles: DEFAULT_NO_OF_PARTICLES,
            cell_size: DEFAULT_CELL_SIZE,
            curve: DEFAULT_CURVE,
            zoom: DEFAULT_ZOOM,
            seed: DEFAULT_SEED,
        }
    }
}

impl EffectConfig {
    /// Reads a config from a JSON params object, falling back to defaults
    /// for missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        Self {
            no_of_particles: param_usize(params, "no_of_particles", DEFAULT_NO_OF_PARTICLES),
            cell_size: param_f64(params, "cell_size", DEFAULT_CELL_SIZE),
            curve: param_f64(params, "curve", DEFAULT_CURVE),
            zoom: param_f64(params, "zoom", DEFAULT_ZOOM),
            seed: param_u64(params, "seed", DEFAULT_SEED),
        }
    }

    /// Current values as a JSON object (the same keys `from_json` reads).
    pub fn to_json(&self) -> Value {
        json!({
            "no_of_particles": self.no_of_particles,
            "cell_size": self.cell_size,
            "curve": self.curve,
            "zoom": self.zoom,
            "seed": self.seed,
        })
    }

    /// Checks the parameter contracts that do not depend on the canvas.
    ///
    /// Grid emptiness is checked by [`FlowField::new`](crate::FlowField::new)
    /// once the canvas size is known.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.no_of_particles == 0 || self.no_of_particles > MAX_PARTICLES {
            return Err(FlowError::InvalidParticleCount(self.no_of_particles));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(FlowError::InvalidCellSize(self.cell_size));
        }
        for (name, value) in [("curve", self.curve), ("zoom", self.zoom)] {
            if !value.is_finite() {
                return Err(FlowError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Schema describing every parameter: type, default, suggested range and
    /// a description.
    pub fn param_schema() -> Value {
        json!({
            "no_of_particles": {
                "type": "integer",
                "default": DEFAULT_NO_OF_PARTICLES,
                "min": 1,
                "max": MAX_PARTICLES,
                "description": "Number of particles steered by the field"
            },
            "cell_size": {
                "type": "number",
                "default": DEFAULT_CELL_SIZE,
                "min": 1.0,
                "max": 100.0,
                "description": "Pixel size of one flow-field cell"
            },
            "curve": {
                "type": "number",
                "default": DEFAULT_CURVE,
                "min": -10.0,
                "max": 10.0,
                "description": "Amplitude multiplier of the field angle"
            },
            "zoom": {
                "type": "number",
                "default": DEFAULT_ZOOM,
                "min": 0.0,
                "max": 1.0,
                "description": "Spatial frequency of the field angle"
            },
            "seed": {
                "type": "integer",
                "default": DEFAULT_SEED,
                "description": "PRNG seed for particle spawning"
            }
        })
    }
}
