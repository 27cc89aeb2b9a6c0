//! Arena configuration
//!
//! Loaded from JSON by the runner. Circles can be listed in bulk as parallel
//! arrays, one entry per circle.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Circle, Motion, Rgb};

/// Invalid construction parameters
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
    #[error("circle mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("damping must be between 0.0 and 1.0, got {0}")]
    InvalidDamping(f64),
    #[error("circle velocity must be finite")]
    NonFiniteVelocity,
    #[error("arena radius must be positive and finite, got {0}")]
    InvalidArenaRadius(f64),
    #[error("steps_per_frame must be at least 1")]
    ZeroStepsPerFrame,
    #[error("circle radius {radius} does not fit in arena of radius {arena_radius}")]
    CircleTooLarge { radius: f64, arena_radius: f64 },
    #[error("`{field}` has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("circles need either `vectors` or both `speeds` and `angles`")]
    MissingMotion,
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Arena-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaSettings {
    /// Radius of the circular play space
    pub radius: f64,
    /// Boundary color (cosmetic)
    #[serde(default = "default_boundary_color")]
    pub boundary_color: Rgb,
    /// Boundary line width (cosmetic)
    #[serde(default = "default_boundary_thickness")]
    pub boundary_thickness: u32,
    /// Physics steps per observed frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
    /// Initial circles
    #[serde(default)]
    pub circles: Option<CircleBatch>,
}

fn default_boundary_color() -> Rgb {
    DEFAULT_BOUNDARY_COLOR
}

fn default_boundary_thickness() -> u32 {
    DEFAULT_BOUNDARY_THICKNESS
}

fn default_steps_per_frame() -> u32 {
    DEFAULT_STEPS_PER_FRAME
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_ARENA_RADIUS,
            boundary_color: DEFAULT_BOUNDARY_COLOR,
            boundary_thickness: DEFAULT_BOUNDARY_THICKNESS,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
            circles: None,
        }
    }
}

impl ArenaSettings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Circles described as parallel arrays
///
/// Every array that is present must hold exactly `amount` entries. Motion comes
/// from `vectors` if given, otherwise from `speeds` and `angles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CircleBatch {
    pub amount: usize,
    pub positions: Vec<DVec2>,
    pub sizes: Vec<f64>,
    #[serde(default)]
    pub angles: Option<Vec<f64>>,
    #[serde(default)]
    pub speeds: Option<Vec<f64>>,
    #[serde(default)]
    pub vectors: Option<Vec<DVec2>>,
    pub weights: Vec<f64>,
    pub damping: Vec<f64>,
    pub colors: Vec<Rgb>,
}

impl CircleBatch {
    /// Build the circles, named `c0`, `c1`, ...
    pub fn build(&self) -> Result<Vec<Circle>, ConfigError> {
        let n = self.amount;
        check_len("positions", n, self.positions.len())?;
        check_len("sizes", n, self.sizes.len())?;
        check_len("weights", n, self.weights.len())?;
        check_len("damping", n, self.damping.len())?;
        check_len("colors", n, self.colors.len())?;

        let motions: Vec<Motion> = match (&self.vectors, &self.speeds, &self.angles) {
            (Some(vectors), _, _) => {
                check_len("vectors", n, vectors.len())?;
                vectors.iter().map(|&v| Motion::Vector(v)).collect()
            }
            (None, Some(speeds), Some(angles)) => {
                check_len("speeds", n, speeds.len())?;
                check_len("angles", n, angles.len())?;
                speeds
                    .iter()
                    .zip(angles)
                    .map(|(&speed, &angle)| Motion::Polar { speed, angle })
                    .collect()
            }
            _ if n == 0 => Vec::new(),
            _ => return Err(ConfigError::MissingMotion),
        };

        (0..n)
            .map(|i| {
                Ok(Circle::new(self.sizes[i], self.weights[i], self.damping[i], motions[i])?
                    .with_position(self.positions[i])
                    .with_color(self.colors[i])
                    .with_name(format!("c{i}")))
            })
            .collect()
    }
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> Result<(), ConfigError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ConfigError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}
