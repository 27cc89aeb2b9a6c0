//! Circle Arena - rigid circles bouncing inside a circular boundary
//!
//! Core modules:
//! - `sim`: Deterministic physics kernel (detection, resolution, integration, correction)
//! - `settings`: Arena configuration and bulk circle initialization
//! - `scenarios`: Built-in scenes and step hooks

pub mod scenarios;
pub mod settings;
pub mod sim;

pub use scenarios::Scenario;
pub use settings::{ArenaSettings, CircleBatch, ConfigError};
pub use sim::{Arena, ArenaError, Circle, CircleId, Collider, Motion, Rgb, StepHook};

use glam::DVec2;

/// Simulation defaults
pub mod consts {
    use crate::sim::Rgb;

    /// Default arena radius (world units)
    pub const DEFAULT_ARENA_RADIUS: f64 = 100.0;
    /// Default physics steps per rendered frame
    pub const DEFAULT_STEPS_PER_FRAME: u32 = 1;

    /// Circle defaults
    pub const DEFAULT_CIRCLE_RADIUS: f64 = 5.0;
    pub const DEFAULT_CIRCLE_MASS: f64 = 1.0;
    pub const DEFAULT_CIRCLE_COLOR: Rgb = Rgb(156, 156, 156);

    /// Boundary cosmetics (passed through to renderers)
    pub const DEFAULT_BOUNDARY_COLOR: Rgb = Rgb(255, 255, 255);
    pub const DEFAULT_BOUNDARY_THICKNESS: u32 = 1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Heading of a vector in radians, normalized to [0, 2π)
///
/// A zero vector has no heading; it reports π/2 so callers never see NaN.
pub fn vector_angle(v: DVec2) -> f64 {
    use std::f64::consts::{FRAC_PI_2, TAU};
    if v == DVec2::ZERO {
        return FRAC_PI_2;
    }
    v.y.atan2(v.x).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_roundtrip() {
        let p = polar_to_cartesian(10.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);

        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 10.0).abs() < 1e-12);
        assert!((theta - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_vector_angle_quadrants() {
        assert!((vector_angle(DVec2::new(1.0, 0.0))).abs() < 1e-12);
        assert!((vector_angle(DVec2::new(-1.0, 0.0)) - PI).abs() < 1e-12);
        assert!((vector_angle(DVec2::new(0.0, -1.0)) - 1.5 * PI).abs() < 1e-12);
        assert_eq!(vector_angle(DVec2::ZERO), FRAC_PI_2);
    }
}
