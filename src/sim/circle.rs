//! Circle bodies and their per-step bookkeeping

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use super::collision::Collider;
use crate::consts::DEFAULT_CIRCLE_COLOR;
use crate::settings::ConfigError;
use crate::{polar_to_cartesian, vector_angle};

new_key_type! {
    /// Stable handle to a circle stored in an [`Arena`](super::Arena)
    pub struct CircleId;
}

/// RGB color, carried for renderers only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Initial motion of a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Speed along a heading (radians, counter-clockwise from +x)
    Polar { speed: f64, angle: f64 },
    /// Velocity given directly
    Vector(DVec2),
}

impl Motion {
    /// Resolve to a velocity vector
    pub fn velocity(self) -> DVec2 {
        match self {
            Motion::Polar { speed, angle } => polar_to_cartesian(speed, angle),
            Motion::Vector(v) => v,
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Motion::Vector(DVec2::ZERO)
    }
}

/// A rigid circle
#[derive(Debug, Clone)]
pub struct Circle {
    pub name: String,
    pub color: Rgb,
    /// Committed position at the end of the last step
    pub position: DVec2,
    /// Committed velocity, in distance per frame
    pub velocity: DVec2,
    /// Physical parameters; validated on construction, read-only outside the crate
    pub(crate) radius: f64,
    pub(crate) mass: f64,
    /// Multiplier applied to own velocity after each circle contact (1 = lossless)
    pub(crate) damping_factor: f64,

    /// Working copies while a step is in progress
    pub(crate) staged_position: DVec2,
    pub(crate) staged_velocity: DVec2,

    /// Total circle contacts detected since creation
    pub collisions: u64,
    /// Total distance moved since creation
    pub distance_traveled: f64,
    /// Total simulated time since the circle joined an arena (in frames)
    pub elapsed: f64,

    /// Everything this circle touched at the start of the last step
    pub(crate) current_colliders: Vec<Collider>,
}

impl Circle {
    /// Create a circle at the origin
    ///
    /// `damping` is the fraction of velocity lost per circle contact and must lie in [0, 1].
    pub fn new(radius: f64, mass: f64, damping: f64, motion: Motion) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        check_mass(mass)?;
        check_damping(damping)?;

        let velocity = motion.velocity();
        if !velocity.is_finite() {
            return Err(ConfigError::NonFiniteVelocity);
        }

        Ok(Self {
            name: String::new(),
            color: DEFAULT_CIRCLE_COLOR,
            position: DVec2::ZERO,
            velocity,
            radius,
            mass,
            damping_factor: 1.0 - damping,
            staged_position: DVec2::ZERO,
            staged_velocity: DVec2::ZERO,
            collisions: 0,
            distance_traveled: 0.0,
            elapsed: 0.0,
            current_colliders: Vec::new(),
        })
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn damping_factor(&self) -> f64 {
        self.damping_factor
    }

    /// Change the mass; the old value is kept if the new one is rejected
    pub fn set_mass(&mut self, mass: f64) -> Result<(), ConfigError> {
        check_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    /// Change the damping input (fraction of velocity lost per contact)
    pub fn set_damping(&mut self, damping: f64) -> Result<(), ConfigError> {
        check_damping(damping)?;
        self.damping_factor = 1.0 - damping;
        Ok(())
    }

    /// Colliders found at the start of the most recent step
    pub fn current_colliders(&self) -> &[Collider] {
        &self.current_colliders
    }

    /// Whether this circle touched anything in the most recent step
    pub fn is_colliding(&self) -> bool {
        !self.current_colliders.is_empty()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Copy committed state into the working copies before resolution
    pub(crate) fn stage(&mut self) {
        self.staged_position = self.position;
        self.staged_velocity = self.velocity;
    }
}

fn check_mass(mass: f64) -> Result<(), ConfigError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMass(mass))
    }
}

fn check_damping(damping: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDamping(damping))
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:                 {}", self.name)?;
        writeln!(f, "Speed:                {}", self.speed())?;
        writeln!(f, "Angle:                {}", vector_angle(self.velocity))?;
        writeln!(f, "Position:             [{}, {}]", self.position.x, self.position.y)?;
        writeln!(f, "Number-of-collisions: {}", self.collisions)?;
        write!(f, "Total Distance:       {}", self.distance_traveled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_polar_motion() {
        let c = Circle::new(4.0, 1.0, 0.0, Motion::Polar { speed: 2.0, angle: FRAC_PI_2 }).unwrap();
        assert!(c.velocity.x.abs() < 1e-12);
        assert!((c.velocity.y - 2.0).abs() < 1e-12);
        assert_eq!(c.position, DVec2::ZERO);
    }

    #[test]
    fn test_damping_factor_is_complement() {
        let c = Circle::new(1.0, 1.0, 0.2, Motion::default()).unwrap();
        assert!((c.damping_factor() - 0.8).abs() < 1e-12);

        let c = Circle::new(1.0, 1.0, 0.0, Motion::default()).unwrap();
        assert_eq!(c.damping_factor(), 1.0);
    }

    #[test]
    fn test_setters_keep_parameters_valid() {
        let mut c = Circle::new(2.0, 3.0, 0.1, Motion::default()).unwrap();

        assert!(matches!(c.set_mass(0.0), Err(ConfigError::InvalidMass(_))));
        assert!(matches!(c.set_mass(f64::NAN), Err(ConfigError::InvalidMass(_))));
        assert_eq!(c.mass(), 3.0);

        assert!(matches!(c.set_damping(-0.1), Err(ConfigError::InvalidDamping(_))));
        assert!((c.damping_factor() - 0.9).abs() < 1e-12);

        c.set_mass(4.5).unwrap();
        c.set_damping(1.0).unwrap();
        assert_eq!(c.mass(), 4.5);
        assert_eq!(c.damping_factor(), 0.0);
        assert_eq!(c.radius(), 2.0);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            Circle::new(0.0, 1.0, 0.0, Motion::default()),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            Circle::new(1.0, -2.0, 0.0, Motion::default()),
            Err(ConfigError::InvalidMass(_))
        ));
        assert!(matches!(
            Circle::new(1.0, 1.0, 1.5, Motion::default()),
            Err(ConfigError::InvalidDamping(_))
        ));
        assert!(matches!(
            Circle::new(f64::NAN, 1.0, 0.0, Motion::default()),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert!(matches!(
            Circle::new(1.0, 1.0, 0.0, Motion::Vector(DVec2::new(f64::INFINITY, 0.0))),
            Err(ConfigError::NonFiniteVelocity)
        ));
    }

    #[test]
    fn test_display_summary() {
        let c = Circle::new(3.0, 1.0, 0.0, Motion::Vector(DVec2::new(3.0, 4.0)))
            .unwrap()
            .with_name("c7");
        let text = c.to_string();
        assert!(text.contains("c7"));
        assert!(text.contains("Speed:                5"));
    }
}
