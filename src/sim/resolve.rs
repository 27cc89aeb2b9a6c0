//! Collision response
//!
//! Each circle resolves its own contacts into its staged velocity. The other
//! circle is read through its committed state, so two circles touching in the
//! same step each see the other's velocity from before the step. Resolution
//! order is collection order; results depend on it.

use glam::DVec2;

use super::circle::Circle;
use super::geometry::{reflect, unit_direction};

/// Exchange momentum with another circle along the line of centers
///
/// Applies a mass-weighted elastic impulse to `this.staged_velocity`, then
/// scales the whole staged velocity by `this.damping_factor`.
/// Returns `false` (and leaves `this` untouched) when the centers coincide,
/// since there is no contact normal.
pub fn resolve_circle_contact(this: &mut Circle, other_position: DVec2, other_velocity: DVec2, other_mass: f64) -> bool {
    let Some(normal) = unit_direction(other_position, this.staged_position) else {
        log::debug!("coincident centers for '{}', skipping impulse this step", this.name);
        return false;
    };

    let approach = this.staged_velocity.dot(normal) - other_velocity.dot(normal);
    let impulse = 2.0 * approach / (this.mass + other_mass);

    this.staged_velocity -= impulse * normal * other_mass;
    this.staged_velocity *= this.damping_factor;
    true
}

/// Reflect the staged velocity off the arena wall
///
/// The wall normal is the radial direction through the circle's committed
/// position. The radial component flips; the tangential one is kept. No damping.
/// A circle exactly at the arena center has no radial direction and is left alone.
pub fn resolve_wall_contact(this: &mut Circle) -> bool {
    let Some(radial) = this.position.try_normalize() else {
        log::debug!("'{}' touches the wall from the arena center, skipping reflection", this.name);
        return false;
    };

    this.staged_velocity = reflect(this.staged_velocity, radial);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Motion;

    fn staged(x: f64, y: f64, vel: DVec2, mass: f64, damping: f64) -> Circle {
        let mut c = Circle::new(5.0, mass, damping, Motion::Vector(vel))
            .unwrap()
            .with_position(DVec2::new(x, y));
        c.stage();
        c
    }

    #[test]
    fn test_head_on_equal_mass_swaps() {
        let mut a = staged(-5.0, 0.0, DVec2::new(1.0, 0.0), 1.0, 0.0);
        let mut b = staged(5.0, 0.0, DVec2::new(-1.0, 0.0), 1.0, 0.0);

        assert!(resolve_circle_contact(&mut a, b.position, b.velocity, b.mass));
        assert!(resolve_circle_contact(&mut b, a.position, a.velocity, a.mass));

        assert!((a.staged_velocity - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!((b.staged_velocity - DVec2::new(1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_unequal_masses_conserve_momentum_and_energy() {
        let mut a = staged(0.0, 0.0, DVec2::new(3.0, 1.0), 2.0, 0.0);
        let mut b = staged(6.0, 8.0, DVec2::new(-1.0, -2.0), 5.0, 0.0);

        let p0 = a.momentum() + b.momentum();
        let e0 = a.kinetic_energy() + b.kinetic_energy();

        resolve_circle_contact(&mut a, b.position, b.velocity, b.mass);
        resolve_circle_contact(&mut b, a.position, a.velocity, a.mass);
        a.velocity = a.staged_velocity;
        b.velocity = b.staged_velocity;

        let p1 = a.momentum() + b.momentum();
        let e1 = a.kinetic_energy() + b.kinetic_energy();
        assert!((p1 - p0).length() < 1e-9);
        assert!((e1 - e0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_scales_whole_velocity() {
        // b at rest, a hits it off-axis; damping applies to the full result
        let mut a = staged(0.0, 0.0, DVec2::new(2.0, 2.0), 1.0, 0.5);
        let b = staged(10.0, 0.0, DVec2::ZERO, 1.0, 0.0);

        resolve_circle_contact(&mut a, b.position, b.velocity, b.mass);
        // Undamped result would be (0, 2): normal component fully transferred
        assert!((a.staged_velocity - DVec2::new(0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut a = staged(1.0, 0.0, DVec2::new(1.0, 1.0), 1.0, 0.0);
        assert!(!resolve_circle_contact(&mut a, DVec2::new(1.0, 0.0), DVec2::ZERO, 1.0));
        assert_eq!(a.staged_velocity, DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_wall_reflection_keeps_speed() {
        let mut a = staged(60.0, 77.0, DVec2::new(1.5, 2.0), 1.0, 0.5);
        let radial = a.position.normalize();
        let tangent = radial.perp();
        let before = a.staged_velocity;

        assert!(resolve_wall_contact(&mut a));

        let after = a.staged_velocity;
        assert!((after.length() - before.length()).abs() < 1e-12);
        assert!((after.dot(radial) + before.dot(radial)).abs() < 1e-12);
        assert!((after.dot(tangent) - before.dot(tangent)).abs() < 1e-12);
    }

    #[test]
    fn test_wall_at_center_is_noop() {
        let mut a = staged(0.0, 0.0, DVec2::new(1.0, 0.0), 1.0, 0.0);
        assert!(!resolve_wall_contact(&mut a));
        assert_eq!(a.staged_velocity, DVec2::new(1.0, 0.0));
    }
}
