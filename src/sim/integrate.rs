//! Position integration
//!
//! Commits staged state, then advances by one step of `1 / steps_per_frame`.

use super::circle::Circle;

/// Commit the staged position/velocity and move the circle one step
pub fn integrate(circle: &mut Circle, dt: f64) {
    circle.position = circle.staged_position;
    circle.velocity = circle.staged_velocity;

    let displacement = circle.velocity * dt;
    circle.position += displacement;
    circle.distance_traveled += displacement.length();
    circle.elapsed += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Motion;
    use glam::DVec2;

    #[test]
    fn test_commit_then_advance() {
        let mut c = Circle::new(1.0, 1.0, 0.0, Motion::Vector(DVec2::new(3.0, 4.0))).unwrap();
        c.stage();
        c.staged_velocity = DVec2::new(-3.0, 4.0);

        integrate(&mut c, 0.5);

        assert_eq!(c.velocity, DVec2::new(-3.0, 4.0));
        assert_eq!(c.position, DVec2::new(-1.5, 2.0));
        assert!((c.distance_traveled - 2.5).abs() < 1e-12);
        assert!((c.elapsed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_substeps_cover_one_frame() {
        let mut coarse = Circle::new(1.0, 1.0, 0.0, Motion::Vector(DVec2::new(2.0, 0.0))).unwrap();
        let mut fine = coarse.clone();

        coarse.stage();
        integrate(&mut coarse, 1.0);
        for _ in 0..4 {
            fine.stage();
            integrate(&mut fine, 0.25);
        }

        assert!((coarse.position - fine.position).length() < 1e-12);
        assert!((coarse.distance_traveled - fine.distance_traveled).abs() < 1e-12);
        assert!((coarse.elapsed - fine.elapsed).abs() < 1e-12);
    }
}
