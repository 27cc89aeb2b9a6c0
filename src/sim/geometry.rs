//! Vector helpers shared by the collision passes
//!
//! Gaps are signed: positive means separated, zero means touching,
//! negative means overlapping.

use glam::DVec2;

/// Signed gap between two circles (center distance minus radius sum)
#[inline]
pub fn circle_gap(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> f64 {
    a.distance(b) - (a_radius + b_radius)
}

/// Signed gap between a circle and the inside of the arena wall
///
/// The arena is centered at the origin.
#[inline]
pub fn wall_gap(pos: DVec2, radius: f64, arena_radius: f64) -> f64 {
    (arena_radius - radius) - pos.length()
}

/// Unit vector pointing from `from` to `to`, or `None` if the points coincide
#[inline]
pub fn unit_direction(from: DVec2, to: DVec2) -> Option<DVec2> {
    (to - from).try_normalize()
}

/// Reflect velocity off a surface with the given unit normal
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(vel: DVec2, normal: DVec2) -> DVec2 {
    vel - 2.0 * vel.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_gap_signs() {
        let a = DVec2::new(0.0, 0.0);
        assert!(circle_gap(a, 5.0, DVec2::new(11.0, 0.0), 5.0) > 0.0);
        assert_eq!(circle_gap(a, 5.0, DVec2::new(10.0, 0.0), 5.0), 0.0);
        assert!(circle_gap(a, 5.0, DVec2::new(9.0, 0.0), 5.0) < 0.0);
    }

    #[test]
    fn test_wall_gap() {
        // Circle of radius 5 in an arena of radius 100 may reach 95 from center
        assert_eq!(wall_gap(DVec2::new(0.0, 95.0), 5.0, 100.0), 0.0);
        assert!(wall_gap(DVec2::new(0.0, 96.0), 5.0, 100.0) < 0.0);
        assert!(wall_gap(DVec2::new(60.0, 0.0), 5.0, 100.0) > 0.0);
    }

    #[test]
    fn test_unit_direction_coincident() {
        let p = DVec2::new(3.0, 4.0);
        assert!(unit_direction(p, p).is_none());

        let dir = unit_direction(DVec2::ZERO, p).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-12);
        assert!((dir.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_velocity() {
        // Moving right into a wall whose normal points left
        let reflected = reflect(DVec2::new(100.0, 0.0), DVec2::new(-1.0, 0.0));
        assert!((reflected.x + 100.0).abs() < 1e-12);
        assert!(reflected.y.abs() < 1e-12);

        // Tangential component survives
        let reflected = reflect(DVec2::new(3.0, 4.0), DVec2::new(0.0, 1.0));
        assert_eq!(reflected, DVec2::new(3.0, -4.0));
    }
}
