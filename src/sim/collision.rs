//! Collision detection
//!
//! Every circle is tested against every other circle and the wall each step.
//! There is no broad phase; arenas hold at most a few hundred circles.

use serde::{Deserialize, Serialize};

use super::circle::{Circle, CircleId};
use super::geometry::{circle_gap, wall_gap};

/// Something a circle can be touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collider {
    /// Another circle in the same arena
    Circle(CircleId),
    /// The arena boundary
    Wall,
}

impl Collider {
    pub fn is_wall(&self) -> bool {
        matches!(self, Collider::Wall)
    }
}

/// Find everything overlapping `circle`
///
/// Candidates are visited in the order given; `id` is skipped so callers may
/// pass the whole collection. The wall, if touched, is always last.
/// Touching counts as overlapping for both tests.
pub fn detect_colliders<'a, I>(id: CircleId, circle: &Circle, candidates: I, arena_radius: f64) -> Vec<Collider>
where
    I: IntoIterator<Item = (CircleId, &'a Circle)>,
{
    let mut colliders: Vec<Collider> = candidates
        .into_iter()
        .filter(|(other_id, _)| *other_id != id)
        .filter(|(_, other)| circle_gap(circle.position, circle.radius, other.position, other.radius) <= 0.0)
        .map(|(other_id, _)| Collider::Circle(other_id))
        .collect();

    if wall_gap(circle.position, circle.radius, arena_radius) <= 0.0 {
        colliders.push(Collider::Wall);
    }

    colliders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Motion;
    use glam::DVec2;
    use slotmap::SlotMap;

    fn circle_at(x: f64, y: f64, radius: f64) -> Circle {
        Circle::new(radius, 1.0, 0.0, Motion::default())
            .unwrap()
            .with_position(DVec2::new(x, y))
    }

    #[test]
    fn test_detects_touching_and_overlapping() {
        let mut circles: SlotMap<CircleId, Circle> = SlotMap::with_key();
        let a = circles.insert(circle_at(0.0, 0.0, 5.0));
        let b = circles.insert(circle_at(10.0, 0.0, 5.0)); // touching
        let c = circles.insert(circle_at(-7.0, 0.0, 5.0)); // overlapping
        let _far = circles.insert(circle_at(0.0, 30.0, 5.0));

        let found = detect_colliders(a, &circles[a], circles.iter(), 100.0);
        assert_eq!(found, vec![Collider::Circle(b), Collider::Circle(c)]);
    }

    #[test]
    fn test_wall_is_last() {
        let mut circles: SlotMap<CircleId, Circle> = SlotMap::with_key();
        let a = circles.insert(circle_at(0.0, 96.0, 5.0));
        let b = circles.insert(circle_at(0.0, 88.0, 5.0));

        let found = detect_colliders(a, &circles[a], circles.iter(), 100.0);
        assert_eq!(found, vec![Collider::Circle(b), Collider::Wall]);
        assert!(found[1].is_wall());
    }

    #[test]
    fn test_wall_threshold_inclusive() {
        let mut circles: SlotMap<CircleId, Circle> = SlotMap::with_key();
        let at_limit = circles.insert(circle_at(0.0, 95.0, 5.0));
        let inside = circles.insert(circle_at(0.0, -94.0, 5.0));

        assert_eq!(
            detect_colliders(at_limit, &circles[at_limit], circles.iter(), 100.0),
            vec![Collider::Wall]
        );
        assert!(detect_colliders(inside, &circles[inside], circles.iter(), 100.0).is_empty());
    }
}
