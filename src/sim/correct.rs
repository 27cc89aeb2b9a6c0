//! Post-step overlap correction
//!
//! Uses the contacts found at the start of the step but the positions after
//! integration. A single pass: with three or more circles piled together,
//! pushing one out of a neighbor can push it into another. Best effort only.

use glam::DVec2;

use super::circle::Circle;

/// Pull a circle back inside the arena if it has crossed the wall
pub fn correct_wall(circle: &mut Circle, arena_radius: f64) {
    let max_distance = arena_radius - circle.radius;
    let distance = circle.position.length();
    if distance > max_distance {
        circle.position *= max_distance / distance;
    }
}

/// Push a circle directly away from another until they just touch
///
/// Only `circle` moves. Coincident centers have no separating direction, so
/// the push goes along +x.
pub fn correct_overlap(circle: &mut Circle, other_position: DVec2, other_radius: f64) {
    let min_distance = circle.radius + other_radius;
    let offset = circle.position - other_position;
    let distance = offset.length();
    let overlap = min_distance - distance;
    if overlap <= 0.0 {
        return;
    }

    let direction = offset.try_normalize().unwrap_or_else(|| {
        log::debug!("'{}' shares a center with a neighbor, nudging along +x", circle.name);
        DVec2::X
    });
    circle.position += direction * overlap;
}
