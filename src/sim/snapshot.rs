//! Read-only view of an arena for renderers and exporters

use glam::DVec2;
use serde::Serialize;

use super::arena::Arena;
use super::circle::{CircleId, Rgb};

/// What a renderer needs to draw one circle
#[derive(Debug, Clone, Serialize)]
pub struct CircleView {
    pub id: CircleId,
    pub name: String,
    pub position: DVec2,
    pub radius: f64,
    pub color: Rgb,
    /// Number of things touched in the last step
    pub contacts: usize,
}

/// State of the whole arena after a frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub step: u64,
    pub boundary_radius: f64,
    pub boundary_color: Rgb,
    pub boundary_thickness: u32,
    pub circles: Vec<CircleView>,
}

impl FrameSnapshot {
    pub fn capture(arena: &Arena) -> Self {
        Self {
            frame: arena.frame_count(),
            step: arena.step_count(),
            boundary_radius: arena.radius(),
            boundary_color: arena.boundary_color,
            boundary_thickness: arena.boundary_thickness,
            circles: arena
                .circles()
                .map(|(id, c)| CircleView {
                    id,
                    name: c.name.clone(),
                    position: c.position,
                    radius: c.radius,
                    color: c.color,
                    contacts: c.current_colliders().len(),
                })
                .collect(),
        }
    }

    /// Contacts summed over all circles (a touching pair counts twice)
    pub fn total_contacts(&self) -> usize {
        self.circles.iter().map(|c| c.contacts).sum()
    }
}
