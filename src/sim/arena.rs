//! The bounded arena and its step loop

use std::fmt;

use glam::DVec2;
use slotmap::SlotMap;
use thiserror::Error;

use super::circle::{Circle, CircleId, Rgb};
use super::collision::{Collider, detect_colliders};
use super::correct::{correct_overlap, correct_wall};
use super::integrate::integrate;
use super::resolve::{resolve_circle_contact, resolve_wall_contact};
use crate::consts::{DEFAULT_BOUNDARY_COLOR, DEFAULT_BOUNDARY_THICKNESS};
use crate::settings::{ArenaSettings, ConfigError};

/// Errors from arena bookkeeping
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("no circle with id {0:?} in this arena")]
    UnknownCircle(CircleId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Policy object called at step and frame boundaries
///
/// Hooks get full mutable access to the arena, so they may add, remove or
/// recolor circles. They never run while a step is in progress.
pub trait StepHook {
    fn before_step(&mut self, _arena: &mut Arena) {}
    fn after_step(&mut self, _arena: &mut Arena) {}
    fn after_frame(&mut self, _arena: &mut Arena) {}
}

/// A circular play space centered at the origin
pub struct Arena {
    radius: f64,
    /// Boundary color for renderers
    pub boundary_color: Rgb,
    /// Boundary line width for renderers
    pub boundary_thickness: u32,
    steps_per_frame: u32,
    circles: SlotMap<CircleId, Circle>,
    /// Processing order; insertion order unless circles are removed
    order: Vec<CircleId>,
    step_count: u64,
    frame_count: u64,
    hooks: Vec<Box<dyn StepHook>>,
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("radius", &self.radius)
            .field("steps_per_frame", &self.steps_per_frame)
            .field("circles", &self.order.len())
            .field("step_count", &self.step_count)
            .field("frame_count", &self.frame_count)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Arena {
    /// Create an empty arena
    pub fn new(radius: f64, steps_per_frame: u32) -> Result<Self, ConfigError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidArenaRadius(radius));
        }
        if steps_per_frame == 0 {
            return Err(ConfigError::ZeroStepsPerFrame);
        }

        Ok(Self {
            radius,
            boundary_color: DEFAULT_BOUNDARY_COLOR,
            boundary_thickness: DEFAULT_BOUNDARY_THICKNESS,
            steps_per_frame,
            circles: SlotMap::with_key(),
            order: Vec::new(),
            step_count: 0,
            frame_count: 0,
            hooks: Vec::new(),
        })
    }

    /// Build an arena and its initial circles from settings
    pub fn from_settings(settings: &ArenaSettings) -> Result<Self, ArenaError> {
        let mut arena = Self::new(settings.radius, settings.steps_per_frame)?;
        arena.boundary_color = settings.boundary_color;
        arena.boundary_thickness = settings.boundary_thickness;

        if let Some(batch) = &settings.circles {
            for circle in batch.build()? {
                arena.add_circle(circle)?;
            }
        }
        Ok(arena)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn steps_per_frame(&self) -> u32 {
        self.steps_per_frame
    }

    /// Length of one physics step, in frames
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.steps_per_frame)
    }

    /// Physics steps run so far
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Frames run so far via [`Arena::simulate_frame`]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add a circle at the end of the processing order
    pub fn add_circle(&mut self, mut circle: Circle) -> Result<CircleId, ArenaError> {
        if circle.radius > self.radius {
            return Err(ConfigError::CircleTooLarge {
                radius: circle.radius,
                arena_radius: self.radius,
            }
            .into());
        }
        circle.current_colliders.clear();
        let id = self.circles.insert(circle);
        self.order.push(id);
        Ok(id)
    }

    /// Remove a circle, keeping the order of the rest
    pub fn remove_circle(&mut self, id: CircleId) -> Result<Circle, ArenaError> {
        let circle = self.circles.remove(id).ok_or(ArenaError::UnknownCircle(id))?;
        self.order.retain(|&other| other != id);
        for other in self.circles.values_mut() {
            other.current_colliders.retain(|c| *c != Collider::Circle(id));
        }
        Ok(circle)
    }

    pub fn circle(&self, id: CircleId) -> Option<&Circle> {
        self.circles.get(id)
    }

    pub fn circle_mut(&mut self, id: CircleId) -> Option<&mut Circle> {
        self.circles.get_mut(id)
    }

    /// Circle ids in processing order
    pub fn ids(&self) -> &[CircleId] {
        &self.order
    }

    /// Circles in processing order
    pub fn circles(&self) -> impl Iterator<Item = (CircleId, &Circle)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.circles.get(id).map(|c| (id, c)))
    }

    /// Register a hook; hooks run in registration order
    pub fn add_hook(&mut self, hook: Box<dyn StepHook>) {
        self.hooks.push(hook);
    }

    pub fn total_momentum(&self) -> DVec2 {
        self.circles().map(|(_, c)| c.momentum()).sum()
    }

    pub fn total_kinetic_energy(&self) -> f64 {
        self.circles().map(|(_, c)| c.kinetic_energy()).sum()
    }

    /// Number of contacts (circle and wall) found in the last step, summed over circles
    pub fn contacts_in_last_step(&self) -> usize {
        self.circles().map(|(_, c)| c.current_colliders.len()).sum()
    }

    /// Run one frame: `steps_per_frame` steps, then frame hooks
    pub fn simulate_frame(&mut self) {
        for _ in 0..self.steps_per_frame {
            self.step();
        }
        self.frame_count += 1;
        self.run_hooks(|hook, arena| hook.after_frame(arena));
    }

    /// Advance the simulation by one physics step
    pub fn step(&mut self) {
        self.run_hooks(|hook, arena| hook.before_step(arena));

        self.step_count += 1;
        let dt = self.dt();

        self.detect();
        self.resolve();

        for &id in &self.order {
            if let Some(circle) = self.circles.get_mut(id) {
                integrate(circle, dt);
            }
        }

        self.correct();

        self.run_hooks(|hook, arena| hook.after_step(arena));
    }

    /// Find contacts for every circle from committed positions
    fn detect(&mut self) {
        let contacts: Vec<(CircleId, Vec<Collider>)> = self
            .circles()
            .map(|(id, circle)| (id, detect_colliders(id, circle, self.circles(), self.radius)))
            .collect();

        for (id, colliders) in contacts {
            if let Some(circle) = self.circles.get_mut(id) {
                circle.collisions += colliders.iter().filter(|c| !c.is_wall()).count() as u64;
                circle.current_colliders = colliders;
            }
        }
    }

    /// Turn contacts into staged velocities, in collection order
    fn resolve(&mut self) {
        for &id in &self.order {
            let Some(circle) = self.circles.get_mut(id) else {
                continue;
            };
            circle.stage();
            let colliders = std::mem::take(&mut circle.current_colliders);

            for collider in &colliders {
                match *collider {
                    Collider::Circle(other_id) => {
                        // Committed state of the other circle, untouched until integration
                        let Some((pos, vel, mass)) = self.circles.get(other_id).map(|o| (o.position, o.velocity, o.mass))
                        else {
                            continue;
                        };
                        if let Some(circle) = self.circles.get_mut(id) {
                            resolve_circle_contact(circle, pos, vel, mass);
                        }
                    }
                    Collider::Wall => {
                        if let Some(circle) = self.circles.get_mut(id) {
                            resolve_wall_contact(circle);
                        }
                    }
                }
            }

            if let Some(circle) = self.circles.get_mut(id) {
                circle.current_colliders = colliders;
            }
        }
    }

    /// Remove leftover overlap against this step's contacts
    ///
    /// Circle pushes use the contacts found at the start of the step. Every
    /// circle is then pulled back inside the wall, whether or not it touched the
    /// wall at the start, so no center ends a step past `radius - circle.radius`.
    fn correct(&mut self) {
        let radius = self.radius;
        for &id in &self.order {
            let Some(circle) = self.circles.get_mut(id) else {
                continue;
            };
            let colliders = std::mem::take(&mut circle.current_colliders);

            for collider in &colliders {
                let Collider::Circle(other_id) = *collider else {
                    continue;
                };
                let Some((pos, r)) = self.circles.get(other_id).map(|o| (o.position, o.radius)) else {
                    continue;
                };
                if let Some(circle) = self.circles.get_mut(id) {
                    correct_overlap(circle, pos, r);
                }
            }

            if let Some(circle) = self.circles.get_mut(id) {
                correct_wall(circle, radius);
                circle.current_colliders = colliders;
            }
        }
    }

    fn run_hooks(&mut self, mut f: impl FnMut(&mut dyn StepHook, &mut Arena)) {
        if self.hooks.is_empty() {
            return;
        }
        let mut hooks = std::mem::take(&mut self.hooks);
        for hook in hooks.iter_mut() {
            f(hook.as_mut(), self);
        }
        // Keep hooks registered while ours were taken out
        hooks.append(&mut self.hooks);
        self.hooks = hooks;
    }
}
