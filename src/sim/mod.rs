//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed step size (1 / steps_per_frame)
//! - Stable iteration order (by insertion order)
//! - No rendering or platform dependencies
//!
//! One step runs four passes over the circles, each in collection order:
//! detection, resolution, integration, correction.

pub mod arena;
pub mod circle;
pub mod collision;
pub mod correct;
pub mod geometry;
pub mod integrate;
pub mod resolve;
pub mod snapshot;

pub use arena::{Arena, ArenaError, StepHook};
pub use circle::{Circle, CircleId, Motion, Rgb};
pub use collision::{Collider, detect_colliders};
pub use geometry::{circle_gap, reflect, unit_direction, wall_gap};
pub use snapshot::{CircleView, FrameSnapshot};
