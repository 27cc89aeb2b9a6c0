//! Built-in scenes and step hooks
//!
//! Random scenes are seeded so every run of a scene is reproducible.

use std::f64::consts::{FRAC_PI_2, TAU};

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use slotmap::SecondaryMap;

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::settings::{ArenaSettings, CircleBatch};
use crate::sim::{Arena, ArenaError, Circle, CircleId, Motion, Rgb, StepHook};

/// Highlight color for circles touching something
pub const CONTACT_COLOR: Rgb = Rgb(255, 125, 180);
/// Color used by the dense random scenes
pub const GAS_COLOR: Rgb = Rgb(60, 120, 250);
/// Upper bound on the popcorn population
pub const POPCORN_MAX_CIRCLES: usize = 400;

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Seven circles in a line; one moving circle knocks the last one loose
    NewtonsCradle,
    /// 140 circles laid out on a spiral, heading along it
    Spiral,
    /// Five circles of mixed size and weight
    Basic,
    /// Basic scene plus a new circle every 20 frames
    Fountain,
    /// 100 small circles scattered at random
    Gas,
    /// Circles spawn on every contact and are culled at random
    Popcorn,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::NewtonsCradle,
        Scenario::Spiral,
        Scenario::Basic,
        Scenario::Fountain,
        Scenario::Gas,
        Scenario::Popcorn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::NewtonsCradle => "cradle",
            Scenario::Spiral => "spiral",
            Scenario::Basic => "basic",
            Scenario::Fountain => "fountain",
            Scenario::Gas => "gas",
            Scenario::Popcorn => "popcorn",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cradle" | "newtons_cradle" => Some(Scenario::NewtonsCradle),
            "spiral" => Some(Scenario::Spiral),
            "basic" => Some(Scenario::Basic),
            "fountain" => Some(Scenario::Fountain),
            "gas" => Some(Scenario::Gas),
            "popcorn" => Some(Scenario::Popcorn),
            _ => None,
        }
    }

    /// Build the scene; `seed` only matters for the random ones
    pub fn build(self, seed: u64) -> Result<Arena, ArenaError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        match self {
            Scenario::NewtonsCradle => newtons_cradle(),
            Scenario::Spiral => Arena::from_settings(&spiral_settings()),
            Scenario::Basic => Arena::from_settings(&basic_settings()),
            Scenario::Fountain => {
                let mut arena = Arena::from_settings(&basic_settings())?;
                arena.add_hook(Box::new(Fountain::new(20)));
                Ok(arena)
            }
            Scenario::Gas => Arena::from_settings(&gas_settings(&mut rng, 100)),
            Scenario::Popcorn => {
                let mut arena = Arena::new(DEFAULT_ARENA_RADIUS, 1)?;
                arena.boundary_color = Rgb(10, 255, 25);
                arena.boundary_thickness = 10;
                for _ in 0..10 {
                    let pos = random_points_in_circle(&mut rng, 1, arena.radius())[0];
                    let vel = random_points_in_circle(&mut rng, 1, 2.0)[0];
                    let c = Circle::new(3.0, 1.0, 0.0, Motion::Vector(vel))?.with_position(pos);
                    arena.add_circle(c)?;
                }
                arena.add_hook(Box::new(Popcorn::new(rng, POPCORN_MAX_CIRCLES)));
                Ok(arena)
            }
        }
    }
}

/// Points spread uniformly over a disc of the given radius
pub fn random_points_in_circle<R: Rng>(rng: &mut R, amount: usize, radius: f64) -> Vec<DVec2> {
    (0..amount)
        .map(|_| {
            let angle = rng.random::<f64>() * TAU;
            let r = radius * rng.random::<f64>().sqrt();
            polar_to_cartesian(r, angle)
        })
        .collect()
}

fn newtons_cradle() -> Result<Arena, ArenaError> {
    let mut arena = Arena::new(DEFAULT_ARENA_RADIUS, 1)?;
    arena.boundary_thickness = 10;

    let ys = [-90.0, -20.0, -10.0, 0.0, 10.0, 20.0, 90.0];
    for (i, y) in ys.into_iter().enumerate() {
        let speed = if i == 0 { 2.0 } else { 0.0 };
        let c = Circle::new(4.0, 1.0, 0.0, Motion::Polar { speed, angle: FRAC_PI_2 })?
            .with_position(DVec2::new(0.0, y))
            .with_color(Rgb(125, 180, 255))
            .with_name(format!("c{i}"));
        arena.add_circle(c)?;
    }

    arena.add_hook(Box::new(ContactHighlight::new(CONTACT_COLOR)));
    Ok(arena)
}

fn basic_settings() -> ArenaSettings {
    ArenaSettings {
        radius: DEFAULT_ARENA_RADIUS,
        circles: Some(CircleBatch {
            amount: 5,
            positions: [(1.0, 5.0), (-1.0, 1.0), (5.0, 6.0), (9.0, 0.0), (3.0, 3.0)]
                .into_iter()
                .map(|(x, y)| DVec2::new(x, y))
                .collect(),
            sizes: vec![5.0, 5.0, 9.0, 5.0, 5.0],
            speeds: Some(vec![1.0, 1.0, 1.0, 2.0, 3.0]),
            angles: Some(vec![0.73, -0.6, 2.87, 3.0, -1.0]),
            vectors: None,
            weights: vec![1.0, 1.0, 5.0, 1.0, 1.0],
            damping: vec![0.0; 5],
            colors: vec![GAS_COLOR; 5],
        }),
        ..Default::default()
    }
}

fn spiral_settings() -> ArenaSettings {
    let amount = 140;
    let radius = DEFAULT_ARENA_RADIUS;
    let end = amount as f64 * 0.3;
    let scale = radius / end;
    let xs: Vec<f64> = (0..amount)
        .map(|i| 10.0 + (end - 10.0) * i as f64 / (amount - 1) as f64)
        .collect();

    ArenaSettings {
        radius,
        boundary_thickness: 5,
        circles: Some(CircleBatch {
            amount,
            positions: xs.iter().map(|&x| polar_to_cartesian(scale * x, x)).collect(),
            sizes: vec![3.0; amount],
            speeds: Some(vec![1.0; amount]),
            angles: Some(xs.clone()),
            vectors: None,
            weights: vec![1.0; amount],
            damping: vec![0.0; amount],
            colors: vec![GAS_COLOR; amount],
        }),
        ..Default::default()
    }
}

fn gas_settings(rng: &mut Pcg32, amount: usize) -> ArenaSettings {
    let radius = DEFAULT_ARENA_RADIUS;
    let positions = random_points_in_circle(rng, amount, radius);
    let angles = (0..amount).map(|_| rng.random::<f64>() * TAU).collect();

    ArenaSettings {
        radius,
        boundary_thickness: 5,
        circles: Some(CircleBatch {
            amount,
            positions,
            sizes: vec![3.0; amount],
            speeds: Some(vec![1.0; amount]),
            angles: Some(angles),
            vectors: None,
            weights: vec![1.0; amount],
            damping: vec![0.0; amount],
            colors: vec![GAS_COLOR; amount],
        }),
        ..Default::default()
    }
}

/// Recolors circles while they touch something, restoring their own color after
pub struct ContactHighlight {
    color: Rgb,
    original: SecondaryMap<CircleId, Rgb>,
}

impl ContactHighlight {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            original: SecondaryMap::new(),
        }
    }
}

impl StepHook for ContactHighlight {
    fn after_step(&mut self, arena: &mut Arena) {
        let ids = arena.ids().to_vec();
        for id in ids {
            let Some(circle) = arena.circle_mut(id) else {
                continue;
            };
            let original = match self.original.entry(id) {
                Some(entry) => *entry.or_insert(circle.color),
                None => circle.color,
            };
            circle.color = if circle.is_colliding() { self.color } else { original };
        }
    }
}

/// Adds a fast circle at the arena center every `every` frames
pub struct Fountain {
    every: u64,
}

impl Fountain {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl StepHook for Fountain {
    fn after_frame(&mut self, arena: &mut Arena) {
        if arena.frame_count() % self.every != 0 {
            return;
        }
        let spawned = Circle::new(DEFAULT_CIRCLE_RADIUS, DEFAULT_CIRCLE_MASS, 0.0, Motion::Polar { speed: 4.0, angle: 1.0 })
            .map_err(ArenaError::from)
            .and_then(|c| arena.add_circle(c.with_color(GAS_COLOR)));
        match spawned {
            Ok(_) => log::trace!("fountain spawned a circle at frame {}", arena.frame_count()),
            Err(e) => log::warn!("fountain could not spawn: {e}"),
        }
    }
}

/// After each frame, spawns one circle per contact and culls a twelfth at random
pub struct Popcorn {
    rng: Pcg32,
    max_circles: usize,
}

impl Popcorn {
    pub fn new(rng: Pcg32, max_circles: usize) -> Self {
        Self { rng, max_circles }
    }
}

impl StepHook for Popcorn {
    fn after_frame(&mut self, arena: &mut Arena) {
        let contacts = arena.contacts_in_last_step();
        let room = self.max_circles.saturating_sub(arena.len());
        let spawn = contacts.min(room);

        let positions = random_points_in_circle(&mut self.rng, spawn, arena.radius());
        let vectors = random_points_in_circle(&mut self.rng, spawn, 2.0);
        for (pos, vel) in positions.into_iter().zip(vectors) {
            let n = arena.len();
            let color = Rgb((3 * n).min(255) as u8, (12 * n).min(255) as u8, 100);
            let added = Circle::new(3.0, 1.0, 0.0, Motion::Vector(vel))
                .map_err(ArenaError::from)
                .and_then(|c| arena.add_circle(c.with_position(pos).with_color(color)));
            if let Err(e) = added {
                log::warn!("popcorn could not spawn: {e}");
            }
        }

        let cull = arena.len() / 12;
        for _ in 0..cull {
            let index = self.rng.random_range(0..arena.len());
            let id = arena.ids()[index];
            if let Err(e) = arena.remove_circle(id) {
                log::warn!("popcorn could not remove {id:?}: {e}");
            }
        }

        log::debug!(
            "popcorn frame {}: {} contacts, spawned {}, culled {}, {} circles",
            arena.frame_count(),
            contacts,
            spawn,
            cull,
            arena.len()
        );
    }
}
