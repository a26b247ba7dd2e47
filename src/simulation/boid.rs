//! Boid state and lifecycle.
//!
//! A boid is a plain data record: position, heading, the vector it wants to
//! travel along, and an informational classification tint. Rendering concerns
//! live entirely outside the crate; a presentation adapter reads
//! `(position, rotation, tint)` after each tick.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::classifier::Category;

/// The heading and speed a boid is steering toward.
///
/// `rotation` is measured from the world +Y axis, the same convention as the
/// boid's own heading. Instant variation is allowed; the integrator turns the
/// actual heading toward it at a bounded rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesiredVector {
    /// Target heading in radians, kept in `[0, 2π)`.
    pub rotation: f32,
    /// Target speed multiplier, `>= 0`.
    pub magnitude: f32,
}

/// One autonomous agent.
///
/// Boids fly towards their local +Y axis, with positive X to their left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boid {
    /// Stable identifier, also the index into the flock's agent vector.
    pub id: usize,
    /// Position in world space.
    pub pos: Array1<f32>,
    /// Current heading in radians, kept in `[0, 2π)`.
    pub rotation: f32,
    /// The heading and speed this boid wants to travel along.
    pub desired: DesiredVector,
    /// Which behavioral category dominated the last classification, if any.
    /// Informational only; the simulation never reads it back.
    pub tint: Option<Category>,
}

impl Boid {
    /// Creates a boid with a uniformly random position inside the world bounds
    /// and a uniformly random heading.
    pub fn new_random<R: Rng>(id: usize, max_x: f32, max_y: f32, rng: &mut R) -> Self {
        let pos = Array1::from_vec(vec![
            rng.random_range(0.0..max_x),
            rng.random_range(0.0..max_y),
        ]);
        let rotation = rng.random_range(0.0..TAU);

        Self {
            id,
            pos,
            rotation,
            desired: DesiredVector {
                rotation: rng.random_range(0.0..TAU),
                magnitude: 1.0,
            },
            tint: None,
        }
    }

    /// X coordinate shorthand.
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    /// Y coordinate shorthand.
    pub fn y(&self) -> f32 {
        self.pos[1]
    }
}
