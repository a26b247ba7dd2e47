//! Rotation and position integration.
//!
//! Turns the current heading toward the desired heading at a bounded angular
//! rate, advances the position along the heading, and applies the toroidal
//! boundary policy. The sign convention is load-bearing: headings measure from
//! world +Y and positive X is to the boid's left, so `x` decreases with
//! `sin(heading)` and `y` grows with `cos(heading)`. It must match the
//! local-frame rotation in [`crate::simulation::geometry`] exactly or agents
//! steer toward mirrored targets.

use std::f32::consts::{PI, TAU};

use super::boid::Boid;
use super::geometry::{fast_cos, fast_sin, unwrap_angle};
use super::params::Params;

/// Shortest signed angular difference from `from` to `to`, in `(-π, π]`.
pub fn shortest_turn(from: f32, to: f32) -> f32 {
    let diff = unwrap_angle(to - from);
    if diff > PI { diff - TAU } else { diff }
}

/// Advances one boid by one tick: bounded turn, position step, boundary wrap.
pub fn integrate(boid: &mut Boid, params: &Params, dt: f32) {
    boid.desired.rotation = unwrap_angle(boid.desired.rotation);

    let diff = shortest_turn(boid.rotation, boid.desired.rotation);
    let max_turn = params.turning_rate * boid.desired.magnitude;
    let turn = diff.abs().min(max_turn).copysign(diff);
    boid.rotation = unwrap_angle(boid.rotation + turn);

    let step = dt * params.speed * boid.desired.magnitude;
    boid.pos[0] -= fast_sin(boid.rotation) * step;
    boid.pos[1] += fast_cos(boid.rotation) * step;

    wrap_bounds(boid, params.max_x, params.max_y);
}

/// Toroidal wrap: crossing an edge resets the coordinate just inside the
/// opposite edge, preserving heading. Distinct from the return-margin steering
/// in [`crate::simulation::forces`], which pulls idle agents back before they
/// would wrap.
pub fn wrap_bounds(boid: &mut Boid, max_x: f32, max_y: f32) {
    if boid.pos[0] <= 0.0 {
        boid.pos[0] = max_x - 1.0;
    } else if boid.pos[0] >= max_x {
        boid.pos[0] = 1.0;
    }

    if boid.pos[1] <= 0.0 {
        boid.pos[1] = max_y - 1.0;
    } else if boid.pos[1] >= max_y {
        boid.pos[1] = 1.0;
    }
}
