//! Per-category steering forces and their weighted blending.
//!
//! Each category that captured at least one neighbor (or threat contact)
//! produces a candidate heading and magnitude; the blender folds the active
//! candidates into one desired vector with a weighted mean. Categories that
//! did not fire contribute nothing at all. Including them as zero-rotation
//! terms would bias the mean toward "north", so they are excluded from both
//! the numerator and the denominator.

use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI};

use super::boid::{Boid, DesiredVector};
use super::classifier::{Classification, Neighbor, ThreatContact};
use super::geometry::{angle_to_point, unwrap_angle};
use super::params::Params;

/// Minimum speed boost applied when fleeing crowding neighbors.
const SEPARATION_MIN_BOOST: f32 = 1.5;

/// Heading offset that turns "toward a point" into "directly away from it".
const AWAY: f32 = 3.0 * FRAC_PI_2;

/// Size of the random heading perturbation.
const PERTURB_STEP: f32 = PI / 20.0;

fn centroid(neighbors: &[Neighbor]) -> (f32, f32) {
    let inv = 1.0 / neighbors.len() as f32;
    let x = neighbors.iter().map(|n| n.x).sum::<f32>() * inv;
    let y = neighbors.iter().map(|n| n.y).sum::<f32>() * inv;
    (x, y)
}

/// Steer toward the centroid of cohesion neighbors.
///
/// Magnitude is floored at the current desired magnitude and grows with the
/// normalized centroid distance, closing faster when far from the group.
pub fn cohesion_force(boid: &Boid, neighbors: &[Neighbor], params: &Params) -> DesiredVector {
    let (cx, cy) = centroid(neighbors);
    let dx = cx - boid.x();
    let dy = cy - boid.y();

    let rotation = unwrap_angle(angle_to_point(dx, dy) - FRAC_PI_2);

    let closing = ((dx * dx + dy * dy).sqrt() / params.radius.cohesion).min(1.0);
    let magnitude = boid.desired.magnitude.max(1.0 + closing);

    DesiredVector {
        rotation,
        magnitude,
    }
}

/// Adopt the average heading and speed of alignment neighbors.
pub fn alignment_force(neighbors: &[Neighbor]) -> DesiredVector {
    let inv = 1.0 / neighbors.len() as f32;
    let rotation = neighbors.iter().map(|n| n.rotation).sum::<f32>() * inv;
    let magnitude = neighbors.iter().map(|n| n.magnitude).sum::<f32>() * inv;

    DesiredVector {
        rotation: unwrap_angle(rotation),
        magnitude,
    }
}

/// Steer directly away from the centroid of separation neighbors, with an
/// urgency floor on the magnitude.
pub fn separation_force(boid: &Boid, neighbors: &[Neighbor]) -> DesiredVector {
    let (cx, cy) = centroid(neighbors);
    let dx = cx - boid.x();
    let dy = cy - boid.y();

    DesiredVector {
        rotation: unwrap_angle(angle_to_point(dx, dy) - AWAY),
        magnitude: boid.desired.magnitude.max(SEPARATION_MIN_BOOST),
    }
}

/// Flee a predator or obstacle contact.
///
/// Magnitude follows a sigmoid of distance: near-baseline urgency at the rim
/// of the radius, rising sharply once the threat closes inside
/// `panic_center_fraction` of it.
pub fn threat_force(contact: &ThreatContact, radius: f32, params: &Params) -> DesiredVector {
    let rotation = unwrap_angle(angle_to_point(contact.dx, contact.dy) - AWAY);

    let center = params.panic_center_fraction * radius;
    let magnitude =
        params.panic_scale / (1.0 + (params.panic_steepness * (contact.distance - center)).exp())
            + 1.0;

    DesiredVector {
        rotation,
        magnitude,
    }
}

/// Blends all fired categories into the agent's next desired vector.
///
/// Falls back to the previous desired vector when nothing fired or the fired
/// weights sum to zero, so the mean never divides by zero. Idle agents either
/// retarget a random interior point (when stuck in the boundary band) or cool
/// their magnitude toward 1, and every agent has a small chance of a random
/// heading perturbation so flocks never become perfectly deterministic in
/// appearance.
pub fn blend<R: Rng>(
    boid: &Boid,
    classification: &Classification,
    params: &Params,
    rng: &mut R,
) -> DesiredVector {
    let mut terms: Vec<(f32, DesiredVector)> = Vec::new();

    if !classification.cohesion.is_empty() {
        terms.push((
            params.weight.cohesion,
            cohesion_force(boid, &classification.cohesion, params),
        ));
    }
    if !classification.alignment.is_empty() {
        terms.push((
            params.weight.alignment,
            alignment_force(&classification.alignment),
        ));
    }
    if !classification.separation.is_empty() {
        terms.push((
            params.weight.separation,
            separation_force(boid, &classification.separation),
        ));
    }
    if let Some(contact) = &classification.predator {
        terms.push((
            params.weight.predator,
            threat_force(contact, params.radius.predator, params),
        ));
    }
    if let Some(contact) = &classification.obstacle {
        terms.push((
            params.weight.obstacle,
            threat_force(contact, params.radius.obstacle, params),
        ));
    }

    let fired = !terms.is_empty();
    let weight_sum: f32 = terms.iter().map(|(w, _)| w).sum();

    let mut desired = if fired && weight_sum > 0.0 {
        let rotation = terms.iter().map(|(w, f)| w * f.rotation).sum::<f32>() / weight_sum;
        let magnitude = terms.iter().map(|(w, f)| w * f.magnitude).sum::<f32>() / weight_sum;
        DesiredVector {
            rotation: unwrap_angle(rotation),
            magnitude,
        }
    } else {
        boid.desired.clone()
    };

    if !fired {
        let delta = desired.rotation - boid.desired.rotation;
        if delta * delta < params.idle_rotation_epsilon && in_return_band(boid, params) {
            desired.rotation = return_rotation(boid, params, rng);
        } else {
            desired.magnitude = cool_toward_unity(desired.magnitude, params.cooldown_rate);
        }
    }

    if params.random_move_chance > 0.0 && rng.random_range(0.0..100.0) < params.random_move_chance
    {
        let step = if rng.random_bool(0.5) {
            PERTURB_STEP
        } else {
            -PERTURB_STEP
        };
        desired.rotation = unwrap_angle(desired.rotation + step);
    }

    desired
}

/// Whether the agent sits inside the boundary band where idle drift would end
/// in a wrap.
fn in_return_band(boid: &Boid, params: &Params) -> bool {
    let margin = params.return_margin;
    if margin <= 0.0 {
        return false;
    }
    boid.x() < margin
        || boid.x() > params.max_x - margin
        || boid.y() < margin
        || boid.y() > params.max_y - margin
}

/// Heading toward a freshly drawn random interior point.
fn return_rotation<R: Rng>(boid: &Boid, params: &Params, rng: &mut R) -> f32 {
    let margin = params.return_margin;

    let target_x = if params.max_x > 2.0 * margin {
        rng.random_range(margin..params.max_x - margin)
    } else {
        params.max_x / 2.0
    };
    let target_y = if params.max_y > 2.0 * margin {
        rng.random_range(margin..params.max_y - margin)
    } else {
        params.max_y / 2.0
    };

    unwrap_angle(angle_to_point(target_x - boid.x(), target_y - boid.y()) - FRAC_PI_2)
}

/// One cooldown step of the magnitude toward its resting value of 1.
fn cool_toward_unity(magnitude: f32, rate: f32) -> f32 {
    if magnitude > 1.0 {
        (magnitude - rate).max(1.0)
    } else if magnitude < 1.0 {
        (magnitude + rate).min(1.0)
    } else {
        1.0
    }
}
