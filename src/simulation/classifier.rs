//! Neighbor classification into behavioral categories.
//!
//! For each agent the classifier looks at every other agent, gates the pair on
//! an awareness cap (the cohesion radius, the superset of all flock radii) and
//! on the vision cone, then files the neighbor into every category whose
//! radius contains it. Categories layer: one neighbor can sit in separation,
//! alignment, and cohesion at once. Predator and obstacle contacts come from
//! external point sources and are not vision-gated.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::boid::Boid;
use super::geometry::{local_coordinates, squared_distance, visibility};
use super::params::Params;
use super::spatial::SpatialIndex;

/// A named steering influence with its own radius and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Long-range attraction toward the average position of neighbors.
    Cohesion,
    /// Mid-range matching of the average heading of neighbors.
    Alignment,
    /// Short-range repulsion from crowding neighbors.
    Separation,
    /// Avoidance of an external predator point.
    Predator,
    /// Avoidance of an external obstacle point.
    Obstacle,
}

/// Snapshot of a neighboring agent that passed the visibility and radius
/// tests. Produced per tick and discarded once forces are blended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Neighbor world X.
    pub x: f32,
    /// Neighbor world Y.
    pub y: f32,
    /// Neighbor heading in radians.
    pub rotation: f32,
    /// Neighbor desired speed multiplier.
    pub magnitude: f32,
}

impl Neighbor {
    fn of(boid: &Boid) -> Self {
        Self {
            x: boid.x(),
            y: boid.y(),
            rotation: boid.rotation,
            magnitude: boid.desired.magnitude,
        }
    }
}

/// An external threat point that fell inside its configured radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatContact {
    /// World-space X offset from the agent to the threat.
    pub dx: f32,
    /// World-space Y offset from the agent to the threat.
    pub dy: f32,
    /// Euclidean distance to the threat.
    pub distance: f32,
}

/// External point sources supplied by the caller once per tick.
///
/// The predator is typically a pointer/cursor proxy; every agent treats it as
/// a threat when it falls inside the predator radius.
#[derive(Debug, Clone, Default)]
pub struct Threats {
    /// Optional predator position.
    pub predator: Option<Array1<f32>>,
    /// Optional obstacle position.
    pub obstacle: Option<Array1<f32>>,
}

/// Everything one agent perceived this tick.
///
/// Also serves as the diagnostic output a presentation layer may visualize in
/// place of the debug overlays the simulation itself no longer draws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Neighbors within the cohesion radius.
    pub cohesion: Vec<Neighbor>,
    /// Neighbors within the alignment radius.
    pub alignment: Vec<Neighbor>,
    /// Neighbors within the separation radius.
    pub separation: Vec<Neighbor>,
    /// Predator contact, if the source is configured and in range.
    pub predator: Option<ThreatContact>,
    /// Obstacle contact, if the source is configured and in range.
    pub obstacle: Option<ThreatContact>,
}

impl Classification {
    /// Display tint for the classified agent.
    ///
    /// Later checks override earlier ones, so cohesion wins over alignment and
    /// separation, and a threat contact wins over everything.
    pub fn tint(&self) -> Option<Category> {
        let mut tint = None;
        if !self.separation.is_empty() {
            tint = Some(Category::Separation);
        }
        if !self.alignment.is_empty() {
            tint = Some(Category::Alignment);
        }
        if !self.cohesion.is_empty() {
            tint = Some(Category::Cohesion);
        }
        if self.obstacle.is_some() {
            tint = Some(Category::Obstacle);
        }
        if self.predator.is_some() {
            tint = Some(Category::Predator);
        }
        tint
    }
}

/// Classifies an agent against the full snapshot with a brute-force scan.
///
/// O(n) per agent; the reference algorithm for correctness.
pub fn classify_brute(
    boid: &Boid,
    snapshot: &[Boid],
    threats: &Threats,
    params: &Params,
) -> Classification {
    classify_candidates(boid, snapshot, 0..snapshot.len(), threats, params)
}

/// Classifies an agent using a pre-built spatial index.
///
/// Candidates come from a radius query at the awareness cap; the per-candidate
/// gates are identical to [`classify_brute`], so both paths produce the same
/// classification.
pub fn classify_indexed(
    boid: &Boid,
    snapshot: &[Boid],
    index: &SpatialIndex,
    threats: &Threats,
    params: &Params,
) -> Classification {
    let mut candidates = index.query_within(&boid.pos, params.radius.cohesion);
    // The tree returns candidates in distance order; restore index order so
    // both classification paths walk neighbors identically.
    candidates.sort_unstable_by_key(|&(_, idx)| idx);
    classify_candidates(
        boid,
        snapshot,
        candidates.into_iter().map(|(_, idx)| idx),
        threats,
        params,
    )
}

fn classify_candidates(
    boid: &Boid,
    snapshot: &[Boid],
    candidates: impl IntoIterator<Item = usize>,
    threats: &Threats,
    params: &Params,
) -> Classification {
    let vision_angle = params.vision_angle_rad();
    let awareness = params.radius.cohesion;
    let cohesion_sq = params.radius.cohesion * params.radius.cohesion;
    let alignment_sq = params.radius.alignment * params.radius.alignment;
    let separation_sq = params.radius.separation * params.radius.separation;

    let mut classification = Classification::default();

    for idx in candidates {
        let other = &snapshot[idx];
        if other.id == boid.id {
            continue;
        }

        // Outside the awareness cap means outside every flock category.
        let Some(dist_sq) = squared_distance(&boid.pos, &other.pos, Some(awareness)) else {
            continue;
        };

        let (local_x, local_y) = local_coordinates(&boid.pos, boid.rotation, &other.pos);
        if !visibility(vision_angle, local_x, local_y).is_visible {
            continue;
        }

        let neighbor = Neighbor::of(other);

        if dist_sq < separation_sq {
            classification.separation.push(neighbor);
        }
        if dist_sq < alignment_sq {
            classification.alignment.push(neighbor);
        }
        if dist_sq < cohesion_sq {
            classification.cohesion.push(neighbor);
        }
    }

    classification.predator =
        threat_contact(&boid.pos, threats.predator.as_ref(), params.radius.predator);
    classification.obstacle =
        threat_contact(&boid.pos, threats.obstacle.as_ref(), params.radius.obstacle);

    classification
}

fn threat_contact(
    pos: &Array1<f32>,
    source: Option<&Array1<f32>>,
    radius: f32,
) -> Option<ThreatContact> {
    let source = source?;
    let dist_sq = squared_distance(pos, source, Some(radius))?;
    if dist_sq < radius * radius {
        Some(ThreatContact {
            dx: source[0] - pos[0],
            dy: source[1] - pos[1],
            distance: dist_sq.sqrt(),
        })
    } else {
        None
    }
}
