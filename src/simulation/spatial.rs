//! Spatial indexing for efficient neighbor queries.
//!
//! Wraps a KD-tree over agent positions. The index is a pure accelerator: the
//! classifier applies the same distance and visibility gates to whatever
//! candidate set it receives, so an indexed query and a brute-force scan must
//! classify identically for a given configuration.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::boid::Boid;

/// Type alias for the 2D KD-tree used for neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// KD-tree over a snapshot of agent positions.
pub struct SpatialIndex {
    tree: Tree2D,
}

/// Result of a spatial radius query: (`distance_squared`, agent index) pairs.
pub type SpatialQueryResult = Vec<(f32, usize)>;

impl SpatialIndex {
    /// Builds an index from an agent snapshot.
    pub fn build(boids: &[Boid]) -> Result<Self, KdTreeError> {
        let mut tree = KdTree::with_capacity(2, boids.len());
        for (i, boid) in boids.iter().enumerate() {
            tree.add(boid.pos.to_vec(), i)?;
        }
        Ok(Self { tree })
    }

    /// Agents within `radius` of `pos`, including the querying agent itself.
    pub fn query_within(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        self.tree
            .within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }
}
