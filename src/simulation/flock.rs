//! Main flock simulation engine.
//!
//! The engine owns the agent collection and the density grid, and orchestrates
//! one tick: classify, blend, integrate for every agent, then fold the new
//! positions into the grid. Classification always runs against a clone of the
//! previous tick's agent state, so no agent ever observes another agent's
//! already-updated position; that snapshot is also what makes the per-agent
//! phase safe to run in parallel.

use rayon::prelude::*;

use super::boid::Boid;
use super::classifier::{self, Classification, Threats};
use super::forces;
use super::heatmap::DensityGrid;
use super::params::{Params, ParamsError};
use super::rng;
use super::spatial::SpatialIndex;
use super::steering;

/// The flock: all agents, the density grid, and the tick counter.
///
/// Per-tick outputs for the presentation layer are each boid's
/// `(position, rotation, tint)` and the grid's intensity ratios; nothing else
/// is part of the observable contract.
#[derive(Debug, Clone)]
pub struct Flock {
    /// All agents, indexed by their `id`.
    pub boids: Vec<Boid>,
    /// Density grid of agent visitation.
    pub grid: DensityGrid,
    /// Ticks stepped since the last reset.
    pub tick: u64,
    seed: u64,
}

impl Flock {
    /// Validates the configuration and creates a freshly seeded flock.
    pub fn new(params: &Params) -> Result<Self, ParamsError> {
        params.validate()?;

        let mut flock = Self {
            boids: Vec::new(),
            grid: DensityGrid::new(params.max_x, params.max_y, params.heatmap.cell_size),
            tick: 0,
            seed: params.seed,
        };
        flock.populate(params);
        Ok(flock)
    }

    /// Discards all agents and grid state and reseeds from the configuration.
    ///
    /// Required after changing `agent_count` or the heatmap `cell_size`; every
    /// other parameter hot-reloads between ticks through [`Flock::step`].
    pub fn reset(&mut self, params: &Params) -> Result<(), ParamsError> {
        params.validate()?;

        self.seed = params.seed;
        self.tick = 0;
        self.grid = DensityGrid::new(params.max_x, params.max_y, params.heatmap.cell_size);
        self.populate(params);
        Ok(())
    }

    fn populate(&mut self, params: &Params) {
        let mut seed_rng = rng::create_rng(params.seed);
        self.boids = (0..params.agent_count)
            .map(|id| Boid::new_random(id, params.max_x, params.max_y, &mut seed_rng))
            .collect();
    }

    /// Advances the simulation by one tick.
    ///
    /// `dt` is the frame delta the position advance scales by; `threats`
    /// carries the optional external predator/obstacle points for this tick.
    pub fn step(&mut self, params: &Params, dt: f32, threats: &Threats) {
        self.tick += 1;

        if params.heatmap.enabled {
            self.grid.decay_tick(params.heatmap.attenuation_rate);
        }

        // Consistent previous-tick snapshot for classification.
        let snapshot = self.boids.clone();
        let index = SpatialIndex::build(&snapshot).expect("Failed to build spatial index");

        let seed = self.seed;
        let tick = self.tick;

        self.boids.par_iter_mut().for_each(|boid| {
            let mut agent_rng = rng::derive_agent_rng(seed, boid.id, tick);

            let classification =
                classifier::classify_indexed(boid, &snapshot, &index, threats, params);
            boid.tint = classification.tint();

            let desired = forces::blend(boid, &classification, params, &mut agent_rng);
            boid.desired = desired;

            steering::integrate(boid, params, dt);
        });

        if params.heatmap.enabled {
            let increase = params.heatmap.increase_per_visit;
            for boid in &self.boids {
                self.grid.record_visit(boid.x(), boid.y(), increase);
            }
        }
    }

    /// Diagnostic classification of one agent against the current state.
    ///
    /// Read-only; intended for presentation layers that want to visualize
    /// which neighbors fell into which category.
    pub fn classify_agent(
        &self,
        id: usize,
        params: &Params,
        threats: &Threats,
    ) -> Option<Classification> {
        let boid = self.boids.get(id)?;
        Some(classifier::classify_brute(boid, &self.boids, threats, params))
    }
}
