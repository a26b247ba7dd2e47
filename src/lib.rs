//! # Flocking - Emergent Boid Steering Simulation
//!
//! A simulation of autonomous agents ("boids") that flock through local steering
//! rules. Each agent perceives nearby agents within a forward-facing vision cone,
//! classifies them into behavioral categories, blends the categories into a single
//! desired heading and speed, and integrates rotation and position every tick.
//!
//! ## Features
//!
//! - Vision-cone gated neighbor classification (cohesion, alignment, separation)
//! - Weighted multi-force blending into one desired vector
//! - Turning-rate-limited rotation updates and toroidal boundary wrapping
//! - Predator and obstacle avoidance from external point sources
//! - Decaying spatial density grid ("heatmap") of agent visitation
//! - Seeded, reproducible runs with parallel per-agent updates
//!
//! The crate is a headless core: a presentation layer is expected to read each
//! agent's `(position, rotation, tint)` and the per-cell heatmap intensity after
//! every tick, and to mutate simulation state only through [`simulation::params`].
//!
//! ## Core Modules
//!
//! - [`simulation::flock`] - Main simulation engine and tick orchestration
//! - [`simulation::classifier`] - Neighbor classification under the vision cone
//! - [`simulation::forces`] - Per-category steering forces and blending
//! - [`simulation::steering`] - Rotation/position integration and wrapping
//! - [`simulation::heatmap`] - Density grid accumulation and decay

/// Core simulation logic and data structures.
pub mod simulation {
    /// Boid state: position, heading, desired vector, classification tint.
    pub mod boid;
    /// Neighbor classification into behavioral categories.
    pub mod classifier;
    /// Main flock simulation engine.
    pub mod flock;
    /// Per-category steering forces and weighted blending.
    pub mod forces;
    /// Pure geometric helpers: local frames, angles, distances.
    pub mod geometry;
    /// Decaying density grid of agent visitation.
    pub mod heatmap;
    /// Simulation parameters and validation.
    pub mod params;
    /// Deterministic RNG streams for reproducible runs.
    pub mod rng;
    /// Spatial indexing for efficient neighbor queries.
    pub mod spatial;
    /// Rotation and position integration.
    pub mod steering;
}
