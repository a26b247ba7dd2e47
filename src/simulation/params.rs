//! Simulation parameters and their validation.
//!
//! Parameters are read-only during a tick and may be hot-reloaded between
//! ticks; weight, radius, speed and tuning values take effect immediately.
//! Changing `agent_count` or the heatmap `cell_size` requires a call to
//! [`crate::simulation::flock::Flock::reset`] since both imply reallocation.

use serde::{Deserialize, Serialize};

use super::classifier::Category;

/// One `f32` per behavioral category.
///
/// Used for both perception radii and blend weights, so every category that
/// has a weight necessarily has a radius. A zero radius disables the category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap {
    /// Long-range attraction toward the group.
    pub cohesion: f32,
    /// Mid-range heading matching.
    pub alignment: f32,
    /// Short-range repulsion.
    pub separation: f32,
    /// Avoidance of the external predator point.
    pub predator: f32,
    /// Avoidance of the external obstacle point.
    pub obstacle: f32,
}

impl CategoryMap {
    /// Value for a single category.
    pub fn get(&self, category: Category) -> f32 {
        match category {
            Category::Cohesion => self.cohesion,
            Category::Alignment => self.alignment,
            Category::Separation => self.separation,
            Category::Predator => self.predator,
            Category::Obstacle => self.obstacle,
        }
    }
}

/// Density grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapParams {
    /// Whether the grid records visits at all.
    pub enabled: bool,
    /// World-space edge length of one cell. Must be positive.
    pub cell_size: f32,
    /// History added to a cell for each agent visit.
    pub increase_per_visit: f32,
    /// Per-tick decay, scaled against the grid's observed peak.
    pub attenuation_rate: f32,
}

/// Simulation parameters that control flock behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Number of agents. Fixed for the lifetime of a tick loop.
    pub agent_count: usize,
    /// World width. Agents wrap at this boundary.
    pub max_x: f32,
    /// World height.
    pub max_y: f32,
    /// Half-angle of the vision cone to either side of the heading, in
    /// degrees. `0` is blind, `180` sees every bearing.
    pub vision_angle_deg: f32,
    /// Base movement speed multiplier.
    pub speed: f32,
    /// Maximum heading change per tick in radians, scaled by the desired
    /// magnitude at integration time.
    pub turning_rate: f32,
    /// Percent chance per tick of a small random heading perturbation.
    pub random_move_chance: f32,
    /// Width of the boundary band within which idle agents are steered back
    /// toward the interior instead of drifting into a wrap.
    pub return_margin: f32,
    /// Per-tick rate at which an idle agent's magnitude converges toward 1.
    pub cooldown_rate: f32,
    /// Perception radius per category.
    pub radius: CategoryMap,
    /// Blend weight per category.
    pub weight: CategoryMap,
    /// Density grid configuration.
    pub heatmap: HeatmapParams,
    /// Squared desired-rotation change below which an idle tick counts as
    /// "no steering happened". Tuned constant, kept configurable.
    pub idle_rotation_epsilon: f32,
    /// Peak urgency added by the predator/obstacle panic curve.
    pub panic_scale: f32,
    /// Steepness of the panic sigmoid in inverse world units.
    pub panic_steepness: f32,
    /// Fraction of the threat radius at which panic reaches half strength.
    pub panic_center_fraction: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed: 42,
            agent_count: 100,
            max_x: 800.0,
            max_y: 600.0,
            vision_angle_deg: 35.0,
            speed: 1.0,
            turning_rate: 0.1,
            random_move_chance: 2.0,
            return_margin: 50.0,
            cooldown_rate: 0.01,
            radius: CategoryMap {
                cohesion: 500.0,
                alignment: 60.0,
                separation: 20.0,
                predator: 400.0,
                obstacle: 0.0,
            },
            weight: CategoryMap {
                cohesion: 40.0,
                alignment: 1.0,
                separation: 1.0,
                predator: 10.0,
                obstacle: 0.0,
            },
            heatmap: HeatmapParams {
                enabled: false,
                cell_size: 10.0,
                increase_per_visit: 1.0,
                attenuation_rate: 1.0,
            },
            idle_rotation_epsilon: 0.01,
            panic_scale: 2.0,
            panic_steepness: 0.05,
            panic_center_fraction: 0.7,
        }
    }
}

/// A configuration value that would poison the tick loop.
///
/// Validation runs at load time so the loop itself never has to deal with
/// negative radii, zero world dimensions, or NaN propagation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// `agent_count` must be at least 1.
    NoAgents,
    /// A dimension or size that must be strictly positive was not.
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A rate, radius, or weight that must be non-negative was negative.
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A bounded value fell outside its allowed range.
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
}

impl std::fmt::Display for ParamsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAgents => write!(f, "agent_count must be at least 1"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "{field} must be within [{min}, {max}], got {value}")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

fn require_positive(field: &'static str, value: f32) -> Result<(), ParamsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParamsError::NonPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ParamsError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::Negative { field, value })
    }
}

fn require_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ParamsError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl Params {
    /// Checks every field against its documented bounds.
    ///
    /// Returns the first violation found, naming the offending field.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.agent_count == 0 {
            return Err(ParamsError::NoAgents);
        }

        require_positive("max_x", self.max_x)?;
        require_positive("max_y", self.max_y)?;
        require_range("vision_angle_deg", self.vision_angle_deg, 0.0, 180.0)?;
        require_non_negative("speed", self.speed)?;
        require_non_negative("turning_rate", self.turning_rate)?;
        require_range("random_move_chance", self.random_move_chance, 0.0, 100.0)?;
        require_non_negative("return_margin", self.return_margin)?;
        require_non_negative("cooldown_rate", self.cooldown_rate)?;

        require_non_negative("radius.cohesion", self.radius.cohesion)?;
        require_non_negative("radius.alignment", self.radius.alignment)?;
        require_non_negative("radius.separation", self.radius.separation)?;
        require_non_negative("radius.predator", self.radius.predator)?;
        require_non_negative("radius.obstacle", self.radius.obstacle)?;

        require_non_negative("weight.cohesion", self.weight.cohesion)?;
        require_non_negative("weight.alignment", self.weight.alignment)?;
        require_non_negative("weight.separation", self.weight.separation)?;
        require_non_negative("weight.predator", self.weight.predator)?;
        require_non_negative("weight.obstacle", self.weight.obstacle)?;

        require_positive("heatmap.cell_size", self.heatmap.cell_size)?;
        require_non_negative("heatmap.increase_per_visit", self.heatmap.increase_per_visit)?;
        require_non_negative("heatmap.attenuation_rate", self.heatmap.attenuation_rate)?;

        require_non_negative("idle_rotation_epsilon", self.idle_rotation_epsilon)?;
        require_non_negative("panic_scale", self.panic_scale)?;
        require_non_negative("panic_steepness", self.panic_steepness)?;
        require_range(
            "panic_center_fraction",
            self.panic_center_fraction,
            0.0,
            1.0,
        )?;

        Ok(())
    }

    /// Vision cone half-angle in radians.
    pub fn vision_angle_rad(&self) -> f32 {
        self.vision_angle_deg.to_radians()
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
