//! Deterministic RNG streams for reproducible simulation runs.
//!
//! The engine never touches ambient randomness. Every draw comes from a
//! ChaCha stream derived from the configured seed, so a run is a pure
//! function of `(Params, tick count, threat inputs)`.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Multiplier separating per-agent streams in seed space.
const AGENT_STREAM_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// Multiplier separating per-tick streams in seed space.
const TICK_STREAM_PRIME: u64 = 0xD1B5_4A32_D192_ED03;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive an independent RNG stream for one agent on one tick.
///
/// Keeping the streams independent lets the per-agent phase run in parallel
/// without losing determinism.
pub fn derive_agent_rng(base_seed: u64, agent_id: usize, tick: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed
            .wrapping_add((agent_id as u64).wrapping_mul(AGENT_STREAM_PRIME))
            .wrapping_add(tick.wrapping_mul(TICK_STREAM_PRIME)),
    )
}
