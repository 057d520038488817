//! RNG oracle for deterministic random draws.
//!
//! The only randomized path in the core is the single-charge break roll of
//! [`crate::AreaBreaker`]. Draws are derived from an explicit seed so a cast can
//! be replayed, and tests can pin the outcome by choosing the seed.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / 4_294_967_296.0
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// Stateless: every draw is a pure function of the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed for one random draw.
///
/// * `cast_seed` - Base seed of the cast (for replay/determinism)
/// * `nonce` - Draw counter within the cast
/// * `actor_id` - Index of the casting entity, 0 for bodiless casters
/// * `context` - Distinguishes independent rolls of the same draw
pub fn compute_seed(cast_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers
    let mut hash = cast_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn unit_stays_in_half_open_interval() {
        let rng = PcgRng;
        for nonce in 0..1_000 {
            let value = rng.unit(compute_seed(7, nonce, 1, 0));
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn seeds_differ_per_nonce() {
        assert_ne!(compute_seed(1, 0, 0, 0), compute_seed(1, 1, 0, 0));
    }
}
