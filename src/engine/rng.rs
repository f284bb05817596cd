//! Injectable random source.
//!
//! Scenes are seeded from runtime entropy at mount, so two mounts never
//! repeat. Everything downstream takes the source as a parameter, which is
//! what lets tests drive the generator and updater deterministically.

/// Uniform float stream consumed by the generator and the wraparound rule.
pub trait RandomSource {
    /// Next uniform sample in [0, 1].
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in [min, max].
    fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform index below `len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }
}

/// xorshift32 generator. Fast, no state beyond one word, good enough for
/// decorative placement.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Zero seeds are remapped; xorshift32 has a fixed point at zero.
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    /// Seed from runtime entropy. Not reproducible across mounts.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }
}

impl RandomSource for XorShiftRng {
    fn next_f32(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state as f32) / (u32::MAX as f32)
    }
}

/// Draw a seed from the ambient hasher state.
pub fn entropy_seed() -> u32 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let hasher = RandomState::new().build_hasher();
    let bits = hasher.finish();
    ((bits >> 32) as u32) ^ (bits as u32)
}
