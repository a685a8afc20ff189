//! RNG module - uniform random piece generation
//!
//! Each new piece is drawn uniformly from the seven kinds. A simple LCG keeps
//! the stream reproducible from a `u32` seed, which the tests and benches rely on.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }
}

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
    seed: u32,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_generator_same_seed_same_sequence() {
        let mut a = PieceGenerator::new(42);
        let mut b = PieceGenerator::new(42);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_generator_covers_all_kinds_roughly_uniformly() {
        let mut generator = PieceGenerator::new(2024);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = generator.next_kind();
            let i = PieceKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[i] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                (700..=1300).contains(&count),
                "{:?} drawn {} times",
                PieceKind::ALL[i],
                count
            );
        }
    }
}
