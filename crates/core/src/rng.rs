//! RNG module - piece selection
//!
//! Every spawn picks one of the seven kinds uniformly at random. A small LCG
//! keeps games reproducible from a seed; a scripted sequence is available for
//! tests and demos that need a known order.

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
        // Seed 0 plays the same game as seed 1.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits (multiply-shift), the low bits of an LCG cycle with
    /// a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where new pieces come from.
#[derive(Debug, Clone)]
pub enum PieceFactory {
    /// Uniform choice over the catalog.
    Random(SimpleRng),
    /// Replays `kinds` in order, wrapping around.
    Sequence { kinds: Vec<PieceKind>, index: usize },
}

impl PieceFactory {
    pub fn random(seed: u32) -> Self {
        PieceFactory::Random(SimpleRng::new(seed))
    }

    /// Scripted factory. An empty list falls back to the catalog order.
    pub fn sequence(kinds: &[PieceKind]) -> Self {
        let kinds = if kinds.is_empty() {
            PieceKind::ALL.to_vec()
        } else {
            kinds.to_vec()
        };
        PieceFactory::Sequence { kinds, index: 0 }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            PieceFactory::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceFactory::Sequence { kinds, index } => {
                let kind = kinds[*index % kinds.len()];
                *index = index.wrapping_add(1);
                kind
            }
        }
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::random(1)
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
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        assert_eq!(SimpleRng::new(0).state(), 1);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_random_factory_covers_catalog() {
        let mut factory = PieceFactory::random(99);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = factory.next_kind();
            counts[(kind.id() - 1) as usize] += 1;
        }
        // Roughly uniform: every kind shows up a fair share of the time.
        for (i, count) in counts.iter().enumerate() {
            assert!(*count > 700, "kind #{} drawn only {} times", i, count);
        }
    }

    #[test]
    fn test_sequence_factory_wraps() {
        let mut factory = PieceFactory::sequence(&[PieceKind::T, PieceKind::O]);
        assert_eq!(factory.next_kind(), PieceKind::T);
        assert_eq!(factory.next_kind(), PieceKind::O);
        assert_eq!(factory.next_kind(), PieceKind::T);
    }

    #[test]
    fn test_empty_sequence_uses_catalog() {
        let mut factory = PieceFactory::sequence(&[]);
        let drawn: Vec<_> = (0..7).map(|_| factory.next_kind()).collect();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }
}
