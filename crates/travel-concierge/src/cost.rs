//! Cost Policy
//!
//! Booking costs are quoted by the (simulated) provider network as a bounded
//! draw from each tool's declared band. The policy is injectable so tests
//! seed it and get deterministic quotes.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy trait for cost quotes
pub trait CostPolicy: Send + Sync {
    /// Quote a cost in whole currency units within [min, max]
    fn quote(&self, min: u32, max: u32) -> u32;
}

/// Uniform random quotes from the declared band
pub struct RandomCostPolicy {
    rng: Mutex<StdRng>,
}

impl Default for RandomCostPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomCostPolicy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic policy for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CostPolicy for RandomCostPolicy {
    fn quote(&self, min: u32, max: u32) -> u32 {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen_range(min..=max)
    }
}

/// Always quotes the same value, clamped into the band
pub struct FixedCostPolicy(pub u32);

impl CostPolicy for FixedCostPolicy {
    fn quote(&self, min: u32, max: u32) -> u32 {
        self.0.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_quotes_stay_in_band() {
        let policy = RandomCostPolicy::seeded(7);
        for _ in 0..100 {
            let quote = policy.quote(200, 700);
            assert!((200..=700).contains(&quote));
        }
    }

    #[test]
    fn test_seeded_policies_agree() {
        let a = RandomCostPolicy::seeded(42);
        let b = RandomCostPolicy::seeded(42);
        let quotes_a: Vec<_> = (0..10).map(|_| a.quote(50, 200)).collect();
        let quotes_b: Vec<_> = (0..10).map(|_| b.quote(50, 200)).collect();
        assert_eq!(quotes_a, quotes_b);
    }

    #[test]
    fn test_fixed_policy_clamps() {
        assert_eq!(FixedCostPolicy(10).quote(20, 100), 20);
        assert_eq!(FixedCostPolicy(55).quote(20, 100), 55);
        assert_eq!(FixedCostPolicy(500).quote(20, 100), 100);
    }
}
