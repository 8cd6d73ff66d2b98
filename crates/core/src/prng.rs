//! Seedable Xorshift64 generator used for particle spawning.
//!
//! Every random draw in the animation (spawn position, speed modifier, trail
//! length, respawn position) goes through one generator owned by the
//! [`Effect`](crate::Effect), so a seed plus a config reproduces a run
//! tick for tick.

/// Xorshift64 PRNG with the (13, 7, 17) shift triple.
///
/// A seed of 0 is replaced by a fixed non-zero constant; zero is a fixed
/// point of xorshift and would yield zeros forever.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) built from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in [0, max), i.e. `floor(next_f64() * max)`.
    ///
    /// Scaling the unit float (rather than taking a modulo) keeps the
    /// distribution identical to the `floor(random * n)` draws the particle
    /// ranges are defined by.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_below(&mut self, max: usize) -> usize {
        assert!(max > 0, "next_below called with an empty range");
        ((self.next_f64() * max as f64) as usize).min(max - 1)
    }

    /// Uniform integer in the inclusive range [lo, hi].
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn next_between(&mut self, lo: usize, hi: usize) -> usize {
        assert!(lo <= hi, "next_between called with lo > hi");
        lo + self.next_below(hi - lo + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Changing this value means every seeded animation changes too.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_stall() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn next_below_covers_every_value() {
        let mut rng = Xorshift64::new(12345);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            seen[rng.next_below(3)] = true;
        }
        assert!(seen.iter().all(|&s| s), "some speed modifier never drawn");
    }

    #[test]
    fn next_below_one_is_always_zero() {
        let mut rng = Xorshift64::new(99);
        for _ in 0..100 {
            assert_eq!(rng.next_below(1), 0);
        }
    }

    #[test]
    fn next_between_is_inclusive() {
        let mut rng = Xorshift64::new(2024);
        let mut min = usize::MAX;
        let mut max = 0;
        for _ in 0..20_000 {
            let v = rng.next_between(10, 209);
            min = min.min(v);
            max = max.max(v);
        }
        assert_eq!(min, 10);
        assert_eq!(max, 209);
    }

    #[test]
    #[should_panic(expected = "empty range")]
    fn next_below_zero_panics() {
        Xorshift64::new(1).next_below(0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_below_in_bounds(seed: u64, max in 1_usize..10_000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_below(max);
                    prop_assert!(v < max, "next_below({max}) = {v}");
                }
            }
        }
    }
}
