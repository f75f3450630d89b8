use std::fmt;

use rand::Rng;

use crate::error::GymError;

/// A space of integers `{0, 1, ..., n - 1}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrete {
    n: usize,
}

impl Discrete {
    /// Create a discrete space with `n` elements
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero or exceeds `i64::MAX`. Use [`Discrete::try_new`]
    /// for untrusted input.
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "Discrete space must have at least one element");
        assert!(n as u64 <= i64::MAX as u64, "Discrete space elements must fit in i64");
        Self { n }
    }

    /// Create a discrete space, rejecting empty or oversized ones
    pub fn try_new(n: usize) -> Result<Self, GymError> {
        if n == 0 {
            return Err(GymError::InvalidSpace("Discrete space needs n > 0".to_string()));
        }
        if n as u64 > i64::MAX as u64 {
            return Err(GymError::InvalidSpace(format!("Discrete({}) exceeds i64 range", n)));
        }
        Ok(Self { n })
    }

    /// Number of elements
    pub fn n(&self) -> usize {
        self.n
    }

    /// Draw an element uniformly at random
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(0..self.n as i64)
    }

    /// Check membership
    pub fn contains(&self, x: i64) -> bool {
        x >= 0 && (x as u64) < self.n as u64
    }
}

impl fmt::Display for Discrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discrete({})", self.n)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_discrete_sample_is_contained() {
        let space = Discrete::new(8);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let x = space.sample(&mut rng);
            assert!(space.contains(x), "Sample {} should be in {}", x, space);
        }
        assert_eq!(space.n(), 8);
    }

    #[test]
    fn test_discrete_covers_all_values() {
        let space = Discrete::new(3);
        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = [false; 3];

        for _ in 0..200 {
            seen[space.sample(&mut rng) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "All actions should be sampled eventually");
    }

    #[test]
    fn test_discrete_contains_bounds() {
        let space = Discrete::new(2);
        assert!(space.contains(0));
        assert!(space.contains(1));
        assert!(!space.contains(2));
        assert!(!space.contains(-1));
    }

    #[test]
    fn test_discrete_rejects_empty() {
        assert!(Discrete::try_new(0).is_err());
    }

    #[test]
    #[should_panic(expected = "at least one element")]
    fn test_discrete_new_panics_on_empty() {
        Discrete::new(0);
    }

    #[test]
    fn test_discrete_rejects_sizes_beyond_i64() {
        assert!(Discrete::try_new(usize::MAX).is_err());
        assert!(Discrete::try_new(i64::MAX as usize).is_ok());
    }

    #[test]
    fn test_discrete_largest_space_samples() {
        let space = Discrete::new(i64::MAX as usize);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            assert!(space.contains(space.sample(&mut rng)));
        }
    }

    #[test]
    #[should_panic(expected = "fit in i64")]
    fn test_discrete_new_panics_beyond_i64() {
        Discrete::new(usize::MAX);
    }

    #[test]
    fn test_discrete_display() {
        assert_eq!(Discrete::new(2).to_string(), "Discrete(2)");
    }
}
