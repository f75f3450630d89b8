use std::fmt;

use rand::Rng;

use crate::error::GymError;

/// A (possibly unbounded) box in R^n
///
/// Each dimension `i` spans `[low[i], high[i]]`. A bound of `±f32::MAX` or
/// `±inf` marks that side as unbounded, which only changes how `sample`
/// draws values for it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl BoxSpace {
    /// Create a box from per-dimension lower and upper bounds
    pub fn new(low: impl Into<Vec<f32>>, high: impl Into<Vec<f32>>) -> Result<Self, GymError> {
        let low = low.into();
        let high = high.into();

        if low.len() != high.len() {
            return Err(GymError::InvalidSpace(format!(
                "low has {} dims but high has {}",
                low.len(),
                high.len()
            )));
        }
        for (i, (l, h)) in low.iter().zip(&high).enumerate() {
            if l.is_nan() || h.is_nan() {
                return Err(GymError::InvalidSpace(format!("NaN bound in dim {}", i)));
            }
            if l > h {
                return Err(GymError::InvalidSpace(format!("low > high in dim {}", i)));
            }
        }

        Ok(Self { low, high })
    }

    /// Create a box symmetric around zero: `[-high, high]`
    pub fn symmetric(high: impl Into<Vec<f32>>) -> Result<Self, GymError> {
        let high = high.into();
        let low: Vec<f32> = high.iter().map(|h| -h).collect();
        Self::new(low, high)
    }

    /// Lower bounds
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Upper bounds
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Shape of an element
    pub fn shape(&self) -> Vec<usize> {
        vec![self.low.len()]
    }

    /// Draw a random element
    ///
    /// Bounded dimensions are sampled uniformly, half-bounded ones from a
    /// shifted exponential, and unbounded ones from a standard normal.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        self.low
            .iter()
            .zip(&self.high)
            .map(|(&low, &high)| match (is_bounded(low), is_bounded(high)) {
                _ if low == high => low,
                (true, true) if (high - low).is_finite() => rng.gen_range(low..=high),
                (true, true) => {
                    // Span overflows f32; interpolate without forming high - low
                    let t: f32 = rng.r#gen();
                    (low * (1.0 - t) + high * t).clamp(low, high)
                }
                (true, false) => low + exponential(rng),
                (false, true) => high - exponential(rng),
                (false, false) => standard_normal(rng),
            })
            .collect()
    }

    /// Check that `x` has the right length and lies within the bounds
    pub fn contains(&self, x: &[f32]) -> bool {
        x.len() == self.low.len()
            && x
                .iter()
                .zip(self.low.iter().zip(&self.high))
                .all(|(v, (l, h))| *v >= *l && *v <= *h)
    }
}

impl fmt::Display for BoxSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({},)", self.low.len())
    }
}

fn is_bounded(bound: f32) -> bool {
    bound.is_finite() && bound.abs() < f32::MAX
}

fn exponential<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // 1 - u lies in (0, 1], keeping ln finite
    let u: f32 = rng.r#gen();
    -(1.0 - u).ln()
}

// Box-Muller
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let u1: f32 = 1.0 - rng.r#gen::<f32>();
    let u2: f32 = rng.r#gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_box_rejects_mismatched_bounds() {
        assert!(BoxSpace::new(vec![0.0, 0.0], vec![1.0]).is_err());
        assert!(BoxSpace::new(vec![1.0], vec![0.0]).is_err());
        assert!(BoxSpace::new(vec![f32::NAN], vec![0.0]).is_err());
    }

    #[test]
    fn test_box_samples_are_contained() {
        let space = BoxSpace::new(vec![-1.2, -0.07], vec![0.6, 0.07]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let x = space.sample(&mut rng);
            assert!(space.contains(&x), "Sample {:?} should be in box", x);
        }
    }

    #[test]
    fn test_box_unbounded_dims() {
        let space = BoxSpace::symmetric(vec![4.8, f32::MAX]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let x = space.sample(&mut rng);
            assert!(x[1].is_finite());
            assert!(space.contains(&x));
        }
    }

    #[test]
    fn test_box_span_wider_than_f32() {
        let space = BoxSpace::new(vec![-3.0e38], vec![3.0e38]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..500 {
            let x = space.sample(&mut rng);
            assert!(x[0].is_finite());
            assert!(space.contains(&x), "Sample {:?} should be in box", x);
        }
    }

    #[test]
    fn test_box_degenerate_unbounded_dims() {
        let space =
            BoxSpace::new(vec![f32::MAX, f32::NEG_INFINITY], vec![f32::MAX, f32::NEG_INFINITY])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let x = space.sample(&mut rng);
        assert_eq!(x, vec![f32::MAX, f32::NEG_INFINITY]);
        assert!(space.contains(&x));
    }

    #[test]
    fn test_box_half_bounded() {
        let space = BoxSpace::new(vec![2.0], vec![f32::INFINITY]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            assert!(space.sample(&mut rng)[0] >= 2.0);
        }
    }

    #[test]
    fn test_box_contains_checks_length() {
        let space = BoxSpace::symmetric(vec![1.0, 1.0]).unwrap();
        assert!(space.contains(&[0.5, -0.5]));
        assert!(!space.contains(&[0.5]));
        assert!(!space.contains(&[0.5, 1.5]));
    }

    #[test]
    fn test_box_display_and_shape() {
        let space = BoxSpace::symmetric(vec![1.0; 4]).unwrap();
        assert_eq!(space.to_string(), "Box(4,)");
        assert_eq!(space.shape(), vec![4]);
        assert_eq!(space.low(), &[-1.0; 4]);
    }
}
