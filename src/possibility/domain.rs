use serde::{
    Deserialize,
    Serialize
};

use crate::possibilityerror::PossibilityError;

/// Closed interval `[lo, hi]` a distribution is defined and sampled on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Domain {
    lo: f64,
    hi: f64
}

impl Domain {
    /// # Errors
    /// `InvalidParameter` if either bound is not finite or `lo > hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Domain, PossibilityError> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(PossibilityError::invalid_parameter(format!(
                "domain requires finite lo <= hi, got [{lo}, {hi}]"
            )));
        }
        Ok(Domain { lo, hi })
    }

    /// Caller guarantees finite `lo <= hi`.
    pub(crate) const fn from_ordered(lo: f64, hi: f64) -> Domain {
        Domain { lo, hi }
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.lo).min(self.hi)
    }

    /// Minkowski sum `[lo + other.lo, hi + other.hi]`.
    pub fn sum(&self, other: &Domain) -> Domain {
        Domain { lo: self.lo + other.lo, hi: self.hi + other.hi }
    }

    /// `n` equally spaced points from `lo` to `hi`, both ends included.
    ///
    /// `n` below 2 yields only `lo`.
    pub fn linspace(&self, n: usize) -> Vec<f64> {
        if n < 2 {
            return vec![self.lo];
        }
        let denominator = (n - 1) as f64;
        (0..n)
            .map(|i| self.lo + self.width() * i as f64 / denominator)
            .collect()
    }
}

impl TryFrom<[f64; 2]> for Domain {
    type Error = PossibilityError;

    fn try_from(bounds: [f64; 2]) -> Result<Self, Self::Error> {
        Domain::new(bounds[0], bounds[1])
    }
}

impl From<Domain> for [f64; 2] {
    fn from(domain: Domain) -> Self {
        [domain.lo, domain.hi]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domains() {
        assert!(Domain::new(4.0, 2.0).is_err());
        assert!(Domain::new(f64::NEG_INFINITY, 2.0).is_err());
        assert!(Domain::new(1.0, f64::NAN).is_err());
        assert!(Domain::new(3.0, 3.0).is_ok());
    }

    #[test]
    fn test_linspace_endpoints() {
        let domain = Domain::new(2.0, 4.0).unwrap();
        let xs = domain.linspace(100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 2.0);
        assert_eq!(xs[99], 4.0);
        assert!((xs[1] - xs[0] - 2.0 / 99.0).abs() < 1e-12);
        assert_eq!(domain.linspace(1), vec![2.0]);
    }

    #[test]
    fn test_clamp_and_sum() {
        let x = Domain::new(2.0, 4.0).unwrap();
        let y = Domain::new(3.0, 5.0).unwrap();
        assert_eq!(x.clamp(1.0), 2.0);
        assert_eq!(x.clamp(3.3), 3.3);
        assert_eq!(x.clamp(8.0), 4.0);
        assert_eq!(x.sum(&y), Domain::new(5.0, 9.0).unwrap());
        assert!(x.contains(2.0) && x.contains(4.0));
        assert!(!x.contains(4.01));
        assert!(!x.contains(f64::NAN));
    }

    #[test]
    fn test_json_form() {
        let domain: Domain = serde_json::from_str("[2.0, 4.0]").unwrap();
        assert_eq!(domain.lo(), 2.0);
        assert_eq!(serde_json::to_string(&domain).unwrap(), "[2.0,4.0]");
        assert!(serde_json::from_str::<Domain>("[4.0, 2.0]").is_err());
    }
}
