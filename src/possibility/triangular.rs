use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::Curve;
use crate::math::curve::sampledcurve::Sample;
use crate::possibility::domain::Domain;
use crate::possibilityerror::PossibilityError;

/// Possibility degree of `x` under the triangle `(left_base, peak, right_base)`.
///
/// ```text
/// π(x) = 1                                  x = peak
///      = 0                                  x ≤ left_base or x ≥ right_base
///      = (x − left_base) / (peak − left_base)    left_base < x < peak
///      = (right_base − x) / (right_base − peak)  peak < x < right_base
/// ```
///
/// The peak is tested first, so a zero-width ramp (`left_base == peak` or
/// `peak == right_base`) never divides by zero and a singleton triangle is 1
/// at its peak and 0 everywhere else.
pub fn triangular_possibility(x: f64, left_base: f64, peak: f64, right_base: f64) -> f64 {
    if x == peak {
        1.0
    } else if x <= left_base || x >= right_base {
        0.0
    } else if x < peak {
        (x - left_base) / (peak - left_base)
    } else {
        (right_base - x) / (right_base - peak)
    }
}

// ─────────────────────────────────────────────
// Handle
// ─────────────────────────────────────────────

/// Control point of a triangle moved by the drag-update rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Left,
    Peak,
    Right
}

// ─────────────────────────────────────────────
// TriangularParams
// ─────────────────────────────────────────────

#[derive(Deserialize)]
struct TriangularJsonProp {
    left_base: f64,
    peak: f64,
    right_base: f64,
    domain: Domain
}

/// Triangular possibility distribution with its sampling domain.
///
/// Invariant: `domain.lo ≤ left_base ≤ peak ≤ right_base ≤ domain.hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TriangularJsonProp")]
pub struct TriangularParams {
    left_base: f64,
    peak: f64,
    right_base: f64,
    domain: Domain
}

impl TriangularParams {
    /// # Errors
    /// `InvalidParameter` if a control point is not finite or the ordering
    /// invariant does not hold.
    pub fn new(
        left_base: f64,
        peak: f64,
        right_base: f64,
        domain: Domain,
    ) -> Result<TriangularParams, PossibilityError> {
        if !left_base.is_finite() || !peak.is_finite() || !right_base.is_finite() {
            return Err(PossibilityError::invalid_parameter(
                "triangle control points must be finite",
            ));
        }
        if !(domain.contains(left_base)
            && domain.contains(right_base)
            && left_base <= peak
            && peak <= right_base)
        {
            return Err(PossibilityError::invalid_parameter(format!(
                "triangle requires {} <= left_base <= peak <= right_base <= {}, got {left_base}, {peak}, {right_base}",
                domain.lo(),
                domain.hi()
            )));
        }
        Ok(TriangularParams { left_base, peak, right_base, domain })
    }

    /// Caller guarantees the ordering invariant.
    pub(crate) const fn from_ordered(
        left_base: f64,
        peak: f64,
        right_base: f64,
        domain: Domain,
    ) -> TriangularParams {
        TriangularParams { left_base, peak, right_base, domain }
    }

    /// Clamps the requested control points into `domain` and the peak between
    /// the clamped bases.
    ///
    /// # Errors
    /// `InvalidParameter` if a value is not finite or `left_base > right_base`,
    /// which no clamping can repair.
    pub fn clamped(
        left_base: f64,
        peak: f64,
        right_base: f64,
        domain: Domain,
    ) -> Result<TriangularParams, PossibilityError> {
        if !left_base.is_finite() || !peak.is_finite() || !right_base.is_finite() {
            return Err(PossibilityError::invalid_parameter(
                "triangle control points must be finite",
            ));
        }
        let left = domain.clamp(left_base);
        let right = domain.clamp(right_base);
        if left > right {
            return Err(PossibilityError::invalid_parameter(format!(
                "left_base {left_base} exceeds right_base {right_base}"
            )));
        }
        let peak = peak.max(left).min(right);
        TriangularParams::new(left, peak, right, domain)
    }

    /// Moves one handle to `x`, keeping `separation` between neighbouring
    /// control points and every point inside the domain.
    ///
    /// ```text
    /// Left:  max(lo, min(peak − sep, x))
    /// Peak:  max(left + sep, min(right − sep, x))
    /// Right: max(peak + sep, min(hi, x))
    /// ```
    ///
    /// # Errors
    /// `InvalidParameter` if `x` is not finite or the separation cannot be
    /// honoured inside the domain.
    pub fn dragged(
        &self,
        handle: Handle,
        x: f64,
        separation: f64,
    ) -> Result<TriangularParams, PossibilityError> {
        if !x.is_finite() {
            return Err(PossibilityError::invalid_parameter(format!(
                "handle position must be finite, got {x}"
            )));
        }
        let (mut left, mut peak, mut right) = (self.left_base, self.peak, self.right_base);
        match handle {
            Handle::Left => left = self.domain.lo().max((peak - separation).min(x)),
            Handle::Peak => peak = (left + separation).max((right - separation).min(x)),
            Handle::Right => right = (peak + separation).max(self.domain.hi().min(x)),
        }
        TriangularParams::new(left, peak, right, self.domain)
    }

    pub fn left_base(&self) -> f64 {
        self.left_base
    }

    pub fn peak(&self) -> f64 {
        self.peak
    }

    pub fn right_base(&self) -> f64 {
        self.right_base
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn is_singleton(&self) -> bool {
        self.left_base == self.right_base
    }

    pub fn possibility(&self, x: f64) -> f64 {
        triangular_possibility(x, self.left_base, self.peak, self.right_base)
    }

    /// The triangle evaluated at `n` equally spaced points over its domain.
    pub fn sample_line(&self, n: usize) -> Vec<Sample> {
        self.sample_at(&self.domain.linspace(n))
    }
}

impl TryFrom<TriangularJsonProp> for TriangularParams {
    type Error = PossibilityError;

    fn try_from(prop: TriangularJsonProp) -> Result<Self, Self::Error> {
        TriangularParams::new(prop.left_base, prop.peak, prop.right_base, prop.domain)
    }
}

impl Curve for TriangularParams {
    fn value(&self, x: f64) -> f64 {
        self.possibility(x)
    }

    /// Slope of the active ramp; 0 on the flat parts and at the peak.
    fn derivative(&self, x: f64) -> f64 {
        if x == self.peak || x <= self.left_base || x >= self.right_base {
            0.0
        } else if x < self.peak {
            1.0 / (self.peak - self.left_base)
        } else {
            -1.0 / (self.right_base - self.peak)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn triangle() -> impl Strategy<Value = (f64, f64, f64)> {
        (-50.0_f64..50.0, 0.0_f64..10.0, 0.0_f64..10.0)
            .prop_map(|(left, up, down)| (left, left + up, left + up + down))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn possibility_in_01((a, b, c) in triangle(), x in -100.0_f64..100.0) {
            let p = triangular_possibility(x, a, b, c);
            prop_assert!((0.0..=1.0).contains(&p));
        }

        #[test]
        fn peak_is_one((a, b, c) in triangle()) {
            prop_assert_eq!(triangular_possibility(b, a, b, c), 1.0);
        }

        #[test]
        fn bases_are_zero_when_ramps_have_width((a, b, c) in triangle()) {
            prop_assume!(a < b && b < c);
            prop_assert_eq!(triangular_possibility(a, a, b, c), 0.0);
            prop_assert_eq!(triangular_possibility(c, a, b, c), 0.0);
        }

        #[test]
        fn rising_ramp_monotone((a, b, c) in triangle(), s in 0.0_f64..=1.0, t in 0.0_f64..=1.0) {
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };
            let x1 = (a - 1.0 + (b - a + 1.0) * lo).min(b);
            let x2 = (a - 1.0 + (b - a + 1.0) * hi).min(b);
            prop_assert!(triangular_possibility(x1, a, b, c) <= triangular_possibility(x2, a, b, c));
        }

        #[test]
        fn falling_ramp_monotone((a, b, c) in triangle(), s in 0.0_f64..=1.0, t in 0.0_f64..=1.0) {
            let (lo, hi) = if s <= t { (s, t) } else { (t, s) };
            let x1 = (b + (c - b + 1.0) * lo).max(b);
            let x2 = (b + (c - b + 1.0) * hi).max(b);
            prop_assert!(triangular_possibility(x1, a, b, c) >= triangular_possibility(x2, a, b, c));
        }

        #[test]
        fn clamped_respects_invariant(
            lo in -10.0_f64..0.0,
            width in 0.0_f64..10.0,
            l in -20.0_f64..20.0,
            p in -20.0_f64..20.0,
            r in -20.0_f64..20.0,
        ) {
            let d = Domain::new(lo, lo + width).unwrap();
            if let Ok(t) = TriangularParams::clamped(l, p, r, d) {
                prop_assert!(d.lo() <= t.left_base());
                prop_assert!(t.left_base() <= t.peak());
                prop_assert!(t.peak() <= t.right_base());
                prop_assert!(t.right_base() <= d.hi());
            }
        }
    }
}
