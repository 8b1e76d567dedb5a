use serde::Serialize;

use crate::math::curve::curve::Curve;

/// One evaluated point `(x, y)` of a one-dimensional distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    x: f64,
    y: f64
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Sample {
        Sample { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs: &Sample, rhs: &Sample) -> f64 {
        (rhs.y - lhs.y) / (rhs.x - lhs.x)
    }
}

// ─────────────────────────────────────────────
// SampledCurve
// ─────────────────────────────────────────────
//
// Piecewise-linear interpolant through sorted samples, flat outside
// [min_x, max_x]. Samples sharing an abscissa collapse to the last one.

pub struct SampledCurve {
    samples: Vec<Sample>,
    slopes: Vec<f64>,
}

impl SampledCurve {
    /// Returns `None` when `samples` is empty or holds a non-finite abscissa.
    pub fn new(mut samples: Vec<Sample>) -> Option<SampledCurve> {
        if samples.is_empty() || samples.iter().any(|s| !s.x.is_finite()) {
            return None;
        }
        samples.sort_by(|a, b| a.x.total_cmp(&b.x));
        samples.dedup_by(|next, prev| {
            if next.x == prev.x {
                prev.y = next.y;
                true
            } else {
                false
            }
        });

        let slopes = samples
            .windows(2)
            .map(|pair| Sample::slope(&pair[0], &pair[1]))
            .collect();

        Some(SampledCurve { samples, slopes })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn min_x(&self) -> f64 {
        self.samples[0].x
    }

    pub fn max_x(&self) -> f64 {
        self.samples[self.samples.len() - 1].x
    }

    /// Index of the segment `[samples[i], samples[i + 1]]` containing `x`,
    /// or `None` outside the sampled range or for a single-sample curve.
    fn find_segment(&self, x: f64) -> Option<usize> {
        if self.slopes.is_empty() || x < self.min_x() || x > self.max_x() {
            return None;
        }
        let i = self.samples.partition_point(|s| s.x <= x);
        Some(i.saturating_sub(1).min(self.slopes.len() - 1))
    }
}

impl Curve for SampledCurve {
    fn value(&self, x: f64) -> f64 {
        match self.find_segment(x) {
            Some(i) => {
                let lhs = &self.samples[i];
                f64::mul_add(self.slopes[i], x - lhs.x, lhs.y)
            }
            None if x < self.min_x() => self.samples[0].y,
            None => self.samples[self.samples.len() - 1].y,
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        self.find_segment(x)
            .map_or(0.0, |i| self.slopes[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tent() -> SampledCurve {
        SampledCurve::new(vec![
            Sample::new(2.0, 1.0),
            Sample::new(0.0, 0.0),
            Sample::new(4.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(SampledCurve::new(Vec::new()).is_none());
        assert!(SampledCurve::new(vec![Sample::new(f64::NAN, 0.0)]).is_none());
    }

    #[test]
    fn test_interpolates_between_samples() {
        let curve = tent();
        assert_eq!(curve.min_x(), 0.0);
        assert_eq!(curve.max_x(), 4.0);
        assert!((curve.value(1.0) - 0.5).abs() < 1e-12);
        assert!((curve.value(2.0) - 1.0).abs() < 1e-12);
        assert!((curve.value(3.5) - 0.25).abs() < 1e-12);
        assert!((curve.derivative(1.0) - 0.5).abs() < 1e-12);
        assert!((curve.derivative(3.0) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let curve = tent();
        assert_eq!(curve.value(-1.0), 0.0);
        assert_eq!(curve.value(9.0), 0.0);
        assert_eq!(curve.derivative(9.0), 0.0);
    }

    #[test]
    fn test_duplicate_abscissa_keeps_last() {
        let curve = SampledCurve::new(vec![
            Sample::new(1.0, 0.2),
            Sample::new(1.0, 0.7),
        ])
        .unwrap();
        assert_eq!(curve.samples().len(), 1);
        assert_eq!(curve.value(1.0), 0.7);
        assert_eq!(curve.value(5.0), 0.7);
    }

    #[test]
    fn test_sample_at() {
        let xs = [0.0, 1.0, 2.0];
        let samples = tent().sample_at(&xs);
        assert_eq!(samples.len(), 3);
        assert!((samples[1].y() - 0.5).abs() < 1e-12);
    }
}
