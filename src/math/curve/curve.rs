use crate::math::curve::sampledcurve::Sample;

/// A real function of one variable that can be evaluated and differentiated.
pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;

    /// Evaluates the curve at every abscissa, preserving their order.
    fn sample_at(&self, xs: &[f64]) -> Vec<Sample> {
        xs.iter()
            .map(|&x| Sample::new(x, self.value(x)))
            .collect()
    }
}
