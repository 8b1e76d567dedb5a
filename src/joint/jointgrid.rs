use nalgebra::DMatrix;
use serde::{
    Deserialize,
    Serialize
};

use crate::possibility::copula::Copula;
use crate::possibility::domain::Domain;
use crate::possibility::triangular::TriangularParams;

/// Axis of the joint distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y
}

/// One evaluated point of the joint distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridCell {
    x: f64,
    y: f64,
    value: f64
}

impl GridCell {
    pub fn new(x: f64, y: f64, value: f64) -> GridCell {
        GridCell { x, y, value }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Joint possibility distribution sampled on an `N × N` grid.
///
/// Entry `(i, j)` of the value matrix is the copula applied to the X marginal
/// at `x_values[i]` and the Y marginal at `y_values[j]`. A grid is immutable
/// once built; a parameter change always produces a fresh grid.
#[derive(Debug, Clone)]
pub struct JointGrid {
    x_domain: Domain,
    y_domain: Domain,
    x_values: Vec<f64>,
    y_values: Vec<f64>,
    values: DMatrix<f64>,
    copula: Copula
}

impl JointGrid {
    /// Samples both marginals on `resolution` equally spaced points over
    /// their own domains and evaluates `copula` at every cell.
    ///
    /// Costs `O(resolution²)` copula evaluations. A resolution below 2
    /// collapses each axis to its lower bound.
    pub fn build(
        marginal_x: &TriangularParams,
        marginal_y: &TriangularParams,
        resolution: usize,
        copula: Copula,
    ) -> JointGrid {
        let x_domain = marginal_x.domain();
        let y_domain = marginal_y.domain();
        let x_values = x_domain.linspace(resolution);
        let y_values = y_domain.linspace(resolution);

        let pi_x: Vec<f64> = x_values.iter().map(|&x| marginal_x.possibility(x)).collect();
        let pi_y: Vec<f64> = y_values.iter().map(|&y| marginal_y.possibility(y)).collect();

        let combine = copula.combinator();
        let values = DMatrix::from_fn(x_values.len(), y_values.len(), |i, j| {
            combine(pi_x[i], pi_y[j])
        });

        JointGrid { x_domain, y_domain, x_values, y_values, values, copula }
    }

    pub fn resolution(&self) -> usize {
        self.x_values.len()
    }

    pub fn x_domain(&self) -> Domain {
        self.x_domain
    }

    pub fn y_domain(&self) -> Domain {
        self.y_domain
    }

    pub fn domain(&self, axis: Axis) -> Domain {
        match axis {
            Axis::X => self.x_domain,
            Axis::Y => self.y_domain,
        }
    }

    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    pub fn y_values(&self) -> &[f64] {
        &self.y_values
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn copula(&self) -> Copula {
        self.copula
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    pub fn cell(&self, i: usize, j: usize) -> GridCell {
        GridCell::new(self.x_values[i], self.y_values[j], self.values[(i, j)])
    }

    /// All cells, X index outermost.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (0..self.x_values.len())
            .flat_map(move |i| (0..self.y_values.len()).map(move |j| self.cell(i, j)))
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().fold(0.0, |acc: f64, &v| acc.max(v))
    }
}
