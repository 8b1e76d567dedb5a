use serde_json::json;

use crate::joint::forwardpropagator::{
    ContributingPoints,
    ForwardDistribution,
    ForwardPoint
};
use crate::joint::jointgrid::{
    Axis,
    JointGrid
};
use crate::math::curve::sampledcurve::{
    Sample,
    SampledCurve
};
use crate::possibility::domain::Domain;

/// Everything derived from one recompute cycle.
///
/// Built from scratch on every call; nothing here aliases engine state.
#[derive(Debug, Clone)]
pub struct Recomputation {
    pub(crate) joint_grid: JointGrid,
    pub(crate) input_x: Vec<Sample>,
    pub(crate) input_y: Vec<Sample>,
    pub(crate) marginal_x: Vec<Sample>,
    pub(crate) marginal_y: Vec<Sample>,
    pub(crate) forward: ForwardDistribution
}

impl Recomputation {
    pub fn joint_grid(&self) -> &JointGrid {
        &self.joint_grid
    }

    /// Input triangle of `axis` sampled for drawing.
    pub fn input_line(&self, axis: Axis) -> &[Sample] {
        match axis {
            Axis::X => &self.input_x,
            Axis::Y => &self.input_y,
        }
    }

    /// Supremum projection of the joint grid onto `axis`.
    pub fn marginal(&self, axis: Axis) -> &[Sample] {
        match axis {
            Axis::X => &self.marginal_x,
            Axis::Y => &self.marginal_y,
        }
    }

    pub fn marginal_x(&self) -> &[Sample] {
        &self.marginal_x
    }

    pub fn marginal_y(&self) -> &[Sample] {
        &self.marginal_y
    }

    pub fn marginal_curve(&self, axis: Axis) -> Option<SampledCurve> {
        SampledCurve::new(self.marginal(axis).to_vec())
    }

    pub fn z_range(&self) -> Domain {
        self.forward.z_range()
    }

    pub fn forward(&self) -> &ForwardDistribution {
        &self.forward
    }

    pub fn forward_distribution(&self) -> &[ForwardPoint] {
        self.forward.points()
    }

    pub fn contributing_points(&self) -> &ContributingPoints {
        self.forward.contributing_points()
    }

    /// Most possible value of `x + y`, the first one when several tie.
    pub fn peak(&self) -> Option<ForwardPoint> {
        self.forward.peak()
    }

    /// Everything except the grid itself, for handing to a renderer.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "copula": self.joint_grid.copula(),
            "resolution": self.joint_grid.resolution(),
            "input_x": self.input_x,
            "input_y": self.input_y,
            "marginal_x": self.marginal_x,
            "marginal_y": self.marginal_y,
            "z_range": self.forward.z_range(),
            "forward_distribution": self.forward.points(),
            "contributing_points": self.forward.contributing_points(),
        })
    }
}
