use tracing::{
    debug,
    info,
    warn
};

use crate::configuration::EngineConfiguration;
use crate::engine::recomputation::Recomputation;
use crate::joint::forwardpropagator::{
    forward_propagate,
    PropagationSettings
};
use crate::joint::jointgrid::{
    Axis,
    JointGrid
};
use crate::joint::marginalizer::marginalize;
use crate::possibility::copula::Copula;
use crate::possibility::triangular::{
    Handle,
    TriangularParams
};
use crate::possibilityerror::PossibilityError;

/// Owns the two marginals and the copula selection, and derives everything
/// else on demand.
///
/// Mutations are all-or-nothing: a rejected update leaves the previous valid
/// state untouched. `recompute` never mutates the engine, so the result of the
/// latest call always reflects the latest accepted parameters.
#[derive(Debug, Clone)]
pub struct PossibilityEngine {
    marginal_x: TriangularParams,
    marginal_y: TriangularParams,
    copula: Copula,
    resolution: usize,
    line_points: usize,
    min_separation: f64,
    propagation: PropagationSettings
}

impl PossibilityEngine {
    pub fn new(config: &EngineConfiguration) -> Result<PossibilityEngine, PossibilityError> {
        config.validate()?;
        Ok(PossibilityEngine {
            marginal_x: config.marginal_x,
            marginal_y: config.marginal_y,
            copula: config.copula,
            resolution: config.resolution,
            line_points: config.line_points,
            min_separation: config.min_separation,
            propagation: config.propagation_settings()?,
        })
    }

    /// Default state with `resolution` grid points per axis.
    pub fn with_resolution(resolution: usize) -> Result<PossibilityEngine, PossibilityError> {
        let config = EngineConfiguration { resolution, ..EngineConfiguration::default() };
        PossibilityEngine::new(&config)
    }

    pub fn marginal(&self, axis: Axis) -> &TriangularParams {
        match axis {
            Axis::X => &self.marginal_x,
            Axis::Y => &self.marginal_y,
        }
    }

    pub fn marginal_x(&self) -> &TriangularParams {
        &self.marginal_x
    }

    pub fn marginal_y(&self) -> &TriangularParams {
        &self.marginal_y
    }

    pub fn copula(&self) -> Copula {
        self.copula
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn propagation_settings(&self) -> &PropagationSettings {
        &self.propagation
    }

    fn marginal_mut(&mut self, axis: Axis) -> &mut TriangularParams {
        match axis {
            Axis::X => &mut self.marginal_x,
            Axis::Y => &mut self.marginal_y,
        }
    }

    /// Replaces the control points of `axis`, clamped into its domain.
    ///
    /// # Errors
    /// `InvalidParameter` if a value is not finite or `left_base > right_base`.
    pub fn set_marginal(
        &mut self,
        axis: Axis,
        left_base: f64,
        peak: f64,
        right_base: f64,
    ) -> Result<(), PossibilityError> {
        let domain = self.marginal(axis).domain();
        let updated = TriangularParams::clamped(left_base, peak, right_base, domain)
            .inspect_err(|err| warn!(?axis, %err, "Rejected marginal update"))?;
        *self.marginal_mut(axis) = updated;
        Ok(())
    }

    /// Moves one control point of `axis` under the drag-update rule.
    pub fn drag_handle(&mut self, axis: Axis, handle: Handle, x: f64) -> Result<(), PossibilityError> {
        let updated = self
            .marginal(axis)
            .dragged(handle, x, self.min_separation)
            .inspect_err(|err| warn!(?axis, ?handle, %err, "Rejected handle drag"))?;
        *self.marginal_mut(axis) = updated;
        Ok(())
    }

    pub fn set_copula(&mut self, copula: Copula) {
        if self.copula != copula {
            info!(from = %self.copula, to = %copula, "Copula changed");
        }
        self.copula = copula;
    }

    /// Selects the copula by its token, `"independence"` or `"unknown"`.
    ///
    /// # Errors
    /// `UnknownCopula` for any other token; the current selection is kept.
    pub fn select_copula(&mut self, token: &str) -> Result<(), PossibilityError> {
        let copula = token
            .parse::<Copula>()
            .inspect_err(|err| warn!(%err, "Rejected copula selection"))?;
        self.set_copula(copula);
        Ok(())
    }

    /// Rebuilds the joint grid from the current state and derives both
    /// supremum marginals and the forward distribution of `x + y`.
    pub fn recompute(&self) -> Recomputation {
        let joint_grid = JointGrid::build(&self.marginal_x, &self.marginal_y, self.resolution, self.copula);
        let marginal_x = marginalize(&joint_grid, Axis::X);
        let marginal_y = marginalize(&joint_grid, Axis::Y);
        let forward = forward_propagate(&joint_grid, &self.propagation);

        debug!(
            resolution = self.resolution,
            copula = %self.copula,
            forward_points = forward.points().len(),
            max_possibility = joint_grid.max_value(),
            "Recomputed joint distribution"
        );

        Recomputation {
            input_x: self.marginal_x.sample_line(self.line_points),
            input_y: self.marginal_y.sample_line(self.line_points),
            joint_grid,
            marginal_x,
            marginal_y,
            forward,
        }
    }
}

impl Default for PossibilityEngine {
    fn default() -> Self {
        let config = EngineConfiguration::default();
        PossibilityEngine {
            marginal_x: config.marginal_x,
            marginal_y: config.marginal_y,
            copula: config.copula,
            resolution: config.resolution,
            line_points: config.line_points,
            min_separation: config.min_separation,
            propagation: PropagationSettings::default(),
        }
    }
}
