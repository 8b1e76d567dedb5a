use crate::joint::jointgrid::{
    Axis,
    JointGrid
};
use crate::math::curve::sampledcurve::Sample;

/// Projects the joint grid onto `axis` by taking the supremum over the other
/// axis: `π_X(x_i) = max_j π(x_i, y_j)` and symmetrically for Y.
///
/// Rescans the whole grid, `O(N²)` per axis.
pub fn marginalize(joint_grid: &JointGrid, axis: Axis) -> Vec<Sample> {
    let values = joint_grid.values();
    match axis {
        Axis::X => joint_grid
            .x_values()
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let max_value = values.row(i).iter().fold(0.0, |acc: f64, &v| acc.max(v));
                Sample::new(x, max_value)
            })
            .collect(),
        Axis::Y => joint_grid
            .y_values()
            .iter()
            .enumerate()
            .map(|(j, &y)| {
                let max_value = values.column(j).iter().fold(0.0, |acc: f64, &v| acc.max(v));
                Sample::new(y, max_value)
            })
            .collect(),
    }
}
