use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::joint::jointgrid::{
    GridCell,
    JointGrid
};
use crate::math::curve::sampledcurve::{
    Sample,
    SampledCurve
};
use crate::math::round::{
    dequantize,
    quantize
};
use crate::possibility::domain::Domain;
use crate::possibilityerror::PossibilityError;

/// Quantized `z = x + y`, holding `key_digits` decimals.
pub type ZKey = i64;

// ─────────────────────────────────────────────
// PropagationSettings
// ─────────────────────────────────────────────

/// Constants of the max-convolution.
///
/// The defaults are tuned for a 100-point grid; finer grids may need more key
/// digits to keep distinct sums apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationSettings {
    key_digits: u32,
    tie_tolerance: f64,
    tie_floor: f64
}

impl PropagationSettings {
    pub const DEFAULT_KEY_DIGITS: u32 = 3;
    pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-4;
    pub const DEFAULT_TIE_FLOOR: f64 = 0.01;
    pub const MAX_KEY_DIGITS: u32 = 9;

    /// # Errors
    /// `InvalidConfiguration` if `key_digits` exceeds [`Self::MAX_KEY_DIGITS`]
    /// or a tolerance is negative or not finite.
    pub fn new(
        key_digits: u32,
        tie_tolerance: f64,
        tie_floor: f64,
    ) -> Result<PropagationSettings, PossibilityError> {
        if key_digits > Self::MAX_KEY_DIGITS {
            return Err(PossibilityError::invalid_configuration(format!(
                "key_digits must be at most {}, got {key_digits}",
                Self::MAX_KEY_DIGITS
            )));
        }
        if !tie_tolerance.is_finite() || tie_tolerance < 0.0 {
            return Err(PossibilityError::invalid_configuration(format!(
                "tie_tolerance must be finite and non-negative, got {tie_tolerance}"
            )));
        }
        if !tie_floor.is_finite() || tie_floor < 0.0 {
            return Err(PossibilityError::invalid_configuration(format!(
                "tie_floor must be finite and non-negative, got {tie_floor}"
            )));
        }
        Ok(PropagationSettings { key_digits, tie_tolerance, tie_floor })
    }

    pub fn key_digits(&self) -> u32 {
        self.key_digits
    }

    pub fn tie_tolerance(&self) -> f64 {
        self.tie_tolerance
    }

    pub fn tie_floor(&self) -> f64 {
        self.tie_floor
    }

    pub fn key(&self, z: f64) -> ZKey {
        quantize(z, self.key_digits)
    }
}

impl Default for PropagationSettings {
    fn default() -> Self {
        PropagationSettings {
            key_digits: Self::DEFAULT_KEY_DIGITS,
            tie_tolerance: Self::DEFAULT_TIE_TOLERANCE,
            tie_floor: Self::DEFAULT_TIE_FLOOR,
        }
    }
}

// ─────────────────────────────────────────────
// Output types
// ─────────────────────────────────────────────

/// Possibility of one value of `z = x + y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForwardPoint {
    z: f64,
    possibility: f64
}

impl ForwardPoint {
    pub fn new(z: f64, possibility: f64) -> ForwardPoint {
        ForwardPoint { z, possibility }
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn possibility(&self) -> f64 {
        self.possibility
    }
}

/// Grid cells attaining (or nearly attaining) the maximum of each `z`.
///
/// Display-only: the cells are copies and never feed back into a grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContributingPoints {
    key_digits: u32,
    by_key: BTreeMap<ZKey, Vec<GridCell>>
}

impl ContributingPoints {
    pub fn get(&self, z: f64) -> Option<&[GridCell]> {
        self.get_key(quantize(z, self.key_digits))
    }

    pub fn get_key(&self, key: ZKey) -> Option<&[GridCell]> {
        self.by_key.get(&key).map(Vec::as_slice)
    }

    /// `(z, cells)` pairs in ascending `z`.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[GridCell])> + '_ {
        self.by_key
            .iter()
            .map(|(&key, cells)| (dequantize(key, self.key_digits), cells.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Result of the max-convolution for `z = x + y`.
#[derive(Debug, Clone)]
pub struct ForwardDistribution {
    z_range: Domain,
    points: Vec<ForwardPoint>,
    contributing_points: ContributingPoints
}

impl ForwardDistribution {
    pub fn z_range(&self) -> Domain {
        self.z_range
    }

    /// Points in ascending `z`.
    pub fn points(&self) -> &[ForwardPoint] {
        &self.points
    }

    pub fn contributing_points(&self) -> &ContributingPoints {
        &self.contributing_points
    }

    pub fn contributors_at(&self, z: f64) -> Option<&[GridCell]> {
        self.contributing_points.get(z)
    }

    /// First point in ascending `z` attaining the maximum possibility.
    pub fn peak(&self) -> Option<ForwardPoint> {
        self.points.iter().fold(None, |best: Option<ForwardPoint>, p| match best {
            Some(b) if b.possibility >= p.possibility => Some(b),
            _ => Some(*p),
        })
    }

    pub fn max_possibility(&self) -> f64 {
        self.points.iter().fold(0.0, |acc: f64, p| acc.max(p.possibility))
    }

    /// Piecewise-linear view of the distribution, `None` when empty.
    pub fn to_curve(&self) -> Option<SampledCurve> {
        SampledCurve::new(
            self.points
                .iter()
                .map(|p| Sample::new(p.z, p.possibility))
                .collect(),
        )
    }
}

// ─────────────────────────────────────────────
// Max-convolution
// ─────────────────────────────────────────────

struct ZBucket {
    max: f64,
    contributors: Vec<GridCell>,
}

/// Propagates the joint distribution through `z = x + y`.
///
/// Cells are grouped by the quantized sum of their coordinates and each group
/// keeps its maximum value. A cell strictly above the running maximum replaces
/// the group's contributors; a cell within `tie_tolerance` of it and above
/// `tie_floor` is appended. Every group reached by at least one cell appears
/// in the output, zero-valued groups included, so the line spans the whole
/// z-range even where nothing is possible; only groups with a positive
/// maximum get contributors.
pub fn forward_propagate(joint_grid: &JointGrid, settings: &PropagationSettings) -> ForwardDistribution {
    let z_range = joint_grid.x_domain().sum(&joint_grid.y_domain());
    propagate_cells(joint_grid.cells(), z_range, settings)
}

fn propagate_cells(
    cells: impl IntoIterator<Item = GridCell>,
    z_range: Domain,
    settings: &PropagationSettings,
) -> ForwardDistribution {
    let mut buckets: BTreeMap<ZKey, ZBucket> = BTreeMap::new();

    for cell in cells {
        let key = settings.key(cell.x() + cell.y());
        let possibility = cell.value();
        match buckets.entry(key) {
            Entry::Vacant(entry) => {
                let contributors = if possibility > 0.0 { vec![cell] } else { Vec::new() };
                entry.insert(ZBucket { max: possibility, contributors });
            }
            Entry::Occupied(mut entry) => {
                let bucket = entry.get_mut();
                if possibility > bucket.max {
                    bucket.max = possibility;
                    bucket.contributors.clear();
                    bucket.contributors.push(cell);
                } else if (possibility - bucket.max).abs() < settings.tie_tolerance
                    && possibility > settings.tie_floor
                {
                    bucket.contributors.push(cell);
                }
            }
        }
    }

    let mut points = Vec::with_capacity(buckets.len());
    let mut by_key = BTreeMap::new();
    for (key, bucket) in buckets {
        points.push(ForwardPoint::new(dequantize(key, settings.key_digits), bucket.max));
        if !bucket.contributors.is_empty() {
            by_key.insert(key, bucket.contributors);
        }
    }

    ForwardDistribution {
        z_range,
        points,
        contributing_points: ContributingPoints { key_digits: settings.key_digits, by_key },
    }
}
