//! 2D projection of feature vectors.
//!
//! This is a deterministic fold, not a statistical projection:
//!
//! ```text
//! x = v[0] + v[2] + v[4] + ...
//! y = v[1] + v[3] + v[5] + ...
//! ```
//!
//! Missing leading dimensions count as `0`. Both axes are then min-max
//! normalized over the whole response set into `[0, 100]`. An axis with
//! no spread (`max == min`) maps every point to `0` on that axis. A range too
//! wide to subtract in `f64` is normalized at half scale instead.

use crate::encode::FeatureVector;
use serde::{Deserialize, Serialize};

/// Upper bound of the normalized coordinate range.
pub const SCALE: f64 = 100.0;

/// A response placed in the normalized plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point2D {
    /// Response id.
    pub id: String,
    /// Normalized x in `[0, 100]`.
    pub x: f64,
    /// Normalized y in `[0, 100]`.
    pub y: f64,
    /// Assigned cluster; `0` until clustering runs.
    pub cluster_index: usize,
}

impl Point2D {
    /// Unassigned point.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            cluster_index: 0,
        }
    }
}

/// Fold one vector into raw (unnormalized) coordinates.
pub fn fold(v: &[f64]) -> (f64, f64) {
    let mut x = v.first().copied().unwrap_or(0.0);
    let mut y = v.get(1).copied().unwrap_or(0.0);
    for (d, &value) in v.iter().enumerate().skip(2) {
        if d % 2 == 0 {
            x += value;
        } else {
            y += value;
        }
    }
    (x, y)
}

/// Project a response set into the normalized plane.
///
/// `ids[i]` names `vectors[i]`; the two slices are zipped, so extra
/// entries on either side are ignored.
pub fn project<S: AsRef<str>>(ids: &[S], vectors: &[FeatureVector]) -> Vec<Point2D> {
    let raw: Vec<(f64, f64)> = vectors.iter().map(|v| fold(v)).collect();
    let xs = Axis::fit(raw.iter().map(|p| p.0));
    let ys = Axis::fit(raw.iter().map(|p| p.1));

    ids.iter()
        .zip(raw)
        .map(|(id, (x, y))| Point2D::new(id.as_ref(), xs.normalize(x), ys.normalize(y)))
        .collect()
}

/// Observed range of one axis.
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    fn fit(values: impl Iterator<Item = f64>) -> Self {
        values.fold(
            Axis {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |acc, v| Axis {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        )
    }

    fn normalize(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span.is_finite() {
            // Degenerate axis: a single value.
            if span <= 0.0 {
                return 0.0;
            }
            return (v - self.min) / span * SCALE;
        }

        // `max - min` overflowed, or the axis has no values at all.
        let half_span = self.max / 2.0 - self.min / 2.0;
        if half_span <= 0.0 || !half_span.is_finite() {
            return 0.0;
        }
        (v / 2.0 - self.min / 2.0) / half_span * SCALE
    }
}
