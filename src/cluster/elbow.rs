//! Elbow method for choosing k.
//!
//! Fit once per candidate k and record the inertia. Inertia always falls as
//! k grows; the "elbow" is where it stops falling fast. Geometrically that is
//! the point of the (k, inertia) curve farthest from the chord joining its
//! two ends:
//!
//! ```text
//! d(k) = |(y₂ - y₁)·k - (x₂ - x₁)·J(k) + x₂·y₁ - y₂·x₁| / hypot(y₂ - y₁, x₂ - x₁)
//! ```

use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::metrics::inertia;
use crate::projection::Point2D;
use rand::RngCore;
use tracing::debug;

/// Suggests a cluster count from the knee of the inertia curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElbowMethod {
    /// Smallest k tried.
    k_min: usize,
    /// Largest k tried (clamped to the number of points).
    k_max: usize,
}

impl ElbowMethod {
    /// Try every k in `k_min..=k_max`.
    pub fn new(k_min: usize, k_max: usize) -> Result<Self> {
        if k_min == 0 {
            return Err(Error::InvalidParameter {
                name: "k_min",
                message: "must be at least 1",
            });
        }
        if k_min > k_max {
            return Err(Error::InvalidParameter {
                name: "k_max",
                message: "must not be smaller than k_min",
            });
        }
        Ok(Self { k_min, k_max })
    }

    /// Inertia for each candidate k, as `(k, inertia)` pairs.
    pub fn inertia_curve<C, F>(
        &self,
        points: &[Point2D],
        build: F,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<(usize, f64)>>
    where
        C: Clustering,
        F: Fn(usize) -> C,
    {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let k_max = self.k_max.min(points.len()).max(self.k_min);

        (self.k_min..=k_max)
            .map(|k| {
                let model = build(k).fit_with_rng(points, &mut *rng)?;
                let assigned = model.assign(points);
                Ok((k, inertia(&assigned, &model.centroids)))
            })
            .collect()
    }

    /// Suggested k; ties go to the smallest k.
    pub fn suggest_k<C, F>(&self, points: &[Point2D], build: F, rng: &mut dyn RngCore) -> Result<usize>
    where
        C: Clustering,
        F: Fn(usize) -> C,
    {
        let curve = self.inertia_curve(points, build, rng)?;
        let k = knee(&curve).unwrap_or(self.k_min);
        debug!(?curve, k, "elbow suggestion");
        Ok(k)
    }
}

/// Point of maximum distance to the end-to-end chord.
fn knee(curve: &[(usize, f64)]) -> Option<usize> {
    let (&(first_k, y1), &(last_k, y2)) = (curve.first()?, curve.last()?);
    let (x1, x2) = (first_k as f64, last_k as f64);
    let norm = (y2 - y1).hypot(x2 - x1);
    if norm == 0.0 {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for &(k, y0) in curve {
        let x0 = k as f64;
        let d = ((y2 - y1) * x0 - (x2 - x1) * y0 + x2 * y1 - y2 * x1).abs() / norm;
        if best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((k, d));
        }
    }
    best.map(|(k, _)| k)
}
