//! Clustering traits.

use super::ClusterModel;
use crate::error::Result;
use crate::projection::Point2D;
use rand::RngCore;

/// Trait for hard clustering over the normalized plane.
pub trait Clustering {
    /// Fit the model to `points`, drawing any randomness from `rng`.
    ///
    /// Only the coordinates of `points` are read; their `cluster_index` is
    /// ignored.
    fn fit_with_rng(&self, points: &[Point2D], rng: &mut dyn RngCore) -> Result<ClusterModel>;

    /// Requested number of clusters (before clamping to the point count).
    fn n_clusters(&self) -> usize;
}
