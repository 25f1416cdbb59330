//! Clustering of projected responses.
//!
//! The engine works in the normalized `[0, 100]²` plane produced by
//! [`crate::projection`]. It is a plain Lloyd k-means with two seeding
//! strategies, chosen by name:
//!
//! | Method | Seeds | Randomness |
//! |--------|-------|------------|
//! | `kmeans` | first k points in input order | none |
//! | `kmeans++` | D²-weighted sampling | caller-supplied RNG |
//!
//! **Objective**: minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! [`ElbowMethod`] picks a k by looking for the knee of the J-versus-k curve.
//!
//! ## Usage
//!
//! ```rust
//! use survey_cluster::cluster::{ClusteringMethod, Kmeans};
//! use survey_cluster::projection::Point2D;
//!
//! let points = vec![
//!     Point2D::new("a", 0.0, 0.0),
//!     Point2D::new("b", 100.0, 100.0),
//!     Point2D::new("c", 1.0, 1.0),
//!     Point2D::new("d", 99.0, 99.0),
//! ];
//!
//! let model = Kmeans::new(2)
//!     .with_method(ClusteringMethod::Kmeans)
//!     .fit(&points)
//!     .unwrap();
//! assert_eq!(model.labels[0], model.labels[2]);
//! assert_ne!(model.labels[0], model.labels[1]);
//! ```

mod elbow;
mod kmeans;
mod method;
mod traits;

pub use elbow::ElbowMethod;
pub use kmeans::{Kmeans, DEFAULT_MAX_ITER};
pub use method::ClusteringMethod;
pub use traits::Clustering;

use crate::projection::Point2D;
use serde::{Deserialize, Serialize};

/// Final position of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    /// Cluster this centroid represents.
    pub cluster_index: usize,
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
}

/// Output of one clustering run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterModel {
    /// One centroid per effective cluster, indexed by position.
    pub centroids: Vec<Centroid>,
    /// Cluster index per input point, in input order.
    pub labels: Vec<usize>,
    /// Assignment passes performed.
    pub iterations: usize,
    /// Whether the run stopped because assignments stabilized.
    pub converged: bool,
}

impl ClusterModel {
    /// Number of centroids.
    pub fn n_clusters(&self) -> usize {
        self.centroids.len()
    }

    /// Copy `points` with their `cluster_index` set from this model.
    pub fn assign(&self, points: &[Point2D]) -> Vec<Point2D> {
        points
            .iter()
            .zip(&self.labels)
            .map(|(p, &cluster_index)| Point2D {
                cluster_index,
                ..p.clone()
            })
            .collect()
    }
}
