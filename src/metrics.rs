//! Internal clustering quality metrics.
//!
//! These need no ground truth; they score a clustering from the geometry of
//! the assigned points alone.
//!
//! # Metrics Overview
//!
//! | Metric | Range | Best | Measures |
//! |--------|-------|------|----------|
//! | [`inertia`] | [0, ∞) | 0 | Compactness (within-cluster sum of squares) |
//! | [`average_silhouette`] | [-1, 1] | 1 | Separation vs. cohesion |
//! | [`cluster_counts`] | - | - | Membership per cluster |
//!
//! # Silhouette
//!
//! For point i in cluster C:
//!
//! ```text
//! a(i) = mean distance to the other members of C   (0 if i is alone)
//! b(i) = min over populated clusters D ≠ C of mean distance to members of D
//! s(i) = (b - a) / max(a, b)
//! ```
//!
//! A point with no populated cluster to compare against, or with
//! `max(a, b) = 0`, scores 0.
//!
//! # Example
//!
//! ```rust
//! use survey_cluster::metrics::average_silhouette;
//! use survey_cluster::projection::Point2D;
//!
//! let mut points = vec![
//!     Point2D::new("a", 0.0, 0.0),
//!     Point2D::new("b", 0.0, 0.0),
//!     Point2D::new("c", 100.0, 0.0),
//! ];
//! points[2].cluster_index = 1;
//! assert_eq!(average_silhouette(&points, 2), 1.0);
//! ```
//!
//! # References
//!
//! - Rousseeuw (1987). "Silhouettes: a graphical aid to the interpretation
//!   and validation of cluster analysis"

use crate::cluster::Centroid;
use crate::projection::Point2D;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary metrics of one clustering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMetrics {
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
    /// Mean silhouette coefficient over all points.
    pub average_silhouette: f64,
    /// Members per cluster index, including empty clusters.
    pub cluster_counts: BTreeMap<usize, usize>,
}

impl ClusterMetrics {
    /// Compute every metric for assigned `points` and their `centroids`.
    pub fn compute(points: &[Point2D], centroids: &[Centroid]) -> Self {
        let k = centroids.len();
        Self {
            inertia: inertia(points, centroids),
            average_silhouette: average_silhouette(points, k),
            cluster_counts: cluster_counts(points, k),
        }
    }
}

/// Members per cluster index for clusters `0..k` (plus any stray index).
pub fn cluster_counts(points: &[Point2D], k: usize) -> BTreeMap<usize, usize> {
    let mut counts: BTreeMap<usize, usize> = (0..k).map(|c| (c, 0)).collect();
    for p in points {
        *counts.entry(p.cluster_index).or_insert(0) += 1;
    }
    counts
}

/// Sum of squared distances from each point to its assigned centroid.
///
/// A point whose cluster has no centroid contributes nothing.
pub fn inertia(points: &[Point2D], centroids: &[Centroid]) -> f64 {
    points
        .iter()
        .filter_map(|p| {
            centroid_for(centroids, p.cluster_index)
                .map(|c| (p.x - c.x).powi(2) + (p.y - c.y).powi(2))
        })
        .sum()
}

/// Silhouette coefficient of every point, in input order.
pub fn silhouette_scores(points: &[Point2D], k: usize) -> Vec<f64> {
    let n_clusters = points
        .iter()
        .map(|p| p.cluster_index + 1)
        .max()
        .unwrap_or(0)
        .max(k);

    let mut counts = vec![0usize; n_clusters];
    for p in points {
        counts[p.cluster_index] += 1;
    }

    let mut sums = vec![0.0f64; n_clusters];
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            sums.iter_mut().for_each(|s| *s = 0.0);
            for (j, q) in points.iter().enumerate() {
                if i != j {
                    sums[q.cluster_index] += distance(p, q);
                }
            }

            let own = p.cluster_index;
            let a = if counts[own] > 1 {
                sums[own] / (counts[own] - 1) as f64
            } else {
                0.0
            };

            let b = (0..n_clusters)
                .filter(|&c| c != own && counts[c] > 0)
                .map(|c| sums[c] / counts[c] as f64)
                .fold(None, |best: Option<f64>, m| Some(best.map_or(m, |b| b.min(m))));

            match b {
                Some(b) if a.max(b) > 0.0 => (b - a) / a.max(b),
                _ => 0.0,
            }
        })
        .collect()
}

/// Mean silhouette coefficient; 0 for an empty set.
pub fn average_silhouette(points: &[Point2D], k: usize) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let scores = silhouette_scores(points, k);
    scores.iter().sum::<f64>() / scores.len() as f64
}

// Helper functions

fn distance(a: &Point2D, b: &Point2D) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn centroid_for(centroids: &[Centroid], cluster_index: usize) -> Option<&Centroid> {
    centroids
        .get(cluster_index)
        .filter(|c| c.cluster_index == cluster_index)
        .or_else(|| centroids.iter().find(|c| c.cluster_index == cluster_index))
}
