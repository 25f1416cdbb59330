//! K-means clustering over 2D points.
//!
//! # Lloyd's Algorithm
//!
//! 1. Seed k centroids (first-k or k-means++)
//! 2. **Assign**: each point → nearest centroid (ties → lowest index)
//! 3. **Update**: each centroid → mean of its points
//! 4. Repeat until no assignment changes, or the iteration cap
//!
//! A centroid that loses all its points keeps its previous position. It is
//! never dropped and never re-seeded mid-run, so the returned model always
//! has exactly `k` centroids with defined coordinates.
//!
//! ## Seeding
//!
//! - **First-k** (`kmeans`): the first `k` points in input order. Fully
//!   deterministic; duplicate points give duplicate seeds.
//! - **k-means++** (`kmeans++`): first centroid uniformly at random, each
//!   further one with probability proportional to D(x)², the squared
//!   distance to the nearest centroid chosen so far.
//!
//! ## Effective k
//!
//! `k` is clamped to the number of points, so every seed is an actual point.

use super::method::ClusteringMethod;
use super::traits::Clustering;
use super::{Centroid, ClusterModel};
use crate::error::{Error, Result};
use crate::projection::Point2D;
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Iteration cap used unless overridden.
pub const DEFAULT_MAX_ITER: usize = 20;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Requested number of clusters.
    k: usize,
    /// Maximum assignment/update rounds.
    max_iter: usize,
    /// Seeding strategy.
    method: ClusteringMethod,
    /// Random seed for k-means++.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer with first-k seeding.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            method: ClusteringMethod::Kmeans,
            seed: None,
        }
    }

    /// Set maximum iterations (at least one assignment always runs).
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Set the seeding strategy.
    pub fn with_method(mut self, method: ClusteringMethod) -> Self {
        self.method = method;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster count actually used for `n` points.
    pub fn effective_k(&self, n: usize) -> usize {
        self.k.min(n).max(1)
    }

    /// Fit using the configured seed, or thread-local randomness when unset.
    pub fn fit(&self, points: &[Point2D]) -> Result<ClusterModel> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            // First-k seeding never draws.
            None if !self.method.is_randomized() => Box::new(StdRng::seed_from_u64(0)),
            None => Box::new(rand::rng()),
        };
        self.fit_with_rng(points, &mut *rng)
    }

    /// Seed centroids with the first `k` points.
    fn init_first_k(data: &Array2<f64>, k: usize) -> Array2<f64> {
        let mut centroids = Array2::zeros((k, 2));
        for i in 0..k {
            centroids.row_mut(i).assign(&data.row(i));
        }
        centroids
    }

    /// Initialize centroids using k-means++ algorithm.
    fn init_plus_plus(data: &Array2<f64>, k: usize, rng: &mut dyn RngCore) -> Array2<f64> {
        let n = data.nrows();
        let mut centroids = Array2::zeros((k, 2));

        // First centroid: random point
        let first = rng.random_range(0..n);
        centroids.row_mut(0).assign(&data.row(first));

        // Remaining centroids: D² sampling
        for i in 1..k {
            let distances: Vec<f64> = (0..n)
                .map(|j| {
                    (0..i)
                        .map(|c| squared_distance(&data.row(j), &centroids.row(c)))
                        .fold(f64::MAX, f64::min)
                })
                .collect();

            let total: f64 = distances.iter().sum();
            if total <= 0.0 {
                // Every point coincides with a chosen centroid.
                let idx = rng.random_range(0..n);
                centroids.row_mut(i).assign(&data.row(idx));
                continue;
            }

            let threshold = rng.random::<f64>() * total;
            let mut cumsum = 0.0;
            // Fallback for rounding: the last point with positive weight.
            let mut selected = distances.iter().rposition(|&d| d > 0.0).unwrap_or(0);

            for (j, &d) in distances.iter().enumerate() {
                cumsum += d;
                if d > 0.0 && cumsum >= threshold {
                    selected = j;
                    break;
                }
            }

            centroids.row_mut(i).assign(&data.row(selected));
        }

        centroids
    }

    /// Nearest centroid by Euclidean distance; ties go to the lowest index.
    fn nearest(point: &ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f64::INFINITY;
        for (c, centroid) in centroids.rows().into_iter().enumerate() {
            let dist = squared_distance(point, &centroid).sqrt();
            if dist < best_dist {
                best_dist = dist;
                best_cluster = c;
            }
        }
        best_cluster
    }

    /// Assignment step.
    #[cfg(not(feature = "parallel"))]
    fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
        data.rows()
            .into_iter()
            .map(|row| Self::nearest(&row, centroids))
            .collect()
    }

    /// Assignment step, one task per point.
    #[cfg(feature = "parallel")]
    fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
        (0..data.nrows())
            .into_par_iter()
            .map(|i| Self::nearest(&data.row(i), centroids))
            .collect()
    }

    /// Update step. Empty clusters keep their previous centroid.
    fn update(data: &Array2<f64>, labels: &[usize], centroids: &mut Array2<f64>) {
        let k = centroids.nrows();
        let mut sums = Array2::<f64>::zeros((k, 2));
        let mut counts = vec![0usize; k];

        for (i, &label) in labels.iter().enumerate() {
            sums[[label, 0]] += data[[i, 0]];
            sums[[label, 1]] += data[[i, 1]];
            counts[label] += 1;
        }

        for (c, &count) in counts.iter().enumerate() {
            if count > 0 {
                centroids[[c, 0]] = sums[[c, 0]] / count as f64;
                centroids[[c, 1]] = sums[[c, 1]] / count as f64;
            }
        }
    }
}

impl Clustering for Kmeans {
    fn fit_with_rng(&self, points: &[Point2D], rng: &mut dyn RngCore) -> Result<ClusterModel> {
        if self.k == 0 {
            return Err(Error::InvalidClusterCount { requested: 0 });
        }
        if points.is_empty() {
            return Ok(ClusterModel::default());
        }

        let n = points.len();
        let k = self.effective_k(n);

        let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        let data = Array2::from_shape_vec((n, 2), flat).map_err(|e| Error::Other(e.to_string()))?;

        let mut centroids = match self.method {
            ClusteringMethod::Kmeans => Self::init_first_k(&data, k),
            ClusteringMethod::KmeansPlusPlus => Self::init_plus_plus(&data, k, rng),
        };

        let mut labels: Vec<usize> = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        for iter in 0..self.max_iter {
            iterations = iter + 1;
            let next = Self::assign(&data, &centroids);
            if next == labels {
                converged = true;
                break;
            }
            labels = next;
            Self::update(&data, &labels, &mut centroids);
        }

        debug!(
            n,
            k_requested = self.k,
            k,
            method = %self.method,
            iterations,
            converged,
            "k-means finished"
        );

        let centroids = centroids
            .rows()
            .into_iter()
            .enumerate()
            .map(|(cluster_index, row)| Centroid {
                cluster_index,
                x: row[0],
                y: row[1],
            })
            .collect();

        Ok(ClusterModel {
            centroids,
            labels,
            iterations,
            converged,
        })
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Squared Euclidean distance.
fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
