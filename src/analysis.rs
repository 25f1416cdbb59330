//! End-to-end analysis of one survey's responses.
//!
//! ```text
//! responses ──encode──▶ feature vectors ──project──▶ points ──k-means──▶ model ──▶ metrics
//! ```
//!
//! Every call is a pure function of `(survey, responses, config)` plus, for
//! `kmeans++`, the random source. Nothing is retained between calls; see
//! [`crate::cache::AnalysisCache`] for caller-side memoization.

use crate::cluster::{
    Centroid, ClusterModel, Clustering, ClusteringMethod, ElbowMethod, Kmeans, DEFAULT_MAX_ITER,
};
use crate::encode::FeatureEncoder;
use crate::error::{Error, Result};
use crate::metrics::ClusterMetrics;
use crate::projection::{project, Point2D};
use crate::survey::{Response, Survey};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Fewest responses for which an analysis is meaningful.
pub const MIN_RESPONSES: usize = 2;

/// Cluster count used when a survey does not set one.
pub const DEFAULT_K: i64 = 3;

/// Per-survey analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Requested cluster count; must be at least 1.
    pub k: i64,
    /// Seeding strategy.
    pub method: ClusteringMethod,
    /// Seed for `kmeans++`; thread-local randomness when unset.
    pub seed: Option<u64>,
    /// Iteration cap.
    pub max_iter: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            method: ClusteringMethod::default(),
            seed: None,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

impl AnalysisConfig {
    /// Config with the given k and defaults elsewhere.
    pub fn new(k: i64) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Set the seeding strategy.
    pub fn with_method(mut self, method: ClusteringMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Requested k as a count, rejecting `k <= 0`.
    pub fn requested_k(&self) -> Result<usize> {
        if self.k <= 0 {
            return Err(Error::InvalidClusterCount { requested: self.k });
        }
        Ok(usize::try_from(self.k).unwrap_or(usize::MAX))
    }

    fn kmeans(&self, k: usize) -> Kmeans {
        Kmeans::new(k)
            .with_method(self.method)
            .with_max_iter(self.max_iter)
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None if !self.method.is_randomized() => Box::new(StdRng::seed_from_u64(0)),
            None => Box::new(rand::rng()),
        }
    }
}

/// Everything the presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Effective number of clusters.
    pub cluster_count: usize,
    /// Within-cluster sum of squares.
    pub inertia: f64,
    /// Mean silhouette coefficient.
    pub average_silhouette: f64,
    /// Members per cluster index.
    pub cluster_counts: BTreeMap<usize, usize>,
    /// One point per response, in response order.
    pub points: Vec<Point2D>,
    /// One centroid per cluster.
    pub centroids: Vec<Centroid>,
}

impl AnalysisResult {
    fn from_model(points: &[Point2D], model: ClusterModel) -> Self {
        let points = model.assign(points);
        let ClusterMetrics {
            inertia,
            average_silhouette,
            cluster_counts,
        } = ClusterMetrics::compute(&points, &model.centroids);

        Self {
            cluster_count: model.n_clusters(),
            inertia,
            average_silhouette,
            cluster_counts,
            points,
            centroids: model.centroids,
        }
    }
}

/// Analyze `responses` to `survey`, drawing randomness per `config.seed`.
pub fn analyze(survey: &Survey, responses: &[Response], config: &AnalysisConfig) -> Result<AnalysisResult> {
    let mut rng = config.rng();
    analyze_with_rng(survey, responses, config, &mut *rng)
}

/// Analyze with an explicit random source (used by `kmeans++` only).
pub fn analyze_with_rng(
    survey: &Survey,
    responses: &[Response],
    config: &AnalysisConfig,
    rng: &mut dyn RngCore,
) -> Result<AnalysisResult> {
    let k = config.requested_k()?;
    debug!(
        survey = %survey.id,
        responses = responses.len(),
        k_requested = k,
        method = %config.method,
        "analysis started"
    );

    let points = project_responses(survey, responses)?;

    let kmeans = config.kmeans(k);
    let effective_k = kmeans.effective_k(points.len());
    if effective_k != k {
        debug!(k_requested = k, effective_k, "cluster count clamped to response count");
    }

    let model = kmeans.fit_with_rng(&points, rng)?;
    let result = AnalysisResult::from_model(&points, model);

    debug!(
        survey = %survey.id,
        clusters = result.cluster_count,
        inertia = result.inertia,
        silhouette = result.average_silhouette,
        "analysis finished"
    );
    Ok(result)
}

/// Encode and project responses into the normalized plane.
///
/// Fails on fewer than [`MIN_RESPONSES`] responses, on a response scoped to a
/// different survey, and on an unrecognized question type.
pub fn project_responses(survey: &Survey, responses: &[Response]) -> Result<Vec<Point2D>> {
    if responses.len() < MIN_RESPONSES {
        return Err(Error::DegenerateInput {
            responses: responses.len(),
        });
    }
    if let Some(stray) = responses.iter().find(|r| r.survey_id != survey.id) {
        return Err(Error::SurveyMismatch {
            response_id: stray.id.clone(),
            expected: survey.id.clone(),
            found: stray.survey_id.clone(),
        });
    }

    let encoder = FeatureEncoder::new(survey)?;
    let vectors = encoder.encode_all(responses);
    let ids: Vec<&str> = responses.iter().map(|r| r.id.as_str()).collect();
    Ok(project(&ids, &vectors))
}

/// Suggest a cluster count in `k_min..=k_max` with the elbow method.
///
/// Uses `config`'s method, iteration cap and seed; `config.k` is ignored.
pub fn suggest_cluster_count(
    survey: &Survey,
    responses: &[Response],
    k_min: usize,
    k_max: usize,
    config: &AnalysisConfig,
) -> Result<usize> {
    let elbow = ElbowMethod::new(k_min, k_max)?;
    let points = project_responses(survey, responses)?;
    let mut rng = config.rng();
    elbow.suggest_k(&points, |k| config.kmeans(k), &mut *rng)
}
