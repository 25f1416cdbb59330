//! # survey_cluster
//!
//! Groups survey respondents by similarity.
//!
//! Heterogeneous answers (free text, numbers, single and multiple choice) are
//! encoded into one numeric vector per response, folded into a normalized 2D
//! plane for visualization, and partitioned with k-means (first-k or
//! k-means++ seeding). Each run returns per-response assignments, centroids,
//! inertia, per-cluster counts and the average silhouette.
//!
//! ```rust
//! use survey_cluster::{analyze, AnalysisConfig, ClusteringMethod, Question, QuestionType, Response, Survey};
//!
//! let survey = Survey::new(
//!     "s1",
//!     vec![Question::new("q1", QuestionType::Single).with_options(["A", "B"])],
//! );
//! let responses: Vec<Response> = ["A", "A", "B", "B"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, a)| Response::new(format!("r{i}"), "s1").with_answer("q1", *a))
//!     .collect();
//!
//! let config = AnalysisConfig::new(2).with_method(ClusteringMethod::Kmeans);
//! let result = analyze(&survey, &responses, &config).unwrap();
//! assert_eq!(result.cluster_counts.values().copied().collect::<Vec<_>>(), vec![2, 2]);
//! assert_eq!(result.inertia, 0.0);
//! ```
//!
//! The engine never logs through a global subscriber of its own; it emits
//! `tracing` events and leaves collection to the caller.

pub mod analysis;
pub mod cache;
pub mod cluster;
pub mod encode;
/// Error types used across `survey_cluster`.
pub mod error;
pub mod metrics;
pub mod projection;
pub mod survey;

#[cfg(test)]
mod analysis_tests;

pub use analysis::{
    analyze, analyze_with_rng, project_responses, suggest_cluster_count, AnalysisConfig,
    AnalysisResult,
};
pub use cache::{AnalysisCache, CacheKey};
pub use cluster::{Centroid, ClusterModel, Clustering, ClusteringMethod, ElbowMethod, Kmeans};
pub use encode::{FeatureEncoder, FeatureVector};
pub use error::{Error, Result};
pub use metrics::{average_silhouette, cluster_counts, inertia, silhouette_scores, ClusterMetrics};
pub use projection::Point2D;
pub use survey::{Answer, Question, QuestionType, Response, Survey};
