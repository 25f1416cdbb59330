//! Clustering method selection by name.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Centroid seeding strategy, selected per survey by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClusteringMethod {
    /// Seed with the first k points in input order.
    Kmeans,
    /// Distance-weighted random seeding.
    #[default]
    KmeansPlusPlus,
}

impl ClusteringMethod {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusteringMethod::Kmeans => "kmeans",
            ClusteringMethod::KmeansPlusPlus => "kmeans++",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ClusteringMethod::Kmeans => "K-Means",
            ClusteringMethod::KmeansPlusPlus => "K-Means++",
        }
    }

    /// Catalog of `(name, label)` pairs for front ends to list.
    pub fn supported() -> [(&'static str, &'static str); 2] {
        [ClusteringMethod::Kmeans, ClusteringMethod::KmeansPlusPlus].map(|m| (m.as_str(), m.label()))
    }

    /// Whether seeding consumes randomness.
    pub fn is_randomized(&self) -> bool {
        matches!(self, ClusteringMethod::KmeansPlusPlus)
    }
}

impl fmt::Display for ClusteringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClusteringMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kmeans" | "k-means" => Ok(ClusteringMethod::Kmeans),
            "kmeans++" | "k-means++" | "kpp" => Ok(ClusteringMethod::KmeansPlusPlus),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

impl TryFrom<String> for ClusteringMethod {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClusteringMethod> for String {
    fn from(method: ClusteringMethod) -> Self {
        method.as_str().to_string()
    }
}
