//! Caller-owned memo table for analysis results.
//!
//! The engine itself is stateless. A service that re-renders the same
//! analysis keeps one of these and bumps the response-set version whenever a
//! survey gains, loses or edits a response. Storing version `v` of a survey
//! evicts that survey's older versions, so the table holds the latest
//! version per survey rather than its whole history.

use crate::analysis::{analyze, AnalysisConfig, AnalysisResult};
use crate::error::Result;
use crate::survey::{Response, Survey};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::trace;

/// Identity of one immutable response set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Survey id.
    pub survey_id: String,
    /// Monotonic version of the survey's response set.
    pub version: u64,
}

impl CacheKey {
    /// Key for `survey_id` at `version`.
    pub fn new(survey_id: impl Into<String>, version: u64) -> Self {
        Self {
            survey_id: survey_id.into(),
            version,
        }
    }
}

/// Results keyed by `(survey id, response-set version)`.
///
/// A stored result is reused only when it was computed with an equal
/// [`AnalysisConfig`]; a different config recomputes and replaces it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    entries: HashMap<CacheKey, (AnalysisConfig, AnalysisResult)>,
}

impl AnalysisCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result, if one exists for `key` and `config`.
    pub fn get(&self, key: &CacheKey, config: &AnalysisConfig) -> Option<&AnalysisResult> {
        self.entries
            .get(key)
            .filter(|(cached, _)| cached == config)
            .map(|(_, result)| result)
    }

    /// Return the cached result or run the analysis and store it.
    ///
    /// Older versions of the same survey are evicted first. Errors are
    /// returned as-is and are never cached.
    pub fn get_or_analyze(
        &mut self,
        survey: &Survey,
        responses: &[Response],
        version: u64,
        config: &AnalysisConfig,
    ) -> Result<&AnalysisResult> {
        let key = CacheKey::new(survey.id.as_str(), version);
        let evicted = self.evict_superseded(&key);
        if evicted > 0 {
            trace!(survey = %survey.id, version, evicted, "analysis cache evicted old versions");
        }
        match self.entries.entry(key) {
            Entry::Occupied(entry) if entry.get().0 == *config => {
                trace!(survey = %survey.id, version, "analysis cache hit");
                Ok(&entry.into_mut().1)
            }
            Entry::Occupied(mut entry) => {
                trace!(survey = %survey.id, version, "analysis cache stale config");
                let result = analyze(survey, responses, config)?;
                let _ = entry.insert((config.clone(), result));
                Ok(&entry.into_mut().1)
            }
            Entry::Vacant(entry) => {
                trace!(survey = %survey.id, version, "analysis cache miss");
                let result = analyze(survey, responses, config)?;
                Ok(&entry.insert((config.clone(), result)).1)
            }
        }
    }

    /// Drop entries of `key`'s survey older than `key.version`.
    fn evict_superseded(&mut self, key: &CacheKey) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|k, _| k.survey_id != key.survey_id || k.version >= key.version);
        before - self.entries.len()
    }

    /// Drop every cached version of one survey; returns how many were removed.
    pub fn invalidate(&mut self, survey_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.survey_id != survey_id);
        before - self.entries.len()
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
