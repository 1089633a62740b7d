//! Score Aggregator
//!
//! Weighted arithmetic mean over named dimensions. Used inside detector
//! families (five transition markers → progress score) and across families
//! (transition / industry / meeting / presence / frameworks → overall score).
//!
//! # Algorithm
//! 1. Validate the weight vector: non-empty, no negative or duplicate
//!    dimensions, sum within 1e-6 of 1.0
//! 2. Look up every weighted dimension in the score map (missing → error)
//! 3. Clamp each score into [0, 100] and sum `score × weight`
//! 4. Round to the nearest integer for the display-facing value

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use shipspeak_common::config::{OverallWeights, WEIGHT_EPSILON};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// Dimension → score (0-100)
pub type ScoreMap = BTreeMap<String, f64>;

/// Named weight vector for one composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub name: String,
    pub weights: Vec<(String, f64)>,
}

impl WeightVector {
    pub fn new<K: Into<String>>(
        name: impl Into<String>,
        weights: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            weights: weights.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }

    /// Equal weights over the given dimensions
    pub fn equal<K: Into<String>>(
        name: impl Into<String>,
        dimensions: impl IntoIterator<Item = K>,
    ) -> Self {
        let dims: Vec<String> = dimensions.into_iter().map(Into::into).collect();
        let weight = if dims.is_empty() {
            0.0
        } else {
            1.0 / dims.len() as f64
        };
        Self::new(name, dims.into_iter().map(|d| (d, weight)))
    }

    /// Overall composite weights from settings
    pub fn overall(weights: &OverallWeights) -> Self {
        Self::new("overall", weights.entries())
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.weights.is_empty() {
            return Err(AnalysisError::Configuration(format!(
                "weight vector '{}' is empty",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for (dimension, weight) in &self.weights {
            if !seen.insert(dimension.as_str()) {
                return Err(AnalysisError::Configuration(format!(
                    "weight vector '{}' repeats dimension '{}'",
                    self.name, dimension
                )));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(AnalysisError::Configuration(format!(
                    "weight vector '{}' has invalid weight {} for '{}'",
                    self.name, weight, dimension
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(AnalysisError::Configuration(format!(
                "weight vector '{}' sums to {:.6}, expected 1.0",
                self.name, sum
            )));
        }

        Ok(())
    }
}

/// One weighted input of a composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponent {
    pub dimension: String,
    pub score: f64,
    pub weight: f64,
}

/// Named weighted aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    pub name: String,
    /// Rounded, 0-100
    pub score: u32,
    /// Unrounded weighted mean
    pub raw: f64,
    pub components: Vec<ScoreComponent>,
}

/// Aggregate `scores` under `weights`
pub fn aggregate(scores: &ScoreMap, weights: &WeightVector) -> Result<CompositeScore> {
    weights.validate()?;

    let mut components = Vec::with_capacity(weights.weights.len());
    let mut raw = 0.0;

    for (dimension, weight) in &weights.weights {
        let score = scores.get(dimension).copied().ok_or_else(|| {
            AnalysisError::Configuration(format!(
                "aggregate '{}' is missing dimension '{}'",
                weights.name, dimension
            ))
        })?;

        let clamped = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
        if clamped != score {
            warn!(
                aggregate = %weights.name,
                dimension = %dimension,
                score,
                "Score outside [0, 100], clamped"
            );
        }

        raw += clamped * weight;
        components.push(ScoreComponent {
            dimension: dimension.clone(),
            score: clamped,
            weight: *weight,
        });
    }

    let raw = raw.clamp(0.0, 100.0);
    Ok(CompositeScore {
        name: weights.name.clone(),
        score: raw.round() as u32,
        raw,
        components,
    })
}

/// Build a score map from `(dimension, score)` pairs
pub fn score_map<K: Into<String>>(entries: impl IntoIterator<Item = (K, f64)>) -> ScoreMap {
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
