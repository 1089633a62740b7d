//! Insight records
//!
//! Created by the insight extractor and never mutated afterwards; the ranker
//! produces new ordered views over them.

use crate::types::{Competency, Priority};
use serde::{Deserialize, Serialize};
use shipspeak_common::config::HIGH_SIGNIFICANCE_SCORE;

/// Observed strength worth calling out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternHighlight {
    pub pattern: String,
    pub competency: Competency,
    /// 0-100
    pub score: u32,
    pub evidence: Vec<String>,
    pub significance: Priority,
    pub career_impact: String,
}

/// Gap between observed and target level for one competency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementArea {
    pub competency: Competency,
    pub specific_focus: String,
    pub current_level: u32,
    pub target_level: u32,
    /// `target_level - current_level`
    pub gap: u32,
    pub priority: Priority,
    pub examples: Vec<String>,
    pub practice_modules: Vec<String>,
}

impl ImprovementArea {
    /// Gap is derived, never supplied; an already-met target yields gap 0
    pub fn new(
        competency: Competency,
        specific_focus: impl Into<String>,
        current_level: u32,
        target_level: u32,
        priority: Priority,
    ) -> Self {
        let current_level = current_level.min(target_level);
        Self {
            competency,
            specific_focus: specific_focus.into(),
            current_level,
            target_level,
            gap: target_level - current_level,
            priority,
            examples: Vec::new(),
            practice_modules: Vec::new(),
        }
    }

    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_modules(mut self, modules: &[&str]) -> Self {
        self.practice_modules = modules.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Competency performing above its benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthArea {
    pub competency: Competency,
    pub area: String,
    pub current_level: u32,
    pub benchmark_comparison: u32,
    pub leverage_opportunities: Vec<String>,
    pub examples: Vec<String>,
}

impl StrengthArea {
    pub fn significance(&self) -> Priority {
        if self.current_level >= HIGH_SIGNIFICANCE_SCORE {
            Priority::High
        } else {
            Priority::Medium
        }
    }
}

/// Career trajectory for one level pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionInsight {
    pub transition_type: String,
    pub readiness_score: u32,
    /// Estimated months to target readiness
    pub time_to_target: u32,
    pub key_milestones: Vec<String>,
    pub critical_actions: Vec<String>,
}
