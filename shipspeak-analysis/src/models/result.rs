//! Analysis result envelope
//!
//! Built once when a run completes; immutable afterwards.

use super::insight::{ImprovementArea, PatternHighlight, ProgressionInsight, StrengthArea};
use super::recommendation::{ActionRecommendation, ModuleRecommendation};
use crate::aggregator::CompositeScore;
use crate::benchmark::PeerComparison;
use crate::detectors::{
    ExecutivePresenceAnalysis, FrameworkAnalysis, IndustryAnalysis, MeetingTypeAnalysis,
    TransitionAnalysis,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-run metadata fields excluded from determinism comparisons
pub const RUN_METADATA_FIELDS: [&str; 4] = [
    "analysisId",
    "startedAt",
    "completedAt",
    "processingTimeMillis",
];

/// Talk-time summary for one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerSummary {
    pub speaker_id: String,
    pub segment_count: usize,
    pub talk_time_seconds: f64,
    /// Share of total talk time (0.0-1.0)
    pub talk_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub analysis_id: String,
    pub meeting_id: String,
    pub overall_score: u32,
    pub composite_scores: Vec<CompositeScore>,
    pub transition_analysis: TransitionAnalysis,
    pub industry_analysis: IndustryAnalysis,
    pub meeting_type_analysis: MeetingTypeAnalysis,
    pub executive_presence: ExecutivePresenceAnalysis,
    pub framework_usage: FrameworkAnalysis,
    pub peer_comparison: PeerComparison,
    pub highlights: Vec<PatternHighlight>,
    pub improvement_areas: Vec<ImprovementArea>,
    pub strength_areas: Vec<StrengthArea>,
    pub progression_insights: Vec<ProgressionInsight>,
    pub immediate_actions: Vec<ActionRecommendation>,
    pub module_recommendations: Vec<ModuleRecommendation>,
    pub speaker_summary: Vec<SpeakerSummary>,
    /// SHA-256 hex of the analysed text
    pub transcript_digest: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub processing_time_millis: u64,
}

impl AnalysisResult {
    /// JSON form with per-run metadata stripped
    pub fn analytical_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            for field in RUN_METADATA_FIELDS {
                object.remove(field);
            }
        }
        Ok(value)
    }

    pub fn composite(&self, name: &str) -> Option<&CompositeScore> {
        self.composite_scores.iter().find(|c| c.name == name)
    }
}
