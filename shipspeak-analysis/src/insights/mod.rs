//! Insight extraction
//!
//! Turns a complete detection set into four candidate lists:
//! highlights, improvement areas, strength areas and progression insights.
//! Candidates are emitted in a fixed family order (transition, industry,
//! meeting, presence) so ranking ties resolve the same way on every run.
//! Ranking and truncation happen later, in [`crate::ranker`].

mod highlights;
mod improvements;
mod progression;
mod strengths;

use crate::detectors::DetectionReports;
use crate::models::{ImprovementArea, PatternHighlight, ProgressionInsight, StrengthArea};
use crate::types::{AnalysisContext, Competency, Priority};
use shipspeak_common::config::ThresholdSettings;
use tracing::debug;

pub use progression::{critical_actions, milestones, months_to_target};

/// Unranked insight candidates for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedInsights {
    pub highlights: Vec<PatternHighlight>,
    pub improvements: Vec<ImprovementArea>,
    pub strengths: Vec<StrengthArea>,
    pub progression: Vec<ProgressionInsight>,
}

/// Insight extractor
#[derive(Debug, Clone, Default)]
pub struct InsightExtractor {
    thresholds: ThresholdSettings,
}

impl InsightExtractor {
    pub fn new(thresholds: ThresholdSettings) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdSettings {
        &self.thresholds
    }

    pub fn extract(&self, reports: &DetectionReports, ctx: &AnalysisContext) -> ExtractedInsights {
        let insights = ExtractedInsights {
            highlights: highlights::extract(reports, ctx, &self.thresholds),
            improvements: improvements::extract(reports, ctx, &self.thresholds),
            strengths: strengths::extract(reports, &self.thresholds),
            progression: progression::extract(&reports.transition),
        };

        debug!(
            highlights = insights.highlights.len(),
            improvements = insights.improvements.len(),
            strengths = insights.strengths.len(),
            progression = insights.progression.len(),
            "Insight candidates extracted"
        );

        insights
    }
}

/// HIGH at or above `high_at`, MEDIUM otherwise
pub(crate) fn significance_for(score: u32, high_at: u32) -> Priority {
    if score >= high_at {
        Priority::High
    } else {
        Priority::Medium
    }
}

/// Competency a transition marker speaks to
pub fn marker_competency(marker_id: &str) -> Competency {
    match marker_id {
        "business_impact_reasoning"
        | "delivery_to_outcomes_shift"
        | "business_model_fluency"
        | "capital_allocation"
        | "resource_allocation_reasoning"
        | "enterprise_strategy"
        | "market_strategy_communication" => Competency::BusinessImpact,

        "stakeholder_communication_evolution"
        | "influence_without_authority"
        | "coaching_communication_emergence"
        | "organizational_impact_awareness"
        | "organizational_leadership"
        | "executive_team_building"
        | "board_governance" => Competency::StakeholderManagement,

        "decision_framework_application"
        | "tradeoff_articulation"
        | "framework_mastery"
        | "portfolio_thinking_language"
        | "cross_product_strategy" => Competency::ProductSense,

        "strategic_altitude_control" => Competency::TechnicalTranslation,

        _ => Competency::Communication,
    }
}
