//! Meeting-type effectiveness detector
//!
//! Scores the patterns expected in the meeting category plus how well the
//! language adapts to five audience categories, then blends the two with
//! per-meeting-type weights.

use super::marker::{mean_or_zero, MarkerSpec};
use super::text_scan::TranscriptScan;
use super::{DetectorError, DetectorFamily, FamilyReport, PatternDetector};
use crate::aggregator::{aggregate, score_map, WeightVector};
use crate::types::{AnalysisContext, DetectionResult, MeetingType};
use serde::{Deserialize, Serialize};
use tracing::debug;

const BOARD_PRESENTATION: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "executive_summary_structure",
        "Executive Summary Structure",
        &["in summary", "key takeaway", "bottom line", "conclusion", "executive summary"],
    ),
    MarkerSpec::vocabulary(
        "metrics_focus",
        "Metrics Focus",
        &["revenue", "growth", "KPI", "metric", "performance", "ROI", "market share"],
    ),
    MarkerSpec::vocabulary(
        "confidence_indicators",
        "Confidence Indicators",
        &["recommend", "confident", "certain", "believe", "convinced"],
    ),
    MarkerSpec::vocabulary(
        "strategic_narrative",
        "Strategic Narrative",
        &["strategy", "vision", "market", "competitive", "opportunity", "positioning"],
    ),
    MarkerSpec::vocabulary(
        "time_management",
        "Time Management",
        &["in conclusion", "time check", "to summarize", "final point", "wrap up"],
    ),
];

const STAKEHOLDER_REVIEW: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "progress_clarity",
        "Progress Clarity",
        &["progress", "completed", "achieved", "delivered", "milestone", "status"],
    ),
    MarkerSpec::vocabulary(
        "blocker_communication",
        "Blocker Communication",
        &["blocker", "challenge", "issue", "risk", "dependency", "obstacle"],
    ),
    MarkerSpec::vocabulary(
        "executive_reporting",
        "Executive Reporting",
        &["report", "update", "summary", "overview", "dashboard", "metrics"],
    ),
    MarkerSpec::vocabulary(
        "success_metric_integration",
        "Success Metric Integration",
        &["KPI", "metric", "measurement", "target", "goal", "success criteria", "benchmark"],
    ),
    MarkerSpec::vocabulary(
        "action_orientation",
        "Action Orientation",
        &["action", "next steps", "plan", "decision", "commitment", "deliverable"],
    ),
];

const ONE_ON_ONE: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "relationship_building",
        "Relationship Building",
        &["how are you", "feedback", "support", "help", "concern", "question"],
    ),
    MarkerSpec::vocabulary(
        "career_development",
        "Career Development",
        &["career", "growth", "development", "goal", "aspiration", "skill"],
    ),
    MarkerSpec::vocabulary(
        "feedback_delivery",
        "Feedback Delivery",
        &["feedback", "improvement", "strength", "area to work on", "suggestion"],
    ),
    MarkerSpec::vocabulary(
        "goal_alignment",
        "Goal Alignment",
        &["goal", "objective", "target", "milestone", "achievement", "success"],
    ),
    MarkerSpec::vocabulary(
        "support_provision",
        "Support Provision",
        &["support", "help", "assist", "enable", "resource", "available", "here for you"],
    ),
];

const TEAM_STANDUP: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "coordination_effectiveness",
        "Coordination Effectiveness",
        &["coordinate", "sync", "align", "collaborate", "dependency", "handoff"],
    ),
    MarkerSpec::vocabulary(
        "blocker_identification",
        "Blocker Identification",
        &["blocker", "blocked", "stuck", "need help", "issue", "impediment"],
    ),
    MarkerSpec::vocabulary(
        "priority_alignment",
        "Priority Alignment",
        &["priority", "urgent", "important", "critical", "focus", "sprint"],
    ),
    MarkerSpec::vocabulary(
        "team_motivation",
        "Team Motivation",
        &["great work", "excellent", "progress", "achievement", "success"],
    ),
    MarkerSpec::vocabulary(
        "efficiency_maintenance",
        "Efficiency Maintenance",
        &["efficient", "quick", "brief", "focused", "on track", "time-boxed"],
    ),
];

const CRISIS_COMMUNICATION: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "calmness_projection",
        "Calmness Projection",
        &["calm", "stable", "under control", "managed", "handling"],
    ),
    MarkerSpec::vocabulary(
        "clarity_under_pressure",
        "Clarity Under Pressure",
        &["clear", "specific", "exactly", "precisely", "understand"],
    ),
    MarkerSpec::vocabulary(
        "stakeholder_reassurance",
        "Stakeholder Reassurance",
        &["reassure", "confident", "handle", "resolve", "solution"],
    ),
    MarkerSpec::vocabulary(
        "actionable_planning",
        "Actionable Planning",
        &["action plan", "immediate steps", "response", "mitigation", "recovery"],
    ),
    MarkerSpec::vocabulary(
        "transparency_balance",
        "Transparency Balance",
        &["transparent", "honest", "clear", "open", "communicate", "inform"],
    ),
];

const EXECUTIVE_TERMS: &[&str] = &[
    "strategic",
    "business impact",
    "ROI",
    "market",
    "competitive",
    "revenue",
    "growth",
];
const TECHNICAL_TERMS: &[&str] = &[
    "architecture",
    "implementation",
    "API",
    "infrastructure",
    "performance",
    "scalability",
];
const TRANSLATION_TERMS: &[&str] = &["which means", "in business terms", "impact is", "translates to"];
const BUSINESS_TERMS: &[&str] = &[
    "business value",
    "customer",
    "market",
    "revenue",
    "cost",
    "efficiency",
    "ROI",
];
const CUSTOMER_TERMS: &[&str] = &[
    "customer",
    "user",
    "experience",
    "value",
    "needs",
    "feedback",
    "satisfaction",
];
const TEAM_TERMS: &[&str] = &["team", "collaboration", "support", "help", "together", "we", "us", "our"];

/// Pattern markers evaluated for a meeting type
pub fn markers_for(meeting_type: MeetingType) -> &'static [MarkerSpec] {
    match meeting_type {
        MeetingType::BoardPresentation => &BOARD_PRESENTATION,
        MeetingType::StakeholderReview
        | MeetingType::CustomerMeeting
        | MeetingType::SpeakingEngagement => &STAKEHOLDER_REVIEW,
        MeetingType::OneOnOne => &ONE_ON_ONE,
        MeetingType::TeamStandup => &TEAM_STANDUP,
        MeetingType::CrisisCommunication => &CRISIS_COMMUNICATION,
    }
}

/// (patterns, audience) blend for the effectiveness score
pub fn effectiveness_weights(meeting_type: MeetingType) -> (f64, f64) {
    match meeting_type {
        MeetingType::BoardPresentation => (0.7, 0.3),
        MeetingType::StakeholderReview => (0.6, 0.4),
        MeetingType::OneOnOne => (0.4, 0.6),
        MeetingType::TeamStandup => (0.8, 0.2),
        MeetingType::CrisisCommunication => (0.7, 0.3),
        MeetingType::CustomerMeeting | MeetingType::SpeakingEngagement => (0.6, 0.4),
    }
}

/// Language fit per audience category (each 0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceAdaptation {
    pub executive_audience: u32,
    pub technical_audience: u32,
    pub business_stakeholders: u32,
    pub customer_facing: u32,
    pub team_members: u32,
}

impl AudienceAdaptation {
    pub fn measure(scan: &TranscriptScan) -> Self {
        let scaled = |terms: &[&str], per_match: u32| {
            scan.count_terms(terms).saturating_mul(per_match).min(100)
        };

        let technical = scan
            .count_terms(TECHNICAL_TERMS)
            .saturating_mul(8)
            .saturating_add(scan.count_terms(TRANSLATION_TERMS).saturating_mul(20))
            .min(100);

        Self {
            executive_audience: scaled(EXECUTIVE_TERMS, 12),
            technical_audience: technical,
            business_stakeholders: scaled(BUSINESS_TERMS, 10),
            customer_facing: scaled(CUSTOMER_TERMS, 12),
            team_members: scaled(TEAM_TERMS, 8),
        }
    }

    pub fn scores(&self) -> [(&'static str, u32); 5] {
        [
            ("Executive", self.executive_audience),
            ("Technical", self.technical_audience),
            ("Business Stakeholders", self.business_stakeholders),
            ("Customer", self.customer_facing),
            ("Team", self.team_members),
        ]
    }

    pub fn mean(&self) -> f64 {
        let values: Vec<f64> = self.scores().iter().map(|(_, s)| f64::from(*s)).collect();
        mean_or_zero(&values)
    }

    /// Audience categories scoring at or above `threshold`
    pub fn strong_audiences(&self, threshold: u32) -> Vec<&'static str> {
        self.scores()
            .into_iter()
            .filter(|(_, s)| *s >= threshold)
            .map(|(name, _)| name)
            .collect()
    }
}

/// Meeting-type family output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTypeAnalysis {
    pub meeting_type: MeetingType,
    pub patterns: Vec<DetectionResult>,
    pub audience_adaptation: AudienceAdaptation,
    pub pattern_score: u32,
    pub effectiveness: u32,
    pub contextually_appropriate: bool,
}

/// Meeting-type effectiveness detector
#[derive(Debug, Default, Clone, Copy)]
pub struct MeetingTypeDetector;

impl MeetingTypeDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        scan: &TranscriptScan,
        meeting_type: MeetingType,
    ) -> Result<MeetingTypeAnalysis, DetectorError> {
        let patterns: Vec<DetectionResult> = markers_for(meeting_type)
            .iter()
            .map(|spec| spec.evaluate(scan))
            .collect();
        let audience_adaptation = AudienceAdaptation::measure(scan);

        let confidences: Vec<f64> = patterns.iter().map(|p| f64::from(p.confidence)).collect();
        let pattern_score = mean_or_zero(&confidences);

        let (pattern_weight, audience_weight) = effectiveness_weights(meeting_type);
        let effectiveness = aggregate(
            &score_map([
                ("patterns", pattern_score),
                ("audience", audience_adaptation.mean()),
            ]),
            &WeightVector::new(
                "meeting_effectiveness",
                [("patterns", pattern_weight), ("audience", audience_weight)],
            ),
        )?;

        debug!(
            meeting_type = %meeting_type,
            pattern_score,
            effectiveness = effectiveness.score,
            "Meeting effectiveness scored"
        );

        Ok(MeetingTypeAnalysis {
            meeting_type,
            patterns,
            audience_adaptation,
            pattern_score: pattern_score.round() as u32,
            effectiveness: effectiveness.score,
            contextually_appropriate: effectiveness.score > 70,
        })
    }
}

impl PatternDetector for MeetingTypeDetector {
    fn name(&self) -> &'static str {
        "meeting_type_effectiveness"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Meeting
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        self.analyze(scan, ctx.meeting_type).map(FamilyReport::Meeting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    #[test]
    fn test_weights_sum_to_one_for_every_type() {
        for meeting_type in MeetingType::ALL {
            let (p, a) = effectiveness_weights(*meeting_type);
            assert!((p + a - 1.0).abs() < 1e-9);
            assert_eq!(markers_for(*meeting_type).len(), 5);
        }
    }

    #[test]
    fn test_customer_meeting_uses_stakeholder_patterns() {
        assert_eq!(
            markers_for(MeetingType::CustomerMeeting)[0].id,
            markers_for(MeetingType::StakeholderReview)[0].id
        );
    }

    #[test]
    fn test_audience_technical_translation_bonus() {
        let scan = TranscriptScan::new(
            "The API architecture changed, which means checkout is faster.",
            0.0,
        );
        let audience = AudienceAdaptation::measure(&scan);
        assert_eq!(audience.technical_audience, 36);
    }

    #[test]
    fn test_empty_transcript_is_not_appropriate() {
        let analysis = MeetingTypeDetector::new()
            .analyze(&TranscriptScan::new("", 0.0), MeetingType::BoardPresentation)
            .unwrap();
        assert_eq!(analysis.effectiveness, 0);
        assert!(!analysis.contextually_appropriate);
    }

    #[test]
    fn test_standup_weights_favor_patterns() {
        let text = "Blocker on the sprint: I'm blocked on the handoff, need help to sync. \
                    Priority is the critical issue; great work on progress, we stay focused and on track.";
        let scan = TranscriptScan::new(text, 0.0);
        let standup = MeetingTypeDetector::new()
            .analyze(&scan, MeetingType::TeamStandup)
            .unwrap();
        let one_on_one = MeetingTypeDetector::new()
            .analyze(&scan, MeetingType::OneOnOne)
            .unwrap();

        assert!(standup.pattern_score > one_on_one.pattern_score);
        assert!(standup.effectiveness > one_on_one.effectiveness);
    }
}
