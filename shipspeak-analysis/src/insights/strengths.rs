//! Strength-area candidates

use crate::detectors::DetectionReports;
use crate::models::StrengthArea;
use crate::types::Competency;
use shipspeak_common::config::ThresholdSettings;

const TRANSITION_BENCHMARK: u32 = 85;
const INDUSTRY_BENCHMARK: u32 = 75;
const MEETING_BENCHMARK: u32 = 72;
const PRESENCE_BENCHMARK: u32 = 78;

fn strength(
    competency: Competency,
    area: impl Into<String>,
    current_level: u32,
    benchmark_comparison: u32,
    leverage: &[&str],
    examples: Vec<String>,
) -> StrengthArea {
    StrengthArea {
        competency,
        area: area.into(),
        current_level,
        benchmark_comparison,
        leverage_opportunities: leverage.iter().map(|s| s.to_string()).collect(),
        examples,
    }
}

pub(super) fn extract(reports: &DetectionReports, t: &ThresholdSettings) -> Vec<StrengthArea> {
    let mut out = Vec::new();

    let transition = &reports.transition;
    if transition.progress_score >= t.strength_transition {
        let examples = transition
            .markers
            .iter()
            .filter(|m| m.detected)
            .map(|m| m.label.clone())
            .collect();
        out.push(strength(
            Competency::Communication,
            format!("{} Readiness", transition.pair.label()),
            transition.progress_score,
            TRANSITION_BENCHMARK,
            &[
                "Mentor others in framework application",
                "Lead cross-functional communication training",
                "Present best practices to leadership",
            ],
            examples,
        ));
    }

    let industry = &reports.industry;
    if industry.score() >= t.strength_score {
        out.push(strength(
            Competency::BusinessImpact,
            format!("{} Industry Fluency", industry.industry.label()),
            industry.score(),
            INDUSTRY_BENCHMARK,
            &[
                "Represent company at industry events",
                "Lead industry-specific initiatives",
                "Become internal subject matter expert",
            ],
            industry
                .markers
                .iter()
                .filter(|m| m.detected)
                .map(|m| m.label.clone())
                .collect(),
        ));
    }

    let meeting = &reports.meeting;
    if meeting.effectiveness >= t.strength_score {
        out.push(strength(
            Competency::StakeholderManagement,
            format!("{} Effectiveness", meeting.meeting_type.label()),
            meeting.effectiveness,
            MEETING_BENCHMARK,
            &[
                "Facilitate critical meetings for team",
                "Train others on meeting effectiveness",
                "Lead difficult stakeholder conversations",
            ],
            meeting
                .patterns
                .iter()
                .filter(|p| p.detected)
                .map(|p| p.label.clone())
                .collect(),
        ));
    }

    let presence = &reports.presence;
    if presence.overall_score >= t.strength_score {
        out.push(strength(
            Competency::Communication,
            "Executive Presence",
            presence.overall_score,
            PRESENCE_BENCHMARK,
            &[
                "Represent the team in executive forums",
                "Lead high-stakes presentations",
                "Coach peers on executive communication",
            ],
            presence
                .presence_markers
                .iter()
                .take(3)
                .map(|m| m.result.label.clone())
                .collect(),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::super::tests::reports_for;
    use super::*;
    use crate::ranker::rank_cloned;
    use crate::types::{CareerLevel, Industry, MeetingType, Priority};

    async fn plain_reports() -> DetectionReports {
        let (reports, _) = reports_for(
            "hello there",
            CareerLevel::Senior,
            Industry::Fintech,
            MeetingType::StakeholderReview,
        )
        .await;
        reports
    }

    #[tokio::test]
    async fn test_transition_readiness_threshold() {
        let t = ThresholdSettings::default();
        let mut reports = plain_reports().await;

        reports.transition.progress_score = t.strength_transition - 1;
        assert!(extract(&reports, &t).is_empty());

        reports.transition.progress_score = t.strength_transition;
        let strengths = extract(&reports, &t);
        assert_eq!(strengths.len(), 1);
        assert_eq!(strengths[0].competency, Competency::Communication);
        assert_eq!(strengths[0].current_level, t.strength_transition);
        assert_eq!(strengths[0].benchmark_comparison, TRANSITION_BENCHMARK);
        assert!(strengths[0].area.ends_with("Readiness"));
        assert_eq!(strengths[0].significance(), Priority::Medium);
    }

    #[tokio::test]
    async fn test_score_threshold_per_family() {
        let t = ThresholdSettings::default();
        let mut reports = plain_reports().await;

        reports.industry.vocabulary.professional_credibility = t.strength_score - 1;
        reports.meeting.effectiveness = t.strength_score - 1;
        reports.presence.overall_score = t.strength_score - 1;
        assert!(extract(&reports, &t).is_empty());

        reports.industry.vocabulary.professional_credibility = t.strength_score;
        reports.presence.overall_score = 90;
        let strengths = extract(&reports, &t);
        assert_eq!(strengths.len(), 2);

        assert_eq!(strengths[0].area, "Fintech Industry Fluency");
        assert_eq!(strengths[0].current_level, t.strength_score);
        assert_eq!(strengths[0].benchmark_comparison, INDUSTRY_BENCHMARK);

        assert_eq!(strengths[1].area, "Executive Presence");
        assert_eq!(strengths[1].benchmark_comparison, PRESENCE_BENCHMARK);
        assert_eq!(strengths[1].significance(), Priority::High);
    }

    #[tokio::test]
    async fn test_equal_levels_keep_extraction_order() {
        let t = ThresholdSettings::default();
        let mut reports = plain_reports().await;
        reports.industry.vocabulary.professional_credibility = 82;
        reports.meeting.effectiveness = 82;

        let strengths = extract(&reports, &t);
        let ranked = rank_cloned(&strengths, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].benchmark_comparison, INDUSTRY_BENCHMARK);
        assert_eq!(ranked[1].benchmark_comparison, MEETING_BENCHMARK);
    }
}
