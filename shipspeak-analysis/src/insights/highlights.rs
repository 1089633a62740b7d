//! Highlight candidates

use super::{marker_competency, significance_for};
use crate::detectors::industry::CompetitivePosition;
use crate::detectors::DetectionReports;
use crate::models::PatternHighlight;
use crate::types::{AnalysisContext, Competency, Priority};
use shipspeak_common::config::ThresholdSettings;

const MAX_EVIDENCE: usize = 3;

pub(super) fn extract(
    reports: &DetectionReports,
    ctx: &AnalysisContext,
    t: &ThresholdSettings,
) -> Vec<PatternHighlight> {
    let mut out = Vec::new();
    transition(reports, ctx, t, &mut out);
    industry(reports, t, &mut out);
    meeting(reports, t, &mut out);
    presence(reports, t, &mut out);
    out
}

fn highlight(
    pattern: impl Into<String>,
    competency: Competency,
    score: u32,
    mut evidence: Vec<String>,
    t: &ThresholdSettings,
    career_impact: impl Into<String>,
) -> PatternHighlight {
    evidence.truncate(MAX_EVIDENCE);
    PatternHighlight {
        pattern: pattern.into(),
        competency,
        score,
        evidence,
        significance: significance_for(score, t.high_significance),
        career_impact: career_impact.into(),
    }
}

fn transition(
    reports: &DetectionReports,
    ctx: &AnalysisContext,
    t: &ThresholdSettings,
    out: &mut Vec<PatternHighlight>,
) {
    let analysis = &reports.transition;

    if analysis.progress_score >= t.transition_highlight {
        let mut evidence = vec![format!("{}% transition readiness score", analysis.progress_score)];
        if let Some(strongest) = analysis.markers.iter().max_by_key(|m| m.confidence) {
            evidence.extend(strongest.evidence_snippets(MAX_EVIDENCE - 1));
        }
        out.push(highlight(
            "Career Transition Readiness",
            Competency::Communication,
            analysis.progress_score,
            evidence,
            t,
            format!(
                "Ready for {} role - demonstrate consistent execution",
                ctx.target_level()
            ),
        ));
    }

    for marker in analysis.markers.iter().filter(|m| m.confidence >= t.highlight) {
        out.push(highlight(
            marker.label.clone(),
            marker_competency(&marker.id),
            marker.confidence,
            marker.evidence_snippets(MAX_EVIDENCE),
            t,
            format!("Signals {} readiness", analysis.pair.label()),
        ));
    }
}

fn industry(reports: &DetectionReports, t: &ThresholdSettings, out: &mut Vec<PatternHighlight>) {
    let analysis = &reports.industry;
    let fluency = &analysis.vocabulary;

    if fluency.professional_credibility >= t.highlight {
        out.push(highlight(
            "Industry Expertise Communication",
            Competency::BusinessImpact,
            fluency.professional_credibility,
            vec![
                format!("{}% industry vocabulary usage", fluency.usage),
                format!(
                    "{}% contextual appropriateness",
                    fluency.contextual_appropriateness
                ),
            ],
            t,
            "Industry fluency supports senior role credibility",
        ));
    }

    if analysis.benchmark.competitive_position == CompetitivePosition::Leading {
        let percentile = analysis.benchmark.user_percentile;
        out.push(highlight(
            "Industry Leadership Communication",
            Competency::BusinessImpact,
            percentile,
            vec![format!(
                "{}th percentile among {} peers",
                percentile,
                analysis.industry.label()
            )],
            t,
            "Industry-leading communication positions you for thought leadership",
        ));
    }
}

fn meeting(reports: &DetectionReports, t: &ThresholdSettings, out: &mut Vec<PatternHighlight>) {
    let analysis = &reports.meeting;
    let label = analysis.meeting_type.label();

    if analysis.effectiveness >= t.highlight {
        let evidence = analysis
            .patterns
            .iter()
            .filter(|p| p.detected)
            .flat_map(|p| p.evidence_snippets(1))
            .collect();
        out.push(highlight(
            format!("{} Mastery", label),
            Competency::StakeholderManagement,
            analysis.effectiveness,
            evidence,
            t,
            format!(
                "Excellent {} communication supports leadership credibility",
                label.to_lowercase()
            ),
        ));
    }

    let strong = analysis.audience_adaptation.strong_audiences(t.highlight);
    if strong.len() >= 3 {
        let best = analysis
            .audience_adaptation
            .scores()
            .iter()
            .map(|(_, score)| *score)
            .max()
            .unwrap_or(0);
        let mut multi = highlight(
            "Multi-Audience Communication",
            Competency::StakeholderManagement,
            best,
            vec![format!("Strong adaptation for: {}", strong.join(", "))],
            t,
            "Strong stakeholder adaptation indicates senior PM readiness",
        );
        multi.significance = Priority::Medium;
        out.push(multi);
    }
}

fn presence(reports: &DetectionReports, t: &ThresholdSettings, out: &mut Vec<PatternHighlight>) {
    let analysis = &reports.presence;

    if analysis.overall_score >= t.highlight {
        let evidence = analysis
            .presence_markers
            .iter()
            .map(|m| format!("{} ({}%)", m.result.label, m.strength()))
            .collect();
        out.push(highlight(
            "Executive Presence",
            Competency::Communication,
            analysis.overall_score,
            evidence,
            t,
            "Executive presence signals readiness for senior leadership roles",
        ));
    }

    for marker in analysis
        .presence_markers
        .iter()
        .filter(|m| m.strength() >= t.high_significance)
    {
        out.push(highlight(
            format!("Strong {}", marker.result.label),
            Competency::Communication,
            marker.strength(),
            marker.result.evidence_snippets(MAX_EVIDENCE),
            t,
            "Builds executive credibility with senior stakeholders",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::reports_for;
    use super::*;
    use crate::types::{CareerLevel, Industry, MeetingType};

    #[tokio::test]
    async fn test_transition_highlight_from_strong_markers() {
        let text = "I recommend we prioritize the security update. I recommend we ship. \
                    I recommend the tradeoff. My recommendation is clear. I recommend it.";
        let (reports, ctx) = reports_for(
            text,
            CareerLevel::Senior,
            Industry::Cybersecurity,
            MeetingType::StakeholderReview,
        )
        .await;
        let highlights = extract(&reports, &ctx, &ThresholdSettings::default());

        let exec = highlights
            .iter()
            .find(|h| h.pattern == "Executive Communication Structure")
            .expect("executive communication highlight");
        assert!(exec.score >= 80);
        assert_eq!(exec.competency, Competency::Communication);
        assert!(exec.evidence.len() <= MAX_EVIDENCE);
        assert_eq!(
            exec.significance,
            if exec.score >= 85 { Priority::High } else { Priority::Medium }
        );
    }

    #[tokio::test]
    async fn test_no_highlights_for_plain_text() {
        let (reports, ctx) = reports_for(
            "hello there",
            CareerLevel::Ic,
            Industry::Consumer,
            MeetingType::TeamStandup,
        )
        .await;
        assert!(extract(&reports, &ctx, &ThresholdSettings::default()).is_empty());
    }
}
