//! Improvement-area candidates
//!
//! Each rule names a dimension, the threshold below which it qualifies and
//! the fixed target level. Priority is HIGH when the gap reaches
//! `improvement_gap_high` or the competency is critical for the evaluated
//! career-level pair.

use crate::detectors::presence::PresenceCategory;
use crate::detectors::DetectionReports;
use crate::models::ImprovementArea;
use crate::types::{AnalysisContext, CareerLevel, CareerPair, Competency, Priority};
use shipspeak_common::config::ThresholdSettings;

/// Improvement rule on one transition marker
struct MarkerRule {
    marker_id: &'static str,
    competency: Competency,
    target: u32,
    focus: &'static str,
    examples: &'static [&'static str],
    modules: &'static [&'static str],
}

const IC_RULES: [MarkerRule; 2] = [
    MarkerRule {
        marker_id: "strategic_language_emergence",
        competency: Competency::Communication,
        target: 80,
        focus: "Strategic Language Development",
        examples: &[
            "Use outcome-focused language",
            "Frame decisions in business impact terms",
            "Reference competitive positioning",
        ],
        modules: &[
            "Strategic Communication Framework",
            "Business Impact Articulation",
        ],
    },
    MarkerRule {
        marker_id: "stakeholder_communication_evolution",
        competency: Competency::StakeholderManagement,
        target: 75,
        focus: "Cross-functional Stakeholder Communication",
        examples: &[
            "Tailor updates to each stakeholder group",
            "Confirm alignment before decisions",
        ],
        modules: &["Stakeholder Management", "Executive Communication"],
    },
];

const SENIOR_RULES: [MarkerRule; 2] = [
    MarkerRule {
        marker_id: "executive_communication_structure",
        competency: Competency::Communication,
        target: 80,
        focus: "Answer-First Executive Communication",
        examples: &[
            "Lead with the recommendation",
            "Close with a clear ask",
            "Summarize in three main points",
        ],
        modules: &["Executive Communication", "Structured Recommendations"],
    },
    MarkerRule {
        marker_id: "influence_without_authority",
        competency: Competency::StakeholderManagement,
        target: 75,
        focus: "Influence Without Authority",
        examples: &[
            "Align partner teams on shared goals",
            "Persuade with data rather than position",
        ],
        modules: &["Influence Without Authority", "Stakeholder Alignment"],
    },
];

const STAFF_RULES: [MarkerRule; 2] = [
    MarkerRule {
        marker_id: "portfolio_thinking_language",
        competency: Competency::ProductSense,
        target: 80,
        focus: "Portfolio-Level Thinking",
        examples: &[
            "Compare investments across products",
            "Describe the portfolio balance",
        ],
        modules: &["Portfolio Strategy", "Prioritization at Scale"],
    },
    MarkerRule {
        marker_id: "coaching_communication_emergence",
        competency: Competency::StakeholderManagement,
        target: 75,
        focus: "Coaching Communication",
        examples: &[
            "Ask questions before giving answers",
            "Frame feedback around growth",
        ],
        modules: &["Coaching Conversations", "Team Development"],
    },
];

const PRINCIPAL_RULES: [MarkerRule; 2] = [
    MarkerRule {
        marker_id: "business_model_fluency",
        competency: Competency::BusinessImpact,
        target: 80,
        focus: "Business Model Fluency",
        examples: &[
            "Connect roadmap items to unit economics",
            "Quantify margin impact",
        ],
        modules: &["Business Model Communication", "P&L Storytelling"],
    },
    MarkerRule {
        marker_id: "board_presentation_readiness",
        competency: Competency::Communication,
        target: 80,
        focus: "Board Presentation Readiness",
        examples: &[
            "Open with the decision needed",
            "Anticipate governance questions",
        ],
        modules: &["Board Communication", "Executive Narrative"],
    },
];

const DIRECTOR_RULES: [MarkerRule; 2] = [
    MarkerRule {
        marker_id: "enterprise_strategy",
        competency: Competency::BusinessImpact,
        target: 80,
        focus: "Enterprise Strategy Communication",
        examples: &[
            "Frame product bets as company bets",
            "Tie plans to enterprise outcomes",
        ],
        modules: &["Enterprise Strategy", "Capital Allocation Narratives"],
    },
    MarkerRule {
        marker_id: "external_narrative",
        competency: Competency::Communication,
        target: 75,
        focus: "External Narrative",
        examples: &[
            "Rehearse the investor story",
            "Position the product against the market",
        ],
        modules: &["Investor Communication", "Market Narrative"],
    },
];

fn marker_rules(pair: CareerPair) -> &'static [MarkerRule] {
    match pair.current {
        CareerLevel::Ic => &IC_RULES,
        CareerLevel::Senior => &SENIOR_RULES,
        CareerLevel::Staff => &STAFF_RULES,
        CareerLevel::Principal => &PRINCIPAL_RULES,
        CareerLevel::Director | CareerLevel::Vp => &DIRECTOR_RULES,
    }
}

/// Competencies that are critical for a career-level pair
pub fn critical_competencies(pair: CareerPair) -> [Competency; 2] {
    match pair.current {
        CareerLevel::Ic => [Competency::Communication, Competency::BusinessImpact],
        CareerLevel::Senior => [Competency::Communication, Competency::StakeholderManagement],
        CareerLevel::Staff => [Competency::ProductSense, Competency::StakeholderManagement],
        CareerLevel::Principal => [Competency::BusinessImpact, Competency::Communication],
        CareerLevel::Director | CareerLevel::Vp => {
            [Competency::BusinessImpact, Competency::StakeholderManagement]
        }
    }
}

const INDUSTRY_TARGET: u32 = 85;
const STANDARDS_TARGET: u32 = 75;
const MEETING_TARGET: u32 = 80;
const PRESENCE_TARGET: u32 = 80;
/// Presence categories with a strongest marker below this count as weak
const WEAK_PRESENCE_MARKER: u32 = 65;

struct Builder<'a> {
    ctx: &'a AnalysisContext,
    gap_high: u32,
    critical: [Competency; 2],
    out: Vec<ImprovementArea>,
}

impl Builder<'_> {
    fn push(
        &mut self,
        competency: Competency,
        focus: impl Into<String>,
        current: u32,
        target: u32,
        examples: &[&str],
        modules: &[&str],
    ) {
        if !self.ctx.in_focus(competency) {
            return;
        }

        let gap = target.saturating_sub(current);
        let priority = if gap >= self.gap_high || self.critical.contains(&competency) {
            Priority::High
        } else {
            Priority::Medium
        };

        self.out.push(
            ImprovementArea::new(competency, focus, current, target, priority)
                .with_examples(examples)
                .with_modules(modules),
        );
    }
}

pub(super) fn extract(
    reports: &DetectionReports,
    ctx: &AnalysisContext,
    t: &ThresholdSettings,
) -> Vec<ImprovementArea> {
    let mut b = Builder {
        ctx,
        gap_high: t.improvement_gap_high,
        critical: critical_competencies(ctx.pair),
        out: Vec::new(),
    };

    for rule in marker_rules(ctx.pair) {
        let current = reports
            .transition
            .marker(rule.marker_id)
            .map(|m| m.confidence)
            .unwrap_or(0);
        if current < t.marker_improvement {
            b.push(
                rule.competency,
                rule.focus,
                current,
                rule.target,
                rule.examples,
                rule.modules,
            );
        }
    }

    let industry = &reports.industry;
    if industry.vocabulary.usage < t.industry_usage {
        b.push(
            Competency::BusinessImpact,
            format!("{} Vocabulary Fluency", industry.industry.label()),
            industry.vocabulary.usage,
            INDUSTRY_TARGET,
            &[
                "Use sector terminology precisely",
                "Reference industry benchmarks",
            ],
            &["Industry Communication", "Sector-Specific Frameworks"],
        );
    }
    if industry.benchmark.competitive_position.needs_improvement() {
        b.push(
            Competency::Communication,
            "Industry Communication Standards",
            industry.benchmark.user_percentile,
            STANDARDS_TARGET,
            &["Match the vocabulary of industry leaders"],
            &["Industry Standards", "Professional Communication"],
        );
    }

    let meeting = &reports.meeting;
    if meeting.effectiveness < t.meeting_improvement {
        b.push(
            Competency::StakeholderManagement,
            format!("{} Effectiveness", meeting.meeting_type.label()),
            meeting.effectiveness,
            MEETING_TARGET,
            &[
                "Adapt the message to the audience in the room",
                "Use the structure this meeting type expects",
            ],
            &["Meeting Leadership", "Audience Adaptation"],
        );
    }

    let presence = &reports.presence;
    let weak_category = [
        PresenceCategory::Authority,
        PresenceCategory::Clarity,
        PresenceCategory::Conviction,
        PresenceCategory::Composure,
    ]
    .into_iter()
    .any(|c| {
        presence
            .strongest_in(c)
            .map_or(true, |m| m.strength() < WEAK_PRESENCE_MARKER)
    });
    if presence.overall_score < t.presence_improvement && weak_category {
        b.push(
            Competency::Communication,
            "Executive Presence Development",
            presence.overall_score,
            PRESENCE_TARGET,
            &[
                "State positions with conviction",
                "Take ownership of outcomes",
            ],
            &["Executive Presence", "Leadership Communication"],
        );
    }

    b.out
}
