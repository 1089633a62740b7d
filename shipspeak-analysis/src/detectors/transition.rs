//! Transition-readiness detector
//!
//! Scores the transcript against the five marker sets of the evaluated
//! career-level pair, combines them into an equal-weight progress score,
//! and reports the blocker / accelerator signals for that pair.

use super::marker::MarkerSpec;
use super::text_scan::TranscriptScan;
use super::{DetectorError, DetectorFamily, FamilyReport, PatternDetector};
use crate::aggregator::{aggregate, ScoreMap, WeightVector};
use crate::types::{AnalysisContext, CareerLevel, CareerPair, DetectionResult, Priority};
use serde::{Deserialize, Serialize};
use tracing::debug;

const IC_TO_SENIOR: [MarkerSpec; 5] = [
    MarkerSpec::generic(
        "strategic_language_emergence",
        "Strategic Language Emergence",
        &[
            "strategy",
            "strategic",
            "long-term",
            "vision",
            "roadmap",
            "competitive advantage",
            "revenue",
            "market share",
            "customer value",
            "ROI",
            "business impact",
        ],
    )
    .with_confidence(15, 100)
    .with_benchmark(12, 95)
    .with_detect_min(4)
    .with_trend(5, 2),
    MarkerSpec::generic(
        "business_impact_reasoning",
        "Business Impact Reasoning",
        &[
            "customer",
            "user",
            "revenue",
            "cost",
            "efficiency",
            "value",
            "outcome",
            "business impact",
        ],
    )
    .with_companion(
        &["because", "therefore", "as a result", "this leads to", "which means"],
        2,
    )
    .with_confidence(12, 100)
    .with_benchmark(10, 90)
    .with_detect_min(3)
    .with_trend(6, 0),
    MarkerSpec::generic(
        "stakeholder_communication_evolution",
        "Stakeholder Communication Evolution",
        &["stakeholder", "alignment", "communication"],
    ),
    MarkerSpec::generic(
        "decision_framework_application",
        "Decision Framework Application",
        &["decision", "criteria", "framework"],
    ),
    MarkerSpec::generic(
        "delivery_to_outcomes_shift",
        "Delivery to Outcomes Shift",
        &["outcome", "result", "impact"],
    ),
];

const SENIOR_TO_STAFF: [MarkerSpec; 5] = [
    MarkerSpec::generic(
        "executive_communication_structure",
        "Executive Communication Structure",
        &[
            "recommend",
            "conclusion",
            "bottom line",
            "key takeaway",
            "three main points",
            "in summary",
            "to conclude",
        ],
    )
    .with_confidence(25, 100)
    .with_benchmark(20, 85),
    MarkerSpec::generic(
        "tradeoff_articulation",
        "Tradeoff Articulation Sophistication",
        &["tradeoff", "trade-off", "balance"],
    ),
    MarkerSpec::generic(
        "influence_without_authority",
        "Influence Without Authority",
        &["influence", "persuade", "align"],
    ),
    MarkerSpec::generic(
        "strategic_altitude_control",
        "Strategic Altitude Control",
        &["strategic", "high-level", "zoom out"],
    ),
    MarkerSpec::generic(
        "framework_mastery",
        "Framework Mastery",
        &["RICE", "ICE", "OKR", "KPI", "North Star", "Jobs to be Done", "SWOT"],
    )
    .with_confidence(30, 100)
    .with_benchmark(25, 95),
];

const STAFF_TO_PRINCIPAL: [MarkerSpec; 5] = [
    MarkerSpec::generic(
        "portfolio_thinking_language",
        "Portfolio Thinking Language",
        &["portfolio", "products", "prioritization"],
    ),
    MarkerSpec::generic(
        "coaching_communication_emergence",
        "Coaching Communication Emergence",
        &["coaching", "mentoring", "development"],
    ),
    MarkerSpec::generic(
        "organizational_impact_awareness",
        "Organizational Impact Awareness",
        &["organization", "team", "department"],
    ),
    MarkerSpec::generic(
        "resource_allocation_reasoning",
        "Resource Allocation Reasoning",
        &["resources", "headcount", "budget"],
    ),
    MarkerSpec::generic(
        "cross_product_strategy",
        "Cross-Product Strategy",
        &["cross-product", "platform", "ecosystem"],
    ),
];

const PRINCIPAL_TO_DIRECTOR: [MarkerSpec; 5] = [
    MarkerSpec::generic(
        "board_presentation_readiness",
        "Board Presentation Readiness",
        &["board", "executive", "leadership"],
    ),
    MarkerSpec::generic(
        "business_model_fluency",
        "Business Model Fluency",
        &["business model", "monetization", "P&L"],
    ),
    MarkerSpec::generic(
        "market_strategy_communication",
        "Market Strategy Communication",
        &["market", "competitive", "positioning"],
    ),
    MarkerSpec::generic(
        "organizational_leadership",
        "Organizational Leadership",
        &["leadership", "vision", "culture"],
    ),
    MarkerSpec::generic(
        "vision_communication",
        "Vision Communication",
        &["vision", "future", "direction"],
    ),
];

const DIRECTOR_TO_VP: [MarkerSpec; 5] = [
    MarkerSpec::generic(
        "enterprise_strategy",
        "Enterprise Strategy",
        &["enterprise strategy", "company-wide", "long-range"],
    ),
    MarkerSpec::generic(
        "capital_allocation",
        "Capital Allocation",
        &["capital allocation", "investment thesis", "return on investment"],
    ),
    MarkerSpec::generic(
        "board_governance",
        "Board Governance",
        &["board", "governance", "fiduciary"],
    ),
    MarkerSpec::generic(
        "executive_team_building",
        "Executive Team Building",
        &["executive team", "hiring leaders", "succession"],
    ),
    MarkerSpec::generic(
        "external_narrative",
        "External Narrative",
        &["investors", "analysts", "press", "market narrative"],
    ),
];

/// Critical marker below `below` → blocker
struct BlockerRule {
    marker_id: &'static str,
    below: u32,
    id: &'static str,
    label: &'static str,
    severity: Priority,
    steps: &'static [&'static str],
}

/// Accelerator marker above `above` → accelerator
struct AcceleratorRule {
    marker_id: &'static str,
    above: u32,
    id: &'static str,
    label: &'static str,
    leverage: &'static [&'static str],
}

struct PairRules {
    markers: &'static [MarkerSpec; 5],
    blocker: BlockerRule,
    accelerator: AcceleratorRule,
}

fn rules_for(pair: CareerPair) -> PairRules {
    match pair.current {
        CareerLevel::Ic => PairRules {
            markers: &IC_TO_SENIOR,
            blocker: BlockerRule {
                marker_id: "strategic_language_emergence",
                below: 60,
                id: "FEATURE_FOCUSED_THINKING",
                label: "Feature-Focused Thinking",
                severity: Priority::Medium,
                steps: &["Practice outcome-focused language", "Use business impact framing"],
            },
            accelerator: AcceleratorRule {
                marker_id: "decision_framework_application",
                above: 80,
                id: "FRAMEWORK_MASTERY",
                label: "Framework Mastery",
                leverage: &["Teach frameworks to team", "Lead framework adoption"],
            },
        },
        CareerLevel::Senior => PairRules {
            markers: &SENIOR_TO_STAFF,
            blocker: BlockerRule {
                marker_id: "executive_communication_structure",
                below: 60,
                id: "BURIED_RECOMMENDATION",
                label: "Buried Recommendations",
                severity: Priority::Medium,
                steps: &["Lead with the recommendation", "Close with a clear ask"],
            },
            accelerator: AcceleratorRule {
                marker_id: "framework_mastery",
                above: 80,
                id: "EXECUTIVE_FRAMEWORK_FLUENCY",
                label: "Executive Framework Fluency",
                leverage: &[
                    "Run prioritization reviews with leadership",
                    "Coach peers on framework selection",
                ],
            },
        },
        CareerLevel::Staff => PairRules {
            markers: &STAFF_TO_PRINCIPAL,
            blocker: BlockerRule {
                marker_id: "portfolio_thinking_language",
                below: 60,
                id: "SINGLE_PRODUCT_FOCUS",
                label: "Single-Product Focus",
                severity: Priority::Medium,
                steps: &[
                    "Frame work across the product portfolio",
                    "Discuss cross-team prioritization",
                ],
            },
            accelerator: AcceleratorRule {
                marker_id: "coaching_communication_emergence",
                above: 80,
                id: "TEAM_MULTIPLIER",
                label: "Team Multiplier",
                leverage: &[
                    "Formalize mentoring across teams",
                    "Sponsor emerging product leaders",
                ],
            },
        },
        CareerLevel::Principal => PairRules {
            markers: &PRINCIPAL_TO_DIRECTOR,
            blocker: BlockerRule {
                marker_id: "business_model_fluency",
                below: 60,
                id: "OPERATIONAL_ALTITUDE",
                label: "Operational Altitude",
                severity: Priority::High,
                steps: &[
                    "Connect proposals to the business model",
                    "Quantify P&L impact",
                ],
            },
            accelerator: AcceleratorRule {
                marker_id: "vision_communication",
                above: 80,
                id: "VISION_CLARITY",
                label: "Vision Clarity",
                leverage: &[
                    "Present product vision to executives",
                    "Author the annual strategy narrative",
                ],
            },
        },
        // VP has no next level; CareerPair construction rejects it
        CareerLevel::Director | CareerLevel::Vp => PairRules {
            markers: &DIRECTOR_TO_VP,
            blocker: BlockerRule {
                marker_id: "enterprise_strategy",
                below: 60,
                id: "FUNCTIONAL_LENS",
                label: "Functional Lens",
                severity: Priority::Medium,
                steps: &[
                    "Frame decisions at company level",
                    "Tie plans to enterprise outcomes",
                ],
            },
            accelerator: AcceleratorRule {
                marker_id: "external_narrative",
                above: 80,
                id: "MARKET_VOICE",
                label: "Market Voice",
                leverage: &[
                    "Represent the company with investors and press",
                    "Shape the external product narrative",
                ],
            },
        },
    }
}

/// Signal holding the user back from the target level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBlocker {
    pub id: String,
    pub label: String,
    pub severity: Priority,
    pub marker_id: String,
    pub confidence: u32,
    pub steps: Vec<String>,
}

/// Signal that can be leveraged to move faster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionAccelerator {
    pub id: String,
    pub label: String,
    pub marker_id: String,
    pub confidence: u32,
    pub leverage: Vec<String>,
}

/// Transition-readiness family output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionAnalysis {
    pub pair: CareerPair,
    pub markers: Vec<DetectionResult>,
    /// Equal-weight aggregate of marker confidences (0-100)
    pub progress_score: u32,
    pub blockers: Vec<TransitionBlocker>,
    pub accelerators: Vec<TransitionAccelerator>,
}

impl TransitionAnalysis {
    pub fn marker(&self, id: &str) -> Option<&DetectionResult> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Blocker with the lowest underlying confidence
    pub fn weakest_blocker(&self) -> Option<&TransitionBlocker> {
        self.blockers.iter().min_by_key(|b| b.confidence)
    }
}

/// Marker specs evaluated for a pair
pub fn markers_for(pair: CareerPair) -> &'static [MarkerSpec] {
    rules_for(pair).markers
}

/// Transition-readiness detector
#[derive(Debug, Default, Clone, Copy)]
pub struct TransitionDetector;

impl TransitionDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        scan: &TranscriptScan,
        pair: CareerPair,
    ) -> Result<TransitionAnalysis, DetectorError> {
        let rules = rules_for(pair);
        let markers: Vec<DetectionResult> =
            rules.markers.iter().map(|spec| spec.evaluate(scan)).collect();

        let scores: ScoreMap = markers
            .iter()
            .map(|m| (m.id.clone(), f64::from(m.confidence)))
            .collect();
        let weights = WeightVector::equal("progress", markers.iter().map(|m| m.id.clone()));
        let progress = aggregate(&scores, &weights)?;

        let confidence_of = |id: &str| {
            markers
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.confidence)
                .unwrap_or(0)
        };

        let mut blockers = Vec::new();
        let blocker_confidence = confidence_of(rules.blocker.marker_id);
        if blocker_confidence < rules.blocker.below {
            blockers.push(TransitionBlocker {
                id: rules.blocker.id.to_string(),
                label: rules.blocker.label.to_string(),
                severity: rules.blocker.severity,
                marker_id: rules.blocker.marker_id.to_string(),
                confidence: blocker_confidence,
                steps: rules.blocker.steps.iter().map(|s| s.to_string()).collect(),
            });
        }

        let mut accelerators = Vec::new();
        let accelerator_confidence = confidence_of(rules.accelerator.marker_id);
        if accelerator_confidence > rules.accelerator.above {
            accelerators.push(TransitionAccelerator {
                id: rules.accelerator.id.to_string(),
                label: rules.accelerator.label.to_string(),
                marker_id: rules.accelerator.marker_id.to_string(),
                confidence: accelerator_confidence,
                leverage: rules.accelerator.leverage.iter().map(|s| s.to_string()).collect(),
            });
        }

        debug!(
            pair = %pair.label(),
            progress_score = progress.score,
            blockers = blockers.len(),
            accelerators = accelerators.len(),
            "Transition markers scored"
        );

        Ok(TransitionAnalysis {
            pair,
            markers,
            progress_score: progress.score,
            blockers,
            accelerators,
        })
    }
}

impl PatternDetector for TransitionDetector {
    fn name(&self) -> &'static str {
        "transition_readiness"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Transition
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        self.analyze(scan, ctx.pair).map(FamilyReport::Transition)
    }
}
