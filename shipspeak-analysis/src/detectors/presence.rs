//! Executive-presence detector
//!
//! Four sub-analyses feed one overall presence score:
//! - presence markers (authority, clarity, conviction, composure)
//! - leadership-language sophistication, adjusted for career level
//! - influence techniques with effectiveness tiers
//! - confidence indicators with impact tiers

use super::marker::{mean_or_zero, Curve, MarkerSpec};
use super::text_scan::TranscriptScan;
use super::{DetectorError, DetectorFamily, FamilyReport, PatternDetector};
use crate::aggregator::{aggregate, score_map, WeightVector};
use crate::types::{AnalysisContext, CareerLevel, DetectionResult, MeetingType};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceCategory {
    Authority,
    Clarity,
    Conviction,
    Composure,
}

const fn authority(id: &'static str, label: &'static str, terms: &'static [&'static str]) -> MarkerSpec {
    MarkerSpec::generic(id, label, terms).with_confidence(15, 95)
}

const fn clarity(id: &'static str, label: &'static str, terms: &'static [&'static str]) -> MarkerSpec {
    MarkerSpec::generic(id, label, terms).with_confidence(12, 90)
}

const fn conviction(id: &'static str, label: &'static str, terms: &'static [&'static str]) -> MarkerSpec {
    MarkerSpec::generic(id, label, terms).with_confidence(18, 95)
}

const fn composure(id: &'static str, label: &'static str, terms: &'static [&'static str]) -> MarkerSpec {
    MarkerSpec::generic(id, label, terms).with_confidence(15, 90)
}

const CRISIS_COMPOSURE: Curve = Curve::new(20, 95);

const PRESENCE_MARKERS: [(PresenceCategory, MarkerSpec); 16] = [
    (
        PresenceCategory::Authority,
        authority(
            "decisive_language",
            "Decisive Language",
            &["will implement", "decide", "commit to", "proceed with", "directive"],
        ),
    ),
    (
        PresenceCategory::Authority,
        authority(
            "framework_references",
            "Framework References",
            &["RICE", "ICE", "OKR", "SMART", "framework", "methodology"],
        ),
    ),
    (
        PresenceCategory::Authority,
        authority(
            "strategic_positioning",
            "Strategic Positioning",
            &["strategy", "roadmap", "vision", "competitive advantage"],
        ),
    ),
    (
        PresenceCategory::Authority,
        authority(
            "ownership_statements",
            "Ownership Statements",
            &["I will", "my decision", "taking ownership", "accountable"],
        ),
    ),
    (
        PresenceCategory::Clarity,
        clarity(
            "clear_structure",
            "Clear Structure",
            &["first", "second", "third", "in summary", "to conclude"],
        ),
    ),
    (
        PresenceCategory::Clarity,
        clarity(
            "specific_examples",
            "Specific Examples",
            &["for example", "specifically", "concrete case", "instance"],
        ),
    ),
    (
        PresenceCategory::Clarity,
        clarity(
            "process_definition",
            "Process Definition",
            &["process", "workflow", "steps", "procedure", "approach"],
        ),
    ),
    (
        PresenceCategory::Clarity,
        clarity(
            "clear_communication",
            "Clear Communication",
            &["clarify", "explain", "understand", "obvious", "evident"],
        ),
    ),
    (
        PresenceCategory::Conviction,
        conviction(
            "confident_assertions",
            "Confident Assertions",
            &["confident", "certain", "believe", "convinced", "strong evidence"],
        ),
    ),
    (
        PresenceCategory::Conviction,
        conviction(
            "definitive_statements",
            "Definitive Statements",
            &["absolutely", "definitely", "clearly", "without doubt"],
        ),
    ),
    (
        PresenceCategory::Conviction,
        conviction(
            "solution_orientation",
            "Solution Orientation",
            &["solution", "resolve", "address", "fix", "improve"],
        ),
    ),
    (
        PresenceCategory::Conviction,
        conviction(
            "growth_language",
            "Growth Language",
            &["opportunity", "potential", "growth", "optimize", "enhance"],
        ),
    ),
    (
        PresenceCategory::Composure,
        composure(
            "diplomatic_language",
            "Diplomatic Language",
            &["appreciate", "understand your perspective", "respect"],
        ),
    ),
    (
        PresenceCategory::Composure,
        composure(
            "measured_responses",
            "Measured Responses",
            &["consider", "evaluate", "assess", "thoughtful approach"],
        ),
    ),
    (
        PresenceCategory::Composure,
        composure(
            "conflict_resolution",
            "Conflict Resolution",
            &["common ground", "alignment", "consensus", "compromise"],
        ),
    ),
    (
        PresenceCategory::Composure,
        composure(
            "professional_tone",
            "Professional Tone",
            &["professional", "appropriate", "constructive", "positive"],
        ),
    ),
];

const STRATEGIC_LANGUAGE: &[&str] = &[
    "strategic",
    "roadmap",
    "vision",
    "long-term",
    "competitive",
    "market",
    "positioning",
    "initiative",
    "portfolio",
    "platform",
    "ecosystem",
    "transformation",
    "differentiation",
    "value prop",
    "competitive advantage",
    "moat",
    "scale",
    "growth",
    "expand",
    "optimize",
    "efficiency",
    "leverage",
];

const TECHNICAL_LANGUAGE: &[&str] = &[
    "architecture",
    "infrastructure",
    "scalability",
    "performance",
    "integration",
    "API",
    "database",
    "cloud",
    "security",
    "analytics",
    "metrics",
    "algorithm",
    "data structure",
    "optimization",
    "latency",
    "throughput",
    "microservices",
    "containers",
    "deployment",
    "CI/CD",
    "automation",
];

const STAKEHOLDER_LANGUAGE: &[&str] = &[
    "stakeholder",
    "customer",
    "user",
    "executive",
    "leadership",
    "team",
    "alignment",
    "consensus",
    "buy-in",
    "support",
    "engagement",
    "communication",
    "feedback",
    "concerns",
    "expectations",
    "requirements",
    "cross-functional",
    "collaboration",
    "partnership",
    "coordination",
];

const BUSINESS_LANGUAGE: &[&str] = &[
    "revenue",
    "profit",
    "cost",
    "ROI",
    "conversion",
    "retention",
    "growth",
    "market share",
    "customer satisfaction",
    "NPS",
    "churn",
    "acquisition",
    "KPI",
    "metrics",
    "OKR",
    "target",
    "goal",
    "outcome",
    "results",
    "business case",
    "value",
    "impact",
    "opportunity",
    "risk",
    "investment",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfluenceTechnique {
    SocialProof,
    Authority,
    Consensus,
    Storytelling,
    DataDriven,
}

struct InfluenceSpec {
    technique: InfluenceTechnique,
    label: &'static str,
    terms: &'static [&'static str],
    strength: Curve,
    /// (MEDIUM at, HIGH at)
    thresholds: (u32, u32),
}

const INFLUENCE_TECHNIQUES: [InfluenceSpec; 5] = [
    InfluenceSpec {
        technique: InfluenceTechnique::SocialProof,
        label: "Social Proof",
        terms: &[
            "other companies",
            "industry standard",
            "best practice",
            "benchmark",
            "proven approach",
            "successful",
            "track record",
            "established",
            "widely adopted",
            "commonly used",
            "standard practice",
        ],
        strength: Curve::new(12, 90),
        thresholds: (2, 6),
    },
    InfluenceSpec {
        technique: InfluenceTechnique::Authority,
        label: "Authority",
        terms: &[
            "experience",
            "expertise",
            "background",
            "credentials",
            "qualified",
            "research shows",
            "studies indicate",
            "data suggests",
            "expert",
            "specialist",
            "authority",
            "leader in",
        ],
        strength: Curve::new(15, 95),
        thresholds: (3, 8),
    },
    InfluenceSpec {
        technique: InfluenceTechnique::Consensus,
        label: "Consensus Building",
        terms: &[
            "agree",
            "consensus",
            "alignment",
            "common ground",
            "shared",
            "together",
            "collaborative",
            "joint",
            "unified",
            "collective",
            "everyone",
            "all of us",
            "team",
            "group",
            "we all",
        ],
        strength: Curve::new(10, 85),
        thresholds: (4, 10),
    },
    InfluenceSpec {
        technique: InfluenceTechnique::Storytelling,
        label: "Storytelling",
        terms: &[
            "story",
            "example",
            "case",
            "situation",
            "experience",
            "instance",
            "imagine",
            "picture this",
            "think about",
            "scenario",
            "real world",
            "actual",
            "concrete",
        ],
        strength: Curve::new(8, 80),
        thresholds: (3, 7),
    },
    InfluenceSpec {
        technique: InfluenceTechnique::DataDriven,
        label: "Data-Driven Reasoning",
        terms: &[
            "data",
            "metrics",
            "numbers",
            "statistics",
            "analysis",
            "research",
            "evidence",
            "proof",
            "facts",
            "findings",
            "results",
            "insights",
            "percent",
            "increase",
            "decrease",
            "improved",
            "growth",
        ],
        strength: Curve::new(11, 90),
        thresholds: (5, 12),
    },
];

struct IndicatorSpec {
    label: &'static str,
    terms: &'static [&'static str],
    strength: Curve,
}

const CONFIDENCE_INDICATORS: [IndicatorSpec; 4] = [
    IndicatorSpec {
        label: "Vocal Confidence",
        terms: &[
            "clearly",
            "obviously",
            "definitely",
            "absolutely",
            "certainly",
            "confident",
            "sure",
            "positive",
            "convinced",
            "certain",
            "without doubt",
            "no question",
            "undoubtedly",
        ],
        strength: Curve::new(12, 90),
    },
    IndicatorSpec {
        label: "Decisiveness",
        terms: &[
            "decide",
            "decision",
            "choose",
            "select",
            "commit",
            "will proceed",
            "moving forward",
            "next step",
            "final",
            "conclude",
            "determine",
            "resolve",
        ],
        strength: Curve::new(15, 95),
    },
    IndicatorSpec {
        label: "Assertiveness",
        terms: &[
            "recommend",
            "suggest",
            "propose",
            "advise",
            "insist",
            "should",
            "must",
            "need to",
            "have to",
            "require",
            "important",
            "critical",
            "essential",
            "necessary",
        ],
        strength: Curve::new(10, 85),
    },
    IndicatorSpec {
        label: "Certainty",
        terms: &[
            "proven",
            "established",
            "verified",
            "confirmed",
            "validated",
            "fact",
            "evidence",
            "truth",
            "reality",
            "actual",
            "guarantee",
            "ensure",
            "promise",
            "deliver",
            "achieve",
        ],
        strength: Curve::new(13, 92),
    },
];

/// Presence marker with the category it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceMarker {
    pub category: PresenceCategory,
    #[serde(flatten)]
    pub result: DetectionResult,
}

impl PresenceMarker {
    pub fn strength(&self) -> u32 {
        self.result.confidence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipLanguage {
    pub strategic_language: u32,
    pub technical_depth: u32,
    pub stakeholder_awareness: u32,
    pub business_impact: u32,
    pub overall_sophistication: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencePattern {
    pub technique: InfluenceTechnique,
    pub label: String,
    pub strength: u32,
    pub frequency: u32,
    pub effectiveness: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceIndicator {
    pub indicator: String,
    pub strength: u32,
    pub frequency: u32,
    pub impact: Tier,
}

/// Executive-presence family output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutivePresenceAnalysis {
    /// Matched markers only, strongest first
    pub presence_markers: Vec<PresenceMarker>,
    pub leadership_language: LeadershipLanguage,
    pub influence_patterns: Vec<InfluencePattern>,
    pub confidence_indicators: Vec<ConfidenceIndicator>,
    pub overall_score: u32,
}

impl ExecutivePresenceAnalysis {
    /// Strongest matched marker in a category
    pub fn strongest_in(&self, category: PresenceCategory) -> Option<&PresenceMarker> {
        self.presence_markers.iter().find(|m| m.category == category)
    }
}

/// Confidence-indicator impact tier from match count
pub fn confidence_impact(frequency: u32) -> Tier {
    if frequency >= 8 {
        Tier::High
    } else if frequency >= 4 {
        Tier::Medium
    } else {
        Tier::Low
    }
}

fn influence_effectiveness(frequency: u32, (medium_at, high_at): (u32, u32)) -> Tier {
    if frequency >= high_at {
        Tier::High
    } else if frequency >= medium_at {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Executive-presence detector
#[derive(Debug, Default, Clone, Copy)]
pub struct ExecutivePresenceDetector;

impl ExecutivePresenceDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        scan: &TranscriptScan,
        level: CareerLevel,
        meeting_type: MeetingType,
    ) -> Result<ExecutivePresenceAnalysis, DetectorError> {
        let presence_markers = presence_markers(scan, meeting_type);
        let leadership_language = leadership_language(scan, level)?;
        let influence_patterns = influence_patterns(scan);
        let confidence_indicators = confidence_indicators(scan);

        let presence: Vec<f64> = presence_markers.iter().map(|m| f64::from(m.strength())).collect();
        let influence: Vec<f64> = influence_patterns.iter().map(|p| f64::from(p.strength)).collect();
        let confidence: Vec<f64> = confidence_indicators
            .iter()
            .map(|c| f64::from(c.strength))
            .collect();

        let overall = aggregate(
            &score_map([
                ("presence", mean_or_zero(&presence)),
                ("language", f64::from(leadership_language.overall_sophistication)),
                ("influence", mean_or_zero(&influence)),
                ("confidence", mean_or_zero(&confidence)),
            ]),
            &WeightVector::new(
                "executive_presence",
                [
                    ("presence", 0.3),
                    ("language", 0.25),
                    ("influence", 0.25),
                    ("confidence", 0.2),
                ],
            ),
        )?;

        debug!(
            markers = presence_markers.len(),
            influence = influence_patterns.len(),
            overall = overall.score,
            "Executive presence scored"
        );

        Ok(ExecutivePresenceAnalysis {
            presence_markers,
            leadership_language,
            influence_patterns,
            confidence_indicators,
            overall_score: overall.score,
        })
    }
}

fn presence_markers(scan: &TranscriptScan, meeting_type: MeetingType) -> Vec<PresenceMarker> {
    let mut markers: Vec<PresenceMarker> = PRESENCE_MARKERS
        .iter()
        .map(|(category, spec)| {
            let spec = if *category == PresenceCategory::Composure
                && meeting_type == MeetingType::CrisisCommunication
            {
                spec.with_confidence(CRISIS_COMPOSURE.per_match, CRISIS_COMPOSURE.cap)
            } else {
                *spec
            };
            PresenceMarker {
                category: *category,
                result: spec.evaluate(scan),
            }
        })
        .filter(|m| m.result.frequency > 0)
        .collect();

    // Stable: equal strengths keep table order
    markers.sort_by(|a, b| b.strength().cmp(&a.strength()));
    markers
}

fn leadership_language(
    scan: &TranscriptScan,
    level: CareerLevel,
) -> Result<LeadershipLanguage, DetectorError> {
    let scaled = |terms: &[&str], curve: Curve| f64::from(curve.apply(scan.count_terms(terms)));

    let strategic = scaled(STRATEGIC_LANGUAGE, Curve::new(8, 95));
    let technical = (f64::from(scan.count_terms(TECHNICAL_LANGUAGE))
        * 6.0
        * level.technical_depth_multiplier())
    .min(90.0);
    let stakeholder = scaled(STAKEHOLDER_LANGUAGE, Curve::new(7, 95));
    let business = scaled(BUSINESS_LANGUAGE, Curve::new(10, 95));

    let sophistication = aggregate(
        &score_map([
            ("strategic", strategic),
            ("technical", technical),
            ("stakeholder", stakeholder),
            ("business", business),
        ]),
        &WeightVector::new(
            "language_sophistication",
            [
                ("strategic", 0.3),
                ("technical", 0.2),
                ("stakeholder", 0.25),
                ("business", 0.25),
            ],
        ),
    )?;

    Ok(LeadershipLanguage {
        strategic_language: strategic.round() as u32,
        technical_depth: technical.round() as u32,
        stakeholder_awareness: stakeholder.round() as u32,
        business_impact: business.round() as u32,
        overall_sophistication: sophistication.score,
    })
}

fn influence_patterns(scan: &TranscriptScan) -> Vec<InfluencePattern> {
    let mut patterns: Vec<InfluencePattern> = INFLUENCE_TECHNIQUES
        .iter()
        .filter_map(|spec| {
            let frequency = scan.count_terms(spec.terms);
            let strength = spec.strength.apply(frequency);
            (strength > 0).then(|| InfluencePattern {
                technique: spec.technique,
                label: spec.label.to_string(),
                strength,
                frequency,
                effectiveness: influence_effectiveness(frequency, spec.thresholds),
            })
        })
        .collect();

    patterns.sort_by(|a, b| b.strength.cmp(&a.strength));
    patterns
}

fn confidence_indicators(scan: &TranscriptScan) -> Vec<ConfidenceIndicator> {
    CONFIDENCE_INDICATORS
        .iter()
        .filter_map(|spec| {
            let frequency = scan.count_terms(spec.terms);
            let strength = spec.strength.apply(frequency);
            (strength > 0).then(|| ConfidenceIndicator {
                indicator: spec.label.to_string(),
                strength,
                frequency,
                impact: confidence_impact(frequency),
            })
        })
        .collect()
}

impl PatternDetector for ExecutivePresenceDetector {
    fn name(&self) -> &'static str {
        "executive_presence"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Presence
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        self.analyze(scan, ctx.current_level(), ctx.meeting_type)
            .map(FamilyReport::Presence)
    }
}
