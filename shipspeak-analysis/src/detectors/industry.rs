//! Industry-vocabulary detector
//!
//! Five vocabulary markers per industry, a vocabulary-fluency summary
//! (usage, contextual appropriateness, sophistication, credibility),
//! regulatory compliance findings and a coarse competitive position.

use super::marker::{mean_or_zero, MarkerSpec};
use super::text_scan::TranscriptScan;
use super::{DetectorError, DetectorFamily, FamilyReport, PatternDetector};
use crate::aggregator::{aggregate, score_map, WeightVector};
use crate::types::{AnalysisContext, DetectionResult, Industry};
use serde::{Deserialize, Serialize};
use tracing::debug;

const HEALTHCARE: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "regulatory_language_proficiency",
        "Regulatory Language Proficiency",
        &["FDA", "HIPAA", "clinical trial", "regulatory", "compliance", "safety", "efficacy"],
    ),
    MarkerSpec::vocabulary(
        "patient_outcome_prioritization",
        "Patient Outcome Prioritization",
        &["patient", "outcome", "safety", "care", "treatment", "health"],
    ),
    MarkerSpec::vocabulary(
        "evidence_based_reasoning",
        "Evidence-Based Reasoning",
        &["evidence", "clinical data", "study", "research", "trial", "peer review"],
    ),
    MarkerSpec::vocabulary(
        "compliance_framework_usage",
        "Compliance Framework Usage",
        &["regulation", "guideline", "standard", "requirement", "protocol"],
    ),
    MarkerSpec::vocabulary(
        "clinical_evidence_integration",
        "Clinical Evidence Integration",
        &["evidence shows", "data indicates", "studies demonstrate", "research confirms"],
    ),
];

const CYBERSECURITY: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "risk_communication_effectiveness",
        "Risk Communication Effectiveness",
        &["risk", "threat", "vulnerability", "exposure", "attack vector", "security posture"],
    ),
    MarkerSpec::vocabulary(
        "technical_translation_competency",
        "Technical Translation Competency",
        &["encryption", "authentication", "authorization", "zero trust", "firewall", "endpoint"],
    ),
    MarkerSpec::vocabulary(
        "compliance_framework_integration",
        "Compliance Framework Integration",
        &["SOC 2", "ISO 27001", "GDPR", "compliance", "audit", "control"],
    ),
    MarkerSpec::vocabulary(
        "zero_trust_architecture",
        "Zero Trust Architecture",
        &["zero trust", "least privilege", "micro-segmentation", "identity verification"],
    ),
    MarkerSpec::vocabulary(
        "threat_assessment_articulation",
        "Threat Assessment Articulation",
        &["threat assessment", "risk evaluation", "vulnerability analysis", "security assessment"],
    ),
];

const FINTECH: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "regulatory_compliance_communication",
        "Regulatory Compliance Communication",
        &["SEC", "banking regulation", "financial regulation", "KYC", "AML", "compliance"],
    ),
    MarkerSpec::vocabulary(
        "risk_management_integration",
        "Risk Management Integration",
        &["financial risk", "credit risk", "operational risk", "fraud", "risk management"],
    ),
    MarkerSpec::vocabulary(
        "trust_building_language",
        "Trust Building Language",
        &["trust", "security", "privacy", "transparency", "reliability"],
    ),
    MarkerSpec::vocabulary(
        "audit_readiness",
        "Audit Readiness",
        &["audit", "regulatory reporting", "compliance", "financial controls"],
    ),
    MarkerSpec::vocabulary(
        "financial_impact_articulation",
        "Financial Impact Articulation",
        &["financial impact", "cost-benefit", "revenue impact", "P&L", "budget"],
    ),
];

const ENTERPRISE: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "roi_communication_competency",
        "ROI Communication Competency",
        &["ROI", "return on investment", "business value", "cost savings", "efficiency"],
    ),
    MarkerSpec::vocabulary(
        "implementation_planning",
        "Implementation Planning",
        &["implementation", "deployment", "rollout", "change management"],
    ),
    MarkerSpec::vocabulary(
        "customer_advocacy_development",
        "Customer Advocacy Development",
        &["customer success", "customer advocacy", "reference", "case study"],
    ),
    MarkerSpec::vocabulary(
        "enterprise_sales_support",
        "Enterprise Sales Support",
        &["enterprise sales", "deal support", "stakeholder management"],
    ),
    MarkerSpec::vocabulary(
        "change_management_communication",
        "Change Management Communication",
        &["change management", "transformation", "adoption", "training", "communication plan"],
    ),
];

const CONSUMER: [MarkerSpec; 5] = [
    MarkerSpec::vocabulary(
        "user_experience_communication",
        "User Experience Communication",
        &["user experience", "UX", "usability", "user research", "design", "interface"],
    ),
    MarkerSpec::vocabulary(
        "growth_metrics_fluency",
        "Growth Metrics Fluency",
        &["DAU", "MAU", "retention", "churn", "engagement", "viral", "growth"],
    ),
    MarkerSpec::vocabulary(
        "rapid_iteration_framework",
        "Rapid Iteration Framework",
        &["A/B test", "experiment", "iteration", "MVP", "rapid prototyping"],
    ),
    MarkerSpec::vocabulary(
        "platform_thinking",
        "Platform Thinking",
        &["platform", "ecosystem", "network effects", "marketplace"],
    ),
    MarkerSpec::vocabulary(
        "behavioral_psychology_integration",
        "Behavioral Psychology Integration",
        &["user behavior", "behavioral psychology", "cognitive load", "motivation", "habit formation"],
    ),
];

pub const INDUSTRY_AVERAGE: u32 = 68;
pub const TOP_PERFORMERS: u32 = 87;

/// Static per-industry dispatch table
struct IndustryProfile {
    markers: &'static [MarkerSpec; 5],
    vocabulary: &'static [&'static str],
    /// Marker whose matches surface the compliance finding
    compliance: Option<ComplianceRule>,
}

struct ComplianceRule {
    marker_id: &'static str,
    framework: &'static str,
    adherence_level: u32,
    risk_areas: &'static [&'static str],
    strength_areas: &'static [&'static str],
}

fn profile(industry: Industry) -> IndustryProfile {
    match industry {
        Industry::Healthcare => IndustryProfile {
            markers: &HEALTHCARE,
            vocabulary: &[
                "FDA",
                "HIPAA",
                "clinical",
                "patient",
                "regulatory",
                "safety",
                "efficacy",
                "treatment",
            ],
            compliance: Some(ComplianceRule {
                marker_id: "regulatory_language_proficiency",
                framework: "HIPAA Compliance",
                adherence_level: 78,
                risk_areas: &["Data handling discussions", "Patient information references"],
                strength_areas: &["Privacy awareness", "Security protocols"],
            }),
        },
        Industry::Cybersecurity => IndustryProfile {
            markers: &CYBERSECURITY,
            vocabulary: &[
                "security",
                "threat",
                "vulnerability",
                "encryption",
                "compliance",
                "risk",
                "audit",
            ],
            compliance: Some(ComplianceRule {
                marker_id: "compliance_framework_integration",
                framework: "SOC 2 Controls",
                adherence_level: 82,
                risk_areas: &["Access control procedures"],
                strength_areas: &["Security frameworks", "Risk assessment"],
            }),
        },
        Industry::Fintech => IndustryProfile {
            markers: &FINTECH,
            vocabulary: &[
                "financial",
                "regulation",
                "compliance",
                "risk",
                "fraud",
                "KYC",
                "AML",
                "banking",
            ],
            compliance: Some(ComplianceRule {
                marker_id: "regulatory_compliance_communication",
                framework: "Financial Regulations",
                adherence_level: 75,
                risk_areas: &["Consumer protection", "Data privacy"],
                strength_areas: &["Risk management", "Audit procedures"],
            }),
        },
        Industry::Enterprise => IndustryProfile {
            markers: &ENTERPRISE,
            vocabulary: &[
                "ROI",
                "implementation",
                "enterprise",
                "stakeholder",
                "business value",
                "deployment",
            ],
            compliance: None,
        },
        Industry::Consumer => IndustryProfile {
            markers: &CONSUMER,
            vocabulary: &[
                "user experience",
                "engagement",
                "retention",
                "growth",
                "A/B test",
                "platform",
                "UX",
            ],
            compliance: None,
        },
    }
}

/// Marker specs evaluated for an industry
pub fn markers_for(industry: Industry) -> &'static [MarkerSpec] {
    profile(industry).markers
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitivePosition {
    Leading,
    Competitive,
    Developing,
    Concerning,
}

impl CompetitivePosition {
    pub fn from_credibility(credibility: u32) -> Self {
        if credibility > 80 {
            CompetitivePosition::Leading
        } else if credibility > 65 {
            CompetitivePosition::Competitive
        } else if credibility > 50 {
            CompetitivePosition::Developing
        } else {
            CompetitivePosition::Concerning
        }
    }

    pub fn needs_improvement(self) -> bool {
        matches!(
            self,
            CompetitivePosition::Developing | CompetitivePosition::Concerning
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyFluency {
    /// Industry terms per thousand words, capped at 100
    pub usage: u32,
    pub contextual_appropriateness: u32,
    pub sophistication: u32,
    pub professional_credibility: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceFinding {
    pub framework: String,
    pub adherence_level: u32,
    pub risk_areas: Vec<String>,
    pub strength_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryBenchmark {
    pub industry_average: u32,
    pub top_performers: u32,
    pub user_percentile: u32,
    pub competitive_position: CompetitivePosition,
}

/// Industry-vocabulary family output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAnalysis {
    pub industry: Industry,
    pub markers: Vec<DetectionResult>,
    pub vocabulary: VocabularyFluency,
    pub compliance: Vec<ComplianceFinding>,
    pub benchmark: IndustryBenchmark,
}

impl IndustryAnalysis {
    /// Family dimension score (professional credibility)
    pub fn score(&self) -> u32 {
        self.vocabulary.professional_credibility
    }
}

/// Industry-vocabulary detector
#[derive(Debug, Default, Clone, Copy)]
pub struct IndustryDetector;

impl IndustryDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(
        &self,
        scan: &TranscriptScan,
        industry: Industry,
    ) -> Result<IndustryAnalysis, DetectorError> {
        let profile = profile(industry);
        let markers: Vec<DetectionResult> = profile
            .markers
            .iter()
            .map(|spec| spec.evaluate(scan))
            .collect();

        let vocabulary = vocabulary_fluency(scan, profile.vocabulary, &markers)?;

        let compliance = profile
            .compliance
            .iter()
            .filter(|rule| {
                markers
                    .iter()
                    .any(|m| m.id == rule.marker_id && m.frequency > 0)
            })
            .map(|rule| ComplianceFinding {
                framework: rule.framework.to_string(),
                adherence_level: rule.adherence_level,
                risk_areas: rule.risk_areas.iter().map(|s| s.to_string()).collect(),
                strength_areas: rule.strength_areas.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        let credibility = vocabulary.professional_credibility;
        let benchmark = IndustryBenchmark {
            industry_average: INDUSTRY_AVERAGE,
            top_performers: TOP_PERFORMERS,
            user_percentile: (f64::from(credibility) * 0.8).round() as u32,
            competitive_position: CompetitivePosition::from_credibility(credibility),
        };

        debug!(
            industry = %industry,
            usage = vocabulary.usage,
            credibility,
            position = ?benchmark.competitive_position,
            "Industry vocabulary scored"
        );

        Ok(IndustryAnalysis {
            industry,
            markers,
            vocabulary,
            compliance,
            benchmark,
        })
    }
}

/// Usage 0.3, contextual appropriateness 0.4, sophistication 0.3
pub fn credibility_weights() -> WeightVector {
    WeightVector::new(
        "professional_credibility",
        [
            ("usage", 0.3),
            ("appropriateness", 0.4),
            ("sophistication", 0.3),
        ],
    )
}

fn vocabulary_fluency(
    scan: &TranscriptScan,
    vocabulary: &[&str],
    markers: &[DetectionResult],
) -> Result<VocabularyFluency, DetectorError> {
    let usage = if scan.word_count() == 0 {
        0.0
    } else {
        let terms = f64::from(scan.count_terms(vocabulary));
        (terms / scan.word_count() as f64 * 1000.0).min(100.0)
    };

    let confidences: Vec<f64> = markers.iter().map(|m| f64::from(m.confidence)).collect();
    let appropriateness = mean_or_zero(&confidences);

    let sophistication = if vocabulary.is_empty() {
        0.0
    } else {
        scan.distinct_terms_used(vocabulary) as f64 / vocabulary.len() as f64 * 100.0
    };

    let credibility = aggregate(
        &score_map([
            ("usage", usage),
            ("appropriateness", appropriateness),
            ("sophistication", sophistication),
        ]),
        &credibility_weights(),
    )?;

    Ok(VocabularyFluency {
        usage: usage.round() as u32,
        contextual_appropriateness: appropriateness.round() as u32,
        sophistication: sophistication.round() as u32,
        professional_credibility: credibility.score,
    })
}

impl PatternDetector for IndustryDetector {
    fn name(&self) -> &'static str {
        "industry_vocabulary"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Industry
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        Ok(FamilyReport::Industry(self.analyze(scan, ctx.industry)?))
    }
}
