//! Core types for transcript analysis
//!
//! Input records (transcript, request), the closed tag enums every detector
//! family dispatches on, the per-run `AnalysisContext`, and the
//! `DetectionResult` each detector produces.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tag enums
// ============================================================================

/// Closed tag enum with a canonical SCREAMING_SNAKE_CASE spelling
pub trait Tag: Copy + Sized + 'static {
    const ALL: &'static [Self];
    const KIND: &'static str;

    fn tag(self) -> &'static str;
}

/// Parse a tag leniently (case, `-` and spaces ignored)
///
/// Unknown tags are a configuration error carrying the closest known tag.
pub fn parse_tag<T: Tag>(raw: &str) -> Result<T> {
    let normalized = raw.trim().to_ascii_uppercase().replace(['-', ' '], "_");

    if let Some(found) = T::ALL.iter().copied().find(|t| t.tag() == normalized) {
        return Ok(found);
    }

    let suggestion = T::ALL
        .iter()
        .map(|t| (t.tag(), strsim::jaro_winkler(t.tag(), &normalized)))
        .filter(|(_, score)| *score >= 0.7)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(tag, _)| format!(" (did you mean {}?)", tag))
        .unwrap_or_default();

    Err(AnalysisError::Configuration(format!(
        "unknown {} '{}'{}",
        T::KIND,
        raw,
        suggestion
    )))
}

macro_rules! impl_tag_traits {
    ($ty:ty) => {
        impl FromStr for $ty {
            type Err = AnalysisError;

            fn from_str(s: &str) -> Result<Self> {
                parse_tag(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

/// Product-management career ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareerLevel {
    Ic,
    Senior,
    Staff,
    Principal,
    Director,
    Vp,
}

impl Tag for CareerLevel {
    const ALL: &'static [Self] = &[
        CareerLevel::Ic,
        CareerLevel::Senior,
        CareerLevel::Staff,
        CareerLevel::Principal,
        CareerLevel::Director,
        CareerLevel::Vp,
    ];
    const KIND: &'static str = "career level";

    fn tag(self) -> &'static str {
        match self {
            CareerLevel::Ic => "IC",
            CareerLevel::Senior => "SENIOR",
            CareerLevel::Staff => "STAFF",
            CareerLevel::Principal => "PRINCIPAL",
            CareerLevel::Director => "DIRECTOR",
            CareerLevel::Vp => "VP",
        }
    }
}

impl_tag_traits!(CareerLevel);

impl CareerLevel {
    /// Next rung up the ladder (VP has none)
    pub fn next(self) -> Option<CareerLevel> {
        match self {
            CareerLevel::Ic => Some(CareerLevel::Senior),
            CareerLevel::Senior => Some(CareerLevel::Staff),
            CareerLevel::Staff => Some(CareerLevel::Principal),
            CareerLevel::Principal => Some(CareerLevel::Director),
            CareerLevel::Director => Some(CareerLevel::Vp),
            CareerLevel::Vp => None,
        }
    }

    /// Months a typical candidate needs to reach this level from the rung below
    pub fn base_months_to_reach(self) -> u32 {
        match self {
            CareerLevel::Ic => 6,
            CareerLevel::Senior => 12,
            CareerLevel::Staff => 18,
            CareerLevel::Principal => 24,
            CareerLevel::Director => 30,
            CareerLevel::Vp => 36,
        }
    }

    /// Weight applied to technical-depth language (less expected higher up)
    pub fn technical_depth_multiplier(self) -> f64 {
        match self {
            CareerLevel::Ic => 1.0,
            CareerLevel::Senior => 0.8,
            CareerLevel::Staff => 0.6,
            CareerLevel::Principal => 0.4,
            CareerLevel::Director => 0.3,
            CareerLevel::Vp => 0.2,
        }
    }
}

/// Ordered (current, target) pair of adjacent career levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPair {
    pub current: CareerLevel,
    pub target: CareerLevel,
}

impl CareerPair {
    /// Validate an explicit pair; only one-step promotions have marker sets
    pub fn new(current: CareerLevel, target: CareerLevel) -> Result<Self> {
        if current.next() == Some(target) {
            Ok(Self { current, target })
        } else {
            Err(AnalysisError::Configuration(format!(
                "unknown career-level pair {} to {}",
                current, target
            )))
        }
    }

    /// Resolve the target, defaulting to the next level up
    pub fn resolve(current: CareerLevel, target: Option<CareerLevel>) -> Result<Self> {
        match target {
            Some(target) => Self::new(current, target),
            None => {
                let target = current.next().ok_or_else(|| {
                    AnalysisError::Configuration(format!(
                        "{} has no next career level; no transition to evaluate",
                        current
                    ))
                })?;
                Ok(Self { current, target })
            }
        }
    }

    pub fn label(&self) -> String {
        format!("{} to {}", self.current, self.target)
    }
}

/// Industry vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Industry {
    Healthcare,
    Cybersecurity,
    Fintech,
    Enterprise,
    Consumer,
}

impl Tag for Industry {
    const ALL: &'static [Self] = &[
        Industry::Healthcare,
        Industry::Cybersecurity,
        Industry::Fintech,
        Industry::Enterprise,
        Industry::Consumer,
    ];
    const KIND: &'static str = "industry";

    fn tag(self) -> &'static str {
        match self {
            Industry::Healthcare => "HEALTHCARE",
            Industry::Cybersecurity => "CYBERSECURITY",
            Industry::Fintech => "FINTECH",
            Industry::Enterprise => "ENTERPRISE",
            Industry::Consumer => "CONSUMER",
        }
    }
}

impl_tag_traits!(Industry);

impl Industry {
    pub fn label(self) -> &'static str {
        match self {
            Industry::Healthcare => "Healthcare",
            Industry::Cybersecurity => "Cybersecurity",
            Industry::Fintech => "Fintech",
            Industry::Enterprise => "Enterprise",
            Industry::Consumer => "Consumer Technology",
        }
    }
}

/// Meeting category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingType {
    OneOnOne,
    TeamStandup,
    StakeholderReview,
    BoardPresentation,
    CrisisCommunication,
    CustomerMeeting,
    SpeakingEngagement,
}

impl Tag for MeetingType {
    const ALL: &'static [Self] = &[
        MeetingType::OneOnOne,
        MeetingType::TeamStandup,
        MeetingType::StakeholderReview,
        MeetingType::BoardPresentation,
        MeetingType::CrisisCommunication,
        MeetingType::CustomerMeeting,
        MeetingType::SpeakingEngagement,
    ];
    const KIND: &'static str = "meeting type";

    fn tag(self) -> &'static str {
        match self {
            MeetingType::OneOnOne => "ONE_ON_ONE",
            MeetingType::TeamStandup => "TEAM_STANDUP",
            MeetingType::StakeholderReview => "STAKEHOLDER_REVIEW",
            MeetingType::BoardPresentation => "BOARD_PRESENTATION",
            MeetingType::CrisisCommunication => "CRISIS_COMMUNICATION",
            MeetingType::CustomerMeeting => "CUSTOMER_MEETING",
            MeetingType::SpeakingEngagement => "SPEAKING_ENGAGEMENT",
        }
    }
}

impl_tag_traits!(MeetingType);

impl MeetingType {
    pub fn label(self) -> &'static str {
        match self {
            MeetingType::OneOnOne => "One-on-One",
            MeetingType::TeamStandup => "Team Standup",
            MeetingType::StakeholderReview => "Stakeholder Review",
            MeetingType::BoardPresentation => "Board Presentation",
            MeetingType::CrisisCommunication => "Crisis Communication",
            MeetingType::CustomerMeeting => "Customer Meeting",
            MeetingType::SpeakingEngagement => "Speaking Engagement",
        }
    }
}

/// Competency category an insight is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Competency {
    ProductSense,
    Communication,
    StakeholderManagement,
    TechnicalTranslation,
    BusinessImpact,
}

impl Tag for Competency {
    const ALL: &'static [Self] = &[
        Competency::ProductSense,
        Competency::Communication,
        Competency::StakeholderManagement,
        Competency::TechnicalTranslation,
        Competency::BusinessImpact,
    ];
    const KIND: &'static str = "competency";

    fn tag(self) -> &'static str {
        match self {
            Competency::ProductSense => "PRODUCT_SENSE",
            Competency::Communication => "COMMUNICATION",
            Competency::StakeholderManagement => "STAKEHOLDER_MANAGEMENT",
            Competency::TechnicalTranslation => "TECHNICAL_TRANSLATION",
            Competency::BusinessImpact => "BUSINESS_IMPACT",
        }
    }
}

impl_tag_traits!(Competency);

/// How much evidence each detection keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisDepth {
    Quick,
    #[default]
    Standard,
    Comprehensive,
}

impl Tag for AnalysisDepth {
    const ALL: &'static [Self] = &[
        AnalysisDepth::Quick,
        AnalysisDepth::Standard,
        AnalysisDepth::Comprehensive,
    ];
    const KIND: &'static str = "analysis depth";

    fn tag(self) -> &'static str {
        match self {
            AnalysisDepth::Quick => "QUICK",
            AnalysisDepth::Standard => "STANDARD",
            AnalysisDepth::Comprehensive => "COMPREHENSIVE",
        }
    }
}

impl_tag_traits!(AnalysisDepth);

impl AnalysisDepth {
    pub fn max_evidence(self) -> usize {
        match self {
            AnalysisDepth::Quick => 1,
            AnalysisDepth::Standard => 3,
            AnalysisDepth::Comprehensive => 5,
        }
    }
}

/// Reference population for peer comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BenchmarkLevel {
    Industry,
    #[default]
    CareerLevel,
    TopPerformers,
}

impl Tag for BenchmarkLevel {
    const ALL: &'static [Self] = &[
        BenchmarkLevel::Industry,
        BenchmarkLevel::CareerLevel,
        BenchmarkLevel::TopPerformers,
    ];
    const KIND: &'static str = "benchmark level";

    fn tag(self) -> &'static str {
        match self {
            BenchmarkLevel::Industry => "INDUSTRY",
            BenchmarkLevel::CareerLevel => "CAREER_LEVEL",
            BenchmarkLevel::TopPerformers => "TOP_PERFORMERS",
        }
    }
}

impl_tag_traits!(BenchmarkLevel);

/// Priority / significance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ranking multiplier
    pub fn weight(self) -> u32 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    /// Module priority number (1 = highest)
    pub fn rank_number(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// Coarse strength of a detected pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendLabel {
    Absent,
    Weak,
    Emerging,
    Strong,
}

// ============================================================================
// Input
// ============================================================================

/// One speaker turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerSegment {
    pub speaker_id: String,
    pub text: String,
    /// Seconds from meeting start
    pub start_offset: f64,
    pub end_offset: f64,
}

/// Recording quality metadata (each value 0.0-1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioQuality {
    pub overall: f64,
    #[serde(default)]
    pub clarity: Option<f64>,
    #[serde(default)]
    pub noise_level: Option<f64>,
}

/// Immutable transcript input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub segments: Vec<SpeakerSegment>,
    /// Meeting length (seconds)
    #[serde(default)]
    pub duration_seconds: f64,
    pub meeting_type: MeetingType,
    #[serde(default)]
    pub audio_quality: Option<AudioQuality>,
}

impl Transcript {
    /// Plain-text transcript with no speaker segmentation
    pub fn from_text(id: impl Into<String>, text: impl Into<String>, meeting_type: MeetingType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            segments: Vec::new(),
            duration_seconds: 0.0,
            meeting_type,
            audio_quality: None,
        }
    }
}

/// Optional per-request overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfiguration {
    pub analysis_depth: AnalysisDepth,
    /// Competencies improvement areas are restricted to; empty means all
    pub focus_areas: Vec<Competency>,
    pub benchmark_level: BenchmarkLevel,
    pub include_historical_comparison: bool,
    pub generate_practice_modules: bool,
}

impl Default for AnalysisConfiguration {
    fn default() -> Self {
        Self {
            analysis_depth: AnalysisDepth::Standard,
            focus_areas: vec![
                Competency::Communication,
                Competency::StakeholderManagement,
                Competency::BusinessImpact,
            ],
            benchmark_level: BenchmarkLevel::CareerLevel,
            include_historical_comparison: true,
            generate_practice_modules: true,
        }
    }
}

/// Analysis request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub transcript: Transcript,
    pub current_career_level: CareerLevel,
    #[serde(default)]
    pub target_career_level: Option<CareerLevel>,
    pub industry: Industry,
    #[serde(default)]
    pub configuration: Option<AnalysisConfiguration>,
}

/// Immutable configuration bundle for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub pair: CareerPair,
    pub industry: Industry,
    pub meeting_type: MeetingType,
    pub depth: AnalysisDepth,
    pub focus_areas: Vec<Competency>,
    pub benchmark_level: BenchmarkLevel,
    pub include_historical_comparison: bool,
    pub generate_practice_modules: bool,
}

impl AnalysisContext {
    /// Build the run context, validating the career-level pair
    pub fn from_request(request: &AnalyzeRequest) -> Result<Self> {
        let pair = CareerPair::resolve(request.current_career_level, request.target_career_level)?;
        let config = request.configuration.clone().unwrap_or_default();

        Ok(Self {
            pair,
            industry: request.industry,
            meeting_type: request.transcript.meeting_type,
            depth: config.analysis_depth,
            focus_areas: config.focus_areas,
            benchmark_level: config.benchmark_level,
            include_historical_comparison: config.include_historical_comparison,
            generate_practice_modules: config.generate_practice_modules,
        })
    }

    pub fn current_level(&self) -> CareerLevel {
        self.pair.current
    }

    pub fn target_level(&self) -> CareerLevel {
        self.pair.target
    }

    /// Whether a competency is inside the requested focus set
    pub fn in_focus(&self, competency: Competency) -> bool {
        self.focus_areas.is_empty() || self.focus_areas.contains(&competency)
    }
}

// ============================================================================
// Detection output
// ============================================================================

/// Transcript excerpt backing a detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub snippet: String,
    /// Byte offset of the match in the analysed text
    pub offset: usize,
    /// Estimated position in the meeting (seconds)
    pub timestamp_seconds: f64,
    /// 60-99, derived from offset and detector identity
    pub strength: u32,
}

/// Output of one marker evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    /// Stable marker id (snake_case)
    pub id: String,
    /// Display name
    pub label: String,
    pub detected: bool,
    /// 0-100
    pub confidence: u32,
    pub frequency: u32,
    pub evidence: Vec<Evidence>,
    pub trend: TrendLabel,
    /// 0-100
    pub benchmark_comparison: u32,
}

impl DetectionResult {
    /// Snippet strings of the first `n` evidence entries
    pub fn evidence_snippets(&self, n: usize) -> Vec<String> {
        self.evidence
            .iter()
            .take(n)
            .map(|e| e.snippet.clone())
            .collect()
    }
}
