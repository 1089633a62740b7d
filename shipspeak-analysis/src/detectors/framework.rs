//! Product-framework usage detector
//!
//! A framework counts once it is named. Application cues (the vocabulary of
//! actually working through the framework) raise its usage level and quality.

use super::text_scan::TranscriptScan;
use super::{DetectorError, DetectorFamily, FamilyReport, PatternDetector};
use crate::types::{AnalysisContext, Evidence, MeetingType};
use serde::{Deserialize, Serialize};
use tracing::debug;

struct FrameworkSpec {
    name: &'static str,
    mentions: &'static [&'static str],
    cues: &'static [&'static str],
    home: &'static [MeetingType],
}

const FRAMEWORKS: [FrameworkSpec; 7] = [
    FrameworkSpec {
        name: "RICE",
        mentions: &["RICE"],
        cues: &["reach", "impact", "confidence", "effort"],
        home: &[MeetingType::StakeholderReview, MeetingType::TeamStandup],
    },
    FrameworkSpec {
        name: "ICE",
        mentions: &["ICE"],
        cues: &["impact", "confidence", "ease"],
        home: &[MeetingType::TeamStandup, MeetingType::StakeholderReview],
    },
    FrameworkSpec {
        name: "OKR",
        mentions: &["OKR", "objectives and key results"],
        cues: &["objective", "key result", "quarterly goal"],
        home: &[
            MeetingType::BoardPresentation,
            MeetingType::StakeholderReview,
            MeetingType::OneOnOne,
        ],
    },
    FrameworkSpec {
        name: "Jobs-to-be-Done",
        mentions: &["Jobs-to-be-Done", "Jobs to be Done", "JTBD"],
        cues: &["hire", "struggle", "desired outcome", "switching"],
        home: &[
            MeetingType::CustomerMeeting,
            MeetingType::StakeholderReview,
            MeetingType::SpeakingEngagement,
        ],
    },
    FrameworkSpec {
        name: "North Star",
        mentions: &["North Star"],
        cues: &["leading indicator", "input metric", "guardrail"],
        home: &[
            MeetingType::BoardPresentation,
            MeetingType::StakeholderReview,
            MeetingType::SpeakingEngagement,
        ],
    },
    FrameworkSpec {
        name: "SWOT",
        mentions: &["SWOT"],
        cues: &["strengths", "weaknesses", "opportunities", "threats"],
        home: &[
            MeetingType::BoardPresentation,
            MeetingType::StakeholderReview,
            MeetingType::CrisisCommunication,
        ],
    },
    FrameworkSpec {
        name: "Opportunity Solution Tree",
        mentions: &["Opportunity Solution Tree"],
        cues: &["desired outcome", "assumption", "experiment"],
        home: &[
            MeetingType::OneOnOne,
            MeetingType::TeamStandup,
            MeetingType::CustomerMeeting,
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UsageLevel {
    Mentioned,
    Applied,
    Mastered,
}

impl UsageLevel {
    pub fn classify(mentions: u32, cues: u32) -> Self {
        if mentions >= 2 && cues >= 3 {
            UsageLevel::Mastered
        } else if cues >= 1 {
            UsageLevel::Applied
        } else {
            UsageLevel::Mentioned
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkUsage {
    pub framework: String,
    pub usage: UsageLevel,
    pub mentions: u32,
    pub application_cues: u32,
    /// 0-100
    pub quality: u32,
    pub context_appropriate: bool,
    pub evidence: Vec<Evidence>,
}

/// Framework family output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkAnalysis {
    pub frameworks: Vec<FrameworkUsage>,
    /// Mean quality; 0 when nothing was named
    pub score: u32,
}

pub fn quality(mentions: u32, cues: u32) -> u32 {
    (40 + 10 * mentions.min(10) + 12 * cues.min(10)).min(100)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameworkDetector;

impl FrameworkDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, scan: &TranscriptScan, meeting_type: MeetingType) -> FrameworkAnalysis {
        let frameworks: Vec<FrameworkUsage> = FRAMEWORKS
            .iter()
            .filter_map(|spec| {
                let mentions = scan.count_terms(spec.mentions);
                if mentions == 0 {
                    return None;
                }
                let cues = scan.count_terms(spec.cues);
                Some(FrameworkUsage {
                    framework: spec.name.to_string(),
                    usage: UsageLevel::classify(mentions, cues),
                    mentions,
                    application_cues: cues,
                    quality: quality(mentions, cues),
                    context_appropriate: spec.home.contains(&meeting_type),
                    evidence: scan.evidence(spec.mentions, spec.name),
                })
            })
            .collect();

        let score = if frameworks.is_empty() {
            0
        } else {
            let total: u32 = frameworks.iter().map(|f| f.quality).sum();
            (f64::from(total) / frameworks.len() as f64).round() as u32
        };

        debug!(frameworks = frameworks.len(), score, "Framework usage scored");

        FrameworkAnalysis { frameworks, score }
    }
}

impl PatternDetector for FrameworkDetector {
    fn name(&self) -> &'static str {
        "framework_usage"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Frameworks
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        Ok(FamilyReport::Frameworks(self.analyze(scan, ctx.meeting_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frameworks_scores_zero() {
        let analysis = FrameworkDetector::new().analyze(
            &TranscriptScan::new("We talked about lunch.", 0.0),
            MeetingType::TeamStandup,
        );
        assert!(analysis.frameworks.is_empty());
        assert_eq!(analysis.score, 0);
    }

    #[test]
    fn test_rice_applied_and_ice_not_confused() {
        let scan = TranscriptScan::new(
            "Using RICE, the reach is large but the effort is high.",
            0.0,
        );
        let analysis = FrameworkDetector::new().analyze(&scan, MeetingType::StakeholderReview);

        assert_eq!(analysis.frameworks.len(), 1);
        let rice = &analysis.frameworks[0];
        assert_eq!(rice.framework, "RICE");
        assert_eq!(rice.usage, UsageLevel::Applied);
        assert_eq!(rice.quality, 40 + 10 + 24);
        assert!(rice.context_appropriate);
        assert_eq!(analysis.score, 74);
    }

    #[test]
    fn test_usage_levels() {
        assert_eq!(UsageLevel::classify(1, 0), UsageLevel::Mentioned);
        assert_eq!(UsageLevel::classify(1, 5), UsageLevel::Applied);
        assert_eq!(UsageLevel::classify(2, 3), UsageLevel::Mastered);
        assert_eq!(quality(5, 5), 100);
    }

    #[test]
    fn test_context_appropriateness_follows_meeting_type() {
        let scan = TranscriptScan::new("Our SWOT shows two threats.", 0.0);
        let board = FrameworkDetector::new().analyze(&scan, MeetingType::BoardPresentation);
        let standup = FrameworkDetector::new().analyze(&scan, MeetingType::TeamStandup);
        assert!(board.frameworks[0].context_appropriate);
        assert!(!standup.frameworks[0].context_appropriate);
    }
}
