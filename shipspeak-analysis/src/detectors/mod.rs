//! Pattern detectors
//!
//! Five independent families, each scoring the transcript against one
//! analytical dimension:
//! 1. **transition** - career-transition readiness markers for the level pair
//! 2. **industry** - industry vocabulary, compliance, competitive position
//! 3. **meeting** - meeting-type patterns and audience adaptation
//! 4. **presence** - executive presence markers, language, influence, confidence
//! 5. **framework** - product-framework usage
//!
//! # Parallel Execution
//! Detectors are synchronous and CPU-bound, so `DetectorSet::detect_all` runs
//! each one on the blocking pool and joins them. The first failure (error or
//! panic) fails the whole stage; a partial detection set is never returned.

pub mod framework;
pub mod industry;
pub mod marker;
pub mod meeting;
pub mod presence;
pub mod text_scan;
pub mod transition;

use crate::error::{AnalysisError, Result};
use crate::types::AnalysisContext;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub use framework::{FrameworkAnalysis, FrameworkDetector};
pub use industry::{IndustryAnalysis, IndustryDetector};
pub use meeting::{MeetingTypeAnalysis, MeetingTypeDetector};
pub use presence::{ExecutivePresenceAnalysis, ExecutivePresenceDetector};
pub use text_scan::TranscriptScan;
pub use transition::{TransitionAnalysis, TransitionDetector};

/// Detector-level failure, wrapped into `AnalysisError::Internal` at fan-in
#[derive(Debug, Error)]
pub enum DetectorError {
    /// Scoring step failed (e.g. an inconsistent weight table)
    #[error(transparent)]
    Scoring(#[from] AnalysisError),

    #[error("{0}")]
    Failed(String),
}

/// Dimension a detector feeds into the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectorFamily {
    Transition,
    Industry,
    Meeting,
    Presence,
    Frameworks,
}

impl DetectorFamily {
    pub const ALL: [DetectorFamily; 5] = [
        DetectorFamily::Transition,
        DetectorFamily::Industry,
        DetectorFamily::Meeting,
        DetectorFamily::Presence,
        DetectorFamily::Frameworks,
    ];

    /// Key in the overall weight vector
    pub fn dimension(self) -> &'static str {
        match self {
            DetectorFamily::Transition => "transition",
            DetectorFamily::Industry => "industry",
            DetectorFamily::Meeting => "meeting",
            DetectorFamily::Presence => "presence",
            DetectorFamily::Frameworks => "frameworks",
        }
    }
}

/// Pattern detector contract
///
/// Implementations must be pure: identical scan + context → identical report,
/// and an empty transcript must score zero rather than fail.
pub trait PatternDetector: Send + Sync {
    /// Detector name for logging and error attribution
    fn name(&self) -> &'static str;

    fn family(&self) -> DetectorFamily;

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> std::result::Result<FamilyReport, DetectorError>;
}

/// Output of one detector family
#[derive(Debug, Clone, PartialEq)]
pub enum FamilyReport {
    Transition(TransitionAnalysis),
    Industry(IndustryAnalysis),
    Meeting(MeetingTypeAnalysis),
    Presence(ExecutivePresenceAnalysis),
    Frameworks(FrameworkAnalysis),
}

impl FamilyReport {
    pub fn family(&self) -> DetectorFamily {
        match self {
            FamilyReport::Transition(_) => DetectorFamily::Transition,
            FamilyReport::Industry(_) => DetectorFamily::Industry,
            FamilyReport::Meeting(_) => DetectorFamily::Meeting,
            FamilyReport::Presence(_) => DetectorFamily::Presence,
            FamilyReport::Frameworks(_) => DetectorFamily::Frameworks,
        }
    }

    /// Family score (0-100) fed into the overall composite
    pub fn family_score(&self) -> u32 {
        match self {
            FamilyReport::Transition(t) => t.progress_score,
            FamilyReport::Industry(i) => i.score(),
            FamilyReport::Meeting(m) => m.effectiveness,
            FamilyReport::Presence(p) => p.overall_score,
            FamilyReport::Frameworks(f) => f.score,
        }
    }
}

/// Complete detection set, one report per family
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionReports {
    pub transition: TransitionAnalysis,
    pub industry: IndustryAnalysis,
    pub meeting: MeetingTypeAnalysis,
    pub presence: ExecutivePresenceAnalysis,
    pub frameworks: FrameworkAnalysis,
}

impl DetectionReports {
    /// Assemble from fan-in output; every family exactly once
    pub fn from_reports(reports: Vec<FamilyReport>) -> Result<Self> {
        let mut transition = None;
        let mut industry = None;
        let mut meeting = None;
        let mut presence = None;
        let mut frameworks = None;

        for report in reports {
            let family = report.family();
            let duplicate = match report {
                FamilyReport::Transition(r) => transition.replace(r).is_some(),
                FamilyReport::Industry(r) => industry.replace(r).is_some(),
                FamilyReport::Meeting(r) => meeting.replace(r).is_some(),
                FamilyReport::Presence(r) => presence.replace(r).is_some(),
                FamilyReport::Frameworks(r) => frameworks.replace(r).is_some(),
            };
            if duplicate {
                return Err(AnalysisError::Configuration(format!(
                    "detector set produced {:?} more than once",
                    family
                )));
            }
        }

        let missing = |family: DetectorFamily| {
            AnalysisError::Configuration(format!("detector set has no {:?} detector", family))
        };

        Ok(Self {
            transition: transition.ok_or_else(|| missing(DetectorFamily::Transition))?,
            industry: industry.ok_or_else(|| missing(DetectorFamily::Industry))?,
            meeting: meeting.ok_or_else(|| missing(DetectorFamily::Meeting))?,
            presence: presence.ok_or_else(|| missing(DetectorFamily::Presence))?,
            frameworks: frameworks.ok_or_else(|| missing(DetectorFamily::Frameworks))?,
        })
    }

    /// (dimension, score) pairs for the overall composite
    pub fn family_scores(&self) -> [(&'static str, f64); 5] {
        [
            (DetectorFamily::Transition.dimension(), f64::from(self.transition.progress_score)),
            (DetectorFamily::Industry.dimension(), f64::from(self.industry.score())),
            (DetectorFamily::Meeting.dimension(), f64::from(self.meeting.effectiveness)),
            (DetectorFamily::Presence.dimension(), f64::from(self.presence.overall_score)),
            (DetectorFamily::Frameworks.dimension(), f64::from(self.frameworks.score)),
        ]
    }
}

/// Concurrent detector executor
///
/// # Example
/// ```rust,ignore
/// let set = DetectorSet::standard();
/// let reports = set.detect_all(Arc::new(scan), Arc::new(ctx)).await?;
/// ```
#[derive(Clone)]
pub struct DetectorSet {
    detectors: Vec<Arc<dyn PatternDetector>>,
}

impl DetectorSet {
    pub fn new(detectors: Vec<Arc<dyn PatternDetector>>) -> Self {
        Self { detectors }
    }

    /// The five built-in families
    pub fn standard() -> Self {
        Self::new(vec![
            Arc::new(TransitionDetector::new()),
            Arc::new(IndustryDetector::new()),
            Arc::new(MeetingTypeDetector::new()),
            Arc::new(ExecutivePresenceDetector::new()),
            Arc::new(FrameworkDetector::new()),
        ])
    }

    pub fn count(&self) -> usize {
        self.detectors.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every detector concurrently; fail on the first error or panic
    pub async fn detect_all(
        &self,
        scan: Arc<TranscriptScan>,
        ctx: Arc<AnalysisContext>,
    ) -> Result<Vec<FamilyReport>> {
        let futures = self.detectors.iter().map(|detector| {
            let detector = Arc::clone(detector);
            let scan = Arc::clone(&scan);
            let ctx = Arc::clone(&ctx);
            let name = detector.name();

            async move {
                let outcome = tokio::task::spawn_blocking(move || detector.detect(&scan, &ctx))
                    .await
                    .map_err(|e| {
                        let message = if e.is_panic() {
                            "detector panicked".to_string()
                        } else {
                            format!("detector task failed: {}", e)
                        };
                        AnalysisError::internal(name, message)
                    })?;

                match outcome {
                    Ok(report) => {
                        debug!(
                            detector = name,
                            score = report.family_score(),
                            "Detector complete"
                        );
                        Ok(report)
                    }
                    Err(e) => Err(AnalysisError::internal(name, e.to_string())),
                }
            }
        });

        try_join_all(futures).await
    }
}

impl Default for DetectorSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for DetectorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectorSet")
            .field("detectors", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{AnalyzeRequest, CareerLevel, Industry, MeetingType, Transcript};

    fn context() -> AnalysisContext {
        AnalysisContext::from_request(&AnalyzeRequest {
            transcript: Transcript::from_text("t", "x", MeetingType::StakeholderReview),
            current_career_level: CareerLevel::Senior,
            target_career_level: None,
            industry: Industry::Enterprise,
            configuration: None,
        })
        .unwrap()
    }

    struct FailingDetector;

    impl PatternDetector for FailingDetector {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn family(&self) -> DetectorFamily {
            DetectorFamily::Industry
        }

        fn detect(
            &self,
            _scan: &TranscriptScan,
            _ctx: &AnalysisContext,
        ) -> std::result::Result<FamilyReport, DetectorError> {
            Err(DetectorError::Failed("lookup table corrupt".into()))
        }
    }

    struct PanickingDetector;

    impl PatternDetector for PanickingDetector {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn family(&self) -> DetectorFamily {
            DetectorFamily::Presence
        }

        fn detect(
            &self,
            _scan: &TranscriptScan,
            _ctx: &AnalysisContext,
        ) -> std::result::Result<FamilyReport, DetectorError> {
            panic!("detector bug")
        }
    }

    #[tokio::test]
    async fn test_standard_set_covers_every_family() {
        let scan = Arc::new(TranscriptScan::new("I recommend the roadmap.", 30.0));
        let reports = DetectorSet::standard()
            .detect_all(scan, Arc::new(context()))
            .await
            .unwrap();

        assert_eq!(reports.len(), 5);
        let complete = DetectionReports::from_reports(reports).unwrap();
        assert_eq!(complete.family_scores().len(), 5);
    }

    #[tokio::test]
    async fn test_detector_error_names_detector() {
        let set = DetectorSet::new(vec![
            Arc::new(TransitionDetector::new()),
            Arc::new(FailingDetector),
        ]);
        let err = set
            .detect_all(Arc::new(TranscriptScan::new("text", 0.0)), Arc::new(context()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(matches!(
            err,
            AnalysisError::Internal { detector: Some(ref d), .. } if d == "failing"
        ));
    }

    #[tokio::test]
    async fn test_panic_is_captured_as_internal_error() {
        let set = DetectorSet::new(vec![Arc::new(PanickingDetector)]);
        let err = set
            .detect_all(Arc::new(TranscriptScan::new("text", 0.0)), Arc::new(context()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("panicking"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_incomplete_reports_rejected() {
        let err = DetectionReports::from_reports(Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
