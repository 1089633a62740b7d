//! Test Helper Utilities
//!
//! Shared fixtures and instrumented detectors for pipeline tests

#![allow(dead_code)]

use shipspeak_analysis::detectors::{
    DetectorError, DetectorFamily, FamilyReport, PatternDetector, TranscriptScan,
};
use shipspeak_analysis::types::AnalysisContext;
use shipspeak_analysis::{
    AnalysisConfiguration, AnalyzeRequest, CareerLevel, DetectorSet, Industry, MeetingType,
    Transcript,
};
use shipspeak_common::ProgressEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Stakeholder review with strategy, framework, stakeholder and security language
pub const RICH_TRANSCRIPT: &str = "\
Bottom line: I recommend we prioritize the security update before the roadmap expansion. \
The key takeaway is that our strategy depends on customer trust, and the business impact \
is measurable in revenue and retention. We used RICE to score the options; the RICE scores \
put the security work first because the reach and impact are highest. I have aligned \
stakeholders across engineering, sales and legal, and we influence the platform team through \
shared OKRs. The tradeoff is a two-week delay on the analytics feature, which means we \
balance long-term vision against short-term delivery. Our threat model covers zero trust, \
SOC 2 controls and incident response. I am confident this is the right call, and I take \
ownership of the outcome. In summary: ship the security update, then the roadmap.";

pub fn request(text: &str, level: CareerLevel, industry: Industry) -> AnalyzeRequest {
    AnalyzeRequest {
        transcript: Transcript::from_text("meeting-1", text, MeetingType::StakeholderReview),
        current_career_level: level,
        target_career_level: None,
        industry,
        configuration: None,
    }
}

pub fn request_with(
    text: &str,
    level: CareerLevel,
    industry: Industry,
    configuration: AnalysisConfiguration,
) -> AnalyzeRequest {
    AnalyzeRequest {
        configuration: Some(configuration),
        ..request(text, level, industry)
    }
}

/// Collects every progress event a pipeline emits
#[derive(Clone, Default)]
pub struct ProgressRecorder {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback suitable for `AnalysisPipeline::with_progress`
    pub fn callback(&self) -> impl Fn(&ProgressEvent) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |event| events.lock().unwrap().push(event.clone())
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Wraps a detector, counting invocations
pub struct CountingDetector {
    inner: Arc<dyn PatternDetector>,
    calls: Arc<AtomicUsize>,
}

impl CountingDetector {
    pub fn new(inner: Arc<dyn PatternDetector>, calls: Arc<AtomicUsize>) -> Self {
        Self { inner, calls }
    }
}

impl PatternDetector for CountingDetector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn family(&self) -> DetectorFamily {
        self.inner.family()
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.detect(scan, ctx)
    }
}

/// Wraps a detector, sleeping before delegating
pub struct SlowDetector {
    inner: Arc<dyn PatternDetector>,
    delay: Duration,
}

impl SlowDetector {
    pub fn new(inner: Arc<dyn PatternDetector>, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl PatternDetector for SlowDetector {
    fn name(&self) -> &'static str {
        "slow_detector"
    }

    fn family(&self) -> DetectorFamily {
        self.inner.family()
    }

    fn detect(
        &self,
        scan: &TranscriptScan,
        ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        std::thread::sleep(self.delay);
        self.inner.detect(scan, ctx)
    }
}

/// Always panics
pub struct PanickingDetector;

impl PatternDetector for PanickingDetector {
    fn name(&self) -> &'static str {
        "panicking_detector"
    }

    fn family(&self) -> DetectorFamily {
        DetectorFamily::Frameworks
    }

    fn detect(
        &self,
        _scan: &TranscriptScan,
        _ctx: &AnalysisContext,
    ) -> Result<FamilyReport, DetectorError> {
        panic!("boom");
    }
}

/// Standard detectors, each wrapped in a counter sharing `calls`
pub fn counting_set(calls: &Arc<AtomicUsize>) -> DetectorSet {
    let detectors: Vec<Arc<dyn PatternDetector>> = standard_detectors()
        .into_iter()
        .map(|d| {
            Arc::new(CountingDetector::new(d, Arc::clone(calls))) as Arc<dyn PatternDetector>
        })
        .collect();
    DetectorSet::new(detectors)
}

/// Standard detectors with the first one slowed down by `delay`
pub fn slow_set(delay: Duration) -> DetectorSet {
    let mut detectors = standard_detectors();
    let first = detectors.remove(0);
    detectors.insert(0, Arc::new(SlowDetector::new(first, delay)));
    DetectorSet::new(detectors)
}

/// Standard detectors with the frameworks family replaced by a panicking one
pub fn panicking_set() -> DetectorSet {
    let mut detectors: Vec<Arc<dyn PatternDetector>> = standard_detectors()
        .into_iter()
        .filter(|d| d.family() != DetectorFamily::Frameworks)
        .collect();
    detectors.push(Arc::new(PanickingDetector));
    DetectorSet::new(detectors)
}

fn standard_detectors() -> Vec<Arc<dyn PatternDetector>> {
    use shipspeak_analysis::detectors::{
        ExecutivePresenceDetector, FrameworkDetector, IndustryDetector, MeetingTypeDetector,
        TransitionDetector,
    };
    vec![
        Arc::new(TransitionDetector::new()),
        Arc::new(IndustryDetector::new()),
        Arc::new(MeetingTypeDetector::new()),
        Arc::new(ExecutivePresenceDetector::new()),
        Arc::new(FrameworkDetector::new()),
    ]
}
