//! Pipeline orchestrator
//!
//! Sequences one analysis run through its stages:
//! PREPROCESSING → DETECTING → AGGREGATING → EXTRACTING → RANKING →
//! RECOMMENDING → COMPLETED.
//!
//! # Progress
//! A progress event is emitted on every stage entry, first to the optional
//! synchronous callback and then (lossy) to the pipeline's event bus, sized
//! by `pipeline.event_capacity`. A failed run ends with one CANCELLED or
//! ERROR event carrying the error message.
//!
//! # Failure policy
//! - Detectors run concurrently; the first detector error or panic fails the run
//! - Cancellation is checked on every stage entry and while detectors run
//! - The wall-clock budget (`pipeline.timeout_secs`, 0 disables) covers the whole run
//! - No partial result is ever returned
//!
//! # Example
//! ```rust,ignore
//! let pipeline = AnalysisPipeline::new(settings);
//! let result = pipeline.analyze(request).await?;
//! ```

use crate::aggregator::{aggregate, score_map, CompositeScore, WeightVector};
use crate::benchmark::PeerComparison;
use crate::detectors::marker::mean_or_zero;
use crate::detectors::meeting::effectiveness_weights;
use crate::detectors::{DetectionReports, DetectorSet};
use crate::error::{AnalysisError, Result};
use crate::insights::{ExtractedInsights, InsightExtractor};
use crate::models::{AnalysisResult, AnalysisRun};
use crate::preprocess::{self, PreparedTranscript};
use crate::ranker::rank_cloned;
use crate::recommendations::RecommendationGenerator;
use crate::types::{AnalysisContext, AnalyzeRequest};
use chrono::Utc;
use shipspeak_common::config::Settings;
use shipspeak_common::events::{AnalysisStage, EventBus, ProgressEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Synchronous progress observer
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Analysis pipeline orchestrator
///
/// Holds no per-run state; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct AnalysisPipeline {
    settings: Settings,
    detectors: DetectorSet,
    extractor: InsightExtractor,
    generator: RecommendationGenerator,
    progress: Option<ProgressCallback>,
    event_bus: EventBus,
}

impl AnalysisPipeline {
    /// Pipeline with the standard detector families
    pub fn new(settings: Settings) -> Self {
        Self {
            extractor: InsightExtractor::new(settings.thresholds.clone()),
            generator: RecommendationGenerator::new(
                settings.limits.max_actions,
                settings.limits.max_modules,
            ),
            detectors: DetectorSet::standard(),
            progress: None,
            event_bus: EventBus::new(settings.pipeline.event_capacity),
            settings,
        }
    }

    /// Replace the detector set
    pub fn with_detectors(mut self, detectors: DetectorSet) -> Self {
        self.detectors = detectors;
        self
    }

    /// Invoke `callback` on every progress event
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Publish progress events on a shared `bus` instead of the pipeline's own
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = bus;
        self
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Receive every progress event published after this call
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ProgressEvent> {
        self.event_bus.subscribe()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn detectors(&self) -> &DetectorSet {
        &self.detectors
    }

    /// Run one analysis to completion
    pub async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        self.analyze_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Run one analysis, aborting with `Cancelled` when `cancel` fires
    pub async fn analyze_with_cancel(
        &self,
        request: AnalyzeRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisResult> {
        let mut run = AnalysisRun::new();
        let budget_secs = self.settings.pipeline.timeout_secs;

        info!(
            analysis_id = %run.analysis_id,
            meeting_id = %request.transcript.id,
            current_level = %request.current_career_level,
            industry = %request.industry,
            "Starting analysis"
        );

        let outcome = if budget_secs == 0 {
            self.execute(&mut run, &request, &cancel).await
        } else {
            match tokio::time::timeout(
                Duration::from_secs(budget_secs),
                self.execute(&mut run, &request, &cancel),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(AnalysisError::Timeout { budget_secs }),
            }
        };

        match outcome {
            Ok(result) => {
                info!(
                    analysis_id = %result.analysis_id,
                    overall_score = result.overall_score,
                    processing_time_ms = result.processing_time_millis,
                    "Analysis completed"
                );
                Ok(result)
            }
            Err(e) => {
                self.fail(&mut run, &e);
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        run: &mut AnalysisRun,
        request: &AnalyzeRequest,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult> {
        // PREPROCESSING
        self.enter(run, AnalysisStage::Preprocessing, cancel)?;
        let ctx = AnalysisContext::from_request(request)?;
        let prepared: PreparedTranscript = preprocess::prepare(
            &request.transcript,
            ctx.depth,
            self.settings.limits.evidence_window_chars,
        )?;

        // DETECTING
        self.enter(run, AnalysisStage::Detecting, cancel)?;
        let scan = Arc::new(prepared.scan);
        let shared_ctx = Arc::new(ctx.clone());
        let reports = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AnalysisError::Cancelled),
            reports = self.detectors.detect_all(scan, shared_ctx) => reports?,
        };
        let reports = DetectionReports::from_reports(reports)?;

        // AGGREGATING
        self.enter(run, AnalysisStage::Aggregating, cancel)?;
        let composite_scores = self.composite_scores(&reports)?;
        let overall_score = composite_scores
            .first()
            .map(|c| c.score)
            .unwrap_or_default();
        let peer_comparison =
            PeerComparison::compute(overall_score, ctx.current_level(), ctx.benchmark_level);
        if ctx.include_historical_comparison {
            debug!(
                analysis_id = %run.analysis_id,
                "Historical comparison requested; no stored history is available"
            );
        }

        // EXTRACTING
        self.enter(run, AnalysisStage::Extracting, cancel)?;
        let candidates = self.extractor.extract(&reports, &ctx);

        // RANKING
        self.enter(run, AnalysisStage::Ranking, cancel)?;
        let ranked = self.rank(&candidates);

        // RECOMMENDING
        self.enter(run, AnalysisStage::Recommending, cancel)?;
        let immediate_actions = self.generator.generate_actions(
            &ranked.improvements,
            &ranked.strengths,
            &ranked.progression,
        );
        let module_recommendations = if ctx.generate_practice_modules {
            self.generator.generate_modules(
                &ranked.improvements,
                &ranked.progression,
                ctx.current_level(),
            )
        } else {
            Vec::new()
        };

        // COMPLETED
        self.enter(run, AnalysisStage::Completed, cancel)?;
        let DetectionReports {
            transition,
            industry,
            meeting,
            presence,
            frameworks,
        } = reports;

        Ok(AnalysisResult {
            analysis_id: run.analysis_id.clone(),
            meeting_id: request.transcript.id.clone(),
            overall_score,
            composite_scores,
            transition_analysis: transition,
            industry_analysis: industry,
            meeting_type_analysis: meeting,
            executive_presence: presence,
            framework_usage: frameworks,
            peer_comparison,
            highlights: ranked.highlights,
            improvement_areas: ranked.improvements,
            strength_areas: ranked.strengths,
            progression_insights: ranked.progression,
            immediate_actions,
            module_recommendations,
            speaker_summary: prepared.speakers,
            transcript_digest: prepared.digest,
            started_at: run.started_at,
            completed_at: run.ended_at.unwrap_or_else(Utc::now),
            processing_time_millis: run.elapsed_millis(),
        })
    }

    /// Overall composite first, then the family-internal composites
    fn composite_scores(&self, reports: &DetectionReports) -> Result<Vec<CompositeScore>> {
        let overall = aggregate(
            &score_map(reports.family_scores()),
            &WeightVector::overall(&self.settings.weights),
        )?;

        let markers = &reports.transition.markers;
        let progress = aggregate(
            &score_map(markers.iter().map(|m| (m.id.clone(), f64::from(m.confidence)))),
            &WeightVector::equal("progress", markers.iter().map(|m| m.id.clone())),
        )?;

        let meeting = &reports.meeting;
        let pattern_confidences: Vec<f64> =
            meeting.patterns.iter().map(|p| f64::from(p.confidence)).collect();
        let (pattern_weight, audience_weight) = effectiveness_weights(meeting.meeting_type);
        let effectiveness = aggregate(
            &score_map([
                ("patterns", mean_or_zero(&pattern_confidences)),
                ("audience", meeting.audience_adaptation.mean()),
            ]),
            &WeightVector::new(
                "meeting_effectiveness",
                [("patterns", pattern_weight), ("audience", audience_weight)],
            ),
        )?;

        debug!(
            overall = overall.score,
            progress = progress.score,
            meeting_effectiveness = effectiveness.score,
            "Composite scores aggregated"
        );

        Ok(vec![overall, progress, effectiveness])
    }

    fn rank(&self, candidates: &ExtractedInsights) -> ExtractedInsights {
        let limits = &self.settings.limits;
        ExtractedInsights {
            highlights: rank_cloned(&candidates.highlights, limits.max_highlights),
            improvements: rank_cloned(&candidates.improvements, limits.max_improvements),
            strengths: rank_cloned(&candidates.strengths, limits.max_strengths),
            // one entry per evaluated pair plus at most one acceleration entry
            progression: candidates.progression.clone(),
        }
    }

    /// Check cancellation, move to `stage` and announce it
    fn enter(
        &self,
        run: &mut AnalysisRun,
        stage: AnalysisStage,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let transition = run.transition_to(stage)?;
        debug!(
            analysis_id = %transition.analysis_id,
            from = ?transition.old_stage,
            to = ?transition.new_stage,
            "Stage transition"
        );

        self.emit(ProgressEvent::new(
            run.analysis_id.clone(),
            stage,
            run.progress,
            self.settings.pipeline.time_budget_secs,
        ));
        Ok(())
    }

    /// Move the run to its terminal failure stage and announce it
    fn fail(&self, run: &mut AnalysisRun, error: &AnalysisError) {
        let stage = if error.is_cancelled() {
            AnalysisStage::Cancelled
        } else {
            AnalysisStage::Error
        };

        if run.transition_to(stage).is_err() {
            // already terminal
            return;
        }

        if error.is_cancelled() {
            info!(analysis_id = %run.analysis_id, progress = run.progress, "Analysis cancelled");
        } else {
            warn!(
                analysis_id = %run.analysis_id,
                kind = ?error.kind(),
                error = %error,
                "Analysis failed"
            );
        }

        self.emit(
            ProgressEvent::new(
                run.analysis_id.clone(),
                stage,
                run.progress,
                self.settings.pipeline.time_budget_secs,
            )
            .with_error(error.to_string()),
        );
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.progress {
            callback(&event);
        }
        self.event_bus.emit_lossy(event);
    }
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("settings", &self.settings)
            .field("detectors", &self.detectors)
            .field("progress_callback", &self.progress.is_some())
            .field("event_capacity", &self.event_bus.capacity())
            .finish()
    }
}
