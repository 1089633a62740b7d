//! Integration tests for the analysis pipeline
//!
//! Covers:
//! - Score ranges and output caps
//! - Determinism across runs
//! - Fail-fast input validation (no detector invoked)
//! - Progress event schedule
//! - Focus areas and module generation switches

mod helpers;

use helpers::*;
use shipspeak_analysis::detectors::DetectorFamily;
use shipspeak_analysis::types::{AnalysisDepth, Competency};
use shipspeak_analysis::{
    AnalysisConfiguration, AnalysisPipeline, CareerLevel, ErrorKind, Industry, MeetingType,
};
use shipspeak_common::config::Settings;
use shipspeak_common::{AnalysisStage, EventBus};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Result shape
// ============================================================================

#[tokio::test]
async fn test_rich_transcript_scores_in_range_and_caps_hold() {
    let pipeline = AnalysisPipeline::new(Settings::default());
    let result = pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Cybersecurity))
        .await
        .unwrap();

    assert!(result.overall_score <= 100);
    assert!(!result.analysis_id.is_empty());
    assert_eq!(result.meeting_id, "meeting-1");
    assert_eq!(result.transcript_digest.len(), 64);

    let all_markers = result
        .transition_analysis
        .markers
        .iter()
        .chain(result.industry_analysis.markers.iter())
        .chain(result.meeting_type_analysis.patterns.iter())
        .chain(result.executive_presence.presence_markers.iter().map(|m| &m.result));
    for marker in all_markers {
        assert!(marker.confidence <= 100, "{} out of range", marker.id);
        assert!(marker.benchmark_comparison <= 100);
    }
    for composite in &result.composite_scores {
        assert!(composite.score <= 100);
    }

    assert!(result.highlights.len() <= 6);
    assert!(result.improvement_areas.len() <= 5);
    assert!(result.strength_areas.len() <= 5);
    assert!(result.immediate_actions.len() <= 4);
    assert!(result.module_recommendations.len() <= 6);

    // the rich transcript exercises every family
    assert!(result.transition_analysis.progress_score > 0);
    assert!(result.industry_analysis.score() > 0);
    assert!(!result.framework_usage.frameworks.is_empty());
    assert!(result.composite("overall").is_some());
    assert_eq!(result.composite("overall").unwrap().score, result.overall_score);
}

#[tokio::test]
async fn test_small_caps_are_respected() {
    let mut settings = Settings::default();
    settings.limits.max_highlights = 1;
    settings.limits.max_improvements = 1;
    settings.limits.max_strengths = 1;
    settings.limits.max_actions = 1;
    settings.limits.max_modules = 1;

    let result = AnalysisPipeline::new(settings)
        .analyze(request("we should think about it", CareerLevel::Ic, Industry::Healthcare))
        .await
        .unwrap();

    assert!(result.highlights.len() <= 1);
    assert_eq!(result.improvement_areas.len(), 1);
    assert!(result.strength_areas.len() <= 1);
    assert_eq!(result.immediate_actions.len(), 1);
    assert_eq!(result.module_recommendations.len(), 1);
}

#[tokio::test]
async fn test_rankings_follow_weighted_score() {
    let result = AnalysisPipeline::new(Settings::default())
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Cybersecurity))
        .await
        .unwrap();

    for pair in result.highlights.windows(2) {
        let a = pair[0].score * pair[0].significance.weight();
        let b = pair[1].score * pair[1].significance.weight();
        assert!(a >= b);
    }
    for pair in result.improvement_areas.windows(2) {
        let a = pair[0].gap * pair[0].priority.weight();
        let b = pair[1].gap * pair[1].priority.weight();
        assert!(a >= b);
    }
}

#[tokio::test]
async fn test_gap_invariant_for_every_level() {
    let pipeline = AnalysisPipeline::new(Settings::default());
    for level in [
        CareerLevel::Ic,
        CareerLevel::Senior,
        CareerLevel::Staff,
        CareerLevel::Principal,
        CareerLevel::Director,
    ] {
        for industry in [Industry::Healthcare, Industry::Fintech, Industry::Consumer] {
            let result = pipeline
                .analyze(request(RICH_TRANSCRIPT, level, industry))
                .await
                .unwrap();
            for area in &result.improvement_areas {
                assert_eq!(area.gap, area.target_level - area.current_level);
                assert!(area.current_level <= area.target_level);
            }
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[tokio::test]
async fn test_identical_input_gives_identical_result() {
    let pipeline = AnalysisPipeline::new(Settings::default());
    let req = request(RICH_TRANSCRIPT, CareerLevel::Staff, Industry::Enterprise);

    let first = pipeline.analyze(req.clone()).await.unwrap();
    let second = pipeline.analyze(req).await.unwrap();

    assert_ne!(first.analysis_id, second.analysis_id);
    assert_eq!(
        first.analytical_json().unwrap(),
        second.analytical_json().unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.analytical_json().unwrap()).unwrap(),
        serde_json::to_string(&second.analytical_json().unwrap()).unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let pipeline = AnalysisPipeline::new(Settings::default());
    let mut healthcare = request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Healthcare);
    healthcare.transcript.id = "a".to_string();
    let mut fintech = request("bottom line, I recommend it", CareerLevel::Ic, Industry::Fintech);
    fintech.transcript.id = "b".to_string();

    let (a, b) = tokio::join!(
        pipeline.analyze(healthcare.clone()),
        pipeline.analyze(fintech)
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.meeting_id, "a");
    assert_eq!(b.meeting_id, "b");

    let alone = pipeline.analyze(healthcare).await.unwrap();
    assert_eq!(a.analytical_json().unwrap(), alone.analytical_json().unwrap());
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_answer_first_phrase_raises_progress() {
    let pipeline = AnalysisPipeline::new(Settings::default());

    let with_phrase = pipeline
        .analyze(request(
            "I recommend we prioritize the security update",
            CareerLevel::Senior,
            Industry::Enterprise,
        ))
        .await
        .unwrap();
    let without = pipeline
        .analyze(request(
            "The weather was pleasant on Tuesday",
            CareerLevel::Senior,
            Industry::Enterprise,
        ))
        .await
        .unwrap();

    let marker = with_phrase
        .transition_analysis
        .marker("executive_communication_structure")
        .unwrap();
    assert!(marker.detected);
    assert!(marker.confidence > 0);
    assert_eq!(marker.evidence.len(), 1);

    assert!(
        with_phrase.transition_analysis.progress_score
            > without.transition_analysis.progress_score
    );
}

#[tokio::test]
async fn test_empty_transcript_invokes_no_detector() {
    let calls = Arc::new(AtomicUsize::new(0));
    let recorder = ProgressRecorder::new();
    let pipeline = AnalysisPipeline::new(Settings::default())
        .with_detectors(counting_set(&calls))
        .with_progress(recorder.callback());

    let err = pipeline
        .analyze(request("", CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let events = recorder.events();
    assert!(events.iter().all(|e| e.stage != AnalysisStage::Detecting));
    let last = events.last().unwrap();
    assert_eq!(last.stage, AnalysisStage::Error);
    assert_eq!(last.progress, 5);
    assert!(last.error.is_some());
}

#[tokio::test]
async fn test_whitespace_text_with_segments_invokes_no_detector() {
    use shipspeak_analysis::types::SpeakerSegment;

    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline =
        AnalysisPipeline::new(Settings::default()).with_detectors(counting_set(&calls));

    let mut req = request("   ", CareerLevel::Senior, Industry::Enterprise);
    req.transcript.segments = vec![SpeakerSegment {
        speaker_id: "alice".to_string(),
        text: "I recommend we ship".to_string(),
        start_offset: 0.0,
        end_offset: 10.0,
    }];

    let err = pipeline.analyze(req).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_counting_set_runs_each_detector_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline =
        AnalysisPipeline::new(Settings::default()).with_detectors(counting_set(&calls));

    pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), DetectorFamily::ALL.len());
}

#[tokio::test]
async fn test_vp_without_target_is_configuration_error() {
    let err = AnalysisPipeline::new(Settings::default())
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Vp, Industry::Enterprise))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// Progress channel
// ============================================================================

#[tokio::test]
async fn test_progress_events_follow_schedule() {
    let recorder = ProgressRecorder::new();
    let pipeline =
        AnalysisPipeline::new(Settings::default()).with_progress(recorder.callback());

    let result = pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap();

    let events = recorder.events();
    let schedule: Vec<(AnalysisStage, u8)> = events.iter().map(|e| (e.stage, e.progress)).collect();
    assert_eq!(
        schedule,
        vec![
            (AnalysisStage::Preprocessing, 5),
            (AnalysisStage::Detecting, 15),
            (AnalysisStage::Aggregating, 50),
            (AnalysisStage::Extracting, 60),
            (AnalysisStage::Ranking, 80),
            (AnalysisStage::Recommending, 90),
            (AnalysisStage::Completed, 100),
        ]
    );
    assert!(events.iter().all(|e| e.analysis_id == result.analysis_id));
    assert!(events.iter().all(|e| e.error.is_none()));
    // 120s budget × 50% remaining
    assert_eq!(events[2].estimated_seconds_remaining, 60);
    assert_eq!(events[6].estimated_seconds_remaining, 0);
}

#[tokio::test]
async fn test_own_event_bus_sized_from_settings() {
    let mut settings = Settings::default();
    settings.pipeline.event_capacity = 8;
    let pipeline = AnalysisPipeline::new(settings);
    assert_eq!(pipeline.event_bus().capacity(), 8);

    let mut rx = pipeline.subscribe();
    pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Ic, Industry::Consumer))
        .await
        .unwrap();

    let mut stages = Vec::new();
    while let Ok(event) = rx.try_recv() {
        stages.push(event.stage);
    }
    assert_eq!(stages.first(), Some(&AnalysisStage::Preprocessing));
    assert_eq!(stages.last(), Some(&AnalysisStage::Completed));
    assert_eq!(stages.len(), 7);
}

#[tokio::test]
async fn test_event_bus_receives_same_events() {
    let bus = EventBus::new(32);
    let mut rx = bus.subscribe();
    let pipeline = AnalysisPipeline::new(Settings::default()).with_event_bus(bus);

    pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Ic, Industry::Consumer))
        .await
        .unwrap();

    let mut stages = Vec::new();
    while let Ok(event) = rx.try_recv() {
        stages.push(event.stage);
    }
    assert_eq!(stages.len(), 7);
    assert_eq!(stages.last(), Some(&AnalysisStage::Completed));
}

// ============================================================================
// Configuration switches
// ============================================================================

#[tokio::test]
async fn test_focus_areas_restrict_improvements() {
    let configuration = AnalysisConfiguration {
        focus_areas: vec![Competency::BusinessImpact],
        ..AnalysisConfiguration::default()
    };
    let result = AnalysisPipeline::new(Settings::default())
        .analyze(request_with(
            "we met and talked",
            CareerLevel::Ic,
            Industry::Fintech,
            configuration,
        ))
        .await
        .unwrap();

    assert!(!result.improvement_areas.is_empty());
    assert!(result
        .improvement_areas
        .iter()
        .all(|a| a.competency == Competency::BusinessImpact));
}

#[tokio::test]
async fn test_modules_can_be_disabled() {
    let configuration = AnalysisConfiguration {
        generate_practice_modules: false,
        ..AnalysisConfiguration::default()
    };
    let result = AnalysisPipeline::new(Settings::default())
        .analyze(request_with(
            "we met and talked",
            CareerLevel::Ic,
            Industry::Fintech,
            configuration,
        ))
        .await
        .unwrap();

    assert!(result.module_recommendations.is_empty());
    assert!(!result.immediate_actions.is_empty());
}

#[tokio::test]
async fn test_depth_limits_evidence() {
    let text = "roadmap vision strategy strategic revenue ROI long-term";
    let quick = AnalysisConfiguration {
        analysis_depth: AnalysisDepth::Quick,
        ..AnalysisConfiguration::default()
    };
    let result = AnalysisPipeline::new(Settings::default())
        .analyze(request_with(text, CareerLevel::Ic, Industry::Consumer, quick))
        .await
        .unwrap();

    let strategic = result
        .transition_analysis
        .marker("strategic_language_emergence")
        .unwrap();
    assert!(strategic.frequency >= 4);
    assert_eq!(strategic.evidence.len(), 1);
}

#[tokio::test]
async fn test_overall_weights_come_from_settings() {
    let mut settings = Settings::default();
    settings.weights.transition = 1.0;
    settings.weights.industry = 0.0;
    settings.weights.meeting = 0.0;
    settings.weights.presence = 0.0;
    settings.weights.frameworks = 0.0;

    let result = AnalysisPipeline::new(settings)
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap();
    assert_eq!(result.overall_score, result.transition_analysis.progress_score);
}

#[tokio::test]
async fn test_bad_weights_fail_with_configuration_error() {
    let mut settings = Settings::default();
    settings.weights.transition = 0.9;

    let err = AnalysisPipeline::new(settings)
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_json_transcript_meeting_type_is_used() {
    let mut req = request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise);
    req.transcript.meeting_type = MeetingType::BoardPresentation;

    let result = AnalysisPipeline::new(Settings::default())
        .analyze(req)
        .await
        .unwrap();
    assert_eq!(
        result.meeting_type_analysis.meeting_type,
        MeetingType::BoardPresentation
    );
}
