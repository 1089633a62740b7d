//! Integration tests for cancellation, timeout and detector failure
//!
//! A run that does not complete must end in CANCELLED or ERROR, emit one
//! terminal event with the error set, and return no result.

mod helpers;

use helpers::*;
use shipspeak_analysis::{AnalysisError, AnalysisPipeline, CareerLevel, ErrorKind, Industry};
use shipspeak_common::config::Settings;
use shipspeak_common::AnalysisStage;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_cancel_before_start() {
    let recorder = ProgressRecorder::new();
    let pipeline =
        AnalysisPipeline::new(Settings::default()).with_progress(recorder.callback());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = pipeline
        .analyze_with_cancel(
            request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise),
            cancel,
        )
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    let events = recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].stage, AnalysisStage::Cancelled);
    assert!(events[0].error.is_some());
}

#[tokio::test]
async fn test_cancel_during_detection() {
    let recorder = ProgressRecorder::new();
    let pipeline = AnalysisPipeline::new(Settings::default())
        .with_detectors(slow_set(Duration::from_secs(2)))
        .with_progress(recorder.callback());

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = pipeline
        .analyze_with_cancel(
            request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise),
            cancel,
        )
        .await;

    // returns without waiting for the slow detector
    assert!(started.elapsed() < Duration::from_millis(1500));
    let err = outcome.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);

    let events = recorder.events();
    assert!(events.iter().all(|e| e.stage != AnalysisStage::Completed));
    let last = events.last().unwrap();
    assert_eq!(last.stage, AnalysisStage::Cancelled);
    // cancelled while DETECTING
    assert_eq!(last.progress, 15);
}

#[tokio::test]
async fn test_timeout_surfaces_as_timeout_error() {
    let mut settings = Settings::default();
    settings.pipeline.timeout_secs = 1;

    let recorder = ProgressRecorder::new();
    let pipeline = AnalysisPipeline::new(settings)
        .with_detectors(slow_set(Duration::from_secs(3)))
        .with_progress(recorder.callback());

    let err = pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalysisError::Timeout { budget_secs: 1 }));
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert!(!err.is_cancelled());

    let last = recorder.events().pop().unwrap();
    assert_eq!(last.stage, AnalysisStage::Error);
    assert!(last.error.unwrap().contains("1s budget"));
}

#[tokio::test]
async fn test_zero_timeout_disables_budget() {
    let mut settings = Settings::default();
    settings.pipeline.timeout_secs = 0;

    let result = AnalysisPipeline::new(settings)
        .with_detectors(slow_set(Duration::from_millis(1200)))
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_detector_panic_is_internal_error() {
    let recorder = ProgressRecorder::new();
    let pipeline = AnalysisPipeline::new(Settings::default())
        .with_detectors(panicking_set())
        .with_progress(recorder.callback());

    let err = pipeline
        .analyze(request(RICH_TRANSCRIPT, CareerLevel::Senior, Industry::Enterprise))
        .await
        .unwrap_err();

    match &err {
        AnalysisError::Internal { detector, message } => {
            assert_eq!(detector.as_deref(), Some("panicking_detector"));
            assert_eq!(message, "detector panicked");
        }
        other => panic!("expected Internal, got {:?}", other),
    }

    let last = recorder.events().pop().unwrap();
    assert_eq!(last.stage, AnalysisStage::Error);
    assert!(last.error.unwrap().contains("panicking_detector"));
}
