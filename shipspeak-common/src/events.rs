//! Progress events for analysis runs
//!
//! Provides the analysis stage enum, the progress event record, and the
//! EventBus used to fan progress out to async consumers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Pipeline stage of one analysis run
///
/// Runs move strictly forward through
/// IDLE → PREPROCESSING → DETECTING → AGGREGATING → EXTRACTING → RANKING → RECOMMENDING → COMPLETED.
/// CANCELLED and ERROR are reachable from any non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStage {
    Idle,
    Preprocessing,
    Detecting,
    Aggregating,
    Extracting,
    Ranking,
    Recommending,
    Completed,
    Cancelled,
    Error,
}

impl AnalysisStage {
    /// Position in the forward pipeline order (terminal stages share the last slot)
    pub fn ordinal(self) -> u8 {
        match self {
            AnalysisStage::Idle => 0,
            AnalysisStage::Preprocessing => 1,
            AnalysisStage::Detecting => 2,
            AnalysisStage::Aggregating => 3,
            AnalysisStage::Extracting => 4,
            AnalysisStage::Ranking => 5,
            AnalysisStage::Recommending => 6,
            AnalysisStage::Completed | AnalysisStage::Cancelled | AnalysisStage::Error => 7,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AnalysisStage::Completed | AnalysisStage::Cancelled | AnalysisStage::Error
        )
    }

    /// Fixed percent-complete reported on entry to this stage
    ///
    /// Terminal failure stages return `None`; they report the percentage of
    /// the stage that was running when the run stopped.
    pub fn scheduled_progress(self) -> Option<u8> {
        match self {
            AnalysisStage::Idle => Some(0),
            AnalysisStage::Preprocessing => Some(5),
            AnalysisStage::Detecting => Some(15),
            AnalysisStage::Aggregating => Some(50),
            AnalysisStage::Extracting => Some(60),
            AnalysisStage::Ranking => Some(80),
            AnalysisStage::Recommending => Some(90),
            AnalysisStage::Completed => Some(100),
            AnalysisStage::Cancelled | AnalysisStage::Error => None,
        }
    }

    /// Human-readable task label
    pub fn task_label(self) -> &'static str {
        match self {
            AnalysisStage::Idle => "Waiting to start",
            AnalysisStage::Preprocessing => "Preprocessing transcript and speaker segments",
            AnalysisStage::Detecting => "Detecting communication patterns",
            AnalysisStage::Aggregating => "Aggregating composite scores and benchmarks",
            AnalysisStage::Extracting => "Extracting highlights, gaps and progression insights",
            AnalysisStage::Ranking => "Ranking insights by significance",
            AnalysisStage::Recommending => "Generating actions and practice modules",
            AnalysisStage::Completed => "Analysis complete",
            AnalysisStage::Cancelled => "Analysis cancelled",
            AnalysisStage::Error => "Analysis failed",
        }
    }
}

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub analysis_id: String,
    pub stage: AnalysisStage,
    /// Percent complete (0-100)
    pub progress: u8,
    pub estimated_seconds_remaining: u64,
    pub current_task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressEvent {
    /// Build an event, deriving remaining time from a fixed run budget
    pub fn new(
        analysis_id: impl Into<String>,
        stage: AnalysisStage,
        progress: u8,
        time_budget_secs: u64,
    ) -> Self {
        Self {
            analysis_id: analysis_id.into(),
            stage,
            progress: progress.min(100),
            estimated_seconds_remaining: estimated_seconds_remaining(time_budget_secs, progress),
            current_task: stage.task_label().to_string(),
            error: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn is_final(&self) -> bool {
        self.stage.is_terminal()
    }
}

/// `budget × (100 − progress) / 100`, rounded to the nearest second
pub fn estimated_seconds_remaining(time_budget_secs: u64, progress: u8) -> u64 {
    let remaining = 100 - u64::from(progress.min(100));
    (time_budget_secs * remaining + 50) / 100
}

/// Broadcast bus for progress events
///
/// Uses tokio::broadcast internally:
/// - Non-blocking publish (slow subscribers don't block the pipeline)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use shipspeak_common::events::{AnalysisStage, EventBus, ProgressEvent};
///
/// let bus = EventBus::new(16);
/// let mut rx = bus.subscribe();
///
/// bus.emit_lossy(ProgressEvent::new("run-1", AnalysisStage::Detecting, 15, 120));
///
/// let event = rx.try_recv().unwrap();
/// assert_eq!(event.stage, AnalysisStage::Detecting);
/// assert_eq!(event.estimated_seconds_remaining, 102);
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<ProgressEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: ProgressEvent,
    ) -> Result<usize, broadcast::error::SendError<ProgressEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
