//! Analysis run state machine
//!
//! One `AnalysisRun` per pipeline invocation, owned by the orchestrator and
//! passed through each stage. Stages move strictly forward; CANCELLED and
//! ERROR are reachable from any non-terminal stage.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shipspeak_common::AnalysisStage;
use uuid::Uuid;

/// Stage transition record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTransition {
    pub analysis_id: String,
    pub old_stage: AnalysisStage,
    pub new_stage: AnalysisStage,
    pub transitioned_at: DateTime<Utc>,
}

/// In-memory run record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRun {
    pub analysis_id: String,
    pub stage: AnalysisStage,
    /// Percent reported by the most recent progress event
    pub progress: u8,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl AnalysisRun {
    pub fn new() -> Self {
        Self {
            analysis_id: Uuid::new_v4().to_string(),
            stage: AnalysisStage::Idle,
            progress: 0,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Whether `next` is a legal move from the current stage
    pub fn can_transition_to(&self, next: AnalysisStage) -> bool {
        if self.stage.is_terminal() {
            return false;
        }
        match next {
            AnalysisStage::Cancelled | AnalysisStage::Error => true,
            AnalysisStage::Idle => false,
            _ => next.ordinal() == self.stage.ordinal() + 1,
        }
    }

    /// Move to `next`, stamping the end time on terminal stages
    pub fn transition_to(&mut self, next: AnalysisStage) -> Result<StateTransition> {
        if !self.can_transition_to(next) {
            return Err(AnalysisError::Internal {
                detector: None,
                message: format!("illegal stage transition {:?} → {:?}", self.stage, next),
            });
        }

        let transition = StateTransition {
            analysis_id: self.analysis_id.clone(),
            old_stage: self.stage,
            new_stage: next,
            transitioned_at: Utc::now(),
        };
        self.stage = next;
        if let Some(progress) = next.scheduled_progress() {
            self.progress = progress;
        }

        if next.is_terminal() {
            self.ended_at = Some(transition.transitioned_at);
        }

        Ok(transition)
    }

    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    pub fn elapsed_millis(&self) -> u64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds().max(0) as u64
    }
}

impl Default for AnalysisRun {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORWARD: [AnalysisStage; 7] = [
        AnalysisStage::Preprocessing,
        AnalysisStage::Detecting,
        AnalysisStage::Aggregating,
        AnalysisStage::Extracting,
        AnalysisStage::Ranking,
        AnalysisStage::Recommending,
        AnalysisStage::Completed,
    ];

    #[test]
    fn test_forward_path_to_completed() {
        let mut run = AnalysisRun::new();
        for stage in FORWARD {
            let t = run.transition_to(stage).unwrap();
            assert_eq!(t.new_stage, stage);
        }
        assert!(run.is_terminal());
        assert_eq!(run.progress, 100);
        assert!(run.ended_at.is_some());
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        let mut run = AnalysisRun::new();
        assert!(run.transition_to(AnalysisStage::Detecting).is_err());

        run.transition_to(AnalysisStage::Preprocessing).unwrap();
        run.transition_to(AnalysisStage::Detecting).unwrap();
        assert!(run.transition_to(AnalysisStage::Preprocessing).is_err());
    }

    #[test]
    fn test_cancel_keeps_progress_and_is_terminal() {
        let mut run = AnalysisRun::new();
        run.transition_to(AnalysisStage::Preprocessing).unwrap();
        run.transition_to(AnalysisStage::Detecting).unwrap();
        run.transition_to(AnalysisStage::Cancelled).unwrap();

        assert_eq!(run.progress, 15);
        assert!(run.transition_to(AnalysisStage::Aggregating).is_err());
        assert!(run.transition_to(AnalysisStage::Error).is_err());
    }
}
