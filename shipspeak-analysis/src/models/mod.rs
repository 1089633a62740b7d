//! Data models for shipspeak-analysis
//!
//! - Run state machine
//! - Insight and recommendation records
//! - Result envelope

pub mod analysis_run;
pub mod insight;
pub mod recommendation;
pub mod result;

pub use analysis_run::{AnalysisRun, StateTransition};
pub use insight::{ImprovementArea, PatternHighlight, ProgressionInsight, StrengthArea};
pub use recommendation::{
    ActionCategory, ActionRecommendation, EffortTier, ModuleDifficulty, ModuleRecommendation,
};
pub use result::{AnalysisResult, SpeakerSummary};
