//! shipspeak-analysis library interface
//!
//! Staged analysis of meeting transcripts for career-progression coaching:
//! concurrent pattern detectors, weighted aggregation, insight extraction,
//! ranking and recommendation generation, driven by [`AnalysisPipeline`].

pub mod aggregator;
pub mod benchmark;
pub mod config;
pub mod detectors;
pub mod error;
pub mod insights;
pub mod models;
pub mod pipeline;
pub mod preprocess;
pub mod ranker;
pub mod recommendations;
pub mod types;

pub use crate::detectors::{DetectorSet, PatternDetector};
pub use crate::error::{AnalysisError, ErrorKind, Result};
pub use crate::models::AnalysisResult;
pub use crate::pipeline::{AnalysisPipeline, ProgressCallback};
pub use crate::types::{
    AnalysisConfiguration, AnalyzeRequest, CareerLevel, Industry, MeetingType, Transcript,
};
