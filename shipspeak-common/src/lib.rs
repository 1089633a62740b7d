//! # ShipSpeak Common Library
//!
//! Shared code for the ShipSpeak analysis crates including:
//! - Error types
//! - Settings model and TOML/environment loading
//! - Progress event types and the broadcast event bus

pub mod config;
pub mod error;
pub mod events;

pub use error::{Error, Result};
pub use events::{AnalysisStage, EventBus, ProgressEvent};
