//! Settings model and loading
//!
//! Settings file resolution follows this priority order:
//! 1. Explicit path (command-line argument)
//! 2. `SHIPSPEAK_CONFIG` environment variable
//! 3. Platform config directory (`<config_dir>/shipspeak/config.toml`)
//! 4. Compiled defaults
//!
//! A missing settings file never aborts startup: a warning is logged and
//! compiled defaults are used. A file that exists but does not parse is an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_ENV: &str = "SHIPSPEAK_CONFIG";
/// Environment override for `pipeline.timeout_secs`
pub const TIMEOUT_ENV: &str = "SHIPSPEAK_TIMEOUT_SECS";
/// Environment override for `logging.level`
pub const LOG_LEVEL_ENV: &str = "SHIPSPEAK_LOG_LEVEL";

/// Tolerance for weight vectors summing to 1.0
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Score at which an insight is tagged HIGH significance
pub const HIGH_SIGNIFICANCE_SCORE: u32 = 85;

/// Complete settings tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineSettings,
    pub limits: LimitSettings,
    pub weights: OverallWeights,
    pub thresholds: ThresholdSettings,
    pub logging: LoggingSettings,
}

/// Orchestrator timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Nominal run length used for remaining-time estimates (seconds)
    pub time_budget_secs: u64,
    /// Wall-clock budget for one run (seconds); 0 disables the timeout
    pub timeout_secs: u64,
    /// Progress event bus capacity
    pub event_capacity: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            time_budget_secs: 120,
            timeout_secs: 120,
            event_capacity: 64,
        }
    }
}

/// Output caps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_highlights: usize,
    pub max_improvements: usize,
    pub max_strengths: usize,
    pub max_actions: usize,
    pub max_modules: usize,
    /// Characters of context kept on each side of an evidence match
    pub evidence_window_chars: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_highlights: 6,
            max_improvements: 5,
            max_strengths: 5,
            max_actions: 4,
            max_modules: 6,
            evidence_window_chars: 20,
        }
    }
}

/// Weights of the overall composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallWeights {
    pub transition: f64,
    pub industry: f64,
    pub meeting: f64,
    pub presence: f64,
    pub frameworks: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            transition: 0.25,
            industry: 0.20,
            meeting: 0.20,
            presence: 0.25,
            frameworks: 0.10,
        }
    }
}

impl OverallWeights {
    /// Weight entries keyed by dimension name
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("transition", self.transition),
            ("industry", self.industry),
            ("meeting", self.meeting),
            ("presence", self.presence),
            ("frameworks", self.frameworks),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }
}

/// Qualification thresholds for insights (0-100 scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub highlight: u32,
    pub transition_highlight: u32,
    pub high_significance: u32,
    pub improvement_gap_high: u32,
    pub strength_transition: u32,
    pub strength_score: u32,
    pub marker_improvement: u32,
    pub industry_usage: u32,
    pub meeting_improvement: u32,
    pub presence_improvement: u32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            highlight: 80,
            transition_highlight: 75,
            high_significance: HIGH_SIGNIFICANCE_SCORE,
            improvement_gap_high: 20,
            strength_transition: 75,
            strength_score: 80,
            marker_improvement: 60,
            industry_usage: 70,
            meeting_improvement: 70,
            presence_improvement: 70,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text (missing keys take defaults)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Check invariants that the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(Error::Config(format!(
                "overall weights must sum to 1.0 (got {:.6})",
                sum
            )));
        }
        if let Some((name, w)) = self.weights.entries().iter().find(|(_, w)| *w < 0.0) {
            return Err(Error::Config(format!("weight '{}' is negative ({})", name, w)));
        }

        let caps = [
            ("max_highlights", self.limits.max_highlights),
            ("max_improvements", self.limits.max_improvements),
            ("max_strengths", self.limits.max_strengths),
            ("max_actions", self.limits.max_actions),
            ("max_modules", self.limits.max_modules),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, cap)| *cap == 0) {
            return Err(Error::Config(format!("limits.{} must be at least 1", name)));
        }

        if self.pipeline.time_budget_secs == 0 {
            return Err(Error::Config(
                "pipeline.time_budget_secs must be at least 1".to_string(),
            ));
        }
        if self.pipeline.event_capacity == 0 {
            return Err(Error::Config(
                "pipeline.event_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides on top of file values
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => {
                    info!(timeout_secs = secs, "Timeout overridden from environment");
                    self.pipeline.timeout_secs = secs;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", TIMEOUT_ENV),
            }
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.logging.level = level.trim().to_string();
            }
        }
    }
}

/// Settings file resolver
///
/// Walks the priority order described in the module docs.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    explicit_path: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self { explicit_path }
    }

    /// Candidate settings path, if any source names one
    pub fn resolve_path(&self) -> Option<PathBuf> {
        // Priority 1: command-line argument
        if let Some(path) = &self.explicit_path {
            return Some(path.clone());
        }

        // Priority 2: environment variable
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        // Priority 3: platform config directory
        default_config_path()
    }

    /// Load settings, falling back to compiled defaults when no file exists
    pub fn load(&self) -> Result<Settings> {
        let mut settings = match self.resolve_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading settings");
                Settings::load_file(&path)?
            }
            Some(path) => {
                warn!(
                    path = %path.display(),
                    "Settings file not found, using compiled defaults"
                );
                Settings::default()
            }
            None => {
                warn!("No settings location available, using compiled defaults");
                Settings::default()
            }
        };

        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }
}

/// Platform default settings path (`<config_dir>/shipspeak/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shipspeak").join("config.toml"))
}
