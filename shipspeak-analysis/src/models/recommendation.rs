//! Recommendation records (terminal pipeline output)

use crate::types::CareerLevel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCategory {
    Immediate,
    ShortTerm,
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffortTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecommendation {
    pub category: ActionCategory,
    pub action: String,
    pub rationale: String,
    pub expected_impact: String,
    pub effort: EffortTier,
    pub timeframe: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleDifficulty {
    Foundation,
    Practice,
    Mastery,
}

impl ModuleDifficulty {
    pub fn for_level(level: CareerLevel) -> Self {
        match level {
            CareerLevel::Ic => ModuleDifficulty::Foundation,
            CareerLevel::Senior | CareerLevel::Staff => ModuleDifficulty::Practice,
            CareerLevel::Principal | CareerLevel::Director | CareerLevel::Vp => {
                ModuleDifficulty::Mastery
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecommendation {
    pub module_type: String,
    pub difficulty: ModuleDifficulty,
    /// 1 = highest
    pub priority: u8,
    pub focus_area: String,
    pub expected_outcome: String,
}
