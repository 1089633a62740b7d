//! Recommendation generation
//!
//! Converts ranked insights into time-boxed actions and practice-module
//! suggestions. Inputs are expected in ranked order; outputs are terminal.

use crate::models::{
    ActionCategory, ActionRecommendation, EffortTier, ImprovementArea, ModuleDifficulty,
    ModuleRecommendation, ProgressionInsight, StrengthArea,
};
use crate::types::{CareerLevel, Priority};

const MAX_IMMEDIATE: usize = 2;
const MODULE_SOURCES: usize = 3;

/// Level-specific default module: (name, priority, focus, outcome)
fn level_default(level: CareerLevel) -> Option<(&'static str, u8, &'static str, &'static str)> {
    match level {
        CareerLevel::Ic => Some((
            "Strategic Thinking Foundations",
            4,
            "Strategic mindset development",
            "Develop strategic vocabulary and thinking patterns",
        )),
        CareerLevel::Senior => Some((
            "Executive Communication",
            3,
            "Senior-level communication",
            "Master executive communication structure",
        )),
        CareerLevel::Staff => Some((
            "Influence Without Authority",
            2,
            "Cross-functional leadership",
            "Build influence across organization",
        )),
        CareerLevel::Principal | CareerLevel::Director | CareerLevel::Vp => None,
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationGenerator {
    max_actions: usize,
    max_modules: usize,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new(4, 6)
    }
}

impl RecommendationGenerator {
    pub fn new(max_actions: usize, max_modules: usize) -> Self {
        Self {
            max_actions,
            max_modules,
        }
    }

    /// IMMEDIATE from the top HIGH improvements, SHORT_TERM from the top
    /// strength, LONG_TERM from the first progression insight
    pub fn generate_actions(
        &self,
        improvements: &[ImprovementArea],
        strengths: &[StrengthArea],
        progression: &[ProgressionInsight],
    ) -> Vec<ActionRecommendation> {
        let mut actions: Vec<ActionRecommendation> = improvements
            .iter()
            .filter(|i| i.priority == Priority::High)
            .take(MAX_IMMEDIATE)
            .map(|i| ActionRecommendation {
                category: ActionCategory::Immediate,
                action: format!("Focus on {}", i.specific_focus.to_lowercase()),
                rationale: format!("{}-point gap identified in critical transition skill", i.gap),
                expected_impact: format!(
                    "Improve readiness by {}%",
                    (f64::from(i.gap) * 0.6).round() as u32
                ),
                effort: EffortTier::Medium,
                timeframe: "2-4 weeks".to_string(),
            })
            .collect();

        if let Some(strength) = strengths.first() {
            if let Some(leverage) = strength.leverage_opportunities.first() {
                actions.push(ActionRecommendation {
                    category: ActionCategory::ShortTerm,
                    action: leverage.clone(),
                    rationale: format!(
                        "Strong performance ({}%) creates opportunity",
                        strength.current_level
                    ),
                    expected_impact: "Increase visibility and demonstrate leadership capacity"
                        .to_string(),
                    effort: EffortTier::Low,
                    timeframe: "1-2 weeks".to_string(),
                });
            }
        }

        if let Some(insight) = progression.first() {
            actions.push(ActionRecommendation {
                category: ActionCategory::LongTerm,
                action: insight
                    .critical_actions
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Develop missing transition skills".to_string()),
                rationale: format!(
                    "{}-month progression timeline requires consistent execution",
                    insight.time_to_target
                ),
                expected_impact: format!("Achieve {} readiness", insight.transition_type),
                effort: EffortTier::High,
                timeframe: format!("{} months", insight.time_to_target),
            });
        }

        actions.truncate(self.max_actions);
        actions
    }

    /// First module of each of the top improvements, plus the level default;
    /// duplicates dropped, sorted by priority (1 first)
    ///
    /// Progression insights do not change module selection; they are taken
    /// so every generator entry point sees the same ranked inputs.
    pub fn generate_modules(
        &self,
        improvements: &[ImprovementArea],
        _progression: &[ProgressionInsight],
        level: CareerLevel,
    ) -> Vec<ModuleRecommendation> {
        let difficulty = ModuleDifficulty::for_level(level);

        let mut modules: Vec<ModuleRecommendation> = improvements
            .iter()
            .take(MODULE_SOURCES)
            .filter_map(|area| {
                area.practice_modules.first().map(|name| ModuleRecommendation {
                    module_type: name.clone(),
                    difficulty,
                    priority: area.priority.rank_number(),
                    focus_area: area.specific_focus.clone(),
                    expected_outcome: format!(
                        "Improve {} by {} points",
                        area.competency, area.gap
                    ),
                })
            })
            .collect();

        if let Some((name, priority, focus, outcome)) = level_default(level) {
            modules.push(ModuleRecommendation {
                module_type: name.to_string(),
                difficulty,
                priority,
                focus_area: focus.to_string(),
                expected_outcome: outcome.to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        modules.retain(|m| seen.insert(m.module_type.clone()));
        // stable: equal priorities keep source order
        modules.sort_by_key(|m| m.priority);
        modules.truncate(self.max_modules);
        modules
    }
}
