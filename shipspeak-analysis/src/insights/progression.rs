//! Progression insights
//!
//! One entry for the evaluated career-level pair, plus an acceleration entry
//! when an accelerator fired.

use crate::detectors::transition::TransitionAccelerator;
use crate::detectors::TransitionAnalysis;
use crate::models::ProgressionInsight;
use crate::types::CareerLevel;

const MILESTONES: [&str; 4] = [
    "Demonstrate consistent framework application",
    "Build cross-functional influence",
    "Lead strategic initiatives",
    "Achieve stakeholder recognition",
];

const DEFAULT_ACTIONS: [&str; 4] = [
    "Strengthen strategic communication patterns",
    "Develop executive presence markers",
    "Build industry expertise credibility",
    "Practice framework-driven decision making",
];

const MAX_ACTIONS: usize = 4;
const ACCELERATED_READINESS: u32 = 85;
const MIN_ACCELERATED_MONTHS: u32 = 3;

/// `round(base(target) × max(0.5, (100 − readiness) / 100))`
pub fn months_to_target(target: CareerLevel, readiness: u32) -> u32 {
    let remaining = f64::from(100u32.saturating_sub(readiness)) / 100.0;
    (f64::from(target.base_months_to_reach()) * remaining.max(0.5)).round() as u32
}

/// Three milestones once readiness passes 70, four otherwise
pub fn milestones(readiness: u32) -> Vec<String> {
    let count = if readiness > 70 { 3 } else { 4 };
    MILESTONES.iter().take(count).map(|s| s.to_string()).collect()
}

/// Default actions, led by the weakest blocker when there is one
pub fn critical_actions(analysis: &TransitionAnalysis) -> Vec<String> {
    let mut actions: Vec<String> = analysis
        .weakest_blocker()
        .map(|b| format!("Address {} pattern", b.label.to_lowercase()))
        .into_iter()
        .collect();
    actions.extend(DEFAULT_ACTIONS.iter().map(|s| s.to_string()));
    actions.truncate(MAX_ACTIONS);
    actions
}

fn acceleration(accelerator: &TransitionAccelerator, months: u32) -> ProgressionInsight {
    ProgressionInsight {
        transition_type: "Acceleration Opportunities".to_string(),
        readiness_score: ACCELERATED_READINESS,
        time_to_target: months.saturating_sub(3).max(MIN_ACCELERATED_MONTHS),
        key_milestones: vec![
            format!("Leverage {}", accelerator.label.to_lowercase()),
            "Expand influence scope".to_string(),
            "Seek stretch assignments".to_string(),
        ],
        critical_actions: accelerator.leverage.clone(),
    }
}

pub(super) fn extract(analysis: &TransitionAnalysis) -> Vec<ProgressionInsight> {
    let readiness = analysis.progress_score;
    let months = months_to_target(analysis.pair.target, readiness);

    let mut out = vec![ProgressionInsight {
        transition_type: analysis.pair.label(),
        readiness_score: readiness,
        time_to_target: months,
        key_milestones: milestones(readiness),
        critical_actions: critical_actions(analysis),
    }];

    if let Some(accelerator) = analysis.accelerators.iter().max_by_key(|a| a.confidence) {
        out.push(acceleration(accelerator, months));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::transition::TransitionBlocker;
    use crate::types::{CareerPair, Priority};

    fn analysis(progress: u32) -> TransitionAnalysis {
        TransitionAnalysis {
            pair: CareerPair::resolve(CareerLevel::Senior, None).unwrap(),
            markers: Vec::new(),
            progress_score: progress,
            blockers: Vec::new(),
            accelerators: Vec::new(),
        }
    }

    #[test]
    fn test_months_to_target() {
        // STAFF base 18
        assert_eq!(months_to_target(CareerLevel::Staff, 0), 18);
        assert_eq!(months_to_target(CareerLevel::Staff, 40), 11);
        // floor at half the base
        assert_eq!(months_to_target(CareerLevel::Staff, 90), 9);
        assert_eq!(months_to_target(CareerLevel::Vp, 100), 18);
    }

    #[test]
    fn test_milestone_count_by_readiness() {
        assert_eq!(milestones(70).len(), 4);
        assert_eq!(milestones(71).len(), 3);
    }

    #[test]
    fn test_blocker_leads_critical_actions() {
        let mut a = analysis(30);
        a.blockers.push(TransitionBlocker {
            id: "BURIED_RECOMMENDATION".to_string(),
            label: "Buried Recommendation".to_string(),
            severity: Priority::High,
            marker_id: "executive_communication_structure".to_string(),
            confidence: 0,
            steps: Vec::new(),
        });

        let actions = critical_actions(&a);
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[0], "Address buried recommendation pattern");
        assert_eq!(actions[3], "Build industry expertise credibility");
    }

    #[test]
    fn test_default_critical_actions_without_blocker() {
        assert_eq!(
            critical_actions(&analysis(80)),
            vec![
                "Strengthen strategic communication patterns",
                "Develop executive presence markers",
                "Build industry expertise credibility",
                "Practice framework-driven decision making",
            ]
        );
    }

    #[test]
    fn test_acceleration_entry() {
        let mut a = analysis(50);
        assert_eq!(extract(&a).len(), 1);

        a.accelerators.push(TransitionAccelerator {
            id: "EXECUTIVE_FRAMEWORK_FLUENCY".to_string(),
            label: "Executive Framework Fluency".to_string(),
            marker_id: "framework_mastery".to_string(),
            confidence: 90,
            leverage: vec!["Teach frameworks".to_string()],
        });
        let insights = extract(&a);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].transition_type, "SENIOR to STAFF");
        assert_eq!(insights[0].time_to_target, 9);
        assert_eq!(insights[1].readiness_score, 85);
        assert_eq!(insights[1].time_to_target, 6);
        assert_eq!(insights[1].critical_actions, vec!["Teach frameworks".to_string()]);
    }
}
