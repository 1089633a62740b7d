//! Peer comparison
//!
//! Places the overall score against fixed reference populations.
//! `percentile = clamp(round(50 + 1.5 × (score − reference)), 1, 99)`

use crate::types::{BenchmarkLevel, CareerLevel};
use serde::{Deserialize, Serialize};

pub const INDUSTRY_REFERENCE: u32 = 68;
pub const TOP_PERFORMER_REFERENCE: u32 = 87;

/// Typical overall score at each career level
pub fn career_reference(level: CareerLevel) -> u32 {
    match level {
        CareerLevel::Ic => 55,
        CareerLevel::Senior => 62,
        CareerLevel::Staff => 68,
        CareerLevel::Principal => 72,
        CareerLevel::Director => 76,
        CareerLevel::Vp => 80,
    }
}

pub fn percentile(score: u32, reference: u32) -> u32 {
    let raw = 50.0 + 1.5 * (f64::from(score) - f64::from(reference));
    raw.round().clamp(1.0, 99.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerComparison {
    /// Percentile against the configured benchmark population
    pub overall_percentile: u32,
    pub career_level_percentile: u32,
    pub industry_percentile: u32,
    pub benchmark_level: BenchmarkLevel,
    pub reference_score: u32,
}

impl PeerComparison {
    pub fn compute(overall_score: u32, level: CareerLevel, benchmark: BenchmarkLevel) -> Self {
        let career = career_reference(level);
        let reference_score = match benchmark {
            BenchmarkLevel::Industry => INDUSTRY_REFERENCE,
            BenchmarkLevel::CareerLevel => career,
            BenchmarkLevel::TopPerformers => TOP_PERFORMER_REFERENCE,
        };

        Self {
            overall_percentile: percentile(overall_score, reference_score),
            career_level_percentile: percentile(overall_score, career),
            industry_percentile: percentile(overall_score, INDUSTRY_REFERENCE),
            benchmark_level: benchmark,
            reference_score,
        }
    }
}
