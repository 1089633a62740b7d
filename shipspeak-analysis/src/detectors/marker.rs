//! Marker specifications and the shared scoring curve
//!
//! Every detector family scores term sets the same way:
//! count matches → capped linear confidence → trend band → evidence.
//! The heuristic constants live in the `MarkerSpec` tables of each family.

use super::text_scan::TranscriptScan;
use crate::types::{DetectionResult, TrendLabel};

/// `min(n × per_match, cap)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    pub per_match: u32,
    pub cap: u32,
}

impl Curve {
    pub const fn new(per_match: u32, cap: u32) -> Self {
        Self { per_match, cap }
    }

    pub fn apply(&self, matches: u32) -> u32 {
        matches.saturating_mul(self.per_match).min(self.cap).min(100)
    }
}

/// Trend classification bands (strictly-greater-than thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendBands {
    pub strong_above: u32,
    pub emerging_above: u32,
}

impl TrendBands {
    pub const fn new(strong_above: u32, emerging_above: u32) -> Self {
        Self {
            strong_above,
            emerging_above,
        }
    }

    pub fn classify(&self, matches: u32) -> TrendLabel {
        if matches == 0 {
            TrendLabel::Absent
        } else if matches > self.strong_above {
            TrendLabel::Strong
        } else if matches > self.emerging_above {
            TrendLabel::Emerging
        } else {
            TrendLabel::Weak
        }
    }
}

/// Second term set a marker needs alongside its primary terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Companion {
    pub terms: &'static [&'static str],
    /// Minimum companion matches for `detected`
    pub min: u32,
}

/// One named marker: a term set plus its scoring constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub terms: &'static [&'static str],
    pub confidence: Curve,
    pub benchmark: Curve,
    /// Minimum primary matches for `detected`
    pub detect_min: u32,
    pub trend: TrendBands,
    /// Counted into frequency and evidence; gates `detected` on its own minimum
    pub companion: Option<Companion>,
}

impl MarkerSpec {
    /// Baseline constants: ×20 capped 90, detected on any match,
    /// STRONG above 2, EMERGING above 0, benchmark ×15 capped 80
    pub const fn generic(
        id: &'static str,
        label: &'static str,
        terms: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            label,
            terms,
            confidence: Curve::new(20, 90),
            benchmark: Curve::new(15, 80),
            detect_min: 1,
            trend: TrendBands::new(2, 0),
            companion: None,
        }
    }

    /// Vocabulary-pattern constants: ×15 capped 95, STRONG above 3,
    /// EMERGING above 1, benchmark ×12 capped 90
    pub const fn vocabulary(
        id: &'static str,
        label: &'static str,
        terms: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            label,
            terms,
            confidence: Curve::new(15, 95),
            benchmark: Curve::new(12, 90),
            detect_min: 1,
            trend: TrendBands::new(3, 1),
            companion: None,
        }
    }

    pub const fn with_confidence(mut self, per_match: u32, cap: u32) -> Self {
        self.confidence = Curve::new(per_match, cap);
        self
    }

    pub const fn with_benchmark(mut self, per_match: u32, cap: u32) -> Self {
        self.benchmark = Curve::new(per_match, cap);
        self
    }

    pub const fn with_detect_min(mut self, detect_min: u32) -> Self {
        self.detect_min = detect_min;
        self
    }

    pub const fn with_trend(mut self, strong_above: u32, emerging_above: u32) -> Self {
        self.trend = TrendBands::new(strong_above, emerging_above);
        self
    }

    pub const fn with_companion(mut self, terms: &'static [&'static str], min: u32) -> Self {
        self.companion = Some(Companion { terms, min });
        self
    }

    /// Score this marker against the transcript
    pub fn evaluate(&self, scan: &TranscriptScan) -> DetectionResult {
        let primary = scan.count_terms(self.terms);
        let mut detected = primary >= self.detect_min.max(1);
        let mut frequency = primary;

        let evidence = match self.companion {
            Some(companion) => {
                let companion_matches = scan.count_terms(companion.terms);
                detected = detected && companion_matches >= companion.min;
                frequency += companion_matches;

                let all_terms: Vec<&str> =
                    self.terms.iter().chain(companion.terms).copied().collect();
                scan.evidence(&all_terms, self.id)
            }
            None => scan.evidence(self.terms, self.id),
        };

        DetectionResult {
            id: self.id.to_string(),
            label: self.label.to_string(),
            detected,
            confidence: self.confidence.apply(frequency),
            frequency,
            evidence,
            trend: self.trend.classify(frequency),
            benchmark_comparison: self.benchmark.apply(frequency),
        }
    }
}

/// Mean of a set of scores, 0 for an empty set
pub fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
