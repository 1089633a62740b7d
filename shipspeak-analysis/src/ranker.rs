//! Insight ranking
//!
//! Orders insight candidates by `score × significance weight` (HIGH 3,
//! MEDIUM 2, LOW 1), descending, and truncates to a cap. The sort is stable,
//! so equal keys keep candidate order. Input slices are never reordered;
//! the ranked view is a new vector of references.

use crate::models::{ImprovementArea, PatternHighlight, StrengthArea};
use crate::types::Priority;

/// Anything the ranker can order
pub trait Rankable {
    /// Raw score (0-100)
    fn rank_score(&self) -> u32;

    fn significance(&self) -> Priority;

    /// Sort key
    fn weighted_score(&self) -> u32 {
        self.rank_score() * self.significance().weight()
    }
}

impl Rankable for PatternHighlight {
    fn rank_score(&self) -> u32 {
        self.score
    }

    fn significance(&self) -> Priority {
        self.significance
    }
}

/// Improvements rank by gap: the largest shortfall comes first
impl Rankable for ImprovementArea {
    fn rank_score(&self) -> u32 {
        self.gap
    }

    fn significance(&self) -> Priority {
        self.priority
    }
}

impl Rankable for StrengthArea {
    fn rank_score(&self) -> u32 {
        self.current_level
    }

    fn significance(&self) -> Priority {
        StrengthArea::significance(self)
    }
}

/// Ranked view over `candidates`, at most `cap` long
pub fn rank<T: Rankable>(candidates: &[T], cap: usize) -> Vec<&T> {
    let mut ranked: Vec<&T> = candidates.iter().collect();
    // sort_by_key is stable
    ranked.sort_by_key(|c| std::cmp::Reverse(c.weighted_score()));
    ranked.truncate(cap);
    ranked
}

/// Owned copy of the ranked view
pub fn rank_cloned<T: Rankable + Clone>(candidates: &[T], cap: usize) -> Vec<T> {
    rank(candidates, cap).into_iter().cloned().collect()
}
