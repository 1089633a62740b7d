//! Preprocessed transcript text shared by every detector
//!
//! Matching rules:
//! - Case-insensitive (ASCII folding, so byte offsets line up with the original text)
//! - A match must start on a word boundary
//! - Short terms (4 bytes or fewer, e.g. "ROI", "ICE", "we") must also end on a
//!   word boundary, allowing a trailing plural "s"
//! - Matches of one term never overlap

use crate::types::Evidence;
use sha2::{Digest, Sha256};

const SHORT_TERM_LEN: usize = 4;

/// Read-only view of the analysed text
#[derive(Debug, Clone)]
pub struct TranscriptScan {
    text: String,
    lower: String,
    word_count: usize,
    duration_seconds: f64,
    evidence_window: usize,
    max_evidence: usize,
}

impl TranscriptScan {
    pub fn new(text: impl Into<String>, duration_seconds: f64) -> Self {
        let text = text.into();
        let lower = text.to_ascii_lowercase();
        let word_count = text.split_whitespace().count();

        Self {
            text,
            lower,
            word_count,
            duration_seconds: duration_seconds.max(0.0),
            evidence_window: 20,
            max_evidence: 3,
        }
    }

    /// Override evidence snippet width and count
    pub fn with_evidence_limits(mut self, window_chars: usize, max_evidence: usize) -> Self {
        self.evidence_window = window_chars;
        self.max_evidence = max_evidence;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte offsets of every accepted match of `term`
    pub fn match_offsets(&self, term: &str) -> Vec<usize> {
        let needle = term.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.lower
            .match_indices(&needle)
            .map(|(offset, _)| offset)
            .filter(|&offset| self.is_word_match(offset, needle.len()))
            .collect()
    }

    pub fn count_term(&self, term: &str) -> u32 {
        self.match_offsets(term).len() as u32
    }

    /// Total matches across a term set
    pub fn count_terms(&self, terms: &[&str]) -> u32 {
        terms.iter().map(|t| self.count_term(t)).sum()
    }

    /// Number of terms in the set that match at least once
    pub fn distinct_terms_used(&self, terms: &[&str]) -> usize {
        terms
            .iter()
            .filter(|t| !self.match_offsets(t).is_empty())
            .count()
    }

    /// Evidence from the first match of each matching term, ordered by position
    pub fn evidence(&self, terms: &[&str], detector_id: &str) -> Vec<Evidence> {
        let seed = detector_seed(detector_id);
        let mut firsts: Vec<(usize, usize)> = terms
            .iter()
            .filter_map(|t| {
                self.match_offsets(t)
                    .first()
                    .map(|&offset| (offset, t.trim().len()))
            })
            .collect();

        firsts.sort_by_key(|(offset, _)| *offset);
        firsts.dedup_by_key(|(offset, _)| *offset);

        firsts
            .into_iter()
            .take(self.max_evidence)
            .map(|(offset, len)| Evidence {
                snippet: self.snippet(offset, len),
                offset,
                timestamp_seconds: self.timestamp_at(offset),
                strength: evidence_strength(seed, offset),
            })
            .collect()
    }

    /// Text around a match, `evidence_window` characters each side
    pub fn snippet(&self, offset: usize, len: usize) -> String {
        let end_of_match = (offset + len).min(self.text.len());

        let start = self.text[..offset]
            .char_indices()
            .rev()
            .take(self.evidence_window)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(offset);

        let end = self.text[end_of_match..]
            .char_indices()
            .nth(self.evidence_window)
            .map(|(i, _)| end_of_match + i)
            .unwrap_or(self.text.len());

        self.text[start..end].trim().to_string()
    }

    /// Map a byte offset onto the meeting timeline (tenths of a second)
    pub fn timestamp_at(&self, offset: usize) -> f64 {
        if self.text.is_empty() || self.duration_seconds <= 0.0 {
            return 0.0;
        }
        let fraction = offset as f64 / self.text.len() as f64;
        (self.duration_seconds * fraction * 10.0).round() / 10.0
    }

    fn is_word_match(&self, offset: usize, len: usize) -> bool {
        let before = self.lower[..offset].chars().next_back();
        if before.is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }

        if len > SHORT_TERM_LEN {
            return true;
        }

        let mut after = self.lower[offset + len..].chars();
        match after.next() {
            None => true,
            Some(c) if !c.is_alphanumeric() => true,
            // Plural acronyms ("KPIs", "OKRs")
            Some('s') => !after.next().is_some_and(|c| c.is_alphanumeric()),
            Some(_) => false,
        }
    }
}

/// Stable per-detector seed (first 8 bytes of SHA-256 of the id)
pub fn detector_seed(detector_id: &str) -> u64 {
    let digest = Sha256::digest(detector_id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Evidence strength in 60..=99 from match offset and detector seed
pub fn evidence_strength(seed: u64, offset: usize) -> u32 {
    let mixed = seed.wrapping_add(offset as u64);
    60 + (mixed % 40) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_counts() {
        let scan = TranscriptScan::new("Strategy first. Our STRATEGY is a strategy.", 0.0);
        assert_eq!(scan.count_term("strategy"), 3);
        assert_eq!(scan.count_terms(&["strategy", "first"]), 4);
    }

    #[test]
    fn test_short_terms_need_word_boundaries() {
        let scan = TranscriptScan::new("The price of our service; ICE scoring and two KPIs.", 0.0);
        assert_eq!(scan.count_term("ICE"), 1);
        assert_eq!(scan.count_term("KPI"), 1);
        assert_eq!(scan.count_term("our"), 1);
    }

    #[test]
    fn test_long_terms_allow_inflection() {
        let scan = TranscriptScan::new("Outcomes matter; outcome-driven teams win", 0.0);
        assert_eq!(scan.count_term("outcome"), 2);
    }

    #[test]
    fn test_empty_text_and_terms() {
        let scan = TranscriptScan::new("", 0.0);
        assert!(scan.is_empty());
        assert_eq!(scan.count_term("anything"), 0);
        assert!(scan.evidence(&["anything"], "d").is_empty());

        let scan = TranscriptScan::new("text", 0.0);
        assert_eq!(scan.count_term(""), 0);
    }

    #[test]
    fn test_evidence_is_ordered_and_capped() {
        let scan = TranscriptScan::new(
            "alpha one, beta two, gamma three, delta four",
            100.0,
        )
        .with_evidence_limits(5, 2);

        let evidence = scan.evidence(&["gamma", "alpha", "delta"], "test");
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].offset, 0);
        assert!(evidence[1].snippet.contains("gamma"));
        assert!(evidence[1].timestamp_seconds > 0.0);
    }

    #[test]
    fn test_evidence_strength_deterministic_and_bounded() {
        let seed = detector_seed("transition");
        for offset in 0..200 {
            let s = evidence_strength(seed, offset);
            assert!((60..=99).contains(&s));
            assert_eq!(s, evidence_strength(detector_seed("transition"), offset));
        }
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let scan = TranscriptScan::new("Ünïcödé prelude — then roadmap talk", 0.0)
            .with_evidence_limits(4, 3);
        let offset = scan.match_offsets("roadmap")[0];
        let snippet = scan.snippet(offset, "roadmap".len());
        assert!(snippet.contains("roadmap"));
    }
}
