//! Transcript preprocessing
//!
//! Validates the transcript and prepares everything detectors read:
//! the case-folded scan, speaker talk-time summary and the text digest.
//! Runs before any detector; empty or malformed input is rejected here.
//! Segments feed the speaker summary only, never the analysed text.

use crate::detectors::TranscriptScan;
use crate::error::{AnalysisError, Result};
use crate::models::SpeakerSummary;
use crate::types::{AnalysisDepth, Transcript};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Audio quality below this is logged as degraded input
pub const LOW_AUDIO_QUALITY: f64 = 0.5;

/// Preprocessing output consumed by the detector stage
#[derive(Debug, Clone)]
pub struct PreparedTranscript {
    pub scan: TranscriptScan,
    pub speakers: Vec<SpeakerSummary>,
    /// SHA-256 hex of the transcript text
    pub digest: String,
    pub duration_seconds: f64,
}

pub fn prepare(
    transcript: &Transcript,
    depth: AnalysisDepth,
    evidence_window_chars: usize,
) -> Result<PreparedTranscript> {
    validate(transcript)?;
    let text = transcript.text.clone();

    if let Some(quality) = &transcript.audio_quality {
        if quality.overall < LOW_AUDIO_QUALITY {
            warn!(
                transcript_id = %transcript.id,
                audio_quality = quality.overall,
                "Low audio quality; transcript may contain recognition errors"
            );
        }
    }

    let duration_seconds = if transcript.duration_seconds > 0.0 {
        transcript.duration_seconds
    } else {
        transcript
            .segments
            .iter()
            .map(|s| s.end_offset)
            .fold(0.0, f64::max)
    };

    let speakers = speaker_summary(transcript);
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    let scan = TranscriptScan::new(text, duration_seconds)
        .with_evidence_limits(evidence_window_chars, depth.max_evidence());

    debug!(
        transcript_id = %transcript.id,
        words = scan.word_count(),
        speakers = speakers.len(),
        duration_seconds,
        "Transcript prepared"
    );

    Ok(PreparedTranscript {
        scan,
        speakers,
        digest,
        duration_seconds,
    })
}

fn validate(transcript: &Transcript) -> Result<()> {
    if transcript.text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput(format!(
            "transcript '{}' has no text",
            transcript.id
        )));
    }

    if !transcript.duration_seconds.is_finite() || transcript.duration_seconds < 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "duration must be a non-negative number of seconds, got {}",
            transcript.duration_seconds
        )));
    }

    for (index, segment) in transcript.segments.iter().enumerate() {
        let finite = segment.start_offset.is_finite() && segment.end_offset.is_finite();
        if !finite || segment.start_offset < 0.0 || segment.end_offset < segment.start_offset {
            return Err(AnalysisError::InvalidInput(format!(
                "segment {} ({}) has invalid offsets {}..{}",
                index, segment.speaker_id, segment.start_offset, segment.end_offset
            )));
        }
    }

    if let Some(quality) = &transcript.audio_quality {
        if !(0.0..=1.0).contains(&quality.overall) {
            return Err(AnalysisError::InvalidInput(format!(
                "audio quality must be within 0..1, got {}",
                quality.overall
            )));
        }
    }

    Ok(())
}

/// Talk time per speaker, in first-appearance order
pub fn speaker_summary(transcript: &Transcript) -> Vec<SpeakerSummary> {
    let mut speakers: Vec<SpeakerSummary> = Vec::new();

    for segment in &transcript.segments {
        let talk = segment.end_offset - segment.start_offset;
        match speakers.iter_mut().find(|s| s.speaker_id == segment.speaker_id) {
            Some(summary) => {
                summary.segment_count += 1;
                summary.talk_time_seconds += talk;
            }
            None => speakers.push(SpeakerSummary {
                speaker_id: segment.speaker_id.clone(),
                segment_count: 1,
                talk_time_seconds: talk,
                talk_share: 0.0,
            }),
        }
    }

    let total: f64 = speakers.iter().map(|s| s.talk_time_seconds).sum();
    if total > 0.0 {
        for summary in &mut speakers {
            summary.talk_share = summary.talk_time_seconds / total;
        }
    }

    speakers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{AudioQuality, MeetingType, SpeakerSegment};

    fn segment(speaker: &str, text: &str, start: f64, end: f64) -> SpeakerSegment {
        SpeakerSegment {
            speaker_id: speaker.to_string(),
            text: text.to_string(),
            start_offset: start,
            end_offset: end,
        }
    }

    #[test]
    fn test_blank_text_is_invalid_input() {
        let transcript = Transcript::from_text("t", "   \n\t", MeetingType::OneOnOne);
        let err = prepare(&transcript, AnalysisDepth::Standard, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_blank_text_rejected_even_with_segments() {
        let mut transcript = Transcript::from_text("t", "   ", MeetingType::OneOnOne);
        transcript.segments = vec![segment("alice", "I recommend we ship", 0.0, 10.0)];

        let err = prepare(&transcript, AnalysisDepth::Standard, 20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_segments_build_speaker_summary() {
        let mut transcript =
            Transcript::from_text("t", "Our roadmap sounds good", MeetingType::OneOnOne);
        transcript.segments = vec![
            segment("alice", "Our roadmap", 0.0, 30.0),
            segment("bob", "sounds good", 30.0, 40.0),
            segment("alice", "ship it", 40.0, 50.0),
        ];

        let prepared = prepare(&transcript, AnalysisDepth::Quick, 20).unwrap();
        assert_eq!(prepared.scan.text(), "Our roadmap sounds good");
        assert_eq!(prepared.duration_seconds, 50.0);

        assert_eq!(prepared.speakers.len(), 2);
        assert_eq!(prepared.speakers[0].speaker_id, "alice");
        assert_eq!(prepared.speakers[0].segment_count, 2);
        assert!((prepared.speakers[0].talk_share - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_segment_rejected() {
        let mut transcript = Transcript::from_text("t", "hello", MeetingType::OneOnOne);
        transcript.segments = vec![segment("a", "hello", 10.0, 5.0)];
        assert!(matches!(
            prepare(&transcript, AnalysisDepth::Standard, 20),
            Err(AnalysisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_low_audio_quality_still_prepares() {
        let mut transcript = Transcript::from_text("t", "hello", MeetingType::OneOnOne);
        transcript.audio_quality = Some(AudioQuality {
            overall: 0.2,
            clarity: None,
            noise_level: None,
        });
        assert!(prepare(&transcript, AnalysisDepth::Standard, 20).is_ok());
    }

    #[test]
    fn test_digest_is_stable() {
        let transcript = Transcript::from_text("t", "abc", MeetingType::OneOnOne);
        let prepared = prepare(&transcript, AnalysisDepth::Standard, 20).unwrap();
        assert_eq!(
            prepared.digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
