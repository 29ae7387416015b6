use crate::error::PipelineError;
use crate::models::{SpeakerRole, TranscriptPayload};

/// Validate transcript structure and content before any generation call.
///
/// Checks run in order and short-circuit on the first failure: non-empty,
/// minimum exchange count, both roles present, no blank entries. This is the
/// only validation that blocks the pipeline.
pub fn validate_transcript(payload: &TranscriptPayload) -> Result<(), PipelineError> {
    let entries = payload.entries();

    if entries.is_empty() {
        return Err(invalid("Transcript cannot be empty"));
    }
    if entries.len() < 2 {
        return Err(invalid("Transcript must have at least 2 exchanges"));
    }

    let has_interviewer = entries
        .keys()
        .any(|k| SpeakerRole::classify(k) == SpeakerRole::Interviewer);
    let has_candidate = entries
        .keys()
        .any(|k| SpeakerRole::classify(k) == SpeakerRole::Candidate);

    if !has_interviewer {
        return Err(invalid("Transcript must include interviewer questions"));
    }
    if !has_candidate {
        return Err(invalid("Transcript must include candidate responses"));
    }

    for (key, text) in entries {
        if text.trim().is_empty() {
            return Err(invalid(&format!("Entry '{key}' is empty")));
        }
    }

    Ok(())
}

fn invalid(reason: &str) -> PipelineError {
    PipelineError::InvalidTranscript(reason.to_string())
}
