use std::collections::BTreeMap;

use serde::Deserialize;

/// Transcript field name → utterance text.
pub type TranscriptMap = BTreeMap<String, String>;

/// Inbound request at the service boundary: opaque caller metadata plus the
/// transcript mapping. Metadata is passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub transcript: TranscriptMap,
}

impl AnalysisRequest {
    /// Hand the transcript off to the pipeline, dropping the metadata.
    pub fn into_payload(self) -> TranscriptPayload {
        TranscriptPayload::Flat(self.transcript)
    }
}

/// A transcript as the pipeline accepts it: either the bare mapping or the
/// request shape that nests it under a `transcript` key. Both are handled
/// transparently.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranscriptPayload {
    Wrapped { transcript: TranscriptMap },
    Flat(TranscriptMap),
}

impl TranscriptPayload {
    /// The transcript mapping, with any outer wrapper stripped.
    pub fn entries(&self) -> &TranscriptMap {
        match self {
            TranscriptPayload::Wrapped { transcript } => transcript,
            TranscriptPayload::Flat(transcript) => transcript,
        }
    }
}

impl From<TranscriptMap> for TranscriptPayload {
    fn from(transcript: TranscriptMap) -> Self {
        TranscriptPayload::Flat(transcript)
    }
}

/// Speaker role derived from the transcript key naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SpeakerRole {
    Interviewer,
    Candidate,
    Other,
}

impl SpeakerRole {
    /// Classify a transcript key by case-insensitive substring match.
    pub fn classify(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.contains("interviewer") {
            SpeakerRole::Interviewer
        } else if key.contains("candidate") {
            SpeakerRole::Candidate
        } else {
            SpeakerRole::Other
        }
    }

    /// Sort rank: interviewer turns come first, unmatched keys last.
    pub fn rank(&self) -> u8 {
        match self {
            SpeakerRole::Interviewer => 0,
            SpeakerRole::Candidate => 1,
            SpeakerRole::Other => 2,
        }
    }

    /// Rendered speaker label. Keys matching neither role are attributed to
    /// the candidate.
    pub fn label(&self) -> &'static str {
        match self {
            SpeakerRole::Interviewer => "Interviewer",
            SpeakerRole::Candidate | SpeakerRole::Other => "Candidate",
        }
    }
}

/// A single labeled utterance after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: SpeakerRole,
    /// Ordinal within the role, disambiguating repeated turns
    pub turn_index: usize,
    pub text: String,
}

/// Canonical ordered rendering of a transcript.
///
/// Entries are sorted by role rank then key, so identical transcripts render
/// identically regardless of input field order. The rendered text is both the
/// prompt input and the cache fingerprint source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTranscript {
    entries: Vec<TranscriptEntry>,
    text: String,
}

impl NormalizedTranscript {
    pub fn new(entries: Vec<TranscriptEntry>, text: String) -> Self {
        Self { entries, text }
    }

    /// The `"Role: text"` blocks joined by blank lines.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
