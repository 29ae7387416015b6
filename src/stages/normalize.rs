use crate::models::{NormalizedTranscript, SpeakerRole, TranscriptEntry, TranscriptPayload};

/// Render a transcript into its canonical ordered form.
///
/// Keys are sorted by `(role rank, key)`: interviewer turns first, then
/// candidate, then everything else, lexically within each role. With the
/// `interviewer`, `interviewer_1`, ... naming convention this recovers turn
/// order without an explicit counter. Total function - empty input yields an
/// empty rendering.
pub fn normalize_transcript(payload: &TranscriptPayload) -> NormalizedTranscript {
    let map = payload.entries();

    let mut ordered: Vec<(&str, &str)> = map
        .iter()
        .map(|(key, text)| (key.as_str(), text.as_str()))
        .collect();
    ordered.sort_by(|a, b| {
        let rank_a = SpeakerRole::classify(a.0).rank();
        let rank_b = SpeakerRole::classify(b.0).rank();
        rank_a.cmp(&rank_b).then_with(|| a.0.cmp(b.0))
    });

    let mut entries = Vec::with_capacity(ordered.len());
    let mut lines = Vec::with_capacity(ordered.len());
    let mut role_counts = [0usize; 3];

    for (key, text) in ordered {
        let role = SpeakerRole::classify(key);
        let turn_index = role_counts[role.rank() as usize];
        role_counts[role.rank() as usize] += 1;

        lines.push(format!("{}: {}", role.label(), text));
        entries.push(TranscriptEntry {
            role,
            turn_index,
            text: text.to_string(),
        });
    }

    NormalizedTranscript::new(entries, lines.join("\n\n"))
}
