use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{AnalysisRequest, TranscriptMap};

/// Load an analysis request from a JSON file.
pub fn load_request_file(path: &Path) -> Result<AnalysisRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_request_json(&content)
}

/// Parse an analysis request from JSON.
///
/// Accepts both the full request shape (`metadata` + `transcript`) and a
/// bare transcript mapping.
pub fn parse_request_json(json: &str) -> Result<AnalysisRequest> {
    if let Ok(request) = serde_json::from_str::<AnalysisRequest>(json) {
        return Ok(request);
    }

    let transcript: TranscriptMap =
        serde_json::from_str(json).context("Failed to parse analysis request JSON")?;
    Ok(AnalysisRequest {
        metadata: serde_json::Map::new(),
        transcript,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_request() {
        let json = r#"{
            "metadata": {"candidate_id": "C-EDGE-01"},
            "transcript": {"interviewer": "Hello", "candidate": "Hi"}
        }"#;

        let request = parse_request_json(json).unwrap();

        assert_eq!(request.metadata["candidate_id"], "C-EDGE-01");
        assert_eq!(request.transcript["interviewer"], "Hello");
    }

    #[test]
    fn test_parse_bare_transcript_map() {
        let json = r#"{"interviewer": "Hello", "candidate": "Hi"}"#;

        let request = parse_request_json(json).unwrap();

        assert!(request.metadata.is_empty());
        assert_eq!(request.transcript.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_transcript_json() {
        // Not an object, and entry values must be strings
        assert!(parse_request_json(r#"["interviewer", "candidate"]"#).is_err());
        assert!(parse_request_json(r#"{"transcript": {"interviewer": 42}}"#).is_err());
    }

    #[test]
    fn test_string_valued_transcript_key_is_a_flat_entry() {
        // A bare map whose key happens to be "transcript" is still a transcript
        let request = parse_request_json(r#"{"transcript": "some text"}"#).unwrap();

        assert_eq!(request.transcript["transcript"], "some text");
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let error = load_request_file(Path::new("/nonexistent/request.json")).unwrap_err();

        assert!(error.to_string().contains("Failed to read file"));
    }
}
