use serde_json::Value;

/// System prompt for the extraction stage. Holistic judgment is forbidden:
/// the stage must stay factual and atomic.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are a meticulous, unbiased interview analyst. Your sole job is to read the following interview transcript and extract key performance snippets.

You must not judge or synthesize the overall performance. Only extract factual, self-contained observations.

Rules:
1. Extract 3-7 snippets.
2. Each snippet must be objective and factual.
3. Each snippet must include the EXACT quote from the transcript.
4. Tag each snippet's sentiment: 'positive', 'negative', or 'neutral'.
5. No overall judgments - just observations.

Output MUST be valid JSON matching the provided schema."#;

/// System prompt for the synthesis stage.
pub const SYNTHESIS_SYSTEM_PROMPT: &str = r#"You are a world-class Senior Engineering Manager and empathetic mentor. You have been given a factual, pre-analyzed report from an analyst about an intern candidate.

Your task: Generate a comprehensive, actionable report.

Process:
1. Summarize the candidate in 2-3 sentences (headline + impression).
2. Identify 2-3 key strengths with evidence.
3. Identify 2-3 key weaknesses with evidence.
4. Create a prioritized 2-week development roadmap (5-7 steps).
5. Recommend 3-5 high-quality learning resources. Every resource link must be an absolute http or https URL.

Tone: Professional but encouraging. Focus on growth.

Output MUST be valid JSON matching the provided schema."#;

/// System prompt for the repair pass over malformed output.
pub const REPAIR_SYSTEM_PROMPT: &str = r#"You are a formatting assistant. You will be given a malformed JSON document and the schema it must conform to. Re-emit the same content as valid JSON matching the schema exactly.

Do not add, remove, or invent information. Output only the JSON document."#;

/// Build the extraction-stage user prompt from the normalized transcript.
pub fn build_extraction_prompt(transcript: &str) -> String {
    format!("Interview Transcript:\n{transcript}")
}

/// Build the synthesis-stage user prompt from the serialized analysis report.
pub fn build_synthesis_prompt(analysis_report: &str) -> String {
    format!("Analyst Report:\n{analysis_report}")
}

/// Build the repair prompt pairing the malformed output with its schema.
pub fn build_repair_prompt(malformed: &str, schema: &Value) -> String {
    let schema = serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string());
    format!("Schema:\n{schema}\n\nMalformed output:\n{malformed}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_contains_transcript() {
        let prompt = build_extraction_prompt("Interviewer: Q?\n\nCandidate: A.");
        assert!(prompt.starts_with("Interview Transcript:"));
        assert!(prompt.contains("Candidate: A."));
    }

    #[test]
    fn test_repair_prompt_contains_schema_and_output() {
        let schema = serde_json::json!({"type": "object"});
        let prompt = build_repair_prompt("{\"snippets\": [", &schema);
        assert!(prompt.contains("\"object\""));
        assert!(prompt.contains("{\"snippets\": ["));
    }

    #[test]
    fn test_sentiment_taxonomy_is_consistent() {
        // The prompt must use the schema's tag set, not strength/weakness
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("'positive', 'negative', or 'neutral'"));
        assert!(!EXTRACTION_SYSTEM_PROMPT.contains("'strength'"));
    }
}
