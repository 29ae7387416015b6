use tracing::{info, warn};
use uuid::Uuid;

use crate::cache::ReportCache;
use crate::error::PipelineError;
use crate::llm::GenerationBackend;
use crate::models::{FinalReport, TranscriptPayload};
use crate::quality::check_report_quality;
use crate::stages::{StageController, normalize_transcript, validate_transcript};

/// Pipeline-level configuration, supplied at construction and never re-read
/// per call.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Extraction stage temperature (deterministic end of the range)
    pub extraction_temperature: f64,
    /// Synthesis stage temperature (more exploratory)
    pub synthesis_temperature: f64,
    /// Retry budget per generation stage
    pub max_attempts: u32,
    /// Whether the result cache holds anything at all
    pub enable_cache: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction_temperature: 0.0,
            synthesis_temperature: 0.5,
            max_attempts: 3,
            enable_cache: true,
        }
    }
}

/// Per-invocation switches.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub validate_input: bool,
    pub validate_output: bool,
    pub use_cache: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            validate_input: true,
            validate_output: true,
            use_cache: true,
        }
    }
}

/// The interview analysis pipeline: validate, normalize, cache lookup, run
/// both generation stages, quality-check, cache store.
///
/// Stateless across invocations apart from the cache, so one pipeline can
/// serve many concurrent requests.
pub struct InterviewPipeline<B> {
    backend: B,
    cache: ReportCache,
    config: PipelineConfig,
}

impl<B: GenerationBackend> InterviewPipeline<B> {
    pub fn new(backend: B, config: PipelineConfig) -> Self {
        info!(
            "initializing pipeline (max_attempts={}, cache={})",
            config.max_attempts, config.enable_cache
        );
        Self {
            cache: ReportCache::new(config.enable_cache),
            backend,
            config,
        }
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Analyze one transcript and produce the final report.
    ///
    /// Validation failures raise immediately; a cache hit short-circuits
    /// before any generation call; quality issues are logged, never fatal.
    pub async fn analyze(
        &self,
        payload: &TranscriptPayload,
        options: &AnalyzeOptions,
    ) -> Result<FinalReport, PipelineError> {
        let request_id = Uuid::new_v4();
        info!("[{request_id}] starting interview analysis");

        if options.validate_input {
            validate_transcript(payload)?;
            info!("[{request_id}] transcript is valid");
        }

        let normalized = normalize_transcript(payload);
        info!(
            "[{request_id}] transcript normalized ({} entries, {} chars)",
            normalized.entry_count(),
            normalized.text().len()
        );

        let fingerprint = ReportCache::fingerprint(normalized.text());

        if options.use_cache {
            if let Some(report) = self.cache.lookup(&fingerprint) {
                info!("[{request_id}] cache hit, returning cached report");
                return Ok(report);
            }
        }

        let controller = StageController::new(&self.backend, &self.config);
        let report = controller.run(&normalized).await?;

        if options.validate_output {
            let quality = check_report_quality(&report);
            if quality.passed {
                info!("[{request_id}] report quality validated");
            } else {
                for issue in &quality.issues {
                    warn!("[{request_id}] report quality issue: {issue}");
                }
            }
        }

        if options.use_cache {
            self.cache.store(&fingerprint, &report);
        }

        info!("[{request_id}] analysis complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::testing::StubBackend;

    fn transcript() -> TranscriptPayload {
        serde_json::from_str(
            r#"{
                "metadata": {"candidate_id": "C-1"},
                "transcript": {"interviewer": "Q?", "candidate": "A."}
            }"#,
        )
        .unwrap()
    }

    fn analysis_json() -> String {
        r#"{"snippets": [
            {"topic": "Fundamentals", "quote": "A.", "assessment": "Terse but correct", "sentiment": "neutral"}
        ]}"#
        .to_string()
    }

    fn report_json() -> String {
        r#"{
            "candidate_summary": {
                "headline": "Concise communicator with solid instincts",
                "overall_impression": "Short answers throughout, but every one of them was accurate; more elaboration would make the strengths easier to see."
            },
            "insights": {
                "strengths": [{"skill": "Accuracy", "evidence": "Correct answer"}],
                "weaknesses": [{"skill": "Elaboration", "evidence": "One-word answers", "priority": "Low"}]
            },
            "development_plan": {
                "priority_topics": ["Communication"],
                "roadmap": [
                    {"timespan": "Day 1-5", "focus": "Practice explanations", "activities": ["Explain one concept daily"]},
                    {"timespan": "Day 6-10", "focus": "Mock interviews", "activities": ["Two mock sessions"]}
                ],
                "recommended_resources": [
                    {"topic": "Communication", "link": "https://example.com/talks", "reason": "Worked examples"}
                ]
            }
        }"#
        .to_string()
    }

    fn loaded_backend() -> StubBackend {
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(report_json()));
        backend
    }

    #[tokio::test]
    async fn test_end_to_end_returns_synthesized_report() {
        let backend = loaded_backend();
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());

        let report = pipeline
            .analyze(&transcript(), &AnalyzeOptions::default())
            .await
            .unwrap();

        let expected: FinalReport = serde_json::from_str(&report_json()).unwrap();
        assert_eq!(report, expected);
        assert_eq!(backend.generate_calls(), 2);
        assert_eq!(pipeline.cache().stats().size, 1);
    }

    #[tokio::test]
    async fn test_second_call_hits_cache_with_zero_generation_calls() {
        let backend = loaded_backend();
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());
        let options = AnalyzeOptions::default();

        let first = pipeline.analyze(&transcript(), &options).await.unwrap();
        let second = pipeline.analyze(&transcript(), &options).await.unwrap();

        assert_eq!(first, second);
        // Both stages ran exactly once; the second call never reached the backend
        assert_eq!(backend.generate_calls(), 2);
        assert_eq!(pipeline.cache().stats().size, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_reinvokes_both_stages() {
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(report_json()));
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(report_json()));

        let config = PipelineConfig {
            enable_cache: false,
            ..Default::default()
        };
        let pipeline = InterviewPipeline::new(&backend, config);
        let options = AnalyzeOptions::default();

        pipeline.analyze(&transcript(), &options).await.unwrap();
        pipeline.analyze(&transcript(), &options).await.unwrap();

        assert_eq!(backend.generate_calls(), 4);
        assert_eq!(pipeline.cache().stats().size, 0);
    }

    #[tokio::test]
    async fn test_invalid_transcript_rejected_before_generation() {
        let backend = StubBackend::new();
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());
        let payload: TranscriptPayload =
            serde_json::from_str(r#"{"interviewer": "Q?"}"#).unwrap();

        let error = pipeline
            .analyze(&payload, &AnalyzeOptions::default())
            .await
            .unwrap_err();

        assert!(error.is_client_error());
        assert_eq!(backend.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_validation_can_be_skipped() {
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(report_json()));
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());
        let payload: TranscriptPayload =
            serde_json::from_str(r#"{"interviewer": "Q?"}"#).unwrap();
        let options = AnalyzeOptions {
            validate_input: false,
            ..Default::default()
        };

        let report = pipeline.analyze(&payload, &options).await;
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_quality_issues_do_not_block() {
        // Report that trips the quality checks: short headline, no strengths
        let thin_report = r#"{
            "candidate_summary": {"headline": "Ok", "overall_impression": "Fine."},
            "insights": {"strengths": [], "weaknesses": []},
            "development_plan": {"priority_topics": [], "roadmap": [], "recommended_resources": []}
        }"#;
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(thin_report.to_string()));
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());

        let report = pipeline
            .analyze(&transcript(), &AnalyzeOptions::default())
            .await
            .unwrap();

        assert!(report.insights.strengths.is_empty());
    }

    #[tokio::test]
    async fn test_identical_transcripts_share_one_fingerprint() {
        let backend = loaded_backend();
        let pipeline = InterviewPipeline::new(&backend, PipelineConfig::default());
        let options = AnalyzeOptions::default();

        // Same content, different field order in the source JSON
        let a: TranscriptPayload =
            serde_json::from_str(r#"{"interviewer": "Q?", "candidate": "A."}"#).unwrap();
        let b: TranscriptPayload =
            serde_json::from_str(r#"{"candidate": "A.", "interviewer": "Q?"}"#).unwrap();

        pipeline.analyze(&a, &options).await.unwrap();
        pipeline.analyze(&b, &options).await.unwrap();

        assert_eq!(pipeline.cache().stats().size, 1);
    }
}
