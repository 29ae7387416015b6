use tracing::info;

use crate::error::{PipelineError, Stage};
use crate::llm::{
    EXTRACTION_SYSTEM_PROMPT, GenerationBackend, SYNTHESIS_SYSTEM_PROMPT,
    analysis_report_schema, build_extraction_prompt, build_synthesis_prompt, final_report_schema,
};
use crate::models::{AnalysisReport, FinalReport, NormalizedTranscript};
use crate::pipeline::PipelineConfig;
use crate::stages::runner::{StageSpec, run_stage};

/// Execution states of the two-stage pipeline. Transitions only move
/// forward; `Failed` is terminal and reachable from either generation state.
#[derive(Debug)]
enum PipelineState {
    Idle,
    Extracting,
    Synthesizing { analysis: AnalysisReport },
    Done { report: FinalReport },
    Failed { error: PipelineError },
}

/// Sequences the extraction and synthesis stages, threading the extraction
/// output into the synthesis input. Extraction stays factual and atomic;
/// synthesis receives the condensed analyst report instead of the raw
/// transcript, which keeps failures attributable to a specific stage.
pub struct StageController<'a, B> {
    backend: &'a B,
    config: &'a PipelineConfig,
}

impl<'a, B: GenerationBackend> StageController<'a, B> {
    pub fn new(backend: &'a B, config: &'a PipelineConfig) -> Self {
        Self { backend, config }
    }

    /// Drive the state machine to completion for one normalized transcript.
    pub async fn run(
        &self,
        normalized: &NormalizedTranscript,
    ) -> Result<FinalReport, PipelineError> {
        let mut state = PipelineState::Idle;

        loop {
            state = match state {
                PipelineState::Idle => PipelineState::Extracting,
                PipelineState::Extracting => match self.run_extraction(normalized).await {
                    Ok(analysis) => PipelineState::Synthesizing { analysis },
                    Err(error) => PipelineState::Failed { error },
                },
                PipelineState::Synthesizing { analysis } => {
                    match self.run_synthesis(&analysis).await {
                        Ok(report) => PipelineState::Done { report },
                        Err(error) => PipelineState::Failed { error },
                    }
                }
                PipelineState::Done { report } => return Ok(report),
                PipelineState::Failed { error } => return Err(error),
            };
        }
    }

    async fn run_extraction(
        &self,
        normalized: &NormalizedTranscript,
    ) -> Result<AnalysisReport, PipelineError> {
        let spec = StageSpec {
            stage: Stage::Extraction,
            system_prompt: EXTRACTION_SYSTEM_PROMPT,
            user_prompt: build_extraction_prompt(normalized.text()),
            temperature: self.config.extraction_temperature,
            response_schema: analysis_report_schema(),
        };

        let analysis: AnalysisReport =
            run_stage(self.backend, &spec, self.config.max_attempts).await?;
        info!("extraction complete: {} snippets", analysis.snippets.len());
        Ok(analysis)
    }

    async fn run_synthesis(
        &self,
        analysis: &AnalysisReport,
    ) -> Result<FinalReport, PipelineError> {
        let serialized =
            serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string());
        let spec = StageSpec {
            stage: Stage::Synthesis,
            system_prompt: SYNTHESIS_SYSTEM_PROMPT,
            user_prompt: build_synthesis_prompt(&serialized),
            temperature: self.config.synthesis_temperature,
            response_schema: final_report_schema(),
        };

        let report: FinalReport =
            run_stage(self.backend, &spec, self.config.max_attempts).await?;
        info!("synthesis complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::backend::testing::StubBackend;
    use crate::stages::normalize::normalize_transcript;

    fn normalized() -> NormalizedTranscript {
        let payload = serde_json::from_str(
            r#"{"interviewer": "Tell me about ownership.", "candidate": "Each value has one owner."}"#,
        )
        .unwrap();
        normalize_transcript(&payload)
    }

    fn analysis_json() -> String {
        r#"{"snippets": [
            {"topic": "Ownership", "quote": "Each value has one owner.", "assessment": "Accurate definition", "sentiment": "positive"}
        ]}"#
        .to_string()
    }

    fn report_json() -> String {
        r#"{
            "candidate_summary": {
                "headline": "Clear grasp of core ownership semantics",
                "overall_impression": "The candidate explained ownership accurately and concisely, suggesting solid fundamentals worth building on."
            },
            "insights": {
                "strengths": [{"skill": "Ownership", "evidence": "Accurate one-line definition"}],
                "weaknesses": [{"skill": "Depth", "evidence": "Did not mention borrowing", "priority": "Medium"}]
            },
            "development_plan": {
                "priority_topics": ["Borrowing"],
                "roadmap": [
                    {"timespan": "Day 1-5", "focus": "Borrowing", "activities": ["Read the references chapter"]},
                    {"timespan": "Day 6-10", "focus": "Practice", "activities": ["Write a lifetime-heavy parser"]}
                ],
                "recommended_resources": [
                    {"topic": "Borrowing", "link": "https://doc.rust-lang.org/book/ch04-02-references-and-borrowing.html", "reason": "Canonical reference"}
                ]
            }
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn test_runs_both_stages_in_order() {
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        backend.push_response(Ok(report_json()));
        let config = PipelineConfig::default();

        let controller = StageController::new(&backend, &config);
        let report = controller.run(&normalized()).await.unwrap();

        assert_eq!(backend.generate_calls(), 2);
        assert_eq!(report.insights.strengths.len(), 1);
    }

    #[tokio::test]
    async fn test_extraction_failure_names_extraction() {
        let backend = StubBackend::new();
        let config = PipelineConfig::default();

        let controller = StageController::new(&backend, &config);
        let error = controller.run(&normalized()).await.unwrap_err();

        match error {
            PipelineError::StageFailed { stage, .. } => assert_eq!(stage, Stage::Extraction),
            other => panic!("expected stage failure, got {other:?}"),
        }
        // Synthesis never ran
        assert_eq!(backend.generate_calls(), config.max_attempts as usize);
    }

    #[tokio::test]
    async fn test_synthesis_failure_names_synthesis() {
        let backend = StubBackend::new();
        backend.push_response(Ok(analysis_json()));
        let config = PipelineConfig::default();

        let controller = StageController::new(&backend, &config);
        let error = controller.run(&normalized()).await.unwrap_err();

        match error {
            PipelineError::StageFailed { stage, .. } => assert_eq!(stage, Stage::Synthesis),
            other => panic!("expected stage failure, got {other:?}"),
        }
    }
}
