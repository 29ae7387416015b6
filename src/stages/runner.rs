use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{PipelineError, Stage};
use crate::llm::{BackendError, GenerationBackend, GenerationRequest};

/// A generation stage bound to its prompt template and output contract.
#[derive(Debug)]
pub struct StageSpec<'a> {
    pub stage: Stage,
    pub system_prompt: &'a str,
    pub user_prompt: String,
    pub temperature: f64,
    pub response_schema: Value,
}

/// Execute one generation stage with bounded retry.
///
/// Each attempt calls the backend, then parses the raw output against the
/// stage's output type. A parse failure gets one repair pass (the backend
/// reformats its own output against the schema) before the attempt counts as
/// failed. Failed attempts retry immediately; exhaustion propagates the stage
/// name and the last underlying error.
pub async fn run_stage<T, B>(
    backend: &B,
    spec: &StageSpec<'_>,
    max_attempts: u32,
) -> Result<T, PipelineError>
where
    T: DeserializeOwned,
    B: GenerationBackend,
{
    let max_attempts = max_attempts.max(1);
    let request = GenerationRequest {
        system: spec.system_prompt,
        user: &spec.user_prompt,
        temperature: spec.temperature,
        response_schema: &spec.response_schema,
    };

    let mut last_error = None;

    for attempt in 1..=max_attempts {
        info!("[{}] attempt {}/{}", spec.stage, attempt, max_attempts);

        match backend.generate(&request).await {
            Ok(raw) => match parse_output::<T, B>(backend, &request, &raw, spec.stage).await {
                Ok(parsed) => {
                    info!("[{}] succeeded on attempt {}", spec.stage, attempt);
                    return Ok(parsed);
                }
                Err(e) => {
                    warn!("[{}] attempt {} produced unusable output: {}", spec.stage, attempt, e);
                    last_error = Some(e);
                }
            },
            Err(e) => {
                warn!("[{}] attempt {} failed: {}", spec.stage, attempt, e);
                last_error = Some(e);
            }
        }
    }

    Err(PipelineError::StageFailed {
        stage: spec.stage,
        attempts: max_attempts,
        source: last_error.unwrap_or(BackendError::EmptyResponse),
    })
}

/// Parse raw backend output, falling back to one repair pass on failure.
async fn parse_output<T, B>(
    backend: &B,
    request: &GenerationRequest<'_>,
    raw: &str,
    stage: Stage,
) -> Result<T, BackendError>
where
    T: DeserializeOwned,
    B: GenerationBackend,
{
    match serde_json::from_str::<T>(raw) {
        Ok(parsed) => Ok(parsed),
        Err(parse_err) => {
            warn!("[{}] output failed to parse ({}), repairing", stage, parse_err);
            let repaired = backend.repair(raw, request).await?;
            serde_json::from_str::<T>(&repaired)
                .map_err(|e| BackendError::Malformed(e.to_string()))
        }
    }
}
