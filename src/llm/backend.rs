use serde_json::Value;
use thiserror::Error;

/// Failures from the generation backend.
///
/// Transport and API errors are transient from the retry loop's perspective;
/// `Malformed` means the output still failed to conform to the stage schema
/// after a repair pass.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no text content in backend response")]
    EmptyResponse,

    #[error("output did not conform to the response schema: {0}")]
    Malformed(String),
}

/// One structured-output generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f64,
    /// JSON schema the raw output must parse against
    pub response_schema: &'a Value,
}

/// The generation capability the pipeline consumes.
///
/// Two independently retryable phases: `generate` produces raw text expected
/// to parse against the request schema, and `repair` re-prompts the backend
/// to reformat its own malformed output. Calls are idempotent from the
/// caller's perspective; there is no session state.
pub trait GenerationBackend {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    fn repair(
        &self,
        malformed: &str,
        request: &GenerationRequest<'_>,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

impl<B: GenerationBackend + Sync> GenerationBackend for &B {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, BackendError> {
        (**self).generate(request).await
    }

    async fn repair(
        &self,
        malformed: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<String, BackendError> {
        (**self).repair(malformed, request).await
    }
}
