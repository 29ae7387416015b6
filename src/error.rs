use std::fmt;

use thiserror::Error;

use crate::llm::BackendError;

/// Identifies a generation stage in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// First stage: extract factual performance snippets from the transcript
    Extraction,
    /// Second stage: synthesize the development report from the snippets
    Synthesis,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Extraction => "extraction",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failures the pipeline surfaces to its caller.
///
/// The two variants map to distinct boundary outcomes: an invalid transcript
/// is a client-side problem, a failed stage is an internal one.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The transcript failed structural validation before any generation call
    #[error("invalid transcript: {0}")]
    InvalidTranscript(String),

    /// A generation stage exhausted its retry budget
    #[error("{stage} stage failed after {attempts} attempt(s): {source}")]
    StageFailed {
        stage: Stage,
        attempts: u32,
        #[source]
        source: BackendError,
    },
}

impl PipelineError {
    /// True for failures the caller can fix by correcting the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidTranscript(_))
    }
}
