pub mod cache;
pub mod error;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod quality;
pub mod stages;

pub use cache::{CacheStats, ReportCache};
pub use error::{PipelineError, Stage};
pub use io::{HumanReport, ReportDocument, load_request_file, parse_request_json};
pub use llm::{BackendError, GeminiClient, GeminiConfig, GenerationBackend, GenerationRequest};
pub use models::{
    AnalysisReport, AnalysisRequest, FinalReport, NormalizedTranscript, TranscriptPayload,
};
pub use pipeline::{AnalyzeOptions, InterviewPipeline, PipelineConfig};
pub use quality::{QualityCheck, check_report_quality};
pub use stages::{normalize_transcript, validate_transcript};
