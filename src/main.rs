use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use debrief::{
    AnalyzeOptions, GeminiClient, GeminiConfig, HumanReport, InterviewPipeline, PipelineConfig,
    ReportCache, ReportDocument, TranscriptPayload, load_request_file, normalize_transcript,
    validate_transcript,
};

#[derive(Parser)]
#[command(name = "debrief")]
#[command(author, version, about = "Interview transcript analysis pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an interview transcript and produce a development report
    Analyze {
        /// Input request file (JSON: metadata + transcript, or a bare transcript map)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the report document (JSON); stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a human-readable report (markdown)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Retry budget per generation stage
        #[arg(long, default_value = "3")]
        max_attempts: u32,

        /// Disable the result cache
        #[arg(long)]
        no_cache: bool,

        /// Skip input validation
        #[arg(long)]
        skip_input_validation: bool,

        /// Skip the report quality check
        #[arg(long)]
        skip_quality_check: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a transcript without invoking the generation backend
    Validate {
        /// Input request file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output,
            human_readable,
            model,
            max_attempts,
            no_cache,
            skip_input_validation,
            skip_quality_check,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(
                input,
                output,
                human_readable,
                model,
                max_attempts,
                no_cache,
                skip_input_validation,
                skip_quality_check,
            )
            .await
        }
        Commands::Validate { input, verbose } => {
            setup_logging(verbose);
            validate_only(input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn analyze_transcript(
    input: PathBuf,
    output: Option<PathBuf>,
    human_readable: Option<PathBuf>,
    model: Option<String>,
    max_attempts: u32,
    no_cache: bool,
    skip_input_validation: bool,
    skip_quality_check: bool,
) -> Result<()> {
    info!("Loading request from {:?}", input);
    let request = load_request_file(&input).context("Failed to load analysis request")?;
    info!("Loaded transcript with {} entries", request.transcript.len());

    let mut api_config = GeminiConfig::from_env()?;
    if let Some(model) = model {
        api_config.model = model;
    }
    let model_name = api_config.model.clone();
    let backend = GeminiClient::new(api_config)?;

    let pipeline_config = PipelineConfig {
        max_attempts,
        enable_cache: !no_cache,
        ..Default::default()
    };
    let pipeline = InterviewPipeline::new(backend, pipeline_config);

    let options = AnalyzeOptions {
        validate_input: !skip_input_validation,
        validate_output: !skip_quality_check,
        use_cache: !no_cache,
    };

    let payload = request.into_payload();
    let report = match pipeline.analyze(&payload, &options).await {
        Ok(report) => report,
        Err(err) => {
            error!("{err}");
            // Bad input and internal failures get distinct exit codes
            let code = if err.is_client_error() { 2 } else { 1 };
            std::process::exit(code);
        }
    };

    info!(
        "Report: {} strengths, {} weaknesses, {} roadmap steps, {} resources",
        report.insights.strengths.len(),
        report.insights.weaknesses.len(),
        report.development_plan.roadmap.len(),
        report.development_plan.recommended_resources.len()
    );

    match &output {
        Some(path) => {
            ReportDocument::new(&report, &model_name).write_json(path)?;
            info!("Report written to {:?}", path);
        }
        None => {
            let rendered = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report")?;
            println!("{rendered}");
        }
    }

    if let Some(path) = human_readable {
        HumanReport::new(&report).write_file(&path)?;
        info!("Human-readable report written to {:?}", path);
    }

    Ok(())
}

fn validate_only(input: PathBuf) -> Result<()> {
    info!("Loading request from {:?}", input);
    let request = load_request_file(&input).context("Failed to load analysis request")?;
    let payload = TranscriptPayload::from(request.transcript);

    println!("Transcript Validation");
    println!("=====================");

    match validate_transcript(&payload) {
        Ok(()) => {
            let normalized = normalize_transcript(&payload);
            println!("Status: valid");
            println!("Entries: {}", normalized.entry_count());
            println!("Normalized length: {} chars", normalized.text().len());
            println!(
                "Fingerprint: {}",
                ReportCache::fingerprint(normalized.text())
            );
            Ok(())
        }
        Err(err) => {
            println!("Status: invalid");
            println!("Reason: {err}");
            std::process::exit(2);
        }
    }
}
