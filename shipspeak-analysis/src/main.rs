//! shipspeak-analyze - command-line transcript analysis
//!
//! Reads a transcript (JSON `Transcript` or plain text), runs the analysis
//! pipeline and prints the `AnalysisResult` as JSON on stdout. Progress is
//! read from the pipeline's event bus and logged through tracing on stderr.
//! Ctrl-C cancels the run.

use anyhow::{Context, Result};
use clap::Parser;
use shipspeak_analysis::config::{load_settings, log_filter, CliOverrides};
use shipspeak_analysis::types::{AnalysisDepth, BenchmarkLevel};
use shipspeak_analysis::{
    AnalysisConfiguration, AnalysisPipeline, AnalyzeRequest, CareerLevel, Industry, MeetingType,
    Transcript,
};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command-line arguments for shipspeak-analyze
#[derive(Parser, Debug)]
#[command(name = "shipspeak-analyze")]
#[command(about = "Analyze a meeting transcript for career-progression communication patterns")]
#[command(version)]
struct Args {
    /// Transcript file (.json Transcript, anything else is read as plain text)
    transcript: PathBuf,

    /// Current career level (IC, SENIOR, STAFF, PRINCIPAL, DIRECTOR, VP)
    #[arg(long)]
    current_level: CareerLevel,

    /// Target career level (defaults to the next level up)
    #[arg(long)]
    target_level: Option<CareerLevel>,

    /// Industry (HEALTHCARE, CYBERSECURITY, FINTECH, ENTERPRISE, CONSUMER)
    #[arg(long)]
    industry: Industry,

    /// Meeting type; overrides the one in a JSON transcript
    #[arg(long)]
    meeting_type: Option<MeetingType>,

    /// Analysis depth (QUICK, STANDARD, COMPREHENSIVE)
    #[arg(long)]
    depth: Option<AnalysisDepth>,

    /// Benchmark population (INDUSTRY, CAREER_LEVEL, TOP_PERFORMERS)
    #[arg(long)]
    benchmark: Option<BenchmarkLevel>,

    /// Skip practice-module recommendations
    #[arg(long)]
    no_modules: bool,

    /// Settings file
    #[arg(long, env = "SHIPSPEAK_CONFIG")]
    config: Option<PathBuf>,

    /// Wall-clock budget in seconds (0 disables)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

const DEFAULT_MEETING_TYPE: MeetingType = MeetingType::StakeholderReview;

fn read_transcript(path: &Path, meeting_type: Option<MeetingType>) -> Result<Transcript> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let mut transcript: Transcript = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse transcript JSON {}", path.display()))?;
        if let Some(meeting_type) = meeting_type {
            transcript.meeting_type = meeting_type;
        }
        Ok(transcript)
    } else {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "transcript".to_string());
        Ok(Transcript::from_text(
            id,
            content,
            meeting_type.unwrap_or(DEFAULT_MEETING_TYPE),
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = load_settings(&CliOverrides {
        config_path: args.config.clone(),
        timeout_secs: args.timeout_secs,
    })
    .context("Failed to load settings")?;

    // Initialize tracing (stderr, so stdout carries only the result)
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(log_filter(&settings)))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting shipspeak-analyze v{}", env!("CARGO_PKG_VERSION"));

    let transcript = read_transcript(&args.transcript, args.meeting_type)?;

    let mut configuration = AnalysisConfiguration::default();
    if let Some(depth) = args.depth {
        configuration.analysis_depth = depth;
    }
    if let Some(benchmark) = args.benchmark {
        configuration.benchmark_level = benchmark;
    }
    configuration.generate_practice_modules = !args.no_modules;

    let request = AnalyzeRequest {
        transcript,
        current_career_level: args.current_level,
        target_career_level: args.target_level,
        industry: args.industry,
        configuration: Some(configuration),
    };

    let pipeline = AnalysisPipeline::new(settings);

    // Progress reporter; ends when the pipeline (and its bus sender) is dropped
    let mut progress_rx = pipeline.subscribe();
    let reporter = tokio::spawn(async move {
        loop {
            match progress_rx.recv().await {
                Ok(event) => info!(
                    stage = ?event.stage,
                    progress = event.progress,
                    eta_secs = event.estimated_seconds_remaining,
                    "{}",
                    event.current_task
                ),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Progress reporter lagged behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling analysis");
            ctrl_c.cancel();
        }
    });

    let outcome = pipeline.analyze_with_cancel(request, cancel).await;
    drop(pipeline);
    if let Err(e) = reporter.await {
        warn!(error = %e, "Progress reporter task failed");
    }
    let result = outcome.context("Analysis failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    Ok(())
}
