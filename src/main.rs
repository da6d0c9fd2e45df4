//! problem-analyzer - scores the complexity of a business problem statement.
//!
//! ```text
//! problem-analyzer --customer Nike --industry "Consumer Goods" \
//!     --problem "Customer churn is rising in two regions" [--dimension V] [--json]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use problem_analyzer::adapters::{HttpReasoningTransport, ResilientStageInvoker, RetryPolicy, ServiceIdentity};
use problem_analyzer::application::{
    AnalysisError, PipelineOrchestrator, RunAnalysisCommand, RunAnalysisHandler, RunAnalysisResult,
};
use problem_analyzer::config::{AppConfig, LogFormat, LoggingConfig};
use problem_analyzer::domain::analysis::{AnalysisSession, ExecutiveSummary, QuestionView};
use problem_analyzer::domain::catalog::{StageCatalog, StageDefinition};
use problem_analyzer::domain::foundation::{AnalysisId, Dimension, Timestamp};
use problem_analyzer::ports::ProgressListener;

#[derive(Parser, Debug)]
#[command(name = "problem-analyzer", version)]
#[command(about = "Analyze a business problem along the VUIA dimensions")]
struct Cli {
    /// Customer the problem belongs to
    #[arg(long)]
    customer: String,

    /// Customer industry
    #[arg(long, default_value = "")]
    industry: String,

    /// Problem statement text
    #[arg(long, conflicts_with = "problem_file", required_unless_present = "problem_file")]
    problem: Option<String>,

    /// Read the problem statement from a file
    #[arg(long, value_name = "PATH")]
    problem_file: Option<PathBuf>,

    /// Only show the questions of one dimension (name or letter, e.g. `volatility` or `V`)
    #[arg(long, value_name = "DIMENSION")]
    dimension: Option<Dimension>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

/// Prints stage progress to stderr.
struct ConsoleProgress;

impl ProgressListener for ConsoleProgress {
    fn on_stage_started(&self, index: usize, total: usize, stage: &StageDefinition) {
        eprintln!("[{}/{}] {}", index + 1, total, stage.description());
    }

    fn on_stage_finished(&self, _index: usize, _total: usize, stage: &StageDefinition, succeeded: bool) {
        if !succeeded {
            eprintln!("      {} failed, continuing", stage.name());
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    run_id: AnalysisId,
    started_at: Timestamp,
    finished_at: Timestamp,
    failed_stages: &'a [String],
    summary: Option<ExecutiveSummary>,
    session: &'a AnalysisSession,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    if let Err(err) = config.validate() {
        error!(error = %err, "invalid configuration");
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    let problem_text = match read_problem(&cli) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpReasoningTransport::new(config.retry.timeout()) {
        Ok(transport) => transport,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut identity = ServiceIdentity::new(config.service.user_id.clone());
    if let Some(tenant) = config.service.tenant() {
        identity = identity.with_tenant(tenant);
    }
    if let Some(token) = config.service.auth_token.clone() {
        identity = identity.with_auth_token(token);
    }
    let policy = RetryPolicy::new(config.retry.max_attempts, config.retry.backoff_unit());
    let invoker = Arc::new(ResilientStageInvoker::new(transport, identity, policy));

    let catalog = Arc::new(StageCatalog::standard(&config.service.endpoint_template()));
    let orchestrator = PipelineOrchestrator::new(catalog.clone(), invoker).with_listener(Arc::new(ConsoleProgress));
    let handler = RunAnalysisHandler::new(Arc::new(orchestrator));

    info!(stages = catalog.len(), base_url = %config.service.base_url, "starting analysis");
    let cmd = RunAnalysisCommand::new(cli.customer, cli.industry, problem_text);

    match handler.handle(cmd).await {
        Ok(result) => {
            if cli.json {
                print_json(&result)
            } else {
                print_report(&catalog, &result, cli.dimension);
                ExitCode::SUCCESS
            }
        }
        Err(AnalysisError::InvalidInput(warning)) => {
            eprintln!("warning: {}", warning);
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("An error occurred during analysis: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn read_problem(cli: &Cli) -> Result<String, std::io::Error> {
    match (&cli.problem, &cli.problem_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path),
        (None, None) => Ok(String::new()),
    }
}

fn print_json(result: &RunAnalysisResult) -> ExitCode {
    let report = JsonReport {
        run_id: result.run_id,
        started_at: result.started_at,
        finished_at: result.finished_at,
        failed_stages: &result.failed_stages,
        summary: ExecutiveSummary::from_session(&result.session),
        session: &result.session,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_report(catalog: &StageCatalog, result: &RunAnalysisResult, focus: Option<Dimension>) {
    let session = &result.session;
    let Some(summary) = ExecutiveSummary::from_session(session) else {
        println!("No analysis completed");
        return;
    };

    println!("Customer: {}  Industry: {}", summary.customer, summary.industry);
    println!();
    println!("Overall Difficulty Score: {}/5 ({})", summary.overall_score, summary.level.label());
    println!("{}", summary.recommendation);
    for action in summary.actions {
        println!("  - {}", action);
    }
    println!();

    println!("VUIA Dimensions");
    for (dimension, score) in session.dimension_scores().iter() {
        println!("  {:<20} {}", dimension.name(), score);
    }
    println!(
        "Primary challenge: {} ({}). {}",
        summary.primary_dimension, summary.primary_score, summary.focus_recommendation
    );
    println!();

    let shown = Dimension::ALL
        .into_iter()
        .filter(|dimension| focus.map_or(true, |focus| focus == *dimension));
    for dimension in shown {
        println!("{} ({})", dimension.name(), dimension.description());
        for view in QuestionView::for_dimension(catalog, session, dimension) {
            let score = view
                .score
                .map(|s| format!("{:.1}/5", s.value()))
                .unwrap_or_else(|| "n/a".to_string());
            println!("  {} [{}]", view.description, score);
            for line in view.display_text.lines() {
                println!("    {}", line);
            }
        }
        println!();
    }

    if !result.failed_stages.is_empty() {
        println!("Stages that failed: {}", result.failed_stages.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_filter_accepts_names_and_letters() {
        let cli = Cli::try_parse_from(["problem-analyzer", "--customer", "Nike", "--problem", "Churn", "--dimension", "V"])
            .unwrap();
        assert_eq!(cli.dimension, Some(Dimension::Volatility));

        let cli = Cli::try_parse_from([
            "problem-analyzer",
            "--customer",
            "Nike",
            "--problem",
            "Churn",
            "--dimension",
            "interconnectedness",
        ])
        .unwrap();
        assert_eq!(cli.dimension, Some(Dimension::Interconnectedness));
    }

    #[test]
    fn unknown_dimension_is_a_usage_error() {
        let result = Cli::try_parse_from(["problem-analyzer", "--customer", "Nike", "--problem", "Churn", "--dimension", "clarity"]);
        assert!(result.is_err());
    }
}
