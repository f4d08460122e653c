//! Triage CLI - defect triage pipeline front end
//!
//! The `triage` command runs the three pipeline stages against the built-in
//! demo dataset, individually or end to end.
//!
//! ## Commands
//!
//! - `link`: Trace a defect description to the requirement it violates
//! - `diagnose`: Classify the probable root cause of a defect
//! - `assign`: Rank developers to own the fix for a requirement
//! - `trace`: Run all three stages for one defect
//!
//! Point `--oracle-url` (or `TRIAGE_ORACLE_URL`) at an oracle service to
//! have every stage consult it before the local heuristics.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use uuid::Uuid;

use triage_core::{
    init_tracing, AssignmentScorer, Defect, Diagnoser, Linker, OracleClient, OracleConfig,
    Requirement, TriagePipeline, TriageReport,
};
use triage_stores::demo::{demo_catalog, demo_history, demo_workload};

#[derive(Parser)]
#[command(name = "triage")]
#[command(author = "Triage Maintainers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Defect triage: link, diagnose, assign", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Base URL of the external oracle service (optional)
    #[arg(long, global = true, env = "TRIAGE_ORACLE_URL")]
    oracle_url: Option<String>,

    /// Per-request oracle timeout in seconds
    #[arg(long, global = true, default_value = "3")]
    oracle_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trace a defect description to the requirement it violates
    Link {
        /// Defect description or error log excerpt
        defect: String,
    },

    /// Classify the probable root cause of a defect
    Diagnose {
        /// Defect description or error log excerpt
        defect: String,

        /// Text of the requirement the defect is linked to
        #[arg(short, long)]
        requirement: String,

        /// Requirement identifier (optional, informational)
        #[arg(long, default_value = "")]
        requirement_id: String,

        /// Observed latency in milliseconds, if measured
        #[arg(long, default_value = "0")]
        observed_latency_ms: u64,
    },

    /// Rank developers to own the fix for a requirement
    Assign {
        /// Requirement identifier, e.g. "REQ-101"
        requirement_id: String,
    },

    /// Run all three stages for one defect
    Trace {
        /// Defect description or error log excerpt
        defect: String,

        /// Observed latency in milliseconds, if measured
        #[arg(long, default_value = "0")]
        observed_latency_ms: u64,
    },
}

/// Envelope for `trace` output: the report plus run metadata.
#[derive(Serialize)]
struct TraceEnvelope {
    report_id: Uuid,
    generated_at: chrono::DateTime<Utc>,
    report: TriageReport,
}

fn build_oracle(cli: &Cli) -> Option<OracleClient> {
    cli.oracle_url.as_ref().map(|url| {
        info!("Oracle configured at {}", url);
        OracleClient::new(
            OracleConfig::new(url.clone())
                .with_timeout(Duration::from_secs(cli.oracle_timeout_secs)),
        )
    })
}

fn build_pipeline(oracle: Option<OracleClient>) -> TriagePipeline {
    let mut linker = Linker::new(Arc::new(demo_catalog()));
    let mut diagnoser = Diagnoser::new();
    let mut scorer = AssignmentScorer::new(Arc::new(demo_history()), Arc::new(demo_workload()));

    if let Some(oracle) = oracle {
        linker = linker.with_oracle(oracle.clone());
        diagnoser = diagnoser.with_oracle(oracle.clone());
        scorer = scorer.with_oracle(oracle);
    }

    TriagePipeline::new(linker, diagnoser, scorer)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_link(pipeline: &TriagePipeline, defect: &str) -> Result<()> {
    let result = pipeline.linker().link(defect).await?;
    print_json(&result)
}

async fn cmd_diagnose(
    pipeline: &TriagePipeline,
    defect: &str,
    requirement_id: &str,
    requirement_text: &str,
    observed_latency_ms: u64,
) -> Result<()> {
    let defect = Defect::new(defect).with_observed_latency(observed_latency_ms);
    let requirement = Requirement::new(requirement_id, requirement_text);

    let diagnosis = pipeline.diagnoser().diagnose(&defect, &requirement).await;
    print_json(&diagnosis)
}

async fn cmd_assign(pipeline: &TriagePipeline, requirement_id: &str) -> Result<()> {
    let assignment = pipeline.scorer().rank(requirement_id).await?;
    print_json(&assignment)
}

async fn cmd_trace(
    pipeline: &TriagePipeline,
    defect: &str,
    observed_latency_ms: u64,
) -> Result<()> {
    let defect = Defect::new(defect).with_observed_latency(observed_latency_ms);
    let report = pipeline.run(&defect).await?;

    print_json(&TraceEnvelope {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        report,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let pipeline = build_pipeline(build_oracle(&cli));

    match &cli.command {
        Commands::Link { defect } => cmd_link(&pipeline, defect).await,
        Commands::Diagnose {
            defect,
            requirement,
            requirement_id,
            observed_latency_ms,
        } => {
            cmd_diagnose(
                &pipeline,
                defect,
                requirement_id,
                requirement,
                *observed_latency_ms,
            )
            .await
        }
        Commands::Assign { requirement_id } => cmd_assign(&pipeline, requirement_id).await,
        Commands::Trace {
            defect,
            observed_latency_ms,
        } => cmd_trace(&pipeline, defect, *observed_latency_ms).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pipeline_without_oracle_builds_and_links() {
        let pipeline = build_pipeline(None);
        let result = pipeline
            .linker()
            .link("Latency observed: 1458ms in PatientDAO access.")
            .await
            .unwrap();

        assert_eq!(result.requirement.unwrap().id, "REQ-101");
    }

    #[test]
    fn test_cli_parses_trace_with_latency() {
        let cli = Cli::parse_from([
            "triage",
            "trace",
            "Gateway timeout on PatientDAO",
            "--observed-latency-ms",
            "1200",
        ]);

        match cli.command {
            Commands::Trace {
                observed_latency_ms,
                ..
            } => assert_eq!(observed_latency_ms, 1200),
            _ => panic!("expected trace command"),
        }
    }

    #[test]
    fn test_cli_parses_oracle_url_flag() {
        let cli = Cli::parse_from([
            "triage",
            "--oracle-url",
            "http://localhost:5000",
            "link",
            "some defect",
        ]);

        assert_eq!(cli.oracle_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(cli.oracle_timeout_secs, 3);
    }
}
