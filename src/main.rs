//! CLI entry point for the class journal statistics tool.
//!
//! Provides subcommands for analysing a grade journal into a spreadsheet
//! and text report, and for rendering a chart dashboard from synthetic data.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use journal_stats::analyzers::analyzer::analyze;
use journal_stats::config::AppConfig;
use journal_stats::dashboard::build_dashboard;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "journal_stats")]
#[command(about = "Class grade journal statistics and reports", long_about = None)]
struct Cli {
    /// JSON config file (falls back to $JOURNAL_STATS_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a journal CSV and write a spreadsheet and a text report
    Analyze {
        /// Journal CSV with a student column and one column per subject
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Spreadsheet (.xlsx) to write
        #[arg(short, long)]
        spreadsheet: Option<PathBuf>,

        /// Text report to write
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Number of students in the top list
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Averages below this are listed as needing attention
        #[arg(short, long)]
        threshold: Option<f64>,
    },
    /// Render a chart dashboard from seeded synthetic grades
    Dashboard {
        /// PNG file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for the synthetic grades
        #[arg(long)]
        seed: Option<u64>,

        /// Number of synthetic students
        #[arg(long)]
        students: Option<usize>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/journal_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("journal_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::INFO.into()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            spreadsheet,
            report,
            top,
            threshold,
        } => {
            let analysis = &mut config.analysis;
            if let Some(input) = input {
                analysis.input = input;
            }
            if let Some(spreadsheet) = spreadsheet {
                analysis.spreadsheet_output = spreadsheet;
            }
            if let Some(report) = report {
                analysis.report_output = report;
            }
            if let Some(top) = top {
                analysis.top_n = top;
            }
            if let Some(threshold) = threshold {
                analysis.attention_threshold = threshold;
            }

            if let Err(e) = analyze(analysis) {
                error!(error = %e, "Analysis aborted, no output written");
            }
        }
        Commands::Dashboard {
            output,
            seed,
            students,
        } => {
            let dashboard = &mut config.dashboard;
            if let Some(output) = output {
                dashboard.output = output;
            }
            if let Some(seed) = seed {
                dashboard.seed = seed;
            }
            if let Some(students) = students {
                dashboard.students = students;
            }

            if let Err(e) = build_dashboard(dashboard) {
                error!(error = %e, "Failed to build dashboard");
            }
        }
    }

    Ok(())
}
