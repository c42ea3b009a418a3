use std::path::PathBuf;

use chrono::Local;
use tracing::{error, info, warn};

use crate::analyzers::aggregate::{class_statistics, subject_statistics};
use crate::analyzers::selectors::top_students;
use crate::analyzers::types::{ClassStatistics, SubjectStatistics};
use crate::config::AnalysisConfig;
use crate::error::JournalError;
use crate::loader::load_journal;
use crate::output::{ReportOptions, log_json, print_summary, write_report, write_spreadsheet};
use crate::stats::{Journal, compute_student_stats};

/// Everything produced by one [`analyze`] run.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub journal: Journal,
    pub class: ClassStatistics,
    pub subjects: Vec<SubjectStatistics>,
    /// Set when the spreadsheet was written successfully.
    pub spreadsheet: Option<PathBuf>,
    /// Set when the text report was written successfully.
    pub report: Option<PathBuf>,
}

/// Loads the journal, computes statistics, prints a console summary and
/// writes the spreadsheet and text report.
///
/// A load failure aborts the run before any output is written. Failures of
/// either writer are logged and do not stop the other one.
#[tracing::instrument(skip(config), fields(input = %config.input.display()))]
pub fn analyze(config: &AnalysisConfig) -> Result<AnalysisOutcome, JournalError> {
    let sheet = load_journal(&config.input)?;

    info!("Processing journal");
    let journal = compute_student_stats(sheet);
    let class = class_statistics(&journal);
    let subjects = subject_statistics(&journal);

    if let Err(e) = log_json(&class) {
        warn!(error = %e, "Failed to serialize class statistics");
    }
    print_summary(&class, &top_students(&journal, config.top_n));

    let spreadsheet = match write_spreadsheet(
        &config.spreadsheet_output,
        &journal,
        config.attention_threshold,
    ) {
        Ok(()) => {
            info!(path = %config.spreadsheet_output.display(), "Spreadsheet saved");
            Some(config.spreadsheet_output.clone())
        }
        Err(e) => {
            error!(error = %e, "Failed to save spreadsheet");
            None
        }
    };

    let options = ReportOptions {
        top_n: config.top_n,
        attention_threshold: config.attention_threshold,
    };
    let report = match write_report(
        &config.report_output,
        &journal,
        &class,
        &subjects,
        Local::now().naive_local(),
        options,
    ) {
        Ok(()) => {
            info!(path = %config.report_output.display(), "Text report saved");
            Some(config.report_output.clone())
        }
        Err(e) => {
            error!(error = %e, "Failed to save text report");
            None
        }
    };

    info!("Analysis complete");
    Ok(AnalysisOutcome {
        journal,
        class,
        subjects,
        spreadsheet,
        report,
    })
}
