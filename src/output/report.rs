use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tracing::debug;

use crate::analyzers::grade::Status;
use crate::analyzers::selectors::{ATTENTION_THRESHOLD, struggling_students, top_students};
use crate::analyzers::types::{ClassStatistics, SubjectStatistics};
use crate::stats::{Journal, pct};

const WIDTH: usize = 80;

/// Knobs for the text report layout.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub top_n: usize,
    pub attention_threshold: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            attention_threshold: ATTENTION_THRESHOLD,
        }
    }
}

/// Renders the class report as plain text.
pub fn render_report(
    journal: &Journal,
    class: &ClassStatistics,
    subjects: &[SubjectStatistics],
    generated_at: NaiveDateTime,
    options: ReportOptions,
) -> String {
    let banner = "=".repeat(WIDTH);
    let rule = "-".repeat(WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "CLASS PERFORMANCE REPORT");
    let _ = writeln!(out, "Date: {}", generated_at.format("%d.%m.%Y %H:%M"));
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);

    let avg = &class.averages;
    let _ = writeln!(out, "CLASS SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total students: {}", class.total_students);
    let _ = writeln!(out, "Class average: {:.2}", avg.mean);
    let _ = writeln!(out, "Median: {:.2}", avg.median);
    let _ = writeln!(out, "Standard deviation: {:.2}", avg.std_dev);
    let _ = writeln!(out, "Lowest average: {:.2}", avg.min);
    let _ = writeln!(out, "Highest average: {:.2}", avg.max);
    let _ = writeln!(out);

    let _ = writeln!(out, "STATUS DISTRIBUTION");
    let _ = writeln!(out, "{rule}");
    for status in Status::ALL {
        let count = class.status_counts.get(status);
        let _ = writeln!(
            out,
            "{}: {} ({:.1}%)",
            capitalize(status.label()),
            count,
            pct(count, class.total_students)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "SUBJECT STATISTICS");
    let _ = writeln!(out, "{rule}");
    for subject in subjects {
        let s = &subject.stats;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", subject.subject);
        let _ = writeln!(out, "  Mean: {:.2}", s.mean);
        let _ = writeln!(out, "  Median: {:.2}", s.median);
        let _ = writeln!(out, "  Std. deviation: {:.2}", s.std_dev);
        let _ = writeln!(out, "  Min/Max: {:.0} / {:.0}", s.min, s.max);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "TOP {} STUDENTS", options.top_n);
    let _ = writeln!(out, "{rule}");
    for (rank, student) in top_students(journal, options.top_n).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: {:.2} ({})",
            rank + 1,
            student.name,
            student.average,
            student.status
        );
    }

    let struggling = struggling_students(journal, options.attention_threshold);
    if !struggling.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{banner}");
        let _ = writeln!(out, "STUDENTS NEEDING ATTENTION");
        let _ = writeln!(out, "{rule}");
        for student in struggling {
            let _ = writeln!(out, "  • {}: {:.2}", student.name, student.average);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "End of report");
    let _ = writeln!(out, "{banner}");

    out
}

/// Renders the report and writes it to `path`, replacing any existing file.
pub fn write_report(
    path: &Path,
    journal: &Journal,
    class: &ClassStatistics,
    subjects: &[SubjectStatistics],
    generated_at: NaiveDateTime,
    options: ReportOptions,
) -> Result<()> {
    let report = render_report(journal, class, subjects, generated_at, options);
    debug!(path = %path.display(), bytes = report.len(), "Writing text report");

    std::fs::write(path, report)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
