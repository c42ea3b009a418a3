//! Output formatting and persistence for journal statistics.
//!
//! Supports a console summary, a fixed-layout text report and a
//! multi-sheet spreadsheet.

pub mod console;
pub mod report;
pub mod spreadsheet;

pub use console::{log_json, print_summary};
pub use report::{ReportOptions, render_report, write_report};
pub use spreadsheet::{plan_sheets, write_spreadsheet};
