//! Multi-sheet XLSX export of the analysed journal.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::analyzers::grade::Status;
use crate::analyzers::selectors::sorted_by_average;
use crate::stats::{Journal, StudentRecord};

pub const FULL_SHEET: &str = "Full journal";
pub const BEST_SHEET: &str = "Excellent and good";
pub const ATTENTION_SHEET: &str = "Needs attention";

pub const AVERAGE_HEADER: &str = "Average";
pub const STATUS_HEADER: &str = "Status";

/// One worksheet to be written: its name and rows in output order.
#[derive(Debug)]
pub struct SheetPlan<'a> {
    pub name: &'static str,
    pub students: Vec<&'a StudentRecord>,
}

/// Decides which sheets the workbook gets.
///
/// - [`FULL_SHEET`]: every student, best average first.
/// - [`BEST_SHEET`]: excellent and good students, best first.
/// - [`ATTENTION_SHEET`]: average below `threshold`, worst first; left out
///   when nobody qualifies.
pub fn plan_sheets(journal: &Journal, threshold: f64) -> Vec<SheetPlan<'_>> {
    let descending = sorted_by_average(journal, true);

    let best = descending
        .iter()
        .copied()
        .filter(|s| matches!(s.status, Status::Excellent | Status::Good))
        .collect();

    let attention: Vec<_> = sorted_by_average(journal, false)
        .into_iter()
        .filter(|s| s.average < threshold)
        .collect();

    let mut sheets = vec![
        SheetPlan {
            name: FULL_SHEET,
            students: descending,
        },
        SheetPlan {
            name: BEST_SHEET,
            students: best,
        },
    ];

    if !attention.is_empty() {
        sheets.push(SheetPlan {
            name: ATTENTION_SHEET,
            students: attention,
        });
    }

    sheets
}

/// Writes the planned sheets to an `.xlsx` file at `path`.
pub fn write_spreadsheet(path: &Path, journal: &Journal, threshold: f64) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let two_decimals = Format::new().set_num_format("0.00");

    for plan in plan_sheets(journal, threshold) {
        debug!(sheet = plan.name, rows = plan.students.len(), "Adding worksheet");
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(plan.name)?;
        fill_sheet(worksheet, journal, &plan.students, &header, &two_decimals)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save spreadsheet to {}", path.display()))?;

    Ok(())
}

fn fill_sheet(
    worksheet: &mut Worksheet,
    journal: &Journal,
    students: &[&StudentRecord],
    header: &Format,
    two_decimals: &Format,
) -> Result<()> {
    let subject_count = journal.subjects.len() as u16;
    let average_col = subject_count + 1;
    let status_col = subject_count + 2;

    worksheet.write_string_with_format(0, 0, &journal.id_column, header)?;
    for (i, subject) in journal.subjects.iter().enumerate() {
        worksheet.write_string_with_format(0, i as u16 + 1, subject, header)?;
    }
    worksheet.write_string_with_format(0, average_col, AVERAGE_HEADER, header)?;
    worksheet.write_string_with_format(0, status_col, STATUS_HEADER, header)?;
    worksheet.set_freeze_panes(1, 0)?;

    for (i, student) in students.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &student.name)?;
        for (col, grade) in student.grades.iter().enumerate() {
            worksheet.write_number(row, col as u16 + 1, *grade)?;
        }
        worksheet.write_number_with_format(row, average_col, student.average, two_decimals)?;
        worksheet.write_string(row, status_col, student.status.label())?;
    }

    worksheet.set_column_width(0, 24)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_journal;
    use crate::stats::compute_student_stats;
    use std::env;
    use std::fs;

    fn journal(csv: &str) -> Journal {
        compute_student_stats(parse_journal(csv.as_bytes()).unwrap())
    }

    fn names(plan: &SheetPlan<'_>) -> Vec<String> {
        plan.students.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn test_plan_three_sheets() {
        let j = journal("Student,Math\nAnn,3\nBob,5\nCid,2\nDan,4\nEve,3.4\n");
        let sheets = plan_sheets(&j, 3.5);

        assert_eq!(sheets.len(), 3);
        assert_eq!(sheets[0].name, FULL_SHEET);
        assert_eq!(names(&sheets[0]), vec!["Bob", "Dan", "Eve", "Ann", "Cid"]);
        assert_eq!(sheets[1].name, BEST_SHEET);
        assert_eq!(names(&sheets[1]), vec!["Bob", "Dan"]);
        assert_eq!(sheets[2].name, ATTENTION_SHEET);
        assert_eq!(names(&sheets[2]), vec!["Cid", "Ann", "Eve"]);
    }

    #[test]
    fn test_attention_sheet_omitted_when_empty() {
        let j = journal("Student,Math\nAnn,5\nBob,4\n");
        let sheets = plan_sheets(&j, 3.5);

        assert_eq!(sheets.len(), 2);
        assert!(sheets.iter().all(|s| s.name != ATTENTION_SHEET));
    }

    #[test]
    fn test_write_spreadsheet_creates_file() {
        let path = env::temp_dir().join("journal_stats_test_sheet.xlsx");
        let _ = fs::remove_file(&path);

        let j = journal("Student,Math,Physics\nAnn,5,4\nBob,3,3\n");
        write_spreadsheet(&path, &j, 3.5).unwrap();

        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);

        fs::remove_file(&path).unwrap();
    }
}
