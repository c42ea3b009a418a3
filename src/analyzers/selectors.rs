//! Row selections used by the report and spreadsheet writers.

use crate::stats::{Journal, StudentRecord};

/// Default cut-off below which a student is listed as needing attention.
pub const ATTENTION_THRESHOLD: f64 = 3.5;

/// Returns up to `n` students with the highest average, best first.
/// Equal averages keep their original row order.
pub fn top_students(journal: &Journal, n: usize) -> Vec<&StudentRecord> {
    let mut ranked = sorted_by_average(journal, true);
    ranked.truncate(n);
    ranked
}

/// Returns the students whose average is strictly below `threshold`, in row order.
pub fn struggling_students(journal: &Journal, threshold: f64) -> Vec<&StudentRecord> {
    journal
        .students
        .iter()
        .filter(|s| s.average < threshold)
        .collect()
}

/// All students ordered by average; the sort is stable.
pub fn sorted_by_average(journal: &Journal, descending: bool) -> Vec<&StudentRecord> {
    let mut students: Vec<&StudentRecord> = journal.students.iter().collect();
    if descending {
        students.sort_by(|a, b| b.average.total_cmp(&a.average));
    } else {
        students.sort_by(|a, b| a.average.total_cmp(&b.average));
    }
    students
}
