use serde::Serialize;

use crate::analyzers::grade::{Status, status};
use crate::analyzers::utility::{mean, round2};
use crate::loader::GradeSheet;

/// A student row with its derived average and status attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    /// Grades aligned with [`Journal::subjects`].
    pub grades: Vec<f64>,
    /// Mean of `grades`, rounded to two decimals.
    pub average: f64,
    pub status: Status,
}

/// The full class journal after per-student statistics are computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journal {
    pub id_column: String,
    pub subjects: Vec<String>,
    pub students: Vec<StudentRecord>,
}

impl Journal {
    /// Grades of every student for the subject at `index`.
    pub fn subject_grades(&self, index: usize) -> Vec<f64> {
        self.students
            .iter()
            .filter_map(|s| s.grades.get(index).copied())
            .collect()
    }
}

impl StudentRecord {
    pub fn from_grades(name: String, grades: Vec<f64>) -> Self {
        let average = round2(mean(&grades));
        StudentRecord {
            name,
            grades,
            average,
            status: status(average),
        }
    }
}

/// Attaches an average and status to every row of the sheet.
pub fn compute_student_stats(sheet: GradeSheet) -> Journal {
    let students = sheet
        .rows
        .into_iter()
        .map(|row| StudentRecord::from_grades(row.name, row.grades))
        .collect();

    Journal {
        id_column: sheet.id_column,
        subjects: sheet.subjects,
        students,
    }
}

/// Percentage of `part` in `total`; 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
