//! Reproducible synthetic grade data for the dashboard.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::loader::{GradeRow, GradeSheet};

/// Quarterly class averages shown on the trend panel.
pub const QUARTER_TREND: [(&str, f64); 4] = [("Q1", 3.9), ("Q2", 4.0), ("Q3", 4.2), ("Q4", 4.3)];

pub const LOWEST_GRADE: u8 = 3;
pub const HIGHEST_GRADE: u8 = 5;

/// Builds a sheet of `students` rows named `Student_1..=Student_N`.
///
/// Grades are drawn uniformly from `LOWEST_GRADE..=HIGHEST_GRADE`, one
/// subject column at a time. The same seed always yields the same sheet.
pub fn generate_sheet(seed: u64, students: usize, subjects: &[String]) -> GradeSheet {
    let mut rng = StdRng::seed_from_u64(seed);

    let columns: Vec<Vec<f64>> = subjects
        .iter()
        .map(|_| {
            (0..students)
                .map(|_| f64::from(rng.random_range(LOWEST_GRADE..=HIGHEST_GRADE)))
                .collect()
        })
        .collect();

    let rows = (0..students)
        .map(|i| GradeRow {
            name: format!("Student_{}", i + 1),
            grades: columns.iter().map(|column| column[i]).collect(),
        })
        .collect();

    GradeSheet {
        id_column: "Student".to_string(),
        subjects: subjects.to_vec(),
        rows,
    }
}
