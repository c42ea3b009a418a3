use crate::analyzers::types::{ClassStatistics, DescriptiveStats, StatusCounts, SubjectStatistics};
use crate::analyzers::utility::{max, mean, median, min, stddev};
use crate::stats::Journal;

impl DescriptiveStats {
    /// Summarizes a series. All fields are 0.0 for empty input.
    pub fn compute(values: &[f64]) -> Self {
        let avg = mean(values);
        DescriptiveStats {
            mean: avg,
            median: median(values),
            std_dev: stddev(values, avg),
            min: min(values),
            max: max(values),
        }
    }
}

/// Aggregates per-student averages and status counts for the whole class.
pub fn class_statistics(journal: &Journal) -> ClassStatistics {
    let averages: Vec<f64> = journal.students.iter().map(|s| s.average).collect();

    let mut status_counts = StatusCounts::default();
    for student in &journal.students {
        status_counts.increment(student.status);
    }

    ClassStatistics {
        total_students: journal.students.len(),
        averages: DescriptiveStats::compute(&averages),
        status_counts,
    }
}

/// Computes [`DescriptiveStats`] independently for every subject column,
/// in column order.
pub fn subject_statistics(journal: &Journal) -> Vec<SubjectStatistics> {
    journal
        .subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| SubjectStatistics {
            subject: subject.clone(),
            stats: DescriptiveStats::compute(&journal.subject_grades(i)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::Status;
    use crate::loader::{GradeRow, GradeSheet};
    use crate::stats::compute_student_stats;

    fn sheet(rows: &[(&str, &[f64])]) -> GradeSheet {
        GradeSheet {
            id_column: "Student".to_string(),
            subjects: vec!["Math".into(), "Physics".into(), "History".into()],
            rows: rows
                .iter()
                .map(|(name, grades)| GradeRow {
                    name: name.to_string(),
                    grades: grades.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_class_statistics_two_students() {
        let journal = compute_student_stats(sheet(&[
            ("A", &[5.0, 5.0, 5.0]),
            ("B", &[3.0, 3.0, 4.0]),
        ]));
        let stats = class_statistics(&journal);

        assert_eq!(stats.total_students, 2);
        assert!((stats.averages.mean - 4.165).abs() < 1e-9);
        assert!((stats.averages.median - 4.165).abs() < 1e-9);
        assert_eq!(stats.averages.min, 3.33);
        assert_eq!(stats.averages.max, 5.0);
        assert_eq!(stats.status_counts.get(Status::Excellent), 1);
        assert_eq!(stats.status_counts.get(Status::Satisfactory), 1);
    }

    #[test]
    fn test_status_counts_partition_students() {
        let journal = compute_student_stats(sheet(&[
            ("A", &[5.0, 5.0, 4.0]),
            ("B", &[4.0, 4.0, 3.0]),
            ("C", &[3.0, 3.0, 2.0]),
            ("D", &[2.0, 2.0, 2.0]),
            ("E", &[5.0, 4.0, 4.0]),
        ]));
        let stats = class_statistics(&journal);

        assert_eq!(stats.status_counts.total(), stats.total_students);
        assert_eq!(stats.status_counts.excellent, 1);
        assert_eq!(stats.status_counts.good, 2);
        assert_eq!(stats.status_counts.satisfactory, 1);
        assert_eq!(stats.status_counts.needs_attention, 1);
    }

    #[test]
    fn test_subject_statistics_per_column() {
        let journal = compute_student_stats(sheet(&[
            ("A", &[5.0, 4.0, 3.0]),
            ("B", &[3.0, 4.0, 5.0]),
            ("C", &[4.0, 4.0, 4.0]),
        ]));
        let subjects = subject_statistics(&journal);

        assert_eq!(subjects.len(), 3);
        assert_eq!(subjects[0].subject, "Math");
        assert_eq!(subjects[0].stats.mean, 4.0);
        assert_eq!(subjects[0].stats.median, 4.0);
        assert_eq!(subjects[0].stats.std_dev, 1.0);
        assert_eq!(subjects[0].stats.min, 3.0);
        assert_eq!(subjects[0].stats.max, 5.0);
        assert_eq!(subjects[1].stats.std_dev, 0.0);
    }

    #[test]
    fn test_empty_journal_statistics_are_zero() {
        let journal = Journal {
            id_column: "Student".into(),
            subjects: vec!["Math".into()],
            students: vec![],
        };
        let stats = class_statistics(&journal);

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.averages, DescriptiveStats::default());
        assert_eq!(stats.status_counts.total(), 0);
    }
}
