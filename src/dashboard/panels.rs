//! Data behind each dashboard panel, computed before any drawing.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analyzers::aggregate::class_statistics;
use crate::analyzers::grade::Status;
use crate::analyzers::selectors::top_students;
use crate::analyzers::utility::{mean, quantile};
use crate::stats::{Journal, pct};

/// How often one integral grade occurs across the whole sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeShare {
    pub grade: i64,
    pub count: usize,
    pub percent: f64,
}

/// Five-number summary plus outliers, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value within 1.5 IQR below `q1`.
    pub lower_whisker: f64,
    /// Highest value within 1.5 IQR above `q3`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn compute(values: &[f64]) -> Self {
        let q1 = quantile(values, 0.25);
        let median = quantile(values, 0.5);
        let q3 = quantile(values, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = values
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().reduce(f64::min).unwrap_or(q1);
        let upper_whisker = inside.reduce(f64::max).unwrap_or(q3);

        let outliers = values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Best subject first.
    pub subject_means: Vec<(String, f64)>,
    /// Ascending by grade.
    pub grade_distribution: Vec<GradeShare>,
    /// Best student first.
    pub top_students: Vec<(String, f64)>,
    pub subjects: Vec<String>,
    /// One row per student, grades in `subjects` order.
    pub grade_matrix: Vec<(String, Vec<f64>)>,
    pub trend: Vec<(String, f64)>,
    /// In `subjects` order.
    pub boxes: Vec<(String, BoxStats)>,
    pub summary: Vec<String>,
}

impl DashboardData {
    pub fn from_journal(
        journal: &Journal,
        top_n: usize,
        trend: &[(&str, f64)],
        date: NaiveDate,
    ) -> Self {
        let column_means: Vec<(String, f64)> = journal
            .subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), mean(&journal.subject_grades(i))))
            .collect();

        let mut subject_means = column_means.clone();
        subject_means.sort_by(|a, b| b.1.total_cmp(&a.1));

        let boxes = journal
            .subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), BoxStats::compute(&journal.subject_grades(i))))
            .collect();

        DashboardData {
            subject_means,
            grade_distribution: grade_distribution(journal),
            top_students: top_students(journal, top_n)
                .into_iter()
                .map(|s| (s.name.clone(), s.average))
                .collect(),
            subjects: journal.subjects.clone(),
            grade_matrix: journal
                .students
                .iter()
                .map(|s| (s.name.clone(), s.grades.clone()))
                .collect(),
            trend: trend.iter().map(|(q, v)| (q.to_string(), *v)).collect(),
            boxes,
            summary: summary_lines(journal, &column_means, date),
        }
    }
}

fn grade_distribution(journal: &Journal) -> Vec<GradeShare> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for grade in journal.students.iter().flat_map(|s| &s.grades) {
        *counts.entry(grade.round() as i64).or_default() += 1;
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(grade, count)| GradeShare {
            grade,
            count,
            percent: pct(count, total),
        })
        .collect()
}

fn summary_lines(journal: &Journal, column_means: &[(String, f64)], date: NaiveDate) -> Vec<String> {
    let class = class_statistics(journal);
    let total = class.total_students;
    let rule = "=".repeat(35);

    let mut lines = vec![
        rule.clone(),
        "   CLASS STATISTICS".to_string(),
        rule.clone(),
        String::new(),
        format!("Total students: {total}"),
        String::new(),
        format!("Average: {:.2}", class.averages.mean),
        format!("Median: {:.2}", class.averages.median),
        String::new(),
        "DISTRIBUTION:".to_string(),
    ];

    for status in Status::ALL {
        let count = class.status_counts.get(status);
        lines.push(format!(
            "  {}: {} ({:.0}%)",
            status.label(),
            count,
            pct(count, total)
        ));
    }

    // first occurrence wins on ties
    let best = column_means
        .iter()
        .fold(None::<&(String, f64)>, |acc, m| match acc {
            Some(a) if a.1 >= m.1 => Some(a),
            _ => Some(m),
        });
    let hardest = column_means
        .iter()
        .fold(None::<&(String, f64)>, |acc, m| match acc {
            Some(a) if a.1 <= m.1 => Some(a),
            _ => Some(m),
        });

    lines.push(String::new());
    lines.push("SUBJECTS:".to_string());
    if let (Some((best, best_mean)), Some((hardest, hardest_mean))) = (best, hardest) {
        lines.push(format!("  Best: {best}"));
        lines.push(format!("        ({best_mean:.2})"));
        lines.push(format!("  Hardest: {hardest}"));
        lines.push(format!("        ({hardest_mean:.2})"));
    }

    lines.push(String::new());
    lines.push(format!("Date: {}", date.format("%d.%m.%Y")));
    lines.push(rule);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::synthetic::QUARTER_TREND;
    use crate::loader::parse_journal;
    use crate::stats::compute_student_stats;

    fn journal() -> Journal {
        let csv = "Student,Math,Physics,History\n\
                   Ann,5,4,3\n\
                   Bob,3,4,3\n\
                   Cid,4,4,5\n\
                   Dan,5,5,5\n";
        compute_student_stats(parse_journal(csv.as_bytes()).unwrap())
    }

    fn data() -> DashboardData {
        DashboardData::from_journal(
            &journal(),
            3,
            &QUARTER_TREND,
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
    }

    #[test]
    fn test_subject_means_sorted_descending() {
        let data = data();
        let names: Vec<_> = data.subject_means.iter().map(|(s, _)| s.as_str()).collect();

        // Math 4.25, Physics 4.25, History 4.0
        assert_eq!(names, vec!["Math", "Physics", "History"]);
        assert_eq!(data.subject_means[2].1, 4.0);
    }

    #[test]
    fn test_grade_distribution() {
        let shares = data().grade_distribution;

        assert_eq!(
            shares.iter().map(|s| (s.grade, s.count)).collect::<Vec<_>>(),
            vec![(3, 3), (4, 4), (5, 5)]
        );
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_students_best_first() {
        let top = data().top_students;
        assert_eq!(
            top,
            vec![
                ("Dan".to_string(), 5.0),
                ("Cid".to_string(), 4.33),
                ("Ann".to_string(), 4.0)
            ]
        );
    }

    #[test]
    fn test_matrix_and_trend() {
        let data = data();

        assert_eq!(data.grade_matrix.len(), 4);
        assert_eq!(data.grade_matrix[1], ("Bob".to_string(), vec![3.0, 4.0, 3.0]));
        assert_eq!(data.trend.len(), 4);
        assert_eq!(data.trend[3], ("Q4".to_string(), 4.3));
    }

    #[test]
    fn test_box_stats() {
        let stats = BoxStats::compute(&[1.0, 2.0, 3.0, 4.0, 100.0]);

        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 4.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_summary_lines() {
        let summary = data().summary;

        assert!(summary.contains(&"Total students: 4".to_string()));
        assert!(summary.contains(&"  excellent: 1 (25%)".to_string()));
        assert!(summary.contains(&"  good: 2 (50%)".to_string()));
        assert!(summary.contains(&"  Best: Math".to_string()));
        assert!(summary.contains(&"  Hardest: History".to_string()));
        assert!(summary.contains(&"Date: 17.10.2026".to_string()));
    }
}
